use async_trait::async_trait;
use uuid::Uuid;

use super::entities::Client;
use super::errors::ClientError;

#[async_trait]
pub trait ClientRepository: Send + Sync {
  async fn create(&self, client: Client) -> Result<Client, ClientError>;
  async fn update(&self, client: Client) -> Result<Client, ClientError>;
  async fn find_by_id(&self, id: Uuid) -> Result<Option<Client>, ClientError>;
  async fn find_all(&self) -> Result<Vec<Client>, ClientError>;
  async fn exists_by_name(&self, name: &str, exclude_id: Option<Uuid>)
  -> Result<bool, ClientError>;
  async fn count_time_entries(&self, id: Uuid) -> Result<i64, ClientError>;
  async fn delete(&self, id: Uuid) -> Result<(), ClientError>;
}
