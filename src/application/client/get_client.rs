use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::client::{Client, ClientError, ClientService};

#[derive(Debug, Deserialize)]
pub struct GetClientCommand {
  pub client_id: Uuid,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClientDto {
  pub id: Uuid,
  pub name: String,
  pub address: String,
  pub contact_person: Option<String>,
  pub hourly_rate: Decimal,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl From<Client> for ClientDto {
  fn from(client: Client) -> Self {
    Self {
      id: client.id,
      name: client.name.into_inner(),
      address: client.contact.address,
      contact_person: client.contact.contact_person,
      hourly_rate: client.hourly_rate.value(),
      created_at: client.created_at,
      updated_at: client.updated_at,
    }
  }
}

pub struct GetClientUseCase {
  client_service: Arc<ClientService>,
}

impl GetClientUseCase {
  pub fn new(client_service: Arc<ClientService>) -> Self {
    Self { client_service }
  }

  pub async fn execute(&self, command: GetClientCommand) -> Result<ClientDto, ClientError> {
    let client = self.client_service.get_client(command.client_id).await?;
    Ok(client.into())
  }
}
