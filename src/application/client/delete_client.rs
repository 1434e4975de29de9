use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::client::{ClientError, ClientService};

#[derive(Debug, Deserialize)]
pub struct DeleteClientCommand {
  pub client_id: Uuid,
}

pub struct DeleteClientUseCase {
  client_service: Arc<ClientService>,
}

impl DeleteClientUseCase {
  pub fn new(client_service: Arc<ClientService>) -> Self {
    Self { client_service }
  }

  pub async fn execute(&self, command: DeleteClientCommand) -> Result<(), ClientError> {
    self.client_service.delete_client(command.client_id).await
  }
}
