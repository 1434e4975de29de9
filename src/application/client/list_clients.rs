use serde::Serialize;
use std::sync::Arc;

use crate::domain::client::{ClientError, ClientService};

use super::get_client::ClientDto;

#[derive(Debug, Serialize)]
pub struct ListClientsResponse {
  pub clients: Vec<ClientDto>,
}

pub struct ListClientsUseCase {
  client_service: Arc<ClientService>,
}

impl ListClientsUseCase {
  pub fn new(client_service: Arc<ClientService>) -> Self {
    Self { client_service }
  }

  pub async fn execute(&self) -> Result<ListClientsResponse, ClientError> {
    let clients = self.client_service.list_clients().await?;

    Ok(ListClientsResponse {
      clients: clients.into_iter().map(ClientDto::from).collect(),
    })
  }
}
