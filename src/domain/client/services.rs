use std::sync::Arc;
use uuid::Uuid;

use super::entities::Client;
use super::errors::ClientError;
use super::ports::ClientRepository;
use super::value_objects::{ClientName, ContactInfo, HourlyRate};

/// Partial client update; `None` keeps the current value
#[derive(Debug, Default)]
pub struct ClientUpdate {
  pub name: Option<ClientName>,
  pub contact: Option<ContactInfo>,
  pub hourly_rate: Option<HourlyRate>,
}

pub struct ClientService {
  client_repo: Arc<dyn ClientRepository>,
}

impl ClientService {
  pub fn new(client_repo: Arc<dyn ClientRepository>) -> Self {
    Self { client_repo }
  }

  pub async fn create_client(
    &self,
    name: ClientName,
    contact: ContactInfo,
    hourly_rate: HourlyRate,
  ) -> Result<Client, ClientError> {
    if self.client_repo.exists_by_name(name.value(), None).await? {
      tracing::warn!("Rejected duplicate client name: {}", name);
      return Err(ClientError::NameAlreadyExists(name.into_inner()));
    }

    let client = Client::new(name, contact, hourly_rate);
    let created = self.client_repo.create(client).await?;
    tracing::info!("Created client {} ({})", created.name, created.id);
    Ok(created)
  }

  pub async fn update_client(
    &self,
    client_id: Uuid,
    update: ClientUpdate,
  ) -> Result<Client, ClientError> {
    let mut client = self.get_client(client_id).await?;

    if let Some(name) = update.name {
      if self
        .client_repo
        .exists_by_name(name.value(), Some(client_id))
        .await?
      {
        return Err(ClientError::NameAlreadyExists(name.into_inner()));
      }
      client.rename(name);
    }
    if let Some(contact) = update.contact {
      client.update_contact(contact);
    }
    if let Some(rate) = update.hourly_rate {
      client.change_rate(rate);
    }

    self.client_repo.update(client).await
  }

  pub async fn get_client(&self, client_id: Uuid) -> Result<Client, ClientError> {
    self
      .client_repo
      .find_by_id(client_id)
      .await?
      .ok_or(ClientError::NotFound(client_id))
  }

  pub async fn list_clients(&self) -> Result<Vec<Client>, ClientError> {
    self.client_repo.find_all().await
  }

  pub async fn delete_client(&self, client_id: Uuid) -> Result<(), ClientError> {
    // Existence check first so unknown ids report NotFound
    self.get_client(client_id).await?;

    let entries = self.client_repo.count_time_entries(client_id).await?;
    if entries > 0 {
      tracing::warn!(
        "Refusing to delete client {} with {} time entries",
        client_id,
        entries
      );
      return Err(ClientError::HasTimeEntries(entries));
    }

    self.client_repo.delete(client_id).await?;
    tracing::info!("Deleted client {}", client_id);
    Ok(())
  }
}
