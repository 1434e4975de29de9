use rust_decimal::Decimal;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::client::{
  ClientError, ClientName, ClientService, ClientUpdate, ContactInfo, HourlyRate,
};

use super::get_client::ClientDto;

/// Fields left out keep their current value. Address and contact person
/// travel together.
#[derive(Debug, Deserialize)]
pub struct UpdateClientCommand {
  pub client_id: Uuid,
  pub name: Option<String>,
  pub address: Option<String>,
  pub contact_person: Option<String>,
  pub hourly_rate: Option<Decimal>,
}

pub struct UpdateClientUseCase {
  client_service: Arc<ClientService>,
}

impl UpdateClientUseCase {
  pub fn new(client_service: Arc<ClientService>) -> Self {
    Self { client_service }
  }

  pub async fn execute(&self, command: UpdateClientCommand) -> Result<ClientDto, ClientError> {
    let name = command.name.map(ClientName::new).transpose()?;
    let hourly_rate = command.hourly_rate.map(HourlyRate::new).transpose()?;

    let contact = if command.address.is_some() || command.contact_person.is_some() {
      let current = self.client_service.get_client(command.client_id).await?;
      Some(ContactInfo::new(
        command.address.unwrap_or(current.contact.address),
        command.contact_person.or(current.contact.contact_person),
      )?)
    } else {
      None
    };

    let client = self
      .client_service
      .update_client(
        command.client_id,
        ClientUpdate {
          name,
          contact,
          hourly_rate,
        },
      )
      .await?;

    Ok(client.into())
  }
}
