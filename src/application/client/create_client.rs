use rust_decimal::Decimal;
use serde::Deserialize;
use std::sync::Arc;

use crate::domain::client::{ClientError, ClientName, ClientService, ContactInfo, HourlyRate};

use super::get_client::ClientDto;

#[derive(Debug, Deserialize)]
pub struct CreateClientCommand {
  pub name: String,
  pub address: String,
  pub contact_person: Option<String>,
  pub hourly_rate: Decimal,
}

pub struct CreateClientUseCase {
  client_service: Arc<ClientService>,
}

impl CreateClientUseCase {
  pub fn new(client_service: Arc<ClientService>) -> Self {
    Self { client_service }
  }

  pub async fn execute(&self, command: CreateClientCommand) -> Result<ClientDto, ClientError> {
    let name = ClientName::new(command.name)?;
    let contact = ContactInfo::new(command.address, command.contact_person)?;
    let hourly_rate = HourlyRate::new(command.hourly_rate)?;

    let client = self
      .client_service
      .create_client(name, contact, hourly_rate)
      .await?;

    Ok(client.into())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::infrastructure::persistence::sqlite::{
    SqliteClientRepository, test_support::setup_test_db,
  };
  use rust_decimal_macros::dec;

  #[tokio::test]
  async fn test_create_client_trims_and_returns_dto() {
    let pool = setup_test_db().await;
    let service = Arc::new(ClientService::new(Arc::new(SqliteClientRepository::new(pool))));
    let use_case = CreateClientUseCase::new(service);

    let dto = use_case
      .execute(CreateClientCommand {
        name: "  Studio Nord ".to_string(),
        address: "Hauptstr. 1".to_string(),
        contact_person: Some("".to_string()),
        hourly_rate: dec!(31.50),
      })
      .await
      .unwrap();

    assert_eq!(dto.name, "Studio Nord");
    assert_eq!(dto.hourly_rate, dec!(31.50));
    assert!(dto.contact_person.is_none());
  }

  #[tokio::test]
  async fn test_create_client_rejects_negative_rate() {
    let pool = setup_test_db().await;
    let service = Arc::new(ClientService::new(Arc::new(SqliteClientRepository::new(pool))));
    let use_case = CreateClientUseCase::new(service);

    let err = use_case
      .execute(CreateClientCommand {
        name: "Studio Nord".to_string(),
        address: String::new(),
        contact_person: None,
        hourly_rate: dec!(-5),
      })
      .await
      .unwrap_err();

    assert!(matches!(err, ClientError::Validation(_)));
  }
}
