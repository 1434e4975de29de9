use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::value_objects::{ClientName, ContactInfo, HourlyRate};

// Client - the billed party (client or studio)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
  pub id: Uuid,
  pub name: ClientName,
  pub contact: ContactInfo,
  pub hourly_rate: HourlyRate,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl Client {
  pub fn new(name: ClientName, contact: ContactInfo, hourly_rate: HourlyRate) -> Self {
    let now = Utc::now();
    Self {
      id: Uuid::new_v4(),
      name,
      contact,
      hourly_rate,
      created_at: now,
      updated_at: now,
    }
  }

  pub fn rename(&mut self, name: ClientName) {
    self.name = name;
    self.updated_at = Utc::now();
  }

  pub fn update_contact(&mut self, contact: ContactInfo) {
    self.contact = contact;
    self.updated_at = Utc::now();
  }

  /// Changing the rate only affects invoices generated afterwards.
  pub fn change_rate(&mut self, hourly_rate: HourlyRate) {
    self.hourly_rate = hourly_rate;
    self.updated_at = Utc::now();
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use rust_decimal_macros::dec;

  fn client() -> Client {
    Client::new(
      ClientName::new("Studio Nord".to_string()).unwrap(),
      ContactInfo::new("Hauptstr. 1".to_string(), None).unwrap(),
      HourlyRate::new(dec!(31.50)).unwrap(),
    )
  }

  #[test]
  fn test_client_creation() {
    let client = client();
    assert_eq!(client.name.value(), "Studio Nord");
    assert_eq!(client.hourly_rate.value(), dec!(31.50));
    assert_eq!(client.created_at, client.updated_at);
  }

  #[test]
  fn test_change_rate_touches_updated_at() {
    let mut client = client();
    let before = client.updated_at;
    client.change_rate(HourlyRate::new(dec!(40)).unwrap());
    assert_eq!(client.hourly_rate.value(), dec!(40));
    assert!(client.updated_at >= before);
  }
}
