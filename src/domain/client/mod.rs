pub mod entities;
pub mod errors;
pub mod ports;
pub mod services;
pub mod value_objects;

pub use entities::Client;
pub use errors::ClientError;
pub use ports::ClientRepository;
pub use services::{ClientService, ClientUpdate};
pub use value_objects::{ClientName, ContactInfo, HourlyRate, ValueObjectError};
