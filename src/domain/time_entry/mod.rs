pub mod entities;
pub mod errors;
pub mod ports;
pub mod services;
pub mod value_objects;

pub use entities::{TimeEntry, TimeEntryWithClient};
pub use errors::TimeEntryError;
pub use ports::{TimeEntryFilter, TimeEntryRepository};
pub use services::TimeEntryService;
pub use value_objects::{
  EntryTitle, TimeEntryStatus, TimeSpan, ValueObjectError, amount_for_seconds, hours_from_seconds,
};
