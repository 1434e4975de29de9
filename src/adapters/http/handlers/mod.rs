pub mod clients;
pub mod health;
pub mod invoices;
pub mod profile;
pub mod time_entries;
