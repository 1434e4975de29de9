pub mod client;
pub mod invoice;
pub mod profile;
pub mod time_entry;
