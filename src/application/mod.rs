//! Application layer
//!
//! Use cases translate loosely typed commands into value objects, call the
//! domain services and shape the results into serializable responses.

pub mod client;
pub mod invoice;
pub mod profile;
pub mod time_entry;
