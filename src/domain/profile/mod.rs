pub mod entities;
pub mod errors;
pub mod ports;
pub mod services;

pub use entities::{ProfileDetails, UserProfile};
pub use errors::ProfileError;
pub use ports::ProfileRepository;
pub use services::ProfileService;
