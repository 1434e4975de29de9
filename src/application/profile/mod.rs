pub mod get_profile;
pub mod save_profile;

pub use get_profile::{GetProfileUseCase, ProfileDto};
pub use save_profile::{SaveProfileCommand, SaveProfileUseCase};
