pub mod models;
pub mod repositories;

pub use repositories::UserProfileRepository;
