pub mod auth;
pub mod garden_centres;
pub mod locations;
pub mod user_profiles;
