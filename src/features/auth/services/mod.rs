mod auth_service;
mod identity_service;
mod token_service;

pub use auth_service::AuthService;
pub use identity_service::IdentityService;
pub use token_service::TokenService;
