mod auth;

pub use auth::{AdminUser, AuthenticatedUser, VerifiedUser};
