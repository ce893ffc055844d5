pub mod auth;
pub mod rest;

pub use auth::{Authenticator, TokenAuthenticator};
pub use rest::{AppState, RestApi};
