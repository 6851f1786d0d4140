//! Ludex core types and utilities

pub mod error;
pub mod session;
pub mod token;

pub use error::TokenError;
pub use session::SessionState;
pub use token::{AccessToken, decode_expiry, is_expired};
