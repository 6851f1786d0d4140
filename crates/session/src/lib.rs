//! Session lifecycle and data services for Ludex frontends

pub mod config;
pub mod games;
pub mod guard;
pub mod manager;

pub use config::SessionConfig;
pub use games::{GameShelf, StatusMessage};
pub use guard::{Navigate, ResponseGuard};
pub use manager::SessionManager;
