pub mod app;
pub mod auth;
pub mod client;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod messages;
pub mod models;
pub mod stats;
pub mod storage;
pub mod ui;
pub mod state;

pub use app::router;
pub use auth::{CredentialVerifier, StaticCredentials};
pub use config::Config;
pub use state::AppState;
pub use storage::{load_data, persist_data};
