//! Typed front-end layer: page routing, list caching and the HTTP client the
//! portal views drive.

pub mod api;
pub mod filter;
pub mod route;
pub mod store;

pub use api::{ClientError, HttpApi, PortalApi};
pub use filter::{LevelFilter, StatusFilter};
pub use route::{Chrome, Navigator, Page, View, ViewRouter};
pub use store::PortalStore;
