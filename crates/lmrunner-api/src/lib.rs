// lmrunner-api: Async Rust client for the LogicMonitor REST API (v3)

pub mod auth;
pub mod client;
pub mod debug;
pub mod devices;
pub mod error;
pub mod models;
pub mod transport;

pub use auth::ApiTarget;
pub use client::LmClient;
pub use error::Error;
pub use models::{DebugOutput, DebugSession, DeviceFilter, DeviceItem, FilterField};
pub use transport::TransportConfig;
