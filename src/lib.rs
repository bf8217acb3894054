//! TerraFlow backend gateway.
//!
//! A small HTTP surface for the TerraFlow water-monitoring dashboard:
//!
//! - `GET /health` reports liveness.
//! - `GET /api/config` relays the realtime-database client credentials held
//!   in the server environment, so they never ship inside the frontend bundle.
//!
//! Every request first passes an origin gate: browsers on an allowlisted
//! origin receive credentialed CORS headers, everyone else is served without
//! them, and `OPTIONS` preflights are answered with `204` before routing.
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`api`]: Origin gate, handlers and router
//! - [`device`]: Telemetry and command wire types
//! - [`metrics`]: Prometheus request metrics
//! - [`utils`]: Utility functions

pub mod api;
pub mod config;
pub mod device;
pub mod error;
pub mod metrics;
pub mod utils;

pub use config::Config;
pub use error::{AppError, Result};

/// Service name reported by the health endpoint.
pub const APP_NAME: &str = "terraflow-backend";
