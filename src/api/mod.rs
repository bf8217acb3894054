//! HTTP API module: origin gate, liveness and config relay endpoints.

pub mod handlers;
pub mod origin;
pub mod routes;

pub use handlers::AppState;
pub use origin::AllowedOrigins;
pub use routes::create_router;
