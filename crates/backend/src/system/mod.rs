pub mod api;
pub mod auth;
pub mod handlers;
pub mod middleware;
pub mod sessions;
pub mod state;
pub mod tracing;
