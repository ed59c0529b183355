//! UI layer: axum router, WebSocket transport and HTTP endpoints.

mod handler;
mod server;
mod signal;
pub mod state;

pub use server::Server;
