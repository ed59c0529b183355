//! Real-time broadcast relay over WebSocket.
//!
//! Clients connect to `/ws?name=<name>`, send `{"message": "..."}` frames and
//! receive every chat message plus join/leave notifications from all
//! connected clients.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

mod app;

pub use app::build_server;
