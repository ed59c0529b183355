//! In-memory implementations.

pub mod connection;

pub use connection::InMemoryConnectionRegistry;
