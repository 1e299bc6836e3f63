//! Configuration types.

mod connection;

pub use connection::{Config, ConnectionConfig};
