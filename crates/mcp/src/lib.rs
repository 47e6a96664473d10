//! MCP server exposing read-only filesystem tools confined to one directory.
//!
//! Speaks newline-delimited JSON-RPC 2.0 over stdio, one request at a time.

pub mod config;
pub mod error;
pub mod server;
pub mod tools;
pub mod transport;

pub use config::{Cli, ServerConfig};
pub use error::ServerError;
pub use server::McpServer;
