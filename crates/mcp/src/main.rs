use anyhow::Result;
use clap::Parser;
use std::io;
use tracing_subscriber::EnvFilter;

use sandbox_fs_mcp::{Cli, McpServer, ServerConfig};

fn main() -> Result<()> {
    // stdout carries the protocol; logs go to stderr and only when asked for.
    if std::env::var_os("RUST_LOG").is_some() {
        tracing_subscriber::fmt()
            .with_writer(io::stderr)
            .with_env_filter(EnvFilter::from_default_env())
            .init();
    }

    let config = ServerConfig::from_cli(Cli::parse())?;
    let server = McpServer::new(config);

    let stdin = io::stdin();
    server.serve(stdin.lock(), io::stdout())
}
