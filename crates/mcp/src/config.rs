use anyhow::{Context, Result};
use clap::Parser;
use sandbox_fs_core::PathGuard;
use std::path::PathBuf;

/// Read-only filesystem MCP server confined to a single directory.
#[derive(Debug, Parser)]
#[command(name = "sandbox-fs-mcp", version, about)]
pub struct Cli {
    /// Directory to expose. Defaults to the current user's home directory.
    pub root: Option<PathBuf>,
}

/// Process-wide settings, fixed once at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub guard: PathGuard,
}

impl ServerConfig {
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let guard = PathGuard::new(&root)
            .with_context(|| format!("invalid allowed root: {}", root.display()))?;
        Ok(Self { guard })
    }

    pub fn from_cli(cli: Cli) -> Result<Self> {
        let root = match cli.root {
            Some(root) => root,
            None => dirs::home_dir().context("Could not find home directory")?,
        };
        Self::new(root)
    }
}
