//! ⚽ pitchside-core: football statistics tools for AI assistants.
//!
//! This crate wires a handful of read-only api-sports.io queries into
//! tools an assistant host can call over the Model Context Protocol:
//!
//! - [`config`]: Typed configuration loading from JSON
//! - [`api`]: HTTP adapter for the football API and its failure taxonomy
//! - [`tools`]: Tool trait, registry, and the football tools
//! - [`mcp`]: JSON-RPC server over stdio
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use pitchside_core::api::FootballApi;
//! use pitchside_core::config::Config;
//! use pitchside_core::mcp::{McpServer, ServerInfo};
//! use pitchside_core::tools::ToolRegistry;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = Config::load()?;
//! let api = FootballApi::from_config(&config.api);
//! let registry = ToolRegistry::football(api, &config.tools);
//!
//! let server = Arc::new(McpServer::new(registry, ServerInfo::new(&config.server.name)));
//! server.run_stdio().await?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod mcp;
pub mod tools;
