//! ⚽ pitchside CLI: MCP server, one-off tool calls, onboarding, and status.
//!
//! Usage:
//!   pitchside serve            Serve the football tools over stdio (default)
//!   pitchside call <tool>      Invoke one tool and print its output
//!   pitchside tools            List the exposed tools
//!   pitchside onboard          Create a default configuration
//!   pitchside status           Show current configuration and health

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use pitchside_core::api::FootballApi;
use pitchside_core::config::{Config, API_KEY_ENV};
use pitchside_core::mcp::{McpServer, ServerInfo};
use pitchside_core::tools::ToolRegistry;

#[derive(Parser)]
#[command(
    name = "pitchside",
    version,
    about = "Football statistics tools for AI assistants",
    long_about = "⚽ pitchside exposes api-sports.io football queries as MCP tools.\n\nRun with no subcommand to serve over stdio."
)]
struct Cli {
    /// Config file (default: ~/.pitchside/config.json)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the football tools over stdio
    Serve,

    /// Invoke a single tool and print its output
    Call {
        /// Tool name (e.g. search_player)
        tool: String,

        /// Tool arguments as a JSON object
        #[arg(short, long, default_value = "{}")]
        args: String,
    },

    /// List the tools the server exposes
    Tools,

    /// Create or reset the default configuration
    Onboard,

    /// Show configuration status and health
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    // stdout carries the protocol, so logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();
    let config_path = cli.config.unwrap_or_else(Config::default_path);

    match cli.command {
        Some(Commands::Serve) | None => cmd_serve(&config_path).await?,
        Some(Commands::Call { tool, args }) => cmd_call(&config_path, &tool, &args).await?,
        Some(Commands::Tools) => cmd_tools(&config_path)?,
        Some(Commands::Onboard) => cmd_onboard(&config_path)?,
        Some(Commands::Status) => cmd_status(&config_path)?,
    }

    Ok(())
}

// ── Shared Setup ────────────────────────────────────────────────────

fn load_config(path: &Path) -> Result<Config> {
    let config = if path.exists() {
        Config::load_from(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?
    } else {
        Config::default()
    };

    if let Err(errors) = config.validate() {
        eprintln!("\n  ❌ Configuration errors:");
        for e in &errors {
            eprintln!("     • {}", e);
        }
        eprintln!();
        anyhow::bail!("Fix the above {} error(s) in {}", errors.len(), path.display());
    }
    Ok(config)
}

fn build_registry(config: &Config) -> ToolRegistry {
    let api = FootballApi::from_config(&config.api);
    ToolRegistry::football(api, &config.tools)
}

// ── Serve Command ───────────────────────────────────────────────────

async fn cmd_serve(config_path: &Path) -> Result<()> {
    let config = load_config(config_path)?;
    let registry = build_registry(&config);
    if registry.is_empty() {
        tracing::warn!("No tools enabled; the host will see an empty tool list");
    }

    let server = Arc::new(McpServer::new(registry, ServerInfo::new(&config.server.name)));
    server.run_stdio().await
}

// ── Call Command ────────────────────────────────────────────────────

async fn cmd_call(config_path: &Path, tool: &str, raw_args: &str) -> Result<()> {
    let config = load_config(config_path)?;
    let registry = build_registry(&config);

    if !registry.has(tool) {
        anyhow::bail!(
            "Unknown tool '{}'. Available: {}",
            tool,
            registry.names().join(", ")
        );
    }

    let args: HashMap<String, Value> = serde_json::from_str(raw_args)
        .with_context(|| format!("--args must be a JSON object, got: {}", raw_args))?;

    let output = registry.execute(tool, args).await;
    println!("{}", output);
    if output.is_error() {
        std::process::exit(2);
    }
    Ok(())
}

// ── Tools Command ───────────────────────────────────────────────────

fn cmd_tools(config_path: &Path) -> Result<()> {
    let config = load_config(config_path)?;
    let registry = build_registry(&config);

    if registry.is_empty() {
        println!("  No tools enabled.");
        return Ok(());
    }

    println!();
    for def in registry.definitions() {
        let name = def["name"].as_str().unwrap_or_default();
        let required = def["inputSchema"]["required"]
            .as_array()
            .map(|r| {
                r.iter()
                    .filter_map(|v| v.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            })
            .unwrap_or_default();
        println!("  🔧 {}({})", name, required);
        println!("     {}", def["description"].as_str().unwrap_or_default());
        println!();
    }
    Ok(())
}

// ── Onboard Command ─────────────────────────────────────────────────

fn cmd_onboard(config_path: &Path) -> Result<()> {
    Config::write_default_template(config_path)?;
    println!();
    println!("  ✅ Configuration created at:");
    println!("     {}", config_path.display());
    println!();
    println!("  Next steps:");
    println!("  1. Replace apiKey with your api-sports.io key (or set {})", API_KEY_ENV);
    println!("  2. Register `pitchside serve` as an MCP server in your editor");
    println!();
    Ok(())
}

// ── Status Command ──────────────────────────────────────────────────

fn cmd_status(config_path: &Path) -> Result<()> {
    println!();
    println!("  ⚽ pitchside status");
    println!("  ─────────────────────────────────────");

    if config_path.exists() {
        println!("  Config:    {}", config_path.display());
    } else {
        println!("  Config:    ⚠️  Not found, using defaults (run `pitchside onboard`)");
    }

    let config = load_config(config_path)?;

    println!("  API:       {}", config.api.base_url);
    println!("  Host:      {}", config.api.host);
    if config.api.has_placeholder_key() {
        println!("  API key:   ❌ Missing or placeholder");
    } else {
        println!("  API key:   ✅ configured");
    }
    println!("  Timeout:   {}s", config.api.timeout_seconds);
    println!("  Server:    {}", config.server.name);
    println!("  Tools:     {}", config.tools.enabled.join(", "));

    println!();
    Ok(())
}
