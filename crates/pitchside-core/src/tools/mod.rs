//! Tool system: trait, registry, and the football API tools.
//!
//! Every tool implements the `Tool` trait and is registered in a
//! `ToolRegistry` built once at start-up. The MCP server lists the
//! registry's definitions and dispatches `tools/call` by name.

pub mod args;
mod common;
pub mod leagues;
pub mod players;

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use tracing::{debug, error};

use crate::api::FootballApi;
use crate::config::ToolsConfig;

pub use common::fallback_message;

/// Names of every football tool, in registration order.
pub const FOOTBALL_TOOL_NAMES: [&str; 4] = [
    players::SEARCH_PLAYER,
    players::SEARCH_PLAYER_TEAMS,
    players::SEARCH_PLAYER_STATISTICS,
    leagues::SEARCH_LEAGUES,
];

/// What a tool hands back to the host.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutput {
    /// Raw API payload, passed through unchanged.
    Data(Value),
    /// The call went through but produced no data; echoes the inputs.
    Failure(String),
    /// The invocation itself was malformed.
    Invalid(String),
}

impl ToolOutput {
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Invalid(_))
    }
}

impl fmt::Display for ToolOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Data(value) => {
                let text = serde_json::to_string_pretty(value).map_err(|_| fmt::Error)?;
                f.write_str(&text)
            }
            Self::Failure(msg) | Self::Invalid(msg) => f.write_str(msg),
        }
    }
}

/// Trait that all host-invocable tools implement.
///
/// Each tool declares its name, description, JSON Schema parameters, and
/// an async `execute` method.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Unique tool name used by the host (e.g., "search_player").
    fn name(&self) -> &str;

    /// Human-readable description of what the tool does.
    fn description(&self) -> &str;

    /// JSON Schema for the tool's parameters.
    fn parameters(&self) -> Value;

    /// Execute the tool with the given arguments.
    async fn execute(&self, args: HashMap<String, Value>) -> ToolOutput;
}

/// Registry of host-invocable tools, keyed by name.
pub struct ToolRegistry {
    tools: BTreeMap<String, Box<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: BTreeMap::new(),
        }
    }

    /// Registry holding the football tools enabled in `config`.
    pub fn football(api: FootballApi, config: &ToolsConfig) -> Self {
        let candidates: Vec<Box<dyn Tool>> = vec![
            Box::new(players::SearchPlayerTool::new(api.clone())),
            Box::new(players::SearchPlayerTeamsTool::new(api.clone())),
            Box::new(players::SearchPlayerStatisticsTool::new(api.clone())),
            Box::new(leagues::SearchLeaguesTool::new(api)),
        ];

        let mut registry = Self::new();
        for tool in candidates {
            if config.is_enabled(tool.name()) {
                registry.register(tool);
            } else {
                debug!(tool = tool.name(), "Tool disabled by config");
            }
        }
        registry
    }

    /// Register a tool. Replaces any existing tool with the same name.
    pub fn register(&mut self, tool: Box<dyn Tool>) {
        debug!(tool = tool.name(), "Registered tool");
        self.tools.insert(tool.name().to_string(), tool);
    }

    /// Check if a tool is registered.
    pub fn has(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Execute a tool by name with the given arguments.
    pub async fn execute(&self, name: &str, args: HashMap<String, Value>) -> ToolOutput {
        match self.tools.get(name) {
            Some(tool) => {
                debug!(tool = name, "Executing tool");
                tool.execute(args).await
            }
            None => {
                error!(tool = name, "Tool not found");
                ToolOutput::Invalid(format!("Error: Tool '{}' not found", name))
            }
        }
    }

    /// Tool definitions in MCP `tools/list` shape, sorted by name.
    pub fn definitions(&self) -> Vec<Value> {
        self.tools
            .values()
            .map(|tool| {
                json!({
                    "name": tool.name(),
                    "description": tool.description(),
                    "inputSchema": tool.parameters(),
                })
            })
            .collect()
    }

    /// Get the list of registered tool names.
    pub fn names(&self) -> Vec<&str> {
        self.tools.keys().map(|s| s.as_str()).collect()
    }

    /// Number of registered tools.
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    struct DummyTool;

    #[async_trait]
    impl Tool for DummyTool {
        fn name(&self) -> &str {
            "dummy"
        }
        fn description(&self) -> &str {
            "A dummy tool for testing"
        }
        fn parameters(&self) -> Value {
            json!({"type": "object", "properties": {}})
        }
        async fn execute(&self, _args: HashMap<String, Value>) -> ToolOutput {
            ToolOutput::Data(json!(["dummy result"]))
        }
    }

    fn offline_api() -> FootballApi {
        FootballApi::new("http://127.0.0.1:1", "localhost", "", Duration::from_secs(1))
    }

    #[tokio::test]
    async fn test_register_and_execute() {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(DummyTool));

        assert!(registry.has("dummy"));
        assert_eq!(registry.len(), 1);

        let result = registry.execute("dummy", HashMap::new()).await;
        assert_eq!(result, ToolOutput::Data(json!(["dummy result"])));
    }

    #[tokio::test]
    async fn test_missing_tool() {
        let registry = ToolRegistry::new();
        let result = registry.execute("nonexistent", HashMap::new()).await;
        assert!(result.is_error());
        assert!(result.to_string().contains("not found"));
    }

    #[test]
    fn test_football_registers_all_by_default() {
        let registry = ToolRegistry::football(offline_api(), &ToolsConfig::default());
        assert_eq!(
            registry.names(),
            vec![
                "search_leagues",
                "search_player",
                "search_player_statistics",
                "search_player_teams"
            ]
        );

        let defs = registry.definitions();
        assert_eq!(defs.len(), 4);
        for def in &defs {
            assert_eq!(def["inputSchema"]["type"], "object");
            assert!(def["description"].as_str().is_some_and(|d| !d.is_empty()));
        }
    }

    #[test]
    fn test_football_respects_enabled_list() {
        let config = ToolsConfig {
            enabled: vec!["search_player".into(), "search_leagues".into()],
        };
        let registry = ToolRegistry::football(offline_api(), &config);
        assert_eq!(registry.names(), vec!["search_leagues", "search_player"]);
        assert!(!registry.has("search_player_teams"));
    }

    #[test]
    fn test_output_rendering() {
        let data = ToolOutput::Data(json!([{"id": 1}]));
        assert!(!data.is_error());
        assert_eq!(data.to_string(), "[\n  {\n    \"id\": 1\n  }\n]");

        let failure = ToolOutput::Failure("Unable to fetch".into());
        assert!(!failure.is_error());
        assert_eq!(failure.to_string(), "Unable to fetch");
    }
}
