//! Player tools: profile search, team history, and season statistics. Read-only.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use tracing::debug;

use super::args::{identifier_arg, string_arg, Identifier};
use super::common::{fallback_message, fetch_or_fallback};
use super::{Tool, ToolOutput};
use crate::api::{Endpoint, FootballApi};

pub const SEARCH_PLAYER: &str = "search_player";
pub const SEARCH_PLAYER_TEAMS: &str = "search_player_teams";
pub const SEARCH_PLAYER_STATISTICS: &str = "search_player_statistics";

pub fn profiles_endpoint(name_search: &str) -> Endpoint {
    Endpoint::new("/players/profiles").param("search", name_search)
}

pub fn teams_endpoint(player_id: &Identifier) -> Endpoint {
    Endpoint::new("/players/teams").param("player", player_id.as_str())
}

/// Only the player id reaches the request; team and season are accepted
/// but not sent.
pub fn statistics_endpoint(
    player_id: &Identifier,
    _team_id: &Identifier,
    _season: &Identifier,
) -> Endpoint {
    Endpoint::new("/players/statistics").param("player", player_id.as_str())
}

// ── SearchPlayerTool ────────────────────────────────────────────────

/// Search player profiles by name.
pub struct SearchPlayerTool {
    api: FootballApi,
}

impl SearchPlayerTool {
    pub fn new(api: FootballApi) -> Self {
        Self { api }
    }
}

#[async_trait]
impl Tool for SearchPlayerTool {
    fn name(&self) -> &str {
        SEARCH_PLAYER
    }

    fn description(&self) -> &str {
        "Queries the football API players endpoint with a name search. \
         Returns matching player profiles (id, name, nationality, position, ...)."
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "name_search": {
                    "type": "string",
                    "description": "Player name in any format (first, last, full, etc)"
                }
            },
            "required": ["name_search"]
        })
    }

    async fn execute(&self, args: HashMap<String, Value>) -> ToolOutput {
        let name_search = match string_arg(&args, "name_search") {
            Ok(s) => s,
            Err(msg) => return ToolOutput::Invalid(msg),
        };
        debug!(name_search, "Searching player profiles");

        fetch_or_fallback(
            &self.api,
            SEARCH_PLAYER,
            &profiles_endpoint(name_search),
            fallback_message("player", &[("search", name_search)]),
        )
        .await
    }
}

// ── SearchPlayerTeamsTool ───────────────────────────────────────────

/// List the teams a player has played for.
pub struct SearchPlayerTeamsTool {
    api: FootballApi,
}

impl SearchPlayerTeamsTool {
    pub fn new(api: FootballApi) -> Self {
        Self { api }
    }
}

#[async_trait]
impl Tool for SearchPlayerTeamsTool {
    fn name(&self) -> &str {
        SEARCH_PLAYER_TEAMS
    }

    fn description(&self) -> &str {
        "Queries the football API for every team a player has played for, \
         with the seasons spent at each. Use search_player first to find the player id."
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "player_id": {
                    "type": ["string", "integer"],
                    "description": "Player id as returned by search_player"
                }
            },
            "required": ["player_id"]
        })
    }

    async fn execute(&self, args: HashMap<String, Value>) -> ToolOutput {
        let player_id = match identifier_arg(&args, "player_id") {
            Ok(id) => id,
            Err(msg) => return ToolOutput::Invalid(msg),
        };
        debug!(%player_id, "Fetching player teams");

        fetch_or_fallback(
            &self.api,
            SEARCH_PLAYER_TEAMS,
            &teams_endpoint(&player_id),
            fallback_message("player teams", &[("player id", player_id.as_str())]),
        )
        .await
    }
}

// ── SearchPlayerStatisticsTool ──────────────────────────────────────

/// Season statistics for a player.
pub struct SearchPlayerStatisticsTool {
    api: FootballApi,
}

impl SearchPlayerStatisticsTool {
    pub fn new(api: FootballApi) -> Self {
        Self { api }
    }
}

#[async_trait]
impl Tool for SearchPlayerStatisticsTool {
    fn name(&self) -> &str {
        SEARCH_PLAYER_STATISTICS
    }

    fn description(&self) -> &str {
        "Queries the football API players statistics endpoint for a player. \
         team_id and season are accepted but the request is currently filtered by player only."
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "player_id": {
                    "type": ["string", "integer"],
                    "description": "Player id as returned by search_player"
                },
                "team_id": {
                    "type": ["string", "integer"],
                    "description": "Team id as returned by search_player_teams"
                },
                "season": {
                    "type": ["string", "integer"],
                    "description": "Season start year, e.g. 2023"
                }
            },
            "required": ["player_id", "team_id", "season"]
        })
    }

    async fn execute(&self, args: HashMap<String, Value>) -> ToolOutput {
        let ids = identifier_arg(&args, "player_id").and_then(|p| {
            let t = identifier_arg(&args, "team_id")?;
            let s = identifier_arg(&args, "season")?;
            Ok((p, t, s))
        });
        let (player_id, team_id, season) = match ids {
            Ok(ids) => ids,
            Err(msg) => return ToolOutput::Invalid(msg),
        };
        debug!(%player_id, %team_id, %season, "Fetching player statistics");

        fetch_or_fallback(
            &self.api,
            SEARCH_PLAYER_STATISTICS,
            &statistics_endpoint(&player_id, &team_id, &season),
            fallback_message(
                "player statistics",
                &[
                    ("player id", player_id.as_str()),
                    ("team id", team_id.as_str()),
                    ("season", season.as_str()),
                ],
            ),
        )
        .await
    }
}
