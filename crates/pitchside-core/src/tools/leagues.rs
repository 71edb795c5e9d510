//! League search tool. Read-only.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use tracing::debug;

use super::args::string_arg;
use super::common::{fallback_message, fetch_or_fallback};
use super::{Tool, ToolOutput};
use crate::api::{Endpoint, FootballApi};

pub const SEARCH_LEAGUES: &str = "search_leagues";

pub fn leagues_endpoint(name_search: &str) -> Endpoint {
    Endpoint::new("/leagues").param("search", name_search)
}

/// Search leagues and cups by name or country.
pub struct SearchLeaguesTool {
    api: FootballApi,
}

impl SearchLeaguesTool {
    pub fn new(api: FootballApi) -> Self {
        Self { api }
    }
}

#[async_trait]
impl Tool for SearchLeaguesTool {
    fn name(&self) -> &str {
        SEARCH_LEAGUES
    }

    fn description(&self) -> &str {
        "Queries the football API leagues endpoint with a search. \
         Matches league names and countries; returns league ids, countries and seasons."
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "name_search": {
                    "type": "string",
                    "description": "League name/country query string"
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
        debug!(name_search, "Searching leagues");

        fetch_or_fallback(
            &self.api,
            SEARCH_LEAGUES,
            &leagues_endpoint(name_search),
            fallback_message("leagues", &[("search", name_search)]),
        )
        .await
    }
}
