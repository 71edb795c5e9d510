//! Shared call path for the football tools.

use tracing::info;

use super::ToolOutput;
use crate::api::{is_empty_payload, Endpoint, FetchError, FootballApi};

/// Failure string for a tool, e.g. `Unable to fetch leagues data with search: x`.
///
/// `criteria` are the caller inputs as `(label, value)` pairs.
pub fn fallback_message(subject: &str, criteria: &[(&str, &str)]) -> String {
    let echoed = criteria
        .iter()
        .map(|(label, value)| format!("{}: {}", label, value))
        .collect::<Vec<_>>()
        .join(", ");
    format!("Unable to fetch {} data with {}", subject, echoed)
}

/// Call the API once; empty payloads and errors become `fallback`.
pub(crate) async fn fetch_or_fallback(
    api: &FootballApi,
    tool: &str,
    endpoint: &Endpoint,
    fallback: String,
) -> ToolOutput {
    let result = api.request(endpoint).await.and_then(|payload| {
        if is_empty_payload(&payload) {
            Err(FetchError::Empty)
        } else {
            Ok(payload)
        }
    });

    match result {
        Ok(payload) => ToolOutput::Data(payload),
        Err(e) => {
            info!(tool, kind = e.kind().label(), "No data returned, answering with fallback");
            ToolOutput::Failure(fallback)
        }
    }
}
