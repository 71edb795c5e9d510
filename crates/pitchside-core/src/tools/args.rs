//! Argument normalisation for tool calls.
//!
//! Hosts send ids as either JSON strings or JSON integers. Both collapse
//! into one canonical [`Identifier`] before any endpoint is built.

use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// Canonical decimal/string form of a player, team, league or season id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier(String);

impl Identifier {
    /// Normalise a JSON value. Strings are trimmed; integers are rendered in decimal.
    /// Anything else (floats, bools, null, empty strings, containers) is rejected.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => {
                let trimmed = s.trim();
                (!trimmed.is_empty()).then(|| Self(trimmed.to_string()))
            }
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Some(Self(i.to_string()))
                } else {
                    n.as_u64().map(|u| Self(u.to_string()))
                }
            }
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Required identifier argument, or the message to hand back to the host.
pub fn identifier_arg(args: &HashMap<String, Value>, name: &str) -> Result<Identifier, String> {
    match args.get(name) {
        None | Some(Value::Null) => Err(format!("Error: '{}' is required", name)),
        Some(v) => Identifier::from_value(v).ok_or_else(|| {
            format!(
                "Error: '{}' must be a non-empty string or an integer, got {}",
                name, v
            )
        }),
    }
}

/// Required string argument.
pub fn string_arg<'a>(args: &'a HashMap<String, Value>, name: &str) -> Result<&'a str, String> {
    match args.get(name) {
        None | Some(Value::Null) => Err(format!("Error: '{}' is required", name)),
        Some(Value::String(s)) => Ok(s.as_str()),
        Some(v) => Err(format!("Error: '{}' must be a string, got {}", name, v)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn args(v: Value) -> HashMap<String, Value> {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn integers_and_strings_normalise_identically() {
        assert_eq!(
            Identifier::from_value(&json!(123)),
            Identifier::from_value(&json!("123"))
        );
        assert_eq!(Identifier::from_value(&json!(" 2023 ")).unwrap().as_str(), "2023");
        assert_eq!(
            Identifier::from_value(&json!(u64::MAX)).unwrap().to_string(),
            u64::MAX.to_string()
        );
    }

    #[test]
    fn rejects_non_identifiers() {
        for bad in [json!(1.5), json!(true), json!(null), json!(""), json!("  "), json!([1])] {
            assert!(Identifier::from_value(&bad).is_none(), "{bad} should be rejected");
        }
    }

    #[test]
    fn identifier_arg_messages() {
        let a = args(json!({"player_id": 276, "team_id": false}));
        assert_eq!(identifier_arg(&a, "player_id").unwrap().as_str(), "276");
        assert_eq!(
            identifier_arg(&a, "season").unwrap_err(),
            "Error: 'season' is required"
        );
        assert!(identifier_arg(&a, "team_id").unwrap_err().contains("got false"));
    }

    #[test]
    fn string_arg_requires_string() {
        let a = args(json!({"name_search": "Messi", "other": 7}));
        assert_eq!(string_arg(&a, "name_search").unwrap(), "Messi");
        assert!(string_arg(&a, "other").unwrap_err().contains("must be a string"));
        assert!(string_arg(&a, "missing").unwrap_err().contains("is required"));
    }
}
