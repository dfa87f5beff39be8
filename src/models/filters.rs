use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::storage::Restorable;

/// The last-used search box and filter dropdown selections
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FilterState {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub ott: String,
}

impl FilterState {
    pub fn new(
        search: impl Into<String>,
        genre: impl Into<String>,
        ott: impl Into<String>,
    ) -> Self {
        Self {
            search: search.into(),
            genre: genre.into(),
            ott: ott.into(),
        }
    }

    /// True when no control has a value
    pub fn is_empty(&self) -> bool {
        self.search.is_empty() && self.genre.is_empty() && self.ott.is_empty()
    }

    /// Query parameters for the movie listing, skipping empty controls
    pub fn query_params(&self) -> Vec<(&'static str, &str)> {
        [
            ("search", self.search.as_str()),
            ("genre", self.genre.as_str()),
            ("ott", self.ott.as_str()),
        ]
        .into_iter()
        .filter(|(_, value)| !value.is_empty())
        .collect()
    }
}

impl Restorable for FilterState {
    /// Each field is taken on its own: a string overrides the default, any
    /// other value (or no value) leaves the default in place.
    fn restore(stored: Value, default: &Self) -> Result<Self, String> {
        let fields = match stored {
            Value::Object(fields) => fields,
            other => return Err(format!("expected an object, got {}", kind(&other))),
        };

        let pick = |name: &str, fallback: &str| match fields.get(name) {
            Some(Value::String(value)) => value.clone(),
            Some(other) => {
                tracing::debug!(field = name, found = kind(other), "Skipping stored filter field");
                fallback.to_string()
            }
            None => fallback.to_string(),
        };

        Ok(Self {
            search: pick("search", &default.search),
            genre: pick("genre", &default.genre),
            ott: pick("ott", &default.ott),
        })
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_restore_full_record() {
        let restored = FilterState::restore(
            json!({"search": "dune", "genre": "Sci-Fi", "ott": "Netflix"}),
            &FilterState::default(),
        )
        .unwrap();
        assert_eq!(restored, FilterState::new("dune", "Sci-Fi", "Netflix"));
    }

    #[test]
    fn test_restore_partial_record_keeps_defaults() {
        let default = FilterState::new("", "action", "netflix");
        let restored = FilterState::restore(json!({"search": "dune"}), &default).unwrap();
        assert_eq!(restored, FilterState::new("dune", "action", "netflix"));
    }

    #[test]
    fn test_restore_skips_non_string_fields() {
        let default = FilterState::new("old", "Drama", "Hulu");
        let restored = FilterState::restore(
            json!({"search": 42, "genre": "Comedy", "ott": null}),
            &default,
        )
        .unwrap();
        assert_eq!(restored, FilterState::new("old", "Comedy", "Hulu"));
    }

    #[test]
    fn test_restore_rejects_non_object() {
        assert!(FilterState::restore(json!(["dune"]), &FilterState::default()).is_err());
        assert!(FilterState::restore(json!(null), &FilterState::default()).is_err());
    }

    #[test]
    fn test_serialized_layout() {
        let json = serde_json::to_value(FilterState::new("dune", "", "Netflix")).unwrap();
        assert_eq!(json, json!({"search": "dune", "genre": "", "ott": "Netflix"}));
    }

    #[test]
    fn test_query_params_skip_empty() {
        let filters = FilterState::new("", "Action", "");
        assert_eq!(filters.query_params(), vec![("genre", "Action")]);
        assert!(FilterState::default().query_params().is_empty());
    }
}
