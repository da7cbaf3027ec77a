use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Flag values document served by the flag service.
///
/// ```json
/// {
///   "createdAt": "2024-05-01T12:00:00Z",
///   "flags": { "beta": { "value": true } }
/// }
/// ```
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    #[serde(default)]
    pub(crate) created_at: Option<DateTime<Utc>>,
    pub(crate) flags: HashMap<String, TryParse<FlagConfig>>,
}

/// `TryParse` allows the subfield to fail parsing without failing the parsing of the whole
/// structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TryParse<T> {
    Parsed(T),
    ParseFailed(serde_json::Value),
}

impl<'a, T> From<&'a TryParse<T>> for Option<&'a T> {
    fn from(value: &TryParse<T>) -> Option<&T> {
        match value {
            TryParse::Parsed(v) => Some(v),
            TryParse::ParseFailed(_) => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlagConfig {
    pub(crate) value: serde_json::Value,
}

impl Configuration {
    pub(crate) fn get_flag(&self, key: &str) -> Option<&TryParse<FlagConfig>> {
        self.flags.get(key)
    }

    pub(crate) fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }
}
