// src/models/status.rs
use chrono::{DateTime, FixedOffset, Local};
use serde::Serialize;
use serde_json::Value;

/// Status record reported by a game server. Every field is independently
/// optional: a key that is missing or carries the wrong JSON type resolves to
/// `None`, never to a default value and never to an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ServerStatus {
    pub name: Option<String>,
    pub map: Option<String>,
    pub players: Option<u32>,
    pub soft_max_players: Option<u32>,
    pub panic_bunker: Option<bool>,
    pub run_level: Option<i32>,
    pub round_id: Option<i32>,
    pub round_start_time: Option<DateTime<FixedOffset>>,
}

impl ServerStatus {
    /// Extracts a status record from an already-parsed JSON document.
    /// A document that is not an object yields a record with every field absent.
    pub fn from_value(doc: &Value) -> Self {
        Self {
            name: string_field(doc, "name"),
            map: string_field(doc, "map"),
            players: u32_field(doc, "players"),
            soft_max_players: u32_field(doc, "soft_max_players"),
            panic_bunker: bool_field(doc, "panic_bunker"),
            run_level: i32_field(doc, "run_level"),
            round_id: i32_field(doc, "round_id"),
            round_start_time: time_field(doc, "round_start_time"),
        }
    }
}

/// Parses the raw body of a status response. Only a body that is not valid
/// JSON at all is an error; individual bad fields are dropped silently.
pub fn parse_status(raw: &str) -> Result<ServerStatus, serde_json::Error> {
    let doc: Value = serde_json::from_str(raw)?;
    Ok(ServerStatus::from_value(&doc))
}

fn string_field(doc: &Value, key: &str) -> Option<String> {
    doc.get(key)?.as_str().map(str::to_owned)
}

fn u32_field(doc: &Value, key: &str) -> Option<u32> {
    // as_u64 rejects floats and negative numbers outright
    doc.get(key)?.as_u64().and_then(|n| u32::try_from(n).ok())
}

fn i32_field(doc: &Value, key: &str) -> Option<i32> {
    doc.get(key)?.as_i64().and_then(|n| i32::try_from(n).ok())
}

fn bool_field(doc: &Value, key: &str) -> Option<bool> {
    doc.get(key)?.as_bool()
}

fn time_field(doc: &Value, key: &str) -> Option<DateTime<FixedOffset>> {
    doc.get(key)?
        .as_str()
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
}

/// One fetched status bundled with its source text and retrieval time.
/// Immutable once constructed.
#[derive(Debug, Clone, Serialize)]
pub struct StatusPayload {
    pub status: ServerStatus,
    pub raw_json: String,
    pub retrieved_at: DateTime<Local>,
}
