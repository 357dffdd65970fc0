//! Request bodies for the game API.

use serde_json::{json, Value};

/// Body for starting a level at its current sub-level.
pub fn start_request(level: &str) -> Value {
    json!({ "level": level })
}

/// Body for starting an explicit sub-level.
pub fn start_sub_level_request(level: &str, sub_level: usize) -> Value {
    json!({ "level": level, "sub_level": sub_level })
}

/// Body for clicking a card.
pub fn select_request(vowel: &str) -> Value {
    json!({ "vowel": vowel })
}

/// Instruction types in order, for compact assertions.
pub fn types(body: &Value) -> Vec<String> {
    body["instructions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["type"].as_str().unwrap().to_string())
        .collect()
}

/// The `level_ended` summary in a response, if any.
pub fn summary(body: &Value) -> Option<Value> {
    body["instructions"]
        .as_array()
        .unwrap()
        .iter()
        .find(|i| i["type"] == "level_ended")
        .map(|i| i["summary"].clone())
}
