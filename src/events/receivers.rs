//! Receiver configuration normalizer.
//!
//! A controller's receivers are configured as a JSON string:
//!
//! ```json
//! [
//!   {
//!     "id": "door-open",
//!     "actions": [{ "type": "set-rotation", "params": { "rotationY": 90 } }]
//!   },
//!   { "id": "door-close", "actions": [{ "type": "reset-rotation" }] }
//! ]
//! ```
//!
//! Parsing is lenient: malformed entries are dropped with a warning and an
//! unparsable string yields no receivers at all.

use serde_json::{Map, Value};

/// One `(event id, action type, params)` triple.
#[derive(Debug, Clone, PartialEq)]
pub struct ReceiverBinding {
    pub event_id: String,
    pub action_type: String,
    pub params: Map<String, Value>,
}

#[must_use]
pub fn parse_receivers(json: &str) -> Vec<ReceiverBinding> {
    if json.trim().is_empty() {
        return Vec::new();
    }

    let entries = match serde_json::from_str::<Value>(json) {
        Ok(Value::Array(entries)) => entries,
        Ok(other) => {
            log::warn!("Receiver config must be a JSON array, got {}", kind_of(&other));
            return Vec::new();
        }
        Err(err) => {
            log::warn!("Receiver config is not valid JSON: {err}");
            return Vec::new();
        }
    };

    let mut bindings = Vec::new();
    for (index, entry) in entries.iter().enumerate() {
        let Some(event_id) = entry.get("id").and_then(Value::as_str) else {
            log::warn!("Receiver #{index} has no string 'id'; skipped");
            continue;
        };
        let Some(actions) = entry.get("actions").and_then(Value::as_array) else {
            log::warn!("Receiver '{event_id}' has no 'actions' array; skipped");
            continue;
        };

        for action in actions {
            if let Some(binding) = normalize_action(event_id, action) {
                bindings.push(binding);
            }
        }
    }

    bindings
}

fn normalize_action(event_id: &str, action: &Value) -> Option<ReceiverBinding> {
    let Some(action_type) = action.get("type").and_then(Value::as_str) else {
        log::warn!("Receiver '{event_id}' has an action without a 'type'; skipped");
        return None;
    };

    let params = match action.get("params") {
        None | Some(Value::Null) => Map::new(),
        Some(Value::Object(params)) => params.clone(),
        Some(other) => {
            log::warn!(
                "Receiver '{event_id}' action '{action_type}' has {} params; skipped",
                kind_of(other)
            );
            return None;
        }
    };

    Some(ReceiverBinding {
        event_id: event_id.to_owned(),
        action_type: action_type.to_owned(),
        params,
    })
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flattens_into_triples() {
        let bindings = parse_receivers(
            r#"[
                { "id": "open", "actions": [
                    { "type": "set-rotation", "params": { "rotationY": 90 } },
                    { "type": "pause-rotation" }
                ] },
                { "id": "close", "actions": [{ "type": "reset-rotation" }] }
            ]"#,
        );

        assert_eq!(bindings.len(), 3);
        assert_eq!(bindings[0].event_id, "open");
        assert_eq!(bindings[0].action_type, "set-rotation");
        assert_eq!(bindings[0].params["rotationY"], 90);
        assert!(bindings[1].params.is_empty());
        assert_eq!(bindings[2].event_id, "close");
    }

    #[test]
    fn malformed_entries_are_dropped() {
        let bindings = parse_receivers(
            r#"[
                { "actions": [{ "type": "set-rotation" }] },
                { "id": "no-actions" },
                { "id": "bad-actions", "actions": "set-rotation" },
                { "id": "ok", "actions": [{ "params": {} }, { "type": "stop-rotation" }] }
            ]"#,
        );

        assert_eq!(bindings.len(), 1);
        assert_eq!(bindings[0].event_id, "ok");
        assert_eq!(bindings[0].action_type, "stop-rotation");
    }

    #[test]
    fn unparsable_or_non_array_yields_nothing() {
        assert!(parse_receivers("").is_empty());
        assert!(parse_receivers("not json").is_empty());
        assert!(parse_receivers(r#"{ "id": "x", "actions": [] }"#).is_empty());
    }
}
