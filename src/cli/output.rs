//! Output formatting utilities for the CLI.

use serde::Serialize;

/// Result of a command, printable for humans or as JSON
pub trait CommandOutput: Serialize {
    /// Human-readable rendering
    fn to_human(&self) -> String;

    /// JSON rendering, the serialized value by default
    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// Print `result` in the selected mode
pub fn output<T: CommandOutput>(result: &T, json_mode: bool) {
    if json_mode {
        println!("{}", serde_json::to_string_pretty(&result.to_json()).unwrap_or_default());
    } else {
        println!("{}", result.to_human());
    }
}
