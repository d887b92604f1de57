use log::warn;
use serde_json::Value;

use crate::parse::operation::Operation;
use crate::postman::{Event, SCRIPT_TYPE, Script};

/// Vendor extension holding a post-request test script.
pub const SCRIPT_EXTENSION: &str = "x-postman-script";

/// Read the test script of an operation.
///
/// The extension may be a multi-line string or a list of lines. Anything
/// else, or an empty script, yields `None`.
pub fn extract_script(operation: &Operation) -> Option<Script> {
    let exec: Vec<String> = match operation.extension(SCRIPT_EXTENSION)? {
        Value::String(s) if s.trim().is_empty() => return None,
        Value::String(s) => s.split('\n').map(str::to_string).collect(),
        Value::Array(lines) => {
            let mut exec = Vec::with_capacity(lines.len());
            for line in lines {
                let Some(line) = line.as_str() else {
                    warn!("ignoring {SCRIPT_EXTENSION}: list entries must be strings");
                    return None;
                };
                exec.push(line.to_string());
            }
            exec
        }
        other => {
            warn!("ignoring {SCRIPT_EXTENSION}: expected a string or a list, got {other}");
            return None;
        }
    };

    if exec.is_empty() {
        return None;
    }

    Some(Script {
        script_type: SCRIPT_TYPE.to_string(),
        exec,
    })
}

/// The `test` event wrapping an operation's script, if it has one.
pub fn test_event(operation: &Operation) -> Option<Event> {
    extract_script(operation).map(|script| Event {
        listen: "test".to_string(),
        script,
    })
}
