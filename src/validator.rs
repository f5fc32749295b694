//! Answer validation against the variables a template references.

use crate::error::{Error, Result};
use crate::paths::flatten;
use indexmap::IndexSet;
use log::{debug, error};

/// Paths in `required` that `answers` does not provide, in discovery order.
pub fn missing_answers(required: &IndexSet<String>, answers: &serde_json::Value) -> Vec<String> {
    let supplied = flatten(answers);
    required.iter().filter(|path| !supplied.contains(*path)).cloned().collect()
}

/// Checks that `answers` covers every path in `required`.
///
/// Keys in `answers` that the template does not use are ignored.
///
/// # Errors
/// * `Error::ValidationError` carrying every missing path
pub fn validate_answers(required: &IndexSet<String>, answers: &serde_json::Value) -> Result<()> {
    let missing = missing_answers(required, answers);
    if missing.is_empty() {
        debug!("All {} template variables are answered", required.len());
        return Ok(());
    }
    error!("Answers are missing values for: {:?}", missing);
    Err(Error::ValidationError { missing })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn required(items: &[&str]) -> IndexSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_validation_passes_with_extra_keys() {
        let answers = json!({"network": {"hostname": "x"}, "unused": {"deep": 1}});
        assert!(validate_answers(&required(&["network.hostname"]), &answers).is_ok());
    }

    #[test]
    fn test_missing_keeps_discovery_order() {
        let answers = json!({"b": "1"});
        let result = validate_answers(&required(&["z.y", "b", "a"]), &answers);
        match result {
            Err(Error::ValidationError { missing }) => assert_eq!(missing, vec!["z.y", "a"]),
            other => panic!("Expected ValidationError, got {other:?}"),
        }
    }

    #[test]
    fn test_parent_path_satisfied_by_object() {
        let answers = json!({"disk": {"root": "/dev/sda"}});
        assert!(missing_answers(&required(&["disk", "disk.root"]), &answers).is_empty());
    }
}
