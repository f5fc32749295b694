//! The kickstart pipeline: discover, validate, render.

use crate::discovery::discover;
use crate::error::Result;
use crate::paths::unflatten;
use crate::renderer::TemplateRenderer;
use crate::validator::validate_answers;
use log::info;

/// Renders `template` with `answers` after checking that every variable the
/// template prints is answered.
///
/// # Errors
/// * `Error::ValidationError` if answers are missing
/// * `Error::RenderError` if rendering fails
pub fn generate_kickstart(
    engine: &dyn TemplateRenderer,
    template: &str,
    answers: &serde_json::Value,
) -> Result<String> {
    let required = discover(template)?;
    validate_answers(&required, answers)?;
    info!("Rendering kickstart with {} answered variables.", required.len());
    engine.render(template, answers)
}

/// A blank answer document holding an empty string for every template variable.
pub fn generate_empty_answers(template: &str) -> Result<serde_json::Value> {
    let required = discover(template)?;
    Ok(unflatten(&required))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::renderer::MiniJinjaRenderer;
    use serde_json::json;

    const TEMPLATE: &str = "network --hostname={{ network.hostname }}\nrootpw {{ root.password }}\n";

    #[test]
    fn test_generate_kickstart() {
        let answers = json!({"network": {"hostname": "x"}, "root": {"password": "pw"}, "extra": 1});
        let ks = generate_kickstart(&MiniJinjaRenderer::new(), TEMPLATE, &answers).unwrap();
        assert_eq!(ks, "network --hostname=x\nrootpw pw\n");
    }

    #[test]
    fn test_generate_kickstart_missing_answers() {
        let answers = json!({"network": {"hostname": "x"}});
        match generate_kickstart(&MiniJinjaRenderer::new(), TEMPLATE, &answers) {
            Err(Error::ValidationError { missing }) => assert_eq!(missing, vec!["root.password"]),
            other => panic!("Expected ValidationError, got {other:?}"),
        }
    }

    #[test]
    fn test_generate_empty_answers() {
        let blank = generate_empty_answers(TEMPLATE).unwrap();
        assert_eq!(blank, json!({"network": {"hostname": ""}, "root": {"password": ""}}));
    }
}
