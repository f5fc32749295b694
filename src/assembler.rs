//! Kickstart template assembly.
//! Concatenates the fragments a recipe names into a single template.

use crate::constants::INSTALL_PHASE_MARKERS;
use crate::document::read_text;
use crate::error::Result;
use crate::recipe::Recipe;
use log::{debug, info};
use std::path::Path;

/// Options controlling template assembly.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssembleOptions {
    /// Append a `--log` argument to every `%pre`/`%post` line.
    pub logging: bool,
}

/// Builds the composed template for `recipe` from fragments under `template_root`.
///
/// Every fragment is followed by exactly one newline. A missing or unreadable
/// fragment aborts assembly and nothing is returned.
///
/// # Errors
/// * `Error::NotFound` if a fragment does not exist
/// * `Error::PermissionDenied` if a fragment cannot be read
pub fn assemble<P: AsRef<Path>>(
    recipe: &Recipe,
    template_root: P,
    options: AssembleOptions,
) -> Result<String> {
    let template_root = template_root.as_ref();
    info!("Concatenating fragments from '{}'.", template_root.display());

    let mut template = String::new();
    for (fragment, path) in recipe.fragments(template_root) {
        debug!("Reading fragment '{}'", path.display());
        let content = read_text(&path)?;
        if options.logging {
            template.push_str(&annotate_install_phases(&content, fragment));
        } else {
            template.push_str(&content);
        }
        template.push('\n');
    }

    Ok(template)
}

/// Adds a log destination derived from `fragment` to every install-phase line.
///
/// Line endings, including `\r\n`, are kept as they are.
pub fn annotate_install_phases(content: &str, fragment: &str) -> String {
    let mut annotated = String::with_capacity(content.len());
    for line in content.split_inclusive('\n') {
        if !INSTALL_PHASE_MARKERS.iter().any(|marker| line.starts_with(marker)) {
            annotated.push_str(line);
            continue;
        }
        let body = line.trim_end_matches(['\r', '\n']);
        annotated.push_str(body);
        annotated.push_str(&format!(" --log=/tmp/crispin-{fragment}.log"));
        annotated.push_str(&line[body.len()..]);
    }
    annotated
}
