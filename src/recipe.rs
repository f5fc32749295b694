//! Recipe loading.
//! A recipe names ordered groups of template fragments that are concatenated
//! into one kickstart template.

use crate::document::{load_document, parse_document};
use crate::error::Result;
use indexmap::IndexMap;
use log::debug;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// A manifest of fragment groups, kept in declaration order.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Recipe {
    /// Group name mapped to the fragment file names of that group.
    pub recipe: IndexMap<String, Vec<String>>,
}

impl Recipe {
    /// Loads a recipe from a JSON or YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let recipe: Recipe = load_document(path.as_ref())?;
        debug!("Recipe '{}' loaded: {:?}", path.as_ref().display(), recipe.recipe);
        Ok(recipe)
    }

    /// Parses a recipe from its textual form.
    pub fn parse(content: &str, origin: &str) -> Result<Self> {
        parse_document(content, origin)
    }

    /// Fragment paths under `template_root`, in group then fragment order.
    pub fn fragments<'a>(
        &'a self,
        template_root: &'a Path,
    ) -> impl Iterator<Item = (&'a str, PathBuf)> + 'a {
        self.recipe.iter().flat_map(move |(group, fragments)| {
            fragments
                .iter()
                .map(move |fragment| (fragment.as_str(), template_root.join(group).join(fragment)))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_group_order_is_preserved() {
        let recipe = Recipe::parse(
            r#"{"recipe": {"zeta": ["b.ks", "a.ks"], "alpha": ["c.ks"]}}"#,
            "test",
        )
        .unwrap();

        let paths: Vec<PathBuf> = recipe.fragments(Path::new("/t")).map(|(_, p)| p).collect();
        assert_eq!(
            paths,
            vec![
                PathBuf::from("/t/zeta/b.ks"),
                PathBuf::from("/t/zeta/a.ks"),
                PathBuf::from("/t/alpha/c.ks"),
            ]
        );
    }

    #[test]
    fn test_missing_recipe_field() {
        let result = Recipe::parse(r#"{"groups": {}}"#, "test");
        assert!(matches!(result, Err(Error::MalformedInput { .. })));
    }
}
