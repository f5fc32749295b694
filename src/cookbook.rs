//! Cookbook operations.
//!
//! A cookbook is a directory holding `recipes/`, `templates/` and `answers/`.
//! The retrieval and submission operations here are what a kickstart server
//! exposes; [`Cookbook::handle_get`] and [`Cookbook::handle_post`] translate
//! them into status codes and bodies for whichever transport serves them.

use crate::assembler::{assemble, AssembleOptions};
use crate::config::Config;
use crate::constants::{ANSWERS_DIR, DOCUMENT_EXTENSION, RECIPES_DIR, RECIPE_KEY, TEMPLATES_DIR};
use crate::document::{load_document, parse_document};
use crate::error::{Error, Result};
use crate::kickstart::generate_kickstart;
use crate::menu::BootMenu;
use crate::recipe::Recipe;
use crate::renderer::{MiniJinjaRenderer, TemplateRenderer};
use log::{error, info};
use std::path::{Path, PathBuf};

/// A transport-independent response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
}

impl Response {
    fn text(body: String) -> Self {
        Self { status: 200, content_type: "text/plain", body }
    }

    fn error(status: u16, message: &str) -> Self {
        Self {
            status,
            content_type: "application/json",
            body: serde_json::json!({ "error": message }).to_string(),
        }
    }

    fn from_result(result: Result<String>) -> Self {
        match result {
            Ok(kickstart) => Response::text(kickstart),
            Err(e) => {
                error!("{}", e);
                Response::error(e.status_code(), &e.to_string())
            }
        }
    }
}

/// A cookbook directory and its configuration.
pub struct Cookbook {
    root: PathBuf,
    config: Config,
    engine: Box<dyn TemplateRenderer + Send + Sync>,
}

impl Cookbook {
    pub fn new<P: AsRef<Path>>(root: P, config: Config) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            config,
            engine: Box::new(MiniJinjaRenderer::new()),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn answers_dir(&self) -> PathBuf {
        self.root.join(ANSWERS_DIR)
    }

    pub fn templates_dir(&self) -> PathBuf {
        self.root.join(TEMPLATES_DIR)
    }

    fn recipe_path(&self, recipe_name: &str) -> PathBuf {
        self.root.join(RECIPES_DIR).join(format!("{recipe_name}.{DOCUMENT_EXTENSION}"))
    }

    fn answer_path(&self, answer_name: &str) -> PathBuf {
        self.answers_dir().join(format!("{answer_name}.{DOCUMENT_EXTENSION}"))
    }

    fn render(&self, recipe_name: &str, answers: &serde_json::Value) -> Result<String> {
        let recipe = Recipe::load(self.recipe_path(recipe_name))?;
        let options = AssembleOptions { logging: self.config.kickstart.logging };
        let template = assemble(&recipe, self.templates_dir(), options)?;
        generate_kickstart(&*self.engine, &template, answers)
    }

    /// Renders the kickstart for a stored answer document.
    ///
    /// The document's top-level `recipe` field names the recipe to use.
    ///
    /// # Errors
    /// * `Error::NotFound` if the answer or recipe file does not exist
    /// * `Error::MalformedInput` if the answer document names no recipe
    /// * `Error::ValidationError` if answers are missing
    pub fn get_kickstart(&self, answer_name: &str) -> Result<String> {
        let answer_path = self.answer_path(answer_name);
        let answers: serde_json::Value = load_document(&answer_path)?;
        let recipe_name = answers.get(RECIPE_KEY).and_then(|r| r.as_str()).ok_or_else(|| {
            Error::MalformedInput {
                path: answer_path.display().to_string(),
                reason: "recipe not specified in answers file".to_string(),
            }
        })?;

        info!("Rendering '{answer_name}' with recipe '{recipe_name}'.");
        self.render(recipe_name, &answers)
    }

    /// Renders the kickstart for `recipe_name` with answers supplied inline.
    ///
    /// # Errors
    /// * `Error::NotFound` if the recipe does not exist
    /// * `Error::MalformedInput` if `body` is not an answer document
    /// * `Error::ValidationError` if answers are missing
    pub fn post_kickstart(&self, recipe_name: &str, body: &str) -> Result<String> {
        let answers: serde_json::Map<String, serde_json::Value> =
            parse_document(body, "request body")?;
        info!("Rendering recipe '{recipe_name}' with submitted answers.");
        self.render(recipe_name, &serde_json::Value::Object(answers))
    }

    /// Builds the boot menu over the stored answer documents.
    pub fn boot_menu(&self) -> BootMenu {
        BootMenu::scan(self.answers_dir(), &self.config.server, &self.config.menu)
    }

    /// The entry name in `/<prefix>/get/<name>`, if `path` is such a route.
    fn route<'a>(&self, path: &'a str) -> Option<&'a str> {
        let name = path
            .strip_prefix('/')?
            .strip_prefix(self.config.server.prefix.as_str())?
            .strip_prefix("/get/")?;
        (!name.is_empty() && !name.contains('/')).then_some(name)
    }

    /// Answers a retrieval request for a stored answer document.
    pub fn handle_get(&self, path: &str) -> Response {
        match self.route(path) {
            Some(answer_name) => Response::from_result(self.get_kickstart(answer_name)),
            None => Response::error(404, "Not Found"),
        }
    }

    /// Answers a submission request carrying answers for a recipe.
    pub fn handle_post(&self, path: &str, body: &str) -> Response {
        match self.route(path) {
            Some(recipe_name) => Response::from_result(self.post_kickstart(recipe_name, body)),
            None => Response::error(404, "Not Found"),
        }
    }
}
