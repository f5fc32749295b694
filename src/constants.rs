//! Common constants used throughout crispin.

/// Supported cookbook configuration file names
pub const CONFIG_FILES: [&str; 3] = ["crispin.json", "crispin.yml", "crispin.yaml"];

/// Glob patterns matching stored answer documents. Retrieval opens
/// `<name>.json`, so the menu lists nothing else.
pub const ANSWER_PATTERNS: [&str; 1] = ["*.json"];

/// Cookbook subdirectories
pub const RECIPES_DIR: &str = "recipes";
pub const TEMPLATES_DIR: &str = "templates";
pub const ANSWERS_DIR: &str = "answers";

/// Extension of recipe and stored answer files
pub const DOCUMENT_EXTENSION: &str = "json";

/// Top-level answer key naming the recipe a stored answer belongs to
pub const RECIPE_KEY: &str = "recipe";

/// Lines starting with one of these open a kickstart install-phase section
pub const INSTALL_PHASE_MARKERS: [&str; 2] = ["%pre", "%post"];

pub const DEFAULT_SCHEME: &str = "http";
pub const DEFAULT_PORT: u16 = 9000;
pub const DEFAULT_PREFIX: &str = "crispin";
pub const DEFAULT_MENU_TITLE: &str = "Crispin iPXE Boot Menu";
pub const DEFAULT_MENU_TIMEOUT_MS: u64 = 5000;
