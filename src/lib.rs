//! crispin builds kickstart files from reusable template fragments.
//! It discovers the variables a composed template needs, checks supplied
//! answers against them, renders the result, and builds an iPXE menu over the
//! targets of a cookbook.

/// Concatenation of recipe fragments into one template
pub mod assembler;

/// Command-line interface module for the crispin application
pub mod cli;

/// Cookbook configuration
/// Supports JSON and YAML formats (crispin.json, crispin.yml, crispin.yaml)
pub mod config;

/// Common constants
pub mod constants;

/// Retrieval and submission operations over a cookbook directory
pub mod cookbook;

/// Discovery of the variables a template references
pub mod discovery;

/// JSON/YAML document reading
pub mod document;

/// Error types and handling for the crispin application
pub mod error;

/// Discover, validate and render pipeline
pub mod kickstart;

/// Logger initialisation
pub mod logger;

/// iPXE boot menu generation
pub mod menu;

/// Dotted path flattening and unflattening
pub mod paths;

/// Recipe manifests
pub mod recipe;

/// Template rendering
pub mod renderer;

/// Answer validation
pub mod validator;
