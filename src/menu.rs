//! iPXE boot menu generation.
//!
//! Every answer document in a directory is a bootable target. The optional
//! `metadata.source` field of a target names its install media, which decides
//! where the installer kernel, initrd and stage two image are fetched from.
//!
//! The menu is built once from the directory contents at that moment.

use crate::config::{MenuSettings, ServerConfig};
use crate::constants::ANSWER_PATTERNS;
use crate::document::{parse_document, read_text};
use crate::error::{Error, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use log::{debug, info, warn};
use std::path::{Component, Path, PathBuf};
use url::Url;
use walkdir::WalkDir;

const KERNEL_PATH: &str = "images/pxeboot/vmlinuz";
const INITRD_PATH: &str = "images/pxeboot/initrd.img";
const STAGE2_PATH: &str = "images/install.img";

/// Install media classification of a target's source locator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootSource {
    /// An installation tree on a remote HTTP(S) server.
    RemoteRepository(Url),
    /// An ISO image, which cannot be booted directly.
    DiskImage(String),
    /// An installation tree on this machine, served by the kickstart host.
    LocalTree(PathBuf),
    /// No source, or one that matches no rule.
    Unsupported(Option<String>),
}

impl BootSource {
    /// Classifies a locator. Rules are tried in order and the first match wins.
    pub fn classify(source: Option<&str>) -> Self {
        let Some(locator) = source else {
            return BootSource::Unsupported(None);
        };

        if is_http(locator) && locator.ends_with('/') {
            if let Ok(url) = Url::parse(locator) {
                return BootSource::RemoteRepository(url);
            }
        }
        if locator.ends_with(".iso") {
            return BootSource::DiskImage(locator.to_string());
        }
        if locator.ends_with('/') && Path::new(locator).is_dir() {
            return BootSource::LocalTree(PathBuf::from(locator));
        }
        BootSource::Unsupported(Some(locator.to_string()))
    }
}

fn is_http(locator: &str) -> bool {
    let lower = locator.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Installer URLs derived from a boot source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootImages {
    pub kernel: Url,
    pub initrd: Url,
    pub stage2: Url,
    /// Passed as `inst.repo`, when the whole tree is installed from.
    pub repository: Option<Url>,
}

impl BootImages {
    fn rooted_at(base: &Url) -> Result<Self> {
        Ok(Self {
            kernel: join(base, KERNEL_PATH)?,
            initrd: join(base, INITRD_PATH)?,
            stage2: join(base, STAGE2_PATH)?,
            repository: None,
        })
    }

    /// Images of a remote repository, installing from that repository.
    pub fn remote(repository: &Url) -> Result<Self> {
        let mut images = Self::rooted_at(repository)?;
        images.repository = Some(repository.clone());
        Ok(images)
    }

    /// Images of a local tree, served from the kickstart host.
    pub fn local(tree: &Path, server: &ServerConfig) -> Result<Self> {
        let mut root = parse_url(&format!("{}/", server.base_url()))?;
        {
            let mut segments = root.path_segments_mut().map_err(|_| Error::MalformedInput {
                path: server.base_url(),
                reason: "cannot hold a path".to_string(),
            })?;
            segments.pop_if_empty();
            for component in tree.components() {
                if let Component::Normal(name) = component {
                    segments.push(&name.to_string_lossy());
                }
            }
            segments.push("");
        }
        Self::rooted_at(&root)
    }
}

fn parse_url(url: &str) -> Result<Url> {
    Url::parse(url).map_err(|e| Error::MalformedInput { path: url.to_string(), reason: e.to_string() })
}

fn join(base: &Url, relative: &str) -> Result<Url> {
    base.join(relative).map_err(|e| Error::MalformedInput {
        path: format!("{base}{relative}"),
        reason: e.to_string(),
    })
}

/// One bootable target of the menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    pub name: String,
    pub source: Option<String>,
    pub images: BootImages,
    /// Where the target retrieves its rendered kickstart.
    pub callback: String,
}

impl MenuEntry {
    /// `item` line selecting this entry.
    pub fn item(&self) -> String {
        format!("item {} {}", self.name, self.name)
    }

    /// Labeled stanza loading the installer for this entry.
    pub fn stanza(&self) -> String {
        let mut cmdline = Vec::new();
        match &self.images.repository {
            Some(repository) => cmdline.push(format!("inst.repo={repository}")),
            None => cmdline.push(format!("inst.stage2={}", self.images.stage2)),
        }
        cmdline.push(format!("inst.ks={}", self.callback));
        cmdline.push("quiet".to_string());

        format!(
            ":{}\nkernel {} {}\ninitrd {}\nboot\n",
            self.name,
            self.images.kernel,
            cmdline.join(" "),
            self.images.initrd
        )
    }
}

/// An ordered iPXE menu. The first entry is the default selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootMenu {
    pub title: String,
    pub timeout_ms: u64,
    pub entries: Vec<MenuEntry>,
}

impl BootMenu {
    /// Builds the menu over every answer document in `answers_dir`.
    ///
    /// Documents that fail to parse, or whose source cannot be booted, are
    /// logged and left out. A missing directory gives an empty menu.
    pub fn scan<P: AsRef<Path>>(answers_dir: P, server: &ServerConfig, settings: &MenuSettings) -> Self {
        let answers_dir = answers_dir.as_ref();
        let mut menu = BootMenu {
            title: settings.title.clone(),
            timeout_ms: settings.timeout_ms,
            entries: Vec::new(),
        };

        let files = match answer_files(answers_dir) {
            Ok(files) => files,
            Err(e) => {
                warn!("Unable to scan '{}': {}", answers_dir.display(), e);
                return menu;
            }
        };

        for path in files {
            match build_entry(&path, server) {
                Ok(Some(entry)) => {
                    debug!("Adding '{}' to the boot menu", entry.name);
                    menu.entries.push(entry);
                }
                Ok(None) => {}
                Err(e) => warn!("Skipping '{}': {}", path.display(), e),
            }
        }

        info!("Boot menu built with {} entries.", menu.entries.len());
        menu
    }

    /// The entry selected when nobody chooses one.
    pub fn default_entry(&self) -> Option<&MenuEntry> {
        self.entries.first()
    }

    /// Renders the iPXE script.
    pub fn render(&self) -> String {
        let Some(default) = self.default_entry() else {
            return fallback_script();
        };

        let mut script = String::from("#!ipxe\n\n");
        script.push_str(&format!("menu {}\n\n", self.title));
        for entry in &self.entries {
            script.push_str(&entry.item());
            script.push('\n');
        }
        script.push_str(&format!(
            "\nchoose --default {} --timeout {} target && goto ${{target}}\n",
            default.name, self.timeout_ms
        ));
        for entry in &self.entries {
            script.push('\n');
            script.push_str(&entry.stanza());
        }
        script
    }
}

/// Script served when no target can be booted.
pub fn fallback_script() -> String {
    "#!ipxe\necho No bootable targets available\nshell\n".to_string()
}

fn answer_patterns() -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in ANSWER_PATTERNS {
        builder.add(Glob::new(pattern).map_err(|e| Error::MalformedInput {
            path: pattern.to_string(),
            reason: e.to_string(),
        })?);
    }
    builder
        .build()
        .map_err(|e| Error::MalformedInput { path: "answer patterns".to_string(), reason: e.to_string() })
}

/// Answer documents directly inside `answers_dir`, sorted by file name.
fn answer_files(answers_dir: &Path) -> Result<Vec<PathBuf>> {
    if !answers_dir.is_dir() {
        return Err(Error::NotFound { path: answers_dir.display().to_string() });
    }
    let patterns = answer_patterns()?;

    let mut files = Vec::new();
    for entry in WalkDir::new(answers_dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| match e.into_io_error() {
            Some(io) => Error::from_io(io, answers_dir),
            None => Error::NotFound { path: answers_dir.display().to_string() },
        })?;
        if entry.file_type().is_file() && patterns.is_match(entry.file_name()) {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// Reads one answer document and derives its menu entry, if it can boot.
fn build_entry(path: &Path, server: &ServerConfig) -> Result<Option<MenuEntry>> {
    let name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .ok_or_else(|| Error::NotFound { path: path.display().to_string() })?;

    let content = read_text(path)?;
    let document: serde_json::Map<String, serde_json::Value> =
        parse_document(&content, &path.display().to_string())?;
    let source = document
        .get("metadata")
        .and_then(|metadata| metadata.get("source"))
        .and_then(|source| source.as_str())
        .map(str::to_string);

    let images = match BootSource::classify(source.as_deref()) {
        BootSource::RemoteRepository(url) => BootImages::remote(&url)?,
        BootSource::LocalTree(tree) => BootImages::local(&tree, server)?,
        BootSource::DiskImage(iso) => {
            warn!("Skipping '{name}': ISO source '{iso}' cannot be network booted");
            return Ok(None);
        }
        BootSource::Unsupported(Some(locator)) => {
            warn!("Skipping '{name}': unsupported source '{locator}'");
            return Ok(None);
        }
        BootSource::Unsupported(None) => {
            warn!("Skipping '{name}': no metadata.source");
            return Ok(None);
        }
    };

    Ok(Some(MenuEntry { callback: server.callback_url(&name), name, source, images }))
}
