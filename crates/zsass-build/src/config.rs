//! Build configuration.
//!
//! Copyright (c) 2025 zsass-mixins contributors
//!
//! [`BuildConfig`] is constructed once at startup and shared by reference
//! with every task. The built-in defaults describe the zsass-mixins layout;
//! an optional `zsass.yml` at the project root overrides them field by field:
//!
//! ```yaml
//! concat:
//!   src: ["mixins/*.scss", "!mixins/_zsass-mixins.scss"]
//!   dest: mixins.scss
//! sass:
//!   style: expanded
//!   files:
//!     test/css/main.css: test/scss/main.scss
//! sassdoc:
//!   src: mixins.scss
//!   dest: doc
//! sequences:
//!   default: [concat, sass]
//!   doc: [concat, sassdoc]
//! ```

use std::fmt;
use std::path::{Component, Path, PathBuf};
use std::str::FromStr;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::banner::PackageInfo;
use crate::error::{BuildError, Result};

/// Name of the optional configuration file looked up at the project root.
pub const CONFIG_FILE_NAME: &str = "zsass.yml";

const DEFAULT_BASE_PATH: &str = "https://github.com/chuoivh10/zsass-mixins";

/// The tasks the runner knows how to execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskKind {
    Concat,
    Sass,
    SassDoc,
}

impl TaskKind {
    pub const ALL: [TaskKind; 3] = [TaskKind::Concat, TaskKind::Sass, TaskKind::SassDoc];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskKind::Concat => "concat",
            TaskKind::Sass => "sass",
            TaskKind::SassDoc => "sassdoc",
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskKind {
    type Err = BuildError;

    fn from_str(s: &str) -> Result<Self> {
        TaskKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| BuildError::config(format!("unknown task '{}'", s)))
    }
}

/// Output style passed to the stylesheet compiler.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SassStyle {
    #[default]
    Expanded,
    Compressed,
}

impl SassStyle {
    pub fn to_grass(self) -> grass::OutputStyle {
        match self {
            SassStyle::Expanded => grass::OutputStyle::Expanded,
            SassStyle::Compressed => grass::OutputStyle::Compressed,
        }
    }
}

/// Options for the `concat` task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConcatOptions {
    /// Glob patterns relative to the root. A leading `!` marks an exclusion.
    pub src: Vec<String>,
    /// Aggregate output file, relative to the root.
    pub dest: PathBuf,
}

impl ConcatOptions {
    pub fn includes(&self) -> impl Iterator<Item = &str> {
        self.src
            .iter()
            .filter(|p| !p.starts_with('!'))
            .map(String::as_str)
    }

    pub fn excludes(&self) -> impl Iterator<Item = &str> {
        self.src.iter().filter_map(|p| p.strip_prefix('!'))
    }
}

impl Default for ConcatOptions {
    fn default() -> Self {
        Self {
            src: vec![
                "mixins/*.scss".to_string(),
                "!mixins/_zsass-mixins.scss".to_string(),
            ],
            dest: PathBuf::from("mixins.scss"),
        }
    }
}

/// Options for the `sass` task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SassOptions {
    /// Destination CSS file mapped to its source stylesheet, in build order.
    pub files: IndexMap<PathBuf, PathBuf>,
    pub style: SassStyle,
    /// Normalize every line ending of the output to `\n`.
    pub unix_newlines: bool,
    /// Write a `<dest>.map` sidecar next to each output.
    ///
    /// The map is file-level only: it names and embeds the source, but its
    /// `mappings` are empty because grass reports no positions.
    pub source_map: bool,
    /// Extra directories searched for `@import`/`@use`.
    pub load_paths: Vec<PathBuf>,
}

impl Default for SassOptions {
    fn default() -> Self {
        let mut files = IndexMap::new();
        files.insert(
            PathBuf::from("test/css/main.css"),
            PathBuf::from("test/scss/main.scss"),
        );
        Self {
            files,
            style: SassStyle::Expanded,
            unix_newlines: true,
            source_map: true,
            load_paths: Vec::new(),
        }
    }
}

/// Options for the `sassdoc` task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SassDocOptions {
    pub src: PathBuf,
    /// Output directory. Cleared before every generation.
    pub dest: PathBuf,
    /// Repository URL used for "view source" links.
    pub base_path: Option<String>,
}

impl Default for SassDocOptions {
    fn default() -> Self {
        Self {
            src: PathBuf::from("mixins.scss"),
            dest: PathBuf::from("doc"),
            base_path: Some(DEFAULT_BASE_PATH.to_string()),
        }
    }
}

fn default_sequences() -> IndexMap<String, Vec<TaskKind>> {
    let mut sequences = IndexMap::new();
    sequences.insert(
        "default".to_string(),
        vec![TaskKind::Concat, TaskKind::Sass],
    );
    sequences.insert("doc".to_string(), vec![TaskKind::Concat, TaskKind::SassDoc]);
    sequences
}

/// Immutable configuration for one invocation of the runner.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    pub root: PathBuf,
    pub package: PackageInfo,
    pub concat: ConcatOptions,
    pub sass: SassOptions,
    pub sassdoc: SassDocOptions,
    pub sequences: IndexMap<String, Vec<TaskKind>>,
}

impl BuildConfig {
    /// Configuration with the built-in defaults.
    pub fn new(root: impl Into<PathBuf>, package: PackageInfo) -> Self {
        Self {
            root: root.into(),
            package,
            concat: ConcatOptions::default(),
            sass: SassOptions::default(),
            sassdoc: SassDocOptions::default(),
            sequences: default_sequences(),
        }
    }

    /// Load the configuration for a project root.
    ///
    /// Reads `package.json`, then applies `config_path` if given, otherwise
    /// `zsass.yml` at the root when present. An explicitly named config file
    /// must exist.
    pub fn load(root: &Path, config_path: Option<&Path>) -> Result<Self> {
        let package = PackageInfo::load(root)?;

        let file = match config_path {
            Some(path) => Some(path.to_path_buf()),
            None => {
                let default = root.join(CONFIG_FILE_NAME);
                default.is_file().then_some(default)
            }
        };

        match file {
            Some(path) => {
                tracing::debug!(config = %path.display(), "Reading build configuration");
                let yaml =
                    std::fs::read_to_string(&path).map_err(|e| BuildError::io(&path, e))?;
                Self::from_yaml(root, package, &yaml)
            }
            None => {
                let config = Self::new(root, package);
                config.validate()?;
                Ok(config)
            }
        }
    }

    /// Apply YAML overrides on top of the defaults and validate the result.
    pub fn from_yaml(root: impl Into<PathBuf>, package: PackageInfo, yaml: &str) -> Result<Self> {
        let file: ConfigFile = if yaml.trim().is_empty() {
            ConfigFile::default()
        } else {
            serde_yaml::from_str(yaml)
                .map_err(|e| BuildError::config(format!("Invalid {}: {}", CONFIG_FILE_NAME, e)))?
        };

        let mut config = Self::new(root, package);
        file.apply(&mut config);
        config.validate()?;
        Ok(config)
    }

    /// Check the invariants tasks rely on.
    pub fn validate(&self) -> Result<()> {
        if self.concat.includes().next().is_none() {
            return Err(BuildError::config(
                "concat.src needs at least one include pattern",
            ));
        }
        for pattern in &self.concat.src {
            let raw = pattern.strip_prefix('!').unwrap_or(pattern);
            glob::Pattern::new(raw).map_err(|e| {
                BuildError::config(format!("Invalid glob pattern '{}': {}", pattern, e))
            })?;
        }
        require_path("concat.dest", &self.concat.dest)?;

        if self.sass.files.is_empty() {
            return Err(BuildError::config("sass.files must not be empty"));
        }
        for (dest, src) in &self.sass.files {
            require_path("sass.files destination", dest)?;
            require_path("sass.files source", src)?;
        }

        require_path("sassdoc.src", &self.sassdoc.src)?;
        require_path("sassdoc.dest", &self.sassdoc.dest)?;
        self.check_doc_dest()?;

        for (name, tasks) in &self.sequences {
            if tasks.is_empty() {
                return Err(BuildError::config(format!("sequence '{}' is empty", name)));
            }
        }
        Ok(())
    }

    /// Resolve a sequence or task name to the tasks it runs, in order.
    pub fn resolve(&self, target: &str) -> Result<Vec<TaskKind>> {
        if let Some(tasks) = self.sequences.get(target) {
            return Ok(tasks.clone());
        }
        target.parse::<TaskKind>().map(|kind| vec![kind]).map_err(|_| {
            BuildError::config(format!("unknown task or sequence '{}'", target))
        })
    }

    /// Make sure clearing `sassdoc.dest` cannot delete anything the build
    /// reads or writes.
    ///
    /// The destination must stay inside the root, must not be the root
    /// itself, and must not equal or contain any task input or output.
    pub fn check_doc_dest(&self) -> Result<()> {
        let shown = self.sassdoc.dest.display();
        let dest = self.within_root(&self.sassdoc.dest).ok_or_else(|| {
            BuildError::config(format!(
                "sassdoc.dest '{}' must stay inside the project root",
                shown
            ))
        })?;
        if dest.as_os_str().is_empty() {
            return Err(BuildError::config(format!(
                "sassdoc.dest '{}' would remove the project root",
                shown
            )));
        }

        for path in self.build_paths() {
            if path.starts_with(&dest) {
                return Err(BuildError::config(format!(
                    "sassdoc.dest '{}' would remove '{}'",
                    shown,
                    path.display()
                )));
            }
        }
        Ok(())
    }

    /// Every path the tasks read or write, root-relative. Glob includes
    /// contribute their literal directory prefix.
    fn build_paths(&self) -> Vec<PathBuf> {
        let mut paths = vec![self.concat.dest.clone(), self.sassdoc.src.clone()];
        paths.extend(self.concat.includes().map(literal_prefix));
        for (dest, src) in &self.sass.files {
            paths.push(dest.clone());
            paths.push(src.clone());
        }
        paths
            .iter()
            .filter_map(|path| self.within_root(path))
            .collect()
    }

    /// Root-relative form of `path` with `.` components removed, or `None`
    /// when it climbs out through `..` or is absolute outside the root.
    fn within_root(&self, path: &Path) -> Option<PathBuf> {
        let relative = if path.is_absolute() {
            path.strip_prefix(&self.root).ok()?
        } else {
            path
        };

        let mut normalized = PathBuf::new();
        for component in relative.components() {
            match component {
                Component::Normal(part) => normalized.push(part),
                Component::CurDir => {}
                _ => return None,
            }
        }
        Some(normalized)
    }

    /// Absolute (root-joined) form of a configured path.
    pub fn path(&self, relative: &Path) -> PathBuf {
        self.root.join(relative)
    }
}

/// Leading components of a glob pattern that contain no wildcard.
fn literal_prefix(pattern: &str) -> PathBuf {
    Path::new(pattern)
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .take_while(|c| !c.as_os_str().to_string_lossy().contains(['*', '?', '[', '{']))
        .collect()
}

fn require_path(option: &str, path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() {
        return Err(BuildError::config(format!("{} must not be empty", option)));
    }
    Ok(())
}

// On-disk shape of zsass.yml. Every field is optional.

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    concat: Option<ConcatSection>,
    sass: Option<SassSection>,
    sassdoc: Option<SassDocSection>,
    sequences: Option<IndexMap<String, Vec<TaskKind>>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConcatSection {
    src: Option<Vec<String>>,
    dest: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SassSection {
    files: Option<IndexMap<PathBuf, PathBuf>>,
    style: Option<SassStyle>,
    unix_newlines: Option<bool>,
    source_map: Option<bool>,
    load_paths: Option<Vec<PathBuf>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SassDocSection {
    src: Option<PathBuf>,
    dest: Option<PathBuf>,
    base_path: Option<String>,
}

impl ConfigFile {
    fn apply(self, config: &mut BuildConfig) {
        if let Some(concat) = self.concat {
            if let Some(src) = concat.src {
                config.concat.src = src;
            }
            if let Some(dest) = concat.dest {
                config.concat.dest = dest;
            }
        }

        if let Some(sass) = self.sass {
            if let Some(files) = sass.files {
                config.sass.files = files;
            }
            if let Some(style) = sass.style {
                config.sass.style = style;
            }
            if let Some(unix_newlines) = sass.unix_newlines {
                config.sass.unix_newlines = unix_newlines;
            }
            if let Some(source_map) = sass.source_map {
                config.sass.source_map = source_map;
            }
            if let Some(load_paths) = sass.load_paths {
                config.sass.load_paths = load_paths;
            }
        }

        if let Some(sassdoc) = self.sassdoc {
            if let Some(src) = sassdoc.src {
                config.sassdoc.src = src;
            }
            if let Some(dest) = sassdoc.dest {
                config.sassdoc.dest = dest;
            }
            if let Some(base_path) = sassdoc.base_path {
                config.sassdoc.base_path = (!base_path.is_empty()).then_some(base_path);
            }
        }

        if let Some(sequences) = self.sequences {
            config.sequences.extend(sequences);
        }
    }
}
