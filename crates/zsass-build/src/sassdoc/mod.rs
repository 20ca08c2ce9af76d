//! Documentation generation from SassDoc annotations.
//!
//! Copyright (c) 2025 zsass-mixins contributors
//!
//! The generator reads one SCSS file, collects its annotated items
//! ([`parse_items`]) and writes a documentation directory containing:
//! - `index.html`: public items, grouped by `@group`
//! - `sassdoc.json`: every item, including private ones

mod html;
mod parse;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::banner::PackageInfo;
use crate::error::{BuildError, Result};
use crate::tasks::write_output;

pub use html::write_index;
pub use parse::{Access, DocItem, Example, ItemKind, Link, Param, Return, parse_items};

pub const INDEX_FILE: &str = "index.html";
pub const DATA_FILE: &str = "sassdoc.json";

/// Everything needed to render the documentation of one source file.
#[derive(Debug, Clone, Serialize)]
pub struct Documentation {
    pub package: PackageInfo,
    /// Source path as configured, used for display and source links.
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_path: Option<String>,
    pub items: Vec<DocItem>,
}

impl Documentation {
    pub fn new(
        package: PackageInfo,
        source: &Path,
        base_path: Option<String>,
        content: &str,
    ) -> Self {
        Self {
            package,
            source: source
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join("/"),
            base_path,
            items: parse_items(content),
        }
    }

    /// Public items by group name, groups sorted alphabetically.
    pub fn public_groups(&self) -> BTreeMap<&str, Vec<&DocItem>> {
        let mut groups: BTreeMap<&str, Vec<&DocItem>> = BTreeMap::new();
        for item in self.items.iter().filter(|i| i.access == Access::Public) {
            groups.entry(item.group.as_str()).or_default().push(item);
        }
        groups
    }

    /// Link to the item's declaration in the repository, if a base path is set.
    pub fn source_link(&self, item: &DocItem) -> Option<String> {
        self.base_path.as_ref().map(|base| {
            format!(
                "{}/blob/master/{}#L{}",
                base.trim_end_matches('/'),
                self.source,
                item.line
            )
        })
    }

    /// Replace `dest` with a freshly generated documentation tree.
    ///
    /// Returns the files written.
    pub fn generate(&self, dest: &Path) -> Result<Vec<PathBuf>> {
        if dest.exists() {
            std::fs::remove_dir_all(dest).map_err(|e| BuildError::io(dest, e))?;
        }
        std::fs::create_dir_all(dest).map_err(|e| BuildError::io(dest, e))?;

        let mut index = Vec::new();
        let index_path = dest.join(INDEX_FILE);
        write_index(self, &mut index).map_err(|e| BuildError::io(&index_path, e))?;
        write_output(&index_path, index)?;

        let data_path = dest.join(DATA_FILE);
        let data = serde_json::to_string_pretty(self).map_err(|e| {
            BuildError::config(format!("Failed to serialize documentation data: {}", e))
        })?;
        write_output(&data_path, data)?;

        Ok(vec![index_path, data_path])
    }
}
