//! Source map sidecars for compiled stylesheets.
//!
//! Copyright (c) 2025 zsass-mixins contributors
//!
//! grass does not report mappings, so the map carries the file-level
//! association only: the output file, its source (relative to the map) and
//! the embedded source text. `mappings` stays empty, which is valid v3.

use std::path::{Component, Path};

use serde::Serialize;

use crate::error::{BuildError, Result};

/// A revision 3 source map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceMap {
    pub version: u8,
    pub file: String,
    pub sources: Vec<String>,
    pub sources_content: Vec<String>,
    pub names: Vec<String>,
    pub mappings: String,
}

impl SourceMap {
    /// Map for `output` compiled from `source`.
    ///
    /// Both paths are relative to the project root; `sources` entries are
    /// rewritten relative to the directory the map is written to.
    pub fn new(output: &Path, source: &Path, source_content: &str) -> Self {
        let file = output
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let map_dir = output.parent().unwrap_or(Path::new(""));

        Self {
            version: 3,
            file,
            sources: vec![relative_url(map_dir, source)],
            sources_content: vec![source_content.to_string()],
            names: Vec::new(),
            mappings: String::new(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| BuildError::config(format!("Failed to serialize source map: {}", e)))
    }
}

/// File name of the sidecar map for a CSS output.
pub fn map_file_name(output: &Path) -> String {
    let name = output
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!("{}.map", name)
}

/// `/`-separated path from `from_dir` to `to`.
fn relative_url(from_dir: &Path, to: &Path) -> String {
    let from: Vec<Component<'_>> = from_dir
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();
    let to: Vec<Component<'_>> = to
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();

    let common = from
        .iter()
        .zip(to.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut parts: Vec<String> = Vec::new();
    parts.extend(std::iter::repeat_n("..".to_string(), from.len() - common));
    parts.extend(
        to[common..]
            .iter()
            .map(|c| c.as_os_str().to_string_lossy().into_owned()),
    );
    parts.join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_url_sibling_directory() {
        assert_eq!(
            relative_url(Path::new("test/css"), Path::new("test/scss/main.scss")),
            "../scss/main.scss"
        );
    }

    #[test]
    fn test_relative_url_same_directory() {
        assert_eq!(
            relative_url(Path::new("./dist"), Path::new("dist/main.scss")),
            "main.scss"
        );
        assert_eq!(relative_url(Path::new(""), Path::new("main.scss")), "main.scss");
    }

    #[test]
    fn test_source_map_json_shape() {
        let map = SourceMap::new(
            Path::new("test/css/main.css"),
            Path::new("test/scss/main.scss"),
            "a { b: c; }",
        );
        let json: serde_json::Value = serde_json::from_str(&map.to_json().unwrap()).unwrap();

        assert_eq!(json["version"], 3);
        assert_eq!(json["file"], "main.css");
        assert_eq!(json["sources"][0], "../scss/main.scss");
        assert_eq!(json["sourcesContent"][0], "a { b: c; }");
        assert_eq!(json["mappings"], "");
    }

    #[test]
    fn test_map_file_name() {
        assert_eq!(map_file_name(Path::new("test/css/main.css")), "main.css.map");
    }
}
