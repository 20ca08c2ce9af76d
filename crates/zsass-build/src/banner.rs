//! Package metadata and the banner comment prepended to generated files.
//!
//! Copyright (c) 2025 zsass-mixins contributors

use std::fmt;
use std::path::Path;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{BuildError, Result};

/// The subset of `package.json` the build needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub version: String,
}

impl PackageInfo {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }

    /// Read `package.json` from the project root.
    ///
    /// A missing file is an I/O error; a file without a `name` or `version`
    /// is a configuration error.
    pub fn load(root: &Path) -> Result<Self> {
        let path = root.join("package.json");
        let content = std::fs::read_to_string(&path).map_err(|e| BuildError::io(&path, e))?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let info: PackageInfo = serde_json::from_str(content)
            .map_err(|e| BuildError::config(format!("Invalid package.json: {}", e)))?;

        if info.name.trim().is_empty() {
            return Err(BuildError::config("package.json is missing \"name\""));
        }
        if info.version.trim().is_empty() {
            return Err(BuildError::config("package.json is missing \"version\""));
        }
        Ok(info)
    }
}

/// Banner comment shared by every artifact of one run.
///
/// Rendered as `/*! <name> - v<version> - <yyyy-mm-dd> */` followed by a
/// newline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner(String);

impl Banner {
    pub fn new(package: &PackageInfo, date: NaiveDate) -> Self {
        Self(format!(
            "/*! {} - v{} - {} */\n",
            package.name,
            package.version,
            date.format("%Y-%m-%d")
        ))
    }

    /// Banner stamped with the local date.
    pub fn today(package: &PackageInfo) -> Self {
        Self::new(package, Local::now().date_naive())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Banner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
