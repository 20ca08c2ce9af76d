//! Command implementations for the zsass CLI
//!
//! Each command module handles the CLI interface and delegates to
//! zsass-build for the actual work.

pub mod build;
pub mod tasks;

use std::path::PathBuf;

use anyhow::{Context, Result};
use zsass_build::BuildConfig;

/// Options shared by every command.
#[derive(Debug)]
pub struct ProjectArgs {
    pub root: PathBuf,
    pub config: Option<PathBuf>,
}

impl ProjectArgs {
    /// Load the build configuration for the selected project.
    pub fn load_config(&self) -> Result<BuildConfig> {
        BuildConfig::load(&self.root, self.config.as_deref()).with_context(|| {
            format!(
                "Failed to load build configuration from {}",
                self.root.display()
            )
        })
    }
}
