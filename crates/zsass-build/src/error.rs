//! Error types for the build pipeline.
//!
//! Copyright (c) 2025 zsass-mixins contributors

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur while configuring or running a build.
#[derive(Debug, Error)]
pub enum BuildError {
    /// Unknown task or sequence, malformed glob, missing required option
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Stylesheet syntax error, unresolved import, invalid style option
    #[error("Failed to compile {}: {message}", .path.display())]
    Compilation { path: PathBuf, message: String },

    /// Destination unwritable or source missing
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A task in a running sequence failed
    #[error("Task '{task}' failed: {source}")]
    Task {
        task: String,
        #[source]
        source: Box<BuildError>,
    },
}

impl BuildError {
    /// Create a configuration error from any message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Create an I/O error tied to the path that caused it.
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Wrap an error with the name of the task that produced it.
    pub fn in_task(self, task: impl Into<String>) -> Self {
        Self::Task {
            task: task.into(),
            source: Box::new(self),
        }
    }

    /// The underlying error, with any task wrappers removed.
    pub fn root_cause(&self) -> &BuildError {
        match self {
            BuildError::Task { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// Name of the failing task, if the error came out of a run.
    pub fn task(&self) -> Option<&str> {
        match self {
            BuildError::Task { task, .. } => Some(task.as_str()),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, BuildError>;
