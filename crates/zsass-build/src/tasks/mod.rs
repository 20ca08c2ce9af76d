/*
 * tasks/mod.rs
 * Copyright (c) 2025 zsass-mixins contributors
 *
 * Task trait and the built-in tasks.
 */

//! Build tasks.
//!
//! A [`Task`] is one unit of work in a run. Tasks read everything they need
//! from the [`TaskContext`] and report the files they wrote. They must not
//! keep state between runs.

pub mod concat;
pub mod sass;
pub mod sassdoc;

use std::path::{Path, PathBuf};

use crate::banner::Banner;
use crate::config::{BuildConfig, TaskKind};
use crate::error::{BuildError, Result};
use crate::observer::RunObserver;

pub use concat::ConcatTask;
pub use sass::SassTask;
pub use sassdoc::SassDocTask;

/// Shared, read-only inputs for every task of a run.
pub struct TaskContext<'a> {
    pub config: &'a BuildConfig,
    pub banner: &'a Banner,
    pub observer: &'a dyn RunObserver,
}

/// A single named step of a build sequence.
pub trait Task {
    /// Name used in log lines and error messages.
    fn name(&self) -> &str;

    /// Run the task and return the paths of the files it wrote.
    fn run(&self, ctx: &TaskContext<'_>) -> Result<Vec<PathBuf>>;
}

/// The built-in implementation of a task kind.
pub fn task_for(kind: TaskKind) -> Box<dyn Task> {
    match kind {
        TaskKind::Concat => Box::new(ConcatTask),
        TaskKind::Sass => Box::new(SassTask),
        TaskKind::SassDoc => Box::new(SassDocTask),
    }
}

/// Write a generated file, creating parent directories as needed.
pub(crate) fn write_output(path: &Path, contents: impl AsRef<[u8]>) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| BuildError::io(parent, e))?;
        }
    }
    std::fs::write(path, contents).map_err(|e| BuildError::io(path, e))
}

pub(crate) fn read_source(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| BuildError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_for_names_match_kinds() {
        for kind in TaskKind::ALL {
            assert_eq!(task_for(kind).name(), kind.as_str());
        }
    }

    #[test]
    fn test_write_output_creates_parents() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("test/css/main.css");

        write_output(&path, "a {}\n").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "a {}\n");
    }

    #[test]
    fn test_read_source_missing_is_io_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = read_source(&dir.path().join("missing.scss")).unwrap_err();
        assert!(matches!(err, BuildError::Io { .. }));
    }
}
