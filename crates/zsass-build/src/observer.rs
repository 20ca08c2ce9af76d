/*
 * observer.rs
 * Copyright (c) 2025 zsass-mixins contributors
 *
 * Run observer for logging task progress.
 */

//! Observer abstraction for run events.
//!
//! The runner notifies a [`RunObserver`] before and after every task.
//! Tasks use [`RunObserver::on_event`] for their own progress lines, so
//! the CLI gets them through `tracing` while tests can record them.

use crate::error::BuildError;

/// Event severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventLevel {
    Debug,
    Info,
    Warn,
}

impl EventLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventLevel::Debug => "debug",
            EventLevel::Info => "info",
            EventLevel::Warn => "warn",
        }
    }
}

/// Observer for run events.
///
/// All methods have empty default implementations, so observers only
/// implement the events they care about.
pub trait RunObserver {
    /// Called once before the first task.
    fn on_run_start(&self, _total_tasks: usize) {}

    /// Called before a task runs.
    fn on_task_start(&self, _name: &str, _index: usize, _total: usize) {}

    /// Called after a task completes successfully.
    fn on_task_complete(&self, _name: &str, _index: usize, _total: usize) {}

    /// Called when a task fails. No further tasks run.
    fn on_task_error(&self, _name: &str, _index: usize, _error: &BuildError) {}

    /// Progress message emitted by a task.
    fn on_event(&self, _message: &str, _level: EventLevel) {}

    /// Called after every task completed.
    fn on_run_complete(&self) {}

    /// Called when the run is aborted.
    fn on_run_error(&self, _error: &BuildError) {}
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl RunObserver for NoopObserver {}

/// Observer that emits `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl RunObserver for TracingObserver {
    fn on_run_start(&self, total_tasks: usize) {
        tracing::debug!(tasks = total_tasks, "Starting run");
    }

    fn on_task_start(&self, name: &str, index: usize, total: usize) {
        tracing::info!("Running \"{}\" task ({}/{})", name, index + 1, total);
    }

    fn on_task_complete(&self, name: &str, index: usize, total: usize) {
        tracing::debug!(
            task.name = name,
            task.index = index,
            task.total = total,
            "Completed task"
        );
    }

    fn on_task_error(&self, name: &str, index: usize, error: &BuildError) {
        tracing::error!(
            task.name = name,
            task.index = index,
            error = %error.root_cause(),
            "Task failed"
        );
    }

    fn on_event(&self, message: &str, level: EventLevel) {
        match level {
            EventLevel::Debug => tracing::debug!("{}", message),
            EventLevel::Info => tracing::info!("{}", message),
            EventLevel::Warn => tracing::warn!("{}", message),
        }
    }

    fn on_run_complete(&self) {
        tracing::info!("Done.");
    }

    fn on_run_error(&self, error: &BuildError) {
        tracing::debug!(error = %error, "Aborted due to errors");
    }
}
