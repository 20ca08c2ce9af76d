/*
 * runner.rs
 * Copyright (c) 2025 zsass-mixins contributors
 *
 * Sequential, fail-fast task runner.
 */

//! Task runner.
//!
//! [`Runner`] resolves targets (sequence or task names) against the
//! [`BuildConfig`], renders the banner once and runs the tasks one after
//! another. The first failing task aborts the run; files written by
//! earlier tasks are left in place.

use std::path::PathBuf;

use chrono::{Local, NaiveDate};

use crate::banner::Banner;
use crate::config::{BuildConfig, TaskKind};
use crate::error::Result;
use crate::observer::RunObserver;
use crate::tasks::{Task, TaskContext, task_for};

/// Files written by one task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskReport {
    pub task: String,
    pub outputs: Vec<PathBuf>,
}

/// Outcome of a successful run, in execution order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub tasks: Vec<TaskReport>,
}

impl RunReport {
    pub fn task_names(&self) -> Vec<&str> {
        self.tasks.iter().map(|t| t.task.as_str()).collect()
    }

    pub fn outputs(&self) -> impl Iterator<Item = &PathBuf> {
        self.tasks.iter().flat_map(|t| t.outputs.iter())
    }
}

pub struct Runner<'a> {
    config: &'a BuildConfig,
    observer: &'a dyn RunObserver,
    build_date: Option<NaiveDate>,
}

impl<'a> Runner<'a> {
    pub fn new(config: &'a BuildConfig, observer: &'a dyn RunObserver) -> Self {
        Self {
            config,
            observer,
            build_date: None,
        }
    }

    /// Stamp banners with a fixed date instead of today's.
    pub fn with_build_date(mut self, date: NaiveDate) -> Self {
        self.build_date = Some(date);
        self
    }

    pub fn banner(&self) -> Banner {
        let date = self
            .build_date
            .unwrap_or_else(|| Local::now().date_naive());
        Banner::new(&self.config.package, date)
    }

    /// Resolve every target before anything runs, so an unknown name fails
    /// without side effects.
    pub fn plan<S: AsRef<str>>(&self, targets: &[S]) -> Result<Vec<TaskKind>> {
        let mut plan = Vec::new();
        for target in targets {
            plan.extend(self.config.resolve(target.as_ref())?);
        }
        Ok(plan)
    }

    /// Run one sequence or task.
    pub fn run(&self, target: &str) -> Result<RunReport> {
        self.run_targets(&[target])
    }

    /// Run several targets as one flattened task list.
    pub fn run_targets<S: AsRef<str>>(&self, targets: &[S]) -> Result<RunReport> {
        let plan = self.plan(targets)?;
        tracing::debug!(
            tasks = ?plan.iter().map(TaskKind::as_str).collect::<Vec<_>>(),
            "Resolved targets"
        );
        let tasks: Vec<Box<dyn Task>> = plan.into_iter().map(task_for).collect();
        self.run_tasks(&tasks)
    }

    /// Run tasks in order, stopping at the first failure.
    pub fn run_tasks(&self, tasks: &[Box<dyn Task>]) -> Result<RunReport> {
        let banner = self.banner();
        let ctx = TaskContext {
            config: self.config,
            banner: &banner,
            observer: self.observer,
        };

        let total = tasks.len();
        self.observer.on_run_start(total);

        let mut report = RunReport::default();
        for (idx, task) in tasks.iter().enumerate() {
            self.observer.on_task_start(task.name(), idx, total);

            match task.run(&ctx) {
                Ok(outputs) => {
                    self.observer.on_task_complete(task.name(), idx, total);
                    report.tasks.push(TaskReport {
                        task: task.name().to_string(),
                        outputs,
                    });
                }
                Err(e) => {
                    let err = e.in_task(task.name());
                    self.observer.on_task_error(task.name(), idx, &err);
                    self.observer.on_run_error(&err);
                    return Err(err);
                }
            }
        }

        self.observer.on_run_complete();
        Ok(report)
    }
}
