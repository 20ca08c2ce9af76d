//! Build pipeline for the zsass-mixins stylesheet library.
//!
//! Copyright (c) 2025 zsass-mixins contributors
//!
//! This crate provides:
//! - [`BuildConfig`]: immutable configuration (defaults, `zsass.yml`, `package.json`)
//! - [`Runner`]: sequential, fail-fast execution of named task sequences
//! - Tasks: `concat` (aggregate mixins file), `sass` (CSS + source map via
//!   grass) and `sassdoc` (HTML documentation from `///` annotations)
//!
//! # Example
//!
//! ```rust,ignore
//! use std::path::Path;
//! use zsass_build::{BuildConfig, Runner, TracingObserver};
//!
//! let config = BuildConfig::load(Path::new("."), None)?;
//! let report = Runner::new(&config, &TracingObserver).run("default")?;
//! ```

pub mod banner;
pub mod config;
pub mod error;
pub mod observer;
pub mod runner;
pub mod sassdoc;
pub mod sourcemap;
pub mod tasks;

pub use banner::{Banner, PackageInfo};
pub use config::{
    BuildConfig, CONFIG_FILE_NAME, ConcatOptions, SassDocOptions, SassOptions, SassStyle, TaskKind,
};
pub use error::{BuildError, Result};
pub use observer::{EventLevel, NoopObserver, RunObserver, TracingObserver};
pub use runner::{RunReport, Runner, TaskReport};
pub use tasks::{Task, TaskContext};
