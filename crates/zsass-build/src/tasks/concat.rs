//! The `concat` task: build the aggregate mixins file.
//!
//! Copyright (c) 2025 zsass-mixins contributors

use std::path::{Component, Path, PathBuf};

use glob::{MatchOptions, Pattern};

use super::{Task, TaskContext, read_source, write_output};
use crate::config::ConcatOptions;
use crate::error::{BuildError, Result};
use crate::observer::EventLevel;

/// Concatenates every matching mixin file behind the banner.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConcatTask;

impl Task for ConcatTask {
    fn name(&self) -> &str {
        "concat"
    }

    fn run(&self, ctx: &TaskContext<'_>) -> Result<Vec<PathBuf>> {
        let options = &ctx.config.concat;
        let SourceSet {
            files: sources,
            unmatched,
        } = collect_sources(&ctx.config.root, options)?;

        for pattern in &unmatched {
            ctx.observer.on_event(
                &format!("No files matched pattern: {}", pattern),
                EventLevel::Warn,
            );
        }

        let mut contents = Vec::with_capacity(sources.len());
        for source in &sources {
            contents.push(read_source(&ctx.config.path(source))?);
        }

        let output = concatenate(ctx.banner.as_str(), contents.iter().map(String::as_str));
        let dest = ctx.config.path(&options.dest);
        write_output(&dest, output)?;

        ctx.observer.on_event(
            &format!(
                "File {} created from {} sources.",
                options.dest.display(),
                sources.len()
            ),
            EventLevel::Info,
        );
        Ok(vec![dest])
    }
}

/// Resolved concat inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceSet {
    /// Root-relative files, in concatenation order.
    pub files: Vec<PathBuf>,
    /// Include patterns that matched no file.
    pub unmatched: Vec<String>,
}

/// Resolve the concat inputs, relative to `root`, in listing order.
///
/// Patterns apply in declared order: an include adds its matches, a `!`
/// exclusion removes whatever it matches from the set built so far. The
/// destination file is always removed so the aggregate never includes
/// itself. Exclusions that match nothing are ignored.
pub fn collect_sources(root: &Path, options: &ConcatOptions) -> Result<SourceSet> {
    let match_options = MatchOptions {
        require_literal_separator: true,
        ..MatchOptions::default()
    };

    let mut files: Vec<PathBuf> = Vec::new();
    let mut unmatched = Vec::new();

    for raw in &options.src {
        if let Some(exclude) = raw.strip_prefix('!') {
            let pattern = Pattern::new(strip_cur_dir(exclude)).map_err(|e| {
                BuildError::config(format!("Invalid glob pattern '{}': {}", raw, e))
            })?;
            files.retain(|file| !pattern.matches_path_with(file, match_options));
            continue;
        }

        let matches = expand(root, raw)?;
        if matches.is_empty() {
            unmatched.push(raw.clone());
        }
        for path in matches {
            if !files.contains(&path) {
                files.push(path);
            }
        }
    }

    let dest = normalize(&options.dest);
    files.retain(|file| *file != dest);
    Ok(SourceSet { files, unmatched })
}

/// Join the banner and file contents into the aggregate text.
///
/// Every non-empty part ends up terminated by exactly the newline it
/// already has, or one added.
pub fn concatenate<'a>(banner: &str, parts: impl IntoIterator<Item = &'a str>) -> String {
    let mut output = String::from(banner);
    for part in parts {
        if part.is_empty() {
            continue;
        }
        output.push_str(part);
        if !part.ends_with('\n') {
            output.push('\n');
        }
    }
    output
}

/// Expand one include pattern to root-relative file paths.
fn expand(root: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let root_str = root.to_str().ok_or_else(|| {
        BuildError::config(format!("Project root is not valid UTF-8: {}", root.display()))
    })?;
    let full = if root_str.is_empty() {
        strip_cur_dir(pattern).to_string()
    } else {
        format!(
            "{}/{}",
            Pattern::escape(root_str.trim_end_matches('/')),
            strip_cur_dir(pattern)
        )
    };

    let entries = glob::glob(&full)
        .map_err(|e| BuildError::config(format!("Invalid glob pattern '{}': {}", pattern, e)))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| {
            let path = e.path().to_path_buf();
            BuildError::io(path, e.into_error())
        })?;
        if !path.is_file() {
            continue;
        }
        let relative = path.strip_prefix(root).unwrap_or(&path);
        files.push(normalize(relative));
    }
    Ok(files)
}

fn strip_cur_dir(pattern: &str) -> &str {
    pattern.strip_prefix("./").unwrap_or(pattern)
}

fn normalize(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::fs;

    use chrono::NaiveDate;
    use tempfile::TempDir;

    use super::*;
    use crate::banner::{Banner, PackageInfo};
    use crate::config::BuildConfig;
    use crate::observer::testing::RecordingObserver;

    fn project(files: &[(&str, &str)]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for (path, content) in files {
            let path = dir.path().join(path);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content).unwrap();
        }
        dir
    }

    fn banner() -> Banner {
        Banner::new(
            &PackageInfo::new("zsass-mixins", "1.0.0"),
            NaiveDate::from_ymd_opt(2025, 1, 2).unwrap(),
        )
    }

    fn run_concat(dir: &TempDir, config: &BuildConfig) -> (String, Vec<String>) {
        let banner = banner();
        let observer = RecordingObserver::default();
        let ctx = TaskContext {
            config,
            banner: &banner,
            observer: &observer,
        };
        ConcatTask.run(&ctx).unwrap();
        let output = fs::read_to_string(dir.path().join(&config.concat.dest)).unwrap();
        (output, observer.events())
    }

    #[test]
    fn test_concatenates_in_listing_order_without_aggregate() {
        let dir = project(&[
            ("mixins/b.scss", "// b\n"),
            ("mixins/a.scss", "// a\n"),
            ("mixins/_zsass-mixins.scss", "// aggregate\n"),
        ]);
        let config = BuildConfig::new(dir.path(), PackageInfo::new("zsass-mixins", "1.0.0"));

        let (output, _) = run_concat(&dir, &config);

        let body = output.strip_prefix(banner().as_str()).unwrap();
        assert_eq!(body, "// a\n// b\n");
        assert!(!output.contains("aggregate"));
    }

    #[test]
    fn test_files_without_trailing_newline() {
        let dir = project(&[("mixins/a.scss", "// a"), ("mixins/b.scss", "// b")]);
        let config = BuildConfig::new(dir.path(), PackageInfo::new("zsass-mixins", "1.0.0"));

        let (output, _) = run_concat(&dir, &config);

        assert_eq!(output, format!("{}// a\n// b\n", banner()));
    }

    #[test]
    fn test_everything_excluded_writes_banner_only() {
        let dir = project(&[("mixins/_zsass-mixins.scss", "// aggregate\n")]);
        let config = BuildConfig::new(dir.path(), PackageInfo::new("zsass-mixins", "1.0.0"));

        let (output, events) = run_concat(&dir, &config);

        assert_eq!(output, banner().as_str());
        assert!(events.iter().any(|e| e.starts_with("info:File mixins.scss created")));
    }

    #[test]
    fn test_no_matches_warns() {
        let dir = project(&[]);
        let config = BuildConfig::new(dir.path(), PackageInfo::new("zsass-mixins", "1.0.0"));

        let (output, events) = run_concat(&dir, &config);

        assert_eq!(output, banner().as_str());
        assert!(events.contains(&"warn:No files matched pattern: mixins/*.scss".to_string()));
    }

    #[test]
    fn test_destination_never_includes_itself() {
        let dir = project(&[("mixins/a.scss", "// a\n")]);
        let mut config = BuildConfig::new(dir.path(), PackageInfo::new("zsass-mixins", "1.0.0"));
        config.concat.src = vec!["mixins/*.scss".to_string()];
        config.concat.dest = PathBuf::from("mixins/all.scss");

        let (first, _) = run_concat(&dir, &config);
        let (second, _) = run_concat(&dir, &config);

        assert_eq!(first, second);
        assert_eq!(first, format!("{}// a\n", banner()));
    }

    #[test]
    fn test_exclusion_of_missing_file_is_noop() {
        let dir = project(&[("mixins/a.scss", "// a\n")]);
        let mut options = ConcatOptions::default();
        options.src.push("!mixins/does-not-exist.scss".to_string());

        let sources = collect_sources(dir.path(), &options).unwrap();
        assert_eq!(sources.files, vec![PathBuf::from("mixins/a.scss")]);
        assert!(sources.unmatched.is_empty());
    }

    #[test]
    fn test_later_include_re_adds_excluded_file() {
        let dir = project(&[("mixins/a.scss", ""), ("mixins/_zsass-mixins.scss", "")]);
        let options = ConcatOptions {
            src: vec![
                "mixins/*.scss".to_string(),
                "!mixins/_*.scss".to_string(),
                "./mixins/_zsass-mixins.scss".to_string(),
            ],
            dest: PathBuf::from("mixins.scss"),
        };

        let sources = collect_sources(dir.path(), &options).unwrap();
        assert_eq!(
            sources.files,
            vec![
                PathBuf::from("mixins/a.scss"),
                PathBuf::from("mixins/_zsass-mixins.scss"),
            ]
        );
    }

    #[test]
    fn test_duplicate_matches_are_listed_once() {
        let dir = project(&[("mixins/a.scss", ""), ("mixins/b.scss", "")]);
        let options = ConcatOptions {
            src: vec!["mixins/b.scss".to_string(), "mixins/*.scss".to_string()],
            dest: PathBuf::from("mixins.scss"),
        };

        let sources = collect_sources(dir.path(), &options).unwrap();
        assert_eq!(
            sources.files,
            vec![PathBuf::from("mixins/b.scss"), PathBuf::from("mixins/a.scss")]
        );
    }

    #[test]
    fn test_unmatched_includes_reported_once_each() {
        let dir = project(&[("mixins/a.scss", "// a\n")]);
        let options = ConcatOptions {
            src: vec![
                "mixins/*.scss".to_string(),
                "vendor/*.scss".to_string(),
                "!mixins/*.css".to_string(),
                "extra/*.scss".to_string(),
            ],
            dest: PathBuf::from("mixins.scss"),
        };

        let sources = collect_sources(dir.path(), &options).unwrap();

        assert_eq!(sources.files, vec![PathBuf::from("mixins/a.scss")]);
        assert_eq!(sources.unmatched, vec!["vendor/*.scss", "extra/*.scss"]);
    }

    #[test]
    fn test_one_warning_per_unmatched_include() {
        let dir = project(&[("mixins/a.scss", "// a\n")]);
        let mut config = BuildConfig::new(dir.path(), PackageInfo::new("zsass-mixins", "1.0.0"));
        config.concat.src.push("vendor/*.scss".to_string());

        let (_, events) = run_concat(&dir, &config);

        let warnings: Vec<_> = events.iter().filter(|e| e.starts_with("warn:")).collect();
        assert_eq!(warnings, vec!["warn:No files matched pattern: vendor/*.scss"]);
    }

    #[test]
    fn test_concatenate_skips_empty_parts() {
        assert_eq!(concatenate("/*! b */\n", ["", "x", ""]), "/*! b */\nx\n");
    }
}
