/*
 * pipeline_integration.rs
 * Copyright (c) 2025 zsass-mixins contributors
 *
 * Integration tests for full build runs.
 */

//! Runs the real task sequences against a temporary project.

use std::cell::RefCell;
use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use tempfile::TempDir;
use zsass_build::{
    BuildConfig, BuildError, EventLevel, NoopObserver, RunObserver, Runner, TaskKind,
};

/// Collects events in order.
#[derive(Default)]
struct Recorder {
    events: RefCell<Vec<String>>,
}

impl Recorder {
    fn events(&self) -> Vec<String> {
        self.events.borrow().clone()
    }
}

impl RunObserver for Recorder {
    fn on_task_start(&self, task: &str, _index: usize, _total: usize) {
        self.events.borrow_mut().push(format!("start:{}", task));
    }

    fn on_task_complete(&self, task: &str, _index: usize, _total: usize) {
        self.events.borrow_mut().push(format!("complete:{}", task));
    }

    fn on_task_error(&self, task: &str, _index: usize, _error: &BuildError) {
        self.events.borrow_mut().push(format!("error:{}", task));
    }

    fn on_event(&self, message: &str, level: EventLevel) {
        if level == EventLevel::Info {
            self.events.borrow_mut().push(message.to_string());
        }
    }
}

fn write(root: &Path, path: &str, content: &str) {
    let path = root.join(path);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn create_project() -> TempDir {
    let temp = TempDir::new().expect("Failed to create temp directory");
    let root = temp.path();

    write(root, "package.json", r#"{"name": "zsass-mixins", "version": "2.0.1"}"#);
    write(
        root,
        "mixins/_a.scss",
        "/// Hide text visually.\n/// @group accessibility\n@mixin visually-hidden {\n  position: absolute;\n}\n",
    );
    write(
        root,
        "mixins/_b.scss",
        "/// Size shorthand.\n/// @param {Length} $w - Width\n/// @param {Length} $h [$w] - Height\n@mixin size($w, $h: $w) {\n  width: $w;\n  height: $h;\n}\n",
    );
    write(
        root,
        "mixins/_zsass-mixins.scss",
        "@import \"a\";\n@import \"b\";\n",
    );
    write(
        root,
        "test/scss/main.scss",
        "@import \"../../mixins\";\n.box {\n  @include size(10px);\n}\n",
    );
    temp
}

fn build_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
}

const BANNER: &str = "/*! zsass-mixins - v2.0.1 - 2025-06-01 */\n";

#[test]
fn test_default_sequence_builds_css_from_fresh_mixins() {
    let temp = create_project();
    let root = temp.path();
    let config = BuildConfig::load(root, None).unwrap();

    let report = Runner::new(&config, &NoopObserver)
        .with_build_date(build_date())
        .run("default")
        .unwrap();

    assert_eq!(report.task_names(), vec!["concat", "sass"]);

    let mixins = fs::read_to_string(root.join("mixins.scss")).unwrap();
    assert!(mixins.starts_with(BANNER));
    let a = mixins.find("@mixin visually-hidden").unwrap();
    let b = mixins.find("@mixin size").unwrap();
    assert!(a < b);
    assert!(!mixins.contains("@import"));

    let css = fs::read_to_string(root.join("test/css/main.css")).unwrap();
    assert!(css.starts_with(BANNER));
    assert!(css.contains("width: 10px;"));
    assert!(css.contains("height: 10px;"));
    assert!(css.ends_with("/*# sourceMappingURL=main.css.map */\n"));

    let map: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(root.join("test/css/main.css.map")).unwrap())
            .unwrap();
    assert_eq!(map["version"], 3);
    assert_eq!(map["file"], "main.css");
    assert_eq!(map["sources"][0], "../scss/main.scss");
}

#[test]
fn test_doc_sequence_brackets_generation_with_events() {
    let temp = create_project();
    let root = temp.path();
    let config = BuildConfig::load(root, None).unwrap();
    let recorder = Recorder::default();

    Runner::new(&config, &recorder)
        .with_build_date(build_date())
        .run("doc")
        .unwrap();

    let events = recorder.events();
    let start = events
        .iter()
        .position(|e| e == "sassdoc: compiling mixins.scss to doc")
        .unwrap();
    let done = events
        .iter()
        .position(|e| e == "sassdoc: mixins.scss compiled to doc")
        .unwrap();
    assert!(start < done);
    assert!(events.iter().position(|e| e == "complete:concat").unwrap() < start);

    let index = fs::read_to_string(root.join("doc/index.html")).unwrap();
    assert!(index.contains("mixin-visually-hidden"));
    assert!(index.contains("mixin-size"));
    assert!(index.contains("accessibility"));
    assert!(!root.join("test/css/main.css").exists());

    let data: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(root.join("doc/sassdoc.json")).unwrap()).unwrap();
    assert_eq!(data["package"]["version"], "2.0.1");
}

#[test]
fn test_rerun_produces_identical_outputs() {
    let temp = create_project();
    let root = temp.path();
    let config = BuildConfig::load(root, None).unwrap();
    let runner = Runner::new(&config, &NoopObserver).with_build_date(build_date());

    runner.run_targets(&["default", "doc"]).unwrap();
    let mixins = fs::read(root.join("mixins.scss")).unwrap();
    let css = fs::read(root.join("test/css/main.css")).unwrap();
    let index = fs::read(root.join("doc/index.html")).unwrap();

    runner.run_targets(&["default", "doc"]).unwrap();
    assert_eq!(mixins, fs::read(root.join("mixins.scss")).unwrap());
    assert_eq!(css, fs::read(root.join("test/css/main.css")).unwrap());
    assert_eq!(index, fs::read(root.join("doc/index.html")).unwrap());
}

#[test]
fn test_excluded_aggregate_never_reaches_output() {
    let temp = create_project();
    let root = temp.path();
    write(root, "mixins/_zsass-mixins.scss", "// AGGREGATE MARKER\n");
    let config = BuildConfig::load(root, None).unwrap();

    Runner::new(&config, &NoopObserver)
        .run("concat")
        .unwrap();

    let mixins = fs::read_to_string(root.join("mixins.scss")).unwrap();
    assert!(!mixins.contains("AGGREGATE MARKER"));
}

#[test]
fn test_sass_failure_stops_doc_generation() {
    let temp = create_project();
    let root = temp.path();
    write(root, "test/scss/main.scss", ".box {\n  @include missing-mixin;\n}\n");
    let config = BuildConfig::load(root, None).unwrap();
    let recorder = Recorder::default();

    let err = Runner::new(&config, &recorder)
        .run_targets(&["default", "doc"])
        .unwrap_err();

    assert_eq!(err.task(), Some("sass"));
    assert!(matches!(err.root_cause(), BuildError::Compilation { .. }));
    assert!(err.to_string().starts_with("Task 'sass' failed"));
    assert!(root.join("mixins.scss").is_file());
    assert!(!root.join("test/css/main.css").exists());
    assert!(!root.join("doc").exists());
    assert_eq!(
        recorder.events().last().map(String::as_str),
        Some("error:sass")
    );
    assert!(!recorder.events().iter().any(|e| e.starts_with("sassdoc:")));
}

#[test]
fn test_config_file_overrides_defaults() {
    let temp = create_project();
    let root = temp.path();
    write(
        root,
        "zsass.yml",
        "sass:\n  style: compressed\n  source_map: false\nsassdoc:\n  dest: site/doc\nsequences:\n  release: [concat, sass, sassdoc]\n",
    );
    let config = BuildConfig::load(root, None).unwrap();
    assert_eq!(
        config.resolve("release").unwrap(),
        vec![TaskKind::Concat, TaskKind::Sass, TaskKind::SassDoc]
    );

    Runner::new(&config, &NoopObserver)
        .with_build_date(build_date())
        .run("release")
        .unwrap();

    let css = fs::read_to_string(root.join("test/css/main.css")).unwrap();
    assert!(css.contains(".box{width:10px;height:10px}"));
    assert!(!css.contains("sourceMappingURL"));
    assert!(!root.join("test/css/main.css.map").exists());
    assert!(root.join("site/doc/index.html").is_file());
}

#[test]
fn test_invalid_config_file_is_rejected() {
    let temp = create_project();
    let root = temp.path();
    write(root, "zsass.yml", "concat:\n  sources: [\"*.scss\"]\n");

    let err = BuildConfig::load(root, None).unwrap_err();

    assert!(matches!(err, BuildError::Configuration(_)));
}
