//! The `sass` task: compile stylesheets to CSS with grass.
//!
//! Copyright (c) 2025 zsass-mixins contributors

use std::io;
use std::path::{Path, PathBuf};

use super::{Task, TaskContext, read_source, write_output};
use crate::banner::Banner;
use crate::config::SassOptions;
use crate::error::{BuildError, Result};
use crate::observer::EventLevel;
use crate::sourcemap::{SourceMap, map_file_name};

/// Compiles every `dest <- src` pair of the sass options, in order.
#[derive(Debug, Clone, Copy, Default)]
pub struct SassTask;

impl Task for SassTask {
    fn name(&self) -> &str {
        "sass"
    }

    fn run(&self, ctx: &TaskContext<'_>) -> Result<Vec<PathBuf>> {
        let options = &ctx.config.sass;
        let mut written = Vec::new();

        for (dest, src) in &options.files {
            let src_path = ctx.config.path(src);
            let dest_path = ctx.config.path(dest);

            ctx.observer.on_event(
                &format!("Compiling {} to {}", src.display(), dest.display()),
                EventLevel::Debug,
            );

            let load_paths: Vec<PathBuf> = options
                .load_paths
                .iter()
                .map(|p| ctx.config.path(p))
                .collect();
            let css = compile_file(&src_path, options, &load_paths)?;

            let map_name = options.source_map.then(|| map_file_name(dest));
            let output = render_css(ctx.banner, &css, options.unix_newlines, map_name.as_deref());
            write_output(&dest_path, output)?;
            written.push(dest_path.clone());

            if let Some(map_name) = map_name {
                let source_content = read_source(&src_path)?;
                let map = SourceMap::new(dest, src, &source_content);
                let map_path = dest_path.with_file_name(map_name);
                write_output(&map_path, map.to_json()?)?;
                written.push(map_path);
            }

            ctx.observer.on_event(
                &format!("File {} created.", dest.display()),
                EventLevel::Info,
            );
        }

        Ok(written)
    }
}

/// Compile one stylesheet from disk.
///
/// The stylesheet's own directory is searched first for imports, then
/// `load_paths`. A missing source is an I/O error; anything grass rejects
/// is a compilation error.
pub fn compile_file(path: &Path, options: &SassOptions, load_paths: &[PathBuf]) -> Result<String> {
    if !path.is_file() {
        return Err(BuildError::io(
            path,
            io::Error::new(io::ErrorKind::NotFound, "source stylesheet not found"),
        ));
    }

    let mut search_paths = Vec::with_capacity(load_paths.len() + 1);
    if let Some(parent) = path.parent() {
        search_paths.push(parent.to_path_buf());
    }
    search_paths.extend(load_paths.iter().cloned());

    let grass_options = grass::Options::default()
        .load_paths(&search_paths)
        .style(options.style.to_grass());

    grass::from_path(path, &grass_options).map_err(|e| BuildError::Compilation {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Assemble the final CSS text: banner, compiled CSS and, when a map is
/// written, the `sourceMappingURL` comment.
pub fn render_css(banner: &Banner, css: &str, unix_newlines: bool, map_name: Option<&str>) -> String {
    let mut output = String::with_capacity(banner.as_str().len() + css.len() + 64);
    output.push_str(banner.as_str());
    output.push_str(css);
    if !output.ends_with('\n') {
        output.push('\n');
    }
    if let Some(map_name) = map_name {
        output.push_str(&format!("\n/*# sourceMappingURL={} */\n", map_name));
    }

    if unix_newlines {
        output.replace("\r\n", "\n")
    } else {
        output
    }
}
