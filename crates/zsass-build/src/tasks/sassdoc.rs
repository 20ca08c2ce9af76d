//! The `sassdoc` task: generate the documentation directory.
//!
//! Copyright (c) 2025 zsass-mixins contributors

use std::path::PathBuf;

use super::{Task, TaskContext, read_source};
use crate::error::Result;
use crate::observer::EventLevel;
use crate::sassdoc::Documentation;

#[derive(Debug, Clone, Copy, Default)]
pub struct SassDocTask;

impl Task for SassDocTask {
    fn name(&self) -> &str {
        "sassdoc"
    }

    fn run(&self, ctx: &TaskContext<'_>) -> Result<Vec<PathBuf>> {
        let options = &ctx.config.sassdoc;
        ctx.config.check_doc_dest()?;
        let src = options.src.display();
        let dest = options.dest.display();

        ctx.observer.on_event(
            &format!("{}: compiling {} to {}", self.name(), src, dest),
            EventLevel::Info,
        );

        let content = read_source(&ctx.config.path(&options.src))?;
        let doc = Documentation::new(
            ctx.config.package.clone(),
            &options.src,
            options.base_path.clone(),
            &content,
        );
        let written = doc.generate(&ctx.config.path(&options.dest))?;

        ctx.observer.on_event(
            &format!("{}: {} compiled to {}", self.name(), src, dest),
            EventLevel::Info,
        );
        Ok(written)
    }
}
