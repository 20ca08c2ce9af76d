//! Build command implementation.
//!
//! Runs one or more targets (sequence or task names) against the project
//! configuration, stopping at the first failing task.

use anyhow::Result;
use tracing::{debug, info};
use zsass_build::{Runner, TracingObserver};

use super::ProjectArgs;

/// Execute the given targets in order.
pub fn execute<S: AsRef<str>>(project: &ProjectArgs, targets: &[S]) -> Result<()> {
    let config = project.load_config()?;
    debug!(root = %config.root.display(), "Loaded build configuration");

    let runner = Runner::new(&config, &TracingObserver);
    match runner.run_targets(targets) {
        Ok(report) => {
            for output in report.outputs() {
                debug!(output = %output.display(), "Wrote file");
            }
            info!(
                "Finished {} task(s): {}",
                report.tasks.len(),
                report.task_names().join(", ")
            );
            Ok(())
        }
        // The error's Display already carries its cause.
        Err(err) => anyhow::bail!("{}", err),
    }
}
