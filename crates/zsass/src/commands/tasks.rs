//! Tasks command implementation

use anyhow::Result;
use zsass_build::{BuildConfig, TaskKind};

use super::ProjectArgs;

pub fn execute(project: &ProjectArgs) -> Result<()> {
    let config = project.load_config()?;
    print!("{}", describe(&config));
    Ok(())
}

/// Human-readable listing of sequences and tasks.
fn describe(config: &BuildConfig) -> String {
    let mut out = String::from("Sequences:\n");
    for (name, tasks) in &config.sequences {
        let tasks: Vec<&str> = tasks.iter().map(TaskKind::as_str).collect();
        out.push_str(&format!("  {}: {}\n", name, tasks.join(", ")));
    }
    out.push_str("Tasks:\n");
    for kind in TaskKind::ALL {
        out.push_str(&format!("  {}\n", kind));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use zsass_build::PackageInfo;

    #[test]
    fn test_describe_lists_default_sequences() {
        let config = BuildConfig::new("/project", PackageInfo::new("zsass-mixins", "1.0.0"));
        let text = describe(&config);

        assert!(text.contains("  default: concat, sass\n"));
        assert!(text.contains("  doc: concat, sassdoc\n"));
        assert!(text.contains("  sassdoc\n"));
    }
}
