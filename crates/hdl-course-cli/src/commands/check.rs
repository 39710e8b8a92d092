use std::path::Path;

use anyhow::Result;

use hdl_course_core::config::CourseConfig;
use hdl_course_core::driver::{GenerationDriver, Phase};
use hdl_course_core::writer::MemoryTree;

use crate::output;

/// Render the requested phases in memory and compare them with the tree under `out`.
///
/// Fails when any generated file is missing or differs byte-for-byte.
pub fn run(config: &CourseConfig, phases: &[Phase], out: &Path) -> Result<()> {
    output::print_header("hdl-course check");
    output::print_key_value("Tree", &out.display().to_string());
    output::print_key_value("Phases", &super::describe_phases(phases));

    let registry = hdl_course_content::registry()?;
    let mut tree = MemoryTree::new();
    GenerationDriver::new(&registry, config).run(phases, &mut tree)?;

    let drift = tree.drift(out)?;
    for path in &drift.missing {
        output::print_drift("missing", path);
    }
    for path in &drift.stale {
        output::print_drift("stale", path);
    }

    if !drift.is_clean() {
        output::print_error(&format!(
            "{} missing, {} stale, {} up to date",
            drift.missing.len(),
            drift.stale.len(),
            drift.unchanged
        ));
        anyhow::bail!("course tree is out of date; run `hdl-course generate`");
    }

    output::print_success(&format!("{} files up to date", drift.unchanged));
    Ok(())
}
