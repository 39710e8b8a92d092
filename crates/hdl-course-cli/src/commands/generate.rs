use std::path::Path;

use anyhow::Result;

use hdl_course_core::config::CourseConfig;
use hdl_course_core::driver::{GenerationDriver, Phase};
use hdl_course_core::writer::FileTreeWriter;

use crate::output;
use crate::progress::ProgressWriter;

/// Regenerate the requested phases under `out`.
///
/// The registry is validated and every artifact rendered before the first file is
/// written, so a content error leaves the existing tree untouched.
pub fn run(config: &CourseConfig, phases: &[Phase], out: &Path, verbose: bool) -> Result<()> {
    output::print_header("hdl-course generate");
    output::print_key_value("Output", &out.display().to_string());
    output::print_key_value("Phases", &super::describe_phases(phases));

    output::print_step(1, 2, "Loading curriculum...");
    let registry = hdl_course_content::registry()?;

    output::print_step(2, 2, "Rendering and writing artifacts...");
    let driver = GenerationDriver::new(&registry, config);
    let mut writer = ProgressWriter::new(FileTreeWriter::new(out), verbose);
    let result = driver.run(phases, &mut writer);
    writer.finish();
    let summary = result?;

    output::print_success(&format!("Wrote {} files", summary.files));
    for (kind, count) in &summary.by_kind {
        output::print_key_value(kind.as_str(), &count.to_string());
    }

    Ok(())
}
