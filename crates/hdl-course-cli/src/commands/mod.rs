//! CLI command implementations for hdl-course.
//!
//! Each module corresponds to a subcommand (`hdl-course <command>`).

pub mod check;
pub mod config;
pub mod doctor;
pub mod generate;

use std::path::Path;

use anyhow::Result;
use hdl_course_core::config::CourseConfig;

/// Load `--config` if given, otherwise the built-in defaults.
pub fn load_config(path: Option<&Path>) -> Result<CourseConfig> {
    match path {
        Some(path) => {
            tracing::info!("loading config from {}", path.display());
            Ok(CourseConfig::load(path)?)
        }
        None => Ok(CourseConfig::default()),
    }
}

/// Comma-separated phase names for display.
fn describe_phases(phases: &[hdl_course_core::driver::Phase]) -> String {
    if phases.is_empty() {
        return "all".to_string();
    }
    phases
        .iter()
        .map(|p| p.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
