use std::path::Path;

use anyhow::Result;

use hdl_course_core::config::CourseConfig;

use crate::output;

/// Print the effective configuration as pretty JSON, or save it to `dest`.
pub fn run(config: &CourseConfig, dest: Option<&Path>) -> Result<()> {
    match dest {
        Some(path) => {
            config.save(path)?;
            output::print_success(&format!("Config written to {}", path.display()));
        }
        None => println!("{}", render(config)?),
    }
    Ok(())
}

fn render(config: &CourseConfig) -> Result<String> {
    Ok(serde_json::to_string_pretty(config)?)
}
