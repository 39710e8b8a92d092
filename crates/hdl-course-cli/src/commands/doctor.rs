use anyhow::Result;

use hdl_course_core::toolchain;

use crate::output;

/// Report which Makefile tools are on `PATH`. Nothing is executed.
pub fn run() -> Result<()> {
    output::print_header("hdl-course doctor");

    let statuses = toolchain::survey();
    let mut missing = 0;
    for status in &statuses {
        match &status.path {
            Some(path) => output::print_success(&format!(
                "{} ({})",
                status.tool.name,
                path.display()
            )),
            None => {
                missing += 1;
                output::print_error(&format!(
                    "Missing tool: {} — {}",
                    status.tool.name, status.tool.install_instructions
                ));
                output::print_key_value("needed by", &status.tool.targets.join(", "));
            }
        }
    }

    if missing > 0 {
        output::print_warning(&format!(
            "{missing} of {} tools missing; generation still works, some make targets will not",
            statuses.len()
        ));
    } else {
        output::print_success("All lab toolchain commands found");
    }
    Ok(())
}
