//! Discovery of the FPGA tools the generated Makefiles call.
//!
//! The generator never runs these. `hdl-course doctor` uses this module to tell a
//! maintainer which `make` targets will work on the current machine.

use std::path::PathBuf;

/// An external command referenced by a lab Makefile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tool {
    pub name: &'static str,
    /// Makefile targets that invoke it.
    pub targets: &'static [&'static str],
    pub install_instructions: &'static str,
}

const OSS_CAD_SUITE: &str = "https://github.com/YosysHQ/oss-cad-suite-build";

/// Every command a lab Makefile may run, in pipeline order.
pub const TOOLS: &[Tool] = &[
    Tool {
        name: "yosys",
        targets: &["all", "show"],
        install_instructions: OSS_CAD_SUITE,
    },
    Tool {
        name: "nextpnr-ice40",
        targets: &["all"],
        install_instructions: OSS_CAD_SUITE,
    },
    Tool {
        name: "icepack",
        targets: &["all"],
        install_instructions: OSS_CAD_SUITE,
    },
    Tool {
        name: "iceprog",
        targets: &["prog"],
        install_instructions: OSS_CAD_SUITE,
    },
    Tool {
        name: "iverilog",
        targets: &["sim"],
        install_instructions: "https://steveicarus.github.io/iverilog/usage/installation.html",
    },
    Tool {
        name: "vvp",
        targets: &["sim"],
        install_instructions: "installed with iverilog",
    },
    Tool {
        name: "gtkwave",
        targets: &["wave"],
        install_instructions: "https://gtkwave.sourceforge.net/",
    },
];

/// Lookup result for one [`Tool`].
#[derive(Debug, Clone)]
pub struct ToolStatus {
    pub tool: Tool,
    /// Resolved executable, or `None` when not on `PATH`.
    pub path: Option<PathBuf>,
}

/// Resolve every entry of [`TOOLS`] on `PATH`.
pub fn survey() -> Vec<ToolStatus> {
    TOOLS
        .iter()
        .map(|tool| {
            let path = which::which(tool.name).ok();
            if path.is_none() {
                tracing::debug!(tool = tool.name, "not found on PATH");
            }
            ToolStatus { tool: *tool, path }
        })
        .collect()
}
