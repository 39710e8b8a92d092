//! Curriculum payload for the Accelerated HDL course.
//!
//! All records are embedded from `content/` at the workspace root. [`registry`] decodes
//! them into a [`ContentRegistry`]; the generator never reads content from disk at run
//! time, so a given binary always produces the same tree.

use hdl_course_core::error::Result;
use hdl_course_core::registry::{ContentRegistry, ContentSources};

// -------------------------------------------------------
// Records
// -------------------------------------------------------

const UNITS: &str = include_str!("../../../content/units.json");
const SHARED: &str = include_str!("../../../content/shared.json");
const PROJECTS: &str = include_str!("../../../content/projects.md");

const LECTURES: &[(&str, &str)] = &[
    ("lectures/week1.json", include_str!("../../../content/lectures/week1.json")),
    ("lectures/week2.json", include_str!("../../../content/lectures/week2.json")),
    ("lectures/week3.json", include_str!("../../../content/lectures/week3.json")),
    ("lectures/week4.json", include_str!("../../../content/lectures/week4.json")),
];

// -------------------------------------------------------
// Lesson plans
// -------------------------------------------------------

const LESSON_PLANS: &[(u32, &str)] = &[
    (2, include_str!("../../../content/docs/day02_combinational_building_blocks.md")),
    (3, include_str!("../../../content/docs/day03_procedural_combinational_logic.md")),
    (4, include_str!("../../../content/docs/day04_sequential_logic_fundamentals.md")),
    (5, include_str!("../../../content/docs/day05_counters_shift_registers_debouncing.md")),
    (7, include_str!("../../../content/docs/day07_finite_state_machines.md")),
    (9, include_str!("../../../content/docs/day09_memory_ram_rom_block_ram.md")),
    (10, include_str!("../../../content/docs/day10_timing_clocking_constraints.md")),
    (11, include_str!("../../../content/docs/day11_uart_transmitter.md")),
    (12, include_str!("../../../content/docs/day12_uart_rx_spi_ip_integration.md")),
    (15, include_str!("../../../content/docs/day15_final_project_build_day.md")),
];

/// Decode the embedded curriculum. Call [`ContentRegistry::validate`] before generating.
pub fn registry() -> Result<ContentRegistry> {
    let registry = ContentRegistry::from_sources(&ContentSources {
        units: UNITS,
        shared: SHARED,
        lectures: LECTURES,
        projects: PROJECTS,
        lesson_plans: LESSON_PLANS,
    })?;
    tracing::debug!(days = registry.units.len(), "embedded curriculum loaded");
    Ok(registry)
}
