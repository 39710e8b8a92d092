//! Compile-time embedded templates for the generated tree.
//!
//! Each constant loads a template file from `templates/` via [`include_str!`]. The paths
//! are relative to this source file (`crates/hdl-course-core/src/templates/embedded.rs`).
//!
//! `.tmpl` files use `{name}` placeholders and go through [`super::text::render`];
//! `.hbs` files are Handlebars shells for [`super::renderer::TemplateRenderer`].
//!
//! ## Warning
//!
//! Do NOT rename or move template files without updating the `include_str!` path here.
//! Do NOT add a placeholder to a template without passing it from the driver; rendering
//! fails on any unresolved name.

// -------------------------------------------------------
// Lab scaffolding
// -------------------------------------------------------

/// Per-lab Makefile. Placeholders: `day`, `banner`, `project`, `top`, `pcf`,
/// `device`, `package`.
pub const LAB_MAKEFILE: &str = include_str!("../../../../templates/lab/Makefile.tmpl");

/// Lab README. Placeholders: `day`, `day_padded`, `week`, `topic`, `file_rows`.
pub const LAB_README: &str = include_str!("../../../../templates/lab/README.md.tmpl");

/// README stub for session days without starter code.
pub const SESSION_README: &str = include_str!("../../../../templates/lab/SESSION.md.tmpl");

// -------------------------------------------------------
// Shared library
// -------------------------------------------------------

/// Shared-library README. Placeholder: `module_rows`.
pub const SHARED_README: &str = include_str!("../../../../templates/shared/README.md.tmpl");

// -------------------------------------------------------
// Slides
// -------------------------------------------------------

/// reveal.js document wrapped around every deck.
pub const DECK_SHELL: &str = include_str!("../../../../templates/slides/deck.html.hbs");

// -------------------------------------------------------
// Repository files
// -------------------------------------------------------

pub const GITIGNORE: &str = include_str!("../../../../templates/repo/gitignore.tmpl");
