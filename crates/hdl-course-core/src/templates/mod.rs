//! Template system for the generated course tree.
//!
//! Two layers:
//! - [`text`]: pure [`text::dedent`] and [`text::interpolate`] over `{name}` placeholders.
//!   Makefiles, READMEs, and the per-segment slide blocks are rendered with these.
//! - [`renderer`]: strict Handlebars for document shells that need loops.
//!
//! Template files live in `templates/` at the workspace root and are embedded into the
//! binary at compile time by [`embedded`].
//!
//! **Warning**: Template files in `templates/` and constants in [`embedded`] must stay in sync.
//! The `include_str!` paths are relative to this file and checked at compile-time.

pub mod embedded;
pub mod renderer;
pub mod text;
