//! Core library for the hdl-course generator.
//!
//! Turns a [`registry::ContentRegistry`] of hand-authored curriculum records into the
//! course repository tree: lab starter code and Makefiles, the shared Verilog library,
//! reveal.js slide decks, quizzes, and lesson plans.
//!
//! The pipeline is [`driver::GenerationDriver`]. It renders text with [`templates`],
//! composes decks with [`slides`], and hands every file to a [`writer::TreeWriter`].
//! Nothing here knows the curriculum itself; that lives in the `hdl-course-content` crate.

pub mod config;
pub mod driver;
pub mod error;
pub mod registry;
pub mod slides;
pub mod templates;
pub mod toolchain;
pub mod writer;
