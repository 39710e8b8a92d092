//! Unified error types for the hdl-course generator.

use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur while validating, rendering, or writing the course tree.
#[derive(Error, Debug)]
pub enum CourseError {
    // --- Configuration ---

    /// The configuration file passed with `--config` was not found.
    #[error("config file not found at {path}")]
    ConfigNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file exists but contains invalid JSON.
    #[error("failed to parse config at {path}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    // --- Registry data ---

    /// An embedded content file could not be decoded into registry records.
    #[error("failed to parse content file {name}")]
    ContentParse {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    /// No curriculum unit is registered for the requested day.
    #[error("no curriculum unit for day {day}")]
    NotFound { day: u32 },

    /// Two records share a key that must be unique (day, file name, module name, ...).
    #[error("duplicate key: {key}")]
    DuplicateKey { key: String },

    /// A lab unit lacks something every lab must declare.
    #[error("day {day} is a lab but has no {missing}")]
    IncompleteUnit { day: u32, missing: &'static str },

    /// A starter file or shared module name is not a single plain file name.
    #[error("{kind} name {name:?} must be a single file name")]
    InvalidName { kind: &'static str, name: String },

    /// A lecture sits in the file for a different week than its unit.
    #[error("lecture for day {day} is listed under week {found} but the unit is in week {expected}")]
    MisplacedLecture { day: u32, found: u32, expected: u32 },

    /// Two artifacts in the same run resolved to the same output path.
    #[error("output path produced twice in one run: {0}")]
    DuplicatePath(PathBuf),

    // --- Templates ---

    /// A `{name}` placeholder has no matching parameter.
    #[error("template placeholder {{{name}}} has no value")]
    MissingParameter { name: String },

    /// The non-blank lines of a block do not share one whitespace prefix (tabs mixed with spaces).
    #[error("cannot dedent: line {line} mixes tabs and spaces in its indentation")]
    UnsupportedIndentation { line: usize },

    /// Handlebars failed to render a document shell for a reason other than a missing variable.
    #[error("template rendering failed: {0}")]
    TemplateRender(String),

    // --- Slides ---

    /// A segment record names a kind other than title, content, bridge, takeaway, or end.
    #[error("unknown segment kind: {0} (supported: title, content, bridge, takeaway, end)")]
    UnknownSegmentKind(String),

    /// A segment record is missing data its kind requires.
    #[error("invalid {kind} segment: {reason}")]
    InvalidSegment { kind: String, reason: String },

    /// A deck has no takeaway segment.
    #[error("deck {deck} has no takeaway segment")]
    MissingTakeaway { deck: String },

    /// A deck violates the title -> content -> takeaway -> bridge/end ordering.
    #[error("deck {deck} is malformed: {reason}")]
    DeckStructure { deck: String, reason: String },

    /// A bridge segment disagrees with the deck that follows it.
    #[error("continuity broken from {from} to {to}: {reason}")]
    Continuity {
        from: String,
        to: String,
        reason: String,
    },

    // --- Output ---

    /// Writing an artifact (or creating its parent directory) failed.
    #[error("failed to write {path}")]
    IoWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // --- General ---

    /// A filesystem I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A catch-all for errors from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Coarse grouping of [`CourseError`] variants. The CLI prefixes its final error
/// line with [`as_str`](Self::as_str) and picks its exit status from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Config,
    Data,
    Template,
    Io,
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Config => "config",
            Self::Data => "data",
            Self::Template => "template",
            Self::Io => "io",
        }
    }
}

impl CourseError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ConfigNotFound { .. } | Self::ConfigParse { .. } => ErrorCategory::Config,
            Self::ContentParse { .. }
            | Self::NotFound { .. }
            | Self::DuplicateKey { .. }
            | Self::IncompleteUnit { .. }
            | Self::InvalidName { .. }
            | Self::MisplacedLecture { .. }
            | Self::DuplicatePath(_) => ErrorCategory::Data,
            Self::MissingParameter { .. }
            | Self::UnsupportedIndentation { .. }
            | Self::TemplateRender(_)
            | Self::UnknownSegmentKind(_)
            | Self::InvalidSegment { .. }
            | Self::MissingTakeaway { .. }
            | Self::DeckStructure { .. }
            | Self::Continuity { .. } => ErrorCategory::Template,
            Self::IoWrite { .. } | Self::Io(_) | Self::Other(_) => ErrorCategory::Io,
        }
    }
}

/// Alias for `Result<T, CourseError>`.
pub type Result<T> = std::result::Result<T, CourseError>;
