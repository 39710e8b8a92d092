//! Slide decks: typed segments, composition to reveal.js HTML, and bridge checks.

pub mod composer;
pub mod continuity;
pub mod segment;

pub use composer::{validate_deck, DeckContext, SlideComposer};
pub use continuity::check_continuity;
pub use segment::{DeckLink, DeckRecord, Segment, SegmentKind, SegmentRecord, SlideDeck};
