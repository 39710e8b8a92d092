//! Cross-deck checks for one lecture day.
//!
//! A bridge announces the next video by number and length. That announcement must
//! match the deck that actually follows it in the lecture.

use crate::error::{CourseError, Result};

use super::segment::SlideDeck;

/// Verify every bridge in `decks` points at the deck immediately after it.
///
/// Bridges are announcements, so the next deck's heading may differ from the
/// teaser title. Only the `(index, duration)` pair must agree.
pub fn check_continuity(decks: &[SlideDeck]) -> Result<()> {
    for (position, deck) in decks.iter().enumerate() {
        let Some(bridge) = deck.bridge() else {
            continue;
        };
        let Some(target) = bridge.next else {
            continue;
        };

        let Some(following) = decks.get(position + 1) else {
            return Err(CourseError::Continuity {
                from: deck.title.clone(),
                to: format!("video {}", target.index),
                reason: "bridge in the last deck of the lecture".into(),
            });
        };

        let actual = following.link();
        if actual != target {
            return Err(CourseError::Continuity {
                from: deck.title.clone(),
                to: following.title.clone(),
                reason: format!(
                    "bridge announces video {} (~{} min) but next deck is video {} (~{} min)",
                    target.index, target.duration, actual.index, actual.duration
                ),
            });
        }
        tracing::trace!(from = %deck.title, to = %following.title, "bridge resolved");
    }
    Ok(())
}
