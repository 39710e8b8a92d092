use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CourseError, Result};

/// The five structural roles a segment can play in a deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    Title,
    Content,
    Bridge,
    Takeaway,
    End,
}

impl SegmentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Content => "content",
            Self::Bridge => "bridge",
            Self::Takeaway => "takeaway",
            Self::End => "end",
        }
    }
}

impl FromStr for SegmentKind {
    type Err = CourseError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "title" => Ok(Self::Title),
            "content" => Ok(Self::Content),
            "bridge" => Ok(Self::Bridge),
            "takeaway" => Ok(Self::Takeaway),
            "end" => Ok(Self::End),
            other => Err(CourseError::UnknownSegmentKind(other.to_string())),
        }
    }
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Position and length of a deck, as announced by a bridge and by the deck's title slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeckLink {
    /// Video number within the day (1-based).
    pub index: u32,
    /// Expected length in minutes.
    pub duration: u32,
}

/// One slide of a deck.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub kind: SegmentKind,
    /// `<h2>` for content and takeaway slides; the next deck's title for a bridge.
    pub heading: Option<String>,
    /// Ordered HTML fragments. Content markup, takeaway points, or a bridge teaser.
    pub body: Vec<String>,
    pub speaker_notes: Option<String>,
    /// reveal.js `data-background-color` token.
    pub background: Option<String>,
    /// Reveal body items one at a time, in body order.
    pub fragment_reveal: bool,
    /// Bridge target. Required for bridges, rejected elsewhere.
    pub next: Option<DeckLink>,
}

impl Segment {
    /// A bare segment of the given kind with no content.
    pub fn new(kind: SegmentKind) -> Self {
        Self {
            kind,
            heading: None,
            body: Vec::new(),
            speaker_notes: None,
            background: None,
            fragment_reveal: false,
            next: None,
        }
    }

    pub fn content<I, S>(body: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            body: body.into_iter().map(Into::into).collect(),
            ..Self::new(SegmentKind::Content)
        }
    }

    pub fn takeaway<I, S>(points: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            body: points.into_iter().map(Into::into).collect(),
            ..Self::new(SegmentKind::Takeaway)
        }
    }

    pub fn bridge(next_title: &str, next: DeckLink, teaser: &str) -> Self {
        Self {
            heading: Some(next_title.to_string()),
            body: vec![teaser.to_string()],
            next: Some(next),
            ..Self::new(SegmentKind::Bridge)
        }
    }
}

/// Serialized form of a [`Segment`] as it appears in content files.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SegmentRecord {
    pub kind: String,
    #[serde(default)]
    pub heading: Option<String>,
    #[serde(default)]
    pub body: Vec<String>,
    #[serde(default)]
    pub speaker_notes: Option<String>,
    #[serde(default)]
    pub background: Option<String>,
    #[serde(default)]
    pub fragment_reveal: bool,
    #[serde(default)]
    pub next: Option<DeckLink>,
}

impl TryFrom<SegmentRecord> for Segment {
    type Error = CourseError;

    fn try_from(record: SegmentRecord) -> Result<Self> {
        let kind: SegmentKind = record.kind.parse()?;
        match (kind, record.next.is_some()) {
            (SegmentKind::Bridge, false) => {
                return Err(CourseError::InvalidSegment {
                    kind: kind.to_string(),
                    reason: "missing `next` target".into(),
                })
            }
            (SegmentKind::Bridge, true) => {}
            (_, true) => {
                return Err(CourseError::InvalidSegment {
                    kind: kind.to_string(),
                    reason: "only bridges may declare `next`".into(),
                })
            }
            (_, false) => {}
        }
        Ok(Self {
            kind,
            heading: record.heading,
            body: record.body,
            speaker_notes: record.speaker_notes,
            background: record.background,
            fragment_reveal: record.fragment_reveal,
            next: record.next,
        })
    }
}

/// One generated presentation: a single pre-class video.
#[derive(Debug, Clone, PartialEq)]
pub struct SlideDeck {
    /// File stem after the `seg{N}_` prefix, e.g. `synthesis_vs_simulation`.
    pub name: String,
    /// Document `<title>`.
    pub title: String,
    /// Large heading on the title slide.
    pub subtitle: String,
    /// Small caps label above the subtitle, e.g. `Day 1 · Welcome to Hardware Thinking`.
    pub day_label: String,
    pub index: u32,
    pub duration: u32,
    pub segments: Vec<Segment>,
}

impl SlideDeck {
    pub fn link(&self) -> DeckLink {
        DeckLink {
            index: self.index,
            duration: self.duration,
        }
    }

    /// Output file name, e.g. `seg2_synthesis_vs_simulation.html`.
    pub fn file_name(&self) -> String {
        format!("seg{}_{}.html", self.index, self.name)
    }

    /// The bridge segment, if the deck ends by pointing at another one.
    pub fn bridge(&self) -> Option<&Segment> {
        self.segments.iter().find(|s| s.kind == SegmentKind::Bridge)
    }
}

/// Serialized form of a [`SlideDeck`].
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeckRecord {
    pub name: String,
    pub title: String,
    pub subtitle: String,
    pub day_label: String,
    pub index: u32,
    pub duration: u32,
    pub segments: Vec<SegmentRecord>,
}

impl TryFrom<DeckRecord> for SlideDeck {
    type Error = CourseError;

    fn try_from(record: DeckRecord) -> Result<Self> {
        let segments = record
            .segments
            .into_iter()
            .map(Segment::try_from)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            name: record.name,
            title: record.title,
            subtitle: record.subtitle,
            day_label: record.day_label,
            index: record.index,
            duration: record.duration,
            segments,
        })
    }
}
