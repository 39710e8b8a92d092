//! Deck composition: ordered segments in, one self-contained reveal.js document out.
//!
//! Every deck follows the same shape:
//!
//! ```text
//! title -> content* -> takeaway -> content* -> (bridge | end)
//! ```
//!
//! [`validate_deck`] enforces that shape; [`SlideComposer::compose`] then formats each
//! segment with a kind-specific block template and wraps the result in the
//! [`embedded::DECK_SHELL`] document. Each document carries its own stylesheet and
//! script references so a deck can be opened on its own.

use serde_json::json;

use crate::config::CourseConfig;
use crate::error::{CourseError, Result};
use crate::templates::embedded;
use crate::templates::renderer::TemplateRenderer;
use crate::templates::text::{self, Params};

use super::segment::{Segment, SegmentKind, SlideDeck};

const DEFAULT_BACKGROUND: &str = "#000000";

const TITLE_BLOCK: &str = r#"
    <!-- TITLE SLIDE -->
    <section class="title-slide" data-background-color="{background}">
        <div style="margin-bottom:1em;">
            <span style="color:#FFC904;font-weight:700;font-size:0.6em;letter-spacing:0.15em;text-transform:uppercase;">
                {day_label}
            </span>
        </div>
        <h1 style="color:#FFC904;border-bottom:none;font-size:2.2em;">{subtitle}</h1>
        <p class="subtitle" style="color:#E8E8E4;">Video {index} of {video_count} · ~{duration} minutes</p>
        <p class="course-info" style="color:#888;">{institution}</p>
    </section>
"#;

const SECTION: &str = "<section{attrs}>\n{inner}{notes}\n</section>\n";

const FRAGMENT: &str = r#"    <div class="fragment" data-fragment-index="{position}">
{item}
    </div>"#;

const TAKEAWAY: &str = r#"    <h2>{heading}</h2>
    <div style="margin-top:0.5em;">
{items}    </div>"#;

const TAKEAWAY_ITEM: &str = r#"        <p class="fragment" data-fragment-index="{position}" data-takeaway="{number}" style="font-size:0.85em;">
            <span style="color:#FFC904;font-size:1.3em;font-weight:700;">{marker}</span>&ensp;{point}
        </p>
"#;

const BRIDGE: &str = r#"    <div style="text-align:center;">
        <p style="color:#FFC904;font-size:0.7em;font-weight:600;letter-spacing:0.1em;text-transform:uppercase;">Up Next</p>
        <h2 style="color:#FFFFFF;font-size:1.8em;">{next_title}</h2>
        <p style="color:#E8E8E4;font-size:0.8em;margin-top:0.5em;">Video {next_index} of {video_count} · ~{next_duration} minutes</p>
        <p style="color:#888;font-size:0.6em;margin-top:2em;">{teaser}</p>
    </div>"#;

const END: &str = r#"    <div style="text-align:center;">
        <p style="color:#FFC904;font-size:0.7em;font-weight:600;letter-spacing:0.1em;text-transform:uppercase;">Pre-Class Videos Complete</p>
        <h2 style="color:#FFFFFF;font-size:1.6em;">See You in Class!</h2>
        <p style="color:#E8E8E4;font-size:0.8em;margin-top:0.5em;">Day {day} · Hands-On Lab</p>
        <p style="color:#888;font-size:0.6em;margin-top:2em;">Make sure your toolchain is working and your Go Board is connected.</p>
    </div>"#;

/// Where a deck sits: its lecture day and how many videos that day has.
#[derive(Debug, Clone, Copy)]
pub struct DeckContext<'a> {
    pub day: u32,
    pub video_count: u32,
    pub config: &'a CourseConfig,
}

/// Check the title -> ... -> takeaway -> ... -> bridge/end shape of a deck.
pub fn validate_deck(deck: &SlideDeck) -> Result<()> {
    let structure = |reason: String| CourseError::DeckStructure {
        deck: deck.title.clone(),
        reason,
    };

    match deck.segments.first() {
        Some(first) if first.kind == SegmentKind::Title => {}
        Some(first) => {
            return Err(structure(format!(
                "first segment is {}, expected title",
                first.kind
            )))
        }
        None => return Err(structure("deck has no segments".into())),
    }

    let last = deck.segments.len() - 1;
    let mut takeaways = 0;
    for (position, segment) in deck.segments.iter().enumerate() {
        match segment.kind {
            SegmentKind::Title if position > 0 => {
                return Err(structure(format!("title segment at position {position}")));
            }
            SegmentKind::Title
                if segment.heading.is_some()
                    || !segment.body.is_empty()
                    || segment.speaker_notes.is_some() =>
            {
                return Err(structure(
                    "title segment is built from deck metadata and takes no heading, body, or notes"
                        .into(),
                ));
            }
            SegmentKind::Takeaway => {
                if segment.body.is_empty() {
                    return Err(structure("takeaway has no items".into()));
                }
                takeaways += 1;
            }
            SegmentKind::Bridge | SegmentKind::End if position < last => {
                return Err(structure(format!(
                    "{} segment at position {position} is followed by more segments",
                    segment.kind
                )));
            }
            _ => {}
        }
    }

    match takeaways {
        0 => {
            return Err(CourseError::MissingTakeaway {
                deck: deck.title.clone(),
            })
        }
        1 => {}
        n => return Err(structure(format!("{n} takeaway segments, expected one"))),
    }

    let tail = deck.segments[last].kind;
    if !matches!(tail, SegmentKind::End | SegmentKind::Bridge) {
        return Err(structure(format!(
            "last segment is {tail}, expected end or bridge"
        )));
    }

    Ok(())
}

/// Serializes decks into HTML documents.
pub struct SlideComposer {
    renderer: TemplateRenderer,
}

impl SlideComposer {
    pub fn new() -> Self {
        Self {
            renderer: TemplateRenderer::new(),
        }
    }

    /// Validate `deck` and render it as a complete reveal.js document.
    pub fn compose(&self, deck: &SlideDeck, ctx: &DeckContext<'_>) -> Result<String> {
        validate_deck(deck)?;

        let mut slides = String::new();
        for segment in &deck.segments {
            let block = match segment.kind {
                SegmentKind::Title => format_title(deck, segment, ctx)?,
                SegmentKind::Content => format_content(segment)?,
                SegmentKind::Bridge => format_bridge(segment, ctx)?,
                SegmentKind::Takeaway => format_takeaway(segment)?,
                SegmentKind::End => format_end(segment, ctx)?,
            };
            slides.push_str(&block);
        }

        let data = json!({
            "title": deck.title,
            "course_title": ctx.config.course_title,
            "stylesheets": ctx.config.slides.stylesheets(),
            "scripts": ctx.config.slides.scripts(),
            "slides": slides,
        });
        self.renderer.render(embedded::DECK_SHELL, &data)
    }
}

impl Default for SlideComposer {
    fn default() -> Self {
        Self::new()
    }
}

fn format_title(deck: &SlideDeck, segment: &Segment, ctx: &DeckContext<'_>) -> Result<String> {
    let params = Params::from([
        ("background", background_or_default(segment)),
        ("day_label", deck.day_label.clone()),
        ("subtitle", deck.subtitle.clone()),
        ("index", deck.index.to_string()),
        ("video_count", ctx.video_count.to_string()),
        ("duration", deck.duration.to_string()),
        ("institution", ctx.config.institution.clone()),
    ]);
    // Blank line separates the title slide from the first section.
    Ok(text::render(TITLE_BLOCK, &params)? + "\n")
}

fn format_content(segment: &Segment) -> Result<String> {
    let mut parts = Vec::with_capacity(segment.body.len() + 1);
    if let Some(heading) = &segment.heading {
        parts.push(format!("    <h2>{heading}</h2>"));
    }
    for (position, item) in segment.body.iter().enumerate() {
        if segment.fragment_reveal {
            let params = Params::from([
                ("position", position.to_string()),
                ("item", item.clone()),
            ]);
            parts.push(text::interpolate(FRAGMENT, &params)?);
        } else {
            parts.push(item.clone());
        }
    }
    section(segment, segment.background.as_deref(), parts.join("\n"))
}

fn format_takeaway(segment: &Segment) -> Result<String> {
    let mut items = String::new();
    for (position, point) in segment.body.iter().enumerate() {
        let number = position + 1;
        let params = Params::from([
            ("position", position.to_string()),
            ("number", number.to_string()),
            ("marker", marker(number)),
            ("point", point.clone()),
        ]);
        items.push_str(&text::interpolate(TAKEAWAY_ITEM, &params)?);
    }
    let params = Params::from([
        (
            "heading",
            segment
                .heading
                .clone()
                .unwrap_or_else(|| "Key Takeaways".into()),
        ),
        ("items", items),
    ]);
    let inner = text::interpolate(TAKEAWAY, &params)?;
    section(segment, segment.background.as_deref(), inner)
}

fn format_bridge(segment: &Segment, ctx: &DeckContext<'_>) -> Result<String> {
    let next = segment.next.ok_or_else(|| CourseError::InvalidSegment {
        kind: segment.kind.to_string(),
        reason: "missing `next` target".into(),
    })?;
    let params = Params::from([
        ("next_title", segment.heading.clone().unwrap_or_default()),
        ("next_index", next.index.to_string()),
        ("next_duration", next.duration.to_string()),
        ("video_count", ctx.video_count.to_string()),
        ("teaser", segment.body.join(" ")),
    ]);
    let inner = text::interpolate(BRIDGE, &params)?;
    section(segment, Some(background_or_default(segment).as_str()), inner)
}

fn format_end(segment: &Segment, ctx: &DeckContext<'_>) -> Result<String> {
    let params = Params::from([("day", ctx.day.to_string())]);
    let inner = text::interpolate(END, &params)?;
    section(segment, Some(background_or_default(segment).as_str()), inner)
}

/// Wrap slide markup in a `<section>` with optional background and speaker notes.
fn section(segment: &Segment, background: Option<&str>, inner: String) -> Result<String> {
    let attrs = background
        .map(|bg| format!(" data-background-color=\"{bg}\""))
        .unwrap_or_default();
    let notes = segment
        .speaker_notes
        .as_ref()
        .map(|n| format!("\n    <aside class=\"notes\">{n}</aside>"))
        .unwrap_or_default();
    let params = Params::from([("attrs", attrs), ("inner", inner), ("notes", notes)]);
    text::interpolate(SECTION, &params)
}

fn background_or_default(segment: &Segment) -> String {
    segment
        .background
        .clone()
        .unwrap_or_else(|| DEFAULT_BACKGROUND.into())
}

/// Circled numeral for 1..=20, `N.` beyond.
fn marker(number: usize) -> String {
    (1..=20)
        .contains(&number)
        .then(|| char::from_u32(0x2460 + number as u32 - 1))
        .flatten()
        .map(String::from)
        .unwrap_or_else(|| format!("{number}."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slides::segment::DeckLink;

    fn deck(segments: Vec<Segment>) -> SlideDeck {
        SlideDeck {
            name: "counter_variations".into(),
            title: "Day 5.1: Counter Variations".into(),
            subtitle: "Counter Variations".into(),
            day_label: "Day 5 · Counters, Shift Registers &amp; Debouncing".into(),
            index: 1,
            duration: 12,
            segments,
        }
    }

    fn compose(deck: &SlideDeck) -> Result<String> {
        let config = CourseConfig::default();
        let ctx = DeckContext {
            day: 5,
            video_count: 4,
            config: &config,
        };
        SlideComposer::new().compose(deck, &ctx)
    }

    fn minimal() -> Vec<Segment> {
        vec![
            Segment::new(SegmentKind::Title),
            Segment::content(["    <h2>Up/Down Counters</h2>"]),
            Segment::takeaway(["Counters are adders with feedback.", "Reset first.", "Parameterize widths."]),
            Segment::new(SegmentKind::End),
        ]
    }

    #[test]
    fn test_takeaway_renders_three_numbered_entries() {
        let html = compose(&deck(minimal())).unwrap();
        assert_eq!(html.matches("data-takeaway=\"").count(), 3);
        for (number, marker) in [(1, '①'), (2, '②'), (3, '③')] {
            assert!(html.contains(&format!("data-takeaway=\"{number}\"")));
            assert!(html.contains(marker));
        }
        assert!(!html.contains("data-takeaway=\"4\""));
        assert!(html.contains("<h2>Key Takeaways</h2>"));
    }

    #[test]
    fn test_title_slide_header() {
        let html = compose(&deck(minimal())).unwrap();
        assert!(html.contains("<title>Day 5.1: Counter Variations — Accelerated HDL for Digital System Design</title>"));
        assert!(html.contains("Day 5 · Counters, Shift Registers &amp; Debouncing"));
        assert!(html.contains("Video 1 of 4 · ~12 minutes"));
        assert!(html.contains("UCF · Department of ECE"));
        let title_at = html.find("<!-- TITLE SLIDE -->").unwrap();
        let content_at = html.find("Up/Down Counters").unwrap();
        assert!(title_at < content_at);
    }

    #[test]
    fn test_segments_render_in_declared_order() {
        let html = compose(&deck(minimal())).unwrap();
        let content = html.find("Up/Down Counters").unwrap();
        let takeaway = html.find("Key Takeaways").unwrap();
        let end = html.find("See You in Class!").unwrap();
        assert!(content < takeaway && takeaway < end);
        assert!(html.contains("Day 5 · Hands-On Lab"));
    }

    #[test]
    fn test_bridge_slide() {
        let mut segments = minimal();
        segments[3] = Segment::bridge(
            "Shift Registers",
            DeckLink {
                index: 2,
                duration: 12,
            },
            "Serial-to-parallel and back.",
        );
        let html = compose(&deck(segments)).unwrap();
        assert!(html.contains(">Up Next</p>"));
        assert!(html.contains("Shift Registers</h2>"));
        assert!(html.contains("Video 2 of 4 · ~12 minutes"));
        assert!(html.contains("Serial-to-parallel and back."));
    }

    #[test]
    fn test_fragment_indices_follow_body_position() {
        let mut segments = minimal();
        segments[1] = Segment {
            heading: Some("Three Steps".into()),
            fragment_reveal: true,
            ..Segment::content(["<p>one</p>", "<p>two</p>", "<p>three</p>"])
        };
        let html = compose(&deck(segments)).unwrap();
        let positions: Vec<usize> = ["one", "two", "three"]
            .iter()
            .map(|w| html.find(&format!("<p>{w}</p>")).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        for (i, word) in ["one", "two", "three"].iter().enumerate() {
            let expected = format!(
                "<div class=\"fragment\" data-fragment-index=\"{i}\">\n<p>{word}</p>\n    </div>"
            );
            assert!(html.contains(&expected), "missing fragment {i}");
        }
        assert!(html.contains("    <h2>Three Steps</h2>"));
    }

    #[test]
    fn test_compose_twice_is_identical() {
        let d = deck(minimal());
        assert_eq!(compose(&d).unwrap(), compose(&d).unwrap());
    }

    #[test]
    fn test_speaker_notes_and_background() {
        let mut segments = minimal();
        segments[1].speaker_notes = Some("Say this aloud.".into());
        segments[1].background = Some("#FAFAFA".into());
        let html = compose(&deck(segments)).unwrap();
        assert!(html.contains("<aside class=\"notes\">Say this aloud.</aside>"));
        assert!(html.contains("<section data-background-color=\"#FAFAFA\">"));
    }

    #[test]
    fn test_missing_takeaway() {
        let mut segments = minimal();
        segments.remove(2);
        let err = compose(&deck(segments)).unwrap_err();
        assert!(matches!(err, CourseError::MissingTakeaway { .. }));
    }

    #[test]
    fn test_two_takeaways_rejected() {
        let mut segments = minimal();
        segments.insert(2, Segment::takeaway(["again"]));
        let err = validate_deck(&deck(segments)).unwrap_err();
        assert!(matches!(err, CourseError::DeckStructure { .. }));
    }

    #[test]
    fn test_first_segment_must_be_title() {
        let mut segments = minimal();
        segments.remove(0);
        let err = validate_deck(&deck(segments)).unwrap_err();
        assert!(matches!(err, CourseError::DeckStructure { .. }));
    }

    #[test]
    fn test_last_segment_must_be_end_or_bridge() {
        let mut segments = minimal();
        segments.pop();
        let err = validate_deck(&deck(segments)).unwrap_err();
        match err {
            CourseError::DeckStructure { reason, .. } => assert!(reason.contains("takeaway")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_nothing_after_end() {
        let mut segments = minimal();
        segments.insert(3, Segment::new(SegmentKind::End));
        let err = validate_deck(&deck(segments)).unwrap_err();
        assert!(matches!(err, CourseError::DeckStructure { .. }));
    }

    #[test]
    fn test_title_segment_content_rejected() {
        let mut with_heading = minimal();
        with_heading[0].heading = Some("Ignored".into());
        let mut with_body = minimal();
        with_body[0].body = vec!["<p>lost</p>".into()];
        let mut with_notes = minimal();
        with_notes[0].speaker_notes = Some("never shown".into());
        for segments in [with_heading, with_body, with_notes] {
            let err = validate_deck(&deck(segments)).unwrap_err();
            assert!(matches!(err, CourseError::DeckStructure { .. }));
        }
    }

    #[test]
    fn test_empty_takeaway_rejected() {
        let mut segments = minimal();
        segments[2] = Segment::takeaway(Vec::<String>::new());
        let err = validate_deck(&deck(segments)).unwrap_err();
        assert!(matches!(err, CourseError::DeckStructure { .. }));
    }

    #[test]
    fn test_marker() {
        assert_eq!(marker(1), "①");
        assert_eq!(marker(20), "⑳");
        assert_eq!(marker(21), "21.");
    }

    #[test]
    fn test_stylesheets_inlined_per_document() {
        let html = compose(&deck(minimal())).unwrap();
        assert!(html.contains(
            "<link rel=\"stylesheet\" href=\"https://cdnjs.cloudflare.com/ajax/libs/reveal.js/4.6.1/reveal.min.css\">"
        ));
        assert!(html.contains("<script src=\"https://cdnjs.cloudflare.com/ajax/libs/reveal.js/4.6.1/plugin/notes/notes.min.js\"></script>"));
        assert!(html.contains("Reveal.initialize({"));
    }
}
