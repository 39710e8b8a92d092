//! Typed, validated access to the curriculum.
//!
//! The registry is built once from JSON records and markdown documents and is
//! read-only afterwards. Every generation phase pulls its inputs from here.
//!
//! ## Record layout
//!
//! ```text
//! units.json          { "units": [CurriculumUnit, ...] }
//! shared.json         { "modules": [SharedModule, ...] }
//! lectures/weekN.json { "week": N, "lectures": [Lecture, ...] }
//! projects.md         static project-options document
//! docs/dayDD_*.md     one lesson plan per day
//! ```

use std::collections::BTreeSet;
use std::path::{Component, Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{CourseError, Result};
use crate::slides::{DeckRecord, SlideDeck};

/// Whether a day ships a buildable lab or only a session guide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitKind {
    Lab,
    Session,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StarterFile {
    pub name: String,
    pub content: String,
}

/// One day of the course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CurriculumUnit {
    pub week: u32,
    pub day: u32,
    pub topic: String,
    pub kind: UnitKind,
    #[serde(default)]
    pub project_name: Option<String>,
    #[serde(default)]
    pub top_module: Option<String>,
    #[serde(default)]
    pub starter_files: Vec<StarterFile>,
}

impl CurriculumUnit {
    /// `labs/week{W}/day{DD}`
    pub fn lab_dir(&self) -> PathBuf {
        PathBuf::from(format!("labs/week{}/day{:02}", self.week, self.day))
    }

    /// `lectures/week{W}/day{DD}_{slug}`
    pub fn lecture_dir(&self) -> PathBuf {
        PathBuf::from(format!(
            "lectures/week{}/day{:02}_{}",
            self.week,
            self.day,
            topic_slug(&self.topic)
        ))
    }

    /// `docs/day{DD}_{slug}.md`
    pub fn lesson_plan_path(&self) -> PathBuf {
        PathBuf::from(format!("docs/day{:02}_{}.md", self.day, topic_slug(&self.topic)))
    }

    /// Verilog starter files, sorted by name.
    pub fn verilog_files(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .starter_files
            .iter()
            .map(|f| f.name.as_str())
            .filter(|name| name.ends_with(".v"))
            .collect();
        names.sort_unstable();
        names
    }
}

/// Lowercase `topic`, collapse every run of non-alphanumerics to one `_`, and trim.
///
/// `"Counters, Shift Registers & Debouncing"` becomes `counters_shift_registers_debouncing`.
pub fn topic_slug(topic: &str) -> String {
    let mut slug = String::with_capacity(topic.len());
    let mut pending_separator = false;
    for c in topic.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('_');
            }
            pending_separator = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_separator = true;
        }
    }
    slug
}

/// A reusable module in `shared/lib/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SharedModule {
    pub name: String,
    pub description: String,
    pub built_day: u32,
    pub tested_day: u32,
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QuizItem {
    pub question: String,
    pub answer: String,
}

/// Pre-class self-check questions for one day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quiz {
    pub items: Vec<QuizItem>,
}

impl Quiz {
    /// Markdown with each answer folded into a `<details>` block.
    pub fn to_markdown(&self, day: u32, topic: &str) -> String {
        let entries: Vec<String> = self
            .items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                format!(
                    "**Q{}:** {}\n\n<details><summary>Answer</summary>\n{}\n</details>",
                    i + 1,
                    item.question,
                    item.answer
                )
            })
            .collect();
        format!(
            "# Day {day}: Pre-Class Self-Check Quiz\n## {topic}\n\n{}\n",
            entries.join("\n\n")
        )
    }
}

/// The pre-class videos (and optional quiz) for one day.
#[derive(Debug, Clone, PartialEq)]
pub struct Lecture {
    /// Week of the `lectures/weekN.json` file the record came from.
    pub week: u32,
    pub day: u32,
    /// Videos announced on title slides. Can exceed `decks.len()` when a video has no deck.
    pub video_count: u32,
    pub decks: Vec<SlideDeck>,
    pub quiz: Option<Quiz>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct LectureRecord {
    day: u32,
    video_count: u32,
    decks: Vec<DeckRecord>,
    #[serde(default)]
    quiz: Option<Vec<QuizItem>>,
}

impl Lecture {
    fn from_record(week: u32, record: LectureRecord) -> Result<Self> {
        let decks = record
            .decks
            .into_iter()
            .map(SlideDeck::try_from)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            week,
            day: record.day,
            video_count: record.video_count,
            decks,
            quiz: record.quiz.map(|items| Quiz { items }),
        })
    }
}

/// A daily plan markdown document, passed through verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonPlan {
    pub day: u32,
    pub body: String,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct UnitsFile {
    units: Vec<CurriculumUnit>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct SharedFile {
    modules: Vec<SharedModule>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct LectureFile {
    week: u32,
    lectures: Vec<LectureRecord>,
}

/// Raw content handed to [`ContentRegistry::from_sources`].
#[derive(Debug, Clone, Copy)]
pub struct ContentSources<'a> {
    /// `units.json`
    pub units: &'a str,
    /// `shared.json`
    pub shared: &'a str,
    /// `(file name, json)` for each `lectures/weekN.json`.
    pub lectures: &'a [(&'a str, &'a str)],
    pub projects: &'a str,
    /// `(day, markdown)` for each lesson plan.
    pub lesson_plans: &'a [(u32, &'a str)],
}

/// Everything the generator knows about the course.
#[derive(Debug, Clone, Default)]
pub struct ContentRegistry {
    pub units: Vec<CurriculumUnit>,
    pub shared: Vec<SharedModule>,
    /// `projects/README.md`, verbatim.
    pub projects: String,
    pub lectures: Vec<Lecture>,
    pub lesson_plans: Vec<LessonPlan>,
}

fn parse<T: DeserializeOwned>(name: &str, json: &str) -> Result<T> {
    serde_json::from_str(json).map_err(|source| CourseError::ContentParse {
        name: name.to_string(),
        source,
    })
}

impl ContentRegistry {
    /// Decode every record. Does not run [`validate`](Self::validate).
    pub fn from_sources(sources: &ContentSources<'_>) -> Result<Self> {
        let units: UnitsFile = parse("units.json", sources.units)?;
        let shared: SharedFile = parse("shared.json", sources.shared)?;

        let mut lectures = Vec::new();
        for (name, json) in sources.lectures {
            let file: LectureFile = parse(name, json)?;
            for record in file.lectures {
                lectures.push(Lecture::from_record(file.week, record)?);
            }
        }

        let lesson_plans = sources
            .lesson_plans
            .iter()
            .map(|(day, body)| LessonPlan {
                day: *day,
                body: body.to_string(),
            })
            .collect();

        tracing::debug!(
            units = units.units.len(),
            modules = shared.modules.len(),
            lectures = lectures.len(),
            "content decoded"
        );

        Ok(Self {
            units: units.units,
            shared: shared.modules,
            projects: sources.projects.to_string(),
            lectures,
            lesson_plans,
        })
    }

    /// The unit taught on `day`.
    pub fn lookup(&self, day: u32) -> Result<&CurriculumUnit> {
        self.units
            .iter()
            .find(|u| u.day == day)
            .ok_or(CourseError::NotFound { day })
    }

    /// Check every cross-record invariant. Fails on the first violation.
    pub fn validate(&self) -> Result<()> {
        let mut keys = BTreeSet::new();
        let mut days = BTreeSet::new();
        for unit in &self.units {
            if !keys.insert((unit.week, unit.day)) {
                return Err(duplicate(format!("week {} day {}", unit.week, unit.day)));
            }
            if !days.insert(unit.day) {
                return Err(duplicate(format!("day {}", unit.day)));
            }
            validate_unit(unit)?;
        }

        let mut names = BTreeSet::new();
        for module in &self.shared {
            check_file_name("shared module", &module.name)?;
            if !names.insert(module.name.as_str()) {
                return Err(duplicate(format!("shared module {}", module.name)));
            }
        }

        let mut lecture_days = BTreeSet::new();
        for lecture in &self.lectures {
            let unit = self.lookup(lecture.day)?;
            if unit.week != lecture.week {
                return Err(CourseError::MisplacedLecture {
                    day: lecture.day,
                    found: lecture.week,
                    expected: unit.week,
                });
            }
            if !lecture_days.insert(lecture.day) {
                return Err(duplicate(format!("lecture day {}", lecture.day)));
            }
            let mut indices = BTreeSet::new();
            for deck in &lecture.decks {
                if !indices.insert(deck.index) {
                    return Err(duplicate(format!(
                        "day {} video {}",
                        lecture.day, deck.index
                    )));
                }
            }
        }

        let mut plan_days = BTreeSet::new();
        for plan in &self.lesson_plans {
            self.lookup(plan.day)?;
            if !plan_days.insert(plan.day) {
                return Err(duplicate(format!("lesson plan day {}", plan.day)));
            }
        }

        tracing::debug!("registry validated");
        Ok(())
    }
}

fn duplicate(key: String) -> CourseError {
    CourseError::DuplicateKey { key }
}

/// Names become the last component of an output path, so `a/b`, `..` and `./x`
/// would let one phase write outside its subtree or alias another artifact.
fn check_file_name(kind: &'static str, name: &str) -> Result<()> {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(first)), None) if first == name => Ok(()),
        _ => Err(CourseError::InvalidName {
            kind,
            name: name.to_string(),
        }),
    }
}

fn validate_unit(unit: &CurriculumUnit) -> Result<()> {
    let mut files = BTreeSet::new();
    for file in &unit.starter_files {
        check_file_name("starter file", &file.name)?;
        if !files.insert(file.name.as_str()) {
            return Err(duplicate(format!("day {} file {}", unit.day, file.name)));
        }
    }

    if unit.kind != UnitKind::Lab {
        return Ok(());
    }
    let incomplete = |missing| CourseError::IncompleteUnit {
        day: unit.day,
        missing,
    };
    if unit.project_name.as_deref().map_or(true, str::is_empty) {
        return Err(incomplete("project name"));
    }
    if unit.top_module.as_deref().map_or(true, str::is_empty) {
        return Err(incomplete("top module"));
    }
    if unit.starter_files.is_empty() {
        return Err(incomplete("starter files"));
    }
    Ok(())
}
