//! Generation pipeline.
//!
//! Each [`Phase`] turns registry records into [`ArtifactSpec`]s under its own
//! subtree. A run validates the registry, plans every requested phase, checks that
//! no two artifacts share a path, and only then writes:
//!
//! ```text
//! validate -> plan(phase)* -> unique paths -> write
//! ```
//!
//! Planning is pure, so a failure at any step before writing leaves the output
//! directory untouched.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use crate::config::CourseConfig;
use crate::error::{CourseError, Result};
use crate::registry::{ContentRegistry, CurriculumUnit, UnitKind};
use crate::slides::{check_continuity, DeckContext, SlideComposer};
use crate::templates::embedded;
use crate::templates::text::{self, Params};
use crate::writer::{ArtifactKind, ArtifactSpec, TreeWriter};

/// An independent group of artifacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Phase {
    /// `labs/`: starter code, Makefiles, READMEs.
    Labs,
    /// `shared/lib/`: reusable modules and their index.
    Shared,
    /// `projects/README.md`
    Projects,
    /// `lectures/**/seg*.html`
    Slides,
    /// `lectures/**/quiz.md`
    Quizzes,
    /// `docs/`: daily lesson plans.
    Docs,
    /// Repository files at the output root.
    Repo,
}

impl Phase {
    pub const ALL: [Phase; 7] = [
        Phase::Labs,
        Phase::Shared,
        Phase::Projects,
        Phase::Slides,
        Phase::Quizzes,
        Phase::Docs,
        Phase::Repo,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Labs => "labs",
            Self::Shared => "shared",
            Self::Projects => "projects",
            Self::Slides => "slides",
            Self::Quizzes => "quizzes",
            Self::Docs => "docs",
            Self::Repo => "repo",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Phase {
    type Err = CourseError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| CourseError::Other(anyhow::anyhow!("unknown phase: {s}")))
    }
}

/// What a completed run wrote.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub phases: Vec<Phase>,
    pub files: usize,
    pub by_kind: BTreeMap<ArtifactKind, usize>,
}

impl RunSummary {
    fn record(&mut self, spec: &ArtifactSpec) {
        self.files += 1;
        *self.by_kind.entry(spec.kind).or_default() += 1;
    }
}

/// Orchestrates registry -> artifacts -> writer.
pub struct GenerationDriver<'a> {
    registry: &'a ContentRegistry,
    config: &'a CourseConfig,
    composer: SlideComposer,
}

impl<'a> GenerationDriver<'a> {
    pub fn new(registry: &'a ContentRegistry, config: &'a CourseConfig) -> Self {
        Self {
            registry,
            config,
            composer: SlideComposer::new(),
        }
    }

    /// Validate, plan, and check every requested phase without writing anything.
    ///
    /// An empty `phases` slice means every phase.
    pub fn prepare(&self, phases: &[Phase]) -> Result<Vec<ArtifactSpec>> {
        self.registry.validate()?;

        let phases = normalize(phases);
        let mut specs = Vec::new();
        for phase in &phases {
            let planned = self.plan(*phase)?;
            tracing::info!(phase = %phase, artifacts = planned.len(), "planned");
            specs.extend(planned);
        }

        let mut seen = BTreeSet::new();
        for spec in &specs {
            if !seen.insert(spec.output_path.as_path()) {
                return Err(CourseError::DuplicatePath(spec.output_path.clone()));
            }
        }
        Ok(specs)
    }

    /// Run the whole pipeline into `writer`.
    pub fn run<W: TreeWriter + ?Sized>(&self, phases: &[Phase], writer: &mut W) -> Result<RunSummary> {
        let specs = self.prepare(phases)?;
        let mut summary = RunSummary {
            phases: normalize(phases),
            ..Default::default()
        };
        for spec in &specs {
            writer.write(&spec.output_path, &spec.content)?;
            summary.record(spec);
        }
        Ok(summary)
    }

    /// Artifacts for one phase. Pure: reads the registry, returns specs.
    pub fn plan(&self, phase: Phase) -> Result<Vec<ArtifactSpec>> {
        match phase {
            Phase::Labs => self.plan_labs(),
            Phase::Shared => self.plan_shared(),
            Phase::Projects => Ok(vec![ArtifactSpec::new(
                "projects/README.md",
                self.registry.projects.clone(),
                ArtifactKind::Doc,
            )]),
            Phase::Slides => self.plan_slides(),
            Phase::Quizzes => self.plan_quizzes(),
            Phase::Docs => self.plan_docs(),
            Phase::Repo => Ok(vec![ArtifactSpec::new(
                ".gitignore",
                text::render(embedded::GITIGNORE, &Params::new())?,
                ArtifactKind::Build,
            )]),
        }
    }

    fn plan_labs(&self) -> Result<Vec<ArtifactSpec>> {
        let mut specs = Vec::new();
        for unit in &self.registry.units {
            let dir = unit.lab_dir();
            for file in &unit.starter_files {
                specs.push(ArtifactSpec::new(
                    dir.join(&file.name),
                    file.content.clone(),
                    ArtifactKind::Code,
                ));
            }
            match unit.kind {
                UnitKind::Lab => {
                    specs.push(ArtifactSpec::new(
                        dir.join("Makefile"),
                        self.lab_makefile(unit)?,
                        ArtifactKind::Build,
                    ));
                    specs.push(ArtifactSpec::new(
                        dir.join("README.md"),
                        lab_readme(unit)?,
                        ArtifactKind::Doc,
                    ));
                }
                UnitKind::Session => {
                    specs.push(ArtifactSpec::new(
                        dir.join("README.md"),
                        text::render(embedded::SESSION_README, &unit_params(unit))?,
                        ArtifactKind::Doc,
                    ));
                }
            }
            tracing::debug!(day = unit.day, files = unit.starter_files.len(), "lab planned");
        }
        Ok(specs)
    }

    fn lab_makefile(&self, unit: &CurriculumUnit) -> Result<String> {
        let toolchain = &self.config.toolchain;
        let incomplete = |missing| CourseError::IncompleteUnit {
            day: unit.day,
            missing,
        };
        let project = unit
            .project_name
            .clone()
            .ok_or_else(|| incomplete("project name"))?;
        let top = unit
            .top_module
            .clone()
            .ok_or_else(|| incomplete("top module"))?;
        let params = Params::from([
            ("day", unit.day.to_string()),
            ("banner", self.config.makefile_banner.clone()),
            ("project", project),
            ("top", top),
            ("pcf", toolchain.pcf.clone()),
            ("device", toolchain.device.clone()),
            ("package", toolchain.package.clone()),
        ]);
        text::render(embedded::LAB_MAKEFILE, &params)
    }

    fn plan_shared(&self) -> Result<Vec<ArtifactSpec>> {
        let mut specs = Vec::with_capacity(self.registry.shared.len() + 1);
        let mut rows = String::new();
        for module in &self.registry.shared {
            specs.push(ArtifactSpec::new(
                format!("shared/lib/{}.v", module.name),
                module.source.clone(),
                ArtifactKind::Code,
            ));
            rows.push_str(&format!(
                "| `{}` | {} | Day {} | Day {} |\n",
                module.name, module.description, module.built_day, module.tested_day
            ));
        }
        let params = Params::from([("module_rows", rows)]);
        specs.push(ArtifactSpec::new(
            "shared/lib/README.md",
            text::render(embedded::SHARED_README, &params)?,
            ArtifactKind::Doc,
        ));
        Ok(specs)
    }

    fn plan_slides(&self) -> Result<Vec<ArtifactSpec>> {
        let mut specs = Vec::new();
        for lecture in &self.registry.lectures {
            let unit = self.registry.lookup(lecture.day)?;
            check_continuity(&lecture.decks)?;
            let ctx = DeckContext {
                day: lecture.day,
                video_count: lecture.video_count,
                config: self.config,
            };
            let dir = unit.lecture_dir();
            for deck in &lecture.decks {
                let html = self.composer.compose(deck, &ctx)?;
                specs.push(ArtifactSpec::new(
                    dir.join(deck.file_name()),
                    html,
                    ArtifactKind::Deck,
                ));
            }
            tracing::debug!(day = lecture.day, decks = lecture.decks.len(), "lecture composed");
        }
        Ok(specs)
    }

    fn plan_quizzes(&self) -> Result<Vec<ArtifactSpec>> {
        let mut specs = Vec::new();
        for lecture in &self.registry.lectures {
            let Some(quiz) = &lecture.quiz else {
                continue;
            };
            let unit = self.registry.lookup(lecture.day)?;
            specs.push(ArtifactSpec::new(
                unit.lecture_dir().join("quiz.md"),
                quiz.to_markdown(unit.day, &unit.topic),
                ArtifactKind::Doc,
            ));
        }
        Ok(specs)
    }

    fn plan_docs(&self) -> Result<Vec<ArtifactSpec>> {
        self.registry
            .lesson_plans
            .iter()
            .map(|plan| {
                let unit = self.registry.lookup(plan.day)?;
                Ok(ArtifactSpec::new(
                    unit.lesson_plan_path(),
                    plan.body.clone(),
                    ArtifactKind::Doc,
                ))
            })
            .collect()
    }
}

/// Deduplicated phases in canonical order; empty means all.
fn normalize(phases: &[Phase]) -> Vec<Phase> {
    if phases.is_empty() {
        return Phase::ALL.to_vec();
    }
    let requested: BTreeSet<Phase> = phases.iter().copied().collect();
    requested.into_iter().collect()
}

fn unit_params(unit: &CurriculumUnit) -> Params<'static> {
    Params::from([
        ("day", unit.day.to_string()),
        ("day_padded", format!("{:02}", unit.day)),
        ("week", unit.week.to_string()),
        ("topic", unit.topic.clone()),
    ])
}

fn lab_readme(unit: &CurriculumUnit) -> Result<String> {
    let rows: String = unit
        .verilog_files()
        .iter()
        .map(|name| format!("| `{name}` | Starter code |\n"))
        .collect();
    let mut params = unit_params(unit);
    params.insert("file_rows", rows);
    text::render(embedded::LAB_README, &params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{Lecture, LessonPlan, Quiz, QuizItem, SharedModule, StarterFile};
    use crate::slides::{DeckLink, Segment, SegmentKind, SlideDeck};
    use crate::writer::{FileTreeWriter, MemoryTree};

    fn unit(week: u32, day: u32, topic: &str, project: &str, top: &str) -> CurriculumUnit {
        CurriculumUnit {
            week,
            day,
            topic: topic.into(),
            kind: UnitKind::Lab,
            project_name: Some(project.into()),
            top_module: Some(top.into()),
            starter_files: vec![
                StarterFile {
                    name: "debounce.v".into(),
                    content: "module debounce;\nendmodule\n".into(),
                },
                StarterFile {
                    name: "counter_mod_n.v".into(),
                    content: "module counter_mod_n;\nendmodule\n".into(),
                },
            ],
        }
    }

    fn module(name: &str, built: u32) -> SharedModule {
        SharedModule {
            name: name.into(),
            description: format!("{name} description"),
            built_day: built,
            tested_day: 6,
            source: format!("module {name};\nendmodule\n"),
        }
    }

    fn deck(index: u32, tail: Segment) -> SlideDeck {
        SlideDeck {
            name: format!("part{index}"),
            title: format!("Day 5.{index}: Part {index}"),
            subtitle: format!("Part {index}"),
            day_label: "Day 5 · Counters".into(),
            index,
            duration: 10,
            segments: vec![
                Segment::new(SegmentKind::Title),
                Segment::content(["    <p>body</p>"]),
                Segment::takeaway(["one", "two"]),
                tail,
            ],
        }
    }

    fn sample() -> ContentRegistry {
        ContentRegistry {
            units: vec![
                unit(1, 4, "Sequential Logic Fundamentals", "led_blinker", "led_blinker"),
                unit(
                    2,
                    5,
                    "Counters, Shift Registers & Debouncing",
                    "led_chase",
                    "led_chase_top",
                ),
                CurriculumUnit {
                    week: 4,
                    day: 15,
                    topic: "Final Project Build Day".into(),
                    kind: UnitKind::Session,
                    project_name: None,
                    top_module: None,
                    starter_files: vec![],
                },
            ],
            shared: vec![
                module("hex_to_7seg", 2),
                module("debounce", 5),
                module("uart_tx", 11),
            ],
            projects: "# Final Project Options\n".into(),
            lectures: vec![Lecture {
                week: 2,
                day: 5,
                video_count: 2,
                decks: vec![
                    deck(
                        1,
                        Segment::bridge("Part 2", DeckLink { index: 2, duration: 10 }, "More."),
                    ),
                    deck(2, Segment::new(SegmentKind::End)),
                ],
                quiz: Some(Quiz {
                    items: vec![QuizItem {
                        question: "Why debounce?".into(),
                        answer: "Contacts bounce.".into(),
                    }],
                }),
            }],
            lesson_plans: vec![LessonPlan {
                day: 5,
                body: "# Day 5 plan\n".into(),
            }],
        }
    }

    fn generate(registry: &ContentRegistry, phases: &[Phase]) -> Result<MemoryTree> {
        let config = CourseConfig::default();
        let mut tree = MemoryTree::new();
        GenerationDriver::new(registry, &config).run(phases, &mut tree)?;
        Ok(tree)
    }

    #[test]
    fn test_makefile_names_project_and_top() {
        let tree = generate(&sample(), &[Phase::Labs]).unwrap();
        let makefile = tree.get("labs/week2/day05/Makefile").unwrap();
        assert!(makefile.lines().any(|l| l == "PROJECT  = led_chase"));
        assert!(makefile.lines().any(|l| l == "TOP      = led_chase_top"));
        assert!(makefile.starts_with("# Lab 5 Makefile — Accelerated HDL Course\n"));
        for target in ["all", "prog", "sim", "wave", "show", "clean"] {
            assert!(makefile.contains(&format!("\n{target}:")), "missing target {target}");
        }
        assert!(makefile.contains("\n\tyosys -p"));
        assert!(makefile.lines().any(|l| l == "DEVICE   = hx1k"));
    }

    #[test]
    fn test_lab_readme_lists_sorted_sources() {
        let tree = generate(&sample(), &[Phase::Labs]).unwrap();
        let readme = tree.get("labs/week2/day05/README.md").unwrap();
        assert!(readme.starts_with("# Day 5: Counters, Shift Registers & Debouncing\n"));
        assert!(readme.contains(
            "| `counter_mod_n.v` | Starter code |\n| `debounce.v` | Starter code |\n| `Makefile` | Build automation |"
        ));
        assert!(readme.contains("See `docs/day05_*.md`"));
        assert_eq!(
            tree.get("labs/week2/day05/debounce.v"),
            Some("module debounce;\nendmodule\n")
        );
    }

    #[test]
    fn test_session_gets_stub_only() {
        let tree = generate(&sample(), &[Phase::Labs]).unwrap();
        assert_eq!(
            tree.get("labs/week4/day15/README.md"),
            Some("# Day 15: Final Project Build Day\n\n**Week 4 · Lab Session**\n\nSee `docs/day15_*.md` for detailed session guide.\n")
        );
        assert!(tree.get("labs/week4/day15/Makefile").is_none());
    }

    #[test]
    fn test_shared_readme_rows_in_order() {
        let tree = generate(&sample(), &[Phase::Shared]).unwrap();
        let readme = tree.get("shared/lib/README.md").unwrap();
        let rows: Vec<&str> = readme
            .lines()
            .filter(|l| l.starts_with("| `"))
            .collect();
        assert_eq!(
            rows,
            vec![
                "| `hex_to_7seg` | hex_to_7seg description | Day 2 | Day 6 |",
                "| `debounce` | debounce description | Day 5 | Day 6 |",
                "| `uart_tx` | uart_tx description | Day 11 | Day 6 |",
            ]
        );
        assert!(tree.get("shared/lib/uart_tx.v").is_some());
    }

    #[test]
    fn test_slides_and_quiz_paths() {
        let tree = generate(&sample(), &[Phase::Slides, Phase::Quizzes]).unwrap();
        let dir = "lectures/week2/day05_counters_shift_registers_debouncing";
        assert!(tree.get(format!("{dir}/seg1_part1.html")).unwrap().contains("Up Next"));
        assert!(tree.get(format!("{dir}/seg2_part2.html")).unwrap().contains("See You in Class!"));
        let quiz = tree.get(format!("{dir}/quiz.md")).unwrap();
        assert!(quiz.starts_with("# Day 5: Pre-Class Self-Check Quiz\n## Counters, Shift Registers & Debouncing\n"));
    }

    #[test]
    fn test_docs_projects_repo() {
        let tree = generate(&sample(), &[Phase::Docs, Phase::Projects, Phase::Repo]).unwrap();
        assert_eq!(
            tree.get("docs/day05_counters_shift_registers_debouncing.md"),
            Some("# Day 5 plan\n")
        );
        assert_eq!(tree.get("projects/README.md"), Some("# Final Project Options\n"));
        assert!(tree.get(".gitignore").unwrap().contains("*.vcd"));
    }

    #[test]
    fn test_run_is_deterministic() {
        let registry = sample();
        let first = generate(&registry, &[]).unwrap();
        let second = generate(&registry, &[]).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_no_residual_placeholders() {
        let tree = generate(&sample(), &[Phase::Labs, Phase::Shared, Phase::Repo]).unwrap();
        for path in tree.paths() {
            let content = tree.get(path).unwrap();
            for name in ["{day}", "{topic}", "{project}", "{top}", "{module_rows}", "{file_rows}"] {
                assert!(!content.contains(name), "{name} left in {}", path.display());
            }
        }
    }

    #[test]
    fn test_incomplete_unit_writes_nothing() {
        let mut registry = sample();
        registry.units[1].starter_files.clear();
        let tmp = tempfile::tempdir().unwrap();
        let config = CourseConfig::default();
        let mut writer = FileTreeWriter::new(tmp.path());
        let err = GenerationDriver::new(&registry, &config)
            .run(&[], &mut writer)
            .unwrap_err();
        assert!(matches!(err, CourseError::IncompleteUnit { day: 5, .. }));
        assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_duplicate_path_rejected() {
        let mut registry = sample();
        registry.units[1].starter_files.push(StarterFile {
            name: "Makefile".into(),
            content: "all:\n".into(),
        });
        let config = CourseConfig::default();
        let err = GenerationDriver::new(&registry, &config)
            .prepare(&[Phase::Labs])
            .unwrap_err();
        match err {
            CourseError::DuplicatePath(path) => {
                assert_eq!(path, std::path::PathBuf::from("labs/week2/day05/Makefile"))
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_aliased_starter_file_rejected() {
        let mut registry = sample();
        registry.units[1].starter_files.push(StarterFile {
            name: "sub/../Makefile".into(),
            content: "all:\n".into(),
        });
        let config = CourseConfig::default();
        let err = GenerationDriver::new(&registry, &config)
            .prepare(&[Phase::Labs])
            .unwrap_err();
        assert!(matches!(err, CourseError::InvalidName { kind: "starter file", .. }));
    }

    #[test]
    fn test_shared_module_cannot_write_into_labs() {
        let mut registry = sample();
        registry.shared[0].name = "../../labs/week2/day05/debounce".into();
        let tmp = tempfile::tempdir().unwrap();
        let config = CourseConfig::default();
        let mut writer = FileTreeWriter::new(tmp.path());
        let err = GenerationDriver::new(&registry, &config)
            .run(&[Phase::Shared], &mut writer)
            .unwrap_err();
        assert!(matches!(err, CourseError::InvalidName { kind: "shared module", .. }));
        assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_broken_continuity_aborts_before_writing() {
        let mut registry = sample();
        registry.lectures[0].decks[1].duration = 15;
        let tmp = tempfile::tempdir().unwrap();
        let config = CourseConfig::default();
        let mut writer = FileTreeWriter::new(tmp.path());
        let err = GenerationDriver::new(&registry, &config)
            .run(&[], &mut writer)
            .unwrap_err();
        assert!(matches!(err, CourseError::Continuity { .. }));
        assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_summary_counts() {
        let registry = sample();
        let config = CourseConfig::default();
        let mut tree = MemoryTree::new();
        let summary = GenerationDriver::new(&registry, &config)
            .run(&[Phase::Shared, Phase::Shared], &mut tree)
            .unwrap();
        assert_eq!(summary.phases, vec![Phase::Shared]);
        assert_eq!(summary.files, 4);
        assert_eq!(summary.by_kind.get(&ArtifactKind::Code), Some(&3));
        assert_eq!(tree.len(), 4);
    }

    #[test]
    fn test_phase_parse() {
        for phase in Phase::ALL {
            assert_eq!(phase.as_str().parse::<Phase>().unwrap(), phase);
        }
        assert!("lectures".parse::<Phase>().is_err());
    }
}
