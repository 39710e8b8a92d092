//! Generator configuration.
//!
//! Everything here has a default that reproduces the published course tree, so a
//! config file is only needed to retarget the output (a different board package,
//! a mirrored CDN, another institution banner). Files are JSON and may be partial:
//! missing keys fall back to their defaults.
//!
//! ```json
//! {
//!   "course_title": "Accelerated HDL for Digital System Design",
//!   "makefile_banner": "Accelerated HDL Course",
//!   "toolchain": { "device": "hx1k", "package": "vq100" },
//!   "slides": { "reveal_cdn": "https://cdnjs.cloudflare.com/ajax/libs/reveal.js/4.6.1" }
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CourseError, Result};

/// Top-level configuration for one generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CourseConfig {
    /// Course name shown in deck `<title>`s.
    pub course_title: String,
    /// Short course name on the first line of every lab Makefile.
    pub makefile_banner: String,
    /// Footer line on every deck title slide.
    pub institution: String,
    pub toolchain: ToolchainConfig,
    pub slides: SlideConfig,
}

/// Settings baked into every generated lab Makefile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolchainConfig {
    /// iCE40 device passed to nextpnr (`--hx1k`).
    pub device: String,
    /// Package passed to nextpnr (`--package vq100`).
    pub package: String,
    /// Pin constraints file, relative to a lab directory.
    pub pcf: String,
}

/// Asset references inlined into every slide deck.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlideConfig {
    /// Base URL of the reveal.js distribution (no trailing slash).
    pub reveal_cdn: String,
    /// reveal.js theme name under `<reveal_cdn>/theme/`.
    pub reveal_theme: String,
    /// highlight.js stylesheet URL.
    pub highlight_css: String,
    /// Web font stylesheet URL.
    pub font_css: String,
    /// Course theme stylesheet, relative to a deck file.
    pub theme_css: String,
}

impl Default for CourseConfig {
    fn default() -> Self {
        Self {
            course_title: "Accelerated HDL for Digital System Design".into(),
            makefile_banner: "Accelerated HDL Course".into(),
            institution: "UCF · Department of ECE".into(),
            toolchain: ToolchainConfig::default(),
            slides: SlideConfig::default(),
        }
    }
}

impl Default for ToolchainConfig {
    fn default() -> Self {
        Self {
            device: "hx1k".into(),
            package: "vq100".into(),
            pcf: "../../../../shared/pcf/go_board.pcf".into(),
        }
    }
}

impl Default for SlideConfig {
    fn default() -> Self {
        Self {
            reveal_cdn: "https://cdnjs.cloudflare.com/ajax/libs/reveal.js/4.6.1".into(),
            reveal_theme: "white".into(),
            highlight_css:
                "https://cdnjs.cloudflare.com/ajax/libs/highlight.js/11.9.0/styles/vs2015.min.css"
                    .into(),
            font_css: "https://fonts.googleapis.com/css2?family=Inter:wght@400;600;700&family=JetBrains+Mono:wght@400;700&display=swap".into(),
            theme_css: "../../theme/ucf-hdl.css".into(),
        }
    }
}

impl SlideConfig {
    /// Stylesheets linked from each deck, in document order.
    pub fn stylesheets(&self) -> Vec<String> {
        vec![
            format!("{}/reveal.min.css", self.reveal_cdn),
            format!("{}/theme/{}.min.css", self.reveal_cdn, self.reveal_theme),
            self.highlight_css.clone(),
            self.font_css.clone(),
            self.theme_css.clone(),
        ]
    }

    /// Scripts loaded at the end of each deck, in document order.
    pub fn scripts(&self) -> Vec<String> {
        vec![
            format!("{}/reveal.min.js", self.reveal_cdn),
            format!("{}/plugin/highlight/highlight.min.js", self.reveal_cdn),
            format!("{}/plugin/notes/notes.min.js", self.reveal_cdn),
        ]
    }
}

impl CourseConfig {
    /// Load a config file. Keys absent from the file keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| CourseError::ConfigNotFound {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_json::from_str(&contents).map_err(|e| CourseError::ConfigParse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Write the config as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(|e| CourseError::ConfigParse {
            path: path.to_path_buf(),
            source: e,
        })?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
