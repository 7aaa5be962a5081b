//! Per-deployment grading configuration.
//!
//! Loaded from a JSON document in which every field is optional; missing fields take the
//! defaults below, so `{}` is a valid configuration.

use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

use crate::languages::Language;

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ComparisonScheme {
    /// Whitespace-insensitive, content-exact comparison.
    Normalized,
    /// Only line endings are unified before comparing.
    Exact,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScoringOptions {
    /// Points available for token similarity.
    #[serde(default = "default_similarity_weight")]
    pub similarity_weight: u32,

    /// Points available before structural penalties are subtracted.
    #[serde(default = "default_structure_weight")]
    pub structure_weight: u32,
}

impl Default for ScoringOptions {
    fn default() -> Self {
        Self {
            similarity_weight: default_similarity_weight(),
            structure_weight: default_structure_weight(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputOptions {
    #[serde(default = "default_comparison")]
    pub comparison: ComparisonScheme,

    /// Characters kept from actual/expected output in mismatch issues.
    #[serde(default = "default_excerpt_chars")]
    pub excerpt_chars: usize,

    /// Lines kept from compiler/runtime diagnostics.
    #[serde(default = "default_diagnostic_lines")]
    pub diagnostic_lines: usize,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            comparison: default_comparison(),
            excerpt_chars: default_excerpt_chars(),
            diagnostic_lines: default_diagnostic_lines(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RunnerOptions {
    #[serde(default)]
    pub language: Language,

    /// Runner-side language version; `*` lets the runner pick its latest.
    #[serde(default = "default_version")]
    pub version: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for RunnerOptions {
    fn default() -> Self {
        Self {
            language: Language::default(),
            version: default_version(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GradingConfig {
    #[serde(default)]
    pub scoring: ScoringOptions,

    #[serde(default)]
    pub output: OutputOptions,

    #[serde(default)]
    pub runner: RunnerOptions,
}

impl GradingConfig {
    pub fn default_config() -> Self {
        GradingConfig {
            scoring: ScoringOptions::default(),
            output: OutputOptions::default(),
            runner: RunnerOptions::default(),
        }
    }

    /// Reads a config file, falling back to [`GradingConfig::default_config`] when
    /// `path` is empty.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, String> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Ok(Self::default_config());
        }

        let file_contents = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read grading config at {path:?}: {e}"))?;

        let cfg: GradingConfig = serde_json::from_str(&file_contents)
            .map_err(|e| format!("Invalid grading config JSON in {path:?}: {e}"))?;

        let total = cfg
            .scoring
            .similarity_weight
            .checked_add(cfg.scoring.structure_weight);
        if total.is_none_or(|total| total > 100) {
            return Err(format!(
                "Scoring weights must not exceed 100 (got {} + {})",
                cfg.scoring.similarity_weight, cfg.scoring.structure_weight
            ));
        }

        Ok(cfg)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), String> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {e:?}"))?;
        }

        let json = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize config to JSON: {e}"))?;

        fs::write(path, json).map_err(|e| format!("Failed to write config file to disk: {e:?}"))?;

        Ok(())
    }
}

//Default Functions

fn default_similarity_weight() -> u32 {
    60
}

fn default_structure_weight() -> u32 {
    40
}

fn default_comparison() -> ComparisonScheme {
    ComparisonScheme::Normalized
}

fn default_excerpt_chars() -> usize {
    200
}

fn default_diagnostic_lines() -> usize {
    3
}

fn default_version() -> String {
    "*".to_string()
}

fn default_timeout_secs() -> u64 {
    15
}
