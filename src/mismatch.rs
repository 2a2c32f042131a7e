use std::path::Path;
use std::sync::LazyLock;

use anyhow::Context;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Transcript/detected-text mismatch report produced by the dubbing checks.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MismatchReport {
    pub mismatches: Vec<Mismatch>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Mismatch {
    #[serde(default)]
    pub filename: String,
    pub original_text: String,
    pub detected_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_word_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detected_word_count: Option<u32>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MismatchTally {
    pub more_detected: usize,
    pub less_detected: usize,
}

static PUNCTUATION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"[.,!?;:'"()-]"#).unwrap());
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Word count after basic normalization: lowercase, punctuation stripped,
/// whitespace collapsed. An all-punctuation text still counts as one word,
/// mirroring a split on the empty string.
pub fn word_count(text: &str) -> usize {
    let lowered = text.to_lowercase();
    let stripped = PUNCTUATION.replace_all(&lowered, "");
    let collapsed = WHITESPACE.replace_all(&stripped, " ");
    collapsed.trim().split(' ').count()
}

/// Keeps only mismatches whose recomputed original/detected word counts
/// actually differ; equal counts mean the recognizer merely re-spelled
/// something and the entry is not a genuine mismatch.
pub fn filter_real(report: &MismatchReport) -> MismatchReport {
    let mismatches = report
        .mismatches
        .iter()
        .filter(|m| {
            let original = word_count(&m.original_text);
            let detected = word_count(&m.detected_text);
            if original != detected {
                log::debug!(
                    "word count difference in {}: original {:?} ({} words) vs detected {:?} ({} words)",
                    m.filename,
                    m.original_text,
                    original,
                    m.detected_text,
                    detected
                );
            }
            original != detected
        })
        .cloned()
        .collect();
    MismatchReport { mismatches }
}

/// Tallies how many entries detected more words than the original and how
/// many detected fewer, over recomputed counts.
pub fn tally(report: &MismatchReport) -> MismatchTally {
    let mut tally = MismatchTally::default();
    for m in &report.mismatches {
        let original = word_count(&m.original_text);
        let detected = word_count(&m.detected_text);
        if detected > original {
            tally.more_detected += 1;
        } else if detected < original {
            tally.less_detected += 1;
        }
    }
    tally
}

pub fn load_report(path: &Path) -> anyhow::Result<MismatchReport> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read mismatch report {:?}", path))?;
    let report: MismatchReport = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse mismatch report {:?}", path))?;
    Ok(report)
}

pub fn save_report(path: &Path, report: &MismatchReport) -> anyhow::Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create mismatch report {:?}", path))?;
    serde_json::to_writer_pretty(file, report)?;
    Ok(())
}
