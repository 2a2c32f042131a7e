use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::segment::{self, SegmentError, WordSegment};

/// Character-level alignment as emitted by the speech-synthesis provider:
/// one single-character string per entry, with parallel start/end time
/// arrays in seconds. Only the end times drive segmentation.
#[derive(Debug, Clone, Deserialize)]
pub struct TtsAlignment {
    pub characters: Vec<char>,
    #[serde(default)]
    pub character_start_times_seconds: Vec<f64>,
    pub character_end_times_seconds: Vec<f64>,
}

impl TtsAlignment {
    pub fn segments(&self) -> Result<Vec<WordSegment>, SegmentError> {
        segment::segment(&self.characters, &self.character_end_times_seconds)
    }
}

/// Full synthesis response wrapper; the raw alignment is used, the
/// normalized one (padded with boundary spaces) is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct TtsResponse {
    pub alignment: TtsAlignment,
}

/// Word timing from a speech recognizer. Words arrive already delimited,
/// so these bypass segmentation and feed the clip extractor directly.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RecognizedWord {
    pub word: String,
    pub start: f64,
    pub end: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conf: Option<f64>,
}

impl RecognizedWord {
    /// Widens the window symmetrically, clamping the start at 0.
    pub fn padded(&self, padding: f64) -> (f64, f64) {
        ((self.start - padding).max(0.0), self.end + padding)
    }
}

/// Loads a TTS alignment JSON: either a bare alignment object or the full
/// synthesis response carrying one.
pub fn load_tts_alignment(path: &Path) -> anyhow::Result<TtsAlignment> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read alignment file {:?}", path))?;

    if let Ok(alignment) = serde_json::from_str::<TtsAlignment>(&content) {
        return Ok(alignment);
    }
    let response: TtsResponse = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse alignment file {:?}", path))?;
    Ok(response.alignment)
}

pub fn load_recognized_words(path: &Path) -> anyhow::Result<Vec<RecognizedWord>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read timings file {:?}", path))?;
    let words: Vec<RecognizedWord> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse timings file {:?}", path))?;
    Ok(words)
}
