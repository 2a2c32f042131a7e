use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_CLIP_FORMAT: &str = "mp3";
pub const DEFAULT_OUTPUT_DIR: &str = "word_clips";
/// Seconds added around recognizer word windows; character alignments are
/// already boundary-averaged and get no padding.
pub const DEFAULT_PADDING_SECS: f64 = 0.1;

/// Optional run profile loaded from yaml; every field falls back to a
/// default at the use site.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct Profile {
    pub clip: Option<ClipConfig>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ClipConfig {
    pub format: Option<String>,
    pub output_dir: Option<PathBuf>,
    pub padding: Option<f64>,
    /// Copy the source audio into the output directory next to the clips.
    pub keep_original: Option<bool>,
}

impl Profile {
    pub fn clip_format(&self) -> &str {
        self.clip
            .as_ref()
            .and_then(|c| c.format.as_deref())
            .unwrap_or(DEFAULT_CLIP_FORMAT)
    }

    pub fn output_dir(&self) -> PathBuf {
        self.clip
            .as_ref()
            .and_then(|c| c.output_dir.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR))
    }

    pub fn padding(&self) -> f64 {
        self.clip
            .as_ref()
            .and_then(|c| c.padding)
            .unwrap_or(DEFAULT_PADDING_SECS)
    }

    pub fn keep_original(&self) -> bool {
        self.clip
            .as_ref()
            .and_then(|c| c.keep_original)
            .unwrap_or(false)
    }
}

pub fn load_profile(path: &Path) -> anyhow::Result<Profile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read profile {:?}", path))?;
    let profile: Profile = serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse profile {:?}", path))?;
    Ok(profile)
}
