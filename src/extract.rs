use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::LazyLock;

use indicatif::ProgressBar;
use regex::Regex;
use serde::Serialize;
use thiserror::Error;
use tokio::process::Command;

use crate::alignment::RecognizedWord;
use crate::segment::WordSegment;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("failed to extract clip {index} for word {word:?}: {reason}")]
    ExtractionFailed {
        index: usize,
        word: String,
        reason: String,
    },
}

/// One produced clip, in input order. Serialized into the manifest.
#[derive(Debug, Clone, Serialize)]
pub struct ClipEntry {
    pub index: usize,
    pub word: String,
    pub start: f64,
    pub end: f64,
    pub path: PathBuf,
}

static NON_ALNUM: LazyLock<Regex> = LazyLock::new(|| Regex::new("[^a-zA-Z0-9]").unwrap());

/// Strips everything but ASCII alphanumerics so the word is safe in a filename.
pub fn clean_filename(word: &str) -> String {
    NON_ALNUM.replace_all(word, "").into_owned()
}

/// Trims one clip per word out of a source audio file by shelling out to
/// ffmpeg, one awaited invocation at a time. Already-produced clips are kept
/// when a later extraction fails.
pub struct ClipExtractor {
    output_dir: PathBuf,
    format: String,
}

impl ClipExtractor {
    pub fn new(output_dir: impl Into<PathBuf>, format: impl Into<String>) -> Self {
        Self {
            output_dir: output_dir.into(),
            format: format.into(),
        }
    }

    pub fn clip_path(&self, index: usize, word: &str) -> PathBuf {
        self.output_dir
            .join(format!("word_{}_{}.{}", index, clean_filename(word), self.format))
    }

    /// ffmpeg -i input -ss start -t duration output
    async fn extract_one(
        &self,
        audio: &Path,
        index: usize,
        word: &str,
        start: f64,
        end: f64,
    ) -> Result<ClipEntry, ExtractError> {
        let fail = |reason: String| ExtractError::ExtractionFailed {
            index,
            word: word.to_string(),
            reason,
        };

        let output_path = self.clip_path(index, word);
        let input = audio
            .to_str()
            .ok_or_else(|| fail("invalid input path".to_string()))?;
        let output = output_path
            .to_str()
            .ok_or_else(|| fail("invalid output path".to_string()))?;
        let duration = (end - start).max(0.0);

        log::debug!(
            "extracting clip {} for {:?}: {:.3}s + {:.3}s -> {:?}",
            index,
            word,
            start,
            duration,
            output_path
        );

        let status = Command::new("ffmpeg")
            .args([
                "-hide_banner",
                "-y",
                "-loglevel",
                "error",
                "-i",
                input,
                "-ss",
                &format!("{:.3}", start),
                "-t",
                &format!("{:.3}", duration),
                output,
            ])
            .stdin(Stdio::null())
            .status()
            .await
            .map_err(|e| fail(format!("failed to run ffmpeg: {}", e)))?;

        if !status.success() {
            return Err(fail(format!("ffmpeg exited with {}", status)));
        }

        Ok(ClipEntry {
            index,
            word: word.to_string(),
            start,
            end,
            path: output_path,
        })
    }

    /// Extracts one clip per word segment, in segment order.
    pub async fn extract_segments(
        &self,
        audio: &Path,
        segments: &[WordSegment],
        pb: &ProgressBar,
    ) -> Result<Vec<ClipEntry>, ExtractError> {
        let mut entries = Vec::with_capacity(segments.len());
        for (i, seg) in segments.iter().enumerate() {
            let entry = self
                .extract_one(audio, i, &seg.word, seg.start_time, seg.end_time)
                .await?;
            entries.push(entry);
            pb.inc(1);
        }
        Ok(entries)
    }

    /// Extracts one clip per recognizer word, widening each window by
    /// `padding` seconds on both sides.
    pub async fn extract_words(
        &self,
        audio: &Path,
        words: &[RecognizedWord],
        padding: f64,
        pb: &ProgressBar,
    ) -> Result<Vec<ClipEntry>, ExtractError> {
        let mut entries = Vec::with_capacity(words.len());
        for (i, word) in words.iter().enumerate() {
            let (start, end) = word.padded(padding);
            let entry = self.extract_one(audio, i, &word.word, start, end).await?;
            entries.push(entry);
            pb.inc(1);
        }
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_filename_strips_non_alphanumerics() {
        assert_eq!(clean_filename("don't!"), "dont");
        assert_eq!(clean_filename("hello"), "hello");
        assert_eq!(clean_filename("wi-fi 2"), "wifi2");
        assert_eq!(clean_filename("..."), "");
    }

    #[test]
    fn clip_paths_follow_word_index_scheme() {
        let extractor = ClipExtractor::new("/tmp/clips", "mp3");
        assert_eq!(
            extractor.clip_path(3, "can't"),
            PathBuf::from("/tmp/clips/word_3_cant.mp3")
        );
    }

    #[tokio::test]
    async fn missing_source_reports_extraction_failed() {
        let dir = tempfile::tempdir().unwrap();
        let extractor = ClipExtractor::new(dir.path(), "mp3");
        let result = extractor
            .extract_one(Path::new("/nonexistent/audio.mp3"), 0, "hi", 0.0, 0.5)
            .await;
        // either ffmpeg is absent or it rejects the missing input; both
        // surface as ExtractionFailed carrying the word
        match result {
            Err(ExtractError::ExtractionFailed { index, word, .. }) => {
                assert_eq!(index, 0);
                assert_eq!(word, "hi");
            }
            Ok(_) => panic!("extraction from a missing source should fail"),
        }
    }
}
