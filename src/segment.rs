use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SegmentError {
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
}

impl SegmentError {
    fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }
}

/// A word carved out of a character-level alignment.
///
/// `start_index`/`end_index` are inclusive positions into the original
/// character sequence bounding exactly the non-space run that forms the word.
/// Times are in seconds, rounded to the nearest 0.05 s.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WordSegment {
    pub word: String,
    pub start_index: usize,
    pub end_index: usize,
    pub start_time: f64,
    pub end_time: f64,
}

/// Clip boundaries are snapped to a 1/20 s grid to stabilize them against
/// sub-frame jitter in the source alignment.
const GRID_STEPS_PER_SEC: f64 = 20.0;

fn round_to_grid(seconds: f64) -> f64 {
    (seconds * GRID_STEPS_PER_SEC).round() / GRID_STEPS_PER_SEC
}

/// Word boundary record before timing is attached.
#[derive(Debug, Clone, PartialEq)]
struct WordSpan {
    word: String,
    start_index: usize,
    end_index: usize,
}

#[derive(Default)]
struct WordScan {
    spans: Vec<WordSpan>,
    buf: String,
    tentative_start: usize,
}

impl WordScan {
    fn step(mut self, index: usize, c: char) -> Self {
        if c == ' ' {
            if self.buf.is_empty() {
                // consecutive or leading space: no word to close
                self.tentative_start = index + 1;
            } else {
                self.spans.push(WordSpan {
                    word: std::mem::take(&mut self.buf),
                    start_index: self.tentative_start,
                    end_index: index - 1,
                });
                self.tentative_start = index + 1;
            }
        } else {
            self.buf.push(c);
        }
        self
    }

    fn finish(mut self, char_count: usize) -> Vec<WordSpan> {
        if !self.buf.is_empty() {
            self.spans.push(WordSpan {
                word: self.buf,
                start_index: self.tentative_start,
                end_index: char_count - 1,
            });
        }
        self.spans
    }
}

/// Splits a character sequence into word boundary records. Only the single
/// space character delimits words; runs of spaces collapse so no empty word
/// is ever produced.
fn split_words(characters: &[char]) -> Vec<WordSpan> {
    characters
        .iter()
        .copied()
        .enumerate()
        .fold(WordScan::default(), |scan, (i, c)| scan.step(i, c))
        .finish(characters.len())
}

fn end_time_at(character_end_times: &[f64], index: usize) -> Result<f64, SegmentError> {
    character_end_times.get(index).copied().ok_or_else(|| {
        SegmentError::invalid_input(format!("no end time for character index {}", index))
    })
}

/// Infers the time window for one word from the per-character end times.
///
/// The start of a word is approximated as the midpoint of the separating
/// space before it, i.e. the average of the end times of the two characters
/// preceding its first character. A word starting at index 0 or 1 has no
/// such boundary and starts at 0. Symmetrically, the end is the midpoint of
/// the trailing space, unless the word ends within one character of the end
/// of the utterance, in which case its own last character's end time is
/// taken as-is. The 1 / len-2 thresholds match the source alignment payloads
/// and are covered by tests; do not re-derive them.
fn word_window(
    span: &WordSpan,
    char_count: usize,
    character_end_times: &[f64],
) -> Result<(f64, f64), SegmentError> {
    let start_time = if span.start_index > 1 {
        let before_space = end_time_at(character_end_times, span.start_index - 2)?;
        let space = end_time_at(character_end_times, span.start_index - 1)?;
        (before_space + space) / 2.0
    } else {
        0.0
    };

    // written as end_index + 2 < len to avoid underflow on short inputs
    let end_time = if span.end_index + 2 < char_count {
        let last_char = end_time_at(character_end_times, span.end_index)?;
        let space = end_time_at(character_end_times, span.end_index + 1)?;
        (last_char + space) / 2.0
    } else {
        end_time_at(character_end_times, span.end_index)?
    };

    Ok((round_to_grid(start_time), round_to_grid(end_time)))
}

/// Converts a character-level alignment into ordered word segments.
///
/// `characters` is the full utterance including space separators;
/// `character_end_times` holds one monotonically non-decreasing end time in
/// seconds per character. The two slices must have equal length. The
/// function is pure: no I/O, no state between calls.
pub fn segment(
    characters: &[char],
    character_end_times: &[f64],
) -> Result<Vec<WordSegment>, SegmentError> {
    if characters.len() != character_end_times.len() {
        return Err(SegmentError::invalid_input(format!(
            "characters and end times differ in length: {} vs {}",
            characters.len(),
            character_end_times.len()
        )));
    }

    split_words(characters)
        .into_iter()
        .map(|span| {
            let (start_time, end_time) = word_window(&span, characters.len(), character_end_times)?;
            log::debug!(
                "word {:?} ({}-{}) from {} to {}",
                span.word,
                span.start_index,
                span.end_index,
                start_time,
                end_time
            );
            Ok(WordSegment {
                word: span.word,
                start_index: span.start_index,
                end_index: span.end_index,
                start_time,
                end_time,
            })
        })
        .collect()
}
