pub mod alignment;
pub mod config;
pub mod extract;
pub mod mismatch;
pub mod output;
pub mod segment;

pub use alignment::{RecognizedWord, TtsAlignment};
pub use extract::{ClipEntry, ClipExtractor, ExtractError};
pub use mismatch::{Mismatch, MismatchReport};
pub use segment::{SegmentError, WordSegment, segment};
