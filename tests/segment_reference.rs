//! End-to-end segmentation check against a real synthesis alignment payload.

use wordclip::TtsAlignment;

const DEMOCRACY_ALIGNMENT: &str = include_str!("data/democracy_alignment.json");

fn democracy_alignment() -> TtsAlignment {
    serde_json::from_str(DEMOCRACY_ALIGNMENT).expect("reference payload should parse")
}

#[test]
fn payload_shape_is_consistent() {
    let alignment = democracy_alignment();
    assert_eq!(alignment.characters.len(), 138);
    assert_eq!(
        alignment.characters.len(),
        alignment.character_end_times_seconds.len()
    );
    assert_eq!(
        alignment.characters.len(),
        alignment.character_start_times_seconds.len()
    );
}

#[test]
fn segments_full_sentence() {
    let alignment = democracy_alignment();
    let segments = alignment.segments().expect("reference payload segments");

    assert_eq!(segments.len(), 23);

    let text = segments
        .iter()
        .map(|s| s.word.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    assert_eq!(
        text,
        "A democracy is a system of government where citizens vote to elect \
         representatives who will make decisions and create laws on their behalf"
    );
}

#[test]
fn first_word_window() {
    let segments = democracy_alignment().segments().unwrap();
    let first = &segments[0];
    assert_eq!(first.word, "A");
    assert_eq!((first.start_index, first.end_index), (0, 0));
    assert_eq!(first.start_time, 0.0);
    // midpoint of 0.093 and 0.151 is 0.122, snapped to 0.1
    assert!((first.end_time - 0.1).abs() < 1e-9);
}

#[test]
fn interior_word_windows() {
    let segments = democracy_alignment().segments().unwrap();

    let democracy = &segments[1];
    assert_eq!(democracy.word, "democracy");
    assert_eq!((democracy.start_index, democracy.end_index), (2, 10));
    assert!((democracy.start_time - 0.1).abs() < 1e-9);
    assert!((democracy.end_time - 0.8).abs() < 1e-9);

    let representatives = &segments[12];
    assert_eq!(representatives.word, "representatives");
    assert!((representatives.start_time - 3.7).abs() < 1e-9);
    assert!((representatives.end_time - 4.65).abs() < 1e-9);
}

#[test]
fn last_word_takes_own_end_time() {
    let alignment = democracy_alignment();
    let segments = alignment.segments().unwrap();
    let last = segments.last().unwrap();

    assert_eq!(last.word, "behalf");
    assert_eq!(last.end_index, alignment.characters.len() - 1);

    // the last word has no trailing boundary: its end is its own last
    // character's end time rounded to the 0.05 grid, never an average
    let raw_end = *alignment.character_end_times_seconds.last().unwrap();
    let expected = (raw_end * 20.0).round() / 20.0;
    assert!((last.end_time - expected).abs() < 1e-9);
    assert!((last.end_time - 7.8).abs() < 1e-9);
}

#[test]
fn windows_are_ordered_and_non_overlapping() {
    let segments = democracy_alignment().segments().unwrap();
    for pair in segments.windows(2) {
        assert!(pair[0].end_index < pair[1].start_index);
        assert!(pair[0].start_time <= pair[1].start_time);
    }
    for s in &segments {
        assert!(s.start_time <= s.end_time);
    }
}
