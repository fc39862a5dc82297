// Sliding-window properties over text and documents
//
// Windows are measured in characters, so multi-byte content must never
// split a character or shift offsets.

use crate::common::repeated_text;
use repochat::core::chunking::{chunk_documents, sliding_window, sliding_window_text, ChunkingParams};
use repochat::core::document::document;
use serde_json::json;

#[test]
fn test_windows_tile_the_text() {
    let text: String = ('a'..='z').cycle().take(537).collect();

    for (size, step) in [(100, 100), (100, 50), (64, 17), (537, 1), (1000, 10)] {
        let windows = sliding_window_text(&text, size, step).unwrap();

        assert_eq!(windows[0].start, 0);
        for (i, w) in windows.iter().enumerate() {
            assert_eq!(w.start, i * step, "size={size} step={step}");
            let expected: String = text.chars().skip(w.start).take(size).collect();
            assert_eq!(w.content, expected);
        }

        // With step <= size the final window reaches the end
        let last = windows.last().unwrap();
        assert_eq!(last.start + last.content.chars().count(), 537);
    }
}

#[test]
fn test_gaps_when_step_exceeds_size() {
    let text: String = "0123456789".repeat(3);
    let windows = sliding_window_text(&text, 4, 10).unwrap();

    let contents: Vec<&str> = windows.iter().map(|w| w.content.as_str()).collect();
    assert_eq!(contents, vec!["0123", "0123", "0123"]);
}

#[test]
fn test_multibyte_offsets_are_characters() {
    let text = "🦀é日本語🚀 mixed ünïcode ✅".repeat(20);
    let chars = text.chars().count();

    let windows = sliding_window_text(&text, 7, 5).unwrap();
    for w in &windows {
        let expected: String = text.chars().skip(w.start).take(7).collect();
        assert_eq!(w.content, expected);
    }
    let last = windows.last().unwrap();
    assert_eq!(last.start + last.content.chars().count(), chars);
}

#[test]
fn test_generic_sequences() {
    let numbers: Vec<u32> = (0..10).collect();
    let windows = sliding_window(numbers.as_slice(), 4, 3).unwrap();

    // A window ending exactly at the end is still followed by the tail,
    // like "world" then "ld" in "hello world" with size 5 and step 3
    let contents: Vec<Vec<u32>> = windows.into_iter().map(|w| w.content).collect();
    assert_eq!(
        contents,
        vec![vec![0, 1, 2, 3], vec![3, 4, 5, 6], vec![6, 7, 8, 9], vec![9]]
    );
}

#[test]
fn test_zero_parameters_rejected_for_any_input() {
    for text in ["", "short", "a much longer piece of text"] {
        assert!(sliding_window_text(text, 0, 1).unwrap_err().is_bad_request());
        assert!(sliding_window_text(text, 1, 0).unwrap_err().is_bad_request());
    }
}

#[test]
fn test_default_params_on_long_document() {
    let doc = document([
        ("filename", json!("notes.md")),
        ("content", json!(repeated_text("word", 1000))),
    ]);

    let chunks = chunk_documents(vec![doc], &ChunkingParams::default()).unwrap();

    let starts: Vec<u64> = chunks.iter().map(|c| c["start"].as_u64().unwrap()).collect();
    assert_eq!(starts, vec![0, 1000, 2000, 3000, 4000]);
    assert!(chunks.iter().all(|c| c["filename"] == json!("notes.md")));
    assert_eq!(chunks[4]["content"].as_str().unwrap().len(), 1000);
}

#[test]
fn test_chunks_keep_document_order_and_metadata() {
    let docs = vec![
        document([("id", json!(1)), ("content", json!("a".repeat(25)))]),
        document([("id", json!(2)), ("content", json!(""))]),
        document([("id", json!(3)), ("content", json!("b".repeat(5)))]),
    ];

    let chunks = chunk_documents(docs, &ChunkingParams::new(10, 10)).unwrap();

    let ids: Vec<i64> = chunks.iter().map(|c| c["id"].as_i64().unwrap()).collect();
    assert_eq!(ids, vec![1, 1, 1, 3]);
    assert_eq!(chunks[2]["content"], json!("aaaaa"));
}
