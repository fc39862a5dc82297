// One-result-per-screen navigation

use crate::common::search_results;
use crate::common::{MemoryConsole, ScriptedKeys};
use repochat::display::{display_results_one_by_one, Key, ResultFields};

#[test]
fn test_space_walks_results_then_quit() {
    let mut console = MemoryConsole::new(24);
    let mut keys = ScriptedKeys::new([Key::Char(' '), Key::Char(' '), Key::Char('q')]);
    let results = search_results(5);

    display_results_one_by_one(&results, &ResultFields::default(), &mut console, &mut keys).unwrap();

    assert!(console.printed("Result 1/5: docs/answer-1.md"));
    assert!(console.printed("Result 3/5: docs/answer-3.md"));
    assert!(!console.printed("Result 4/5"));
    // Three screens plus the clear on exit
    assert_eq!(console.clears, 4);
    assert!(!keys.raw);
}

#[test]
fn test_space_on_last_result_quits() {
    let mut console = MemoryConsole::new(24);
    let mut keys = ScriptedKeys::new([Key::Char(' '), Key::Char(' '), Key::Char(' ')]);
    let results = search_results(2);

    display_results_one_by_one(&results, &ResultFields::default(), &mut console, &mut keys).unwrap();

    assert!(console.printed("End of results"));
    assert_eq!(keys.remaining(), 1);
}

#[test]
fn test_read_error_clears_screen() {
    let mut console = MemoryConsole::new(24);
    let mut keys = ScriptedKeys::failing([Key::Char(' ')]);
    let results = search_results(3);

    let err = display_results_one_by_one(&results, &ResultFields::default(), &mut console, &mut keys)
        .unwrap_err();

    assert_eq!(err.to_string(), "terminal went away");
    assert!(console.printed("Result 2/3"));
    assert!(!keys.raw);
    assert!(console.screen.is_empty());
}

#[test]
fn test_other_keys_keep_current_result() {
    let mut console = MemoryConsole::new(24);
    let mut keys = ScriptedKeys::new([Key::Down, Key::Enter, Key::Char('j'), Key::Char('q')]);
    let results = search_results(2);

    display_results_one_by_one(&results, &ResultFields::default(), &mut console, &mut keys).unwrap();

    assert_eq!(console.clears, 2);
    assert!(!console.printed("Result 2/2"));
}

#[test]
fn test_fallback_lists_every_result() {
    let mut console = MemoryConsole::new(24);
    let mut keys = ScriptedKeys::unavailable();
    let results = search_results(3);

    display_results_one_by_one(&results, &ResultFields::default(), &mut console, &mut keys).unwrap();

    assert!(console.printed("Showing all content at once:"));
    for i in 1..=3 {
        assert!(console.printed(&format!("Result {i}/3: docs/answer-{i}.md")));
    }
    assert_eq!(console.clears, 0);
}

#[test]
fn test_custom_title_field() {
    let mut console = MemoryConsole::new(24);
    let mut keys = ScriptedKeys::new([Key::Char('q')]);
    let results = search_results(1);

    display_results_one_by_one(&results, &ResultFields::new("content", "missing"), &mut console, &mut keys)
        .unwrap();

    assert!(console.printed("Result 1/1: Unknown"));
}
