// Pager behavior under scripted keystrokes

use crate::common::{numbered_lines, search_results};
use repochat::core::config::DisplayMode;
use crate::common::{MemoryConsole, ScriptedKeys};
use repochat::display::{display_results, Key, Pager, ResultFields};

#[test]
fn test_pages_to_the_clamped_bottom() {
    // 13 rows leave 10 for content
    let mut console = MemoryConsole::new(13);
    let mut keys = ScriptedKeys::new([Key::Char(' '), Key::Char(' '), Key::Char(' '), Key::Char('q')]);

    let pager = Pager::for_console(numbered_lines(25), &console);
    assert_eq!(pager.terminal_height(), 10);
    pager.run(&mut console, &mut keys).unwrap();

    // Initial page, two moves, the third space is already at the bottom
    assert_eq!(console.clears, 4);
    assert!(console.printed("(10/25)"));
    assert!(console.printed("(20/25)"));
    assert!(console.printed("(25/25)"));
    assert_eq!(keys.remaining(), 0);
}

#[test]
fn test_line_scrolling_stops_at_bottom() {
    let mut pager = Pager::new(numbered_lines(25), 10);

    for _ in 0..30 {
        pager.handle_key(Key::Enter);
    }
    assert_eq!(pager.current_line(), 15);
    assert_eq!(pager.end_line(), 25);

    for _ in 0..3 {
        pager.handle_key(Key::Up);
    }
    assert_eq!(pager.current_line(), 12);

    pager.handle_key(Key::PageUp);
    pager.handle_key(Key::PageUp);
    assert_eq!(pager.current_line(), 0);
}

#[test]
fn test_unchanged_view_is_not_redrawn() {
    let mut console = MemoryConsole::new(20);
    let mut keys = ScriptedKeys::new([
        Key::Char('j'),
        Key::Down,
        Key::Char(' '),
        Key::Char('x'),
        Key::Char('q'),
    ]);

    // Everything fits on one page
    Pager::for_console(numbered_lines(5), &console)
        .run(&mut console, &mut keys)
        .unwrap();

    // Initial draw plus the clear on exit
    assert_eq!(console.clears, 2);
    assert_eq!(console.transcript.iter().filter(|l| *l == "line 1").count(), 1);
}

#[test]
fn test_fallback_prints_everything_once() {
    let mut console = MemoryConsole::new(13);
    let mut keys = ScriptedKeys::unavailable();

    Pager::for_console(numbered_lines(25), &console)
        .run(&mut console, &mut keys)
        .unwrap();

    assert!(console.transcript[0].contains("Arrow key navigation not available"));
    assert_eq!(console.transcript[1], "Showing all content at once:");
    assert_eq!(console.transcript[2], "");
    assert_eq!(&console.transcript[3..], numbered_lines(25).as_slice());
    assert_eq!(console.clears, 0);
    assert_eq!(keys.reads, 0);
}

#[test]
fn test_raw_mode_restored_after_interrupt() {
    let mut console = MemoryConsole::new(13);
    let mut keys = ScriptedKeys::new([Key::Down, Key::Interrupt, Key::Down]);

    Pager::for_console(numbered_lines(40), &console)
        .run(&mut console, &mut keys)
        .unwrap();

    assert_eq!(keys.raw_entries, 1);
    assert!(!keys.raw);
    assert_eq!(keys.remaining(), 1);
}

#[test]
fn test_exhausted_input_quits() {
    let mut console = MemoryConsole::new(13);
    let mut keys = ScriptedKeys::new([Key::Char(' ')]);

    Pager::for_console(numbered_lines(40), &console)
        .run(&mut console, &mut keys)
        .unwrap();

    assert!(!keys.raw);
    assert!(console.screen.is_empty());
}

#[test]
fn test_read_error_clears_screen() {
    let mut console = MemoryConsole::new(13);
    let mut keys = ScriptedKeys::failing([Key::Char(' ')]);

    let err = Pager::for_console(numbered_lines(40), &console)
        .run(&mut console, &mut keys)
        .unwrap_err();

    assert_eq!(err.to_string(), "terminal went away");
    assert!(!keys.raw);
    assert!(console.screen.is_empty());
    assert_eq!(console.clears, 3);
}

#[test]
fn test_results_in_pager() {
    let mut console = MemoryConsole::new(60);
    let mut keys = ScriptedKeys::new([Key::Char('q')]);
    let results = search_results(3);

    display_results(
        DisplayMode::Pager,
        &results,
        "docker",
        &ResultFields::default(),
        &mut console,
        &mut keys,
    )
    .unwrap();

    assert_eq!(console.transcript[0], "Found 3 results for: docker");
    assert!(console.printed("1. docs/answer-1.md"));
    assert!(console.printed("3. docs/answer-3.md"));
    assert!(console.printed("## Answer 2"));
}

#[test]
fn test_no_results_skips_keyboard() {
    for mode in [DisplayMode::Pager, DisplayMode::Navigator] {
        let mut console = MemoryConsole::new(24);
        let mut keys = ScriptedKeys::new([Key::Char('q')]);

        display_results(mode, &[], "nothing", &ResultFields::default(), &mut console, &mut keys).unwrap();

        assert!(console.printed("No results found!"));
        assert_eq!(keys.raw_entries, 0);
        assert_eq!(keys.remaining(), 1);
    }
}
