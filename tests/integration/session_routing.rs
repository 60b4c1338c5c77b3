//! Integration tests for command routing: table lookup, unknown commands,
//! line splitting, and the teardown hook.

use jadn_cli::cli::{Control, Session, COMMANDS};
use jadn_cli::config::SessionMode;
use jadn_cli::error::ShellError;
use jadn_cli::ledger::ErrorLedger;
use std::fs;

use crate::integration::test_utils::{args, ShellFixture, MUSIC_SCHEMA};

#[test]
fn test_every_table_command_dispatches() {
    // Commands that take no arguments run as-is; the rest are covered by
    // their own scenarios. Resolution-free commands must never error.
    let fixture = ShellFixture::new();
    let mut session = fixture.session(SessionMode::Prompt, &[]);
    for name in ["help", "?", "version", "ls_schemas", "gen_err_report", "read_err_report"] {
        assert!(
            COMMANDS.iter().any(|spec| spec.name == name),
            "missing table entry for {}",
            name
        );
        let control = session.dispatch(name, &[]).unwrap();
        assert_eq!(control, Control::Continue, "{} should continue", name);
    }
}

#[test]
fn test_unknown_command_is_not_ledgered() {
    let fixture = ShellFixture::new();
    let mut session = fixture.session(SessionMode::Prompt, &[]);

    let err = session.dispatch("frobnicate", &args(&["x"])).unwrap_err();
    match err {
        ShellError::UserInput(msg) => assert_eq!(msg, "*** Unknown syntax: frobnicate x"),
        other => panic!("expected UserInput, got {:?}", other),
    }
    assert!(session.ledger().is_empty());
}

#[test]
fn test_run_line_splits_whitespace() {
    let fixture = ShellFixture::new();
    fixture.write_schema("music-database.jadn", MUSIC_SCHEMA);
    let mut session = fixture.session(SessionMode::Prompt, &[]);

    let control = session.run_line("  schema_v   music-database.jadn \n").unwrap();
    assert_eq!(control, Control::Continue);
    assert!(session.ledger().is_empty());
}

#[test]
fn test_exit_command_requests_loop_exit() {
    let fixture = ShellFixture::new();
    let mut session = fixture.session(SessionMode::Prompt, &[]);
    assert_eq!(session.run_line("exit").unwrap(), Control::Exit);
}

#[test]
fn test_teardown_flushes_ledger_exactly_once() {
    let fixture = ShellFixture::new();
    fixture.write_schema("broken.jadn", "{ not json");
    let mut session = fixture.session(SessionMode::Prompt, &[]);

    session.dispatch("schema_v", &args(&["broken.jadn"])).unwrap();
    assert_eq!(session.ledger().len(), 1);

    session.shutdown();
    session.shutdown();

    let report = fixture
        .dirs
        .output
        .join(ErrorLedger::report_filename_today());
    let contents = fs::read_to_string(report).unwrap();
    assert_eq!(contents.lines().count(), 1);
}

#[test]
fn test_teardown_with_clean_session_writes_nothing() {
    let fixture = ShellFixture::new();
    let mut session = fixture.session(SessionMode::Prompt, &[]);
    session.shutdown();
    assert!(!fixture.dirs.output.exists());
}
