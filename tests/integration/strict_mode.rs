//! Integration tests for the two strictness modes: fail-fast argument
//! handling in Strict, interactive resolution in Prompt.

use jadn_cli::cli::Control;
use jadn_cli::config::SessionMode;
use jadn_cli::error::ShellError;

use crate::integration::test_utils::{args, ShellFixture, MUSIC_DATA, MUSIC_SCHEMA};

fn assert_missing_argument(result: Result<Control, ShellError>, fragment: &str) {
    match result.unwrap_err() {
        ShellError::MissingArgument { usage } => {
            assert!(usage.contains(fragment), "usage '{}' lacks '{}'", usage, fragment)
        }
        other => panic!("expected MissingArgument, got {:?}", other),
    }
}

#[test]
fn test_strict_rejects_missing_arguments_per_command() {
    let fixture = ShellFixture::new();
    fixture.write_schema("music-database.jadn", MUSIC_SCHEMA);
    fixture.write_data("music_library.json", MUSIC_DATA);
    let mut session = fixture.session(SessionMode::Strict, &[]);

    assert_missing_argument(session.dispatch("schema_v", &[]), "schema_v");
    assert_missing_argument(session.dispatch("data_v", &[]), "data_v");
    assert_missing_argument(
        session.dispatch("schema_c", &args(&["music-database.jadn"])),
        "schema_c",
    );
    assert_missing_argument(session.dispatch("schema_r", &[]), "schema_r");
    assert_missing_argument(
        session.dispatch("data_c", &args(&["music_library.json"])),
        "data_c",
    );
    assert_missing_argument(session.dispatch("schema_cb", &[]), "schema_cb");
    assert_missing_argument(session.dispatch("data_cb", &[]), "data_cb");

    // Usage mistakes are never operational failures.
    assert!(session.ledger().is_empty());
}

#[test]
fn test_strict_with_full_arguments_succeeds() {
    let fixture = ShellFixture::new();
    fixture.write_schema("music-database.jadn", MUSIC_SCHEMA);
    let mut session = fixture.session(SessionMode::Strict, &[]);

    let control = session
        .dispatch("schema_c", &args(&["music-database.jadn", "jidl"]))
        .unwrap();
    assert_eq!(control, Control::Continue);
    assert!(fixture.output_file("music-database.jidl").is_file());
}

#[test]
fn test_strict_unknown_filename_fails_fast() {
    let fixture = ShellFixture::new();
    fixture.write_schema("music-database.jadn", MUSIC_SCHEMA);
    let mut session = fixture.session(SessionMode::Strict, &[]);

    assert_missing_argument(
        session.dispatch("schema_v", &args(&["no-such.jadn"])),
        "schema_v",
    );
}

#[test]
fn test_prompt_resolves_missing_schema_interactively() {
    let fixture = ShellFixture::new();
    fixture.write_schema("music-database.jadn", MUSIC_SCHEMA);
    // First answer is invalid, second selects by position.
    let mut session = fixture.session(SessionMode::Prompt, &["99", "1"]);

    let control = session.dispatch("schema_v", &[]).unwrap();
    assert_eq!(control, Control::Continue);
    assert!(session.ledger().is_empty());
}

#[test]
fn test_prompt_resolves_missing_target_interactively() {
    let fixture = ShellFixture::new();
    fixture.write_schema("music-database.jadn", MUSIC_SCHEMA);
    // Target prompt answered by name.
    let mut session = fixture.session(SessionMode::Prompt, &["markdown"]);

    session
        .dispatch("schema_c", &args(&["music-database.jadn"]))
        .unwrap();
    assert!(fixture.output_file("music-database.md").is_file());
}

#[test]
fn test_prompt_cancellation_reaches_no_backend() {
    let fixture = ShellFixture::new();
    fixture.write_schema("music-database.jadn", MUSIC_SCHEMA);
    let mut session = fixture.session(SessionMode::Prompt, &["exit"]);

    let err = session.dispatch("schema_c", &[]).unwrap_err();
    assert!(matches!(err, ShellError::UserInput(msg) if msg == "Operation cancelled."));
    assert!(session.ledger().is_empty());
    assert!(!fixture.dirs.output.exists());
}

#[test]
fn test_prompt_retries_are_bounded() {
    let fixture = ShellFixture::new();
    fixture.write_schema("music-database.jadn", MUSIC_SCHEMA);
    let bad: Vec<String> = (0..32).map(|_| "never-valid".to_string()).collect();
    let bad_refs: Vec<&str> = bad.iter().map(String::as_str).collect();
    let mut session = fixture.session(SessionMode::Prompt, &bad_refs);

    let err = session.dispatch("schema_v", &[]).unwrap_err();
    assert!(matches!(err, ShellError::UserInput(msg) if msg.contains("Too many invalid selections")));
}
