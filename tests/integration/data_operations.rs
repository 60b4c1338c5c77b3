//! Integration tests for data validation and data re-encoding through the
//! command router.

use jadn_cli::config::SessionMode;
use std::fs;

use crate::integration::test_utils::{args, ShellFixture, MUSIC_DATA, MUSIC_SCHEMA};

#[test]
fn test_data_v_valid_scenario() {
    let fixture = ShellFixture::new();
    fixture.write_schema("music-database.jadn", MUSIC_SCHEMA);
    fixture.write_data("music_library.json", MUSIC_DATA);
    let mut session = fixture.session(SessionMode::Prompt, &[]);

    session
        .dispatch(
            "data_v",
            &args(&["music-database.jadn", "music_library.json"]),
        )
        .unwrap();
    assert!(session.ledger().is_empty());
}

#[test]
fn test_data_v_schema_gate_records_schema_failure() {
    // The schema must validate before data validation runs; the recorded
    // failure is the schema's, not a misleading data error.
    let fixture = ShellFixture::new();
    fixture.write_schema("broken.jadn", "{ not json");
    fixture.write_data("music_library.json", MUSIC_DATA);
    let mut session = fixture.session(SessionMode::Prompt, &[]);

    session
        .dispatch("data_v", &args(&["broken.jadn", "music_library.json"]))
        .unwrap();
    assert_eq!(session.ledger().len(), 1);
    assert_eq!(session.ledger().records()[0].error_type, "SchemaInvalid");
}

#[test]
fn test_data_v_invalid_data_records_data_failure() {
    let fixture = ShellFixture::new();
    fixture.write_schema("music-database.jadn", MUSIC_SCHEMA);
    fixture.write_data("incomplete.json", r#"{"albums": []}"#);
    let mut session = fixture.session(SessionMode::Prompt, &[]);

    session
        .dispatch("data_v", &args(&["music-database.jadn", "incomplete.json"]))
        .unwrap();
    assert_eq!(session.ledger().len(), 1);
    assert_eq!(session.ledger().records()[0].error_type, "DataInvalid");
}

#[test]
fn test_data_c_concise_and_verbose() {
    let fixture = ShellFixture::new();
    fixture.write_data("music_library.json", MUSIC_DATA);
    let mut session = fixture.session(SessionMode::Prompt, &[]);

    session
        .dispatch("data_c", &args(&["music_library.json", "concise"]))
        .unwrap();
    let concise = fs::read_to_string(fixture.output_file("music_library.json")).unwrap();
    assert!(!concise.contains('\n'));

    session
        .dispatch("data_c", &args(&["music_library.json", "verbose"]))
        .unwrap();
    let verbose = fs::read_to_string(fixture.output_file("music_library.json")).unwrap();
    assert!(verbose.lines().count() > 1);
    assert!(session.ledger().is_empty());
}

#[test]
fn test_data_c_malformed_json_is_ledgered() {
    let fixture = ShellFixture::new();
    fixture.write_data("garbage.json", "{ nope");
    let mut session = fixture.session(SessionMode::Prompt, &[]);

    session
        .dispatch("data_c", &args(&["garbage.json", "concise"]))
        .unwrap();
    assert_eq!(session.ledger().len(), 1);
    assert_eq!(session.ledger().records()[0].error_type, "DataInvalid");
    assert!(!fixture.output_file("garbage.json").exists());
}
