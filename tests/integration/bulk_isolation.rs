//! Integration tests for bulk runs: every matching file is attempted and
//! per-file failures are isolated.

use jadn_cli::config::SessionMode;

use crate::integration::test_utils::{args, ShellFixture, MUSIC_DATA, MUSIC_SCHEMA};

#[test]
fn test_schema_vb_ledger_grows_by_failing_count() {
    let fixture = ShellFixture::new();
    fixture.write_schema("a-valid.jadn", MUSIC_SCHEMA);
    fixture.write_schema("b-broken.jadn", "{ not json");
    fixture.write_schema("c-valid.jadn", MUSIC_SCHEMA);
    fixture.write_schema("d-broken.jadn", "[1, 2");
    fixture.write_schema("notes.txt", "not a schema at all");
    let mut session = fixture.session(SessionMode::Prompt, &[]);

    session.dispatch("schema_vb", &[]).unwrap();

    // Four .jadn files attempted, exactly the two malformed ones recorded.
    assert_eq!(session.ledger().len(), 2);
    for record in session.ledger().records() {
        assert_eq!(record.error_type, "SchemaInvalid");
    }
}

#[test]
fn test_schema_cb_converts_survivors_despite_failures() {
    let fixture = ShellFixture::new();
    fixture.write_schema("a-valid.jadn", MUSIC_SCHEMA);
    fixture.write_schema("b-broken.jadn", "{ not json");
    fixture.write_schema("c-valid.jadn", MUSIC_SCHEMA);
    let mut session = fixture.session(SessionMode::Prompt, &[]);

    session.dispatch("schema_cb", &args(&["markdown"])).unwrap();

    assert_eq!(session.ledger().len(), 1);
    assert!(fixture.output_file("a-valid.md").is_file());
    assert!(fixture.output_file("c-valid.md").is_file());
    assert!(!fixture.output_file("b-broken.md").exists());
}

#[test]
fn test_data_cb_re_encodes_every_json_file() {
    let fixture = ShellFixture::new();
    fixture.write_data("one.json", MUSIC_DATA);
    fixture.write_data("two.json", r#"{"name": "Other", "albums": []}"#);
    fixture.write_data("bad.json", "{ nope");
    let mut session = fixture.session(SessionMode::Prompt, &[]);

    session.dispatch("data_cb", &args(&["concise"])).unwrap();

    assert_eq!(session.ledger().len(), 1);
    assert!(fixture.output_file("one.json").is_file());
    assert!(fixture.output_file("two.json").is_file());
    assert!(!fixture.output_file("bad.json").exists());
}

#[test]
fn test_bulk_with_no_matching_files_is_clean() {
    let fixture = ShellFixture::new();
    let mut session = fixture.session(SessionMode::Prompt, &[]);

    session.dispatch("schema_vb", &[]).unwrap();
    assert!(session.ledger().is_empty());
}
