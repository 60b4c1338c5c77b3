//! Integration tests for schema validation, conversion, and reverse
//! translation through the command router.

use jadn_cli::backend::{Schema, SchemaTarget};
use jadn_cli::config::SessionMode;
use std::fs;

use crate::integration::test_utils::{args, ShellFixture, MUSIC_SCHEMA};

#[test]
fn test_schema_v_valid_scenario() {
    let fixture = ShellFixture::new();
    fixture.write_schema("music-database.jadn", MUSIC_SCHEMA);
    let mut session = fixture.session(SessionMode::Prompt, &[]);

    session
        .dispatch("schema_v", &args(&["music-database.jadn"]))
        .unwrap();
    assert!(session.ledger().is_empty());
}

#[test]
fn test_schema_v_invalid_scenario() {
    let fixture = ShellFixture::new();
    fixture.write_schema("invalid-music-database.jadn", "{ not json");
    let mut session = fixture.session(SessionMode::Prompt, &[]);

    session
        .dispatch("schema_v", &args(&["invalid-music-database.jadn"]))
        .unwrap();
    assert_eq!(session.ledger().len(), 1);
    assert_eq!(session.ledger().records()[0].error_type, "SchemaInvalid");
}

#[test]
fn test_schema_c_every_target_writes_one_file() {
    let fixture = ShellFixture::new();
    fixture.write_schema("music-database.jadn", MUSIC_SCHEMA);
    let mut session = fixture.session(SessionMode::Prompt, &[]);

    for target in SchemaTarget::ALL {
        session
            .dispatch(
                "schema_c",
                &args(&["music-database.jadn", target.as_str()]),
            )
            .unwrap();
        let expected = format!("music-database.{}", target.extension());
        let path = fixture.output_file(&expected);
        assert!(path.is_file(), "missing output {}", expected);
        let contents = fs::read_to_string(&path).unwrap();
        assert!(!contents.trim().is_empty(), "{} is empty", expected);
    }
    assert!(session.ledger().is_empty());
}

#[test]
fn test_schema_c_overwrites_existing_output() {
    let fixture = ShellFixture::new();
    fixture.write_schema("music-database.jadn", MUSIC_SCHEMA);
    fs::create_dir_all(&fixture.dirs.output).unwrap();
    fs::write(fixture.output_file("music-database.jidl"), "stale").unwrap();
    let mut session = fixture.session(SessionMode::Prompt, &[]);

    session
        .dispatch("schema_c", &args(&["music-database.jadn", "jidl"]))
        .unwrap();
    let contents = fs::read_to_string(fixture.output_file("music-database.jidl")).unwrap();
    assert_ne!(contents, "stale");
}

#[test]
fn test_schema_c_failure_leaves_no_partial_output() {
    let fixture = ShellFixture::new();
    fixture.write_schema("invalid.jadn", "{ not json");
    let mut session = fixture.session(SessionMode::Prompt, &[]);

    session
        .dispatch("schema_c", &args(&["invalid.jadn", "json-schema"]))
        .unwrap();
    assert_eq!(session.ledger().len(), 1);
    assert!(!fixture.output_file("invalid.json").exists());
}

#[test]
fn test_convert_then_reverse_translate_preserves_type_names() {
    let fixture = ShellFixture::new();
    fixture.write_schema("music-database.jadn", MUSIC_SCHEMA);
    let mut session = fixture.session(SessionMode::Prompt, &[]);

    session
        .dispatch("schema_c", &args(&["music-database.jadn", "json-schema"]))
        .unwrap();
    let converted = fs::read_to_string(fixture.output_file("music-database.json")).unwrap();

    fixture.write_schema("music-database.json", &converted);
    session
        .dispatch("schema_r", &args(&["music-database.json"]))
        .unwrap();
    assert!(session.ledger().is_empty());

    let translated = fs::read_to_string(fixture.output_file("music-database.jadn")).unwrap();
    let schema = Schema::parse(&translated).unwrap();
    for name in ["Library", "Album", "Artist", "Track", "Genre", "Barcode"] {
        assert!(schema.get(name).is_some(), "type {} lost in round trip", name);
    }
}

#[test]
fn test_schema_r_unsupported_kind_is_ledgered() {
    let fixture = ShellFixture::new();
    fixture.write_schema("legacy.xsd", "<xs:schema/>");
    let mut session = fixture.session(SessionMode::Prompt, &[]);

    session.dispatch("schema_r", &args(&["legacy.xsd"])).unwrap();
    assert_eq!(session.ledger().len(), 1);
    assert_eq!(session.ledger().records()[0].error_type, "Unsupported");
}
