//! Integration tests for the error ledger lifecycle: flush, read, clear.

use jadn_cli::cli::Control;
use jadn_cli::config::SessionMode;
use jadn_cli::ledger::ErrorLedger;
use std::fs;

use crate::integration::test_utils::{args, ShellFixture};

#[test]
fn test_gen_err_report_appends_cumulatively() {
    // flush re-emits the whole in-memory ledger each time; the artifact
    // grows cumulatively within one session.
    let fixture = ShellFixture::new();
    fixture.write_schema("broken.jadn", "{ not json");
    let mut session = fixture.session(SessionMode::Prompt, &[]);

    session.dispatch("schema_v", &args(&["broken.jadn"])).unwrap();
    session.dispatch("schema_v", &args(&["broken.jadn"])).unwrap();
    assert_eq!(session.ledger().len(), 2);

    session.dispatch("gen_err_report", &[]).unwrap();
    session.dispatch("gen_err_report", &[]).unwrap();

    let report = fixture
        .dirs
        .output
        .join(ErrorLedger::report_filename_today());
    let contents = fs::read_to_string(&report).unwrap();
    assert_eq!(contents.lines().count(), 4);
    // No header row; every line is a record.
    assert!(!contents.to_lowercase().starts_with("timestamp"));
    // The in-memory ledger is untouched by flushing.
    assert_eq!(session.ledger().len(), 2);
}

#[test]
fn test_gen_err_report_with_empty_ledger_is_a_no_op() {
    let fixture = ShellFixture::new();
    let mut session = fixture.session(SessionMode::Prompt, &[]);

    assert_eq!(
        session.dispatch("gen_err_report", &[]).unwrap(),
        Control::Continue
    );
    assert!(!fixture.dirs.output.exists());
}

#[test]
fn test_read_err_report_finds_latest_artifact() {
    let fixture = ShellFixture::new();
    fixture.write_schema("broken.jadn", "{ not json");
    let mut session = fixture.session(SessionMode::Prompt, &[]);

    session.dispatch("schema_v", &args(&["broken.jadn"])).unwrap();
    session.dispatch("gen_err_report", &[]).unwrap();

    assert_eq!(
        session.dispatch("read_err_report", &[]).unwrap(),
        Control::Continue
    );
}

#[test]
fn test_read_err_report_without_artifacts() {
    let fixture = ShellFixture::new();
    let mut session = fixture.session(SessionMode::Prompt, &[]);
    assert_eq!(
        session.dispatch("read_err_report", &[]).unwrap(),
        Control::Continue
    );
}

#[test]
fn test_clear_err_report_keeps_artifacts_on_disk() {
    let fixture = ShellFixture::new();
    fixture.write_schema("broken.jadn", "{ not json");
    fs::write(&fixture.log_file, "old diagnostic lines\n").unwrap();
    let mut session = fixture.session(SessionMode::Prompt, &[]);

    session.dispatch("schema_v", &args(&["broken.jadn"])).unwrap();
    session.dispatch("gen_err_report", &[]).unwrap();
    session.dispatch("clear_err_report", &[]).unwrap();

    assert!(session.ledger().is_empty());
    // The per-session diagnostic log is truncated.
    assert_eq!(fs::read_to_string(&fixture.log_file).unwrap(), "");
    // Already-written report artifacts stay.
    let report = fixture
        .dirs
        .output
        .join(ErrorLedger::report_filename_today());
    assert!(report.is_file());
    assert_eq!(fs::read_to_string(&report).unwrap().lines().count(), 1);
}
