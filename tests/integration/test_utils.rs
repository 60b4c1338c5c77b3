//! Shared test utilities for integration tests
//!
//! Provides a workspace fixture with the three well-known directories, a
//! scripted prompter standing in for stdin, and the music-library sample
//! schema and data the scenarios revolve around.

use jadn_cli::backend::JadnEngine;
use jadn_cli::cli::Session;
use jadn_cli::config::{Dirs, SessionMode};
use jadn_cli::error::ShellError;
use jadn_cli::resolve::Prompter;
use std::collections::VecDeque;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Well-formed music-library schema used across scenarios.
pub const MUSIC_SCHEMA: &str = r##"{
  "info": {
    "package": "http://fake-audio.org/music-lib",
    "version": "1.0",
    "title": "Music Library",
    "exports": ["Library"]
  },
  "types": [
    ["Library", "Record", [], "My music collection", [
      [1, "name", "String", [], "Collection name"],
      [2, "albums", "Album", ["[0", "]0"], "Albums in the collection"]
    ]],
    ["Album", "Record", [], "One release", [
      [1, "artist", "Artist", [], "Performer"],
      [2, "title", "String", [], "Album title"],
      [3, "genre", "Genre", [], "Primary genre"],
      [4, "barcode", "Barcode", ["[0"], "UPC-A barcode"],
      [5, "tracks", "Track", ["[0", "]0"], "Track list"]
    ]],
    ["Artist", "Record", [], "", [
      [1, "name", "String", [], "Artist name"]
    ]],
    ["Track", "Record", [], "", [
      [1, "number", "Integer", [], "Track number"],
      [2, "title", "String", [], "Track title"]
    ]],
    ["Genre", "Enumerated", [], "Primary genre", [
      [1, "rock", ""],
      [2, "jazz", ""],
      [3, "classical", ""]
    ]],
    ["Barcode", "String", ["%^\\d{12}$"], "UPC-A barcode", []]
  ]
}"##;

/// Data document consistent with [`MUSIC_SCHEMA`].
pub const MUSIC_DATA: &str = r#"{
    "name": "My Collection",
    "albums": [
        {
            "artist": {"name": "The Examples"},
            "title": "First Pressing",
            "genre": "rock",
            "tracks": [
                {"number": 1, "title": "Opening"}
            ]
        }
    ]
}"#;

/// Scripted prompter: answers in order, then cancels.
pub struct ScriptedPrompter {
    responses: VecDeque<String>,
}

impl ScriptedPrompter {
    pub fn new(responses: &[&str]) -> Self {
        Self {
            responses: responses.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn read_token(&mut self, _prompt: &str) -> Result<String, ShellError> {
        Ok(self
            .responses
            .pop_front()
            .unwrap_or_else(|| "exit".to_string()))
    }
}

/// One temporary workspace with schemas/, data/, and an output directory.
pub struct ShellFixture {
    pub workspace: TempDir,
    pub dirs: Dirs,
    pub log_file: PathBuf,
}

impl ShellFixture {
    pub fn new() -> ShellFixture {
        let workspace = TempDir::new().unwrap();
        let root = workspace.path();
        let dirs = Dirs {
            schemas: root.join("schemas"),
            data: root.join("data"),
            output: root.join("output"),
        };
        fs::create_dir_all(&dirs.schemas).unwrap();
        fs::create_dir_all(&dirs.data).unwrap();
        let log_file = root.join("jadn_cli.log");
        ShellFixture {
            workspace,
            dirs,
            log_file,
        }
    }

    /// Session over the built-in engine with a scripted prompter.
    pub fn session(&self, mode: SessionMode, prompts: &[&str]) -> Session {
        Session::with_parts(
            mode,
            self.dirs.clone(),
            Box::new(JadnEngine::new()),
            Box::new(ScriptedPrompter::new(prompts)),
            self.log_file.clone(),
        )
    }

    pub fn write_schema(&self, name: &str, contents: &str) {
        fs::write(self.dirs.schemas.join(name), contents).unwrap();
    }

    pub fn write_data(&self, name: &str, contents: &str) {
        fs::write(self.dirs.data.join(name), contents).unwrap();
    }

    pub fn output_file(&self, name: &str) -> PathBuf {
        self.dirs.output.join(name)
    }
}

/// Convert a slice of string literals into owned dispatch arguments.
pub fn args(tokens: &[&str]) -> Vec<String> {
    tokens.iter().map(|t| t.to_string()).collect()
}
