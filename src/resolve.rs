//! Selection-token resolution for files and option sets.
//!
//! Every raw user token is classified into exactly one of three shapes
//! before any lookup happens: the cancel sentinel, a 1-based listing
//! position, or a literal name. Lookup then yields a three-way outcome the
//! router acts on.

use crate::config::SessionMode;
use crate::error::ShellError;
use crate::files::{self, FileFilter};
use dialoguer::Input;
use std::path::Path;

/// Upper bound on consecutive invalid selections before a prompt loop
/// gives up and treats the operation as cancelled.
pub const MAX_ATTEMPTS: usize = 10;

const FILE_PROMPT: &str = "Enter the file number or filename (or type 'exit' to cancel)";
const OPTION_PROMPT: &str = "Enter an option number or name (or type 'exit' to cancel)";
pub const CANCELLED: &str = "Operation cancelled.";
const INVALID_FILE: &str =
    "Invalid selection. Please enter a valid number, filename, or 'exit' to cancel.";
const INVALID_OPTION: &str =
    "Invalid selection. Please enter a valid number, option name, or 'exit' to cancel.";

/// A raw user token, classified before any lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// The case-insensitive `exit` sentinel.
    Cancel,
    /// An all-digits token: a 1-based position in the current listing.
    Index(usize),
    /// Anything else: a literal name.
    Name(String),
}

impl Token {
    pub fn classify(raw: &str) -> Token {
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case("exit") {
            return Token::Cancel;
        }
        if !trimmed.is_empty() && trimmed.bytes().all(|b| b.is_ascii_digit()) {
            // Digit strings too large for usize stay numeric and resolve
            // out of range rather than falling back to a literal match.
            return Token::Index(trimmed.parse().unwrap_or(usize::MAX));
        }
        Token::Name(trimmed.to_string())
    }
}

/// Outcome of resolving one token against one candidate listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Resolved(String),
    Cancelled,
    NotFound,
}

/// Resolve a token against an ordered candidate listing. Indices address
/// positions in the given order; names must match a candidate exactly.
pub fn resolve_token<S: AsRef<str>>(raw: &str, candidates: &[S]) -> Resolution {
    match Token::classify(raw) {
        Token::Cancel => Resolution::Cancelled,
        Token::Index(position) => {
            if position >= 1 && position <= candidates.len() {
                Resolution::Resolved(candidates[position - 1].as_ref().to_string())
            } else {
                Resolution::NotFound
            }
        }
        Token::Name(name) => {
            if candidates.iter().any(|c| c.as_ref() == name) {
                Resolution::Resolved(name)
            } else {
                Resolution::NotFound
            }
        }
    }
}

/// Input seam for interactive prompts. The shell reads stdin through
/// `dialoguer`; unit tests inject scripted responses.
pub trait Prompter {
    fn read_token(&mut self, prompt: &str) -> Result<String, ShellError>;
}

/// `dialoguer`-backed prompter used by the interactive shell.
#[derive(Debug, Default)]
pub struct StdinPrompter;

impl Prompter for StdinPrompter {
    fn read_token(&mut self, prompt: &str) -> Result<String, ShellError> {
        let value: String = Input::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .map_err(|e| {
                ShellError::Io(std::io::Error::new(
                    std::io::ErrorKind::Other,
                    e.to_string(),
                ))
            })?;
        Ok(value)
    }
}

/// Scripted prompter for unit tests: answers in order, then cancels.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    responses: std::collections::VecDeque<String>,
}

#[cfg(test)]
impl ScriptedPrompter {
    pub fn new<I: IntoIterator<Item = S>, S: Into<String>>(responses: I) -> Self {
        Self {
            responses: responses.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
impl Prompter for ScriptedPrompter {
    fn read_token(&mut self, _prompt: &str) -> Result<String, ShellError> {
        Ok(self
            .responses
            .pop_front()
            .unwrap_or_else(|| "exit".to_string()))
    }
}

/// Resolve a file argument for an operation.
///
/// With a token present the lookup happens exactly once against a fresh
/// listing. Without one, Prompt mode lists candidates and prompts with a
/// bounded retry loop; Strict mode raises `MissingArgument` carrying the
/// command usage, with no prompting.
pub fn resolve_file(
    token: Option<&str>,
    dir: &Path,
    filter: FileFilter,
    mode: SessionMode,
    prompter: &mut dyn Prompter,
    usage: &str,
) -> Result<String, ShellError> {
    let candidates = files::list_files(dir, filter)?;

    if let Some(raw) = token {
        return match resolve_token(raw, &candidates) {
            Resolution::Resolved(name) => Ok(name),
            Resolution::Cancelled => Err(ShellError::UserInput(CANCELLED.to_string())),
            Resolution::NotFound => {
                println!(
                    "File '{}' not found in the '{}' directory.",
                    raw,
                    files::dir_label(dir)
                );
                match mode {
                    SessionMode::Strict => Err(ShellError::MissingArgument {
                        usage: usage.to_string(),
                    }),
                    SessionMode::Prompt => prompt_for_file(dir, &candidates, prompter),
                }
            }
        };
    }

    match mode {
        SessionMode::Strict => Err(ShellError::MissingArgument {
            usage: usage.to_string(),
        }),
        SessionMode::Prompt => prompt_for_file(dir, &candidates, prompter),
    }
}

/// Resolve an option argument against a closed, ordered option set.
pub fn resolve_option(
    token: Option<&str>,
    options: &[&str],
    mode: SessionMode,
    prompter: &mut dyn Prompter,
    usage: &str,
) -> Result<String, ShellError> {
    if let Some(raw) = token {
        return match resolve_token(raw, options) {
            Resolution::Resolved(name) => Ok(name),
            Resolution::Cancelled => Err(ShellError::UserInput(CANCELLED.to_string())),
            Resolution::NotFound => {
                println!("Option '{}' is not valid.", raw);
                match mode {
                    SessionMode::Strict => Err(ShellError::MissingArgument {
                        usage: usage.to_string(),
                    }),
                    SessionMode::Prompt => prompt_for_option(options, prompter),
                }
            }
        };
    }

    match mode {
        SessionMode::Strict => Err(ShellError::MissingArgument {
            usage: usage.to_string(),
        }),
        SessionMode::Prompt => prompt_for_option(options, prompter),
    }
}

fn prompt_for_file(
    dir: &Path,
    candidates: &[String],
    prompter: &mut dyn Prompter,
) -> Result<String, ShellError> {
    if candidates.is_empty() {
        return Err(ShellError::UserInput(format!(
            "No files found in the '{}' directory.",
            files::dir_label(dir)
        )));
    }

    println!("{}", files::listing_lines(dir, candidates));
    for _ in 0..MAX_ATTEMPTS {
        let raw = prompter.read_token(FILE_PROMPT)?;
        match resolve_token(&raw, candidates) {
            Resolution::Resolved(name) => return Ok(name),
            Resolution::Cancelled => return Err(ShellError::UserInput(CANCELLED.to_string())),
            Resolution::NotFound => println!("{}", INVALID_FILE),
        }
    }
    Err(ShellError::UserInput(
        "Too many invalid selections. Operation cancelled.".to_string(),
    ))
}

fn prompt_for_option(options: &[&str], prompter: &mut dyn Prompter) -> Result<String, ShellError> {
    println!("Choose an option:");
    for (idx, option) in options.iter().enumerate() {
        println!("  {} - {}", idx + 1, option);
    }
    for _ in 0..MAX_ATTEMPTS {
        let raw = prompter.read_token(OPTION_PROMPT)?;
        match resolve_token(&raw, options) {
            Resolution::Resolved(name) => return Ok(name),
            Resolution::Cancelled => return Err(ShellError::UserInput(CANCELLED.to_string())),
            Resolution::NotFound => println!("{}", INVALID_OPTION),
        }
    }
    Err(ShellError::UserInput(
        "Too many invalid selections. Operation cancelled.".to_string(),
    ))
}
