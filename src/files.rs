//! Well-known directory listings and output-file primitives.

use crate::error::ShellError;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// File kinds recognized by the shell, keyed by filename extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Jadn,
    Jidl,
    Json,
    Xml,
    Xsd,
    Cbor,
    Unknown,
}

impl FileKind {
    /// Classify a filename by its extension (case-insensitive).
    pub fn from_name(name: &str) -> FileKind {
        let ext = Path::new(name)
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "jadn" => FileKind::Jadn,
            "jidl" => FileKind::Jidl,
            "json" => FileKind::Json,
            "xml" => FileKind::Xml,
            "xsd" => FileKind::Xsd,
            "cbor" => FileKind::Cbor,
            _ => FileKind::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FileKind::Jadn => "jadn",
            FileKind::Jidl => "jidl",
            FileKind::Json => "json",
            FileKind::Xml => "xml",
            FileKind::Xsd => "xsd",
            FileKind::Cbor => "cbor",
            FileKind::Unknown => "unknown",
        }
    }
}

/// Filter applied to directory listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFilter {
    /// Only files carrying the given extension (without the leading dot).
    Extension(&'static str),
    /// Every regular file.
    Any,
}

impl FileFilter {
    fn matches(&self, name: &str) -> bool {
        match self {
            FileFilter::Extension(ext) => Path::new(name)
                .extension()
                .map(|e| e.eq_ignore_ascii_case(ext))
                .unwrap_or(false),
            FileFilter::Any => true,
        }
    }
}

/// List the basenames of regular files directly inside `dir`.
///
/// The listing is sorted so the 1-based positions shown to the user are
/// deterministic within a call. Subdirectories are never descended into.
pub fn list_files(dir: &Path, filter: FileFilter) -> Result<Vec<String>, ShellError> {
    if !dir.is_dir() {
        return Err(ShellError::UserInput(format!(
            "The '{}' directory does not exist.",
            dir_label(dir)
        )));
    }

    let mut files = Vec::new();
    let walker = WalkDir::new(dir).follow_links(false).min_depth(1).max_depth(1);
    for entry in walker {
        let entry = entry.map_err(|e| {
            ShellError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                format!("Failed to list directory {:?}: {}", dir, e),
            ))
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_string();
        if filter.matches(&name) {
            files.push(name);
        }
    }

    files.sort();
    Ok(files)
}

/// Short human label for a directory: its final path component.
pub fn dir_label(dir: &Path) -> String {
    dir.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| dir.to_string_lossy().into_owned())
}

/// Render a listing with 1-based positions, in the interactive layout.
pub fn listing_lines(dir: &Path, files: &[String]) -> String {
    let mut out = format!("Files in '{}' directory:", dir_label(dir));
    for (idx, name) in files.iter().enumerate() {
        out.push_str(&format!("\n  {} - {}", idx + 1, name));
    }
    out
}

/// Swap a filename's extension, appending one when none exists.
pub fn replace_extension(name: &str, new_ext: &str) -> String {
    match name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => format!("{}.{}", stem, new_ext),
        _ => format!("{}.{}", name, new_ext),
    }
}

/// Write conversion output under the output directory, creating the
/// directory on first use. An existing file is overwritten without backup.
pub fn write_output(output_dir: &Path, filename: &str, contents: &str) -> std::io::Result<PathBuf> {
    fs::create_dir_all(output_dir)?;
    let path = output_dir.join(filename);
    fs::write(&path, contents)?;
    Ok(path)
}
