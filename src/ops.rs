//! Operation handlers: the boundary between the command router and the
//! backend.
//!
//! Every handler receives already-resolved filenames, makes one backend
//! call, and catches any failure right here: one ledger record, one printed
//! line, then a normal return. Failures never propagate past a handler,
//! which is what lets bulk runs attempt every file.

use crate::backend::{Backend, DataStyle, DetailLevel, Schema, SchemaTarget};
use crate::config::Dirs;
use crate::error::{BackendError, ShellError};
use crate::files::{self, FileFilter, FileKind};
use crate::ledger::{ErrorLedger, ErrorRecord};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Everything a handler needs for one invocation.
pub struct OpContext<'a> {
    pub backend: &'a dyn Backend,
    pub ledger: &'a mut ErrorLedger,
    pub dirs: &'a Dirs,
}

impl OpContext<'_> {
    /// Backend failure boundary: exactly one ledger record and one printed
    /// line per failure, then control returns normally.
    fn fail(&mut self, label: &str, err: &BackendError) {
        warn!(label, kind = err.kind(), %err, "Operation failed");
        self.ledger
            .append(ErrorRecord::now(err.kind(), err.to_string()));
        println!("{} - {}", label, err);
    }
}

/// Validate one schema file: parse plus meta-validation.
pub fn schema_validate(ctx: &mut OpContext, schema_file: &str) -> bool {
    match load_checked_schema(ctx, schema_file) {
        Ok(_) => {
            println!("Schema {} is valid.", schema_file);
            true
        }
        Err(err) => {
            ctx.fail(schema_file, &err);
            false
        }
    }
}

/// Validate a data file against a schema. The schema must validate first;
/// a schema failure is recorded as the error and data validation is
/// skipped.
pub fn data_validate(ctx: &mut OpContext, schema_file: &str, data_file: &str) -> bool {
    let schema = match load_checked_schema(ctx, schema_file) {
        Ok(schema) => schema,
        Err(err) => {
            ctx.fail(schema_file, &err);
            return false;
        }
    };
    match validate_data_inner(ctx, &schema, data_file) {
        Ok(()) => {
            println!("Data {} is valid.", data_file);
            true
        }
        Err(err) => {
            ctx.fail(data_file, &err);
            false
        }
    }
}

/// Convert a schema to the target format and write the result under the
/// output directory.
pub fn schema_convert(
    ctx: &mut OpContext,
    schema_file: &str,
    target: SchemaTarget,
    detail: DetailLevel,
) -> bool {
    match convert_schema_inner(ctx, schema_file, target, detail) {
        Ok(path) => {
            println!("Schema {} converted to {}.", schema_file, target.as_str());
            println!(" - Data written to {}", path.display());
            true
        }
        Err(err) => {
            ctx.fail(schema_file, &err);
            false
        }
    }
}

/// Translate a JIDL or JSON Schema file back into JADN and write the
/// result under the output directory.
pub fn schema_translate(ctx: &mut OpContext, schema_file: &str) -> bool {
    match translate_inner(ctx, schema_file) {
        Ok(path) => {
            println!("Schema {} translated to JADN.", schema_file);
            println!(" - Data written to {}", path.display());
            true
        }
        Err(err) => {
            ctx.fail(schema_file, &err);
            false
        }
    }
}

/// Re-encode a JSON data file in the requested style and write the result
/// under the output directory.
pub fn data_convert(ctx: &mut OpContext, data_file: &str, style: DataStyle) -> bool {
    match convert_data_inner(ctx, data_file, style) {
        Ok(path) => {
            println!("Data {} converted to {} JSON.", data_file, style.as_str());
            println!(" - Data written to {}", path.display());
            true
        }
        Err(err) => {
            ctx.fail(data_file, &err);
            false
        }
    }
}

fn load_checked_schema(ctx: &OpContext, schema_file: &str) -> Result<Schema, BackendError> {
    let text = read_input(&ctx.dirs.schemas, schema_file)?;
    let schema = ctx.backend.load_schema(&text)?;
    ctx.backend.check_schema(&schema)?;
    Ok(schema)
}

fn validate_data_inner(
    ctx: &OpContext,
    schema: &Schema,
    data_file: &str,
) -> Result<(), BackendError> {
    // Root type comes from the schema's own declarations.
    let root = schema
        .roots()
        .first()
        .cloned()
        .ok_or_else(|| {
            BackendError::SchemaInvalid(
                "schema declares no root types to validate against".to_string(),
            )
        })?;
    let text = read_input(&ctx.dirs.data, data_file)?;
    ctx.backend
        .validate_data(schema, &root, &text, FileKind::from_name(data_file))
}

fn convert_schema_inner(
    ctx: &OpContext,
    schema_file: &str,
    target: SchemaTarget,
    detail: DetailLevel,
) -> Result<PathBuf, BackendError> {
    // Conversion needs a parseable schema, not a meta-valid one.
    let text = read_input(&ctx.dirs.schemas, schema_file)?;
    let schema = ctx.backend.load_schema(&text)?;
    let rendered = ctx.backend.convert_schema(&schema, target, detail)?;
    let out_name = files::replace_extension(schema_file, target.extension());
    let path = files::write_output(&ctx.dirs.output, &out_name, &rendered)?;
    info!(schema = schema_file, target = target.as_str(), output = %path.display(), "Converted schema");
    Ok(path)
}

fn translate_inner(ctx: &OpContext, schema_file: &str) -> Result<PathBuf, BackendError> {
    let text = read_input(&ctx.dirs.schemas, schema_file)?;
    let jadn_text = ctx
        .backend
        .reverse_translate(&text, FileKind::from_name(schema_file))?;
    let out_name = files::replace_extension(schema_file, "jadn");
    let path = files::write_output(&ctx.dirs.output, &out_name, &jadn_text)?;
    info!(schema = schema_file, output = %path.display(), "Translated schema to JADN");
    Ok(path)
}

fn convert_data_inner(
    ctx: &OpContext,
    data_file: &str,
    style: DataStyle,
) -> Result<PathBuf, BackendError> {
    let text = read_input(&ctx.dirs.data, data_file)?;
    let converted = ctx.backend.convert_data(&text, style)?;
    let out_name = files::replace_extension(data_file, "json");
    let path = files::write_output(&ctx.dirs.output, &out_name, &converted)?;
    info!(data = data_file, style = style.as_str(), output = %path.display(), "Converted data");
    Ok(path)
}

fn read_input(dir: &Path, filename: &str) -> Result<String, BackendError> {
    let path = dir.join(filename);
    if !path.is_file() {
        return Err(BackendError::FileNotFound(format!(
            "{} (looked in '{}')",
            filename,
            files::dir_label(dir)
        )));
    }
    Ok(fs::read_to_string(&path)?)
}

/// Outcome of one bulk run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BulkSummary {
    pub attempted: usize,
    pub failed: usize,
}

impl fmt::Display for BulkSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Processed {} file(s), {} failure(s).",
            self.attempted, self.failed
        )
    }
}

/// Run a single-file handler over every file in `dir` carrying
/// `extension`, in listing order. Per-file failures are already caught
/// inside the handler, so every match is attempted.
pub fn run_bulk<F>(
    ctx: &mut OpContext,
    dir: &Path,
    extension: &'static str,
    mut op: F,
) -> Result<BulkSummary, ShellError>
where
    F: FnMut(&mut OpContext, &str) -> bool,
{
    let candidates = files::list_files(dir, FileFilter::Extension(extension))?;
    info!(dir = %dir.display(), extension, count = candidates.len(), "Starting bulk run");
    let mut failed = 0;
    for file in &candidates {
        if !op(ctx, file) {
            failed += 1;
        }
    }
    Ok(BulkSummary {
        attempted: candidates.len(),
        failed,
    })
}
