//! Backend capabilities behind a trait seam.
//!
//! The orchestration core talks to schema and data engines only through
//! [`Backend`]. The built-in [`JadnEngine`] implements every capability
//! in-process: schema loading and meta-validation, forward conversion,
//! reverse translation, data validation, and data re-encoding.

use crate::error::BackendError;
use crate::files::FileKind;

pub mod convert;
pub mod data;
pub mod schema;
pub mod translate;

pub use schema::{Schema, TypeDef};

/// Conversion targets for a JADN schema, in declared option order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaTarget {
    Jidl,
    JsonSchema,
    Xsd,
    Markdown,
    Html,
    Graphviz,
    Plantuml,
}

impl SchemaTarget {
    pub const ALL: [SchemaTarget; 7] = [
        SchemaTarget::Jidl,
        SchemaTarget::JsonSchema,
        SchemaTarget::Xsd,
        SchemaTarget::Markdown,
        SchemaTarget::Html,
        SchemaTarget::Graphviz,
        SchemaTarget::Plantuml,
    ];

    /// Option strings shown in selection prompts, aligned with `ALL`.
    pub const NAMES: [&'static str; 7] = [
        "jidl",
        "json-schema",
        "xsd",
        "markdown",
        "html",
        "graphviz",
        "plantuml",
    ];

    pub fn from_name(name: &str) -> Option<SchemaTarget> {
        Self::ALL
            .iter()
            .zip(Self::NAMES.iter())
            .find(|(_, n)| **n == name)
            .map(|(t, _)| *t)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaTarget::Jidl => "jidl",
            SchemaTarget::JsonSchema => "json-schema",
            SchemaTarget::Xsd => "xsd",
            SchemaTarget::Markdown => "markdown",
            SchemaTarget::Html => "html",
            SchemaTarget::Graphviz => "graphviz",
            SchemaTarget::Plantuml => "plantuml",
        }
    }

    /// Canonical extension for output files.
    pub fn extension(&self) -> &'static str {
        match self {
            SchemaTarget::Jidl => "jidl",
            SchemaTarget::JsonSchema => "json",
            SchemaTarget::Xsd => "xsd",
            SchemaTarget::Markdown => "md",
            SchemaTarget::Html => "html",
            SchemaTarget::Graphviz => "gv",
            SchemaTarget::Plantuml => "puml",
        }
    }

    /// Whether the detail suboption applies; it is ignored elsewhere.
    pub fn takes_detail(&self) -> bool {
        matches!(self, SchemaTarget::Graphviz | SchemaTarget::Plantuml)
    }
}

/// Re-encoding styles for JSON data files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataStyle {
    Concise,
    Verbose,
}

impl DataStyle {
    pub const NAMES: [&'static str; 2] = ["concise", "verbose"];

    pub fn from_name(name: &str) -> Option<DataStyle> {
        match name {
            "concise" => Some(DataStyle::Concise),
            "verbose" => Some(DataStyle::Verbose),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DataStyle::Concise => "concise",
            DataStyle::Verbose => "verbose",
        }
    }
}

/// Diagram detail levels for the graph targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetailLevel {
    Conceptual,
    Logical,
    #[default]
    Information,
}

impl DetailLevel {
    pub const NAMES: [&'static str; 3] = ["conceptual", "logical", "information"];

    pub fn from_name(name: &str) -> Option<DetailLevel> {
        match name {
            "conceptual" => Some(DetailLevel::Conceptual),
            "logical" => Some(DetailLevel::Logical),
            "information" => Some(DetailLevel::Information),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DetailLevel::Conceptual => "conceptual",
            DetailLevel::Logical => "logical",
            DetailLevel::Information => "information",
        }
    }
}

/// Capability interface the operation handlers call.
///
/// Every method reports failure through [`BackendError`]; handlers catch
/// those at their boundary, record them in the ledger, and return normally.
pub trait Backend {
    /// Parse JADN schema text into the structural model.
    fn load_schema(&self, text: &str) -> Result<Schema, BackendError>;

    /// Meta-validate a loaded schema against the JADN rules.
    fn check_schema(&self, schema: &Schema) -> Result<(), BackendError>;

    /// Render a schema in the target format.
    fn convert_schema(
        &self,
        schema: &Schema,
        target: SchemaTarget,
        detail: DetailLevel,
    ) -> Result<String, BackendError>;

    /// Translate JIDL or JSON Schema text into JADN schema text.
    fn reverse_translate(&self, text: &str, kind: FileKind) -> Result<String, BackendError>;

    /// Validate a data document against one schema root type.
    fn validate_data(
        &self,
        schema: &Schema,
        root: &str,
        data: &str,
        kind: FileKind,
    ) -> Result<(), BackendError>;

    /// Re-encode a JSON document in the requested style.
    fn convert_data(&self, data: &str, style: DataStyle) -> Result<String, BackendError>;
}

/// Built-in engine implementing every capability in-process.
#[derive(Debug, Default)]
pub struct JadnEngine;

impl JadnEngine {
    pub fn new() -> JadnEngine {
        JadnEngine
    }
}

impl Backend for JadnEngine {
    fn load_schema(&self, text: &str) -> Result<Schema, BackendError> {
        Schema::parse(text)
    }

    fn check_schema(&self, schema: &Schema) -> Result<(), BackendError> {
        schema::check(schema)
    }

    fn convert_schema(
        &self,
        schema: &Schema,
        target: SchemaTarget,
        detail: DetailLevel,
    ) -> Result<String, BackendError> {
        match target {
            SchemaTarget::Jidl => Ok(convert::to_jidl(schema)),
            SchemaTarget::JsonSchema => convert::to_json_schema(schema),
            SchemaTarget::Xsd => Ok(convert::to_xsd(schema)),
            SchemaTarget::Markdown => Ok(convert::to_markdown(schema)),
            SchemaTarget::Html => Ok(convert::to_html(schema)),
            SchemaTarget::Graphviz => Ok(convert::to_graphviz(schema, detail)),
            SchemaTarget::Plantuml => Ok(convert::to_plantuml(schema, detail)),
        }
    }

    fn reverse_translate(&self, text: &str, kind: FileKind) -> Result<String, BackendError> {
        match kind {
            FileKind::Jidl => translate::from_jidl(text),
            FileKind::Json => translate::from_json_schema(text),
            other => Err(BackendError::Unsupported(format!(
                "Unsupported schema format: {}",
                other.as_str()
            ))),
        }
    }

    fn validate_data(
        &self,
        schema: &Schema,
        root: &str,
        data: &str,
        kind: FileKind,
    ) -> Result<(), BackendError> {
        if kind != FileKind::Json {
            return Err(BackendError::Unsupported(format!(
                "Unsupported data format: {}",
                kind.as_str()
            )));
        }
        data::validate(schema, root, data)
    }

    fn convert_data(&self, data: &str, style: DataStyle) -> Result<String, BackendError> {
        match style {
            DataStyle::Concise => data::to_concise(data),
            DataStyle::Verbose => data::to_verbose(data),
        }
    }
}
