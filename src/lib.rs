//! JADN CLI: Schema Validation, Conversion, and Data Tooling
//!
//! An interactive and batch command shell for JSON Abstract Data Notation
//! (JADN) schema and data files: validation, format conversion, reverse
//! translation, and a session error ledger flushed to dated CSV reports.

pub mod backend;
pub mod cli;
pub mod config;
pub mod error;
pub mod files;
pub mod ledger;
pub mod logging;
pub mod ops;
pub mod resolve;
