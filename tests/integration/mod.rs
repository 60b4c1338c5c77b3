//! Integration tests for the JADN command shell

mod bulk_isolation;
mod config_integration;
mod data_operations;
mod error_reports;
mod schema_operations;
mod session_routing;
mod strict_mode;
pub mod test_utils;
