//! Common types and utilities for swagen
//!
//! This crate contains the shared error taxonomy, the generator
//! configuration, and the schema atoms (type references, HTTP verbs,
//! parameter locations) used by the parser and codegen crates.

mod config;
mod types;

pub use config::GeneratorConfig;
pub use types::{
    is_valid_namespace, namespace_segments, HttpMethod, ParamLocation, PrimitiveKind, TypeRef,
};

use thiserror::Error;

/// Errors that can occur during client generation
#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Malformed schema: {0}")]
    Schema(String),

    #[error("Generation error: {0}")]
    Generation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for generator operations
pub type Result<T> = std::result::Result<T, GeneratorError>;
