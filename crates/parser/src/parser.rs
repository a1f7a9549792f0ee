//! Document parsers
//!
//! One parser per document kind, each with `from_file`/`from_json`
//! constructors and a `parse` that runs conversion and validation.

use crate::converter;
use crate::schema::{ApiDeclaration, ResourceListing};
use crate::types::{RawApiDeclaration, RawResourceListing};
use std::fs;
use std::path::Path;
use swagen_common::{GeneratorError, Result};

/// Parser for the top-level resource listing document
pub struct ListingParser {
    doc: RawResourceListing,
}

impl ListingParser {
    /// Load a resource listing from a file path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            GeneratorError::Schema(format!(
                "Failed to read resource listing {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Self::from_json(&content)
    }

    /// Parse a resource listing from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let doc: RawResourceListing = serde_json::from_str(json).map_err(|e| {
            GeneratorError::Schema(format!("Failed to parse resource listing: {e}"))
        })?;
        Ok(Self { doc })
    }

    pub fn parse(&self) -> Result<ResourceListing> {
        converter::convert_listing(&self.doc)
    }
}

/// Parser for a per-resource API declaration document
pub struct DeclarationParser {
    doc: RawApiDeclaration,
}

impl DeclarationParser {
    /// Load an API declaration from a file path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            GeneratorError::Schema(format!(
                "Failed to read API declaration {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Self::from_json(&content)
    }

    /// Parse an API declaration from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let doc: RawApiDeclaration = serde_json::from_str(json).map_err(|e| {
            GeneratorError::Schema(format!("Failed to parse API declaration: {e}"))
        })?;
        Ok(Self { doc })
    }

    pub fn parse(&self) -> Result<ApiDeclaration> {
        converter::convert_declaration(&self.doc)
    }
}
