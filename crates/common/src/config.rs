//! Generator configuration

use crate::{is_valid_namespace, GeneratorError, Result};
use std::path::PathBuf;

/// Options for one generation run.
///
/// The client and model namespaces default to the root namespace,
/// which also names the generated crate. Validation happens here,
/// before any input is read.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Path to the resource listing document
    pub input_file: PathBuf,

    /// Directory the generated crate is written to
    pub output_dir: PathBuf,

    /// Root namespace for generated code
    pub namespace: String,

    /// Namespace for service structs
    pub client_namespace: String,

    /// Namespace for data structs
    pub model_namespace: String,
}

impl GeneratorConfig {
    pub fn new(
        input_file: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
        namespace: impl Into<String>,
        client_namespace: Option<String>,
        model_namespace: Option<String>,
    ) -> Result<Self> {
        let input_file: PathBuf = input_file.into();
        let output_dir: PathBuf = output_dir.into();
        let namespace: String = namespace.into();

        if input_file.as_os_str().is_empty() {
            return Err(GeneratorError::Configuration(
                "input file must not be empty".to_string(),
            ));
        }
        if output_dir.as_os_str().is_empty() {
            return Err(GeneratorError::Configuration(
                "output directory must not be empty".to_string(),
            ));
        }

        let client_namespace = client_namespace
            .filter(|ns| !ns.is_empty())
            .unwrap_or_else(|| namespace.clone());
        let model_namespace = model_namespace
            .filter(|ns| !ns.is_empty())
            .unwrap_or_else(|| namespace.clone());

        for ns in [&namespace, &client_namespace, &model_namespace] {
            if !is_valid_namespace(ns) {
                return Err(GeneratorError::Configuration(format!(
                    "invalid namespace '{ns}'"
                )));
            }
        }

        Ok(Self {
            input_file,
            output_dir,
            namespace,
            client_namespace,
            model_namespace,
        })
    }
}
