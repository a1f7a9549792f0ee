//! Client code generation
//!
//! Drives a full generation run: parse the resource listing, parse
//! and convert each resource's declaration, synthesize service and
//! model units, and write the generated crate (sources, manifest,
//! README and a copy of the request runtime) to the output directory.
//!
//! Output is deterministic: units are written in namespace order and
//! models dedup by name with the first definition winning, so two
//! runs over identical input produce byte-identical trees.

mod ast;
mod model;
mod printer;
mod resolve;
mod service;
mod templates;

pub use ast::{
    ExecutePlan, FieldBinding, MethodPlan, ModelUnit, ParamBinding, ResponsePlan, ServiceUnit,
};
pub use model::synthesize_model;
pub use resolve::{primitive_binding, resolve, ResolvedType};
pub use service::{service_name, synthesize_service};

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};
use swagen_common::{GeneratorConfig, GeneratorError, Result};
use swagen_parser::{declaration_location, DeclarationParser, ListingParser};
use tera::Tera;

/// Counts reported after a generation run.
#[derive(Debug, Clone, Copy)]
pub struct GenerationReport {
    pub services: usize,
    pub models: usize,
    pub files: usize,
}

/// Client generator
///
/// Transforms a parsed API description into a complete client crate:
/// - one service struct per resource
/// - one data struct per named model
/// - Cargo.toml and README.md
/// - a copy of the request runtime
pub struct Generator {
    config: GeneratorConfig,
    tera: Tera,
}

impl Generator {
    /// Create a new generator for a validated configuration.
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        let tera = templates::load_templates()?;
        Ok(Self { config, tera })
    }

    /// Run the full generation and report what was written.
    pub fn generate(&self) -> Result<GenerationReport> {
        let listing = ListingParser::from_file(&self.config.input_file)?.parse()?;

        let mut services: Vec<ServiceUnit> = Vec::new();
        let mut models: BTreeMap<String, ModelUnit> = BTreeMap::new();
        for resource in &listing.resources {
            let location =
                declaration_location(&self.config.input_file, &listing.base_path, &resource.path);
            let declaration = DeclarationParser::from_file(&location)?.parse()?;

            services.push(service::synthesize_service(
                resource,
                &declaration,
                &self.config,
            ));
            for model in declaration.models.values() {
                // The same model may appear in several declarations;
                // the first definition wins.
                let unit = model::synthesize_model(model, &self.config);
                models.entry(unit.name.clone()).or_insert(unit);
            }
        }

        let src_dir = self.config.output_dir.join("src");
        let mut files = 0;

        // Two units may not land on the same file; a duplicate would
        // silently overwrite a service or model generated earlier.
        let mut unit_files: BTreeSet<PathBuf> = BTreeSet::new();
        for unit in &services {
            let path = self.unit_path(&src_dir, &unit.namespace, &unit.name);
            if !unit_files.insert(path.clone()) {
                return Err(GeneratorError::Generation(format!(
                    "unit '{}' collides with an already generated file {}",
                    unit.name,
                    path.display()
                )));
            }
            write_file(&path, &printer::render_service(unit))?;
            files += 1;
        }
        for unit in models.values() {
            let path = self.unit_path(&src_dir, &unit.namespace, &unit.name);
            if !unit_files.insert(path.clone()) {
                return Err(GeneratorError::Generation(format!(
                    "unit '{}' collides with an already generated file {}",
                    unit.name,
                    path.display()
                )));
            }
            write_file(&path, &printer::render_model(unit))?;
            files += 1;
        }

        let model_refs: Vec<&ModelUnit> = models.values().collect();
        write_file(
            &src_dir.join("lib.rs"),
            &printer::render_lib(&services, &model_refs, &self.config.namespace),
        )?;
        files += 1;

        files += self.generate_manifest(&services, &listing.base_path)?;
        files += self.copy_runtime()?;

        Ok(GenerationReport {
            services: services.len(),
            models: models.len(),
            files,
        })
    }

    /// File location of a unit: `src/` plus the namespace segments
    /// below the root namespace, plus the unit name.
    fn unit_path(&self, src_dir: &Path, namespace: &str, name: &str) -> PathBuf {
        let mut path = src_dir.to_path_buf();
        for segment in resolve::namespace_rel_segments(namespace, &self.config.namespace) {
            path.push(segment);
        }
        path.push(format!("{name}.rs"));
        path
    }

    /// Render Cargo.toml and README.md from templates.
    fn generate_manifest(&self, services: &[ServiceUnit], base_path: &str) -> Result<usize> {
        let context = self.create_context(services, base_path);

        for template in ["Cargo.toml", "README.md"] {
            let rendered = self
                .tera
                .render(template, &context)
                .map_err(|e| GeneratorError::Generation(format!("Template error: {}", e)))?;
            write_file(&self.config.output_dir.join(template), &rendered)?;
        }

        Ok(2)
    }

    /// Copy the runtime crate sources into the output tree. The
    /// generated manifest depends on them by path, so the output is a
    /// self-contained package.
    fn copy_runtime(&self) -> Result<usize> {
        let runtime_dir = self.config.output_dir.join("runtime");
        let runtime_src = runtime_dir.join("src");

        let sources: [(&Path, &str); 6] = [
            (
                Path::new("Cargo.toml"),
                include_str!("../templates/runtime_Cargo.toml"),
            ),
            (
                Path::new("src/lib.rs"),
                include_str!("../../runtime/src/lib.rs"),
            ),
            (
                Path::new("src/error.rs"),
                include_str!("../../runtime/src/error.rs"),
            ),
            (
                Path::new("src/request.rs"),
                include_str!("../../runtime/src/request.rs"),
            ),
            (
                Path::new("src/serializer.rs"),
                include_str!("../../runtime/src/serializer.rs"),
            ),
            (
                Path::new("src/transport.rs"),
                include_str!("../../runtime/src/transport.rs"),
            ),
        ];

        fs::create_dir_all(&runtime_src)
            .map_err(|e| GeneratorError::Generation(format!("Failed to create {}: {}", runtime_src.display(), e)))?;
        for (relative, content) in sources {
            write_file(&runtime_dir.join(relative), content)?;
        }

        Ok(sources.len())
    }

    fn create_context(&self, services: &[ServiceUnit], base_path: &str) -> tera::Context {
        #[derive(Serialize)]
        struct ServiceSummary<'a> {
            name: &'a str,
            description: Option<&'a str>,
        }

        let summaries: Vec<ServiceSummary<'_>> = services
            .iter()
            .map(|s| ServiceSummary {
                name: &s.name,
                description: s.description.as_deref(),
            })
            .collect();

        let mut context = tera::Context::new();
        context.insert("crate_name", &self.config.namespace.replace("::", "_"));
        context.insert("services", &summaries);
        context.insert("base_url", base_path);
        context.insert(
            "first_service",
            summaries.first().map(|s| s.name).unwrap_or("ServiceApi"),
        );
        context
    }
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            GeneratorError::Generation(format!("Failed to create {}: {}", parent.display(), e))
        })?;
    }
    fs::write(path, content).map_err(|e| {
        GeneratorError::Generation(format!("Failed to write {}: {}", path.display(), e))
    })
}
