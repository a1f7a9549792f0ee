//! Template loading and management

use swagen_common::{GeneratorError, Result};
use tera::Tera;

/// Load the scaffolding templates for the generated crate.
pub fn load_templates() -> Result<Tera> {
    let mut tera = Tera::default();

    tera.add_raw_template("Cargo.toml", include_str!("../templates/Cargo.toml.tera"))
        .map_err(|e| {
            GeneratorError::Generation(format!("Failed to load Cargo.toml template: {}", e))
        })?;

    tera.add_raw_template("README.md", include_str!("../templates/README.md.tera"))
        .map_err(|e| {
            GeneratorError::Generation(format!("Failed to load README.md template: {}", e))
        })?;

    Ok(tera)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_templates_load() {
        assert!(load_templates().is_ok());
    }
}
