//! Model synthesis

use crate::ast::{FieldBinding, ModelUnit};
use crate::resolve;
use std::collections::BTreeSet;
use swagen_common::GeneratorConfig;
use swagen_parser::Model;

/// Synthesize the data struct unit for one named model.
///
/// Fields keep their property names verbatim. Required properties
/// bind structurally; the rest become `Option` fields skipped during
/// serialization when absent.
pub fn synthesize_model(model: &Model, config: &GeneratorConfig) -> ModelUnit {
    let model_ns = config.model_namespace.as_str();
    let root_ns = config.namespace.as_str();

    let mut uses = BTreeSet::new();
    let mut fields = Vec::new();
    for property in &model.properties {
        // A self-reference needs no import; the struct is in scope in
        // its own file.
        if let Some(name) = property.ty.referenced_model() {
            if name != model.name {
                if let Some(line) = resolve::use_line(model_ns, model_ns, root_ns, name) {
                    uses.insert(line);
                }
            }
        }

        let resolved = resolve::resolve(&property.ty, model_ns, model_ns, root_ns);
        fields.push(FieldBinding {
            name: property.name.clone(),
            binding: resolved.binding,
            doc_type: resolved.doc,
            required: model.required.contains(&property.name),
            description: property.description.clone(),
        });
    }

    ModelUnit {
        name: model.name.clone(),
        namespace: model_ns.to_string(),
        description: model.description.clone(),
        uses: uses.into_iter().collect(),
        fields,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swagen_common::{PrimitiveKind, TypeRef};
    use swagen_parser::Property;

    fn config() -> GeneratorConfig {
        GeneratorConfig::new(
            "service.json",
            "out",
            "fbs",
            None,
            Some("fbs::model".to_string()),
        )
        .unwrap()
    }

    #[test]
    fn test_required_split() {
        let model = Model {
            name: "Pet".to_string(),
            description: None,
            properties: vec![
                Property {
                    name: "id".to_string(),
                    description: None,
                    ty: TypeRef::Primitive(PrimitiveKind::Long),
                },
                Property {
                    name: "name".to_string(),
                    description: None,
                    ty: TypeRef::Primitive(PrimitiveKind::String),
                },
            ],
            required: ["id".to_string()].into_iter().collect(),
        };

        let unit = synthesize_model(&model, &config());
        assert_eq!(unit.name, "Pet");
        assert_eq!(unit.namespace, "fbs::model");
        assert!(unit.fields[0].required);
        assert_eq!(unit.fields[0].binding, "i64");
        assert!(!unit.fields[1].required);
    }

    #[test]
    fn test_cross_model_reference_imports_sibling() {
        let model = Model {
            name: "Pet".to_string(),
            description: None,
            properties: vec![
                Property {
                    name: "tags".to_string(),
                    description: None,
                    ty: TypeRef::ArrayOf(Box::new(TypeRef::Reference("Tag".to_string()))),
                },
                Property {
                    name: "parent".to_string(),
                    description: None,
                    ty: TypeRef::Reference("Pet".to_string()),
                },
            ],
            required: BTreeSet::new(),
        };

        let unit = synthesize_model(&model, &config());
        assert_eq!(unit.uses, vec!["use crate::model::Tag;".to_string()]);
        assert_eq!(unit.fields[0].binding, "Vec<Tag>");
        assert_eq!(unit.fields[1].binding, "Pet");
    }
}
