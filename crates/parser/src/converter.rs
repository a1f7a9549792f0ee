//! Converts raw description documents into the schema IR
//!
//! All structural validation lives here: every error is reported as
//! `GeneratorError::Schema` with enough context to find the offending
//! operation or model in the input document.

use crate::schema::{
    ApiDeclaration, Model, Operation, OperationGroup, Parameter, Property, ResourceListing,
    ResourceRef, ResponseMessage,
};
use crate::types::{
    RawApi, RawApiDeclaration, RawItems, RawModel, RawOperation, RawParameter,
    RawResourceListing,
};
use std::collections::{BTreeMap, BTreeSet};
use swagen_common::{GeneratorError, HttpMethod, ParamLocation, Result, TypeRef};

pub fn convert_listing(raw: &RawResourceListing) -> Result<ResourceListing> {
    let resources = raw
        .apis
        .iter()
        .map(|api| ResourceRef {
            path: api.path.clone(),
            description: api.description.clone().unwrap_or_default(),
        })
        .collect();

    Ok(ResourceListing {
        base_path: raw.base_path.clone(),
        resources,
    })
}

pub fn convert_declaration(raw: &RawApiDeclaration) -> Result<ApiDeclaration> {
    let mut models = BTreeMap::new();
    for (name, raw_model) in &raw.models {
        models.insert(name.clone(), convert_model(name, raw_model)?);
    }

    // Model-to-model references are checked once all names are known.
    for model in models.values() {
        for property in &model.properties {
            check_reference(&property.ty, &models, || {
                format!("property '{}' of model '{}'", property.name, model.name)
            })?;
        }
    }

    let mut groups = Vec::new();
    for api in &raw.apis {
        let mut operations = Vec::new();
        for raw_operation in &api.operations {
            operations.push(convert_operation(api, raw_operation, &models)?);
        }
        groups.push(OperationGroup {
            path: api.path.clone(),
            operations,
        });
    }

    Ok(ApiDeclaration {
        resource_path: raw.resource_path.clone().unwrap_or_default(),
        description: raw.description.clone(),
        groups,
        models,
    })
}

fn convert_operation(
    api: &RawApi,
    raw: &RawOperation,
    models: &BTreeMap<String, Model>,
) -> Result<Operation> {
    let nickname = raw
        .nickname
        .clone()
        .filter(|n| !n.is_empty())
        .ok_or_else(|| {
            GeneratorError::Schema(format!("operation on path '{}' has no nickname", api.path))
        })?;

    let method_name = raw.method.as_deref().ok_or_else(|| {
        GeneratorError::Schema(format!("operation '{nickname}' has no HTTP method"))
    })?;
    let method = HttpMethod::from_name(method_name).ok_or_else(|| {
        GeneratorError::Schema(format!(
            "operation '{nickname}' has unsupported HTTP method '{method_name}'"
        ))
    })?;

    let mut parameters = Vec::new();
    let mut body_seen = false;
    for raw_parameter in &raw.parameters {
        let parameter = convert_parameter(&nickname, raw_parameter, models)?;
        if parameter.location == ParamLocation::Body {
            if body_seen {
                return Err(GeneratorError::Schema(format!(
                    "operation '{nickname}' declares more than one body parameter"
                )));
            }
            body_seen = true;
        }
        parameters.push(parameter);
    }

    let return_type = match raw.data_type.as_deref() {
        None | Some("void") => None,
        Some(name) => {
            let ty = parse_type(name, raw.items.as_ref(), || {
                format!("return type of operation '{nickname}'")
            })?;
            check_reference(&ty, models, || {
                format!("return type of operation '{nickname}'")
            })?;
            Some(ty)
        }
    };

    let mut response_messages = Vec::new();
    for raw_message in &raw.response_messages {
        if let Some(model) = &raw_message.response_model {
            if !models.contains_key(model) {
                return Err(GeneratorError::Schema(format!(
                    "response {} of operation '{nickname}' references undefined model '{model}'",
                    raw_message.code
                )));
            }
        }
        response_messages.push(ResponseMessage {
            code: raw_message.code,
            message: raw_message.message.clone().unwrap_or_default(),
            model: raw_message.response_model.clone(),
        });
    }

    Ok(Operation {
        nickname,
        method,
        summary: raw.summary.clone(),
        notes: raw.notes.clone(),
        parameters,
        return_type,
        response_messages,
    })
}

fn convert_parameter(
    nickname: &str,
    raw: &RawParameter,
    models: &BTreeMap<String, Model>,
) -> Result<Parameter> {
    let name = raw.name.clone().filter(|n| !n.is_empty()).ok_or_else(|| {
        GeneratorError::Schema(format!("parameter of operation '{nickname}' has no name"))
    })?;

    let location_name = raw.param_type.as_deref().ok_or_else(|| {
        GeneratorError::Schema(format!(
            "parameter '{name}' of operation '{nickname}' has no paramType"
        ))
    })?;
    let location = ParamLocation::from_name(location_name).ok_or_else(|| {
        GeneratorError::Schema(format!(
            "parameter '{name}' of operation '{nickname}' has unsupported location '{location_name}'"
        ))
    })?;

    let type_name = raw.data_type.as_deref().ok_or_else(|| {
        GeneratorError::Schema(format!(
            "parameter '{name}' of operation '{nickname}' has no type"
        ))
    })?;
    let ty = parse_type(type_name, raw.items.as_ref(), || {
        format!("parameter '{name}' of operation '{nickname}'")
    })?;
    check_reference(&ty, models, || {
        format!("parameter '{name}' of operation '{nickname}'")
    })?;

    Ok(Parameter {
        name,
        location,
        ty,
        required: raw.required,
        allow_multiple: raw.allow_multiple,
        description: raw.description.clone(),
    })
}

fn convert_model(name: &str, raw: &RawModel) -> Result<Model> {
    let mut properties = Vec::new();
    for (property_name, raw_property) in &raw.properties {
        let ty = match (&raw_property.ref_type, &raw_property.data_type) {
            (Some(reference), _) => TypeRef::Reference(reference.clone()),
            (None, Some(type_name)) => parse_type(type_name, raw_property.items.as_ref(), || {
                format!("property '{property_name}' of model '{name}'")
            })?,
            (None, None) => {
                return Err(GeneratorError::Schema(format!(
                    "property '{property_name}' of model '{name}' has no type"
                )))
            }
        };
        properties.push(Property {
            name: property_name.clone(),
            description: raw_property.description.clone(),
            ty,
        });
    }

    let required: BTreeSet<String> = raw.required.iter().cloned().collect();
    for required_name in &required {
        if !properties.iter().any(|p| &p.name == required_name) {
            return Err(GeneratorError::Schema(format!(
                "model '{name}' marks unknown property '{required_name}' as required"
            )));
        }
    }

    Ok(Model {
        name: name.to_string(),
        description: raw.description.clone(),
        properties,
        required,
    })
}

/// Parse a `(type, items)` pair into a type reference. An `array`
/// type without an item type is rejected.
fn parse_type(
    name: &str,
    items: Option<&RawItems>,
    context: impl Fn() -> String,
) -> Result<TypeRef> {
    if name == "array" {
        let items = items.ok_or_else(|| {
            GeneratorError::Schema(format!("{} is an array without an item type", context()))
        })?;
        let item_name = items.type_name();
        if item_name == "array" {
            return Err(GeneratorError::Schema(format!(
                "{} nests an untyped array",
                context()
            )));
        }
        Ok(TypeRef::ArrayOf(Box::new(TypeRef::from_name(item_name))))
    } else {
        Ok(TypeRef::from_name(name))
    }
}

fn check_reference(
    ty: &TypeRef,
    models: &BTreeMap<String, Model>,
    context: impl Fn() -> String,
) -> Result<()> {
    if let Some(name) = ty.referenced_model() {
        if !models.contains_key(name) {
            return Err(GeneratorError::Schema(format!(
                "{} references undefined model '{name}'",
                context()
            )));
        }
    }
    Ok(())
}
