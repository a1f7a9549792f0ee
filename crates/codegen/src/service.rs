//! Service synthesis
//!
//! Turns one resource declaration into a service unit: a struct named
//! after the resource description with one method per operation.

use crate::ast::{ExecutePlan, MethodPlan, ParamBinding, ResponsePlan, ServiceUnit};
use crate::resolve;
use std::collections::BTreeSet;
use swagen_common::GeneratorConfig;
use swagen_parser::{ApiDeclaration, Operation, Parameter, ResourceRef};

/// Synthesize the service unit for one resource.
pub fn synthesize_service(
    resource: &ResourceRef,
    declaration: &ApiDeclaration,
    config: &GeneratorConfig,
) -> ServiceUnit {
    let current_ns = config.client_namespace.as_str();
    let model_ns = config.model_namespace.as_str();
    let root_ns = config.namespace.as_str();

    let mut uses = BTreeSet::new();
    let mut methods = Vec::new();
    for group in &declaration.groups {
        for operation in &group.operations {
            methods.push(synthesize_method(
                operation, &group.path, current_ns, model_ns, root_ns, &mut uses,
            ));
        }
    }

    ServiceUnit {
        name: service_name(&resource.description),
        namespace: current_ns.to_string(),
        description: declaration
            .description
            .clone()
            .or_else(|| non_empty(&resource.description)),
        uses: uses.into_iter().collect(),
        methods,
    }
}

/// Derive the service struct name from the resource description:
/// every non-word character is stripped and `Api` appended.
pub fn service_name(description: &str) -> String {
    let stem: String = description
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect();
    format!("{stem}Api")
}

fn synthesize_method(
    operation: &Operation,
    path: &str,
    current_ns: &str,
    model_ns: &str,
    root_ns: &str,
    uses: &mut BTreeSet<String>,
) -> MethodPlan {
    let params = operation
        .parameters
        .iter()
        .map(|p| synthesize_param(p, current_ns, model_ns, root_ns, uses))
        .collect();

    let execute = match &operation.return_type {
        None => ExecutePlan::Empty,
        Some(ty) => {
            collect_use(ty.referenced_model(), current_ns, model_ns, root_ns, uses);
            let resolved = resolve::resolve(ty, current_ns, model_ns, root_ns);
            ExecutePlan::Typed {
                binding: resolved.binding,
                doc: resolved.doc,
            }
        }
    };

    let responses = operation
        .response_messages
        .iter()
        .map(|message| ResponsePlan {
            code: message.code,
            message: message.message.clone(),
            has_model: message.model.is_some(),
        })
        .collect();

    MethodPlan {
        name: operation.nickname.clone(),
        summary: operation.summary.clone(),
        notes: operation.notes.as_deref().map(strip_markup),
        http_method: operation.method,
        path: path.to_string(),
        params,
        responses,
        execute,
    }
}

fn synthesize_param(
    parameter: &Parameter,
    current_ns: &str,
    model_ns: &str,
    root_ns: &str,
    uses: &mut BTreeSet<String>,
) -> ParamBinding {
    collect_use(
        parameter.ty.referenced_model(),
        current_ns,
        model_ns,
        root_ns,
        uses,
    );
    let resolved = resolve::resolve(&parameter.ty, current_ns, model_ns, root_ns);

    // A repeated-value parameter binds as a list even when the
    // declaration types it as a scalar.
    let (binding, doc_type) = if parameter.allow_multiple {
        (
            format!("Vec<{}>", resolved.binding),
            format!("{}[]", resolved.doc),
        )
    } else {
        (resolved.binding, resolved.doc)
    };

    ParamBinding {
        name: parameter.name.clone(),
        location: parameter.location,
        binding,
        doc_type,
        optional: !parameter.required,
        description: parameter.description.clone(),
    }
}

fn collect_use(
    model: Option<&str>,
    current_ns: &str,
    model_ns: &str,
    root_ns: &str,
    uses: &mut BTreeSet<String>,
) {
    if let Some(name) = model {
        if let Some(line) = resolve::use_line(current_ns, model_ns, root_ns, name) {
            uses.insert(line);
        }
    }
}

/// Strip `<...>` markup spans from free-form notes text.
pub fn strip_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_tag = false;
    for c in text.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}

fn non_empty(text: &str) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}
