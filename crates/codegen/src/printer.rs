//! Rust source printer
//!
//! Renders code units into source text. All output goes through this
//! module so the generated surface stays in one place; unit names
//! land in identifier positions and free-form text is confined to doc
//! comments and escaped string literals.

use crate::ast::{
    ExecutePlan, FieldBinding, MethodPlan, ModelUnit, ParamBinding, ServiceUnit,
};
use crate::resolve::namespace_rel_segments;
use std::collections::{BTreeMap, BTreeSet};
use swagen_common::{HttpMethod, ParamLocation};

const HEADER: &str = "// Generated by swagen. Do not edit.";

/// Render one service unit as a source file.
pub fn render_service(unit: &ServiceUnit) -> String {
    let mut out = String::new();
    out.push_str(HEADER);
    out.push_str("\n\n");

    out.push_str("use swagen_runtime::{ApiClient, HttpTransport, Method, RequestError};\n");
    for line in &unit.uses {
        out.push_str(line);
        out.push('\n');
    }
    out.push('\n');

    if let Some(description) = &unit.description {
        push_doc(&mut out, "", description);
    }
    out.push_str(&format!("pub struct {}<T: HttpTransport> {{\n", unit.name));
    out.push_str("    client: ApiClient<T>,\n");
    out.push_str("}\n\n");

    out.push_str(&format!("impl<T: HttpTransport> {}<T> {{\n", unit.name));
    out.push_str("    pub fn new(client: ApiClient<T>) -> Self {\n");
    out.push_str("        Self { client }\n");
    out.push_str("    }\n");

    for method in &unit.methods {
        out.push('\n');
        render_method(&mut out, method);
    }

    out.push_str("}\n");
    out
}

fn render_method(out: &mut String, method: &MethodPlan) {
    render_method_doc(out, method);

    let params: Vec<String> = method
        .params
        .iter()
        .map(|p| {
            if p.optional {
                format!("{}: Option<{}>", ident(&p.name), p.binding)
            } else {
                format!("{}: {}", ident(&p.name), p.binding)
            }
        })
        .collect();
    let return_binding = match &method.execute {
        ExecutePlan::Empty => "()".to_string(),
        ExecutePlan::Typed { binding, .. } => binding.clone(),
    };
    out.push_str(&format!(
        "    pub fn {}(&self{}) -> Result<{}, RequestError> {{\n",
        ident(&method.name),
        params
            .iter()
            .map(|p| format!(", {p}"))
            .collect::<String>(),
        return_binding,
    ));

    // A parameter named "request" would shadow the builder local.
    let local = if method.params.iter().any(|p| p.name == "request") {
        "__request"
    } else {
        "request"
    };
    let needs_mut = !method.params.is_empty() || !method.responses.is_empty();
    out.push_str(&format!(
        "        let {}{local} = self.client.new_request(Method::{}, {});\n",
        if needs_mut { "mut " } else { "" },
        method_variant(method.http_method),
        string_literal(&method.path),
    ));

    for param in &method.params {
        render_param_statement(out, param, local);
    }
    for response in &method.responses {
        out.push_str(&format!(
            "        {local}.define_response({}, {}, {});\n",
            response.code,
            string_literal(&response.message),
            response.has_model,
        ));
    }

    match method.execute {
        ExecutePlan::Empty => out.push_str(&format!("        {local}.execute_empty()\n")),
        ExecutePlan::Typed { .. } => out.push_str(&format!("        {local}.execute()\n")),
    }
    out.push_str("    }\n");
}

fn render_method_doc(out: &mut String, method: &MethodPlan) {
    let mut sections: Vec<String> = Vec::new();
    if let Some(summary) = &method.summary {
        sections.push(summary.clone());
    }
    if let Some(notes) = &method.notes {
        if !notes.is_empty() {
            sections.push(notes.clone());
        }
    }
    if !method.params.is_empty() {
        let mut args = String::from("# Arguments\n");
        for param in &method.params {
            args.push_str(&format!("\n* `{}` - ({})", param.name, param.doc_type));
            if let Some(description) = &param.description {
                args.push_str(&format!(" {description}"));
            }
        }
        sections.push(args);
    }
    if let ExecutePlan::Typed { doc, .. } = &method.execute {
        sections.push(format!("# Returns\n\n{doc}"));
    }
    push_doc(out, "    ", &sections.join("\n\n"));
}

fn render_param_statement(out: &mut String, param: &ParamBinding, local: &str) {
    let value = ident(&param.name);
    let attach = match param.location {
        ParamLocation::Path => format!(
            "{local}.path_param({}, {value});",
            string_literal(&param.name),
        ),
        ParamLocation::Query => format!(
            "{local}.query_param({}, {value});",
            string_literal(&param.name),
        ),
        ParamLocation::Body => format!("{local}.body_param(&{value})?;"),
    };
    if param.optional {
        out.push_str(&format!(
            "        if let Some({value}) = {value} {{\n            {attach}\n        }}\n",
        ));
    } else {
        out.push_str(&format!("        {attach}\n"));
    }
}

/// Render one model unit as a source file.
pub fn render_model(unit: &ModelUnit) -> String {
    let mut out = String::new();
    out.push_str(HEADER);
    out.push_str("\n\n");

    out.push_str("use serde::{Deserialize, Serialize};\n");
    for line in &unit.uses {
        out.push_str(line);
        out.push('\n');
    }
    out.push('\n');

    if let Some(description) = &unit.description {
        push_doc(&mut out, "", description);
    }
    out.push_str("#[derive(Debug, Clone, Serialize, Deserialize)]\n");
    out.push_str(&format!("pub struct {} {{\n", unit.name));

    let mut first = true;
    for field in &unit.fields {
        if !first {
            out.push('\n');
        }
        first = false;
        render_field(&mut out, field);
    }

    out.push_str("}\n");
    out
}

fn render_field(out: &mut String, field: &FieldBinding) {
    let doc = match &field.description {
        Some(description) => format!("({}) {}", field.doc_type, description),
        None => format!("({})", field.doc_type),
    };
    push_doc(out, "    ", &doc);
    let name = ident(&field.name);
    // Raw identifiers keep their wire name; the fallback escapes need
    // an explicit rename.
    if name != field.name && !name.starts_with("r#") {
        out.push_str(&format!(
            "    #[serde(rename = {})]\n",
            string_literal(&field.name)
        ));
    }
    if field.required {
        out.push_str(&format!("    pub {}: {},\n", name, field.binding));
    } else {
        out.push_str("    #[serde(skip_serializing_if = \"Option::is_none\")]\n");
        out.push_str(&format!("    pub {}: Option<{}>,\n", name, field.binding));
    }
}

/// Render the generated crate's `lib.rs`: nested namespace modules
/// wiring every unit file in with a `#[path]` include and re-export.
pub fn render_lib(services: &[ServiceUnit], models: &[&ModelUnit], root_ns: &str) -> String {
    let mut tree = ModuleTree::default();
    for unit in services {
        tree.insert(&namespace_rel_segments(&unit.namespace, root_ns), &unit.name);
    }
    for unit in models {
        tree.insert(&namespace_rel_segments(&unit.namespace, root_ns), &unit.name);
    }

    let mut out = String::new();
    out.push_str(HEADER);
    out.push('\n');
    out.push_str("//\n");
    out.push_str("// Method and field names follow the source description verbatim.\n");
    out.push_str("#![allow(non_snake_case)]\n");
    out.push_str("#![allow(non_camel_case_types)]\n");
    tree.render(&mut out, 0);
    out
}

#[derive(Default)]
struct ModuleTree {
    units: BTreeSet<String>,
    children: BTreeMap<String, ModuleTree>,
}

impl ModuleTree {
    fn insert(&mut self, segments: &[&str], name: &str) {
        match segments.split_first() {
            None => {
                self.units.insert(name.to_string());
            }
            Some((first, rest)) => self
                .children
                .entry((*first).to_string())
                .or_default()
                .insert(rest, name),
        }
    }

    fn render(&self, out: &mut String, depth: usize) {
        let indent = "    ".repeat(depth);
        for name in &self.units {
            let module = module_name(name);
            out.push('\n');
            out.push_str(&format!("{indent}#[path = {}]\n", string_literal(&format!("{name}.rs"))));
            out.push_str(&format!("{indent}mod {module};\n"));
            out.push_str(&format!("{indent}pub use {module}::*;\n"));
        }
        for (segment, child) in &self.children {
            out.push('\n');
            out.push_str(&format!("{indent}pub mod {segment} {{\n"));
            child.render(out, depth + 1);
            out.push_str(&format!("{indent}}}\n"));
        }
    }
}

/// Snake-case module name for a unit file.
pub fn module_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut prev_lower = false;
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            if prev_lower {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
            prev_lower = false;
        } else {
            prev_lower = c.is_ascii_lowercase() || c.is_ascii_digit();
            out.push(c);
        }
    }
    out
}

/// Escape a verbatim schema name for an identifier position.
/// Keywords become raw identifiers; the few names raw syntax cannot
/// express get a trailing underscore.
fn ident(name: &str) -> String {
    match name {
        "self" | "Self" | "super" | "crate" | "_" => format!("{name}_"),
        _ if is_keyword(name) => format!("r#{name}"),
        _ => name.to_string(),
    }
}

fn is_keyword(name: &str) -> bool {
    matches!(
        name,
        "as" | "async"
            | "await"
            | "break"
            | "const"
            | "continue"
            | "dyn"
            | "else"
            | "enum"
            | "extern"
            | "false"
            | "fn"
            | "for"
            | "if"
            | "impl"
            | "in"
            | "let"
            | "loop"
            | "match"
            | "mod"
            | "move"
            | "mut"
            | "pub"
            | "ref"
            | "return"
            | "static"
            | "struct"
            | "trait"
            | "true"
            | "type"
            | "unsafe"
            | "use"
            | "where"
            | "while"
            | "abstract"
            | "become"
            | "box"
            | "do"
            | "final"
            | "macro"
            | "override"
            | "priv"
            | "try"
            | "typeof"
            | "unsized"
            | "virtual"
            | "yield"
    )
}

fn method_variant(method: HttpMethod) -> &'static str {
    match method {
        HttpMethod::Get => "Get",
        HttpMethod::Post => "Post",
        HttpMethod::Put => "Put",
        HttpMethod::Delete => "Delete",
        HttpMethod::Patch => "Patch",
        HttpMethod::Head => "Head",
        HttpMethod::Options => "Options",
    }
}

fn push_doc(out: &mut String, indent: &str, text: &str) {
    for line in text.lines() {
        if line.is_empty() {
            out.push_str(&format!("{indent}///\n"));
        } else {
            out.push_str(&format!("{indent}/// {line}\n"));
        }
    }
}

fn string_literal(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hello_service() -> ServiceUnit {
        ServiceUnit {
            name: "GreetingServiceApi".to_string(),
            namespace: "fbs".to_string(),
            description: Some("Greeting Service".to_string()),
            uses: vec!["use crate::model;".to_string()],
            methods: vec![MethodPlan {
                name: "helloSubject".to_string(),
                summary: Some("Say hello".to_string()),
                notes: None,
                http_method: HttpMethod::Get,
                path: "/hello/{subject}".to_string(),
                params: vec![ParamBinding {
                    name: "subject".to_string(),
                    location: ParamLocation::Path,
                    binding: "String".to_string(),
                    doc_type: "string".to_string(),
                    optional: false,
                    description: Some("Who to greet".to_string()),
                }],
                responses: vec![],
                execute: ExecutePlan::Typed {
                    binding: "model::Greeting".to_string(),
                    doc: "Greeting".to_string(),
                },
            }],
        }
    }

    #[test]
    fn test_service_rendering() {
        let rendered = render_service(&hello_service());
        assert!(rendered.starts_with(HEADER));
        assert!(rendered.contains("pub struct GreetingServiceApi<T: HttpTransport> {"));
        assert!(rendered.contains(
            "pub fn helloSubject(&self, subject: String) -> Result<model::Greeting, RequestError> {"
        ));
        assert!(rendered
            .contains("let mut request = self.client.new_request(Method::Get, \"/hello/{subject}\");"));
        assert!(rendered.contains("request.path_param(\"subject\", subject);"));
        assert!(rendered.contains("request.execute()"));
        assert!(rendered.contains("/// * `subject` - (string) Who to greet"));
    }

    #[test]
    fn test_optional_parameter_attaches_conditionally() {
        let mut unit = hello_service();
        unit.methods[0].params[0] = ParamBinding {
            name: "status".to_string(),
            location: ParamLocation::Query,
            binding: "String".to_string(),
            doc_type: "string".to_string(),
            optional: true,
            description: None,
        };
        let rendered = render_service(&unit);
        assert!(rendered.contains("status: Option<String>"));
        assert!(rendered.contains("if let Some(status) = status {"));
        assert!(rendered.contains("request.query_param(\"status\", status);"));
    }

    #[test]
    fn test_void_method_executes_empty() {
        let mut unit = hello_service();
        unit.methods[0].execute = ExecutePlan::Empty;
        let rendered = render_service(&unit);
        assert!(rendered.contains("-> Result<(), RequestError> {"));
        assert!(rendered.contains("request.execute_empty()"));
    }

    #[test]
    fn test_response_registration() {
        let mut unit = hello_service();
        unit.methods[0].responses = vec![crate::ast::ResponsePlan {
            code: 404,
            message: "Not \"found\"".to_string(),
            has_model: false,
        }];
        let rendered = render_service(&unit);
        assert!(rendered.contains("request.define_response(404, \"Not \\\"found\\\"\", false);"));
    }

    #[test]
    fn test_model_rendering() {
        let unit = ModelUnit {
            name: "Pet".to_string(),
            namespace: "fbs::model".to_string(),
            description: Some("A pet in the store".to_string()),
            uses: vec!["use crate::model::Tag;".to_string()],
            fields: vec![
                FieldBinding {
                    name: "id".to_string(),
                    binding: "i64".to_string(),
                    doc_type: "long".to_string(),
                    required: true,
                    description: Some("Unique identifier".to_string()),
                },
                FieldBinding {
                    name: "tags".to_string(),
                    binding: "Vec<Tag>".to_string(),
                    doc_type: "Tag[]".to_string(),
                    required: false,
                    description: None,
                },
            ],
        };
        let rendered = render_model(&unit);
        assert!(rendered.contains("#[derive(Debug, Clone, Serialize, Deserialize)]"));
        assert!(rendered.contains("pub struct Pet {"));
        assert!(rendered.contains("    pub id: i64,"));
        assert!(rendered.contains("#[serde(skip_serializing_if = \"Option::is_none\")]"));
        assert!(rendered.contains("    pub tags: Option<Vec<Tag>>,"));
        assert!(rendered.contains("/// (long) Unique identifier"));
    }

    #[test]
    fn test_lib_wiring() {
        let service = hello_service();
        let model = ModelUnit {
            name: "Greeting".to_string(),
            namespace: "fbs::model".to_string(),
            description: None,
            uses: vec![],
            fields: vec![],
        };
        let rendered = render_lib(&[service], &[&model], "fbs");
        assert!(rendered.contains("#![allow(non_snake_case)]"));
        assert!(rendered.contains("#[path = \"GreetingServiceApi.rs\"]"));
        assert!(rendered.contains("mod greeting_service_api;"));
        assert!(rendered.contains("pub use greeting_service_api::*;"));
        assert!(rendered.contains("pub mod model {"));
        assert!(rendered.contains("#[path = \"Greeting.rs\"]"));
    }

    #[test]
    fn test_parameter_named_request_does_not_shadow_the_builder() {
        let mut unit = hello_service();
        unit.methods[0].params[0].name = "request".to_string();
        unit.methods[0].path = "/hello/{request}".to_string();
        let rendered = render_service(&unit);
        assert!(rendered.contains("pub fn helloSubject(&self, request: String)"));
        assert!(rendered.contains("let mut __request = self.client.new_request(Method::Get,"));
        assert!(rendered.contains("__request.path_param(\"request\", request);"));
        assert!(rendered.contains("__request.execute()"));
    }

    #[test]
    fn test_keyword_parameter_names_are_raw_escaped() {
        let mut unit = hello_service();
        unit.methods[0].params[0] = ParamBinding {
            name: "type".to_string(),
            location: ParamLocation::Query,
            binding: "String".to_string(),
            doc_type: "string".to_string(),
            optional: true,
            description: None,
        };
        let rendered = render_service(&unit);
        assert!(rendered.contains("r#type: Option<String>"));
        assert!(rendered.contains("if let Some(r#type) = r#type {"));
        assert!(rendered.contains("request.query_param(\"type\", r#type);"));
    }

    #[test]
    fn test_keyword_field_names_are_raw_escaped() {
        let unit = ModelUnit {
            name: "Token".to_string(),
            namespace: "fbs".to_string(),
            description: None,
            uses: vec![],
            fields: vec![
                FieldBinding {
                    name: "type".to_string(),
                    binding: "String".to_string(),
                    doc_type: "string".to_string(),
                    required: true,
                    description: None,
                },
                FieldBinding {
                    name: "self".to_string(),
                    binding: "String".to_string(),
                    doc_type: "string".to_string(),
                    required: true,
                    description: None,
                },
            ],
        };
        let rendered = render_model(&unit);
        // Raw identifiers serialize under their unescaped name.
        assert!(rendered.contains("    pub r#type: String,"));
        assert!(!rendered.contains("#[serde(rename = \"type\")]"));
        assert!(rendered.contains("#[serde(rename = \"self\")]"));
        assert!(rendered.contains("    pub self_: String,"));
    }

    #[test]
    fn test_module_names() {
        assert_eq!(module_name("GreetingServiceApi"), "greeting_service_api");
        assert_eq!(module_name("Api"), "api");
        assert_eq!(module_name("PetV2Api"), "pet_v2_api");
    }
}
