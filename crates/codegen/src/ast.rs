//! Code units handed to the printer
//!
//! Synthesizers build these plans from the schema IR; the printer
//! turns them into Rust source. Nothing user-supplied is ever spliced
//! into statement text directly, names and messages only ever land in
//! identifier or string-literal positions the printer controls.

use swagen_common::{HttpMethod, ParamLocation};

/// One generated service struct
#[derive(Debug, Clone)]
pub struct ServiceUnit {
    /// Struct name, e.g. `GreetingServiceApi`
    pub name: String,
    /// Namespace the unit lives in (`::`-separated)
    pub namespace: String,
    pub description: Option<String>,
    /// Fully rendered `use` lines, deduplicated and sorted
    pub uses: Vec<String>,
    pub methods: Vec<MethodPlan>,
}

/// One generated service method
#[derive(Debug, Clone)]
pub struct MethodPlan {
    /// Method name, the operation nickname verbatim
    pub name: String,
    pub summary: Option<String>,
    pub notes: Option<String>,
    pub http_method: HttpMethod,
    /// Endpoint path with `{param}` placeholders intact
    pub path: String,
    pub params: Vec<ParamBinding>,
    pub responses: Vec<ResponsePlan>,
    pub execute: ExecutePlan,
}

/// One formal parameter of a generated method
#[derive(Debug, Clone)]
pub struct ParamBinding {
    pub name: String,
    pub location: ParamLocation,
    /// Rust type the parameter binds to, before `Option` wrapping
    pub binding: String,
    /// Human-readable type for the doc comment
    pub doc_type: String,
    /// Optional parameters wrap the binding in `Option` and are
    /// omitted from the request when absent
    pub optional: bool,
    pub description: Option<String>,
}

/// One `define_response` registration
#[derive(Debug, Clone)]
pub struct ResponsePlan {
    pub code: u16,
    pub message: String,
    pub has_model: bool,
}

/// How a method resolves its request
#[derive(Debug, Clone)]
pub enum ExecutePlan {
    /// Void operation, the success body is ignored
    Empty,
    /// The success body decodes into `binding`
    Typed { binding: String, doc: String },
}

/// One generated data struct
#[derive(Debug, Clone)]
pub struct ModelUnit {
    pub name: String,
    pub namespace: String,
    pub description: Option<String>,
    pub uses: Vec<String>,
    pub fields: Vec<FieldBinding>,
}

/// One field of a generated data struct
#[derive(Debug, Clone)]
pub struct FieldBinding {
    /// Property name, verbatim
    pub name: String,
    pub binding: String,
    pub doc_type: String,
    /// Required fields bind structurally; everything else is `Option`
    pub required: bool,
    pub description: Option<String>,
}
