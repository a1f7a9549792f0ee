//! Type resolution
//!
//! Maps schema types onto Rust bindings and decides how a model
//! reference is qualified from the namespace it is used in.

use swagen_common::{namespace_segments, PrimitiveKind, TypeRef};

/// A schema type resolved for one use site.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedType {
    /// Rust type expression valid in the using unit's file
    pub binding: String,
    /// Human-readable type for doc comments, arrays as `Item[]`
    pub doc: String,
    pub is_primitive: bool,
}

/// Rust binding for a primitive kind.
pub fn primitive_binding(kind: PrimitiveKind) -> &'static str {
    match kind {
        PrimitiveKind::Integer => "i32",
        PrimitiveKind::Long => "i64",
        PrimitiveKind::Float => "f32",
        PrimitiveKind::Double => "f64",
        PrimitiveKind::String => "String",
        PrimitiveKind::Byte => "u8",
        PrimitiveKind::Boolean => "bool",
        PrimitiveKind::Date => "String",
        PrimitiveKind::DateTime => "String",
    }
}

/// Resolve a schema type as seen from `current_ns`. Model references
/// live in `model_ns`; `root_ns` is the namespace the generated crate
/// is rooted at.
pub fn resolve(ty: &TypeRef, current_ns: &str, model_ns: &str, root_ns: &str) -> ResolvedType {
    match ty {
        TypeRef::Primitive(kind) => ResolvedType {
            binding: primitive_binding(*kind).to_string(),
            doc: kind.name().to_string(),
            is_primitive: true,
        },
        TypeRef::Reference(name) => ResolvedType {
            binding: format!("{}{}", qualifier(current_ns, model_ns, root_ns), name),
            doc: name.clone(),
            is_primitive: false,
        },
        TypeRef::ArrayOf(item) => {
            let item = resolve(item, current_ns, model_ns, root_ns);
            ResolvedType {
                binding: format!("Vec<{}>", item.binding),
                doc: format!("{}[]", item.doc),
                is_primitive: item.is_primitive,
            }
        }
    }
}

/// Qualifier prefix for a name in `target_ns` used from `current_ns`.
///
/// Equal namespaces need no qualifier. A target that is a strict
/// descendant of the current namespace is reached by its relative
/// suffix. Anything else is addressed from the crate root, with the
/// root namespace stripped since it names the crate itself.
fn qualifier(current_ns: &str, target_ns: &str, root_ns: &str) -> String {
    if current_ns == target_ns {
        return String::new();
    }
    if let Some(suffix) = strip_ns_prefix(target_ns, current_ns) {
        return format!("{suffix}::");
    }
    match strip_ns_prefix(target_ns, root_ns) {
        Some(suffix) => format!("crate::{suffix}::"),
        None if target_ns == root_ns => "crate::".to_string(),
        None => format!("crate::{target_ns}::"),
    }
}

/// `use` line that makes the binding produced by [`resolve`] valid in
/// a unit file of `current_ns`, or `None` when the binding is already
/// crate-rooted.
pub fn use_line(current_ns: &str, target_ns: &str, root_ns: &str, name: &str) -> Option<String> {
    if current_ns == target_ns {
        let mut path = crate_path(target_ns, root_ns);
        path.push(name.to_string());
        return Some(format!("use {};", path.join("::")));
    }
    if let Some(suffix) = strip_ns_prefix(target_ns, current_ns) {
        // Bring the first segment of the relative suffix into scope.
        let first = namespace_segments(suffix)[0];
        let mut path = crate_path(current_ns, root_ns);
        path.push(first.to_string());
        return Some(format!("use {};", path.join("::")));
    }
    None
}

/// Namespace segments relative to the root namespace. The root maps
/// to the crate root, so equal namespaces yield no segments.
pub fn namespace_rel_segments<'a>(ns: &'a str, root_ns: &str) -> Vec<&'a str> {
    if ns == root_ns {
        return Vec::new();
    }
    match strip_ns_prefix(ns, root_ns) {
        Some(suffix) => namespace_segments(suffix),
        None => namespace_segments(ns),
    }
}

fn crate_path(ns: &str, root_ns: &str) -> Vec<String> {
    let mut path = vec!["crate".to_string()];
    for segment in namespace_rel_segments(ns, root_ns) {
        path.push(segment.to_string());
    }
    path
}

fn strip_ns_prefix<'a>(ns: &'a str, prefix: &str) -> Option<&'a str> {
    ns.strip_prefix(prefix)?.strip_prefix("::")
}
