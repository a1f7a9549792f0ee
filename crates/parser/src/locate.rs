//! Resolution of declaration locations against the listing

use std::path::{Path, PathBuf};

/// Resolve where a resource's declaration document lives.
///
/// Listing paths carry a literal `{format}` placeholder in the
/// filename; `json` is substituted before resolution. The path is
/// then made relative to the listing's `basePath` (a leading `/` on
/// the remainder marks a listing-relative path and is dropped so the
/// join below treats it as relative) and resolved against the
/// directory of the listing file itself.
pub fn declaration_location(input_file: &Path, base_path: &str, resource_path: &str) -> PathBuf {
    let path = resource_path.replace("{format}", "json");

    let relative = path.strip_prefix(base_path).unwrap_or(&path);
    let relative = relative.strip_prefix('/').unwrap_or(relative);

    let dir = input_file.parent().unwrap_or_else(|| Path::new("."));
    dir.join(relative)
}
