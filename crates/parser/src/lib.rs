//! Parsing of legacy Swagger 1.x API descriptions
//!
//! The description format is two-tiered: a resource listing
//! enumerates the available resources, and one API declaration per
//! resource enumerates its operations and data models.
//!
//! ## Parsing strategy
//!
//! Raw documents deserialize into the permissive types in `types`;
//! the converter then validates them into the schema IR, rejecting
//! structurally broken input (operations without nicknames, untyped
//! parameters, bare arrays, dangling model references) with a schema
//! error instead of letting the breakage surface during generation.

mod converter;
mod locate;
mod parser;
mod schema;
mod types;

pub use locate::declaration_location;
pub use parser::{DeclarationParser, ListingParser};
pub use schema::{
    ApiDeclaration, Model, Operation, OperationGroup, Parameter, Property, ResourceListing,
    ResourceRef, ResponseMessage,
};
