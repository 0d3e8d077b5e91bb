//! # girstub Schema
//!
//! GObject Introspection (GIR) schema parsing and semantic model.
//!
//! This crate provides:
//! - Generic XML tree parsing with namespace-qualified tags
//! - The semantic model of one namespace (classes, enums, constants, functions)
//! - A strict model builder that rejects unrecognized schema constructs
//! - Discovery and version selection of schema files in a directory

pub mod builder;
pub mod error;
pub mod node;
pub mod resolver;
pub mod types;
pub mod validation;

pub use builder::{build_namespace, build_repository};
pub use error::{ParseError, ResolveError};
pub use node::{SchemaNode, parse_document, parse_file};
pub use resolver::{ModuleEntry, SCHEMA_EXTENSION, SchemaVersion, resolve, resolve_module};
pub use types::{
    ClassDef, Constant, EnumDef, EnumMember, FieldDef, MethodDef, MethodKind, Namespace,
    ParameterDef, TypeEntity, TypeRef,
};
pub use validation::validate_namespace;

/// Parses and builds the namespace of a GIR document held in memory.
///
/// # Errors
/// Returns `ParseError` if the XML is malformed or the schema cannot be modeled.
pub fn load_namespace(xml: &str) -> Result<Namespace, ParseError> {
    let root = parse_document(xml)?;
    build_repository(&root)
}

/// Parses and builds the namespace of a GIR file.
///
/// # Errors
/// Returns `ParseError` if reading, parsing or building fails.
pub fn load_namespace_file(path: &std::path::Path) -> Result<Namespace, ParseError> {
    let root = parse_file(path)?;
    build_repository(&root)
}
