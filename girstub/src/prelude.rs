//! Prelude module for convenient imports.
//!
//! ```ignore
//! use girstub::prelude::*;
//! ```

// Schema model
pub use girstub_schema::{
    ClassDef, Constant, EnumDef, EnumMember, FieldDef, MethodDef, MethodKind, Namespace,
    ParameterDef, TypeEntity, TypeRef,
};

// Parsing and resolution
pub use girstub_schema::{
    ParseError, ResolveError, SchemaNode, SchemaVersion, load_namespace, load_namespace_file,
    resolve, resolve_module,
};

// Generation
pub use girstub_codegen::{
    BatchReport, CodegenError, FailurePolicy, Generator, GeneratorOptions, generate_all,
    generate_from_file, generate_from_xml, generate_module,
};
