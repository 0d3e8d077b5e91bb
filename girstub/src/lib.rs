//! # girstub
//!
//! Python type-stub generator for GObject-Introspection schemas.
//!
//! girstub reads GIR XML files and writes one `.pyi` stub per logical
//! module, so Python tooling can type-check code that uses the
//! `gi.repository` bindings.
//!
//! ## Features
//!
//! - **Strict schema walk** - Unknown constructs fail the module instead of
//!   being silently dropped
//! - **Version resolution** - Picks one schema per module from a directory
//!   holding several versions
//! - **Deterministic output** - Types sorted by name, everything else in
//!   document order
//! - **Parallel batch** - Whole directories generated on a worker pool
//!
//! ## Quick Start
//!
//! ```ignore
//! use girstub::prelude::*;
//!
//! let options = GeneratorOptions::new().failure_policy(FailurePolicy::SkipAndContinue);
//! let report = generate_all(Path::new("/usr/share/gir-1.0"), Path::new("stubs"), None, &options)?;
//! ```
//!
//! ## Crate Organization
//!
//! - [`schema`] - XML tree, namespace model, module resolution
//! - [`codegen`] - Stub rendering and batch generation

pub mod prelude;

/// Schema parsing, model building and module resolution.
pub mod schema {
    pub use girstub_schema::*;
}

/// Python stub generation.
pub mod codegen {
    pub use girstub_codegen::*;
}

pub use prelude::*;
