//! # girstub Codegen
//!
//! Python type-stub generation from GIR schemas.
//!
//! This crate provides:
//! - Rendering of a namespace model into `.pyi` stub text
//! - Single-module generation to any writer
//! - Parallel batch generation of a schema directory

pub mod batch;
pub mod config;
pub mod error;
pub mod generator;
pub mod python;

pub use batch::{BatchReport, generate_all};
pub use config::{FailurePolicy, GeneratorOptions};
pub use error::CodegenError;
pub use generator::Generator;

use girstub_schema::{SchemaVersion, load_namespace, load_namespace_file, resolve_module};
use std::io::Write;
use std::path::Path;

/// Generates a Python stub from a GIR schema string.
///
/// # Arguments
/// * `xml` - GIR XML content
/// * `options` - Generation options
///
/// # Returns
/// The stub text.
///
/// # Errors
/// Returns `CodegenError` if parsing or model building fails.
pub fn generate_from_xml(xml: &str, options: &GeneratorOptions) -> Result<String, CodegenError> {
    let ns = load_namespace(xml)?;
    Ok(Generator::new(&ns, options).generate())
}

/// Generates a Python stub from a GIR schema file.
///
/// # Errors
/// Returns `CodegenError` if reading, parsing, or model building fails.
pub fn generate_from_file(path: &Path, options: &GeneratorOptions) -> Result<String, CodegenError> {
    let ns = load_namespace_file(path)?;
    Ok(Generator::new(&ns, options).generate())
}

/// Generates the stub of one logical module and writes it to `out`.
///
/// The module is looked up in `schema_dir` the same way the batch does,
/// except that an explicit `requested` version must exist exactly. Nothing
/// is written unless the whole stub renders.
///
/// # Errors
/// Returns `CodegenError` if the module cannot be resolved or built, or if
/// writing fails.
pub fn generate_module<W: Write>(
    schema_dir: &Path,
    module: &str,
    requested: Option<SchemaVersion>,
    options: &GeneratorOptions,
    out: &mut W,
) -> Result<(), CodegenError> {
    let path = resolve_module(schema_dir, &options.schema_extension, module, requested)?;
    tracing::debug!("generating {} from {}", module, path.display());

    let stub = generate_from_file(&path, options).map_err(|e| e.in_module(module, &path))?;
    out.write_all(stub.as_bytes())?;
    out.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use girstub_schema::ResolveError;

    const LABEL_GIR: &str = r#"<?xml version="1.0"?>
<repository version="1.2" xmlns="http://www.gtk.org/introspection/core/1.0">
  <namespace name="Gtk" version="4.0">
    <class name="Label" parent="Widget">
      <constructor name="new">
        <parameters>
          <parameter name="str"><type name="utf8"/></parameter>
        </parameters>
      </constructor>
      <method name="get_text">
        <return-value><type name="utf8"/></return-value>
        <parameters>
          <instance-parameter name="self"><type name="Label"/></instance-parameter>
        </parameters>
      </method>
    </class>
  </namespace>
</repository>"#;

    #[test]
    fn test_generate_from_xml() {
        let output = generate_from_xml(LABEL_GIR, &GeneratorOptions::default())
            .expect("Failed to generate");
        assert!(output.contains("class Label(Widget):\n"));
        assert!(output.contains("    @staticmethod\n    def new(str: str) -> 'Label':\n"));
        assert!(output.contains("    def get_text(self) -> str:\n"));
    }

    #[test]
    fn test_generate_from_xml_invalid() {
        let result = generate_from_xml("<repository>", &GeneratorOptions::default());
        assert!(matches!(result, Err(CodegenError::Parse(_))));
    }

    #[test]
    fn test_generate_module_to_writer() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        std::fs::write(dir.path().join("Gtk-4.0.gir"), LABEL_GIR).unwrap();

        let mut out = Vec::new();
        generate_module(dir.path(), "Gtk", None, &GeneratorOptions::default(), &mut out)
            .expect("Failed to generate");

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("from typing import List\n"));
        assert!(text.contains("class Label(Widget):"));
    }

    #[test]
    fn test_generate_module_not_found() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let mut out = Vec::new();

        let err = generate_module(dir.path(), "Gtk", None, &GeneratorOptions::default(), &mut out)
            .unwrap_err();
        assert!(matches!(
            err,
            CodegenError::Resolve(ResolveError::ModuleNotFound { .. })
        ));
        assert!(out.is_empty());
    }

    #[test]
    fn test_generate_module_wrong_version() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        std::fs::write(dir.path().join("Gtk-4.0.gir"), LABEL_GIR).unwrap();
        let mut out = Vec::new();

        let err = generate_module(
            dir.path(),
            "Gtk",
            Some(SchemaVersion::new(3, 0)),
            &GeneratorOptions::default(),
            &mut out,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            CodegenError::Resolve(ResolveError::VersionNotFound { .. })
        ));
        assert!(out.is_empty());
    }
}
