//! Stub generator orchestrating all rendering.

use crate::config::GeneratorOptions;
use crate::python::types::{constant_literal, docstring, sanitize};
use crate::python::{ClassGenerator, EnumGenerator, FunctionGenerator};
use girstub_schema::{Namespace, TypeEntity};

/// Main stub generator for one namespace.
///
/// Output order: preamble, constants in document order, types sorted by
/// name, free functions in document order.
pub struct Generator<'a> {
    ns: &'a Namespace,
    options: &'a GeneratorOptions,
}

impl<'a> Generator<'a> {
    /// Creates a new generator.
    #[must_use]
    pub fn new(ns: &'a Namespace, options: &'a GeneratorOptions) -> Self {
        Self { ns, options }
    }

    /// Generates the complete stub text.
    #[must_use]
    pub fn generate(&self) -> String {
        let mut output = String::new();

        output.push_str(&self.generate_preamble());
        output.push_str(&self.generate_constants());

        for entity in self.sorted_types() {
            let block = match entity {
                TypeEntity::Class(c) | TypeEntity::Interface(c) | TypeEntity::Record(c) => {
                    ClassGenerator::new(c).generate()
                }
                TypeEntity::Enum(e) => EnumGenerator::new(e, false).generate(),
                TypeEntity::Bitfield(e) => EnumGenerator::new(e, true).generate(),
            };
            output.push_str(&block);
            output.push('\n');
        }

        output.push_str(&FunctionGenerator::new(self.ns).generate());

        output
    }

    /// Generates the imports the stub text depends on.
    fn generate_preamble(&self) -> String {
        let mut output = String::new();

        output.push_str("from typing import List\n");
        output.push_str("import gi\n");
        if !self.options.repository_imports.is_empty() {
            output.push_str(&format!(
                "from gi.repository import {}\n",
                self.options.repository_imports.join(", ")
            ));
        }
        output.push_str("from enum import Enum, IntFlag\n\n");

        output
    }

    /// Generates module-level constants.
    fn generate_constants(&self) -> String {
        let mut output = String::new();

        for constant in &self.ns.constants {
            output.push_str(&format!(
                "{} = {}\n",
                sanitize(&constant.name),
                constant_literal(&constant.value, constant.type_name.as_deref())
            ));
            if let Some(doc) = &constant.doc {
                output.push_str(&docstring(doc));
                output.push('\n');
            }
        }
        if !self.ns.constants.is_empty() {
            output.push('\n');
        }

        output
    }

    /// Returns type entities ordered by name (ordinal, case-sensitive).
    fn sorted_types(&self) -> Vec<&'a TypeEntity> {
        let mut types: Vec<&TypeEntity> = self.ns.types.iter().collect();
        types.sort_by(|a, b| a.name().cmp(b.name()));
        types
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use girstub_schema::load_namespace;

    fn namespace(body: &str) -> Namespace {
        let xml = format!(
            r#"<?xml version="1.0"?>
<repository version="1.2" xmlns="http://www.gtk.org/introspection/core/1.0">
  <namespace name="Demo" version="1.0">
{body}
  </namespace>
</repository>"#
        );
        load_namespace(&xml).expect("Failed to load namespace")
    }

    const PREAMBLE: &str = "from typing import List\n\
                            import gi\n\
                            from gi.repository import Pango, Gdk, Gio, GObject, Gsk\n\
                            from enum import Enum, IntFlag\n\n";

    #[test]
    fn test_generate_widget() {
        let ns = namespace(
            r#"<constant name="MAX" value="10"/>
               <class name="Widget" parent="Base">
                 <method name="show"/>
               </class>"#,
        );
        let options = GeneratorOptions::default();
        let output = Generator::new(&ns, &options).generate();

        let expected = format!(
            "{PREAMBLE}MAX = 10\n\nclass Widget(Base):\n    def show() -> None:\n        ...\n\n\n"
        );
        assert_eq!(output, expected);
    }

    #[test]
    fn test_types_sorted_by_name() {
        let ns = namespace(
            r#"<class name="Zeta"/>
               <enumeration name="Mu"><member name="a" value="0"/></enumeration>
               <class name="Alpha"/>
               <record name="beta"/>"#,
        );
        let options = GeneratorOptions::default();
        let output = Generator::new(&ns, &options).generate();

        let positions: Vec<usize> = ["class Alpha", "class Mu", "class Zeta", "class beta"]
            .iter()
            .map(|needle| output.find(needle).expect(needle))
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_constants_and_functions_keep_document_order() {
        let ns = namespace(
            r#"<constant name="ZED" value="1"><doc>Last letter.</doc></constant>
               <function name="zeta"/>
               <constant name="ALPHA" value="2"/>
               <function name="alpha"/>"#,
        );
        let options = GeneratorOptions::default();
        let output = Generator::new(&ns, &options).generate();

        assert!(output.contains("ZED = 1\n\"\"\"Last letter.\"\"\"\nALPHA = 2\n"));
        assert!(output.find("def zeta").unwrap() < output.find("def alpha").unwrap());
    }

    #[test]
    fn test_constant_literals() {
        let ns = namespace(
            r#"<constant name="stock_ok" value="gtk-ok"><type name="utf8"/></constant>
               <constant name="enabled" value="true"><type name="gboolean"/></constant>"#,
        );
        let options = GeneratorOptions::default();
        let output = Generator::new(&ns, &options).generate();

        assert!(output.contains("STOCK_OK = \"gtk-ok\"\n"));
        assert!(output.contains("ENABLED = True\n"));
    }

    #[test]
    fn test_generate_is_deterministic() {
        let ns = namespace(
            r#"<class name="B"><method name="m"/></class>
               <bitfield name="A"><member name="x" value="1"/></bitfield>
               <interface name="C"/>"#,
        );
        let options = GeneratorOptions::default();
        let generator = Generator::new(&ns, &options);
        assert_eq!(generator.generate(), generator.generate());
    }

    #[test]
    fn test_custom_imports() {
        let ns = namespace("");
        let options = GeneratorOptions::new().repository_imports(Vec::<String>::new());
        let output = Generator::new(&ns, &options).generate();
        assert_eq!(
            output,
            "from typing import List\nimport gi\nfrom enum import Enum, IntFlag\n\n"
        );
    }
}
