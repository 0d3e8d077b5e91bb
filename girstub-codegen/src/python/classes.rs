//! Class, interface and record rendering.

use super::functions::render_method;
use super::types::{docstring, map_type, sanitize};
use girstub_schema::{ClassDef, FieldDef};

/// Member indentation inside a class body.
const INDENT: &str = "    ";

/// Generator for class-like definitions.
pub struct ClassGenerator<'a> {
    class: &'a ClassDef,
}

impl<'a> ClassGenerator<'a> {
    /// Creates a new class generator.
    #[must_use]
    pub fn new(class: &'a ClassDef) -> Self {
        Self { class }
    }

    /// Generates the class block.
    #[must_use]
    pub fn generate(&self) -> String {
        let mut output = String::new();
        let class = self.class;

        if class.parents.is_empty() {
            output.push_str(&format!("class {}:\n", class.name));
        } else {
            output.push_str(&format!(
                "class {}({}):\n",
                class.name,
                class.parents.join(", ")
            ));
        }
        if let Some(doc) = &class.doc {
            output.push_str(&format!("{INDENT}{}\n", docstring(doc)));
        }

        if class.is_empty() {
            output.push_str(&format!("{INDENT}pass\n\n"));
            return output;
        }

        for field in &class.fields {
            output.push_str(&self.generate_field(field));
        }
        if !class.fields.is_empty() {
            output.push('\n');
        }

        for method in &class.methods {
            output.push_str(&render_method(method, INDENT, true));
        }

        output
    }

    /// Generates a field annotation.
    fn generate_field(&self, field: &FieldDef) -> String {
        let mut output = String::new();
        let annotation = map_type(&field.type_ref).unwrap_or_else(|| "object".to_string());

        output.push_str(&format!("{INDENT}{}: {}\n", sanitize(&field.name), annotation));
        if let Some(doc) = &field.doc {
            output.push_str(&format!("{INDENT}{}\n", docstring(doc)));
        }

        output
    }
}
