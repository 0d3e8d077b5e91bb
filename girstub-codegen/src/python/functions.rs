//! Method and free function rendering.

use super::types::{docstring, map_scalar, sanitize};
use girstub_schema::{MethodDef, Namespace, ParameterDef, TypeRef};

/// Generator for namespace-level functions.
pub struct FunctionGenerator<'a> {
    ns: &'a Namespace,
}

impl<'a> FunctionGenerator<'a> {
    /// Creates a new function generator.
    #[must_use]
    pub fn new(ns: &'a Namespace) -> Self {
        Self { ns }
    }

    /// Generates every free function in document order.
    #[must_use]
    pub fn generate(&self) -> String {
        let mut output = String::new();

        for function in &self.ns.functions {
            output.push_str(&render_method(function, "", false));
            output.push('\n');
        }

        output
    }
}

/// Renders one method at the given indentation.
///
/// Static members of a type get a `@staticmethod` line; top-level functions
/// never do. The body is elided.
#[must_use]
pub fn render_method(method: &MethodDef, indent: &str, is_member: bool) -> String {
    let mut output = String::new();

    if is_member && method.kind.is_static() {
        output.push_str(&format!("{indent}@staticmethod\n"));
    }

    let parameters: Vec<String> = method.parameters.iter().map(render_parameter).collect();
    output.push_str(&format!(
        "{indent}def {}({}) -> {}:\n",
        sanitize(&method.name),
        parameters.join(", "),
        map_scalar(method.return_type.as_deref())
    ));

    if let Some(doc) = &method.doc {
        output.push_str(&format!("{indent}    {}\n", docstring(doc)));
    }
    output.push_str(&format!("{indent}    ...\n\n"));

    output
}

/// Renders one parameter.
fn render_parameter(parameter: &ParameterDef) -> String {
    match &parameter.type_ref {
        TypeRef::Instance => "self".to_string(),
        TypeRef::Varargs => "*args".to_string(),
        other => format!(
            "{}: {}",
            sanitize(&parameter.name),
            map_scalar(other.alias().as_deref())
        ),
    }
}
