//! Scalar type mapping and identifier rules for Python stubs.

use girstub_schema::TypeRef;

/// Python's "no value" type.
pub const NONE_TYPE: &str = "None";

/// Python keywords that cannot be used as identifiers.
const PYTHON_KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global",
    "if", "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return",
    "try", "while", "with", "yield",
];

/// Maps a GIR scalar type name to a Python type.
///
/// Names outside the scalar table are references to other modeled types and
/// come back quoted, so they may point at types declared later or in
/// another module.
#[must_use]
pub fn map_scalar(name: Option<&str>) -> String {
    let Some(name) = name.filter(|n| !n.is_empty()) else {
        return NONE_TYPE.to_string();
    };

    let mapped = match name {
        "gboolean" => "bool",
        "gint" | "guint" | "gint8" | "guint8" | "gint16" | "guint16" | "gint32" | "guint32"
        | "gint64" | "guint64" | "gshort" | "gushort" | "glong" | "gulong" | "gsize"
        | "gssize" | "goffset" | "gintptr" | "guintptr" | "gchar" | "guchar" | "gunichar"
        | "GType" => "int",
        "gfloat" | "gdouble" => "float",
        "utf8" | "filename" => "str",
        "List[utf8]" => "List[str]",
        "gpointer" | "gconstpointer" => "object",
        "none" => NONE_TYPE,
        other => {
            return match other.strip_prefix("List[").and_then(|s| s.strip_suffix(']')) {
                Some(element) => format!("List[{}]", map_scalar(Some(element))),
                None => format!("'{other}'"),
            };
        }
    };
    mapped.to_string()
}

/// Maps a parameter or field type descriptor to a Python annotation.
///
/// Receivers and variadics carry no annotation and map to `None`.
#[must_use]
pub fn map_type(type_ref: &TypeRef) -> Option<String> {
    match type_ref {
        TypeRef::Named(_) | TypeRef::Array(_) => Some(map_scalar(type_ref.alias().as_deref())),
        TypeRef::Varargs | TypeRef::Instance => None,
    }
}

/// Makes a schema name usable as a Python identifier.
///
/// Keywords and names starting with a digit get a leading underscore;
/// anything else is returned unchanged.
#[must_use]
pub fn sanitize(name: &str) -> String {
    let starts_with_digit = name.chars().next().is_some_and(|c| c.is_ascii_digit());
    if starts_with_digit || PYTHON_KEYWORDS.contains(&name) {
        format!("_{name}")
    } else {
        name.to_string()
    }
}

/// Renders text as a triple-quoted docstring.
///
/// A trailing quote is split off before embedded triple quotes are escaped,
/// so it never merges with the closing delimiter.
#[must_use]
pub fn docstring(text: &str) -> String {
    let escaped = text.replace('\\', "\\\\");
    let (body, trailing_quote) = match escaped.strip_suffix('"') {
        Some(body) => (body, "\\\""),
        None => (escaped.as_str(), ""),
    };
    let body = body.replace("\"\"\"", "\\\"\\\"\\\"");
    format!("\"\"\"{body}{trailing_quote}\"\"\"")
}

/// Renders a constant value as a Python literal for its declared type.
#[must_use]
pub fn constant_literal(value: &str, type_name: Option<&str>) -> String {
    match type_name {
        Some("utf8" | "filename") => format!("\"{}\"", escape_string(value)),
        Some("gboolean") => match value {
            "true" | "TRUE" | "1" => "True".to_string(),
            "false" | "FALSE" | "0" => "False".to_string(),
            other => other.to_string(),
        },
        _ => value.to_string(),
    }
}

/// Escapes text for a double-quoted Python string literal.
fn escape_string(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            c if c.is_control() => escaped.push_str(&format!("\\u{:04x}", u32::from(c))),
            c => escaped.push(c),
        }
    }
    escaped
}
