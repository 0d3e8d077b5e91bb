//! Error types for schema parsing, model building and module resolution.

use thiserror::Error;

/// Error type for schema parsing and model building.
#[derive(Debug, Error)]
pub enum ParseError {
    /// XML parsing error.
    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// The document is not a usable schema (bad markup, missing root element).
    #[error("malformed schema: {message}")]
    Malformed {
        /// Error message.
        message: String,
    },

    /// A tag does not have the `{uri}name` shape.
    #[error("tag '{tag}' is not namespace-qualified as '{{uri}}name'")]
    TagFormat {
        /// The offending tag.
        tag: String,
    },

    /// Unknown element encountered.
    #[error("unknown element '{element}' in context '{context}'")]
    UnknownElement {
        /// Element name.
        element: String,
        /// Parent context.
        context: String,
    },

    /// Missing required attribute.
    #[error("missing required attribute '{attribute}' on element '{element}'")]
    MissingAttribute {
        /// Element name.
        element: String,
        /// Attribute name.
        attribute: String,
    },

    /// Duplicate definition.
    #[error("duplicate {kind} definition: '{name}'")]
    DuplicateDefinition {
        /// Kind of definition (class, enumeration, ...).
        kind: String,
        /// Name of the duplicate.
        name: String,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// UTF-8 decoding error.
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::str::Utf8Error),
}

impl ParseError {
    /// Creates a malformed schema error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed {
            message: message.into(),
        }
    }

    /// Creates a missing attribute error.
    pub fn missing_attr(element: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self::MissingAttribute {
            element: element.into(),
            attribute: attribute.into(),
        }
    }

    /// Creates an unknown element error.
    pub fn unknown_element(element: impl Into<String>, context: impl Into<String>) -> Self {
        Self::UnknownElement {
            element: element.into(),
            context: context.into(),
        }
    }

    /// Creates a duplicate definition error.
    pub fn duplicate(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self::DuplicateDefinition {
            kind: kind.into(),
            name: name.into(),
        }
    }
}

/// Error type for schema directory resolution.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// IO error while listing the schema directory.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Several versions exist for a module and none matches the request.
    #[error("ambiguous version for module '{name}': no schema matches requested version {requested}")]
    AmbiguousVersion {
        /// Logical module name.
        name: String,
        /// Requested version, rendered for the diagnostic.
        requested: String,
    },

    /// The module exists, but not in the explicitly requested version.
    #[error("module '{name}' has no schema for version {requested}")]
    VersionNotFound {
        /// Logical module name.
        name: String,
        /// Requested version, rendered for the diagnostic.
        requested: String,
    },

    /// No schema file carries the requested logical name.
    #[error("module '{name}' not found")]
    ModuleNotFound {
        /// Logical module name.
        name: String,
    },

    /// A version string could not be parsed.
    #[error("invalid version '{value}'")]
    InvalidVersion {
        /// The offending text.
        value: String,
    },
}
