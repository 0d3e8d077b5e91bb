//! Semantic model builder.
//!
//! Walks a parsed [`SchemaNode`] tree and builds a [`Namespace`]. Every level
//! of the document (namespace, class, method, parameter, ...) dispatches on a
//! closed set of tags. A tag outside that set fails the build with
//! `ParseError::UnknownElement` instead of being skipped, so a stub is never
//! silently incomplete.

use crate::error::ParseError;
use crate::node::SchemaNode;
use crate::types::{
    ClassDef, Constant, EnumDef, EnumMember, FieldDef, MethodDef, MethodKind, Namespace,
    ParameterDef, TypeEntity, TypeRef,
};
use crate::validation::validate_namespace;

/// Element type used for arrays whose element type is not named.
const OPAQUE_ELEMENT: &str = "gpointer";

/// Parameter name GIR uses for C variadic arguments.
const VARIADIC_NAME: &str = "...";

/// Builds the namespace of a whole GIR document.
///
/// # Arguments
/// * `root` - The document's root (`repository`) element
///
/// # Errors
/// Returns `ParseError::Malformed` if the root is not a `repository` holding
/// a `namespace`, or any error from [`build_namespace`].
pub fn build_repository(root: &SchemaNode) -> Result<Namespace, ParseError> {
    let root_name = root.local_name()?;
    if root_name != "repository" {
        return Err(ParseError::malformed(format!(
            "expected root element 'repository', found '{root_name}'"
        )));
    }

    let namespace = root
        .find("namespace")?
        .ok_or_else(|| ParseError::malformed("no namespace element found"))?;
    build_namespace(namespace)
}

/// Builds a namespace from a `namespace` element.
///
/// # Errors
/// Returns `ParseError` on unknown tags, missing names or duplicate
/// definitions.
pub fn build_namespace(node: &SchemaNode) -> Result<Namespace, ParseError> {
    let mut ns = Namespace::new(node.attr("name").unwrap_or_default());
    ns.version = node.attr("version").map(str::to_string);

    for child in node.children() {
        match child.local_name()? {
            "class" => ns.add_type(TypeEntity::Class(build_class(child)?)),
            "interface" => ns.add_type(TypeEntity::Interface(build_class(child)?)),
            "record" => ns.add_type(TypeEntity::Record(build_class(child)?)),
            "enumeration" => ns.add_type(TypeEntity::Enum(build_enum(child)?)),
            "bitfield" => ns.add_type(TypeEntity::Bitfield(build_enum(child)?)),
            "constant" => ns.add_constant(build_constant(child)?),
            "function" => ns.add_function(build_method(child, MethodKind::StaticFunction, None)?),
            "alias" | "function-macro" | "callback" | "boxed" | "docsection" | "union" => {}
            other => return Err(ParseError::unknown_element(other, "namespace")),
        }
    }

    validate_namespace(&ns)?;
    Ok(ns)
}

/// Builds a class, interface or record.
fn build_class(node: &SchemaNode) -> Result<ClassDef, ParseError> {
    let mut class = ClassDef::new(node.require_attr("name")?);
    if let Some(parent) = node.attr("parent").filter(|p| !p.is_empty()) {
        class.add_parent(parent);
    }

    let mut doc = DocSlot::default();
    for child in node.children() {
        match child.local_name()? {
            "method" | "virtual-method" => {
                class.add_method(build_method(child, MethodKind::Instance, None)?);
            }
            "constructor" => {
                let owner = class.name.clone();
                class.add_method(build_method(
                    child,
                    MethodKind::StaticConstructor,
                    Some(owner.as_str()),
                )?);
            }
            "function" => {
                class.add_method(build_method(child, MethodKind::StaticFunction, None)?);
            }
            "field" => {
                if let Some(field) = build_field(child)? {
                    class.add_field(field);
                }
            }
            "implements" => class.add_parent(child.require_attr("name")?),
            "doc" => doc.offer_primary(child),
            "doc-deprecated" | "doc-version" => doc.offer_secondary(child),
            "doc-stability" | "source-position" | "property" | "signal" | "union"
            | "prerequisite" | "attribute" => {}
            other => return Err(ParseError::unknown_element(other, "class")),
        }
    }

    class.doc = doc.into_doc();
    Ok(class)
}

/// Builds a method, constructor or function.
///
/// A constructor's return type is forced to `owner`.
fn build_method(
    node: &SchemaNode,
    kind: MethodKind,
    owner: Option<&str>,
) -> Result<MethodDef, ParseError> {
    let mut method = MethodDef::new(node.require_attr("name")?, kind);

    let mut doc = DocSlot::default();
    for child in node.children() {
        match child.local_name()? {
            "return-value" => method.return_type = build_return(child)?,
            "parameters" => build_parameters(child, &mut method)?,
            "doc" => doc.offer_primary(child),
            "doc-deprecated" | "doc-version" => doc.offer_secondary(child),
            "doc-stability" | "attribute" | "source-position" => {}
            other => return Err(ParseError::unknown_element(other, "method")),
        }
    }

    if let Some(owner) = owner {
        method.return_type = Some(owner.to_string());
    }
    method.doc = doc.into_doc();
    Ok(method)
}

/// Reads the declared return type; only a `type` child counts.
fn build_return(node: &SchemaNode) -> Result<Option<String>, ParseError> {
    Ok(node
        .find("type")?
        .and_then(|t| t.attr("name"))
        .map(str::to_string))
}

/// Adds every parameter of a `parameters` element to `method`.
fn build_parameters(node: &SchemaNode, method: &mut MethodDef) -> Result<(), ParseError> {
    for child in node.children() {
        match child.local_name()? {
            "parameter" => method.add_parameter(build_parameter(child, false)?),
            "instance-parameter" => method.add_parameter(build_parameter(child, true)?),
            other => return Err(ParseError::unknown_element(other, "parameters")),
        }
    }
    Ok(())
}

/// Builds a single parameter.
fn build_parameter(node: &SchemaNode, is_instance: bool) -> Result<ParameterDef, ParseError> {
    let name = node.require_attr("name")?;
    let mut type_ref = TypeRef::Named(None);

    for child in node.children() {
        match child.local_name()? {
            "type" | "array" => type_ref = resolve_type(child)?,
            "varargs" => type_ref = TypeRef::Varargs,
            "doc" | "doc-deprecated" | "doc-version" | "doc-stability" | "attribute" => {}
            other => return Err(ParseError::unknown_element(other, "parameter")),
        }
    }

    if is_instance {
        type_ref = TypeRef::Instance;
    } else if name == VARIADIC_NAME {
        type_ref = TypeRef::Varargs;
    }
    Ok(ParameterDef::new(name, type_ref))
}

/// Builds a field; private fields yield `None`.
fn build_field(node: &SchemaNode) -> Result<Option<FieldDef>, ParseError> {
    let name = node.require_attr("name")?;
    let mut field = FieldDef::new(name, TypeRef::Named(None));

    let mut doc = DocSlot::default();
    for child in node.children() {
        match child.local_name()? {
            "type" | "array" => field.type_ref = resolve_type(child)?,
            "callback" => field.type_ref = TypeRef::named(OPAQUE_ELEMENT),
            "doc" => doc.offer_primary(child),
            "doc-deprecated" | "doc-version" => doc.offer_secondary(child),
            "doc-stability" | "attribute" | "source-position" => {}
            other => return Err(ParseError::unknown_element(other, "field")),
        }
    }

    if node.attr("private") == Some("1") {
        return Ok(None);
    }
    field.doc = doc.into_doc();
    Ok(Some(field))
}

/// Resolves a `type` or `array` element into a type descriptor.
fn resolve_type(node: &SchemaNode) -> Result<TypeRef, ParseError> {
    if node.local_name()? == "array" {
        let element = node
            .find("type")?
            .and_then(|t| t.attr("name"))
            .unwrap_or(OPAQUE_ELEMENT);
        return Ok(TypeRef::Array(element.to_string()));
    }
    Ok(TypeRef::Named(node.attr("name").map(str::to_string)))
}

/// Builds an enumeration or bitfield.
fn build_enum(node: &SchemaNode) -> Result<EnumDef, ParseError> {
    let mut enum_def = EnumDef::new(node.require_attr("name")?);

    let mut doc = DocSlot::default();
    for child in node.children() {
        match child.local_name()? {
            "member" => enum_def.add_member(build_member(child)?),
            "doc" => doc.offer_primary(child),
            "doc-deprecated" | "doc-version" => doc.offer_secondary(child),
            "doc-stability" | "function" | "source-position" | "attribute" => {}
            other => return Err(ParseError::unknown_element(other, "enumeration")),
        }
    }

    enum_def.doc = doc.into_doc();
    Ok(enum_def)
}

/// Builds an enumeration member.
fn build_member(node: &SchemaNode) -> Result<EnumMember, ParseError> {
    let mut member = EnumMember::new(node.require_attr("name")?, node.require_attr("value")?);
    member.doc = collect_doc(node, "member")?;
    Ok(member)
}

/// Builds a namespace-level constant.
fn build_constant(node: &SchemaNode) -> Result<Constant, ParseError> {
    let mut constant = Constant::new(node.require_attr("name")?, node.require_attr("value")?);

    let mut doc = DocSlot::default();
    for child in node.children() {
        match child.local_name()? {
            "type" => constant.type_name = child.attr("name").map(str::to_string),
            "doc" => doc.offer_primary(child),
            "doc-deprecated" | "doc-version" => doc.offer_secondary(child),
            "doc-stability" | "attribute" | "source-position" => {}
            other => return Err(ParseError::unknown_element(other, "constant")),
        }
    }

    constant.doc = doc.into_doc();
    Ok(constant)
}

/// Collects documentation from an element whose only children are docs.
fn collect_doc(node: &SchemaNode, context: &str) -> Result<Option<String>, ParseError> {
    let mut doc = DocSlot::default();
    for child in node.children() {
        match child.local_name()? {
            "doc" => doc.offer_primary(child),
            "doc-deprecated" | "doc-version" => doc.offer_secondary(child),
            "doc-stability" | "attribute" => {}
            other => return Err(ParseError::unknown_element(other, context)),
        }
    }
    Ok(doc.into_doc())
}

/// Documentation capture with primary-over-secondary priority.
///
/// Each slot is set only if still empty; a primary `doc` always wins over
/// deprecation or version notes regardless of document order.
#[derive(Debug, Default)]
struct DocSlot {
    primary: Option<String>,
    secondary: Option<String>,
}

impl DocSlot {
    fn offer_primary(&mut self, node: &SchemaNode) {
        if self.primary.is_none() {
            self.primary = doc_text(node);
        }
    }

    fn offer_secondary(&mut self, node: &SchemaNode) {
        if self.secondary.is_none() {
            self.secondary = doc_text(node);
        }
    }

    fn into_doc(self) -> Option<String> {
        self.primary.or(self.secondary)
    }
}

fn doc_text(node: &SchemaNode) -> Option<String> {
    node.text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}
