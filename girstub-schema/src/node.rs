//! Generic XML tree for GIR schema documents.
//!
//! The parser does not know the GIR vocabulary. It turns a document into a
//! tree of [`SchemaNode`]s whose tags are namespace-qualified as `{uri}name`,
//! and the builder reads the tree through the local-name view.

use crate::error::ParseError;
use quick_xml::NsReader;
use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;
use std::collections::HashMap;
use std::path::Path;

/// A parsed XML element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaNode {
    tag: String,
    attributes: HashMap<String, String>,
    children: Vec<SchemaNode>,
    text: Option<String>,
}

impl SchemaNode {
    /// Creates a node with the given qualified tag and no content.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: HashMap::new(),
            children: Vec::new(),
            text: None,
        }
    }

    /// Returns the qualified tag, `{uri}name` for namespaced elements.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Returns the local part of the tag.
    ///
    /// # Errors
    /// Returns `ParseError::TagFormat` if the tag is not `{uri}name`.
    pub fn local_name(&self) -> Result<&str, ParseError> {
        split_tag(&self.tag).map(|(_, local)| local)
    }

    /// Looks up an attribute by its name as written in the document
    /// (`name`, `c:type`, ...).
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Looks up an attribute that must be present and non-empty.
    ///
    /// # Errors
    /// Returns `ParseError::MissingAttribute` naming this element.
    pub fn require_attr(&self, name: &str) -> Result<&str, ParseError> {
        match self.attr(name) {
            Some(value) if !value.is_empty() => Ok(value),
            _ => {
                let element = self.local_name().unwrap_or(&self.tag);
                Err(ParseError::missing_attr(element, name))
            }
        }
    }

    /// Returns the child elements in document order.
    #[must_use]
    pub fn children(&self) -> &[SchemaNode] {
        &self.children
    }

    /// Returns the text content, if the element holds any non-blank text.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Returns the first child with the given local name.
    ///
    /// # Errors
    /// Returns `ParseError::TagFormat` if a child tag is not qualified.
    pub fn find(&self, local: &str) -> Result<Option<&SchemaNode>, ParseError> {
        for child in &self.children {
            if child.local_name()? == local {
                return Ok(Some(child));
            }
        }
        Ok(None)
    }

    /// Sets an attribute.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    /// Appends a child element.
    pub fn push_child(&mut self, child: SchemaNode) {
        self.children.push(child);
    }

    /// Appends text content.
    pub fn push_text(&mut self, text: &str) {
        match &mut self.text {
            Some(existing) => existing.push_str(text),
            None => self.text = Some(text.to_string()),
        }
    }

    fn finish(&mut self) {
        if self.text.as_deref().is_some_and(|t| t.trim().is_empty()) {
            self.text = None;
        }
    }
}

/// Splits a `{uri}name` tag into its namespace URI and local name.
///
/// # Errors
/// Returns `ParseError::TagFormat` if either part is missing.
pub fn split_tag(tag: &str) -> Result<(&str, &str), ParseError> {
    tag.strip_prefix('{')
        .and_then(|rest| rest.split_once('}'))
        .filter(|(uri, local)| !uri.is_empty() && !local.is_empty())
        .ok_or_else(|| ParseError::TagFormat {
            tag: tag.to_string(),
        })
}

/// Parses a schema file into its root node.
///
/// # Errors
/// Returns `ParseError::Io` if the file cannot be read, `ParseError::Malformed`
/// if it is not UTF-8, or the errors of [`parse_document`].
pub fn parse_file(path: &Path) -> Result<SchemaNode, ParseError> {
    let bytes = std::fs::read(path)?;
    let xml = String::from_utf8(bytes).map_err(|e| {
        ParseError::malformed(format!("{} is not valid UTF-8: {e}", path.display()))
    })?;
    parse_document(&xml)
}

/// Parses an XML document into its root node.
///
/// # Arguments
/// * `xml` - XML document content
///
/// # Returns
/// The root element with its full subtree.
///
/// # Errors
/// Returns `ParseError` if the XML is malformed or has no root element.
pub fn parse_document(xml: &str) -> Result<SchemaNode, ParseError> {
    let mut reader = NsReader::from_str(xml);

    let mut stack: Vec<SchemaNode> = Vec::new();
    let mut root: Option<SchemaNode> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_resolved_event_into(&mut buf) {
            Ok((ns, Event::Start(ref e))) => {
                stack.push(open_node(&ns, e)?);
            }
            Ok((ns, Event::Empty(ref e))) => {
                let node = open_node(&ns, e)?;
                attach(&mut stack, &mut root, node)?;
            }
            Ok((_, Event::End(_))) => {
                let node = stack
                    .pop()
                    .ok_or_else(|| ParseError::malformed("unbalanced end tag"))?;
                attach(&mut stack, &mut root, node)?;
            }
            Ok((_, Event::Text(ref t))) => {
                if let Some(top) = stack.last_mut() {
                    top.push_text(std::str::from_utf8(t.as_ref())?);
                }
            }
            Ok((_, Event::CData(ref t))) => {
                if let Some(top) = stack.last_mut() {
                    top.push_text(std::str::from_utf8(t.as_ref())?);
                }
            }
            Ok((_, Event::GeneralRef(ref r))) => {
                if let Some(top) = stack.last_mut() {
                    let reference = format!("&{};", std::str::from_utf8(r.as_ref())?);
                    let resolved =
                        unescape(&reference).map_err(|e| ParseError::malformed(e.to_string()))?;
                    top.push_text(&resolved);
                }
            }
            Ok((_, Event::Eof)) => break,
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    if let Some(open) = stack.last() {
        return Err(ParseError::malformed(format!(
            "element '{}' is never closed",
            open.tag
        )));
    }

    root.ok_or_else(|| ParseError::malformed("document has no root element"))
}

/// Builds an empty node from a start tag, qualifying it with its namespace.
fn open_node(ns: &ResolveResult<'_>, e: &BytesStart<'_>) -> Result<SchemaNode, ParseError> {
    let local = std::str::from_utf8(e.local_name().as_ref())?.to_string();
    let tag = match ns {
        ResolveResult::Bound(uri) => format!("{{{}}}{}", std::str::from_utf8(uri.as_ref())?, local),
        ResolveResult::Unbound => local,
        ResolveResult::Unknown(prefix) => {
            return Err(ParseError::malformed(format!(
                "undeclared namespace prefix '{}' on element '{}'",
                String::from_utf8_lossy(prefix),
                local
            )));
        }
    };

    let mut node = SchemaNode::new(tag);
    for attr in e.attributes() {
        let attr = attr.map_err(|e| ParseError::malformed(e.to_string()))?;
        let key = std::str::from_utf8(attr.key.as_ref())?;
        if key == "xmlns" || key.starts_with("xmlns:") {
            continue;
        }
        let raw = std::str::from_utf8(&attr.value)?;
        let value = unescape(raw).map_err(|e| ParseError::malformed(e.to_string()))?;
        node.set_attr(key, value);
    }

    Ok(node)
}

/// Hands a completed node to its parent, or makes it the document root.
fn attach(
    stack: &mut [SchemaNode],
    root: &mut Option<SchemaNode>,
    mut node: SchemaNode,
) -> Result<(), ParseError> {
    node.finish();
    match stack.last_mut() {
        Some(parent) => parent.push_child(node),
        None if root.is_none() => *root = Some(node),
        None => return Err(ParseError::malformed("document has more than one root element")),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const CORE: &str = "http://www.gtk.org/introspection/core/1.0";

    const SIMPLE_DOCUMENT: &str = r#"<?xml version="1.0"?>
<repository version="1.2"
            xmlns="http://www.gtk.org/introspection/core/1.0"
            xmlns:c="http://www.gtk.org/introspection/c/1.0">
  <namespace name="Demo" version="1.0">
    <constant name="MAX" value="10" c:type="DEMO_MAX">
      <doc xml:space="preserve">Largest value &amp; then some &#x41;</doc>
    </constant>
    <class name="Widget" parent="Base"/>
  </namespace>
</repository>"#;

    #[test]
    fn test_parse_simple_document() {
        let root = parse_document(SIMPLE_DOCUMENT).expect("Failed to parse document");

        assert_eq!(root.tag(), format!("{{{CORE}}}repository"));
        assert_eq!(root.local_name().unwrap(), "repository");
        assert_eq!(root.attr("version"), Some("1.2"));
        assert!(root.attr("xmlns").is_none());

        let namespace = root.find("namespace").unwrap().expect("namespace");
        assert_eq!(namespace.attr("name"), Some("Demo"));
        assert_eq!(namespace.children().len(), 2);
        assert!(namespace.text().is_none());
    }

    #[test]
    fn test_parse_text_and_attributes() {
        let root = parse_document(SIMPLE_DOCUMENT).expect("Failed to parse document");
        let namespace = root.find("namespace").unwrap().unwrap();
        let constant = &namespace.children()[0];

        assert_eq!(constant.attr("c:type"), Some("DEMO_MAX"));
        let doc = constant.find("doc").unwrap().unwrap();
        assert_eq!(doc.text(), Some("Largest value & then some A"));
    }

    #[test]
    fn test_attribute_entities_are_unescaped() {
        let xml = r#"<r xmlns="urn:x"><constant name="LT" value="&lt;&quot;"/></r>"#;
        let root = parse_document(xml).unwrap();
        assert_eq!(root.children()[0].attr("value"), Some("<\""));
    }

    #[test]
    fn test_split_tag() {
        assert_eq!(split_tag("{urn:x}class").unwrap(), ("urn:x", "class"));
        assert!(matches!(
            split_tag("class"),
            Err(ParseError::TagFormat { tag }) if tag == "class"
        ));
        assert!(split_tag("{}class").is_err());
        assert!(split_tag("{urn:x}").is_err());
    }

    #[test]
    fn test_unqualified_tag_fails_local_name() {
        let root = parse_document("<repository><namespace/></repository>").unwrap();
        assert_eq!(root.tag(), "repository");
        assert!(matches!(root.local_name(), Err(ParseError::TagFormat { .. })));
        assert!(root.find("namespace").is_err());
    }

    #[test]
    fn test_malformed_xml() {
        let result = parse_document("<repository xmlns=\"urn:x\"><namespace></repository>");
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_root() {
        let result = parse_document("<?xml version=\"1.0\"?>\n");
        assert!(matches!(result, Err(ParseError::Malformed { .. })));
    }

    #[test]
    fn test_require_attr() {
        let root = parse_document(r#"<r xmlns="urn:x"><class name=""/></r>"#).unwrap();
        let class = &root.children()[0];
        assert!(matches!(
            class.require_attr("name"),
            Err(ParseError::MissingAttribute { element, attribute })
                if element == "class" && attribute == "name"
        ));
    }

    #[test]
    fn test_parse_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Demo-1.0.gir");
        std::fs::write(&path, SIMPLE_DOCUMENT).unwrap();

        let root = parse_file(&path).expect("Failed to parse file");
        assert_eq!(root.local_name().unwrap(), "repository");

        let missing = parse_file(&dir.path().join("Nope-1.0.gir"));
        assert!(matches!(missing, Err(ParseError::Io(_))));
    }

    #[test]
    fn test_parse_file_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Latin-1.0.gir");
        std::fs::write(&path, b"<repository name=\"caf\xe9\"/>").unwrap();

        let result = parse_file(&path);
        assert!(matches!(result, Err(ParseError::Malformed { .. })));
    }
}
