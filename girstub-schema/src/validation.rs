//! Namespace validation.
//!
//! Checks the model invariants the builder cannot enforce element by element.

use crate::error::ParseError;
use crate::types::{Namespace, TypeEntity};
use std::collections::HashSet;

/// Validates a built namespace.
///
/// # Arguments
/// * `ns` - The namespace to validate
///
/// # Errors
/// Returns `ParseError::DuplicateDefinition` if two type entities share a
/// name, or `ParseError::MissingAttribute` if an entity, member or method
/// name is empty.
pub fn validate_namespace(ns: &Namespace) -> Result<(), ParseError> {
    let mut seen = HashSet::new();

    for entity in &ns.types {
        if entity.name().is_empty() {
            return Err(ParseError::missing_attr(entity.kind(), "name"));
        }
        if !seen.insert(entity.name()) {
            return Err(ParseError::duplicate(entity.kind(), entity.name()));
        }
        validate_entity(entity)?;
    }

    for function in &ns.functions {
        if function.name.is_empty() {
            return Err(ParseError::missing_attr("function", "name"));
        }
    }

    Ok(())
}

/// Validates the members of a single entity.
fn validate_entity(entity: &TypeEntity) -> Result<(), ParseError> {
    match entity {
        TypeEntity::Class(c) | TypeEntity::Interface(c) | TypeEntity::Record(c) => {
            if c.methods.iter().any(|m| m.name.is_empty()) {
                return Err(ParseError::missing_attr("method", "name"));
            }
            if c.fields.iter().any(|f| f.name.is_empty()) {
                return Err(ParseError::missing_attr("field", "name"));
            }
        }
        TypeEntity::Enum(e) | TypeEntity::Bitfield(e) => {
            if e.members.iter().any(|m| m.name.is_empty()) {
                return Err(ParseError::missing_attr("member", "name"));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ClassDef, EnumDef, EnumMember, MethodDef, MethodKind};

    #[test]
    fn test_valid_namespace() {
        let mut ns = Namespace::new("Demo");
        ns.add_type(TypeEntity::Class(ClassDef::new("Widget")));
        ns.add_type(TypeEntity::Enum(EnumDef::new("Align")));
        assert!(validate_namespace(&ns).is_ok());
    }

    #[test]
    fn test_duplicate_entity() {
        let mut ns = Namespace::new("Demo");
        ns.add_type(TypeEntity::Class(ClassDef::new("Widget")));
        ns.add_type(TypeEntity::Record(ClassDef::new("Widget")));

        let err = validate_namespace(&ns).unwrap_err();
        assert!(matches!(
            err,
            ParseError::DuplicateDefinition { kind, name } if kind == "record" && name == "Widget"
        ));
        // The first definition stays the lookup target.
        assert!(matches!(ns.get_type("Widget"), Some(TypeEntity::Class(_))));
    }

    #[test]
    fn test_empty_member_name() {
        let mut align = EnumDef::new("Align");
        align.add_member(EnumMember::new("", "0"));
        let mut ns = Namespace::new("Demo");
        ns.add_type(TypeEntity::Enum(align));

        assert!(matches!(
            validate_namespace(&ns),
            Err(ParseError::MissingAttribute { element, .. }) if element == "member"
        ));
    }

    #[test]
    fn test_empty_method_name() {
        let mut widget = ClassDef::new("Widget");
        widget.add_method(MethodDef::new("", MethodKind::Instance));
        let mut ns = Namespace::new("Demo");
        ns.add_type(TypeEntity::Class(widget));

        assert!(validate_namespace(&ns).is_err());
    }
}
