//! Semantic model of a GIR namespace.
//!
//! This module contains the typed entities built from one schema document:
//! classes, interfaces, records, enumerations, bitfields, constants and free
//! functions. Collections keep document order; any sorting is left to the
//! emitter.

use std::collections::HashMap;

/// Root container for one schema document.
#[derive(Debug, Clone, Default)]
pub struct Namespace {
    /// Namespace name (`Gtk`, `Pango`, ...).
    pub name: String,
    /// Namespace version as declared by the document.
    pub version: Option<String>,
    /// Constants in document order.
    pub constants: Vec<Constant>,
    /// Classes, interfaces, records, enums and bitfields in document order.
    pub types: Vec<TypeEntity>,
    /// Free functions in document order.
    pub functions: Vec<MethodDef>,
    /// Type lookup map (built while adding types).
    type_map: HashMap<String, usize>,
}

impl Namespace {
    /// Creates a new empty namespace.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Adds a constant.
    pub fn add_constant(&mut self, constant: Constant) {
        self.constants.push(constant);
    }

    /// Adds a type entity. The first definition of a name stays the lookup
    /// target; duplicates are reported by validation.
    pub fn add_type(&mut self, entity: TypeEntity) {
        let index = self.types.len();
        self.type_map
            .entry(entity.name().to_string())
            .or_insert(index);
        self.types.push(entity);
    }

    /// Adds a free function.
    pub fn add_function(&mut self, function: MethodDef) {
        self.functions.push(function);
    }

    /// Looks up a type entity by name.
    #[must_use]
    pub fn get_type(&self, name: &str) -> Option<&TypeEntity> {
        self.type_map.get(name).map(|&idx| &self.types[idx])
    }

    /// Returns true if a type with the given name exists.
    #[must_use]
    pub fn has_type(&self, name: &str) -> bool {
        self.type_map.contains_key(name)
    }

    /// Returns true if the namespace holds no entities at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.constants.is_empty() && self.types.is_empty() && self.functions.is_empty()
    }
}

/// Type entity variants.
#[derive(Debug, Clone)]
pub enum TypeEntity {
    /// Class definition.
    Class(ClassDef),
    /// Interface definition.
    Interface(ClassDef),
    /// Record (plain struct) definition.
    Record(ClassDef),
    /// Enumeration definition.
    Enum(EnumDef),
    /// Bitfield (flag set) definition.
    Bitfield(EnumDef),
}

impl TypeEntity {
    /// Returns the name of the entity.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Class(c) | Self::Interface(c) | Self::Record(c) => &c.name,
            Self::Enum(e) | Self::Bitfield(e) => &e.name,
        }
    }

    /// Returns the schema tag this entity was declared with.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Class(_) => "class",
            Self::Interface(_) => "interface",
            Self::Record(_) => "record",
            Self::Enum(_) => "enumeration",
            Self::Bitfield(_) => "bitfield",
        }
    }

    /// Returns the class-like body, if this is a class, interface or record.
    #[must_use]
    pub const fn as_class(&self) -> Option<&ClassDef> {
        match self {
            Self::Class(c) | Self::Interface(c) | Self::Record(c) => Some(c),
            _ => None,
        }
    }

    /// Returns the enumeration body, if this is an enum or bitfield.
    #[must_use]
    pub const fn as_enum(&self) -> Option<&EnumDef> {
        match self {
            Self::Enum(e) | Self::Bitfield(e) => Some(e),
            _ => None,
        }
    }

    /// Returns true if this is a bitfield.
    #[must_use]
    pub const fn is_flags(&self) -> bool {
        matches!(self, Self::Bitfield(_))
    }
}

/// Shared shape of classes, interfaces and records.
#[derive(Debug, Clone)]
pub struct ClassDef {
    /// Type name.
    pub name: String,
    /// Documentation.
    pub doc: Option<String>,
    /// Base class first, implemented interfaces after.
    pub parents: Vec<String>,
    /// Fields in document order.
    pub fields: Vec<FieldDef>,
    /// Methods in document order.
    pub methods: Vec<MethodDef>,
}

impl ClassDef {
    /// Creates a new class-like definition.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            parents: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
        }
    }

    /// Appends a parent name.
    pub fn add_parent(&mut self, parent: impl Into<String>) {
        self.parents.push(parent.into());
    }

    /// Adds a field.
    pub fn add_field(&mut self, field: FieldDef) {
        self.fields.push(field);
    }

    /// Adds a method.
    pub fn add_method(&mut self, method: MethodDef) {
        self.methods.push(method);
    }

    /// Returns true if the body has neither fields nor methods.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.methods.is_empty()
    }
}

/// Shared shape of enumerations and bitfields.
#[derive(Debug, Clone)]
pub struct EnumDef {
    /// Type name.
    pub name: String,
    /// Documentation.
    pub doc: Option<String>,
    /// Members in document order.
    pub members: Vec<EnumMember>,
}

impl EnumDef {
    /// Creates a new enumeration definition.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            members: Vec::new(),
        }
    }

    /// Adds a member.
    pub fn add_member(&mut self, member: EnumMember) {
        self.members.push(member);
    }
}

/// Enumeration member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumMember {
    /// Member name, upper-cased.
    pub name: String,
    /// Literal integer value as text.
    pub value: String,
    /// Documentation.
    pub doc: Option<String>,
}

impl EnumMember {
    /// Creates a new member; the name is upper-cased.
    #[must_use]
    pub fn new(name: &str, value: impl Into<String>) -> Self {
        Self {
            name: name.to_uppercase(),
            value: value.into(),
            doc: None,
        }
    }
}

/// Namespace-level constant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constant {
    /// Constant name, upper-cased.
    pub name: String,
    /// Literal value as text.
    pub value: String,
    /// Declared scalar type, when the schema gives one.
    pub type_name: Option<String>,
    /// Documentation.
    pub doc: Option<String>,
}

impl Constant {
    /// Creates a new constant; the name is upper-cased.
    #[must_use]
    pub fn new(name: &str, value: impl Into<String>) -> Self {
        Self {
            name: name.to_uppercase(),
            value: value.into(),
            type_name: None,
            doc: None,
        }
    }
}

/// How a method is bound to its owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MethodKind {
    /// Regular method taking the receiver.
    #[default]
    Instance,
    /// Function scoped to the type, without a receiver.
    StaticFunction,
    /// Constructor returning the owning type.
    StaticConstructor,
}

impl MethodKind {
    /// Returns true for kinds rendered without a receiver.
    #[must_use]
    pub const fn is_static(&self) -> bool {
        matches!(self, Self::StaticFunction | Self::StaticConstructor)
    }
}

/// Method or free function.
#[derive(Debug, Clone)]
pub struct MethodDef {
    /// Method name.
    pub name: String,
    /// Documentation.
    pub doc: Option<String>,
    /// Binding kind.
    pub kind: MethodKind,
    /// Declared return type; `None` means no value.
    pub return_type: Option<String>,
    /// Parameters, receiver first when present.
    pub parameters: Vec<ParameterDef>,
}

impl MethodDef {
    /// Creates a new method definition.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: MethodKind) -> Self {
        Self {
            name: name.into(),
            doc: None,
            kind,
            return_type: None,
            parameters: Vec::new(),
        }
    }

    /// Adds a parameter. A receiver is always placed first.
    pub fn add_parameter(&mut self, parameter: ParameterDef) {
        if parameter.is_instance() {
            self.parameters.insert(0, parameter);
        } else {
            self.parameters.push(parameter);
        }
    }

    /// Returns true if the method takes a receiver.
    #[must_use]
    pub fn has_receiver(&self) -> bool {
        self.parameters.first().is_some_and(ParameterDef::is_instance)
    }
}

/// Schema-level type descriptor of a parameter or field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    /// Named scalar or modeled type; `None` when the schema omits the name.
    Named(Option<String>),
    /// Homogeneous list of a named element type.
    Array(String),
    /// Variadic catch-all.
    Varargs,
    /// The method receiver.
    Instance,
}

impl TypeRef {
    /// Creates a named type reference.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(Some(name.into()))
    }

    /// Returns the schema-level alias this descriptor maps through.
    ///
    /// Arrays become the synthetic `List[element]` alias.
    #[must_use]
    pub fn alias(&self) -> Option<String> {
        match self {
            Self::Named(name) => name.clone(),
            Self::Array(element) => Some(format!("List[{element}]")),
            Self::Varargs | Self::Instance => None,
        }
    }
}

/// Method parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterDef {
    /// Parameter name.
    pub name: String,
    /// Type descriptor.
    pub type_ref: TypeRef,
}

impl ParameterDef {
    /// Creates a new parameter.
    #[must_use]
    pub fn new(name: impl Into<String>, type_ref: TypeRef) -> Self {
        Self {
            name: name.into(),
            type_ref,
        }
    }

    /// Returns true if this is the receiver.
    #[must_use]
    pub fn is_instance(&self) -> bool {
        self.type_ref == TypeRef::Instance
    }
}

/// Field of a class-like entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
    /// Field name.
    pub name: String,
    /// Type descriptor (never `Varargs` or `Instance`).
    pub type_ref: TypeRef,
    /// Documentation.
    pub doc: Option<String>,
}

impl FieldDef {
    /// Creates a new field.
    #[must_use]
    pub fn new(name: impl Into<String>, type_ref: TypeRef) -> Self {
        Self {
            name: name.into(),
            type_ref,
            doc: None,
        }
    }
}
