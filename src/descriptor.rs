//! Static type metadata consumed by discovery and binding.
//!
//! A [`TypeDescriptor`] describes one type: its declared fields and setters (in declaration order) and an optional
//! link to its parent type. Inheritance is modeled by composition: the parent link carries an *upcast* function that
//! reaches the embedded parent part of a live instance.
//!
//! Descriptors are `'static` and never mutated. They are normally emitted by `#[derive(Injectable)]`, but hosts may
//! build them by hand with the `const` builders below.

use std::any::{Any, TypeId};
use std::fmt;

use injecta_core::conventions::NAME_ATTR;
use injecta_core::lang::markers;

use crate::diagnostics::BindError;

/// Assign or pass `value` into `target`. Both sides are type-erased; the accessor downcasts them.
pub type Accessor = fn(&mut dyn Any, &dyn Any) -> Result<(), BindError>;

/// Reach the embedded parent part of a child instance.
pub type Upcast = fn(&mut dyn Any) -> Option<&mut dyn Any>;

/// Downcast an accessor's target to the type that declares the member.
pub fn downcast_target<T: Any>(target: &mut dyn Any) -> Result<&mut T, BindError> {
    target.downcast_mut::<T>().ok_or(BindError::TargetMismatch {
        expected: std::any::type_name::<T>(),
    })
}

/// Downcast an accessor's value to the member's value type.
pub fn downcast_value<T: Any>(value: &dyn Any) -> Result<&T, BindError> {
    value.downcast_ref::<T>().ok_or(BindError::ValueMismatch {
        expected: std::any::type_name::<T>(),
    })
}

/// Shape of a member's value type, as far as structural validation cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// An owned object/handle type; the only kind resources may bind to as a field.
    Reference,
    /// A scalar such as `i32` or `bool`.
    Primitive,
    /// The no-value sentinel `()`.
    Void,
}

/// Exact identity and shape of a member's value type.
///
/// Equality is type identity (`TypeId`), never assignability.
#[derive(Clone, Copy)]
pub struct ValueType {
    id: fn() -> TypeId,
    name: fn() -> &'static str,
    kind: ValueKind,
}

impl ValueType {
    pub const fn new<T: ?Sized + 'static>(kind: ValueKind) -> Self {
        Self {
            id: TypeId::of::<T>,
            name: std::any::type_name::<T>,
            kind,
        }
    }

    pub const fn reference<T: ?Sized + 'static>() -> Self {
        Self::new::<T>(ValueKind::Reference)
    }

    pub const fn primitive<T: ?Sized + 'static>() -> Self {
        Self::new::<T>(ValueKind::Primitive)
    }

    /// The no-value sentinel.
    pub const fn void() -> Self {
        Self::new::<()>(ValueKind::Void)
    }

    pub fn type_id(&self) -> TypeId {
        (self.id)()
    }

    pub fn name(&self) -> &'static str {
        (self.name)()
    }

    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    pub fn is_void(&self) -> bool {
        self.kind == ValueKind::Void
    }

    pub fn is_primitive(&self) -> bool {
        self.kind == ValueKind::Primitive
    }
}

impl PartialEq for ValueType {
    fn eq(&self, other: &Self) -> bool {
        self.type_id() == other.type_id()
    }
}

impl Eq for ValueType {}

impl fmt::Debug for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:?})", self.name(), self.kind)
    }
}

/// Declarative marker attached to a member: a kind plus name/value attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Marker {
    kind: &'static str,
    attributes: &'static [(&'static str, &'static str)],
}

impl Marker {
    pub const fn new(kind: &'static str) -> Self {
        Self { kind, attributes: &[] }
    }

    pub const fn with_attributes(kind: &'static str, attributes: &'static [(&'static str, &'static str)]) -> Self {
        Self { kind, attributes }
    }

    pub fn kind(&self) -> &'static str {
        self.kind
    }

    pub fn attribute(&self, key: &str) -> Option<&'static str> {
        self.attributes.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
    }

    /// The explicit binding name, if present and non-empty.
    pub fn explicit_name(&self) -> Option<&'static str> {
        self.attribute(NAME_ATTR).filter(|name| !name.is_empty())
    }

    /// Whether this marker is of `kind`, folding registry aliases.
    pub fn is(&self, kind: &str) -> bool {
        markers::same_kind(self.kind, kind)
    }
}

/// Declaration modifiers relevant to structural validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    pub is_static: bool,
    pub is_final: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        is_static: false,
        is_final: false,
    };
    pub const STATIC: Modifiers = Modifiers {
        is_static: true,
        is_final: false,
    };
    pub const FINAL: Modifiers = Modifiers {
        is_static: false,
        is_final: true,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    Field,
    /// A single-parameter setter-style method.
    Setter,
}

impl fmt::Display for MemberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemberKind::Field => write!(f, "field"),
            MemberKind::Setter => write!(f, "setter"),
        }
    }
}

/// Which of a type's declared members a scan looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberScope {
    Fields,
    Setters,
}

impl fmt::Display for MemberScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemberScope::Fields => write!(f, "fields"),
            MemberScope::Setters => write!(f, "setters"),
        }
    }
}

/// A field or setter declared directly on one type.
#[derive(Clone, Copy)]
pub struct MemberDescriptor {
    pub ident: &'static str,
    pub kind: MemberKind,
    pub value_type: ValueType,
    pub modifiers: Modifiers,
    pub markers: &'static [Marker],
    /// Binding capability. Members without one are discovered but cannot be bound.
    pub accessor: Option<Accessor>,
}

impl MemberDescriptor {
    pub const fn field(ident: &'static str, value_type: ValueType) -> Self {
        Self {
            ident,
            kind: MemberKind::Field,
            value_type,
            modifiers: Modifiers::NONE,
            markers: &[],
            accessor: None,
        }
    }

    pub const fn setter(ident: &'static str, value_type: ValueType) -> Self {
        Self {
            kind: MemberKind::Setter,
            ..Self::field(ident, value_type)
        }
    }

    pub const fn with_markers(self, markers: &'static [Marker]) -> Self {
        Self { markers, ..self }
    }

    pub const fn with_modifiers(self, modifiers: Modifiers) -> Self {
        Self { modifiers, ..self }
    }

    pub const fn with_accessor(self, accessor: Accessor) -> Self {
        Self {
            accessor: Some(accessor),
            ..self
        }
    }

    /// First marker of `kind` carried by this member.
    pub fn marker(&self, kind: &str) -> Option<&'static Marker> {
        self.markers.iter().find(|m| m.is(kind))
    }

    pub fn has_marker(&self, kind: &str) -> bool {
        self.marker(kind).is_some()
    }
}

impl fmt::Debug for MemberDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemberDescriptor")
            .field("ident", &self.ident)
            .field("kind", &self.kind)
            .field("value_type", &self.value_type)
            .field("modifiers", &self.modifiers)
            .field("markers", &self.markers)
            .field("bindable", &self.accessor.is_some())
            .finish()
    }
}

/// Link from a type to its parent type.
#[derive(Clone, Copy)]
pub struct ParentLink {
    descriptor: fn() -> &'static TypeDescriptor,
    upcast: Upcast,
}

impl ParentLink {
    pub const fn new(descriptor: fn() -> &'static TypeDescriptor, upcast: Upcast) -> Self {
        Self { descriptor, upcast }
    }

    pub fn descriptor(&self) -> &'static TypeDescriptor {
        (self.descriptor)()
    }

    pub fn upcast<'a>(&self, child: &'a mut dyn Any) -> Option<&'a mut dyn Any> {
        (self.upcast)(child)
    }
}

/// Metadata for one type in an ancestor chain.
pub struct TypeDescriptor {
    name: &'static str,
    type_id: fn() -> TypeId,
    fields: &'static [MemberDescriptor],
    setters: &'static [MemberDescriptor],
    parent: Option<ParentLink>,
}

impl TypeDescriptor {
    pub const fn new<T: 'static>(name: &'static str) -> Self {
        Self {
            name,
            type_id: TypeId::of::<T>,
            fields: &[],
            setters: &[],
            parent: None,
        }
    }

    pub const fn with_fields(self, fields: &'static [MemberDescriptor]) -> Self {
        Self { fields, ..self }
    }

    pub const fn with_setters(self, setters: &'static [MemberDescriptor]) -> Self {
        Self { setters, ..self }
    }

    pub const fn with_parent(self, parent: ParentLink) -> Self {
        Self {
            parent: Some(parent),
            ..self
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn type_id(&self) -> TypeId {
        (self.type_id)()
    }

    pub fn fields(&self) -> &'static [MemberDescriptor] {
        self.fields
    }

    pub fn setters(&self) -> &'static [MemberDescriptor] {
        self.setters
    }

    /// Members this type declares itself, in declaration order.
    pub fn members(&self, scope: MemberScope) -> &'static [MemberDescriptor] {
        match scope {
            MemberScope::Fields => self.fields,
            MemberScope::Setters => self.setters,
        }
    }

    pub fn parent_link(&self) -> Option<&ParentLink> {
        self.parent.as_ref()
    }

    pub fn parent(&self) -> Option<&'static TypeDescriptor> {
        self.parent.as_ref().map(ParentLink::descriptor)
    }

    /// This type followed by each successive parent, ending at the root.
    pub fn ancestors(&'static self) -> Ancestors {
        Ancestors { next: Some(self) }
    }

    /// Whether `self` is `other` or one of its descendants.
    pub fn descends_from(&'static self, other: &TypeDescriptor) -> bool {
        let target = other.type_id();
        self.ancestors().any(|level| level.type_id() == target)
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("name", &self.name)
            .field("fields", &self.fields)
            .field("setters", &self.setters)
            .field("parent", &self.parent().map(TypeDescriptor::name))
            .finish()
    }
}

/// Iterator over an ancestor chain; `None` is the "no parent" sentinel.
#[derive(Debug, Clone)]
pub struct Ancestors {
    next: Option<&'static TypeDescriptor>,
}

impl Iterator for Ancestors {
    type Item = &'static TypeDescriptor;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.parent();
        Some(current)
    }
}

/// Types with static metadata. Implemented by `#[derive(Injectable)]`.
pub trait Described {
    fn descriptor() -> &'static TypeDescriptor;
}

/// Object-safe view of a described instance, used as the injection target.
pub trait Reflect: Any {
    fn type_descriptor(&self) -> &'static TypeDescriptor;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Described + Any> Reflect for T {
    fn type_descriptor(&self) -> &'static TypeDescriptor {
        T::descriptor()
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
