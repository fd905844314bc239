//! Hand-written descriptors shared by the unit tests.
//!
//! These mirror what `#[derive(Injectable)]` emits, plus shapes the derive never produces (static/final members,
//! members without a binding capability, broken parent links).

use std::any::Any;

use crate::descriptor::{
    Described, Marker, MemberDescriptor, Modifiers, ParentLink, TypeDescriptor, ValueType, downcast_target,
    downcast_value,
};
use crate::diagnostics::BindError;

const RESOURCE: &[Marker] = &[Marker::new("resource")];
const RESOURCE_SVC: &[Marker] = &[Marker::with_attributes("resource", &[("name", "svc")])];
const CONTEXT: &[Marker] = &[Marker::new("Context")];

#[derive(Debug, Clone, PartialEq)]
pub struct SomeType(pub &'static str);

/// Declares `SomeType` as its parent, i.e. a "subtype" of it.
#[derive(Debug, Clone, PartialEq)]
pub struct Special(pub SomeType);

#[derive(Debug, Default)]
pub struct Base {
    pub ctx: Option<SomeType>,
    #[allow(dead_code)]
    pub count: i32,
}

fn bind_base_ctx(target: &mut dyn Any, v: &dyn Any) -> Result<(), BindError> {
    downcast_target::<Base>(target)?.ctx = Some(downcast_value::<SomeType>(v)?.clone());
    Ok(())
}

const BASE_FIELDS: &[MemberDescriptor] = &[
    MemberDescriptor::field("ctx", ValueType::reference::<SomeType>())
        .with_markers(RESOURCE)
        .with_accessor(bind_base_ctx),
    MemberDescriptor::field("count", ValueType::primitive::<i32>()),
];

static BASE: TypeDescriptor = TypeDescriptor::new::<Base>("Base").with_fields(BASE_FIELDS);

impl Described for Base {
    fn descriptor() -> &'static TypeDescriptor {
        &BASE
    }
}

#[derive(Debug, Default)]
pub struct Child {
    pub base: Base,
    pub svc: Option<SomeType>,
    pub special: Option<Special>,
    pub calls: usize,
}

impl Child {
    pub fn set_ctx(&mut self, value: SomeType) {
        self.calls += 1;
        self.svc = Some(value);
    }
}

fn bind_child_set_ctx(target: &mut dyn Any, v: &dyn Any) -> Result<(), BindError> {
    downcast_target::<Child>(target)?.set_ctx(downcast_value::<SomeType>(v)?.clone());
    Ok(())
}

fn bind_child_special(target: &mut dyn Any, v: &dyn Any) -> Result<(), BindError> {
    downcast_target::<Child>(target)?.special = Some(downcast_value::<Special>(v)?.clone());
    Ok(())
}

fn upcast_child(target: &mut dyn Any) -> Option<&mut dyn Any> {
    target.downcast_mut::<Child>().map(|child| &mut child.base as &mut dyn Any)
}

const CHILD_FIELDS: &[MemberDescriptor] = &[MemberDescriptor::field("special", ValueType::reference::<Special>())
    .with_markers(CONTEXT)
    .with_accessor(bind_child_special)];

const CHILD_SETTERS: &[MemberDescriptor] = &[MemberDescriptor::setter("set_ctx", ValueType::reference::<SomeType>())
    .with_markers(RESOURCE_SVC)
    .with_accessor(bind_child_set_ctx)];

static CHILD: TypeDescriptor = TypeDescriptor::new::<Child>("Child")
    .with_fields(CHILD_FIELDS)
    .with_setters(CHILD_SETTERS)
    .with_parent(ParentLink::new(<Base as Described>::descriptor, upcast_child));

impl Described for Child {
    fn descriptor() -> &'static TypeDescriptor {
        &CHILD
    }
}

static SPECIAL: TypeDescriptor = TypeDescriptor::new::<Special>("Special")
    .with_parent(ParentLink::new(<SomeType as Described>::descriptor, upcast_special));

static SOME_TYPE: TypeDescriptor = TypeDescriptor::new::<SomeType>("SomeType");

fn upcast_special(target: &mut dyn Any) -> Option<&mut dyn Any> {
    target.downcast_mut::<Special>().map(|s| &mut s.0 as &mut dyn Any)
}

impl Described for SomeType {
    fn descriptor() -> &'static TypeDescriptor {
        &SOME_TYPE
    }
}

impl Described for Special {
    fn descriptor() -> &'static TypeDescriptor {
        &SPECIAL
    }
}

/// No parent, no markers.
#[derive(Debug, Default)]
pub struct Orphan;

const ORPHAN_FIELDS: &[MemberDescriptor] = &[MemberDescriptor::field("plain", ValueType::reference::<SomeType>())];

static ORPHAN: TypeDescriptor = TypeDescriptor::new::<Orphan>("Orphan").with_fields(ORPHAN_FIELDS);

impl Described for Orphan {
    fn descriptor() -> &'static TypeDescriptor {
        &ORPHAN
    }
}

/// One structurally invalid marked member per variant, plus an unmarked invalid one that must be ignored.
pub struct StaticField;
pub struct FinalField;
pub struct VoidSetter;
pub struct PrimitiveField;
pub struct PrimitiveSetter;

const STATIC_FIELDS: &[MemberDescriptor] = &[
    MemberDescriptor::field("INSTANCE", ValueType::reference::<SomeType>())
        .with_modifiers(Modifiers::STATIC)
        .with_markers(RESOURCE),
];
const FINAL_FIELDS: &[MemberDescriptor] = &[
    MemberDescriptor::field("frozen", ValueType::reference::<SomeType>())
        .with_modifiers(Modifiers::FINAL)
        .with_markers(RESOURCE),
    MemberDescriptor::field("ignored", ValueType::primitive::<u8>()).with_modifiers(Modifiers::STATIC),
];
// Void beats static: the first failing check wins.
const VOID_SETTERS: &[MemberDescriptor] = &[MemberDescriptor::setter("setNothing", ValueType::void())
    .with_modifiers(Modifiers::STATIC)
    .with_markers(RESOURCE)];
const PRIMITIVE_FIELDS: &[MemberDescriptor] =
    &[MemberDescriptor::field("port", ValueType::primitive::<u16>()).with_markers(RESOURCE)];
const PRIMITIVE_SETTERS: &[MemberDescriptor] =
    &[MemberDescriptor::setter("setPort", ValueType::primitive::<u16>()).with_markers(RESOURCE)];

static STATIC_FIELD: TypeDescriptor = TypeDescriptor::new::<StaticField>("StaticField").with_fields(STATIC_FIELDS);
static FINAL_FIELD: TypeDescriptor = TypeDescriptor::new::<FinalField>("FinalField").with_fields(FINAL_FIELDS);
static VOID_SETTER: TypeDescriptor = TypeDescriptor::new::<VoidSetter>("VoidSetter").with_setters(VOID_SETTERS);
static PRIMITIVE_FIELD: TypeDescriptor =
    TypeDescriptor::new::<PrimitiveField>("PrimitiveField").with_fields(PRIMITIVE_FIELDS);
static PRIMITIVE_SETTER: TypeDescriptor =
    TypeDescriptor::new::<PrimitiveSetter>("PrimitiveSetter").with_setters(PRIMITIVE_SETTERS);

impl Described for StaticField {
    fn descriptor() -> &'static TypeDescriptor {
        &STATIC_FIELD
    }
}

impl Described for FinalField {
    fn descriptor() -> &'static TypeDescriptor {
        &FINAL_FIELD
    }
}

impl Described for VoidSetter {
    fn descriptor() -> &'static TypeDescriptor {
        &VOID_SETTER
    }
}

impl Described for PrimitiveField {
    fn descriptor() -> &'static TypeDescriptor {
        &PRIMITIVE_FIELD
    }
}

impl Described for PrimitiveSetter {
    fn descriptor() -> &'static TypeDescriptor {
        &PRIMITIVE_SETTER
    }
}

/// Binding-time failures: a member without accessor, and a parent link whose upcast never succeeds.
#[derive(Debug, Default)]
pub struct Sealed {
    pub ctx: Option<SomeType>,
}

#[derive(Debug, Default)]
pub struct Detached {
    pub inner: Base,
}

const SEALED_FIELDS: &[MemberDescriptor] =
    &[MemberDescriptor::field("ctx", ValueType::reference::<SomeType>()).with_markers(RESOURCE)];

static SEALED: TypeDescriptor = TypeDescriptor::new::<Sealed>("Sealed").with_fields(SEALED_FIELDS);

fn upcast_never(_: &mut dyn Any) -> Option<&mut dyn Any> {
    None
}

static DETACHED: TypeDescriptor = TypeDescriptor::new::<Detached>("Detached")
    .with_parent(ParentLink::new(<Base as Described>::descriptor, upcast_never));

impl Described for Sealed {
    fn descriptor() -> &'static TypeDescriptor {
        &SEALED
    }
}

impl Described for Detached {
    fn descriptor() -> &'static TypeDescriptor {
        &DETACHED
    }
}

/// Setters whose identifiers break the naming convention.
pub struct BareSetter;

const BARE_SETTERS: &[MemberDescriptor] = &[MemberDescriptor::setter("set", ValueType::reference::<SomeType>())
    .with_markers(RESOURCE)];

static BARE_SETTER: TypeDescriptor = TypeDescriptor::new::<BareSetter>("BareSetter").with_setters(BARE_SETTERS);

impl Described for BareSetter {
    fn descriptor() -> &'static TypeDescriptor {
        &BARE_SETTER
    }
}

/// Redeclares the `ctx` field its parent `Base` already marks.
#[derive(Debug, Default)]
pub struct Shadowing {
    pub base: Base,
    pub ctx: Option<SomeType>,
}

fn bind_shadowing_ctx(target: &mut dyn Any, v: &dyn Any) -> Result<(), BindError> {
    downcast_target::<Shadowing>(target)?.ctx = Some(downcast_value::<SomeType>(v)?.clone());
    Ok(())
}

fn upcast_shadowing(target: &mut dyn Any) -> Option<&mut dyn Any> {
    target
        .downcast_mut::<Shadowing>()
        .map(|shadowing| &mut shadowing.base as &mut dyn Any)
}

const SHADOWING_FIELDS: &[MemberDescriptor] = &[MemberDescriptor::field("ctx", ValueType::reference::<SomeType>())
    .with_markers(RESOURCE)
    .with_accessor(bind_shadowing_ctx)];

static SHADOWING: TypeDescriptor = TypeDescriptor::new::<Shadowing>("Shadowing")
    .with_fields(SHADOWING_FIELDS)
    .with_parent(ParentLink::new(<Base as Described>::descriptor, upcast_shadowing));

impl Described for Shadowing {
    fn descriptor() -> &'static TypeDescriptor {
        &SHADOWING
    }
}
