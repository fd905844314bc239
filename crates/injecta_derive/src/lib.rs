//! Derive macro for injecta.
//!
//! `#[derive(Injectable)]` emits the static `TypeDescriptor` of a struct together with the binding capability
//! (accessor functions) for each marked member and the upcast to its embedded parent part.

use injecta_core::conventions::{DEFAULT_MARKER, NAME_ATTR};
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::ext::IdentExt;
use syn::meta::ParseNestedMeta;
use syn::{
    Attribute, Data, DataStruct, DeriveInput, Field, Fields, GenericArgument, Ident, LitStr, Meta, PathArguments,
    Type, parse_macro_input,
};

/// Generates `injecta::Described` for a struct with named fields.
///
/// # Attributes
///
/// On fields:
/// - `#[inject]` marks the field with the default `resource` marker.
/// - `#[inject(marker = "context", name = "ctx")]` picks the marker kind and an explicit binding name.
/// - `#[inject(parent)]` declares the embedded parent part (at most one per struct). The field's type must itself
///   implement `Described`.
///
/// An `Option<T>` field binds a value of type `T` and stores it as `Some`. It counts as a reference member even when
/// `T` is a scalar, so `Option<u16>` is accepted where a bare `u16` field is rejected as primitive.
///
/// Primitive detection is syntactic: only the bare identifiers `bool`, `char`, `i8`..`i128`, `isize`, `u8`..`u128`,
/// `usize`, `f32` and `f64` are recognized. Qualified paths such as `std::primitive::u16` and type aliases of a
/// scalar are classified as reference types.
///
/// On the struct, one attribute per setter method:
/// - `#[inject(setter(method = "set_ctx", ty = SomeType, marker = "resource", name = "svc"))]` marks
///   `fn set_ctx(&mut self, value: SomeType)`.
/// - `fallible` declares that the method returns `Result<_, E>` with `E: Display`; an `Err` is reported as a
///   rejected binding.
/// - `ty = ()` declares a void setter, which discovery rejects.
///
/// # Example
/// ```ignore
/// #[derive(Default, Injectable)]
/// #[inject(setter(method = "set_ctx", ty = SomeType, name = "svc"))]
/// struct Child {
///     #[inject(parent)]
///     base: Base,
///     svc: Option<SomeType>,
/// }
/// ```
#[proc_macro_derive(Injectable, attributes(inject))]
pub fn derive_injectable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(&input).unwrap_or_else(syn::Error::into_compile_error).into()
}

#[derive(Default)]
struct MarkerSpec {
    kind: Option<LitStr>,
    name: Option<LitStr>,
}

enum FieldMode {
    Plain,
    Marked(MarkerSpec),
    Parent,
}

struct SetterSpec {
    method: Ident,
    ident: String,
    ty: Type,
    marker: MarkerSpec,
    fallible: bool,
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let name_str = name.unraw().to_string();

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "`Injectable` cannot be derived for generic types",
        ));
    }
    let fields = match &input.data {
        Data::Struct(DataStruct {
            fields: Fields::Named(named),
            ..
        }) => &named.named,
        _ => {
            return Err(syn::Error::new_spanned(
                name,
                "`Injectable` can only be derived for structs with named fields",
            ));
        }
    };

    let mut items = Vec::new();
    let mut field_members = Vec::new();
    let mut parent: Option<&Field> = None;

    for (index, field) in fields.iter().enumerate() {
        let Some(ident) = field.ident.as_ref() else {
            continue;
        };
        let ident_str = ident.unraw().to_string();
        let (bind_ty, value_type) = match option_inner(&field.ty) {
            // An optional slot is never a bare scalar.
            Some(inner) => (inner, quote! { ::injecta::ValueType::reference::<#inner>() }),
            None => (&field.ty, value_type(&field.ty)),
        };

        match parse_field_mode(field)? {
            FieldMode::Parent => {
                if parent.is_some() {
                    return Err(syn::Error::new_spanned(
                        field,
                        "only one field may be marked `#[inject(parent)]`",
                    ));
                }
                parent = Some(field);
            }
            FieldMode::Plain => {
                field_members.push(quote! { ::injecta::MemberDescriptor::field(#ident_str, #value_type) });
            }
            FieldMode::Marked(marker) => {
                let markers_const = format_ident!("FIELD_{}_MARKERS", index);
                let accessor = format_ident!("__inject_field_{}", index);
                let assign = if option_inner(&field.ty).is_some() {
                    quote! { ::std::option::Option::Some(::std::clone::Clone::clone(value)) }
                } else {
                    quote! { ::std::clone::Clone::clone(value) }
                };
                let markers = marker_slice(&marker);
                items.push(quote! {
                    const #markers_const: &[::injecta::Marker] = #markers;

                    fn #accessor(
                        target: &mut dyn ::std::any::Any,
                        value: &dyn ::std::any::Any,
                    ) -> ::std::result::Result<(), ::injecta::BindError> {
                        let target = ::injecta::descriptor::downcast_target::<#name>(target)?;
                        let value = ::injecta::descriptor::downcast_value::<#bind_ty>(value)?;
                        target.#ident = #assign;
                        ::std::result::Result::Ok(())
                    }
                });
                field_members.push(quote! {
                    ::injecta::MemberDescriptor::field(#ident_str, #value_type)
                        .with_markers(#markers_const)
                        .with_accessor(#accessor)
                });
            }
        }
    }

    let mut setter_members = Vec::new();
    for (index, setter) in parse_setters(&input.attrs)?.into_iter().enumerate() {
        let SetterSpec {
            method,
            ident,
            ty,
            marker,
            fallible,
        } = setter;
        let markers_const = format_ident!("SETTER_{}_MARKERS", index);
        let markers = marker_slice(&marker);
        items.push(quote! { const #markers_const: &[::injecta::Marker] = #markers; });

        if is_unit(&ty) {
            setter_members.push(quote! {
                ::injecta::MemberDescriptor::setter(#ident, ::injecta::ValueType::void()).with_markers(#markers_const)
            });
            continue;
        }

        let accessor = format_ident!("__inject_setter_{}", index);
        let call = if fallible {
            quote! {
                target
                    .#method(::std::clone::Clone::clone(value))
                    .map_err(|error| ::injecta::BindError::Rejected(::std::string::ToString::to_string(&error)))?;
            }
        } else {
            quote! { target.#method(::std::clone::Clone::clone(value)); }
        };
        let value_type = value_type(&ty);
        items.push(quote! {
            fn #accessor(
                target: &mut dyn ::std::any::Any,
                value: &dyn ::std::any::Any,
            ) -> ::std::result::Result<(), ::injecta::BindError> {
                let target = ::injecta::descriptor::downcast_target::<#name>(target)?;
                let value = ::injecta::descriptor::downcast_value::<#ty>(value)?;
                #call
                ::std::result::Result::Ok(())
            }
        });
        setter_members.push(quote! {
            ::injecta::MemberDescriptor::setter(#ident, #value_type)
                .with_markers(#markers_const)
                .with_accessor(#accessor)
        });
    }

    let with_parent = match parent {
        Some(field) => {
            let ident = &field.ident;
            let ty = &field.ty;
            items.push(quote! {
                fn __inject_upcast(target: &mut dyn ::std::any::Any) -> ::std::option::Option<&mut dyn ::std::any::Any> {
                    target
                        .downcast_mut::<#name>()
                        .map(|this| &mut this.#ident as &mut dyn ::std::any::Any)
                }
            });
            quote! {
                .with_parent(::injecta::ParentLink::new(<#ty as ::injecta::Described>::descriptor, __inject_upcast))
            }
        }
        None => quote! {},
    };

    Ok(quote! {
        #[automatically_derived]
        impl ::injecta::Described for #name {
            fn descriptor() -> &'static ::injecta::TypeDescriptor {
                #(#items)*

                const FIELDS: &[::injecta::MemberDescriptor] = &[#(#field_members),*];
                const SETTERS: &[::injecta::MemberDescriptor] = &[#(#setter_members),*];

                static DESCRIPTOR: ::injecta::TypeDescriptor = ::injecta::TypeDescriptor::new::<#name>(#name_str)
                    .with_fields(FIELDS)
                    .with_setters(SETTERS)
                    #with_parent;

                &DESCRIPTOR
            }
        }
    })
}

fn parse_field_mode(field: &Field) -> syn::Result<FieldMode> {
    let mut mode = FieldMode::Plain;
    for attr in field.attrs.iter().filter(|attr| attr.path().is_ident("inject")) {
        if !matches!(mode, FieldMode::Plain) {
            return Err(syn::Error::new_spanned(attr, "duplicate `#[inject]` attribute"));
        }
        if let Meta::Path(_) = attr.meta {
            mode = FieldMode::Marked(MarkerSpec::default());
            continue;
        }

        let mut marker = MarkerSpec::default();
        let mut is_parent = false;
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("parent") {
                is_parent = true;
                Ok(())
            } else {
                parse_marker_option(&meta, &mut marker)
            }
        })?;

        mode = if is_parent {
            if marker.kind.is_some() || marker.name.is_some() {
                return Err(syn::Error::new_spanned(
                    attr,
                    "`parent` cannot be combined with `marker` or `name`",
                ));
            }
            FieldMode::Parent
        } else {
            FieldMode::Marked(marker)
        };
    }
    Ok(mode)
}

fn parse_setters(attrs: &[Attribute]) -> syn::Result<Vec<SetterSpec>> {
    let mut setters = Vec::new();
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("inject")) {
        attr.parse_nested_meta(|meta| {
            if !meta.path.is_ident("setter") {
                return Err(meta.error("expected `setter(...)`"));
            }

            let mut method: Option<LitStr> = None;
            let mut ty: Option<Type> = None;
            let mut marker = MarkerSpec::default();
            let mut fallible = false;
            meta.parse_nested_meta(|inner| {
                if inner.path.is_ident("method") {
                    method = Some(inner.value()?.parse()?);
                    Ok(())
                } else if inner.path.is_ident("ty") {
                    ty = Some(inner.value()?.parse()?);
                    Ok(())
                } else if inner.path.is_ident("fallible") {
                    fallible = true;
                    Ok(())
                } else {
                    parse_marker_option(&inner, &mut marker)
                }
            })?;

            let method = method.ok_or_else(|| meta.error("setter is missing `method = \"...\"`"))?;
            let ty = ty.ok_or_else(|| meta.error("setter is missing `ty = ...`"))?;
            setters.push(SetterSpec {
                ident: method.value(),
                method: method.parse()?,
                ty,
                marker,
                fallible,
            });
            Ok(())
        })?;
    }
    Ok(setters)
}

fn parse_marker_option(meta: &ParseNestedMeta<'_>, marker: &mut MarkerSpec) -> syn::Result<()> {
    if meta.path.is_ident("marker") {
        let kind: LitStr = meta.value()?.parse()?;
        if kind.value().is_empty() {
            return Err(syn::Error::new_spanned(kind, "marker kind must not be empty"));
        }
        marker.kind = Some(kind);
        Ok(())
    } else if meta.path.is_ident(NAME_ATTR) {
        marker.name = Some(meta.value()?.parse()?);
        Ok(())
    } else {
        Err(meta.error("unsupported `inject` option; expected `marker`, `name`, or `parent`"))
    }
}

fn marker_slice(marker: &MarkerSpec) -> TokenStream2 {
    let kind = marker
        .kind
        .as_ref()
        .map_or_else(|| DEFAULT_MARKER.to_string(), LitStr::value);
    match &marker.name {
        Some(name) => quote! { &[::injecta::Marker::with_attributes(#kind, &[(#NAME_ATTR, #name)])] },
        None => quote! { &[::injecta::Marker::new(#kind)] },
    }
}

/// `T` for an `Option<T>` type.
fn option_inner(ty: &Type) -> Option<&Type> {
    let Type::Path(path) = ty else {
        return None;
    };
    let segment = path.path.segments.last()?;
    if segment.ident != "Option" {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    match args.args.first()? {
        GenericArgument::Type(inner) if args.args.len() == 1 => Some(inner),
        _ => None,
    }
}

fn is_unit(ty: &Type) -> bool {
    matches!(ty, Type::Tuple(tuple) if tuple.elems.is_empty())
}

fn is_primitive(ty: &Type) -> bool {
    const PRIMITIVES: &[&str] = &[
        "bool", "char", "i8", "i16", "i32", "i64", "i128", "isize", "u8", "u16", "u32", "u64", "u128", "usize", "f32",
        "f64",
    ];
    match ty {
        Type::Path(path) if path.qself.is_none() => path
            .path
            .get_ident()
            .is_some_and(|ident| PRIMITIVES.iter().any(|p| ident == p)),
        _ => false,
    }
}

fn value_type(ty: &Type) -> TokenStream2 {
    if is_unit(ty) {
        quote! { ::injecta::ValueType::void() }
    } else if is_primitive(ty) {
        quote! { ::injecta::ValueType::primitive::<#ty>() }
    } else {
        quote! { ::injecta::ValueType::reference::<#ty>() }
    }
}
