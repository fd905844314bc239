#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
//! Declarative member discovery and resource binding.
//!
//! injecta walks a type's ancestor chain to find fields and setters carrying a marker, validates them against
//! structural rules, resolves a binding name for each, and binds a value into a live instance.
//!
//! ```text
//! discover → filter → validate → resolve name → bind
//! ```
//!
//! Each stage is a reusable component: [`MemberPredicate`], [`MemberValidator`], [`HierarchyScanner`],
//! [`NameResolver`] and [`Injector`]. Type metadata comes from `#[derive(Injectable)]` (or hand-built
//! [`TypeDescriptor`]s).
//!
//! ## Panic Policy
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The crate enforces
//!   `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! - **Failure tiers**: discovery and naming failures are returned as [`DiscoveryError`] and abort the pass. Failures
//!   while binding a single member are logged, recorded as skipped in the [`InjectionReport`], and the pass continues.

extern crate self as injecta;

pub mod binding;
pub mod cache;
pub mod config;
pub mod descriptor;
pub mod diagnostics;
pub mod discovery;
pub mod naming;

#[cfg(test)]
mod testing;

pub use binding::{Binding, InjectionReport, Injector, ResourceLookup, ResourceRegistry, SkippedBinding, bind};
pub use cache::DiscoveryCache;
pub use config::InjectionConfig;
pub use descriptor::{
    Accessor, Described, Marker, MemberDescriptor, MemberKind, MemberScope, Modifiers, ParentLink, Reflect,
    TypeDescriptor, Upcast, ValueKind, ValueType,
};
pub use diagnostics::{BindError, ConfigError, Constraint, DiscoveryError};
pub use discovery::{
    DiscoveredMember, DistinctNames, HierarchyScanner, MarkerPredicate, MatchSet, MemberPredicate, MemberValidator,
    StructuralValidator, TypeFilter,
};
pub use injecta_derive::Injectable;
pub use naming::{BindingName, MarkerNameResolver, NameResolver};
