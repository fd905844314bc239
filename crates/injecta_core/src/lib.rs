//! Provide the shared, pure vocabulary for the injecta binder and its derive macro.
//!
//! This crate is intentionally small and dependency-free. It contains deterministic helpers that both:
//! - the binder can use for predicate matching and binding-name resolution, and
//! - the derive macro can use to emit metadata that agrees with the binder at runtime.
//!
//! ## Notes
//!
//! - This is a “semantic core” crate: **no IO**, no global state, and no binder-specific types.
//! - Current scope: the marker registry (`lang::markers`) and setter/attribute naming conventions (`conventions`).

pub mod conventions;
pub mod lang;
