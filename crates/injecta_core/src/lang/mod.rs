//! Injecta marker vocabulary registries.
//!
//! Callers work with **stable IDs** (e.g. `MarkerId`) and look up spellings/metadata via registry tables instead of
//! comparing raw strings all over the binder.
//!
//! ## Notes
//! - Registries are intentionally **pure**: no descriptor types, no IO, no side effects.
//! - Host-defined marker kinds that are not in a registry still work; they are compared by spelling.
//!
//! ## Examples
//! ```rust
//! use injecta_core::lang::markers::{self, MarkerId};
//!
//! assert_eq!(markers::from_str("Resource"), Some(MarkerId::Resource));
//! assert_eq!(markers::as_str(MarkerId::Resource), "resource");
//! ```

pub mod markers;
pub mod registry;
