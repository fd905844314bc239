//! Shareable metadata for `injecta_core::lang` registries.
//!
//! This submodule provides the small, dependency-free metadata types reused by every registry.
//!
//! ## Notes
//! - These types are `Copy` so registries can live in `const` tables.
//! - Metadata is meant for tooling/docs/diagnostics; matching rules live in the binder.

/// Identify the version a vocabulary item is available since.
///
/// ## Examples
/// ```rust
/// use injecta_core::lang::registry::SinceVersion;
///
/// let since: SinceVersion = "0.1.0";
/// assert!(!since.is_empty());
/// ```
pub type SinceVersion = &'static str;

/// Describe the lifecycle status of a vocabulary item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stability {
    Stable,
    Draft,
    Deprecated,
}

/// Shared metadata shape for “registry-first” vocabulary items.
///
/// - stable identity (`id`)
/// - accepted spellings (`canonical` + `aliases`)
/// - documentation (`description`)
/// - provenance (`since_version`, `stability`)
#[derive(Debug, Clone, Copy)]
pub struct LangItemInfo<Id> {
    pub id: Id,
    pub canonical: &'static str,
    pub aliases: &'static [&'static str],
    pub description: &'static str,
    pub since_version: Option<SinceVersion>,
    pub stability: Stability,
}
