//! Marker vocabulary registry.
//!
//! This module centralizes recognized marker spellings so the binder doesn't need stringly-typed comparisons.

use crate::lang::registry::{LangItemInfo, Stability};

/// Stable identifier for supported markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerId {
    Resource,
    Context,
    ServiceRef,
}

/// Metadata entry for a marker.
pub type MarkerInfo = LangItemInfo<MarkerId>;

/// Registry of supported markers.
pub const MARKERS: &[MarkerInfo] = &[
    info(
        MarkerId::Resource,
        "resource",
        &["Resource"],
        "Bind a named resource resolved through a lookup facility.",
        Stability::Stable,
    ),
    info(
        MarkerId::Context,
        "context",
        &["Context", "WebServiceContext"],
        "Bind an externally supplied context object by its exact type.",
        Stability::Stable,
    ),
    info(
        MarkerId::ServiceRef,
        "service_ref",
        &["ServiceRef", "WebServiceRef"],
        "Bind a reference to a remote service endpoint.",
        Stability::Draft,
    ),
];

/// Resolve a marker spelling (canonical or alias) to its stable id.
pub fn from_str(name: &str) -> Option<MarkerId> {
    if let Some(info) = MARKERS.iter().find(|m| m.canonical == name) {
        return Some(info.id);
    }
    MARKERS.iter().find(|m| m.aliases.contains(&name)).map(|m| m.id)
}

/// Return the canonical spelling for a marker.
pub fn as_str(id: MarkerId) -> &'static str {
    info_for(id).canonical
}

/// Return the metadata entry for a marker.
pub fn info_for(id: MarkerId) -> &'static MarkerInfo {
    MARKERS.iter().find(|m| m.id == id).expect("marker info missing")
}

/// Fold a spelling to its canonical form, leaving unknown (host-defined) spellings untouched.
///
/// ## Examples
/// ```rust
/// use injecta_core::lang::markers;
///
/// assert_eq!(markers::canonicalize("WebServiceContext"), "context");
/// assert_eq!(markers::canonicalize("audit"), "audit");
/// ```
pub fn canonicalize(name: &str) -> &str {
    match from_str(name) {
        Some(id) => as_str(id),
        None => name,
    }
}

/// Check whether two spellings denote the same marker kind.
pub fn same_kind(a: &str, b: &str) -> bool {
    canonicalize(a) == canonicalize(b)
}

const fn info(
    id: MarkerId,
    canonical: &'static str,
    aliases: &'static [&'static str],
    description: &'static str,
    stability: Stability,
) -> MarkerInfo {
    LangItemInfo {
        id,
        canonical,
        aliases,
        description,
        since_version: Some("0.1.0"),
        stability,
    }
}
