//! Opt-in memoization of discovery results per root type.

use std::any::TypeId;
use std::sync::Arc;

use dashmap::DashMap;

use crate::descriptor::{Described, TypeDescriptor};
use crate::diagnostics::DiscoveryError;
use crate::discovery::{HierarchyScanner, MatchSet, MemberPredicate, MemberValidator};

/// A scanner plus a concurrent map of the match sets it has produced, keyed by root type.
///
/// Failed passes are not cached; the next call scans again.
pub struct DiscoveryCache<P, V> {
    scanner: HierarchyScanner<P, V>,
    entries: DashMap<TypeId, Arc<MatchSet>>,
}

impl<P: MemberPredicate, V: MemberValidator> DiscoveryCache<P, V> {
    pub fn new(scanner: HierarchyScanner<P, V>) -> Self {
        Self {
            scanner,
            entries: DashMap::new(),
        }
    }

    pub fn scanner(&self) -> &HierarchyScanner<P, V> {
        &self.scanner
    }

    pub fn discover(&self, ty: &'static TypeDescriptor) -> Result<Arc<MatchSet>, DiscoveryError> {
        let key = ty.type_id();
        if let Some(hit) = self.entries.get(&key) {
            tracing::trace!(root = ty.name(), "discovery cache hit");
            return Ok(Arc::clone(hit.value()));
        }

        let matches = Arc::new(self.scanner.discover(Some(ty))?);
        // Another thread may have raced us; keep whichever landed first.
        let entry = self.entries.entry(key).or_insert(matches);
        Ok(Arc::clone(entry.value()))
    }

    pub fn discover_type<T: Described>(&self) -> Result<Arc<MatchSet>, DiscoveryError> {
        self.discover(T::descriptor())
    }

    pub fn contains(&self, ty: &TypeDescriptor) -> bool {
        self.entries.contains_key(&ty.type_id())
    }

    /// Drop the cached entry for `ty`, returning whether there was one.
    pub fn invalidate(&self, ty: &TypeDescriptor) -> bool {
        self.entries.remove(&ty.type_id()).is_some()
    }

    pub fn clear(&self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
