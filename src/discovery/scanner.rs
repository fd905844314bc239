//! Type hierarchy scanner.
//!
//! Walks a type and its ancestor chain iteratively, accepting members through a [`MemberPredicate`] and checking them
//! with a [`MemberValidator`]. The scanned type's own members come first, then each parent's, in chain order.

use crate::descriptor::{Described, MemberScope, TypeDescriptor};
use crate::diagnostics::DiscoveryError;
use crate::discovery::matches::{DiscoveredMember, MatchSet};
use crate::discovery::predicate::MemberPredicate;
use crate::discovery::validator::MemberValidator;

/// Discover marked members of one scope (fields or setters) over an ancestor chain.
#[derive(Debug, Clone)]
pub struct HierarchyScanner<P, V> {
    scope: MemberScope,
    predicate: P,
    validator: V,
}

impl<P: MemberPredicate, V: MemberValidator> HierarchyScanner<P, V> {
    pub fn new(scope: MemberScope, predicate: P, validator: V) -> Self {
        Self {
            scope,
            predicate,
            validator,
        }
    }

    pub fn fields(predicate: P, validator: V) -> Self {
        Self::new(MemberScope::Fields, predicate, validator)
    }

    pub fn setters(predicate: P, validator: V) -> Self {
        Self::new(MemberScope::Setters, predicate, validator)
    }

    pub fn scope(&self) -> MemberScope {
        self.scope
    }

    /// Discover matching members of `ty` and its ancestors.
    ///
    /// ## Returns
    /// - an empty set for an absent type (not an error);
    /// - otherwise the members in child-before-ancestor order, after whole-set validation.
    ///
    /// ## Errors
    /// - the first per-member or whole-set validation failure; no partial result is returned.
    #[tracing::instrument(skip_all, fields(scope = %self.scope, root = ty.map_or("<none>", TypeDescriptor::name)))]
    pub fn discover(&self, ty: Option<&'static TypeDescriptor>) -> Result<MatchSet, DiscoveryError> {
        let mut matches = MatchSet::empty(ty);
        let Some(root) = ty else {
            return Ok(matches);
        };

        for (depth, level) in root.ancestors().enumerate() {
            for member in level.members(self.scope) {
                if !self.predicate.matches(member) {
                    continue;
                }
                let found = DiscoveredMember {
                    declaring: level,
                    member,
                    depth,
                };
                self.validator.validate(&found)?;
                tracing::debug!(member = %found.qualified_name(), depth, "accepted member");
                matches.push(found);
            }
        }

        self.validator.validate_set(&matches)?;
        Ok(matches)
    }

    /// Shorthand for `discover(Some(T::descriptor()))`.
    pub fn discover_type<T: Described>(&self) -> Result<MatchSet, DiscoveryError> {
        self.discover(Some(T::descriptor()))
    }
}
