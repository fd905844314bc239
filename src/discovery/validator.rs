//! Structural validation of accepted members and of whole match sets.

use std::collections::HashMap;

use injecta_core::lang::markers;

use crate::descriptor::{MemberDescriptor, MemberKind};
use crate::diagnostics::{ConfigError, Constraint, DiscoveryError};
use crate::discovery::matches::{DiscoveredMember, MatchSet};
use crate::naming::{BindingName, NameResolver};

/// Check accepted members (and the accepted set) against structural rules.
///
/// Any error aborts the discovery pass that produced the member.
pub trait MemberValidator: Send + Sync {
    fn validate(&self, member: &DiscoveredMember) -> Result<(), DiscoveryError>;

    /// Whole-set rules. No-op unless an implementation adds some.
    fn validate_set(&self, matches: &MatchSet) -> Result<(), DiscoveryError> {
        let _ = matches;
        Ok(())
    }
}

impl<V: MemberValidator + ?Sized> MemberValidator for &V {
    fn validate(&self, member: &DiscoveredMember) -> Result<(), DiscoveryError> {
        (**self).validate(member)
    }

    fn validate_set(&self, matches: &MatchSet) -> Result<(), DiscoveryError> {
        (**self).validate_set(matches)
    }
}

impl<V: MemberValidator + ?Sized> MemberValidator for Box<V> {
    fn validate(&self, member: &DiscoveredMember) -> Result<(), DiscoveryError> {
        (**self).validate(member)
    }

    fn validate_set(&self, matches: &MatchSet) -> Result<(), DiscoveryError> {
        (**self).validate_set(matches)
    }
}

/// First structural rule `member` breaks, checked in a fixed order.
pub fn violated_constraint(member: &MemberDescriptor) -> Option<Constraint> {
    if member.kind == MemberKind::Setter && member.value_type.is_void() {
        Some(Constraint::VoidValue)
    } else if member.modifiers.is_static {
        Some(Constraint::Static)
    } else if member.modifiers.is_final {
        Some(Constraint::Final)
    } else if member.kind == MemberKind::Field && member.value_type.is_primitive() {
        Some(Constraint::Primitive)
    } else {
        None
    }
}

/// Per-member structural rules for one marker kind, optionally requiring a non-empty set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuralValidator {
    marker: String,
    required: bool,
}

impl StructuralValidator {
    pub fn new(marker: impl AsRef<str>) -> Result<Self, ConfigError> {
        let marker = marker.as_ref();
        if marker.is_empty() {
            return Err(ConfigError::EmptyMarker);
        }
        Ok(Self {
            marker: markers::canonicalize(marker).to_string(),
            required: false,
        })
    }

    /// Reject empty match sets.
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }
}

impl MemberValidator for StructuralValidator {
    fn validate(&self, found: &DiscoveredMember) -> Result<(), DiscoveryError> {
        match violated_constraint(found.member) {
            Some(constraint) => Err(DiscoveryError::StructuralConstraintViolation {
                owner: found.owner(),
                member: found.ident(),
                kind: found.member.kind,
                marker: self.marker.clone(),
                constraint,
            }),
            None => Ok(()),
        }
    }

    fn validate_set(&self, matches: &MatchSet) -> Result<(), DiscoveryError> {
        if self.required && matches.is_empty() {
            return Err(DiscoveryError::EmptyMatchSet {
                owner: matches.root().unwrap_or("<none>"),
                marker: self.marker.clone(),
                accepts: None,
            });
        }
        Ok(())
    }
}

/// Wrap a validator so the set is also rejected when two members resolve to the same binding name.
#[derive(Debug, Clone)]
pub struct DistinctNames<V, R> {
    inner: V,
    resolver: R,
}

impl<V, R> DistinctNames<V, R> {
    pub fn new(inner: V, resolver: R) -> Self {
        Self { inner, resolver }
    }
}

impl<V: MemberValidator, R: NameResolver> MemberValidator for DistinctNames<V, R> {
    fn validate(&self, member: &DiscoveredMember) -> Result<(), DiscoveryError> {
        self.inner.validate(member)
    }

    fn validate_set(&self, matches: &MatchSet) -> Result<(), DiscoveryError> {
        self.inner.validate_set(matches)?;
        let named = matches
            .iter()
            .map(|found| Ok((*found, self.resolver.resolve_name(found)?)))
            .collect::<Result<Vec<_>, DiscoveryError>>()?;
        ensure_distinct(named.iter().map(|(member, name)| (member, name)))
    }
}

/// Fail on the first binding name claimed by two members.
pub(crate) fn ensure_distinct<'a>(
    named: impl IntoIterator<Item = (&'a DiscoveredMember, &'a BindingName)>,
) -> Result<(), DiscoveryError> {
    let mut seen: HashMap<&str, &DiscoveredMember> = HashMap::new();
    for (member, name) in named {
        if let Some(first) = seen.insert(name.as_str(), member) {
            return Err(DiscoveryError::DuplicateBindingName {
                name: name.to_string(),
                first: first.qualified_name(),
                second: member.qualified_name(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{Described, TypeDescriptor};
    use crate::testing::{Base, FinalField, PrimitiveField, PrimitiveSetter, StaticField, VoidSetter};

    fn first(ty: &'static TypeDescriptor) -> DiscoveredMember {
        let member = ty.fields().first().or(ty.setters().first()).unwrap();
        DiscoveredMember {
            declaring: ty,
            member,
            depth: 0,
        }
    }

    fn constraint_of(ty: &'static TypeDescriptor) -> Option<Constraint> {
        let validator = StructuralValidator::new("resource").unwrap();
        match validator.validate(&first(ty)) {
            Err(DiscoveryError::StructuralConstraintViolation { constraint, .. }) => Some(constraint),
            Err(other) => panic!("unexpected error: {other}"),
            Ok(()) => None,
        }
    }

    #[test]
    fn each_rule_is_reported() {
        assert_eq!(constraint_of(StaticField::descriptor()), Some(Constraint::Static));
        assert_eq!(constraint_of(FinalField::descriptor()), Some(Constraint::Final));
        assert_eq!(constraint_of(PrimitiveField::descriptor()), Some(Constraint::Primitive));
    }

    #[test]
    fn void_is_checked_before_static() {
        assert_eq!(constraint_of(VoidSetter::descriptor()), Some(Constraint::VoidValue));
    }

    #[test]
    fn primitive_rule_applies_to_fields_only() {
        assert_eq!(constraint_of(PrimitiveSetter::descriptor()), None);
        assert_eq!(constraint_of(Base::descriptor()), None);
    }

    #[test]
    fn violation_reports_member_and_marker() {
        let validator = StructuralValidator::new("Resource").unwrap();
        let err = validator.validate(&first(StaticField::descriptor())).unwrap_err();
        assert_eq!(
            err,
            DiscoveryError::StructuralConstraintViolation {
                owner: "StaticField",
                member: "INSTANCE",
                kind: MemberKind::Field,
                marker: "resource".to_string(),
                constraint: Constraint::Static,
            }
        );
    }

    #[test]
    fn set_rules_are_opt_in() {
        let empty = MatchSet::empty(Some(Base::descriptor()));
        let lenient = StructuralValidator::new("resource").unwrap();
        assert_eq!(lenient.validate_set(&empty), Ok(()));

        let strict = lenient.required(true);
        assert_eq!(
            strict.validate_set(&empty),
            Err(DiscoveryError::EmptyMatchSet {
                owner: "Base",
                marker: "resource".to_string(),
                accepts: None,
            })
        );
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let found = first(Base::descriptor());
        let name = BindingName::new("ctx").unwrap();
        let named = [(&found, &name), (&found, &name)];
        assert_eq!(
            ensure_distinct(named),
            Err(DiscoveryError::DuplicateBindingName {
                name: "ctx".to_string(),
                first: "Base::ctx".to_string(),
                second: "Base::ctx".to_string(),
            })
        );
        assert_eq!(ensure_distinct([(&found, &name)]), Ok(()));
    }
}
