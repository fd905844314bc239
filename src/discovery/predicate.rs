//! Member predicates: which declared members a scan accepts.

use injecta_core::lang::markers;

use crate::descriptor::{MemberDescriptor, ValueType};
use crate::diagnostics::ConfigError;

/// Decide whether a declared member takes part in a discovery pass.
///
/// Implementations are pure functions of the member and their own configuration.
pub trait MemberPredicate: Send + Sync {
    fn matches(&self, member: &MemberDescriptor) -> bool;
}

impl<P: MemberPredicate + ?Sized> MemberPredicate for &P {
    fn matches(&self, member: &MemberDescriptor) -> bool {
        (**self).matches(member)
    }
}

impl<P: MemberPredicate + ?Sized> MemberPredicate for Box<P> {
    fn matches(&self, member: &MemberDescriptor) -> bool {
        (**self).matches(member)
    }
}

/// Exact-type filter on a member's value type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeFilter {
    ty: ValueType,
    include: bool,
}

impl TypeFilter {
    /// Accept only members whose value type is exactly `ty`.
    pub fn include(ty: ValueType) -> Self {
        Self { ty, include: true }
    }

    /// Accept only members whose value type is anything but `ty`.
    pub fn exclude(ty: ValueType) -> Self {
        Self { ty, include: false }
    }

    /// The one type an include filter accepts.
    pub fn included(&self) -> Option<ValueType> {
        self.include.then_some(self.ty)
    }

    pub fn accepts(&self, value_type: &ValueType) -> bool {
        (*value_type == self.ty) == self.include
    }
}

/// Accept members carrying a marker kind, optionally restricted by a [`TypeFilter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerPredicate {
    marker: String,
    filter: Option<TypeFilter>,
}

impl MarkerPredicate {
    pub fn new(marker: impl AsRef<str>) -> Result<Self, ConfigError> {
        let marker = marker.as_ref();
        if marker.is_empty() {
            return Err(ConfigError::EmptyMarker);
        }
        Ok(Self {
            marker: markers::canonicalize(marker).to_string(),
            filter: None,
        })
    }

    pub fn with_filter(mut self, filter: Option<TypeFilter>) -> Self {
        self.filter = filter;
        self
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    pub fn filter(&self) -> Option<&TypeFilter> {
        self.filter.as_ref()
    }
}

impl MemberPredicate for MarkerPredicate {
    fn matches(&self, member: &MemberDescriptor) -> bool {
        member.has_marker(&self.marker)
            && self
                .filter
                .as_ref()
                .is_none_or(|filter| filter.accepts(&member.value_type))
    }
}
