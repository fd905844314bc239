//! Binding-name resolution for discovered members.
//!
//! A member's binding name is its marker's explicit `name` when one is given and non-empty. Otherwise:
//! - a field uses its own identifier;
//! - a setter uses the property name derived from its identifier (`setFooBar` → `fooBar`, `set_foo` → `foo`).
//!
//! A setter whose identifier is exactly the prefix (e.g. `set`) has no property to derive and is rejected with
//! [`DiscoveryError::NamingConventionViolation`] rather than falling back to an empty name.

use std::borrow::Borrow;
use std::fmt;

use injecta_core::conventions::property_name_from_setter;
use injecta_core::lang::markers;

use crate::config::InjectionConfig;
use crate::descriptor::{Marker, MemberKind};
use crate::diagnostics::{ConfigError, DiscoveryError};
use crate::discovery::DiscoveredMember;

/// Non-empty logical key a member is bound under.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BindingName(String);

impl BindingName {
    /// `None` for an empty name.
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        (!name.is_empty()).then_some(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for BindingName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for BindingName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for BindingName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Compute the binding name of a discovered member. Pure and deterministic.
pub trait NameResolver: Send + Sync {
    fn resolve_name(&self, member: &DiscoveredMember) -> Result<BindingName, DiscoveryError>;
}

impl<R: NameResolver + ?Sized> NameResolver for &R {
    fn resolve_name(&self, member: &DiscoveredMember) -> Result<BindingName, DiscoveryError> {
        (**self).resolve_name(member)
    }
}

/// Resolve names from one marker kind's `name` attribute, falling back to identifier conventions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerNameResolver {
    marker: String,
    setter_prefix: String,
    snake_case_setters: bool,
}

impl MarkerNameResolver {
    pub fn new(marker: impl AsRef<str>) -> Result<Self, ConfigError> {
        Self::from_config(marker, &InjectionConfig::default())
    }

    pub fn from_config(marker: impl AsRef<str>, config: &InjectionConfig) -> Result<Self, ConfigError> {
        let marker = marker.as_ref();
        if marker.is_empty() {
            return Err(ConfigError::EmptyMarker);
        }
        config.validate()?;
        Ok(Self {
            marker: markers::canonicalize(marker).to_string(),
            setter_prefix: config.setter_prefix.clone(),
            snake_case_setters: config.snake_case_setters,
        })
    }
}

impl NameResolver for MarkerNameResolver {
    fn resolve_name(&self, found: &DiscoveredMember) -> Result<BindingName, DiscoveryError> {
        let member = found.member;
        if let Some(explicit) = member.marker(&self.marker).and_then(Marker::explicit_name) {
            return BindingName::new(explicit).ok_or(DiscoveryError::EmptyBindingName {
                owner: found.owner(),
                member: member.ident,
                kind: member.kind,
            });
        }

        let derived = match member.kind {
            MemberKind::Field => member.ident.to_string(),
            MemberKind::Setter => property_name_from_setter(member.ident, &self.setter_prefix, self.snake_case_setters)
                .map_err(|reason| DiscoveryError::NamingConventionViolation {
                    owner: found.owner(),
                    member: member.ident,
                    prefix: self.setter_prefix.clone(),
                    reason,
                })?,
        };

        BindingName::new(derived).ok_or(DiscoveryError::EmptyBindingName {
            owner: found.owner(),
            member: member.ident,
            kind: member.kind,
        })
    }
}
