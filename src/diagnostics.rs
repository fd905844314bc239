//! Error types for discovery, configuration, and binding.
//!
//! Two tiers: discovery returns `Result<_, DiscoveryError>` and aborts the pass on the first violation, while
//! binding failures are collected as [`BindError`]s inside an [`InjectionReport`](crate::InjectionReport) and never
//! abort the caller.

use std::fmt;

use injecta_core::conventions::SetterNameError;
use miette::Diagnostic;
use thiserror::Error;

use crate::descriptor::MemberKind;

/// Structural rule a marked member broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Constraint {
    /// Setter whose value type is the no-value sentinel.
    VoidValue,
    Static,
    Final,
    /// Field whose value type is a primitive scalar.
    Primitive,
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constraint::VoidValue => write!(f, "setter takes no value"),
            Constraint::Static => write!(f, "member is static"),
            Constraint::Final => write!(f, "member is final"),
            Constraint::Primitive => write!(f, "field has a primitive type"),
        }
    }
}

/// Invalid construction arguments. Fatal; raised before any discovery happens.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum ConfigError {
    #[error("marker kind must not be empty")]
    #[diagnostic(code(injecta::config::empty_marker))]
    EmptyMarker,

    #[error("setter prefix must not be empty")]
    #[diagnostic(code(injecta::config::empty_setter_prefix))]
    EmptySetterPrefix,
}

/// Failure of a discovery or name-resolution pass. Surfaced unchanged to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum DiscoveryError {
    #[error("{kind} `{owner}::{member}` marked `{marker}` violates a structural constraint: {constraint}")]
    #[diagnostic(
        code(injecta::structural_constraint),
        help("marked members must be non-static, non-final, take a value, and (for fields) hold a non-primitive type")
    )]
    StructuralConstraintViolation {
        owner: &'static str,
        member: &'static str,
        kind: MemberKind,
        marker: String,
        constraint: Constraint,
    },

    #[error("setter `{owner}::{member}` does not follow the `{prefix}<Property>` naming convention: {reason}")]
    #[diagnostic(
        code(injecta::naming_convention),
        help("rename the setter or give its marker an explicit `name`")
    )]
    NamingConventionViolation {
        owner: &'static str,
        member: &'static str,
        prefix: String,
        reason: SetterNameError,
    },

    #[error("{kind} `{owner}::{member}` resolves to an empty binding name")]
    #[diagnostic(code(injecta::empty_binding_name))]
    EmptyBindingName {
        owner: &'static str,
        member: &'static str,
        kind: MemberKind,
    },

    /// `accepts` is the value type of a typed injection; members of other types were filtered out.
    #[error("no member of `{owner}` carries the `{marker}` marker{}", accepting(.accepts))]
    #[diagnostic(
        code(injecta::empty_match_set),
        help("a typed injection only binds members declared with exactly the injected type")
    )]
    EmptyMatchSet {
        owner: &'static str,
        marker: String,
        accepts: Option<&'static str>,
    },

    #[error("binding name `{name}` is claimed by both `{first}` and `{second}`")]
    #[diagnostic(
        code(injecta::duplicate_binding_name),
        help("give one of the markers a distinct explicit `name`")
    )]
    DuplicateBindingName { name: String, first: String, second: String },
}

fn accepting(accepts: &Option<&'static str>) -> String {
    accepts.map(|ty| format!(" with value type `{ty}`")).unwrap_or_default()
}

/// Failure while performing a single assignment or setter call. Logged and skipped, never propagated.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum BindError {
    #[error("member exposes no binding capability")]
    #[diagnostic(code(injecta::bind::inaccessible))]
    Inaccessible,

    #[error("target is not a `{expected}`")]
    #[diagnostic(code(injecta::bind::target_mismatch))]
    TargetMismatch { expected: &'static str },

    #[error("value is not a `{expected}`")]
    #[diagnostic(code(injecta::bind::value_mismatch))]
    ValueMismatch { expected: &'static str },

    #[error("ancestor part at depth {depth} is unreachable")]
    #[diagnostic(code(injecta::bind::ancestor_unreachable))]
    AncestorUnreachable { depth: usize },

    #[error("no resource is registered under `{0}`")]
    #[diagnostic(code(injecta::bind::missing_resource))]
    MissingResource(String),

    #[error("setter rejected the value: {0}")]
    #[diagnostic(code(injecta::bind::rejected))]
    Rejected(String),
}
