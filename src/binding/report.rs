//! Aggregate outcome of one injection pass.

use std::fmt;

use crate::diagnostics::BindError;
use crate::discovery::DiscoveredMember;
use crate::naming::BindingName;

/// A discovered member paired with the name it binds under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub member: DiscoveredMember,
    pub name: BindingName,
}

impl fmt::Display for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} as `{}`", self.member.member.kind, self.member.qualified_name(), self.name)
    }
}

/// A planned binding that failed at assignment time and was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedBinding {
    pub binding: Binding,
    pub error: BindError,
}

/// What one `inject` call bound and what it skipped.
///
/// Skips are binding-time failures only; discovery failures never produce a report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InjectionReport {
    target: &'static str,
    bound: Vec<Binding>,
    skipped: Vec<SkippedBinding>,
}

impl InjectionReport {
    pub(crate) fn new(target: &'static str) -> Self {
        Self {
            target,
            bound: Vec::new(),
            skipped: Vec::new(),
        }
    }

    pub(crate) fn push_bound(&mut self, binding: Binding) {
        self.bound.push(binding);
    }

    pub(crate) fn push_skipped(&mut self, binding: Binding, error: BindError) {
        self.skipped.push(SkippedBinding { binding, error });
    }

    /// Name of the instance's runtime type.
    pub fn target(&self) -> &'static str {
        self.target
    }

    pub fn bound(&self) -> &[Binding] {
        &self.bound
    }

    pub fn skipped(&self) -> &[SkippedBinding] {
        &self.skipped
    }

    /// `true` when nothing was skipped.
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }

    /// Binding names of the bound members, in binding order.
    pub fn bound_names(&self) -> Vec<&str> {
        self.bound.iter().map(|b| b.name.as_str()).collect()
    }

    pub fn skipped_names(&self) -> Vec<&str> {
        self.skipped.iter().map(|s| s.binding.name.as_str()).collect()
    }
}

impl fmt::Display for InjectionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{}: {} bound, {} skipped",
            self.target,
            self.bound.len(),
            self.skipped.len()
        )?;
        for binding in &self.bound {
            writeln!(f, "  bound {binding}")?;
        }
        for skipped in &self.skipped {
            writeln!(f, "  skipped {}: {}", skipped.binding, skipped.error)?;
        }
        Ok(())
    }
}
