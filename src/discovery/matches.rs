//! Discovery results: one accepted member, and the ordered set of them.

use std::fmt;
use std::ptr;

use crate::descriptor::{MemberDescriptor, TypeDescriptor};

/// A member accepted during discovery, together with where in the ancestor chain it was declared.
#[derive(Debug, Clone, Copy)]
pub struct DiscoveredMember {
    pub declaring: &'static TypeDescriptor,
    pub member: &'static MemberDescriptor,
    /// Number of parent links between the scanned root type and `declaring` (0 = the root itself).
    pub depth: usize,
}

impl DiscoveredMember {
    pub fn owner(&self) -> &'static str {
        self.declaring.name()
    }

    pub fn ident(&self) -> &'static str {
        self.member.ident
    }

    /// `Owner::ident`, as used in diagnostics.
    pub fn qualified_name(&self) -> String {
        format!("{}::{}", self.owner(), self.ident())
    }
}

impl PartialEq for DiscoveredMember {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.member, other.member) && ptr::eq(self.declaring, other.declaring) && self.depth == other.depth
    }
}

impl Eq for DiscoveredMember {}

impl fmt::Display for DiscoveredMember {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}: {}",
            self.member.kind,
            self.qualified_name(),
            self.member.value_type.name()
        )
    }
}

/// Ordered, validated result of one discovery pass.
///
/// Members declared on the scanned type come first, followed by each ancestor's members in chain order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchSet {
    root: Option<&'static str>,
    members: Vec<DiscoveredMember>,
}

impl MatchSet {
    pub(crate) fn empty(root: Option<&'static TypeDescriptor>) -> Self {
        Self {
            root: root.map(TypeDescriptor::name),
            members: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, member: DiscoveredMember) {
        self.members.push(member);
    }

    /// Name of the scanned type, `None` for a pass over an absent type.
    pub fn root(&self) -> Option<&'static str> {
        self.root
    }

    pub fn members(&self) -> &[DiscoveredMember] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DiscoveredMember> {
        self.members.iter()
    }

    /// Identifiers in match order.
    pub fn idents(&self) -> Vec<&'static str> {
        self.members.iter().map(DiscoveredMember::ident).collect()
    }
}

impl<'a> IntoIterator for &'a MatchSet {
    type Item = &'a DiscoveredMember;
    type IntoIter = std::slice::Iter<'a, DiscoveredMember>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}

impl IntoIterator for MatchSet {
    type Item = DiscoveredMember;
    type IntoIter = std::vec::IntoIter<DiscoveredMember>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.into_iter()
    }
}

impl fmt::Display for MatchSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}: {} match(es)", self.root.unwrap_or("<none>"), self.members.len())?;
        for (index, member) in self.members.iter().enumerate() {
            writeln!(f, "  [{index}] depth {} {member}", member.depth)?;
        }
        Ok(())
    }
}
