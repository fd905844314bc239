//! Member discovery: predicates, validators, and the hierarchy scanner.
//!
//! ## Modules
//!
//! - `predicate` - which declared members a pass accepts (marker + optional exact-type filter)
//! - `validator` - structural rules per member and per accepted set
//! - `scanner` - the ancestor-chain walk that ties both together
//! - `matches` - discovery results

pub mod matches;
pub mod predicate;
pub mod scanner;
pub mod validator;

pub use matches::{DiscoveredMember, MatchSet};
pub use predicate::{MarkerPredicate, MemberPredicate, TypeFilter};
pub use scanner::HierarchyScanner;
pub use validator::{DistinctNames, MemberValidator, StructuralValidator, violated_constraint};
