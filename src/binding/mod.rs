//! Runtime binding of resolved values into live instances.
//!
//! ## Modules
//!
//! - `injector` - the discover → name → bind pass for one marker kind
//! - `lookup` - named resources for `Injector::inject_resources`
//! - `report` - what a pass bound and what it skipped

pub mod injector;
pub mod lookup;
pub mod report;

pub use injector::{Injector, bind};
pub use lookup::{ResourceLookup, ResourceRegistry};
pub use report::{Binding, InjectionReport, SkippedBinding};
