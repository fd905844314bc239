//! Named-resource lookup: where `inject_resources` gets the value for each binding name.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;

use crate::naming::BindingName;

/// Resolve a binding name to a value. `None` means nothing is registered under that name.
pub trait ResourceLookup {
    fn lookup(&self, name: &BindingName) -> Option<&dyn Any>;
}

/// In-memory name → value registry.
#[derive(Default)]
pub struct ResourceRegistry {
    entries: HashMap<String, Box<dyn Any + Send + Sync>>,
}

impl ResourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `value` under `name`, replacing any previous entry.
    pub fn insert<T: Any + Send + Sync>(&mut self, name: impl Into<String>, value: T) {
        self.entries.insert(name.into(), Box::new(value));
    }

    pub fn with<T: Any + Send + Sync>(mut self, name: impl Into<String>, value: T) -> Self {
        self.insert(name, value);
        self
    }

    pub fn remove(&mut self, name: &str) -> bool {
        self.entries.remove(name).is_some()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn get<T: Any>(&self, name: &str) -> Option<&T> {
        self.entries.get(name).and_then(|value| value.downcast_ref::<T>())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl ResourceLookup for ResourceRegistry {
    fn lookup(&self, name: &BindingName) -> Option<&dyn Any> {
        self.entries.get(name.as_str()).map(|value| &**value as &dyn Any)
    }
}

impl fmt::Debug for ResourceRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceRegistry").field("names", &self.names()).finish()
    }
}
