//! Injection configuration
//!
//! Plain builder-style settings; everything has a default that matches the bean conventions.

use injecta_core::conventions::SETTER_PREFIX;

use crate::diagnostics::ConfigError;

/// Injection configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InjectionConfig {
    /// Prefix every setter identifier must start with
    pub setter_prefix: String,
    /// Accept `set_foo` as well as `setFoo`
    pub snake_case_setters: bool,
    /// Treat a pass that finds no marked member as an error
    pub require_match: bool,
    /// Reject two members that resolve to the same binding name
    pub distinct_names: bool,
}

impl Default for InjectionConfig {
    fn default() -> Self {
        Self {
            setter_prefix: SETTER_PREFIX.to_string(),
            snake_case_setters: true,
            require_match: false,
            distinct_names: false,
        }
    }
}

impl InjectionConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the setter prefix
    pub fn with_setter_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.setter_prefix = prefix.into();
        self
    }

    /// Enable or disable `set_foo` style setters
    pub fn with_snake_case_setters(mut self, enabled: bool) -> Self {
        self.snake_case_setters = enabled;
        self
    }

    /// Require at least one marked member per pass
    pub fn with_require_match(mut self, required: bool) -> Self {
        self.require_match = required;
        self
    }

    /// Require binding names to be distinct per pass
    pub fn with_distinct_names(mut self, distinct: bool) -> Self {
        self.distinct_names = distinct;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.setter_prefix.is_empty() {
            return Err(ConfigError::EmptySetterPrefix);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================
    // Default config tests
    // ========================================

    #[test]
    fn test_default_config_setter_prefix() {
        let config = InjectionConfig::default();
        assert_eq!(config.setter_prefix, "set");
    }

    #[test]
    fn test_default_config_flags() {
        let config = InjectionConfig::default();
        assert!(config.snake_case_setters);
        assert!(!config.require_match);
        assert!(!config.distinct_names);
    }

    #[test]
    fn test_new_equals_default() {
        assert_eq!(InjectionConfig::new(), InjectionConfig::default());
    }

    // ========================================
    // Builder tests
    // ========================================

    #[test]
    fn test_builder_chain() {
        let config = InjectionConfig::new()
            .with_setter_prefix("with")
            .with_snake_case_setters(false)
            .with_require_match(true)
            .with_distinct_names(true);
        assert_eq!(config.setter_prefix, "with");
        assert!(!config.snake_case_setters);
        assert!(config.require_match);
        assert!(config.distinct_names);
    }

    #[test]
    fn test_empty_prefix_is_rejected() {
        let config = InjectionConfig::new().with_setter_prefix("");
        assert_eq!(config.validate(), Err(ConfigError::EmptySetterPrefix));
        assert_eq!(InjectionConfig::default().validate(), Ok(()));
    }
}
