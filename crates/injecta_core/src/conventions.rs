//! Shared binding conventions (well-known identifiers and the setter naming rule).

use std::fmt;

/// Prefix every setter-style method identifier must start with.
pub const SETTER_PREFIX: &str = "set";

/// Separator allowed directly after the prefix in snake-case setters (`set_foo`).
pub const SNAKE_CASE_SEPARATOR: char = '_';

/// Marker attribute carrying an explicit binding name.
pub const NAME_ATTR: &str = "name";

/// Marker kind used when a declaration does not name one.
pub const DEFAULT_MARKER: &str = "resource";

/// Why a setter identifier does not follow the naming convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetterNameError {
    /// The identifier does not start with the setter prefix.
    MissingPrefix,
    /// Nothing is left after the prefix (e.g. `set`, or `set_` for snake-case setters).
    MissingProperty,
}

impl fmt::Display for SetterNameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetterNameError::MissingPrefix => write!(f, "identifier does not start with the setter prefix"),
            SetterNameError::MissingProperty => write!(f, "no property name follows the setter prefix"),
        }
    }
}

impl std::error::Error for SetterNameError {}

/// Derive the bean-style property name from a setter identifier.
///
/// ## Parameters
/// - `ident`: the setter's identifier (e.g. `setFooBar`).
/// - `prefix`: the required prefix (usually [`SETTER_PREFIX`]).
/// - `snake_case`: when `true`, a single [`SNAKE_CASE_SEPARATOR`] right after the prefix is skipped.
///
/// ## Returns
/// - (`String`): the suffix after the prefix with its first character lower-cased and the rest verbatim.
///
/// ## Examples
/// ```rust
/// use injecta_core::conventions::{property_name_from_setter, SetterNameError, SETTER_PREFIX};
///
/// assert_eq!(property_name_from_setter("setFooBar", SETTER_PREFIX, false).as_deref(), Ok("fooBar"));
/// assert_eq!(property_name_from_setter("set_ctx", SETTER_PREFIX, true).as_deref(), Ok("ctx"));
/// assert_eq!(property_name_from_setter("set", SETTER_PREFIX, true), Err(SetterNameError::MissingProperty));
/// ```
pub fn property_name_from_setter(ident: &str, prefix: &str, snake_case: bool) -> Result<String, SetterNameError> {
    let rest = ident.strip_prefix(prefix).ok_or(SetterNameError::MissingPrefix)?;
    let rest = if snake_case {
        rest.strip_prefix(SNAKE_CASE_SEPARATOR).unwrap_or(rest)
    } else {
        rest
    };

    let mut chars = rest.chars();
    let first = chars.next().ok_or(SetterNameError::MissingProperty)?;
    let mut name = String::with_capacity(rest.len());
    name.extend(first.to_lowercase());
    name.push_str(chars.as_str());
    Ok(name)
}
