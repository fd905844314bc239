#![no_main]

use injecta_core::conventions::{SETTER_PREFIX, SetterNameError, property_name_from_setter};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(ident) = std::str::from_utf8(data) else {
        return;
    };
    for snake_case in [false, true] {
        match property_name_from_setter(ident, SETTER_PREFIX, snake_case) {
            Ok(property) => {
                assert!(!property.is_empty());
                assert!(ident.starts_with(SETTER_PREFIX));
            }
            Err(SetterNameError::MissingPrefix) => assert!(!ident.starts_with(SETTER_PREFIX)),
            Err(SetterNameError::MissingProperty) => assert!(ident.len() <= SETTER_PREFIX.len() + 1),
        }
    }
});
