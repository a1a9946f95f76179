//! Compiler option values and the known-parameter allow-list
//!
//! The Closure Compiler service accepts a flat form-encoded parameter map in
//! which some keys may repeat (`output_info` in particular). Options are
//! validated permissively: a key outside the allow-list is logged as a
//! warning but still sent to the service.

use serde::{Deserialize, Serialize};

/// POST parameters the compile service documents. Used for warning purposes
/// only, never for rejection.
pub const SUPPORTED_PARAMS: &[&str] = &[
    "compilation_level",
    "debug",
    "exclude_default_externs",
    "externs_url",
    "formatting",
    "js_code",
    "js_externs",
    "language",
    "output_info",
    "use_closure_library",
    "use_types_for_optimization",
    "warning_level",
];

/// The one output format this client speaks. Not caller-settable.
pub const OUTPUT_FORMAT: &str = "json";

/// Value of a compiler option: a single string, or a list that repeats its
/// key in the encoded form body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    /// Single `key=value` pair
    One(String),
    /// Repeated `key=value` pairs, one per element, in order
    Many(Vec<String>),
}

impl OptionValue {
    /// Expand this value into form pairs under `name`
    pub(crate) fn push_pairs(&self, name: &str, pairs: &mut Vec<(String, String)>) {
        match self {
            OptionValue::One(value) => pairs.push((name.to_string(), value.clone())),
            OptionValue::Many(values) => {
                pairs.extend(values.iter().map(|v| (name.to_string(), v.clone())));
            }
        }
    }
}

/// Check a key against the allow-list and warn when it is unknown
pub(crate) fn warn_unknown_param(name: &str) {
    if !SUPPORTED_PARAMS.contains(&name) {
        tracing::warn!(option = %name, "unsupported compiler option, the service may reject it");
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::One(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        OptionValue::One(value)
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        OptionValue::One(value.to_string())
    }
}

impl From<Vec<String>> for OptionValue {
    fn from(values: Vec<String>) -> Self {
        OptionValue::Many(values)
    }
}

impl From<Vec<&str>> for OptionValue {
    fn from(values: Vec<&str>) -> Self {
        OptionValue::Many(values.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for OptionValue {
    fn from(values: &[&str]) -> Self {
        OptionValue::Many(values.iter().map(|v| v.to_string()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_value_pairs() {
        let mut pairs = Vec::new();
        OptionValue::from("VERBOSE").push_pairs("warning_level", &mut pairs);
        assert_eq!(
            pairs,
            vec![("warning_level".to_string(), "VERBOSE".to_string())]
        );
    }

    #[test]
    fn test_list_value_repeats_key() {
        let mut pairs = Vec::new();
        OptionValue::from(vec!["compiled_code", "warnings"]).push_pairs("output_info", &mut pairs);
        assert_eq!(
            pairs,
            vec![
                ("output_info".to_string(), "compiled_code".to_string()),
                ("output_info".to_string(), "warnings".to_string()),
            ]
        );
    }

    #[test]
    fn test_bool_conversion() {
        assert_eq!(OptionValue::from(true), OptionValue::One("true".to_string()));
    }

    #[test]
    fn test_allow_list_contains_documented_params() {
        assert!(SUPPORTED_PARAMS.contains(&"compilation_level"));
        assert!(SUPPORTED_PARAMS.contains(&"js_code"));
        assert!(!SUPPORTED_PARAMS.contains(&"output_format"));
    }
}
