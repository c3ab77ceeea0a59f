use serde::{Deserialize, Serialize};

use crate::symbolic::Variable;

/// Settings for [`complete`](crate::completion::complete)
///
/// Every field has a default, so a partial JSON object is enough:
///
/// ```
/// use processkit::CompletionOptions;
///
/// let options: CompletionOptions =
///     serde_json::from_str(r#"{ "warn_on_implicit_parameter": false }"#).unwrap();
/// assert!(!options.warn_on_implicit_parameter);
/// assert!(options.validate_rhs_shape);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompletionOptions {
    /// Log a warning when a variable is turned into a parameter from its default value
    pub warn_on_implicit_parameter: bool,
    /// Reject processes whose right-hand side is an equation
    pub validate_rhs_shape: bool,
    /// Variable that never needs a process
    pub independent_variable: Variable,
}

impl Default for CompletionOptions {
    fn default() -> Self {
        Self {
            warn_on_implicit_parameter: true,
            validate_rhs_shape: true,
            independent_variable: Variable::time(),
        }
    }
}

impl CompletionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warn_on_implicit_parameter(mut self, warn: bool) -> Self {
        self.warn_on_implicit_parameter = warn;
        self
    }

    pub fn validate_rhs_shape(mut self, validate: bool) -> Self {
        self.validate_rhs_shape = validate;
        self
    }

    pub fn independent_variable(mut self, variable: Variable) -> Self {
        self.independent_variable = variable;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = CompletionOptions::default();
        assert!(options.warn_on_implicit_parameter);
        assert!(options.validate_rhs_shape);
        assert_eq!(options.independent_variable, Variable::time());
    }

    #[test]
    fn test_from_json() {
        let options: CompletionOptions = serde_json::from_str(
            r#"{ "validate_rhs_shape": false, "independent_variable": { "name": "s" } }"#,
        )
        .unwrap();
        assert!(options.warn_on_implicit_parameter);
        assert!(!options.validate_rhs_shape);
        assert_eq!(options.independent_variable.name(), "s");
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result: Result<CompletionOptions, _> = serde_json::from_str(r#"{ "warn": true }"#);
        assert!(result.is_err());
    }
}
