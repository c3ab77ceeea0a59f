//! Parameter derivation
//!
//! Helpers that turn plain numbers into named parameters, with names derived
//! from the variable they belong to. Wrapping a number in [`LiteralParameter`]
//! opts out of naming: the number is used as-is.

use serde::{Deserialize, Serialize};

use crate::symbolic::{Expr, Parameter, Variable};

/// A number that must stay a literal instead of becoming a named parameter
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LiteralParameter(pub f64);

/// A value that may become a named parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterValue {
    /// A number, turned into a fresh named parameter
    Number(f64),
    /// An existing parameter, reused as-is
    Parameter(Parameter),
    /// A number kept literal
    Literal(LiteralParameter),
}

impl ParameterValue {
    /// Whether the value is numerically zero. Named parameters never are.
    pub fn is_zero(&self) -> bool {
        match self {
            Self::Number(v) | Self::Literal(LiteralParameter(v)) => *v == 0.0,
            Self::Parameter(_) => false,
        }
    }
}

impl From<f64> for ParameterValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<Parameter> for ParameterValue {
    fn from(value: Parameter) -> Self {
        Self::Parameter(value)
    }
}

impl From<LiteralParameter> for ParameterValue {
    fn from(value: LiteralParameter) -> Self {
        Self::Literal(value)
    }
}

/// Create a named parameter with a default value
pub fn new_named_parameter(name: impl Into<String>, value: f64) -> Parameter {
    Parameter::new(name).with_default(value)
}

/// Name of a parameter derived from `variable` with `tag`.
///
/// `prefixed` gives `tag_name`, otherwise `name_tag`.
pub fn derived_name(variable: &Variable, tag: &str, prefixed: bool) -> String {
    if prefixed {
        format!("{}_{}", tag, variable.name())
    } else {
        format!("{}_{}", variable.name(), tag)
    }
}

/// Derive a parameter for `variable` from `value`.
///
/// Existing parameters are reused and literals are returned as bare numbers.
/// Plain numbers become a new parameter named after the variable and `tag`,
/// with the number as its default. Every call creates a new parameter: there
/// is no memoization.
pub fn derive_parameter(
    variable: &Variable,
    value: impl Into<ParameterValue>,
    tag: &str,
    prefixed: bool,
) -> Expr {
    match value.into() {
        ParameterValue::Parameter(p) => Expr::Par(p),
        ParameterValue::Literal(LiteralParameter(v)) => Expr::Num(v),
        ParameterValue::Number(v) => {
            Expr::Par(new_named_parameter(derived_name(variable, tag, prefixed), v))
        }
    }
}

/// Convert `(name, value)` pairs into parameters.
///
/// Numbers become named parameters with that default, existing parameters are
/// kept, and literals stay numbers.
pub fn convert_to_parameters<S: AsRef<str>>(pairs: &[(S, ParameterValue)]) -> Vec<Expr> {
    pairs
        .iter()
        .map(|(name, value)| match value {
            ParameterValue::Number(v) => Expr::Par(new_named_parameter(name.as_ref(), *v)),
            ParameterValue::Parameter(p) => Expr::Par(p.clone()),
            ParameterValue::Literal(LiteralParameter(v)) => Expr::Num(*v),
        })
        .collect()
}
