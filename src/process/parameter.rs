use crate::params::{derive_parameter, ParameterValue};
use crate::process::Process;
use crate::symbolic::{Expr, Variable};
use crate::ProcessError;

/// Makes a variable constant: `x ~ x_0`.
///
/// The right-hand side is a parameter named `<variable>_0` whose default is
/// the given value, or the variable's own default value. An existing parameter
/// is used directly, and a literal stays a number.
#[derive(Debug, Clone)]
pub struct ParameterProcess {
    variable: Variable,
    value: Expr,
}

impl ParameterProcess {
    /// Parameterize `variable` from its static default value
    pub fn new(variable: Variable) -> Result<Self, ProcessError> {
        match variable.default_value() {
            Some(value) => Ok(Self::with_value(variable, value)),
            None => Err(ProcessError::MissingValue {
                variable: variable.name().to_string(),
            }),
        }
    }

    /// Parameterize `variable` with an explicit value
    pub fn with_value(variable: Variable, value: impl Into<ParameterValue>) -> Self {
        let value = derive_parameter(&variable, value, "0", false);
        Self { variable, value }
    }

    /// The parameter (or literal) the variable is set to
    pub fn value(&self) -> &Expr {
        &self.value
    }
}

impl Process for ParameterProcess {
    fn variable(&self) -> Option<&Variable> {
        Some(&self.variable)
    }

    fn rhs(&self) -> Result<Expr, ProcessError> {
        Ok(self.value.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::LiteralParameter;
    use crate::symbolic::Parameter;

    #[test]
    fn test_from_default_value() {
        let w = Variable::new("w").with_default(0.5);
        let p = ParameterProcess::new(w.clone()).unwrap();
        assert_eq!(p.lhs_variable().unwrap(), w);
        assert_eq!(p.equation().unwrap().to_string(), "w ~ w_0");
        assert_eq!(p.value().as_parameter().unwrap().default_value(), Some(0.5));
    }

    #[test]
    fn test_explicit_value_overrides_default() {
        let w = Variable::new("w").with_default(0.5);
        let p = ParameterProcess::with_value(w, 2.0);
        assert_eq!(p.value().as_parameter().unwrap().default_value(), Some(2.0));
    }

    #[test]
    fn test_without_any_value() {
        let err = ParameterProcess::new(Variable::new("w")).unwrap_err();
        assert!(matches!(err, ProcessError::MissingValue { ref variable } if variable == "w"));
    }

    #[test]
    fn test_existing_parameter_and_literal() {
        let k = Parameter::new("k");
        let p = ParameterProcess::with_value(Variable::new("w"), k.clone());
        assert_eq!(p.rhs().unwrap(), Expr::Par(k));

        let p = ParameterProcess::with_value(Variable::new("w"), LiteralParameter(1.5));
        assert_eq!(p.equation().unwrap().to_string(), "w ~ 1.5");
    }

    #[test]
    fn test_rhs_is_stable() {
        let p = ParameterProcess::new(Variable::new("w").with_default(1.0)).unwrap();
        assert_eq!(p.rhs().unwrap(), p.rhs().unwrap());
    }
}
