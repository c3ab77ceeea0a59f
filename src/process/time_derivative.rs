use crate::process::{Process, Timescale};
use crate::symbolic::{Expr, Variable};
use crate::ProcessError;

/// `τ*D(variable) ~ expression`
///
/// With the default [`Timescale::Unspecified`] the left-hand side is just
/// `D(variable)`.
#[derive(Debug, Clone)]
pub struct TimeDerivative {
    variable: Variable,
    expression: Expr,
    timescale: Timescale,
}

impl TimeDerivative {
    pub fn new(variable: Variable, expression: impl Into<Expr>) -> Self {
        Self {
            variable,
            expression: expression.into(),
            timescale: Timescale::Unspecified,
        }
    }

    pub fn with_timescale(mut self, timescale: impl Into<Timescale>) -> Self {
        self.timescale = timescale.into();
        self
    }
}

impl Process for TimeDerivative {
    fn variable(&self) -> Option<&Variable> {
        Some(&self.variable)
    }

    fn rhs(&self) -> Result<Expr, ProcessError> {
        Ok(self.expression.clone())
    }

    fn timescale(&self) -> Timescale {
        self.timescale.clone()
    }
}
