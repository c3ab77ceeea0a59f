use crate::process::{Process, Timescale};
use crate::symbolic::{Expr, Variable};
use crate::ProcessError;

/// Exponential relaxation of `variable` towards `expression`:
/// `τ*D(variable) ~ expression - variable`.
///
/// When the timescale is zero (or there is no time derivative) the variable
/// is set directly: `variable ~ expression`.
#[derive(Debug, Clone)]
pub struct ExpRelaxation {
    variable: Variable,
    expression: Expr,
    timescale: Timescale,
}

impl ExpRelaxation {
    pub fn new(variable: Variable, expression: impl Into<Expr>) -> Self {
        Self {
            variable,
            expression: expression.into(),
            timescale: Timescale::Unspecified,
        }
    }

    /// Relax the variable of an existing process towards that process's
    /// right-hand side
    pub fn from_process(
        process: &dyn Process,
        timescale: impl Into<Timescale>,
    ) -> Result<Self, ProcessError> {
        Ok(Self {
            variable: process.lhs_variable()?,
            expression: process.rhs()?,
            timescale: timescale.into(),
        })
    }

    pub fn with_timescale(mut self, timescale: impl Into<Timescale>) -> Self {
        self.timescale = timescale.into();
        self
    }
}

impl Process for ExpRelaxation {
    fn variable(&self) -> Option<&Variable> {
        Some(&self.variable)
    }

    fn rhs(&self) -> Result<Expr, ProcessError> {
        if self.timescale.has_derivative() {
            Ok(self.expression.clone() - self.variable.clone())
        } else {
            Ok(self.expression.clone())
        }
    }

    fn timescale(&self) -> Timescale {
        self.timescale.clone()
    }
}
