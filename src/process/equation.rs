use crate::process::{Process, Timescale};
use crate::symbolic::{Equation, Expr, Variable};
use crate::ProcessError;

/// Extract the defined variable from the left-hand side of an equation.
///
/// Accepted shapes are `x`, `D(x)`, `D(x)*p` and `p*D(x)`, where `p` is a
/// parameter or a number. Anything else is rejected.
pub fn parse_lhs_variable(equation: &Equation) -> Result<Variable, ProcessError> {
    let malformed = || ProcessError::MalformedLhs {
        equation: equation.to_string(),
    };

    match &equation.lhs {
        Expr::Var(x) => Ok(x.clone()),
        Expr::Derivative(inner) => inner.as_variable().cloned().ok_or_else(malformed),
        Expr::Mul(a, b) => {
            let inner = match (a.as_ref(), b.as_ref()) {
                (Expr::Derivative(inner), coeff) if is_coefficient(coeff) => inner,
                (coeff, Expr::Derivative(inner)) if is_coefficient(coeff) => inner,
                _ => return Err(malformed()),
            };
            inner.as_variable().cloned().ok_or_else(malformed)
        }
        _ => Err(malformed()),
    }
}

fn is_coefficient(expr: &Expr) -> bool {
    matches!(expr, Expr::Par(_) | Expr::Num(_))
}

impl Process for Equation {
    fn lhs_variable(&self) -> Result<Variable, ProcessError> {
        parse_lhs_variable(self)
    }

    fn rhs(&self) -> Result<Expr, ProcessError> {
        Ok(self.rhs.clone())
    }

    fn timescale(&self) -> Timescale {
        Timescale::NoTimeDerivative
    }

    fn lhs(&self) -> Result<Expr, ProcessError> {
        Ok(self.lhs.clone())
    }

    fn equation(&self) -> Result<Equation, ProcessError> {
        Ok(self.clone())
    }

    fn describe(&self) -> String {
        format!("{} [Equation]", self)
    }
}
