use serde::{Deserialize, Serialize};
use std::fmt;

use super::expr::Expr;
use super::variable::Variable;

/// An equation `lhs ~ rhs`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Equation {
    pub lhs: Expr,
    pub rhs: Expr,
}

impl Equation {
    pub fn new(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Self {
        Self {
            lhs: lhs.into(),
            rhs: rhs.into(),
        }
    }

    /// Whether the variable appears on either side of the equation
    pub fn mentions(&self, variable: &Variable) -> bool {
        self.lhs.contains_variable(variable) || self.rhs.contains_variable(variable)
    }
}

impl fmt::Display for Equation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ~ {}", self.lhs, self.rhs)
    }
}

/// Check whether any of the equations mentions `variable`
pub fn has_symbolic_var(equations: &[Equation], variable: &Variable) -> bool {
    equations.iter().any(|eq| eq.mentions(variable))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbolic::derivative;

    #[test]
    fn test_display() {
        let x = Variable::new("x");
        let y = Variable::new("y");
        let eq = Equation::new(derivative(&x), 0.1 * y);
        assert_eq!(eq.to_string(), "D(x) ~ 0.1*y");
    }

    #[test]
    fn test_has_symbolic_var() {
        let x = Variable::new("x");
        let y = Variable::new("y");
        let eqs = vec![Equation::new(&x, y.pow(2.0))];
        assert!(has_symbolic_var(&eqs, &x));
        assert!(has_symbolic_var(&eqs, &y));
        assert!(!has_symbolic_var(&eqs, &Variable::new("z")));
        assert!(!has_symbolic_var(&[], &x));
    }
}
