//! Processes: one defining equation per variable
//!
//! A [`Process`] describes how exactly one variable evolves. It supplies the
//! variable, the right-hand side expression and a [`Timescale`] that decides
//! whether the left-hand side is the variable itself or its time derivative,
//! possibly scaled by a coefficient parameter.
//!
//! Plain [`Equation`]s are processes too; their variable is parsed from the
//! left-hand side.
//!
//! # Example
//!
//! ```
//! use processkit::prelude::*;
//!
//! let x = Variable::new("x");
//! let y = Variable::new("y");
//!
//! let p = TimeDerivative::new(x.clone(), 0.1 * y.clone()).with_timescale(2.0);
//! assert_eq!(p.equation().unwrap().to_string(), "τ_x*D(x) ~ 0.1*y");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::sync::Arc;

pub mod addition;
pub mod equation;
pub mod parameter;
pub mod relaxation;
pub mod time_derivative;

pub use addition::{Added, AdditionProcess};
pub use equation::parse_lhs_variable;
pub use parameter::ParameterProcess;
pub use relaxation::ExpRelaxation;
pub use time_derivative::TimeDerivative;

use crate::params::{derive_parameter, LiteralParameter, ParameterValue};
use crate::symbolic::{derivative, Equation, Expr, Parameter, Variable};
use crate::ProcessError;

/// Shared handle to a process
pub type ProcessRef = Arc<dyn Process>;

/// How the left-hand side of a process is formed
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Timescale {
    /// `lhs = variable`
    #[default]
    NoTimeDerivative,
    /// `lhs = D(variable)`
    Unspecified,
    /// `lhs = τ*D(variable)`, or `lhs = variable` when the value is zero
    Value(ParameterValue),
}

impl Timescale {
    /// Whether the left-hand side contains a time derivative
    pub fn has_derivative(&self) -> bool {
        match self {
            Self::NoTimeDerivative => false,
            Self::Unspecified => true,
            Self::Value(v) => !v.is_zero(),
        }
    }
}

impl From<f64> for Timescale {
    fn from(value: f64) -> Self {
        Self::Value(ParameterValue::Number(value))
    }
}

impl From<Parameter> for Timescale {
    fn from(value: Parameter) -> Self {
        Self::Value(ParameterValue::Parameter(value))
    }
}

impl From<LiteralParameter> for Timescale {
    fn from(value: LiteralParameter) -> Self {
        Self::Value(ParameterValue::Literal(value))
    }
}

impl From<ParameterValue> for Timescale {
    fn from(value: ParameterValue) -> Self {
        Self::Value(value)
    }
}

/// Left-hand side of `variable` under `timescale`.
///
/// Numeric timescales produce a fresh coefficient parameter `τ_<name>` on
/// every call, so call this once per process and reuse the result.
pub fn timescale_lhs(variable: &Variable, timescale: &Timescale) -> Expr {
    match timescale {
        Timescale::Unspecified => derivative(variable),
        Timescale::NoTimeDerivative => Expr::Var(variable.clone()),
        Timescale::Value(v) if v.is_zero() => Expr::Var(variable.clone()),
        Timescale::Value(v) => derive_parameter(variable, v.clone(), "τ", true) * derivative(variable),
    }
}

/// A defining equation for exactly one variable.
///
/// Implementors override [`Process::rhs`] and either [`Process::variable`] or
/// [`Process::lhs_variable`]. Everything else has a working default.
pub trait Process: Debug + Send + Sync {
    /// The `variable` field of the process, if it has one
    fn variable(&self) -> Option<&Variable> {
        None
    }

    /// The variable this process defines
    fn lhs_variable(&self) -> Result<Variable, ProcessError> {
        self.variable()
            .cloned()
            .ok_or_else(|| ProcessError::configuration(self.kind(), "lhs_variable"))
    }

    /// The right-hand side expression
    fn rhs(&self) -> Result<Expr, ProcessError> {
        Err(ProcessError::configuration(self.kind(), "rhs"))
    }

    fn timescale(&self) -> Timescale {
        Timescale::NoTimeDerivative
    }

    /// The left-hand side expression, see [`timescale_lhs`]
    fn lhs(&self) -> Result<Expr, ProcessError> {
        Ok(timescale_lhs(&self.lhs_variable()?, &self.timescale()))
    }

    /// `lhs ~ rhs`
    fn equation(&self) -> Result<Equation, ProcessError> {
        Ok(Equation::new(self.lhs()?, self.rhs()?))
    }

    /// Short name of the concrete process type
    fn kind(&self) -> &'static str {
        short_type_name(std::any::type_name::<Self>())
    }

    /// Rendering used in error messages
    fn describe(&self) -> String {
        match self.equation() {
            Ok(eq) => format!("{} [{}]", eq, self.kind()),
            Err(_) => format!("{:?}", self),
        }
    }

    fn into_ref(self) -> ProcessRef
    where
        Self: Sized + 'static,
    {
        Arc::new(self)
    }
}

fn short_type_name(full: &'static str) -> &'static str {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}
