//! Minimal symbolic layer
//!
//! Variables, parameters, expressions and equations. Only the operations the
//! completion engine needs are provided: building expressions, printing them,
//! and listing the variables and parameters they reference. Nothing here
//! simplifies or evaluates.

pub mod equation;
pub mod expr;
pub mod variable;

pub use equation::{has_symbolic_var, Equation};
pub use expr::{derivative, time, Expr};
pub use variable::{default_value, Parameter, Variable, TIME};
