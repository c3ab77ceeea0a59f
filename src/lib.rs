//! # processkit
//!
//! Assemble equation systems from processes. Each process defines exactly one
//! variable; the completion engine collects every variable that the given
//! processes reference, resolves the missing ones from default processes or
//! default values, and reports precisely which variable is missing or defined
//! twice, and where it came from.
//!
//! ```
//! use processkit::prelude::*;
//!
//! let x = Variable::new("x");
//! let y = Variable::new("y");
//! let z = Variable::new("z");
//!
//! let entries: Vec<Entry> = vec![
//!     ExpRelaxation::new(z.clone(), x.pow(2.0)).with_timescale(1.0).into(),
//!     TimeDerivative::new(x.clone(), 0.1 * y.clone()).into(),
//!     Equation::new(y.clone(), z.clone() - x.clone()).into(),
//! ];
//!
//! let model = assemble_model(
//!     &entries,
//!     &DefaultSource::None,
//!     &CompletionOptions::default(),
//!     &ModelOptions::default(),
//! )
//! .unwrap();
//! assert_eq!(model.equations().len(), 3);
//! ```

pub mod completion;
pub mod error;
pub mod model;
pub mod params;
pub mod process;
pub mod registry;
pub mod symbolic;

pub use crate::completion::{
    complete, complete_with_report, expand, Completion, CompletionOptions, DefaultSource, Entry,
    ImplicitParameter,
};
pub use crate::model::{assemble_model, Model, ModelOptions, ModelType};
pub use crate::params::{
    convert_to_parameters, derive_parameter, new_named_parameter, LiteralParameter, ParameterValue,
};
pub use crate::process::{
    parse_lhs_variable, timescale_lhs, Added, AdditionProcess, ExpRelaxation, ParameterProcess,
    Process, ProcessRef, TimeDerivative, Timescale,
};
pub use crate::registry::{DefaultProcesses, Namespace, ProcessRegistry};
pub use crate::symbolic::{
    default_value, derivative, has_symbolic_var, time, Equation, Expr, Parameter, Variable,
};
pub use error::ProcessError;

pub mod prelude {
    pub use crate::completion::{
        complete, complete_with_report, CompletionOptions, DefaultSource, Entry,
    };
    pub use crate::model::{assemble_model, Model, ModelOptions, ModelType};
    pub use crate::params::{LiteralParameter, ParameterValue};
    pub use crate::process::{
        AdditionProcess, ExpRelaxation, ParameterProcess, Process, ProcessRef, TimeDerivative,
        Timescale,
    };
    pub use crate::registry::{Namespace, ProcessRegistry};
    pub use crate::symbolic::{derivative, time, Equation, Expr, Parameter, Variable};
    pub use crate::ProcessError;
}
