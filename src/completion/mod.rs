//! Equation completion
//!
//! Turns a partial list of processes into a complete equation system. Every
//! variable referenced on a right-hand side must end up with exactly one
//! defining equation. Variables without a given process are resolved, in
//! order of preference, from
//!
//! 1. the default processes (an explicit list or a registry namespace),
//! 2. their static default value, which turns them into a parameter,
//!
//! and otherwise completion fails, naming both the unresolved variable and the
//! variable whose process introduced it.
//!
//! Resolution is breadth first: variables are resolved in the order they
//! were first referenced, so identical input always yields the same equations
//! in the same order.
//!
//! # Example
//!
//! ```
//! use processkit::prelude::*;
//!
//! let x = Variable::new("x");
//! let y = Variable::new("y").with_default(0.0);
//! let z = Variable::new("z");
//!
//! let entries: Vec<Entry> = vec![
//!     ExpRelaxation::new(z.clone(), x.pow(2.0)).with_timescale(1.0).into(),
//!     TimeDerivative::new(x.clone(), 0.1 * y.clone()).into(),
//! ];
//!
//! let eqs = complete(&entries, &DefaultSource::None, &CompletionOptions::default()).unwrap();
//! assert_eq!(eqs.len(), 3);
//! assert_eq!(eqs[2].to_string(), "y ~ y_0");
//! ```

use std::borrow::Cow;
use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt;

pub mod entry;
pub mod options;

pub use entry::{expand, Entry};

use entry::check_subsystems;
pub use options::CompletionOptions;

use crate::error::Duplicate;
use crate::process::{ParameterProcess, Process, ProcessRef};
use crate::registry::{DefaultProcesses, Namespace, ProcessRegistry};
use crate::symbolic::{Equation, Expr, Variable};
use crate::ProcessError;

/// Where fallback processes come from
#[derive(Debug, Clone, Default)]
pub enum DefaultSource<'a> {
    /// No default processes
    #[default]
    None,
    /// An explicit list, keyed by the variable each process defines
    Processes(Vec<ProcessRef>),
    /// A namespace of a registry. Unknown namespaces have no defaults.
    Namespace(&'a ProcessRegistry, Namespace),
}

impl<'a> DefaultSource<'a> {
    pub fn processes(processes: Vec<ProcessRef>) -> Self {
        Self::Processes(processes)
    }

    pub fn namespace(registry: &'a ProcessRegistry, namespace: impl Into<Namespace>) -> Self {
        Self::Namespace(registry, namespace.into())
    }

    fn resolve(&self) -> Result<Cow<'a, DefaultProcesses>, ProcessError> {
        match self {
            Self::None => Ok(Cow::Owned(DefaultProcesses::new())),
            Self::Processes(list) => Ok(Cow::Owned(DefaultProcesses::from_processes(list)?)),
            Self::Namespace(registry, namespace) => {
                let registry: &'a ProcessRegistry = *registry;
                Ok(match registry.get(namespace) {
                    Some(pool) => Cow::Borrowed(pool),
                    None => Cow::Owned(DefaultProcesses::new()),
                })
            }
        }
    }
}

/// A variable that was turned into a parameter from its default value
#[derive(Debug, Clone, PartialEq)]
pub struct ImplicitParameter {
    pub variable: Variable,
    /// Variable whose process first referenced `variable`
    pub introduced_by: Variable,
}

impl fmt::Display for ImplicitParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Variable {v} was introduced in process of variable {by}. However, a process for {v} \
             was not provided, and there is no default process for it either. Since it has a \
             default value, it is made a parameter by adding a process: `ParameterProcess({v})`.",
            v = self.variable,
            by = self.introduced_by
        )
    }
}

/// Result of a successful completion
#[derive(Debug, Clone)]
pub struct Completion {
    /// Final equations in discovery order
    pub equations: Vec<Equation>,
    /// Variable defined by each equation, same order as `equations`
    pub variables: Vec<Variable>,
    /// Variables parameterized from their default values, in resolution order
    pub implicit: Vec<ImplicitParameter>,
}

/// Complete `entries` into a full equation system.
///
/// See the module documentation for the resolution order.
pub fn complete(
    entries: &[Entry],
    defaults: &DefaultSource<'_>,
    options: &CompletionOptions,
) -> Result<Vec<Equation>, ProcessError> {
    complete_with_report(entries, defaults, options).map(|c| c.equations)
}

/// Like [`complete`], but also reports implicit parameterizations
pub fn complete_with_report(
    entries: &[Entry],
    defaults: &DefaultSource<'_>,
    options: &CompletionOptions,
) -> Result<Completion, ProcessError> {
    check_subsystems(entries, &options.independent_variable)?;
    let processes = expand(entries);

    if options.validate_rhs_shape {
        check_rhs_shape(&processes)?;
    }

    let lhs_vars = processes
        .iter()
        .map(|p| p.lhs_variable())
        .collect::<Result<Vec<_>, _>>()?;

    let duplicates = find_duplicates(&lhs_vars, &processes);
    if !duplicates.is_empty() {
        return Err(ProcessError::DuplicateDefinition { duplicates });
    }

    let defaults = defaults.resolve()?;
    let mut closure = Closure::new(lhs_vars.clone(), &options.independent_variable);

    // First pass: given processes, in order
    for (process, variable) in processes.iter().zip(&lhs_vars) {
        let eq = process.equation()?;
        closure.enqueue_references(&eq.rhs, variable);
        closure.equations.push(eq);
    }

    // Closure: resolve referenced variables until none is left
    while let Some(variable) = closure.incomplete.pop_front() {
        if let Some(default) = defaults.get(&variable) {
            tracing::debug!(variable = %variable, "resolved from default process");
            let eq = default.equation()?;
            let defined = default.lhs_variable()?;
            let rhs = eq.rhs.clone();
            closure.define(defined.clone(), eq);
            closure.enqueue_references(&rhs, &defined);
            continue;
        }

        let introduced_by = closure.introducer(&variable);

        if let Some(value) = variable.default_value() {
            let implicit = ImplicitParameter {
                variable: variable.clone(),
                introduced_by,
            };
            if options.warn_on_implicit_parameter {
                tracing::warn!(
                    variable = %implicit.variable,
                    introduced_by = %implicit.introduced_by,
                    "{}",
                    implicit
                );
            }
            let process = ParameterProcess::with_value(variable.clone(), value);
            closure.define(variable, process.equation()?);
            closure.implicit.push(implicit);
            continue;
        }

        return Err(ProcessError::unresolvable(variable, introduced_by));
    }

    Ok(Completion {
        equations: closure.equations,
        variables: closure.lhs_vars,
        implicit: closure.implicit,
    })
}

fn check_rhs_shape(processes: &[ProcessRef]) -> Result<(), ProcessError> {
    for process in processes {
        if process.rhs()?.is_relation() {
            return Err(ProcessError::InvalidRhs {
                variable: process.lhs_variable()?.to_string(),
            });
        }
    }
    Ok(())
}

/// Every variable that appears more than once in `keys`, with all the
/// processes defining it. `keys[i]` is the variable of `processes[i]`.
pub(crate) fn find_duplicates(keys: &[Variable], processes: &[ProcessRef]) -> Vec<Duplicate> {
    let mut counts: HashMap<&Variable, usize> = HashMap::new();
    for key in keys {
        *counts.entry(key).or_default() += 1;
    }

    let mut reported = HashSet::new();
    let mut duplicates = Vec::new();
    for key in keys {
        if counts.get(key).copied().unwrap_or(0) < 2 || !reported.insert(key) {
            continue;
        }
        let entries = keys
            .iter()
            .zip(processes)
            .filter(|(k, _)| *k == key)
            .map(|(_, p)| p.describe())
            .collect();
        duplicates.push(Duplicate {
            variable: key.to_string(),
            entries,
        });
    }
    duplicates
}

/// Working state of one completion
struct Closure<'a> {
    independent: &'a Variable,
    /// Variables with an equation, in order of definition
    lhs_vars: Vec<Variable>,
    defined: HashSet<Variable>,
    /// Referenced but not yet defined, in order of first reference
    incomplete: VecDeque<Variable>,
    queued: HashSet<Variable>,
    introduced: HashMap<Variable, Variable>,
    equations: Vec<Equation>,
    implicit: Vec<ImplicitParameter>,
}

impl<'a> Closure<'a> {
    fn new(lhs_vars: Vec<Variable>, independent: &'a Variable) -> Self {
        let defined = lhs_vars.iter().cloned().collect();
        Self {
            independent,
            lhs_vars,
            defined,
            incomplete: VecDeque::new(),
            queued: HashSet::new(),
            introduced: HashMap::new(),
            equations: Vec::new(),
            implicit: Vec::new(),
        }
    }

    /// Queue every variable of `rhs` that is neither defined nor queued.
    ///
    /// A variable is queued at most once, which bounds the closure loop by the
    /// number of distinct reachable variables even when references are cyclic.
    fn enqueue_references(&mut self, rhs: &Expr, defined_by: &Variable) {
        for var in rhs.variables() {
            if var == *self.independent || self.defined.contains(&var) || self.queued.contains(&var)
            {
                continue;
            }
            self.introduced
                .entry(var.clone())
                .or_insert_with(|| defined_by.clone());
            self.queued.insert(var.clone());
            self.incomplete.push_back(var);
        }
    }

    fn define(&mut self, variable: Variable, equation: Equation) {
        self.defined.insert(variable.clone());
        self.lhs_vars.push(variable);
        self.equations.push(equation);
    }

    fn introducer(&self, variable: &Variable) -> Variable {
        self.introduced
            .get(variable)
            .cloned()
            .unwrap_or_else(|| variable.clone())
    }
}
