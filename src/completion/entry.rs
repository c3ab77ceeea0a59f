use std::sync::Arc;

use crate::model::Model;
use crate::process::{
    AdditionProcess, ExpRelaxation, ParameterProcess, ProcessRef, TimeDerivative,
};
use crate::symbolic::{Equation, Variable};
use crate::ProcessError;

/// One element of the input list
#[derive(Debug, Clone)]
pub enum Entry {
    /// A process or a plain equation
    Process(ProcessRef),
    /// A nested list, spliced in place
    List(Vec<Entry>),
    /// A previously assembled model, contributing its equations
    Subsystem(Model),
}

impl From<ProcessRef> for Entry {
    fn from(value: ProcessRef) -> Self {
        Self::Process(value)
    }
}

impl From<Vec<Entry>> for Entry {
    fn from(value: Vec<Entry>) -> Self {
        Self::List(value)
    }
}

impl From<Vec<ProcessRef>> for Entry {
    fn from(value: Vec<ProcessRef>) -> Self {
        Self::List(value.into_iter().map(Entry::Process).collect())
    }
}

impl From<Model> for Entry {
    fn from(value: Model) -> Self {
        Self::Subsystem(value)
    }
}

macro_rules! impl_entry_from {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Entry {
                fn from(value: $ty) -> Self {
                    Self::Process(Arc::new(value))
                }
            }
        )*
    };
}

impl_entry_from!(
    Equation,
    ParameterProcess,
    TimeDerivative,
    ExpRelaxation,
    AdditionProcess
);

/// Flatten entries into a list of processes.
///
/// Nested lists and subsystems are spliced in place, keeping the relative
/// order of everything they contain.
pub fn expand(entries: &[Entry]) -> Vec<ProcessRef> {
    let mut out = Vec::with_capacity(entries.len());
    expand_into(entries, &mut out);
    out
}

fn expand_into(entries: &[Entry], out: &mut Vec<ProcessRef>) {
    for entry in entries {
        match entry {
            Entry::Process(p) => out.push(p.clone()),
            Entry::List(list) => expand_into(list, out),
            Entry::Subsystem(model) => out.extend(
                model
                    .equations()
                    .iter()
                    .map(|eq| Arc::new(eq.clone()) as ProcessRef),
            ),
        }
    }
}

/// Fails if any subsystem, at any nesting depth, was assembled against an
/// independent variable other than `independent`
pub(crate) fn check_subsystems(
    entries: &[Entry],
    independent: &Variable,
) -> Result<(), ProcessError> {
    for entry in entries {
        match entry {
            Entry::Process(_) => {}
            Entry::List(list) => check_subsystems(list, independent)?,
            Entry::Subsystem(model) if model.independent_variable() != independent => {
                return Err(ProcessError::IndependentVariableMismatch {
                    model: model.name().to_string(),
                    expected: independent.to_string(),
                    found: model.independent_variable().to_string(),
                });
            }
            Entry::Subsystem(_) => {}
        }
    }
    Ok(())
}
