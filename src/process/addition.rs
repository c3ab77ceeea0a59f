use crate::process::{Process, ProcessRef, Timescale};
use crate::symbolic::{Expr, Variable};
use crate::ProcessError;

/// What an [`AdditionProcess`] adds to its base process
#[derive(Debug, Clone)]
pub enum Added {
    /// A single expression
    Expression(Expr),
    /// Processes for the same variable; their right-hand sides are added
    Processes(Vec<ProcessRef>),
}

impl From<Expr> for Added {
    fn from(value: Expr) -> Self {
        Self::Expression(value)
    }
}

impl From<Vec<ProcessRef>> for Added {
    fn from(value: Vec<ProcessRef>) -> Self {
        Self::Processes(value)
    }
}

impl From<ProcessRef> for Added {
    fn from(value: ProcessRef) -> Self {
        Self::Processes(vec![value])
    }
}

/// Adds terms to the right-hand side of an existing process.
///
/// The variable and timescale are those of the base process; the right-hand
/// side is `rhs(base) + rhs(added_1) + ...`.
#[derive(Debug, Clone)]
pub struct AdditionProcess {
    base: ProcessRef,
    added: Added,
}

impl AdditionProcess {
    /// Fails if an added process defines a different variable than `base`
    pub fn new(base: impl Process + 'static, added: impl Into<Added>) -> Result<Self, ProcessError> {
        Self::from_ref(base.into_ref(), added)
    }

    pub fn from_ref(base: ProcessRef, added: impl Into<Added>) -> Result<Self, ProcessError> {
        let added = added.into();
        if let Added::Processes(processes) = &added {
            let expected = base.lhs_variable()?;
            for p in processes {
                let found = p.lhs_variable()?;
                if found != expected {
                    return Err(ProcessError::incompatible_addition(expected, found));
                }
            }
        }
        Ok(Self { base, added })
    }
}

impl Process for AdditionProcess {
    fn lhs_variable(&self) -> Result<Variable, ProcessError> {
        self.base.lhs_variable()
    }

    fn rhs(&self) -> Result<Expr, ProcessError> {
        let base = self.base.rhs()?;
        match &self.added {
            Added::Expression(e) => Ok(base + e.clone()),
            Added::Processes(processes) => processes
                .iter()
                .try_fold(base, |acc, p| -> Result<Expr, ProcessError> {
                    Ok(acc + p.rhs()?)
                }),
        }
    }

    fn timescale(&self) -> Timescale {
        self.base.timescale()
    }

    fn lhs(&self) -> Result<Expr, ProcessError> {
        self.base.lhs()
    }
}
