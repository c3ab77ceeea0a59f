//! Default processes
//!
//! A [`ProcessRegistry`] holds pools of fallback processes, one pool per
//! [`Namespace`]. The completion engine consults a pool when a variable is
//! referenced but no process was given for it.
//!
//! The registry is an ordinary value owned by the application. It is not
//! synchronized: share it behind a `Mutex` or `RwLock` when registering from
//! several threads.
//!
//! # Example
//!
//! ```
//! use processkit::prelude::*;
//!
//! let mut registry = ProcessRegistry::new();
//! let y = Variable::new("y");
//! registry
//!     .register("ocean", ExpRelaxation::new(y.clone(), 1.0).into_ref(), true)
//!     .unwrap();
//!
//! assert!(registry.lookup("ocean").contains(&y));
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::completion::find_duplicates;
use crate::process::ProcessRef;
use crate::symbolic::Variable;
use crate::ProcessError;

/// Opaque key identifying a pool of default processes
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Namespace(String);

impl Namespace {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Namespace named after a type, for libraries that key their defaults
    /// by a marker type
    pub fn of<T: ?Sized>() -> Self {
        Self(std::any::type_name::<T>().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Namespace {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Namespace {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&Namespace> for Namespace {
    fn from(value: &Namespace) -> Self {
        value.clone()
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Mapping from variable to its default process
#[derive(Debug, Clone, Default)]
pub struct DefaultProcesses {
    processes: HashMap<Variable, ProcessRef>,
}

impl DefaultProcesses {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key each process by the variable it defines.
    ///
    /// Fails if two processes define the same variable.
    pub fn from_processes(processes: &[ProcessRef]) -> Result<Self, ProcessError> {
        let keys = processes
            .iter()
            .map(|p| p.lhs_variable())
            .collect::<Result<Vec<_>, _>>()?;

        let duplicates = find_duplicates(&keys, processes);
        if !duplicates.is_empty() {
            return Err(ProcessError::DuplicateDefinition { duplicates });
        }

        Ok(Self {
            processes: keys.into_iter().zip(processes.iter().cloned()).collect(),
        })
    }

    pub fn get(&self, variable: &Variable) -> Option<&ProcessRef> {
        self.processes.get(variable)
    }

    pub fn contains(&self, variable: &Variable) -> bool {
        self.processes.contains_key(variable)
    }

    pub fn len(&self) -> usize {
        self.processes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    /// Variables with a default process, sorted by name
    pub fn variables(&self) -> Vec<&Variable> {
        let mut vars: Vec<&Variable> = self.processes.keys().collect();
        vars.sort_by(|a, b| a.name().cmp(b.name()));
        vars
    }

    /// Store a process under its variable, returning the one it replaces
    fn insert(&mut self, variable: Variable, process: ProcessRef) -> Option<ProcessRef> {
        self.processes.insert(variable, process)
    }
}

/// Default processes for every namespace
#[derive(Debug, Clone, Default)]
pub struct ProcessRegistry {
    namespaces: HashMap<Namespace, DefaultProcesses>,
}

impl ProcessRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `process` as the default for the variable it defines.
    ///
    /// An existing default for that variable is replaced and returned; with
    /// `warn` set the replacement is also logged.
    pub fn register(
        &mut self,
        namespace: impl Into<Namespace>,
        process: ProcessRef,
        warn: bool,
    ) -> Result<Option<ProcessRef>, ProcessError> {
        let namespace = namespace.into();
        let key = process.lhs_variable()?;
        let pool = self.namespaces.entry(namespace.clone()).or_default();

        if warn && pool.contains(&key) {
            tracing::warn!(
                variable = %key,
                namespace = %namespace,
                "Overwriting the default process of variable {} in namespace {}",
                key,
                namespace
            );
        }

        Ok(pool.insert(key, process))
    }

    /// The pool for `namespace`, created empty on first access
    pub fn lookup(&mut self, namespace: impl Into<Namespace>) -> &DefaultProcesses {
        self.namespaces.entry(namespace.into()).or_default()
    }

    /// The pool for `namespace`, if anything was ever looked up or registered there
    pub fn get(&self, namespace: &Namespace) -> Option<&DefaultProcesses> {
        self.namespaces.get(namespace)
    }

    /// Known namespaces, sorted
    pub fn namespaces(&self) -> Vec<&Namespace> {
        let mut names: Vec<&Namespace> = self.namespaces.keys().collect();
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::{Process, TimeDerivative};
    use crate::symbolic::Equation;

    struct Marker;

    #[test]
    fn test_lookup_creates_empty_pool() {
        let mut registry = ProcessRegistry::new();
        assert!(registry.get(&Namespace::new("ns")).is_none());
        assert!(registry.lookup("ns").is_empty());
        assert!(registry.get(&Namespace::new("ns")).is_some());
    }

    #[test]
    fn test_register_and_overwrite() {
        let mut registry = ProcessRegistry::new();
        let y = Variable::new("y");

        let first = Equation::new(y.clone(), 1.0).into_ref();
        assert!(registry.register("ns", first, true).unwrap().is_none());

        let second = TimeDerivative::new(y.clone(), 2.0).into_ref();
        let replaced = registry.register("ns", second, true).unwrap();
        assert_eq!(replaced.unwrap().rhs().unwrap().to_string(), "1");

        let pool = registry.lookup("ns");
        assert_eq!(pool.len(), 1);
        assert_eq!(pool.get(&y).unwrap().kind(), "TimeDerivative");
    }

    #[test]
    fn test_namespaces_are_independent() {
        let mut registry = ProcessRegistry::new();
        let y = Variable::new("y");
        registry
            .register(Namespace::of::<Marker>(), Equation::new(y.clone(), 1.0).into_ref(), false)
            .unwrap();
        assert!(registry.lookup(Namespace::of::<Marker>()).contains(&y));
        assert!(!registry.lookup("other").contains(&y));
        assert_eq!(registry.namespaces().len(), 2);
    }

    #[test]
    fn test_register_rejects_malformed_equation() {
        let mut registry = ProcessRegistry::new();
        let x = Variable::new("x");
        let bad = Equation::new(x.clone() + x, 1.0).into_ref();
        assert!(matches!(
            registry.register("ns", bad, true),
            Err(ProcessError::MalformedLhs { .. })
        ));
    }

    #[test]
    fn test_from_processes_rejects_duplicates() {
        let y = Variable::new("y");
        let procs = vec![
            Equation::new(y.clone(), 1.0).into_ref(),
            TimeDerivative::new(y.clone(), 2.0).into_ref(),
        ];
        match DefaultProcesses::from_processes(&procs) {
            Err(ProcessError::DuplicateDefinition { duplicates }) => {
                assert_eq!(duplicates.len(), 1);
                assert_eq!(duplicates[0].variable, "y");
                assert_eq!(duplicates[0].entries.len(), 2);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
