//! Integration tests for process types defined outside the crate
//!
//! Downstream libraries implement [`Process`] for their own types and register
//! them as defaults; these tests go through the public API only.

use std::sync::{Arc, Mutex};
use std::thread;

use processkit::prelude::*;
use processkit::{Added, DefaultProcesses};

/// Linear decay `τ*D(x) ~ -rate*x`
#[derive(Debug)]
struct Decay {
    variable: Variable,
    rate: f64,
    timescale: f64,
}

impl Process for Decay {
    fn variable(&self) -> Option<&Variable> {
        Some(&self.variable)
    }

    fn rhs(&self) -> Result<Expr, ProcessError> {
        Ok(-self.rate * self.variable.clone())
    }

    fn timescale(&self) -> Timescale {
        self.timescale.into()
    }
}

/// Forgets to provide its right-hand side
#[derive(Debug)]
struct Incomplete {
    variable: Variable,
}

impl Process for Incomplete {
    fn variable(&self) -> Option<&Variable> {
        Some(&self.variable)
    }
}

struct Ocean;

// ═══════════════════════════════════════════════════════════════════════════════
// Custom Processes
// ═══════════════════════════════════════════════════════════════════════════════

mod custom {
    use super::*;

    #[test]
    fn test_custom_process_equation() {
        let decay = Decay {
            variable: Variable::new("c"),
            rate: 0.3,
            timescale: 2.0,
        };
        assert_eq!(decay.kind(), "Decay");
        assert_eq!(decay.equation().unwrap().to_string(), "τ_c*D(c) ~ -0.3*c");
        assert_eq!(decay.describe(), "τ_c*D(c) ~ -0.3*c [Decay]");
    }

    #[test]
    fn test_zero_timescale_has_no_derivative() {
        let decay = Decay {
            variable: Variable::new("c"),
            rate: 1.0,
            timescale: 0.0,
        };
        assert_eq!(decay.lhs().unwrap(), Expr::Var(Variable::new("c")));
    }

    #[test]
    fn test_missing_rhs_is_reported() {
        let entries: Vec<Entry> = vec![Entry::Process(
            Incomplete {
                variable: Variable::new("q"),
            }
            .into_ref(),
        )];
        let err = complete(&entries, &DefaultSource::None, &CompletionOptions::default())
            .unwrap_err();
        match err {
            ProcessError::Configuration { kind, capability } => {
                assert_eq!(kind, "Incomplete");
                assert_eq!(capability, "rhs");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_custom_process_as_default() {
        let c = Variable::new("c");
        let entries: Vec<Entry> = vec![Equation::new(Variable::new("flux"), c.clone() * 2.0).into()];
        let defaults = DefaultSource::processes(vec![Decay {
            variable: c,
            rate: 0.1,
            timescale: 1.0,
        }
        .into_ref()]);
        let eqs = complete(&entries, &defaults, &CompletionOptions::default()).unwrap();
        assert_eq!(eqs.len(), 2);
        assert_eq!(eqs[1].to_string(), "τ_c*D(c) ~ -0.1*c");
    }

    #[test]
    fn test_addition_of_processes() {
        let c = Variable::new("c");
        let base = Decay {
            variable: c.clone(),
            rate: 0.5,
            timescale: 1.0,
        };
        let source = Equation::new(c.clone(), Variable::new("s").with_default(1.0));
        let added = Added::Processes(vec![source.into_ref()]);
        let sum = AdditionProcess::new(base, added).unwrap();
        assert_eq!(sum.equation().unwrap().to_string(), "τ_c*D(c) ~ -0.5*c + s");

        let wrong = Added::Processes(vec![Equation::new(Variable::new("other"), 1.0).into_ref()]);
        let base = Decay {
            variable: c,
            rate: 0.5,
            timescale: 1.0,
        };
        assert!(matches!(
            AdditionProcess::new(base, wrong),
            Err(ProcessError::IncompatibleAddition { .. })
        ));
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Registry
// ═══════════════════════════════════════════════════════════════════════════════

mod registry {
    use super::*;

    #[test]
    fn test_marker_type_namespace() {
        let mut registry = ProcessRegistry::new();
        let ns = Namespace::of::<Ocean>();
        let c = Variable::new("c");
        registry
            .register(
                &ns,
                Decay {
                    variable: c.clone(),
                    rate: 1.0,
                    timescale: 1.0,
                }
                .into_ref(),
                false,
            )
            .unwrap();
        assert!(ns.as_str().ends_with("Ocean"));
        assert!(registry.lookup(&ns).contains(&c));
        assert!(registry.lookup("elsewhere").is_empty());
        assert_eq!(registry.namespaces().len(), 2);
    }

    #[test]
    fn test_overwrite_returns_previous() {
        let mut registry = ProcessRegistry::new();
        let y = Variable::new("y");
        let first = registry
            .register("ns", Equation::new(y.clone(), 1.0).into_ref(), true)
            .unwrap();
        assert!(first.is_none());

        let previous = registry
            .register("ns", Equation::new(y.clone(), 2.0).into_ref(), true)
            .unwrap()
            .unwrap();
        assert_eq!(previous.equation().unwrap().to_string(), "y ~ 1");

        let pool: &DefaultProcesses = registry.lookup("ns");
        assert_eq!(pool.len(), 1);
        assert_eq!(pool.get(&y).unwrap().equation().unwrap().to_string(), "y ~ 2");
    }

    #[test]
    fn test_shared_registry() {
        let registry = Arc::new(Mutex::new(ProcessRegistry::new()));
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || {
                    let v = Variable::new(format!("v{}", i));
                    registry
                        .lock()
                        .unwrap()
                        .register("shared", Equation::new(v, i as f64).into_ref(), false)
                        .unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let mut registry = registry.lock().unwrap();
        assert_eq!(registry.lookup("shared").len(), 8);

        let entries: Vec<Entry> = vec![Equation::new(
            Variable::new("total"),
            Variable::new("v0") + Variable::new("v7"),
        )
        .into()];
        let eqs = complete(
            &entries,
            &DefaultSource::namespace(&registry, "shared"),
            &CompletionOptions::default(),
        )
        .unwrap();
        assert_eq!(eqs.len(), 3);
    }
}
