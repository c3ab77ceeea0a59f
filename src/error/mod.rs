//! Error types for process construction, completion and model assembly

use std::fmt;
use thiserror::Error;

/// A variable defined by more than one entry
#[derive(Debug, Clone, PartialEq)]
pub struct Duplicate {
    pub variable: String,
    /// Textual rendering of every entry defining `variable`
    pub entries: Vec<String>,
}

impl fmt::Display for Duplicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' is defined by:", self.variable)?;
        for entry in &self.entries {
            write!(f, "\n    {}", entry)?;
        }
        Ok(())
    }
}

fn list_duplicates(duplicates: &[Duplicate]) -> String {
    let names: Vec<&str> = duplicates.iter().map(|d| d.variable.as_str()).collect();
    let mut msg = format!(
        "The following variables have more than one process assigned to them: [{}].",
        names.join(", ")
    );
    for dup in duplicates {
        msg.push_str(&format!("\n  {}", dup));
    }
    msg
}

/// Errors that can occur when building processes or completing an equation system
#[derive(Debug, Error)]
pub enum ProcessError {
    // ─────────────────────────────────────────────────────────────────────────
    // Process Definition Errors
    // ─────────────────────────────────────────────────────────────────────────
    /// A process type does not provide a required capability
    #[error("Process type '{kind}' does not implement '{capability}' and has no field to fall back on")]
    Configuration {
        kind: String,
        capability: &'static str,
    },

    /// The left-hand side of a plain equation is not one of the accepted shapes
    #[error(
        "In given equation '{equation}', the left-hand side does not represent a single variable, \
         the derivative of a variable, or the derivative of a variable multiplied by a parameter"
    )]
    MalformedLhs { equation: String },

    /// A parameter process was requested for a variable without any value
    #[error("Variable '{variable}' has no default value and no value was given for its parameter process")]
    MissingValue { variable: String },

    /// Processes combined in an addition define different variables
    #[error(
        "Added processes do not have the same left-hand variable: expected '{expected}', found '{found}'"
    )]
    IncompatibleAddition { expected: String, found: String },

    // ─────────────────────────────────────────────────────────────────────────
    // Completion Errors
    // ─────────────────────────────────────────────────────────────────────────
    /// The right-hand side of a process is an equation instead of an expression
    #[error(
        "Process assigned to variable '{variable}' is ill defined: its right-hand side is an \
         equation, not an expression"
    )]
    InvalidRhs { variable: String },

    /// The same variable is defined more than once
    #[error("{}", list_duplicates(.duplicates))]
    DuplicateDefinition { duplicates: Vec<Duplicate> },

    /// A referenced variable cannot be resolved by any means
    #[error(
        "Variable '{variable}' was introduced in process of variable '{introduced_by}'. However, \
         a process for '{variable}' was not provided, there is no default process for it, and it \
         has no default value"
    )]
    Unresolvable {
        variable: String,
        introduced_by: String,
    },

    /// A subsystem was assembled against a different independent variable
    #[error(
        "Subsystem '{model}' uses independent variable '{found}', but the system it is composed \
         into uses '{expected}'"
    )]
    IndependentVariableMismatch {
        model: String,
        expected: String,
        found: String,
    },

    // ─────────────────────────────────────────────────────────────────────────
    // Export Errors
    // ─────────────────────────────────────────────────────────────────────────
    /// Failed to serialize a model
    #[error("Failed to serialize model: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ProcessError {
    /// Create a configuration error
    pub fn configuration(kind: impl Into<String>, capability: &'static str) -> Self {
        Self::Configuration {
            kind: kind.into(),
            capability,
        }
    }

    /// Create an unresolvable variable error
    pub fn unresolvable(variable: impl fmt::Display, introduced_by: impl fmt::Display) -> Self {
        Self::Unresolvable {
            variable: variable.to_string(),
            introduced_by: introduced_by.to_string(),
        }
    }

    /// Create an incompatible addition error
    pub fn incompatible_addition(expected: impl fmt::Display, found: impl fmt::Display) -> Self {
        Self::IncompatibleAddition {
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_message_lists_everything() {
        let err = ProcessError::DuplicateDefinition {
            duplicates: vec![
                Duplicate {
                    variable: "w".into(),
                    entries: vec!["w ~ 1".into(), "w ~ 2".into()],
                },
                Duplicate {
                    variable: "v".into(),
                    entries: vec!["v ~ w".into(), "D(v) ~ 0".into()],
                },
            ],
        };
        let msg = err.to_string();
        assert!(msg.contains("[w, v]"));
        for entry in ["w ~ 1", "w ~ 2", "v ~ w", "D(v) ~ 0"] {
            assert!(msg.contains(entry), "missing '{}' in {}", entry, msg);
        }
    }

    #[test]
    fn test_independent_variable_mismatch_message() {
        let err = ProcessError::IndependentVariableMismatch {
            model: "inner".into(),
            expected: "t".into(),
            found: "s".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("'inner'"));
        assert!(msg.contains("'s'"));
        assert!(msg.contains("uses 't'"));
    }

    #[test]
    fn test_unresolvable_message() {
        let msg = ProcessError::unresolvable("x", "z").to_string();
        assert!(msg.contains("Variable 'x'"));
        assert!(msg.contains("process of variable 'z'"));
        assert!(msg.contains("no default value"));
    }
}
