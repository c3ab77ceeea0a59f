//! Model assembly
//!
//! Wraps a completed equation list into a [`Model`]: a named equation system
//! with an independent variable. The model only records structure (unknowns,
//! states, parameters); it does not simplify or solve anything.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::completion::{complete_with_report, CompletionOptions, DefaultSource, Entry};
use crate::process::parse_lhs_variable;
use crate::symbolic::{Equation, Expr, Parameter, Variable};
use crate::ProcessError;

/// The kind of equation system to build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelType {
    /// Ordinary differential equations
    #[default]
    Ode,
    /// Stochastic differential equations
    Sde,
    /// Nonlinear algebraic system
    Nonlinear,
}

impl ModelType {
    /// Model name used when none is given
    pub fn default_name(&self) -> &'static str {
        match self {
            Self::Ode => "ode_system",
            Self::Sde => "sde_system",
            Self::Nonlinear => "nonlinear_system",
        }
    }
}

impl std::fmt::Display for ModelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ode => write!(f, "ode"),
            Self::Sde => write!(f, "sde"),
            Self::Nonlinear => write!(f, "nonlinear"),
        }
    }
}

/// Settings for [`assemble_model`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModelOptions {
    pub model_type: ModelType,
    /// Defaults to [`ModelType::default_name`]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub independent_variable: Variable,
}

impl Default for ModelOptions {
    fn default() -> Self {
        Self {
            model_type: ModelType::default(),
            name: None,
            independent_variable: Variable::time(),
        }
    }
}

impl ModelOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn model_type(mut self, model_type: ModelType) -> Self {
        self.model_type = model_type;
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn independent_variable(mut self, variable: Variable) -> Self {
        self.independent_variable = variable;
        self
    }

    fn resolved_name(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| self.model_type.default_name().to_string())
    }
}

/// An assembled equation system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Model {
    name: String,
    #[serde(rename = "type")]
    model_type: ModelType,
    independent_variable: Variable,
    equations: Vec<Equation>,
    unknowns: Vec<Variable>,
}

impl Model {
    /// Build a model from equations whose left-hand sides each define one variable
    pub fn from_equations(
        equations: Vec<Equation>,
        options: &ModelOptions,
    ) -> Result<Self, ProcessError> {
        let unknowns = equations
            .iter()
            .map(parse_lhs_variable)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(equations, unknowns, options))
    }

    fn new(equations: Vec<Equation>, unknowns: Vec<Variable>, options: &ModelOptions) -> Self {
        Self {
            name: options.resolved_name(),
            model_type: options.model_type,
            independent_variable: options.independent_variable.clone(),
            equations,
            unknowns,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn model_type(&self) -> ModelType {
        self.model_type
    }

    pub fn independent_variable(&self) -> &Variable {
        &self.independent_variable
    }

    pub fn equations(&self) -> &[Equation] {
        &self.equations
    }

    /// Variable defined by each equation, in equation order
    pub fn unknowns(&self) -> &[Variable] {
        &self.unknowns
    }

    /// Unknowns whose equation has a time derivative on the left-hand side
    pub fn states(&self) -> Vec<&Variable> {
        self.equations
            .iter()
            .zip(&self.unknowns)
            .filter(|(eq, _)| !matches!(eq.lhs, Expr::Var(_)))
            .map(|(_, var)| var)
            .collect()
    }

    /// Every parameter in the model, in order of first appearance
    pub fn parameters(&self) -> Vec<Parameter> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for eq in &self.equations {
            for p in eq.lhs.parameters().into_iter().chain(eq.rhs.parameters()) {
                if seen.insert(p.clone()) {
                    out.push(p);
                }
            }
        }
        out
    }

    pub fn to_json(&self) -> Result<String, ProcessError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, ProcessError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Complete `entries` and assemble the result into a [`Model`].
///
/// The independent variable of `options` takes precedence over the one in
/// `completion`.
pub fn assemble_model(
    entries: &[Entry],
    defaults: &DefaultSource<'_>,
    completion: &CompletionOptions,
    options: &ModelOptions,
) -> Result<Model, ProcessError> {
    let completion = completion
        .clone()
        .independent_variable(options.independent_variable.clone());
    let report = complete_with_report(entries, defaults, &completion)?;
    let model = Model::new(report.equations, report.variables, options);
    tracing::debug!(
        name = %model.name,
        equations = model.equations.len(),
        "assembled {} model",
        model.model_type
    );
    Ok(model)
}
