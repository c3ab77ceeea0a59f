use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Name of the designated independent variable
pub const TIME: &str = "t";

/// An unknown of the equation system.
///
/// Variables are identified by their name alone: two variables with the same
/// name compare equal regardless of their default values. The optional default
/// is used when no process is given for the variable, in which case it is
/// turned into a parameter.
#[derive(Clone, Serialize, Deserialize)]
pub struct Variable {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    default: Option<f64>,
}

impl Variable {
    /// Create a variable without a default value
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: None,
        }
    }

    /// The designated independent variable `t`
    pub fn time() -> Self {
        Self::new(TIME)
    }

    /// Attach a static default value
    pub fn with_default(mut self, value: f64) -> Self {
        self.default = Some(value);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn default_value(&self) -> Option<f64> {
        self.default
    }
}

impl PartialEq for Variable {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Variable {}

impl Hash for Variable {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl fmt::Debug for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.default {
            Some(value) => write!(f, "{}(t) [default {}]", self.name, value),
            None => write!(f, "{}(t)", self.name),
        }
    }
}

/// A named constant of the equation system.
#[derive(Clone, Serialize, Deserialize)]
pub struct Parameter {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    default: Option<f64>,
}

impl Parameter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: None,
        }
    }

    pub fn with_default(mut self, value: f64) -> Self {
        self.default = Some(value);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn default_value(&self) -> Option<f64> {
        self.default
    }
}

impl PartialEq for Parameter {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Parameter {}

impl Hash for Parameter {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl fmt::Debug for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.default {
            Some(value) => write!(f, "{} [default {}]", self.name, value),
            None => write!(f, "{}", self.name),
        }
    }
}

/// Static default value of a variable, if it has one
pub fn default_value(variable: &Variable) -> Option<f64> {
    variable.default_value()
}

/// Declare several variables at once.
///
/// ```
/// use processkit::variables;
///
/// variables!(x = 0.5, y, z = 1.0);
/// assert_eq!(x.default_value(), Some(0.5));
/// assert_eq!(y.default_value(), None);
/// assert_eq!(z.name(), "z");
/// ```
#[macro_export]
macro_rules! variables {
    ($($name:ident $(= $default:expr)?),* $(,)?) => {
        $(
            #[allow(unused_mut)]
            let mut $name = $crate::symbolic::Variable::new(stringify!($name));
            $(
                $name = $name.with_default($default);
            )?
        )*
    };
}
