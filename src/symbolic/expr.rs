use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use super::equation::Equation;
use super::variable::{Parameter, Variable};

/// A symbolic expression.
///
/// Expressions are never simplified: they are kept exactly as they were built,
/// so that equations print the way the user wrote them.
///
/// Building, dropping and variable or parameter extraction work at any depth.
/// `Clone`, `PartialEq`, `Display` and serde recurse once per nesting level,
/// so an expression nested hundreds of thousands of levels deep (a sum built
/// term by term, for instance) can exhaust the thread stack in those.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    Num(f64),
    Var(Variable),
    Par(Parameter),
    /// Time derivative of the inner expression
    Derivative(Box<Expr>),
    Neg(Box<Expr>),
    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
    Pow(Box<Expr>, Box<Expr>),
    /// Named function application, e.g. `exp(x)`
    Call(String, Vec<Expr>),
    /// An equation used in place of an expression
    Relation(Box<Equation>),
}

/// Time derivative `D(expr)`
pub fn derivative(expr: impl Into<Expr>) -> Expr {
    Expr::Derivative(Box::new(expr.into()))
}

/// The independent variable as an expression
pub fn time() -> Expr {
    Expr::Var(Variable::time())
}

impl Expr {
    pub fn num(value: f64) -> Self {
        Expr::Num(value)
    }

    pub fn pow(self, exponent: impl Into<Expr>) -> Expr {
        Expr::Pow(Box::new(self), Box::new(exponent.into()))
    }

    pub fn call(name: impl Into<String>, args: Vec<Expr>) -> Expr {
        Expr::Call(name.into(), args)
    }

    pub fn exp(self) -> Expr {
        Expr::call("exp", vec![self])
    }

    pub fn derivative(self) -> Expr {
        derivative(self)
    }

    /// Returns the variable if the expression is a bare variable
    pub fn as_variable(&self) -> Option<&Variable> {
        match self {
            Expr::Var(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the parameter if the expression is a bare parameter
    pub fn as_parameter(&self) -> Option<&Parameter> {
        match self {
            Expr::Par(p) => Some(p),
            _ => None,
        }
    }

    pub fn is_relation(&self) -> bool {
        matches!(self, Expr::Relation(_))
    }

    /// Free variables in order of first appearance.
    ///
    /// Parameters are not variables and are not returned. Variables inside
    /// derivatives, function calls and relations are.
    pub fn variables(&self) -> Vec<Variable> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        self.visit(&mut |e| {
            if let Expr::Var(v) = e {
                if seen.insert(v.clone()) {
                    out.push(v.clone());
                }
            }
        });
        out
    }

    /// Parameters in order of first appearance
    pub fn parameters(&self) -> Vec<Parameter> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        self.visit(&mut |e| {
            if let Expr::Par(p) = e {
                if seen.insert(p.clone()) {
                    out.push(p.clone());
                }
            }
        });
        out
    }

    pub fn contains_variable(&self, variable: &Variable) -> bool {
        let mut found = false;
        self.visit(&mut |e| {
            if let Expr::Var(v) = e {
                found |= v == variable;
            }
        });
        found
    }

    /// Pre-order traversal on an explicit stack
    fn visit(&self, f: &mut impl FnMut(&Expr)) {
        let mut stack: Vec<&Expr> = vec![self];
        while let Some(expr) = stack.pop() {
            f(expr);
            match expr {
                Expr::Num(_) | Expr::Var(_) | Expr::Par(_) => {}
                Expr::Derivative(inner) | Expr::Neg(inner) => stack.push(inner),
                Expr::Add(a, b)
                | Expr::Sub(a, b)
                | Expr::Mul(a, b)
                | Expr::Div(a, b)
                | Expr::Pow(a, b) => {
                    stack.push(b);
                    stack.push(a);
                }
                Expr::Call(_, args) => stack.extend(args.iter().rev()),
                Expr::Relation(eq) => {
                    stack.push(&eq.rhs);
                    stack.push(&eq.lhs);
                }
            }
        }
    }

    fn precedence(&self) -> u8 {
        match self {
            Expr::Relation(_) => 0,
            Expr::Add(..) | Expr::Sub(..) => 1,
            Expr::Mul(..) | Expr::Div(..) => 2,
            Expr::Neg(_) => 3,
            Expr::Num(n) if n.is_sign_negative() => 3,
            Expr::Pow(..) => 4,
            _ => 5,
        }
    }

    fn fmt_operand(&self, f: &mut fmt::Formatter<'_>, min: u8) -> fmt::Result {
        if self.precedence() < min {
            write!(f, "({})", self)
        } else {
            write!(f, "{}", self)
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Num(n) => write!(f, "{}", n),
            Expr::Var(v) => write!(f, "{}", v),
            Expr::Par(p) => write!(f, "{}", p),
            Expr::Derivative(inner) => write!(f, "D({})", inner),
            Expr::Neg(inner) => {
                write!(f, "-")?;
                inner.fmt_operand(f, 3)
            }
            Expr::Add(a, b) => {
                a.fmt_operand(f, 1)?;
                write!(f, " + ")?;
                b.fmt_operand(f, 1)
            }
            Expr::Sub(a, b) => {
                a.fmt_operand(f, 1)?;
                write!(f, " - ")?;
                b.fmt_operand(f, 2)
            }
            Expr::Mul(a, b) => {
                a.fmt_operand(f, 2)?;
                write!(f, "*")?;
                b.fmt_operand(f, 2)
            }
            Expr::Div(a, b) => {
                a.fmt_operand(f, 2)?;
                write!(f, " / ")?;
                b.fmt_operand(f, 3)
            }
            Expr::Pow(base, exponent) => {
                base.fmt_operand(f, 5)?;
                write!(f, "^")?;
                exponent.fmt_operand(f, 5)
            }
            Expr::Call(name, args) => {
                write!(f, "{}(", name)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
            Expr::Relation(eq) => write!(f, "{}", eq),
        }
    }
}

impl Drop for Expr {
    fn drop(&mut self) {
        let mut stack = Vec::new();
        self.detach_children(&mut stack);
        while let Some(mut child) = stack.pop() {
            child.detach_children(&mut stack);
        }
    }
}

impl Expr {
    /// Move every non-leaf child into `out`, leaving leaves behind
    fn detach_children(&mut self, out: &mut Vec<Expr>) {
        fn detach(slot: &mut Expr, out: &mut Vec<Expr>) {
            if !matches!(slot, Expr::Num(_) | Expr::Var(_) | Expr::Par(_)) {
                out.push(std::mem::replace(slot, Expr::Num(0.0)));
            }
        }
        match self {
            Expr::Num(_) | Expr::Var(_) | Expr::Par(_) => {}
            Expr::Derivative(inner) | Expr::Neg(inner) => detach(inner, out),
            Expr::Add(a, b)
            | Expr::Sub(a, b)
            | Expr::Mul(a, b)
            | Expr::Div(a, b)
            | Expr::Pow(a, b) => {
                detach(a, out);
                detach(b, out);
            }
            Expr::Call(_, args) => out.append(args),
            Expr::Relation(eq) => {
                detach(&mut eq.lhs, out);
                detach(&mut eq.rhs, out);
            }
        }
    }
}

impl From<f64> for Expr {
    fn from(value: f64) -> Self {
        Expr::Num(value)
    }
}

impl From<Variable> for Expr {
    fn from(value: Variable) -> Self {
        Expr::Var(value)
    }
}

impl From<&Variable> for Expr {
    fn from(value: &Variable) -> Self {
        Expr::Var(value.clone())
    }
}

impl From<Parameter> for Expr {
    fn from(value: Parameter) -> Self {
        Expr::Par(value)
    }
}

impl From<&Parameter> for Expr {
    fn from(value: &Parameter) -> Self {
        Expr::Par(value.clone())
    }
}

impl From<Equation> for Expr {
    fn from(value: Equation) -> Self {
        Expr::Relation(Box::new(value))
    }
}

macro_rules! impl_arithmetic {
    ($($ty:ty),*) => {
        $(
            impl<R: Into<Expr>> Add<R> for $ty {
                type Output = Expr;
                fn add(self, rhs: R) -> Expr {
                    Expr::Add(Box::new(self.into()), Box::new(rhs.into()))
                }
            }

            impl<R: Into<Expr>> Sub<R> for $ty {
                type Output = Expr;
                fn sub(self, rhs: R) -> Expr {
                    Expr::Sub(Box::new(self.into()), Box::new(rhs.into()))
                }
            }

            impl<R: Into<Expr>> Mul<R> for $ty {
                type Output = Expr;
                fn mul(self, rhs: R) -> Expr {
                    Expr::Mul(Box::new(self.into()), Box::new(rhs.into()))
                }
            }

            impl<R: Into<Expr>> Div<R> for $ty {
                type Output = Expr;
                fn div(self, rhs: R) -> Expr {
                    Expr::Div(Box::new(self.into()), Box::new(rhs.into()))
                }
            }

            impl Neg for $ty {
                type Output = Expr;
                fn neg(self) -> Expr {
                    Expr::Neg(Box::new(self.into()))
                }
            }

            impl Add<$ty> for f64 {
                type Output = Expr;
                fn add(self, rhs: $ty) -> Expr {
                    Expr::Add(Box::new(Expr::Num(self)), Box::new(rhs.into()))
                }
            }

            impl Sub<$ty> for f64 {
                type Output = Expr;
                fn sub(self, rhs: $ty) -> Expr {
                    Expr::Sub(Box::new(Expr::Num(self)), Box::new(rhs.into()))
                }
            }

            impl Mul<$ty> for f64 {
                type Output = Expr;
                fn mul(self, rhs: $ty) -> Expr {
                    Expr::Mul(Box::new(Expr::Num(self)), Box::new(rhs.into()))
                }
            }

            impl Div<$ty> for f64 {
                type Output = Expr;
                fn div(self, rhs: $ty) -> Expr {
                    Expr::Div(Box::new(Expr::Num(self)), Box::new(rhs.into()))
                }
            }
        )*
    };
}

impl_arithmetic!(Expr, Variable, Parameter);

impl Variable {
    pub fn pow(&self, exponent: impl Into<Expr>) -> Expr {
        Expr::from(self).pow(exponent)
    }

    /// Time derivative of this variable
    pub fn derivative(&self) -> Expr {
        derivative(self)
    }
}
