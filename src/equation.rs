//! Equation parsing and classification by type.

use std::collections::BTreeSet;
use std::fmt;

use log::warn;

use crate::error::{CasError, Result};
use crate::expr::Expr;
use crate::multipoly::{MultiPoly, degree_bound};
use crate::parser::parse_expr;

/// Symbol names treated as transcendental markers. Only free symbols are
/// compared, so a function application never matches.
const TRANSCENDENTAL_MARKERS: [&str; 4] = ["sin", "cos", "exp", "log"];

/// `lhs = rhs`, asserted rather than checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Equation {
    pub lhs: Expr,
    pub rhs: Expr,
}

impl Equation {
    pub fn free_symbols(&self) -> BTreeSet<String> {
        let mut symbols = self.lhs.free_symbols();
        symbols.extend(self.rhs.free_symbols());
        symbols
    }

    /// `lhs - rhs`, the expression the solver sets to zero.
    pub fn difference(&self) -> Expr {
        Expr::Sub(self.lhs.clone().boxed(), self.rhs.clone().boxed())
    }
}

impl fmt::Display for Equation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.lhs, self.rhs)
    }
}

/// Split on `=` and parse both sides.
pub fn parse_equation(input: &str) -> Result<Equation> {
    let mut sides = input.split('=');
    let (Some(left), Some(right), None) = (sides.next(), sides.next(), sides.next()) else {
        let count = input.matches('=').count();
        return Err(CasError::Equation(format!(
            "expected exactly one '=', found {count}"
        )));
    };
    Ok(Equation {
        lhs: parse_expr(left)?,
        rhs: parse_expr(right)?,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EquationKind {
    Linear,
    Quadratic,
    Cubic,
    HigherDegree,
    Transcendental,
    Other,
    Unclassifiable,
}

impl EquationKind {
    pub fn from_degree(degree: u32) -> Self {
        match degree {
            1 => EquationKind::Linear,
            2 => EquationKind::Quadratic,
            3 => EquationKind::Cubic,
            _ => EquationKind::HigherDegree,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EquationKind::Linear => "线性方程",
            EquationKind::Quadratic => "二次方程",
            EquationKind::Cubic => "三次方程",
            EquationKind::HigherDegree => "高次多项式方程",
            EquationKind::Transcendental => "超越方程",
            EquationKind::Other => "其他类型方程",
            EquationKind::Unclassifiable => "无法分类的方程",
        }
    }
}

impl fmt::Display for EquationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub kind: EquationKind,
    /// Absent exactly when `kind` is [`EquationKind::Unclassifiable`].
    pub equation: Option<Equation>,
}

impl Classification {
    pub fn unclassifiable() -> Self {
        Classification {
            kind: EquationKind::Unclassifiable,
            equation: None,
        }
    }
}

/// Classify one equation string, reporting why it could not be parsed.
pub fn classify_equation(input: &str) -> Result<Classification> {
    let equation = parse_equation(input)?;
    let kind = kind_of(&equation.lhs)?;
    Ok(Classification {
        kind,
        equation: Some(equation),
    })
}

/// Like [`classify_equation`], with failures logged and folded into
/// [`EquationKind::Unclassifiable`].
pub fn classify(input: &str) -> Classification {
    classify_equation(input).unwrap_or_else(|err| {
        warn!("could not classify {input:?}: {err}");
        Classification::unclassifiable()
    })
}

/// The degree is taken in the first variable by name, so `y**2 + x` is linear.
fn kind_of(lhs: &Expr) -> Result<EquationKind> {
    if let Some(poly) = MultiPoly::from_expr(lhs) {
        let Some(first) = poly.variables().into_iter().next() else {
            return Err(CasError::Unsupported(format!(
                "left-hand side {lhs} has no variables to take a degree in"
            )));
        };
        return Ok(EquationKind::from_degree(poly.degree_in(&first)));
    }
    // Powers too large to expand still have a degree.
    if let Some(first) = lhs.free_symbols().into_iter().next() {
        if let Some(degree) = degree_bound(lhs, &first) {
            return Ok(EquationKind::from_degree(
                u32::try_from(degree).unwrap_or(u32::MAX),
            ));
        }
    }
    let symbols = lhs.free_symbols();
    if TRANSCENDENTAL_MARKERS
        .iter()
        .any(|marker| symbols.contains(*marker))
    {
        return Ok(EquationKind::Transcendental);
    }
    Ok(EquationKind::Other)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind(input: &str) -> EquationKind {
        classify(input).kind
    }

    #[test]
    fn degree_picks_polynomial_label() {
        assert_eq!(kind("2*x + 1 = 5"), EquationKind::Linear);
        assert_eq!(kind("x**2 - 4 = 0"), EquationKind::Quadratic);
        assert_eq!(kind("x**3 = 8"), EquationKind::Cubic);
        assert_eq!(kind("x**5 + x = 1"), EquationKind::HigherDegree);
    }

    #[test]
    fn degree_is_taken_in_the_first_variable() {
        assert_eq!(kind("x*y = 1"), EquationKind::Linear);
        assert_eq!(kind("x**2 + y**2 = 1"), EquationKind::Quadratic);
        assert_eq!(kind("y**2 + x = 1"), EquationKind::Linear);
        assert_eq!(kind("x*y**2 = 1"), EquationKind::Linear);
        assert_eq!(kind("x + y**3 - x = 0"), EquationKind::Cubic);
    }

    #[test]
    fn powers_above_the_expansion_cap_keep_their_degree() {
        assert_eq!(kind("x**300 = 1"), EquationKind::HigherDegree);
        assert_eq!(kind("y**300 + x = 1"), EquationKind::Linear);
        assert_eq!(kind("x**300 + sin(x) = 1"), EquationKind::Other);
    }

    #[test]
    fn only_the_left_side_decides() {
        assert_eq!(kind("x = sin(y)"), EquationKind::Linear);
        assert_eq!(kind("sin(x) = 0"), EquationKind::Other);
        assert_eq!(kind("1/x = 2"), EquationKind::Other);
    }

    #[test]
    fn marker_names_as_plain_symbols_are_transcendental() {
        assert_eq!(kind("exp/x = 1"), EquationKind::Transcendental);
    }

    #[test]
    fn wrong_number_of_equals_signs() {
        assert_eq!(classify("x + 1"), Classification::unclassifiable());
        assert_eq!(classify("x = 1 = 2"), Classification::unclassifiable());
        assert!(matches!(
            classify_equation("x == 1"),
            Err(CasError::Equation(_))
        ));
    }

    #[test]
    fn constant_left_side_is_unclassifiable() {
        assert!(matches!(
            classify_equation("3 = x"),
            Err(CasError::Unsupported(_))
        ));
    }

    #[test]
    fn labels_are_chinese() {
        assert_eq!(EquationKind::Linear.to_string(), "线性方程");
        assert_eq!(EquationKind::Unclassifiable.to_string(), "无法分类的方程");
    }
}
