//! Solving systems of equations.
//!
//! Every retained equation is turned into `numerator(lhs - rhs) = 0`. Systems of
//! degree one go through exact Gauss-Jordan elimination; anything else is handed to
//! the recursive polynomial elimination in [`elimination`]. Numeric answers are
//! checked against the input equations before they are returned.

pub mod elimination;
pub mod linear;

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use log::{debug, warn};
use num_bigint::BigInt;
use num_traits::One;

use crate::equation::{Classification, Equation, classify_equation};
use crate::error::Result;
use crate::expr::{Expr, Rational};
use crate::format::{pretty, render_solution};
use crate::multipoly::{MultiPoly, RationalFunction};
use crate::number::Number;

use linear::{LinearResult, is_linear_system, solve_linear};

/// Residuals below `10^-VERIFY_DIGITS` count as zero when approximations are involved.
const VERIFY_DIGITS: usize = 9;

/// Decimal places used to recognise duplicate approximate solutions.
const DEDUP_DIGITS: usize = 20;

/// The value bound to one variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Number(Number),
    /// An expression in variables the system leaves free.
    Symbolic(Expr),
}

impl Value {
    pub fn rational(value: Rational) -> Self {
        Value::Number(Number::rational(value))
    }

    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Value::Number(n) => Some(n),
            Value::Symbolic(_) => None,
        }
    }

    /// Symbolic values that collapsed to a rational are stored as numbers.
    pub fn from_expr(expr: Expr) -> Self {
        match expr {
            Expr::Constant(c) => Value::rational(c),
            other => Value::Symbolic(other),
        }
    }

    pub fn from_poly(poly: &MultiPoly) -> Self {
        match poly.as_constant() {
            Some(c) => Value::rational(c),
            None => Value::Symbolic(poly.to_expr()),
        }
    }

    pub fn to_expr(&self, digits: usize) -> Expr {
        match self {
            Value::Number(n) => n.to_expr(digits),
            Value::Symbolic(e) => e.clone(),
        }
    }
}

/// Variable → value, ordered by variable name.
pub type Solution = BTreeMap<String, Value>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveOutcome {
    NoSolution,
    Solutions(Vec<Solution>),
}

impl SolveOutcome {
    pub fn from_solutions(solutions: Vec<Solution>) -> Self {
        if solutions.is_empty() {
            SolveOutcome::NoSolution
        } else {
            SolveOutcome::Solutions(solutions)
        }
    }

    pub fn solutions(&self) -> &[Solution] {
        match self {
            SolveOutcome::NoSolution => &[],
            SolveOutcome::Solutions(list) => list,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.solutions().is_empty()
    }
}

/// Classify every input, keep the ones that parse, and solve them together.
pub fn solve_mixed_system<S: AsRef<str>>(equations: &[S]) -> Result<SolveOutcome> {
    let mut retained = Vec::with_capacity(equations.len());
    for (idx, input) in equations.iter().enumerate() {
        match classify_equation(input.as_ref()) {
            Ok(Classification {
                kind,
                equation: Some(equation),
            }) => {
                debug!("equation {}: {equation} ({kind})", idx + 1);
                retained.push(equation);
            }
            Ok(_) => warn!("equation {} has no parsed form; dropped", idx + 1),
            Err(err) => warn!("equation {} dropped: {err}", idx + 1),
        }
    }
    solve_system(&retained)
}

/// Like [`solve_mixed_system`], with failures logged and reported as no solution.
pub fn solve_equations<S: AsRef<str>>(equations: &[S]) -> SolveOutcome {
    solve_mixed_system(equations).unwrap_or_else(|err| {
        warn!("solving failed: {err}");
        SolveOutcome::NoSolution
    })
}

/// Numerator and denominator of `lhs - rhs`.
struct Prepared {
    numer: MultiPoly,
    denom: MultiPoly,
}

impl Prepared {
    fn new(equation: &Equation) -> Result<Self> {
        let rf = RationalFunction::from_expr(&equation.difference())?;
        Ok(Prepared {
            numer: rf.numer,
            denom: rf.denom,
        })
    }

    fn variables(&self) -> BTreeSet<String> {
        let mut vars = self.numer.variables();
        vars.extend(self.denom.variables());
        vars
    }
}

/// Solve already parsed equations.
pub fn solve_system(equations: &[Equation]) -> Result<SolveOutcome> {
    if equations.is_empty() {
        return Ok(SolveOutcome::NoSolution);
    }
    let prepared = equations
        .iter()
        .map(Prepared::new)
        .collect::<Result<Vec<_>>>()?;
    let polys: Vec<MultiPoly> = prepared.iter().map(|p| p.numer.clone()).collect();

    let candidates = if is_linear_system(&polys) {
        let variables: Vec<String> = polys
            .iter()
            .flat_map(MultiPoly::variables)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        linear_solutions(&variables, &polys)
    } else {
        elimination::solve_polynomials(&polys)?
    };

    let mut solutions: Vec<Solution> = candidates
        .into_iter()
        .filter(|s| !s.is_empty())
        .filter(|s| satisfies(s, &prepared))
        .collect();
    solutions.sort_by(compare_solutions);
    solutions.dedup_by(|a, b| render_solution(a, DEDUP_DIGITS) == render_solution(b, DEDUP_DIGITS));
    debug!("{} solution(s)", solutions.len());
    Ok(SolveOutcome::from_solutions(solutions))
}

fn linear_solutions(variables: &[String], polys: &[MultiPoly]) -> Vec<Solution> {
    match solve_linear(variables, polys).0 {
        LinearResult::Unique(values) => vec![
            values
                .into_iter()
                .map(|(name, value)| (name, Value::rational(value)))
                .collect(),
        ],
        LinearResult::Infinite(family) => vec![
            family
                .into_iter()
                .map(|(name, value)| (name, Value::from_poly(&value)))
                .collect(),
        ],
        LinearResult::Inconsistent => Vec::new(),
    }
}

/// Every equation whose variables are all numeric must vanish, with a nonzero
/// denominator.
fn satisfies(solution: &Solution, prepared: &[Prepared]) -> bool {
    let env: BTreeMap<String, Number> = solution
        .iter()
        .filter_map(|(name, value)| value.as_number().map(|n| (name.clone(), n.clone())))
        .collect();
    let tolerance = Rational::new(BigInt::one(), num_traits::pow(BigInt::from(10), VERIFY_DIGITS));

    for eq in prepared {
        if !eq.variables().iter().all(|v| env.contains_key(v)) {
            continue;
        }
        match (eq.numer.evaluate(&env), eq.denom.evaluate(&env)) {
            (Some(numer), Some(denom)) => {
                if denom.is_negligible(&tolerance) {
                    debug!("rejecting {}: denominator {} vanishes", render_solution(solution, 12), eq.denom);
                    return false;
                }
                if !numer.is_negligible(&tolerance) {
                    debug!("rejecting {}: residual of {}", render_solution(solution, 12), eq.numer);
                    return false;
                }
            }
            _ => debug!("cannot check {} numerically; kept", render_solution(solution, 12)),
        }
    }
    true
}

fn compare_solutions(a: &Solution, b: &Solution) -> Ordering {
    for ((name_a, value_a), (name_b, value_b)) in a.iter().zip(b.iter()) {
        let ord = name_a.cmp(name_b).then_with(|| compare_values(value_a, value_b));
        if ord != Ordering::Equal {
            return ord;
        }
    }
    a.len().cmp(&b.len())
}

fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.cmp_value(y),
        (Value::Number(_), Value::Symbolic(_)) => Ordering::Less,
        (Value::Symbolic(_), Value::Number(_)) => Ordering::Greater,
        (Value::Symbolic(x), Value::Symbolic(y)) => pretty(x).cmp(&pretty(y)),
    }
}
