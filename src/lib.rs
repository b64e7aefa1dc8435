//! Classification and exact solving of small systems of polynomial equations.

pub mod cli;
pub mod config;
pub mod equation;
pub mod error;
pub mod expr;
pub mod format;
pub mod log;
pub mod multipoly;
pub mod number;
pub mod parser;
pub mod polynomial;
pub mod roots;
pub mod simplify;
pub mod solver;

pub use equation::{
    Classification, Equation, EquationKind, classify, classify_equation, parse_equation,
};
pub use error::{CasError, Result};
pub use expr::{Expr, Rational, rational};
pub use format::{pretty, render_solution, render_value, solution_lines};
pub use multipoly::{MultiPoly, RationalFunction};
pub use number::{Number, Surd};
pub use parser::parse_expr;
pub use polynomial::Poly;
pub use roots::solve_univariate;
pub use simplify::{simplify, substitute};
pub use solver::{Solution, SolveOutcome, Value, solve_equations, solve_mixed_system, solve_system};
