use crate::number::{Number, to_decimal_string};
use crate::solver::{Solution, SolveOutcome, Value};

use super::pretty;

/// Approximations print as decimals with `digits` places; everything else in
/// input syntax.
pub fn render_value(value: &Value, digits: usize) -> String {
    match value {
        Value::Number(Number::Approx(r)) => to_decimal_string(r, digits),
        Value::Number(n) => pretty(&n.to_expr(digits)),
        Value::Symbolic(e) => pretty(e),
    }
}

/// `x = 2, y = 1`
pub fn render_solution(solution: &Solution, digits: usize) -> String {
    solution
        .iter()
        .map(|(var, value)| format!("{var} = {}", render_value(value, digits)))
        .collect::<Vec<_>>()
        .join(", ")
}

/// One line per solution; nothing for [`SolveOutcome::NoSolution`].
pub fn solution_lines(outcome: &SolveOutcome, digits: usize) -> Vec<String> {
    outcome
        .solutions()
        .iter()
        .map(|s| render_solution(s, digits))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::{Expr, rational};

    #[test]
    fn solutions_render_in_variable_order() {
        let mut s = Solution::new();
        s.insert("y".into(), Value::rational(rational(1, 2)));
        s.insert("x".into(), Value::Symbolic(Expr::var("z")));
        assert_eq!(render_solution(&s, 12), "x = z, y = 1/2");
    }

    #[test]
    fn approximations_use_the_requested_digits() {
        let v = Value::Number(Number::Approx(rational(2, 3)));
        assert_eq!(render_value(&v, 3), "0.667");
    }

    #[test]
    fn no_solution_has_no_lines() {
        assert!(solution_lines(&SolveOutcome::NoSolution, 12).is_empty());
    }
}
