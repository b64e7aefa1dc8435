use crate::expr::{Expr, Rational, one, zero};
use crate::multipoly::RationalFunction;
use crate::number::Surd;
use num_bigint::BigInt;
use num_traits::{One, Signed, ToPrimitive, Zero};

/// Clean up an expression. Anything that is a rational function is rewritten in
/// collected polynomial form; the rest is folded bottom-up.
pub fn simplify(expr: Expr) -> Expr {
    if let Ok(rf) = RationalFunction::from_expr(&expr) {
        return rational_function_expr(&rf);
    }
    match expr {
        Expr::Add(a, b) => simplify_add(simplify(*a), simplify(*b)),
        Expr::Sub(a, b) => simplify_sub(simplify(*a), simplify(*b)),
        Expr::Mul(a, b) => simplify_mul(simplify(*a), simplify(*b)),
        Expr::Div(a, b) => simplify_div(simplify(*a), simplify(*b)),
        Expr::Pow(a, b) => simplify_pow(simplify(*a), simplify(*b)),
        Expr::Neg(a) => simplify_neg(simplify(*a)),
        Expr::Sqrt(a) => simplify_sqrt(simplify(*a)),
        Expr::Abs(a) => match simplify(*a) {
            Expr::Constant(c) => Expr::Constant(c.abs()),
            x => Expr::Abs(x.boxed()),
        },
        other => other,
    }
}

fn rational_function_expr(rf: &RationalFunction) -> Expr {
    let numer = rf.numer.to_expr();
    match rf.denom.as_constant() {
        Some(d) if d.is_one() => numer,
        _ => simplify_div(numer, rf.denom.to_expr()),
    }
}

pub fn simplify_add(x: Expr, y: Expr) -> Expr {
    match (x, y) {
        (Expr::Constant(a), Expr::Constant(b)) => Expr::Constant(a + b),
        (x, y) if is_zero(&x) => y,
        (x, y) if is_zero(&y) => x,
        (x, Expr::Neg(y)) => Expr::Sub(x.boxed(), y),
        (x, Expr::Constant(c)) if c.is_negative() => Expr::Sub(x.boxed(), Expr::Constant(-c).boxed()),
        (x, y) => Expr::Add(x.boxed(), y.boxed()),
    }
}

pub fn simplify_sub(x: Expr, y: Expr) -> Expr {
    match (x, y) {
        (Expr::Constant(a), Expr::Constant(b)) => Expr::Constant(a - b),
        (x, y) if is_zero(&y) => x,
        (x, y) if is_zero(&x) => simplify_neg(y),
        (x, y) if x == y => zero(),
        (x, Expr::Neg(y)) => Expr::Add(x.boxed(), y),
        (x, y) => Expr::Sub(x.boxed(), y.boxed()),
    }
}

pub fn simplify_mul(x: Expr, y: Expr) -> Expr {
    match (x, y) {
        (Expr::Constant(a), Expr::Constant(b)) => Expr::Constant(a * b),
        (x, y) if is_zero(&x) || is_zero(&y) => zero(),
        (x, y) if is_one(&x) => y,
        (x, y) if is_one(&y) => x,
        (Expr::Neg(x), y) => simplify_neg(simplify_mul(*x, y)),
        (x, Expr::Neg(y)) => simplify_neg(simplify_mul(x, *y)),
        (x, c @ Expr::Constant(_)) => Expr::Mul(c.boxed(), x.boxed()),
        (x, y) => Expr::Mul(x.boxed(), y.boxed()),
    }
}

pub fn simplify_div(x: Expr, y: Expr) -> Expr {
    match (x, y) {
        (Expr::Constant(n), Expr::Constant(d)) if !d.is_zero() => Expr::Constant(n / d),
        (x, _) if is_zero(&x) => zero(),
        (x, y) if is_one(&y) => x,
        (x, y) if x == y => one(),
        (x, y) => Expr::Div(x.boxed(), y.boxed()),
    }
}

pub fn simplify_pow(x: Expr, y: Expr) -> Expr {
    match (x, y) {
        (_, Expr::Constant(e)) if e.is_zero() => one(),
        (base, Expr::Constant(e)) if e.is_one() => base,
        (Expr::Constant(b), Expr::Constant(e)) if e.is_integer() => {
            let k: BigInt = e.to_integer();
            match k.abs().to_u32() {
                Some(power) if k.is_positive() => {
                    Expr::Constant(Rational::new(b.numer().pow(power), b.denom().pow(power)))
                }
                Some(power) if !b.is_zero() => {
                    Expr::Constant(Rational::new(b.denom().pow(power), b.numer().pow(power)))
                }
                _ => Expr::Pow(Expr::Constant(b).boxed(), Expr::Constant(e).boxed()),
            }
        }
        (x, y) => Expr::Pow(x.boxed(), y.boxed()),
    }
}

pub fn simplify_neg(expr: Expr) -> Expr {
    match expr {
        Expr::Constant(x) => Expr::Constant(-x),
        Expr::Neg(x) => *x,
        Expr::Sub(a, b) => Expr::Sub(b, a),
        other => Expr::Neg(other.boxed()),
    }
}

/// `sqrt(c)` for a rational `c` becomes its surd form; `sqrt(x**2)` is left alone.
pub fn simplify_sqrt(expr: Expr) -> Expr {
    match expr {
        Expr::Constant(c) => Surd::sqrt_of(&c).to_expr(),
        other => Expr::Sqrt(other.boxed()),
    }
}

fn is_zero(expr: &Expr) -> bool {
    matches!(expr, Expr::Constant(r) if r.is_zero())
}

fn is_one(expr: &Expr) -> bool {
    matches!(expr, Expr::Constant(r) if r.is_one())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::pretty;
    use crate::parser::parse_expr;

    fn simp(input: &str) -> String {
        pretty(&simplify(parse_expr(input).expect("parse")))
    }

    #[test]
    fn polynomial_input_is_collected() {
        assert_eq!(simp("3 - (y + 1) - y"), "2 - 2*y");
        assert_eq!(simp("(x + 1)**2 - 1"), "x**2 + 2*x");
    }

    #[test]
    fn rational_functions_keep_a_single_division() {
        assert_eq!(simp("1/y + 1"), "(y + 1)/y");
    }

    #[test]
    fn constant_radicands_are_reduced() {
        assert_eq!(simp("(2 + sqrt(8))/2"), "(2 + 2*sqrt(2))/2");
        assert_eq!(simp("sqrt(4*3)"), "2*sqrt(3)");
        assert_eq!(simp("0*sqrt(y) + 1*sqrt(y)"), "sqrt(y)");
    }

    #[test]
    fn negation_is_absorbed() {
        assert_eq!(pretty(&simplify_neg(parse_expr("a - b").unwrap())), "b - a");
        assert_eq!(simp("-(-sqrt(y))"), "sqrt(y)");
    }
}
