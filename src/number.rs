//! Exact quadratic surds `a + b*sqrt(d)` and rational approximations of real values.
//!
//! Roots of univariate polynomials are reported as one of these two shapes. A surd
//! with a negative radicand is complex; the approximate form is always real.

use std::cmp::Ordering;

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, ToPrimitive, Zero};

use crate::expr::{Expr, Rational};

/// Bits of precision kept for square roots of radicands when a surd has to be
/// approximated.
const SQRT_SCALE_BITS: u32 = 128;

/// Trial division stops here; anything left is kept in the radicand as is.
const TRIAL_DIVISION_LIMIT: u64 = 100_000;

/// `rational + coeff * sqrt(radicand)`. `radicand` is square-free and never 0 or 1,
/// unless `coeff` is zero in which case the radicand is 1.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Surd {
    rational: Rational,
    coeff: Rational,
    radicand: BigInt,
}

impl Surd {
    pub fn from_rational(value: Rational) -> Self {
        Surd {
            rational: value,
            coeff: Rational::zero(),
            radicand: BigInt::one(),
        }
    }

    /// Exact square root of a rational, complex for negative input.
    pub fn sqrt_of(value: &Rational) -> Self {
        if value.is_zero() {
            return Surd::from_rational(Rational::zero());
        }
        // sqrt(p/q) = sqrt(p*q)/q
        let q = value.denom().clone();
        let pq = value.numer() * &q;
        let (square, free) = split_square_free(&pq.abs());
        let radicand = if pq.is_negative() { -free } else { free };
        Surd::new(Rational::zero(), Rational::new(square, q), radicand)
    }

    pub fn new(rational: Rational, coeff: Rational, radicand: BigInt) -> Self {
        if coeff.is_zero() || radicand.is_one() {
            let folded = if radicand.is_one() { rational + coeff } else { rational };
            return Surd::from_rational(folded);
        }
        if radicand.is_zero() {
            return Surd::from_rational(rational);
        }
        Surd {
            rational,
            coeff,
            radicand,
        }
    }

    pub fn surd_coeff(&self) -> &Rational {
        &self.coeff
    }

    pub fn radicand(&self) -> &BigInt {
        &self.radicand
    }

    pub fn as_rational(&self) -> Option<&Rational> {
        if self.coeff.is_zero() {
            Some(&self.rational)
        } else {
            None
        }
    }

    pub fn is_zero(&self) -> bool {
        self.rational.is_zero() && self.coeff.is_zero()
    }

    pub fn is_real(&self) -> bool {
        self.coeff.is_zero() || self.radicand.is_positive()
    }

    fn compatible(&self, other: &Surd) -> Option<BigInt> {
        match (self.coeff.is_zero(), other.coeff.is_zero()) {
            (true, _) => Some(other.radicand.clone()),
            (_, true) => Some(self.radicand.clone()),
            _ if self.radicand == other.radicand => Some(self.radicand.clone()),
            _ => None,
        }
    }

    pub fn add(&self, other: &Surd) -> Option<Surd> {
        let d = self.compatible(other)?;
        Some(Surd::new(
            &self.rational + &other.rational,
            &self.coeff + &other.coeff,
            d,
        ))
    }

    pub fn neg(&self) -> Surd {
        Surd::new(-&self.rational, -&self.coeff, self.radicand.clone())
    }

    pub fn sub(&self, other: &Surd) -> Option<Surd> {
        self.add(&other.neg())
    }

    pub fn mul(&self, other: &Surd) -> Option<Surd> {
        if let Some(d) = self.compatible(other) {
            return Some(self.mul_in(other, d));
        }
        if !self.rational.is_zero() || !other.rational.is_zero() {
            return None;
        }
        // b*sqrt(d1) * e*sqrt(d2) = b*e*sqrt(d1*d2), negated when both are imaginary.
        let product = &self.radicand * &other.radicand;
        let (square, free) = split_square_free(&product.abs());
        let mut coeff = &self.coeff * &other.coeff * Rational::from_integer(square);
        if self.radicand.is_negative() && other.radicand.is_negative() {
            coeff = -coeff;
        }
        let radicand = if product.is_negative() { -free } else { free };
        Some(Surd::new(Rational::zero(), coeff, radicand))
    }

    fn mul_in(&self, other: &Surd, d: BigInt) -> Surd {
        let d_rat = Rational::from_integer(d.clone());
        let rational = &self.rational * &other.rational + &self.coeff * &other.coeff * d_rat;
        let coeff = &self.rational * &other.coeff + &other.rational * &self.coeff;
        Surd::new(rational, coeff, d)
    }

    /// `1/(a + b*sqrt(d)) = (a - b*sqrt(d)) / (a^2 - b^2*d)`.
    pub fn inv(&self) -> Option<Surd> {
        let d_rat = Rational::from_integer(self.radicand.clone());
        let norm = &self.rational * &self.rational - &self.coeff * &self.coeff * d_rat;
        if norm.is_zero() {
            return None;
        }
        Some(Surd::new(
            &self.rational / &norm,
            -&self.coeff / &norm,
            self.radicand.clone(),
        ))
    }

    pub fn pow(&self, exp: u32) -> Surd {
        let mut result = Surd::from_rational(Rational::one());
        let mut base = self.clone();
        let mut n = exp;
        while n > 0 {
            if n % 2 == 1 {
                result = result.mul_in(&base, self.radicand.clone());
            }
            base = base.mul_in(&base, self.radicand.clone());
            n /= 2;
        }
        result
    }

    /// Real approximation, `None` for complex values.
    pub fn approximate(&self) -> Option<Rational> {
        if self.coeff.is_zero() {
            return Some(self.rational.clone());
        }
        if !self.radicand.is_positive() {
            return None;
        }
        Some(&self.rational + &self.coeff * sqrt_approx(&self.radicand))
    }

    /// Real and imaginary parts as approximations, used for ordering.
    fn components(&self) -> (Rational, Rational) {
        if self.coeff.is_zero() {
            return (self.rational.clone(), Rational::zero());
        }
        if self.radicand.is_positive() {
            (
                &self.rational + &self.coeff * sqrt_approx(&self.radicand),
                Rational::zero(),
            )
        } else {
            (
                self.rational.clone(),
                &self.coeff * sqrt_approx(&-&self.radicand),
            )
        }
    }

    pub fn to_expr(&self) -> Expr {
        if self.coeff.is_zero() {
            return Expr::Constant(self.rational.clone());
        }
        let radical = if self.radicand == BigInt::from(-1) {
            Expr::Imaginary
        } else if self.radicand.is_negative() {
            Expr::Mul(
                Expr::Sqrt(Expr::integer(-&self.radicand).boxed()).boxed(),
                Expr::Imaginary.boxed(),
            )
        } else {
            Expr::Sqrt(Expr::integer(self.radicand.clone()).boxed())
        };
        let magnitude = self.coeff.abs();
        let numer = magnitude.numer().clone();
        let scaled = if numer.is_one() {
            radical
        } else {
            Expr::Mul(Expr::integer(numer).boxed(), radical.boxed())
        };
        let term = if magnitude.denom().is_one() {
            scaled
        } else {
            Expr::Div(scaled.boxed(), Expr::integer(magnitude.denom().clone()).boxed())
        };
        match (self.rational.is_zero(), self.coeff.is_negative()) {
            (true, false) => term,
            (true, true) => Expr::Neg(term.boxed()),
            (false, false) => Expr::Add(Expr::Constant(self.rational.clone()).boxed(), term.boxed()),
            (false, true) => Expr::Sub(Expr::Constant(self.rational.clone()).boxed(), term.boxed()),
        }
    }
}

/// A root value: exact when it lives in Q or a quadratic extension, approximate otherwise.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Number {
    Exact(Surd),
    Approx(Rational),
}

impl Number {
    pub fn rational(value: Rational) -> Self {
        Number::Exact(Surd::from_rational(value))
    }

    pub fn is_exact(&self) -> bool {
        matches!(self, Number::Exact(_))
    }

    pub fn as_rational(&self) -> Option<&Rational> {
        match self {
            Number::Exact(s) => s.as_rational(),
            Number::Approx(_) => None,
        }
    }

    pub fn is_real(&self) -> bool {
        match self {
            Number::Exact(s) => s.is_real(),
            Number::Approx(_) => true,
        }
    }

    /// Real approximation, `None` for complex values.
    pub fn approximate(&self) -> Option<Rational> {
        match self {
            Number::Exact(s) => s.approximate(),
            Number::Approx(r) => Some(r.clone()),
        }
    }

    pub fn is_negligible(&self, tolerance: &Rational) -> bool {
        match self {
            Number::Exact(s) => s.is_zero(),
            Number::Approx(r) => r.abs() <= *tolerance,
        }
    }

    fn binary(
        &self,
        other: &Number,
        exact: impl Fn(&Surd, &Surd) -> Option<Surd>,
        approx: impl Fn(Rational, Rational) -> Rational,
    ) -> Option<Number> {
        if let (Number::Exact(a), Number::Exact(b)) = (self, other) {
            if let Some(value) = exact(a, b) {
                return Some(Number::Exact(value));
            }
        }
        Some(Number::Approx(approx(
            self.approximate()?,
            other.approximate()?,
        )))
    }

    pub fn add(&self, other: &Number) -> Option<Number> {
        self.binary(other, Surd::add, |a, b| a + b)
    }

    pub fn sub(&self, other: &Number) -> Option<Number> {
        self.binary(other, Surd::sub, |a, b| a - b)
    }

    pub fn mul(&self, other: &Number) -> Option<Number> {
        self.binary(other, Surd::mul, |a, b| a * b)
    }

    pub fn neg(&self) -> Number {
        match self {
            Number::Exact(s) => Number::Exact(s.neg()),
            Number::Approx(r) => Number::Approx(-r),
        }
    }

    pub fn inv(&self) -> Option<Number> {
        match self {
            Number::Exact(s) => s.inv().map(Number::Exact),
            Number::Approx(r) if r.is_zero() => None,
            Number::Approx(r) => Some(Number::Approx(r.recip())),
        }
    }

    pub fn pow(&self, exp: u32) -> Number {
        match self {
            Number::Exact(s) => Number::Exact(s.pow(exp)),
            Number::Approx(r) => Number::Approx(num_traits::pow(r.clone(), exp as usize)),
        }
    }

    /// Principal square root. Exact for rationals; approximated for non-negative
    /// reals otherwise, `None` when neither applies.
    pub fn sqrt(&self) -> Option<Number> {
        if let Some(r) = self.as_rational() {
            return Some(Number::Exact(Surd::sqrt_of(r)));
        }
        let value = self.approximate()?;
        if value.is_negative() {
            return None;
        }
        let q = value.denom().clone();
        let root = sqrt_approx(&(value.numer() * &q)) / Rational::from_integer(q);
        Some(Number::Approx(root))
    }

    /// Ordering key: real part, then imaginary part.
    pub fn sort_key(&self) -> (Rational, Rational) {
        match self {
            Number::Exact(s) => s.components(),
            Number::Approx(r) => (r.clone(), Rational::zero()),
        }
    }

    pub fn cmp_value(&self, other: &Number) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }

    /// Expression form; approximations are rounded to `digits` decimals.
    pub fn to_expr(&self, digits: usize) -> Expr {
        match self {
            Number::Exact(s) => s.to_expr(),
            Number::Approx(r) => Expr::Constant(round_to_digits(r, digits)),
        }
    }
}

/// `n = square^2 * free` with `free` square-free, as far as trial division goes.
pub fn split_square_free(n: &BigInt) -> (BigInt, BigInt) {
    let mut square = BigInt::one();
    let mut rest = n.clone();
    if rest.is_zero() {
        return (BigInt::zero(), BigInt::one());
    }
    let mut p: u64 = 2;
    while p <= TRIAL_DIVISION_LIMIT {
        let bp = BigInt::from(p);
        if &bp * &bp > rest {
            break;
        }
        let p2 = &bp * &bp;
        while (&rest % &p2).is_zero() {
            rest /= &p2;
            square *= &bp;
        }
        p += if p == 2 { 1 } else { 2 };
    }
    let root = rest.sqrt();
    if &root * &root == rest {
        return (square * root, BigInt::one());
    }
    (square, rest)
}

/// `sqrt(n)` truncated to `SQRT_SCALE_BITS` fractional bits.
fn sqrt_approx(n: &BigInt) -> Rational {
    let scale = BigInt::one() << SQRT_SCALE_BITS;
    let scaled: BigInt = (n << (2 * SQRT_SCALE_BITS)).sqrt();
    Rational::new(scaled, scale)
}

/// Round half away from zero to `digits` decimals.
pub fn round_to_digits(value: &Rational, digits: usize) -> Rational {
    let scale = num_traits::pow(BigInt::from(10), digits);
    let scaled = value * Rational::from_integer(scale.clone());
    Rational::new(scaled.round().to_integer(), scale)
}

/// Decimal text for an approximation, trailing zeros trimmed.
pub fn to_decimal_string(value: &Rational, digits: usize) -> String {
    let rounded = round_to_digits(value, digits);
    let neg = rounded.is_negative();
    let scale = num_traits::pow(BigInt::from(10), digits);
    let scaled = (rounded.abs() * Rational::from_integer(scale.clone())).to_integer();
    let (int_part, frac_part) = scaled.div_rem(&scale);

    let mut frac = frac_part.to_str_radix(10);
    while frac.len() < digits {
        frac.insert(0, '0');
    }
    let frac = frac.trim_end_matches('0');

    let sign = if neg { "-" } else { "" };
    if frac.is_empty() {
        format!("{sign}{int_part}.0")
    } else {
        format!("{sign}{int_part}.{frac}")
    }
}

/// Coarse f64 view, only for log messages.
pub fn approx_f64(value: &Rational) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::rational;

    #[test]
    fn sqrt_of_rational_extracts_squares() {
        let s = Surd::sqrt_of(&rational(8, 1));
        assert_eq!(s.surd_coeff(), &rational(2, 1));
        assert_eq!(s.radicand(), &BigInt::from(2));

        let half = Surd::sqrt_of(&rational(1, 2));
        assert_eq!(half.surd_coeff(), &rational(1, 2));
        assert_eq!(half.radicand(), &BigInt::from(2));

        assert_eq!(Surd::sqrt_of(&rational(9, 4)).as_rational(), Some(&rational(3, 2)));
    }

    #[test]
    fn negative_radicand_is_complex() {
        let i = Surd::sqrt_of(&rational(-1, 1));
        assert!(!i.is_real());
        assert_eq!(i.mul(&i).unwrap().as_rational(), Some(&rational(-1, 1)));
        assert_eq!(crate::format::pretty(&i.to_expr()), "I");
    }

    #[test]
    fn inverse_rationalises_denominator() {
        let s = Surd::new(rational(1, 1), rational(1, 1), BigInt::from(2));
        let inv = s.inv().unwrap();
        assert_eq!(inv, Surd::new(rational(-1, 1), rational(1, 1), BigInt::from(2)));
        assert_eq!(s.mul(&inv).unwrap().as_rational(), Some(&rational(1, 1)));
    }

    #[test]
    fn pure_surds_with_different_radicands_multiply_exactly() {
        let two = Surd::sqrt_of(&rational(2, 1));
        let three = Surd::sqrt_of(&rational(3, 1));
        let six = two.mul(&three).unwrap();
        assert_eq!(crate::format::pretty(&six.to_expr()), "sqrt(6)");

        let product = Surd::sqrt_of(&rational(-2, 1)).mul(&Surd::sqrt_of(&rational(-3, 1)));
        assert_eq!(crate::format::pretty(&product.unwrap().to_expr()), "-sqrt(6)");

        let ratio = two.mul(&three.inv().unwrap()).unwrap();
        assert_eq!(crate::format::pretty(&ratio.to_expr()), "sqrt(6)/3");

        let twelve = two.mul(&Surd::sqrt_of(&rational(6, 1))).unwrap();
        assert_eq!(twelve.as_rational(), None);
        assert_eq!(twelve.radicand(), &BigInt::from(3));
        assert_eq!(twelve.surd_coeff(), &rational(2, 1));

        let mixed = Surd::new(rational(1, 1), rational(1, 1), BigInt::from(2));
        assert!(mixed.mul(&three).is_none());
    }

    #[test]
    fn incompatible_surds_fall_back_to_approximation() {
        let a = Number::Exact(Surd::sqrt_of(&rational(2, 1)));
        let b = Number::Exact(Surd::sqrt_of(&rational(3, 1)));
        let sum = a.add(&b).unwrap();
        assert!(!sum.is_exact());
        assert_eq!(
            to_decimal_string(&sum.approximate().unwrap(), 6),
            "3.146264"
        );
    }

    #[test]
    fn decimal_rendering_trims_zeros() {
        assert_eq!(to_decimal_string(&rational(1, 4), 12), "0.25");
        assert_eq!(to_decimal_string(&rational(-5, 2), 3), "-2.5");
        assert_eq!(to_decimal_string(&rational(2, 1), 3), "2.0");
        assert_eq!(to_decimal_string(&rational(2, 3), 4), "0.6667");
    }

    #[test]
    fn surd_rendering_matches_input_syntax() {
        let s = Surd::new(rational(-1, 2), rational(1, 2), BigInt::from(5));
        assert_eq!(crate::format::pretty(&s.to_expr()), "-1/2 + sqrt(5)/2");
        let t = Surd::new(rational(-1, 2), rational(-1, 2), BigInt::from(-3));
        assert_eq!(crate::format::pretty(&t.to_expr()), "-1/2 - sqrt(3)*I/2");
    }
}
