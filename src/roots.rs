//! Roots of univariate polynomials over Q.
//!
//! Exact roots come first: rational roots by the rational root theorem, then the
//! quadratic formula (complex surds included), then even polynomials through
//! `y = x^2`. Whatever factor remains has its real roots isolated with a Sturm
//! sequence and bisected to a rational approximation.

use log::{debug, trace};
use num_bigint::BigInt;
use num_traits::{One, Signed, Zero};

use crate::expr::Rational;
use crate::number::{Number, Surd, approx_f64};
use crate::polynomial::{Poly, sign_changes};

/// Width below which an isolating interval is considered converged (2^-100).
const REFINE_BITS: u32 = 100;

/// Divisor enumeration gives up above this square root (trial division cost).
const DIVISOR_SEARCH_LIMIT: u64 = 2_000_000;

/// Candidate pairs `p/q` tried by the rational root search.
const MAX_CANDIDATES: usize = 200_000;

/// Distinct roots of `poly`, sorted by real then imaginary part.
///
/// `exact` is false when the coefficients are themselves approximations; only
/// real roots are searched for in that case.
pub fn solve_univariate(poly: &Poly, exact: bool) -> Vec<Number> {
    let Some(deg) = poly.degree() else {
        return Vec::new();
    };
    if deg == 0 {
        return Vec::new();
    }

    let mut roots = if exact {
        exact_roots(&poly.square_free_part())
    } else {
        real_roots_approx(&poly.square_free_part())
            .into_iter()
            .map(Number::Approx)
            .collect()
    };
    roots.sort_by(|a, b| a.cmp_value(b));
    roots.dedup();
    roots
}

fn exact_roots(square_free: &Poly) -> Vec<Number> {
    let (rational, rest) = strip_rational_roots(square_free);
    let mut roots: Vec<Number> = rational.into_iter().map(Number::rational).collect();

    match rest.degree() {
        None | Some(0) => {}
        Some(1) => roots.push(Number::rational(-rest.coeff(0) / rest.coeff(1))),
        Some(2) => roots.extend(quadratic_roots(&rest)),
        Some(deg) => {
            let (even, leftover) = even_roots(&rest);
            roots.extend(even);
            if leftover.degree().unwrap_or(0) > 0 {
                debug!("degree {deg} factor has no closed form here; isolating real roots");
                roots.extend(real_roots_approx(&leftover).into_iter().map(Number::Approx));
            }
        }
    }
    roots
}

/// `(-b ± sqrt(b^2 - 4ac)) / 2a`, complex roots included.
fn quadratic_roots(q: &Poly) -> Vec<Number> {
    let a = q.coeff(2);
    let b = q.coeff(1);
    let c = q.coeff(0);
    let two_a = &a * Rational::from_integer(BigInt::from(2));
    let disc = &b * &b - Rational::from_integer(BigInt::from(4)) * &a * &c;
    let shift = Surd::from_rational(-&b / &two_a);
    let Some(half_width) = Surd::sqrt_of(&disc).mul(&Surd::from_rational(two_a.recip())) else {
        return Vec::new();
    };
    [shift.add(&half_width), shift.sub(&half_width)]
        .into_iter()
        .flatten()
        .map(Number::Exact)
        .collect()
}

/// For `p(x) = q(x^2)`, `x = ±sqrt(y)` for every rational root `y` of `q`. Returns
/// those roots and the factor of `p` they do not account for.
fn even_roots(p: &Poly) -> (Vec<Number>, Poly) {
    if !p.is_even() {
        return (Vec::new(), p.clone());
    }
    let (ys, rest) = strip_rational_roots(&p.compress_even().square_free_part());
    let mut roots = Vec::with_capacity(2 * ys.len());
    for y in ys {
        let s = Surd::sqrt_of(&y);
        if !s.is_zero() {
            roots.push(Number::Exact(s.neg()));
        }
        roots.push(Number::Exact(s));
    }
    (roots, rest.expand_even())
}

/// Split off every rational root. Returns the roots and the cofactor.
pub fn strip_rational_roots(p: &Poly) -> (Vec<Rational>, Poly) {
    let mut rest = p.primitive_part();
    let mut found = Vec::new();

    if rest.degree().unwrap_or(0) > 0 && rest.coeff(0).is_zero() {
        found.push(Rational::zero());
        rest = rest.div_exact(&Poly::x()).unwrap_or(rest);
    }
    if rest.degree().unwrap_or(0) == 0 {
        return (found, rest);
    }

    let constant = rest.coeff(0).to_integer().abs();
    let leading = rest.leading_coeff().to_integer().abs();
    let (Some(ps), Some(qs)) = (divisors(&constant), divisors(&leading)) else {
        debug!("coefficients too large for the rational root search");
        return (found, rest);
    };
    if ps.len() * qs.len() > MAX_CANDIDATES {
        debug!("rational root search skipped: {} candidates", ps.len() * qs.len());
        return (found, rest);
    }

    let mut candidates: Vec<Rational> = ps
        .iter()
        .flat_map(|p| qs.iter().map(move |q| Rational::new(p.clone(), q.clone())))
        .collect();
    candidates.sort();
    candidates.dedup();

    for candidate in candidates {
        for value in [candidate.clone(), -candidate] {
            if rest.degree().unwrap_or(0) == 0 {
                return (found, rest);
            }
            if rest.evaluate(&value).is_zero() {
                let factor = Poly::from_terms([(1, Rational::one()), (0, -value.clone())]);
                rest = rest.div_exact(&factor).unwrap_or(rest);
                found.push(value);
            }
        }
    }
    (found, rest)
}

/// Positive divisors of `n`, `None` when `n` is too large to factor by trial division.
fn divisors(n: &BigInt) -> Option<Vec<BigInt>> {
    if n.is_zero() {
        return Some(vec![BigInt::one()]);
    }
    if n.sqrt() > BigInt::from(DIVISOR_SEARCH_LIMIT) {
        return None;
    }
    let mut small = Vec::new();
    let mut large = Vec::new();
    let mut d = BigInt::one();
    while &d * &d <= *n {
        if (n % &d).is_zero() {
            let other = n / &d;
            if other != d {
                large.push(other);
            }
            small.push(d.clone());
        }
        d += 1u32;
    }
    small.extend(large.into_iter().rev());
    Some(small)
}

/// Real roots of a square-free polynomial, each bisected to within 2^-REFINE_BITS.
pub fn real_roots_approx(p: &Poly) -> Vec<Rational> {
    let Some(deg) = p.degree() else {
        return Vec::new();
    };
    if deg == 0 {
        return Vec::new();
    }
    if deg == 1 {
        return vec![-p.coeff(0) / p.coeff(1)];
    }

    let seq = p.sturm_sequence();
    let bound = p.root_bound();
    let mut pending = vec![(-bound.clone(), bound)];
    let mut isolated = Vec::new();
    let two = Rational::from_integer(BigInt::from(2));

    while let Some((lo, hi)) = pending.pop() {
        let count = sign_changes(&seq, &lo).saturating_sub(sign_changes(&seq, &hi));
        match count {
            0 => {}
            1 => isolated.push((lo, hi)),
            _ => {
                let mid = (&lo + &hi) / &two;
                if p.evaluate(&mid).is_zero() {
                    isolated.push((mid.clone(), mid.clone()));
                }
                pending.push((mid.clone(), hi));
                pending.push((lo, mid));
            }
        }
    }

    let mut roots: Vec<Rational> = isolated
        .into_iter()
        .map(|(lo, hi)| refine(p, lo, hi))
        .collect();
    roots.sort();
    roots.dedup();
    trace!(
        "isolated real roots: {:?}",
        roots.iter().map(approx_f64).collect::<Vec<_>>()
    );
    roots
}

/// Bisect `(lo, hi]`, known to hold exactly one root, down to the target width.
fn refine(p: &Poly, mut lo: Rational, mut hi: Rational) -> Rational {
    let two = Rational::from_integer(BigInt::from(2));
    let width = Rational::new(BigInt::one(), BigInt::one() << REFINE_BITS);
    if p.evaluate(&hi).is_zero() {
        return hi;
    }
    let hi_positive = p.evaluate(&hi).is_positive();
    while &hi - &lo > width {
        let mid = (&lo + &hi) / &two;
        let value = p.evaluate(&mid);
        if value.is_zero() {
            return mid;
        }
        if value.is_positive() == hi_positive {
            hi = mid;
        } else {
            lo = mid;
        }
    }
    (lo + hi) / two
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::rational;
    use crate::number::to_decimal_string;

    fn poly(coeffs: &[i64]) -> Poly {
        Poly::from_coeffs(&coeffs.iter().map(|c| rational(*c, 1)).collect::<Vec<_>>())
    }

    #[test]
    fn rational_roots_are_found_with_multiplicity_removed() {
        // (x - 1)^2 (2x + 3)
        let p = poly(&[3, -4, -1, 2]);
        let roots = solve_univariate(&p, true);
        assert_eq!(
            roots,
            vec![Number::rational(rational(-3, 2)), Number::rational(rational(1, 1))]
        );
    }

    #[test]
    fn zero_root_is_split_off() {
        let (roots, rest) = strip_rational_roots(&poly(&[0, 1, 1]));
        assert_eq!(roots, vec![rational(0, 1), rational(-1, 1)]);
        assert_eq!(rest.degree(), Some(0));
    }

    #[test]
    fn quadratic_with_negative_discriminant_is_complex() {
        let roots = solve_univariate(&poly(&[1, 0, 1]), true);
        assert_eq!(roots.len(), 2);
        assert!(roots.iter().all(|r| !r.is_real()));
    }

    #[test]
    fn even_quartic_splits_into_surds() {
        // (x^2 - 2)(x^2 - 3)
        let roots = solve_univariate(&poly(&[6, 0, -5, 0, 1]), true);
        assert_eq!(roots.len(), 4);
        assert!(roots.iter().all(Number::is_exact));
    }

    #[test]
    fn even_polynomial_keeps_exact_roots_of_a_partial_split() {
        // x^10 + 1: y = -1 gives ±I, the quartic cofactor has no real roots.
        let mut coeffs = vec![0; 11];
        coeffs[0] = 1;
        coeffs[10] = 1;
        let roots = solve_univariate(&poly(&coeffs), true);
        let i = Number::Exact(Surd::sqrt_of(&rational(-1, 1)));
        assert_eq!(roots, vec![i.neg(), i]);

        // (x^2 - 2)(x^4 + x^2 + 1)
        let roots = solve_univariate(&poly(&[-2, 0, -1, 0, -1, 0, 1]), true);
        let r2 = Number::Exact(Surd::sqrt_of(&rational(2, 1)));
        assert_eq!(roots, vec![r2.neg(), r2]);
    }

    #[test]
    fn even_polynomial_leftover_is_approximated() {
        // (x^2 - 4)(x^4 - 3): ±2 exact, ±3^(1/4) approximate.
        let roots = solve_univariate(&poly(&[12, 0, -3, 0, -4, 0, 1]), true);
        assert_eq!(roots.len(), 4);
        assert_eq!(roots.iter().filter(|r| r.is_exact()).count(), 2);
        assert!(roots.contains(&Number::rational(rational(2, 1))));
    }

    #[test]
    fn cube_root_of_two_is_approximated() {
        let roots = solve_univariate(&poly(&[-2, 0, 0, 1]), true);
        assert_eq!(roots.len(), 1);
        let value = roots[0].approximate().unwrap();
        assert_eq!(to_decimal_string(&value, 12), "1.259921049895");
    }

    #[test]
    fn sturm_isolation_separates_close_roots() {
        // x^3 - 3x + 1 has three real irrational roots.
        let roots = real_roots_approx(&poly(&[1, -3, 0, 1]));
        assert_eq!(roots.len(), 3);
        assert!(roots.windows(2).all(|w| w[0] < w[1]));
    }
}
