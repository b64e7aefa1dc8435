//! Univariate polynomials over Q.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, Zero};

use crate::expr::Rational;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Poly {
    pub(crate) coeffs: BTreeMap<usize, Rational>,
}

impl Poly {
    pub fn zero() -> Self {
        Poly {
            coeffs: BTreeMap::new(),
        }
    }

    /// `x`
    pub fn x() -> Self {
        Poly::from_terms([(1, Rational::one())])
    }

    pub fn from_terms(terms: impl IntoIterator<Item = (usize, Rational)>) -> Self {
        let mut poly = Poly::zero();
        for (exp, coeff) in terms {
            poly.add_term(exp, coeff);
        }
        poly
    }

    /// Coefficients listed from the constant term upwards.
    pub fn from_coeffs(coeffs: &[Rational]) -> Self {
        Poly::from_terms(coeffs.iter().cloned().enumerate())
    }

    fn add_term(&mut self, exp: usize, coeff: Rational) {
        if coeff.is_zero() {
            return;
        }
        match self.coeffs.entry(exp) {
            Entry::Vacant(entry) => {
                entry.insert(coeff);
            }
            Entry::Occupied(mut entry) => {
                let updated = entry.get() + coeff;
                if updated.is_zero() {
                    entry.remove();
                } else {
                    *entry.get_mut() = updated;
                }
            }
        }
    }

    pub fn degree(&self) -> Option<usize> {
        self.coeffs.keys().next_back().cloned()
    }

    pub fn leading_coeff(&self) -> Rational {
        self.coeffs
            .values()
            .next_back()
            .cloned()
            .unwrap_or_else(Rational::zero)
    }

    pub fn is_zero(&self) -> bool {
        self.coeffs.is_empty()
    }

    pub fn coeff(&self, power: usize) -> Rational {
        self.coeffs
            .get(&power)
            .cloned()
            .unwrap_or_else(Rational::zero)
    }

    pub fn scale(&self, k: &Rational) -> Self {
        Poly::from_terms(self.coeffs.iter().map(|(e, c)| (*e, c * k)))
    }

    pub fn derivative(&self) -> Self {
        Poly::from_terms(
            self.coeffs
                .iter()
                .filter(|(exp, _)| **exp > 0)
                .map(|(exp, c)| (exp - 1, c * Rational::from_integer(BigInt::from(*exp)))),
        )
    }

    pub fn monic(&self) -> Self {
        let lc = self.leading_coeff();
        if lc.is_zero() {
            return self.clone();
        }
        self.scale(&lc.recip())
    }

    /// Horner evaluation.
    pub fn evaluate(&self, x: &Rational) -> Rational {
        let Some(deg) = self.degree() else {
            return Rational::zero();
        };
        let mut acc = Rational::zero();
        for exp in (0..=deg).rev() {
            acc *= x;
            if let Some(c) = self.coeffs.get(&exp) {
                acc += c;
            }
        }
        acc
    }

    pub fn div_rem(&self, divisor: &Self) -> (Self, Self) {
        let Some(divisor_degree) = divisor.degree() else {
            return (Poly::zero(), self.clone());
        };
        let divisor_lc = divisor.leading_coeff();
        let mut remainder = self.clone();
        let mut quotient = Poly::zero();

        while let Some(r_deg) = remainder.degree() {
            if r_deg < divisor_degree {
                break;
            }
            let power = r_deg - divisor_degree;
            let coeff = remainder.leading_coeff() / &divisor_lc;
            quotient.add_term(power, coeff.clone());
            for (exp, c) in &divisor.coeffs {
                remainder.add_term(exp + power, -(c * &coeff));
            }
        }

        (quotient, remainder)
    }

    pub fn div_exact(&self, divisor: &Self) -> Option<Self> {
        let (q, r) = self.div_rem(divisor);
        if r.is_zero() {
            Some(q)
        } else {
            None
        }
    }

    pub fn gcd(a: &Poly, b: &Poly) -> Poly {
        let mut r0 = a.clone();
        let mut r1 = b.clone();
        while !r1.is_zero() {
            let (_, r) = r0.div_rem(&r1);
            r0 = r1;
            r1 = r;
        }
        r0.monic()
    }

    pub fn content_and_primitive_part(&self) -> (Rational, Self) {
        if self.is_zero() {
            return (Rational::zero(), Poly::zero());
        }
        let mut lcm = BigInt::one();
        for coeff in self.coeffs.values() {
            lcm = lcm.lcm(coeff.denom());
        }

        let mut gcd_num = BigInt::zero();
        let mut scaled_nums = BTreeMap::new();
        for (exp, coeff) in &self.coeffs {
            let num = (coeff * Rational::from_integer(lcm.clone())).to_integer();
            gcd_num = gcd_num.gcd(&num);
            scaled_nums.insert(*exp, num);
        }

        let mut primitive = Poly::from_terms(
            scaled_nums
                .into_iter()
                .map(|(exp, num)| (exp, Rational::from_integer(num / &gcd_num))),
        );
        let mut content = Rational::new(gcd_num, lcm);
        if primitive.leading_coeff().is_negative() {
            primitive = primitive.scale(&-Rational::one());
            content = -content;
        }
        (content, primitive)
    }

    pub fn primitive_part(&self) -> Self {
        self.content_and_primitive_part().1
    }

    /// Product of the distinct irreducible factors, as a primitive polynomial.
    pub fn square_free_part(&self) -> Self {
        if self.degree().unwrap_or(0) == 0 {
            return self.primitive_part();
        }
        let g = Poly::gcd(self, &self.derivative());
        self.div_exact(&g)
            .unwrap_or_else(|| self.clone())
            .primitive_part()
    }

    /// True when only even powers of `x` occur.
    pub fn is_even(&self) -> bool {
        self.coeffs.keys().all(|e| e % 2 == 0)
    }

    /// `q(y)` with `q(x^2) = self`. Only meaningful when [`Poly::is_even`] holds.
    pub fn compress_even(&self) -> Self {
        Poly::from_terms(self.coeffs.iter().map(|(e, c)| (e / 2, c.clone())))
    }

    /// `q(x^2)` for `q = self`, undoing [`Poly::compress_even`].
    pub fn expand_even(&self) -> Self {
        Poly::from_terms(self.coeffs.iter().map(|(e, c)| (e * 2, c.clone())))
    }

    /// Sturm sequence `p, p', -rem(p, p'), ...`.
    pub fn sturm_sequence(&self) -> Vec<Poly> {
        let mut seq = vec![self.clone(), self.derivative()];
        loop {
            let n = seq.len();
            if seq[n - 1].is_zero() {
                seq.pop();
                break;
            }
            let (_, r) = seq[n - 2].div_rem(&seq[n - 1]);
            if r.is_zero() {
                break;
            }
            seq.push(-r);
        }
        seq
    }

    /// Cauchy bound: every root has absolute value below `1 + max |a_i / a_n|`.
    pub fn root_bound(&self) -> Rational {
        let lc = self.leading_coeff().abs();
        let deg = self.degree().unwrap_or(0);
        let max = self
            .coeffs
            .iter()
            .filter(|(e, _)| **e < deg)
            .map(|(_, c)| c.abs() / &lc)
            .max()
            .unwrap_or_else(Rational::zero);
        max + Rational::one()
    }

}

/// Count of sign changes of the sequence evaluated at `x`, zeros skipped.
pub fn sign_changes(seq: &[Poly], x: &Rational) -> usize {
    let mut changes = 0;
    let mut last: Option<bool> = None;
    for p in seq {
        let v = p.evaluate(x);
        if v.is_zero() {
            continue;
        }
        let positive = v.is_positive();
        if let Some(prev) = last {
            if prev != positive {
                changes += 1;
            }
        }
        last = Some(positive);
    }
    changes
}

impl std::ops::Neg for Poly {
    type Output = Poly;
    fn neg(self) -> Poly {
        Poly {
            coeffs: self.coeffs.into_iter().map(|(e, c)| (e, -c)).collect(),
        }
    }
}
