//! Sparse multivariate polynomials over Q, keyed by variable name.

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, ToPrimitive, Zero};

use crate::error::{CasError, Result};
use crate::expr::{Expr, Rational};
use crate::number::{Number, Surd};
use crate::polynomial::Poly;

/// Variable name → exponent, zero exponents never stored.
pub type Monomial = BTreeMap<String, u32>;

/// Powers larger than this are refused when converting expressions.
const MAX_EXPONENT: u32 = 256;

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MultiPoly {
    terms: BTreeMap<Monomial, Rational>,
}

impl MultiPoly {
    pub fn zero() -> Self {
        MultiPoly::default()
    }

    pub fn one() -> Self {
        MultiPoly::constant(Rational::one())
    }

    pub fn constant(c: Rational) -> Self {
        let mut poly = MultiPoly::zero();
        poly.add_term(Monomial::new(), c);
        poly
    }

    pub fn var(name: &str) -> Self {
        let mut mono = Monomial::new();
        mono.insert(name.to_string(), 1);
        let mut poly = MultiPoly::zero();
        poly.add_term(mono, Rational::one());
        poly
    }

    pub fn from_terms(terms: impl IntoIterator<Item = (Monomial, Rational)>) -> Self {
        let mut poly = MultiPoly::zero();
        for (mono, coeff) in terms {
            poly.add_term(mono, coeff);
        }
        poly
    }

    fn add_term(&mut self, mono: Monomial, coeff: Rational) {
        if coeff.is_zero() {
            return;
        }
        match self.terms.entry(mono) {
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

    pub fn terms(&self) -> impl Iterator<Item = (&Monomial, &Rational)> + '_ {
        self.terms.iter()
    }

    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    /// The value when no variable occurs (zero for the zero polynomial).
    pub fn as_constant(&self) -> Option<Rational> {
        match self.terms.len() {
            0 => Some(Rational::zero()),
            1 => self.terms.get(&Monomial::new()).cloned(),
            _ => None,
        }
    }

    pub fn variables(&self) -> BTreeSet<String> {
        self.terms
            .keys()
            .flat_map(|mono| mono.keys().cloned())
            .collect()
    }

    pub fn contains(&self, var: &str) -> bool {
        self.terms.keys().any(|mono| mono.contains_key(var))
    }

    pub fn degree_in(&self, var: &str) -> u32 {
        self.terms
            .keys()
            .filter_map(|mono| mono.get(var).copied())
            .max()
            .unwrap_or(0)
    }

    pub fn total_degree(&self) -> u32 {
        self.terms
            .keys()
            .map(|mono| mono.values().sum::<u32>())
            .max()
            .unwrap_or(0)
    }

    pub fn scale(&self, k: &Rational) -> Self {
        MultiPoly::from_terms(self.terms.iter().map(|(m, c)| (m.clone(), c * k)))
    }

    pub fn pow(&self, exp: u32) -> Self {
        let mut result = MultiPoly::one();
        let mut base = self.clone();
        let mut n = exp;
        while n > 0 {
            if n % 2 == 1 {
                result = &result * &base;
            }
            n /= 2;
            if n > 0 {
                base = &base * &base;
            }
        }
        result
    }

    /// Scaled so the coefficient of the greatest monomial is 1.
    pub fn monic(&self) -> Self {
        match self.terms.values().next_back() {
            Some(lc) => self.scale(&lc.recip()),
            None => self.clone(),
        }
    }

    /// Positive rational content: gcd of the numerators over lcm of the denominators.
    pub fn content(&self) -> Rational {
        let mut numer = BigInt::zero();
        let mut denom = BigInt::one();
        for coeff in self.terms.values() {
            numer = numer.gcd(coeff.numer());
            denom = denom.lcm(coeff.denom());
        }
        if numer.is_zero() {
            return Rational::one();
        }
        Rational::new(numer, denom)
    }

    /// Coefficients that are negligible against `tolerance` are dropped.
    pub fn chop(&self, tolerance: &Rational) -> Self {
        MultiPoly::from_terms(
            self.terms
                .iter()
                .filter(|(_, c)| c.abs() > *tolerance)
                .map(|(m, c)| (m.clone(), c.clone())),
        )
    }

    /// View as a polynomial in `var` whose coefficients are polynomials in the rest.
    pub fn coefficients_in(&self, var: &str) -> BTreeMap<u32, MultiPoly> {
        let mut out: BTreeMap<u32, MultiPoly> = BTreeMap::new();
        for (mono, coeff) in &self.terms {
            let mut rest = mono.clone();
            let exp = rest.remove(var).unwrap_or(0);
            out.entry(exp).or_default().add_term(rest, coeff.clone());
        }
        out
    }

    /// Leading coefficient in `var` together with the degree.
    pub fn leading_in(&self, var: &str) -> (u32, MultiPoly) {
        self.coefficients_in(var)
            .into_iter()
            .next_back()
            .unwrap_or((0, MultiPoly::zero()))
    }

    /// Replace `var` with `value` everywhere.
    pub fn substitute(&self, var: &str, value: &MultiPoly) -> Self {
        if !self.contains(var) {
            return self.clone();
        }
        let mut powers: Vec<MultiPoly> = vec![MultiPoly::one()];
        let mut out = MultiPoly::zero();
        for (exp, coeff) in self.coefficients_in(var) {
            while powers.len() <= exp as usize {
                let next = powers.last().map(|p| p * value).unwrap_or_else(MultiPoly::one);
                powers.push(next);
            }
            out = out + &coeff * &powers[exp as usize];
        }
        out
    }

    pub fn substitute_value(&self, var: &str, value: &Rational) -> Self {
        self.substitute(var, &MultiPoly::constant(value.clone()))
    }

    /// Univariate form, `None` if any other variable occurs.
    pub fn to_univariate(&self, var: &str) -> Option<Poly> {
        let mut terms = Vec::with_capacity(self.terms.len());
        for (mono, coeff) in &self.terms {
            let exp = match mono.len() {
                0 => 0,
                1 => *mono.get(var)?,
                _ => return None,
            };
            terms.push((exp as usize, coeff.clone()));
        }
        Some(Poly::from_terms(terms))
    }

    /// Value with every variable bound; `None` when a variable is missing or the
    /// arithmetic leaves the reals while mixing approximations.
    pub fn evaluate(&self, env: &BTreeMap<String, Number>) -> Option<Number> {
        let mut acc = Number::rational(Rational::zero());
        for (mono, coeff) in &self.terms {
            let mut term = Number::rational(coeff.clone());
            for (name, exp) in mono {
                term = term.mul(&env.get(name)?.pow(*exp))?;
            }
            acc = acc.add(&term)?;
        }
        Some(acc)
    }

    /// Bind the variables found in `env`, leaving the rest symbolic. Coefficients of
    /// the remaining monomials are numbers.
    pub fn partial_evaluate(&self, env: &BTreeMap<String, Number>) -> Option<Vec<(Monomial, Number)>> {
        let mut grouped: BTreeMap<Monomial, Number> = BTreeMap::new();
        for (mono, coeff) in &self.terms {
            let mut value = Number::rational(coeff.clone());
            let mut rest = Monomial::new();
            for (name, exp) in mono {
                match env.get(name) {
                    Some(bound) => value = value.mul(&bound.pow(*exp))?,
                    None => {
                        rest.insert(name.clone(), *exp);
                    }
                }
            }
            let slot = grouped
                .entry(rest)
                .or_insert_with(|| Number::rational(Rational::zero()));
            *slot = slot.add(&value)?;
        }
        Some(
            grouped
                .into_iter()
                .filter(|(_, n)| n.as_rational().map_or(true, |r| !r.is_zero()))
                .collect(),
        )
    }

    /// Polynomial view of an expression: `+ - *`, division by nonzero constants,
    /// non-negative integer powers and square roots of rational squares.
    pub fn from_expr(expr: &Expr) -> Option<Self> {
        let rf = RationalFunction::from_expr(expr).ok()?;
        let den = rf.denom.as_constant()?;
        Some(rf.numer.scale(&den.recip()))
    }

    pub fn to_expr(&self) -> Expr {
        terms_to_expr(
            self.ordered_terms()
                .into_iter()
                .map(|(mono, c)| (mono, Expr::Constant(c))),
        )
    }

    /// Terms by total degree, then by the exponents in variable order, highest first.
    fn ordered_terms(&self) -> Vec<(Monomial, Rational)> {
        let mut items: Vec<(Monomial, Rational)> = self
            .terms
            .iter()
            .map(|(m, c)| (m.clone(), c.clone()))
            .collect();
        items.sort_by(|(a, _), (b, _)| monomial_order(b, a));
        items
    }
}

impl std::fmt::Display for MultiPoly {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_expr())
    }
}

/// Graded order with ties broken by the exponent of the earliest variable.
pub fn monomial_order(a: &Monomial, b: &Monomial) -> std::cmp::Ordering {
    let deg_a: u32 = a.values().sum();
    let deg_b: u32 = b.values().sum();
    deg_a.cmp(&deg_b).then_with(|| {
        let names: BTreeSet<&String> = a.keys().chain(b.keys()).collect();
        for name in names {
            let ea = a.get(name).copied().unwrap_or(0);
            let eb = b.get(name).copied().unwrap_or(0);
            if ea != eb {
                return ea.cmp(&eb);
            }
        }
        std::cmp::Ordering::Equal
    })
}

pub fn monomial_expr(mono: &Monomial) -> Option<Expr> {
    mono.iter()
        .map(|(name, exp)| {
            let base = Expr::Variable(name.clone());
            if *exp == 1 {
                base
            } else {
                Expr::Pow(base.boxed(), Expr::integer(BigInt::from(*exp)).boxed())
            }
        })
        .reduce(|acc, f| Expr::Mul(acc.boxed(), f.boxed()))
}

/// Sum of `coeff * monomial` terms in the given order. A leading negative term is
/// swapped with a positive constant so `-y + 3` reads `3 - y`.
pub fn terms_to_expr(terms: impl IntoIterator<Item = (Monomial, Expr)>) -> Expr {
    let mut exprs: Vec<(bool, Expr)> = terms
        .into_iter()
        .map(|(mono, coeff)| {
            let negative = is_negative_coeff(&coeff);
            let magnitude = if negative { coeff.negate() } else { coeff };
            let term = match monomial_expr(&mono) {
                None => magnitude,
                Some(m) if magnitude.is_one() => m,
                Some(m) => Expr::Mul(magnitude.boxed(), m.boxed()),
            };
            (negative, term)
        })
        .collect();

    if exprs.len() > 1 && exprs[0].0 {
        if let Some(pos) = exprs.iter().position(|(neg, e)| !*neg && e.as_constant().is_some()) {
            let constant = exprs.remove(pos);
            exprs.insert(0, constant);
        }
    }

    let mut iter = exprs.into_iter();
    let Some((first_neg, first)) = iter.next() else {
        return crate::expr::zero();
    };
    let head = if first_neg { first.negate() } else { first };
    iter.fold(head, |acc, (neg, term)| {
        if neg {
            Expr::Sub(acc.boxed(), term.boxed())
        } else {
            Expr::Add(acc.boxed(), term.boxed())
        }
    })
}

fn is_negative_coeff(expr: &Expr) -> bool {
    match expr {
        Expr::Constant(c) => c.is_negative(),
        Expr::Neg(_) => true,
        _ => false,
    }
}

impl std::ops::Add for MultiPoly {
    type Output = MultiPoly;
    fn add(mut self, rhs: MultiPoly) -> MultiPoly {
        for (mono, coeff) in rhs.terms {
            self.add_term(mono, coeff);
        }
        self
    }
}

impl std::ops::Sub for MultiPoly {
    type Output = MultiPoly;
    fn sub(self, rhs: MultiPoly) -> MultiPoly {
        self + (-rhs)
    }
}

impl std::ops::Neg for MultiPoly {
    type Output = MultiPoly;
    fn neg(self) -> MultiPoly {
        MultiPoly {
            terms: self.terms.into_iter().map(|(m, c)| (m, -c)).collect(),
        }
    }
}

impl std::ops::Mul for &MultiPoly {
    type Output = MultiPoly;
    fn mul(self, rhs: &MultiPoly) -> MultiPoly {
        let mut out = MultiPoly::zero();
        for (ma, ca) in &self.terms {
            for (mb, cb) in &rhs.terms {
                let mut mono = ma.clone();
                for (name, exp) in mb {
                    *mono.entry(name.clone()).or_insert(0) += exp;
                }
                out.add_term(mono, ca * cb);
            }
        }
        out
    }
}

impl std::ops::Mul for MultiPoly {
    type Output = MultiPoly;
    fn mul(self, rhs: MultiPoly) -> MultiPoly {
        &self * &rhs
    }
}

/// `numer / denom` with both sides polynomial. Denominators are never cancelled;
/// they are kept so solutions that zero them can be rejected.
/// Degree of `expr` in `var` read off the tree without expanding anything, or `None`
/// when `expr` is not a polynomial. Cancellation is not detected, so this is an upper
/// bound. Exponents above the expansion cap are accepted.
pub fn degree_bound(expr: &Expr, var: &str) -> Option<u64> {
    if expr.free_symbols().is_empty() {
        return constant_value(expr).map(|_| 0);
    }
    match expr {
        Expr::Variable(name) => Some(u64::from(name == var)),
        Expr::Add(a, b) | Expr::Sub(a, b) => Some(degree_bound(a, var)?.max(degree_bound(b, var)?)),
        Expr::Mul(a, b) => degree_bound(a, var)?.checked_add(degree_bound(b, var)?),
        Expr::Neg(a) => degree_bound(a, var),
        Expr::Div(a, b) => {
            if constant_value(b)?.is_zero() {
                return None;
            }
            degree_bound(a, var)
        }
        Expr::Pow(base, exp) => {
            let k = constant_value(exp)?;
            if !k.is_integer() || k.is_negative() {
                return None;
            }
            degree_bound(base, var)?.checked_mul(k.to_integer().to_u64()?)
        }
        _ => None,
    }
}

fn constant_value(expr: &Expr) -> Option<Rational> {
    RationalFunction::from_expr(expr).ok()?.as_constant()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RationalFunction {
    pub numer: MultiPoly,
    pub denom: MultiPoly,
}

impl RationalFunction {
    pub fn polynomial(numer: MultiPoly) -> Self {
        RationalFunction {
            numer,
            denom: MultiPoly::one(),
        }
    }

    pub fn from_expr(expr: &Expr) -> Result<Self> {
        let rf = match expr {
            Expr::Constant(c) => RationalFunction::polynomial(MultiPoly::constant(c.clone())),
            Expr::Variable(name) => RationalFunction::polynomial(MultiPoly::var(name)),
            Expr::Add(a, b) => Self::from_expr(a)?.add(Self::from_expr(b)?),
            Expr::Sub(a, b) => Self::from_expr(a)?.add(Self::from_expr(b)?.neg()),
            Expr::Neg(a) => Self::from_expr(a)?.neg(),
            Expr::Mul(a, b) => Self::from_expr(a)?.mul(Self::from_expr(b)?),
            Expr::Div(a, b) => Self::from_expr(a)?.div(Self::from_expr(b)?)?,
            Expr::Pow(base, exp) => {
                let exponent = Self::from_expr(exp)?
                    .as_constant()
                    .ok_or_else(|| CasError::Unsupported(format!("symbolic exponent in {expr}")))?;
                if !exponent.is_integer() {
                    return Err(CasError::Unsupported(format!("fractional power in {expr}")));
                }
                let k = exponent
                    .to_integer()
                    .to_i64()
                    .filter(|k| k.unsigned_abs() <= u64::from(MAX_EXPONENT))
                    .ok_or_else(|| CasError::Unsupported(format!("exponent too large in {expr}")))?;
                let base = Self::from_expr(base)?;
                let power = k.unsigned_abs() as u32;
                if k >= 0 {
                    base.pow(power)
                } else {
                    RationalFunction::polynomial(MultiPoly::one())
                        .div(base)?
                        .pow(power)
                }
            }
            Expr::Sqrt(inner) => {
                let value = Self::from_expr(inner)?
                    .as_constant()
                    .ok_or_else(|| CasError::Unsupported(format!("square root of a variable in {expr}")))?;
                let root = Surd::sqrt_of(&value);
                let exact = root
                    .as_rational()
                    .ok_or_else(|| CasError::Unsupported(format!("irrational constant {expr}")))?;
                RationalFunction::polynomial(MultiPoly::constant(exact.clone()))
            }
            Expr::Imaginary => {
                return Err(CasError::Unsupported("complex coefficients".to_string()));
            }
            other => {
                return Err(CasError::Unsupported(format!(
                    "non-polynomial function in {other}"
                )));
            }
        };
        Ok(rf.normalized())
    }

    /// Constant value, when both sides are constant.
    pub fn as_constant(&self) -> Option<Rational> {
        let n = self.numer.as_constant()?;
        let d = self.denom.as_constant()?;
        if d.is_zero() {
            None
        } else {
            Some(n / d)
        }
    }

    fn normalized(self) -> Self {
        match self.denom.as_constant() {
            Some(d) if !d.is_zero() && !d.is_one() => {
                RationalFunction::polynomial(self.numer.scale(&d.recip()))
            }
            _ => self,
        }
    }

    fn add(self, other: Self) -> Self {
        if self.denom == other.denom {
            return RationalFunction {
                numer: self.numer + other.numer,
                denom: self.denom,
            };
        }
        RationalFunction {
            numer: &self.numer * &other.denom + &other.numer * &self.denom,
            denom: &self.denom * &other.denom,
        }
        .normalized()
    }

    fn neg(self) -> Self {
        RationalFunction {
            numer: -self.numer,
            denom: self.denom,
        }
    }

    fn mul(self, other: Self) -> Self {
        RationalFunction {
            numer: &self.numer * &other.numer,
            denom: &self.denom * &other.denom,
        }
        .normalized()
    }

    fn div(self, other: Self) -> Result<Self> {
        if other.numer.is_zero() {
            return Err(CasError::DivisionByZero);
        }
        Ok(RationalFunction {
            numer: &self.numer * &other.denom,
            denom: &self.denom * &other.numer,
        }
        .normalized())
    }

    fn pow(&self, exp: u32) -> Self {
        RationalFunction {
            numer: self.numer.pow(exp),
            denom: self.denom.pow(exp),
        }
        .normalized()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::rational;
    use crate::format::pretty;
    use crate::parser::parse_expr;

    fn poly(input: &str) -> MultiPoly {
        MultiPoly::from_expr(&parse_expr(input).expect("parse")).expect("polynomial")
    }

    #[test]
    fn expansion_collects_like_terms() {
        assert_eq!(poly("(x + y)**2 - 2*x*y"), poly("x**2 + y**2"));
        assert_eq!(poly("x/2 + x/2"), poly("x"));
    }

    #[test]
    fn degrees() {
        let p = poly("x**3*y + y**2 + 1");
        assert_eq!(p.degree_in("x"), 3);
        assert_eq!(p.degree_in("y"), 2);
        assert_eq!(p.total_degree(), 4);
    }

    #[test]
    fn substitution_composes() {
        let p = poly("x**2 + y");
        let q = p.substitute("x", &poly("y - 1"));
        assert_eq!(q, poly("y**2 - y + 1"));
    }

    #[test]
    fn non_polynomials_are_rejected() {
        assert!(MultiPoly::from_expr(&parse_expr("1/x").unwrap()).is_none());
        assert!(MultiPoly::from_expr(&parse_expr("sin(x)").unwrap()).is_none());
        assert!(MultiPoly::from_expr(&parse_expr("x**(1/2)").unwrap()).is_none());
        assert_eq!(poly("sqrt(4)*x"), poly("2*x"));
    }

    #[test]
    fn rational_function_keeps_denominator() {
        let rf = RationalFunction::from_expr(&parse_expr("1/x - 2").unwrap()).unwrap();
        assert_eq!(rf.numer, poly("1 - 2*x"));
        assert_eq!(rf.denom, poly("x"));
    }

    #[test]
    fn division_by_literal_zero_is_an_error() {
        let err = RationalFunction::from_expr(&parse_expr("x/0").unwrap()).unwrap_err();
        assert_eq!(err, CasError::DivisionByZero);
    }

    #[test]
    fn rendering_puts_positive_constant_first() {
        assert_eq!(pretty(&poly("3 - y").to_expr()), "3 - y");
        assert_eq!(pretty(&poly("x**2 - 2*x + 1").to_expr()), "x**2 - 2*x + 1");
        assert_eq!(pretty(&poly("-x - y").to_expr()), "-x - y");
    }

    #[test]
    fn partial_evaluation_groups_by_remaining_monomial() {
        let p = poly("x*y + 2*y + x");
        let mut env = BTreeMap::new();
        env.insert("x".to_string(), Number::rational(rational(3, 1)));
        let grouped = p.partial_evaluate(&env).unwrap();
        assert_eq!(grouped.len(), 2);
    }

    #[test]
    fn degree_bound_reads_large_powers_without_expanding() {
        let e = parse_expr("x**300 + y*x").unwrap();
        assert_eq!(degree_bound(&e, "x"), Some(300));
        assert_eq!(degree_bound(&e, "y"), Some(1));
        assert_eq!(degree_bound(&parse_expr("(x + 1)**3/2").unwrap(), "x"), Some(3));
        assert_eq!(degree_bound(&parse_expr("x**300 + sin(x)").unwrap(), "x"), None);
        assert_eq!(degree_bound(&parse_expr("x/y").unwrap(), "x"), None);
    }
}
