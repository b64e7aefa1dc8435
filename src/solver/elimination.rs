//! Recursive elimination for polynomial systems over Q.
//!
//! Each call works on one branch, a list of polynomials that must all vanish, and
//! tries the following in order:
//!
//! 1. drop zero polynomials and fail the branch on a nonzero constant;
//! 2. substitute away a variable that occurs linearly with a constant coefficient;
//! 3. enumerate the roots of the univariate polynomials in one variable;
//! 4. replace two polynomials sharing a variable by one pseudo-remainder free of it;
//! 5. solve a variable of degree one or two symbolically in the others.
//!
//! Irrational roots that still have to be substituted turn the branch approximate.
//! Approximate values found under such a root are snapped back to exact roots of
//! their own eliminant when one lies close enough.

use std::collections::{BTreeMap, BTreeSet};

use log::{debug, trace};
use num_bigint::BigInt;
use num_traits::{One, Signed, Zero};

use crate::error::{CasError, Result};
use crate::expr::{Expr, Rational};
use crate::multipoly::{Monomial, MultiPoly, terms_to_expr};
use crate::number::{Number, Surd};
use crate::polynomial::Poly;
use crate::roots::solve_univariate;
use crate::simplify::{simplify, substitute_all};

use super::{Solution, Value};

/// Recursion depth at which a branch is declared runaway.
const MAX_DEPTH: usize = 48;

/// Polynomials of higher total degree are not produced by elimination.
const MAX_DEGREE: u32 = 64;

/// Coefficients below `10^-CHOP_DIGITS` are dropped in approximate branches.
const CHOP_DIGITS: usize = 20;

/// Approximate values within `10^-SNAP_DIGITS` of an exact root are replaced by it.
const SNAP_DIGITS: usize = 12;

/// Decimal places kept when an approximation has to appear inside an expression.
const SYMBOLIC_DIGITS: usize = 15;

/// How a variable's value is recovered once the rest of its branch is solved.
#[derive(Debug, Clone)]
enum Formula {
    Root(Number),
    /// `v = p`
    Polynomial(MultiPoly),
    /// `v = numer / denom`
    Quotient(MultiPoly, MultiPoly),
    /// `v = (-b ± sqrt(b^2 - 4ac)) / 2a`, `plus` choosing the sign.
    Quadratic {
        a: MultiPoly,
        b: MultiPoly,
        c: MultiPoly,
        plus: bool,
    },
}

/// Solve `polys[i] = 0` for every `i`. Solutions may bind only some variables;
/// the others are free.
pub fn solve_polynomials(polys: &[MultiPoly]) -> Result<Vec<Solution>> {
    Branch {
        exact: true,
        depth: 0,
    }
    .solve(polys.to_vec())
}

#[derive(Debug, Clone, Copy)]
struct Branch {
    exact: bool,
    depth: usize,
}

impl Branch {
    fn child(self, exact: bool) -> Branch {
        Branch {
            exact: self.exact && exact,
            depth: self.depth + 1,
        }
    }

    fn solve(self, polys: Vec<MultiPoly>) -> Result<Vec<Solution>> {
        if self.depth > MAX_DEPTH {
            return Err(CasError::Unsupported(
                "elimination did not terminate".to_string(),
            ));
        }

        let Some(system) = self.normalise(polys) else {
            return Ok(Vec::new());
        };
        if system.is_empty() {
            return Ok(vec![Solution::new()]);
        }
        trace!(
            "branch at depth {} ({}): {}",
            self.depth,
            if self.exact { "exact" } else { "approximate" },
            system.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
        );

        if let Some((idx, var, value)) = linear_substitution(&system) {
            return self.substitute_linear(system, idx, var, value);
        }
        if let Some((var, indices)) = univariate_group(&system) {
            return self.enumerate_roots(system, var, indices);
        }
        if let Some((var, i, j)) = shared_variable(&system) {
            return self.eliminate_pair(system, var, i, j);
        }
        if let Some((idx, var)) = isolated_variable(&system) {
            return self.solve_symbolically(system, idx, var);
        }
        Err(CasError::Unsupported(format!(
            "cannot solve {}",
            system.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
        )))
    }

    /// Drop zeros and duplicates; `None` when a nonzero constant makes the branch
    /// inconsistent.
    fn normalise(self, polys: Vec<MultiPoly>) -> Option<Vec<MultiPoly>> {
        let tolerance = power_of_ten(CHOP_DIGITS);
        let mut system: Vec<MultiPoly> = Vec::with_capacity(polys.len());
        for poly in polys {
            let poly = if self.exact { poly } else { poly.chop(&tolerance) };
            if poly.is_zero() {
                continue;
            }
            if poly.variables().is_empty() {
                debug!("inconsistent branch: {poly} = 0");
                return None;
            }
            let key = poly.monic();
            if !system.iter().any(|q| q.monic() == key) {
                system.push(poly);
            }
        }
        Some(system)
    }

    fn substitute_linear(
        self,
        mut system: Vec<MultiPoly>,
        idx: usize,
        var: String,
        value: MultiPoly,
    ) -> Result<Vec<Solution>> {
        debug!("substituting {var} = {value}");
        system.remove(idx);
        let rest = system.iter().map(|p| p.substitute(&var, &value)).collect();
        let formula = Formula::Polynomial(value);
        Ok(self
            .child(true)
            .solve(rest)?
            .into_iter()
            .filter_map(|s| bind(s, &var, &formula))
            .collect())
    }

    fn enumerate_roots(
        self,
        system: Vec<MultiPoly>,
        var: String,
        indices: Vec<usize>,
    ) -> Result<Vec<Solution>> {
        let group: Vec<Poly> = indices
            .iter()
            .filter_map(|&i| system[i].to_univariate(&var))
            .collect();
        let rest: Vec<MultiPoly> = system
            .iter()
            .enumerate()
            .filter(|(i, _)| !indices.contains(i))
            .map(|(_, p)| p.clone())
            .collect();

        let roots = self.common_roots(&group)?;
        debug!("{var}: {} root(s)", roots.len());

        let mut out = Vec::new();
        for root in roots {
            let needs_substitution = rest.iter().any(|p| p.contains(&var));
            let (substituted, exact) = match root.as_rational() {
                Some(r) => (substitute_all_rational(&rest, &var, r), true),
                None if !needs_substitution => (rest.clone(), true),
                None => match root.approximate() {
                    Some(approx) => (substitute_all_rational(&rest, &var, &approx), false),
                    None => {
                        debug!("complex root of {var} cannot be propagated; branch dropped");
                        continue;
                    }
                },
            };
            let mut branch = self.child(exact).solve(substituted)?;
            if self.exact && !exact {
                snap_to_exact(&mut branch, &system);
            }
            let formula = Formula::Root(root);
            out.extend(branch.into_iter().filter_map(|s| bind(s, &var, &formula)));
        }
        Ok(out)
    }

    /// Roots shared by every polynomial of `group`.
    fn common_roots(self, group: &[Poly]) -> Result<Vec<Number>> {
        let Some(first) = group.iter().min_by_key(|p| p.degree().unwrap_or(0)) else {
            return Ok(Vec::new());
        };
        if self.exact {
            let gcd = group.iter().fold(first.clone(), |acc, p| Poly::gcd(&acc, p));
            check_degree(gcd.degree().unwrap_or(0))?;
            return Ok(solve_univariate(&gcd, true));
        }
        check_degree(first.degree().unwrap_or(0))?;
        let tolerance = power_of_ten(super::VERIFY_DIGITS);
        Ok(solve_univariate(first, false)
            .into_iter()
            .filter(|root| {
                let Some(x) = root.approximate() else {
                    return false;
                };
                group.iter().all(|p| p.evaluate(&x).abs() <= tolerance)
            })
            .collect())
    }

    fn eliminate_pair(
        self,
        mut system: Vec<MultiPoly>,
        var: String,
        i: usize,
        j: usize,
    ) -> Result<Vec<Solution>> {
        let (keep, replace) = if system[i].degree_in(&var) <= system[j].degree_in(&var) {
            (i, j)
        } else {
            (j, i)
        };
        match eliminate(&system[keep], &system[replace], &var)? {
            Elimination::Resultant(res) => {
                debug!("eliminated {var}: {res}");
                system[replace] = res;
            }
            Elimination::Common(factor) => {
                debug!("common factor in {var}: {factor}");
                system[keep] = factor;
                system.remove(replace);
            }
        }
        self.child(true).solve(system)
    }

    fn solve_symbolically(
        self,
        mut system: Vec<MultiPoly>,
        idx: usize,
        var: String,
    ) -> Result<Vec<Solution>> {
        let poly = system.remove(idx);
        let coeffs = poly.coefficients_in(&var);
        let coeff = |k: u32| coeffs.get(&k).cloned().unwrap_or_default();
        let x = MultiPoly::var(&var);
        let degree = poly.degree_in(&var);
        debug!("solving {poly} = 0 for {var} (degree {degree})");

        let (formulas, leading) = if degree == 1 {
            (vec![Formula::Quotient(-coeff(0), coeff(1))], coeff(1))
        } else {
            let quadratic = |plus| Formula::Quadratic {
                a: coeff(2),
                b: coeff(1),
                c: coeff(0),
                plus,
            };
            (vec![quadratic(false), quadratic(true)], coeff(2))
        };

        let mut out = Vec::new();
        for s in self.child(true).solve(system.clone())? {
            for formula in &formulas {
                out.extend(bind(s.clone(), &var, formula));
            }
        }

        // The formulas divide by the leading coefficient; its zeros form their own
        // branch with the rest of the polynomial.
        if leading.as_constant().is_none() {
            let mut degenerate = system;
            degenerate.push(leading);
            let lower = coeffs
                .iter()
                .filter(|(k, _)| **k < degree)
                .fold(MultiPoly::zero(), |acc, (k, c)| acc + c * &x.pow(*k));
            degenerate.push(lower);
            out.extend(self.child(true).solve(degenerate)?);
        }
        Ok(out)
    }
}

/// Step 2: `(index, var, value)` with `var = value` solving `system[index] = 0`.
fn linear_substitution(system: &[MultiPoly]) -> Option<(usize, String, MultiPoly)> {
    for var in all_variables(system) {
        for (idx, poly) in system.iter().enumerate() {
            if poly.degree_in(&var) != 1 {
                continue;
            }
            let coeffs = poly.coefficients_in(&var);
            let Some(lead) = coeffs.get(&1).and_then(MultiPoly::as_constant) else {
                continue;
            };
            let rest = coeffs.get(&0).cloned().unwrap_or_default();
            return Some((idx, var, rest.scale(&-lead.recip())));
        }
    }
    None
}

/// Step 3: the first variable, in order, owning univariate polynomials.
fn univariate_group(system: &[MultiPoly]) -> Option<(String, Vec<usize>)> {
    all_variables(system).into_iter().find_map(|var| {
        let indices: Vec<usize> = system
            .iter()
            .enumerate()
            .filter(|(_, p)| {
                let vars = p.variables();
                vars.len() == 1 && vars.contains(&var)
            })
            .map(|(i, _)| i)
            .collect();
        (!indices.is_empty()).then_some((var, indices))
    })
}

/// Step 4: a variable found in two polynomials, preferring low degree, and the two
/// polynomials of lowest degree in it.
fn shared_variable(system: &[MultiPoly]) -> Option<(String, usize, usize)> {
    let mut best: Option<(u32, String, usize, usize)> = None;
    for var in all_variables(system) {
        let mut holders: Vec<(u32, usize)> = system
            .iter()
            .enumerate()
            .filter(|(_, p)| p.contains(&var))
            .map(|(i, p)| (p.degree_in(&var), i))
            .collect();
        if holders.len() < 2 {
            continue;
        }
        holders.sort();
        let cost = holders[1].0;
        if best.as_ref().map_or(true, |(c, ..)| cost < *c) {
            best = Some((cost, var, holders[0].1, holders[1].1));
        }
    }
    best.map(|(_, var, i, j)| (var, i, j))
}

/// Step 5: a polynomial and a variable of degree one, or failing that two.
fn isolated_variable(system: &[MultiPoly]) -> Option<(usize, String)> {
    for wanted in [1, 2] {
        for var in all_variables(system) {
            if let Some(idx) = system.iter().position(|p| p.degree_in(&var) == wanted) {
                return Some((idx, var));
            }
        }
    }
    None
}

fn all_variables(system: &[MultiPoly]) -> BTreeSet<String> {
    system.iter().flat_map(MultiPoly::variables).collect()
}

enum Elimination {
    /// A polynomial free of the variable.
    Resultant(MultiPoly),
    /// The remainder sequence ended in zero; this is its last nonzero member.
    Common(MultiPoly),
}

/// Pseudo-remainder sequence of `p` and `q` in `var`.
fn eliminate(p: &MultiPoly, q: &MultiPoly, var: &str) -> Result<Elimination> {
    let (mut a, mut b) = if p.degree_in(var) >= q.degree_in(var) {
        (p.clone(), q.clone())
    } else {
        (q.clone(), p.clone())
    };
    while b.contains(var) {
        let r = pseudo_remainder(&a, &b, var).monic();
        check_degree(r.total_degree() as usize)?;
        a = b;
        b = r;
    }
    if b.is_zero() {
        Ok(Elimination::Common(a))
    } else {
        Ok(Elimination::Resultant(b))
    }
}

/// `lc(b)^k * a mod b` in `var`; `b` must contain `var`.
fn pseudo_remainder(a: &MultiPoly, b: &MultiPoly, var: &str) -> MultiPoly {
    let (db, lb) = b.leading_in(var);
    let mut r = a.clone();
    loop {
        let (dr, lr) = r.leading_in(var);
        if r.is_zero() || dr < db || !r.contains(var) {
            return r;
        }
        let shift = MultiPoly::var(var).pow(dr - db);
        r = &lb * &r - &(&lr * &shift) * b;
    }
}

fn check_degree(degree: usize) -> Result<()> {
    if degree > MAX_DEGREE as usize {
        return Err(CasError::Unsupported(format!(
            "elimination produced degree {degree}"
        )));
    }
    Ok(())
}

fn substitute_all_rational(polys: &[MultiPoly], var: &str, value: &Rational) -> Vec<MultiPoly> {
    polys.iter().map(|p| p.substitute_value(var, value)).collect()
}

fn power_of_ten(digits: usize) -> Rational {
    Rational::new(BigInt::one(), num_traits::pow(BigInt::from(10), digits))
}

/// Replace approximations by exact roots of the matching eliminant. `system` is the
/// exact system the approximate branch was derived from.
fn snap_to_exact(branch: &mut [Solution], system: &[MultiPoly]) {
    let tolerance = power_of_ten(SNAP_DIGITS);
    let mut cache: BTreeMap<String, Vec<Number>> = BTreeMap::new();
    for solution in branch.iter_mut() {
        for (name, value) in solution.iter_mut() {
            let Value::Number(number @ Number::Approx(_)) = value else {
                continue;
            };
            let Some(approx) = number.approximate() else {
                continue;
            };
            let candidates = cache
                .entry(name.clone())
                .or_insert_with(|| exact_eliminant_roots(system, name));
            if let Some(exact) = candidates.iter().find(|c| {
                c.approximate()
                    .map_or(false, |x| (x - &approx).abs() <= tolerance)
            }) {
                trace!("{name} recognised as {}", exact.to_expr(SNAP_DIGITS));
                *number = exact.clone();
            }
        }
    }
}

/// Exact roots of a univariate polynomial in `var` implied by `system`.
fn exact_eliminant_roots(system: &[MultiPoly], var: &str) -> Vec<Number> {
    let Some(eliminant) = univariate_eliminant(system, var) else {
        return Vec::new();
    };
    solve_univariate(&eliminant, true)
        .into_iter()
        .filter(Number::is_exact)
        .collect()
}

fn univariate_eliminant(system: &[MultiPoly], var: &str) -> Option<Poly> {
    let mut polys = system.to_vec();
    for _ in 0..MAX_DEPTH {
        let single: BTreeSet<String> = [var.to_string()].into_iter().collect();
        if let Some(found) = polys
            .iter()
            .filter(|p| p.variables() == single)
            .filter_map(|p| p.to_univariate(var))
            .reduce(|acc, p| Poly::gcd(&acc, &p))
        {
            return (found.degree().unwrap_or(0) > 0).then_some(found);
        }
        let other = all_variables(&polys)
            .into_iter()
            .filter(|v| v != var)
            .find(|v| polys.iter().filter(|p| p.contains(v)).count() >= 2)?;
        let holders: Vec<usize> = polys
            .iter()
            .enumerate()
            .filter(|(_, p)| p.contains(&other))
            .map(|(i, _)| i)
            .take(2)
            .collect();
        match eliminate(&polys[holders[0]], &polys[holders[1]], &other).ok()? {
            Elimination::Resultant(res) => polys[holders[1]] = res,
            Elimination::Common(_) => return None,
        }
        polys.retain(|p| !p.is_zero());
    }
    None
}

/// Add `var`'s value to a solution of the rest of the branch. `None` drops the
/// solution, e.g. when the formula divides by zero there.
fn bind(mut solution: Solution, var: &str, formula: &Formula) -> Option<Solution> {
    let value = resolve(formula, &solution)?;
    solution.insert(var.to_string(), value);
    Some(solution)
}

fn resolve(formula: &Formula, solution: &Solution) -> Option<Value> {
    if let Formula::Root(n) = formula {
        return Some(Value::Number(n.clone()));
    }
    let env: BTreeMap<String, Number> = solution
        .iter()
        .filter_map(|(k, v)| v.as_number().map(|n| (k.clone(), n.clone())))
        .collect();
    let polys: Vec<&MultiPoly> = match formula {
        Formula::Root(_) => Vec::new(),
        Formula::Polynomial(p) => vec![p],
        Formula::Quotient(n, d) => vec![n, d],
        Formula::Quadratic { a, b, c, .. } => vec![a, b, c],
    };
    let numeric = polys
        .iter()
        .all(|p| p.variables().iter().all(|v| env.contains_key(v)));
    if numeric {
        return resolve_numeric(formula, &env).map(Value::Number);
    }
    resolve_symbolic(formula, solution, &env)
}

fn resolve_numeric(formula: &Formula, env: &BTreeMap<String, Number>) -> Option<Number> {
    match formula {
        Formula::Root(n) => Some(n.clone()),
        Formula::Polynomial(p) => p.evaluate(env),
        Formula::Quotient(n, d) => n.evaluate(env)?.mul(&d.evaluate(env)?.inv()?),
        Formula::Quadratic { a, b, c, plus } => {
            let (a, b, c) = (a.evaluate(env)?, b.evaluate(env)?, c.evaluate(env)?);
            if a.as_rational().map_or(false, Zero::is_zero) {
                // Degenerates to b*v + c = 0; one sign carries it.
                return if *plus { c.neg().mul(&b.inv()?) } else { None };
            }
            let four = Number::rational(Rational::from_integer(BigInt::from(4)));
            let disc = b.mul(&b)?.sub(&four.mul(&a)?.mul(&c)?)?;
            let root = disc.sqrt()?;
            let signed = if *plus { root } else { root.neg() };
            let two_a = a.add(&a)?;
            b.neg().add(&signed)?.mul(&two_a.inv()?)
        }
    }
}

fn resolve_symbolic(
    formula: &Formula,
    solution: &Solution,
    env: &BTreeMap<String, Number>,
) -> Option<Value> {
    let expr = match formula {
        Formula::Root(n) => n.to_expr(SYMBOLIC_DIGITS),
        Formula::Polynomial(p) => partial_expr(p, env)?,
        Formula::Quotient(n, d) => {
            if d.evaluate(env).map_or(false, |v| v.is_negligible(&Rational::zero())) {
                return None;
            }
            Expr::Div(partial_expr(n, env)?.boxed(), partial_expr(d, env)?.boxed())
        }
        Formula::Quadratic { a, b, c, plus } => quadratic_expr(a, b, c, *plus),
    };
    let symbolic: BTreeMap<String, Expr> = solution
        .iter()
        .map(|(k, v)| (k.clone(), v.to_expr(SYMBOLIC_DIGITS)))
        .collect();
    Some(Value::from_expr(simplify(substitute_all(&expr, &symbolic))))
}

/// `p` with its numeric variables bound.
fn partial_expr(p: &MultiPoly, env: &BTreeMap<String, Number>) -> Option<Expr> {
    let grouped: Vec<(Monomial, Number)> = p.partial_evaluate(env)?;
    Some(terms_to_expr(
        grouped
            .into_iter()
            .map(|(mono, n)| (mono, n.to_expr(SYMBOLIC_DIGITS))),
    ))
}

/// The quadratic formula with the rational content of the discriminant pulled out
/// of the radical: `x**2 + y**2 - 1` gives `±sqrt(1 - y**2)`.
fn quadratic_expr(a: &MultiPoly, b: &MultiPoly, c: &MultiPoly, plus: bool) -> Expr {
    let four = Rational::from_integer(BigInt::from(4));
    let disc = b * b - (a * c).scale(&four);
    let content = disc.content();
    let reduced = disc.scale(&content.recip());
    let root_content = Surd::sqrt_of(&content);
    let two = Rational::from_integer(BigInt::from(2));

    let (shift, radical) = match a.as_constant() {
        Some(a) if !a.is_zero() => {
            let half_inv = (&a * &two).recip();
            let scale = root_content.mul(&Surd::from_rational(half_inv.clone()));
            let shift = (-b.clone()).scale(&half_inv).to_expr();
            let radical = match scale {
                Some(s) => Expr::Mul(s.to_expr().boxed(), sqrt_poly(&reduced).boxed()),
                None => Expr::Div(sqrt_poly(&disc).boxed(), Expr::Constant(&a * &two).boxed()),
            };
            (shift, radical)
        }
        _ => {
            let two_a = a.scale(&two).to_expr();
            let shift = Expr::Div((-b.clone()).to_expr().boxed(), two_a.clone().boxed());
            let radical = Expr::Div(
                Expr::Mul(root_content.to_expr().boxed(), sqrt_poly(&reduced).boxed()).boxed(),
                two_a.boxed(),
            );
            (shift, radical)
        }
    };
    let value = if plus {
        Expr::Add(shift.boxed(), radical.boxed())
    } else {
        Expr::Sub(shift.boxed(), radical.boxed())
    };
    simplify(value)
}

fn sqrt_poly(p: &MultiPoly) -> Expr {
    match p.as_constant() {
        Some(c) => Surd::sqrt_of(&c).to_expr(),
        None => Expr::Sqrt(p.to_expr().boxed()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::{pretty, render_solution};
    use crate::parser::parse_expr;

    fn poly(input: &str) -> MultiPoly {
        MultiPoly::from_expr(&parse_expr(input).unwrap()).unwrap()
    }

    fn rendered(polys: &[&str]) -> Vec<String> {
        let polys: Vec<MultiPoly> = polys.iter().map(|p| poly(p)).collect();
        let mut out: Vec<String> = solve_polynomials(&polys)
            .unwrap()
            .iter()
            .map(|s| render_solution(s, 12))
            .collect();
        out.sort();
        out
    }

    #[test]
    fn pseudo_remainder_eliminates_the_variable() {
        let r = pseudo_remainder(&poly("x**2 + y**2 - 1"), &poly("x**2 - y**2"), "x");
        assert_eq!(r, poly("2*y**2 - 1"));
    }

    #[test]
    fn circle_meets_diagonal_exactly() {
        assert_eq!(
            rendered(&["x**2 + y**2 - 1", "x**2 - y**2"]),
            vec![
                "x = -sqrt(2)/2, y = -sqrt(2)/2",
                "x = -sqrt(2)/2, y = sqrt(2)/2",
                "x = sqrt(2)/2, y = -sqrt(2)/2",
                "x = sqrt(2)/2, y = sqrt(2)/2",
            ]
        );
    }

    #[test]
    fn product_equal_zero_splits_into_branches() {
        assert_eq!(rendered(&["x*y"]), vec!["x = 0", "y = 0"]);
    }

    #[test]
    fn linear_in_one_variable_gives_a_quotient() {
        assert_eq!(rendered(&["x**2*y + x - 1"]), vec!["y = (1 - x)/x**2"]);
    }

    #[test]
    fn circle_alone_is_solved_for_the_first_variable() {
        assert_eq!(
            rendered(&["x**2 + y**2 - 1"]),
            vec!["x = -sqrt(1 - y**2)", "x = sqrt(1 - y**2)"]
        );
    }

    #[test]
    fn inconsistent_branch_yields_nothing() {
        assert!(rendered(&["x**2 - 1", "x - 2"]).is_empty());
    }

    #[test]
    fn quadratic_formula_pulls_squares_out_of_the_radical() {
        let e = quadratic_expr(&poly("1"), &poly("0"), &poly("y**2 - 1"), true);
        assert_eq!(pretty(&e), "sqrt(1 - y**2)");
    }
}
