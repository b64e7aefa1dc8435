//! Exact Gauss-Jordan elimination for systems whose equations are all of degree one.

use std::collections::BTreeMap;

use log::debug;
use num_traits::{One, Signed, Zero};

use crate::expr::Rational;
use crate::multipoly::{Monomial, MultiPoly};

#[derive(Debug, Clone)]
pub enum LinearResult {
    /// Every variable is pinned to a rational.
    Unique(BTreeMap<String, Rational>),
    /// Pivot variables expressed through the free ones.
    Infinite(BTreeMap<String, MultiPoly>),
    Inconsistent,
}

#[derive(Debug, Clone, Default)]
pub struct LinearDiagnostics {
    pub rank: usize,
    pub pivot_rows: Vec<usize>,
    pub pivot_columns: Vec<usize>,
    pub free_columns: Vec<usize>,
    pub determinant: Option<Rational>,
    pub inconsistent_row: Option<usize>,
}

/// True when every polynomial has total degree at most one.
pub fn is_linear_system(polys: &[MultiPoly]) -> bool {
    polys.iter().all(|p| p.total_degree() <= 1)
}

/// Solve `polys[i] = 0` over `variables`. Callers check [`is_linear_system`] first;
/// terms of higher degree are ignored here.
pub fn solve_linear(variables: &[String], polys: &[MultiPoly]) -> (LinearResult, LinearDiagnostics) {
    let mut matrix = build_augmented(variables, polys);
    let mut diagnostics = LinearDiagnostics {
        determinant: (matrix.rows == variables.len()).then(Rational::one),
        ..LinearDiagnostics::default()
    };

    rref(&mut matrix, variables.len(), &mut diagnostics);
    diagnostics.free_columns = free_columns(variables.len(), &diagnostics.pivot_columns);
    debug!(
        "linear system: rank {} of {}, pivots {:?}, free {:?}, determinant {:?}",
        diagnostics.rank,
        variables.len(),
        diagnostics.pivot_columns,
        diagnostics.free_columns,
        diagnostics.determinant.as_ref().map(ToString::to_string),
    );

    if let Some(row) = diagnostics.inconsistent_row {
        debug!("linear system inconsistent at row {row}");
        return (LinearResult::Inconsistent, diagnostics);
    }

    let n = variables.len();
    if diagnostics.rank == n {
        let values = diagnostics
            .pivot_rows
            .iter()
            .zip(&diagnostics.pivot_columns)
            .map(|(&row, &col)| (variables[col].clone(), matrix.get(row, n).clone()))
            .collect();
        return (LinearResult::Unique(values), diagnostics);
    }

    let mut family = BTreeMap::new();
    for (&row, &col) in diagnostics.pivot_rows.iter().zip(&diagnostics.pivot_columns) {
        let mut value = MultiPoly::constant(matrix.get(row, n).clone());
        for &free in &diagnostics.free_columns {
            let coeff = matrix.get(row, free);
            if !coeff.is_zero() {
                value = value - MultiPoly::var(&variables[free]).scale(coeff);
            }
        }
        family.insert(variables[col].clone(), value);
    }
    (LinearResult::Infinite(family), diagnostics)
}

fn build_augmented(variables: &[String], polys: &[MultiPoly]) -> Matrix {
    let cols = variables.len() + 1;
    let mut data = vec![Rational::zero(); polys.len() * cols];
    for (row, poly) in polys.iter().enumerate() {
        for (mono, coeff) in poly.terms() {
            let col = match single_variable(mono) {
                Some(name) => match variables.iter().position(|v| v == name) {
                    Some(col) => col,
                    None => continue,
                },
                None if mono.is_empty() => {
                    data[row * cols + cols - 1] = -coeff.clone();
                    continue;
                }
                None => continue,
            };
            data[row * cols + col] = coeff.clone();
        }
    }
    Matrix {
        rows: polys.len(),
        cols,
        data,
    }
}

fn single_variable(mono: &Monomial) -> Option<&String> {
    match mono.iter().next() {
        Some((name, 1)) if mono.len() == 1 => Some(name),
        _ => None,
    }
}

fn rref(matrix: &mut Matrix, n_vars: usize, diag: &mut LinearDiagnostics) {
    let rows = matrix.rows;
    if rows == 0 {
        diag.rank = 0;
        return;
    }
    let cols = matrix.cols;
    let mut row = 0;
    for col in 0..n_vars {
        if row >= rows {
            break;
        }

        let mut pivot_row = None;
        let mut pivot_abs = Rational::zero();
        for r in row..rows {
            let value = matrix.get(r, col);
            if !value.is_zero() && value.abs() > pivot_abs {
                pivot_abs = value.abs();
                pivot_row = Some(r);
            }
        }

        let Some(pivot_idx) = pivot_row else {
            continue;
        };

        if pivot_idx != row {
            matrix.swap_rows(row, pivot_idx);
            if let Some(det) = diag.determinant.as_mut() {
                *det = -det.clone();
            }
        }

        let pivot_value = matrix.get(row, col).clone();
        if let Some(det) = diag.determinant.as_mut() {
            *det *= &pivot_value;
        }

        for c in col..cols {
            *matrix.get_mut(row, c) /= &pivot_value;
        }

        let row_start = row * cols;
        let (before, rest) = matrix.data.split_at_mut(row_start);
        let (pivot_slice, after) = rest.split_at_mut(cols);
        let pivot_ref: &[Rational] = pivot_slice;

        for other in before.chunks_exact_mut(cols).chain(after.chunks_exact_mut(cols)) {
            let factor = other[col].clone();
            if factor.is_zero() {
                continue;
            }
            for c in col..cols {
                other[c] -= &factor * &pivot_ref[c];
            }
        }

        diag.pivot_rows.push(row);
        diag.pivot_columns.push(col);
        row += 1;
    }

    diag.rank = diag.pivot_columns.len();
    if diag.rank < n_vars {
        if let Some(det) = diag.determinant.as_mut() {
            *det = Rational::zero();
        }
    }

    for r in row..rows {
        let row_slice = matrix.row(r);
        if row_slice[..n_vars].iter().all(Zero::is_zero) && !row_slice[n_vars].is_zero() {
            diag.inconsistent_row = Some(r);
            break;
        }
    }
}

fn free_columns(n_vars: usize, pivots: &[usize]) -> Vec<usize> {
    (0..n_vars).filter(|c| !pivots.contains(c)).collect()
}

struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<Rational>,
}

impl Matrix {
    fn idx(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    fn get(&self, row: usize, col: usize) -> &Rational {
        &self.data[self.idx(row, col)]
    }

    fn get_mut(&mut self, row: usize, col: usize) -> &mut Rational {
        let idx = self.idx(row, col);
        &mut self.data[idx]
    }

    fn swap_rows(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        let cols = self.cols;
        for offset in 0..cols {
            self.data.swap(a * cols + offset, b * cols + offset);
        }
    }

    fn row(&self, row: usize) -> &[Rational] {
        let start = self.idx(row, 0);
        &self.data[start..start + self.cols]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::rational;
    use crate::parser::parse_expr;

    fn poly(input: &str) -> MultiPoly {
        MultiPoly::from_expr(&parse_expr(input).unwrap()).unwrap()
    }

    fn vars(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn unique_solution_with_determinant() {
        let (result, diag) = solve_linear(&vars(&["x", "y"]), &[poly("x + y - 3"), poly("x - y - 1")]);
        let LinearResult::Unique(values) = result else {
            panic!("expected a unique solution");
        };
        assert_eq!(values["x"], rational(2, 1));
        assert_eq!(values["y"], rational(1, 1));
        assert_eq!(diag.rank, 2);
        assert_eq!(diag.determinant, Some(rational(-2, 1)));
    }

    #[test]
    fn underdetermined_system_is_parametrised_by_free_columns() {
        let (result, diag) = solve_linear(&vars(&["x", "y"]), &[poly("x + y - 3")]);
        let LinearResult::Infinite(family) = result else {
            panic!("expected a family");
        };
        assert_eq!(family["x"], poly("3 - y"));
        assert_eq!(diag.free_columns, vec![1]);
    }

    #[test]
    fn contradictory_rows_are_reported() {
        let (result, diag) = solve_linear(&vars(&["x", "y"]), &[poly("x + y - 1"), poly("x + y - 2")]);
        assert!(matches!(result, LinearResult::Inconsistent));
        assert_eq!(diag.inconsistent_row, Some(1));
    }
}
