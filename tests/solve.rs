use mixeq::{SolveOutcome, render_solution, solve_equations, solve_mixed_system};

fn solve(equations: &[&str]) -> Vec<String> {
    solve_mixed_system(equations)
        .expect("solvable system")
        .solutions()
        .iter()
        .map(|s| render_solution(s, 12))
        .collect()
}

#[test]
fn single_linear_equation() {
    assert_eq!(solve(&["2*x + 1 = 5"]), vec!["x = 2"]);
}

#[test]
fn quadratic_roots_are_sorted() {
    assert_eq!(solve(&["x**2 - 4 = 0"]), vec!["x = -2", "x = 2"]);
}

#[test]
fn linear_pair_has_unique_solution() {
    assert_eq!(solve(&["x + y = 3", "x - y = 1"]), vec!["x = 2, y = 1"]);
}

#[test]
fn malformed_equation_is_dropped() {
    assert_eq!(solve(&["x + y = 3", "x = = 1", "x - y = 1"]), vec!["x = 2, y = 1"]);
}

#[test]
fn underdetermined_system_is_parametrised() {
    assert_eq!(solve(&["x + y = 3"]), vec!["x = 3 - y"]);
}

#[test]
fn inconsistent_system_has_no_solution() {
    let outcome = solve_mixed_system(&["x + y = 1", "x + y = 2"]).unwrap();
    assert_eq!(outcome, SolveOutcome::NoSolution);
}

#[test]
fn identities_bind_nothing() {
    assert_eq!(solve_mixed_system(&["x = x"]).unwrap(), SolveOutcome::NoSolution);
}

#[test]
fn circle_and_diagonal() {
    assert_eq!(
        solve(&["x**2 + y**2 = 1", "x - y = 0"]),
        vec![
            "x = -sqrt(2)/2, y = -sqrt(2)/2",
            "x = sqrt(2)/2, y = sqrt(2)/2",
        ]
    );
}

#[test]
fn circle_and_hyperbola_stay_exact() {
    assert_eq!(
        solve(&["x**2 + y**2 = 1", "x**2 - y**2 = 0"]),
        vec![
            "x = -sqrt(2)/2, y = -sqrt(2)/2",
            "x = -sqrt(2)/2, y = sqrt(2)/2",
            "x = sqrt(2)/2, y = -sqrt(2)/2",
            "x = sqrt(2)/2, y = sqrt(2)/2",
        ]
    );
}

#[test]
fn complex_roots_use_i() {
    assert_eq!(solve(&["x**2 + 1 = 0"]), vec!["x = -I", "x = I"]);
    assert_eq!(
        solve(&["x**2 + x + 1 = 0"]),
        vec!["x = -1/2 - sqrt(3)*I/2", "x = -1/2 + sqrt(3)*I/2"]
    );
}

#[test]
fn reciprocal_equation() {
    assert_eq!(solve(&["1/x = 2"]), vec!["x = 1/2"]);
}

#[test]
fn roots_that_zero_a_denominator_are_discarded() {
    assert_eq!(solve(&["(x**2 - 1)/(x - 1) = 0"]), vec!["x = -1"]);
}

#[test]
fn irreducible_cubic_gives_a_decimal() {
    assert_eq!(solve(&["x**3 - 2 = 0"]), vec!["x = 1.259921049895"]);
}

#[test]
fn rational_cubic_roots() {
    assert_eq!(
        solve(&["x**3 - 6*x**2 + 11*x - 6 = 0"]),
        vec!["x = 1", "x = 2", "x = 3"]
    );
}

#[test]
fn back_substitution_through_a_quadratic() {
    assert_eq!(
        solve(&["y = x**2", "x + y = 2"]),
        vec!["x = -2, y = 4", "x = 1, y = 1"]
    );
}

#[test]
fn derived_products_of_surds_stay_exact() {
    assert_eq!(
        solve(&["x**2 = 2", "y**2 = 3", "z = x*y"]),
        vec![
            "x = -sqrt(2), y = -sqrt(3), z = sqrt(6)",
            "x = -sqrt(2), y = sqrt(3), z = -sqrt(6)",
            "x = sqrt(2), y = -sqrt(3), z = -sqrt(6)",
            "x = sqrt(2), y = sqrt(3), z = sqrt(6)",
        ]
    );
}

#[test]
fn product_splits_into_branches() {
    assert_eq!(solve(&["x*y = 0"]), vec!["x = 0", "y = 0"]);
}

#[test]
fn circle_alone_is_solved_symbolically() {
    assert_eq!(
        solve(&["x**2 + y**2 = 1"]),
        vec!["x = -sqrt(1 - y**2)", "x = sqrt(1 - y**2)"]
    );
}

#[test]
fn transcendental_system_is_an_error_at_the_boundary() {
    assert!(solve_mixed_system(&["sin(x) = 0"]).is_err());
    assert_eq!(solve_equations(&["sin(x) = 0"]), SolveOutcome::NoSolution);
}

#[test]
fn empty_input_has_no_solution() {
    let none: [&str; 0] = [];
    assert_eq!(solve_equations(&none), SolveOutcome::NoSolution);
}
