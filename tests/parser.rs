use mixeq::{CasError, Expr, parse_expr, pretty};

fn round(input: &str) -> String {
    pretty(&parse_expr(input).expect("parse"))
}

#[test]
fn python_style_input_round_trips() {
    assert_eq!(round("x**2 + y**2"), "x**2 + y**2");
    assert_eq!(round("2*x + 1"), "2*x + 1");
    assert_eq!(round("(x + 1)/(x - 1)"), "(x + 1)/(x - 1)");
}

#[test]
fn caret_is_a_power() {
    assert_eq!(parse_expr("x^3").unwrap(), parse_expr("x**3").unwrap());
}

#[test]
fn unary_minus_binds_looser_than_power() {
    assert_eq!(round("-x**2"), "-x**2");
    assert_eq!(parse_expr("-x**2").unwrap(), Expr::Neg(parse_expr("x**2").unwrap().boxed()));
}

#[test]
fn whitespace_is_ignored() {
    assert_eq!(parse_expr("  x  *  y ").unwrap(), parse_expr("x*y").unwrap());
}

#[test]
fn free_symbols_are_collected() {
    let e = parse_expr("sin(a) + b*c - a").unwrap();
    let names: Vec<String> = e.free_symbols().into_iter().collect();
    assert_eq!(names, vec!["a", "b", "c"]);
}

#[test]
fn garbage_is_a_parse_error() {
    for input in ["", "x +", "(x", "x y", "3 $ 4", "foo(x)"] {
        assert!(
            matches!(parse_expr(input), Err(CasError::Parse(_))),
            "{input:?} should not parse"
        );
    }
}
