use std::collections::BTreeMap;

use crate::expr::Expr;

/// Substitute variable `var` with `replacement` throughout `expr`.
pub fn substitute(expr: &Expr, var: &str, replacement: &Expr) -> Expr {
    map_variables(expr, &|name| (name == var).then(|| replacement.clone()))
}

/// Simultaneous substitution of every bound variable.
pub fn substitute_all(expr: &Expr, bindings: &BTreeMap<String, Expr>) -> Expr {
    map_variables(expr, &|name| bindings.get(name).cloned())
}

fn map_variables(expr: &Expr, f: &dyn Fn(&str) -> Option<Expr>) -> Expr {
    let go = |e: &Expr| map_variables(e, f).boxed();
    match expr {
        Expr::Variable(name) => f(name).unwrap_or_else(|| expr.clone()),
        Expr::Constant(_) | Expr::Imaginary => expr.clone(),
        Expr::Add(a, b) => Expr::Add(go(a), go(b)),
        Expr::Sub(a, b) => Expr::Sub(go(a), go(b)),
        Expr::Mul(a, b) => Expr::Mul(go(a), go(b)),
        Expr::Div(a, b) => Expr::Div(go(a), go(b)),
        Expr::Pow(a, b) => Expr::Pow(go(a), go(b)),
        Expr::Neg(a) => Expr::Neg(go(a)),
        Expr::Sin(a) => Expr::Sin(go(a)),
        Expr::Cos(a) => Expr::Cos(go(a)),
        Expr::Tan(a) => Expr::Tan(go(a)),
        Expr::Asin(a) => Expr::Asin(go(a)),
        Expr::Acos(a) => Expr::Acos(go(a)),
        Expr::Atan(a) => Expr::Atan(go(a)),
        Expr::Exp(a) => Expr::Exp(go(a)),
        Expr::Log(a) => Expr::Log(go(a)),
        Expr::Sqrt(a) => Expr::Sqrt(go(a)),
        Expr::Abs(a) => Expr::Abs(go(a)),
    }
}
