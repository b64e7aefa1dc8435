//! Light clean-up and substitution for symbolic answers.

mod rules;
mod substitute;

pub use rules::{
    simplify, simplify_add, simplify_div, simplify_mul, simplify_neg, simplify_pow, simplify_sqrt,
    simplify_sub,
};
pub use substitute::{substitute, substitute_all};
