use thiserror::Error;

pub type Result<T> = std::result::Result<T, CasError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CasError {
    #[error("parse error: {0}")]
    Parse(String),
    #[error("malformed equation: {0}")]
    Equation(String),
    #[error("unsupported operation: {0}")]
    Unsupported(String),
    #[error("division by zero")]
    DivisionByZero,
}
