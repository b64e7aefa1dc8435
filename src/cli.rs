//! The interactive session: read equations, print their types and the solutions.

use std::io::{self, BufRead, Write};
use std::num::ParseIntError;

use thiserror::Error;

use crate::config::Settings;
use crate::equation::classify_equation;
use crate::format::solution_lines;
use crate::solver::{SolveOutcome, solve_mixed_system};

pub const BANNER: &str = "____混合方程组分析与求解____";

#[derive(Debug, Error)]
enum SessionError {
    #[error("{0}")]
    Count(#[from] ParseIntError),
    #[error("{0}")]
    Io(#[from] io::Error),
    #[error("unexpected end of input")]
    EndOfInput,
}

/// Run one session. Only failures to write `out` are returned; everything else is
/// reported inside the dialogue.
pub fn run<R: BufRead, W: Write>(input: &mut R, out: &mut W, settings: &Settings) -> io::Result<()> {
    writeln!(out, "{BANNER}")?;
    match session(input, out, settings) {
        Ok(()) => Ok(()),
        Err(SessionError::Count(err)) => writeln!(out, "输入错误: {err}"),
        Err(other) => writeln!(out, "发生了一个错误: {other}"),
    }
}

fn session<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    settings: &Settings,
) -> Result<(), SessionError> {
    let count: i64 = prompt(input, out, "请输入方程的个数: ")?.trim().parse()?;

    let mut equations = Vec::new();
    for i in 1..=count.max(0) {
        equations.push(prompt(
            input,
            out,
            &format!("请输入第 {i} 个方程(例如: x**2 + y**2 = 1): "),
        )?);
    }

    for (i, equation) in equations.iter().enumerate() {
        match classify_equation(equation) {
            Ok(classification) => writeln!(out, "方程 {} 类型: {}", i + 1, classification.kind)?,
            Err(err) => writeln!(out, "在处理方程时发生错误: {err}")?,
        }
    }

    let outcome = match solve_mixed_system(&equations) {
        Ok(outcome) => outcome,
        Err(err) => {
            writeln!(out, "在求解方程组时发生错误: {err}")?;
            SolveOutcome::NoSolution
        }
    };

    writeln!(out, "方程组的解为:")?;
    for line in solution_lines(&outcome, settings.digits) {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W, text: &str) -> Result<String, SessionError> {
    write!(out, "{text}")?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(SessionError::EndOfInput);
    }
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
