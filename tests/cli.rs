use std::io::Cursor;

use mixeq::cli::{BANNER, run};
use mixeq::config::Settings;

fn session(input: &str) -> String {
    let mut out = Vec::new();
    run(&mut Cursor::new(input.as_bytes()), &mut out, &Settings::default()).expect("write");
    String::from_utf8(out).expect("utf-8")
}

#[test]
fn full_dialogue() {
    let out = session("2\nx + y = 3\nx - y = 1\n");
    assert!(out.starts_with(BANNER));
    assert!(out.contains("请输入方程的个数: "));
    assert!(out.contains("请输入第 1 个方程(例如: x**2 + y**2 = 1): "));
    assert!(out.contains("请输入第 2 个方程(例如: x**2 + y**2 = 1): "));
    assert!(out.contains("方程 1 类型: 线性方程\n方程 2 类型: 线性方程\n"));
    assert!(out.ends_with("方程组的解为:\nx = 2, y = 1\n"));
}

#[test]
fn bad_count_is_an_input_error() {
    let out = session("two\n");
    assert!(out.contains("输入错误: invalid digit found in string"));
    assert!(!out.contains("方程组的解为"));
}

#[test]
fn unparsable_equation_is_reported_and_skipped() {
    let out = session("2\nx = = 1\nx**2 = 9\n");
    assert!(out.contains("在处理方程时发生错误: malformed equation"));
    assert!(!out.contains("方程 1 类型"));
    assert!(out.contains("方程 2 类型: 二次方程"));
    assert!(out.ends_with("方程组的解为:\nx = -3\nx = 3\n"));
}

#[test]
fn solver_errors_leave_an_empty_list() {
    let out = session("1\nsin(x) = 0\n");
    assert!(out.contains("方程 1 类型: 其他类型方程"));
    assert!(out.contains("在求解方程组时发生错误: unsupported operation"));
    assert!(out.ends_with("方程组的解为:\n"));
}

#[test]
fn closed_input_is_reported() {
    let out = session("3\nx = 1\n");
    assert!(out.ends_with("发生了一个错误: unexpected end of input\n"));
}

#[test]
fn decimals_follow_the_configured_digits() {
    let mut out = Vec::new();
    let settings = Settings {
        digits: 4,
        ..Settings::default()
    };
    run(&mut Cursor::new("1\nx**3 = 2\n".as_bytes()), &mut out, &settings).unwrap();
    assert!(String::from_utf8(out).unwrap().ends_with("x = 1.2599\n"));
}
