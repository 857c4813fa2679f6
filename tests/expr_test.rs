mod common;
use common::*;
use tape::lang::ErrorCode;

#[test]
fn test_three_plus_four() {
    assert_eq!(exec("3 4 + pr"), "7");
}

#[test]
fn test_operand_order() {
    assert_eq!(exec("10 4 - pr"), "6");
    assert_eq!(exec("1 4 / pr"), "0.25");
    assert_eq!(exec("2 10 ^ pr"), "1024");
    assert_eq!(exec("3 2 > pr 3 2 < pr"), "10");
}

#[test]
fn test_decimal_arithmetic() {
    assert_eq!(exec("0.1 0.2 + pr"), "0.3");
    assert_eq!(exec("1.50 1 * pr"), "1.5");
    assert_eq!(exec("2 sqrt 2 sqrt * round pr"), "2");
}

#[test]
fn test_rounding_words() {
    assert_eq!(exec("2.5 round pr \" \" pr 3.5 round pr"), "3 4");
    assert_eq!(exec("2.7 floor pr 2.1 ceil pr"), "23");
    assert_eq!(exec("4 is-integer pr 4.5 is-integer pr"), "10");
}

#[test]
fn test_logic() {
    assert_eq!(exec("1 1 && pr 1 0 && pr 0 1 || pr 0 0 || pr"), "1010");
    assert_eq!(exec("0 lnot pr 5 lnot pr"), "10");
}

#[test]
fn test_equality() {
    assert_eq!(exec("2.50 2.5 == pr"), "1");
    assert_eq!(exec("\"a\" \"a\" == pr \"a\" \"b\" != pr"), "11");
    assert_eq!(exec("\"1\" 1 == pr"), "0");
}

#[test]
fn test_strings() {
    assert_eq!(exec("\"foo\" \"bar\" str+ pr"), "foobar");
    assert_eq!(exec("\" 12 \" str2num 1 + pr"), "13");
    assert_eq!(exec("12.50 num2str \"!\" str+ pr"), "12.5!");
}

#[test]
fn test_stack_words() {
    assert_eq!(exec("1 2 swap pr pr"), "12");
    assert_eq!(exec("1 dup + pr"), "2");
    assert_eq!(exec("1 2 drop pr"), "1");
}

#[test]
fn test_runtime_errors() {
    assert_eq!(run_err("1 0 /").code(), ErrorCode::DivisionByZero);
    assert_eq!(run_err("0 1 - sqrt").code(), ErrorCode::InvalidNumber);
    assert_eq!(run_err("\"x\" str2num").code(), ErrorCode::InvalidNumber);
    assert_eq!(run_err("+").code(), ErrorCode::StackUnderflow);
    assert_eq!(run_err("\"a\" 1 <").code(), ErrorCode::TypeMismatch);
    assert_eq!(run_err("frob").code(), ErrorCode::UndefinedName);
    assert_eq!(
        run_err("79228162514264337593543950335 1 +").code(),
        ErrorCode::Overflow
    );
}

#[test]
fn test_runtime_error_location() {
    let error = run_err("1 2 +\n1 0 /");
    assert_eq!(error.location().unwrap().span, 10..11);
}

#[test]
fn test_check_errors() {
    assert_eq!(check_err("\"a\" 1 +"), ErrorCode::TypeMismatch);
    assert_eq!(check_err("1 2"), ErrorCode::NonEmptyStack);
    assert_eq!(check_err("frob"), ErrorCode::UndefinedName);
    assert_eq!(check_err("pr"), ErrorCode::StackUnderflow);
}

#[test]
fn test_inspect_stack_types() {
    assert_eq!(exec("1 \"a\" ??? drop drop"), "[number string]\n");
    assert_eq!(exec("???"), "[]\n");
}
