mod common;
use common::*;
use tape::lang::ErrorCode;

#[test]
fn test_repeat() {
    assert_eq!(exec("3 repeat \"ho\" pr end"), "hohoho");
    assert_eq!(exec("0 repeat \"ho\" pr end \"done\" pr"), "done");
    assert_eq!(exec("0 2 - repeat \"ho\" pr end"), "");
    assert_eq!(exec("2.9 repeat \"ho\" pr end"), "hoho");
}

#[test]
fn test_repeat_keeps_stack() {
    assert_eq!(exec("1 0 repeat 2 * end pr"), "1");
    assert_eq!(exec("1 10 repeat 2 * end pr"), "1024");
}

#[test]
fn test_nested_repeat() {
    assert_eq!(exec("2 repeat 3 repeat \"x\" pr end \"|\" pr end"), "xxx|xxx|");
}

#[test]
fn test_while() {
    assert_eq!(exec("3 while dup do dup pr 1 - end drop"), "321");
    assert_eq!(exec("0 while dup 0 > do \"never\" pr end drop"), "");
}

#[test]
fn test_while_counts() {
    let src = "
        0
        while dup 10 < do
            dup 3 > if dup pr \" \" pr end
            1 +
        end
        drop
    ";
    assert_eq!(exec(src), "4 5 6 7 8 9 ");
}

#[test]
fn test_while_condition_shape() {
    assert_eq!(check_err("while 1 2 do end"), ErrorCode::StackImbalance);
    assert_eq!(check_err("while do end"), ErrorCode::StackImbalance);
    assert_eq!(check_err("while \"x\" do end"), ErrorCode::TypeMismatch);
}

#[test]
fn test_let() {
    assert_eq!(exec("10 4 let a b do a b - pr end"), "6");
    assert_eq!(exec("1 2 let x y do y pr x pr end"), "21");
}

#[test]
fn test_let_shadowing() {
    let src = "1 let x do 2 let x do x pr end x pr end";
    assert_eq!(exec(src), "21");
}

#[test]
fn test_let_scope_ends() {
    assert_eq!(check_err("1 let x do end x pr"), ErrorCode::UndefinedName);
    assert_eq!(run_err("1 let x do end x pr").code(), ErrorCode::UndefinedName);
    assert_eq!(check_err("let x do end"), ErrorCode::StackUnderflow);
}

#[test]
fn test_var() {
    let src = "
        var total
            0 total memsave
            5 repeat total memload 2 + total memsave end
            total memload pr
        end
    ";
    assert_eq!(exec(src), "10");
}

#[test]
fn test_var_is_freed() {
    let mut ctx = context(&[]);
    let tape = build(&mut ctx, "var v 1 v memsave end").unwrap();
    let events = events(&mut ctx, tape, &[]);
    assert_eq!(events, vec![tape::mach::Event::Stopped]);
}

#[test]
fn test_var_uninitialized() {
    assert_eq!(
        run_err("var v v memload pr end").code(),
        ErrorCode::UninitializedMemory
    );
}

#[test]
fn test_repeat_count_too_large() {
    let error = run_err("79228162514264337593543950335 repeat end");
    assert_eq!(error.code(), ErrorCode::Overflow);
}
