mod common;
use common::*;
use tape::lang::ErrorCode;
use tape::mach::{compile, Listing};

fn dump(src: &str) -> String {
    let mut ctx = context(&[]);
    let tape = compile(&mut ctx, "main", src).unwrap();
    Listing::new(&tape).to_string()
}

#[test]
fn test_tape_of_three_plus_four() {
    assert_eq!(dump("3 4 + pr"), "0: number 3\n1: number 4\n2: call +\n3: call pr\n");
}

#[test]
fn test_tape_of_blocks() {
    let src = "2 repeat 0 if 1 else 2 end drop end";
    assert_eq!(
        dump(src),
        "0: number 2\n\
         1: repeat 1 -> 9\n\
         2: number 0\n\
         3: if -> 5 -> 7\n\
         4: number 1\n\
         5: noop\n\
         6: number 2\n\
         7: noop\n\
         8: call drop\n\
         9: noop\n"
    );
}

#[test]
fn test_tape_of_var() {
    assert_eq!(dump("var v end"), "0: var v -> 1\n1: noop\n");
}

#[test]
fn test_structure_errors() {
    assert_eq!(check_err("1 if"), ErrorCode::UnterminatedBlock);
    assert_eq!(check_err("end"), ErrorCode::UnmatchedEnd);
    assert_eq!(check_err("1 if end end"), ErrorCode::UnmatchedEnd);
    assert_eq!(check_err("while 1 end"), ErrorCode::UnterminatedBlock);
    assert_eq!(check_err("1 repeat do end"), ErrorCode::MisplacedKeyword);
    assert_eq!(check_err("1 repeat else end"), ErrorCode::MisplacedKeyword);
    assert_eq!(check_err(":"), ErrorCode::MisplacedKeyword);
    assert_eq!(check_err("fn f"), ErrorCode::MalformedFunction);
    assert_eq!(check_err("var"), ErrorCode::MalformedBinding);
    assert_eq!(check_err("let a b"), ErrorCode::MalformedBinding);
}

#[test]
fn test_unterminated_reports_innermost() {
    let mut ctx = context(&[]);
    let error = compile(&mut ctx, "main", "1 if 2 repeat").unwrap_err();
    assert_eq!(error.code(), ErrorCode::UnterminatedBlock);
    assert_eq!(error.text(), "unterminated repeat");
    assert_eq!(error.location().unwrap().span, 7..13);
}

#[test]
fn test_empty_program() {
    assert_eq!(exec(""), "");
    assert_eq!(dump("  \n "), "");
}

#[test]
fn test_fizzbuzz() {
    let src = "
        fn divides n n : n do let a b do a b / is-integer end end
        1
        while dup 15 <= do
            let i do
                i 15 divides if \"FizzBuzz\" else
                i 3 divides if \"Fizz\" else
                i 5 divides if \"Buzz\" else
                i num2str end end end
                pr \" \" pr
                i 1 +
            end
        end
        drop
    ";
    assert_eq!(
        exec(src),
        "1 2 Fizz 4 Buzz Fizz 7 8 Fizz Buzz 11 Fizz 13 14 FizzBuzz "
    );
}
