mod common;
use common::*;
use std::path::Path;
use tape::lang::{DirLoader, ErrorCode, MemoryLoader};
use tape::mach::{compile, typecheck, Config, Context, Event};

const MATH: &str = "
    fn square n : n do dup * end
    fn cube n : n do dup square * end
";

#[test]
fn test_splice_import() {
    let out = exec_modules(&[("math", MATH)], "import math 3 cube pr", &[]);
    assert_eq!(out, "27");
}

#[test]
fn test_spliced_module_code_runs() {
    let modules = [("hello", "\"loaded \" pr")];
    assert_eq!(exec_modules(&modules, "import hello \"main\" pr", &[]), "loaded main");
}

#[test]
fn test_nested_import() {
    let modules = [
        ("math", MATH),
        ("geometry", "import math fn area n : n do square end"),
    ];
    assert_eq!(exec_modules(&modules, "import geometry 4 area pr", &[]), "16");
}

fn lazy_context(modules: &[(&str, &str)]) -> Context {
    let config = Config {
        splice_imports: false,
        ..Config::default()
    };
    context_with(config, modules)
}

fn lazy(modules: &[(&str, &str)], src: &str) -> Vec<Event> {
    let mut ctx = lazy_context(modules);
    let tape = build(&mut ctx, src).unwrap();
    events(&mut ctx, tape, &[])
}

const SELF_CYCLE: &[(&str, &str)] = &[("a", "import a")];
const PAIR_CYCLE: &[(&str, &str)] = &[("a", "import b"), ("b", "import a")];

#[test]
fn test_lazy_import_cycle_fails_check() {
    for modules in &[SELF_CYCLE, PAIR_CYCLE] {
        let mut ctx = lazy_context(modules);
        let error = build(&mut ctx, "import a").unwrap_err();
        assert_eq!(error.code(), ErrorCode::ImportCycle);
    }
}

#[test]
fn test_lazy_import_cycle_fails_run() {
    for modules in &[SELF_CYCLE, PAIR_CYCLE] {
        let mut ctx = lazy_context(modules);
        let tape = compile(&mut ctx, "main", "import a").unwrap();
        let last = events(&mut ctx, tape, &[]).pop();
        match last {
            Some(Event::Error(error)) => assert_eq!(error.code(), ErrorCode::ImportCycle),
            other => panic!("expected an import cycle, got {:?}", other),
        }
    }
}

#[test]
fn test_lazy_import_chain_is_released() {
    let modules = [("math", MATH), ("twice", "import math import math")];
    let out = output(lazy(&modules, "import twice import math 3 square pr"));
    assert_eq!(out, "9");
}

#[test]
fn test_lazy_import() {
    let out = output(lazy(&[("math", MATH)], "import math 2 cube pr"));
    assert_eq!(out, "8");
}

#[test]
fn test_lazy_import_forwards_output() {
    let modules = [("hello", "fn greet : do \"hi\" pr end \"loaded \" pr")];
    let out = output(lazy(&modules, "import hello greet"));
    assert_eq!(out, "loaded hi");
}

#[test]
fn test_lazy_import_emits_instruction() {
    let config = Config {
        splice_imports: false,
        ..Config::default()
    };
    let mut ctx = context_with(config, &[("math", MATH)]);
    let tape = compile(&mut ctx, "main", "import math").unwrap();
    assert_eq!(tape.len(), 1);
    assert_eq!(tape.opcodes()[0].to_string(), "import math");
}

fn compile_err(modules: &[(&str, &str)], src: &str) -> ErrorCode {
    let mut ctx = context(modules);
    compile(&mut ctx, "main", src).unwrap_err().code()
}

#[test]
fn test_import_errors() {
    assert_eq!(compile_err(&[], "import missing"), ErrorCode::MissingImport);
    assert_eq!(compile_err(&[], "import ../up"), ErrorCode::ImportNotImplemented);
    assert_eq!(compile_err(&[], "import dir/file"), ErrorCode::ImportNotImplemented);
    assert_eq!(
        compile_err(&[("a", "import b"), ("b", "import a")], "import a"),
        ErrorCode::ImportCycle
    );
    assert_eq!(
        compile_err(&[("a", "1 if")], "import a"),
        ErrorCode::UnterminatedBlock
    );
}

#[test]
fn test_error_in_module_points_into_module() {
    let mut ctx = context(&[("a", "fn f : n do end")]);
    let error = build(&mut ctx, "import a").unwrap_err();
    assert_eq!(error.code(), ErrorCode::SignatureViolation);
    let file = error.location().unwrap().file;
    assert_eq!(ctx.sources.get(file).name(), "a");
}

#[test]
fn test_same_module_twice() {
    let modules = [("math", MATH)];
    assert_eq!(exec_modules(&modules, "import math import math 2 square pr", &[]), "4");
}

#[test]
fn test_bundled_std() {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("std");
    let mut ctx = Context::new(Config::default(), DirLoader::new(dir));
    let src = "import math import io 0 3 - abs prln 3 9 max 2 min prln 7 3 mod pr";
    let tape = compile(&mut ctx, "main", src).unwrap();
    typecheck(&mut ctx, &tape).unwrap();
    assert_eq!(output(events(&mut ctx, tape, &[])), "3\n2\n1");
}

#[test]
fn test_memory_loader_is_a_loader() {
    let loader = MemoryLoader::new().with("one", "fn one : n do 1 end");
    let mut ctx = Context::new(Config::default(), loader);
    let tape = compile(&mut ctx, "main", "import one one pr").unwrap();
    typecheck(&mut ctx, &tape).unwrap();
    assert_eq!(output(events(&mut ctx, tape, &[])), "1");
}
