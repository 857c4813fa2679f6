#![allow(dead_code)]

use std::collections::VecDeque;
use tape::lang::{Error, ErrorCode, MemoryLoader};
use tape::mach::{compile, typecheck, Config, Context, Event, Runtime, Tape};

pub fn context(modules: &[(&str, &str)]) -> Context {
    context_with(Config::default(), modules)
}

pub fn context_with(config: Config, modules: &[(&str, &str)]) -> Context {
    let mut loader = MemoryLoader::new();
    for (name, text) in modules {
        loader.insert(*name, *text);
    }
    Context::new(config, loader)
}

/// Associate and check `src` as the file `main`.
pub fn build(ctx: &mut Context, src: &str) -> Result<Tape, Error> {
    let tape = compile(ctx, "main", src)?;
    typecheck(ctx, &tape)?;
    Ok(tape)
}

/// Every event up to and including the final `Stopped` or `Error`, answering
/// `Input` events from `input` and closing input when it runs out.
pub fn events(ctx: &mut Context, tape: Tape, input: &[&str]) -> Vec<Event> {
    let mut input: VecDeque<&str> = input.iter().copied().collect();
    let mut runtime = Runtime::new(&ctx.config, tape);
    let mut events = vec![];
    let mut slices = 0;
    loop {
        let event = runtime.execute(ctx, 5000);
        match &event {
            Event::Running => {
                slices += 1;
                if slices > 2000 {
                    panic!("execution cycles exceeded");
                }
            }
            Event::Input(_) => match input.pop_front() {
                Some(line) => runtime.enter(line),
                None => runtime.close_input(),
            },
            _ => {}
        }
        let done = matches!(event, Event::Stopped | Event::Error(_));
        if event != Event::Running {
            events.push(event);
        }
        if done {
            return events;
        }
    }
}

/// Printed output of a program that must build and run cleanly.
pub fn exec(src: &str) -> String {
    exec_input(src, &[])
}

pub fn exec_input(src: &str, input: &[&str]) -> String {
    exec_modules(&[], src, input)
}

pub fn exec_modules(modules: &[(&str, &str)], src: &str, input: &[&str]) -> String {
    let mut ctx = context(modules);
    let tape = build(&mut ctx, src).unwrap();
    output(events(&mut ctx, tape, input))
}

pub fn output(events: Vec<Event>) -> String {
    let mut s = String::new();
    for event in events {
        match event {
            Event::Print(p) => s.push_str(&p),
            Event::Error(error) => panic!("{}", error),
            _ => {}
        }
    }
    s
}

/// Code of the error that stops `src` at association or type checking.
pub fn check_err(src: &str) -> ErrorCode {
    let mut ctx = context(&[]);
    build(&mut ctx, src).unwrap_err().code()
}

/// Runs `src` without the type checker and returns its runtime error.
pub fn run_err(src: &str) -> Error {
    let mut ctx = context(&[]);
    let tape = compile(&mut ctx, "main", src).unwrap();
    for event in events(&mut ctx, tape, &[]) {
        if let Event::Error(error) = event {
            return error;
        }
    }
    panic!("{:?} ran without error", src)
}
