extern crate ansi_term;
extern crate ctrlc;

mod linefeed;

use self::linefeed::{Console, Line};
use ansi_term::Colour;
use clap::Parser;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tape::lang::{report, DirLoader, Error};
use tape::mach::{compile, typecheck, Config, Context, Event, Listing, Runtime};
use tracing_subscriber::EnvFilter;

/// Check and run a tape program.
#[derive(Parser, Debug)]
#[command(name = "tape", version)]
struct Args {
    /// Program to run.
    file: PathBuf,

    /// Standard library directory [default: $TAPE_STD or the bundled std]
    #[arg(long)]
    std: Option<PathBuf>,

    /// Heap size in slots.
    #[arg(long)]
    heap: Option<usize>,

    /// Resolve imports when reached instead of splicing them in.
    #[arg(long)]
    lazy_imports: bool,

    /// Print the associated tape and exit.
    #[arg(long)]
    dump: bool,

    /// Like --dump, but only instructions from the program file itself.
    #[arg(long)]
    dump_main: bool,

    /// Skip the stack-effect check.
    #[arg(long)]
    no_check: bool,

    /// Plain diagnostics.
    #[arg(long)]
    no_color: bool,
}

pub fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();
    let interrupted = Arc::new(AtomicBool::new(false));
    let int_moved = interrupted.clone();
    ctrlc::set_handler(move || {
        int_moved.store(true, Ordering::SeqCst);
    })
    .expect("Error setting Ctrl-C handler");
    match main_loop(args, interrupted) {
        Ok(code) => std::process::exit(code),
        Err(error) => {
            eprintln!("{}", error);
            std::process::exit(1);
        }
    }
}

fn main_loop(args: Args, interrupted: Arc<AtomicBool>) -> std::io::Result<i32> {
    let text = std::fs::read_to_string(&args.file)?;
    let mut config = Config::default();
    if let Some(heap) = args.heap {
        config.heap_capacity = heap;
    }
    config.splice_imports = !args.lazy_imports;
    let loader = match &args.std {
        Some(dir) => DirLoader::new(dir),
        None => DirLoader::from_env(),
    };
    let mut ctx = Context::new(config, loader);
    let colored = !args.no_color;
    let name = args.file.display().to_string();

    let tape = match compile(&mut ctx, name.as_str(), text) {
        Ok(tape) => tape,
        Err(error) => return Ok(fatal(&ctx, &error, colored)),
    };
    if args.dump || args.dump_main {
        let listing = match ctx.sources.find(&name) {
            Some(file) if args.dump_main => Listing::new(&tape).only(file),
            _ => Listing::new(&tape),
        };
        print!("{}", listing);
        return Ok(0);
    }
    if !args.no_check {
        if let Err(error) = typecheck(&mut ctx, &tape) {
            return Ok(fatal(&ctx, &error, colored));
        }
    }

    let mut console = Console::new();
    let mut runtime = Runtime::new(&ctx.config, tape);
    let cycles = ctx.config.cycles;
    loop {
        if interrupted.load(Ordering::SeqCst) {
            runtime.interrupt();
            interrupted.store(false, Ordering::SeqCst);
        };
        match runtime.execute(&mut ctx, cycles) {
            Event::Running => {}
            Event::Print(s) => console.print(&s)?,
            Event::Input(prompt) => match console.read_line(&prompt)? {
                Line::Text(line) => runtime.enter(&line),
                Line::Interrupt => runtime.interrupt(),
                Line::Eof => runtime.close_input(),
            },
            Event::Leak { regions, slots } => {
                let warning = format!(
                    "warning: memory leak: {} region(s), {} slot(s) still allocated",
                    regions, slots
                );
                if colored {
                    eprintln!("{}", Colour::Yellow.paint(warning));
                } else {
                    eprintln!("{}", warning);
                }
            }
            Event::Error(error) => return Ok(fatal(&ctx, &error, colored)),
            Event::Stopped => return Ok(0),
        }
    }
}

fn fatal(ctx: &Context, error: &Error, colored: bool) -> i32 {
    eprint!("{}", report::render(&ctx.sources, error, colored));
    1
}
