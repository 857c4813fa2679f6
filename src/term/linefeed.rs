extern crate linefeed;
use linefeed::interface::Interface;
use linefeed::reader::ReadResult;
use linefeed::terminal::DefaultTerminal;
use linefeed::Signal;
use std::io::{BufRead, Write};

/// What a read of one line produced.
pub enum Line {
    Text(String),
    Interrupt,
    Eof,
}

/// Line input for `ipn` and `ips`, with editing when stdin is a terminal.
pub enum Console {
    Interactive(Interface<DefaultTerminal>),
    Piped(std::io::Stdin),
}

impl Console {
    pub fn new() -> Console {
        match Interface::new("tape") {
            Ok(interface) => {
                interface.set_report_signal(Signal::Interrupt, true);
                Console::Interactive(interface)
            }
            Err(_) => Console::Piped(std::io::stdin()),
        }
    }

    pub fn print(&self, s: &str) -> std::io::Result<()> {
        match self {
            Console::Interactive(interface) => interface.write_fmt(format_args!("{}", s)),
            Console::Piped(_) => {
                let stdout = std::io::stdout();
                let mut out = stdout.lock();
                out.write_all(s.as_bytes())?;
                out.flush()
            }
        }
    }

    pub fn read_line(&mut self, prompt: &str) -> std::io::Result<Line> {
        match self {
            Console::Interactive(interface) => {
                interface.set_prompt(prompt)?;
                match interface.read_line()? {
                    ReadResult::Input(line) => {
                        if !line.trim().is_empty() {
                            interface.add_history_unique(line.clone());
                        }
                        Ok(Line::Text(line))
                    }
                    ReadResult::Signal(Signal::Interrupt) => {
                        interface.set_buffer("")?;
                        Ok(Line::Interrupt)
                    }
                    ReadResult::Signal(_) | ReadResult::Eof => Ok(Line::Eof),
                }
            }
            Console::Piped(stdin) => {
                self::print_prompt(prompt)?;
                let mut line = String::new();
                if stdin.lock().read_line(&mut line)? == 0 {
                    Ok(Line::Eof)
                } else {
                    Ok(Line::Text(line))
                }
            }
        }
    }
}

fn print_prompt(prompt: &str) -> std::io::Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    out.write_all(prompt.as_bytes())?;
    out.flush()
}
