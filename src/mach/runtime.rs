use super::{
    assoc::enter_module, Address, Callable, Config, Context, Effect, Functions, Heap, InputKind,
    Opcode, Operation, Scope, Stack, Tape, UserFunction, Val,
};
use crate::error;
use crate::lang::{Error, Location};
use rust_decimal::Decimal;
use std::convert::TryFrom;
use std::rc::Rc;
use tracing::{debug, warn};

type Result<T> = std::result::Result<T, Error>;

/// ## Virtual machine
///
/// Runs a tape in slices. Blocks never recurse natively: entering one pushes
/// a control frame, and the top frame is compared against the instruction
/// pointer before every step.

pub struct Runtime {
    tape: Rc<Tape>,
    ip: Address,
    stack: Stack<Val>,
    frames: Vec<Frame>,
    bindings: Scope<Val>,
    functions: Functions,
    heap: Heap,
    config: Config,
    state: State,
    input: Option<(InputKind, Location)>,
    fault: Option<Error>,
    module: Option<Box<Runtime>>,
    interrupted: bool,
}

#[derive(Debug, PartialEq)]
pub enum Event {
    Stopped,
    Running,
    Print(String),
    Input(String),
    Error(Error),
    Leak { regions: usize, slots: usize },
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum State {
    Running,
    Input,
    Finished,
}

#[derive(Debug)]
enum Frame {
    /// Consequent of an `if` with an `else`: at `until` skip to `resume`.
    Branch { until: Address, resume: Address },
    Repeat {
        start: Address,
        end: Address,
        remaining: usize,
    },
    While {
        predicate: Address,
        body: Address,
        end: Address,
    },
    Var { end: Address, pointer: Address },
    Call { tape: Rc<Tape>, return_ip: Address },
}

impl Runtime {
    pub fn new(config: &Config, tape: Tape) -> Runtime {
        Runtime {
            tape: Rc::new(tape),
            ip: 0,
            stack: Stack::new("operand stack overflow"),
            frames: vec![],
            bindings: Scope::new(),
            functions: Functions::with_builtins(),
            heap: Heap::new(config.heap_capacity),
            config: config.clone(),
            state: State::Running,
            input: None,
            fault: None,
            module: None,
            interrupted: false,
        }
    }

    pub fn stack(&self) -> &Stack<Val> {
        &self.stack
    }

    pub fn heap(&self) -> &Heap {
        &self.heap
    }

    pub fn functions(&self) -> &Functions {
        &self.functions
    }

    pub fn interrupt(&mut self) {
        self.interrupted = true;
    }

    /// Answer the pending `ipn` or `ips`.
    pub fn enter(&mut self, line: &str) {
        if let Some(module) = &mut self.module {
            return module.enter(line);
        }
        let (kind, loc) = match self.input.take() {
            Some(input) => input,
            None => return,
        };
        self.state = State::Running;
        let text = line.trim_end_matches(&['\n', '\r'][..]);
        let val = match kind {
            InputKind::String => Val::String(text.into()),
            InputKind::Number => match Operation::parse_number(text) {
                Ok(n) => Val::Number(n),
                Err(error) => {
                    self.fault = Some(error.in_location(&loc));
                    return;
                }
            },
        };
        if let Err(error) = self.stack.push(val) {
            self.fault = Some(error.in_location(&loc));
        }
    }

    /// End of input: `ipn` reads 0 and `ips` reads an empty string.
    pub fn close_input(&mut self) {
        if let Some(module) = &mut self.module {
            return module.close_input();
        }
        match self.input {
            Some((InputKind::Number, _)) => self.enter("0"),
            Some((InputKind::String, _)) => self.enter(""),
            None => {}
        }
    }

    pub fn execute(&mut self, ctx: &mut Context, cycles: usize) -> Event {
        if self.interrupted {
            self.interrupted = false;
            let error = self.located(error!(Interrupted));
            return self.fail(ctx, error);
        }
        if let Some(error) = self.fault.take() {
            return self.fail(ctx, error);
        }
        match self.state {
            State::Finished => return Event::Stopped,
            State::Input => return Event::Running,
            State::Running => {}
        }
        if self.ip == 0 && self.frames.is_empty() && self.module.is_none() {
            debug!(instructions = self.tape.len(), "runtime start");
        }
        for _ in 0..cycles {
            if let Some(module) = &mut self.module {
                match module.execute(ctx, cycles) {
                    Event::Stopped => {
                        if let Some(module) = self.module.take() {
                            debug!(functions = module.functions.len(), "module finished");
                            self.functions.merge(module.functions);
                            ctx.close_module();
                        }
                        self.ip += 1;
                        continue;
                    }
                    Event::Error(error) => return self.fail(ctx, error),
                    event => return event,
                }
            }
            match self.step(ctx) {
                Ok(None) => {}
                Ok(Some(event)) => return event,
                Err(error) => return self.fail(ctx, error),
            }
        }
        Event::Running
    }

    fn fail(&mut self, ctx: &mut Context, error: Error) -> Event {
        self.state = State::Finished;
        self.abandon_module(ctx);
        Event::Error(error)
    }

    /// Drop a running module, innermost first, and take it off the import
    /// chain.
    fn abandon_module(&mut self, ctx: &mut Context) {
        if let Some(mut module) = self.module.take() {
            module.abandon_module(ctx);
            ctx.close_module();
        }
    }

    fn located(&self, error: Error) -> Error {
        match self.tape.get(self.ip) {
            Some(instruction) => error.in_location(&instruction.loc),
            None => error,
        }
    }

    /// Settle block boundaries at the current pointer. Returns false once the
    /// program has run off the end of its tape.
    fn boundaries(&mut self) -> Result<bool> {
        loop {
            let ip = self.ip;
            match self.frames.last_mut() {
                Some(Frame::Branch { until, resume }) if *until == ip => {
                    self.ip = *resume;
                    self.frames.pop();
                }
                Some(Frame::Repeat {
                    start,
                    end,
                    remaining,
                }) if *end == ip => {
                    if *remaining > 0 {
                        *remaining -= 1;
                        self.ip = *start + 1;
                    } else {
                        self.frames.pop();
                        return Ok(true);
                    }
                }
                Some(Frame::While {
                    predicate,
                    body,
                    end,
                }) if *body == ip || *end == ip => {
                    if *end == ip {
                        self.ip = *predicate + 1;
                        continue;
                    }
                    let end = *end;
                    let condition = Decimal::try_from(self.stack.pop()?)?;
                    if condition.is_zero() {
                        self.frames.pop();
                        self.ip = end;
                        return Ok(true);
                    }
                    self.ip = ip + 1;
                }
                Some(Frame::Var { end, pointer }) if *end == ip => {
                    let pointer = *pointer;
                    self.frames.pop();
                    self.bindings.pop();
                    self.heap.free(pointer)?;
                    return Ok(true);
                }
                _ => return Ok(self.ip < self.tape.len() || !self.frames.is_empty()),
            }
        }
    }

    fn step(&mut self, ctx: &mut Context) -> Result<Option<Event>> {
        let running = self.boundaries().map_err(|e| self.located(e))?;
        if !running {
            return Ok(Some(self.finish()));
        }
        let tape = Rc::clone(&self.tape);
        let instruction = match tape.get(self.ip) {
            Some(instruction) => instruction,
            None => return Err(error!(InternalError; format!("{} is past the tape", self.ip))),
        };
        self.instruction(ctx, &instruction.opcode, &instruction.loc)
            .map_err(|e| e.in_location(&instruction.loc))
    }

    fn instruction(
        &mut self,
        ctx: &mut Context,
        opcode: &Opcode,
        loc: &Location,
    ) -> Result<Option<Event>> {
        match opcode {
            Opcode::NumberLiteral(n) => self.stack.push(Val::Number(*n))?,
            Opcode::StringLiteral(s) => self.stack.push(Val::String(s.clone()))?,
            Opcode::If { else_ip, end_ip } => {
                let condition = Decimal::try_from(self.stack.pop()?)?;
                if condition >= Decimal::ONE {
                    if let Some(else_ip) = else_ip {
                        self.frames.push(Frame::Branch {
                            until: *else_ip,
                            resume: *end_ip,
                        });
                    }
                } else {
                    self.ip = else_ip.unwrap_or(*end_ip);
                    return Ok(None);
                }
            }
            Opcode::Repeat { start_ip, end_ip } => {
                let count = Operation::count(self.stack.pop()?)?;
                if count == 0 {
                    self.ip = *end_ip;
                    return Ok(None);
                }
                self.frames.push(Frame::Repeat {
                    start: *start_ip,
                    end: *end_ip,
                    remaining: count - 1,
                });
                self.ip = start_ip + 1;
                return Ok(None);
            }
            Opcode::While {
                predicate_ip,
                body_ip,
                end_ip,
            } => {
                self.frames.push(Frame::While {
                    predicate: *predicate_ip,
                    body: *body_ip,
                    end: *end_ip,
                });
                self.ip = predicate_ip + 1;
                return Ok(None);
            }
            Opcode::LetBinding(names) => {
                let values = self.stack.pop_n(names.len())?;
                self.bindings.push();
                for (name, val) in names.iter().zip(values) {
                    self.bindings.insert(name.clone(), val);
                }
            }
            Opcode::DropBinding(_) => {
                self.bindings.pop();
            }
            Opcode::VarDefine { name, end_ip } => {
                let pointer = self.heap.alloc(1)?;
                self.bindings.push();
                self.bindings.insert(name.clone(), Val::Pointer(pointer));
                self.frames.push(Frame::Var {
                    end: *end_ip,
                    pointer,
                });
            }
            Opcode::Call(name) => return self.call(name, loc),
            Opcode::Function(def) => {
                let function = UserFunction {
                    tape: Rc::clone(&self.tape),
                    def: Rc::clone(def),
                };
                self.functions
                    .insert(def.name.clone(), Callable::User(function));
                self.ip = def.end_ip + 1;
                return Ok(None);
            }
            Opcode::Return => {
                loop {
                    match self.frames.pop() {
                        Some(Frame::Call { tape, return_ip }) => {
                            self.tape = tape;
                            self.ip = return_ip;
                            return Ok(None);
                        }
                        Some(Frame::Var { pointer, .. }) => {
                            self.bindings.pop();
                            self.heap.free(pointer)?;
                        }
                        Some(_) => {}
                        None => return Err(error!(InternalError; "return outside of a function")),
                    }
                }
            }
            Opcode::Import(name) => {
                let module = enter_module(ctx, name, loc)?;
                debug!(module = &**name, instructions = module.len(), "running module");
                self.module = Some(Box::new(Runtime::new(&self.config, module)));
                return Ok(None);
            }
            Opcode::VarDrop | Opcode::FunctionStart | Opcode::Noop => {}
        }
        self.ip += 1;
        Ok(None)
    }

    fn call(&mut self, name: &str, loc: &Location) -> Result<Option<Event>> {
        match self.functions.get(name).cloned() {
            Some(Callable::Builtin(builtin)) => {
                let effect = builtin.call(&mut self.stack, &mut self.heap)?;
                self.ip += 1;
                match effect {
                    Effect::Continue => Ok(None),
                    Effect::Print(s) => Ok(Some(Event::Print(s))),
                    Effect::Input(kind, prompt) => {
                        self.input = Some((kind, loc.clone()));
                        self.state = State::Input;
                        Ok(Some(Event::Input(prompt)))
                    }
                }
            }
            Some(Callable::User(function)) => {
                let caller = std::mem::replace(&mut self.tape, function.tape);
                self.frames.push(Frame::Call {
                    tape: caller,
                    return_ip: self.ip + 1,
                });
                self.ip = function.def.start_ip;
                Ok(None)
            }
            None => match self.bindings.get(name) {
                Some(val) => {
                    let val = val.clone();
                    self.stack.push(val)?;
                    self.ip += 1;
                    Ok(None)
                }
                None => Err(error!(UndefinedName; format!("no function or binding called `{}`", name))),
            },
        }
    }

    fn finish(&mut self) -> Event {
        self.state = State::Finished;
        let regions = self.heap.used_regions().count();
        debug!(leftover = self.stack.len(), "runtime stop");
        if regions == 0 {
            return Event::Stopped;
        }
        let slots: usize = self.heap.used_regions().map(|r| r.size).sum();
        warn!(regions, slots, "memory leak: heap regions still allocated at exit");
        Event::Leak { regions, slots }
    }
}
