use super::{assoc::enter_module, Address, Context, FunctionDef, Opcode, Scope, Stack, Tape, Type, BUILTINS};
use crate::error;
use crate::lang::{Error, Location};
use std::collections::HashMap;
use std::rc::Rc;
use tracing::debug;

type Result<T> = std::result::Result<T, Error>;

/// Declared stack effect, inputs and outputs deepest first.
#[derive(Debug, Clone, PartialEq)]
pub struct Signature {
    pub inputs: Vec<Type>,
    pub outputs: Vec<Type>,
}

/// Check a whole program: every path must balance and the stack must be
/// empty at the end.
pub fn typecheck(ctx: &mut Context, tape: &Tape) -> Result<()> {
    TypeChecker::new().check_program(ctx, tape)
}

/// ## Static stack-effect checker
///
/// Walks the tape once, tracking types instead of values. Each block is
/// checked as a nested address range, so loops are visited a single time.

#[derive(Debug)]
pub struct TypeChecker {
    signatures: HashMap<Rc<str>, Signature>,
    bindings: Scope<Type>,
}

impl Default for TypeChecker {
    fn default() -> TypeChecker {
        let mut signatures = HashMap::new();
        for builtin in BUILTINS {
            signatures.insert(
                builtin.name.into(),
                Signature {
                    inputs: builtin.inputs.to_vec(),
                    outputs: builtin.outputs.to_vec(),
                },
            );
        }
        TypeChecker {
            signatures,
            bindings: Scope::new(),
        }
    }
}

impl TypeChecker {
    pub fn new() -> TypeChecker {
        TypeChecker::default()
    }

    pub fn signature(&self, name: &str) -> Option<&Signature> {
        self.signatures.get(name)
    }

    pub fn check_program(&mut self, ctx: &mut Context, tape: &Tape) -> Result<()> {
        let mut stack = Stack::new("type stack overflow");
        self.check_range(ctx, tape, 0, tape.len(), &mut stack)?;
        if stack.is_empty() {
            return Ok(());
        }
        let names: Vec<String> = stack.iter().map(|t| t.to_string()).collect();
        let message = format!("program ends with {} left on the stack", names.join(" "));
        match tape.iter().last() {
            Some(instruction) => Err(error!(NonEmptyStack, ..&instruction.loc; message)),
            None => Err(error!(NonEmptyStack; message)),
        }
    }

    fn check_range(
        &mut self,
        ctx: &mut Context,
        tape: &Tape,
        from: Address,
        to: Address,
        stack: &mut Stack<Type>,
    ) -> Result<()> {
        let mut ip = from;
        while ip < to {
            let instruction = match tape.get(ip) {
                Some(instruction) => instruction,
                None => return Err(error!(InternalError; format!("{} is past the tape", ip))),
            };
            ip = self
                .step(ctx, tape, ip, &instruction.opcode, &instruction.loc, stack)
                .map_err(|e| e.in_location(&instruction.loc))?;
        }
        Ok(())
    }

    /// Check one instruction and return the address to continue at.
    fn step(
        &mut self,
        ctx: &mut Context,
        tape: &Tape,
        ip: Address,
        opcode: &Opcode,
        loc: &Location,
        stack: &mut Stack<Type>,
    ) -> Result<Address> {
        match opcode {
            Opcode::NumberLiteral(_) => stack.push(Type::Number)?,
            Opcode::StringLiteral(_) => stack.push(Type::String)?,
            Opcode::If { else_ip, end_ip } => {
                expect(stack.pop()?, Type::Number, "if")?;
                let before = stack.len();
                match else_ip {
                    None => {
                        self.check_range(ctx, tape, ip + 1, *end_ip, stack)?;
                        if stack.len() != before {
                            return Err(error!(StackImbalance; format!(
                                "if without else must not change the stack depth, went from {} to {}",
                                before,
                                stack.len()
                            )));
                        }
                    }
                    Some(else_ip) => {
                        let mut alternative = stack.clone();
                        self.check_range(ctx, tape, ip + 1, *else_ip, stack)?;
                        self.check_range(ctx, tape, else_ip + 1, *end_ip, &mut alternative)?;
                        if stack.len() != alternative.len() {
                            return Err(error!(StackImbalance; format!(
                                "branches leave different stack depths, {} and {}",
                                stack.len(),
                                alternative.len()
                            )));
                        }
                    }
                }
                return Ok(*end_ip);
            }
            Opcode::Repeat { start_ip, end_ip } => {
                expect(stack.pop()?, Type::Number, "repeat")?;
                self.check_range(ctx, tape, start_ip + 1, *end_ip, stack)?;
                return Ok(*end_ip);
            }
            Opcode::While {
                predicate_ip,
                body_ip,
                end_ip,
            } => {
                let before = stack.len();
                self.check_range(ctx, tape, predicate_ip + 1, *body_ip, stack)?;
                if stack.len() != before + 1 {
                    return Err(error!(StackImbalance; format!(
                        "while condition must leave exactly one value, left {}",
                        stack.len() as isize - before as isize
                    )));
                }
                expect(stack.pop()?, Type::Number, "while")?;
                self.check_range(ctx, tape, body_ip + 1, *end_ip, stack)?;
                return Ok(*end_ip);
            }
            Opcode::LetBinding(names) => {
                let types = stack.pop_n(names.len())?;
                self.bindings.push();
                for (name, t) in names.iter().zip(types) {
                    self.bindings.insert(name.clone(), t);
                }
            }
            Opcode::DropBinding(_) => {
                self.bindings.pop();
            }
            Opcode::VarDefine { name, end_ip } => {
                self.bindings.push();
                self.bindings.insert(name.clone(), Type::Pointer);
                let checked = self.check_range(ctx, tape, ip + 1, *end_ip, stack);
                self.bindings.pop();
                checked?;
                return Ok(*end_ip);
            }
            Opcode::Call(name) => self.call(name, stack)?,
            Opcode::Function(def) => {
                self.function(ctx, tape, def)?;
                return Ok(def.end_ip + 1);
            }
            Opcode::Import(name) => {
                let module = enter_module(ctx, name, loc)?;
                let mut nested = TypeChecker::new();
                let checked = nested.check_program(ctx, &module);
                ctx.close_module();
                checked?;
                debug!(module = &**name, "merging checked signatures");
                self.signatures.extend(nested.signatures);
            }
            Opcode::VarDrop | Opcode::FunctionStart | Opcode::Return | Opcode::Noop => {}
        }
        Ok(ip + 1)
    }

    fn call(&mut self, name: &str, stack: &mut Stack<Type>) -> Result<()> {
        match name {
            "dup" => return stack.dup(),
            "swap" => return stack.swap(),
            _ => {}
        }
        if let Some(signature) = self.signatures.get(name) {
            let found = stack.top(signature.inputs.len()).map_err(|_| {
                error!(StackUnderflow; format!(
                    "`{}` needs {} value(s), found {}",
                    name,
                    signature.inputs.len(),
                    stack.len()
                ))
            })?;
            let matches = signature
                .inputs
                .iter()
                .zip(found.iter())
                .all(|(want, got)| want.accepts(*got));
            if !matches {
                return Err(error!(TypeMismatch; format!(
                    "`{}` takes {}, found {}",
                    name,
                    list(&signature.inputs),
                    list(found)
                )));
            }
            stack.pop_n(signature.inputs.len())?;
            for t in &signature.outputs {
                stack.push(*t)?;
            }
            return Ok(());
        }
        match self.bindings.get(name) {
            Some(t) => stack.push(*t),
            None => Err(error!(UndefinedName; format!("no function or binding called `{}`", name))),
        }
    }

    /// Register the signature first so the body may recurse, then check the
    /// body against it on a fresh stack. The caller's stack is untouched.
    fn function(
        &mut self,
        ctx: &mut Context,
        tape: &Tape,
        def: &FunctionDef,
    ) -> Result<()> {
        let signature = Signature {
            inputs: types(&def.inputs)?,
            outputs: types(&def.outputs)?,
        };
        self.signatures.insert(def.name.clone(), signature.clone());
        let mut body = Stack::new("type stack overflow");
        for t in &signature.inputs {
            body.push(*t)?;
        }
        self.check_range(ctx, tape, def.start_ip, def.end_ip, &mut body)?;
        let leaves = body.to_vec();
        let conforms = leaves.len() == signature.outputs.len()
            && signature
                .outputs
                .iter()
                .zip(leaves.iter())
                .all(|(want, got)| want.accepts(*got));
        if conforms {
            Ok(())
        } else {
            Err(error!(SignatureViolation; format!(
                "`{}` declares {} but its body leaves {}",
                def.name,
                list(&signature.outputs),
                list(&leaves)
            )))
        }
    }
}

fn expect(found: Type, want: Type, what: &str) -> Result<()> {
    if want.accepts(found) {
        Ok(())
    } else {
        Err(error!(TypeMismatch; format!("`{}` needs a {}, found {}", what, want, found)))
    }
}

fn types(names: &[Rc<str>]) -> Result<Vec<Type>> {
    names
        .iter()
        .map(|name| {
            Type::from_name(name)
                .ok_or_else(|| error!(UnknownType; format!("`{}` is not a type", name)))
        })
        .collect()
}

fn list(types: &[Type]) -> String {
    if types.is_empty() {
        return "nothing".to_string();
    }
    let names: Vec<String> = types.iter().map(|t| t.to_string()).collect();
    names.join(" ")
}
