use super::Address;
use crate::lang::Location;
use rust_decimal::Decimal;
use std::rc::Rc;

/// ## Virtual machine instruction set
///
/// The machine has no registers. Every operation is performed on the
/// operand stack; blocks are flat and carry the absolute tape addresses
/// of their boundaries.
///
/// For example: `3 4 + pr` associates to
/// `[NumberLiteral(3), NumberLiteral(4), Call(+), Call(pr)]`

#[derive(Clone, PartialEq)]
pub enum Opcode {
    // *** Literals
    NumberLiteral(Decimal),
    StringLiteral(Rc<str>),

    // *** Blocks
    /// Pop a number; run the consequent when it is at least 1.
    If {
        else_ip: Option<Address>,
        end_ip: Address,
    },
    /// Pop a count and run `(start_ip, end_ip)` that many times.
    Repeat { start_ip: Address, end_ip: Address },
    /// Run `(predicate_ip, body_ip)`, pop a number, stop on zero, else run
    /// `(body_ip, end_ip)` and go again.
    While {
        predicate_ip: Address,
        body_ip: Address,
        end_ip: Address,
    },
    /// Open a scope frame and pop one value per name, last name first.
    LetBinding(Rc<[Rc<str>]>),
    /// Close the scope frame opened by the matching `LetBinding`.
    DropBinding(Rc<[Rc<str>]>),
    /// Open a single-slot mutable cell until `end_ip`.
    VarDefine { name: Rc<str>, end_ip: Address },
    VarDrop,

    // *** Functions
    Call(Rc<str>),
    FunctionStart,
    Function(Rc<FunctionDef>),
    Return,
    Import(Rc<str>),

    Noop,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    pub name: Rc<str>,
    pub inputs: Vec<Rc<str>>,
    pub outputs: Vec<Rc<str>>,
    pub start_ip: Address,
    pub end_ip: Address,
}

impl Opcode {
    /// Shift every absolute address by `offset`. Used when a module's tape
    /// is spliced behind another one.
    pub fn rebase(&mut self, offset: Address) {
        use Opcode::*;
        match self {
            If { else_ip, end_ip } => {
                if let Some(ip) = else_ip {
                    *ip += offset;
                }
                *end_ip += offset;
            }
            Repeat { start_ip, end_ip } => {
                *start_ip += offset;
                *end_ip += offset;
            }
            While {
                predicate_ip,
                body_ip,
                end_ip,
            } => {
                *predicate_ip += offset;
                *body_ip += offset;
                *end_ip += offset;
            }
            VarDefine { end_ip, .. } => *end_ip += offset,
            Function(def) => {
                let def = Rc::make_mut(def);
                def.start_ip += offset;
                def.end_ip += offset;
            }
            _ => {}
        }
    }
}

impl std::fmt::Debug for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_string())
    }
}

impl std::fmt::Display for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Opcode::*;
        match self {
            NumberLiteral(n) => write!(f, "number {}", n),
            StringLiteral(s) => write!(f, "string {:?}", s),
            If {
                else_ip: Some(else_ip),
                end_ip,
            } => write!(f, "if -> {} -> {}", else_ip, end_ip),
            If { end_ip, .. } => write!(f, "if -> {}", end_ip),
            Repeat { start_ip, end_ip } => write!(f, "repeat {} -> {}", start_ip, end_ip),
            While {
                predicate_ip,
                body_ip,
                end_ip,
            } => write!(f, "while {} -> {} -> {}", predicate_ip, body_ip, end_ip),
            LetBinding(names) => write!(f, "let {}", names.join(" ")),
            DropBinding(names) => write!(f, "drop-let {}", names.join(" ")),
            VarDefine { name, end_ip } => write!(f, "var {} -> {}", name, end_ip),
            VarDrop => write!(f, "var-drop"),
            Call(name) => write!(f, "call {}", name),
            FunctionStart => write!(f, "fn-start"),
            Function(def) => write!(
                f,
                "fn {} {} : {} -> {} -> {}",
                def.name,
                def.inputs.join(" "),
                def.outputs.join(" "),
                def.start_ip,
                def.end_ip
            ),
            Return => write!(f, "return"),
            Import(path) => write!(f, "import {}", path),
            Noop => write!(f, "noop"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Instruction {
    pub opcode: Opcode,
    pub loc: Location,
}

impl Instruction {
    pub fn new(opcode: Opcode, loc: Location) -> Instruction {
        Instruction { opcode, loc }
    }
}

/// ## Instruction tape
///
/// Flat and append-only. The only in-place writes are the one-time
/// back-patches of block boundaries made by the associator.

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tape {
    instructions: Vec<Instruction>,
}

impl Tape {
    pub fn new() -> Tape {
        Tape::default()
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn get(&self, ip: Address) -> Option<&Instruction> {
        self.instructions.get(ip)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Instruction> {
        self.instructions.iter()
    }

    pub fn opcodes(&self) -> Vec<&Opcode> {
        self.instructions.iter().map(|i| &i.opcode).collect()
    }

    pub(crate) fn push(&mut self, opcode: Opcode, loc: Location) -> Address {
        self.instructions.push(Instruction::new(opcode, loc));
        self.instructions.len() - 1
    }

    pub(crate) fn get_mut(&mut self, ip: Address) -> Option<&mut Instruction> {
        self.instructions.get_mut(ip)
    }

    /// Rebase `other` to start at the end of this tape, then append it.
    pub(crate) fn splice(&mut self, other: Tape) {
        let offset = self.len();
        for mut instruction in other.instructions {
            instruction.opcode.rebase(offset);
            self.instructions.push(instruction);
        }
    }
}
