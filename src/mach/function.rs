use super::{Address, FunctionDef, Heap, Operation, Stack, Tape, Type, Val};
use crate::lang::Error;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::convert::TryFrom;
use std::rc::Rc;

type Result<T> = std::result::Result<T, Error>;

/// What the runtime must do after a builtin returns.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Continue,
    Print(String),
    Input(InputKind, String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Number,
    String,
}

pub type Handler = fn(&mut Stack<Val>, &mut Heap) -> Result<Effect>;

/// ## Builtin
///
/// A natively implemented word. `inputs` are listed deepest first, the way
/// they sit on the stack.

pub struct Builtin {
    pub name: &'static str,
    pub inputs: &'static [Type],
    pub outputs: &'static [Type],
    handler: Handler,
}

impl Builtin {
    pub fn find(name: &str) -> Option<&'static Builtin> {
        BUILTINS.iter().find(|b| b.name == name)
    }

    pub fn call(&self, stack: &mut Stack<Val>, heap: &mut Heap) -> Result<Effect> {
        (self.handler)(stack, heap)
    }
}

impl std::fmt::Debug for Builtin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Builtin({})", self.name)
    }
}

use Type::{Any, Number as N, Pointer as P, String as S};

macro_rules! builtin {
    ($name:expr, [$($i:expr),*], [$($o:expr),*], $handler:expr) => {
        Builtin {
            name: $name,
            inputs: &[$($i),*],
            outputs: &[$($o),*],
            handler: $handler,
        }
    };
}

pub static BUILTINS: &[Builtin] = &[
    builtin!("+", [N, N], [N], add),
    builtin!("-", [N, N], [N], subtract),
    builtin!("*", [N, N], [N], multiply),
    builtin!("/", [N, N], [N], divide),
    builtin!("^", [N, N], [N], power),
    builtin!("sqrt", [N], [N], sqrt),
    builtin!("floor", [N], [N], floor),
    builtin!("ceil", [N], [N], ceil),
    builtin!("round", [N], [N], round),
    builtin!("is-integer", [N], [N], is_integer),
    builtin!("str+", [S, S], [S], concat),
    builtin!("ptr+", [P, N], [P], offset),
    builtin!("==", [Any, Any], [N], equal),
    builtin!("!=", [Any, Any], [N], not_equal),
    builtin!(">", [N, N], [N], greater),
    builtin!(">=", [N, N], [N], greater_equal),
    builtin!("<", [N, N], [N], less),
    builtin!("<=", [N, N], [N], less_equal),
    builtin!("&&", [N, N], [N], and),
    builtin!("||", [N, N], [N], or),
    builtin!("lnot", [N], [N], not),
    builtin!("dup", [Any], [Any, Any], dup),
    builtin!("swap", [Any, Any], [Any, Any], swap),
    builtin!("drop", [Any], [], drop),
    builtin!("str2num", [S], [N], str2num),
    builtin!("num2str", [N], [S], num2str),
    builtin!("str2countstr", [S], [P, N], str2countstr),
    builtin!("ipn", [Any], [N], input_number),
    builtin!("ips", [Any], [S], input_string),
    builtin!("pr", [Any], [], print),
    builtin!("memalloc", [N], [P], memalloc),
    builtin!("memfree", [P], [], memfree),
    builtin!("memsave", [Any, P], [], memsave),
    builtin!("memload", [P], [Any], memload),
    builtin!("???", [], [], inspect),
];

macro_rules! unary {
    ($name:ident, $op:path) => {
        fn $name(stack: &mut Stack<Val>, _: &mut Heap) -> Result<Effect> {
            let val = stack.pop()?;
            stack.push($op(val)?)?;
            Ok(Effect::Continue)
        }
    };
}

macro_rules! binary {
    ($name:ident, $op:path) => {
        fn $name(stack: &mut Stack<Val>, _: &mut Heap) -> Result<Effect> {
            let (lhs, rhs) = stack.pop_2()?;
            stack.push($op(lhs, rhs)?)?;
            Ok(Effect::Continue)
        }
    };
}

binary!(add, Operation::add);
binary!(subtract, Operation::subtract);
binary!(multiply, Operation::multiply);
binary!(divide, Operation::divide);
binary!(power, Operation::power);
unary!(sqrt, Operation::sqrt);
unary!(floor, Operation::floor);
unary!(ceil, Operation::ceil);
unary!(round, Operation::round);
unary!(is_integer, Operation::is_integer);
binary!(concat, Operation::concat);
binary!(offset, Operation::offset);
binary!(equal, Operation::equal);
binary!(not_equal, Operation::not_equal);
binary!(greater, Operation::greater);
binary!(greater_equal, Operation::greater_equal);
binary!(less, Operation::less);
binary!(less_equal, Operation::less_equal);
binary!(and, Operation::and);
binary!(or, Operation::or);
unary!(not, Operation::not);
unary!(str2num, Operation::str2num);
unary!(num2str, Operation::num2str);

fn dup(stack: &mut Stack<Val>, _: &mut Heap) -> Result<Effect> {
    stack.dup()?;
    Ok(Effect::Continue)
}

fn swap(stack: &mut Stack<Val>, _: &mut Heap) -> Result<Effect> {
    stack.swap()?;
    Ok(Effect::Continue)
}

fn drop(stack: &mut Stack<Val>, _: &mut Heap) -> Result<Effect> {
    stack.pop()?;
    Ok(Effect::Continue)
}

/// One single-character string per slot; pushes the pointer, then the count.
fn str2countstr(stack: &mut Stack<Val>, heap: &mut Heap) -> Result<Effect> {
    let s = Rc::<str>::try_from(stack.pop()?)?;
    let count = s.chars().count();
    let pointer = heap.alloc(count)?;
    for (index, ch) in s.chars().enumerate() {
        heap.save(pointer + index, Val::String(ch.to_string().into()))?;
    }
    stack.push(Val::Pointer(pointer))?;
    stack.push(Val::Number(Decimal::from(count)))?;
    Ok(Effect::Continue)
}

fn input_number(stack: &mut Stack<Val>, _: &mut Heap) -> Result<Effect> {
    let prompt = stack.pop()?;
    Ok(Effect::Input(InputKind::Number, prompt.to_prompt()))
}

fn input_string(stack: &mut Stack<Val>, _: &mut Heap) -> Result<Effect> {
    let prompt = stack.pop()?;
    Ok(Effect::Input(InputKind::String, prompt.to_prompt()))
}

fn print(stack: &mut Stack<Val>, _: &mut Heap) -> Result<Effect> {
    Ok(Effect::Print(stack.pop()?.to_string()))
}

/// Print the runtime types on the stack, deepest first.
fn inspect(stack: &mut Stack<Val>, _: &mut Heap) -> Result<Effect> {
    let names: Vec<&str> = stack.iter().map(|val| val.type_name()).collect();
    Ok(Effect::Print(format!("[{}]\n", names.join(" "))))
}

fn memalloc(stack: &mut Stack<Val>, heap: &mut Heap) -> Result<Effect> {
    let size = Operation::size(stack.pop()?)?;
    stack.push(Val::Pointer(heap.alloc(size)?))?;
    Ok(Effect::Continue)
}

fn memfree(stack: &mut Stack<Val>, heap: &mut Heap) -> Result<Effect> {
    let pointer = Address::try_from(stack.pop()?)?;
    heap.free(pointer)?;
    Ok(Effect::Continue)
}

fn memsave(stack: &mut Stack<Val>, heap: &mut Heap) -> Result<Effect> {
    let (value, pointer) = stack.pop_2()?;
    heap.save(Address::try_from(pointer)?, value)?;
    Ok(Effect::Continue)
}

fn memload(stack: &mut Stack<Val>, heap: &mut Heap) -> Result<Effect> {
    let pointer = Address::try_from(stack.pop()?)?;
    stack.push(heap.load(pointer)?)?;
    Ok(Effect::Continue)
}

/// A function defined in source, bound to the tape it was defined on.
#[derive(Debug, Clone)]
pub struct UserFunction {
    pub tape: Rc<Tape>,
    pub def: Rc<FunctionDef>,
}

#[derive(Debug, Clone)]
pub enum Callable {
    Builtin(&'static Builtin),
    User(UserFunction),
}

/// ## Function table
///
/// Name to callable. Later definitions and merges replace earlier ones.

#[derive(Debug, Clone, Default)]
pub struct Functions {
    map: HashMap<Rc<str>, Callable>,
}

impl Functions {
    pub fn with_builtins() -> Functions {
        let mut functions = Functions::default();
        for builtin in BUILTINS {
            functions.insert(builtin.name.into(), Callable::Builtin(builtin));
        }
        functions
    }

    pub fn get(&self, name: &str) -> Option<&Callable> {
        self.map.get(name)
    }

    pub fn insert(&mut self, name: Rc<str>, callable: Callable) {
        self.map.insert(name, callable);
    }

    pub fn merge(&mut self, other: Functions) {
        self.map.extend(other.map);
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
