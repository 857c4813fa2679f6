use super::Address;
use crate::error;
use crate::lang::Error;
use rust_decimal::Decimal;
use std::convert::TryFrom;
use std::rc::Rc;

type Result<T> = std::result::Result<T, Error>;

/// ## Runtime value

#[derive(Debug, Clone)]
pub enum Val {
    Number(Decimal),
    String(Rc<str>),
    Pointer(Address),
}

impl Val {
    pub fn type_name(&self) -> &'static str {
        match self {
            Val::Number(_) => "number",
            Val::String(_) => "string",
            Val::Pointer(_) => "ptr",
        }
    }

    pub fn truth(b: bool) -> Val {
        if b {
            Val::Number(Decimal::ONE)
        } else {
            Val::Number(Decimal::ZERO)
        }
    }

    /// Text shown when the value is used as an input prompt.
    pub fn to_prompt(&self) -> String {
        match self {
            Val::Pointer(p) => format!("<ptr: {}>", p),
            _ => self.to_string(),
        }
    }
}

/// Values of different tags are never equal. Numbers compare by value,
/// so `2.50` equals `2.5`.
impl PartialEq for Val {
    fn eq(&self, other: &Val) -> bool {
        match (self, other) {
            (Val::Number(l), Val::Number(r)) => l == r,
            (Val::String(l), Val::String(r)) => l == r,
            (Val::Pointer(l), Val::Pointer(r)) => l == r,
            _ => false,
        }
    }
}

impl std::fmt::Display for Val {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Val::Number(n) => write!(f, "{}", n.normalize()),
            Val::String(s) => write!(f, "{}", s),
            Val::Pointer(p) => write!(f, "{}", p),
        }
    }
}

impl From<Decimal> for Val {
    fn from(n: Decimal) -> Val {
        Val::Number(n)
    }
}

impl From<&str> for Val {
    fn from(s: &str) -> Val {
        Val::String(s.into())
    }
}

impl TryFrom<Val> for Decimal {
    type Error = Error;
    fn try_from(val: Val) -> Result<Decimal> {
        match val {
            Val::Number(n) => Ok(n),
            other => Err(error!(TypeMismatch; format!("expected number, found {}", other.type_name()))),
        }
    }
}

impl TryFrom<Val> for Rc<str> {
    type Error = Error;
    fn try_from(val: Val) -> Result<Rc<str>> {
        match val {
            Val::String(s) => Ok(s),
            other => Err(error!(TypeMismatch; format!("expected string, found {}", other.type_name()))),
        }
    }
}

impl TryFrom<Val> for Address {
    type Error = Error;
    fn try_from(val: Val) -> Result<Address> {
        match val {
            Val::Pointer(p) => Ok(p),
            other => Err(error!(TypeMismatch; format!("expected ptr, found {}", other.type_name()))),
        }
    }
}
