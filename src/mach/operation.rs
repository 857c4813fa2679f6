use super::{Address, Val};
use crate::error;
use crate::lang::Error;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, MathematicalOps, RoundingStrategy};
use std::convert::TryFrom;
use std::str::FromStr;

type Result<T> = std::result::Result<T, Error>;

pub struct Operation {}

impl Operation {
    fn numbers(name: &str, lhs: Val, rhs: Val) -> Result<(Decimal, Decimal)> {
        match (lhs, rhs) {
            (Val::Number(l), Val::Number(r)) => Ok((l, r)),
            (l, r) => Err(error!(TypeMismatch; format!(
                "`{}` takes only number + number, instead got {}, {}",
                name,
                l.type_name(),
                r.type_name()
            ))),
        }
    }

    fn number(name: &str, val: Val) -> Result<Decimal> {
        match val {
            Val::Number(n) => Ok(n),
            other => Err(error!(TypeMismatch; format!(
                "`{}` takes only number, instead got {}",
                name,
                other.type_name()
            ))),
        }
    }

    fn overflow(name: &str) -> Error {
        error!(Overflow; format!("result of `{}` does not fit", name))
    }

    pub fn add(lhs: Val, rhs: Val) -> Result<Val> {
        let (l, r) = Operation::numbers("+", lhs, rhs)?;
        l.checked_add(r).map(Val::Number).ok_or_else(|| Operation::overflow("+"))
    }

    pub fn subtract(lhs: Val, rhs: Val) -> Result<Val> {
        let (l, r) = Operation::numbers("-", lhs, rhs)?;
        l.checked_sub(r).map(Val::Number).ok_or_else(|| Operation::overflow("-"))
    }

    pub fn multiply(lhs: Val, rhs: Val) -> Result<Val> {
        let (l, r) = Operation::numbers("*", lhs, rhs)?;
        l.checked_mul(r).map(Val::Number).ok_or_else(|| Operation::overflow("*"))
    }

    pub fn divide(lhs: Val, rhs: Val) -> Result<Val> {
        let (l, r) = Operation::numbers("/", lhs, rhs)?;
        if r.is_zero() {
            return Err(error!(DivisionByZero));
        }
        l.checked_div(r).map(Val::Number).ok_or_else(|| Operation::overflow("/"))
    }

    pub fn power(lhs: Val, rhs: Val) -> Result<Val> {
        let (l, r) = Operation::numbers("^", lhs, rhs)?;
        l.checked_powd(r).map(Val::Number).ok_or_else(|| Operation::overflow("^"))
    }

    pub fn sqrt(val: Val) -> Result<Val> {
        let n = Operation::number("sqrt", val)?;
        match n.sqrt() {
            Some(root) => Ok(Val::Number(root)),
            None => Err(error!(InvalidNumber; format!("no square root of {}", n))),
        }
    }

    pub fn floor(val: Val) -> Result<Val> {
        Ok(Val::Number(Operation::number("floor", val)?.floor()))
    }

    pub fn ceil(val: Val) -> Result<Val> {
        Ok(Val::Number(Operation::number("ceil", val)?.ceil()))
    }

    pub fn round(val: Val) -> Result<Val> {
        let n = Operation::number("round", val)?;
        Ok(Val::Number(half_away(n)))
    }

    pub fn is_integer(val: Val) -> Result<Val> {
        let n = Operation::number("is-integer", val)?;
        Ok(Val::truth(n.fract().is_zero()))
    }

    pub fn concat(lhs: Val, rhs: Val) -> Result<Val> {
        match (lhs, rhs) {
            (Val::String(l), Val::String(r)) => Ok(Val::String(format!("{}{}", l, r).into())),
            (l, r) => Err(error!(TypeMismatch; format!(
                "`str+` takes only string + string, instead got {}, {}",
                l.type_name(),
                r.type_name()
            ))),
        }
    }

    /// Pointer plus a number rounded to the nearest slot.
    pub fn offset(lhs: Val, rhs: Val) -> Result<Val> {
        let (base, delta) = match (lhs, rhs) {
            (Val::Pointer(p), Val::Number(n)) => (p, n),
            (l, r) => {
                return Err(error!(TypeMismatch; format!(
                    "`ptr+` takes only ptr + number, instead got {}, {}",
                    l.type_name(),
                    r.type_name()
                )))
            }
        };
        let target = half_away(delta)
            .to_i128()
            .and_then(|d| d.checked_add(base as i128));
        match target.and_then(|t| Address::try_from(t).ok()) {
            Some(address) => Ok(Val::Pointer(address)),
            None => Err(error!(InvalidPointer; format!("{} moved by {} is not an address", base, delta))),
        }
    }

    pub fn equal(lhs: Val, rhs: Val) -> Result<Val> {
        Ok(Val::truth(lhs == rhs))
    }

    pub fn not_equal(lhs: Val, rhs: Val) -> Result<Val> {
        Ok(Val::truth(lhs != rhs))
    }

    pub fn greater(lhs: Val, rhs: Val) -> Result<Val> {
        let (l, r) = Operation::numbers(">", lhs, rhs)?;
        Ok(Val::truth(l > r))
    }

    pub fn greater_equal(lhs: Val, rhs: Val) -> Result<Val> {
        let (l, r) = Operation::numbers(">=", lhs, rhs)?;
        Ok(Val::truth(l >= r))
    }

    pub fn less(lhs: Val, rhs: Val) -> Result<Val> {
        let (l, r) = Operation::numbers("<", lhs, rhs)?;
        Ok(Val::truth(l < r))
    }

    pub fn less_equal(lhs: Val, rhs: Val) -> Result<Val> {
        let (l, r) = Operation::numbers("<=", lhs, rhs)?;
        Ok(Val::truth(l <= r))
    }

    pub fn and(lhs: Val, rhs: Val) -> Result<Val> {
        let (l, r) = Operation::numbers("&&", lhs, rhs)?;
        Ok(Val::truth(l > Decimal::ZERO && r > Decimal::ZERO))
    }

    pub fn or(lhs: Val, rhs: Val) -> Result<Val> {
        let (l, r) = Operation::numbers("||", lhs, rhs)?;
        Ok(Val::truth(l > Decimal::ZERO || r > Decimal::ZERO))
    }

    pub fn not(val: Val) -> Result<Val> {
        let n = Operation::number("lnot", val)?;
        Ok(Val::truth(n < Decimal::ONE))
    }

    pub fn parse_number(s: &str) -> Result<Decimal> {
        let trimmed = s.trim();
        Decimal::from_str(trimmed)
            .map_err(|_| error!(InvalidNumber; format!("{:?} is not a number", trimmed)))
    }

    pub fn str2num(val: Val) -> Result<Val> {
        match val {
            Val::String(s) => Ok(Val::Number(Operation::parse_number(&s)?)),
            other => Err(error!(TypeMismatch; format!(
                "`str2num` takes only string, instead got {}",
                other.type_name()
            ))),
        }
    }

    pub fn num2str(val: Val) -> Result<Val> {
        let n = Operation::number("num2str", val)?;
        Ok(Val::String(n.normalize().to_string().into()))
    }

    /// Truncated iteration count. Negative counts run zero times.
    pub fn count(val: Val) -> Result<usize> {
        let n = Operation::number("repeat", val)?.trunc();
        if n.is_sign_negative() {
            return Ok(0);
        }
        n.to_usize()
            .ok_or_else(|| error!(Overflow; format!("cannot repeat {} times", n)))
    }

    /// Floored slot count for an allocation.
    pub fn size(val: Val) -> Result<usize> {
        let n = Operation::number("memalloc", val)?;
        n.floor()
            .to_usize()
            .ok_or_else(|| error!(InvalidAllocation; format!("cannot allocate {} slots", n)))
    }
}

fn half_away(n: Decimal) -> Decimal {
    n.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}
