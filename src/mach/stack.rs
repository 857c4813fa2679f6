use crate::error;
use crate::lang::Error;

type Result<T> = std::result::Result<T, Error>;

/// ## Stack enforced and size limited vector

#[derive(Clone)]
pub struct Stack<T> {
    overflow_message: &'static str,
    vec: Vec<T>,
}

impl<T: std::fmt::Debug> std::fmt::Debug for Stack<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.vec)
    }
}

impl<T> Stack<T> {
    pub fn new(overflow_message: &'static str) -> Stack<T> {
        Stack {
            overflow_message,
            vec: vec![],
        }
    }
    fn max_len(&self) -> usize {
        u16::max_value() as usize
    }
    fn overflow_check(&self) -> Result<()> {
        if self.vec.len() > self.max_len() {
            Err(error!(Overflow; self.overflow_message))
        } else {
            Ok(())
        }
    }
    fn underflow_error(&self, wanted: usize) -> Error {
        error!(StackUnderflow; format!(
            "needed {} value(s), found {}",
            wanted,
            self.vec.len()
        ))
    }
    pub fn len(&self) -> usize {
        self.vec.len()
    }
    pub fn is_empty(&self) -> bool {
        self.vec.is_empty()
    }
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.vec.iter()
    }
    /// The top `len` entries, deepest first.
    pub fn top(&self, len: usize) -> Result<&[T]> {
        if len > self.vec.len() {
            Err(self.underflow_error(len))
        } else {
            Ok(&self.vec[self.vec.len() - len..])
        }
    }
    pub fn push(&mut self, val: T) -> Result<()> {
        self.vec.push(val);
        self.overflow_check()
    }
    pub fn pop(&mut self) -> Result<T> {
        match self.vec.pop() {
            Some(v) => Ok(v),
            None => Err(self.underflow_error(1)),
        }
    }
    pub fn pop_2(&mut self) -> Result<(T, T)> {
        if self.vec.len() < 2 {
            return Err(self.underflow_error(2));
        }
        let two = self.pop()?;
        let one = self.pop()?;
        Ok((one, two))
    }
    /// Remove the top `len` entries, deepest first.
    pub fn pop_n(&mut self, len: usize) -> Result<Vec<T>> {
        if len > self.vec.len() {
            Err(self.underflow_error(len))
        } else {
            let range = (self.vec.len() - len)..;
            Ok(self.vec.drain(range).collect())
        }
    }
}

impl<T: Clone> Stack<T> {
    pub fn dup(&mut self) -> Result<()> {
        let top = match self.vec.last() {
            Some(v) => v.clone(),
            None => return Err(self.underflow_error(1)),
        };
        self.push(top)
    }
    pub fn swap(&mut self) -> Result<()> {
        let (one, two) = self.pop_2()?;
        self.vec.push(two);
        self.vec.push(one);
        Ok(())
    }
    pub fn to_vec(&self) -> Vec<T> {
        self.vec.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pop_2_keeps_order() {
        let mut s: Stack<i32> = Stack::new("TEST");
        s.push(1).unwrap();
        s.push(2).unwrap();
        assert_eq!(s.pop_2().unwrap(), (1, 2));
        assert!(s.is_empty());
    }

    #[test]
    fn test_underflow_leaves_stack_intact() {
        let mut s: Stack<i32> = Stack::new("TEST");
        s.push(1).unwrap();
        assert!(s.pop_2().is_err());
        assert_eq!(s.len(), 1);
        assert!(s.pop_n(2).is_err());
        assert_eq!(s.pop_n(1).unwrap(), vec![1]);
    }

    #[test]
    fn test_swap_and_dup() {
        let mut s: Stack<i32> = Stack::new("TEST");
        s.push(1).unwrap();
        s.push(2).unwrap();
        s.swap().unwrap();
        s.dup().unwrap();
        assert_eq!(s.to_vec(), vec![2, 1, 1]);
    }
}
