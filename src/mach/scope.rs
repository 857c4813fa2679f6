use std::collections::HashMap;
use std::rc::Rc;

/// ## Binding memory
///
/// A chain of frames pushed and popped in block order. Lookup walks from the
/// newest frame to the oldest, so inner bindings shadow outer ones.

#[derive(Debug, Clone)]
pub struct Scope<T> {
    frames: Vec<HashMap<Rc<str>, T>>,
}

impl<T> Default for Scope<T> {
    fn default() -> Scope<T> {
        Scope { frames: vec![] }
    }
}

impl<T> Scope<T> {
    pub fn new() -> Scope<T> {
        Scope::default()
    }

    pub fn push(&mut self) {
        self.frames.push(HashMap::new());
    }

    pub fn pop(&mut self) -> Option<HashMap<Rc<str>, T>> {
        self.frames.pop()
    }

    /// Bind in the newest frame, opening one if the chain is empty.
    pub fn insert(&mut self, name: Rc<str>, value: T) {
        if self.frames.is_empty() {
            self.push();
        }
        if let Some(frame) = self.frames.last_mut() {
            frame.insert(name, value);
        }
    }

    pub fn get(&self, name: &str) -> Option<&T> {
        self.frames.iter().rev().find_map(|frame| frame.get(name))
    }
}
