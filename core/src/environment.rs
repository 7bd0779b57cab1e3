//! Lexical scope chain shared by the analyzer and the evaluator.
//!
//! A frame maps names to bindings and links to its enclosing frame. Frames
//! are reference counted: a closure keeps the frame it was created in alive
//! after the block that created it has exited.

use core::cell::RefCell;
use core::fmt;
use std::rc::Rc;

use hashbrown::HashMap;

struct Frame<T> {
    values: RefCell<HashMap<String, T>>,
    enclosing: Option<Environment<T>>,
}

/// Handle to one frame of a scope chain. Cloning shares the frame.
pub struct Environment<T> {
    frame: Rc<Frame<T>>,
}

impl<T> Clone for Environment<T> {
    fn clone(&self) -> Self {
        Self {
            frame: Rc::clone(&self.frame),
        }
    }
}

impl<T> Environment<T> {
    /// A root frame with no enclosing scope.
    pub fn new() -> Self {
        Self::with_enclosing(None)
    }

    fn with_enclosing(enclosing: Option<Environment<T>>) -> Self {
        Self {
            frame: Rc::new(Frame {
                values: RefCell::new(HashMap::new()),
                enclosing,
            }),
        }
    }

    /// A new frame nested inside this one.
    pub fn child(&self) -> Self {
        Self::with_enclosing(Some(self.clone()))
    }

    pub fn enclosing(&self) -> Option<&Environment<T>> {
        self.frame.enclosing.as_ref()
    }

    /// Binds `name` in this frame, replacing a binding of the same name here.
    pub fn define(&self, name: impl Into<String>, value: T) {
        self.frame.values.borrow_mut().insert(name.into(), value);
    }

    /// True if this frame itself (not an ancestor) binds `name`.
    pub fn probe(&self, name: &str) -> bool {
        self.frame.values.borrow().contains_key(name)
    }

    /// Updates the nearest binding of `name`.
    ///
    /// Returns false, changing nothing, if no frame in the chain binds it.
    pub fn assign(&self, name: &str, value: T) -> bool {
        let mut env = Some(self);
        while let Some(current) = env {
            if let Some(slot) = current.frame.values.borrow_mut().get_mut(name) {
                *slot = value;
                return true;
            }
            env = current.enclosing();
        }
        false
    }

    /// The frame `distance` links outward; `ancestor(0)` is this frame.
    pub fn ancestor(&self, distance: usize) -> Option<Environment<T>> {
        let mut env = self;
        for _ in 0..distance {
            env = env.enclosing()?;
        }
        Some(env.clone())
    }

    /// Assigns in the frame exactly `distance` links outward.
    pub fn assign_at(&self, distance: usize, name: &str, value: T) -> bool {
        let Some(env) = self.ancestor(distance) else {
            return false;
        };
        let mut values = env.frame.values.borrow_mut();
        match values.get_mut(name) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// Drops every binding in this frame.
    pub fn clear(&self) {
        self.frame.values.borrow_mut().clear();
    }

    /// True if both handles refer to the same frame.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.frame, &other.frame)
    }

    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut env = self;
        while let Some(parent) = env.enclosing() {
            depth += 1;
            env = parent;
        }
        depth
    }
}

impl<T: Clone> Environment<T> {
    /// Looks `name` up from this frame outward.
    pub fn get(&self, name: &str) -> Option<T> {
        let mut env = Some(self);
        while let Some(current) = env {
            if let Some(value) = current.frame.values.borrow().get(name) {
                return Some(value.clone());
            }
            env = current.enclosing();
        }
        None
    }

    /// Looks `name` up in the frame exactly `distance` links outward.
    pub fn get_at(&self, distance: usize, name: &str) -> Option<T> {
        let env = self.ancestor(distance)?;
        let values = env.frame.values.borrow();
        values.get(name).cloned()
    }
}

impl<T> Default for Environment<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Environment<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<String> = self.frame.values.borrow().keys().cloned().collect();
        names.sort();
        f.debug_struct("Environment")
            .field("names", &names)
            .field("depth", &self.depth())
            .finish()
    }
}
