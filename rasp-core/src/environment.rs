//! Lexically-scoped variable frames.
//!
//! A frame is a local symbol→value mapping plus an optional parent. Frames
//! form a tree rooted at the one global frame created at startup; closures
//! keep their defining frame alive by holding a handle to it.

use std::sync::{Arc, RwLock};

use rustc_hash::FxHashMap;

use crate::interner::Symbol;
use crate::language::Value;

struct Frame {
    bindings: FxHashMap<Symbol, Value>,
    parent: Option<Environment>,
}

/// A shared handle to one frame in the scope tree.
///
/// Cloning is an `Arc` increment, so closures capture their defining frame
/// by reference, and a frame stays alive exactly as long as some closure or
/// in-flight call still references it or a descendant.
#[derive(Clone)]
pub struct Environment {
    frame: Arc<RwLock<Frame>>,
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment {
    /// Create a fresh root frame.
    pub fn new() -> Self {
        Environment {
            frame: Arc::new(RwLock::new(Frame {
                bindings: FxHashMap::default(),
                parent: None,
            })),
        }
    }

    /// Create a child frame binding `params` to `args` positionally.
    ///
    /// Zipping stops at the shorter side: extra arguments are dropped and
    /// leftover parameters stay unbound.
    pub fn extend(&self, params: &[Symbol], args: &[Value]) -> Self {
        let mut bindings = FxHashMap::default();
        for (param, arg) in params.iter().zip(args.iter()) {
            bindings.insert(*param, arg.clone());
        }

        Environment {
            frame: Arc::new(RwLock::new(Frame {
                bindings,
                parent: Some(self.clone()),
            })),
        }
    }

    /// Insert or overwrite a binding in this frame only; enclosing frames
    /// are never mutated.
    pub fn define(&self, name: Symbol, value: Value) {
        self.frame.write().unwrap().bindings.insert(name, value);
    }

    /// Look a symbol up here, then delegate outward through the parents.
    pub fn lookup(&self, name: Symbol) -> Option<Value> {
        let frame = self.frame.read().unwrap();

        if let Some(value) = frame.bindings.get(&name) {
            return Some(value.clone());
        }

        match &frame.parent {
            Some(parent) => parent.lookup(name),
            None => None,
        }
    }
}
