//! Lexically scoped symbol tables.
//!
//! A `Scope` is one flat map of names linked to its enclosing scope. Lookups
//! try the innermost map first and fall back outward, so an inner definition
//! shadows an outer one only for the block it is defined in and that block's
//! descendants. The same table backs both mixin and variable resolution.

use std::collections::HashMap;

#[derive(Debug)]
pub struct Scope<'p, V> {
    parent: Option<&'p Scope<'p, V>>,
    symbols: HashMap<String, V>,
}

impl<'p, V> Scope<'p, V> {
    /// The outermost scope; it has nothing to fall back to.
    pub fn root() -> Self {
        Self {
            parent: None,
            symbols: HashMap::new(),
        }
    }

    pub fn child(parent: &'p Scope<'p, V>) -> Self {
        Self {
            parent: Some(parent),
            symbols: HashMap::new(),
        }
    }

    /// Later definitions of the same name in one scope replace earlier ones.
    pub fn define(&mut self, name: impl Into<String>, value: V) {
        self.symbols.insert(name.into(), value);
    }

    pub fn lookup(&self, name: &str) -> Option<&V> {
        match self.symbols.get(name) {
            Some(value) => Some(value),
            None => self.parent.and_then(|parent| parent.lookup(name)),
        }
    }

    /// Like [`Scope::lookup`], but also returns the scope that holds the
    /// definition.
    pub fn lookup_scoped(&self, name: &str) -> Option<(&V, &Self)> {
        match self.symbols.get(name) {
            Some(value) => Some((value, self)),
            None => self.parent.and_then(|parent| parent.lookup_scoped(name)),
        }
    }
}
