use std::fmt;
use std::sync::RwLock;

use once_cell::sync::Lazy;
use string_interner::{DefaultBackend, DefaultSymbol, StringInterner};

// Process-wide symbol table. Interning makes symbol equality a key compare.
static INTERNER: Lazy<RwLock<StringInterner<DefaultBackend>>> =
    Lazy::new(|| RwLock::new(StringInterner::default()));

/// An interned symbol name.
///
/// `Symbol` is a `Copy` handle into the global interner; two symbols are
/// equal exactly when their names are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Symbol(DefaultSymbol);

impl Symbol {
    /// Intern `name`, returning the handle for it.
    pub fn intern(name: &str) -> Self {
        let mut interner = INTERNER.write().unwrap();
        Symbol(interner.get_or_intern(name))
    }

    /// Resolve the symbol back to its name, allocating a fresh `String`.
    pub fn resolve(&self) -> String {
        self.with_str(str::to_string)
    }

    /// Run `f` against the name without allocating.
    pub fn with_str<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&str) -> R,
    {
        let interner = INTERNER.read().unwrap();
        let name = interner
            .resolve(self.0)
            .expect("interned symbol is always resolvable");
        f(name)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.with_str(|name| write!(f, "{name}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_name_interns_to_same_symbol() {
        assert_eq!(Symbol::intern("car"), Symbol::intern("car"));
    }

    #[test]
    fn different_names_intern_to_different_symbols() {
        assert_ne!(Symbol::intern("car"), Symbol::intern("cdr"));
    }

    #[test]
    fn resolve_returns_the_original_name() {
        assert_eq!(Symbol::intern("make-adder").resolve(), "make-adder");
    }

    #[test]
    fn with_str_avoids_the_allocation() {
        let sym = Symbol::intern("lambda");
        assert_eq!(sym.with_str(str::len), 6);
    }

    #[test]
    fn display_prints_the_name() {
        assert_eq!(format!("{}", Symbol::intern("null?")), "null?");
    }
}
