use std::collections::hash_map::Entry;
use std::collections::HashMap;

use lx_core::span::Span;
use serde::{Deserialize, Serialize};

use crate::scope::ScopeStack;
use crate::symbol::SymbolIdx;
use crate::value::SymVal;

/// A binding of a symbol at some scope level. Level 0 is global.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymDef {
    pub level: u32,
    pub sym_idx: SymbolIdx,
    pub value: Option<SymVal>,
    pub loc: Span,
}

impl SymDef {
    pub fn new(level: u32, sym_idx: SymbolIdx, loc: Span) -> Self {
        Self {
            level,
            sym_idx,
            value: None,
            loc,
        }
    }

    pub fn with_value(mut self, value: SymVal) -> Self {
        self.value = Some(value);
        self
    }

    pub fn has_name(&self) -> bool {
        self.sym_idx.is_found()
    }

    pub fn is_global(&self) -> bool {
        self.level == 0
    }
}

/// Result of a define call.
#[derive(Debug)]
pub struct Defined<'a> {
    pub def: &'a mut SymDef,
    /// false when an existing definition at the same level was handed back
    pub is_new: bool,
    /// definition at the same level that `force_new` threw away
    pub replaced: Option<SymDef>,
}

impl<'a> Defined<'a> {
    fn existing(def: &'a mut SymDef) -> Self {
        Self {
            def,
            is_new: false,
            replaced: None,
        }
    }

    fn fresh(def: &'a mut SymDef, replaced: Option<SymDef>) -> Self {
        Self {
            def,
            is_new: true,
            replaced,
        }
    }

    /// A forced definition replaced one that already carried a value. Whether
    /// that is an illegal redefinition is up to the caller.
    pub fn conflicts(&self) -> bool {
        self.replaced.as_ref().is_some_and(|old| old.value.is_some())
    }

    pub fn set_value(self, value: SymVal) -> Self {
        self.def.value = Some(value);
        self
    }
}

/// Current definitions, split into the global layer and the innermost local one.
#[derive(Debug, Clone, Default)]
pub struct DefinitionStore {
    globals: HashMap<SymbolIdx, SymDef>,
    locals: HashMap<SymbolIdx, SymDef>,
}

impl DefinitionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn define_global(&mut self, idx: SymbolIdx, force_new: bool, loc: Span) -> Option<Defined<'_>> {
        if !idx.is_found() {
            return None;
        }
        let defined = match self.globals.entry(idx) {
            Entry::Occupied(entry) if !force_new => Defined::existing(entry.into_mut()),
            Entry::Occupied(mut entry) => {
                let replaced = entry.insert(SymDef::new(0, idx, loc));
                Defined::fresh(entry.into_mut(), Some(replaced))
            }
            Entry::Vacant(entry) => Defined::fresh(entry.insert(SymDef::new(0, idx, loc)), None),
        };
        Some(defined)
    }

    /// Defines `idx` in the innermost open scope, or globally when none is open.
    /// Whatever the new definition hides is recorded on `scopes` for restoration.
    pub fn define_local(
        &mut self,
        scopes: &mut ScopeStack,
        idx: SymbolIdx,
        force_new: bool,
        loc: Span,
    ) -> Option<Defined<'_>> {
        if !idx.is_found() {
            return None;
        }
        let level = scopes.level();
        if level == 0 {
            return self.define_global(idx, force_new, loc);
        }
        let defined = match self.locals.entry(idx) {
            Entry::Occupied(entry) if entry.get().level == level && !force_new => {
                Defined::existing(entry.into_mut())
            }
            Entry::Occupied(mut entry) if entry.get().level == level => {
                let replaced = entry.insert(SymDef::new(level, idx, loc));
                Defined::fresh(entry.into_mut(), Some(replaced))
            }
            Entry::Occupied(mut entry) => {
                debug_assert!(entry.get().level < level);
                let outer = entry.insert(SymDef::new(level, idx, loc));
                scopes.record(idx, Some(outer));
                Defined::fresh(entry.into_mut(), None)
            }
            Entry::Vacant(entry) => {
                scopes.record(idx, None);
                Defined::fresh(entry.insert(SymDef::new(level, idx, loc)), None)
            }
        };
        Some(defined)
    }

    /// The innermost visible definition of `idx`.
    pub fn lookup(&self, idx: SymbolIdx) -> Option<&SymDef> {
        if !idx.is_found() {
            return None;
        }
        self.locals.get(&idx).or_else(|| self.globals.get(&idx))
    }

    pub fn lookup_mut(&mut self, idx: SymbolIdx) -> Option<&mut SymDef> {
        if let Some(def) = self.locals.get_mut(&idx) {
            return Some(def);
        }
        self.globals.get_mut(&idx)
    }

    pub fn global(&self, idx: SymbolIdx) -> Option<&SymDef> {
        self.globals.get(&idx)
    }

    pub fn local(&self, idx: SymbolIdx) -> Option<&SymDef> {
        self.locals.get(&idx)
    }

    pub fn globals_len(&self) -> usize {
        self.globals.len()
    }

    pub fn locals_len(&self) -> usize {
        self.locals.len()
    }

    /// Puts back the local binding a closing scope had hidden.
    pub(crate) fn restore_local(&mut self, level: u32, idx: SymbolIdx, previous: Option<SymDef>) {
        debug_assert!(
            self.locals.get(&idx).is_some_and(|cur| cur.level == level),
            "symbol {idx} has no definition at closing level {level}"
        );
        match previous {
            Some(outer) => {
                self.locals.insert(idx, outer);
            }
            None => {
                self.locals.remove(&idx);
            }
        }
    }

    pub fn clear(&mut self) {
        self.globals.clear();
        self.locals.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::SymVal;

    const X: SymbolIdx = SymbolIdx(17);

    #[test]
    fn unnamed_symbols_are_never_defined() {
        let mut store = DefinitionStore::new();
        let mut scopes = ScopeStack::new();
        assert!(store.define_global(SymbolIdx::NOT_FOUND, false, Span::null()).is_none());
        scopes.open(Span::null());
        assert!(store
            .define_local(&mut scopes, SymbolIdx::NOT_FOUND, true, Span::null())
            .is_none());
        assert!(store.lookup(SymbolIdx::NOT_FOUND).is_none());
    }

    #[test]
    fn global_redeclaration_returns_existing() {
        let mut store = DefinitionStore::new();
        let first = Span::new(0, 1, 2);
        store
            .define_global(X, false, first)
            .unwrap()
            .set_value(SymVal::GlobalVar { idx: 0 });
        let again = store.define_global(X, false, Span::new(0, 5, 6)).unwrap();
        assert!(!again.is_new);
        assert_eq!(again.def.loc, first);
        assert_eq!(again.def.value, Some(SymVal::GlobalVar { idx: 0 }));
    }

    #[test]
    fn forced_global_reports_replacement() {
        let mut store = DefinitionStore::new();
        store.define_global(X, false, Span::null());
        let forced = store.define_global(X, true, Span::null()).unwrap();
        assert!(forced.is_new);
        assert!(forced.replaced.is_some());
        assert!(!forced.conflicts());

        store
            .define_global(X, false, Span::null())
            .unwrap()
            .set_value(SymVal::Typename { idx: 1 });
        let forced = store.define_global(X, true, Span::new(1, 0, 1)).unwrap();
        assert!(forced.conflicts());
        assert_eq!(forced.def.value, None);
        assert_eq!(store.lookup(X).unwrap().loc, Span::new(1, 0, 1));
    }

    #[test]
    fn local_at_level_zero_is_global() {
        let mut store = DefinitionStore::new();
        let mut scopes = ScopeStack::new();
        let def = store.define_local(&mut scopes, X, false, Span::null()).unwrap();
        assert!(def.def.is_global());
        assert!(store.global(X).is_some());
        assert!(store.local(X).is_none());
        assert_eq!(scopes.undo_len(), 0);
    }

    #[test]
    fn same_level_local_is_recorded_once() {
        let mut store = DefinitionStore::new();
        let mut scopes = ScopeStack::new();
        scopes.open(Span::null());
        store.define_local(&mut scopes, X, false, Span::null());
        let again = store.define_local(&mut scopes, X, false, Span::null()).unwrap();
        assert!(!again.is_new);
        let forced = store.define_local(&mut scopes, X, true, Span::null()).unwrap();
        assert!(forced.is_new);
        assert!(forced.replaced.is_some());
        assert_eq!(scopes.undo_len(), 1);
    }
}
