//! Scope stack.
//!
//! Every local definition made while a scope is open pushes one undo entry
//! holding what it hid. Opening a scope remembers the length of the undo log;
//! closing it replays the entries above that mark newest first.

use lx_core::config;
use lx_core::span::Span;
use lx_core::{debug, trace};

use crate::def::{DefinitionStore, SymDef};
use crate::error::{Result, SymTableError};
use crate::symbol::SymbolIdx;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndoEntry {
    pub sym_idx: SymbolIdx,
    /// Local definition that was visible before, `None` if the global one was
    pub previous: Option<SymDef>,
}

#[derive(Debug, Clone, Default)]
pub struct ScopeStack {
    opened_at: Vec<Span>,
    marks: Vec<usize>,
    undo: Vec<UndoEntry>,
}

fn log_scope(action: &str, level: u32, loc: Span, restored: usize) {
    if config::trace_scopes() {
        debug!(depth = level, restored, "{} scope at {}", action, loc);
    } else {
        trace!(depth = level, restored, "{} scope at {}", action, loc);
    }
}

impl ScopeStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of open scopes.
    pub fn level(&self) -> u32 {
        self.marks.len() as u32
    }

    /// Where each open scope was opened, innermost last.
    pub fn opened_at(&self) -> &[Span] {
        &self.opened_at
    }

    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    pub fn open(&mut self, loc: Span) {
        self.opened_at.push(loc);
        self.marks.push(self.undo.len());
        log_scope("opened", self.level(), loc, 0);
    }

    pub(crate) fn record(&mut self, sym_idx: SymbolIdx, previous: Option<SymDef>) {
        debug_assert!(!self.marks.is_empty(), "undo entry outside of any scope");
        self.undo.push(UndoEntry { sym_idx, previous });
    }

    /// Closes the innermost scope and restores every binding it shadowed.
    /// Returns how many bindings were restored.
    pub fn close(&mut self, defs: &mut DefinitionStore, loc: Span) -> Result<usize> {
        let level = self.level();
        let Some(mark) = self.marks.pop() else {
            return Err(SymTableError::UnbalancedScope { at: loc });
        };
        self.opened_at.pop();
        let entries = self.undo.split_off(mark);
        let restored = entries.len();
        for entry in entries.into_iter().rev() {
            defs.restore_local(level, entry.sym_idx, entry.previous);
        }
        log_scope("closed", level, loc, restored);
        Ok(restored)
    }

    /// Fails with the innermost still-open scope, if any.
    pub fn ensure_closed(&self) -> Result<()> {
        match self.opened_at.last() {
            Some(&opened_at) => Err(SymTableError::UnclosedScope { opened_at }),
            None => Ok(()),
        }
    }

    pub fn clear(&mut self) {
        self.opened_at.clear();
        self.marks.clear();
        self.undo.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn close_without_open_is_rejected() {
        let mut scopes = ScopeStack::new();
        let mut defs = DefinitionStore::new();
        let at = Span::new(3, 10, 11);
        assert_eq!(
            scopes.close(&mut defs, at),
            Err(SymTableError::UnbalancedScope { at })
        );
        assert_eq!(scopes.level(), 0);
    }

    #[test]
    fn open_tracks_locations() {
        let mut scopes = ScopeStack::new();
        let mut defs = DefinitionStore::new();
        scopes.open(Span::new(0, 1, 1));
        scopes.open(Span::new(0, 8, 8));
        assert_eq!(scopes.level(), 2);
        assert_eq!(scopes.opened_at(), &[Span::new(0, 1, 1), Span::new(0, 8, 8)]);
        assert_eq!(
            scopes.ensure_closed(),
            Err(SymTableError::UnclosedScope {
                opened_at: Span::new(0, 8, 8)
            })
        );
        assert_eq!(scopes.close(&mut defs, Span::null()), Ok(0));
        assert_eq!(scopes.close(&mut defs, Span::null()), Ok(0));
        assert_eq!(scopes.ensure_closed(), Ok(()));
    }

    #[test]
    fn close_restores_only_its_own_entries() {
        let mut scopes = ScopeStack::new();
        let mut defs = DefinitionStore::new();
        let (a, b) = (SymbolIdx(1), SymbolIdx(2));
        scopes.open(Span::null());
        defs.define_local(&mut scopes, a, false, Span::null());
        scopes.open(Span::null());
        defs.define_local(&mut scopes, a, false, Span::null());
        defs.define_local(&mut scopes, b, false, Span::null());
        assert_eq!(scopes.undo_len(), 3);

        assert_eq!(scopes.close(&mut defs, Span::null()), Ok(2));
        assert_eq!(defs.lookup(a).map(|d| d.level), Some(1));
        assert!(defs.lookup(b).is_none());
        assert_eq!(scopes.undo_len(), 1);

        assert_eq!(scopes.close(&mut defs, Span::null()), Ok(1));
        assert!(defs.lookup(a).is_none());
    }
}
