use lx_core::assert_expr;
use lx_core::config::SymTableConfig;
use lx_core::debug;
use lx_core::span::Span;

use crate::def::{Defined, DefinitionStore, SymDef};
use crate::error::Result;
use crate::scope::ScopeStack;
use crate::symbol::{Symbol, SymbolIdx, SymbolSubclass};
use crate::table::SymTable;

/// Symbols, definitions and scopes of one compilation unit.
///
/// The parser owns one of these and threads it through by `&mut`.
#[derive(Debug, Clone, Default)]
pub struct SymbolContext {
    symbols: SymTable,
    defs: DefinitionStore,
    scopes: ScopeStack,
}

impl SymbolContext {
    pub fn new(config: SymTableConfig) -> lx_core::Result<Self> {
        Ok(Self {
            symbols: SymTable::new(config)?,
            defs: DefinitionStore::new(),
            scopes: ScopeStack::new(),
        })
    }

    pub fn symbols(&self) -> &SymTable {
        &self.symbols
    }

    pub fn definitions(&self) -> &DefinitionStore {
        &self.defs
    }

    pub fn scopes(&self) -> &ScopeStack {
        &self.scopes
    }

    pub fn intern(&mut self, text: &str) -> Result<SymbolIdx> {
        self.symbols.lookup_add(text)
    }

    pub fn lookup_name(&self, text: &str) -> SymbolIdx {
        self.symbols.lookup(text)
    }

    pub fn add_keyword(&mut self, text: &str) -> Result<SymbolIdx> {
        self.symbols.add_keyword(text)
    }

    /// Registers a batch of keywords under consecutive ids.
    pub fn add_keywords<'a>(&mut self, texts: impl IntoIterator<Item = &'a str>) -> Result<()> {
        for text in texts {
            self.symbols.add_keyword(text)?;
        }
        Ok(())
    }

    pub fn get_keyword(&self, id: u32) -> Option<SymbolIdx> {
        self.symbols.get_keyword(id)
    }

    pub fn is_keyword(&self, idx: SymbolIdx) -> bool {
        self.symbols.is_keyword(idx)
    }

    pub fn symbol(&self, idx: SymbolIdx) -> Option<&Symbol> {
        self.symbols.symbol(idx)
    }

    pub fn get_name(&self, idx: SymbolIdx) -> String {
        self.symbols.get_name(idx)
    }

    pub fn get_subclass(&self, idx: SymbolIdx) -> SymbolSubclass {
        self.symbols.get_subclass(idx)
    }

    pub fn def_name(&self, def: &SymDef) -> String {
        self.symbols.get_name(def.sym_idx)
    }

    pub fn scope_level(&self) -> u32 {
        self.scopes.level()
    }

    pub fn scope_opened_at(&self) -> &[Span] {
        self.scopes.opened_at()
    }

    pub fn open_scope(&mut self, loc: Span) {
        self.scopes.open(loc);
    }

    /// Closes the innermost scope.
    ///
    /// # Panics
    ///
    /// If no scope is open; opens and closes must balance.
    pub fn close_scope(&mut self, loc: Span) {
        let closed = self.try_close_scope(loc);
        assert_expr!(closed.is_ok(), "cannot close the outer scope at {}", loc);
    }

    pub fn try_close_scope(&mut self, loc: Span) -> Result<()> {
        self.scopes.close(&mut self.defs, loc).map(|_| ())
    }

    /// Fails if a scope is still open, naming the innermost one.
    pub fn ensure_scopes_closed(&self) -> Result<()> {
        self.scopes.ensure_closed()
    }

    pub fn define_global_symbol(&mut self, idx: SymbolIdx, force_new: bool, loc: Span) -> Option<Defined<'_>> {
        self.defs.define_global(idx, force_new, loc)
    }

    /// Defines `idx` in the innermost open scope (globally at level 0).
    pub fn define_symbol(&mut self, idx: SymbolIdx, force_new: bool, loc: Span) -> Option<Defined<'_>> {
        self.defs.define_local(&mut self.scopes, idx, force_new, loc)
    }

    pub fn lookup_symbol(&self, idx: SymbolIdx) -> Option<&SymDef> {
        self.defs.lookup(idx)
    }

    pub fn lookup_symbol_mut(&mut self, idx: SymbolIdx) -> Option<&mut SymDef> {
        self.defs.lookup_mut(idx)
    }

    /// Resolves `text` without interning it.
    pub fn lookup_text(&self, text: &str) -> Option<&SymDef> {
        self.defs.lookup(self.symbols.lookup(text))
    }

    /// Drops every definition and open scope; interned symbols and keywords stay.
    pub fn reset_definitions(&mut self) {
        debug!(
            "resetting {} global and {} local definitions, {} open scopes",
            self.defs.globals_len(),
            self.defs.locals_len(),
            self.scopes.level()
        );
        self.defs.clear();
        self.scopes.clear();
    }
}
