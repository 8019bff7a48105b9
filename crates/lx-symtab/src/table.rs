//! Interning table.
//!
//! Identifiers are hashed into a fixed, prime-sized slot array with double
//! hashing. The slot an identifier lands in is its [`SymbolIdx`], so indices
//! stay stable for the lifetime of the table. The table refuses new symbols
//! once three quarters of the slots are taken.

use lx_core::config::SymTableConfig;
use lx_core::{trace, warn};

use crate::error::{Result, SymTableError};
use crate::symbol::{Symbol, SymbolIdx, SymbolSubclass};

#[derive(Debug, Clone)]
pub struct SymTable {
    config: SymTableConfig,
    /// `size_prime + 1` entries; slot 0 is never used. Holds `position + 1` into `symbols`.
    slots: Vec<u32>,
    symbols: Vec<Symbol>,
    last_keyword: u32,
    /// Keyword id -> slot, `NOT_FOUND` where unassigned
    keywords: Vec<SymbolIdx>,
}

enum Probe {
    Found(SymbolIdx),
    Vacant(SymbolIdx),
}

impl Default for SymTable {
    fn default() -> Self {
        Self::with_config(SymTableConfig::default())
    }
}

impl SymTable {
    pub fn new(config: SymTableConfig) -> lx_core::Result<Self> {
        config.validate()?;
        Ok(Self::with_config(config))
    }

    fn with_config(config: SymTableConfig) -> Self {
        Self {
            slots: vec![0; config.size_prime as usize + 1],
            symbols: Vec::new(),
            last_keyword: 0,
            keywords: vec![SymbolIdx::NOT_FOUND; config.max_keywords as usize],
            config,
        }
    }

    pub fn config(&self) -> &SymTableConfig {
        &self.config
    }

    /// Maximum number of symbols the table accepts.
    pub fn capacity(&self) -> u32 {
        (self.config.size_prime as u64 * 3 / 4) as u32
    }

    pub fn len(&self) -> u32 {
        self.symbols.len() as u32
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    fn hashes(&self, text: &str) -> (u64, u64) {
        let p = self.config.size_prime as u64;
        let (mut h1, mut h2) = (1u64, 1u64);
        for b in text.bytes() {
            h1 = (h1 * 239 + b as u64) % p;
            h2 = (h2 * 17 + b as u64) % (p - 1);
        }
        (h1 + 1, h2 + 1)
    }

    fn probe(&self, text: &str) -> Probe {
        let p = self.config.size_prime as u64;
        let (mut slot, step) = self.hashes(text);
        // step < p and p is prime, so the walk visits every slot; the load limit
        // guarantees a vacant one exists.
        loop {
            match self.slots[slot as usize] {
                0 => return Probe::Vacant(SymbolIdx(slot as u32)),
                pos if self.symbols[pos as usize - 1].text == text => {
                    return Probe::Found(SymbolIdx(slot as u32))
                }
                _ => {
                    slot += step;
                    if slot > p {
                        slot -= p;
                    }
                }
            }
        }
    }

    fn insert(&mut self, slot: SymbolIdx, text: &str, idx: i32) -> Result<SymbolIdx> {
        if self.len() >= self.capacity() {
            return Err(SymTableError::Overflow {
                defined: self.len(),
            });
        }
        self.symbols.push(Symbol::new(text, idx));
        self.slots[slot.as_usize()] = self.symbols.len() as u32;
        trace!("interned `{}` as {} (idx {})", text, slot, idx);
        Ok(slot)
    }

    /// Index of `text`, or [`SymbolIdx::NOT_FOUND`] if it was never interned.
    pub fn lookup(&self, text: &str) -> SymbolIdx {
        match self.probe(text) {
            Probe::Found(idx) => idx,
            Probe::Vacant(_) => SymbolIdx::NOT_FOUND,
        }
    }

    /// Index of `text`, interning it first if needed.
    pub fn lookup_add(&mut self, text: &str) -> Result<SymbolIdx> {
        match self.probe(text) {
            Probe::Found(idx) => Ok(idx),
            Probe::Vacant(slot) => self.insert(slot, text, slot.0 as i32),
        }
    }

    /// Registers `text` under the next free keyword id.
    pub fn add_keyword(&mut self, text: &str) -> Result<SymbolIdx> {
        self.add_keyword_with_id(text, 0)
    }

    fn keyword_id_taken(&self, id: u32) -> bool {
        match self.keywords.get(id as usize) {
            Some(idx) => idx.is_found(),
            None => self.symbols.iter().any(|sym| sym.keyword_id() == Some(id)),
        }
    }

    /// Registers `text` as keyword `id`; `0` picks the next free id.
    pub fn add_keyword_with_id(&mut self, text: &str, id: u32) -> Result<SymbolIdx> {
        let auto = id == 0;
        let id = if auto {
            let mut next = self.last_keyword + 1;
            while self.keyword_id_taken(next) {
                next += 1;
            }
            next
        } else if self.keyword_id_taken(id) {
            return Err(SymTableError::KeywordRedefinition {
                keyword: text.to_string(),
            });
        } else {
            id
        };
        let tagged = i32::try_from(id)
            .ok()
            .and_then(i32::checked_neg)
            .ok_or(SymTableError::KeywordIdOutOfRange { id })?;
        let slot = match self.probe(text) {
            Probe::Found(_) => {
                return Err(SymTableError::KeywordRedefinition {
                    keyword: text.to_string(),
                })
            }
            Probe::Vacant(slot) => self.insert(slot, text, tagged)?,
        };
        if auto {
            self.last_keyword = id;
        }
        match self.keywords.get_mut(id as usize) {
            Some(entry) => *entry = slot,
            None => warn!(
                "keyword `{}` has id {} beyond the keyword index limit {}",
                text, id, self.config.max_keywords
            ),
        }
        Ok(slot)
    }

    pub fn get_keyword(&self, id: u32) -> Option<SymbolIdx> {
        self.keywords
            .get(id as usize)
            .copied()
            .filter(|idx| idx.is_found())
    }

    pub fn symbol(&self, idx: SymbolIdx) -> Option<&Symbol> {
        match self.slots.get(idx.as_usize()) {
            Some(&pos) if pos != 0 => Some(&self.symbols[pos as usize - 1]),
            _ => None,
        }
    }

    pub fn is_keyword(&self, idx: SymbolIdx) -> bool {
        self.symbol(idx).is_some_and(Symbol::is_keyword)
    }

    pub fn get_name(&self, idx: SymbolIdx) -> String {
        match self.symbol(idx) {
            Some(sym) => sym.text.clone(),
            None => Symbol::unknown_symbol_name(idx),
        }
    }

    pub fn get_subclass(&self, idx: SymbolIdx) -> SymbolSubclass {
        self.symbol(idx).map(|sym| sym.subclass).unwrap_or_default()
    }

    /// Interned symbols in the order they were added.
    pub fn iter(&self) -> impl Iterator<Item = (SymbolIdx, &Symbol)> + '_ {
        self.symbols.iter().map(move |sym| (self.lookup(&sym.text), sym))
    }
}
