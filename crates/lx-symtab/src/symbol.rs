use derive_more::{From, Into};
use serde::{Deserialize, Serialize};

/// Handle of an interned symbol: the slot it occupies in the table.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, From, Into,
)]
pub struct SymbolIdx(pub u32);

impl SymbolIdx {
    /// Reserved for "unnamed" and failed lookups.
    pub const NOT_FOUND: SymbolIdx = SymbolIdx(0);

    pub fn is_found(self) -> bool {
        self != Self::NOT_FOUND
    }

    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for SymbolIdx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lexical flavour of an identifier, decided by its first character.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SymbolSubclass {
    #[default]
    Undef,
    /// begins with `.` (a const method)
    DotIdentifier,
    /// begins with `~` (a non-const method)
    TildeIdentifier,
}

impl SymbolSubclass {
    pub fn of(text: &str) -> Self {
        match text.as_bytes().first() {
            Some(b'.') => SymbolSubclass::DotIdentifier,
            Some(b'~') => SymbolSubclass::TildeIdentifier,
            _ => SymbolSubclass::Undef,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symbol {
    pub text: String,
    /// Table slot for identifiers, `-keyword_id` for keywords
    pub idx: i32,
    pub subclass: SymbolSubclass,
}

impl Symbol {
    pub fn new(text: impl Into<String>, idx: i32) -> Self {
        let text = text.into();
        let subclass = SymbolSubclass::of(&text);
        Self {
            text,
            idx,
            subclass,
        }
    }

    pub fn is_keyword(&self) -> bool {
        self.idx < 0
    }

    pub fn keyword_id(&self) -> Option<u32> {
        self.is_keyword().then(|| self.idx.unsigned_abs())
    }

    pub fn unknown_symbol_name(idx: SymbolIdx) -> String {
        format!("SYM#{}", idx)
    }
}
