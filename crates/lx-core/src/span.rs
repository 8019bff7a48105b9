//! Opaque source positions.
//!
//! The symbol table never interprets a [`Span`]; it only stores the span it was
//! handed and gives it back so diagnostics elsewhere can point at the source.

pub type FileId = u64;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Span {
    pub file: FileId,
    pub lo: u32,
    pub hi: u32,
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Span({}:{}-{})", self.file, self.lo, self.hi)
    }
}

impl Span {
    pub fn new(file: FileId, lo: u32, hi: u32) -> Span {
        Span { file, lo, hi }
    }

    /// Span used when the caller has no position to attach.
    pub fn null() -> Span {
        Span::default()
    }

    pub fn is_null(&self) -> bool {
        *self == Span::null()
    }
}
