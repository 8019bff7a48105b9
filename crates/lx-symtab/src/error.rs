use lx_core::span::Span;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SymTableError {
    #[error("symbol table overflow: {defined} symbols already defined")]
    Overflow { defined: u32 },
    #[error("keyword `{keyword}` redefined")]
    KeywordRedefinition { keyword: String },
    #[error("keyword id {id} does not fit a negative symbol index")]
    KeywordIdOutOfRange { id: u32 },
    #[error("cannot close the outer scope at {at}")]
    UnbalancedScope { at: Span },
    #[error("scope opened at {opened_at} was never closed")]
    UnclosedScope { opened_at: Span },
}

pub type Result<T> = std::result::Result<T, SymTableError>;

impl From<SymTableError> for lx_core::Error {
    fn from(err: SymTableError) -> Self {
        lx_core::Error::SymbolTable(err.to_string())
    }
}
