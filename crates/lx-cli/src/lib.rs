//! Lexis CLI Library
//!
//! Drives the symbol table from the command line: interning identifier files and
//! replaying scope scripts.

pub mod cli;
pub mod commands;
pub mod diagnostics;
pub mod script;

pub mod error {
    use lx_core::span::Span;
    use lx_symtab::SymTableError;
    use thiserror::Error;

    #[derive(Error, Debug)]
    pub enum CliError {
        #[error("IO error: {0}")]
        Io(#[from] std::io::Error),

        #[error("Configuration error: {0}")]
        Config(String),

        #[error(transparent)]
        Core(#[from] lx_core::Error),

        #[error("{error}")]
        SymbolTable { error: SymTableError, span: Span },

        #[error("line {line}: {message}")]
        Script { line: usize, span: Span, message: String },

        #[error("{0}")]
        Diagnostic(Box<crate::diagnostics::LexisDiagnostic>),
    }

    pub type Result<T> = std::result::Result<T, CliError>;

    impl From<SymTableError> for CliError {
        fn from(error: SymTableError) -> Self {
            CliError::Core(error.into())
        }
    }
}

pub use error::{CliError, Result};
