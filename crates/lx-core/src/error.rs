use std::result;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Symbol table error: {0}")]
    SymbolTable(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Generic error: {0}")]
    Generic(String),
}

pub type Result<T> = result::Result<T, Error>;

// Convert from eyre::Report to our Error type
impl From<eyre::Report> for Error {
    fn from(err: eyre::Report) -> Self {
        Error::Generic(err.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Generic(e.to_string())
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Generic(s)
    }
}
