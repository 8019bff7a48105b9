//! Command implementations for the Lexis CLI

pub mod intern;
pub mod resolve;

pub use intern::intern_command;
pub use resolve::resolve_command;

use crate::{cli::CliConfig, Result};
use lx_symtab::SymbolContext;

/// Fresh context sized by the loaded configuration
pub fn new_context(config: &CliConfig) -> Result<SymbolContext> {
    Ok(SymbolContext::new(config.symtab.clone())?)
}
