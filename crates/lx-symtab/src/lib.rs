//! Symbol interning and lexical scope resolution.
//!
//! - [`table::SymTable`] interns identifier text into stable [`SymbolIdx`] handles
//! - [`def::DefinitionStore`] keeps the global and local binding of each symbol
//! - [`scope::ScopeStack`] records what a scope shadowed so closing it restores it
//! - [`context::SymbolContext`] owns all three for one compilation unit

pub mod context;
pub mod def;
pub mod error;
pub mod scope;
pub mod symbol;
pub mod table;
pub mod value;

pub use context::SymbolContext;
pub use def::{Defined, DefinitionStore, SymDef};
pub use error::{Result, SymTableError};
pub use scope::ScopeStack;
pub use symbol::{Symbol, SymbolIdx, SymbolSubclass};
pub use table::SymTable;
pub use value::{ConstValue, SymVal, SymValKind, VarIdx};
