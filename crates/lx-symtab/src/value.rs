use serde::{Deserialize, Serialize};

pub type VarIdx = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SymValKind {
    Param,
    Var,
    Func,
    Typename,
    GlobalVar,
    Const,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConstValue {
    Int(i128),
    Str(String),
}

/// What a symbol denotes. Built by the parser and type checker; the symbol
/// table only stores it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SymVal {
    Param { idx: VarIdx },
    Var { idx: VarIdx },
    Func { idx: u32, arity: u32 },
    Typename { idx: u32 },
    GlobalVar { idx: u32 },
    Const { idx: u32, value: ConstValue },
}

impl SymVal {
    pub fn kind(&self) -> SymValKind {
        match self {
            SymVal::Param { .. } => SymValKind::Param,
            SymVal::Var { .. } => SymValKind::Var,
            SymVal::Func { .. } => SymValKind::Func,
            SymVal::Typename { .. } => SymValKind::Typename,
            SymVal::GlobalVar { .. } => SymValKind::GlobalVar,
            SymVal::Const { .. } => SymValKind::Const,
        }
    }

    pub fn idx(&self) -> u32 {
        match self {
            SymVal::Param { idx }
            | SymVal::Var { idx }
            | SymVal::Func { idx, .. }
            | SymVal::Typename { idx }
            | SymVal::GlobalVar { idx }
            | SymVal::Const { idx, .. } => *idx,
        }
    }

    pub fn is_local(&self) -> bool {
        matches!(self, SymVal::Param { .. } | SymVal::Var { .. })
    }
}
