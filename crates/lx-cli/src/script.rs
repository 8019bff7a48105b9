//! Scope scripts.
//!
//! A line-oriented stand-in for a parser, used to drive [`SymbolContext`] from
//! the command line:
//!
//! ```text
//! global x      # define x globally
//! {             # open a scope
//!   let x       # shadow x locally
//!   use x       # resolve x
//! }             # close the scope
//! keyword if
//! ```

use lx_core::span::{FileId, Span};
use lx_core::trace;
use lx_symtab::{SymTableError, SymVal, SymValKind, SymbolContext, SymbolIdx};

use crate::{CliError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectiveKind {
    Open,
    Close,
    Global(String),
    Let(String),
    Keyword(String),
    Use(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    pub kind: DirectiveKind,
    pub line: usize,
    pub span: Span,
}

/// Where a `use` directive resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub level: u32,
    pub defined_on: usize,
    pub kind: Option<SymValKind>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub name: String,
    pub line: usize,
    pub binding: Option<Binding>,
}

#[derive(Debug, Clone)]
pub struct Script {
    file: FileId,
    line_starts: Vec<usize>,
    pub directives: Vec<Directive>,
}

fn script_error(line: usize, span: Span, message: impl Into<String>) -> CliError {
    CliError::Script {
        line,
        span,
        message: message.into(),
    }
}

fn located(span: Span) -> impl FnOnce(SymTableError) -> CliError {
    move |error| CliError::SymbolTable { error, span }
}

impl Script {
    pub fn parse(file: FileId, source: &str) -> Result<Self> {
        let mut line_starts = Vec::new();
        let mut directives = Vec::new();
        let mut offset = 0usize;

        for (i, raw) in source.split_inclusive('\n').enumerate() {
            let line = i + 1;
            line_starts.push(offset);
            let content = raw.split('#').next().unwrap_or_default();
            let trimmed = content.trim();
            if !trimmed.is_empty() {
                let lo = offset + (content.len() - content.trim_start().len());
                let span = Span::new(file, lo as u32, (lo + trimmed.len()) as u32);
                let words: Vec<&str> = trimmed.split_whitespace().collect();
                let kind = match words.as_slice() {
                    ["{"] => DirectiveKind::Open,
                    ["}"] => DirectiveKind::Close,
                    ["global", name] => DirectiveKind::Global(name.to_string()),
                    ["let", name] => DirectiveKind::Let(name.to_string()),
                    ["keyword", name] => DirectiveKind::Keyword(name.to_string()),
                    ["use", name] => DirectiveKind::Use(name.to_string()),
                    _ => {
                        return Err(script_error(
                            line,
                            span,
                            format!("unrecognized directive `{}`", trimmed),
                        ))
                    }
                };
                directives.push(Directive { kind, line, span });
            }
            offset += raw.len();
        }

        Ok(Self {
            file,
            line_starts,
            directives,
        })
    }

    pub fn file(&self) -> FileId {
        self.file
    }

    /// 1-based line containing `span`.
    pub fn line_of(&self, span: Span) -> usize {
        match self.line_starts.binary_search(&(span.lo as usize)) {
            Ok(idx) => idx + 1,
            Err(idx) => idx.max(1),
        }
    }

    fn intern_ident(ctx: &mut SymbolContext, directive: &Directive, name: &str) -> Result<SymbolIdx> {
        let idx = ctx.intern(name).map_err(located(directive.span))?;
        if ctx.is_keyword(idx) {
            return Err(script_error(
                directive.line,
                directive.span,
                format!("`{}` is a keyword", name),
            ));
        }
        Ok(idx)
    }

    /// Runs every directive against `ctx`, returning what each `use` resolved to.
    pub fn replay(&self, ctx: &mut SymbolContext) -> Result<Vec<Resolution>> {
        let mut resolutions = Vec::new();
        let mut next_var = 0;
        let mut next_global = 0;

        for directive in &self.directives {
            let span = directive.span;
            trace!("line {}: {:?}", directive.line, directive.kind);
            match &directive.kind {
                DirectiveKind::Open => ctx.open_scope(span),
                DirectiveKind::Close => ctx.try_close_scope(span).map_err(located(span))?,
                DirectiveKind::Keyword(name) => {
                    ctx.add_keyword(name).map_err(located(span))?;
                }
                DirectiveKind::Global(name) => {
                    let idx = Self::intern_ident(ctx, directive, name)?;
                    let defined = ctx
                        .define_global_symbol(idx, false, span)
                        .ok_or_else(|| script_error(directive.line, span, "unnamed symbol"))?;
                    if !defined.is_new {
                        let previous = self.line_of(defined.def.loc);
                        return Err(script_error(
                            directive.line,
                            span,
                            format!("global `{}` already defined on line {}", name, previous),
                        ));
                    }
                    defined.set_value(SymVal::GlobalVar { idx: next_global });
                    next_global += 1;
                }
                DirectiveKind::Let(name) => {
                    let idx = Self::intern_ident(ctx, directive, name)?;
                    let defined = ctx
                        .define_symbol(idx, true, span)
                        .ok_or_else(|| script_error(directive.line, span, "unnamed symbol"))?;
                    if let Some(previous) = defined.replaced.as_ref().filter(|_| defined.conflicts()) {
                        return Err(script_error(
                            directive.line,
                            span,
                            format!(
                                "`{}` already defined in this scope on line {}",
                                name,
                                self.line_of(previous.loc)
                            ),
                        ));
                    }
                    let value = if defined.def.is_global() {
                        next_global += 1;
                        SymVal::GlobalVar { idx: next_global - 1 }
                    } else {
                        next_var += 1;
                        SymVal::Var { idx: next_var - 1 }
                    };
                    defined.set_value(value);
                }
                DirectiveKind::Use(name) => {
                    let binding = ctx.lookup_text(name).map(|def| Binding {
                        level: def.level,
                        defined_on: self.line_of(def.loc),
                        kind: def.value.as_ref().map(SymVal::kind),
                    });
                    resolutions.push(Resolution {
                        name: name.clone(),
                        line: directive.line,
                        binding,
                    });
                }
            }
        }

        if let Err(error) = ctx.ensure_scopes_closed() {
            let span = ctx.scope_opened_at().last().copied().unwrap_or_default();
            return Err(CliError::SymbolTable { error, span });
        }
        Ok(resolutions)
    }
}
