//! Diagnostic and error reporting utilities

use crate::{CliError, Result};
use lx_core::span::Span;
use lx_symtab::SymTableError;
use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

/// Set up enhanced error reporting with miette
pub fn setup_error_reporting() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .build(),
        )
    }))
    .map_err(|e| CliError::Config(format!("Failed to setup error reporting: {}", e)))?;

    Ok(())
}

/// Errors rendered against the script they came from
#[derive(Error, Debug, Diagnostic)]
pub enum LexisDiagnostic {
    #[error("{message}")]
    #[diagnostic(
        code(lexis::script_error),
        help("Directives are `{{`, `}}`, `global NAME`, `let NAME`, `keyword NAME` and `use NAME`")
    )]
    ScriptError {
        message: String,
        #[source_code]
        src: String,
        #[label("here")]
        err_span: SourceSpan,
    },

    #[error("{message}")]
    #[diagnostic(code(lexis::unbalanced_scope), help("Every `}}` needs a matching `{{` before it"))]
    UnbalancedScope {
        message: String,
        #[source_code]
        src: String,
        #[label("no open scope to close")]
        err_span: SourceSpan,
    },

    #[error("{message}")]
    #[diagnostic(code(lexis::unclosed_scope), help("Add a `}}` before the end of the script"))]
    UnclosedScope {
        message: String,
        #[source_code]
        src: String,
        #[label("scope opened here")]
        err_span: SourceSpan,
    },

    #[error("{message}")]
    #[diagnostic(code(lexis::symbol_table))]
    SymbolTable {
        message: String,
        #[source_code]
        src: String,
        #[label("while processing this")]
        err_span: SourceSpan,
    },
}

fn source_span(span: Span) -> SourceSpan {
    (span.lo as usize, span.hi.saturating_sub(span.lo) as usize).into()
}

/// Attaches `src` to errors that carry a location in it.
pub fn with_source(err: &CliError, src: &str) -> Option<LexisDiagnostic> {
    let src = src.to_string();
    let diagnostic = match err {
        CliError::Script { message, span, .. } => LexisDiagnostic::ScriptError {
            message: message.clone(),
            src,
            err_span: source_span(*span),
        },
        CliError::SymbolTable { error, span } => {
            let message = error.to_string();
            let err_span = source_span(*span);
            match error {
                SymTableError::UnbalancedScope { .. } => LexisDiagnostic::UnbalancedScope {
                    message,
                    src,
                    err_span,
                },
                SymTableError::UnclosedScope { .. } => LexisDiagnostic::UnclosedScope {
                    message,
                    src,
                    err_span,
                },
                _ => LexisDiagnostic::SymbolTable {
                    message,
                    src,
                    err_span,
                },
            }
        }
        _ => return None,
    };
    Some(diagnostic)
}

/// Print a command failure, with source context when there is one
pub fn report_cli_error(err: CliError) {
    match err {
        CliError::Diagnostic(diagnostic) => eprintln!("{:?}", miette::Report::new(*diagnostic)),
        other => lx_core::error!("{}", other),
    }
}
