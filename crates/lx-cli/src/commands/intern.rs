//! Symbol table listing command implementation

use crate::{cli::CliConfig, Result};
use clap::Args;
use console::style;
use itertools::Itertools;
use lx_core::info;
use lx_symtab::{SymbolContext, SymbolIdx, SymbolSubclass};
use std::path::PathBuf;

/// Arguments for the intern command
#[derive(Debug, Clone, Args)]
pub struct InternArgs {
    /// Files whose identifiers are interned
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
    /// Keywords registered before any identifier (comma separated)
    #[arg(long, value_delimiter = ',')]
    pub keywords: Vec<String>,
}

/// Identifier-like tokens of `source`: runs of alphanumerics, `_`, `.` and `~`
/// that do not start with a digit.
pub fn identifiers(source: &str) -> impl Iterator<Item = &str> {
    source
        .split(|c: char| !(c.is_alphanumeric() || matches!(c, '_' | '.' | '~')))
        .filter(|tok| !tok.is_empty() && !tok.starts_with(|c: char| c.is_ascii_digit()))
}

/// One row of the listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolRow {
    pub idx: SymbolIdx,
    pub text: String,
    pub subclass: SymbolSubclass,
    pub keyword: bool,
}

/// Interns every identifier of `sources`, returning the table sorted by index.
pub fn intern_sources<'a>(
    ctx: &mut SymbolContext,
    keywords: &[String],
    sources: impl IntoIterator<Item = &'a str>,
    show_keywords: bool,
) -> Result<Vec<SymbolRow>> {
    ctx.add_keywords(keywords.iter().map(String::as_str))?;
    for source in sources {
        for ident in identifiers(source) {
            ctx.intern(ident)?;
        }
    }
    let rows = ctx
        .symbols()
        .iter()
        .filter(|(_, sym)| show_keywords || !sym.is_keyword())
        .map(|(idx, sym)| SymbolRow {
            idx,
            text: sym.text.clone(),
            subclass: sym.subclass,
            keyword: sym.is_keyword(),
        })
        .sorted_by_key(|row| row.idx)
        .collect();
    Ok(rows)
}

/// Execute the intern command
pub fn intern_command(args: InternArgs, config: &CliConfig) -> Result<()> {
    let mut ctx = super::new_context(config)?;
    let sources: Vec<String> = args
        .files
        .iter()
        .map(std::fs::read_to_string)
        .collect::<std::io::Result<_>>()?;

    let rows = intern_sources(
        &mut ctx,
        &args.keywords,
        sources.iter().map(String::as_str),
        config.output.show_keywords,
    )?;
    info!(
        "interned {} symbols from {} files (capacity {})",
        ctx.symbols().len(),
        args.files.len(),
        ctx.symbols().capacity()
    );

    console::set_colors_enabled(config.output.color);
    for row in rows {
        let marker = match (row.keyword, row.subclass) {
            (true, _) => style("kw").magenta(),
            (false, SymbolSubclass::DotIdentifier) => style(".").cyan(),
            (false, SymbolSubclass::TildeIdentifier) => style("~").cyan(),
            (false, SymbolSubclass::Undef) => style(" ").dim(),
        };
        println!("{:>7} {:>2} {}", style(row.idx).dim(), marker, row.text);
    }
    Ok(())
}
