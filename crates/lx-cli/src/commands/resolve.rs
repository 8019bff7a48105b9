//! Scope script replay command implementation

use crate::diagnostics::with_source;
use crate::script::{Resolution, Script};
use crate::{cli::CliConfig, CliError, Result};
use clap::Args;
use console::style;
use lx_core::debug;
use std::path::PathBuf;

/// Arguments for the resolve command
#[derive(Debug, Clone, Args)]
pub struct ResolveArgs {
    /// Scope script to replay
    pub script: PathBuf,
}

/// Parses and replays `source`, attaching it to any located error.
pub fn resolve_source(source: &str, config: &CliConfig) -> Result<Vec<Resolution>> {
    let run = || -> Result<Vec<Resolution>> {
        let script = Script::parse(0, source)?;
        debug!("{} directives", script.directives.len());
        let mut ctx = super::new_context(config)?;
        script.replay(&mut ctx)
    };
    run().map_err(|err| match with_source(&err, source) {
        Some(diagnostic) => CliError::Diagnostic(Box::new(diagnostic)),
        None => err,
    })
}

/// Execute the resolve command
pub fn resolve_command(args: ResolveArgs, config: &CliConfig) -> Result<()> {
    let source = std::fs::read_to_string(&args.script)?;
    let resolutions = resolve_source(&source, config)?;

    console::set_colors_enabled(config.output.color);
    for res in resolutions {
        match res.binding {
            Some(binding) => println!(
                "{:>4}: {} -> level {} from line {}{}",
                res.line,
                style(&res.name).bold(),
                binding.level,
                binding.defined_on,
                binding
                    .kind
                    .map(|kind| format!(" ({:?})", kind))
                    .unwrap_or_default()
            ),
            None => println!(
                "{:>4}: {} -> {}",
                res.line,
                style(&res.name).bold(),
                style("unresolved").red()
            ),
        }
    }
    Ok(())
}
