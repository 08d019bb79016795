//! Dossier CLI — layered LaTeX document assembly.
//!
//! Renders one PDF per content unit from a layered fragment tree and
//! optionally merges the results, plus pre-made supplements, into a
//! single application PDF.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli)
}
