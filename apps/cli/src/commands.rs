//! CLI argument definitions, tracing setup, and the render entry point.

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::Result;
use dossier_core::pipeline::{
    ProgressReporter, RenderConfig, RenderResult, SilentProgress, render_application,
};
use dossier_shared::{Layout, OverrideChain, load_config, load_config_from};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// Dossier — render layered LaTeX documents into application PDFs.
#[derive(Parser)]
#[command(
    name = "dossier",
    version,
    about = "Render one PDF per content unit from a layered fragment tree.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Override names, in precedence order (later wins). The job name is
    /// derived from these, or "default" when none are given.
    pub overrides: Vec<String>,

    /// Merge all rendered PDFs plus supplements into one application PDF.
    #[arg(short, long)]
    pub unite: bool,

    /// Verbosity level (-v shows engine output, -vv adds debug logs).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Config file path (defaults to dossier.toml in the working directory).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log format: text (default) or json.
    #[arg(long, default_value = "text")]
    pub log_format: LogFormat,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 | 1 => "dossier_core=info,dossier_shared=info,dossier_cli=info",
        2 => "dossier_core=debug,dossier_shared=debug,dossier_cli=debug",
        _ => "dossier_core=trace,dossier_shared=trace,dossier_cli=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt().with_env_filter(env_filter).with_target(false).init();
        }
        LogFormat::Json => {
            fmt().json().with_env_filter(env_filter).init();
        }
    }
}

// ---------------------------------------------------------------------------
// Render entry point
// ---------------------------------------------------------------------------

/// Run the render.
pub(crate) fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    };

    let overrides = OverrideChain::new(cli.overrides);
    let verbose = cli.verbose > 0;

    info!(
        overrides = ?overrides.names(),
        unite = cli.unite,
        verbose,
        "starting dossier render"
    );

    let render_config = RenderConfig {
        layout: Layout::from(&config),
        overrides,
        unite: cli.unite,
        verbose,
        engine: config.tools.engine.clone(),
        merger: config.tools.merger.clone(),
    };

    // Engine output and a spinner fight over the terminal; skip the
    // spinner in verbose mode.
    let result = if verbose {
        render_application(&render_config, &SilentProgress)?
    } else {
        let reporter = CliProgress::new();
        render_application(&render_config, &reporter)?
    };

    print_summary(&result);
    Ok(())
}

/// Print the post-run summary block.
fn print_summary(result: &RenderResult) {
    println!();
    println!("  Render complete!");
    println!("  Job:       {}", result.job_name);
    println!("  Documents: {}", result.artifacts.len());
    for artifact in &result.artifacts {
        println!("    {}", artifact.display());
    }
    if let Some(merged) = &result.merged {
        println!("  Merged:    {}", merged.display());
    }
    println!("  Time:      {:.1}s", result.elapsed.as_secs_f64());
    println!();
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap()
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn unit_rendered(&self, slug: &str, current: usize, total: usize) {
        self.spinner
            .set_message(format!("Rendered [{current}/{total}] {slug}"));
    }

    fn done(&self, _result: &RenderResult) {
        self.spinner.finish_and_clear();
    }
}
