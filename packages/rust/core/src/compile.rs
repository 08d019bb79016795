//! Compile driver: assembled source → PDF artifact.
//!
//! Thin wrapper over the external typesetting engine. The engine is run
//! once per slug with its output pointed at the work directory; the
//! resulting PDF is then copied next to the final artifacts.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::{info, warn};

use dossier_shared::{DossierError, Layout, Result};

/// Options for one engine invocation.
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// Engine command, e.g. `pdflatex`.
    pub engine: String,
    /// When true, run with `-halt-on-error` and let the engine's output
    /// through; otherwise run in nonstop mode and discard it.
    pub verbose: bool,
}

/// Compile `source` under `slug`, returning the final artifact path
/// (`<out>/<slug>.pdf`).
///
/// The engine's exit status is deliberately not authoritative: in nonstop
/// mode it exits non-zero on recoverable complaints while still emitting a
/// usable PDF. The failure signal is the expected output file being
/// absent from the work directory.
pub fn compile(layout: &Layout, options: &CompileOptions, slug: &str, source: &str) -> Result<PathBuf> {
    let work_dir = layout.work_dir();
    std::fs::create_dir_all(&work_dir).map_err(|e| DossierError::io(&work_dir, e))?;
    std::fs::create_dir_all(&layout.out_dir).map_err(|e| DossierError::io(&layout.out_dir, e))?;

    let tex_path = work_dir.join(format!("{slug}.tex"));
    std::fs::write(&tex_path, source).map_err(|e| DossierError::io(&tex_path, e))?;
    info!(slug, path = %tex_path.display(), "rendered source");

    run_engine(options, &work_dir, &tex_path)?;

    let produced = work_dir.join(format!("{slug}.pdf"));
    if !produced.is_file() {
        return Err(DossierError::tool(format!(
            "{} produced no output for {slug} (expected {})",
            options.engine,
            produced.display()
        )));
    }

    let target = layout.out_dir.join(format!("{slug}.pdf"));
    std::fs::copy(&produced, &target).map_err(|e| DossierError::io(&target, e))?;
    info!(slug, path = %target.display(), "artifact written");

    Ok(target)
}

/// Invoke the engine once against `tex_path`.
fn run_engine(options: &CompileOptions, work_dir: &Path, tex_path: &Path) -> Result<()> {
    let mode = if options.verbose {
        "-halt-on-error"
    } else {
        "-interaction=nonstopmode"
    };

    let mut command = Command::new(&options.engine);
    command
        .arg(mode)
        .arg(format!("-output-directory={}", work_dir.display()))
        .arg(tex_path);

    if !options.verbose {
        command.stdout(Stdio::null()).stderr(Stdio::null());
    }

    let status = command
        .status()
        .map_err(|e| DossierError::tool(format!("failed to run {}: {e}", options.engine)))?;

    if !status.success() {
        warn!(engine = %options.engine, code = status.code(), "engine exited non-zero");
    }

    Ok(())
}
