//! Merge driver: join compiled artifacts and supplements into one PDF.
//!
//! Thin wrapper over the external merge tool (`pdfunite` interface: input
//! paths in order, target path last).

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::info;

use dossier_shared::{DossierError, Result};

/// Merge `inputs` in order into `target`.
pub fn merge_pdfs(merger: &str, inputs: &[PathBuf], target: &Path) -> Result<()> {
    let status = Command::new(merger)
        .args(inputs)
        .arg(target)
        .status()
        .map_err(|e| DossierError::tool(format!("failed to run {merger}: {e}")))?;

    if !status.success() {
        return Err(DossierError::tool(format!(
            "{merger} exited with status {} merging into {}",
            status.code().unwrap_or(-1),
            target.display()
        )));
    }

    info!(inputs = inputs.len(), path = %target.display(), "merged PDF written");
    Ok(())
}
