//! Supplement lookup: which pre-made PDFs to append during merge.
//!
//! Selection works on whole config files, not on individual entries: the
//! base file `supplements` and one `supplements-{override}` per chain name
//! are the candidates, and the last candidate that exists wins outright.
//! Unlike fragment resolution there is no merging across files.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use dossier_shared::{DossierError, OverrideChain, Result};

/// Base config file name inside the supplements directory.
const CONFIG_NAME: &str = "supplements";

/// Resolve the supplement PDFs for `chain`.
///
/// Returns the paths listed in the winning config file, in file order,
/// silently dropping entries that do not exist on disk. No config file at
/// all is not an error — it just means no supplements.
pub fn locate_supplements(supplements_dir: &Path, chain: &OverrideChain) -> Result<Vec<PathBuf>> {
    let winner = match winning_config(supplements_dir, chain) {
        Some(path) => path,
        None => {
            info!(dir = %supplements_dir.display(), "no supplement config found");
            return Ok(Vec::new());
        }
    };

    debug!(config = %winner.display(), "supplement config selected");

    let content = std::fs::read_to_string(&winner).map_err(|e| DossierError::io(&winner, e))?;

    let mut paths = Vec::new();
    for line in content.lines() {
        let name = line.trim();
        if name.is_empty() {
            continue;
        }

        let path = supplements_dir.join(name);
        if path.is_file() {
            paths.push(path);
        } else {
            debug!(name, "listed supplement missing, dropped");
        }
    }

    Ok(paths)
}

/// Pick the winning config file: candidates are the base name plus one
/// suffixed name per override, in chain order; the last existing one wins.
fn winning_config(supplements_dir: &Path, chain: &OverrideChain) -> Option<PathBuf> {
    let mut candidates = vec![supplements_dir.join(CONFIG_NAME)];
    for name in chain.names() {
        candidates.push(supplements_dir.join(format!("{CONFIG_NAME}-{name}")));
    }

    candidates.into_iter().filter(|p| p.is_file()).next_back()
}
