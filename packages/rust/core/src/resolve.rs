//! Fragment override resolution.
//!
//! Given a zone root and an ordered override chain, computes the final set
//! of fragment files to include. Overrides are nested directories: the
//! chain is followed one level at a time, each name checked as a
//! subdirectory of the *previous* match, so `["acme", "senior"]` looks for
//! `root/acme/senior`, never `root/senior` on its own. A name with no
//! matching subdirectory is skipped without breaking the chain.
//!
//! Within the resulting directory chain, a fragment in a deeper directory
//! replaces the same-named fragment of a shallower one; a new name is
//! simply added. The final list is ordered by file name, so sortable
//! prefixes (`01_intro.tex`, `02_body.tex`) control assembly order.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use dossier_shared::{DossierError, FRAGMENT_EXT, OverrideChain, Result};

/// Resolve the fragments of one zone under `zone_root` for `chain`.
///
/// Pure function of the path, the chain, and filesystem state: identical
/// inputs against an unchanged tree yield identical output.
pub fn resolve_fragments(zone_root: &Path, chain: &OverrideChain) -> Result<Vec<PathBuf>> {
    let dirs = override_dirs(zone_root, chain)?;

    // Visit root-first so the deepest (most specific) directory wins the
    // last write for each file name. BTreeMap keys give the final
    // lexicographic-by-name ordering for free.
    let mut paths_by_name: BTreeMap<String, PathBuf> = BTreeMap::new();

    for dir in &dirs {
        for (name, path) in list_fragments(dir)? {
            trace!(name = %name, path = %path.display(), "fragment candidate");
            paths_by_name.insert(name, path);
        }
    }

    let paths: Vec<PathBuf> = paths_by_name.into_values().collect();
    verify_fragments(&paths)?;

    debug!(
        zone_root = %zone_root.display(),
        dirs = dirs.len(),
        fragments = paths.len(),
        "zone resolved"
    );

    Ok(paths)
}

/// Compute the chain of candidate directories for `chain` under `root`.
///
/// Starts at `root` and descends one level per override name, checking each
/// name against the deepest directory reached so far. Produces a single
/// chain of depth at most `1 + chain.len()`, root first.
pub fn override_dirs(root: &Path, chain: &OverrideChain) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(DossierError::config(format!(
            "zone root is not a directory: {}",
            root.display()
        )));
    }

    let mut dirs = vec![root.to_path_buf()];
    let mut current = root.to_path_buf();

    for name in chain.names() {
        let candidate = current.join(name);
        if candidate.is_dir() {
            current = candidate;
            dirs.push(current.clone());
        }
        // A missing name contributes nothing; later names are still
        // checked against the last successful directory.
    }

    Ok(dirs)
}

/// List the fragment files directly inside `dir` as (file name, path)
/// pairs. Subdirectories and files without the fragment extension are
/// ignored.
fn list_fragments(dir: &Path) -> Result<Vec<(String, PathBuf)>> {
    let entries = std::fs::read_dir(dir).map_err(|e| DossierError::io(dir, e))?;

    let mut fragments = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| DossierError::io(dir, e))?;
        let path = entry.path();

        if path.is_dir() {
            continue;
        }
        if path.extension().and_then(|e| e.to_str()) != Some(FRAGMENT_EXT) {
            continue;
        }

        let name = entry.file_name().to_string_lossy().into_owned();
        fragments.push((name, path));
    }

    Ok(fragments)
}

/// Invariant check over the final path list: every path must still be a
/// regular file with the fragment extension. A violation means the tree
/// changed underneath us or the resolver is broken — abort the run.
fn verify_fragments(paths: &[PathBuf]) -> Result<()> {
    for path in paths {
        if !path.is_file() {
            return Err(DossierError::config(format!(
                "resolved fragment is not a file: {}",
                path.display()
            )));
        }
        if path.extension().and_then(|e| e.to_str()) != Some(FRAGMENT_EXT) {
            return Err(DossierError::config(format!(
                "resolved fragment has wrong extension: {}",
                path.display()
            )));
        }
    }
    Ok(())
}
