//! Content assembly: resolved fragments → one LaTeX source.
//!
//! One content unit yields one document. The unit name itself acts as the
//! highest-precedence override, so `documents/begin/letter/` can restyle
//! the shared preamble for the `letter` unit only, and caller overrides
//! nest inside the unit directory when both exist.

use std::path::PathBuf;

use tracing::debug;

use dossier_shared::{Layout, OverrideChain, Result, Zone};

use crate::resolve::resolve_fragments;

/// Assemble the full document source for one content unit.
///
/// Runs the resolver once per zone with the effective chain
/// (`[unit] + overrides`), wraps each fragment in an `\input` directive,
/// and joins the zones with a blank line in begin → content → end order.
pub fn assemble_source(layout: &Layout, unit: &str, overrides: &OverrideChain) -> Result<String> {
    let effective = overrides.effective_for(unit);

    let mut zones = Vec::with_capacity(Zone::ALL.len());
    for zone in Zone::ALL {
        let paths = resolve_fragments(&layout.zone_root(zone), &effective)?;
        debug!(unit, %zone, fragments = paths.len(), "zone assembled");
        zones.push(input_directives(&paths));
    }

    Ok(zones.join("\n\n"))
}

/// Render a list of fragment paths as `\input{...}` lines.
fn input_directives(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| format!("\\input{{{}}}", p.display()))
        .collect::<Vec<_>>()
        .join("\n")
}
