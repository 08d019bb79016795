//! Core domain types for Dossier document trees.

use serde::{Deserialize, Serialize};

/// File extension that marks a file as a fragment. Anything else in a zone
/// directory (notes, images, nested override directories) is ignored by the
/// resolver.
pub const FRAGMENT_EXT: &str = "tex";

/// Job name used when no overrides are given.
pub const DEFAULT_JOB_NAME: &str = "default";

// ---------------------------------------------------------------------------
// Zone
// ---------------------------------------------------------------------------

/// One of the three fixed assembly regions of a document.
///
/// Every rendered document is the concatenation begin → content → end, each
/// zone backed by its own root directory under the documents tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    Begin,
    Content,
    End,
}

impl Zone {
    /// All zones, in assembly order.
    pub const ALL: [Zone; 3] = [Zone::Begin, Zone::Content, Zone::End];

    /// Directory name of this zone's root under the documents tree.
    pub fn dir_name(self) -> &'static str {
        match self {
            Zone::Begin => "begin",
            Zone::Content => "content",
            Zone::End => "end",
        }
    }
}

impl std::fmt::Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.dir_name())
    }
}

// ---------------------------------------------------------------------------
// OverrideChain
// ---------------------------------------------------------------------------

/// An ordered list of override names (directory-segment names).
///
/// Later entries take precedence over earlier ones; the base directory with
/// no override has the lowest precedence of all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverrideChain(Vec<String>);

impl OverrideChain {
    pub fn new(names: Vec<String>) -> Self {
        Self(names)
    }

    /// The override names, in precedence order (lowest first).
    pub fn names(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Job name for this chain: the names joined by `-`, or
    /// [`DEFAULT_JOB_NAME`] for an empty chain.
    pub fn job_name(&self) -> String {
        if self.0.is_empty() {
            DEFAULT_JOB_NAME.to_string()
        } else {
            self.0.join("-")
        }
    }

    /// The effective chain for one content unit: the unit name prepended,
    /// so it is resolved first in the directory descent and caller-supplied
    /// overrides nest inside the unit-specific subdirectory when both exist.
    pub fn effective_for(&self, unit: &str) -> OverrideChain {
        let mut names = Vec::with_capacity(self.0.len() + 1);
        names.push(unit.to_string());
        names.extend(self.0.iter().cloned());
        OverrideChain(names)
    }
}

impl From<Vec<String>> for OverrideChain {
    fn from(names: Vec<String>) -> Self {
        Self(names)
    }
}

/// Artifact slug for one content unit within one job.
pub fn slug(job_name: &str, unit: &str) -> String {
    format!("{job_name}_{unit}")
}
