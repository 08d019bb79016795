//! Application configuration for Dossier.
//!
//! A document project is a self-contained tree, so config lives at
//! `dossier.toml` in the project root rather than under the user's home.
//! Every field has a default; a missing file means "all defaults", which is
//! the common case for trees that follow the standard layout.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{DossierError, Result};
use crate::types::Zone;

/// Default configuration file name, looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "dossier.toml";

// ---------------------------------------------------------------------------
// Config structs (matching dossier.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory layout of the document tree.
    #[serde(default)]
    pub layout: LayoutConfig,

    /// External tool commands.
    #[serde(default)]
    pub tools: ToolsConfig,
}

/// `[layout]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Root of the fragment tree (contains begin/, content/, end/).
    #[serde(default = "default_documents_dir")]
    pub documents_dir: String,

    /// Output directory for compiled artifacts.
    #[serde(default = "default_out_dir")]
    pub out_dir: String,

    /// Directory holding supplement PDFs and their config files.
    #[serde(default = "default_supplements_dir")]
    pub supplements_dir: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            documents_dir: default_documents_dir(),
            out_dir: default_out_dir(),
            supplements_dir: default_supplements_dir(),
        }
    }
}

fn default_documents_dir() -> String {
    "documents".into()
}
fn default_out_dir() -> String {
    "out".into()
}
fn default_supplements_dir() -> String {
    "supplements".into()
}

/// `[tools]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsConfig {
    /// Typesetting engine command (must emit a same-named PDF next to
    /// its input when given `-output-directory`).
    #[serde(default = "default_engine")]
    pub engine: String,

    /// PDF merge command (takes input paths followed by the target path).
    #[serde(default = "default_merger")]
    pub merger: String,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            engine: default_engine(),
            merger: default_merger(),
        }
    }
}

fn default_engine() -> String {
    "pdflatex".into()
}
fn default_merger() -> String {
    "pdfunite".into()
}

// ---------------------------------------------------------------------------
// Layout (runtime paths derived from config)
// ---------------------------------------------------------------------------

/// Resolved directory layout for one run.
#[derive(Debug, Clone)]
pub struct Layout {
    /// Root of the fragment tree.
    pub documents_dir: PathBuf,
    /// Final artifact directory.
    pub out_dir: PathBuf,
    /// Supplement root.
    pub supplements_dir: PathBuf,
}

impl Layout {
    /// Root directory of one zone (`documents/begin` etc.).
    pub fn zone_root(&self, zone: Zone) -> PathBuf {
        self.documents_dir.join(zone.dir_name())
    }

    /// Working directory for intermediate engine files.
    pub fn work_dir(&self) -> PathBuf {
        self.out_dir.join("tmp")
    }
}

impl From<&AppConfig> for Layout {
    fn from(config: &AppConfig) -> Self {
        Self {
            documents_dir: PathBuf::from(&config.layout.documents_dir),
            out_dir: PathBuf::from(&config.layout.out_dir),
            supplements_dir: PathBuf::from(&config.layout.supplements_dir),
        }
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Load the application config from `dossier.toml` in the working
/// directory. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = PathBuf::from(CONFIG_FILE_NAME);

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| DossierError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| DossierError::config(format!("failed to parse {}: {e}", path.display())))
}
