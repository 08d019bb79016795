//! Shared types, error model, and configuration for Dossier.
//!
//! This crate is the foundation depended on by the rest of the workspace.
//! It provides:
//! - [`DossierError`] — the unified error type
//! - Domain types ([`Zone`], [`OverrideChain`])
//! - Configuration ([`AppConfig`], [`Layout`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, CONFIG_FILE_NAME, Layout, LayoutConfig, ToolsConfig, load_config, load_config_from,
};
pub use error::{DossierError, Result};
pub use types::{DEFAULT_JOB_NAME, FRAGMENT_EXT, OverrideChain, Zone, slug};
