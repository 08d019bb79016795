//! End-to-end render pipeline: document tree → per-unit PDFs → merged PDF.

use std::path::PathBuf;
use std::time::Instant;

use tracing::{info, warn};

use dossier_shared::{DossierError, Layout, OverrideChain, Result, Zone, slug};

use crate::assemble::assemble_source;
use crate::compile::{CompileOptions, compile};
use crate::merge::merge_pdfs;
use crate::supplements::locate_supplements;

/// Configuration for one render run.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Resolved directory layout.
    pub layout: Layout,
    /// Caller-supplied override chain, in precedence order.
    pub overrides: OverrideChain,
    /// Merge all artifacts and supplements into one PDF at the end.
    pub unite: bool,
    /// Pass the engine's output through and halt on errors.
    pub verbose: bool,
    /// Typesetting engine command.
    pub engine: String,
    /// PDF merge command.
    pub merger: String,
}

/// Result of one render run.
#[derive(Debug)]
pub struct RenderResult {
    /// Job name derived from the override chain.
    pub job_name: String,
    /// Compiled per-unit artifacts, in processing order.
    pub artifacts: Vec<PathBuf>,
    /// Merged application PDF, when unite was requested.
    pub merged: Option<PathBuf>,
    /// Total elapsed time.
    pub elapsed: std::time::Duration,
}

/// Progress callback for reporting pipeline status.
pub trait ProgressReporter {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called after one content unit has been compiled.
    fn unit_rendered(&self, slug: &str, current: usize, total: usize);
    /// Called when the pipeline completes.
    fn done(&self, result: &RenderResult);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn unit_rendered(&self, _slug: &str, _current: usize, _total: usize) {}
    fn done(&self, _result: &RenderResult) {}
}

/// Run the full render pipeline.
///
/// 1. List content units under the content zone root
/// 2. Assemble and compile each unit, strictly in sequence
/// 3. Optionally merge the artifacts plus supplements into one PDF
///
/// Aborts on the first failure, leaving earlier artifacts on disk.
pub fn render_application(
    config: &RenderConfig,
    progress: &dyn ProgressReporter,
) -> Result<RenderResult> {
    let start = Instant::now();
    let job_name = config.overrides.job_name();

    info!(
        job = %job_name,
        unite = config.unite,
        verbose = config.verbose,
        overrides = ?config.overrides.names(),
        "starting render"
    );

    // --- Phase 1: content units ---
    let units = content_units(&config.layout)?;
    if units.is_empty() {
        warn!(dir = %config.layout.zone_root(Zone::Content).display(),
            "no content units found");
    }

    // --- Phase 2: assemble + compile, one unit at a time ---
    let compile_options = CompileOptions {
        engine: config.engine.clone(),
        verbose: config.verbose,
    };

    let mut artifacts = Vec::with_capacity(units.len());
    let total = units.len();

    for (i, unit) in units.iter().enumerate() {
        let unit_slug = slug(&job_name, unit);
        progress.phase(&format!("Rendering {unit_slug}"));

        let source = assemble_source(&config.layout, unit, &config.overrides)?;
        let artifact = compile(&config.layout, &compile_options, &unit_slug, &source)?;

        progress.unit_rendered(&unit_slug, i + 1, total);
        artifacts.push(artifact);
    }

    // --- Phase 3: unite ---
    let merged = if config.unite {
        progress.phase("Merging application");

        let supplements = locate_supplements(&config.layout.supplements_dir, &config.overrides)?;

        let mut inputs = artifacts.clone();
        inputs.extend(supplements);

        let target = config.layout.out_dir.join(format!("{job_name}_application.pdf"));
        merge_pdfs(&config.merger, &inputs, &target)?;
        Some(target)
    } else {
        None
    };

    let result = RenderResult {
        job_name,
        artifacts,
        merged,
        elapsed: start.elapsed(),
    };

    progress.done(&result);

    info!(
        job = %result.job_name,
        artifacts = result.artifacts.len(),
        merged = result.merged.is_some(),
        elapsed_ms = result.elapsed.as_millis(),
        "render complete"
    );

    Ok(result)
}

/// List content units: the directories directly under the content zone
/// root, in OS listing order (deliberately unsorted — processing order is
/// not part of the contract).
fn content_units(layout: &Layout) -> Result<Vec<String>> {
    let content_root = layout.zone_root(Zone::Content);
    let entries =
        std::fs::read_dir(&content_root).map_err(|e| DossierError::io(&content_root, e))?;

    let mut units = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| DossierError::io(&content_root, e))?;
        if entry.path().is_dir() {
            units.push(entry.file_name().to_string_lossy().into_owned());
        }
    }

    Ok(units)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn temp_root() -> PathBuf {
        let root = std::env::temp_dir().join(format!(
            "dossier-pipeline-test-{}",
            uuid::Uuid::now_v7()
        ));
        std::fs::create_dir_all(&root).unwrap();
        root
    }

    fn make_layout(root: &Path) -> Layout {
        let layout = Layout {
            documents_dir: root.join("documents"),
            out_dir: root.join("out"),
            supplements_dir: root.join("supplements"),
        };
        for zone in Zone::ALL {
            std::fs::create_dir_all(layout.zone_root(zone)).unwrap();
        }
        std::fs::create_dir_all(&layout.supplements_dir).unwrap();
        layout
    }

    fn touch(dir: &Path, name: &str) {
        std::fs::create_dir_all(dir).unwrap();
        std::fs::write(dir.join(name), format!("% {name}\n")).unwrap();
    }

    #[cfg(unix)]
    fn write_script(path: &Path, body: &str) {
        use std::os::unix::fs::PermissionsExt;
        std::fs::write(path, body).unwrap();
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755)).unwrap();
    }

    /// Stand-in engine: writes a same-named .pdf next to its .tex input.
    #[cfg(unix)]
    fn fake_engine(root: &Path) -> String {
        let script = root.join("fake-engine.sh");
        write_script(
            &script,
            "#!/bin/sh\nfor a in \"$@\"; do last=\"$a\"; done\ncp \"$last\" \"${last%.tex}.pdf\"\n",
        );
        script.display().to_string()
    }

    /// Stand-in merger: concatenates all inputs into the last argument.
    #[cfg(unix)]
    fn fake_merger(root: &Path) -> String {
        let script = root.join("fake-merger.sh");
        write_script(
            &script,
            "#!/bin/sh\nfor a in \"$@\"; do last=\"$a\"; done\n: > \"$last\"\n\
             while [ $# -gt 1 ]; do cat \"$1\" >> \"$last\"; shift; done\n",
        );
        script.display().to_string()
    }

    fn make_config(root: &Path, overrides: &[&str], unite: bool) -> RenderConfig {
        #[cfg(unix)]
        let (engine, merger) = (fake_engine(root), fake_merger(root));
        #[cfg(not(unix))]
        let (engine, merger) = ("pdflatex".to_string(), "pdfunite".to_string());

        RenderConfig {
            layout: make_layout(root),
            overrides: OverrideChain::new(overrides.iter().map(|s| s.to_string()).collect()),
            unite,
            verbose: false,
            engine,
            merger,
        }
    }

    #[cfg(unix)]
    #[test]
    fn renders_one_artifact_per_unit() {
        let root = temp_root();
        let config = make_config(&root, &[], false);

        touch(&config.layout.zone_root(Zone::Begin), "01_head.tex");
        touch(&config.layout.zone_root(Zone::Content).join("intro"), "01_body.tex");
        touch(&config.layout.zone_root(Zone::End), "01_foot.tex");

        let result = render_application(&config, &SilentProgress).unwrap();

        assert_eq!(result.job_name, "default");
        assert_eq!(result.artifacts, [config.layout.out_dir.join("default_intro.pdf")]);
        assert!(result.artifacts[0].is_file());
        assert!(result.merged.is_none());

        let _ = std::fs::remove_dir_all(&root);
    }

    #[cfg(unix)]
    #[test]
    fn unite_merges_artifacts_and_supplements() {
        let root = temp_root();
        let config = make_config(&root, &[], true);

        touch(&config.layout.zone_root(Zone::Content).join("intro"), "01_body.tex");
        std::fs::write(config.layout.supplements_dir.join("cert.pdf"), "CERT").unwrap();
        std::fs::write(config.layout.supplements_dir.join("supplements"), "cert.pdf\n").unwrap();

        let result = render_application(&config, &SilentProgress).unwrap();

        let merged = result.merged.expect("merged artifact");
        assert_eq!(merged, config.layout.out_dir.join("default_application.pdf"));
        let content = std::fs::read_to_string(&merged).unwrap();
        // Compiled artifact pages first, supplements after.
        assert!(content.contains("01_body.tex"));
        assert!(content.ends_with("CERT"));

        let _ = std::fs::remove_dir_all(&root);
    }

    #[cfg(unix)]
    #[test]
    fn override_chain_names_the_job() {
        let root = temp_root();
        let config = make_config(&root, &["acme", "senior"], false);

        touch(&config.layout.zone_root(Zone::Content).join("letter"), "01_body.tex");

        let result = render_application(&config, &SilentProgress).unwrap();
        assert_eq!(result.job_name, "acme-senior");
        assert_eq!(
            result.artifacts,
            [config.layout.out_dir.join("acme-senior_letter.pdf")]
        );

        let _ = std::fs::remove_dir_all(&root);
    }

    #[cfg(unix)]
    #[test]
    fn files_under_content_root_are_not_units() {
        let root = temp_root();
        let config = make_config(&root, &[], false);

        // A shared fragment directly in content/ is zone material, not a
        // unit of its own.
        touch(&config.layout.zone_root(Zone::Content), "00_shared.tex");
        touch(&config.layout.zone_root(Zone::Content).join("cv"), "01_body.tex");

        let result = render_application(&config, &SilentProgress).unwrap();
        assert_eq!(result.artifacts.len(), 1);
        assert_eq!(result.artifacts[0], config.layout.out_dir.join("default_cv.pdf"));

        // The shared fragment feeds into the unit's source.
        let source = std::fs::read_to_string(config.layout.work_dir().join("default_cv.tex")).unwrap();
        assert!(source.contains("00_shared.tex"));
        assert!(source.contains("01_body.tex"));

        let _ = std::fs::remove_dir_all(&root);
    }

    #[cfg(unix)]
    #[test]
    fn failed_unit_aborts_and_keeps_earlier_artifacts() {
        let root = temp_root();
        let mut config = make_config(&root, &[], false);
        // An engine that exits 0 but never writes output.
        config.engine = "true".into();

        touch(&config.layout.zone_root(Zone::Content).join("intro"), "01_body.tex");

        let err = render_application(&config, &SilentProgress).unwrap_err();
        assert!(matches!(err, DossierError::Tool(_)));

        let _ = std::fs::remove_dir_all(&root);
    }

    #[test]
    fn empty_content_root_renders_nothing() {
        let root = temp_root();
        let config = make_config(&root, &[], false);

        let result = render_application(&config, &SilentProgress).unwrap();
        assert!(result.artifacts.is_empty());
        assert!(result.merged.is_none());

        let _ = std::fs::remove_dir_all(&root);
    }
}
