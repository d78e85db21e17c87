//! Ties a repository root to its README.
//!
//! The walk and both renders finish before the document is read, and the
//! document write is always the last step.

use std::fs;
use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{Result, SensorDocsError};
use crate::patcher::{patch_regions, RegionUpdate};
use crate::render::{render_list, render_tree};
use crate::walker::{SensorTree, TreeWalker};

const FALLBACK_DISPLAY_NAME: &str = "repository";

/// Both generated blocks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocs {
    pub sensor_list: String,
    pub tree: String,
    pub categories: usize,
    pub scripts: usize,
}

/// A computed document update that has not been written yet
#[derive(Debug, Clone)]
pub struct SyncPlan {
    pub path: PathBuf,
    pub original: String,
    pub updated: String,
    /// Regions whose markers were not found
    pub missing: Vec<String>,
    pub rendered: RenderedDocs,
}

impl SyncPlan {
    pub fn is_changed(&self) -> bool {
        self.original != self.updated
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    Updated,
    Unchanged,
}

pub struct DocSync {
    root: PathBuf,
    config: Config,
}

impl DocSync {
    pub fn new(root: impl Into<PathBuf>, config: Config) -> Self {
        Self {
            root: root.into(),
            config,
        }
    }

    /// Document path, resolved against the root when relative
    pub fn document_path(&self) -> PathBuf {
        self.root.join(&self.config.document.path)
    }

    /// Root line of the structure diagram
    pub fn display_name(&self) -> String {
        if let Some(name) = &self.config.document.display_name {
            return name.clone();
        }

        self.root
            .canonicalize()
            .ok()
            .and_then(|p| p.file_name().map(|n| n.to_string_lossy().to_string()))
            .unwrap_or_else(|| FALLBACK_DISPLAY_NAME.to_string())
    }

    pub fn walk(&self) -> Result<SensorTree> {
        TreeWalker::new(&self.config.scan).walk(&self.root)
    }

    /// Walk the root once and render both blocks
    pub fn render(&self) -> Result<RenderedDocs> {
        let tree = self.walk()?;
        let synopsis_tag = self
            .config
            .document
            .synopsis
            .then_some(self.config.document.synopsis_tag.as_str());

        Ok(RenderedDocs {
            sensor_list: render_list(&tree, synopsis_tag),
            tree: render_tree(&tree, &self.display_name(), &self.config.scan.companion),
            categories: tree.categories.len(),
            scripts: tree.script_count(),
        })
    }

    /// Render and patch the document in memory
    pub fn plan(&self) -> Result<SyncPlan> {
        let rendered = self.render()?;

        let path = self.document_path();
        if !path.is_file() {
            return Err(SensorDocsError::DocumentNotFound { path });
        }
        let original = fs::read_to_string(&path)?;

        let markers = &self.config.markers;
        let patched = patch_regions(
            &original,
            &[
                RegionUpdate {
                    name: "sensor_list",
                    markers: &markers.sensor_list,
                    body: &rendered.sensor_list,
                },
                RegionUpdate {
                    name: "structure",
                    markers: &markers.structure,
                    body: &rendered.tree,
                },
            ],
        );

        for region in &patched.missing {
            warn!(region = %region, document = %path.display(), "markers not found, region left as is");
        }

        Ok(SyncPlan {
            path,
            original,
            updated: patched.text,
            missing: patched.missing,
            rendered,
        })
    }

    /// Write a plan back to its document
    pub fn apply(&self, plan: &SyncPlan) -> Result<SyncOutcome> {
        if !plan.is_changed() {
            debug!(document = %plan.path.display(), "document already up to date");
            return Ok(SyncOutcome::Unchanged);
        }

        fs::write(&plan.path, &plan.updated)?;
        info!(
            document = %plan.path.display(),
            categories = plan.rendered.categories,
            scripts = plan.rendered.scripts,
            "document updated"
        );
        Ok(SyncOutcome::Updated)
    }

    /// Plan and apply in one step
    pub fn update(&self) -> Result<(SyncPlan, SyncOutcome)> {
        let plan = self.plan()?;
        let outcome = self.apply(&plan)?;
        Ok((plan, outcome))
    }

    /// Fail with `Stale` when the document would change
    pub fn check(&self) -> Result<SyncPlan> {
        let plan = self.plan()?;
        if plan.is_changed() {
            return Err(SensorDocsError::Stale {
                path: plan.path.clone(),
            });
        }
        Ok(plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup() -> TempDir {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("Linux")).unwrap();
        fs::write(tmp.path().join("Linux/cpu.ps1"), "# .SYNOPSIS CPU load\n").unwrap();
        fs::write(
            tmp.path().join("README.md"),
            "# Repo\n<!-- SENSOR LIST START -->\n<!-- SENSOR LIST END -->\n",
        )
        .unwrap();
        tmp
    }

    #[test]
    fn test_display_name_defaults_to_root_dir() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("Custom-PRTG-Sensor-Scripts");
        fs::create_dir_all(&root).unwrap();

        let sync = DocSync::new(&root, Config::default());
        assert_eq!(sync.display_name(), "Custom-PRTG-Sensor-Scripts");
    }

    #[test]
    fn test_update_then_unchanged() {
        let tmp = setup();
        let sync = DocSync::new(tmp.path(), Config::default());

        let (plan, outcome) = sync.update().unwrap();
        assert_eq!(outcome, SyncOutcome::Updated);
        assert_eq!(plan.missing, vec!["structure"]);

        let content = fs::read_to_string(tmp.path().join("README.md")).unwrap();
        assert!(content.contains("  - *cpu.ps1* - CPU load\n"));

        let (_, outcome) = sync.update().unwrap();
        assert_eq!(outcome, SyncOutcome::Unchanged);
        assert!(sync.check().is_ok());
    }

    #[test]
    fn test_check_reports_stale() {
        let tmp = setup();
        let sync = DocSync::new(tmp.path(), Config::default());

        let err = sync.check().unwrap_err();
        assert!(matches!(err, SensorDocsError::Stale { .. }));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_missing_document() {
        let tmp = TempDir::new().unwrap();
        let sync = DocSync::new(tmp.path(), Config::default());

        let err = sync.plan().unwrap_err();
        assert!(matches!(err, SensorDocsError::DocumentNotFound { .. }));
        assert_eq!(err.exit_code(), 3);
    }
}
