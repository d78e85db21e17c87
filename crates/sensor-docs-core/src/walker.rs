//! Repository traversal.
//!
//! A repository is laid out as `<root>/<category>/[<subcategory>/]<script>`.
//! Every listing is sorted by file name (byte order), which keeps the rendered
//! output stable across platforms and runs.

use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::config::{ScanConfig, WalkMode};
use crate::error::{Result, SensorDocsError};

/// A script found directly inside a category or subcategory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptFile {
    pub name: String,
    pub path: PathBuf,
}

/// A directory below a category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subcategory {
    /// Path relative to the category, `/`-separated
    pub label: String,
    pub path: PathBuf,
    pub scripts: Vec<ScriptFile>,
    pub has_companion: bool,
}

/// A top-level directory of the repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub name: String,
    pub path: PathBuf,
    pub scripts: Vec<ScriptFile>,
    pub subcategories: Vec<Subcategory>,
    pub has_companion: bool,
}

/// Result of walking a repository root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SensorTree {
    pub categories: Vec<Category>,
}

impl SensorTree {
    /// Total number of scripts across all categories
    pub fn script_count(&self) -> usize {
        self.categories
            .iter()
            .map(|c| {
                let nested: usize = c.subcategories.iter().map(|s| s.scripts.len()).sum();
                c.scripts.len() + nested
            })
            .sum()
    }
}

/// Immediate contents of one directory
struct Listing {
    scripts: Vec<ScriptFile>,
    dirs: Vec<(String, PathBuf)>,
    has_companion: bool,
}

pub struct TreeWalker<'a> {
    config: &'a ScanConfig,
}

impl<'a> TreeWalker<'a> {
    pub fn new(config: &'a ScanConfig) -> Self {
        Self { config }
    }

    /// Walk `root` and collect its categories
    pub fn walk(&self, root: &Path) -> Result<SensorTree> {
        if !root.is_dir() {
            return Err(SensorDocsError::RootNotFound {
                path: root.to_path_buf(),
            });
        }

        let mut categories = Vec::new();
        for (name, path) in self.list(root)?.dirs {
            if self.config.is_skipped(&name) {
                debug!(dir = %name, "skipping directory");
                continue;
            }
            categories.push(self.walk_category(name, path)?);
        }

        Ok(SensorTree { categories })
    }

    fn walk_category(&self, name: String, path: PathBuf) -> Result<Category> {
        let listing = self.list(&path)?;
        let subcategories = match self.config.mode {
            WalkMode::Shallow => self.shallow_subcategories(listing.dirs)?,
            WalkMode::Deep => self.deep_subcategories(&path)?,
        };

        debug!(
            category = %name,
            scripts = listing.scripts.len(),
            subcategories = subcategories.len(),
            "walked category"
        );

        Ok(Category {
            name,
            path,
            scripts: listing.scripts,
            subcategories,
            has_companion: listing.has_companion,
        })
    }

    fn shallow_subcategories(&self, dirs: Vec<(String, PathBuf)>) -> Result<Vec<Subcategory>> {
        dirs.into_iter()
            .map(|(label, path)| self.subcategory(label, path))
            .collect()
    }

    fn deep_subcategories(&self, category: &Path) -> Result<Vec<Subcategory>> {
        let walker = WalkDir::new(category)
            .min_depth(1)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| {
                let name = e.file_name().to_string_lossy();
                !(e.file_type().is_dir() && self.config.is_skipped(&name))
            });

        let mut subcategories = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    skip_unreachable(err)?;
                    continue;
                }
            };
            if !entry.file_type().is_dir() {
                continue;
            }
            let label = relative_label(category, entry.path());
            subcategories.push(self.subcategory(label, entry.into_path())?);
        }

        subcategories.sort_by(|a, b| a.label.cmp(&b.label));
        Ok(subcategories)
    }

    fn subcategory(&self, label: String, path: PathBuf) -> Result<Subcategory> {
        let listing = self.list(&path)?;
        Ok(Subcategory {
            label,
            path,
            scripts: listing.scripts,
            has_companion: listing.has_companion,
        })
    }

    fn list(&self, dir: &Path) -> Result<Listing> {
        let mut listing = Listing {
            scripts: Vec::new(),
            dirs: Vec::new(),
            has_companion: false,
        };

        for entry in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    skip_unreachable(err)?;
                    continue;
                }
            };
            let name = entry.file_name().to_string_lossy().to_string();

            if name == self.config.companion {
                listing.has_companion = true;
            }

            if entry.file_type().is_dir() {
                listing.dirs.push((name, entry.into_path()));
            } else if entry.file_type().is_file() && self.config.is_script(&name) {
                listing.scripts.push(ScriptFile {
                    name,
                    path: entry.into_path(),
                });
            }
        }

        Ok(listing)
    }
}

/// Broken links and link cycles are skipped; any other walk error is fatal.
fn skip_unreachable(err: walkdir::Error) -> Result<()> {
    if let Some(ancestor) = err.loop_ancestor() {
        debug!(
            path = ?err.path(),
            ancestor = %ancestor.display(),
            "skipping symlink loop"
        );
        return Ok(());
    }

    let dangling = err
        .io_error()
        .is_some_and(|e| e.kind() == io::ErrorKind::NotFound);
    if let Some(path) = err.path().filter(|_| dangling) {
        debug!(path = %path.display(), "skipping broken link");
        return Ok(());
    }

    Err(err.into())
}

fn relative_label(base: &Path, path: &Path) -> String {
    path.strip_prefix(base)
        .unwrap_or(path)
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
