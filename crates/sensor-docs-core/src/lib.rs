pub mod config;
pub mod error;
pub mod patcher;
pub mod render;
pub mod synopsis;
pub mod sync;
pub mod walker;

pub use config::{Config, DocumentConfig, MarkerPair, MarkersConfig, ScanConfig, WalkMode};
pub use error::{Result, SensorDocsError};
pub use patcher::{patch, patch_regions, splice, Patched, RegionUpdate};
pub use render::{render_list, render_tree};
pub use synopsis::{extract_synopsis, synopsis_from_text};
pub use sync::{DocSync, RenderedDocs, SyncOutcome, SyncPlan};
pub use walker::{Category, ScriptFile, SensorTree, Subcategory, TreeWalker};
