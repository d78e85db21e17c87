use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SensorDocsError};

const CONFIG_FILE: &str = "sensor-docs.toml";

/// Directories at the repository root that never count as categories
pub const DEFAULT_SKIP_DIRS: &[&str] = &[".git", ".github", "__pycache__", "node_modules"];

pub const DEFAULT_EXTENSION: &str = ".ps1";
pub const DEFAULT_COMPANION: &str = "README.md";
pub const DEFAULT_DOCUMENT: &str = "README.md";
pub const DEFAULT_SYNOPSIS_TAG: &str = ".SYNOPSIS";

pub const SENSOR_LIST_START: &str = "<!-- SENSOR LIST START -->";
pub const SENSOR_LIST_END: &str = "<!-- SENSOR LIST END -->";
pub const STRUCTURE_START: &str = "<!-- REPO STRUCTURE START -->";
pub const STRUCTURE_END: &str = "<!-- REPO STRUCTURE END -->";

/// Default config template with rich comments
const DEFAULT_CONFIG_TEMPLATE: &str = r#"# sensor-docs configuration file
# Location: <repository root>/sensor-docs.toml

[scan]
# File extension of sensor scripts (matched case-insensitively)
extension = ".ps1"

# Top-level directories that are not categories
skip_dirs = [".git", ".github", "__pycache__", "node_modules"]

# File whose presence is shown in the repository tree
companion = "README.md"

# "shallow": category files plus one level of subfolders
# "deep":    every folder below a category, at any depth
mode = "shallow"

[document]
# Document to update, relative to the repository root
path = "README.md"

# Root line of the structure diagram (default: repository directory name)
# display_name = "Custom-PRTG-Sensor-Scripts"

# Append the script's synopsis to each entry of the sensor list
synopsis = true
synopsis_tag = ".SYNOPSIS"

[markers.sensor_list]
start = "<!-- SENSOR LIST START -->"
end = "<!-- SENSOR LIST END -->"

[markers.structure]
start = "<!-- REPO STRUCTURE START -->"
end = "<!-- REPO STRUCTURE END -->"
"#;

/// Global configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub scan: ScanConfig,
    #[serde(default)]
    pub document: DocumentConfig,
    #[serde(default)]
    pub markers: MarkersConfig,
}

/// How far below a category the walker descends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WalkMode {
    /// Category files plus one level of subdirectories
    #[default]
    Shallow,
    /// Every directory below a category
    Deep,
}

impl WalkMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Shallow => "shallow",
            Self::Deep => "deep",
        }
    }
}

/// Traversal settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanConfig {
    #[serde(default = "default_extension")]
    pub extension: String,

    #[serde(default = "default_skip_dirs")]
    pub skip_dirs: Vec<String>,

    #[serde(default = "default_companion")]
    pub companion: String,

    #[serde(default)]
    pub mode: WalkMode,
}

fn default_extension() -> String {
    DEFAULT_EXTENSION.to_string()
}

fn default_skip_dirs() -> Vec<String> {
    DEFAULT_SKIP_DIRS.iter().map(|s| s.to_string()).collect()
}

fn default_companion() -> String {
    DEFAULT_COMPANION.to_string()
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extension: default_extension(),
            skip_dirs: default_skip_dirs(),
            companion: default_companion(),
            mode: WalkMode::default(),
        }
    }
}

impl ScanConfig {
    /// Check whether a file name carries the target extension
    pub fn is_script(&self, file_name: &str) -> bool {
        file_name
            .to_lowercase()
            .ends_with(&self.extension.to_lowercase())
    }

    /// Check whether a directory name is in the skip-set
    pub fn is_skipped(&self, dir_name: &str) -> bool {
        self.skip_dirs.iter().any(|d| d == dir_name)
    }
}

/// Target document settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentConfig {
    #[serde(default = "default_document")]
    pub path: PathBuf,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(default = "default_true")]
    pub synopsis: bool,

    #[serde(default = "default_synopsis_tag")]
    pub synopsis_tag: String,
}

fn default_document() -> PathBuf {
    PathBuf::from(DEFAULT_DOCUMENT)
}

fn default_true() -> bool {
    true
}

fn default_synopsis_tag() -> String {
    DEFAULT_SYNOPSIS_TAG.to_string()
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            path: default_document(),
            display_name: None,
            synopsis: true,
            synopsis_tag: default_synopsis_tag(),
        }
    }
}

/// A start/end marker pair delimiting one managed region
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerPair {
    pub start: String,
    pub end: String,
}

impl MarkerPair {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkersConfig {
    #[serde(default = "default_sensor_list_markers")]
    pub sensor_list: MarkerPair,

    #[serde(default = "default_structure_markers")]
    pub structure: MarkerPair,
}

fn default_sensor_list_markers() -> MarkerPair {
    MarkerPair::new(SENSOR_LIST_START, SENSOR_LIST_END)
}

fn default_structure_markers() -> MarkerPair {
    MarkerPair::new(STRUCTURE_START, STRUCTURE_END)
}

impl Default for MarkersConfig {
    fn default() -> Self {
        Self {
            sensor_list: default_sensor_list_markers(),
            structure: default_structure_markers(),
        }
    }
}

impl Config {
    /// Load config from the repository root, falling back to defaults
    pub fn load(root: &Path) -> Result<Self> {
        let path = Self::path(root);
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Load config from an explicit file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content).map_err(|e| SensorDocsError::ConfigParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Get config file path
    pub fn path(root: &Path) -> PathBuf {
        root.join(CONFIG_FILE)
    }

    /// Initialize config with default template (rich comments)
    pub fn init(root: &Path) -> Result<PathBuf> {
        let path = Self::path(root);
        fs::create_dir_all(root)?;

        if !path.exists() {
            fs::write(&path, DEFAULT_CONFIG_TEMPLATE)?;
        }

        Ok(path)
    }

    /// Reject settings the walker or patcher cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.scan.extension.trim().is_empty() {
            return Err(invalid("scan.extension must not be empty"));
        }
        if self.document.synopsis && self.document.synopsis_tag.is_empty() {
            return Err(invalid("document.synopsis_tag must not be empty"));
        }

        for (key, pair) in [
            ("markers.sensor_list", &self.markers.sensor_list),
            ("markers.structure", &self.markers.structure),
        ] {
            if pair.start.is_empty() || pair.end.is_empty() {
                return Err(invalid(&format!("{} markers must not be empty", key)));
            }
            if pair.start == pair.end {
                return Err(invalid(&format!("{} start and end must differ", key)));
            }
        }

        Ok(())
    }

    /// List all config keys with their current values
    pub fn list(&self) -> Vec<(String, String)> {
        vec![
            ("scan.extension".to_string(), self.scan.extension.clone()),
            (
                "scan.skip_dirs".to_string(),
                format!("{:?}", self.scan.skip_dirs),
            ),
            ("scan.companion".to_string(), self.scan.companion.clone()),
            ("scan.mode".to_string(), self.scan.mode.as_str().to_string()),
            (
                "document.path".to_string(),
                self.document.path.display().to_string(),
            ),
            (
                "document.display_name".to_string(),
                self.document
                    .display_name
                    .clone()
                    .unwrap_or_else(|| "(root directory name)".to_string()),
            ),
            (
                "document.synopsis".to_string(),
                self.document.synopsis.to_string(),
            ),
            (
                "document.synopsis_tag".to_string(),
                self.document.synopsis_tag.clone(),
            ),
            (
                "markers.sensor_list".to_string(),
                format!(
                    "{} .. {}",
                    self.markers.sensor_list.start, self.markers.sensor_list.end
                ),
            ),
            (
                "markers.structure".to_string(),
                format!(
                    "{} .. {}",
                    self.markers.structure.start, self.markers.structure.end
                ),
            ),
        ]
    }

    /// Render the effective config as TOML
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

fn invalid(message: &str) -> SensorDocsError {
    SensorDocsError::InvalidConfig {
        message: message.to_string(),
    }
}
