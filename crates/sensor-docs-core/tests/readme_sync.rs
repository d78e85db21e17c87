use std::fs;
use std::path::Path;

use sensor_docs_core::{Config, DocSync, SensorDocsError, SyncOutcome, WalkMode};
use tempfile::TempDir;

const README: &str = "\
# Custom PRTG Sensor Scripts

## Sensors
<!-- SENSOR LIST START -->
stale
<!-- SENSOR LIST END -->

## Repository Structure
<!-- REPO STRUCTURE START -->
stale
<!-- REPO STRUCTURE END -->

License: MIT
";

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn example_repo() -> TempDir {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "README.md", README);
    write(tmp.path(), "Linux/cpu.ps1", "Get-Counter\n");
    write(tmp.path(), "Windows/IIS/site.ps1", "Get-Website\n");
    write(tmp.path(), "Windows/IIS/README.md", "# IIS\n");
    write(tmp.path(), ".github/workflows/docs.ps1", "");
    tmp
}

fn config() -> Config {
    let mut config = Config::default();
    config.document.display_name = Some("Custom-PRTG-Sensor-Scripts".to_string());
    config
}

#[test]
fn test_worked_example() {
    let tmp = example_repo();
    let sync = DocSync::new(tmp.path(), config());

    let (_, outcome) = sync.update().unwrap();
    assert_eq!(outcome, SyncOutcome::Updated);

    let expected = "\
# Custom PRTG Sensor Scripts

## Sensors
<!-- SENSOR LIST START -->
Sensor List:
- **[Linux:](./Linux)**
  - *cpu.ps1*
- **[Windows:](./Windows)**
  - **[IIS](./Windows/IIS)**
    - *site.ps1*

<!-- SENSOR LIST END -->

## Repository Structure
<!-- REPO STRUCTURE START -->
```
Custom-PRTG-Sensor-Scripts/
├── Linux/
│   ├── cpu.ps1
├── Windows/
│   ├── IIS/
│   │   ├── site.ps1
│   │   └── README.md
```

<!-- REPO STRUCTURE END -->

License: MIT
";
    let content = fs::read_to_string(tmp.path().join("README.md")).unwrap();
    assert_eq!(content, expected);
}

#[test]
fn test_second_run_is_byte_identical() {
    let tmp = example_repo();
    let sync = DocSync::new(tmp.path(), config());

    sync.update().unwrap();
    let first = fs::read(tmp.path().join("README.md")).unwrap();

    let (plan, outcome) = sync.update().unwrap();
    let second = fs::read(tmp.path().join("README.md")).unwrap();

    assert_eq!(outcome, SyncOutcome::Unchanged);
    assert!(!plan.is_changed());
    assert_eq!(first, second);
}

#[test]
fn test_new_script_only_touches_regions() {
    let tmp = example_repo();
    let sync = DocSync::new(tmp.path(), config());
    sync.update().unwrap();
    let before = fs::read_to_string(tmp.path().join("README.md")).unwrap();

    write(tmp.path(), "Linux/mem.ps1", "");
    assert!(matches!(sync.check(), Err(SensorDocsError::Stale { .. })));
    sync.update().unwrap();
    let after = fs::read_to_string(tmp.path().join("README.md")).unwrap();

    assert!(after.contains("  - *mem.ps1*\n"));
    assert!(after.contains("│   ├── mem.ps1\n"));

    let head = before.find("<!-- SENSOR LIST START -->").unwrap();
    assert_eq!(before[..head], after[..head]);
    assert!(after.ends_with("<!-- REPO STRUCTURE END -->\n\nLicense: MIT\n"));
}

#[test]
fn test_one_heading_per_category() {
    let tmp = example_repo();
    for category in ["Cloud", "Network", "Storage"] {
        fs::create_dir_all(tmp.path().join(category)).unwrap();
    }
    let sync = DocSync::new(tmp.path(), config());

    let rendered = sync.render().unwrap();
    let headings: Vec<_> = rendered
        .sensor_list
        .lines()
        .filter(|l| l.starts_with("- **["))
        .collect();

    assert_eq!(
        headings,
        vec![
            "- **[Cloud:](./Cloud)**",
            "- **[Linux:](./Linux)**",
            "- **[Network:](./Network)**",
            "- **[Storage:](./Storage)**",
            "- **[Windows:](./Windows)**",
        ]
    );
    assert_eq!(rendered.categories, 5);
    assert_eq!(rendered.scripts, 2);
}

#[test]
fn test_config_file_drives_deep_walk() {
    let tmp = example_repo();
    write(tmp.path(), "Windows/IIS/Pools/pool.ps1", "<#\n.SYNOPSIS\n  App pool state\n#>\n");
    write(
        tmp.path(),
        "sensor-docs.toml",
        "[scan]\nmode = \"deep\"\n\n[document]\ndisplay_name = \"Sensors\"\n",
    );

    let config = Config::load(tmp.path()).unwrap();
    assert_eq!(config.scan.mode, WalkMode::Deep);

    let rendered = DocSync::new(tmp.path(), config).render().unwrap();
    assert!(rendered
        .sensor_list
        .contains("  - **[IIS/Pools](./Windows/IIS/Pools)**\n    - *pool.ps1* - App pool state\n"));
    assert!(rendered.tree.starts_with("```\nSensors/\n"));
    assert!(rendered.tree.contains("│   ├── IIS/Pools/\n│   │   ├── pool.ps1\n"));
}
