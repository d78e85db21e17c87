//! Markdown renderers for the sensor list and the repository tree.

use crate::synopsis::extract_synopsis;
use crate::walker::{ScriptFile, SensorTree};

const LIST_HEADING: &str = "Sensor List:";
const FENCE: &str = "```";

/// Render the nested sensor list.
///
/// When `synopsis_tag` is set each script is annotated with its synopsis,
/// if it has one.
pub fn render_list(tree: &SensorTree, synopsis_tag: Option<&str>) -> String {
    let mut out = format!("{}\n", LIST_HEADING);

    for category in &tree.categories {
        out.push_str(&format!(
            "- **[{name}:](./{name})**\n",
            name = category.name
        ));
        for script in &category.scripts {
            out.push_str(&list_entry("  ", script, synopsis_tag));
        }

        for sub in &category.subcategories {
            out.push_str(&format!(
                "  - **[{}](./{}/{})**\n",
                sub.label, category.name, sub.label
            ));
            for script in &sub.scripts {
                out.push_str(&list_entry("    ", script, synopsis_tag));
            }
        }
    }

    out
}

fn list_entry(indent: &str, script: &ScriptFile, synopsis_tag: Option<&str>) -> String {
    let synopsis = synopsis_tag
        .map(|tag| extract_synopsis(&script.path, tag))
        .unwrap_or_default();

    if synopsis.is_empty() {
        format!("{}- *{}*\n", indent, script.name)
    } else {
        format!("{}- *{}* - {}\n", indent, script.name, synopsis)
    }
}

/// Render the fenced ASCII tree of the repository.
pub fn render_tree(tree: &SensorTree, display_name: &str, companion: &str) -> String {
    let mut out = format!("{}\n{}/\n", FENCE, display_name);

    for category in &tree.categories {
        out.push_str(&format!("├── {}/\n", category.name));
        for script in &category.scripts {
            out.push_str(&format!("│   ├── {}\n", script.name));
        }

        for sub in &category.subcategories {
            out.push_str(&format!("│   ├── {}/\n", sub.label));
            for script in &sub.scripts {
                out.push_str(&format!("│   │   ├── {}\n", script.name));
            }
            if sub.has_companion {
                out.push_str(&format!("│   │   └── {}\n", companion));
            }
        }

        if category.has_companion {
            out.push_str(&format!("│   ├── {}\n", companion));
        }
    }

    out.push_str(FENCE);
    out.push('\n');
    out
}
