//! Synopsis extraction from script comment-based help.
//!
//! PowerShell scripts usually carry a help block such as:
//!
//! ```text
//! <#
//! .SYNOPSIS
//!     Reports CPU load for PRTG.
//! #>
//! ```
//!
//! Only the first occurrence of the tag is inspected.

use std::fs;
use std::path::Path;

use tracing::debug;

/// Extract the one-line synopsis from a script file.
///
/// Returns an empty string when the file cannot be read or carries no tag.
pub fn extract_synopsis(path: &Path, tag: &str) -> String {
    match fs::read(path) {
        Ok(bytes) => synopsis_from_text(&String::from_utf8_lossy(&bytes), tag),
        Err(e) => {
            debug!(path = %path.display(), error = %e, "synopsis skipped: unreadable file");
            String::new()
        }
    }
}

/// Extract the synopsis from already loaded script text.
pub fn synopsis_from_text(content: &str, tag: &str) -> String {
    if tag.is_empty() {
        return String::new();
    }

    let mut lines = content.lines();
    let Some(rest) = lines
        .by_ref()
        .find_map(|line| line.find(tag).map(|idx| &line[idx + tag.len()..]))
    else {
        return String::new();
    };

    let rest = rest.trim_start();
    let inline = rest.strip_prefix(':').unwrap_or(rest).trim();
    if !inline.is_empty() {
        return inline.to_string();
    }

    lines
        .map(strip_comment)
        .find(|line| !line.is_empty())
        .unwrap_or_default()
        .to_string()
}

fn strip_comment(line: &str) -> &str {
    let line = line.trim_start();
    line.strip_prefix('#').unwrap_or(line).trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const TAG: &str = ".SYNOPSIS";

    #[test]
    fn test_inline_synopsis() {
        let text = "# .SYNOPSIS Reports CPU load  \nWrite-Host 1\n";
        assert_eq!(synopsis_from_text(text, TAG), "Reports CPU load");
    }

    #[test]
    fn test_inline_synopsis_with_separator() {
        let text = "# .SYNOPSIS: Checks disk space\n";
        assert_eq!(synopsis_from_text(text, TAG), "Checks disk space");
    }

    #[test]
    fn test_synopsis_on_following_line() {
        let text = "<#\n.SYNOPSIS\n\n    Monitors IIS sites\n.DESCRIPTION\n    Long text\n#>\n";
        assert_eq!(synopsis_from_text(text, TAG), "Monitors IIS sites");
    }

    #[test]
    fn test_synopsis_in_line_comments() {
        let text = "# .SYNOPSIS\n#\n#   Queries the event log\n";
        assert_eq!(synopsis_from_text(text, TAG), "Queries the event log");
    }

    #[test]
    fn test_missing_tag() {
        let text = "param([string]$Server)\nWrite-Host $Server\n";
        assert_eq!(synopsis_from_text(text, TAG), "");
    }

    #[test]
    fn test_tag_is_case_sensitive() {
        let text = ".synopsis lower case\n";
        assert_eq!(synopsis_from_text(text, TAG), "");
    }

    #[test]
    fn test_only_first_tag_counts() {
        let text = ".SYNOPSIS\n.SYNOPSIS second\n";
        assert_eq!(synopsis_from_text(text, TAG), ".SYNOPSIS second");
    }

    #[test]
    fn test_tag_at_end_of_file() {
        assert_eq!(synopsis_from_text("<#\n.SYNOPSIS\n", TAG), "");
    }

    #[test]
    fn test_extract_tolerates_invalid_utf8() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("legacy.ps1");
        let mut bytes = b"# \xff\xfe garbage\n".to_vec();
        bytes.extend_from_slice(b".SYNOPSIS Legacy sensor\n");
        fs::write(&path, bytes).unwrap();

        assert_eq!(extract_synopsis(&path, TAG), "Legacy sensor");
    }

    #[test]
    fn test_extract_missing_file() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(extract_synopsis(&tmp.path().join("nope.ps1"), TAG), "");
    }
}
