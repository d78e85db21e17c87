//! Marker-delimited region replacement.
//!
//! A region is everything strictly between a start marker and the next end
//! marker. Markers are kept; the interior becomes `"\n" + body + "\n"`.

use crate::config::{MarkerPair, MarkersConfig};

/// Replacement content for one named region
#[derive(Debug, Clone, Copy)]
pub struct RegionUpdate<'a> {
    pub name: &'a str,
    pub markers: &'a MarkerPair,
    pub body: &'a str,
}

/// Outcome of patching a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patched {
    pub text: String,
    /// Regions whose marker pair was not found
    pub missing: Vec<String>,
}

/// Replace the sensor list and structure regions using the default markers.
pub fn patch(document: &str, sensor_list: &str, tree: &str) -> String {
    let markers = MarkersConfig::default();
    patch_regions(
        document,
        &[
            RegionUpdate {
                name: "sensor_list",
                markers: &markers.sensor_list,
                body: sensor_list,
            },
            RegionUpdate {
                name: "structure",
                markers: &markers.structure,
                body: tree,
            },
        ],
    )
    .text
}

/// Apply each update in order; a region without markers is left alone.
pub fn patch_regions(document: &str, updates: &[RegionUpdate<'_>]) -> Patched {
    let mut text = document.to_string();
    let mut missing = Vec::new();

    for update in updates {
        let (next, count) = splice(&text, update.markers, update.body);
        if count == 0 {
            missing.push(update.name.to_string());
        }
        text = next;
    }

    Patched { text, missing }
}

/// Replace the interior of every `start .. end` span, returning the new text
/// and the number of spans replaced.
pub fn splice(document: &str, markers: &MarkerPair, body: &str) -> (String, usize) {
    if markers.start.is_empty() || markers.end.is_empty() {
        return (document.to_string(), 0);
    }

    let mut out = String::with_capacity(document.len() + body.len());
    let mut rest = document;
    let mut count = 0;

    while let Some(start) = rest.find(&markers.start) {
        let interior = start + markers.start.len();
        let Some(end) = rest[interior..].find(&markers.end).map(|i| interior + i) else {
            break;
        };

        out.push_str(&rest[..interior]);
        out.push('\n');
        out.push_str(body);
        out.push('\n');
        out.push_str(&markers.end);

        rest = &rest[end + markers.end.len()..];
        count += 1;
    }

    out.push_str(rest);
    (out, count)
}
