// crates/feature_registry/src/lib.rs

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;

/// The set of feature identifiers declared in the project's feature list.
pub type FeatureRegistry = HashSet<String>;

// Matches a feature-list entry such as `- id: FEAT-42`. Everything else in
// the document (section headers, titles, comments) is ignored.
static ENTRY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*-\s*id:\s+([A-Z0-9-]+)").unwrap());

/// Reads the feature-list document at `path` and returns the set of declared
/// feature identifiers.
///
/// This is a permissive line scan, not a strict YAML parse: a line
/// contributes an identifier only if it looks like a list item with an `id:`
/// field whose value matches `[A-Z0-9-]+`; all other lines are skipped
/// without complaint.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read.
pub fn load_feature_ids<P: AsRef<Path>>(path: P) -> Result<FeatureRegistry> {
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Error opening feature list {}", path.display()))?;
    let reader = BufReader::new(file);

    let mut feature_ids = HashSet::new();
    for line in reader.lines() {
        let line = line
            .with_context(|| format!("Error reading feature list {}", path.display()))?;
        if let Some(caps) = ENTRY_RE.captures(&line) {
            feature_ids.insert(caps[1].to_string());
        }
    }

    Ok(feature_ids)
}
