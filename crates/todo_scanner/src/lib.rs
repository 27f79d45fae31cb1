// crates/todo_scanner/src/lib.rs

//! Locates feature-tagged TODO comments in source files.
//!
//! A TODO annotation is a comment line of the form
//! `// TODO: (FEAT-1, FEAT-2) description` (a `///` doc-comment marker is
//! accepted too). Immediately following comment lines extend the
//! description until a blank comment, a new `TODO:`, or a non-comment line
//! is reached.

use std::fmt;
use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use walkdir::WalkDir;

use feature_registry::FeatureRegistry;

/// Extensions scanned when the caller does not supply its own set.
pub const DEFAULT_EXTENSIONS: &[&str] = &["rs"];

/// Description recorded for an annotation whose comment carries no text.
pub const NO_DESCRIPTION: &str = "No description provided";

// Paths containing any of these substrings are build artifacts or VCS
// internals and are never scanned. The match is case-sensitive.
const EXCLUDED_PATH_MARKERS: &[&str] = &["target", ".git"];

// Matches the annotation line itself: optional indentation, a `//` or `///`
// marker, the `TODO:` token, a parenthesized feature-id list, and the
// remainder of the line as the initial description.
static TODO_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(///?|//)\s*TODO:\s*\(([^)]+)\)\s*(.*)$").unwrap());

// Strips the comment marker from a continuation line.
static CONTINUATION_MARKER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^///?\s*").unwrap());

/// One discovered TODO comment.
///
/// `line_start` is the 1-based line holding the `TODO:` marker; `line_end`
/// is the last continuation line consumed (equal to `line_start` when the
/// annotation is a single line). `dependencies` keeps the referenced
/// feature ids exactly as written: order preserved, duplicates and empty
/// tokens retained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoAnnotation {
    pub file: String,
    pub line_start: usize,
    pub line_end: usize,
    pub description: String,
    pub dependencies: Vec<String>,
}

/// A non-fatal condition encountered while scanning. The scanner never
/// prints; it pushes these into the caller's sink and the caller decides
/// how to render them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanWarning {
    /// A candidate source file could not be read; it contributes no
    /// annotations.
    UnreadableFile { path: String, reason: String },
    /// An annotation references ids missing from the feature registry.
    /// Emitted once per annotation, carrying every offending id.
    UnknownFeatureIds {
        file: String,
        line: usize,
        ids: Vec<String>,
    },
}

impl fmt::Display for ScanWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanWarning::UnreadableFile { path, reason } => {
                write!(f, "Could not read {}: {}", path, reason)
            }
            ScanWarning::UnknownFeatureIds { file, line, ids } => {
                write!(f, "{}:{}: Invalid feature IDs: {}", file, line, ids.join(", "))
            }
        }
    }
}

/// Walks `root` and scans every regular file whose extension is listed in
/// `extensions`, skipping excluded subtrees (build output, VCS metadata).
/// Unknown feature references and unreadable files are reported through
/// `warnings`; neither stops the walk.
pub fn scan_project(
    root: &Path,
    extensions: &[&str],
    registry: &FeatureRegistry,
    warnings: &mut Vec<ScanWarning>,
) -> Vec<TodoAnnotation> {
    let mut all_todos = Vec::new();

    for entry in WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
    {
        let path = entry.path();
        if is_excluded_path(path) {
            continue;
        }
        let allowed = path
            .extension()
            .and_then(|s| s.to_str())
            .map(|ext| extensions.contains(&ext))
            .unwrap_or(false);
        if !allowed {
            continue;
        }
        all_todos.extend(scan_file_for_todos(path, root, registry, warnings));
    }

    all_todos
}

/// Scans a single file for TODO annotations. `root` is only used to derive
/// the path recorded on each annotation. A file that cannot be read yields
/// an `UnreadableFile` warning and an empty list.
pub fn scan_file_for_todos(
    path: &Path,
    root: &Path,
    registry: &FeatureRegistry,
    warnings: &mut Vec<ScanWarning>,
) -> Vec<TodoAnnotation> {
    let display_path = relative_display_path(path, root);

    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) => {
            warnings.push(ScanWarning::UnreadableFile {
                path: display_path,
                reason: err.to_string(),
            });
            return Vec::new();
        }
    };
    let lines: Vec<&str> = content.lines().collect();

    let mut todos = Vec::new();
    let mut i = 0;
    while i < lines.len() {
        let caps = match TODO_RE.captures(lines[i]) {
            Some(caps) => caps,
            None => {
                i += 1;
                continue;
            }
        };

        // Comma-separated id list; empty tokens survive trimming on purpose.
        let dependencies: Vec<String> =
            caps[2].split(',').map(|id| id.trim().to_string()).collect();
        let mut description = caps[3].trim().to_string();

        // Consume continuation lines. The cursor `j` ends up one past the
        // last consumed line, which in 1-based terms is the inclusive end
        // of the annotation's range.
        let mut j = i + 1;
        while j < lines.len() {
            let next_line = lines[j].trim();
            if !next_line.starts_with("//") {
                break;
            }
            let remainder = CONTINUATION_MARKER_RE.replace(next_line, "");
            let remainder = remainder.trim();
            if remainder.is_empty() || remainder.starts_with("TODO:") {
                break;
            }
            description.push(' ');
            description.push_str(remainder);
            j += 1;
        }

        let invalid_ids: Vec<String> = dependencies
            .iter()
            .filter(|id| !registry.contains(id.as_str()))
            .cloned()
            .collect();
        if !invalid_ids.is_empty() {
            warnings.push(ScanWarning::UnknownFeatureIds {
                file: display_path.clone(),
                line: i + 1,
                ids: invalid_ids,
            });
        }

        if description.is_empty() {
            description = NO_DESCRIPTION.to_string();
        }

        todos.push(TodoAnnotation {
            file: display_path.clone(),
            line_start: i + 1,
            line_end: j,
            description,
            dependencies,
        });

        i = j;
    }

    todos
}

fn is_excluded_path(path: &Path) -> bool {
    let path_str = path.to_string_lossy();
    EXCLUDED_PATH_MARKERS
        .iter()
        .any(|marker| path_str.contains(marker))
}

fn relative_display_path(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .to_string()
}
