// crates/todo_report/src/lib.rs

//! Serializes collected TODO annotations into the project's `TODO.json`
//! report: a JSON array sorted by file path and start line.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use todo_scanner::TodoAnnotation;

/// One entry of the serialized report. The line range is flattened into a
/// `"<start>-<end>"` string; `dependencies` carries the referenced feature
/// ids exactly as they were written in the comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoRecord {
    pub file: String,
    pub line: String,
    pub description: String,
    pub dependencies: Vec<String>,
}

/// Sorts annotations by file path (lexicographic), then by numeric start
/// line. The sort is stable, so annotations sharing both keys keep their
/// discovery order.
pub fn sort_annotations(todos: &mut [TodoAnnotation]) {
    todos.sort_by(|a, b| {
        a.file
            .cmp(&b.file)
            .then_with(|| a.line_start.cmp(&b.line_start))
    });
}

/// Maps annotations onto their serialized shape.
pub fn to_records(todos: &[TodoAnnotation]) -> Vec<TodoRecord> {
    todos
        .iter()
        .map(|todo| TodoRecord {
            file: todo.file.clone(),
            line: format!("{}-{}", todo.line_start, todo.line_end),
            description: todo.description.clone(),
            dependencies: todo.dependencies.clone(),
        })
        .collect()
}

/// Writes the sorted report to `path` as pretty-printed JSON (2-space
/// indentation, non-ASCII text untouched).
///
/// # Errors
///
/// Returns an error if serialization fails or the destination cannot be
/// written.
pub fn write_report<P: AsRef<Path>>(path: P, todos: &[TodoAnnotation]) -> Result<()> {
    let path = path.as_ref();

    let mut sorted = todos.to_vec();
    sort_annotations(&mut sorted);

    let json = serde_json::to_string_pretty(&to_records(&sorted))
        .context("Error serializing TODO report")?;
    fs::write(path, json).with_context(|| format!("Error writing {}", path.display()))?;

    Ok(())
}
