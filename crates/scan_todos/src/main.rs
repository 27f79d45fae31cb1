use std::env;

use anyhow::{Context, Result};

// Library dependencies.
use feature_registry::load_feature_ids;
use todo_report::write_report;
use todo_scanner::{scan_project, DEFAULT_EXTENSIONS};

/// Feature-list document expected at the project root.
const FEATURE_LIST_FILE: &str = "FEATURE_LIST.yaml";
/// Report written back to the project root.
const OUTPUT_FILE: &str = "TODO.json";

fn main() -> Result<()> {
    // The invocation directory is the project root; every component below
    // takes it as an explicit parameter.
    let project_root = env::current_dir().context("Failed to get current directory")?;

    let feature_list_path = project_root.join(FEATURE_LIST_FILE);
    let output_path = project_root.join(OUTPUT_FILE);

    println!("Loading feature list from {}", feature_list_path.display());
    let registry = load_feature_ids(&feature_list_path)?;
    println!("Found {} valid feature IDs", registry.len());

    println!("Scanning project for TODO comments...");
    let mut warnings = Vec::new();
    let todos = scan_project(&project_root, DEFAULT_EXTENSIONS, &registry, &mut warnings);
    for warning in &warnings {
        println!("Warning: {}", warning);
    }

    println!("Found {} TODO comments", todos.len());
    println!("Writing to {}", output_path.display());
    write_report(&output_path, &todos)?;

    println!("Done!");
    Ok(())
}
