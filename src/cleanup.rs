//! Final working-directory cleanup.
//!
//! Runs exactly once, after every set has been attempted, so the keep set is
//! complete before the first deletion decision. Deletion is best-effort: a
//! file that cannot be removed is reported and skipped.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Extensions (case-insensitive) that mark the tool's own helper scripts;
/// these are never deleted, keep set or not.
const SCRIPT_EXTS: [&str; 4] = ["py", "bat", "sh", "cmd"];

/// Delete every regular file in `dir` except kept files and helper scripts.
///
/// Directories are left untouched. Returns the number of deleted files.
pub fn run(dir: &Path, keep_files: &HashSet<String>) -> Result<usize> {
    println!("\nPerforming final cleanup...");

    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory: {}", dir.display()))?;

    let mut deleted = 0;
    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().into_owned();
        if keep_files.contains(&name) || is_script(&name) {
            continue;
        }

        match fs::remove_file(&path) {
            Ok(()) => {
                println!("  Deleted: {name}");
                deleted += 1;
            }
            Err(err) => eprintln!("  Could not delete {name}: {err}"),
        }
    }

    println!("Cleanup complete.");
    Ok(deleted)
}

fn is_script(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| SCRIPT_EXTS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}
