//! The conversion run: discover sets, assemble panoramas, clean the folder.

use std::collections::HashSet;
use std::path::Path;

use anyhow::Result;
use colored::Colorize;

use crate::assemble::{self, SetReport};
use crate::{cleanup, cube, discover};

/// Hard ceiling on the output panorama width.
pub const MAX_OUTPUT_WIDTH: u32 = 30000;

/// Run the full conversion over `indir`.
///
/// Sets are processed sequentially in base-name order; per-set failures are
/// reported and protect that set's source files, then the run moves on. The
/// final cleanup deletes everything that is neither a generated output, a
/// protected source, nor a helper script.
pub fn execute(width: u32, indir: &Path, prefix: &str) -> Result<()> {
    let width = clamp_width(width);
    let height = width / 2;

    let sets = discover::find_cube_sets(indir)?;
    if sets.is_empty() {
        println!("No complete <Base>1..6 cube sets found.");
        return Ok(());
    }

    println!("Found cube sets for bases:");
    for set in &sets {
        println!("  {}", set.base);
    }

    let mut keep_files: HashSet<String> = HashSet::new();
    let mut failures = 0usize;

    for set in &sets {
        match assemble::process_set(indir, set, width, height, prefix, cube::MAX_FACE_SIDE) {
            SetReport::Success { output, .. } => {
                keep_files.insert(output);
            }
            SetReport::Failure { protect, .. } => {
                keep_files.extend(protect);
                failures += 1;
            }
        }
    }

    cleanup::run(indir, &keep_files)?;

    if failures > 0 {
        println!(
            "\n{} {failures} set(s) failed; their source files were kept.",
            "!".yellow()
        );
    }
    println!("\nAll done.");
    Ok(())
}

fn clamp_width(width: u32) -> u32 {
    if width > MAX_OUTPUT_WIDTH {
        eprintln!("Requested width {width} too large, clamping to {MAX_OUTPUT_WIDTH}.");
        MAX_OUTPUT_WIDTH
    } else {
        width
    }
}
