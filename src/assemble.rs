//! Per-set panorama assembly.
//!
//! One cube set goes through title resolution, face loading, the size guard,
//! the projection, and an atomic output write. Whatever goes wrong stays
//! inside the returned [`SetReport`]: a failed set never aborts the run, it
//! lists the files that must survive cleanup instead.

use std::fs;
use std::path::{Path, PathBuf};

use colored::Colorize;
use image::{ImageFormat, RgbImage};
use thiserror::Error;
use tracing::debug;

use crate::cube;
use crate::discover::CubeFaceSet;
use crate::projection::{self, ProjectionError};
use crate::sanitize::sanitize_title;
use crate::title::resolve_title;

/// Sidecar extensions that belong to a set alongside its six faces.
const SIDECAR_EXTS: [&str; 2] = [".html", ".js"];

/// Why a set failed to produce a panorama.
#[derive(Debug, Error)]
pub enum SetError {
    /// A face file could not be opened or decoded.
    #[error("could not read face image {}: {source}", .path.display())]
    MissingFaceFile {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The projection rejected the cube or the target size.
    #[error("projection failed: {0}")]
    Projection(#[from] ProjectionError),

    /// The output could not be encoded or moved into place.
    #[error("could not write output {}: {source}", .path.display())]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Outcome of processing one cube set.
#[derive(Debug)]
pub enum SetReport {
    /// Panorama written; the output filename must survive cleanup.
    Success {
        base: String,
        output: String,
        width: u32,
        height: u32,
    },
    /// Processing failed; every listed file must survive cleanup.
    Failure {
        base: String,
        error: SetError,
        protect: Vec<String>,
    },
}

/// Process one complete cube set and report the outcome.
///
/// The output lands next to the sources as `<prefix><sanitized title>.<ext>`,
/// where the extension follows the set's face-1 file. `ceiling` bounds the
/// face side length before projection (see [`cube::enforce_max_side`]).
pub fn process_set(
    dir: &Path,
    set: &CubeFaceSet,
    width: u32,
    height: u32,
    prefix: &str,
    ceiling: u32,
) -> SetReport {
    println!("\nProcessing base '{}'...", set.base);

    let title = resolve_title(dir, &set.base);
    let safe_title = sanitize_title(&title);
    let output = format!("{prefix}{safe_title}.{}", output_ext(set));
    println!("  Scene title: '{title}' -> filename: '{output}'");

    match assemble(dir, set, width, height, ceiling, &dir.join(&output)) {
        Ok(()) => {
            println!(
                "  {} Saved equirectangular panorama: {output} ({width} x {height})",
                "✓".green()
            );
            SetReport::Success {
                base: set.base.clone(),
                output,
                width,
                height,
            }
        }
        Err(error) => {
            eprintln!(
                "  {} processing base '{}': {error}",
                "ERROR".red(),
                set.base
            );
            eprintln!("  Keeping original files for this base.");
            SetReport::Failure {
                base: set.base.clone(),
                error,
                protect: related_files(dir, set),
            }
        }
    }
}

/// Every file belonging to a set: the six faces plus any sidecar metadata.
pub fn related_files(dir: &Path, set: &CubeFaceSet) -> Vec<String> {
    let mut files: Vec<String> = set.face_names().map(str::to_string).collect();
    for ext in SIDECAR_EXTS {
        let name = format!("{}{ext}", set.base);
        if dir.join(&name).is_file() {
            files.push(name);
        }
    }
    files
}

fn assemble(
    dir: &Path,
    set: &CubeFaceSet,
    width: u32,
    height: u32,
    ceiling: u32,
    out_path: &Path,
) -> Result<(), SetError> {
    let mut loaded = cube::load_cube(dir, set)?;
    if let Some(scale) = cube::enforce_max_side(&mut loaded, ceiling) {
        println!("  Cube faces too large, downscaling by factor {scale:.4}");
    }

    let equirect = projection::cube_to_equirect(&loaded, width, height)?;
    drop(loaded);

    write_atomic(&equirect, out_path)
}

/// Output extension for a set: lowercased extension of its face-1 source.
fn output_ext(set: &CubeFaceSet) -> String {
    Path::new(set.face_name(1))
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("jpg")
        .to_ascii_lowercase()
}

/// Encode to a temporary sibling and rename into place, so a failed write
/// never leaves a truncated file under the final name.
fn write_atomic(img: &RgbImage, path: &Path) -> Result<(), SetError> {
    let write_failure = |source: image::ImageError| SetError::WriteFailure {
        path: path.to_path_buf(),
        source,
    };

    let format = ImageFormat::from_path(path).map_err(write_failure)?;
    let tmp = path.with_extension("tmp");
    debug!(tmp = %tmp.display(), dest = %path.display(), "writing panorama");

    img.save_with_format(&tmp, format).map_err(write_failure)?;
    fs::rename(&tmp, path).map_err(|err| {
        let _ = fs::remove_file(&tmp);
        write_failure(image::ImageError::IoError(err))
    })
}
