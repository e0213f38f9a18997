//! Shared fixtures for end-to-end tests.

use std::path::Path;

use image::{Rgb, RgbImage};
use tempfile::TempDir;

/// Create a temporary working directory for one test.
pub fn temp_workdir() -> TempDir {
    TempDir::new().expect("create temp dir")
}

/// Write a complete six-face set `<base>1..6.<ext>` of small solid images.
pub fn write_cube_set(dir: &Path, base: &str, ext: &str, side: u32) {
    for i in 1..=6u8 {
        RgbImage::from_pixel(side, side, Rgb([i * 40, 100, 200 - i * 20]))
            .save(dir.join(format!("{base}{i}.{ext}")))
            .expect("write face image");
    }
}

/// Sorted names of all regular files directly inside `dir`.
pub fn list_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .expect("read dir")
        .flatten()
        .filter(|entry| entry.path().is_file())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
