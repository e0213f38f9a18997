//! Face set discovery: grouping exported cube-face images by filename.
//!
//! A 3D export drops six images per scene, named `<Base>1.jpg` .. `<Base>6.jpg`
//! (the trailing digit is the face index). This module scans a directory and
//! returns only the bases for which all six faces are present. Anything else
//! in the directory is simply not a cube set and is ignored without error.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

/// Still-image extensions recognized when scanning a directory (matched
/// case-insensitively).
pub const IMAGE_EXTS: [&str; 4] = ["jpg", "jpeg", "png", "webp"];

/// A complete six-face cube set found in a directory.
///
/// `faces` holds the source filename for each face index 1..=6. Sets are only
/// constructed once every index is present, so all slots are always filled.
#[derive(Debug, Clone)]
pub struct CubeFaceSet {
    /// Common filename prefix shared by the six faces.
    pub base: String,
    faces: [String; 6],
}

impl CubeFaceSet {
    /// Source filename for a face index in 1..=6.
    pub fn face_name(&self, index: u8) -> &str {
        &self.faces[usize::from(index - 1)]
    }

    /// All six source filenames, in face-index order.
    pub fn face_names(&self) -> impl Iterator<Item = &str> {
        self.faces.iter().map(String::as_str)
    }

    fn from_group(base: String, group: BTreeMap<u8, String>) -> Option<Self> {
        if group.len() != 6 {
            return None;
        }
        let mut faces: [String; 6] = Default::default();
        for (index, name) in group {
            faces[usize::from(index - 1)] = name;
        }
        Some(Self { base, faces })
    }
}

/// Returns true when the filename carries a recognized still-image extension.
pub fn is_image_name(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Scan `dir` for complete cube-face sets, ordered by base name.
///
/// A file is a candidate face when its stem ends in a digit 1..=6 and the
/// remaining prefix is non-empty; the prefix is the base name. A repeated
/// index within a base overwrites the earlier filename (plain map insertion).
/// Bases that never accumulate all six distinct indices are dropped silently;
/// they may be in-progress exports or unrelated files.
pub fn find_cube_sets(dir: &Path) -> Result<Vec<CubeFaceSet>> {
    let mut groups: BTreeMap<String, BTreeMap<u8, String>> = BTreeMap::new();

    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory: {}", dir.display()))?;

    for entry in entries.flatten() {
        if !entry.path().is_file() {
            continue;
        }
        let name = match entry.file_name().into_string() {
            Ok(name) => name,
            // Non-UTF-8 names cannot match the naming convention.
            Err(_) => continue,
        };
        if !is_image_name(&name) {
            continue;
        }
        let stem = match Path::new(&name).file_stem().and_then(|stem| stem.to_str()) {
            Some(stem) if !stem.is_empty() => stem,
            _ => continue,
        };
        let Some(last) = stem.chars().last() else {
            continue;
        };
        let index = match last.to_digit(10) {
            Some(digit @ 1..=6) => digit as u8,
            _ => continue,
        };
        let base = &stem[..stem.len() - last.len_utf8()];
        if base.is_empty() {
            continue;
        }
        groups
            .entry(base.to_string())
            .or_default()
            .insert(index, name);
    }

    let sets: Vec<CubeFaceSet> = groups
        .into_iter()
        .filter_map(|(base, group)| {
            let complete = CubeFaceSet::from_group(base.clone(), group);
            if complete.is_none() {
                debug!(base = %base, "discarding incomplete cube set");
            }
            complete
        })
        .collect();

    Ok(sets)
}
