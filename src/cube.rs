//! Oriented cube faces: loading a discovered set and the projection size guard.

use std::path::Path;

use image::imageops::{self, FilterType};
use image::RgbImage;
use tracing::debug;

use crate::assemble::SetError;
use crate::discover::CubeFaceSet;

/// Ceiling on any face side before the guard downscales, conservatively below
/// the projection arithmetic's hard limit near 32767.
pub const MAX_FACE_SIDE: u32 = 30000;

/// Spatial direction of one cube face in the capture tool's convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Right,
    Left,
    Up,
    Down,
    Forward,
    Backward,
}

impl Orientation {
    /// All six orientations, in face-array order.
    pub const ALL: [Orientation; 6] = [
        Orientation::Right,
        Orientation::Left,
        Orientation::Up,
        Orientation::Down,
        Orientation::Forward,
        Orientation::Backward,
    ];
}

/// Fixed face-index → orientation table for the export convention.
///
/// Index 4 is the exporter's +Z face (labeled forward here) and index 2 its
/// opposite. The table must not change: remapping any entry silently flips
/// the panorama's apparent viewing direction.
pub const FACE_ORIENTATIONS: [(u8, Orientation); 6] = [
    (3, Orientation::Right),
    (1, Orientation::Left),
    (5, Orientation::Up),
    (6, Orientation::Down),
    (4, Orientation::Forward),
    (2, Orientation::Backward),
];

/// The six decoded faces of one cube set, keyed by orientation.
///
/// Always holds exactly one buffer per orientation; the size guard may shrink
/// the buffers in place but never changes the label set.
#[derive(Debug, Clone)]
pub struct OrientedCube {
    faces: [RgbImage; 6],
}

impl OrientedCube {
    /// Build a cube from one face per orientation.
    pub fn new(mut faces: [(Orientation, RgbImage); 6]) -> Self {
        // Storage order is the discriminant order of Orientation.
        faces.sort_by_key(|(orientation, _)| *orientation as usize);
        Self {
            faces: faces.map(|(_, face)| face),
        }
    }

    /// The face buffer for an orientation.
    pub fn face(&self, orientation: Orientation) -> &RgbImage {
        &self.faces[orientation as usize]
    }

    /// All faces with their orientations.
    pub fn faces(&self) -> impl Iterator<Item = (Orientation, &RgbImage)> {
        Orientation::ALL
            .into_iter()
            .map(|orientation| (orientation, self.face(orientation)))
    }

    /// Largest height or width across all six faces.
    pub fn max_side(&self) -> u32 {
        self.faces
            .iter()
            .map(|face| face.width().max(face.height()))
            .max()
            .unwrap_or(0)
    }
}

/// Load the six faces of a set into an oriented cube.
///
/// Fails with [`SetError::MissingFaceFile`] naming the first face that cannot
/// be opened or decoded.
pub fn load_cube(dir: &Path, set: &CubeFaceSet) -> Result<OrientedCube, SetError> {
    let mut faces: Vec<(Orientation, RgbImage)> = Vec::with_capacity(6);
    for (index, orientation) in FACE_ORIENTATIONS {
        let path = dir.join(set.face_name(index));
        let face = image::open(&path)
            .map_err(|source| SetError::MissingFaceFile {
                path: path.clone(),
                source,
            })?
            .to_rgb8();
        debug!(
            path = %path.display(),
            ?orientation,
            width = face.width(),
            height = face.height(),
            "loaded face"
        );
        faces.push((orientation, face));
    }
    let faces: [(Orientation, RgbImage); 6] = match faces.try_into() {
        Ok(faces) => faces,
        // FACE_ORIENTATIONS has exactly six entries.
        Err(_) => unreachable!(),
    };
    Ok(OrientedCube::new(faces))
}

/// Uniformly downscale all faces when any side exceeds `ceiling`.
///
/// Every face is rescaled by the single factor `ceiling / max_side`, so
/// relative proportions between faces (and with them the cube topology) are
/// preserved. Returns the applied factor, or `None` when the cube was already
/// within bounds and left untouched.
pub fn enforce_max_side(cube: &mut OrientedCube, ceiling: u32) -> Option<f64> {
    let max_side = cube.max_side();
    if max_side <= ceiling {
        return None;
    }

    let scale = f64::from(ceiling) / f64::from(max_side);
    for face in &mut cube.faces {
        let new_w = scaled_side(face.width(), scale);
        let new_h = scaled_side(face.height(), scale);
        *face = imageops::resize(face, new_w, new_h, FilterType::Lanczos3);
    }
    Some(scale)
}

fn scaled_side(side: u32, scale: f64) -> u32 {
    ((f64::from(side) * scale) as u32).max(1)
}
