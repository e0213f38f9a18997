//! Cube → equirectangular projection.
//!
//! Consumed by the assembler as a pure function: six oriented face buffers
//! plus a target size in, one equirectangular buffer out.
//!
//! Coordinate convention: +x right, +y up, +z forward. Output longitude runs
//! from -π at the left edge to +π at the right (0 = forward face center),
//! latitude from +π/2 at the top row to -π/2 at the bottom. Each output pixel
//! is mapped to a unit direction, the dominant axis picks the face, and the
//! face is sampled bilinearly through its own normalized UV, so faces need
//! not be square or equally sized. The Up face is oriented with the forward
//! direction at its bottom edge, the Down face with forward at its top edge.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use image::{Rgb, RgbImage};
use thiserror::Error;

use crate::cube::{Orientation, OrientedCube};

/// Rejected projection input.
#[derive(Debug, Error)]
pub enum ProjectionError {
    /// Target width or height is zero.
    #[error("output dimensions must be non-zero (got {width}x{height})")]
    ZeroOutput { width: u32, height: u32 },

    /// A face buffer has no pixels to sample.
    #[error("cube face {orientation:?} has a zero dimension")]
    EmptyFace { orientation: Orientation },
}

/// Project an oriented cube onto an equirectangular image of `width` ×
/// `height` pixels.
pub fn cube_to_equirect(
    cube: &OrientedCube,
    width: u32,
    height: u32,
) -> Result<RgbImage, ProjectionError> {
    if width == 0 || height == 0 {
        return Err(ProjectionError::ZeroOutput { width, height });
    }
    for (orientation, face) in cube.faces() {
        if face.width() == 0 || face.height() == 0 {
            return Err(ProjectionError::EmptyFace { orientation });
        }
    }

    // Longitude is constant per column; precompute its sin/cos once.
    let lon_table: Vec<(f64, f64)> = (0..width)
        .map(|x| {
            let lon = (f64::from(x) + 0.5) / f64::from(width) * TAU - PI;
            lon.sin_cos()
        })
        .collect();

    let mut out = RgbImage::new(width, height);
    for y in 0..height {
        let lat = FRAC_PI_2 - (f64::from(y) + 0.5) / f64::from(height) * PI;
        let (sin_lat, cos_lat) = lat.sin_cos();
        for x in 0..width {
            let (sin_lon, cos_lon) = lon_table[x as usize];
            let dir_x = cos_lat * sin_lon;
            let dir_y = sin_lat;
            let dir_z = cos_lat * cos_lon;

            let (orientation, u, v) = face_uv(dir_x, dir_y, dir_z);
            out.put_pixel(x, y, sample(cube.face(orientation), u, v));
        }
    }
    Ok(out)
}

/// Pick the cube face for a view direction and return the face-local UV,
/// both in [-1, 1] with u growing rightward and v downward on the face image.
fn face_uv(dir_x: f64, dir_y: f64, dir_z: f64) -> (Orientation, f64, f64) {
    let ax = dir_x.abs();
    let ay = dir_y.abs();
    let az = dir_z.abs();

    if ax >= ay && ax >= az {
        if dir_x > 0.0 {
            (Orientation::Right, -dir_z / ax, -dir_y / ax)
        } else {
            (Orientation::Left, dir_z / ax, -dir_y / ax)
        }
    } else if ay >= az {
        if dir_y > 0.0 {
            (Orientation::Up, dir_x / ay, dir_z / ay)
        } else {
            (Orientation::Down, dir_x / ay, -dir_z / ay)
        }
    } else if dir_z > 0.0 {
        (Orientation::Forward, dir_x / az, -dir_y / az)
    } else {
        (Orientation::Backward, -dir_x / az, -dir_y / az)
    }
}

/// Bilinearly sample a face at normalized UV, clamping at the edges.
fn sample(face: &RgbImage, u: f64, v: f64) -> Rgb<u8> {
    let max_x = f64::from(face.width() - 1);
    let max_y = f64::from(face.height() - 1);
    let px = ((u + 1.0) * 0.5 * f64::from(face.width()) - 0.5).clamp(0.0, max_x);
    let py = ((v + 1.0) * 0.5 * f64::from(face.height()) - 0.5).clamp(0.0, max_y);

    let x0 = px.floor() as u32;
    let y0 = py.floor() as u32;
    let x1 = (x0 + 1).min(face.width() - 1);
    let y1 = (y0 + 1).min(face.height() - 1);
    let fx = px - f64::from(x0);
    let fy = py - f64::from(y0);

    let p00 = face.get_pixel(x0, y0).0;
    let p10 = face.get_pixel(x1, y0).0;
    let p01 = face.get_pixel(x0, y1).0;
    let p11 = face.get_pixel(x1, y1).0;

    let mut blended = [0u8; 3];
    for channel in 0..3 {
        let top = f64::from(p00[channel]) * (1.0 - fx) + f64::from(p10[channel]) * fx;
        let bottom = f64::from(p01[channel]) * (1.0 - fx) + f64::from(p11[channel]) * fx;
        blended[channel] = (top * (1.0 - fy) + bottom * fy).round() as u8;
    }
    Rgb(blended)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RIGHT: [u8; 3] = [255, 0, 0];
    const LEFT: [u8; 3] = [0, 255, 0];
    const UP: [u8; 3] = [0, 0, 255];
    const DOWN: [u8; 3] = [255, 255, 0];
    const FORWARD: [u8; 3] = [255, 255, 255];
    const BACKWARD: [u8; 3] = [40, 40, 40];

    fn solid_cube(side: u32) -> OrientedCube {
        let face = |color: [u8; 3]| RgbImage::from_pixel(side, side, Rgb(color));
        OrientedCube::new([
            (Orientation::Right, face(RIGHT)),
            (Orientation::Left, face(LEFT)),
            (Orientation::Up, face(UP)),
            (Orientation::Down, face(DOWN)),
            (Orientation::Forward, face(FORWARD)),
            (Orientation::Backward, face(BACKWARD)),
        ])
    }

    #[test]
    fn test_output_dimensions_exact() {
        let out = cube_to_equirect(&solid_cube(8), 64, 32).unwrap();
        assert_eq!((out.width(), out.height()), (64, 32));
    }

    #[test]
    fn test_directions_sample_expected_faces() {
        let out = cube_to_equirect(&solid_cube(8), 64, 32).unwrap();

        // Horizon row: backward at the seam, then left, forward, right.
        assert_eq!(out.get_pixel(0, 16).0, BACKWARD);
        assert_eq!(out.get_pixel(16, 16).0, LEFT);
        assert_eq!(out.get_pixel(32, 16).0, FORWARD);
        assert_eq!(out.get_pixel(48, 16).0, RIGHT);
        assert_eq!(out.get_pixel(63, 16).0, BACKWARD);

        // Poles.
        assert_eq!(out.get_pixel(32, 0).0, UP);
        assert_eq!(out.get_pixel(32, 31).0, DOWN);
    }

    #[test]
    fn test_non_square_faces_accepted() {
        let face = |w, h, color: [u8; 3]| RgbImage::from_pixel(w, h, Rgb(color));
        let cube = OrientedCube::new([
            (Orientation::Right, face(16, 8, RIGHT)),
            (Orientation::Left, face(8, 16, LEFT)),
            (Orientation::Up, face(4, 4, UP)),
            (Orientation::Down, face(32, 2, DOWN)),
            (Orientation::Forward, face(8, 8, FORWARD)),
            (Orientation::Backward, face(2, 2, BACKWARD)),
        ]);

        let out = cube_to_equirect(&cube, 32, 16).unwrap();
        assert_eq!((out.width(), out.height()), (32, 16));
        assert_eq!(out.get_pixel(16, 8).0, FORWARD);
        assert_eq!(out.get_pixel(24, 8).0, RIGHT);
    }

    #[test]
    fn test_zero_output_rejected() {
        let err = cube_to_equirect(&solid_cube(4), 0, 32).unwrap_err();
        assert!(matches!(err, ProjectionError::ZeroOutput { .. }));

        let err = cube_to_equirect(&solid_cube(4), 64, 0).unwrap_err();
        assert!(matches!(err, ProjectionError::ZeroOutput { .. }));
    }

    #[test]
    fn test_seam_columns_agree() {
        // Left and right edge columns look backward from either side of the
        // ±π seam and must sample the same face.
        let out = cube_to_equirect(&solid_cube(8), 128, 64).unwrap();
        for y in [8, 32, 55] {
            assert_eq!(out.get_pixel(0, y).0, out.get_pixel(127, y).0);
        }
    }
}
