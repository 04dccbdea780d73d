//! Camera and projection utilities
use nalgebra::Point3;

use crate::transform::Transform;

pub const DEFAULT_CAMERA_DISTANCE: f64 = 100.0;
pub const DEFAULT_PERSPECTIVE: f64 = 40.0;

/// Horizontal stretch that compensates for character cells being about twice
/// as tall as they are wide.
pub const CELL_ASPECT: f64 = 2.0;

/// A projected sample in integer screen space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: i64,
    pub y: i64,
    /// `1 / z` in camera space; larger is nearer
    pub inv_depth: f64,
}

/// Fixed camera looking down +Z from the origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Distance added to rotated z so geometry sits in front of the viewer
    pub distance: f64,
    /// Focal constant scaling the perspective divide
    pub perspective: f64,
}

impl Camera {
    pub fn new(distance: f64, perspective: f64) -> Self {
        Self {
            distance,
            perspective,
        }
    }

    /// Rotate `point` by `transform` and move it into camera space.
    ///
    /// The X, Y and Z rotations are folded into a single closed-form
    /// expression. Keep the term order as is: re-associating it (or swapping
    /// in a matrix product) changes the rounding and shifts samples across
    /// cell boundaries.
    pub fn project(&self, point: &Point3<f64>, transform: &Transform) -> Point3<f64> {
        let (x, y, z) = (point.x, point.y, point.z);
        let (sin_x, cos_x) = transform.rotate_x.sin_cos();
        let (sin_y, cos_y) = transform.rotate_y.sin_cos();
        let (sin_z, cos_z) = transform.rotate_z.sin_cos();

        let new_x = y * sin_x * sin_y * cos_z - z * cos_x * sin_y * cos_z
            + y * cos_x * sin_z
            + z * sin_x * sin_z
            + x * cos_y * cos_z;

        let new_y = y * cos_x * cos_z + z * sin_x * cos_z
            - y * sin_x * sin_y * sin_z
            + z * cos_x * sin_y * sin_z
            - x * cos_y * sin_z;

        let new_z = z * cos_x * cos_y - y * sin_x * cos_y + x * sin_y;

        Point3::new(new_x, new_y, new_z + self.distance)
    }

    /// Perspective-divide a camera-space point onto a `width` x `height` grid.
    ///
    /// `offset` shifts the result horizontally so solids can sit side by
    /// side. Coordinates are truncated toward zero and may land off-grid.
    pub fn to_screen(
        &self,
        projected: &Point3<f64>,
        offset: f64,
        width: usize,
        height: usize,
    ) -> ScreenPoint {
        let inv_z = 1.0 / projected.z;
        let screen_x =
            width as f64 / 2.0 + offset + self.perspective * inv_z * projected.x * CELL_ASPECT;
        let screen_y = height as f64 / 2.0 + self.perspective * inv_z * projected.y;

        ScreenPoint {
            x: screen_x as i64,
            y: screen_y as i64,
            inv_depth: inv_z,
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(DEFAULT_CAMERA_DISTANCE, DEFAULT_PERSPECTIVE)
    }
}
