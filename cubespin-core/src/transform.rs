//! Rotation state shared by every solid in a frame

/// Per-frame angle increments (in radians)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationStep {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl RotationStep {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl Default for RotationStep {
    fn default() -> Self {
        Self::new(0.05, 0.05, 0.01)
    }
}

/// Rotation around three axes (in radians).
///
/// Angles are unbounded; they wrap through the periodicity of sin/cos.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Transform {
    pub rotate_x: f64,
    pub rotate_y: f64,
    pub rotate_z: f64,
}

impl Transform {
    pub fn new(rotate_x: f64, rotate_y: f64, rotate_z: f64) -> Self {
        Self {
            rotate_x,
            rotate_y,
            rotate_z,
        }
    }

    pub fn zero() -> Self {
        Self::default()
    }

    /// Rotate by delta amounts (in radians)
    pub fn rotate(&mut self, dx: f64, dy: f64, dz: f64) {
        self.rotate_x += dx;
        self.rotate_y += dy;
        self.rotate_z += dz;
    }

    /// Move to the next frame's orientation
    pub fn advance(&mut self, step: &RotationStep) {
        self.rotate(step.x, step.y, step.z);
    }
}
