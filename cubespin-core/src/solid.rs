//! Parametric solids sampled as point clouds
use nalgebra::Point3;

use crate::error::{CoreError, CoreResult};
use crate::projection::Camera;

/// Distance between consecutive swept coordinates on a face
pub const DEFAULT_STRIDE: f64 = 0.6;

/// Cube faces, in the order their characters are listed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Face {
    Front,
    Right,
    Left,
    Back,
    Bottom,
    Top,
}

impl Face {
    pub const ALL: [Face; 6] = [
        Face::Front,
        Face::Right,
        Face::Left,
        Face::Back,
        Face::Bottom,
        Face::Top,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Map the swept pair `(x, y)` onto this face of a cube with half-extent `size`.
    ///
    /// The back, left and bottom faces negate one swept axis.
    pub fn point(self, x: f64, y: f64, size: f64) -> Point3<f64> {
        match self {
            Face::Front => Point3::new(x, y, -size),
            Face::Right => Point3::new(size, y, x),
            Face::Left => Point3::new(-size, y, -x),
            Face::Back => Point3::new(-x, y, size),
            Face::Bottom => Point3::new(x, -size, -y),
            Face::Top => Point3::new(x, size, y),
        }
    }
}

/// One surface sample and the character it draws with
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplePoint {
    pub point: Point3<f64>,
    pub ch: char,
}

/// Axis-aligned cube centred on the origin
#[derive(Debug, Clone, PartialEq)]
pub struct Cube {
    /// Half-extent along each axis
    pub size: f64,
    /// Horizontal screen offset applied after projection
    pub position: f64,
    /// One character per face, indexed like [`Face::ALL`]
    pub chars: [char; 6],
}

impl Cube {
    pub fn new(size: f64, position: f64, chars: [char; 6]) -> Self {
        Self {
            size,
            position,
            chars,
        }
    }

    pub fn face_char(&self, face: Face) -> char {
        self.chars[face.index()]
    }

    /// Sweep both face axes over `[-size, size)` in steps of `stride`,
    /// yielding six samples (one per face) for every pair.
    pub fn samples(&self, stride: f64) -> CubeSamples<'_> {
        CubeSamples {
            cube: self,
            stride,
            x: -self.size,
            y: -self.size,
            face: 0,
        }
    }
}

/// Iterator over a cube's surface samples.
///
/// Coordinates advance by repeated addition so sample positions match a
/// plain accumulate-by-stride loop exactly.
#[derive(Debug, Clone)]
pub struct CubeSamples<'a> {
    cube: &'a Cube,
    stride: f64,
    x: f64,
    y: f64,
    face: usize,
}

impl Iterator for CubeSamples<'_> {
    type Item = SamplePoint;

    fn next(&mut self) -> Option<SamplePoint> {
        let size = self.cube.size;
        // A non-positive or NaN stride would never leave the first row
        if !(self.stride > 0.0) {
            return None;
        }

        loop {
            if !(self.x < size) {
                return None;
            }
            if !(self.y < size) {
                self.x += self.stride;
                self.y = -size;
                continue;
            }
            if let Some(&face) = Face::ALL.get(self.face) {
                self.face += 1;
                return Some(SamplePoint {
                    point: face.point(self.x, self.y, size),
                    ch: self.cube.face_char(face),
                });
            }
            self.face = 0;
            self.y += self.stride;
        }
    }
}

/// Closed set of drawable shapes
#[derive(Debug, Clone, PartialEq)]
pub enum Solid {
    Cube(Cube),
}

impl Solid {
    pub fn cube(size: f64, position: f64, chars: [char; 6]) -> Self {
        Solid::Cube(Cube::new(size, position, chars))
    }

    /// Surface samples for one frame; calling again restarts the sweep
    pub fn samples(&self, stride: f64) -> impl Iterator<Item = SamplePoint> + '_ {
        match self {
            Solid::Cube(cube) => cube.samples(stride),
        }
    }

    /// Horizontal screen offset
    pub fn offset(&self) -> f64 {
        match self {
            Solid::Cube(cube) => cube.position,
        }
    }

    /// Furthest distance of any surface point from the solid's centre
    pub fn extent(&self) -> f64 {
        match self {
            Solid::Cube(cube) => cube.size * 3f64.sqrt(),
        }
    }
}

/// Ordered list of solids drawn each frame
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Scene {
    pub solids: Vec<Solid>,
}

impl Scene {
    pub fn new(solids: Vec<Solid>) -> Self {
        Self { solids }
    }

    /// Three cubes of decreasing size laid out left to right
    pub fn three_cubes() -> Self {
        Self::new(vec![
            Solid::cube(20.0, -40.0, ['@', '$', '~', '#', ';', '+']),
            Solid::cube(10.0, 10.0, ['O', '=', '*', '%', '&', 'X']),
            Solid::cube(5.0, 40.0, [':', '.', ',', '|', '-', '+']),
        ])
    }

    pub fn len(&self) -> usize {
        self.solids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.solids.is_empty()
    }

    /// Check every solid is well formed and stays in front of `camera` under
    /// any rotation.
    pub fn validate(&self, camera: &Camera) -> CoreResult<()> {
        if !(camera.distance.is_finite() && camera.perspective.is_finite()) {
            return Err(CoreError::config("camera distance and perspective must be finite"));
        }

        for (index, solid) in self.solids.iter().enumerate() {
            let Solid::Cube(cube) = solid;
            if !(cube.size.is_finite() && cube.size > 0.0) {
                return Err(CoreError::InvalidSolid {
                    index,
                    reason: format!("size must be positive and finite, got {}", cube.size),
                });
            }
            if !cube.position.is_finite() {
                return Err(CoreError::InvalidSolid {
                    index,
                    reason: format!("position must be finite, got {}", cube.position),
                });
            }

            let extent = solid.extent();
            if extent >= camera.distance {
                return Err(CoreError::CameraTooClose {
                    index,
                    extent,
                    distance: camera.distance,
                });
            }
            tracing::debug!(index, extent, offset = solid.offset(), "solid validated");
        }

        Ok(())
    }
}
