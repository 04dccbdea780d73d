//! Cubespin Core Library - Shared geometry and transformation logic
//!
//! This library provides the stateless core of the point-sampled renderer:
//! rotation state, the closed-form projector and the parametric solids that
//! generate surface samples.

pub mod error;
pub mod projection;
pub mod solid;
pub mod transform;

// Re-export commonly used types
pub use error::{CoreError, CoreResult};
pub use projection::{Camera, ScreenPoint};
pub use solid::{Cube, Face, SamplePoint, Scene, Solid};
pub use transform::{RotationStep, Transform};
