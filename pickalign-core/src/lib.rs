//! Core data structures and traits for pickalign
//!
//! This crate provides the fundamental types shared by the alignment crates:
//! picked points, object identifiers, per-object point buffers, homogeneous
//! transforms, and the traits through which the host scene is reached.

pub mod point;
pub mod point_buffer;
pub mod marker;
pub mod traits;
pub mod transform;
pub mod error;

pub use point::*;
pub use point_buffer::*;
pub use marker::*;
pub use traits::*;
pub use transform::*;
pub use error::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Matrix3, Matrix4, Point3, Vector3};
