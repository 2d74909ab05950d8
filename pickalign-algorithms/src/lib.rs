//! # Pickalign Algorithms
//!
//! Geometry behind point-pick alignment.
//!
//! This crate turns picked landmark points into orthonormal frames and
//! solves the rigid transform that aligns one object's frame with another's,
//! composed on top of whatever transform the object already carries.

pub mod basis;
pub mod solver;

// Re-export commonly used items
pub use basis::*;
pub use solver::*;
