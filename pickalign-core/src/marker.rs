//! Marker types handed to the visualization layer

use crate::point::Point3d;
use serde::{Deserialize, Serialize};

/// Appearance of one numbered marker slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerStyle {
    /// Label drawn on the sprite ("1", "2", ...)
    pub label: String,
    /// RGB colour of the sprite
    pub color: [u8; 3],
    /// Sprite edge length in pixels
    pub sprite_size: u32,
}

/// A labelled marker at an accepted pick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    /// Host-side identifier of the sprite
    pub id: u32,
    /// Zero-based position of the pick within the session
    pub sequence_index: usize,
    pub position: Point3d,
    pub style: MarkerStyle,
}
