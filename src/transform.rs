//! Per-tile transform composition.
//!
//! A tile is drawn in its own outline space and placed on the board by
//!
//! ```text
//! translate(x + cx, y + cy) · rotate(rotation) · scale(sx, 1) · translate(-cx, -cy)
//! ```
//!
//! where `(cx, cy)` is the outline's visual center and
//! `sx = (mirrored ? -1 : 1) * (flipped ? -1 : 1)`. The center offsets bracket
//! the rotate and scale steps so both pivot around the middle of the tile
//! rather than its anchor corner. Mirror and global flip are both horizontal
//! reflections and so cancel when applied together.
//!
//! Everything here is a pure function of tile attributes and the flip flag,
//! which is passed in explicitly.

#[cfg(test)]
#[path = "transform_test.rs"]
mod transform_test;

use crate::consts::{TILE_CENTER_X, TILE_CENTER_Y};
use crate::geom::{Matrix, Point};
use crate::tile::Tile;

/// Horizontal scale factor for a tile's shape and its fill pattern.
#[must_use]
pub fn scale_x(is_mirrored: bool, is_flipped: bool) -> f64 {
    let mirror = if is_mirrored { -1.0 } else { 1.0 };
    let flip = if is_flipped { -1.0 } else { 1.0 };
    mirror * flip
}

/// The decomposed placement of one tile, in application order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileTransform {
    /// Canvas position of the tile's visual center.
    pub center: Point,
    /// Rotation in degrees, as stored on the tile.
    pub rotation: f64,
    /// Horizontal scale, `1.0` or `-1.0`. Vertical scale is always `1.0`.
    pub scale_x: f64,
    /// Pivot inside the tile's own outline space.
    pub pivot: Point,
}

impl TileTransform {
    /// Compose the transform for `tile` around the default outline center.
    #[must_use]
    pub fn compose(tile: &Tile, is_flipped: bool) -> Self {
        Self::compose_with_pivot(tile, is_flipped, Point::new(TILE_CENTER_X, TILE_CENTER_Y))
    }

    /// Compose the transform for `tile` around an arbitrary pivot.
    #[must_use]
    pub fn compose_with_pivot(tile: &Tile, is_flipped: bool, pivot: Point) -> Self {
        Self {
            center: Point::new(tile.x + pivot.x, tile.y + pivot.y),
            rotation: tile.rotation,
            scale_x: scale_x(tile.is_mirrored, is_flipped),
            pivot,
        }
    }

    /// The composed tile-to-canvas matrix.
    #[must_use]
    pub fn matrix(&self) -> Matrix {
        Matrix::translate(self.center.x, self.center.y)
            .multiply(&Matrix::rotate(self.rotation))
            .multiply(&Matrix::scale(self.scale_x, 1.0))
            .multiply(&Matrix::translate(-self.pivot.x, -self.pivot.y))
    }

    /// The transform as an SVG `transform` attribute value.
    #[must_use]
    pub fn to_svg(&self) -> String {
        format!(
            "translate({}, {}) rotate({}) scale({}, 1) translate({}, {})",
            self.center.x, self.center.y, self.rotation, self.scale_x, -self.pivot.x, -self.pivot.y
        )
    }

    /// Canvas position of a point given in the tile's outline space.
    #[must_use]
    pub fn apply(&self, local: Point) -> Point {
        self.matrix().apply(local)
    }
}
