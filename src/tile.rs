//! Tile model and the in-memory tile store.
//!
//! This module defines what is on the board (`Tile`, `Face`, `ImageHandle`),
//! a sparse-update type for incremental edits (`TilePatch`), and the store
//! that owns every live tile together with the board-wide flip flag
//! (`TileStore`).
//!
//! The store is the only mutation surface for tile data. Drag and import
//! logic live elsewhere and reach the store through `update_tile` and
//! `commit_batch`. The renderer reads from it via `list_tiles`, which yields a
//! stable draw order.

#[cfg(test)]
#[path = "tile_test.rs"]
mod tile_test;

use std::collections::HashMap;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::geom::Point;

/// Unique identifier for a tile.
pub type TileId = Uuid;

/// Opaque, displayable image source produced by an [`crate::decode::ImageDecoder`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageHandle(String);

impl ImageHandle {
    #[must_use]
    pub fn new(source: impl Into<String>) -> Self {
        Self(source.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// One side of a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Face {
    Front,
    Back,
}

impl Face {
    /// The face shown and targeted on every tile for the given flip state.
    #[must_use]
    pub fn active(is_flipped: bool) -> Self {
        if is_flipped { Self::Back } else { Self::Front }
    }
}

/// A double-sided tile placed on the board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    /// Unique identifier, stable for the tile's lifetime.
    pub id: TileId,
    /// Front face image, if assigned.
    pub front: Option<ImageHandle>,
    /// Back face image, if assigned.
    pub back: Option<ImageHandle>,
    /// Left edge of the tile's reference box in canvas coordinates.
    pub x: f64,
    /// Top edge of the tile's reference box in canvas coordinates.
    pub y: f64,
    /// Clockwise rotation in degrees around the tile's visual center. Never normalized.
    pub rotation: f64,
    /// Horizontal reflection of this tile alone.
    pub is_mirrored: bool,
}

impl Tile {
    /// A blank tile at `(x, y)` with a fresh id.
    #[must_use]
    pub fn blank(x: f64, y: f64) -> Self {
        Self { id: Uuid::new_v4(), front: None, back: None, x, y, rotation: 0.0, is_mirrored: false }
    }

    /// A blank tile at a uniformly random position inside `area`.
    #[must_use]
    pub fn spawn<R: Rng + ?Sized>(area: SpawnArea, rng: &mut R) -> Self {
        let x = sample_extent(rng, area.width);
        let y = sample_extent(rng, area.height);
        Self::blank(x, y)
    }

    #[must_use]
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Image on the given face, if any.
    #[must_use]
    pub fn face(&self, face: Face) -> Option<&ImageHandle> {
        match face {
            Face::Front => self.front.as_ref(),
            Face::Back => self.back.as_ref(),
        }
    }

    /// Image on the face currently shown for `is_flipped`.
    #[must_use]
    pub fn active_image(&self, is_flipped: bool) -> Option<&ImageHandle> {
        self.face(Face::active(is_flipped))
    }

    pub fn set_face(&mut self, face: Face, image: ImageHandle) {
        match face {
            Face::Front => self.front = Some(image),
            Face::Back => self.back = Some(image),
        }
    }
}

/// Region new tiles are randomly placed in, anchored at the canvas origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnArea {
    pub width: f64,
    pub height: f64,
}

impl Default for SpawnArea {
    fn default() -> Self {
        Self {
            width: crate::consts::DEFAULT_SPAWN_WIDTH,
            height: crate::consts::DEFAULT_SPAWN_HEIGHT,
        }
    }
}

fn sample_extent<R: Rng + ?Sized>(rng: &mut R, extent: f64) -> f64 {
    if extent.is_finite() && extent > 0.0 { rng.random_range(0.0..extent) } else { 0.0 }
}

/// Sparse update for a tile. Only present fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TilePatch {
    /// New x position, if being updated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    /// New y position, if being updated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    /// Degrees added to the current rotation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotate_by: Option<f64>,
    /// Flip `is_mirrored` when true.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub toggle_mirror: bool,
    /// New front image, if being assigned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub front: Option<ImageHandle>,
    /// New back image, if being assigned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub back: Option<ImageHandle>,
}

impl TilePatch {
    #[must_use]
    pub fn move_to(p: Point) -> Self {
        Self { x: Some(p.x), y: Some(p.y), ..Self::default() }
    }

    #[must_use]
    pub fn rotate_by(degrees: f64) -> Self {
        Self { rotate_by: Some(degrees), ..Self::default() }
    }

    #[must_use]
    pub fn toggle_mirror() -> Self {
        Self { toggle_mirror: true, ..Self::default() }
    }

    #[must_use]
    pub fn image(face: Face, image: ImageHandle) -> Self {
        match face {
            Face::Front => Self { front: Some(image), ..Self::default() },
            Face::Back => Self { back: Some(image), ..Self::default() },
        }
    }
}

#[derive(Debug, Clone)]
struct Slot {
    seq: u64,
    tile: Tile,
}

/// In-memory store of tiles plus the board-wide flip flag.
#[derive(Debug, Clone, Default)]
pub struct TileStore {
    tiles: HashMap<TileId, Slot>,
    next_seq: u64,
    is_flipped: bool,
    spawn: SpawnArea,
}

impl TileStore {
    /// Create an empty store placing new tiles in the default spawn area.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store placing new tiles in `spawn`.
    #[must_use]
    pub fn with_spawn_area(spawn: SpawnArea) -> Self {
        Self { spawn, ..Self::default() }
    }

    #[must_use]
    pub fn spawn_area(&self) -> SpawnArea {
        self.spawn
    }

    /// Allocate a blank tile at a random position and add it to the store.
    pub fn create_tile<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Tile {
        let tile = Tile::spawn(self.spawn, rng);
        debug!(id = %tile.id, x = tile.x, y = tile.y, "tile created");
        self.insert(tile.clone());
        tile
    }

    /// Apply a partial update. Returns false, leaving every tile untouched,
    /// if no tile has this id.
    pub fn update_tile(&mut self, id: &TileId, patch: &TilePatch) -> bool {
        let Some(slot) = self.tiles.get_mut(id) else {
            debug!(%id, "update for unknown tile ignored");
            return false;
        };
        let tile = &mut slot.tile;
        if let Some(x) = patch.x {
            tile.x = x;
        }
        if let Some(y) = patch.y {
            tile.y = y;
        }
        if let Some(delta) = patch.rotate_by {
            tile.rotation += delta;
        }
        if patch.toggle_mirror {
            tile.is_mirrored = !tile.is_mirrored;
        }
        if let Some(ref front) = patch.front {
            tile.front = Some(front.clone());
        }
        if let Some(ref back) = patch.back {
            tile.back = Some(back.clone());
        }
        true
    }

    /// Append a batch of fully built tiles in one step. Returns how many were added.
    pub fn commit_batch(&mut self, tiles: Vec<Tile>) -> usize {
        let count = tiles.len();
        for tile in tiles {
            self.insert(tile);
        }
        count
    }

    /// Remove a tile by id, returning it if it was present.
    pub fn remove_tile(&mut self, id: &TileId) -> Option<Tile> {
        self.tiles.remove(id).map(|slot| slot.tile)
    }

    /// Replace the board-wide flip flag.
    pub fn set_global_flip(&mut self, value: bool) {
        self.is_flipped = value;
    }

    #[must_use]
    pub fn is_flipped(&self) -> bool {
        self.is_flipped
    }

    /// The face every tile currently shows.
    #[must_use]
    pub fn active_face(&self) -> Face {
        Face::active(self.is_flipped)
    }

    #[must_use]
    pub fn get(&self, id: &TileId) -> Option<&Tile> {
        self.tiles.get(id).map(|slot| &slot.tile)
    }

    /// All tiles in draw order: creation sequence, then id.
    #[must_use]
    pub fn list_tiles(&self) -> Vec<&Tile> {
        let mut slots: Vec<&Slot> = self.tiles.values().collect();
        slots.sort_by(|a, b| a.seq.cmp(&b.seq).then_with(|| a.tile.id.cmp(&b.tile.id)));
        slots.into_iter().map(|slot| &slot.tile).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    fn insert(&mut self, tile: Tile) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.tiles.insert(tile.id, Slot { seq, tile });
    }
}
