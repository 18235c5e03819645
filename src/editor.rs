use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::BoardConfig;
use crate::consts::ROTATE_STEP_DEG;
use crate::decode::{FileEntry, ImageDecoder};
use crate::drag::{DragController, DragOutcome};
use crate::geom::{Matrix, Point};
use crate::import::{ImportBatch, ImportPlan, plan_import};
use crate::tile::{Face, ImageHandle, Tile, TileId, TilePatch, TileStore};
use crate::transform::TileTransform;

#[cfg(test)]
#[path = "editor_test.rs"]
mod editor_test;

/// Actions returned from editor operations for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    None,
    TileCreated(Tile),
    TileUpdated { id: TileId, fields: TilePatch },
    TilesImported { count: usize },
    FlipChanged(bool),
    RenderNeeded,
}

/// Direction of a single rotate step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    Clockwise,
    CounterClockwise,
}

impl Rotation {
    #[must_use]
    pub fn sign(self) -> f64 {
        match self {
            Self::Clockwise => 1.0,
            Self::CounterClockwise => -1.0,
        }
    }
}

/// An image selected for one face of one tile, waiting to be decoded.
///
/// The face is fixed when the selection starts, so flipping the board while
/// the file decodes does not redirect the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingImage {
    pub tile_id: TileId,
    pub face: Face,
}

impl PendingImage {
    /// Decode `file`. A failure is logged and yields no image.
    pub async fn decode(self, decoder: &dyn ImageDecoder, file: &FileEntry) -> DecodedImage {
        let image = match decoder.decode(file).await {
            Ok(image) => Some(image),
            Err(e) => {
                warn!(error = %e, tile_id = %self.tile_id, file = %file.name, "image decode failed");
                None
            }
        };
        DecodedImage { pending: self, image }
    }
}

/// Result of [`PendingImage::decode`].
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedImage {
    pub pending: PendingImage,
    pub image: Option<ImageHandle>,
}

/// What the renderer needs to draw one tile.
#[derive(Debug, Clone, PartialEq)]
pub struct TileView<'a> {
    pub id: TileId,
    pub transform: TileTransform,
    /// Image on the active face; `None` means draw the placeholder.
    pub image: Option<&'a ImageHandle>,
    /// Horizontal scale to apply to the fill pattern.
    pub fill_scale_x: f64,
}

/// Serializable view of the whole board.
#[derive(Debug, Serialize)]
pub struct BoardSnapshot<'a> {
    pub is_flipped: bool,
    pub tiles: Vec<&'a Tile>,
}

/// Editor state: the tile store, the drag gesture, and placement randomness.
///
/// Operations never block on decoding. Image assignment and bulk import are
/// split into a synchronous start, an async decode that does not borrow the
/// editor, and a synchronous commit.
pub struct EditorCore {
    pub store: TileStore,
    pub drag: DragController,
    config: BoardConfig,
    rng: StdRng,
}

impl Default for EditorCore {
    fn default() -> Self {
        Self::new(BoardConfig::default())
    }
}

impl EditorCore {
    #[must_use]
    pub fn new(config: BoardConfig) -> Self {
        Self::with_rng(config, StdRng::from_os_rng())
    }

    /// Editor with a caller-supplied RNG, for reproducible placement.
    #[must_use]
    pub fn with_rng(config: BoardConfig, rng: StdRng) -> Self {
        Self { store: TileStore::with_spawn_area(config.spawn), drag: DragController::new(), config, rng }
    }

    #[must_use]
    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    // --- Tile commands ---

    /// Add a blank tile at a random position.
    pub fn add_tile(&mut self) -> Action {
        Action::TileCreated(self.store.create_tile(&mut self.rng))
    }

    /// Rotate a tile by one step.
    pub fn rotate_tile(&mut self, id: &TileId, direction: Rotation) -> Action {
        let fields = TilePatch::rotate_by(direction.sign() * ROTATE_STEP_DEG);
        self.update(id, fields)
    }

    /// Toggle a tile's mirror flag.
    pub fn mirror_tile(&mut self, id: &TileId) -> Action {
        self.update(id, TilePatch::toggle_mirror())
    }

    /// Swap the active face of every tile.
    pub fn toggle_flip(&mut self) -> Action {
        let flipped = !self.store.is_flipped();
        self.store.set_global_flip(flipped);
        debug!(flipped, "global flip toggled");
        Action::FlipChanged(flipped)
    }

    // --- Image assignment ---

    /// Start assigning an image to the active face of `id`.
    #[must_use]
    pub fn begin_image(&self, id: &TileId) -> Option<PendingImage> {
        self.store
            .get(id)
            .map(|tile| PendingImage { tile_id: tile.id, face: self.store.active_face() })
    }

    /// Apply a decoded image. A failed decode or a removed tile changes nothing.
    pub fn finish_image(&mut self, decoded: DecodedImage) -> Action {
        let Some(image) = decoded.image else {
            return Action::None;
        };
        let PendingImage { tile_id, face } = decoded.pending;
        self.update(&tile_id, TilePatch::image(face, image))
    }

    // --- Bulk import ---

    /// Group `files` into pairs and allocate their tiles. Nothing is visible
    /// until [`EditorCore::commit_import`].
    pub fn plan_import(&mut self, files: Vec<FileEntry>) -> ImportPlan {
        plan_import(files, self.store.spawn_area(), &mut self.rng)
    }

    /// Append every tile of a decoded import in one step.
    pub fn commit_import(&mut self, batch: ImportBatch) -> Action {
        let count = self.store.commit_batch(batch.tiles);
        info!(count, total = self.store.len(), "bulk import committed");
        if count == 0 { Action::None } else { Action::TilesImported { count } }
    }

    // --- Pointer input ---

    /// Pointer pressed on a tile.
    pub fn on_pointer_down(&mut self, id: TileId, screen: Point, ctm: Option<&Matrix>) -> Action {
        match self.drag.pick_up(&self.store, id, screen, ctm) {
            DragOutcome::Applied => Action::RenderNeeded,
            _ => Action::None,
        }
    }

    /// Pointer moved anywhere over the surface.
    pub fn on_pointer_move(&mut self, screen: Point, ctm: Option<&Matrix>) -> Action {
        let Some(id) = self.drag.dragged_tile() else {
            return Action::None;
        };
        if !self.drag.move_to(&mut self.store, screen, ctm).is_applied() {
            return Action::None;
        }
        match self.store.get(&id) {
            Some(tile) => Action::TileUpdated { id, fields: TilePatch::move_to(tile.position()) },
            None => Action::None,
        }
    }

    /// Pointer released.
    pub fn on_pointer_up(&mut self) -> Action {
        self.drag.release();
        Action::None
    }

    /// Pointer left the surface.
    pub fn on_pointer_leave(&mut self) -> Action {
        self.drag.pointer_leave();
        Action::None
    }

    // --- Queries ---

    /// Render views for every tile, in draw order.
    #[must_use]
    pub fn views(&self) -> Vec<TileView<'_>> {
        let flipped = self.store.is_flipped();
        self.store
            .list_tiles()
            .into_iter()
            .map(|tile| {
                let transform = TileTransform::compose(tile, flipped);
                TileView { id: tile.id, transform, image: tile.active_image(flipped), fill_scale_x: transform.scale_x }
            })
            .collect()
    }

    #[must_use]
    pub fn snapshot(&self) -> BoardSnapshot<'_> {
        BoardSnapshot { is_flipped: self.store.is_flipped(), tiles: self.store.list_tiles() }
    }

    #[must_use]
    pub fn tile(&self, id: &TileId) -> Option<&Tile> {
        self.store.get(id)
    }

    fn update(&mut self, id: &TileId, fields: TilePatch) -> Action {
        if self.store.update_tile(id, &fields) {
            Action::TileUpdated { id: *id, fields }
        } else {
            Action::None
        }
    }
}
