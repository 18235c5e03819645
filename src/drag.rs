//! Drag controller: the single-tile pick-up / move / release state machine.
//!
//! The controller holds only the transient gesture (which tile, and where on
//! it the pointer grabbed). It never owns tile data; every position change is
//! sent to the [`TileStore`] as a [`TilePatch`]. Pointer positions arrive in
//! screen space together with the surface's current screen CTM and are mapped
//! into canvas space with [`map_pointer`], so the grab offset survives any
//! scaling of the rendering surface.

#[cfg(test)]
#[path = "drag_test.rs"]
mod drag_test;

use tracing::debug;

use crate::geom::{Matrix, Point, map_pointer};
use crate::tile::{TileId, TilePatch, TileStore};

/// Internal state for the drag state machine.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    /// No gesture in progress; waiting for the next pick-up.
    #[default]
    Idle,
    /// A tile is following the pointer.
    Dragging {
        /// Id of the tile being dragged.
        tile_id: TileId,
        /// Canvas-space vector from the tile's anchor to the grab point.
        offset: Point,
    },
}

/// Why a drag event produced no change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    /// The event changed controller or tile state.
    Applied,
    /// Another tile is already being dragged.
    Busy,
    /// No drag is in progress.
    NotDragging,
    /// The tile is not in the store.
    UnknownTile,
    /// The pointer could not be mapped into canvas space; the event was dropped.
    Unmapped,
}

impl DragOutcome {
    #[must_use]
    pub fn is_applied(self) -> bool {
        self == Self::Applied
    }
}

/// Single-tile drag controller.
#[derive(Debug, Clone, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> DragState {
        self.state
    }

    /// Id of the tile currently being dragged, if any.
    #[must_use]
    pub fn dragged_tile(&self) -> Option<TileId> {
        match self.state {
            DragState::Idle => None,
            DragState::Dragging { tile_id, .. } => Some(tile_id),
        }
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.dragged_tile().is_some()
    }

    /// Start dragging `tile_id`, grabbed at `screen`.
    ///
    /// Ignored while another drag is active.
    pub fn pick_up(&mut self, store: &TileStore, tile_id: TileId, screen: Point, ctm: Option<&Matrix>) -> DragOutcome {
        if self.is_dragging() {
            return DragOutcome::Busy;
        }
        let Some(tile) = store.get(&tile_id) else {
            return DragOutcome::UnknownTile;
        };
        let pointer = match map_pointer(screen, ctm) {
            Ok(p) => p,
            Err(e) => {
                debug!(error = %e, %tile_id, "pick-up dropped");
                return DragOutcome::Unmapped;
            }
        };
        let offset = pointer - tile.position();
        self.state = DragState::Dragging { tile_id, offset };
        debug!(%tile_id, offset_x = offset.x, offset_y = offset.y, "drag started");
        DragOutcome::Applied
    }

    /// Move the dragged tile so the grab point stays under the pointer.
    ///
    /// If the tile has disappeared from the store the drag ends.
    pub fn move_to(&mut self, store: &mut TileStore, screen: Point, ctm: Option<&Matrix>) -> DragOutcome {
        let DragState::Dragging { tile_id, offset } = self.state else {
            return DragOutcome::NotDragging;
        };
        let pointer = match map_pointer(screen, ctm) {
            Ok(p) => p,
            Err(e) => {
                debug!(error = %e, %tile_id, "drag move dropped");
                return DragOutcome::Unmapped;
            }
        };
        if store.update_tile(&tile_id, &TilePatch::move_to(pointer - offset)) {
            DragOutcome::Applied
        } else {
            self.state = DragState::Idle;
            DragOutcome::UnknownTile
        }
    }

    /// Pointer released: end the drag where the tile is.
    pub fn release(&mut self) -> DragOutcome {
        self.end("released")
    }

    /// Pointer left the surface: end the drag where the tile is.
    pub fn pointer_leave(&mut self) -> DragOutcome {
        self.end("pointer left surface")
    }

    fn end(&mut self, reason: &'static str) -> DragOutcome {
        match std::mem::take(&mut self.state) {
            DragState::Idle => DragOutcome::NotDragging,
            DragState::Dragging { tile_id, .. } => {
                debug!(%tile_id, reason, "drag ended");
                DragOutcome::Applied
            }
        }
    }
}
