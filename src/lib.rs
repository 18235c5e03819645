//! Tile spatial and state engine for a double-sided tile board.
//!
//! Tiles carry an independent front and back image and are placed freely on
//! a canvas, rotated, mirrored, and shown front- or back-up through a single
//! board-wide flip. The crate owns the tile data, maps pointer input into
//! canvas space, composes each tile's render transform, and pairs bulk-imported
//! image files into tiles. Drawing is left to the host renderer, which reads
//! [`editor::TileView`]s and the static [`consts::TILE_OUTLINE_PATH`].
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`editor`] | Top-level [`editor::EditorCore`] wiring commands and pointer input |
//! | [`tile`] | Tile types and the in-memory [`tile::TileStore`] |
//! | [`geom`] | Points, affine matrices, and the pointer-space mapper |
//! | [`drag`] | Single-tile drag state machine |
//! | [`transform`] | Per-tile transform composition |
//! | [`import`] | Bulk import pairing by file name |
//! | [`decode`] | Async image decoding into displayable handles |
//! | [`config`] | Environment-driven board configuration |
//! | [`consts`] | Shared constants and the tile outline asset |

pub mod config;
pub mod consts;
pub mod decode;
pub mod drag;
pub mod editor;
pub mod geom;
pub mod import;
pub mod tile;
pub mod transform;
