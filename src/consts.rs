//! Shared numeric constants and the static tile outline asset.

// ── Tile geometry ───────────────────────────────────────────────

/// Outline of a tile in its own coordinate space. Drawn by the host renderer;
/// the engine only needs its visual center.
pub const TILE_OUTLINE_PATH: &str = "M93.075588,186.263531L94.568682,74.654722l63.456514-.373275L190.5,19.036953L286.058044,73.5349l-.373274,110.488989l63.829788.746547L381,240.761477l-95.688503,54.497947L190.5,240.761476l-31.728257,54.124673-129.152669-.000001L0,240.761476l93.075588-54.497945Z";

/// Visual center of [`TILE_OUTLINE_PATH`], x component. Rotation and mirroring pivot here.
pub const TILE_CENTER_X: f64 = 190.5;

/// Visual center of [`TILE_OUTLINE_PATH`], y component.
pub const TILE_CENTER_Y: f64 = 147.5;

// ── Editing ─────────────────────────────────────────────────────

/// Degrees added or subtracted by one rotate action.
pub const ROTATE_STEP_DEG: f64 = 15.0;

// ── Placement ───────────────────────────────────────────────────

/// Width of the region new tiles are randomly placed in, in canvas units.
pub const DEFAULT_SPAWN_WIDTH: f64 = 800.0;

/// Height of the region new tiles are randomly placed in, in canvas units.
pub const DEFAULT_SPAWN_HEIGHT: f64 = 600.0;

// ── Numerics ────────────────────────────────────────────────────

/// Determinants smaller than this are treated as singular when inverting a matrix.
pub const MATRIX_EPSILON: f64 = 1e-12;
