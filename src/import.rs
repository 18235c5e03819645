//! Bulk import — pair `<stem>_obverse.png` / `<stem>_reverse.png` files into tiles.
//!
//! DESIGN
//! ======
//! Import runs in three steps so the store is never borrowed across an await:
//!
//! 1. [`plan_import`] parses names, groups them by stem and allocates one blank
//!    tile per stem (synchronous, uses the caller's RNG for placement).
//! 2. [`ImportPlan::decode`] decodes every face. Within a pair the front is
//!    decoded before the back; different pairs run concurrently and are joined.
//! 3. The caller appends [`ImportBatch::tiles`] to the store in one
//!    [`crate::tile::TileStore::commit_batch`] call, so a half-finished import
//!    is never visible.
//!
//! Names that do not follow the convention are not errors; they are reported
//! as skipped. When two files share a stem and side, the later one in input
//! order wins.
//!
//! ERROR HANDLING
//! ==============
//! A face that fails to decode is left empty and logged; the tile is still
//! created and the rest of the batch is unaffected.

#[cfg(test)]
#[path = "import_test.rs"]
mod import_test;

use std::collections::HashMap;

use futures::future::join_all;
use rand::Rng;
use tracing::{info, warn};

use crate::decode::{FileEntry, ImageDecoder};
use crate::tile::{Face, SpawnArea, Tile};

const OBVERSE_SUFFIX: &str = "_obverse.png";
const REVERSE_SUFFIX: &str = "_reverse.png";

/// A file name that follows the pairing convention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairedName<'a> {
    /// Shared prefix identifying the pair.
    pub stem: &'a str,
    /// Which face the file belongs to.
    pub face: Face,
}

/// Parse `<stem>_obverse.png` or `<stem>_reverse.png`, ignoring ASCII case in the suffix.
///
/// Returns `None` for any other name, including an empty stem.
#[must_use]
pub fn parse_file_name(name: &str) -> Option<PairedName<'_>> {
    for (suffix, face) in [(OBVERSE_SUFFIX, Face::Front), (REVERSE_SUFFIX, Face::Back)] {
        let Some(split) = name.len().checked_sub(suffix.len()) else {
            continue;
        };
        if split == 0 || !name.is_char_boundary(split) {
            continue;
        }
        let (stem, tail) = name.split_at(split);
        if tail.eq_ignore_ascii_case(suffix) {
            return Some(PairedName { stem, face });
        }
    }
    None
}

/// Files grouped under one stem. At least one side is present once grouping is done.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairGroup {
    pub stem: String,
    pub front: Option<FileEntry>,
    pub back: Option<FileEntry>,
}

impl PairGroup {
    fn new(stem: &str) -> Self {
        Self { stem: stem.to_string(), front: None, back: None }
    }

    fn set(&mut self, face: Face, file: FileEntry) {
        match face {
            Face::Front => self.front = Some(file),
            Face::Back => self.back = Some(file),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.front.is_none() && self.back.is_none()
    }
}

/// Group files by stem, in order of each stem's first appearance.
///
/// Returns the groups and the names that did not match the convention.
#[must_use]
pub fn group_pairs(files: Vec<FileEntry>) -> (Vec<PairGroup>, Vec<String>) {
    let mut groups: Vec<PairGroup> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut skipped = Vec::new();

    for file in files {
        let Some(parsed) = parse_file_name(&file.name) else {
            skipped.push(file.name.clone());
            continue;
        };
        let slot = match index.get(parsed.stem) {
            Some(&i) => i,
            None => {
                index.insert(parsed.stem.to_string(), groups.len());
                groups.push(PairGroup::new(parsed.stem));
                groups.len() - 1
            }
        };
        let face = parsed.face;
        groups[slot].set(face, file);
    }

    groups.retain(|g| !g.is_empty());
    (groups, skipped)
}

/// Pairs waiting to be decoded, each with the blank tile it will fill.
#[derive(Debug, Clone)]
pub struct ImportPlan {
    pending: Vec<(PairGroup, Tile)>,
    skipped: Vec<String>,
}

/// Parse and group `files`, allocating a randomly placed blank tile per stem.
#[must_use]
pub fn plan_import<R: Rng + ?Sized>(files: Vec<FileEntry>, spawn: SpawnArea, rng: &mut R) -> ImportPlan {
    let (groups, skipped) = group_pairs(files);
    let pending = groups
        .into_iter()
        .map(|group| {
            let tile = Tile::spawn(spawn, rng);
            (group, tile)
        })
        .collect();
    ImportPlan { pending, skipped }
}

impl ImportPlan {
    /// Number of tiles this plan will produce.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Names dropped because they do not follow the pairing convention.
    #[must_use]
    pub fn skipped(&self) -> &[String] {
        &self.skipped
    }

    /// Decode every pair and return the finished tiles. Completes only once
    /// every pair has finished.
    pub async fn decode(self, decoder: &dyn ImageDecoder) -> ImportBatch {
        let results = join_all(
            self.pending
                .into_iter()
                .map(|(group, tile)| decode_pair(group, tile, decoder)),
        )
        .await;

        let mut report = ImportReport { skipped_files: self.skipped.len(), ..ImportReport::default() };
        let mut tiles = Vec::with_capacity(results.len());
        for (tile, loaded, failed) in results {
            report.faces_loaded += loaded;
            report.faces_failed += failed;
            tiles.push(tile);
        }
        report.tiles = tiles.len();

        info!(
            tiles = report.tiles,
            faces_loaded = report.faces_loaded,
            faces_failed = report.faces_failed,
            skipped_files = report.skipped_files,
            "bulk import decoded"
        );
        ImportBatch { tiles, report }
    }
}

async fn decode_pair(group: PairGroup, mut tile: Tile, decoder: &dyn ImageDecoder) -> (Tile, usize, usize) {
    let (mut loaded, mut failed) = (0, 0);
    let PairGroup { stem, front, back } = group;
    for (face, file) in [(Face::Front, front), (Face::Back, back)] {
        let Some(file) = file else {
            continue;
        };
        match decoder.decode(&file).await {
            Ok(image) => {
                tile.set_face(face, image);
                loaded += 1;
            }
            Err(e) => {
                warn!(error = %e, %stem, file = %file.name, ?face, "face decode failed; leaving it empty");
                failed += 1;
            }
        }
    }
    (tile, loaded, failed)
}

/// Counts describing one finished import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportReport {
    /// Tiles produced.
    pub tiles: usize,
    /// Faces that decoded successfully.
    pub faces_loaded: usize,
    /// Faces left empty because decoding failed.
    pub faces_failed: usize,
    /// Files ignored because their names did not match the convention.
    pub skipped_files: usize,
}

/// Decoded tiles ready to be committed to the store in one step.
#[derive(Debug, Clone)]
pub struct ImportBatch {
    pub tiles: Vec<Tile>,
    pub report: ImportReport,
}
