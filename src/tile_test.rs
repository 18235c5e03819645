#![allow(clippy::float_cmp)]

use rand::SeedableRng;
use rand::rngs::StdRng;

use super::*;

fn rng() -> StdRng {
    StdRng::seed_from_u64(7)
}

fn store_with(n: usize) -> (TileStore, Vec<TileId>) {
    let mut store = TileStore::new();
    let mut rng = rng();
    let ids = (0..n).map(|_| store.create_tile(&mut rng).id).collect();
    (store, ids)
}

fn img(s: &str) -> ImageHandle {
    ImageHandle::new(s)
}

fn serialized(store: &TileStore) -> String {
    serde_json::to_string(&store.list_tiles()).unwrap()
}

// =============================================================
// Face
// =============================================================

#[test]
fn active_face_follows_flip() {
    assert_eq!(Face::active(false), Face::Front);
    assert_eq!(Face::active(true), Face::Back);
}

#[test]
fn face_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&Face::Back).unwrap(), "\"back\"");
}

// =============================================================
// Tile
// =============================================================

#[test]
fn blank_tile_defaults() {
    let tile = Tile::blank(3.0, 4.0);
    assert_eq!(tile.position(), Point::new(3.0, 4.0));
    assert_eq!(tile.rotation, 0.0);
    assert!(!tile.is_mirrored);
    assert!(tile.front.is_none());
    assert!(tile.back.is_none());
}

#[test]
fn spawn_stays_inside_area() {
    let mut rng = rng();
    let area = SpawnArea { width: 50.0, height: 20.0 };
    for _ in 0..200 {
        let tile = Tile::spawn(area, &mut rng);
        assert!((0.0..50.0).contains(&tile.x));
        assert!((0.0..20.0).contains(&tile.y));
    }
}

#[test]
fn spawn_with_empty_area_places_at_origin() {
    let tile = Tile::spawn(SpawnArea { width: 0.0, height: -5.0 }, &mut rng());
    assert_eq!(tile.position(), Point::new(0.0, 0.0));
}

#[test]
fn active_image_picks_face() {
    let mut tile = Tile::blank(0.0, 0.0);
    tile.set_face(Face::Front, img("f"));
    assert_eq!(tile.active_image(false), Some(&img("f")));
    assert_eq!(tile.active_image(true), None);
    tile.set_face(Face::Back, img("b"));
    assert_eq!(tile.active_image(true), Some(&img("b")));
}

#[test]
fn image_handle_serializes_as_plain_string() {
    assert_eq!(serde_json::to_string(&img("data:x")).unwrap(), "\"data:x\"");
}

// =============================================================
// TilePatch
// =============================================================

#[test]
fn patch_serializes_only_present_fields() {
    let json = serde_json::to_value(TilePatch::rotate_by(15.0)).unwrap();
    assert_eq!(json, serde_json::json!({ "rotate_by": 15.0 }));
    let json = serde_json::to_value(TilePatch::toggle_mirror()).unwrap();
    assert_eq!(json, serde_json::json!({ "toggle_mirror": true }));
}

#[test]
fn patch_image_targets_one_face() {
    let p = TilePatch::image(Face::Back, img("b"));
    assert!(p.front.is_none());
    assert_eq!(p.back, Some(img("b")));
}

// =============================================================
// TileStore: create
// =============================================================

#[test]
fn new_store_is_empty_and_unflipped() {
    let store = TileStore::new();
    assert!(store.is_empty());
    assert!(!store.is_flipped());
    assert_eq!(store.active_face(), Face::Front);
}

#[test]
fn create_tile_inserts_blank_tile() {
    let mut store = TileStore::new();
    let tile = store.create_tile(&mut rng());
    assert_eq!(store.len(), 1);
    assert_eq!(store.get(&tile.id), Some(&tile));
    assert_eq!(tile.rotation, 0.0);
    assert!(!tile.is_mirrored);
    assert!((0.0..800.0).contains(&tile.x));
    assert!((0.0..600.0).contains(&tile.y));
}

#[test]
fn create_tile_ids_are_unique() {
    let (store, ids) = store_with(50);
    let unique: std::collections::HashSet<_> = ids.iter().collect();
    assert_eq!(unique.len(), 50);
    assert_eq!(store.len(), 50);
}

#[test]
fn create_tile_respects_spawn_area() {
    let mut store = TileStore::with_spawn_area(SpawnArea { width: 10.0, height: 10.0 });
    let mut rng = rng();
    for _ in 0..50 {
        let tile = store.create_tile(&mut rng);
        assert!(tile.x < 10.0 && tile.y < 10.0);
    }
}

#[test]
fn create_tile_with_degenerate_spawn_area_places_at_origin() {
    let mut rng = rng();
    for (width, height) in [(f64::INFINITY, 600.0), (800.0, f64::NAN), (0.0, -5.0), (f64::NEG_INFINITY, 0.0)] {
        let mut store = TileStore::with_spawn_area(SpawnArea { width, height });
        let tile = store.create_tile(&mut rng);
        assert!(tile.x.is_finite() && tile.y.is_finite());
        if !(width.is_finite() && width > 0.0) {
            assert_eq!(tile.x, 0.0);
        }
        if !(height.is_finite() && height > 0.0) {
            assert_eq!(tile.y, 0.0);
        }
    }
}

// =============================================================
// TileStore: update
// =============================================================

#[test]
fn update_moves_only_target_tile() {
    let (mut store, ids) = store_with(2);
    let other_before = store.get(&ids[1]).cloned();
    assert!(store.update_tile(&ids[0], &TilePatch::move_to(Point::new(5.0, 6.0))));
    assert_eq!(store.get(&ids[0]).unwrap().position(), Point::new(5.0, 6.0));
    assert_eq!(store.get(&ids[1]).cloned(), other_before);
}

#[test]
fn update_partial_position() {
    let (mut store, ids) = store_with(1);
    let y = store.get(&ids[0]).unwrap().y;
    let patch = TilePatch { x: Some(1.0), ..TilePatch::default() };
    store.update_tile(&ids[0], &patch);
    assert_eq!(store.get(&ids[0]).unwrap().x, 1.0);
    assert_eq!(store.get(&ids[0]).unwrap().y, y);
}

#[test]
fn rotation_accumulates_without_normalization() {
    let (mut store, ids) = store_with(1);
    for _ in 0..30 {
        store.update_tile(&ids[0], &TilePatch::rotate_by(15.0));
    }
    assert_eq!(store.get(&ids[0]).unwrap().rotation, 450.0);
    for _ in 0..40 {
        store.update_tile(&ids[0], &TilePatch::rotate_by(-15.0));
    }
    assert_eq!(store.get(&ids[0]).unwrap().rotation, -150.0);
}

#[test]
fn mirror_toggles() {
    let (mut store, ids) = store_with(1);
    store.update_tile(&ids[0], &TilePatch::toggle_mirror());
    assert!(store.get(&ids[0]).unwrap().is_mirrored);
    store.update_tile(&ids[0], &TilePatch::toggle_mirror());
    assert!(!store.get(&ids[0]).unwrap().is_mirrored);
}

#[test]
fn image_assignment_leaves_other_face() {
    let (mut store, ids) = store_with(1);
    store.update_tile(&ids[0], &TilePatch::image(Face::Front, img("f")));
    store.update_tile(&ids[0], &TilePatch::image(Face::Back, img("b")));
    store.update_tile(&ids[0], &TilePatch::image(Face::Front, img("f2")));
    let tile = store.get(&ids[0]).unwrap();
    assert_eq!(tile.front, Some(img("f2")));
    assert_eq!(tile.back, Some(img("b")));
}

#[test]
fn update_unknown_id_is_noop() {
    let (mut store, _) = store_with(3);
    let before = serialized(&store);
    let patch = TilePatch {
        x: Some(1.0),
        y: Some(2.0),
        rotate_by: Some(15.0),
        toggle_mirror: true,
        front: Some(img("f")),
        back: Some(img("b")),
    };
    assert!(!store.update_tile(&Uuid::new_v4(), &patch));
    assert_eq!(serialized(&store), before);
    assert_eq!(store.len(), 3);
}

#[test]
fn empty_patch_changes_nothing() {
    let (mut store, ids) = store_with(1);
    let before = serialized(&store);
    assert!(store.update_tile(&ids[0], &TilePatch::default()));
    assert_eq!(serialized(&store), before);
}

// =============================================================
// TileStore: flip, batch, remove, ordering
// =============================================================

#[test]
fn set_global_flip_changes_active_face() {
    let mut store = TileStore::new();
    store.set_global_flip(true);
    assert!(store.is_flipped());
    assert_eq!(store.active_face(), Face::Back);
    store.set_global_flip(false);
    assert_eq!(store.active_face(), Face::Front);
}

#[test]
fn commit_batch_appends_all() {
    let (mut store, _) = store_with(1);
    let batch = vec![Tile::blank(1.0, 1.0), Tile::blank(2.0, 2.0)];
    assert_eq!(store.commit_batch(batch), 2);
    assert_eq!(store.len(), 3);
}

#[test]
fn commit_empty_batch() {
    let mut store = TileStore::new();
    assert_eq!(store.commit_batch(Vec::new()), 0);
    assert!(store.is_empty());
}

#[test]
fn remove_tile_returns_it() {
    let (mut store, ids) = store_with(2);
    let removed = store.remove_tile(&ids[0]).unwrap();
    assert_eq!(removed.id, ids[0]);
    assert!(store.get(&ids[0]).is_none());
    assert!(store.remove_tile(&ids[0]).is_none());
    assert_eq!(store.len(), 1);
}

#[test]
fn list_tiles_in_creation_order() {
    let (mut store, ids) = store_with(5);
    let later = Tile::blank(0.0, 0.0);
    let later_id = later.id;
    store.commit_batch(vec![later]);
    let listed: Vec<TileId> = store.list_tiles().iter().map(|t| t.id).collect();
    let mut expected = ids;
    expected.push(later_id);
    assert_eq!(listed, expected);
}

#[test]
fn list_tiles_order_unaffected_by_updates() {
    let (mut store, ids) = store_with(3);
    store.update_tile(&ids[0], &TilePatch::move_to(Point::new(999.0, 999.0)));
    let listed: Vec<TileId> = store.list_tiles().iter().map(|t| t.id).collect();
    assert_eq!(listed, ids);
}
