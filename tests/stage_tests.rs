// tests/stage_tests.rs

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tile_stage::render::{RecordingRaster, TestBitmap};
use tile_stage::{
    AssetPack, Harm, Layer, SpawnKind, Stage, StageConfig, StageError, StageState, StaticTile,
    TileBlueprint, TileId, TileKind,
};

const CLOUD_W: u32 = 128;

fn pack<const W: usize>(rows: &[[u32; W]]) -> AssetPack<TestBitmap> {
    let mut pack = AssetPack::new();
    pack.insert_bitmap("sky1", TestBitmap::new("sky1", 256, 192))
        .insert_bitmap("clouds1", TestBitmap::new("clouds1", CLOUD_W, 64))
        .insert_bitmap("tiles1", TestBitmap::new("tiles1", 128, 128))
        .insert_blueprint("test", TileBlueprint::from_rows(rows).expect("valid rows"));
    pack
}

const LEVEL: [[u32; 4]; 4] = [
    [0, 12, 0, 17],
    [2, 0, 18, 17],
    [1, 1, 3, 19],
    [1, 4, 1, 1],
];

#[test]
fn init_copies_primary_layer_and_requests_spawns() {
    let assets = pack(&LEVEL);
    let mut stage = Stage::new(&assets, StageConfig::default()).unwrap();
    assert_eq!(stage.state(), StageState::Unloaded);

    let spawns = stage.init("test").unwrap();
    let keys: Vec<_> = spawns.iter().map(|s| (s.kind, s.x, s.y)).collect();
    assert_eq!(keys, vec![(SpawnKind(12), 1, 0), (SpawnKind(19), 3, 2)]);

    assert_eq!(stage.state(), StageState::Loaded { soft: false });
    assert_eq!(stage.tiles().cells(), assets.blueprint("test").unwrap().primary().data.as_slice());
    assert_eq!(stage.collision().get(1, 0), Some(None));
    assert_eq!(stage.collision().get(3, 2), Some(None));
    assert_eq!(stage.collision().get(2, 1), Some(Some(StaticTile::PurpleInert)));
}

#[test]
fn full_reset_restores_blueprint_and_soft_reset_spawns_nothing() {
    let assets = pack(&LEVEL);
    let mut stage = Stage::new(&assets, StageConfig::default()).unwrap();
    let first = stage.init("test").unwrap();

    stage.set_tile(0, 0, TileId(1));
    stage.toggle_special_blocks();

    let soft = stage.reset(true).unwrap();
    assert!(soft.is_empty());
    assert_eq!(stage.state(), StageState::Loaded { soft: true });
    assert_eq!(stage.tiles().get(0, 0), Some(TileId::EMPTY));

    let full = stage.reset(false).unwrap();
    assert_eq!(full, first);
    assert_eq!(stage.tiles().cells(), assets.blueprint("test").unwrap().primary().data.as_slice());
    for (x, y, id) in stage.tiles().iter() {
        if let TileKind::Spawn(_) = id.kind() {
            assert_eq!(stage.collision().get(x as i32, y as i32), Some(None));
        }
    }
}

#[test]
fn toggle_twice_restores_both_grids() {
    let assets = pack(&LEVEL);
    let mut stage = Stage::new(&assets, StageConfig::default()).unwrap();
    stage.init("test").unwrap();
    let tiles = stage.tiles().clone();
    let collision = stage.collision().clone();

    stage.toggle_special_blocks();
    assert!(!stage.is_solid(3, 0));
    assert!(stage.is_solid(2, 1));
    assert_eq!(stage.tiles().get(3, 1), Some(TileId(18)));
    assert_eq!(stage.tiles().get(2, 1), Some(TileId(17)));

    stage.toggle_special_blocks();
    assert_eq!(stage.tiles(), &tiles);
    assert_eq!(stage.collision(), &collision);
}

#[test]
fn outside_is_solid_and_never_hazardous() {
    let assets = pack(&LEVEL);
    let mut stage = Stage::new(&assets, StageConfig::default()).unwrap();
    stage.init("test").unwrap();
    for (x, y) in [(-1, 0), (4, 0), (0, -1), (0, 4), (-5, -5), (100, 2)] {
        assert!(stage.is_solid(x, y));
        assert!(!stage.is_vine(x, y));
        assert!(!stage.is_lava(x, y));
        assert_eq!(stage.is_harmful(x, y), Harm::Safe);
    }
    assert!(stage.is_vine(0, 1));
    assert!(stage.is_lava(2, 2));
    assert!(!stage.is_solid(0, 1));
}

#[test]
fn harm_reads_lava_then_the_row_below() {
    let mut assets = pack(&LEVEL);
    assets.insert_blueprint("pit", TileBlueprint::from_rows(&[[3, 0], [4, 4]]).unwrap());
    let mut stage = Stage::new(&assets, StageConfig::default()).unwrap();
    stage.init("pit").unwrap();

    assert_eq!(stage.is_harmful(0, 0), Harm::Lethal);
    assert_eq!(stage.is_harmful(1, 0), Harm::Harmful);
    assert_eq!(stage.is_harmful(1, 1), Harm::Safe);
}

#[test]
fn direct_writes_update_queries() {
    let assets = pack(&LEVEL);
    let mut stage = Stage::new(&assets, StageConfig::default()).unwrap();
    stage.init("test").unwrap();

    stage.set_collision_tile(0, 0, StaticTile::Stone.id());
    assert!(stage.is_solid(0, 0));
    stage.set_collision_tile(0, 0, TileId(12));
    assert!(!stage.is_solid(0, 0));

    stage.set_tile(0, 0, StaticTile::Lava.id());
    assert_eq!(stage.is_harmful(0, 0), Harm::Lethal);
}

#[test]
fn lookup_failures_are_typed() {
    let assets = pack(&LEVEL);
    let mut stage = Stage::new(&assets, StageConfig::default()).unwrap();
    assert!(matches!(stage.reset(false), Err(StageError::NoStageBound)));
    assert!(matches!(stage.init("nope"), Err(StageError::MissingAsset(n)) if n == "nope"));

    let cfg = StageConfig {
        tiles_asset: "tiles9".into(),
        ..StageConfig::default()
    };
    assert!(matches!(Stage::new(&assets, cfg), Err(StageError::MissingAsset(n)) if n == "tiles9"));
}

#[test]
fn rebinding_keeps_animation_but_init_resets_it() {
    let mut assets = pack(&LEVEL);
    assets.insert_blueprint("other", TileBlueprint::from_rows(&[[1, 1]]).unwrap());
    let mut stage = Stage::new(&assets, StageConfig::default()).unwrap();
    stage.init("test").unwrap();
    stage.update(3.0);
    let anim = *stage.animation();
    assert!(anim.cloud_pos < 0.0);

    stage.set_main_stage("other").unwrap();
    assert_eq!(stage.state(), StageState::Bound);
    assert_eq!(stage.name(), Some("other"));
    assert_eq!(stage.animation(), &anim);

    stage.reset(false).unwrap();
    assert_eq!(stage.tiles().width(), 2);
    assert_eq!(stage.animation().cloud_pos, 0.0);

    stage.unload();
    assert_eq!(stage.state(), StageState::Unloaded);
    assert!(stage.blueprint().is_none());
}

#[test]
fn clouds_wrap_at_bitmap_width() {
    let assets = pack(&LEVEL);
    let mut stage = Stage::new(&assets, StageConfig::default()).unwrap();
    stage.init("test").unwrap();
    stage.update(4.0);
    let start = stage.animation().cloud_pos;
    // cloud_speed 0.5: CLOUD_W * 2 tick units travel exactly one width
    stage.update(CLOUD_W as f32 * 2.0);
    assert!((stage.animation().cloud_pos - start).abs() < 1e-3);
}

#[test]
fn draw_paints_backdrop_then_lava_then_other_tiles() {
    let assets = pack(&LEVEL);
    let mut stage = Stage::new(&assets, StageConfig::default()).unwrap();
    stage.init("test").unwrap();
    let mut raster = RecordingRaster::new();
    stage.draw(&mut raster);

    assert_eq!(raster.blits[0].bitmap, "sky1");
    assert_eq!(raster.blits[1].bitmap, "clouds1");
    assert_eq!(raster.blits[2].bitmap, "clouds1");
    assert_eq!(raster.blits[1].dy, 192 - 64);
    assert_eq!(raster.blits[2].dx, CLOUD_W as i32);

    // lava at (2,2) sits under an inert purple block, so it is a surface cell
    let tile_blits: Vec<_> = raster.blits_from("tiles1").collect();
    let first_two: Vec<_> = tile_blits[..2].iter().map(|b| (b.dx, b.src.unwrap().y)).collect();
    assert_eq!(first_two, vec![(32, 32), (40, 32)]);
    assert!(tile_blits[2..].iter().all(|b| {
        let src = b.src.unwrap();
        !(src.y == 32 && src.w == 8)
    }));
}

#[test]
fn shake_offsets_whole_frame_while_active() {
    let assets = pack(&LEVEL);
    let cfg = StageConfig {
        lava_speed: 0.0,
        ..StageConfig::default()
    };
    let mut stage = Stage::new(&assets, cfg).unwrap();
    stage.init("test").unwrap();

    let mut still = RecordingRaster::new();
    stage.draw(&mut still);

    stage.set_shake_timer(30.0);
    let mut seen_offset = false;
    for _ in 0..20 {
        let mut shaken = RecordingRaster::new();
        stage.draw(&mut shaken);
        assert_eq!(shaken.blits.len(), still.blits.len());

        // sky is the first blit; everything after moves with it
        let dx = shaken.blits[0].dx - still.blits[0].dx;
        let dy = shaken.blits[0].dy - still.blits[0].dy;
        assert!((-2..=2).contains(&dx) && (-2..=2).contains(&dy));
        for (a, b) in shaken.blits.iter().zip(&still.blits) {
            assert_eq!((a.dx - b.dx, a.dy - b.dy), (dx, dy));
            assert_eq!((&a.bitmap, a.src), (&b.bitmap, b.src));
        }
        seen_offset |= (dx, dy) != (0, 0);
    }
    assert!(seen_offset);

    stage.update(30.0);
    let mut after = RecordingRaster::new();
    stage.draw(&mut after);
    // update moved the clouds, compare sky and tiles
    assert_eq!(after.blits[0], still.blits[0]);
    assert_eq!(after.blits[3..], still.blits[3..]);
}

/// Random blueprint over IDs 0..=20: statics, purple pairs, spawns and unknowns.
fn random_blueprint(rng: &mut ChaCha8Rng) -> TileBlueprint {
    let width = rng.gen_range(1..=9);
    let height = rng.gen_range(1..=7);
    let data: Vec<u32> = (0..width * height).map(|_| rng.gen_range(0..=20)).collect();
    TileBlueprint::new(width, height, vec![Layer::new("main", data)]).unwrap()
}

#[test]
fn random_grids_toggle_round_trip_and_reset_rules() {
    let mut rng = ChaCha8Rng::seed_from_u64(0x5eed);
    for round in 0..200 {
        let mut assets = pack(&LEVEL);
        assets.insert_blueprint("random", random_blueprint(&mut rng));
        let mut stage = Stage::new(&assets, StageConfig::default()).unwrap();
        stage.init("random").unwrap();
        let primary = assets.blueprint("random").unwrap().primary().data.clone();

        let tiles = stage.tiles().clone();
        let collision = stage.collision().clone();
        stage.toggle_special_blocks();
        stage.toggle_special_blocks();
        assert_eq!(stage.tiles(), &tiles, "round {round}");
        assert_eq!(stage.collision(), &collision, "round {round}");

        stage.toggle_special_blocks();
        assert!(stage.reset(true).unwrap().is_empty(), "round {round}");

        stage.toggle_special_blocks();
        stage.reset(false).unwrap();
        assert_eq!(stage.tiles().cells(), primary.as_slice(), "round {round}");
    }
}
