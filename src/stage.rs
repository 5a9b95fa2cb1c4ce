use crate::animation::AnimationState;
use crate::blueprint::TileBlueprint;
use crate::config::StageConfig;
use crate::error::StageError;
use crate::grid::{CollisionGrid, TileGrid};
use crate::hazard::{Harm, Hazards};
use crate::loader::assets::AssetPack;
use crate::parser::{parse, SpawnRequest};
use crate::render::autotile::TileRenderer;
use crate::render::{Bitmap, Canvas, Raster};
use crate::tile::{StaticTile, TileId};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

/// Lifecycle of a [`Stage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageState {
    /// No blueprint selected.
    Unloaded,
    /// A blueprint is selected but not parsed yet.
    Bound,
    /// Grids are live. `soft` records whether the last reset skipped spawns.
    Loaded { soft: bool },
}

struct Backdrop<'a, B> {
    sky: &'a B,
    clouds: &'a B,
    tiles: &'a B,
}

/// One playable stage: owns its grids, borrows shared assets.
pub struct Stage<'a, B> {
    assets: &'a AssetPack<B>,
    config: StageConfig,
    backdrop: Backdrop<'a, B>,
    name: Option<String>,
    blueprint: Option<&'a TileBlueprint>,
    state: StageState,
    tiles: TileGrid,
    collision: CollisionGrid,
    anim: AnimationState,
    rng: ChaCha8Rng,
}

impl<'a, B: Bitmap> Stage<'a, B> {
    /// Resolves the backdrop bitmaps. A missing bitmap is fatal.
    pub fn new(assets: &'a AssetPack<B>, config: StageConfig) -> Result<Self, StageError> {
        let backdrop = Backdrop {
            sky: assets.bitmap(&config.sky_asset)?,
            clouds: assets.bitmap(&config.clouds_asset)?,
            tiles: assets.bitmap(&config.tiles_asset)?,
        };
        Ok(Stage {
            assets,
            rng: ChaCha8Rng::seed_from_u64(config.shake_seed),
            config,
            backdrop,
            name: None,
            blueprint: None,
            state: StageState::Unloaded,
            tiles: TileGrid::default(),
            collision: CollisionGrid::default(),
            anim: AnimationState::default(),
        })
    }

    /// Selects the blueprint by name without touching animation state. The
    /// grids stay empty until `init` or `reset`.
    pub fn set_main_stage(&mut self, name: &str) -> Result<(), StageError> {
        let blueprint = self.assets.blueprint(name)?;
        self.blueprint = Some(blueprint);
        self.name = Some(name.to_owned());
        self.tiles = TileGrid::default();
        self.collision = CollisionGrid::default();
        self.state = StageState::Bound;
        info!(
            stage = name,
            width = blueprint.width(),
            height = blueprint.height(),
            "stage_bound"
        );
        Ok(())
    }

    /// Selects `name` and performs a full load. Returns the entities to spawn.
    pub fn init(&mut self, name: &str) -> Result<Vec<SpawnRequest>, StageError> {
        self.set_main_stage(name)?;
        self.reset(false)
    }

    /// Rebuilds the grids from the bound blueprint. A soft reset re-derives
    /// collision only and requests no spawns.
    pub fn reset(&mut self, soft: bool) -> Result<Vec<SpawnRequest>, StageError> {
        let blueprint = self.blueprint.ok_or(StageError::NoStageBound)?;

        self.anim.reset();
        self.tiles = TileGrid::from_blueprint(blueprint);
        let outcome = parse(&self.tiles, soft);
        self.collision = outcome.collision;

        let first_load = self.state == StageState::Bound;
        self.state = StageState::Loaded { soft };
        info!(
            stage = self.name.as_deref().unwrap_or_default(),
            soft,
            first_load,
            spawns = outcome.spawns.len(),
            "stage_loaded"
        );
        Ok(outcome.spawns)
    }

    /// Swap-away: drops the blueprint and grids.
    pub fn unload(&mut self) {
        self.blueprint = None;
        self.name = None;
        self.tiles = TileGrid::default();
        self.collision = CollisionGrid::default();
        self.anim.reset();
        self.state = StageState::Unloaded;
        debug!("stage_unloaded");
    }

    /// Advance animation by `dt` tick units.
    pub fn update(&mut self, dt: f32) {
        let cloud_width = self.backdrop.clouds.width() as f32;
        self.anim.update(dt, &self.config, cloud_width);
    }

    /// Draws backdrop then tiles, all shifted by this frame's shake offset.
    /// Lava goes first so solid tiles can overlap the moving surface.
    pub fn draw<R: Raster<Bitmap = B>>(&mut self, raster: &mut R) {
        let shake = self.shake_offset();
        let (sky, clouds, atlas) = (self.backdrop.sky, self.backdrop.clouds, self.backdrop.tiles);
        let mut canvas = Canvas::new(raster, shake);

        canvas.bitmap(sky, 0, 0);
        let cloud_y = self.config.canvas_height as i32 - clouds.height() as i32;
        for i in 0..2 {
            let x = (self.anim.cloud_pos + (i * clouds.width()) as f32).round() as i32;
            canvas.bitmap(clouds, x, cloud_y);
        }

        let renderer = TileRenderer::new(&self.tiles, atlas, &self.anim);
        let lava = |id: TileId| id.is(StaticTile::Lava);

        for (x, y, id) in self.tiles.iter() {
            if lava(id) {
                renderer.draw_cell(&mut canvas, x as i32, y as i32);
            }
        }
        for (x, y, id) in self.tiles.iter() {
            if !id.is_empty() && !lava(id) {
                renderer.draw_cell(&mut canvas, x as i32, y as i32);
            }
        }
    }

    fn shake_offset(&mut self) -> (i32, i32) {
        if !self.anim.is_shaking() {
            return (0, 0);
        }
        let m = self.config.shake_magnitude.abs();
        (self.rng.gen_range(-m..=m), self.rng.gen_range(-m..=m))
    }

    /// Swaps every solid purple block with an inert one and back, keeping the
    /// collision grid in step.
    pub fn toggle_special_blocks(&mut self) {
        let mut toggled = 0usize;
        let width = self.tiles.width();
        for (i, cell) in self.tiles.cells_mut().iter_mut().enumerate() {
            let next = if cell.is(StaticTile::PurpleSolid) {
                StaticTile::PurpleInert
            } else if cell.is(StaticTile::PurpleInert) {
                StaticTile::PurpleSolid
            } else {
                continue;
            };
            *cell = next.id();
            self.collision.set(i % width, i / width, Some(next));
            toggled += 1;
        }
        debug!(toggled, "special_blocks_toggled");
    }

    /// Unchecked write; callers bounds-check.
    pub fn set_tile(&mut self, x: usize, y: usize, id: TileId) {
        self.tiles.set(x, y, id);
    }

    /// Unchecked write; non-static IDs clear the cell.
    pub fn set_collision_tile(&mut self, x: usize, y: usize, id: TileId) {
        self.collision.set(x, y, StaticTile::from_id(id.raw()));
    }

    /// Starts a screen shake lasting `time` tick units.
    pub fn set_shake_timer(&mut self, time: f32) {
        self.anim.shake_timer = time.max(0.0);
    }

    /// Query view over both grids.
    pub fn hazards(&self) -> Hazards<'_> {
        Hazards::new(&self.tiles, &self.collision)
    }

    /// Outside the grid counts as solid.
    pub fn is_solid(&self, x: i32, y: i32) -> bool {
        self.hazards().is_solid(x, y)
    }

    /// Climbable cell.
    pub fn is_vine(&self, x: i32, y: i32) -> bool {
        self.hazards().is_vine(x, y)
    }

    /// Lava cell.
    pub fn is_lava(&self, x: i32, y: i32) -> bool {
        self.hazards().is_lava(x, y)
    }

    /// See [`Hazards::is_harmful`].
    pub fn is_harmful(&self, x: i32, y: i32) -> Harm {
        self.hazards().is_harmful(x, y)
    }

    /// Current lifecycle state.
    pub fn state(&self) -> StageState {
        self.state
    }

    /// Name of the bound blueprint.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Tunables this stage was built with.
    pub fn config(&self) -> &StageConfig {
        &self.config
    }

    /// Bound blueprint, if any.
    pub fn blueprint(&self) -> Option<&'a TileBlueprint> {
        self.blueprint
    }

    /// Runtime tile grid.
    pub fn tiles(&self) -> &TileGrid {
        &self.tiles
    }

    /// Collision grid derived from the tiles.
    pub fn collision(&self) -> &CollisionGrid {
        &self.collision
    }

    /// Animation state.
    pub fn animation(&self) -> &AnimationState {
        &self.anim
    }
}
