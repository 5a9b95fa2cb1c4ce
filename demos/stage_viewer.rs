use macroquad::prelude::*;
use tile_stage::render::MacroquadRaster;
use tile_stage::{AssetPack, Stage, StageConfig};
use tracing_subscriber::EnvFilter;

const SCALE: f32 = 3.0;

fn window_conf() -> Conf {
    let cfg = StageConfig::default();
    Conf {
        window_title: "Stage Viewer".into(),
        window_width: (cfg.canvas_width as f32 * SCALE) as i32,
        window_height: (cfg.canvas_height as f32 * SCALE) as i32,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    if let Err(err) = run().await {
        eprintln!("stage viewer failed: {err:#}");
    }
}

async fn run() -> anyhow::Result<()> {
    let manifest = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "assets/assets.json".to_owned());
    let stage_name = std::env::args().nth(2).unwrap_or_else(|| "testMap".to_owned());

    let assets = AssetPack::<Texture2D>::load(&manifest).await?;
    let mut stage = Stage::new(&assets, StageConfig::default())?;
    let spawns = stage.init(&stage_name)?;
    println!("spawn requests: {}", spawns.len());

    let mut raster = MacroquadRaster::with_scale(SCALE);

    loop {
        if is_key_pressed(KeyCode::Escape) {
            break;
        }
        if is_key_pressed(KeyCode::T) {
            stage.toggle_special_blocks();
        }
        if is_key_pressed(KeyCode::S) {
            stage.set_shake_timer(30.0);
        }
        if is_key_pressed(KeyCode::R) {
            stage.reset(true)?;
        }

        // tick units: 1.0 per 60 Hz frame, capped like a fixed-step loop would
        let dt = (get_frame_time() * 60.0).min(5.0);
        stage.update(dt);

        clear_background(BLACK);
        stage.draw(&mut raster);

        draw_text(&format!("FPS: {}", get_fps()), 10.0, 30.0, 30.0, RED);
        next_frame().await;
    }

    Ok(())
}
