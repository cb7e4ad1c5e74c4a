use macroquad::prelude::*;
use torus_life::{Driver, ViewerConfig, input, rendering, telemetry};
use tracing::{error, info};

fn window_conf() -> Conf {
    // Logging is not up yet; a broken config is reported again from main
    let config = ViewerConfig::load().unwrap_or_default();
    let width = config.viewport_width.min(config.engine.width) as f32 * config.cell_size;
    let height = config.viewport_height.min(config.engine.height) as f32 * config.cell_size;

    Conf {
        window_title: "Toroidal Game of Life".to_owned(),
        window_width: (width + rendering::PANEL_WIDTH) as i32,
        window_height: height.max(360.0) as i32,
        window_resizable: true,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    telemetry::init_tracing();

    let config = match ViewerConfig::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load config: {}", e);
            return;
        }
    };

    let mut driver = match Driver::new(&config) {
        Ok(driver) => driver,
        Err(e) => {
            error!("Failed to start simulation: {}", e);
            return;
        }
    };

    let (width, height) = driver.engine.dimensions();
    info!(
        width,
        height,
        viewport = ?driver.display.viewport(),
        frame_limit = ?driver.frame_limit,
        "Starting simulation"
    );

    loop {
        if input::quit_requested() {
            info!(frames = driver.frames, "Quit requested");
            break;
        }
        driver = input::process_keyboard_input(driver);

        // Update simulation
        driver = driver.tick(get_frame_time());

        clear_background(BLACK);
        rendering::draw_display(&driver.display, config.cell_size);
        rendering::draw_status(&driver, config.cell_size);

        if driver.is_finished() {
            break;
        }

        next_frame().await;
    }
}
