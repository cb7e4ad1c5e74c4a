use macroquad::prelude::*;
use crate::application::{Display, Driver};

/// Width of the status panel to the right of the grid
pub const PANEL_WIDTH: f32 = 180.0;

/// Format large numbers with K/M/B suffixes
pub fn format_number(n: usize) -> String {
    if n >= 1_000_000_000 {
        format!("{:.1}B", n as f64 / 1_000_000_000.0)
    } else if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}K", n as f64 / 1_000.0)
    } else {
        format!("{}", n)
    }
}

/// Draw the visible cells: alive as a bright square, dead as a dim one
pub fn draw_display(display: &Display, cell_size: f32) {
    let viewport = display.viewport();
    let alive_color = Color::from_rgba(0, 255, 150, 255);
    let dead_cell_color = Color::from_rgba(15, 15, 15, 255);
    let inset = if cell_size >= 4.0 { 1.0 } else { 0.0 };

    for (coord, alive) in display.iter_cells() {
        let (screen_x, screen_y) = viewport.grid_to_screen(coord, cell_size);
        let color = if alive { alive_color } else { dead_cell_color };
        draw_rectangle(screen_x, screen_y, cell_size - inset, cell_size - inset, color);
    }
}

/// Draw the status panel next to the grid
pub fn draw_status(driver: &Driver, cell_size: f32) {
    let (grid_px, _) = driver.display.viewport().screen_size(cell_size);
    let px = grid_px + 10.0;

    draw_rectangle(grid_px, 0.0, PANEL_WIDTH, screen_height(), Color::from_rgba(30, 30, 30, 255));

    let (gw, gh) = driver.engine.dimensions();
    let advance_ms = driver.last_advance_ms;

    // Color code the advance time
    let perf_color = if advance_ms < 5.0 {
        Color::from_rgba(0, 255, 0, 255)
    } else if advance_ms < 33.0 {
        Color::from_rgba(255, 255, 0, 255)
    } else if advance_ms < 100.0 {
        Color::from_rgba(255, 165, 0, 255)
    } else {
        Color::from_rgba(255, 0, 0, 255)
    };

    let speed = match driver.updates_per_second {
        Some(rate) => format!("{:.0} gen/s", rate),
        None => "uncapped".to_string(),
    };
    let frames = match driver.frame_limit {
        Some(limit) => format!("{} / {}", driver.frames, limit),
        None => driver.frames.to_string(),
    };

    let mode = format!(
        "{} | {}",
        driver.engine.strategy().name(),
        driver.engine.neighborhood().name()
    );

    let labels = [
        (format!("Grid: {}x{}", gw, gh), 20.0, 14.0, WHITE),
        (format!("Cells: {}", format_number(gw * gh)), 36.0, 12.0, GRAY),
        (mode, 52.0, 12.0, GRAY),
        ("Frame:".to_string(), 84.0, 16.0, WHITE),
        (frames, 104.0, 18.0, Color::from_rgba(0, 255, 150, 255)),
        (format!("Advance: {:.1}ms", advance_ms), 134.0, 13.0, perf_color),
        (format!("FPS: {}", get_fps()), 150.0, 12.0, GRAY),
        (format!("Changed: {}", format_number(driver.last_change_count)), 166.0, 12.0, GRAY),
        (format!("On screen: {}", driver.last_visible_changes), 182.0, 12.0, GRAY),
        (format!("Alive shown: {}", driver.display.alive_count()), 198.0, 12.0, GRAY),
        ("Speed:".to_string(), 230.0, 16.0, WHITE),
        (speed, 250.0, 14.0, Color::from_rgba(180, 180, 180, 255)),
        (
            (if driver.is_running { "Running" } else { "Paused" }).to_string(),
            280.0,
            16.0,
            if driver.is_running {
                Color::from_rgba(0, 255, 0, 255)
            } else {
                Color::from_rgba(255, 165, 0, 255)
            },
        ),
        ("Space: Pause".to_string(), 310.0, 12.0, GRAY),
        ("Up/Down: Speed".to_string(), 323.0, 12.0, GRAY),
        ("Q/Esc: Quit".to_string(), 336.0, 12.0, GRAY),
    ];

    labels.iter().for_each(|(text, y, size, color)| {
        draw_text(text, px, *y, *size, *color);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1_500), "1.5K");
        assert_eq!(format_number(4_000_000), "4.0M");
        assert_eq!(format_number(2_000_000_000), "2.0B");
    }
}
