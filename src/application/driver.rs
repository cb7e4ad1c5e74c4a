use super::{Display, Viewport};
use crate::config::ViewerConfig;
use crate::domain::Engine;
use crate::error::Result;
use std::time::{Duration, Instant};
use tracing::info;

/// Fastest selectable rate; raising the speed past it removes the cap
pub const MAX_UPDATES_PER_SECOND: f32 = 60.0;

/// Driver orchestrates the simulation loop.
/// It owns the engine, forwards each change stream to the display and
/// decides when the run is over. The engine itself never stops.
pub struct Driver {
    pub engine: Engine,
    pub display: Display,
    pub is_running: bool,
    pub frames: u64,
    pub frame_limit: Option<u64>,
    pub update_timer: f32,
    /// None = advance once per rendered frame
    pub updates_per_second: Option<f32>,
    pub last_advance_ms: f32,  // advance + display update
    pub last_change_count: usize,
    pub last_visible_changes: usize,
    started: Instant,
}

impl Driver {
    /// Build engine and display from a validated viewer config
    pub fn new(config: &ViewerConfig) -> Result<Self> {
        config.validate()?;
        let engine = Engine::from_config(&config.engine)?;
        let viewport = Viewport::new(config.viewport_width, config.viewport_height)
            .clamped_to(engine.dimensions());

        Ok(Self {
            engine,
            display: Display::new(viewport),
            is_running: true,
            frames: 0,
            frame_limit: config.frame_limit,
            update_timer: 0.0,
            updates_per_second: config.updates_per_second,
            last_advance_ms: 0.0,
            last_change_count: 0,
            last_visible_changes: 0,
            started: Instant::now(),
        })
    }

    /// Toggle play/pause state
    pub fn toggle_running(mut self) -> Self {
        self.is_running = !self.is_running;
        self
    }

    /// Adjust simulation speed; reaching the maximum switches to uncapped
    pub fn adjust_speed(mut self, delta: f32) -> Self {
        let current = self.updates_per_second.unwrap_or(MAX_UPDATES_PER_SECOND);
        let adjusted = (current + delta).clamp(1.0, MAX_UPDATES_PER_SECOND);
        self.updates_per_second = (adjusted < MAX_UPDATES_PER_SECOND).then_some(adjusted);
        self
    }

    /// Whether the configured frame limit has been reached
    pub fn is_finished(&self) -> bool {
        self.frame_limit.is_some_and(|limit| self.frames >= limit)
    }

    /// Time since the driver was created
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Advance one generation and paint its changes
    pub fn advance(&mut self) {
        let start = Instant::now();

        let changes = self.engine.advance();
        self.last_change_count = changes.len();
        self.last_visible_changes = self.display.apply(changes);

        self.last_advance_ms = start.elapsed().as_secs_f32() * 1000.0;
        self.frames += 1;

        if self.is_finished() {
            info!(
                frames = self.frames,
                "{} frames in {:.2} seconds",
                self.frames,
                self.elapsed().as_secs_f64()
            );
        }
    }

    /// Update simulation by one rendered frame
    pub fn tick(mut self, delta_time: f32) -> Self {
        if !self.is_running || self.is_finished() {
            return self;
        }

        match self.updates_per_second {
            None => self.advance(),
            Some(rate) => {
                self.update_timer += delta_time;
                if self.update_timer >= 1.0 / rate {
                    self.advance();
                    self.update_timer = 0.0;
                }
            }
        }

        self
    }
}
