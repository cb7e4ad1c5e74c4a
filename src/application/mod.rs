mod viewport;
mod display;
mod driver;

pub use viewport::Viewport;
pub use display::Display;
pub use driver::{Driver, MAX_UPDATES_PER_SECOND};
