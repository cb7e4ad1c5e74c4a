use macroquad::prelude::*;
use crate::application::Driver;

/// Q or Escape ends the run
pub fn quit_requested() -> bool {
    is_key_pressed(KeyCode::Q) || is_key_pressed(KeyCode::Escape)
}

/// Process keyboard input functionally
pub fn process_keyboard_input(driver: Driver) -> Driver {
    type KeyAction = (KeyCode, fn(Driver) -> Driver);

    let actions: [KeyAction; 3] = [
        (KeyCode::Space, Driver::toggle_running),
        (KeyCode::Up, |d| d.adjust_speed(1.0)),
        (KeyCode::Down, |d| d.adjust_speed(-1.0)),
    ];

    actions.iter().fold(driver, |d, (key, action)| {
        if is_key_pressed(*key) { action(d) } else { d }
    })
}
