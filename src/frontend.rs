use minifb::{Key, KeyRepeat, Scale, Window, WindowOptions};

use crate::{
    display::{Pixels, HEIGHT, WIDTH},
    keyboard::key_to_num,
};

const TITLE: &str = "emuchip - ESC to exit";

/// minifb window that shows the display and feeds keypad edges back.
pub struct Frontend {
    window: Window,
    pixel_buffer: Vec<u32>,
    beeping: bool,
}

impl Frontend {
    pub fn new(scale: u8, frame_rate: u32) -> Result<Self, minifb::Error> {
        let mut window = Window::new(
            TITLE,
            WIDTH,
            HEIGHT,
            WindowOptions {
                scale: scale_from_factor(scale),
                ..WindowOptions::default()
            },
        )?;
        window.set_position(500, 300);
        if frame_rate > 0 {
            window.limit_update_rate(Some(std::time::Duration::from_micros(
                1_000_000 / frame_rate as u64,
            )));
        }

        Ok(Self {
            window,
            pixel_buffer: vec![0; WIDTH * HEIGHT],
            beeping: false,
        })
    }

    pub fn is_running(&self) -> bool {
        self.window.is_open() && !self.window.is_key_pressed(Key::Escape, KeyRepeat::No)
    }

    /// Keypad keys that went down since the last update.
    pub fn pressed_keys(&self) -> Vec<u8> {
        self.window
            .get_keys_pressed(KeyRepeat::No)
            .into_iter()
            .filter_map(key_to_num)
            .collect()
    }

    /// Keypad keys that went up since the last update.
    pub fn released_keys(&self) -> Vec<u8> {
        self.window
            .get_keys_released()
            .into_iter()
            .filter_map(key_to_num)
            .collect()
    }

    pub fn set_beep(&mut self, on: bool) {
        if on == self.beeping {
            return;
        }
        self.beeping = on;
        let title = if on {
            format!("{TITLE} [BEEP]")
        } else {
            TITLE.to_string()
        };
        self.window.set_title(&title);
    }

    pub fn draw(&mut self, pixels: &Pixels) -> Result<(), minifb::Error> {
        for (slot, &on) in self.pixel_buffer.iter_mut().zip(pixels.iter().flatten()) {
            *slot = if on {
                from_u8_rgb(0, 127, 255)
            } else {
                from_u8_rgb(0, 0, 0)
            };
        }
        self.window
            .update_with_buffer(&self.pixel_buffer, WIDTH, HEIGHT)
    }

    /// Pumps window events without redrawing.
    pub fn update(&mut self) {
        self.window.update();
    }
}

fn from_u8_rgb(r: u8, g: u8, b: u8) -> u32 {
    let (r, g, b) = (r as u32, g as u32, b as u32);
    (r << 16) | (g << 8) | b
}

fn scale_from_factor(scale: u8) -> Scale {
    match scale {
        0..=1 => Scale::X1,
        2..=3 => Scale::X2,
        4..=7 => Scale::X4,
        8..=15 => Scale::X8,
        16..=31 => Scale::X16,
        _ => Scale::X32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lit_pixels_are_blue() {
        assert_eq!(from_u8_rgb(0, 127, 255), 0x007FFF);
        assert_eq!(from_u8_rgb(0, 0, 0), 0);
    }

    #[test]
    fn scale_rounds_down_to_supported_factor() {
        assert!(matches!(scale_from_factor(16), Scale::X16));
        assert!(matches!(scale_from_factor(10), Scale::X8));
        assert!(matches!(scale_from_factor(0), Scale::X1));
        assert!(matches!(scale_from_factor(200), Scale::X32));
    }
}
