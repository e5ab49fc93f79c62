use minifb::{Key, Scale, Window, WindowOptions};

use crate::display::{Display, HEIGHT, WIDTH};
use crate::keyboard::Keypad;

const FOREGROUND: u32 = from_rgb(0, 127, 255);
const BACKGROUND: u32 = from_rgb(0, 0, 0);

const fn from_rgb(r: u8, g: u8, b: u8) -> u32 {
    ((r as u32) << 16) | ((g as u32) << 8) | b as u32
}

pub fn render(display: &Display, pixel_buffer: &mut [u32]) {
    for (pixel, lit) in pixel_buffer.iter_mut().zip(display.pixels()) {
        *pixel = if *lit { FOREGROUND } else { BACKGROUND };
    }
}

pub struct FrameBuffer {
    pixel_buffer: Vec<u32>,
    pub window: Window,
}

impl FrameBuffer {
    pub fn new(scale: Scale) -> Result<Self, minifb::Error> {
        let mut window = Window::new(
            "emuchip - ESC to exit",
            WIDTH,
            HEIGHT,
            WindowOptions {
                scale,
                ..WindowOptions::default()
            },
        )?;
        // Limit to max ~60 fps update rate
        window.limit_update_rate(Some(std::time::Duration::from_micros(16600)));
        Ok(Self {
            pixel_buffer: vec![BACKGROUND; WIDTH * HEIGHT],
            window,
        })
    }

    pub fn sync(&mut self, display: &Display) -> Result<(), minifb::Error> {
        render(display, &mut self.pixel_buffer);
        self.window
            .update_with_buffer(&self.pixel_buffer, WIDTH, HEIGHT)
    }

    pub fn keypad(&self) -> Keypad {
        Keypad::from_keys(&self.window.get_keys())
    }

    pub fn is_open(&self) -> bool {
        self.window.is_open() && !self.window.is_key_down(Key::Escape)
    }
}

#[test]
fn test_render_colours() {
    let mut display = Display::new();
    display.paint_row(0, 1, 0b1000_0000);
    let mut pixels = vec![0xDEAD; WIDTH * HEIGHT];
    render(&display, &mut pixels);
    assert_eq!(pixels[WIDTH], 0x00007FFF);
    assert_eq!(pixels[0], 0);
    assert_eq!(pixels.iter().filter(|p| **p == FOREGROUND).count(), 1);
}
