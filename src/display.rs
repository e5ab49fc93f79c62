pub const WIDTH: usize = 64;
pub const HEIGHT: usize = 32;

/// The 64x32 monochrome screen, stored row-major as `row * WIDTH + col`.
pub struct Display {
    pixels: [bool; WIDTH * HEIGHT],
}

impl Display {
    pub fn new() -> Self {
        Self {
            pixels: [false; WIDTH * HEIGHT],
        }
    }

    pub fn clear(&mut self) {
        self.pixels = [false; WIDTH * HEIGHT];
    }

    pub fn get(&self, col: usize, row: usize) -> bool {
        self.pixels[Self::index(col, row)]
    }

    /// XORs one sprite row onto the screen at (x, y), wrapping on both axes.
    /// Returns true if any lit pixel was switched off.
    pub fn paint_row(&mut self, x: usize, y: usize, row: u8) -> bool {
        let mut collision = false;
        for j in 0..8 {
            if (row >> (7 - j)) & 1 == 0 {
                continue;
            }
            let index = Self::index(x + j, y);
            collision |= self.pixels[index];
            self.pixels[index] ^= true;
        }
        collision
    }

    pub fn pixels(&self) -> &[bool] {
        &self.pixels
    }

    pub fn lit(&self) -> usize {
        self.pixels.iter().filter(|p| **p).count()
    }

    fn index(col: usize, row: usize) -> usize {
        (row % HEIGHT) * WIDTH + col % WIDTH
    }
}

impl Default for Display {
    fn default() -> Self {
        Self::new()
    }
}
