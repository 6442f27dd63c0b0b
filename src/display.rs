pub const WIDTH: usize = 64;
pub const HEIGHT: usize = 32;

/// Pixel grid indexed as `[y][x]`.
pub type Pixels = [[bool; WIDTH]; HEIGHT];

/// The 64x32 monochrome display. Only `clear_buffer` and `paint` mutate it.
#[derive(Clone)]
pub struct FrameBuffer {
    bit_buffer: Pixels,
    dirty: bool,
}

impl FrameBuffer {
    pub fn new() -> Self {
        Self {
            bit_buffer: [[false; WIDTH]; HEIGHT],
            dirty: false,
        }
    }

    pub fn clear_buffer(&mut self) {
        self.bit_buffer = [[false; WIDTH]; HEIGHT];
        self.dirty = true;
    }

    /// XORs `sprite` onto the grid with its top-left corner at (x, y), most
    /// significant bit leftmost. Every pixel wraps independently on both axes.
    /// Returns true if any lit pixel was switched off.
    pub fn paint(&mut self, x: u8, y: u8, sprite: &[u8]) -> bool {
        let mut collision = false;
        for (i, row) in sprite.iter().enumerate() {
            let ny = (y as usize + i) % HEIGHT;
            for j in 0..8 {
                let nx = (x as usize + j) % WIDTH;
                let bit = (row >> (7 - j)) & 1 == 1;
                let previous = self.bit_buffer[ny][nx];
                let new = previous ^ bit;
                if previous && !new {
                    collision = true;
                }
                self.bit_buffer[ny][nx] = new;
            }
        }
        self.dirty = true;
        collision
    }

    pub fn is_on(&self, x: usize, y: usize) -> bool {
        self.bit_buffer[y % HEIGHT][x % WIDTH]
    }

    /// Read-only snapshot for the render sink.
    pub fn pixels(&self) -> &Pixels {
        &self.bit_buffer
    }

    pub fn lit_count(&self) -> usize {
        self.bit_buffer.iter().flatten().filter(|&&p| p).count()
    }

    /// Whether the grid changed since the last call.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}
