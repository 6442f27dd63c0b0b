// Separately:
// CPU: 700 times per second
// Display: 60 times per second
// Timer: 60 times per second
pub const DEFAULT_INSTRUCTIONS_PER_SECOND: u32 = 700;
pub const DEFAULT_FRAME_RATE: u32 = 60;
pub const DEFAULT_SCALE: u8 = 16;

/// Historical interpreter behaviors some older ROMs rely on. All off means
/// the canonical instruction semantics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Quirks {
    /// 8XY6/8XYE shift VY into VX instead of shifting VX in place.
    pub shift_uses_vy: bool,
    /// FX55/FX65 leave I pointing past the last register touched.
    pub load_store_increments_index: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub instructions_per_second: u32,
    pub frame_rate: u32,
    pub scale: u8,
    pub seed: Option<u64>,
    pub quirks: Quirks,
}

impl Config {
    pub fn cycles_per_frame(&self) -> u32 {
        (self.instructions_per_second / self.frame_rate.max(1)).max(1)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            instructions_per_second: DEFAULT_INSTRUCTIONS_PER_SECOND,
            frame_rate: DEFAULT_FRAME_RATE,
            scale: DEFAULT_SCALE,
            seed: None,
            quirks: Quirks::default(),
        }
    }
}
