/// Color tag with channels in `0..=255`, used for brush colors and tracers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const WHITE: Self = Self::new(255.0, 255.0, 255.0);
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub fn channels(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    pub fn from_channels(channels: [f32; 3]) -> Self {
        Self::new(channels[0], channels[1], channels[2])
    }

    /// Channels normalised to `0..=1`.
    pub fn unit(self) -> [f32; 3] {
        self.channels().map(|c| c / 255.0)
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Self::WHITE
    }
}
