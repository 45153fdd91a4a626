#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    pub fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }

    pub fn scale(self, s: f32) -> Self {
        Self::new(self.x * s, self.y * s)
    }

    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn clamp(self, min: f32, max: f32) -> Self {
        Self::new(self.x.clamp(min, max), self.y.clamp(min, max))
    }

    /// Shrinks the vector to `max_len` if it is longer, keeping its direction.
    pub fn clamp_length(self, max_len: f32) -> Self {
        let len = self.length();
        if len > max_len && len > 0.0 {
            self.scale(max_len / len)
        } else {
            self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_length_keeps_direction() {
        let v = Vec2::new(3.0, 4.0).clamp_length(2.5);
        assert!((v.length() - 2.5).abs() < 1e-6);
        assert!((v.x / v.y - 0.75).abs() < 1e-6);
    }

    #[test]
    fn clamp_length_leaves_short_vectors() {
        let v = Vec2::new(0.1, -0.2);
        assert_eq!(v.clamp_length(1.0), v);
    }
}
