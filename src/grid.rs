use std::ops::RangeInclusive;

/// Smallest grid that still has one interior cell inside the border.
pub const MIN_GRID_SIZE: usize = 3;

/// Square `size`×`size` index space. Row 0 and column 0 (and the last row and
/// column) form the border; everything else is interior.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Grid2 {
    size: usize,
}

impl Grid2 {
    pub fn new(size: usize) -> Self {
        assert!(
            size >= MIN_GRID_SIZE,
            "grid size must be >= {MIN_GRID_SIZE}, got {size}"
        );
        Self { size }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Total cell count, border included.
    pub fn cell_count(&self) -> usize {
        self.size * self.size
    }

    /// Number of interior cells along one axis (`N - 2`).
    pub fn interior_size(&self) -> usize {
        self.size - 2
    }

    pub fn interior(&self) -> RangeInclusive<usize> {
        1..=self.size - 2
    }

    pub fn idx(&self, x: usize, y: usize) -> usize {
        assert!(
            x < self.size && y < self.size,
            "cell ({x}, {y}) out of bounds for {0}x{0} grid",
            self.size
        );
        y * self.size + x
    }

    pub fn is_interior(&self, x: usize, y: usize) -> bool {
        self.interior().contains(&x) && self.interior().contains(&y)
    }

    /// Upper bound of the semi-Lagrangian sample clamp, `(N - 2) + 0.5`.
    pub fn sample_max(&self) -> f32 {
        self.interior_size() as f32 + 0.5
    }
}
