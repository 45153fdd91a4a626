use crate::grid::Grid2;

/// Scalar value per cell of a square grid (density channel, pressure,
/// divergence).
#[derive(Clone, Debug, PartialEq)]
pub struct Field2 {
    grid: Grid2,
    data: Vec<f32>,
}

impl Field2 {
    pub fn new(grid: Grid2, fill: f32) -> Self {
        let data = vec![fill; grid.cell_count()];
        Self { grid, data }
    }

    pub fn from_fn(grid: Grid2, f: impl Fn(usize, usize) -> f32) -> Self {
        let size = grid.size();
        let data = (0..grid.cell_count())
            .map(|i| {
                let x = i % size;
                let y = i / size;
                f(x, y)
            })
            .collect();
        Self { grid, data }
    }

    pub fn grid(&self) -> Grid2 {
        self.grid
    }

    pub fn size(&self) -> usize {
        self.grid.size()
    }

    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.data[self.grid.idx(x, y)]
    }

    pub fn set(&mut self, x: usize, y: usize, value: f32) {
        let i = self.grid.idx(x, y);
        self.data[i] = value;
    }

    pub fn add(&mut self, x: usize, y: usize, amount: f32) {
        let i = self.grid.idx(x, y);
        self.data[i] += amount;
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    pub fn fill(&mut self, value: f32) {
        self.data.fill(value);
    }

    pub fn update_in_place(&mut self, f: impl Fn(f32) -> f32) {
        for value in &mut self.data {
            *value = f(*value);
        }
    }

    /// Bilinear sample at fractional grid coordinates. The position is
    /// clamped to `[0.5, (N - 2) + 0.5]` on both axes so the four taps always
    /// lie inside the array.
    pub fn sample_bilinear(&self, x: f32, y: f32) -> f32 {
        let max = self.grid.sample_max();
        let x = x.clamp(0.5, max);
        let y = y.clamp(0.5, max);
        let i0 = x.floor() as usize;
        let j0 = y.floor() as usize;
        let i1 = i0 + 1;
        let j1 = j0 + 1;
        let s1 = x - i0 as f32;
        let s0 = 1.0 - s1;
        let t1 = y - j0 as f32;
        let t0 = 1.0 - t1;
        s0 * (t0 * self.get(i0, j0) + t1 * self.get(i0, j1))
            + s1 * (t0 * self.get(i1, j0) + t1 * self.get(i1, j1))
    }

    /// Copies the overlapping top-left square of `other` into `self`.
    pub fn copy_overlap_from(&mut self, other: &Self) {
        let fit = self.size().min(other.size());
        for y in 0..fit {
            for x in 0..fit {
                self.set(x, y, other.get(x, y));
            }
        }
    }

    pub fn sum(&self) -> f32 {
        self.data.iter().sum()
    }

    pub fn abs_max(&self) -> f32 {
        self.data.iter().fold(0.0_f32, |acc, value| acc.max(value.abs()))
    }

    pub fn min_max(&self) -> (f32, f32) {
        let mut iter = self.data.iter().filter(|value| value.is_finite());
        let Some(first) = iter.next() else {
            return (0.0, 0.0);
        };
        let mut min_value = *first;
        let mut max_value = *first;
        for value in iter {
            if *value < min_value {
                min_value = *value;
            }
            if *value > max_value {
                max_value = *value;
            }
        }
        (min_value, max_value)
    }

    pub fn assert_same_grid(&self, other: &Self) {
        assert_eq!(self.grid, other.grid, "field grid mismatch");
    }
}
