use crate::{Field2, Grid2, Vec2};

/// Co-located two-component vector per cell (the velocity field).
#[derive(Clone, Debug, PartialEq)]
pub struct VecField2 {
    u: Field2,
    v: Field2,
}

impl VecField2 {
    pub fn new(grid: Grid2, fill: Vec2) -> Self {
        Self {
            u: Field2::new(grid, fill.x),
            v: Field2::new(grid, fill.y),
        }
    }

    pub fn from_fn(grid: Grid2, f: impl Fn(usize, usize) -> Vec2) -> Self {
        let u = Field2::from_fn(grid, |x, y| f(x, y).x);
        let v = Field2::from_fn(grid, |x, y| f(x, y).y);
        Self { u, v }
    }

    pub fn grid(&self) -> Grid2 {
        self.u.grid()
    }

    pub fn get(&self, x: usize, y: usize) -> Vec2 {
        Vec2::new(self.u.get(x, y), self.v.get(x, y))
    }

    pub fn set(&mut self, x: usize, y: usize, value: Vec2) {
        self.u.set(x, y, value.x);
        self.v.set(x, y, value.y);
    }

    pub fn add(&mut self, x: usize, y: usize, amount: Vec2) {
        self.u.add(x, y, amount.x);
        self.v.add(x, y, amount.y);
    }

    pub fn u(&self) -> &Field2 {
        &self.u
    }

    pub fn v(&self) -> &Field2 {
        &self.v
    }

    pub fn u_mut(&mut self) -> &mut Field2 {
        &mut self.u
    }

    pub fn v_mut(&mut self) -> &mut Field2 {
        &mut self.v
    }

    pub fn components_mut(&mut self) -> (&mut Field2, &mut Field2) {
        (&mut self.u, &mut self.v)
    }

    pub fn fill(&mut self, value: Vec2) {
        self.u.fill(value.x);
        self.v.fill(value.y);
    }

    /// Bilinear sample at fractional grid coordinates, clamped like
    /// [`Field2::sample_bilinear`].
    pub fn sample_bilinear(&self, pos: Vec2) -> Vec2 {
        Vec2::new(
            self.u.sample_bilinear(pos.x, pos.y),
            self.v.sample_bilinear(pos.x, pos.y),
        )
    }

    pub fn copy_overlap_from(&mut self, other: &Self) {
        self.u.copy_overlap_from(&other.u);
        self.v.copy_overlap_from(&other.v);
    }

    pub fn max_speed(&self) -> f32 {
        self.u
            .as_slice()
            .iter()
            .zip(self.v.as_slice())
            .map(|(u, v)| (u * u + v * v).sqrt())
            .fold(0.0_f32, f32::max)
    }
}
