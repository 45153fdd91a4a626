use crate::{Field2, VecField2};

/// Wall condition written into the one-cell border of a field.
///
/// Each border cell takes its one-cell-inset neighbour multiplied by a scale:
/// `-1` reflects (no-penetration for a velocity component), `+1` copies
/// (zero normal gradient, used for pressure and density).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Boundary {
    /// Same scale on all four edges.
    Uniform(f32),
    /// Horizontal velocity: negated on the left/right walls, copied on the
    /// bottom/top walls.
    VelocityX,
    /// Vertical velocity: negated on the bottom/top walls, copied on the
    /// left/right walls.
    VelocityY,
}

impl Boundary {
    pub const NEUMANN: Self = Self::Uniform(1.0);
    pub const REFLECT: Self = Self::Uniform(-1.0);

    /// `(left/right scale, bottom/top scale)`.
    pub fn edge_scales(self) -> (f32, f32) {
        match self {
            Boundary::Uniform(scale) => (scale, scale),
            Boundary::VelocityX => (-1.0, 1.0),
            Boundary::VelocityY => (1.0, -1.0),
        }
    }
}

/// Fills the border of `field` from its interior. Edges are written first,
/// then each corner becomes the mean of its two edge neighbours.
pub fn enforce_bounds(field: &mut Field2, boundary: Boundary) {
    let n = field.size();
    let last = n - 1;
    let (side, cap) = boundary.edge_scales();
    for i in 1..last {
        field.set(0, i, side * field.get(1, i));
        field.set(last, i, side * field.get(last - 1, i));
        field.set(i, 0, cap * field.get(i, 1));
        field.set(i, last, cap * field.get(i, last - 1));
    }
    field.set(0, 0, 0.5 * (field.get(1, 0) + field.get(0, 1)));
    field.set(0, last, 0.5 * (field.get(1, last) + field.get(0, last - 1)));
    field.set(last, 0, 0.5 * (field.get(last - 1, 0) + field.get(last, 1)));
    field.set(
        last,
        last,
        0.5 * (field.get(last - 1, last) + field.get(last, last - 1)),
    );
}

pub fn enforce_velocity_bounds(velocity: &mut VecField2) {
    let (u, v) = velocity.components_mut();
    enforce_bounds(u, Boundary::VelocityX);
    enforce_bounds(v, Boundary::VelocityY);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Grid2, Vec2};

    fn assert_close(a: f32, b: f32, tol: f32) {
        assert!(
            (a - b).abs() <= tol,
            "expected {a} to be within {tol} of {b}"
        );
    }

    fn ramp(n: usize) -> Field2 {
        Field2::from_fn(Grid2::new(n), |x, y| (x * 7 + y * 3) as f32 + 1.0)
    }

    #[test]
    fn reflect_negates_edges_and_averages_corners() {
        let n = 6;
        let mut field = ramp(n);
        enforce_bounds(&mut field, Boundary::REFLECT);
        for y in 1..n - 1 {
            assert_close(field.get(0, y), -field.get(1, y), 1e-6);
            assert_close(field.get(n - 1, y), -field.get(n - 2, y), 1e-6);
        }
        for x in 1..n - 1 {
            assert_close(field.get(x, 0), -field.get(x, 1), 1e-6);
            assert_close(field.get(x, n - 1), -field.get(x, n - 2), 1e-6);
        }
        assert_close(
            field.get(0, 0),
            0.5 * (field.get(1, 0) + field.get(0, 1)),
            1e-6,
        );
        assert_close(
            field.get(n - 1, n - 1),
            0.5 * (field.get(n - 2, n - 1) + field.get(n - 1, n - 2)),
            1e-6,
        );
    }

    #[test]
    fn neumann_copies_edges() {
        let mut field = ramp(5);
        enforce_bounds(&mut field, Boundary::NEUMANN);
        assert_close(field.get(0, 2), field.get(1, 2), 1e-6);
        assert_close(field.get(2, 4), field.get(2, 3), 1e-6);
    }

    #[test]
    fn enforce_bounds_leaves_interior() {
        let mut field = ramp(5);
        let before = field.clone();
        enforce_bounds(&mut field, Boundary::REFLECT);
        for y in 1..4 {
            for x in 1..4 {
                assert_eq!(field.get(x, y), before.get(x, y));
            }
        }
    }

    #[test]
    fn velocity_bounds_block_normal_flow() {
        let grid = Grid2::new(5);
        let mut velocity = VecField2::new(grid, Vec2::new(1.0, 2.0));
        enforce_velocity_bounds(&mut velocity);
        assert_close(velocity.u().get(0, 2), -1.0, 1e-6);
        assert_close(velocity.u().get(2, 0), 1.0, 1e-6);
        assert_close(velocity.v().get(2, 0), -2.0, 1e-6);
        assert_close(velocity.v().get(0, 2), 2.0, 1e-6);
        // Walls cancel at the corners.
        assert_close(velocity.u().get(0, 0), 0.0, 1e-6);
    }
}
