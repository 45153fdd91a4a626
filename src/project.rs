use crate::{
    boundary::{enforce_bounds, enforce_velocity_bounds},
    Boundary, CellExecutor, Field2, VecField2,
};

/// Discrete divergence term at one interior cell,
/// `-0.5 · ((u[x+1] - u[x-1]) + (v[y+1] - v[y-1])) / N`.
pub fn divergence_at(velocity: &VecField2, x: usize, y: usize) -> f32 {
    let n = velocity.grid().size() as f32;
    let u = velocity.u();
    let v = velocity.v();
    -0.5 * ((u.get(x + 1, y) - u.get(x - 1, y)) + (v.get(x, y + 1) - v.get(x, y - 1))) / n
}

pub fn divergence_into(out: &mut Field2, velocity: &VecField2, exec: &dyn CellExecutor) {
    exec.fill_interior(out, &|x, y| divergence_at(velocity, x, y));
    enforce_bounds(out, Boundary::NEUMANN);
}

/// Largest divergence magnitude over the interior.
pub fn max_divergence(velocity: &VecField2) -> f32 {
    let grid = velocity.grid();
    let mut max = 0.0_f32;
    for y in grid.interior() {
        for x in grid.interior() {
            max = max.max(divergence_at(velocity, x, y).abs());
        }
    }
    max
}

/// Jacobi relaxation of `L p = div` from a zero initial guess. The border is
/// refreshed with the Neumann condition after every sweep.
pub fn solve_pressure_into(
    pressure: &mut Field2,
    scratch: &mut Field2,
    divergence: &Field2,
    iterations: usize,
    exec: &dyn CellExecutor,
) {
    pressure.fill(0.0);
    scratch.fill(0.0);
    for _ in 0..iterations {
        {
            let current: &Field2 = pressure;
            exec.fill_interior(scratch, &|x, y| {
                let neighbors = current.get(x - 1, y)
                    + current.get(x + 1, y)
                    + current.get(x, y - 1)
                    + current.get(x, y + 1);
                (divergence.get(x, y) + neighbors) * 0.25
            });
        }
        enforce_bounds(scratch, Boundary::NEUMANN);
        std::mem::swap(pressure, scratch);
    }
}

/// Subtracts the pressure gradient from the velocity interior and refreshes
/// the wall condition. `scratch` receives a copy of each component so the
/// update never reads a cell it has already written.
pub fn subtract_gradient(
    velocity: &mut VecField2,
    pressure: &Field2,
    scratch: &mut Field2,
    exec: &dyn CellExecutor,
) {
    let half_n = 0.5 * pressure.size() as f32;
    scratch.clone_from(velocity.u());
    {
        let prev: &Field2 = scratch;
        exec.fill_interior(velocity.u_mut(), &|x, y| {
            prev.get(x, y) - half_n * (pressure.get(x + 1, y) - pressure.get(x - 1, y))
        });
    }
    scratch.clone_from(velocity.v());
    {
        let prev: &Field2 = scratch;
        exec.fill_interior(velocity.v_mut(), &|x, y| {
            prev.get(x, y) - half_n * (pressure.get(x, y + 1) - pressure.get(x, y - 1))
        });
    }
    enforce_velocity_bounds(velocity);
}

/// Removes the divergent part of `velocity`: divergence, pressure solve,
/// gradient subtraction. `pressure` and `divergence` are left holding the
/// values of this pass.
pub fn project(
    velocity: &mut VecField2,
    pressure: &mut Field2,
    divergence: &mut Field2,
    scratch: &mut Field2,
    iterations: usize,
    exec: &dyn CellExecutor,
) {
    divergence_into(divergence, velocity, exec);
    solve_pressure_into(pressure, scratch, divergence, iterations, exec);
    subtract_gradient(velocity, pressure, scratch, exec);
}
