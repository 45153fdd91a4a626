use crate::{boundary::enforce_bounds, Boundary, CellExecutor, Field2, Grid2, VecField2};

/// Backtrace scale `dt · (N - 2)`: velocities are measured in domain units
/// per second, positions in cells.
pub fn backtrace_scale(grid: Grid2, dt: f32) -> f32 {
    dt * grid.interior_size() as f32
}

pub fn advect(
    field: &Field2,
    velocity: &VecField2,
    dt: f32,
    boundary: Boundary,
    exec: &dyn CellExecutor,
) -> Field2 {
    let mut out = field.clone();
    advect_into(&mut out, field, velocity, dt, boundary, exec);
    out
}

/// Semi-Lagrangian transport of `field` by `velocity`: every interior cell
/// traces back along its own velocity and takes the bilinear sample of
/// `field` found there. `field` and `velocity` are only read.
pub fn advect_into(
    out: &mut Field2,
    field: &Field2,
    velocity: &VecField2,
    dt: f32,
    boundary: Boundary,
    exec: &dyn CellExecutor,
) {
    out.assert_same_grid(field);
    let dt0 = backtrace_scale(field.grid(), dt);
    let u = velocity.u();
    let v = velocity.v();
    exec.fill_interior(out, &|x, y| {
        let back_x = x as f32 - dt0 * u.get(x, y);
        let back_y = y as f32 - dt0 * v.get(x, y);
        field.sample_bilinear(back_x, back_y)
    });
    enforce_bounds(out, boundary);
}

/// Self-advection: both components are transported by the velocity as it was
/// before this call. `prev` receives that snapshot.
pub fn advect_velocity(
    velocity: &mut VecField2,
    prev: &mut VecField2,
    dt: f32,
    exec: &dyn CellExecutor,
) {
    prev.clone_from(velocity);
    let (u, v) = velocity.components_mut();
    advect_into(u, prev.u(), prev, dt, Boundary::VelocityX, exec);
    advect_into(v, prev.v(), prev, dt, Boundary::VelocityY, exec);
}
