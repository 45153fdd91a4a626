use crate::{boundary::enforce_bounds, Boundary, CellExecutor, Field2, Grid2};

/// Implicit diffusion weight `a = dt · rate · (N - 2)²`.
pub fn diffusion_coefficient(grid: Grid2, rate: f32, dt: f32) -> f32 {
    let n = grid.interior_size() as f32;
    dt * rate * n * n
}

pub fn diffuse(
    source: &Field2,
    a: f32,
    iterations: usize,
    boundary: Boundary,
    exec: &dyn CellExecutor,
) -> Field2 {
    let mut out = source.clone();
    let mut scratch = source.clone();
    diffuse_into(&mut out, &mut scratch, source, a, iterations, boundary, exec);
    out
}

/// Solves `(I - a·L) x = source` with a fixed number of Jacobi sweeps,
/// starting from `source` as the initial guess. Each sweep reads only the
/// previous sweep's values and the border is refreshed after every sweep.
/// Convergence is not checked.
pub fn diffuse_into(
    out: &mut Field2,
    scratch: &mut Field2,
    source: &Field2,
    a: f32,
    iterations: usize,
    boundary: Boundary,
    exec: &dyn CellExecutor,
) {
    out.assert_same_grid(source);
    scratch.assert_same_grid(source);
    out.clone_from(source);
    if a == 0.0 {
        enforce_bounds(out, boundary);
        return;
    }
    let recip = 1.0 / (1.0 + 4.0 * a);
    for _ in 0..iterations {
        {
            let current: &Field2 = out;
            exec.fill_interior(scratch, &|x, y| {
                let neighbors = current.get(x - 1, y)
                    + current.get(x + 1, y)
                    + current.get(x, y - 1)
                    + current.get(x, y + 1);
                (source.get(x, y) + a * neighbors) * recip
            });
        }
        enforce_bounds(scratch, boundary);
        std::mem::swap(out, scratch);
    }
}
