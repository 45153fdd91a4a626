use crate::Field2;
use rayon::prelude::*;
use std::sync::OnceLock;

const PAR_THRESHOLD_DEFAULT: usize = 65_536;
const PAR_MIN_ROWS_PER_THREAD: usize = 8;

fn parallel_threshold() -> usize {
    static THRESHOLD: OnceLock<usize> = OnceLock::new();
    *THRESHOLD.get_or_init(|| {
        std::env::var("SIM_PAR_THRESHOLD")
            .ok()
            .and_then(|value| value.parse::<usize>().ok())
            .filter(|value| *value > 0)
            .unwrap_or(PAR_THRESHOLD_DEFAULT)
    })
}

/// Runs a per-cell kernel over every interior cell of a field.
///
/// The kernel may only read fields other than `out`; every cell of a pass is
/// therefore independent and a backend is free to evaluate them in any order.
/// Border cells of `out` are left untouched.
pub trait CellExecutor {
    fn fill_interior(&self, out: &mut Field2, f: &(dyn Fn(usize, usize) -> f32 + Sync));
}

/// Row-wise CPU backend that hands large grids to rayon.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CpuExecutor {
    parallel_threshold: usize,
}

impl CpuExecutor {
    pub fn serial() -> Self {
        Self {
            parallel_threshold: usize::MAX,
        }
    }

    pub fn parallel() -> Self {
        Self {
            parallel_threshold: 0,
        }
    }

    pub fn with_threshold(parallel_threshold: usize) -> Self {
        Self { parallel_threshold }
    }

    fn should_parallel(&self, cells: usize, rows: usize) -> bool {
        if self.parallel_threshold == 0 {
            return true;
        }
        if cells < self.parallel_threshold {
            return false;
        }
        let threads = rayon::current_num_threads().max(1);
        rows / threads >= PAR_MIN_ROWS_PER_THREAD
    }
}

impl Default for CpuExecutor {
    fn default() -> Self {
        Self::with_threshold(parallel_threshold())
    }
}

impl CellExecutor for CpuExecutor {
    fn fill_interior(&self, out: &mut Field2, f: &(dyn Fn(usize, usize) -> f32 + Sync)) {
        let grid = out.grid();
        let size = grid.size();
        let last = size - 1;
        let fill_row = |y: usize, row: &mut [f32]| {
            if y == 0 || y == last {
                return;
            }
            for (x, value) in row.iter_mut().enumerate().take(last).skip(1) {
                *value = f(x, y);
            }
        };
        if self.should_parallel(grid.cell_count(), size) {
            out.as_mut_slice()
                .par_chunks_mut(size)
                .enumerate()
                .for_each(|(y, row)| fill_row(y, row));
        } else {
            for (y, row) in out.as_mut_slice().chunks_mut(size).enumerate() {
                fill_row(y, row);
            }
        }
    }
}
