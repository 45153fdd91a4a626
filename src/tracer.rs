use crate::{advect::backtrace_scale, Grid2, Rgb, Vec2, VecField2};
use rayon::prelude::*;
use std::sync::OnceLock;

const PAR_THRESHOLD_DEFAULT: usize = 32_768;
const PAR_MIN_WORK_PER_THREAD: usize = 2048;

fn tracer_parallel_threshold() -> usize {
    static THRESHOLD: OnceLock<usize> = OnceLock::new();
    *THRESHOLD.get_or_init(|| {
        std::env::var("SIM_PAR_THRESHOLD")
            .ok()
            .and_then(|value| value.parse::<usize>().ok())
            .filter(|value| *value > 0)
            .unwrap_or(PAR_THRESHOLD_DEFAULT)
    })
}

fn tracer_should_parallel(len: usize) -> bool {
    if len < tracer_parallel_threshold() {
        return false;
    }
    let threads = rayon::current_num_threads().max(1);
    len / threads >= PAR_MIN_WORK_PER_THREAD
}

/// Passive marker carried by the flow. Never feeds back into the fields.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tracer {
    pub pos: Vec2,
    pub color: Rgb,
}

impl Tracer {
    pub fn new(pos: Vec2, color: Rgb) -> Self {
        Self { pos, color }
    }

    fn advance(&mut self, velocity: &VecField2, dt0: f32, max: f32) {
        let v = velocity.sample_bilinear(self.pos);
        self.pos = self.pos.add(v.scale(dt0)).clamp(0.0, max);
    }
}

/// Tracers in insertion order.
#[derive(Clone, Debug, Default)]
pub struct TracerSet {
    tracers: Vec<Tracer>,
}

impl TracerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tracers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracers.is_empty()
    }

    pub fn as_slice(&self) -> &[Tracer] {
        &self.tracers
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Tracer> {
        self.tracers.iter()
    }

    pub fn clear(&mut self) {
        self.tracers.clear();
    }

    /// Appends a tracer if `pos` lies in `[0, N-1]` on both axes.
    pub fn add(&mut self, grid: Grid2, pos: Vec2, color: Rgb) -> bool {
        let max = (grid.size() - 1) as f32;
        let inside = pos.is_finite() && pos.x >= 0.0 && pos.y >= 0.0 && pos.x <= max && pos.y <= max;
        if !inside {
            log::trace!("tracer at ({}, {}) rejected", pos.x, pos.y);
            return false;
        }
        self.tracers.push(Tracer::new(pos, color));
        true
    }

    /// Moves every tracer along the interpolated velocity at its exact
    /// position, then clamps it into the grid.
    pub fn advance(&mut self, velocity: &VecField2, dt: f32) {
        let grid = velocity.grid();
        let dt0 = backtrace_scale(grid, dt);
        let max = (grid.size() - 1) as f32;
        if tracer_should_parallel(self.tracers.len()) {
            self.tracers
                .par_iter_mut()
                .for_each(|tracer| tracer.advance(velocity, dt0, max));
        } else {
            for tracer in &mut self.tracers {
                tracer.advance(velocity, dt0, max);
            }
        }
    }

    /// Clamps every tracer into a grid of a different size.
    pub fn clamp_to(&mut self, grid: Grid2) {
        let max = (grid.size() - 1) as f32;
        for tracer in &mut self.tracers {
            tracer.pos = tracer.pos.clamp(0.0, max);
        }
    }

    /// One slot per cell holding the index of the last tracer whose floored
    /// position falls in that cell.
    pub fn cell_map(&self, grid: Grid2) -> Vec<Option<usize>> {
        let mut map = vec![None; grid.cell_count()];
        let max = grid.size() - 1;
        for (i, tracer) in self.tracers.iter().enumerate() {
            let x = (tracer.pos.x.max(0.0) as usize).min(max);
            let y = (tracer.pos.y.max(0.0) as usize).min(max);
            map[grid.idx(x, y)] = Some(i);
        }
        map
    }
}
