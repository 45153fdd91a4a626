//! Incompressible 2D flow on a square grid using the semi-Lagrangian
//! "stable fluids" method.
//!
//! [`FluidState`] owns the velocity field, three density channels and a set
//! of passive tracers. Each [`FluidState::update`] diffuses and projects the
//! velocity, advects it through itself, projects again, then diffuses and
//! advects the density and moves the tracers.

pub mod advect;
pub mod boundary;
mod color;
pub mod diffuse;
mod error;
mod exec;
mod field;
mod fluid;
mod grid;
mod params;
pub mod project;
pub mod source;
mod tracer;
mod vec2;
mod vec_field;

pub use boundary::{enforce_bounds, enforce_velocity_bounds, Boundary};
pub use color::Rgb;
pub use error::ConfigError;
pub use exec::{CellExecutor, CpuExecutor};
pub use field::Field2;
pub use fluid::{FluidSnapshot, FluidState, DENSITY_CHANNELS};
pub use grid::{Grid2, MIN_GRID_SIZE};
pub use params::{FluidParams, InjectionLimits};
pub use tracer::{Tracer, TracerSet};
pub use vec2::Vec2;
pub use vec_field::VecField2;
