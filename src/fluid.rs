use crate::{
    advect::{advect_into, advect_velocity},
    boundary::{enforce_bounds, enforce_velocity_bounds},
    diffuse::{diffuse_into, diffusion_coefficient},
    params::{validate_diffusion, validate_dt, validate_iterations, validate_size, validate_viscosity},
    project::{max_divergence, project},
    source, Boundary, CellExecutor, ConfigError, CpuExecutor, Field2, FluidParams, Grid2,
    InjectionLimits, Rgb, Tracer, TracerSet, Vec2, VecField2,
};

/// Number of density channels (red, green, blue).
pub const DENSITY_CHANNELS: usize = 3;

/// Owned copy of the fields a renderer samples.
#[derive(Clone, Debug)]
pub struct FluidSnapshot {
    pub density: [Field2; DENSITY_CHANNELS],
    pub velocity: VecField2,
    pub tracers: Vec<Tracer>,
}

/// Complete solver state: fields, scratch buffers, tracers and parameters.
///
/// `update` advances one tick. Everything between ticks (brushes, setters,
/// accessors) goes through `&mut self` or `&self`, so a tick can never overlap
/// another tick or a reader.
#[derive(Clone, Debug)]
pub struct FluidState<E = CpuExecutor> {
    params: FluidParams,
    grid: Grid2,
    velocity: VecField2,
    velocity_prev: VecField2,
    density: [Field2; DENSITY_CHANNELS],
    density_prev: Field2,
    pressure: Field2,
    divergence: Field2,
    scratch: Field2,
    tracers: TracerSet,
    velocity_frozen: bool,
    ticks: u64,
    executor: E,
}

impl FluidState<CpuExecutor> {
    pub fn new(params: FluidParams) -> Result<Self, ConfigError> {
        Self::with_executor(params, CpuExecutor::default())
    }
}

impl<E: CellExecutor> FluidState<E> {
    pub fn with_executor(params: FluidParams, executor: E) -> Result<Self, ConfigError> {
        params.validate()?;
        let grid = Grid2::new(params.size);
        log::debug!(
            "fluid: new {0}x{0} grid, dt={1} diffusion={2} viscosity={3} iterations={4}",
            params.size,
            params.dt,
            params.diffusion,
            params.viscosity,
            params.iterations
        );
        Ok(Self {
            params,
            grid,
            velocity: VecField2::new(grid, Vec2::zero()),
            velocity_prev: VecField2::new(grid, Vec2::zero()),
            density: std::array::from_fn(|_| Field2::new(grid, 0.0)),
            density_prev: Field2::new(grid, 0.0),
            pressure: Field2::new(grid, 0.0),
            divergence: Field2::new(grid, 0.0),
            scratch: Field2::new(grid, 0.0),
            tracers: TracerSet::new(),
            velocity_frozen: false,
            ticks: 0,
            executor,
        })
    }

    /// Advances the simulation by one tick of `dt`.
    ///
    /// Velocity (unless frozen): diffuse, project, self-advect, project.
    /// Density, per channel: diffuse, advect. Tracers move last.
    pub fn update(&mut self) {
        if !self.velocity_frozen {
            self.step_velocity();
        }
        self.step_density();
        self.tracers.advance(&self.velocity, self.params.dt);
        self.ticks += 1;
        log::trace!(
            "fluid: tick {} max_speed={:.4} max_div={:.4e}",
            self.ticks,
            self.velocity.max_speed(),
            max_divergence(&self.velocity)
        );
    }

    fn step_velocity(&mut self) {
        let exec: &dyn CellExecutor = &self.executor;
        let FluidParams {
            dt,
            viscosity,
            iterations,
            ..
        } = self.params;
        let a = diffusion_coefficient(self.grid, viscosity, dt);
        self.velocity_prev.clone_from(&self.velocity);
        diffuse_into(
            self.velocity.u_mut(),
            &mut self.scratch,
            self.velocity_prev.u(),
            a,
            iterations,
            Boundary::VelocityX,
            exec,
        );
        diffuse_into(
            self.velocity.v_mut(),
            &mut self.scratch,
            self.velocity_prev.v(),
            a,
            iterations,
            Boundary::VelocityY,
            exec,
        );
        project(
            &mut self.velocity,
            &mut self.pressure,
            &mut self.divergence,
            &mut self.scratch,
            iterations,
            exec,
        );
        advect_velocity(&mut self.velocity, &mut self.velocity_prev, dt, exec);
        project(
            &mut self.velocity,
            &mut self.pressure,
            &mut self.divergence,
            &mut self.scratch,
            iterations,
            exec,
        );
    }

    fn step_density(&mut self) {
        let exec: &dyn CellExecutor = &self.executor;
        let FluidParams {
            dt,
            diffusion,
            iterations,
            ..
        } = self.params;
        let a = diffusion_coefficient(self.grid, diffusion, dt);
        for channel in self.density.iter_mut() {
            self.density_prev.clone_from(channel);
            diffuse_into(
                channel,
                &mut self.scratch,
                &self.density_prev,
                a,
                iterations,
                Boundary::NEUMANN,
                exec,
            );
            self.density_prev.clone_from(channel);
            advect_into(
                channel,
                &self.density_prev,
                &self.velocity,
                dt,
                Boundary::NEUMANN,
                exec,
            );
        }
    }

    /// Zeroes every field and drops all tracers. Parameters, grid size and
    /// the freeze flag are kept.
    pub fn clear(&mut self) {
        self.velocity.fill(Vec2::zero());
        self.velocity_prev.fill(Vec2::zero());
        for channel in &mut self.density {
            channel.fill(0.0);
        }
        self.density_prev.fill(0.0);
        self.pressure.fill(0.0);
        self.divergence.fill(0.0);
        self.scratch.fill(0.0);
        self.tracers.clear();
        self.ticks = 0;
        log::debug!("fluid: cleared {0}x{0} grid", self.grid.size());
    }

    /// Changes the grid size, keeping the overlapping top-left square of the
    /// velocity and density fields and pulling tracers inside the new bounds.
    pub fn resize(&mut self, size: usize) -> Result<(), ConfigError> {
        validate_size(size)?;
        if size == self.grid.size() {
            return Ok(());
        }
        let old = self.grid.size();
        let grid = Grid2::new(size);
        let mut velocity = VecField2::new(grid, Vec2::zero());
        velocity.copy_overlap_from(&self.velocity);
        enforce_velocity_bounds(&mut velocity);
        let density: [Field2; DENSITY_CHANNELS] = std::array::from_fn(|c| {
            let mut channel = Field2::new(grid, 0.0);
            channel.copy_overlap_from(&self.density[c]);
            enforce_bounds(&mut channel, Boundary::NEUMANN);
            channel
        });
        self.grid = grid;
        self.params.size = size;
        self.velocity = velocity;
        self.velocity_prev = VecField2::new(grid, Vec2::zero());
        self.density = density;
        self.density_prev = Field2::new(grid, 0.0);
        self.pressure = Field2::new(grid, 0.0);
        self.divergence = Field2::new(grid, 0.0);
        self.scratch = Field2::new(grid, 0.0);
        self.tracers.clamp_to(grid);
        log::debug!("fluid: resized {old} -> {size}");
        Ok(())
    }

    pub fn freeze_velocity(&mut self) {
        self.velocity_frozen = true;
        log::debug!("fluid: velocity frozen");
    }

    pub fn unfreeze_velocity(&mut self) {
        self.velocity_frozen = false;
        log::debug!("fluid: velocity unfrozen");
    }

    pub fn is_velocity_frozen(&self) -> bool {
        self.velocity_frozen
    }

    /// Disc brush adding `amount · color / 255` to the density channels.
    /// Positions within one cell of the border are ignored.
    pub fn add_density(&mut self, pos: Vec2, amount: f32, color: Rgb, radius: f32) -> bool {
        source::add_density(
            &mut self.density,
            pos,
            amount,
            color,
            radius,
            self.params.limits,
        )
    }

    /// Disc brush adding `amount` to the velocity. Positions within one cell
    /// of the border are ignored.
    pub fn add_velocity(&mut self, pos: Vec2, amount: Vec2, radius: f32) -> bool {
        source::add_velocity(&mut self.velocity, pos, amount, radius, self.params.limits)
    }

    pub fn add_tracer(&mut self, pos: Vec2, color: Rgb) -> bool {
        self.tracers.add(self.grid, pos, color)
    }

    /// Lowers every density cell by an amount proportional to the sampled
    /// mean density, then clamps into `[min, max]`.
    ///
    /// Swapped bounds are reordered and a NaN bound leaves that side open.
    pub fn fade_density(&mut self, increment: f32, min: f32, max: f32) {
        let (min, max) = if min > max { (max, min) } else { (min, max) };
        let increment = if increment.is_finite() { increment } else { 0.0 };
        let n = self.grid.size();
        let stride = (n / 60).max(1);
        let mut total = 0.0;
        let mut samples = 0usize;
        for y in (0..n).step_by(stride) {
            for x in (0..n).step_by(stride) {
                for channel in &self.density {
                    total += channel.get(x, y);
                    samples += 1;
                }
            }
        }
        let mean = total / samples.max(1) as f32;
        let step = increment * mean * (10.0 / 255.0);
        for channel in &mut self.density {
            channel.update_in_place(|value| (value - step).max(min).min(max));
        }
    }

    pub fn set_dt(&mut self, dt: f32) -> Result<(), ConfigError> {
        validate_dt(dt)?;
        self.params.dt = dt;
        log::debug!("fluid: dt={dt}");
        Ok(())
    }

    pub fn set_diffusion(&mut self, diffusion: f32) -> Result<(), ConfigError> {
        validate_diffusion(diffusion)?;
        self.params.diffusion = diffusion;
        log::debug!("fluid: diffusion={diffusion}");
        Ok(())
    }

    pub fn set_viscosity(&mut self, viscosity: f32) -> Result<(), ConfigError> {
        validate_viscosity(viscosity)?;
        self.params.viscosity = viscosity;
        log::debug!("fluid: viscosity={viscosity}");
        Ok(())
    }

    pub fn set_iterations(&mut self, iterations: usize) -> Result<(), ConfigError> {
        validate_iterations(iterations)?;
        self.params.iterations = iterations;
        log::debug!("fluid: iterations={iterations}");
        Ok(())
    }

    pub fn set_limits(&mut self, limits: InjectionLimits) -> Result<(), ConfigError> {
        limits.validate()?;
        self.params.limits = limits;
        Ok(())
    }

    pub fn params(&self) -> &FluidParams {
        &self.params
    }

    pub fn grid(&self) -> Grid2 {
        self.grid
    }

    pub fn size(&self) -> usize {
        self.grid.size()
    }

    pub fn tick_count(&self) -> u64 {
        self.ticks
    }

    /// Raw density of each channel at a cell.
    pub fn density_at(&self, x: usize, y: usize) -> [f32; DENSITY_CHANNELS] {
        std::array::from_fn(|c| self.density[c].get(x, y))
    }

    /// Density at a cell as a display color, each channel clamped to `0..=1`
    /// and scaled to `0..=255`.
    pub fn color_at(&self, x: usize, y: usize) -> Rgb {
        Rgb::from_channels(self.density_at(x, y).map(|d| d.clamp(0.0, 1.0) * 255.0))
    }

    pub fn density(&self, channel: usize) -> Option<&Field2> {
        self.density.get(channel)
    }

    pub fn densities(&self) -> &[Field2; DENSITY_CHANNELS] {
        &self.density
    }

    pub fn velocity(&self) -> &VecField2 {
        &self.velocity
    }

    /// Pressure from the most recent projection.
    pub fn pressure(&self) -> &Field2 {
        &self.pressure
    }

    /// Divergence measured at the start of the most recent projection.
    pub fn divergence(&self) -> &Field2 {
        &self.divergence
    }

    /// Largest divergence magnitude of the current velocity.
    pub fn max_divergence(&self) -> f32 {
        max_divergence(&self.velocity)
    }

    pub fn tracers(&self) -> &TracerSet {
        &self.tracers
    }

    pub fn tracer_map(&self) -> Vec<Option<usize>> {
        self.tracers.cell_map(self.grid)
    }

    pub fn snapshot(&self) -> FluidSnapshot {
        FluidSnapshot {
            density: self.density.clone(),
            velocity: self.velocity.clone(),
            tracers: self.tracers.as_slice().to_vec(),
        }
    }
}
