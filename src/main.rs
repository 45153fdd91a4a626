use anyhow::{Context, Result};
use env_logger::Env;
use stable_fluids::{FluidParams, FluidSnapshot, FluidState, Rgb, Vec2};
use std::str::FromStr;

const SHADES: &[u8] = b" .:-=+*#%@";

fn env_or<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .with_context(|| format!("invalid {name}={value:?}")),
        Err(_) => Ok(default),
    }
}

fn params_from_env() -> Result<FluidParams> {
    let defaults = FluidParams::new(64, 0.0001, 0.0001, 0.1);
    let params = FluidParams::new(
        env_or("FLUID_SIZE", defaults.size)?,
        env_or("FLUID_DIFFUSION", defaults.diffusion)?,
        env_or("FLUID_VISCOSITY", defaults.viscosity)?,
        env_or("FLUID_DT", defaults.dt)?,
    )
    .with_iterations(env_or("FLUID_ITERS", defaults.iterations)?);
    Ok(params)
}

/// Rotating brush: injects colored density and a tangential push around the
/// centre of the grid.
fn apply_brush(fluid: &mut FluidState, tick: usize) {
    let n = fluid.size() as f32;
    let angle = tick as f32 * 0.15;
    let (sin, cos) = angle.sin_cos();
    let center = Vec2::new(n * 0.5, n * 0.5);
    let pos = center.add(Vec2::new(cos, sin).scale(n * 0.2));
    let push = Vec2::new(-sin, cos).scale(2.0);
    let color = match (tick / 40) % 3 {
        0 => Rgb::new(255.0, 80.0, 40.0),
        1 => Rgb::new(40.0, 255.0, 120.0),
        _ => Rgb::new(60.0, 120.0, 255.0),
    };
    let radius = (n * 0.04).max(1.0);
    fluid.add_density(pos, 20.0, color, radius);
    fluid.add_velocity(pos, push, radius);
}

fn density_to_ascii(snapshot: &FluidSnapshot, columns: usize) -> String {
    let grid = snapshot.density[0].grid();
    let n = grid.size();
    let step = (n / columns.max(1)).max(1);
    let mut out = String::new();
    for y in (0..n).step_by(step * 2).rev() {
        for x in (0..n).step_by(step) {
            let total: f32 = snapshot.density.iter().map(|c| c.get(x, y)).sum();
            let t = (total / 3.0).clamp(0.0, 1.0);
            let shade = (t * (SHADES.len() - 1) as f32).round() as usize;
            out.push(SHADES[shade] as char);
        }
        out.push('\n');
    }
    for tracer in &snapshot.tracers {
        log::debug!("tracer at ({:.2}, {:.2})", tracer.pos.x, tracer.pos.y);
    }
    out
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let params = params_from_env()?;
    let ticks: usize = env_or("FLUID_TICKS", 240)?;
    let mut fluid = FluidState::new(params)?;
    let n = fluid.size() as f32;
    for i in 0..8 {
        let t = i as f32 / 8.0 * std::f32::consts::TAU;
        let pos = Vec2::new(n * 0.5 + t.cos() * n * 0.3, n * 0.5 + t.sin() * n * 0.3);
        fluid.add_tracer(pos, Rgb::WHITE);
    }
    log::info!(
        "running {ticks} ticks on a {0}x{0} grid ({1} jacobi sweeps)",
        fluid.size(),
        fluid.params().iterations
    );
    for tick in 0..ticks {
        apply_brush(&mut fluid, tick);
        if tick == ticks * 3 / 4 {
            fluid.freeze_velocity();
            log::info!("velocity frozen at tick {tick}");
        }
        fluid.update();
        fluid.fade_density(0.05, 0.0, 5.0);
        if tick % 40 == 0 || tick + 1 == ticks {
            let (_, max_density) = fluid.density(0).map(|d| d.min_max()).unwrap_or_default();
            log::info!(
                "tick {:4} max_speed={:.3} max_div={:.2e} max_red={:.3} tracers={}",
                fluid.tick_count(),
                fluid.velocity().max_speed(),
                fluid.max_divergence(),
                max_density,
                fluid.tracers().len()
            );
        }
    }
    print!("{}", density_to_ascii(&fluid.snapshot(), 64));
    Ok(())
}
