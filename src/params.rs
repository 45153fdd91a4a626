use crate::{grid::MIN_GRID_SIZE, ConfigError};

/// Caps applied to brush increments before they reach the fields. Large
/// velocity injections stop the fixed-budget pressure solve from keeping up.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InjectionLimits {
    /// Upper bound for a single density `amount`.
    pub max_density: f32,
    /// Upper bound for the length of a single velocity increment.
    pub max_speed: f32,
}

impl Default for InjectionLimits {
    fn default() -> Self {
        Self {
            max_density: 100.0,
            max_speed: 10.0,
        }
    }
}

impl InjectionLimits {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_limit("max_density", self.max_density)?;
        check_limit("max_speed", self.max_speed)
    }
}

fn check_limit(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidLimit { name, value })
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FluidParams {
    /// Cells per side, border included.
    pub size: usize,
    pub dt: f32,
    /// Density diffusion rate.
    pub diffusion: f32,
    /// Velocity diffusion rate.
    pub viscosity: f32,
    /// Jacobi sweeps for both the diffusion and the pressure solves.
    pub iterations: usize,
    pub limits: InjectionLimits,
}

impl Default for FluidParams {
    fn default() -> Self {
        Self {
            size: 100,
            dt: 0.1,
            diffusion: 0.0,
            viscosity: 0.0,
            iterations: 25,
            limits: InjectionLimits::default(),
        }
    }
}

impl FluidParams {
    pub fn new(size: usize, diffusion: f32, viscosity: f32, dt: f32) -> Self {
        Self {
            size,
            dt,
            diffusion,
            viscosity,
            ..Self::default()
        }
    }

    pub fn with_iterations(self, iterations: usize) -> Self {
        Self { iterations, ..self }
    }

    pub fn with_limits(self, limits: InjectionLimits) -> Self {
        Self { limits, ..self }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_size(self.size)?;
        validate_dt(self.dt)?;
        validate_diffusion(self.diffusion)?;
        validate_viscosity(self.viscosity)?;
        validate_iterations(self.iterations)?;
        self.limits.validate()
    }
}

pub(crate) fn validate_size(size: usize) -> Result<(), ConfigError> {
    if size < MIN_GRID_SIZE {
        return Err(ConfigError::GridTooSmall {
            size,
            min: MIN_GRID_SIZE,
        });
    }
    Ok(())
}

pub(crate) fn validate_dt(dt: f32) -> Result<(), ConfigError> {
    if dt.is_finite() && dt > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidTimeStep(dt))
    }
}

pub(crate) fn validate_diffusion(rate: f32) -> Result<(), ConfigError> {
    if rate.is_finite() && rate >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidDiffusion(rate))
    }
}

pub(crate) fn validate_viscosity(rate: f32) -> Result<(), ConfigError> {
    if rate.is_finite() && rate >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidViscosity(rate))
    }
}

pub(crate) fn validate_iterations(iterations: usize) -> Result<(), ConfigError> {
    if iterations == 0 {
        Err(ConfigError::InvalidIterations(iterations))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(FluidParams::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_small_grid() {
        let params = FluidParams::new(2, 0.0, 0.0, 0.1);
        assert_eq!(
            params.validate(),
            Err(ConfigError::GridTooSmall { size: 2, min: 3 })
        );
    }

    #[test]
    fn rejects_zero_iterations() {
        let params = FluidParams::new(10, 0.0, 0.0, 0.1).with_iterations(0);
        assert_eq!(params.validate(), Err(ConfigError::InvalidIterations(0)));
    }

    #[test]
    fn rejects_bad_rates() {
        assert!(matches!(
            FluidParams::new(10, -1.0, 0.0, 0.1).validate(),
            Err(ConfigError::InvalidDiffusion(_))
        ));
        assert!(matches!(
            FluidParams::new(10, 0.0, f32::NAN, 0.1).validate(),
            Err(ConfigError::InvalidViscosity(_))
        ));
        assert!(matches!(
            FluidParams::new(10, 0.0, 0.0, 0.0).validate(),
            Err(ConfigError::InvalidTimeStep(_))
        ));
    }

    #[test]
    fn rejects_negative_limits() {
        let limits = InjectionLimits {
            max_density: 1.0,
            max_speed: -1.0,
        };
        let params = FluidParams::default().with_limits(limits);
        assert_eq!(
            params.validate(),
            Err(ConfigError::InvalidLimit {
                name: "max_speed",
                value: -1.0
            })
        );
    }

    #[test]
    fn error_messages_name_the_value() {
        let err = ConfigError::GridTooSmall { size: 1, min: 3 };
        assert_eq!(err.to_string(), "grid size 1 is too small, need at least 3");
    }
}
