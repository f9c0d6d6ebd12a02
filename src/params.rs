use crate::error::{FlowError, Result};

/// Everything the engine needs to know about the fluid and the capillary.
/// Replaced wholesale on every update, never edited in place by the engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterSet {
    pub temperature: f64,           // K
    pub base_viscosity: f64,        // Pa s
    pub density: f64,               // kg/m^3
    pub min_width: f64,             // m
    pub max_width: f64,             // m
    pub capillary_length: f64,      // m
    pub activation_energy: f64,     // J/mol
    pub reference_temperature: f64, // K
    pub gas_constant: f64,          // J/(mol K)
    pub pressure_start: f64,        // Pa
    pub pressure_end: f64,          // Pa
    /// Upper bound of the random axial speed, uniform jitter model only
    pub particle_vx_bound: f64,
    /// Bound of the random lateral speed, uniform jitter model only
    pub particle_vy_bound: f64,
}

impl ParameterSet {
    pub const DEFAULT: ParameterSet = ParameterSet {
        // Thick oil at room temperature, referenced to 0 C
        temperature: 293.0,
        base_viscosity: 0.2,
        density: 1000.0,
        min_width: 0.01,
        max_width: 0.1,
        capillary_length: 1000.0,
        activation_energy: 1000.0,
        reference_temperature: 273.0,
        gas_constant: 8.314,
        pressure_start: 1_013_250.0,
        pressure_end: 100_000.0,
        particle_vx_bound: 3.0,
        particle_vy_bound: 0.01,
    };

    pub fn pressure_drop(&self) -> f64 {
        self.pressure_start - self.pressure_end
    }

    /// Checks the constraints that do not depend on derived quantities. The
    /// engine additionally rejects parameter sets whose derived viscosity or
    /// velocity field is degenerate.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("temperature", self.temperature),
            ("base_viscosity", self.base_viscosity),
            ("density", self.density),
            ("min_width", self.min_width),
            ("max_width", self.max_width),
            ("capillary_length", self.capillary_length),
            ("activation_energy", self.activation_energy),
            ("reference_temperature", self.reference_temperature),
            ("gas_constant", self.gas_constant),
            ("pressure_start", self.pressure_start),
            ("pressure_end", self.pressure_end),
            ("particle_vx_bound", self.particle_vx_bound),
            ("particle_vy_bound", self.particle_vy_bound),
        ];
        for &(name, value) in fields.iter() {
            if !value.is_finite() {
                return Err(FlowError::invalid(name, value, "must be finite"));
            }
        }

        if self.min_width < 0.0 {
            return Err(FlowError::invalid(
                "min_width",
                self.min_width,
                "must not be negative",
            ));
        }
        if self.max_width <= self.min_width {
            return Err(FlowError::invalid(
                "max_width",
                self.max_width,
                "must be greater than min_width",
            ));
        }
        if self.capillary_length <= 0.0 {
            return Err(FlowError::invalid(
                "capillary_length",
                self.capillary_length,
                "must be positive",
            ));
        }
        if self.base_viscosity <= 0.0 {
            return Err(FlowError::invalid(
                "base_viscosity",
                self.base_viscosity,
                "must be positive",
            ));
        }
        if self.density < 0.0 {
            return Err(FlowError::invalid(
                "density",
                self.density,
                "must not be negative",
            ));
        }
        if self.reference_temperature <= 0.0 {
            return Err(FlowError::invalid(
                "reference_temperature",
                self.reference_temperature,
                "must be positive",
            ));
        }
        if self.gas_constant <= 0.0 {
            return Err(FlowError::invalid(
                "gas_constant",
                self.gas_constant,
                "must be positive",
            ));
        }
        if self.particle_vx_bound < 0.0 {
            return Err(FlowError::invalid(
                "particle_vx_bound",
                self.particle_vx_bound,
                "must not be negative",
            ));
        }
        if self.particle_vy_bound < 0.0 {
            return Err(FlowError::invalid(
                "particle_vy_bound",
                self.particle_vy_bound,
                "must not be negative",
            ));
        }
        Ok(())
    }
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self::DEFAULT
    }
}
