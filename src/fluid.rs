use crate::{
    error::{FlowError, Result},
    params::ParameterSet,
};

/// Effective viscosity from a linearization of the Arrhenius law around
/// `reference_temperature`. This is not `exp(-Ea/RT)`; the result equals
/// `base_viscosity` exactly at the reference temperature.
///
/// Requires `reference_temperature > 0` and `gas_constant > 0`.
pub fn compute_viscosity(
    base_viscosity: f64,
    temperature: f64,
    activation_energy: f64,
    reference_temperature: f64,
    gas_constant: f64,
) -> f64 {
    let sensitivity = activation_energy / (gas_constant * reference_temperature.powi(2));
    base_viscosity * (-sensitivity * (temperature - reference_temperature)).exp()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FluidState {
    effective_viscosity: f64,
}

impl FluidState {
    pub fn from_parameters(params: &ParameterSet) -> Result<Self> {
        params.validate()?;
        let effective_viscosity = compute_viscosity(
            params.base_viscosity,
            params.temperature,
            params.activation_energy,
            params.reference_temperature,
            params.gas_constant,
        );
        // exp() under- or overflows long before the inputs stop being finite
        if !(effective_viscosity.is_finite() && effective_viscosity > 0.0) {
            return Err(FlowError::invalid(
                "temperature",
                params.temperature,
                "effective viscosity is not a positive finite number",
            ));
        }
        Ok(Self {
            effective_viscosity,
        })
    }
    pub fn effective_viscosity(&self) -> f64 {
        self.effective_viscosity
    }
}
