use std::fmt;

pub const TURBULENT_REYNOLDS: f64 = 2000.0;
pub const INERTIA_REYNOLDS: f64 = 1.0;

/// Requires `viscosity != 0`.
pub fn reynolds_number(density: f64, velocity: f64, length: f64, viscosity: f64) -> f64 {
    density * velocity * length / viscosity
}

/// Capillary diameter at a point along a smoothly widening channel, `phase` in
/// `[0, π/2]` going from `min_width` to `max_width`.
pub fn interpolated_diameter(min_width: f64, max_width: f64, phase: f64) -> f64 {
    min_width + (max_width - min_width) * phase.sin()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowRegime {
    Laminar,
    Turbulent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForceBalance {
    ViscosityDominant,
    InertiaDominant,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub reynolds: f64,
    pub flow: FlowRegime,
    pub forces: ForceBalance,
}

pub fn classify(reynolds: f64) -> Classification {
    Classification {
        reynolds,
        flow: if reynolds < TURBULENT_REYNOLDS {
            FlowRegime::Laminar
        } else {
            FlowRegime::Turbulent
        },
        forces: if reynolds < INERTIA_REYNOLDS {
            ForceBalance::ViscosityDominant
        } else {
            ForceBalance::InertiaDominant
        },
    }
}

/// The tag shown alongside a frame. Which pair it comes from depends on the
/// flow model that produced the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Regime {
    Laminar,
    Turbulent,
    ViscosityDominant,
    InertiaDominant,
}

impl From<FlowRegime> for Regime {
    fn from(flow: FlowRegime) -> Self {
        match flow {
            FlowRegime::Laminar => Regime::Laminar,
            FlowRegime::Turbulent => Regime::Turbulent,
        }
    }
}

impl From<ForceBalance> for Regime {
    fn from(forces: ForceBalance) -> Self {
        match forces {
            ForceBalance::ViscosityDominant => Regime::ViscosityDominant,
            ForceBalance::InertiaDominant => Regime::InertiaDominant,
        }
    }
}

impl fmt::Display for Regime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Regime::Laminar => "laminar",
            Regime::Turbulent => "turbulent",
            Regime::ViscosityDominant => "viscosity dominant",
            Regime::InertiaDominant => "inertia dominant",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn linear_in_velocity_and_density() {
        let re = reynolds_number(1000.0, 1.5, 0.1, 0.2);
        assert_relative_eq!(re, 750.0);
        assert_relative_eq!(reynolds_number(1000.0, 3.0, 0.1, 0.2), 2.0 * re);
        assert_relative_eq!(reynolds_number(2000.0, 1.5, 0.1, 0.2), 2.0 * re);
        assert_relative_eq!(reynolds_number(1000.0, 1.5, 0.1, 0.4), re / 2.0);
    }

    #[test]
    fn thresholds() {
        assert_eq!(classify(1999.9).flow, FlowRegime::Laminar);
        assert_eq!(classify(2000.0).flow, FlowRegime::Turbulent);
        assert_eq!(classify(0.999).forces, ForceBalance::ViscosityDominant);
        assert_eq!(classify(1.0).forces, ForceBalance::InertiaDominant);
        assert_eq!(classify(0.0).flow, FlowRegime::Laminar);
    }

    #[test]
    fn diameter_at_the_throat_is_max_width() {
        assert_relative_eq!(interpolated_diameter(0.1, 1.0, FRAC_PI_2), 1.0);
        assert_relative_eq!(interpolated_diameter(0.1, 1.0, 0.0), 0.1);
    }

    #[test]
    fn display() {
        assert_eq!(Regime::from(FlowRegime::Turbulent).to_string(), "turbulent");
        assert_eq!(
            Regime::from(ForceBalance::ViscosityDominant).to_string(),
            "viscosity dominant"
        );
    }
}
