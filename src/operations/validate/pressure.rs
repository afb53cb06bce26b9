use serde::{Deserialize, Serialize};

/// Velocity-pressure constant for standard air: `VP = (V / 4005)²`.
pub const VP_CONSTANT: f64 = 4005.0;

/// Square inches per square foot.
const IN2_PER_FT2: f64 = 144.0;

/// Inches per foot.
const IN_PER_FT: f64 = 12.0;

/// Static-pressure loss through one duct, velocity-pressure method.
///
/// This is a first-order approximation, not a friction-chart lookup. The
/// formula shape is kept exactly so figures match earlier submittals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DuctLoss {
    pub velocity_fpm: f64,
    /// Velocity pressure, in. w.g.
    pub velocity_pressure: f64,
    /// Straight-run friction, in. w.g.
    pub friction: f64,
    /// Fitting losses, in. w.g.
    pub minor: f64,
    pub total: f64,
}

impl DuctLoss {
    /// * `cfm` - Airflow.
    /// * `area_in2` - Free area; floored at 1 in².
    /// * `length_in` - Equivalent duct length in inches.
    /// * `friction_rate` - in. w.g. per 100 ft.
    /// * `k_total` - Summed fitting loss coefficients.
    #[must_use]
    pub fn compute(cfm: f64, area_in2: f64, length_in: f64, friction_rate: f64, k_total: f64) -> Self {
        let area_ft2 = area_in2.max(1.0) / IN2_PER_FT2;
        let velocity_fpm = cfm / area_ft2;
        let velocity_pressure = (velocity_fpm / VP_CONSTANT).powi(2);
        let length_ft = length_in / IN_PER_FT;
        let friction = (length_ft / 100.0) * friction_rate;
        let minor = k_total * velocity_pressure;
        Self {
            velocity_fpm,
            velocity_pressure,
            friction,
            minor,
            total: friction + minor,
        }
    }
}

/// Supply and return losses and their sum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaticPressure {
    pub supply: DuctLoss,
    #[serde(rename = "return")]
    pub return_: DuctLoss,
    pub total: f64,
}

impl StaticPressure {
    #[must_use]
    pub fn new(supply: DuctLoss, return_: DuctLoss) -> Self {
        Self {
            supply,
            return_,
            total: supply.total + return_.total,
        }
    }
}
