use serde::{Deserialize, Serialize};

/// How supply/return conflicts are mitigated, and which envelope margin and
/// center-of-gravity formulation go with it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MitigationStrategy {
    /// Flip the new footprint 180° when the opening center-lines cross.
    /// 2 in of padding per side; COG from opening-area-weighted shift.
    Rotation,
    /// Insert a vertical and a horizontal baffle when corridors overlap.
    /// 6 in flat margin; COG from the seat-offset heuristic.
    #[default]
    Baffle,
}

impl MitigationStrategy {
    /// Total margin added to each envelope plan dimension.
    #[must_use]
    pub fn envelope_margin(self) -> f64 {
        match self {
            Self::Rotation => 2.0 * 2.0,
            Self::Baffle => 6.0,
        }
    }
}

/// Engine configuration. Every field may be overridden; missing fields take
/// their defaults when deserialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Parameters {
    /// Minimum adapter height, inches.
    pub envelope_min: f64,
    /// Maximum adapter height, inches.
    pub envelope_max: f64,
    /// Static-pressure pass threshold, in. w.g.
    pub sp_limit: f64,
    pub cfm_supply: f64,
    pub cfm_return: f64,
    /// Duct width and corridor buffer, inches.
    pub corridor_width: f64,
    /// Total vertical rise, split evenly across a path's two legs.
    pub default_rise: f64,
    /// Center-of-gravity pass threshold, inches.
    pub cog_max_offset: f64,
    pub baffle_thickness: f64,
    pub strategy: MitigationStrategy,
    /// Duct friction, in. w.g. per 100 ft.
    pub friction_rate: f64,
    /// Fitting loss coefficients summed per duct.
    pub loss_coefficients: Vec<f64>,
    /// Longest side panel the press brake can form, inches.
    pub brake_limit: f64,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            envelope_min: 12.0,
            envelope_max: 24.0,
            sp_limit: 2.0,
            cfm_supply: 2000.0,
            cfm_return: 2000.0,
            corridor_width: 10.0,
            default_rise: 6.0,
            cog_max_offset: 2.0,
            baffle_thickness: 0.125,
            strategy: MitigationStrategy::default(),
            friction_rate: 0.08,
            // Two elbows and two transitions.
            loss_coefficients: vec![0.25, 0.25, 0.15, 0.15],
            brake_limit: 84.0,
        }
    }
}

impl Parameters {
    #[must_use]
    pub fn with_strategy(mut self, strategy: MitigationStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    #[must_use]
    pub fn with_sp_limit(mut self, sp_limit: f64) -> Self {
        self.sp_limit = sp_limit;
        self
    }

    #[must_use]
    pub fn with_corridor_width(mut self, corridor_width: f64) -> Self {
        self.corridor_width = corridor_width;
        self
    }

    #[must_use]
    pub fn with_airflow(mut self, cfm_supply: f64, cfm_return: f64) -> Self {
        self.cfm_supply = cfm_supply;
        self.cfm_return = cfm_return;
        self
    }

    /// Sum of the fitting loss coefficients.
    #[must_use]
    pub fn k_total(&self) -> f64 {
        self.loss_coefficients.iter().sum()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn defaults() {
        let p = Parameters::default();
        assert_relative_eq!(p.k_total(), 0.8);
        assert_eq!(p.strategy, MitigationStrategy::Baffle);
        assert_relative_eq!(MitigationStrategy::Rotation.envelope_margin(), 4.0);
    }

    #[test]
    fn partial_json_overrides() {
        let p: Parameters =
            serde_json::from_str(r#"{"spLimit": 100, "strategy": "rotation"}"#).unwrap();
        assert_relative_eq!(p.sp_limit, 100.0);
        assert_eq!(p.strategy, MitigationStrategy::Rotation);
        assert_relative_eq!(p.corridor_width, 10.0);
        assert_relative_eq!(p.cfm_return, 2000.0);
    }
}
