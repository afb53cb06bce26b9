use serde::{Deserialize, Serialize};

use crate::geometry::Envelope;
use crate::math::{clamp, round_to};
use crate::request::SiteConditions;

/// Baseline design wind speed, mph.
const BASE_WIND_MPH: f64 = 90.0;
/// Wind speed span over which the wind term ramps from 0 to 1, mph.
const WIND_RAMP_MPH: f64 = 60.0;

fn wind_term(site: &SiteConditions) -> f64 {
    clamp(
        (site.wind_speed_mph.max(0.0) - BASE_WIND_MPH) / WIND_RAMP_MPH,
        0.0,
        1.0,
    )
}

/// Derives an adapter height from roof slope and wind exposure, clamped to
/// `[min, max]` and rounded to 0.01 in.
#[must_use]
pub fn pick_height(site: &SiteConditions, min: f64, max: f64) -> f64 {
    let sf = clamp(site.slope_factor, 0.0, 1.0);
    let h = min + 12.0 * (0.6 * sf + 0.4 * wind_term(site));
    round_to(clamp(h, min, max), 2)
}

/// Velocity pressure `q = 0.00256 V²`, psf.
#[must_use]
pub fn wind_pressure_psf(wind_speed_mph: f64) -> f64 {
    round_to(0.00256 * wind_speed_mph.max(0.0).powi(2), 3)
}

/// First-order site guidance attached to every design.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteAssessment {
    pub wind_pressure_psf: f64,
    /// Suggested leading-edge angle, degrees.
    pub aero_angle_deg: f64,
    pub stability_index: f64,
    pub anchorage_note: String,
}

impl SiteAssessment {
    #[must_use]
    pub fn evaluate(site: &SiteConditions, curb: &Envelope) -> Self {
        let sf = site.slope_factor;
        let raw_wind = ((site.wind_speed_mph - BASE_WIND_MPH) / WIND_RAMP_MPH).max(0.0);
        let angle = round_to(5.0 + 20.0 * (0.6 * sf + 0.4 * raw_wind), 2);
        let q = wind_pressure_psf(site.wind_speed_mph);
        let span = curb.length.max(curb.width);
        let stability = if span > 0.0 {
            round_to((curb.height / span) * 0.5 + 0.5, 3)
        } else {
            0.5
        };
        Self {
            wind_pressure_psf: q,
            aero_angle_deg: clamp(angle, 5.0, 35.0),
            stability_index: stability,
            anchorage_note: format!(
                "Guidance: design for ~{q} psf lateral; verify per local code/ASCE 7."
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn height_ramps_with_slope_and_wind() {
        let calm = SiteConditions {
            slope_factor: 0.0,
            wind_speed_mph: 60.0,
        };
        assert_relative_eq!(pick_height(&calm, 12.0, 24.0), 12.0);

        let exposed = SiteConditions {
            slope_factor: 1.0,
            wind_speed_mph: 200.0,
        };
        assert_relative_eq!(pick_height(&exposed, 12.0, 24.0), 24.0);

        let mid = SiteConditions {
            slope_factor: 0.5,
            wind_speed_mph: 120.0,
        };
        // 12 + 12 * (0.3 + 0.2)
        assert_relative_eq!(pick_height(&mid, 12.0, 24.0), 18.0);
    }

    #[test]
    fn wind_pressure() {
        assert_relative_eq!(wind_pressure_psf(90.0), 20.736);
        assert_relative_eq!(wind_pressure_psf(-10.0), 0.0);
    }

    #[test]
    fn assessment_for_default_site() {
        let curb = Envelope {
            length: 48.0,
            width: 38.0,
            height: 22.0,
        };
        let a = SiteAssessment::evaluate(&SiteConditions::default(), &curb);
        assert_relative_eq!(a.aero_angle_deg, 11.0);
        assert_relative_eq!(a.stability_index, 0.729);
        assert!(a.anchorage_note.contains("20.736 psf"));
    }
}
