mod cog;
mod pressure;

pub use cog::{estimate_cog, opening_weighted_cog, seat_offset_cog, CogEstimate};
pub use pressure::{DuctLoss, StaticPressure, VP_CONSTANT};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::geometry::{DuctPath, Rect};
use crate::params::Parameters;

use super::fit::FittedLayout;

/// Pass/fail outcome of every engineering rule, with one note per rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    #[serde(rename = "separationOK")]
    pub separation_ok: bool,
    #[serde(rename = "envelopeOK")]
    pub envelope_ok: bool,
    #[serde(rename = "staticPressureOK")]
    pub static_pressure_ok: bool,
    #[serde(rename = "cogOK")]
    pub cog_ok: bool,
    /// The exterior is always a plain rectangle; kept as an explicit,
    /// auditable assertion.
    #[serde(rename = "profileSidesOK")]
    pub profile_sides_ok: bool,
    /// Supply plus return loss, in. w.g.
    pub static_pressure: f64,
    pub cog_offset_in: f64,
    pub pressure: StaticPressure,
    pub cog: CogEstimate,
    pub notes: Vec<String>,
}

impl ValidationReport {
    /// Returns `true` if every check passed.
    #[must_use]
    pub fn all_ok(&self) -> bool {
        self.separation_ok
            && self.envelope_ok
            && self.static_pressure_ok
            && self.cog_ok
            && self.profile_sides_ok
    }
}

/// Checks a routed layout against the envelope, static-pressure and
/// center-of-gravity limits.
#[derive(Debug, Clone)]
pub struct ValidateDesign<'a> {
    layout: &'a FittedLayout,
    supply_path: &'a DuctPath,
    return_path: &'a DuctPath,
    separated: bool,
    params: &'a Parameters,
}

impl<'a> ValidateDesign<'a> {
    /// Creates a new `ValidateDesign` operation.
    ///
    /// `separated` is the crossing resolver's verdict on the final layout.
    #[must_use]
    pub fn new(
        layout: &'a FittedLayout,
        supply_path: &'a DuctPath,
        return_path: &'a DuctPath,
        separated: bool,
        params: &'a Parameters,
    ) -> Self {
        Self {
            layout,
            supply_path,
            return_path,
            separated,
            params,
        }
    }

    /// Executes every check.
    #[must_use]
    pub fn execute(&self) -> ValidationReport {
        let p = self.params;
        let o = &self.layout.openings;
        let h = self.layout.curb.height;

        let envelope_ok = p.envelope_min <= h && h <= p.envelope_max;

        let pressure = StaticPressure::new(
            self.duct_loss(p.cfm_supply, &o.bottom_supply, &o.top_supply, self.supply_path),
            self.duct_loss(p.cfm_return, &o.bottom_return, &o.top_return, self.return_path),
        );
        let static_pressure_ok = pressure.total <= p.sp_limit;

        let cog = estimate_cog(
            p.strategy,
            &self.layout.curb,
            &self.layout.seat,
            &self.layout.seated_top_openings(),
        );
        let cog_ok = cog.offset_in <= p.cog_max_offset;

        let notes = vec![
            separation_note(self.separated),
            envelope_note(envelope_ok, h, p),
            pressure_note(static_pressure_ok, pressure.total, p.sp_limit),
            cog_note(cog_ok, cog.offset_in, p.cog_max_offset),
            "Outer shell is a 4-sided rectangle; all mitigation is internal.".to_owned(),
        ];

        let report = ValidationReport {
            separation_ok: self.separated,
            envelope_ok,
            static_pressure_ok,
            cog_ok,
            profile_sides_ok: true,
            static_pressure: pressure.total,
            cog_offset_in: cog.offset_in,
            pressure,
            cog,
            notes,
        };
        if report.all_ok() {
            debug!(sp = report.static_pressure, cog = report.cog_offset_in, "design passes");
        } else {
            warn!(
                separation = report.separation_ok,
                envelope = report.envelope_ok,
                static_pressure = report.static_pressure_ok,
                cog = report.cog_ok,
                "design fails one or more checks"
            );
        }
        report
    }

    fn duct_loss(&self, cfm: f64, old: &Rect, new: &Rect, path: &DuctPath) -> DuctLoss {
        // The smaller opening governs the free area.
        let area = old.area().min(new.area());
        DuctLoss::compute(
            cfm,
            area,
            path.run() + path.rise(),
            self.params.friction_rate,
            self.params.k_total(),
        )
    }
}

fn separation_note(ok: bool) -> String {
    if ok {
        "Supply and return paths are kept separate.".to_owned()
    } else {
        "Supply and return paths intersect; relocate openings or review dog-legging manually."
            .to_owned()
    }
}

fn envelope_note(ok: bool, h: f64, p: &Parameters) -> String {
    let (lo, hi) = (p.envelope_min, p.envelope_max);
    if ok {
        format!("Height {h} in is within the {lo}-{hi} in envelope.")
    } else {
        format!("Height {h} in is outside the {lo}-{hi} in envelope; adjust the adapter height.")
    }
}

fn pressure_note(ok: bool, sp: f64, limit: f64) -> String {
    if ok {
        format!("Static pressure {sp:.3} in. w.g. is within the {limit} in. w.g. limit.")
    } else {
        format!(
            "Static pressure {sp:.3} in. w.g. exceeds the {limit} in. w.g. limit; \
             enlarge openings or reduce airflow."
        )
    }
}

fn cog_note(ok: bool, offset: f64, max: f64) -> String {
    if ok {
        format!("COG offset {offset:.3} in is within the {max} in limit.")
    } else {
        format!("COG offset {offset:.3} in exceeds the {max} in limit; recenter the seat.")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::geometry::Footprint;
    use crate::operations::fit::FitEnvelope;
    use crate::operations::resolve::ResolveCrossing;
    use crate::params::MitigationStrategy;

    fn scenario_a_layout(params: &Parameters) -> FittedLayout {
        let supply = Rect::new(5.0, 5.0, 8.0, 6.0);
        let return_ = Rect::new(20.0, 5.0, 8.0, 6.0);
        let old = Footprint::new(40.0, 30.0, supply, return_).with_height(20.0);
        let new = Footprint::new(42.0, 32.0, supply, return_).with_height(22.0);
        FitEnvelope::new(old, new, params).execute().unwrap()
    }

    fn validate(params: &Parameters, layout: FittedLayout) -> ValidationReport {
        let res = ResolveCrossing::new(layout, params).execute();
        ValidateDesign::new(
            &res.layout,
            &res.supply_path,
            &res.return_path,
            res.separated,
            params,
        )
        .execute()
    }

    #[test]
    fn scenario_a_report() {
        let params = Parameters::default();
        let report = validate(&params, scenario_a_layout(&params));
        assert!(report.separation_ok);
        assert!(report.envelope_ok);
        assert!(report.cog_ok);
        assert!(report.profile_sides_ok);
        assert_relative_eq!(report.cog_offset_in, 0.0);
        // Each 48 in² duct: 6000 fpm, VP ~2.2444, run 2 in + rise 6 in.
        let per_duct = 0.8 * (6000.0 / 4005.0_f64).powi(2) + (8.0 / 12.0 / 100.0) * 0.08;
        assert_relative_eq!(report.static_pressure, 2.0 * per_duct, epsilon = 1e-9);
        assert!(!report.static_pressure_ok);
        assert_eq!(report.notes.len(), 5);
        assert!(report.notes[2].contains("exceeds the 2 in. w.g. limit"));
    }

    #[test]
    fn scenario_c_raised_limit_passes() {
        let params = Parameters::default().with_sp_limit(100.0);
        let report = validate(&params, scenario_a_layout(&params));
        assert!(report.all_ok());
        assert!(report.notes[2].starts_with("Static pressure 3.592"));
    }

    #[test]
    fn pressure_increases_with_airflow() {
        let low = Parameters::default();
        let high = Parameters::default().with_airflow(2500.0, 2000.0);
        let a = validate(&low, scenario_a_layout(&low)).static_pressure;
        let b = validate(&high, scenario_a_layout(&high)).static_pressure;
        assert!(b > a);
        let c = Parameters::default().with_airflow(2000.0, 2500.0);
        assert!(validate(&c, scenario_a_layout(&c)).static_pressure > a);
    }

    #[test]
    fn offset_seat_fails_cog() {
        let params = Parameters::default();
        let layout = scenario_a_layout(&params).with_seat_offset(6.0, 4.0);
        let report = validate(&params, layout);
        // Half of (6, 4).
        assert_relative_eq!(report.cog_offset_in, 13.0_f64.sqrt());
        assert!(!report.cog_ok);
        assert!(report.notes[3].contains("recenter the seat"));
    }

    #[test]
    fn envelope_check_flags_out_of_range_height() {
        let params = Parameters::default();
        let mut layout = scenario_a_layout(&params);
        layout.curb.height = 30.0;
        let report = validate(&params, layout);
        assert!(!report.envelope_ok);
        assert_eq!(
            report.notes[1],
            "Height 30 in is outside the 12-24 in envelope; adjust the adapter height."
        );
    }

    #[test]
    fn rotation_strategy_uses_opening_weighted_cog() {
        let params = Parameters::default().with_strategy(MitigationStrategy::Rotation);
        let report = validate(&params, scenario_a_layout(&params));
        // Both new openings sit in the low-y half, so the center moves up.
        assert!(report.cog.point.y > 18.0);
        assert!(report.cog_offset_in > 0.0);
        assert!(report.cog_ok);
    }
}
