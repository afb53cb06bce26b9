use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::ValidationErrors;
use crate::math::Vector2;
use crate::params::Parameters;

use super::design::{AdapterDesign, BuildDesign};

/// Safety margin kept below the static-pressure limit, in. w.g.
const SP_MARGIN: f64 = 0.2;

/// Corridor widths above this are never tried.
const MAX_CORRIDOR_WIDTH: f64 = 16.0;

const WIDTH_STEPS: [f64; 4] = [0.0, 2.0, 4.0, 6.0];

const SEAT_OFFSETS: [f64; 3] = [-2.0, 0.0, 2.0];

/// Score lost per inch of seat offset along each axis.
const OFFSET_PENALTY: f64 = 0.1;

/// Score lost when supply and return are not kept apart.
const SEPARATION_PENALTY: f64 = 1000.0;

/// The winning candidate of a design search.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizedDesign {
    pub design: AdapterDesign,
    /// Parameters the design was built with.
    pub params: Parameters,
    /// Seat offset applied after fitting.
    pub offset: Vector2,
    pub score: f64,
    /// Separation, envelope and COG pass, and static pressure is at or
    /// below the target.
    pub ok: bool,
}

/// Bounded grid search over corridor width and seat offset.
///
/// Candidates are evaluated in parallel; the winner is the first candidate
/// in enumeration order (width, then x offset, then y offset) with the
/// highest score.
#[derive(Debug, Clone)]
pub struct OptimizeDesign {
    build: BuildDesign,
}

impl OptimizeDesign {
    /// Creates a new `OptimizeDesign` operation seeded by `build`'s
    /// parameters.
    #[must_use]
    pub fn new(build: BuildDesign) -> Self {
        Self { build }
    }

    /// Every `(corridor width, x offset, y offset)` tried, in order.
    #[must_use]
    pub fn candidates(&self) -> Vec<(f64, f64, f64)> {
        let base = self.build.params().corridor_width;
        WIDTH_STEPS
            .iter()
            .map(|step| (base + step).min(MAX_CORRIDOR_WIDTH))
            .flat_map(|w| {
                SEAT_OFFSETS
                    .iter()
                    .flat_map(move |&ox| SEAT_OFFSETS.iter().map(move |&oy| (w, ox, oy)))
            })
            .collect()
    }

    /// Executes the search.
    ///
    /// # Errors
    ///
    /// Returns the fitter's validation errors. These do not depend on the
    /// searched parameters, so any candidate failing means all do.
    pub fn execute(&self) -> Result<OptimizedDesign, ValidationErrors> {
        let base = self.build.params();
        let target = base.sp_limit - SP_MARGIN;

        let evaluated: Vec<OptimizedDesign> = self
            .candidates()
            .par_iter()
            .map(|&(width, ox, oy)| {
                let params = base.clone().with_corridor_width(width);
                let design = self
                    .build
                    .clone()
                    .with_params(params.clone())
                    .execute()?
                    .with_seat_offset(ox, oy, &params);
                Ok(score_candidate(design, params, Vector2::new(ox, oy), target))
            })
            .collect::<Result<_, ValidationErrors>>()?;

        let mut best: Option<OptimizedDesign> = None;
        for candidate in evaluated {
            debug!(
                width = candidate.params.corridor_width,
                ox = candidate.offset.x,
                oy = candidate.offset.y,
                score = candidate.score,
                ok = candidate.ok,
                "scored candidate"
            );
            if best.as_ref().is_none_or(|b| candidate.score > b.score) {
                best = Some(candidate);
            }
        }

        // The grid is never empty.
        let best = best.ok_or_else(|| ValidationErrors(vec!["no candidates".to_owned()]))?;
        info!(
            width = best.params.corridor_width,
            ox = best.offset.x,
            oy = best.offset.y,
            score = best.score,
            ok = best.ok,
            "optimizer selected candidate"
        );
        Ok(best)
    }
}

fn score_candidate(
    design: AdapterDesign,
    params: Parameters,
    offset: Vector2,
    target: f64,
) -> OptimizedDesign {
    let r = &design.report;
    let sp = r.static_pressure;
    let mut score = (target - sp) * 10.0 - OFFSET_PENALTY * (offset.x.abs() + offset.y.abs());
    if !r.separation_ok {
        score -= SEPARATION_PENALTY;
    }
    let ok = r.separation_ok && r.envelope_ok && r.cog_ok && sp <= target;
    OptimizedDesign {
        design,
        params,
        offset,
        score,
        ok,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::geometry::{Footprint, Rect};

    fn scenario_a(params: Parameters) -> BuildDesign {
        let supply = Rect::new(5.0, 5.0, 8.0, 6.0);
        let return_ = Rect::new(20.0, 5.0, 8.0, 6.0);
        let old = Footprint::new(40.0, 30.0, supply, return_).with_height(20.0);
        let new = Footprint::new(42.0, 32.0, supply, return_).with_height(22.0);
        BuildDesign::new(old, new, params)
    }

    #[test]
    fn grid_order_and_ceiling() {
        let opt = OptimizeDesign::new(scenario_a(Parameters::default().with_corridor_width(12.0)));
        let c = opt.candidates();
        assert_eq!(c.len(), 36);
        assert_eq!(c[0], (12.0, -2.0, -2.0));
        assert_eq!(c[1], (12.0, -2.0, 0.0));
        assert_eq!(c[3], (12.0, 0.0, -2.0));
        assert_eq!(c[9], (14.0, -2.0, -2.0));
        // 12 + 6 is capped.
        assert!(c[27..].iter().all(|&(w, _, _)| (w - 16.0).abs() < 1e-12));
    }

    #[test]
    fn scenario_c_first_candidate_wins() {
        let best = OptimizeDesign::new(scenario_a(Parameters::default().with_sp_limit(100.0)))
            .execute()
            .unwrap();
        assert!(best.ok);
        // Every width scores the same; ties keep the narrowest.
        assert_relative_eq!(best.params.corridor_width, 10.0);
        assert_eq!(best.offset, Vector2::zeros());
        let sp = best.design.report.static_pressure;
        assert_relative_eq!(best.score, (99.8 - sp) * 10.0, epsilon = 1e-9);
    }

    #[test]
    fn failing_search_still_returns_closest_attempt() {
        let best = OptimizeDesign::new(scenario_a(Parameters::default()))
            .execute()
            .unwrap();
        assert!(!best.ok);
        assert!(best.design.report.static_pressure > 1.8);
        assert_eq!(best.offset, Vector2::zeros());
        assert!(best.score < 0.0);
    }

    #[test]
    fn offsets_only_lower_the_score() {
        let design = scenario_a(Parameters::default()).execute().unwrap();
        let p = Parameters::default();
        let centered = score_candidate(design.clone(), p.clone(), Vector2::zeros(), 1.8);
        let shifted = score_candidate(design.clone(), p.clone(), Vector2::new(2.0, 0.0), 1.8);
        let both = score_candidate(design, p, Vector2::new(-2.0, 2.0), 1.8);
        assert_relative_eq!(centered.score - shifted.score, 0.2, epsilon = 1e-12);
        assert!(both.score < shifted.score);
    }

    #[test]
    fn crossing_costs_a_thousand_points() {
        let p = Parameters::default();
        let design = scenario_a(p.clone()).execute().unwrap();
        let mut crossed = design.clone();
        crossed.report.separation_ok = false;
        let a = score_candidate(design, p.clone(), Vector2::zeros(), 1.8);
        let b = score_candidate(crossed, p, Vector2::zeros(), 1.8);
        assert_relative_eq!(a.score - b.score, 1000.0, epsilon = 1e-9);
        assert!(!b.ok);
    }

    #[test]
    fn unseparated_layout_is_never_ok() {
        let old = Footprint::new(
            40.0,
            30.0,
            Rect::new(4.0, 12.0, 8.0, 6.0),
            Rect::new(28.0, 12.0, 8.0, 6.0),
        );
        let new = Footprint::new(
            40.0,
            30.0,
            Rect::new(28.0, 16.0, 8.0, 6.0),
            Rect::new(4.0, 16.0, 8.0, 6.0),
        )
        .with_height(18.0);
        let best = OptimizeDesign::new(BuildDesign::new(
            old,
            new,
            Parameters::default().with_sp_limit(1000.0),
        ))
        .execute()
        .unwrap();
        assert!(!best.design.report.separation_ok);
        assert!(!best.ok);
        assert_eq!(best.offset, Vector2::zeros());
        let sp = best.design.report.static_pressure;
        assert_relative_eq!(best.score, (999.8 - sp) * 10.0 - 1000.0, epsilon = 1e-9);
    }

    #[test]
    fn invalid_input_is_reported_once() {
        let mut build = scenario_a(Parameters::default());
        build = build.with_height(Some(40.0));
        let errors = OptimizeDesign::new(build).execute().unwrap_err();
        assert_eq!(errors.messages(), ["Height must be between 12 and 24 inches."]);
    }
}
