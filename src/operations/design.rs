use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use tracing::{info, warn};

use crate::catalog::RtuCatalog;
use crate::error::{Result, ValidationErrors};
use crate::geometry::{Baffle, Divider, DuctPath, Footprint};
use crate::params::{MitigationStrategy, Parameters};
use crate::request::{DesignRequest, SiteConditions};

use super::fit::{FitEnvelope, FittedLayout};
use super::optimize::{OptimizeDesign, OptimizedDesign};
use super::panels::{Panel, SchedulePanels};
use super::resolve::ResolveCrossing;
use super::site::SiteAssessment;
use super::validate::{ValidateDesign, ValidationReport};

/// A complete adapter design, as consumed by renderers and persistence.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdapterDesign {
    pub strategy: MitigationStrategy,
    #[serde(flatten)]
    pub layout: FittedLayout,
    pub supply_path: DuctPath,
    pub return_path: DuctPath,
    #[serde(rename = "rotated_180")]
    pub rotated_180: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub divider: Option<Divider>,
    pub baffles: Vec<Baffle>,
    pub report: ValidationReport,
    pub site: SiteAssessment,
    pub panels: Vec<Panel>,
    pub warnings: Vec<String>,
    /// Crossing verdict carried so the report can be rebuilt after a seat
    /// move.
    #[serde(skip)]
    separated: bool,
}

impl AdapterDesign {
    /// Returns a copy with the seat moved by `(dx, dy)` and the report
    /// rebuilt. Duct paths are not re-routed.
    #[must_use]
    pub fn with_seat_offset(&self, dx: f64, dy: f64, params: &Parameters) -> Self {
        let layout = self.layout.with_seat_offset(dx, dy);
        let report = ValidateDesign::new(
            &layout,
            &self.supply_path,
            &self.return_path,
            self.separated,
            params,
        )
        .execute();
        Self {
            layout,
            report,
            ..self.clone()
        }
    }
}

/// Runs fit, routing, crossing mitigation and validation on typed
/// footprints.
#[derive(Debug, Clone)]
pub struct BuildDesign {
    old: Footprint,
    new: Footprint,
    height: Option<f64>,
    site: SiteConditions,
    params: Parameters,
}

impl BuildDesign {
    /// Creates a new `BuildDesign` operation.
    #[must_use]
    pub fn new(old: Footprint, new: Footprint, params: Parameters) -> Self {
        Self {
            old,
            new,
            height: None,
            site: SiteConditions::default(),
            params,
        }
    }

    #[must_use]
    pub fn with_height(mut self, height: Option<f64>) -> Self {
        self.height = height;
        self
    }

    #[must_use]
    pub fn with_site(mut self, site: SiteConditions) -> Self {
        self.site = site;
        self
    }

    /// Replaces the parameters.
    #[must_use]
    pub fn with_params(mut self, params: Parameters) -> Self {
        self.params = params;
        self
    }

    #[must_use]
    pub fn params(&self) -> &Parameters {
        &self.params
    }

    /// Executes the pipeline.
    ///
    /// # Errors
    ///
    /// Returns the fitter's validation errors for unusable geometry.
    pub fn execute(&self) -> std::result::Result<AdapterDesign, ValidationErrors> {
        let layout = FitEnvelope::new(self.old, self.new, &self.params)
            .with_height(self.height)
            .with_site(self.site)
            .execute()?;

        let res = ResolveCrossing::new(layout, &self.params).execute();
        let report = ValidateDesign::new(
            &res.layout,
            &res.supply_path,
            &res.return_path,
            res.separated,
            &self.params,
        )
        .execute();

        let schedule = SchedulePanels::new(res.layout.curb, self.params.brake_limit).execute();
        let site = SiteAssessment::evaluate(&self.site, &res.layout.curb);

        Ok(AdapterDesign {
            strategy: self.params.strategy,
            layout: res.layout,
            supply_path: res.supply_path,
            return_path: res.return_path,
            rotated_180: res.rotated_180,
            divider: res.divider,
            baffles: res.baffles,
            report,
            site,
            panels: schedule.panels,
            warnings: schedule.warnings,
            separated: res.separated,
        })
    }
}

/// Either a result, or the list of input problems that prevented one.
///
/// Serializes as `{"ok": true, "result": ..}` or
/// `{"ok": false, "errors": [..]}`.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Designed { result: T },
    Rejected { errors: Vec<String> },
}

impl<T> Outcome<T> {
    #[must_use]
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Designed { .. })
    }

    /// The result, if one was produced.
    #[must_use]
    pub fn result(&self) -> Option<&T> {
        match self {
            Self::Designed { result } => Some(result),
            Self::Rejected { .. } => None,
        }
    }

    /// The input problems, empty when a result was produced.
    #[must_use]
    pub fn errors(&self) -> &[String] {
        match self {
            Self::Designed { .. } => &[],
            Self::Rejected { errors } => errors,
        }
    }

    fn from_result(r: std::result::Result<T, ValidationErrors>) -> Self {
        match r {
            Ok(result) => Self::Designed { result },
            Err(e) => {
                warn!(errors = %e, "design request rejected");
                Self::Rejected { errors: e.0 }
            }
        }
    }
}

impl<T: Serialize> Serialize for Outcome<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut st = serializer.serialize_struct("Outcome", 2)?;
        st.serialize_field("ok", &self.is_ok())?;
        match self {
            Self::Designed { result } => st.serialize_field("result", result)?,
            Self::Rejected { errors } => st.serialize_field("errors", errors)?,
        }
        st.end()
    }
}

pub type DesignOutcome = Outcome<Box<AdapterDesign>>;
pub type OptimizeOutcome = Outcome<Box<OptimizedDesign>>;

/// Entry point: resolves a loose request and runs the engine on it.
#[derive(Debug, Clone)]
pub struct DesignAdapter<'a> {
    request: DesignRequest,
    catalog: Option<&'a RtuCatalog>,
}

impl<'a> DesignAdapter<'a> {
    /// Creates a new `DesignAdapter` operation.
    #[must_use]
    pub fn new(request: DesignRequest) -> Self {
        Self {
            request,
            catalog: None,
        }
    }

    /// Resolves RTU model codes against `catalog`.
    #[must_use]
    pub fn with_catalog(mut self, catalog: &'a RtuCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Designs the adapter with the request's parameters as given.
    ///
    /// # Errors
    ///
    /// Returns `InputError` when a curb has no usable dimensions. Every
    /// other input problem yields `Outcome::Rejected`.
    pub fn execute(&self) -> Result<DesignOutcome> {
        Ok(match self.build()? {
            Ok(build) => Outcome::from_result(build.execute().map(|d| {
                info!(
                    sp = d.report.static_pressure,
                    cog = d.report.cog_offset_in,
                    all_ok = d.report.all_ok(),
                    "adapter designed"
                );
                Box::new(d)
            })),
            Err(errors) => Outcome::from_result(Err(errors)),
        })
    }

    /// Searches corridor width and seat offset for the best design.
    ///
    /// # Errors
    ///
    /// Returns `InputError` when a curb has no usable dimensions. Every
    /// other input problem yields `Outcome::Rejected`.
    pub fn optimize(&self) -> Result<OptimizeOutcome> {
        Ok(match self.build()? {
            Ok(build) => {
                Outcome::from_result(OptimizeDesign::new(build).execute().map(Box::new))
            }
            Err(errors) => Outcome::from_result(Err(errors)),
        })
    }

    fn build(&self) -> Result<std::result::Result<BuildDesign, ValidationErrors>> {
        let req = &self.request;
        let mut errors = ValidationErrors::new();
        let old = req.existing.resolve("Existing", self.catalog, &mut errors)?;
        let new = req.new.resolve("New", self.catalog, &mut errors)?;
        if !errors.is_empty() {
            // Report the geometric problems too, not only the missing fields.
            old.check("Existing", &mut errors);
            new.check("New", &mut errors);
            return Ok(Err(errors));
        }
        Ok(Ok(BuildDesign::new(old, new, req.params.clone())
            .with_height(req.height)
            .with_site(req.site)))
    }
}
