mod design;
mod fit;
mod optimize;
mod panels;
mod resolve;
mod route;
mod site;
mod validate;

pub use design::{
    AdapterDesign, BuildDesign, DesignAdapter, DesignOutcome, OptimizeOutcome, Outcome,
};
pub use fit::{FitEnvelope, FittedLayout, PlacedOpenings};
pub use optimize::{OptimizeDesign, OptimizedDesign};
pub use panels::{Panel, PanelSchedule, SchedulePanels};
pub use resolve::{
    openings_cross, BaffleOutcome, InsertBaffles, Resolution, ResolveCrossing, RotateOnCrossing,
    RotationOutcome,
};
pub use route::RouteDuct;
pub use site::{pick_height, wind_pressure_psf, SiteAssessment};
pub use validate::{
    estimate_cog, opening_weighted_cog, seat_offset_cog, CogEstimate, DuctLoss, StaticPressure,
    ValidateDesign, ValidationReport, VP_CONSTANT,
};
