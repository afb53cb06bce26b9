pub mod catalog;
pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;
pub mod params;
pub mod request;

pub use catalog::{RtuCatalog, RtuModel};
pub use error::{AdapterError, Result};
pub use operations::{AdapterDesign, DesignAdapter, DesignOutcome, OptimizedDesign};
pub use params::{MitigationStrategy, Parameters};
pub use request::{CurbInput, DesignRequest, OpeningInput, SiteConditions};
