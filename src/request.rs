//! Loose request records as received from the upstream collaborator, and
//! their resolution into typed [`Footprint`]s.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::RtuCatalog;
use crate::error::{InputError, ValidationErrors};
use crate::geometry::{Footprint, Rect};
use crate::params::Parameters;

/// Curb outline dimensions as submitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurbDims {
    #[serde(rename = "L", default)]
    pub length: Option<f64>,
    #[serde(rename = "W", default)]
    pub width: Option<f64>,
    #[serde(rename = "H", default)]
    pub height: Option<f64>,
}

/// An opening as submitted; any field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OpeningInput {
    #[serde(rename = "L", default)]
    pub length: Option<f64>,
    #[serde(rename = "W", default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub x: Option<f64>,
    #[serde(default)]
    pub y: Option<f64>,
}

impl OpeningInput {
    #[must_use]
    pub fn new(length: f64, width: f64, x: f64, y: f64) -> Self {
        Self {
            length: Some(length),
            width: Some(width),
            x: Some(x),
            y: Some(y),
        }
    }

    /// Converts to a [`Rect`], recording a message for each missing field.
    /// Missing values read as zero so the dimensional checks still run.
    fn to_rect(&self, name: &str, errors: &mut ValidationErrors) -> Rect {
        let mut field = |value: Option<f64>, key: &str| {
            value.unwrap_or_else(|| {
                errors.push(format!("{name} missing {key}"));
                0.0
            })
        };
        let x = field(self.x, "x");
        let y = field(self.y, "y");
        let length = field(self.length, "L");
        let width = field(self.width, "W");
        Rect::new(x, y, length, width)
    }
}

/// One side of the adapter (existing or new curb).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurbInput {
    #[serde(default)]
    pub curb: Option<CurbDims>,
    /// RTU model code; its catalog dimensions take precedence when found.
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub supply: Option<OpeningInput>,
    #[serde(rename = "return", default)]
    pub return_: Option<OpeningInput>,
}

impl CurbInput {
    /// Manually dimensioned curb.
    #[must_use]
    pub fn manual(
        length: f64,
        width: f64,
        height: Option<f64>,
        supply: OpeningInput,
        return_: OpeningInput,
    ) -> Self {
        Self {
            curb: Some(CurbDims {
                length: Some(length),
                width: Some(width),
                height,
            }),
            model: None,
            supply: Some(supply),
            return_: Some(return_),
        }
    }

    /// Resolves the submitted record into a typed footprint.
    ///
    /// Opening problems are appended to `errors`; the caller decides whether
    /// to continue.
    ///
    /// # Errors
    ///
    /// Returns `InputError::MissingDimensions` when neither the catalog nor
    /// the manual dimensions supply both length and width.
    pub fn resolve(
        &self,
        name: &'static str,
        catalog: Option<&RtuCatalog>,
        errors: &mut ValidationErrors,
    ) -> std::result::Result<Footprint, InputError> {
        let dims = self.curb.clone().unwrap_or_default();
        let from_catalog = self
            .model
            .as_deref()
            .zip(catalog)
            .and_then(|(model, cat)| cat.lookup(model));

        let (length, width) = match from_catalog {
            Some(m) => {
                debug!(curb = name, model = %m.model, "dimensions from RTU catalog");
                (m.length, m.width)
            }
            None => match (dims.length, dims.width) {
                (Some(l), Some(w)) => (l, w),
                _ => return Err(InputError::MissingDimensions { curb: name }),
            },
        };

        let supply = resolve_opening(self.supply.as_ref(), &format!("{name} supply"), errors);
        let return_ = resolve_opening(self.return_.as_ref(), &format!("{name} return"), errors);
        let mut fp = Footprint::new(length, width, supply, return_);
        fp.height = dims.height;
        Ok(fp)
    }
}

fn resolve_opening(
    input: Option<&OpeningInput>,
    name: &str,
    errors: &mut ValidationErrors,
) -> Rect {
    if let Some(o) = input {
        o.to_rect(name, errors)
    } else {
        errors.push(format!("{name} opening is required."));
        Rect::new(0.0, 0.0, 0.0, 0.0)
    }
}

/// Site conditions used to derive a height when none is given.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteConditions {
    /// Roof slope factor in `[0, 1]`.
    pub slope_factor: f64,
    /// Design wind speed, mph.
    pub wind_speed_mph: f64,
}

impl Default for SiteConditions {
    fn default() -> Self {
        Self {
            slope_factor: 0.5,
            wind_speed_mph: 90.0,
        }
    }
}

/// A complete adapter design request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignRequest {
    pub existing: CurbInput,
    pub new: CurbInput,
    /// Explicit adapter height, inches.
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default)]
    pub site: SiteConditions,
    #[serde(default)]
    pub params: Parameters,
}

impl DesignRequest {
    #[must_use]
    pub fn new(existing: CurbInput, new: CurbInput) -> Self {
        Self {
            existing,
            new,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_params(mut self, params: Parameters) -> Self {
        self.params = params;
        self
    }

    #[must_use]
    pub fn with_height(mut self, height: f64) -> Self {
        self.height = Some(height);
        self
    }
}
