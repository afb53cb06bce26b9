use std::fmt;

use thiserror::Error;

/// Top-level error type for the adapter engine.
#[derive(Debug, Error)]
pub enum AdapterError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Contract violations at the engine boundary.
///
/// These mean no meaningful computation is possible and are never folded
/// into a design report.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("{curb} curb: length and width are required (RTU model or manual)")]
    MissingDimensions { curb: &'static str },
}

/// Errors raised while loading an RTU catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("malformed catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("model {model}: dimensions must be positive, got {length} x {width}")]
    InvalidDimensions {
        model: String,
        length: f64,
        width: f64,
    },
}

/// Ordered list of recoverable input problems, one human-readable line each.
#[derive(Debug, Clone, Default, PartialEq, Error)]
pub struct ValidationErrors(pub Vec<String>);

impl ValidationErrors {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one message.
    pub fn push(&mut self, message: impl Into<String>) {
        self.0.push(message.into());
    }

    /// Returns `true` when no problem was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the recorded messages in order.
    #[must_use]
    pub fn messages(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} input validation error(s)", self.0.len())?;
        for msg in &self.0 {
            write!(f, "; {msg}")?;
        }
        Ok(())
    }
}

/// Convenience type alias for results using [`AdapterError`].
pub type Result<T> = std::result::Result<T, AdapterError>;
