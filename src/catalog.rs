use std::collections::HashMap;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use crate::error::{CatalogError, Result};

/// Cabinet size assumed for any `48FC` model missing from the table.
const FAMILY_48FC: (&str, f64, f64) = ("48FC", 42.0, 30.0);

/// Nominal cabinet dimensions of one rooftop-unit model, in inches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RtuModel {
    pub model: String,
    pub length: f64,
    pub width: f64,
}

/// Read-only RTU model lookup table.
///
/// Built once from its source and then only queried; the engine receives it
/// by reference during input resolution. Models keep their source order.
#[derive(Debug, Clone, Default)]
pub struct RtuCatalog {
    models: Vec<RtuModel>,
    index: HashMap<String, usize>,
}

impl RtuCatalog {
    /// Builds a catalog from `(model, length, width)` entries.
    ///
    /// Model keys are stored upper-cased. A later duplicate replaces the
    /// dimensions of an earlier one but keeps its position.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::InvalidDimensions` if any entry has a
    /// non-positive dimension.
    pub fn from_entries<I, S>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, f64, f64)>,
        S: AsRef<str>,
    {
        let mut catalog = Self::default();
        for (model, length, width) in entries {
            let model = model.as_ref().trim().to_uppercase();
            if length <= 0.0 || width <= 0.0 {
                return Err(CatalogError::InvalidDimensions {
                    model,
                    length,
                    width,
                }
                .into());
            }
            if let Some(&i) = catalog.index.get(&model) {
                catalog.models[i].length = length;
                catalog.models[i].width = width;
            } else {
                catalog.index.insert(model.clone(), catalog.models.len());
                catalog.models.push(RtuModel {
                    model,
                    length,
                    width,
                });
            }
        }
        debug!(count = catalog.len(), "loaded RTU catalog");
        Ok(catalog)
    }

    /// Parses a JSON object mapping model codes to `[length, width]`.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Parse` for malformed JSON, or
    /// `CatalogError::InvalidDimensions` for non-positive dimensions.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: SourceEntries = serde_json::from_str(json).map_err(CatalogError::from)?;
        Self::from_entries(raw.0)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.models.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Looks up a model.
    ///
    /// Tries the exact (case-insensitive) key, then the `48FC` family size,
    /// then the first model matching once punctuation and whitespace are
    /// ignored.
    #[must_use]
    pub fn lookup(&self, model: &str) -> Option<RtuModel> {
        let key = model.trim().to_uppercase();
        if key.is_empty() {
            return None;
        }
        if let Some(&i) = self.index.get(&key) {
            return self.models.get(i).cloned();
        }
        let (family, length, width) = FAMILY_48FC;
        if key.starts_with(family) {
            return Some(RtuModel {
                model: key,
                length,
                width,
            });
        }
        let norm = normalize(&key);
        self.models
            .iter()
            .find(|m| normalize(&m.model) == norm)
            .cloned()
    }

    /// Returns up to `limit` models whose code contains `query`, in source
    /// order.
    #[must_use]
    pub fn search(&self, query: &str, limit: usize) -> Vec<RtuModel> {
        let q = query.trim().to_uppercase();
        if q.is_empty() {
            return Vec::new();
        }
        self.models
            .iter()
            .filter(|m| m.model.contains(&q))
            .take(limit)
            .cloned()
            .collect()
    }
}

fn normalize(key: &str) -> String {
    key.chars().filter(char::is_ascii_alphanumeric).collect()
}

/// `model -> [length, width]` entries in the order they appear in the
/// source document.
struct SourceEntries(Vec<(String, f64, f64)>);

impl<'de> Deserialize<'de> for SourceEntries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = SourceEntries;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of model codes to [length, width]")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut map: A,
            ) -> std::result::Result<Self::Value, A::Error> {
                let mut out = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((model, (length, width))) = map.next_entry::<String, (f64, f64)>()? {
                    out.push((model, length, width));
                }
                Ok(SourceEntries(out))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}
