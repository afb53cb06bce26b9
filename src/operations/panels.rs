use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::geometry::Envelope;

/// One exterior side panel, flat size before flanging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Panel {
    pub name: String,
    pub length: f64,
    pub height: f64,
}

/// The four side panels of the envelope and any press-brake warnings.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelSchedule {
    pub panels: Vec<Panel>,
    pub warnings: Vec<String>,
}

/// Lays out the four exterior side panels and flags any longer than the
/// press brake can form.
#[derive(Debug, Clone)]
pub struct SchedulePanels {
    curb: Envelope,
    brake_limit: f64,
}

impl SchedulePanels {
    /// Creates a new `SchedulePanels` operation.
    #[must_use]
    pub fn new(curb: Envelope, brake_limit: f64) -> Self {
        Self { curb, brake_limit }
    }

    /// Executes the layout.
    #[must_use]
    pub fn execute(&self) -> PanelSchedule {
        let c = &self.curb;
        let panels: Vec<Panel> = [
            ("Front", c.length),
            ("Back", c.length),
            ("Left", c.width),
            ("Right", c.width),
        ]
        .into_iter()
        .map(|(name, length)| Panel {
            name: name.to_owned(),
            length,
            height: c.height,
        })
        .collect();

        let warnings: Vec<String> = panels
            .iter()
            .filter(|p| p.length > self.brake_limit)
            .map(|p| {
                format!(
                    "Panel '{}' length {:.1} in exceeds brake limit {:.1} in.",
                    p.name, p.length, self.brake_limit
                )
            })
            .collect();
        if !warnings.is_empty() {
            warn!(count = warnings.len(), "panels exceed brake limit");
        }
        PanelSchedule { panels, warnings }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn four_panels_no_warnings() {
        let s = SchedulePanels::new(
            Envelope {
                length: 48.0,
                width: 38.0,
                height: 22.0,
            },
            84.0,
        )
        .execute();
        assert_eq!(s.panels.len(), 4);
        assert_eq!(s.panels[0].name, "Front");
        assert!((s.panels[2].length - 38.0).abs() < 1e-12);
        assert!(s.warnings.is_empty());
    }

    #[test]
    fn long_panels_warn() {
        let s = SchedulePanels::new(
            Envelope {
                length: 96.0,
                width: 60.0,
                height: 18.0,
            },
            84.0,
        )
        .execute();
        assert_eq!(
            s.warnings,
            [
                "Panel 'Front' length 96.0 in exceeds brake limit 84.0 in.",
                "Panel 'Back' length 96.0 in exceeds brake limit 84.0 in.",
            ]
        );
    }
}
