//! Panel report rendering: the CLI's stand-in for a sky overlay.
//!
//! A graphical overlay would draw every panel footprint at its offset from the
//! current pointing direction.  The CLI prints the same information instead,
//! either as a plain-text table or as JSON for other tools to consume.
//!
//! # Data Transfer Objects (DTOs)
//!
//! [`PanelReport`] and [`PanelDto`] flatten the domain types into plain
//! serialisable fields so the JSON shape stays stable if the domain types
//! change.

use std::fmt::Write as _;

use mosaic_core::{AngularOffset, FieldOfView, MosaicExtent};
use serde::Serialize;

use crate::application::plan_mosaic::MosaicPlan;

/// Serialisable snapshot of one mosaic plan.
#[derive(Debug, Clone, Serialize)]
pub struct PanelReport {
    pub enabled: bool,
    pub panels_x: u32,
    pub panels_y: u32,
    pub overlap_percent: f64,
    pub rotation_deg: f64,
    /// Name of the selected equipment, if any.
    pub equipment: Option<String>,
    pub field_of_view: Option<FieldOfView>,
    pub extent: Option<MosaicExtent>,
    pub panels: Vec<PanelDto>,
}

/// One panel as shown to the user.
#[derive(Debug, Clone, Serialize)]
pub struct PanelDto {
    pub ix: u32,
    pub iy: u32,
    pub dx_deg: f64,
    pub dy_deg: f64,
    /// Footprint corners, counter-clockwise from the bottom-left.
    pub footprint: [AngularOffset; 4],
}

impl PanelReport {
    /// Builds a report from a plan.
    ///
    /// Panels are only listed when mosaic mode is enabled; a disabled mosaic
    /// is reported with its settings but nothing to draw.
    pub fn from_plan(plan: &MosaicPlan, equipment: Option<String>) -> Self {
        let settings = plan.settings;
        let panels = match (settings.enabled(), plan.field_of_view) {
            (true, Some(fov)) => plan
                .panels
                .iter()
                .map(|p| PanelDto {
                    ix: p.ix,
                    iy: p.iy,
                    dx_deg: p.center.dx,
                    dy_deg: p.center.dy,
                    footprint: p.footprint(fov, settings.rotation_deg()),
                })
                .collect(),
            _ => Vec::new(),
        };

        Self {
            enabled: settings.enabled(),
            panels_x: settings.panels_x(),
            panels_y: settings.panels_y(),
            overlap_percent: settings.overlap_percent(),
            rotation_deg: settings.rotation_deg(),
            equipment,
            field_of_view: plan.field_of_view,
            extent: plan.extent,
            panels,
        }
    }
}

/// Renders the report as pretty-printed JSON.
///
/// # Errors
///
/// Returns the `serde_json` error if serialization fails.
pub fn render_json(report: &PanelReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

/// Renders the report as a human-readable table.
pub fn render_text(report: &PanelReport) -> String {
    let mut out = String::new();
    let mode = if report.enabled { "enabled" } else { "disabled" };
    let _ = writeln!(
        out,
        "Mosaic {}x{} ({mode}), overlap {:.1}%, rotation {:.2}°",
        report.panels_x, report.panels_y, report.overlap_percent, report.rotation_deg
    );

    match (&report.equipment, report.field_of_view) {
        (Some(name), Some(fov)) => {
            let _ = writeln!(
                out,
                "Equipment: {name} ({:.4}° × {:.4}°)",
                fov.width_deg(),
                fov.height_deg()
            );
        }
        (_, Some(fov)) => {
            let _ = writeln!(out, "Field of view: {:.4}° × {:.4}°", fov.width_deg(), fov.height_deg());
        }
        (_, None) => {
            let _ = writeln!(out, "No equipment selected: nothing to draw.");
            return out;
        }
    }

    if let Some(extent) = report.extent {
        let _ = writeln!(
            out,
            "Coverage: {:.4}° × {:.4}°",
            extent.width_deg, extent.height_deg
        );
    }

    if !report.enabled {
        let _ = writeln!(out, "Mosaic mode is off; enable it to list panels.");
        return out;
    }

    let _ = writeln!(out, "{:>4} {:>4} {:>12} {:>12}", "ix", "iy", "dx (deg)", "dy (deg)");
    for p in &report.panels {
        let _ = writeln!(out, "{:>4} {:>4} {:>12.6} {:>12.6}", p.ix, p.iy, p.dx_deg, p.dy_deg);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use mosaic_core::{compute_panel_grid, mosaic_extent, MosaicSettings};

    fn plan(settings: MosaicSettings, fov: Option<FieldOfView>) -> MosaicPlan {
        MosaicPlan {
            settings,
            field_of_view: fov,
            extent: mosaic_extent(&settings, fov),
            panels: compute_panel_grid(&settings, fov).into(),
        }
    }

    fn fov() -> Option<FieldOfView> {
        Some(FieldOfView::square(2.0).unwrap())
    }

    #[test]
    fn test_report_lists_every_panel_when_enabled() {
        let report = PanelReport::from_plan(
            &plan(MosaicSettings::new(true, 2, 1, 50.0, 0.0), fov()),
            Some("finder".to_string()),
        );

        assert_eq!(report.panels.len(), 2);
        assert!((report.panels[0].dx_deg + 0.5).abs() < 1e-9);
        assert!((report.panels[0].footprint[0].dx + 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_report_lists_no_panels_when_disabled() {
        let report = PanelReport::from_plan(&plan(MosaicSettings::new(false, 3, 3, 0.0, 0.0), fov()), None);
        assert!(report.panels.is_empty());
        assert!(render_text(&report).contains("Mosaic mode is off"));
    }

    #[test]
    fn test_text_without_equipment_says_nothing_to_draw() {
        let report = PanelReport::from_plan(&plan(MosaicSettings::new(true, 3, 3, 0.0, 0.0), None), None);
        let text = render_text(&report);
        assert!(text.contains("No equipment selected"));
        assert!(report.panels.is_empty());
    }

    #[test]
    fn test_text_has_one_row_per_panel() {
        let report = PanelReport::from_plan(
            &plan(MosaicSettings::new(true, 3, 2, 10.0, 0.0), fov()),
            Some("finder".to_string()),
        );
        let text = render_text(&report);
        assert!(text.contains("Equipment: finder"));
        let rows = text.lines().filter(|l| l.trim_start().starts_with(char::is_numeric)).count();
        assert_eq!(rows, 6);
    }

    #[test]
    fn test_json_contains_extent_and_panels() {
        let report = PanelReport::from_plan(&plan(MosaicSettings::new(true, 2, 2, 0.0, 0.0), fov()), None);

        let json = render_json(&report).expect("serialize");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid JSON");

        assert_eq!(value["panels"].as_array().map(Vec::len), Some(4));
        assert_eq!(value["extent"]["width_deg"].as_f64(), Some(4.0));
        assert_eq!(value["field_of_view"]["width_deg"].as_f64(), Some(2.0));
    }
}
