//! Panel grid geometry.
//!
//! The mosaic tiles a rectangle `panels_x` panels wide by `panels_y` panels
//! tall.  Every panel has the footprint of the equipment field of view, and
//! adjacent panels overlap by `overlap_percent` of that field along each axis:
//!
//! ```text
//! stride = fov * (1 - overlap_percent / 100)
//! x      = (ix - (panels_x - 1) / 2) * stride_x
//! y      = (iy - (panels_y - 1) / 2) * stride_y
//! ```
//!
//! The grid is centered on the pointing direction for odd and even panel
//! counts alike, then rotated about the origin by `rotation_deg`.
//! Panels are emitted row-major: `ix` varies fastest, then `iy`.

use serde::Serialize;

use super::field_of_view::FieldOfView;
use super::settings::MosaicSettings;

/// An angular offset from the mosaic center, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AngularOffset {
    pub dx: f64,
    pub dy: f64,
}

impl AngularOffset {
    pub const ORIGIN: AngularOffset = AngularOffset { dx: 0.0, dy: 0.0 };

    /// Rotates the offset about the origin by a precomputed `(sin, cos)` pair.
    fn rotated(self, sin: f64, cos: f64) -> Self {
        Self {
            dx: self.dx * cos - self.dy * sin,
            dy: self.dx * sin + self.dy * cos,
        }
    }
}

/// One panel of the mosaic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PanelDescriptor {
    /// Column index, `0 <= ix < panels_x`.
    pub ix: u32,
    /// Row index, `0 <= iy < panels_y`.
    pub iy: u32,
    /// Center of the panel relative to the mosaic center, after rotation.
    pub center: AngularOffset,
}

impl PanelDescriptor {
    /// Returns the four corners of this panel's footprint.
    ///
    /// Corners are listed counter-clockwise starting at the bottom-left corner
    /// of the unrotated rectangle, and are rotated by `rotation_deg` about the
    /// panel center so they line up with the rotated grid.
    pub fn footprint(&self, fov: FieldOfView, rotation_deg: f64) -> [AngularOffset; 4] {
        let (sin, cos) = rotation_deg.to_radians().sin_cos();
        let hw = fov.width_deg() / 2.0;
        let hh = fov.height_deg() / 2.0;
        [(-hw, -hh), (hw, -hh), (hw, hh), (-hw, hh)].map(|(dx, dy)| {
            let corner = AngularOffset { dx, dy }.rotated(sin, cos);
            AngularOffset {
                dx: self.center.dx + corner.dx,
                dy: self.center.dy + corner.dy,
            }
        })
    }
}

/// Total angular coverage of the mosaic before rotation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MosaicExtent {
    pub width_deg: f64,
    pub height_deg: f64,
}

/// Distance between adjacent panel centers along one axis.
fn stride(fov_extent_deg: f64, overlap_percent: f64) -> f64 {
    fov_extent_deg * (1.0 - overlap_percent / 100.0)
}

/// Lays out every panel of the mosaic.
///
/// Returns an empty vector when `fov` is `None` (no equipment selected).
/// The `enabled` flag is not consulted here; callers decide whether to draw.
pub fn compute_panel_grid(settings: &MosaicSettings, fov: Option<FieldOfView>) -> Vec<PanelDescriptor> {
    let Some(fov) = fov else {
        return Vec::new();
    };

    let stride_x = stride(fov.width_deg(), settings.overlap_percent());
    let stride_y = stride(fov.height_deg(), settings.overlap_percent());
    let half_x = (settings.panels_x() as f64 - 1.0) / 2.0;
    let half_y = (settings.panels_y() as f64 - 1.0) / 2.0;
    let (sin, cos) = settings.rotation_deg().to_radians().sin_cos();

    let mut panels = Vec::with_capacity(settings.panel_count());
    for iy in 0..settings.panels_y() {
        for ix in 0..settings.panels_x() {
            let unrotated = AngularOffset {
                dx: (ix as f64 - half_x) * stride_x,
                dy: (iy as f64 - half_y) * stride_y,
            };
            panels.push(PanelDescriptor {
                ix,
                iy,
                center: unrotated.rotated(sin, cos),
            });
        }
    }
    panels
}

/// Returns the unrotated angular size covered by the whole mosaic:
/// one full field plus one stride per additional panel, on each axis.
pub fn mosaic_extent(settings: &MosaicSettings, fov: Option<FieldOfView>) -> Option<MosaicExtent> {
    let fov = fov?;
    let extra_x = (settings.panels_x() - 1) as f64;
    let extra_y = (settings.panels_y() - 1) as f64;
    Some(MosaicExtent {
        width_deg: fov.width_deg() + extra_x * stride(fov.width_deg(), settings.overlap_percent()),
        height_deg: fov.height_deg()
            + extra_y * stride(fov.height_deg(), settings.overlap_percent()),
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn settings(px: i32, py: i32, overlap: f64, rotation: f64) -> MosaicSettings {
        MosaicSettings::new(true, px, py, overlap, rotation)
    }

    fn fov(deg: f64) -> Option<FieldOfView> {
        Some(FieldOfView::square(deg).unwrap())
    }

    fn assert_offset(actual: AngularOffset, dx: f64, dy: f64) {
        assert!(
            (actual.dx - dx).abs() < EPS && (actual.dy - dy).abs() < EPS,
            "expected ({dx}, {dy}), got ({}, {})",
            actual.dx,
            actual.dy
        );
    }

    // ── compute_panel_grid ────────────────────────────────────────────────────

    #[test]
    fn test_compute_panel_grid_returns_empty_without_field_of_view() {
        let panels = compute_panel_grid(&settings(3, 3, 20.0, 45.0), None);
        assert!(panels.is_empty());
    }

    #[test]
    fn test_compute_panel_grid_single_panel_sits_at_origin_for_any_rotation() {
        for rotation in [0.0, 33.0, 90.0, 271.5] {
            let panels = compute_panel_grid(&settings(1, 1, 50.0, rotation), fov(1.0));
            assert_eq!(panels.len(), 1);
            assert_eq!(panels[0].center.dx, 0.0);
            assert_eq!(panels[0].center.dy, 0.0);
        }
    }

    #[test]
    fn test_compute_panel_grid_two_by_two_without_overlap_is_symmetric() {
        let f = 1.2;
        let panels = compute_panel_grid(&settings(2, 2, 0.0, 0.0), fov(f));

        assert_eq!(panels.len(), 4);
        assert_offset(panels[0].center, -f / 2.0, -f / 2.0);
        assert_offset(panels[1].center, f / 2.0, -f / 2.0);
        assert_offset(panels[2].center, -f / 2.0, f / 2.0);
        assert_offset(panels[3].center, f / 2.0, f / 2.0);
    }

    #[test]
    fn test_compute_panel_grid_half_overlap_halves_the_stride() {
        let panels = compute_panel_grid(&settings(2, 1, 50.0, 0.0), fov(2.0));

        assert_eq!(panels.len(), 2);
        assert_offset(panels[0].center, -0.5, 0.0);
        assert_offset(panels[1].center, 0.5, 0.0);
    }

    #[test]
    fn test_compute_panel_grid_odd_count_has_center_panel_at_origin() {
        let panels = compute_panel_grid(&settings(3, 3, 20.0, 0.0), fov(1.0));
        let center = panels.iter().find(|p| p.ix == 1 && p.iy == 1).unwrap();
        assert_offset(center.center, 0.0, 0.0);
        // stride = 1.0 * 0.8
        assert_offset(panels[0].center, -0.8, -0.8);
    }

    #[test]
    fn test_compute_panel_grid_uses_width_and_height_strides_independently() {
        let rect = Some(FieldOfView::new(2.0, 1.0).unwrap());
        let panels = compute_panel_grid(&settings(2, 2, 0.0, 0.0), rect);
        assert_offset(panels[3].center, 1.0, 0.5);
    }

    #[test]
    fn test_compute_panel_grid_is_row_major() {
        let panels = compute_panel_grid(&settings(3, 2, 10.0, 0.0), fov(1.0));
        let order: Vec<(u32, u32)> = panels.iter().map(|p| (p.ix, p.iy)).collect();
        assert_eq!(order, vec![(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1)]);
    }

    #[test]
    fn test_compute_panel_grid_rotation_by_90_degrees_swaps_axes() {
        let panels = compute_panel_grid(&settings(2, 1, 0.0, 90.0), fov(2.0));
        // (-1, 0) rotated by 90° counter-clockwise is (0, -1)
        assert_offset(panels[0].center, 0.0, -1.0);
        assert_offset(panels[1].center, 0.0, 1.0);
    }

    #[test]
    fn test_compute_panel_grid_rotation_preserves_distance_from_center() {
        let plain = compute_panel_grid(&settings(4, 3, 15.0, 0.0), fov(0.7));
        let rotated = compute_panel_grid(&settings(4, 3, 15.0, 37.0), fov(0.7));
        for (a, b) in plain.iter().zip(&rotated) {
            let ra = a.center.dx.hypot(a.center.dy);
            let rb = b.center.dx.hypot(b.center.dy);
            assert!((ra - rb).abs() < EPS);
        }
    }

    #[test]
    fn test_compute_panel_grid_maximum_grid_has_400_panels() {
        let panels = compute_panel_grid(&settings(20, 20, 0.0, 0.0), fov(1.0));
        assert_eq!(panels.len(), 400);
        assert!(panels.iter().all(|p| p.ix < 20 && p.iy < 20));
    }

    #[test]
    fn test_compute_panel_grid_adjacent_centers_never_coincide() {
        let panels = compute_panel_grid(&settings(5, 1, 50.0, 0.0), fov(0.1));
        for pair in panels.windows(2) {
            assert!(pair[1].center.dx - pair[0].center.dx > 0.0);
        }
    }

    // ── footprint ─────────────────────────────────────────────────────────────

    #[test]
    fn test_footprint_without_rotation_is_axis_aligned_rectangle() {
        let f = FieldOfView::new(2.0, 1.0).unwrap();
        let panel = PanelDescriptor {
            ix: 0,
            iy: 0,
            center: AngularOffset { dx: 3.0, dy: 0.0 },
        };
        let corners = panel.footprint(f, 0.0);
        assert_offset(corners[0], 2.0, -0.5);
        assert_offset(corners[1], 4.0, -0.5);
        assert_offset(corners[2], 4.0, 0.5);
        assert_offset(corners[3], 2.0, 0.5);
    }

    #[test]
    fn test_footprint_rotation_keeps_corners_around_center() {
        let f = FieldOfView::square(1.0).unwrap();
        let panel = PanelDescriptor {
            ix: 0,
            iy: 0,
            center: AngularOffset::ORIGIN,
        };
        let corners = panel.footprint(f, 45.0);
        let half_diagonal = (0.5f64).hypot(0.5);
        for c in corners {
            assert!((c.dx.hypot(c.dy) - half_diagonal).abs() < EPS);
        }
        // Bottom-left corner of a square rotated by 45° points straight down.
        assert_offset(corners[0], 0.0, -half_diagonal);
    }

    // ── mosaic_extent ─────────────────────────────────────────────────────────

    #[test]
    fn test_mosaic_extent_adds_one_stride_per_extra_panel() {
        let extent = mosaic_extent(&settings(3, 2, 50.0, 0.0), fov(2.0)).unwrap();
        // 2 + 2 * 1.0 and 2 + 1 * 1.0
        assert!((extent.width_deg - 4.0).abs() < EPS);
        assert!((extent.height_deg - 3.0).abs() < EPS);
    }

    #[test]
    fn test_mosaic_extent_single_panel_equals_field_of_view() {
        let extent = mosaic_extent(&settings(1, 1, 30.0, 0.0), fov(0.5)).unwrap();
        assert_eq!(extent.width_deg, 0.5);
        assert_eq!(extent.height_deg, 0.5);
    }

    #[test]
    fn test_mosaic_extent_is_none_without_field_of_view() {
        assert_eq!(mosaic_extent(&settings(2, 2, 0.0, 0.0), None), None);
    }
}
