//! Tunable constants for diagrams and sessions.
//!
//! Policy
//! - Defaults are the values the interactive diagrams were tuned with (hit
//!   radius, snap tolerances, debounce windows, zoom step). They are empirical,
//!   not derived; hosts may override any of them from a JSON file.
//! - Every field has a default (`#[serde(default)]`), so partial files work.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::geom2::{GeomCfg, TriangleCfg};
use crate::interact::{DragCfg, SnapCfg};
use crate::view::Scale;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagramCfg {
    pub geom: GeomCfg,
    pub drag: DragCfg,
    pub snap: SnapCfg,
    /// Idle time after the last move before control points are snapped.
    pub snap_quiescence_ms: u64,
    /// Idle time after the last resize notification before the viewport is applied.
    pub resize_debounce_ms: u64,
    /// Zoom step; zoom in multiplies the scale by this, zoom out divides.
    pub zoom_factor: f64,
    /// Pixels per model unit when a session opens.
    pub initial_scale: f64,
    /// Zoom range; a zoom step that would leave `[min_scale, max_scale]` is ignored.
    pub min_scale: f64,
    pub max_scale: f64,
    /// Vertex label distance from its vertex, in device pixels.
    pub label_offset_px: f64,
    /// Point marker radius, in device pixels.
    pub marker_radius_px: f64,
}

impl Default for DiagramCfg {
    fn default() -> Self {
        Self {
            geom: GeomCfg::default(),
            drag: DragCfg::default(),
            snap: SnapCfg::default(),
            snap_quiescence_ms: 300,
            resize_debounce_ms: 250,
            zoom_factor: 1.2,
            initial_scale: 60.0,
            min_scale: 10.0,
            max_scale: 1000.0,
            label_offset_px: 30.0,
            marker_radius_px: 3.0,
        }
    }
}

impl DiagramCfg {
    /// Reject settings that would make the geometry meaningless.
    pub fn validate(&self) -> Result<(), DomainError> {
        let bad = |msg: String| Err(DomainError::Config(msg));
        if !(self.drag.hit_radius > 0.0 && self.drag.hit_radius.is_finite()) {
            return bad(format!("hit_radius must be positive, got {}", self.drag.hit_radius));
        }
        for (axis, tol) in [("x", self.snap.tol_x), ("y", self.snap.tol_y)] {
            if !(0.0..0.5).contains(&tol) {
                return bad(format!("snap tolerance {axis} must be in [0, 0.5), got {tol}"));
            }
        }
        if !(self.zoom_factor > 1.0 && self.zoom_factor.is_finite()) {
            return bad(format!("zoom_factor must exceed 1, got {}", self.zoom_factor));
        }
        if !(self.geom.eps_det >= 0.0 && self.geom.eps_det.is_finite()) {
            return bad(format!("eps_det must be non-negative, got {}", self.geom.eps_det));
        }
        if !(self.label_offset_px.is_finite() && self.marker_radius_px.is_finite()) {
            return bad("label offset and marker radius must be finite".to_string());
        }
        Scale::new(self.initial_scale)?;
        Scale::new(self.min_scale)?;
        if !(self.min_scale..=self.max_scale).contains(&self.initial_scale) {
            return bad(format!(
                "initial_scale {} outside zoom range [{}, {}]",
                self.initial_scale, self.min_scale, self.max_scale
            ));
        }
        Ok(())
    }

    /// Whether `scale` lies inside the zoom range.
    #[inline]
    pub fn allows_scale(&self, scale: Scale) -> bool {
        (self.min_scale..=self.max_scale).contains(&scale.get())
    }

    #[inline]
    pub fn snap_quiescence(&self) -> Duration {
        Duration::from_millis(self.snap_quiescence_ms)
    }

    #[inline]
    pub fn resize_debounce(&self) -> Duration {
        Duration::from_millis(self.resize_debounce_ms)
    }

    /// Triangle settings with the label offset expressed in model units for `scale`.
    pub fn triangle_cfg(&self, scale: Scale) -> TriangleCfg {
        TriangleCfg {
            label_offset: self.label_offset_px / scale.get(),
            geom: self.geom,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert_eq!(DiagramCfg::default().validate(), Ok(()));
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg: DiagramCfg =
            serde_json::from_str(r#"{"snap": {"tol_y": 0.1}, "zoom_factor": 1.5}"#).unwrap();
        assert_eq!(cfg.snap.tol_x, 0.1);
        assert_eq!(cfg.snap.tol_y, 0.1);
        assert_eq!(cfg.zoom_factor, 1.5);
        assert_eq!(cfg.drag.hit_radius, 1.0);
        assert_eq!(cfg.snap_quiescence(), Duration::from_millis(300));
    }

    #[test]
    fn invalid_values_are_rejected() {
        let mut cfg = DiagramCfg::default();
        cfg.drag.hit_radius = 0.0;
        assert!(matches!(cfg.validate(), Err(DomainError::Config(_))));

        let mut cfg = DiagramCfg::default();
        cfg.snap.tol_x = 0.5;
        assert!(cfg.validate().is_err());

        let mut cfg = DiagramCfg::default();
        cfg.zoom_factor = 1.0;
        assert!(cfg.validate().is_err());

        let mut cfg = DiagramCfg::default();
        cfg.initial_scale = 0.0;
        assert_eq!(cfg.validate(), Err(DomainError::Scale(0.0)));

        let mut cfg = DiagramCfg::default();
        cfg.min_scale = 0.0;
        assert_eq!(cfg.validate(), Err(DomainError::Scale(0.0)));

        let mut cfg = DiagramCfg::default();
        cfg.max_scale = 50.0;
        assert!(matches!(cfg.validate(), Err(DomainError::Config(_))));
    }

    #[test]
    fn zoom_range_is_inclusive() {
        let cfg = DiagramCfg::default();
        assert!(cfg.allows_scale(Scale::new(10.0).unwrap()));
        assert!(cfg.allows_scale(Scale::new(1000.0).unwrap()));
        assert!(!cfg.allows_scale(Scale::new(9.9).unwrap()));
        assert!(!cfg.allows_scale(Scale::new(1000.5).unwrap()));
    }

    #[test]
    fn label_offset_converts_to_model_units() {
        let cfg = DiagramCfg::default();
        let tc = cfg.triangle_cfg(Scale::new(60.0).unwrap());
        assert_eq!(tc.label_offset, 0.5);
    }
}
