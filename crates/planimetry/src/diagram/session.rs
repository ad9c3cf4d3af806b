//! Session: the glue between a host's input stream and one diagram.
//!
//! A session owns the current `Diagram`, the `Transform`, the drag gesture and
//! two debounce deadlines (post-drag snapping, resize). The host feeds it
//! `InputEvent`s stamped with its own monotonic clock; every call runs to
//! completion and reports what changed so the host knows what to redraw.
//!
//! Timer policy
//! - Every accepted move restarts the snap window. The snap fires on the
//!   first `tick`/`handle` at or after the deadline while no gesture is active;
//!   a deadline that passes mid-gesture waits for the release.
//! - Resize notifications only record the newest viewport; it is applied once
//!   the resize window passes without another notification.
//! - Zoom applies immediately; a step that would leave the configured scale
//!   range is dropped.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{Derived, Diagram, DiagramKind};
use crate::config::DiagramCfg;
use crate::error::DomainError;
use crate::interact::{snap_all, Debounce, DragController, PointerEvent};
use crate::view::{Scale, Transform, Viewport, Zoom};

/// One input from the host.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum InputEvent {
    Pointer(PointerEvent),
    Resize(Viewport),
    Zoom { direction: Zoom },
    /// Clock advanced with no other input.
    Tick,
}

/// An input event stamped with milliseconds since session start.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimedEvent {
    pub at_ms: u64,
    pub event: InputEvent,
}

impl TimedEvent {
    #[inline]
    pub fn at(&self) -> Duration {
        Duration::from_millis(self.at_ms)
    }
}

/// What a call changed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Update {
    /// Control points changed (drag move or snap).
    pub points: bool,
    /// Viewport or scale changed.
    pub view: bool,
}

impl Update {
    #[inline]
    pub fn any(self) -> bool {
        self.points || self.view
    }

    fn merge(self, other: Update) -> Update {
        Update {
            points: self.points || other.points,
            view: self.view || other.view,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Session {
    cfg: DiagramCfg,
    diagram: Diagram,
    transform: Transform,
    drag: DragController,
    snap_timer: Debounce,
    resize_timer: Debounce,
    pending_viewport: Option<Viewport>,
}

impl Session {
    /// Open a diagram of `kind` with its default points.
    pub fn new(kind: DiagramKind, viewport: Viewport, cfg: DiagramCfg) -> Result<Self, DomainError> {
        Self::with_diagram(Diagram::open(kind), viewport, cfg)
    }

    pub fn with_diagram(
        diagram: Diagram,
        viewport: Viewport,
        cfg: DiagramCfg,
    ) -> Result<Self, DomainError> {
        cfg.validate()?;
        let scale = Scale::new(cfg.initial_scale)?;
        tracing::debug!(kind = %diagram.kind(), scale = scale.get(), "session opened");
        Ok(Self {
            cfg,
            diagram,
            transform: Transform::new(viewport, scale),
            drag: DragController::new(cfg.drag),
            snap_timer: Debounce::new(cfg.snap_quiescence()),
            resize_timer: Debounce::new(cfg.resize_debounce()),
            pending_viewport: None,
        })
    }

    #[inline]
    pub fn cfg(&self) -> &DiagramCfg {
        &self.cfg
    }

    #[inline]
    pub fn diagram(&self) -> &Diagram {
        &self.diagram
    }

    #[inline]
    pub fn transform(&self) -> Transform {
        self.transform
    }

    #[inline]
    pub fn active_index(&self) -> Option<usize> {
        self.drag.active_index()
    }

    /// Viewport recorded by the last resize, not yet applied.
    #[inline]
    pub fn pending_viewport(&self) -> Option<Viewport> {
        self.pending_viewport
    }

    /// Earliest time a `tick` could change something.
    pub fn next_deadline(&self) -> Option<Duration> {
        match (self.snap_timer.deadline(), self.resize_timer.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Derived geometry for the current points and scale.
    pub fn derived(&self) -> Derived {
        self.diagram.derive(&self.cfg.triangle_cfg(self.transform.scale))
    }

    /// Apply one event at host time `now`. Due timers fire first.
    pub fn handle(&mut self, event: InputEvent, now: Duration) -> Update {
        let fired = self.tick(now);
        let up = match event {
            InputEvent::Pointer(ev) => {
                match self.drag.handle(ev, &self.transform, self.diagram.points()) {
                    Some(next) => {
                        self.diagram.replace_points(next);
                        self.snap_timer.schedule(now);
                        Update {
                            points: true,
                            view: false,
                        }
                    }
                    None => Update::default(),
                }
            }
            InputEvent::Resize(viewport) => {
                tracing::trace!(
                    width = viewport.width(),
                    height = viewport.height(),
                    "resize noted"
                );
                self.pending_viewport = Some(viewport);
                self.resize_timer.schedule(now);
                Update::default()
            }
            InputEvent::Zoom { direction } => self.zoom(direction),
            InputEvent::Tick => Update::default(),
        };
        fired.merge(up)
    }

    /// Fire whichever timers are due at `now`.
    pub fn tick(&mut self, now: Duration) -> Update {
        let mut up = Update::default();
        if self.resize_timer.fire(now) {
            if let Some(viewport) = self.pending_viewport.take() {
                tracing::debug!(
                    width = viewport.width(),
                    height = viewport.height(),
                    "viewport applied"
                );
                self.transform = self.transform.with_viewport(viewport);
                up.view = true;
            }
        }
        if self.drag.active_index().is_none() && self.snap_timer.fire(now) {
            self.drag.take_pending();
            if let Some(snapped) = snap_all(self.diagram.points(), self.cfg.snap) {
                tracing::debug!(?now, "control points snapped");
                self.diagram.replace_points(snapped);
                up.points = true;
            }
        }
        up
    }

    /// Replay a script in order; returns the per-event updates.
    pub fn replay(&mut self, script: &[TimedEvent]) -> Vec<Update> {
        script.iter().map(|t| self.handle(t.event, t.at())).collect()
    }

    fn zoom(&mut self, direction: Zoom) -> Update {
        match self.transform.scale.zoomed(direction, self.cfg.zoom_factor) {
            Ok(scale) if !self.cfg.allows_scale(scale) => {
                tracing::debug!(?direction, scale = scale.get(), "zoom outside range ignored");
                Update::default()
            }
            Ok(scale) => {
                tracing::debug!(?direction, scale = scale.get(), "zoom");
                self.transform = self.transform.with_scale(scale);
                Update {
                    points: false,
                    view: true,
                }
            }
            Err(err) => {
                tracing::warn!(%err, "zoom ignored");
                Update::default()
            }
        }
    }
}
