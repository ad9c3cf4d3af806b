//! Interactive plane-geometry engine.
//!
//! The crate computes everything an interactive 2-D diagram needs except the
//! pixels: model ⇄ device mapping, line intersection, hit-testing and dragging
//! of control points, integer snapping, and the classical triangle
//! constructions. A host application owns the window and the event source and
//! hands both to a `diagram::Session`; a renderer draws `scene::Scene`.
//!
//! Layout
//! - `geom2`: points, lines, intersection, triangle constructions (pure).
//! - `view`: viewport, scale and the coordinate transform.
//! - `interact`: snapping, hit-testing, drag gestures, debounce deadlines.
//! - `diagram`: diagram kinds, derived geometry, text, the session glue.
//! - `scene`: device-space display list.
//!
//! API Policy
//! - Invalid parameters (zero scale, wrong point count, bad tuning) are
//!   `error::DomainError`; degenerate geometry is `None`. Nothing here panics
//!   on user input.

pub mod config;
pub mod diagram;
pub mod error;
pub mod geom2;
pub mod interact;
pub mod points;
pub mod scene;
pub mod view;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use config::DiagramCfg;
pub use error::DomainError;
pub use nalgebra::Vector2 as Vec2;

/// Common exports for hosts.
pub mod prelude {
    pub use crate::config::DiagramCfg;
    pub use crate::diagram::{
        Derived, Diagram, DiagramKind, InputEvent, Session, TimedEvent, Update,
    };
    pub use crate::error::DomainError;
    pub use crate::geom2::{derive_triangle, intersect, GeomCfg, Line, Point};
    pub use crate::interact::{PointerEvent, PointerPhase};
    pub use crate::points::ControlPointSet;
    pub use crate::scene::{Ink, Primitive, Scene};
    pub use crate::view::{Scale, Transform, Viewport, Zoom};
    pub use nalgebra::Vector2 as Vec2;
}
