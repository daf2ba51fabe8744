#![deny(unsafe_code)]

/// Launcher widget state shared by every rendering target.
///
/// Nothing in this crate touches the DOM: the browser binding feeds cursor
/// positions and element rectangles in, and writes the returned placements back.
pub mod drag;
/// Rectangles, points and the panel placement rule.
pub mod geometry;
pub mod panel;
/// Widget settings and their JSON override layer.
pub mod settings;

pub use drag::{ClickDisposition, DragController, DragPhase, GestureId};
pub use geometry::{Delta, PanelLayout, PanelPlacement, Point, Rect, Viewport, place_panel};
pub use panel::{PanelController, PanelTransition, PanelVisibility};
pub use settings::{SettingsError, SettingsResult, WidgetSettings};
