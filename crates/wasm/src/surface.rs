//! What launcher gestures and panel transitions do to the page elements.
//!
//! The browser binding implements [`WidgetSurface`] over the real elements;
//! everything here only sequences style writes through it.

use chatdock_core::{
    ClickDisposition, Delta, PanelController, PanelLayout, PanelTransition, PanelVisibility,
    Point, Rect, Viewport, place_panel,
};

use crate::error::DockResult;
use crate::style::{DISPLAY_HIDDEN, DISPLAY_SHOWN, anchor_declarations};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetPart {
    Launcher,
    Panel,
}

/// Element reads and inline style writes the widget relies on.
pub trait WidgetSurface {
    fn set_style(&self, part: WidgetPart, property: &'static str, value: &str) -> DockResult<()>;
    /// Inline `display` of the panel as the page currently has it.
    fn panel_display(&self) -> String;
    /// Layout origin of the launcher, as used by drag offsets.
    fn launcher_origin(&self) -> Point;
    fn launcher_rect(&self) -> Rect;
    fn viewport(&self) -> Viewport;
    /// Focus failures are logged by the implementation.
    fn focus_input(&self);
}

pub fn anchor<S: WidgetSurface + ?Sized>(
    surface: &S,
    part: WidgetPart,
    top: f64,
    left: f64,
) -> DockResult<()> {
    for (property, value) in anchor_declarations(top, left) {
        surface.set_style(part, property, &value)?;
    }
    Ok(())
}

pub fn reposition_panel<S: WidgetSurface + ?Sized>(
    surface: &S,
    layout: &PanelLayout,
) -> DockResult<()> {
    let placement = place_panel(surface.launcher_rect(), surface.viewport(), layout);
    anchor(surface, WidgetPart::Panel, placement.top, placement.left)
}

/// Moves the launcher by one drag step and lets the panel follow it.
pub fn drag_launcher<S: WidgetSurface + ?Sized>(
    surface: &S,
    delta: Delta,
    layout: &PanelLayout,
) -> DockResult<()> {
    let origin = surface.launcher_origin().offset(delta);
    anchor(surface, WidgetPart::Launcher, origin.y, origin.x)?;
    reposition_panel(surface, layout)
}

pub fn visibility_from_display(display: &str) -> PanelVisibility {
    if display.trim() == DISPLAY_SHOWN {
        PanelVisibility::Shown
    } else {
        PanelVisibility::Hidden
    }
}

/// Handles one launcher click against the panel's current inline display.
///
/// Page script may show or hide the panel directly, so the controller is
/// re-synced before toggling.
pub fn toggle_panel<S: WidgetSurface + ?Sized>(
    surface: &S,
    panel: &mut PanelController,
    click: ClickDisposition,
    layout: &PanelLayout,
) -> DockResult<PanelTransition> {
    panel.sync(visibility_from_display(&surface.panel_display()));
    let transition = panel.toggle(click);
    apply_transition(surface, transition, layout)?;
    Ok(transition)
}

/// Opening places the panel before showing it, then focuses the entry field.
pub fn apply_transition<S: WidgetSurface + ?Sized>(
    surface: &S,
    transition: PanelTransition,
    layout: &PanelLayout,
) -> DockResult<()> {
    match transition {
        PanelTransition::Opened => {
            reposition_panel(surface, layout)?;
            surface.set_style(WidgetPart::Panel, "display", DISPLAY_SHOWN)?;
            surface.focus_input();
        }
        PanelTransition::Closed => {
            surface.set_style(WidgetPart::Panel, "display", DISPLAY_HIDDEN)?;
        }
        PanelTransition::Suppressed => {
            log::debug!("launcher click after drag ignored");
        }
    }
    Ok(())
}

/// Enter submits, except while an input method is composing text.
pub fn submits_on_key(key: &str, composing: bool) -> bool {
    key == "Enter" && !composing
}
