use serde::{Deserialize, Serialize};

pub const DEFAULT_PANEL_WIDTH: f64 = 350.0;
pub const DEFAULT_PANEL_HEIGHT: f64 = 500.0;
/// Gap kept between the panel and the launcher or the viewport edges.
pub const DEFAULT_PANEL_MARGIN: f64 = 10.0;

/// Cursor or element origin in client (viewport) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns the movement needed to go from `self` to `next`.
    pub fn delta_to(self, next: Point) -> Delta {
        Delta {
            dx: next.x - self.x,
            dy: next.y - self.y,
        }
    }

    pub fn offset(self, delta: Delta) -> Point {
        Point {
            x: self.x + delta.dx,
            y: self.y + delta.dy,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Delta {
    pub dx: f64,
    pub dy: f64,
}

/// Axis-aligned box, as reported by `getBoundingClientRect`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Fixed panel footprint used for placement.
///
/// These are layout inputs, not measurements of the rendered panel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PanelLayout {
    #[serde(default = "default_panel_width")]
    pub width: f64,
    #[serde(default = "default_panel_height")]
    pub height: f64,
    #[serde(default = "default_panel_margin")]
    pub margin: f64,
}

impl Default for PanelLayout {
    fn default() -> Self {
        Self {
            width: DEFAULT_PANEL_WIDTH,
            height: DEFAULT_PANEL_HEIGHT,
            margin: DEFAULT_PANEL_MARGIN,
        }
    }
}

impl PanelLayout {
    pub fn normalized(self) -> Self {
        let defaults = Self::default();
        Self {
            width: positive_or(self.width, defaults.width),
            height: positive_or(self.height, defaults.height),
            margin: if self.margin.is_finite() && self.margin >= 0.0 {
                self.margin
            } else {
                defaults.margin
            },
        }
    }
}

/// Top/left position written to the panel; bottom/right are always cleared.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PanelPlacement {
    pub top: f64,
    pub left: f64,
}

/// Places the panel above the launcher, right-aligned to its right edge.
///
/// The result is clamped to `layout.margin` from the top and left edges. When
/// the panel would overflow the right edge it is pulled back inside the
/// viewport, which takes precedence over the left clamp on narrow viewports.
pub fn place_panel(launcher: Rect, viewport: Viewport, layout: &PanelLayout) -> PanelPlacement {
    let mut top = launcher.top - layout.height - layout.margin;
    let mut left = launcher.right() - layout.width;

    if top < layout.margin {
        top = layout.margin;
    }
    if left < layout.margin {
        left = layout.margin;
    }
    if left + layout.width > viewport.width {
        left = viewport.width - layout.width - layout.margin;
    }

    PanelPlacement { top, left }
}

fn positive_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        fallback
    }
}

fn default_panel_width() -> f64 {
    DEFAULT_PANEL_WIDTH
}

fn default_panel_height() -> f64 {
    DEFAULT_PANEL_HEIGHT
}

fn default_panel_margin() -> f64 {
    DEFAULT_PANEL_MARGIN
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Viewport = Viewport::new(1280.0, 800.0);

    #[test]
    fn panel_sits_above_launcher_right_aligned() {
        let launcher = Rect::new(1180.0, 700.0, 60.0, 60.0);
        let placement = place_panel(launcher, VIEWPORT, &PanelLayout::default());

        assert_eq!(placement.top, 700.0 - 500.0 - 10.0);
        assert_eq!(placement.left, 1180.0 - 350.0 + 60.0);
    }

    #[test]
    fn launcher_near_top_left_clamps_both_axes() {
        let launcher = Rect::new(20.0, 30.0, 60.0, 60.0);
        let placement = place_panel(launcher, VIEWPORT, &PanelLayout::default());

        assert_eq!(placement, PanelPlacement { top: 10.0, left: 10.0 });
    }

    #[test]
    fn right_overflow_pulls_panel_back_inside() {
        // Launcher partly past the right edge after a drag.
        let launcher = Rect::new(1250.0, 700.0, 60.0, 60.0);
        let placement = place_panel(launcher, VIEWPORT, &PanelLayout::default());

        assert_eq!(placement.left, 1280.0 - 350.0 - 10.0);
        assert_eq!(placement.top, 190.0);
    }

    #[test]
    fn narrow_viewport_prefers_right_edge_over_left_clamp() {
        let launcher = Rect::new(0.0, 600.0, 60.0, 60.0);
        let placement = place_panel(launcher, Viewport::new(300.0, 800.0), &PanelLayout::default());

        assert_eq!(placement.left, 300.0 - 350.0 - 10.0);
    }

    #[test]
    fn custom_layout_drives_every_offset() {
        let layout = PanelLayout {
            width: 200.0,
            height: 100.0,
            margin: 4.0,
        };
        let launcher = Rect::new(500.0, 400.0, 40.0, 40.0);
        let placement = place_panel(launcher, VIEWPORT, &layout);

        assert_eq!(placement, PanelPlacement { top: 296.0, left: 340.0 });
    }

    #[test]
    fn placement_is_idempotent() {
        let launcher = Rect::new(640.0, 20.0, 56.0, 56.0);
        let layout = PanelLayout::default();

        let first = place_panel(launcher, VIEWPORT, &layout);
        let second = place_panel(launcher, VIEWPORT, &layout);
        assert_eq!(first, second);
    }

    #[test]
    fn normalized_layout_replaces_invalid_dimensions() {
        let layout = PanelLayout {
            width: 0.0,
            height: f64::NAN,
            margin: -3.0,
        }
        .normalized();

        assert_eq!(layout, PanelLayout::default());
    }

    #[test]
    fn point_delta_round_trips_through_offset() {
        let start = Point::new(12.0, 40.0);
        let end = Point::new(30.0, 25.0);
        let delta = start.delta_to(end);

        assert_eq!(delta, Delta { dx: 18.0, dy: -15.0 });
        assert_eq!(start.offset(delta), end);
    }
}
