//! Inline style values written by the widget.

pub const DISPLAY_SHOWN: &str = "flex";
pub const DISPLAY_HIDDEN: &str = "none";
/// Clears a bottom/right anchor so top/left take effect.
pub const ANCHOR_CLEARED: &str = "auto";

/// Formats a CSS pixel length the way the browser echoes numbers back.
pub fn px(value: f64) -> String {
    if value == 0.0 {
        // Avoid "-0px".
        return "0px".to_string();
    }
    format!("{value}px")
}

/// Declarations that pin an element by its top/left corner.
///
/// Bottom and right are cleared last so a stylesheet anchor cannot win.
pub fn anchor_declarations(top: f64, left: f64) -> [(&'static str, String); 4] {
    [
        ("top", px(top)),
        ("left", px(left)),
        ("bottom", ANCHOR_CLEARED.to_string()),
        ("right", ANCHOR_CLEARED.to_string()),
    ]
}
