//! Class helpers shared across pages. The rules live in `assets/main.css`.

use crate::domain::ShipmentStatus;

pub const PANEL: &str = "panel";
pub const BTN_PRIMARY: &str = "btn btn-primary";
pub const BTN_OUTLINE: &str = "btn btn-outline";
pub const BTN_DANGER_SMALL: &str = "btn btn-danger btn-small";
pub const BTN_OUTLINE_SMALL: &str = "btn btn-outline btn-small";

pub fn nav_button(active: bool) -> &'static str {
    if active {
        "nav-button active"
    } else {
        "nav-button"
    }
}

/// Marks a form field red when the current error belongs to it.
pub fn field(invalid: bool) -> &'static str {
    if invalid {
        "field invalid"
    } else {
        "field"
    }
}

pub fn status_badge(status: ShipmentStatus) -> String {
    format!("badge badge-{}", status.key())
}
