use dioxus::prelude::*;

use crate::domain::ShipmentStatus;
use crate::ui::theme;

#[component]
pub fn StatusBadge(status: ShipmentStatus) -> Element {
    rsx! {
        span { class: "{theme::status_badge(status)}", "{status.label()}" }
    }
}
