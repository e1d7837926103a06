use dioxus::prelude::*;
use uuid::Uuid;

use super::status_badge::StatusBadge;
use crate::domain::Shipment;
use crate::ui::theme;

#[component]
pub fn ShipmentTable(
    rows: Vec<Shipment>,
    on_view: EventHandler<Uuid>,
    on_edit: EventHandler<Uuid>,
    on_delete: EventHandler<Uuid>,
) -> Element {
    let is_empty = rows.is_empty();
    rsx! {
        div {
            class: "table-container",
            table {
                thead {
                    tr {
                        th { "Tracking #" }
                        th { "Customer" }
                        th { "Route" }
                        th { "Weight" }
                        th { "Status" }
                        th { "Est. Delivery" }
                        th {}
                    }
                }
                tbody {
                    for row in rows {
                        ShipmentRowView {
                            key: "{row.id}",
                            row,
                            on_view,
                            on_edit,
                            on_delete,
                        }
                    }
                    if is_empty {
                        tr {
                            td {
                                class: "empty",
                                colspan: "7",
                                "No shipments yet. Create one to start tracking."
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn ShipmentRowView(
    row: Shipment,
    on_view: EventHandler<Uuid>,
    on_edit: EventHandler<Uuid>,
    on_delete: EventHandler<Uuid>,
) -> Element {
    let id = row.id;
    let fields = row.fields;
    rsx! {
        tr {
            td { "{row.tracking_number}" }
            td {
                div { "{fields.customer_name}" }
                div { class: "field-hint", "{fields.customer_email}" }
            }
            td { "{fields.origin} → {fields.destination}" }
            td { "{fields.weight_kg} kg" }
            td { StatusBadge { status: fields.status } }
            td { "{fields.estimated_delivery}" }
            td {
                class: "actions-cell",
                button {
                    class: "{theme::BTN_OUTLINE_SMALL}",
                    onclick: move |_| on_view.call(id),
                    "View"
                }
                button {
                    class: "{theme::BTN_OUTLINE_SMALL}",
                    onclick: move |_| on_edit.call(id),
                    "Edit"
                }
                button {
                    class: "{theme::BTN_DANGER_SMALL}",
                    onclick: move |_| on_delete.call(id),
                    "Delete"
                }
            }
        }
    }
}
