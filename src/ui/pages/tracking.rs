use dioxus::prelude::*;

use crate::{
    domain::{shipment::tracking_milestones, Shipment},
    infra::shipment_store::{JsonShipmentStore, ShipmentStore},
    ui::{
        components::{
            status_badge::StatusBadge,
            toast::{push_toast, ToastKind, ToastMessage},
        },
        theme,
    },
};

#[component]
pub fn TrackingPage() -> Element {
    let store = use_context::<Option<JsonShipmentStore>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();

    let mut query = use_signal(String::new);
    let mut found = use_signal(|| None::<Shipment>);
    let mut searched = use_signal(|| false);

    let on_track = move |evt: FormEvent| {
        evt.prevent_default();
        let needle = query();
        if needle.trim().is_empty() {
            push_toast(
                toasts,
                ToastKind::Warning,
                "Missing Information",
                "Enter a tracking number.",
            );
            return;
        }
        let Some(store) = store.as_ref() else {
            push_toast(
                toasts,
                ToastKind::Error,
                "Tracking Unavailable",
                "Shipment storage could not be opened.",
            );
            return;
        };
        match store.find_by_tracking_number(&needle) {
            Ok(shipment) => {
                if shipment.is_none() {
                    push_toast(
                        toasts,
                        ToastKind::Warning,
                        "Not Found",
                        format!("No shipment with tracking number {}.", needle.trim()),
                    );
                }
                found.set(shipment);
                searched.set(true);
            }
            Err(err) => {
                tracing::error!(%err, "tracking lookup failed");
                push_toast(toasts, ToastKind::Error, "Lookup Failed", err.to_string());
            }
        }
    };

    rsx! {
        div { class: "stack",
            section { class: "{theme::PANEL}",
                h2 { "Track Your Shipment" }
                form { class: "actions", onsubmit: on_track,
                    input {
                        placeholder: "e.g., TRK1710000000000",
                        value: query(),
                        oninput: move |evt| query.set(evt.value()),
                    }
                    button { class: "{theme::BTN_PRIMARY}", r#type: "submit", "Track" }
                }
            }
            match found() {
                Some(shipment) => rsx! { ShipmentDetails { shipment } },
                None if searched() => rsx! {
                    section { class: "{theme::PANEL}",
                        p { class: "note", "We couldn't find that tracking number. Check it and try again." }
                    }
                },
                None => rsx! {},
            }
        }
    }
}

#[component]
fn ShipmentDetails(shipment: Shipment) -> Element {
    let fields = shipment.fields;
    let milestones = tracking_milestones(fields.status);
    rsx! {
        section { class: "{theme::PANEL}",
            div { class: "result-row",
                h2 { "{shipment.tracking_number}" }
                StatusBadge { status: fields.status }
            }
            div { class: "grid-2",
                div { class: "result",
                    div { class: "result-row", span { "Customer" } span { "{fields.customer_name}" } }
                    div { class: "result-row", span { "Origin" } span { "{fields.origin}" } }
                    div { class: "result-row", span { "Destination" } span { "{fields.destination}" } }
                }
                div { class: "result",
                    div { class: "result-row", span { "Weight" } span { "{fields.weight_kg} kg" } }
                    div { class: "result-row", span { "Estimated delivery" } span { "{fields.estimated_delivery}" } }
                }
            }
            ul { class: "timeline",
                for step in milestones {
                    li {
                        key: "{step.label}",
                        span { class: if step.completed { "dot done" } else { "dot" } }
                        span {
                            class: if step.completed { "done-label" } else { "pending-label" },
                            "{step.label}"
                        }
                    }
                }
            }
        }
    }
}
