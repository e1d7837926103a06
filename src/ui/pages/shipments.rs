use dioxus::prelude::*;
use uuid::Uuid;

use crate::{
    domain::{AppState, Shipment, ShipmentDraft, ShipmentStatus},
    infra::shipment_store::{JsonShipmentStore, ShipmentStore, StoreError},
    ui::{
        components::{
            kpi_card::KpiCard,
            shipment_form::ShipmentForm,
            shipment_table::ShipmentTable,
            status_badge::StatusBadge,
            toast::{push_toast, ToastKind, ToastMessage},
        },
        theme,
    },
};

#[derive(Clone, Debug, PartialEq)]
enum Dialog {
    Create,
    Edit(Shipment),
    View(Shipment),
    ConfirmDelete(Shipment),
}

#[component]
pub fn ShipmentsPage() -> Element {
    let state = use_context::<Signal<AppState>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();
    let store = use_context::<Option<JsonShipmentStore>>();

    let mut dialog = use_signal(|| None::<Dialog>);

    use_hook({
        let store = store.clone();
        move || refresh(state, toasts, store.as_ref())
    });

    let Some(store) = store else {
        return rsx! {
            section { class: "{theme::PANEL}",
                h2 { "Shipments" }
                p { class: "note", "Shipment storage is unavailable on this system." }
            }
        };
    };

    let shipments = state.with(|st| st.shipments.clone());
    let total = shipments.len();
    let in_transit = shipments
        .iter()
        .filter(|s| s.fields.status == ShipmentStatus::InTransit)
        .count();
    let delivered = shipments
        .iter()
        .filter(|s| s.fields.status == ShipmentStatus::Delivered)
        .count();

    let find = move |id: Uuid| state.with(|st| st.shipments.iter().find(|s| s.id == id).cloned());

    let on_submit = {
        let store = store.clone();
        move |draft: ShipmentDraft| {
            let fields = match draft.validate() {
                Ok(fields) => fields,
                Err(err) => {
                    push_toast(toasts, ToastKind::Error, "Validation Error", err.to_string());
                    return;
                }
            };
            let outcome = match dialog() {
                Some(Dialog::Edit(existing)) => store
                    .update(existing.id, fields)
                    .map(|s| ("Shipment Updated", s.tracking_number)),
                _ => store
                    .create(fields)
                    .map(|s| ("Shipment Created", s.tracking_number)),
            };
            match outcome {
                Ok((title, tracking_number)) => {
                    push_toast(toasts, ToastKind::Success, title, tracking_number);
                    dialog.set(None);
                    refresh(state, toasts, Some(&store));
                }
                Err(err) => report_store_error(toasts, err),
            }
        }
    };

    let mut on_confirm_delete = {
        let store = store.clone();
        move |id: Uuid| match store.delete(id) {
            Ok(()) => {
                push_toast(
                    toasts,
                    ToastKind::Success,
                    "Shipment Deleted",
                    "The shipment was removed.",
                );
                dialog.set(None);
                refresh(state, toasts, Some(&store));
            }
            Err(err) => report_store_error(toasts, err),
        }
    };

    rsx! {
        div { class: "stack",
            div { class: "grid-3",
                KpiCard {
                    title: "Shipments".to_string(),
                    value: total.to_string(),
                    description: None,
                }
                KpiCard {
                    title: "In Transit".to_string(),
                    value: in_transit.to_string(),
                    description: None,
                }
                KpiCard {
                    title: "Delivered".to_string(),
                    value: delivered.to_string(),
                    description: None,
                }
            }
            section { class: "{theme::PANEL}",
                div { class: "result-row",
                    h2 { "Shipments" }
                    button {
                        class: "{theme::BTN_PRIMARY}",
                        onclick: move |_| dialog.set(Some(Dialog::Create)),
                        "New Shipment"
                    }
                }
                ShipmentTable {
                    rows: shipments,
                    on_view: move |id| {
                        if let Some(shipment) = find(id) {
                            dialog.set(Some(Dialog::View(shipment)));
                        }
                    },
                    on_edit: move |id| {
                        if let Some(shipment) = find(id) {
                            dialog.set(Some(Dialog::Edit(shipment)));
                        }
                    },
                    on_delete: move |id| {
                        if let Some(shipment) = find(id) {
                            dialog.set(Some(Dialog::ConfirmDelete(shipment)));
                        }
                    },
                }
            }
            match dialog() {
                Some(Dialog::Create) => rsx! {
                    ShipmentForm {
                        title: "New Shipment".to_string(),
                        submit_label: "Create Shipment".to_string(),
                        initial: ShipmentDraft::default(),
                        busy: false,
                        on_submit: on_submit,
                        on_cancel: move |_| dialog.set(None),
                    }
                },
                Some(Dialog::Edit(shipment)) => rsx! {
                    ShipmentForm {
                        key: "{shipment.id}",
                        title: format!("Edit {}", shipment.tracking_number),
                        submit_label: "Save Changes".to_string(),
                        initial: ShipmentDraft::from(&shipment.fields),
                        busy: false,
                        on_submit: on_submit,
                        on_cancel: move |_| dialog.set(None),
                    }
                },
                Some(Dialog::View(shipment)) => rsx! {
                    ShipmentDialog { shipment, on_close: move |_| dialog.set(None) }
                },
                Some(Dialog::ConfirmDelete(shipment)) => {
                    let id = shipment.id;
                    rsx! {
                        div { class: "overlay",
                            div { class: "{theme::PANEL} dialog",
                                h2 { "Delete Shipment" }
                                p { "Delete {shipment.tracking_number} for {shipment.fields.customer_name}? This cannot be undone." }
                                div { class: "actions",
                                    button {
                                        class: "{theme::BTN_OUTLINE}",
                                        onclick: move |_| dialog.set(None),
                                        "Cancel"
                                    }
                                    button {
                                        class: "btn btn-danger",
                                        onclick: move |_| on_confirm_delete(id),
                                        "Delete"
                                    }
                                }
                            }
                        }
                    }
                }
                None => rsx! {},
            }
        }
    }
}

#[component]
fn ShipmentDialog(shipment: Shipment, on_close: EventHandler<()>) -> Element {
    let fields = shipment.fields;
    let phone = fields.customer_phone.unwrap_or_else(|| "-".to_string());
    rsx! {
        div { class: "overlay",
            div { class: "{theme::PANEL} dialog",
                div { class: "result-row",
                    h2 { "{shipment.tracking_number}" }
                    StatusBadge { status: fields.status }
                }
                div { class: "result",
                    div { class: "result-row", span { "Customer" } span { "{fields.customer_name}" } }
                    div { class: "result-row", span { "Email" } span { "{fields.customer_email}" } }
                    div { class: "result-row", span { "Phone" } span { "{phone}" } }
                    div { class: "result-row", span { "Origin" } span { "{fields.origin}" } }
                    div { class: "result-row", span { "Destination" } span { "{fields.destination}" } }
                    div { class: "result-row", span { "Weight" } span { "{fields.weight_kg} kg" } }
                    div { class: "result-row", span { "Estimated delivery" } span { "{fields.estimated_delivery}" } }
                }
                div { class: "actions",
                    button { class: "{theme::BTN_OUTLINE}", onclick: move |_| on_close.call(()), "Close" }
                }
            }
        }
    }
}

/// Reloads the admin list from the store.
fn refresh(
    mut state: Signal<AppState>,
    toasts: Signal<Vec<ToastMessage>>,
    store: Option<&JsonShipmentStore>,
) {
    let Some(store) = store else {
        return;
    };
    match store.list() {
        Ok(shipments) => state.with_mut(|st| st.shipments = shipments),
        Err(err) => report_store_error(toasts, err),
    }
}

fn report_store_error(toasts: Signal<Vec<ToastMessage>>, err: StoreError) {
    tracing::error!(%err, "shipment store operation failed");
    push_toast(toasts, ToastKind::Error, "Storage Error", err.to_string());
}
