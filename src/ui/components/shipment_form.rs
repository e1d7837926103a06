use dioxus::prelude::*;

use crate::domain::{ShipmentDraft, ShipmentStatus};
use crate::ui::theme;

/// Create/edit dialog for a shipment. Validation happens in the caller's `on_submit`.
#[component]
pub fn ShipmentForm(
    title: String,
    submit_label: String,
    initial: ShipmentDraft,
    busy: bool,
    on_submit: EventHandler<ShipmentDraft>,
    on_cancel: EventHandler<()>,
) -> Element {
    let mut customer_name = use_signal(|| initial.customer_name.clone());
    let mut customer_email = use_signal(|| initial.customer_email.clone());
    let mut customer_phone = use_signal(|| initial.customer_phone.clone());
    let mut origin = use_signal(|| initial.origin.clone());
    let mut destination = use_signal(|| initial.destination.clone());
    let mut status = use_signal(|| initial.status);
    let mut weight = use_signal(|| initial.weight_kg.clone());
    let mut estimated_delivery = use_signal(|| initial.estimated_delivery.clone());

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        on_submit.call(ShipmentDraft {
            customer_name: customer_name(),
            customer_email: customer_email(),
            customer_phone: customer_phone(),
            origin: origin(),
            destination: destination(),
            status: status(),
            weight_kg: weight(),
            estimated_delivery: estimated_delivery(),
        });
    };

    rsx! {
        div {
            class: "overlay",
            div {
                class: "{theme::PANEL} dialog",
                h2 { "{title}" }
                form {
                    class: "stack",
                    onsubmit: submit,
                    div { class: "grid-2",
                        div { class: "field",
                            label { "Customer Name" }
                            input {
                                value: customer_name(),
                                oninput: move |evt| customer_name.set(evt.value()),
                            }
                        }
                        div { class: "field",
                            label { "Customer Email" }
                            input {
                                r#type: "email",
                                value: customer_email(),
                                oninput: move |evt| customer_email.set(evt.value()),
                            }
                        }
                        div { class: "field",
                            label { "Customer Phone" }
                            input {
                                r#type: "tel",
                                value: customer_phone(),
                                oninput: move |evt| customer_phone.set(evt.value()),
                            }
                        }
                        div { class: "field",
                            label { "Weight (kg)" }
                            input {
                                inputmode: "decimal",
                                value: weight(),
                                oninput: move |evt| weight.set(evt.value()),
                            }
                        }
                        div { class: "field",
                            label { "Origin" }
                            input {
                                placeholder: "e.g., Beijing, China",
                                value: origin(),
                                oninput: move |evt| origin.set(evt.value()),
                            }
                        }
                        div { class: "field",
                            label { "Destination" }
                            input {
                                placeholder: "e.g., Kathmandu, Nepal",
                                value: destination(),
                                oninput: move |evt| destination.set(evt.value()),
                            }
                        }
                        div { class: "field",
                            label { "Status" }
                            select {
                                value: "{status().key()}",
                                onchange: move |evt| {
                                    if let Some(next) = ShipmentStatus::from_key(&evt.value()) {
                                        status.set(next);
                                    }
                                },
                                for option_status in ShipmentStatus::ALL {
                                    option {
                                        value: "{option_status.key()}",
                                        selected: option_status == status(),
                                        "{option_status.label()}"
                                    }
                                }
                            }
                        }
                        div { class: "field",
                            label { "Estimated Delivery" }
                            input {
                                r#type: "date",
                                value: estimated_delivery(),
                                oninput: move |evt| estimated_delivery.set(evt.value()),
                            }
                        }
                    }
                    div { class: "actions",
                        button {
                            class: "{theme::BTN_OUTLINE}",
                            r#type: "button",
                            onclick: move |_| on_cancel.call(()),
                            "Cancel"
                        }
                        button {
                            class: "{theme::BTN_PRIMARY}",
                            r#type: "submit",
                            disabled: busy,
                            "{submit_label}"
                        }
                    }
                }
            }
        }
    }
}
