use dioxus::prelude::*;

use crate::{
    domain::{AppState, ContactForm},
    infra::mailer::ContactMailer,
    ui::{
        components::toast::{push_toast, ToastKind, ToastMessage},
        theme,
    },
};

#[component]
pub fn ContactPage() -> Element {
    let state = use_context::<Signal<AppState>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();

    let mut form = use_signal(ContactForm::default);
    let mut submitting = use_signal(|| false);

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        if submitting() {
            return;
        }
        let request = match form.with(ContactForm::validate) {
            Ok(request) => request,
            Err(err) => {
                push_toast(toasts, ToastKind::Error, "Validation Error", err.to_string());
                return;
            }
        };
        let admin_email = state.with(|st| st.settings.admin_email.clone());

        submitting.set(true);
        spawn(async move {
            let outcome = match ContactMailer::from_env() {
                Ok(mailer) => mailer.send_contact(&request, &admin_email).await,
                Err(err) => Err(err),
            };
            match outcome {
                Ok(_) => {
                    push_toast(
                        toasts,
                        ToastKind::Success,
                        "Message Sent",
                        "Thank you! We'll get back to you soon.",
                    );
                    form.set(ContactForm::default());
                }
                Err(err) => {
                    tracing::error!(%err, "failed to send contact email");
                    push_toast(toasts, ToastKind::Error, "Sending Failed", err.to_string());
                }
            }
            submitting.set(false);
        });
    };

    let current = form();
    rsx! {
        div { class: "grid-2",
            section { class: "{theme::PANEL}",
                h2 { "Contact Us" }
                form { class: "stack", onsubmit: on_submit,
                    div { class: "grid-2",
                        div { class: "field",
                            label { "Name" }
                            input {
                                value: current.name,
                                oninput: move |evt| form.with_mut(|f| f.name = evt.value()),
                            }
                        }
                        div { class: "field",
                            label { "Email" }
                            input {
                                r#type: "email",
                                value: current.email,
                                oninput: move |evt| form.with_mut(|f| f.email = evt.value()),
                            }
                        }
                        div { class: "field",
                            label { "Phone" }
                            input {
                                r#type: "tel",
                                value: current.phone,
                                oninput: move |evt| form.with_mut(|f| f.phone = evt.value()),
                            }
                        }
                        div { class: "field",
                            label { "Company" }
                            input {
                                value: current.company,
                                oninput: move |evt| form.with_mut(|f| f.company = evt.value()),
                            }
                        }
                    }
                    div { class: "field",
                        label { "Message" }
                        textarea {
                            rows: "6",
                            value: current.message,
                            oninput: move |evt| form.with_mut(|f| f.message = evt.value()),
                        }
                    }
                    div { class: "actions",
                        button {
                            class: "{theme::BTN_PRIMARY}",
                            r#type: "submit",
                            disabled: submitting(),
                            if submitting() { "Sending..." } else { "Send Message" }
                        }
                    }
                }
            }
            section { class: "{theme::PANEL}",
                h2 { "Our Offices" }
                div { class: "result",
                    div { class: "result-row", span { "Head office" } span { "Kathmandu, Nepal" } }
                    div { class: "result-row", span { "China operations" } span { "Guangzhou, China" } }
                    div { class: "result-row", span { "Hours" } span { "Sun-Fri, 9:00-18:00" } }
                }
                p { class: "note", "We reply to every enquiry within one business day." }
            }
        }
    }
}
