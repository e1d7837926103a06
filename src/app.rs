use dioxus::prelude::*;

use crate::{
    domain::{AppState, TariffTable},
    infra::{
        shipment_store::JsonShipmentStore,
        tariff_feed::{load_tariff_table, TariffSource},
    },
    ui::{
        components::toast::{push_toast, Toast, ToastKind, ToastMessage},
        pages::{CalculatorPage, ContactPage, SettingsPage, ShipmentsPage, TrackingPage},
        shell::Shell,
    },
    util::{assets, persistence::load_settings},
};

#[derive(Routable, Clone, PartialEq)]
pub enum Route {
    #[route("/")]
    Calculator {},
    #[route("/tracking")]
    Tracking {},
    #[route("/shipments")]
    Shipments {},
    #[route("/contact")]
    Contact {},
    #[route("/settings")]
    Settings {},
}

#[component]
pub fn App() -> Element {
    let toasts = use_signal(Vec::<ToastMessage>::new);
    use_context_provider(|| toasts);

    let state = use_signal(|| {
        let settings = load_settings();
        let tariffs = match load_tariff_table() {
            Ok((table, source)) => {
                if source == TariffSource::Override {
                    tracing::info!(entries = table.len(), "using tariff override");
                }
                table
            }
            Err(err) => {
                tracing::error!(%err, "no tariff table available; every lookup will fail");
                TariffTable::default()
            }
        };
        AppState::new(tariffs, settings)
    });
    use_context_provider(|| state);

    use_hook(move || {
        if state.with(|st| st.tariffs.is_empty()) {
            push_toast(
                toasts,
                ToastKind::Error,
                "Tariff Table Missing",
                "HS codes could not be loaded. Duty calculations are unavailable.",
            );
        }
    });

    use_context_provider(|| match JsonShipmentStore::open_default() {
        Ok(store) => {
            tracing::debug!(path = %store.path().display(), "opened shipment store");
            Some(store)
        }
        Err(err) => {
            tracing::error!(%err, "shipment store unavailable");
            None
        }
    });

    rsx! {
        document::Style { "{assets::main_css()}" }
        Router::<Route> {}
        Toast {}
    }
}

#[component]
pub fn Calculator() -> Element {
    rsx! { Shell { CalculatorPage {} } }
}

#[component]
pub fn Tracking() -> Element {
    rsx! { Shell { TrackingPage {} } }
}

#[component]
pub fn Shipments() -> Element {
    rsx! { Shell { ShipmentsPage {} } }
}

#[component]
pub fn Contact() -> Element {
    rsx! { Shell { ContactPage {} } }
}

#[component]
pub fn Settings() -> Element {
    rsx! { Shell { SettingsPage {} } }
}
