use dioxus::prelude::*;

use crate::{
    domain::{shipment::is_valid_email, AppState, Currency, CurrencyRateTable, Settings},
    ui::{
        components::toast::{push_toast, ToastKind, ToastMessage},
        theme,
    },
    util::{
        persistence::{config_dir, data_dir, save_settings, tariff_override_file},
        version::version_label,
    },
};

#[component]
pub fn SettingsPage() -> Element {
    let state = use_context::<Signal<AppState>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();

    let initial = state.with(|st| st.settings.clone());
    let rates = initial.exchange_rates;
    let mut usd_input = use_signal(|| rate_input(&rates, Currency::Usd));
    let mut cny_input = use_signal(|| rate_input(&rates, Currency::Cny));
    let mut admin_email_input = use_signal(|| initial.admin_email.clone());

    let tariff_count = state.with(|st| st.tariffs.len());
    let config_path = display_path(config_dir());
    let data_path = display_path(data_dir());
    let override_path = display_path(tariff_override_file());

    let on_apply = {
        let mut state = state;
        move |_| {
            let parsed = parse_settings(usd_input(), cny_input(), admin_email_input());
            match parsed {
                Ok(settings) => {
                    state.with_mut(|st| {
                        st.settings = settings.clone();
                        st.calculator.clear();
                    });
                    persist(toasts, &settings);
                    push_toast(
                        toasts,
                        ToastKind::Success,
                        "Settings Saved",
                        "Exchange rates apply to the next calculation.",
                    );
                }
                Err(message) => {
                    push_toast(toasts, ToastKind::Error, "Invalid Settings", message);
                }
            }
        }
    };

    let on_reset = {
        let mut state = state;
        move |_| {
            let defaults = Settings::default();
            let rates = defaults.exchange_rates;
            usd_input.set(rate_input(&rates, Currency::Usd));
            cny_input.set(rate_input(&rates, Currency::Cny));
            admin_email_input.set(defaults.admin_email.clone());
            state.with_mut(|st| {
                st.settings = defaults.clone();
                st.calculator.clear();
            });
            persist(toasts, &defaults);
            push_toast(
                toasts,
                ToastKind::Info,
                "Defaults Restored",
                "Restored default exchange rates.",
            );
        }
    };

    rsx! {
        div { class: "stack",
            section { class: "{theme::PANEL}",
                h2 { "Exchange Rates" }
                p { class: "field-hint", "NPR per unit of foreign currency." }
                div { class: "grid-2",
                    div { class: "field",
                        label { "USD → NPR" }
                        input {
                            inputmode: "decimal",
                            value: usd_input(),
                            oninput: move |evt| usd_input.set(evt.value()),
                        }
                    }
                    div { class: "field",
                        label { "CNY → NPR" }
                        input {
                            inputmode: "decimal",
                            value: cny_input(),
                            oninput: move |evt| cny_input.set(evt.value()),
                        }
                    }
                }
                h2 { "Notifications" }
                div { class: "field",
                    label { "Admin email" }
                    input {
                        r#type: "email",
                        value: admin_email_input(),
                        oninput: move |evt| admin_email_input.set(evt.value()),
                    }
                    p { class: "field-hint", "Receives a copy of every contact form submission." }
                }
                div { class: "actions",
                    button { class: "{theme::BTN_OUTLINE}", onclick: on_reset, "Reset Defaults" }
                    button { class: "{theme::BTN_PRIMARY}", onclick: on_apply, "Save" }
                }
            }

            section { class: "{theme::PANEL}",
                h2 { "Data" }
                div { class: "result",
                    div { class: "result-row", span { "HS codes loaded" } span { "{tariff_count}" } }
                    div { class: "result-row", span { "Config directory" } span { "{config_path}" } }
                    div { class: "result-row", span { "Data directory" } span { "{data_path}" } }
                    div { class: "result-row", span { "Tariff override" } span { "{override_path}" } }
                }
                p { class: "note", "Place an hs_codes.json file at the override path to replace the bundled tariff table on next start." }
            }

            section { class: "{theme::PANEL}",
                h2 { "About" }
                p { "{version_label()}" }
            }
        }
    }
}

/// Shortest form that parses back to the same rate, so saving twice never drifts.
fn rate_input(rates: &CurrencyRateTable, currency: Currency) -> String {
    rates.rate(currency).to_string()
}

fn parse_settings(usd: String, cny: String, admin_email: String) -> Result<Settings, String> {
    let rate = |raw: &str, code: &str| {
        raw.trim()
            .parse::<f64>()
            .map_err(|_| format!("{code} rate must be a number."))
    };
    let exchange_rates = CurrencyRateTable::new(rate(&usd, "USD")?, rate(&cny, "CNY")?)
        .ok_or_else(|| "Exchange rates must be greater than zero.".to_string())?;

    let admin_email = admin_email.trim().to_string();
    if !is_valid_email(&admin_email) {
        return Err("Admin email is not a valid address.".to_string());
    }

    Ok(Settings {
        exchange_rates,
        admin_email,
    })
}

fn persist(toasts: Signal<Vec<ToastMessage>>, settings: &Settings) {
    if let Err(err) = save_settings(settings) {
        tracing::error!(%err, "failed to persist settings");
        push_toast(toasts, ToastKind::Warning, "Not Saved to Disk", err.to_string());
    }
}

fn display_path(path: Option<std::path::PathBuf>) -> String {
    path.map(|p| p.display().to_string())
        .unwrap_or_else(|| "unavailable".to_string())
}
