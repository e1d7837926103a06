use std::sync::Arc;

use dioxus::prelude::*;

use crate::{
    domain::{
        AppState, CalculationError, CalculationResult, CalculatorForm, Currency, Field,
        VolumeForm, VolumeResult, BANK_CHARGE_PERCENT, INSURANCE_CHARGE_PERCENT, WAREHOUSES,
    },
    infra::report::export_quote,
    ui::{
        components::{
            kpi_card::KpiCard,
            toast::{push_toast, ToastKind, ToastMessage},
        },
        theme,
    },
    util::format::{format_cbm, format_money, format_npr, format_percent},
};

const SUGGESTION_LIMIT: usize = 8;

#[component]
pub fn CalculatorPage() -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();

    let mut tariff_code = use_signal(String::new);
    let mut amount = use_signal(String::new);
    let mut currency = use_signal(Currency::default);
    let mut weight = use_signal(String::new);
    let mut warehouse_id = use_signal(String::new);
    let mut error = use_signal(|| None::<CalculationError>);

    let mut length = use_signal(String::new);
    let mut width = use_signal(String::new);
    let mut height = use_signal(String::new);
    let mut volume_error = use_signal(|| None::<CalculationError>);

    let suggestions = state.with(|st| {
        st.tariffs
            .suggestions(&tariff_code(), SUGGESTION_LIMIT)
            .into_iter()
            .map(|entry| (entry.code.clone(), entry.description.clone()))
            .collect::<Vec<_>>()
    });
    let tariff_count = state.with(|st| st.tariffs.len());
    let rates = state.with(|st| st.rates());
    let result = state.with(|st| st.calculator.result.clone());
    let volume = state.with(|st| st.calculator.volume);

    let on_calculate = {
        let mut state = state;
        move |evt: FormEvent| {
            evt.prevent_default();
            let form = CalculatorForm {
                tariff_code: tariff_code(),
                amount: amount(),
                currency: currency(),
                weight_kg: weight(),
                warehouse_id: warehouse_id(),
            };
            let outcome = state.with_mut(|st| {
                let tariffs = Arc::clone(&st.tariffs);
                let rates = st.rates();
                st.calculator.run(&form, &tariffs, &rates).cloned()
            });
            match outcome {
                Ok(result) => {
                    error.set(None);
                    tracing::info!(
                        code = %result.tariff_code,
                        grand_total = result.grand_total,
                        "calculated duty estimate"
                    );
                    push_toast(
                        toasts,
                        ToastKind::Success,
                        "Calculation Complete",
                        format!("Grand total: {}", format_npr(result.grand_total)),
                    );
                }
                Err(err) => {
                    tracing::debug!(%err, "calculation rejected");
                    push_toast(toasts, ToastKind::Error, err.title(), err.to_string());
                    error.set(Some(err));
                }
            }
        }
    };

    let on_volume = {
        let mut state = state;
        move |evt: FormEvent| {
            evt.prevent_default();
            let form = VolumeForm {
                length_cm: length(),
                width_cm: width(),
                height_cm: height(),
            };
            let outcome = state.with_mut(|st| st.calculator.run_volume(&form).copied());
            match outcome {
                Ok(_) => volume_error.set(None),
                Err(err) => {
                    push_toast(toasts, ToastKind::Error, err.title(), err.to_string());
                    volume_error.set(Some(err));
                }
            }
        }
    };

    let on_reset = {
        let mut state = state;
        move |_| {
            tariff_code.set(String::new());
            amount.set(String::new());
            currency.set(Currency::default());
            weight.set(String::new());
            warehouse_id.set(String::new());
            length.set(String::new());
            width.set(String::new());
            height.set(String::new());
            error.set(None);
            volume_error.set(None);
            state.with_mut(|st| st.calculator.clear());
        }
    };

    let on_export = {
        let state = state;
        move |_| {
            let (result, volume) =
                state.with(|st| (st.calculator.result.clone(), st.calculator.volume));
            let Some(result) = result else {
                push_toast(
                    toasts,
                    ToastKind::Warning,
                    "Nothing to Export",
                    "Run a calculation first.",
                );
                return;
            };
            match export_quote(&result, volume.as_ref()) {
                Ok(path) => push_toast(
                    toasts,
                    ToastKind::Success,
                    "PDF Exported",
                    format!("Saved to {}", path.display()),
                ),
                Err(err) => {
                    tracing::error!(%err, "failed to export duty estimate");
                    push_toast(toasts, ToastKind::Error, "Export Failed", err.to_string());
                }
            }
        }
    };

    let field_error = |field: Field| {
        error()
            .filter(|err| err.field() == field)
            .map(|err| err.to_string())
    };
    let tariff_error = field_error(Field::TariffCode);
    let amount_error = field_error(Field::Amount);
    let tariff_invalid = tariff_error.is_some();
    let amount_invalid = amount_error.is_some();
    let volume_message = volume_error().map(|err| err.to_string());
    let volume_invalid = volume_message.is_some();

    rsx! {
        div { class: "stack",
            div { class: "grid-3",
                KpiCard {
                    title: "HS Codes".to_string(),
                    value: tariff_count.to_string(),
                    description: Some("Entries in the tariff table".to_string()),
                }
                KpiCard {
                    title: "USD Rate".to_string(),
                    value: format!("{} {:.2}", Currency::Npr.symbol(), rates.rate(Currency::Usd)),
                    description: Some("Per 1 USD".to_string()),
                }
                KpiCard {
                    title: "CNY Rate".to_string(),
                    value: format!("{} {:.2}", Currency::Npr.symbol(), rates.rate(Currency::Cny)),
                    description: Some("Per 1 CNY".to_string()),
                }
            }

            div { class: "split",
                section { class: "{theme::PANEL}",
                    h2 { "Customs Duty Calculator" }
                    form { class: "stack", onsubmit: on_calculate,
                        div { class: "{theme::field(tariff_invalid)}",
                            label { "HS Code" }
                            input {
                                list: "hs-code-suggestions",
                                placeholder: "e.g., 0301 9500",
                                value: tariff_code(),
                                oninput: move |evt| tariff_code.set(evt.value()),
                            }
                            datalist { id: "hs-code-suggestions",
                                for (code, description) in suggestions {
                                    option { key: "{code}", value: "{code}", "{description}" }
                                }
                            }
                            if let Some(message) = tariff_error {
                                p { class: "field-error", "{message}" }
                            }
                        }
                        div { class: "grid-2",
                            div { class: "{theme::field(amount_invalid)}",
                                label { "Invoice Amount" }
                                input {
                                    inputmode: "decimal",
                                    placeholder: "0.00",
                                    value: amount(),
                                    oninput: move |evt| amount.set(evt.value()),
                                }
                                if let Some(message) = amount_error {
                                    p { class: "field-error", "{message}" }
                                }
                            }
                            div { class: "field",
                                label { "Currency" }
                                select {
                                    value: "{currency().code()}",
                                    onchange: move |evt| {
                                        if let Some(next) = Currency::from_code(&evt.value()) {
                                            currency.set(next);
                                        }
                                    },
                                    for option_currency in Currency::ALL {
                                        option {
                                            value: "{option_currency.code()}",
                                            selected: option_currency == currency(),
                                            "{option_currency.code()} ({option_currency.symbol()})"
                                        }
                                    }
                                }
                            }
                        }
                        div { class: "grid-2",
                            div { class: "field",
                                label { "Weight (kg)" }
                                input {
                                    inputmode: "decimal",
                                    placeholder: "Optional",
                                    value: weight(),
                                    oninput: move |evt| {
                                        let raw = evt.value();
                                        state.with_mut(|st| {
                                            st.calculator.update_weight(&raw);
                                        });
                                        weight.set(raw);
                                    },
                                }
                                p { class: "field-hint", "Leave empty to skip freight." }
                            }
                            div { class: "field",
                                label { "Warehouse" }
                                select {
                                    value: "{warehouse_id()}",
                                    onchange: move |evt| warehouse_id.set(evt.value()),
                                    option { value: "", "None" }
                                    for warehouse in WAREHOUSES.iter() {
                                        option {
                                            value: "{warehouse.id}",
                                            selected: warehouse.id == warehouse_id(),
                                            "{warehouse.name}"
                                        }
                                    }
                                }
                            }
                        }
                        div { class: "actions",
                            button { class: "{theme::BTN_OUTLINE}", r#type: "button", onclick: on_reset, "Reset" }
                            button { class: "{theme::BTN_PRIMARY}", r#type: "submit", "Calculate" }
                        }
                    }
                }

                section { class: "{theme::PANEL}",
                    h2 { "Estimate" }
                    match result {
                        Some(result) => rsx! {
                            ResultView { result }
                            div { class: "actions",
                                button { class: "{theme::BTN_OUTLINE}", onclick: on_export, "Export PDF" }
                            }
                        },
                        None => rsx! {
                            p { class: "note", "Enter an HS code and invoice amount to see the duty estimate." }
                        },
                    }
                }
            }

            section { class: "{theme::PANEL}",
                h2 { "Volume Calculator" }
                form { class: "stack", onsubmit: on_volume,
                    div { class: "grid-3",
                        div { class: "{theme::field(volume_invalid)}",
                            label { "Length (cm)" }
                            input { inputmode: "decimal", value: length(), oninput: move |evt| length.set(evt.value()) }
                        }
                        div { class: "{theme::field(volume_invalid)}",
                            label { "Width (cm)" }
                            input { inputmode: "decimal", value: width(), oninput: move |evt| width.set(evt.value()) }
                        }
                        div { class: "{theme::field(volume_invalid)}",
                            label { "Height (cm)" }
                            input { inputmode: "decimal", value: height(), oninput: move |evt| height.set(evt.value()) }
                        }
                    }
                    if let Some(message) = volume_message {
                        p { class: "field-error", "{message}" }
                    }
                    div { class: "actions",
                        button { class: "{theme::BTN_PRIMARY}", r#type: "submit", "Calculate Volume" }
                    }
                }
                if let Some(volume) = volume {
                    VolumeView { volume }
                }
            }
        }
    }
}

#[component]
fn ResultView(result: CalculationResult) -> Element {
    let symbol = Currency::Npr.symbol();
    let rate_line = if result.currency.is_base() {
        "Amount entered in NPR".to_string()
    } else {
        format!(
            "1 {} = {symbol} {:.2}",
            result.currency.code(),
            result.exchange_rate
        )
    };
    let weight_label = match result.weight_kg {
        Some(weight) => format!("Freight ({weight} kg)"),
        None => "Freight".to_string(),
    };

    rsx! {
        div { class: "result",
            div { class: "result-row",
                span { "HS Code" }
                strong { "{result.tariff_code}" }
            }
            p { class: "note", "{result.product_description}" }
            div { class: "result-row",
                span { "Invoice ({result.currency.code()})" }
                span { "{result.currency.symbol()} {format_money(result.amount)}" }
            }
            div { class: "result-row",
                span { "Exchange rate" }
                span { "{rate_line}" }
            }
            div { class: "result-row",
                span { "Amount in NPR" }
                span { "{symbol} {format_money(result.amount_in_base_currency)}" }
            }
            div { class: "result-row",
                span { "Customs duty ({format_percent(result.duty_rate_percent)})" }
                span { "{symbol} {format_money(result.duty_amount)}" }
            }
            div { class: "result-row",
                span { "{weight_label}" }
                span { "{symbol} {format_money(result.freight_charge)}" }
            }
            div { class: "result-row",
                span { "Bank charge ({format_percent(BANK_CHARGE_PERCENT)})" }
                span { "{symbol} {format_money(result.bank_charge)}" }
            }
            div { class: "result-row",
                span { "Insurance ({format_percent(INSURANCE_CHARGE_PERCENT)})" }
                span { "{symbol} {format_money(result.insurance_charge)}" }
            }
            div { class: "result-row result-total",
                span { "Grand total" }
                strong { "{symbol} {format_money(result.grand_total)}" }
            }
            if let Some(warehouse) = result.warehouse {
                div { class: "note",
                    strong { "{warehouse.name}" }
                    p { "{warehouse.address}, {warehouse.city}" }
                    p { "{warehouse.contact} · {warehouse.phone}" }
                }
            }
        }
    }
}

#[component]
fn VolumeView(volume: VolumeResult) -> Element {
    let input = volume.input;
    rsx! {
        div { class: "result",
            div { class: "result-row",
                span { "{input.length_cm} × {input.width_cm} × {input.height_cm} cm" }
                strong { "{format_cbm(volume.cubic_meters)}" }
            }
        }
    }
}
