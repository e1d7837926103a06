use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::calculation::{
    calculate, calculate_volume, parse_weight, reprice_freight, CalculatorForm, VolumeForm,
};
use super::currency::CurrencyRateTable;
use super::entities::{CalculationResult, VolumeResult};
use super::error::CalculationError;
use super::shipment::Shipment;
use super::tariff::TariffTable;

pub const DEFAULT_ADMIN_EMAIL: &str = "info@snlh.com";

/// User-editable configuration persisted between sessions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub exchange_rates: CurrencyRateTable,
    #[serde(default = "default_admin_email")]
    pub admin_email: String,
}

fn default_admin_email() -> String {
    DEFAULT_ADMIN_EMAIL.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            exchange_rates: CurrencyRateTable::default(),
            admin_email: default_admin_email(),
        }
    }
}

impl Settings {
    pub fn sanitized(mut self) -> Self {
        self.exchange_rates = self.exchange_rates.sanitized();
        if self.admin_email.trim().is_empty() {
            self.admin_email = default_admin_email();
        }
        self
    }
}

/// What the calculator page currently displays.
///
/// A failed calculation clears the previous result rather than leaving stale numbers on
/// screen; the same holds for the volume panel.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CalculatorState {
    pub result: Option<CalculationResult>,
    pub volume: Option<VolumeResult>,
}

impl CalculatorState {
    pub fn run(
        &mut self,
        form: &CalculatorForm,
        tariffs: &TariffTable,
        rates: &CurrencyRateTable,
    ) -> Result<&CalculationResult, CalculationError> {
        self.result = None;
        let input = form.parse()?;
        let result = calculate(&input, tariffs, rates)?;
        Ok(self.result.insert(result))
    }

    pub fn run_volume(&mut self, form: &VolumeForm) -> Result<&VolumeResult, CalculationError> {
        self.volume = None;
        let input = form.parse()?;
        let volume = calculate_volume(&input)?;
        Ok(self.volume.insert(volume))
    }

    /// Keeps a shown result in step with the weight field. Returns the repriced result.
    pub fn update_weight(&mut self, raw_weight: &str) -> Option<&CalculationResult> {
        let result = self.result.as_mut()?;
        reprice_freight(result, parse_weight(raw_weight));
        Some(result)
    }

    pub fn clear(&mut self) {
        self.result = None;
        self.volume = None;
    }
}

#[derive(Clone, Debug, Default)]
pub struct AppState {
    pub tariffs: Arc<TariffTable>,
    pub settings: Settings,
    pub calculator: CalculatorState,
    pub shipments: Vec<Shipment>,
}

impl AppState {
    pub fn new(tariffs: TariffTable, settings: Settings) -> Self {
        Self {
            tariffs: Arc::new(tariffs),
            settings,
            ..Default::default()
        }
    }

    pub fn rates(&self) -> CurrencyRateTable {
        self.settings.exchange_rates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Currency;

    fn tariffs() -> TariffTable {
        TariffTable::from_json(
            r#"[{ "hsCode": "03019500", "description": "Live fish", "saarcothersCN": "5" }]"#,
        )
        .unwrap()
        .0
    }

    fn form(code: &str, amount: &str) -> CalculatorForm {
        CalculatorForm {
            tariff_code: code.into(),
            amount: amount.into(),
            currency: Currency::Usd,
            ..Default::default()
        }
    }

    #[test]
    fn successful_run_replaces_result() {
        let tariffs = tariffs();
        let rates = CurrencyRateTable::default();
        let mut state = CalculatorState::default();

        state.run(&form("03019500", "100"), &tariffs, &rates).unwrap();
        state.run(&form("03019500", "200"), &tariffs, &rates).unwrap();
        assert_eq!(
            state.result.as_ref().map(|r| r.amount_in_base_currency),
            Some(26700.0)
        );
    }

    #[test]
    fn failed_run_clears_previous_result() {
        let tariffs = tariffs();
        let rates = CurrencyRateTable::default();
        let mut state = CalculatorState::default();

        state.run(&form("03019500", "100"), &tariffs, &rates).unwrap();
        assert!(state.result.is_some());

        let err = state
            .run(&form("99999999", "100"), &tariffs, &rates)
            .unwrap_err();
        assert_eq!(err, CalculationError::TariffNotFound("99999999".into()));
        assert!(state.result.is_none());

        state.run(&form("03019500", "100"), &tariffs, &rates).unwrap();
        assert!(state.run(&form("03019500", ""), &tariffs, &rates).is_err());
        assert!(state.result.is_none());
    }

    #[test]
    fn weight_edits_reprice_the_shown_result() {
        let tariffs = tariffs();
        let rates = CurrencyRateTable::default();
        let mut state = CalculatorState::default();
        assert!(state.update_weight("60").is_none());

        let with_weight = CalculatorForm {
            weight_kg: "60".into(),
            ..form("03019500", "100")
        };
        state.run(&with_weight, &tariffs, &rates).unwrap();
        let before = state.result.clone().unwrap();
        assert_eq!(before.freight_charge, 9000.0);

        let cleared = state.update_weight("").unwrap();
        assert_eq!(cleared.freight_charge, 0.0);
        assert_eq!(cleared.weight_kg, None);
        assert!((cleared.grand_total - (before.grand_total - 9000.0)).abs() < 1e-6);

        let invalid = state.update_weight("heavy").unwrap();
        assert_eq!(invalid.freight_charge, 0.0);

        let heavier = state.update_weight("120").unwrap();
        assert_eq!(heavier.freight_charge, 14400.0);
        assert!((heavier.grand_total - (before.grand_total - 9000.0 + 14400.0)).abs() < 1e-6);
    }

    #[test]
    fn failed_volume_clears_only_the_volume() {
        let tariffs = tariffs();
        let rates = CurrencyRateTable::default();
        let mut state = CalculatorState::default();
        state.run(&form("03019500", "100"), &tariffs, &rates).unwrap();

        let good = VolumeForm {
            length_cm: "50".into(),
            width_cm: "40".into(),
            height_cm: "30".into(),
        };
        state.run_volume(&good).unwrap();
        assert!(state.volume.is_some());

        let bad = VolumeForm {
            height_cm: String::new(),
            ..good
        };
        assert_eq!(
            state.run_volume(&bad).unwrap_err(),
            CalculationError::InvalidDimensions
        );
        assert!(state.volume.is_none());
        assert!(state.result.is_some());
    }

    #[test]
    fn settings_fall_back_to_defaults() {
        let settings: Settings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, Settings::default());

        let settings: Settings = serde_json::from_str(
            r#"{ "exchange_rates": { "usd": 0.0, "cny": 20.0 }, "admin_email": " " }"#,
        )
        .unwrap();
        assert_eq!(settings.sanitized(), Settings::default());
    }
}
