//! Duty, freight and volume arithmetic.
//!
//! Everything here is a pure function of its arguments plus the reference tables passed in.
//! Nothing is cached: a new result is computed on every call.

use super::currency::CurrencyRateTable;
use super::entities::{
    warehouse_by_id, CalculationInput, CalculationResult, Currency, VolumeInput, VolumeResult,
};
use super::error::{CalculationError, Field};
use super::tariff::TariffTable;

/// Bank handling charge, percent of the declared value in NPR.
pub const BANK_CHARGE_PERCENT: f64 = 5.0;
/// Cargo insurance, percent of the declared value in NPR.
pub const INSURANCE_CHARGE_PERCENT: f64 = 0.005;

const CM3_PER_M3: f64 = 1_000_000.0;

/// Converts a declared amount into the base currency. No rounding is applied.
pub fn convert_amount(
    amount: f64,
    currency: Currency,
    rates: &CurrencyRateTable,
) -> Result<f64, CalculationError> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(CalculationError::InvalidAmount);
    }
    Ok(amount * rates.rate(currency))
}

/// Per-kg freight rate in NPR for a positive weight.
pub fn freight_rate(weight_kg: f64) -> f64 {
    if weight_kg < 20.0 {
        250.0
    } else if weight_kg < 50.0 {
        180.0
    } else if weight_kg <= 100.0 {
        150.0
    } else {
        120.0
    }
}

/// Freight for the given weight. Missing, non-finite or non-positive weights cost nothing.
pub fn freight_charge(weight_kg: Option<f64>) -> f64 {
    match weight_kg {
        Some(weight) if weight.is_finite() && weight > 0.0 => weight * freight_rate(weight),
        _ => 0.0,
    }
}

/// Runs the full duty pipeline. Fails before any charge is computed when the tariff code
/// or the amount is invalid, so a partial result never escapes.
pub fn calculate(
    input: &CalculationInput,
    tariffs: &TariffTable,
    rates: &CurrencyRateTable,
) -> Result<CalculationResult, CalculationError> {
    let entry = tariffs.lookup(&input.tariff_code)?;
    let amount_in_base_currency = convert_amount(input.amount, input.currency, rates)?;

    let duty_amount = amount_in_base_currency * entry.rate_percent / 100.0;
    let bank_charge = amount_in_base_currency * BANK_CHARGE_PERCENT / 100.0;
    let insurance_charge = amount_in_base_currency * INSURANCE_CHARGE_PERCENT / 100.0;
    let freight_charge = freight_charge(input.weight_kg);

    let mut result = CalculationResult {
        tariff_code: entry.code.clone(),
        product_description: entry.description.clone(),
        duty_rate_percent: entry.rate_percent,
        amount: input.amount,
        currency: input.currency,
        exchange_rate: rates.rate(input.currency),
        amount_in_base_currency,
        duty_amount,
        weight_kg: input.weight_kg,
        freight_charge,
        bank_charge,
        insurance_charge,
        grand_total: 0.0,
        warehouse: input.warehouse,
    };
    result.grand_total = grand_total(&result);
    Ok(result)
}

fn grand_total(result: &CalculationResult) -> f64 {
    result.amount_in_base_currency
        + result.duty_amount
        + result.freight_charge
        + result.bank_charge
        + result.insurance_charge
}

/// Applies a new weight to an existing result: freight and grand total follow it, and an
/// absent or invalid weight resets freight to zero.
pub fn reprice_freight(result: &mut CalculationResult, weight_kg: Option<f64>) {
    result.weight_kg = weight_kg;
    result.freight_charge = freight_charge(weight_kg);
    result.grand_total = grand_total(result);
}

/// Weight field input. Anything unparseable counts as absent.
pub fn parse_weight(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|weight| weight.is_finite())
}

/// Cubic meters from centimeter dimensions.
pub fn calculate_volume(input: &VolumeInput) -> Result<VolumeResult, CalculationError> {
    let dims = [input.length_cm, input.width_cm, input.height_cm];
    if dims.iter().any(|dim| !dim.is_finite()) {
        return Err(CalculationError::InvalidDimensions);
    }
    Ok(VolumeResult {
        input: *input,
        cubic_meters: input.length_cm * input.width_cm * input.height_cm / CM3_PER_M3,
    })
}

/// Raw calculator form as typed by the user.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CalculatorForm {
    pub tariff_code: String,
    pub amount: String,
    pub currency: Currency,
    pub weight_kg: String,
    pub warehouse_id: String,
}

impl CalculatorForm {
    pub fn parse(&self) -> Result<CalculationInput, CalculationError> {
        if self.tariff_code.trim().is_empty() {
            return Err(CalculationError::MissingRequiredField(Field::TariffCode));
        }
        let amount = self.amount.trim();
        if amount.is_empty() {
            return Err(CalculationError::MissingRequiredField(Field::Amount));
        }
        let amount = amount
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite() && *value > 0.0)
            .ok_or(CalculationError::InvalidAmount)?;

        let weight_kg = parse_weight(&self.weight_kg);

        Ok(CalculationInput {
            tariff_code: self.tariff_code.clone(),
            amount,
            currency: self.currency,
            weight_kg,
            warehouse: warehouse_by_id(self.warehouse_id.trim()),
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct VolumeForm {
    pub length_cm: String,
    pub width_cm: String,
    pub height_cm: String,
}

impl VolumeForm {
    pub fn parse(&self) -> Result<VolumeInput, CalculationError> {
        let parse = |raw: &str| {
            raw.trim()
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite())
                .ok_or(CalculationError::InvalidDimensions)
        };
        Ok(VolumeInput {
            length_cm: parse(&self.length_cm)?,
            width_cm: parse(&self.width_cm)?,
            height_cm: parse(&self.height_cm)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::WAREHOUSES;
    use crate::domain::tariff::TariffRecord;
    use crate::domain::tariff::RawRate;

    const EPSILON: f64 = 1e-9;

    fn tariffs() -> TariffTable {
        let records = [("03019500", "Live fish", 5.0), ("85171300", "Smartphones", 10.0)]
            .into_iter()
            .map(|(code, description, rate)| TariffRecord {
                code: Some(code.to_string()),
                description: Some(description.to_string()),
                rate: Some(RawRate::Number(rate)),
            });
        TariffTable::from_records(records).unwrap().0
    }

    fn input(code: &str, amount: f64, currency: Currency, weight: Option<f64>) -> CalculationInput {
        CalculationInput {
            tariff_code: code.to_string(),
            amount,
            currency,
            weight_kg: weight,
            warehouse: None,
        }
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON * b.abs().max(1.0)
    }

    #[test]
    fn freight_first_tier_is_linear() {
        for weight in [0.5, 1.0, 7.25, 19.99] {
            assert!(close(freight_charge(Some(weight)), 250.0 * weight));
        }
    }

    #[test]
    fn freight_tier_boundaries_belong_to_the_next_tier() {
        assert_eq!(freight_charge(Some(20.0)), 3600.0);
        assert_eq!(freight_rate(49.999), 180.0);
        assert_eq!(freight_rate(50.0), 150.0);
        assert_eq!(freight_charge(Some(100.0)), 15000.0);
        assert!(close(freight_charge(Some(100.01)), 12001.2));
    }

    #[test]
    fn freight_discontinuity_is_preserved() {
        assert!(freight_charge(Some(100.01)) < freight_charge(Some(100.0)));
    }

    #[test]
    fn missing_or_invalid_weight_costs_nothing() {
        assert_eq!(freight_charge(None), 0.0);
        assert_eq!(freight_charge(Some(0.0)), 0.0);
        assert_eq!(freight_charge(Some(-5.0)), 0.0);
        assert_eq!(freight_charge(Some(f64::NAN)), 0.0);
        assert_eq!(freight_charge(Some(f64::INFINITY)), 0.0);
    }

    #[test]
    fn conversion_is_linear() {
        let rates = CurrencyRateTable::default();
        for currency in Currency::ALL {
            let base = convert_amount(12.5, currency, &rates).unwrap();
            for k in [0.5, 2.0, 3.0, 1000.0] {
                let scaled = convert_amount(12.5 * k, currency, &rates).unwrap();
                assert!(close(scaled, k * base));
            }
        }
    }

    #[test]
    fn conversion_rejects_invalid_amounts() {
        let rates = CurrencyRateTable::default();
        for amount in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert_eq!(
                convert_amount(amount, Currency::Usd, &rates),
                Err(CalculationError::InvalidAmount)
            );
        }
    }

    #[test]
    fn usd_shipment_without_weight() {
        let result = calculate(
            &input("03019500", 100.0, Currency::Usd, None),
            &tariffs(),
            &CurrencyRateTable::default(),
        )
        .unwrap();

        assert_eq!(result.amount_in_base_currency, 13350.0);
        assert_eq!(result.duty_rate_percent, 5.0);
        assert_eq!(result.duty_amount, 667.5);
        assert_eq!(result.bank_charge, 667.5);
        assert!(close(result.insurance_charge, 0.6675));
        assert_eq!(result.freight_charge, 0.0);
        assert!(close(result.grand_total, 14685.6675));
        assert_eq!(result.product_description, "Live fish");
        assert_eq!(result.exchange_rate, 133.5);
    }

    #[test]
    fn grand_total_is_the_sum_of_its_parts() {
        let tariffs = tariffs();
        let rates = CurrencyRateTable::default();
        for (code, amount, currency, weight) in [
            ("03019500", 1.0, Currency::Npr, Some(3.0)),
            ("85171300", 250.75, Currency::Cny, Some(45.0)),
            ("8517 1300", 99_999.0, Currency::Usd, Some(150.0)),
            ("03019500", 0.01, Currency::Usd, None),
        ] {
            let result = calculate(&input(code, amount, currency, weight), &tariffs, &rates).unwrap();
            let parts = result.amount_in_base_currency
                + result.duty_amount
                + result.freight_charge
                + result.bank_charge
                + result.insurance_charge;
            assert!(close(result.grand_total, parts));
        }
    }

    #[test]
    fn unknown_tariff_yields_no_result() {
        let outcome = calculate(
            &input("99999999", 100.0, Currency::Usd, Some(10.0)),
            &tariffs(),
            &CurrencyRateTable::default(),
        );
        assert_eq!(
            outcome,
            Err(CalculationError::TariffNotFound("99999999".into()))
        );
    }

    #[test]
    fn tariff_is_checked_before_amount() {
        let outcome = calculate(
            &input("99999999", -4.0, Currency::Usd, None),
            &tariffs(),
            &CurrencyRateTable::default(),
        );
        assert!(matches!(outcome, Err(CalculationError::TariffNotFound(_))));
    }

    #[test]
    fn freight_follows_the_current_weight() {
        let tariffs = tariffs();
        let rates = CurrencyRateTable::default();
        let heavy = calculate(&input("03019500", 10.0, Currency::Npr, Some(60.0)), &tariffs, &rates)
            .unwrap();
        assert_eq!(heavy.freight_charge, 9000.0);
        let cleared = calculate(&input("03019500", 10.0, Currency::Npr, None), &tariffs, &rates)
            .unwrap();
        assert_eq!(cleared.freight_charge, 0.0);
    }

    #[test]
    fn volume_of_a_carton() {
        let volume = calculate_volume(&VolumeInput {
            length_cm: 50.0,
            width_cm: 40.0,
            height_cm: 30.0,
        })
        .unwrap();
        assert!(close(volume.cubic_meters, 0.06));
    }

    #[test]
    fn volume_form_requires_numbers() {
        let form = VolumeForm {
            length_cm: "50".into(),
            width_cm: "forty".into(),
            height_cm: "30".into(),
        };
        assert_eq!(form.parse(), Err(CalculationError::InvalidDimensions));

        let form = VolumeForm {
            length_cm: " 50 ".into(),
            width_cm: "-40".into(),
            height_cm: "30".into(),
        };
        let volume = calculate_volume(&form.parse().unwrap()).unwrap();
        assert!(close(volume.cubic_meters, -0.06));
    }

    #[test]
    fn form_reports_missing_fields_first() {
        let form = CalculatorForm {
            amount: "100".into(),
            ..Default::default()
        };
        assert_eq!(
            form.parse(),
            Err(CalculationError::MissingRequiredField(Field::TariffCode))
        );

        let form = CalculatorForm {
            tariff_code: "03019500".into(),
            amount: "  ".into(),
            ..Default::default()
        };
        assert_eq!(
            form.parse(),
            Err(CalculationError::MissingRequiredField(Field::Amount))
        );
    }

    #[test]
    fn form_rejects_bad_amounts() {
        for amount in ["abc", "0", "-3", "NaN", "inf"] {
            let form = CalculatorForm {
                tariff_code: "03019500".into(),
                amount: amount.into(),
                ..Default::default()
            };
            assert_eq!(form.parse(), Err(CalculationError::InvalidAmount), "{amount}");
        }
    }

    #[test]
    fn form_parses_optional_fields() {
        let form = CalculatorForm {
            tariff_code: "0301 9500".into(),
            amount: "100".into(),
            currency: Currency::Cny,
            weight_kg: "12.5".into(),
            warehouse_id: WAREHOUSES[1].id.into(),
        };
        let parsed = form.parse().unwrap();
        assert_eq!(parsed.amount, 100.0);
        assert_eq!(parsed.currency, Currency::Cny);
        assert_eq!(parsed.weight_kg, Some(12.5));
        assert_eq!(parsed.warehouse, Some(&WAREHOUSES[1]));

        let form = CalculatorForm {
            weight_kg: "heavy".into(),
            warehouse_id: "unknown".into(),
            ..form
        };
        let parsed = form.parse().unwrap();
        assert_eq!(parsed.weight_kg, None);
        assert_eq!(parsed.warehouse, None);
    }
}
