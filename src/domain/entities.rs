use std::fmt;

use serde::{Deserialize, Serialize};

/// One row of the tariff reference table. `code` is stored without whitespace.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TariffEntry {
    pub code: String,
    pub description: String,
    pub rate_percent: f64,
}

/// Currencies accepted by the calculator. NPR is the base unit all charges are summed in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    Npr,
    #[default]
    Usd,
    Cny,
}

impl Currency {
    pub const ALL: [Currency; 3] = [Currency::Usd, Currency::Cny, Currency::Npr];
    pub const BASE: Currency = Currency::Npr;

    pub fn code(&self) -> &'static str {
        match self {
            Currency::Npr => "NPR",
            Currency::Usd => "USD",
            Currency::Cny => "CNY",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Npr => "रू",
            Currency::Usd => "$",
            Currency::Cny => "¥",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Currency::ALL
            .into_iter()
            .find(|currency| currency.code().eq_ignore_ascii_case(code.trim()))
    }

    pub fn is_base(&self) -> bool {
        *self == Currency::BASE
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Partner warehouse shown on quotes. Reference data only.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Warehouse {
    pub id: &'static str,
    pub name: &'static str,
    pub city: &'static str,
    pub address: &'static str,
    pub contact: &'static str,
    pub phone: &'static str,
}

pub static WAREHOUSES: [Warehouse; 4] = [
    Warehouse {
        id: "gz-baiyun",
        name: "Guangzhou Consolidation Warehouse",
        city: "Guangzhou, China",
        address: "Baiyun District, Guangzhou, Guangdong",
        contact: "Receiving Desk",
        phone: "+86 20 0000 0000",
    },
    Warehouse {
        id: "yw-futian",
        name: "Yiwu Market Warehouse",
        city: "Yiwu, China",
        address: "Futian Market Area, Yiwu, Zhejiang",
        contact: "Receiving Desk",
        phone: "+86 579 0000 0000",
    },
    Warehouse {
        id: "sh-pudong",
        name: "Shanghai Export Warehouse",
        city: "Shanghai, China",
        address: "Pudong New Area, Shanghai",
        contact: "Export Office",
        phone: "+86 21 0000 0000",
    },
    Warehouse {
        id: "ktm-hub",
        name: "Kathmandu Delivery Hub",
        city: "Kathmandu, Nepal",
        address: "Sinamangal, Kathmandu",
        contact: "Customer Service",
        phone: "+977 1 000 0000",
    },
];

/// Looks a warehouse up by its id in [`WAREHOUSES`].
pub fn warehouse_by_id(id: &str) -> Option<&'static Warehouse> {
    WAREHOUSES.iter().find(|warehouse| warehouse.id == id)
}

/// Parsed calculator input. Built fresh from the form on every calculation.
#[derive(Clone, Debug, PartialEq)]
pub struct CalculationInput {
    pub tariff_code: String,
    pub amount: f64,
    pub currency: Currency,
    pub weight_kg: Option<f64>,
    pub warehouse: Option<&'static Warehouse>,
}

/// Outcome of one duty calculation. All amounts are in the base currency.
#[derive(Clone, Debug, PartialEq)]
pub struct CalculationResult {
    pub tariff_code: String,
    pub product_description: String,
    pub duty_rate_percent: f64,
    pub amount: f64,
    pub currency: Currency,
    pub exchange_rate: f64,
    pub amount_in_base_currency: f64,
    pub duty_amount: f64,
    pub weight_kg: Option<f64>,
    pub freight_charge: f64,
    pub bank_charge: f64,
    pub insurance_charge: f64,
    pub grand_total: f64,
    pub warehouse: Option<&'static Warehouse>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VolumeInput {
    pub length_cm: f64,
    pub width_cm: f64,
    pub height_cm: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VolumeResult {
    pub input: VolumeInput,
    pub cubic_meters: f64,
}
