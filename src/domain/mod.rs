//! Calculator, tracking and contact logic. Nothing in here performs I/O.

pub mod app_state;
pub mod calculation;
pub mod contact;
pub mod currency;
pub mod entities;
pub mod error;
pub mod shipment;
pub mod tariff;

#[allow(unused_imports)]
pub use app_state::{AppState, CalculatorState, Settings};
#[allow(unused_imports)]
pub use calculation::{
    calculate, calculate_volume, convert_amount, freight_charge, freight_rate, parse_weight,
    reprice_freight, CalculatorForm, VolumeForm, BANK_CHARGE_PERCENT, INSURANCE_CHARGE_PERCENT,
};
#[allow(unused_imports)]
pub use contact::{ContactForm, ContactRequest, OutgoingEmail};
#[allow(unused_imports)]
pub use currency::CurrencyRateTable;
#[allow(unused_imports)]
pub use entities::{
    warehouse_by_id, CalculationInput, CalculationResult, Currency, TariffEntry, VolumeInput,
    VolumeResult, Warehouse, WAREHOUSES,
};
#[allow(unused_imports)]
pub use error::{CalculationError, Field};
#[allow(unused_imports)]
pub use shipment::{Shipment, ShipmentDraft, ShipmentFields, ShipmentStatus};
#[allow(unused_imports)]
pub use tariff::{TariffFeedError, TariffTable};
