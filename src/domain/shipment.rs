//! Shipments tracked for customers and managed from the admin page.

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::{macros::format_description, Date};
use uuid::Uuid;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShipmentStatus {
    #[default]
    Pending,
    InTransit,
    Customs,
    Delivered,
    Delayed,
}

impl ShipmentStatus {
    pub const ALL: [ShipmentStatus; 5] = [
        ShipmentStatus::Pending,
        ShipmentStatus::InTransit,
        ShipmentStatus::Customs,
        ShipmentStatus::Delivered,
        ShipmentStatus::Delayed,
    ];

    /// Wire name, as stored in the shipments table.
    pub fn key(&self) -> &'static str {
        match self {
            ShipmentStatus::Pending => "pending",
            ShipmentStatus::InTransit => "in_transit",
            ShipmentStatus::Customs => "customs",
            ShipmentStatus::Delivered => "delivered",
            ShipmentStatus::Delayed => "delayed",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ShipmentStatus::Pending => "Pending",
            ShipmentStatus::InTransit => "In Transit",
            ShipmentStatus::Customs => "Customs",
            ShipmentStatus::Delivered => "Delivered",
            ShipmentStatus::Delayed => "Delayed",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        ShipmentStatus::ALL
            .into_iter()
            .find(|status| status.key() == key.trim())
    }
}

impl fmt::Display for ShipmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Validated, editable part of a shipment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShipmentFields {
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
    pub origin: String,
    pub destination: String,
    pub status: ShipmentStatus,
    pub weight_kg: f64,
    /// `YYYY-MM-DD`
    pub estimated_delivery: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Shipment {
    pub id: Uuid,
    pub tracking_number: String,
    #[serde(flatten)]
    pub fields: ShipmentFields,
    /// Unix seconds.
    pub created_at: u64,
}

impl Shipment {
    /// New shipment whose tracking number is not used by any of `existing`.
    pub fn new(fields: ShipmentFields, now: SystemTime, existing: &[Shipment]) -> Self {
        let since_epoch = now.duration_since(UNIX_EPOCH).unwrap_or_default();
        Self {
            id: Uuid::new_v4(),
            tracking_number: unused_tracking_number(since_epoch.as_millis(), existing),
            fields,
            created_at: since_epoch.as_secs(),
        }
    }
}

/// `TRK` followed by the creation time in epoch milliseconds.
pub fn tracking_number(epoch_millis: u128) -> String {
    format!("TRK{epoch_millis}")
}

/// Bumps the millisecond stamp until it no longer collides with a stored shipment.
pub fn unused_tracking_number(epoch_millis: u128, existing: &[Shipment]) -> String {
    let mut millis = epoch_millis;
    loop {
        let candidate = tracking_number(millis);
        if !existing
            .iter()
            .any(|shipment| shipment.tracking_number.eq_ignore_ascii_case(&candidate))
        {
            return candidate;
        }
        millis += 1;
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ShipmentValidationError {
    #[error("{0} is required")]
    Required(&'static str),
    #[error("customer email is not a valid address")]
    InvalidEmail,
    #[error("weight must be a positive number of kilograms")]
    InvalidWeight,
    #[error("estimated delivery must be a date (YYYY-MM-DD)")]
    InvalidDate,
}

/// Raw admin form input.
#[derive(Clone, Debug, PartialEq)]
pub struct ShipmentDraft {
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub origin: String,
    pub destination: String,
    pub status: ShipmentStatus,
    pub weight_kg: String,
    pub estimated_delivery: String,
}

impl Default for ShipmentDraft {
    fn default() -> Self {
        Self {
            customer_name: String::new(),
            customer_email: String::new(),
            customer_phone: String::new(),
            origin: String::new(),
            destination: "Kathmandu, Nepal".to_string(),
            status: ShipmentStatus::Pending,
            weight_kg: String::new(),
            estimated_delivery: String::new(),
        }
    }
}

impl From<&ShipmentFields> for ShipmentDraft {
    fn from(fields: &ShipmentFields) -> Self {
        Self {
            customer_name: fields.customer_name.clone(),
            customer_email: fields.customer_email.clone(),
            customer_phone: fields.customer_phone.clone().unwrap_or_default(),
            origin: fields.origin.clone(),
            destination: fields.destination.clone(),
            status: fields.status,
            weight_kg: fields.weight_kg.to_string(),
            estimated_delivery: fields.estimated_delivery.clone(),
        }
    }
}

impl ShipmentDraft {
    pub fn validate(&self) -> Result<ShipmentFields, ShipmentValidationError> {
        let required = |value: &str, name: &'static str| {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                Err(ShipmentValidationError::Required(name))
            } else {
                Ok(trimmed.to_string())
            }
        };

        let customer_name = required(&self.customer_name, "customer name")?;
        let customer_email = required(&self.customer_email, "customer email")?;
        if !is_valid_email(&customer_email) {
            return Err(ShipmentValidationError::InvalidEmail);
        }
        let origin = required(&self.origin, "origin")?;
        let destination = required(&self.destination, "destination")?;

        let weight_kg = required(&self.weight_kg, "weight")?
            .parse::<f64>()
            .ok()
            .filter(|weight| weight.is_finite() && *weight > 0.0)
            .ok_or(ShipmentValidationError::InvalidWeight)?;

        let estimated_delivery = required(&self.estimated_delivery, "estimated delivery")?;
        parse_date(&estimated_delivery)?;

        let phone = self.customer_phone.trim();
        Ok(ShipmentFields {
            customer_name,
            customer_email,
            customer_phone: (!phone.is_empty()).then(|| phone.to_string()),
            origin,
            destination,
            status: self.status,
            weight_kg,
            estimated_delivery,
        })
    }
}

fn parse_date(raw: &str) -> Result<Date, ShipmentValidationError> {
    Date::parse(raw, format_description!("[year]-[month]-[day]"))
        .map_err(|_| ShipmentValidationError::InvalidDate)
}

/// Single `@`, non-empty local part, dotted domain, no whitespace.
pub fn is_valid_email(email: &str) -> bool {
    let mut parts = email.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    !local.is_empty()
        && !email.chars().any(char::is_whitespace)
        && domain.contains('.')
        && domain.split('.').all(|label| !label.is_empty())
}

/// One step of the customer-facing tracking timeline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Milestone {
    pub label: &'static str,
    pub completed: bool,
}

/// Timeline shown on the tracking page. A delayed shipment keeps the customs step open.
pub fn tracking_milestones(status: ShipmentStatus) -> Vec<Milestone> {
    let reached = match status {
        ShipmentStatus::Pending => 1,
        ShipmentStatus::InTransit | ShipmentStatus::Delayed => 2,
        ShipmentStatus::Customs => 3,
        ShipmentStatus::Delivered => 4,
    };
    ["Order Confirmed", "In Transit", "Customs Clearance", "Delivered"]
        .into_iter()
        .enumerate()
        .map(|(idx, label)| Milestone {
            label,
            completed: idx < reached,
        })
        .collect()
}

/// Newest first, as the admin list shows them.
pub fn sort_newest_first(shipments: &mut [Shipment]) {
    shipments.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}
