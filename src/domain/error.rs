use std::fmt;

use thiserror::Error;

/// Input fields of the duty calculator, used to scope error notifications.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    TariffCode,
    Amount,
    Dimensions,
}

impl Field {
    pub fn label(&self) -> &'static str {
        match self {
            Field::TariffCode => "HS code",
            Field::Amount => "Amount",
            Field::Dimensions => "Dimensions",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// User-correctable input errors raised by the calculator. None of them are retried.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum CalculationError {
    #[error("HS code {0:?} was not found in the tariff table")]
    TariffNotFound(String),
    #[error("amount must be a positive number")]
    InvalidAmount,
    #[error("length, width and height must all be numbers")]
    InvalidDimensions,
    #[error("{0} is required")]
    MissingRequiredField(Field),
}

impl CalculationError {
    /// The input field the user has to correct.
    pub fn field(&self) -> Field {
        match self {
            CalculationError::TariffNotFound(_) => Field::TariffCode,
            CalculationError::InvalidAmount => Field::Amount,
            CalculationError::InvalidDimensions => Field::Dimensions,
            CalculationError::MissingRequiredField(field) => *field,
        }
    }

    /// Short title for toast notifications.
    pub fn title(&self) -> &'static str {
        match self {
            CalculationError::TariffNotFound(_) => "HS Code Not Found",
            CalculationError::InvalidAmount => "Invalid Amount",
            CalculationError::InvalidDimensions => "Invalid Dimensions",
            CalculationError::MissingRequiredField(_) => "Missing Information",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_are_scoped_to_a_field() {
        assert_eq!(
            CalculationError::TariffNotFound("99999999".into()).field(),
            Field::TariffCode
        );
        assert_eq!(CalculationError::InvalidAmount.field(), Field::Amount);
        assert_eq!(CalculationError::InvalidDimensions.field(), Field::Dimensions);
        assert_eq!(
            CalculationError::MissingRequiredField(Field::Amount).field(),
            Field::Amount
        );
    }

    #[test]
    fn missing_field_message_names_the_field() {
        let err = CalculationError::MissingRequiredField(Field::TariffCode);
        assert_eq!(err.to_string(), "HS code is required");
    }
}
