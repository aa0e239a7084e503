//! Raw calculator input parsing and validation
//!
//! Each of the five fields may be blank (read as zero). Every field is checked
//! and all failures are reported together, one message per field. Any failure
//! blocks the calculation.

use crate::core::models::CalculationInput;
use std::fmt;
use thiserror::Error;

/// Why a single field was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InputError {
    /// Credit field is not a finite number
    #[error("Enter a valid number.")]
    InvalidNumber,
    /// Credit field is negative
    #[error("Credits must be 0 or more.")]
    NegativeCredits,
    /// Percentage field is not a finite number
    #[error("Enter a valid percentage.")]
    InvalidPercentage,
    /// Percentage field is outside `[0, 100]`
    #[error("Percentage must be between 0 and 100.")]
    PercentageOutOfRange,
}

/// The five calculator input fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputField {
    /// New coursework credits
    NewCredit,
    /// First-time retake credits
    RetakeFirstCredit,
    /// Later retake credits
    RetakeNonFirstCredit,
    /// Scholarship percentage
    Scholarship,
    /// Waiver percentage
    Waiver,
}

impl InputField {
    /// Field identifier
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::NewCredit => "newCredit",
            Self::RetakeFirstCredit => "retakeFirstCredit",
            Self::RetakeNonFirstCredit => "retakeNonFirstCredit",
            Self::Scholarship => "scl",
            Self::Waiver => "waiver",
        }
    }

    /// Human readable label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::NewCredit => "New credits",
            Self::RetakeFirstCredit => "Retake credits (first time)",
            Self::RetakeNonFirstCredit => "Retake credits (not first time)",
            Self::Scholarship => "Scholarship %",
            Self::Waiver => "Waiver %",
        }
    }
}

impl fmt::Display for InputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// All field errors found in one validation pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: Vec<(InputField, InputError)>,
}

impl FieldErrors {
    /// Error reported for `field`, if any
    #[must_use]
    pub fn get(&self, field: InputField) -> Option<InputError> {
        self.errors
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, e)| *e)
    }

    /// Iterate over `(field, error)` pairs in field order
    pub fn iter(&self) -> impl Iterator<Item = &(InputField, InputError)> {
        self.errors.iter()
    }

    /// Number of rejected fields
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// True when every field passed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    fn record(&mut self, field: InputField, result: Result<f64, InputError>) -> f64 {
        match result {
            Ok(value) => value,
            Err(e) => {
                self.errors.push((field, e));
                f64::NAN
            }
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (field, error) in &self.errors {
            writeln!(f, "{field}: {error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

/// Parse a raw field value; blank means zero, garbage becomes NaN.
#[must_use]
pub fn parse_or_zero(raw: &str) -> f64 {
    let normalized = raw.trim();
    if normalized.is_empty() {
        return 0.0;
    }
    normalized.parse().unwrap_or(f64::NAN)
}

/// Check a credit count.
///
/// # Errors
/// Returns [`InputError::InvalidNumber`] for non-finite values and
/// [`InputError::NegativeCredits`] for negative ones.
pub fn validate_credit(value: f64) -> Result<f64, InputError> {
    if !value.is_finite() {
        return Err(InputError::InvalidNumber);
    }
    if value < 0.0 {
        return Err(InputError::NegativeCredits);
    }
    Ok(value)
}

/// Check a discount percentage.
///
/// # Errors
/// Returns [`InputError::InvalidPercentage`] for non-finite values and
/// [`InputError::PercentageOutOfRange`] outside `[0, 100]`.
pub fn validate_percent(value: f64) -> Result<f64, InputError> {
    if !value.is_finite() {
        return Err(InputError::InvalidPercentage);
    }
    if !(0.0..=100.0).contains(&value) {
        return Err(InputError::PercentageOutOfRange);
    }
    Ok(value)
}

/// Unparsed text of the five input fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawInput {
    /// New coursework credits
    pub new_credit: String,
    /// First-time retake credits
    pub retake_first_credit: String,
    /// Later retake credits
    pub retake_non_first_credit: String,
    /// Scholarship percentage
    pub scholarship: String,
    /// Waiver percentage
    pub waiver: String,
}

impl RawInput {
    /// Parse and validate every field.
    ///
    /// # Errors
    /// Returns every field that failed validation.
    pub fn read_and_validate(&self) -> Result<CalculationInput, FieldErrors> {
        let mut errors = FieldErrors::default();

        let input = CalculationInput {
            new_credits: errors.record(
                InputField::NewCredit,
                validate_credit(parse_or_zero(&self.new_credit)),
            ),
            retake_first_credits: errors.record(
                InputField::RetakeFirstCredit,
                validate_credit(parse_or_zero(&self.retake_first_credit)),
            ),
            retake_non_first_credits: errors.record(
                InputField::RetakeNonFirstCredit,
                validate_credit(parse_or_zero(&self.retake_non_first_credit)),
            ),
            scholarship_percent: errors.record(
                InputField::Scholarship,
                validate_percent(parse_or_zero(&self.scholarship)),
            ),
            waiver_percent: errors.record(
                InputField::Waiver,
                validate_percent(parse_or_zero(&self.waiver)),
            ),
        };

        if errors.is_empty() {
            Ok(input)
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(new: &str, first: &str, later: &str, scl: &str, waiver: &str) -> RawInput {
        RawInput {
            new_credit: new.to_string(),
            retake_first_credit: first.to_string(),
            retake_non_first_credit: later.to_string(),
            scholarship: scl.to_string(),
            waiver: waiver.to_string(),
        }
    }

    #[test]
    fn test_parse_or_zero() {
        assert!(parse_or_zero("").abs() < f64::EPSILON);
        assert!(parse_or_zero("   ").abs() < f64::EPSILON);
        assert!((parse_or_zero(" 3.5 ") - 3.5).abs() < f64::EPSILON);
        assert!(parse_or_zero("three").is_nan());
    }

    #[test]
    fn test_blank_fields_read_as_zero() {
        let input = RawInput::default().read_and_validate().unwrap();
        assert_eq!(input, CalculationInput::default());
    }

    #[test]
    fn test_valid_input() {
        let input = raw("3", "1.5", "", "10", "0").read_and_validate().unwrap();
        assert!((input.new_credits - 3.0).abs() < f64::EPSILON);
        assert!((input.retake_first_credits - 1.5).abs() < f64::EPSILON);
        assert!((input.scholarship_percent - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_collects_one_error_per_field() {
        let errors = raw("-1", "abc", "2", "101", "inf")
            .read_and_validate()
            .unwrap_err();

        assert_eq!(errors.len(), 4);
        assert_eq!(
            errors.get(InputField::NewCredit),
            Some(InputError::NegativeCredits)
        );
        assert_eq!(
            errors.get(InputField::RetakeFirstCredit),
            Some(InputError::InvalidNumber)
        );
        assert_eq!(errors.get(InputField::RetakeNonFirstCredit), None);
        assert_eq!(
            errors.get(InputField::Scholarship),
            Some(InputError::PercentageOutOfRange)
        );
        assert_eq!(
            errors.get(InputField::Waiver),
            Some(InputError::InvalidPercentage)
        );
    }

    #[test]
    fn test_percent_bounds_are_inclusive() {
        assert_eq!(validate_percent(0.0), Ok(0.0));
        assert_eq!(validate_percent(100.0), Ok(100.0));
        assert_eq!(
            validate_percent(-0.01),
            Err(InputError::PercentageOutOfRange)
        );
    }

    #[test]
    fn test_error_display() {
        let errors = raw("-2", "", "", "", "").read_and_validate().unwrap_err();
        assert_eq!(errors.to_string(), "New credits: Credits must be 0 or more.\n");
        assert_eq!(InputField::Scholarship.id(), "scl");
    }
}
