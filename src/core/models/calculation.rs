//! Calculation input and result models

use serde::{Deserialize, Serialize};
use std::fmt;

/// Validated numbers feeding one fee calculation
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationInput {
    /// Credits of new coursework (can be fractional)
    pub new_credits: f64,

    /// Credits being retaken for the first time
    pub retake_first_credits: f64,

    /// Credits being retaken for the second time or later
    pub retake_non_first_credits: f64,

    /// Scholarship percentage in `[0, 100]`
    pub scholarship_percent: f64,

    /// Waiver percentage in `[0, 100]`
    pub waiver_percent: f64,
}

/// Which discount ended up applied to the gross total
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountKind {
    /// Neither discount applies
    None,
    /// Scholarship percentage applied (also wins ties)
    Scholarship,
    /// Waiver percentage applied
    Waiver,
}

impl fmt::Display for DiscountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::Scholarship => write!(f, "Scholarship"),
            Self::Waiver => write!(f, "Waiver"),
        }
    }
}

/// The discount chosen for a calculation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AppliedDiscount {
    /// Discount source
    pub kind: DiscountKind,
    /// Percentage taken off the gross total
    pub percent: f64,
}

impl AppliedDiscount {
    /// No discount
    pub const NONE: Self = Self {
        kind: DiscountKind::None,
        percent: 0.0,
    };
}

/// Output of a fee calculation; every amount is rounded to two decimals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    /// Credit-based fees before discount or semester fee
    pub gross_total: f64,

    /// Flat semester fee from the configuration
    pub semester_fee: f64,

    /// Gross total plus semester fee
    pub total_without_discount: f64,

    /// Amount taken off by the applied discount
    pub discount_amount: f64,

    /// Gross total minus discount plus semester fee
    pub net_total_payable: f64,

    /// Discount that was applied
    pub applied_discount: AppliedDiscount,

    /// Installment amounts in payment order; they sum to `net_total_payable`
    pub installment_amounts: Vec<f64>,
}
