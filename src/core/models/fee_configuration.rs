//! Fee configuration model

use crate::core::money::round_to_two;
use serde::{Deserialize, Serialize};

/// Upper bound on the number of installments a configuration may define
pub const MAX_INSTALLMENTS: usize = 8;

/// Tuition fee schedule used by the calculator
///
/// Serialized with camelCase keys so a stored blob reads
/// `{"perCreditFee": .., "semesterFee": .., "installmentRates": [..]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeConfiguration {
    /// Amount charged per credit of new coursework
    pub per_credit_fee: f64,

    /// Flat fee added once per semester
    pub semester_fee: f64,

    /// Fraction of the per-credit fee paid for a first-time retake
    pub first_time_retake_rate: f64,

    /// Fraction of the per-credit fee paid for any later retake
    pub non_first_time_retake_rate: f64,

    /// Share of the net payable amount due in each installment; sums to 1.0
    pub installment_rates: Vec<f64>,
}

impl Default for FeeConfiguration {
    fn default() -> Self {
        Self {
            per_credit_fee: 5525.0,
            semester_fee: 6500.0,
            first_time_retake_rate: 0.5,
            non_first_time_retake_rate: 1.0,
            installment_rates: vec![0.4, 0.3, 0.3],
        }
    }
}

impl FeeConfiguration {
    /// Number of installments
    #[must_use]
    pub fn installment_count(&self) -> usize {
        self.installment_rates.len()
    }

    /// Installment rates as percentages rounded to two decimals
    #[must_use]
    pub fn installment_percents(&self) -> Vec<f64> {
        self.installment_rates
            .iter()
            .map(|rate| round_to_two(rate * 100.0))
            .collect()
    }

    /// Sum of the installment rates
    #[must_use]
    pub fn rate_sum(&self) -> f64 {
        self.installment_rates.iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_schedule() {
        let config = FeeConfiguration::default();
        assert!((config.per_credit_fee - 5525.0).abs() < f64::EPSILON);
        assert!((config.semester_fee - 6500.0).abs() < f64::EPSILON);
        assert_eq!(config.installment_count(), 3);
        assert!((config.rate_sum() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_installment_percents() {
        let config = FeeConfiguration::default();
        assert_eq!(config.installment_percents(), vec![40.0, 30.0, 30.0]);
    }

    #[test]
    fn test_serializes_with_camel_case_keys() {
        let json = serde_json::to_string(&FeeConfiguration::default()).unwrap();
        assert!(json.contains("\"perCreditFee\":5525.0"));
        assert!(json.contains("\"nonFirstTimeRetakeRate\":1.0"));
        assert!(json.contains("\"installmentRates\":[0.4,0.3,0.3]"));
    }
}
