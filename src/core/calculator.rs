//! Tuition fee calculator
//!
//! Pure functions mapping credit counts, discount percentages and a
//! [`FeeConfiguration`] to a [`CalculationResult`]. Inputs are expected to be
//! validated already (see [`crate::core::input`]); nothing here fails.

use crate::core::models::{
    AppliedDiscount, CalculationInput, CalculationResult, DiscountKind, FeeConfiguration,
};
use crate::core::money::round_to_two;

/// Credit-based fee components before any discount
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeeComponents {
    /// Fee for new coursework
    pub new_fee: f64,
    /// Fee for first-time retakes
    pub retake_first_fee: f64,
    /// Fee for later retakes
    pub retake_non_first_fee: f64,
}

impl FeeComponents {
    /// Price each credit bucket according to the configuration
    #[must_use]
    pub fn from_input(input: &CalculationInput, config: &FeeConfiguration) -> Self {
        Self {
            new_fee: input.new_credits * config.per_credit_fee,
            retake_first_fee: input.retake_first_credits
                * config.per_credit_fee
                * config.first_time_retake_rate,
            retake_non_first_fee: input.retake_non_first_credits
                * config.per_credit_fee
                * config.non_first_time_retake_rate,
        }
    }

    /// Sum of all components (unrounded)
    #[must_use]
    pub fn gross_total(&self) -> f64 {
        self.new_fee + self.retake_first_fee + self.retake_non_first_fee
    }
}

/// Compute the full fee breakdown for one set of inputs.
///
/// # Examples
/// ```
/// use installment_calc::core::calculator::compute;
/// use installment_calc::core::models::{CalculationInput, FeeConfiguration};
///
/// let input = CalculationInput {
///     new_credits: 3.0,
///     scholarship_percent: 10.0,
///     ..CalculationInput::default()
/// };
/// let result = compute(&input, &FeeConfiguration::default());
/// assert_eq!(result.net_total_payable, 21417.5);
/// assert_eq!(result.installment_amounts, vec![8567.0, 6425.25, 6425.25]);
/// ```
#[must_use]
pub fn compute(input: &CalculationInput, config: &FeeConfiguration) -> CalculationResult {
    let gross_total = FeeComponents::from_input(input, config).gross_total();
    let applied_discount =
        resolve_applied_discount(input.scholarship_percent, input.waiver_percent);

    let discount_amount = gross_total * applied_discount.percent / 100.0;
    let net_total_payable = gross_total - discount_amount + config.semester_fee;
    let installment_amounts = split_installment_amounts(net_total_payable, &config.installment_rates);

    CalculationResult {
        gross_total: round_to_two(gross_total),
        semester_fee: round_to_two(config.semester_fee),
        total_without_discount: round_to_two(gross_total + config.semester_fee),
        discount_amount: round_to_two(discount_amount),
        net_total_payable: round_to_two(net_total_payable),
        applied_discount,
        installment_amounts,
    }
}

/// Pick the larger of the scholarship and waiver percentages.
///
/// Both zero yields no discount; equal nonzero values are labelled as a
/// scholarship.
#[must_use]
pub fn resolve_applied_discount(scholarship_percent: f64, waiver_percent: f64) -> AppliedDiscount {
    let percent = scholarship_percent.max(waiver_percent);

    if percent == 0.0 {
        return AppliedDiscount::NONE;
    }

    let kind = if scholarship_percent >= waiver_percent {
        DiscountKind::Scholarship
    } else {
        DiscountKind::Waiver
    };

    AppliedDiscount { kind, percent }
}

/// Split a total into installments proportional to `rates`.
///
/// Every installment but the last is rounded independently; the last takes
/// whatever is left of the rounded total so the amounts reconcile to the cent.
/// When the total is only a few cents, rounding up the leading shares can
/// leave the last installment negative; the sum still matches.
#[must_use]
pub fn split_installment_amounts(total: f64, rates: &[f64]) -> Vec<f64> {
    let rounded_total = round_to_two(total);
    let Some((_, leading)) = rates.split_last() else {
        return Vec::new();
    };

    let mut amounts = Vec::with_capacity(rates.len());
    let mut allocated = 0.0;
    for rate in leading {
        let amount = round_to_two(rounded_total * rate);
        allocated += amount;
        amounts.push(amount);
    }
    amounts.push(round_to_two(rounded_total - allocated));

    amounts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::money::to_cents;

    fn input(new_credits: f64, scholarship: f64, waiver: f64) -> CalculationInput {
        CalculationInput {
            new_credits,
            scholarship_percent: scholarship,
            waiver_percent: waiver,
            ..CalculationInput::default()
        }
    }

    #[test]
    fn test_reference_example() {
        let result = compute(&input(3.0, 10.0, 0.0), &FeeConfiguration::default());

        assert!((result.gross_total - 16575.0).abs() < f64::EPSILON);
        assert!((result.discount_amount - 1657.5).abs() < f64::EPSILON);
        assert!((result.net_total_payable - 21417.5).abs() < f64::EPSILON);
        assert!((result.total_without_discount - 23075.0).abs() < f64::EPSILON);
        assert_eq!(result.installment_amounts, vec![8567.0, 6425.25, 6425.25]);
        assert_eq!(result.applied_discount.kind, DiscountKind::Scholarship);
    }

    #[test]
    fn test_retake_rates_apply_per_bucket() {
        let config = FeeConfiguration::default();
        let input = CalculationInput {
            new_credits: 1.0,
            retake_first_credits: 2.0,
            retake_non_first_credits: 1.5,
            ..CalculationInput::default()
        };

        let parts = FeeComponents::from_input(&input, &config);
        assert!((parts.new_fee - 5525.0).abs() < f64::EPSILON);
        assert!((parts.retake_first_fee - 5525.0).abs() < f64::EPSILON);
        assert!((parts.retake_non_first_fee - 8287.5).abs() < f64::EPSILON);

        let result = compute(&input, &config);
        assert!((result.gross_total - 19337.5).abs() < f64::EPSILON);
        assert_eq!(result.applied_discount, AppliedDiscount::NONE);
    }

    #[test]
    fn test_zero_credits_still_owe_semester_fee() {
        let result = compute(&CalculationInput::default(), &FeeConfiguration::default());
        assert!((result.gross_total).abs() < f64::EPSILON);
        assert!((result.net_total_payable - 6500.0).abs() < f64::EPSILON);
        assert_eq!(result.installment_amounts, vec![2600.0, 1950.0, 1950.0]);
    }

    #[test]
    fn test_discount_only_reduces_credit_fees() {
        let result = compute(&input(2.0, 0.0, 100.0), &FeeConfiguration::default());
        assert!((result.discount_amount - 11050.0).abs() < f64::EPSILON);
        assert!((result.net_total_payable - 6500.0).abs() < f64::EPSILON);
        assert_eq!(result.applied_discount.kind, DiscountKind::Waiver);
    }

    #[test]
    fn test_resolve_applied_discount() {
        assert_eq!(resolve_applied_discount(0.0, 0.0), AppliedDiscount::NONE);
        assert_eq!(
            resolve_applied_discount(10.0, 10.0),
            AppliedDiscount {
                kind: DiscountKind::Scholarship,
                percent: 10.0
            }
        );
        assert_eq!(
            resolve_applied_discount(5.0, 15.0),
            AppliedDiscount {
                kind: DiscountKind::Waiver,
                percent: 15.0
            }
        );
        assert_eq!(
            resolve_applied_discount(25.0, 0.0).kind,
            DiscountKind::Scholarship
        );
    }

    #[test]
    fn test_split_last_installment_absorbs_remainder() {
        let amounts = split_installment_amounts(100.0, &[1.0 / 3.0, 1.0 / 3.0, 1.0 / 3.0]);
        assert_eq!(amounts, vec![33.33, 33.33, 33.34]);
    }

    #[test]
    fn test_split_single_installment() {
        assert_eq!(split_installment_amounts(1234.567, &[1.0]), vec![1234.57]);
    }

    #[test]
    fn test_split_with_no_rates() {
        assert!(split_installment_amounts(10.0, &[]).is_empty());
    }

    #[test]
    fn test_split_reconciles_in_cents() {
        let rates = [0.125, 0.125, 0.125, 0.125, 0.125, 0.125, 0.125, 0.125];
        let amounts = split_installment_amounts(1000.01, &rates);
        let total: i64 = amounts.iter().copied().map(to_cents).sum();
        assert_eq!(total, 100_001);
        assert!((amounts[7] - 125.01).abs() < 1e-9);
    }

    #[test]
    fn test_split_tiny_total_can_leave_last_negative() {
        let amounts = split_installment_amounts(0.04, &[0.125; 8]);
        let cents: Vec<i64> = amounts.iter().copied().map(to_cents).collect();
        assert_eq!(cents, vec![1, 1, 1, 1, 1, 1, 1, -3]);
        assert_eq!(cents.iter().sum::<i64>(), 4);
    }
}
