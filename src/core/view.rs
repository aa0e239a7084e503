//! Text presentation of calculation results
//!
//! A [`ResultView`] is a list of labelled rows plus the applied-discount badge.
//! It is built either from a computed result or as a placeholder when the
//! input was rejected.

use crate::core::models::{CalculationResult, DiscountKind, FeeConfiguration};
use crate::core::money::{format_currency, format_percent, PLACEHOLDER};
use std::fmt;

/// One label/value line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRow {
    /// Row label
    pub label: String,
    /// Formatted value
    pub value: String,
}

impl ResultRow {
    fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Rendered result panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultView {
    /// Summary rows (gross total through net payable)
    pub summary: Vec<ResultRow>,
    /// Applied-discount badge text
    pub badge: String,
    /// One row per installment
    pub installments: Vec<ResultRow>,
}

const SUMMARY_LABELS: [&str; 5] = [
    "Gross total",
    "Semester fee",
    "Total without discount",
    "Discount",
    "Net total payable",
];

impl ResultView {
    /// Render a computed result
    #[must_use]
    pub fn render(result: &CalculationResult, config: &FeeConfiguration) -> Self {
        let values = [
            result.gross_total,
            result.semester_fee,
            result.total_without_discount,
            result.discount_amount,
            result.net_total_payable,
        ];
        let summary = SUMMARY_LABELS
            .iter()
            .zip(values)
            .map(|(label, value)| ResultRow::new(*label, format_currency(value)))
            .collect();

        let installments = config
            .installment_rates
            .iter()
            .enumerate()
            .map(|(idx, rate)| {
                let amount = result.installment_amounts.get(idx).copied().unwrap_or(0.0);
                ResultRow::new(installment_label(idx, *rate), format_currency(amount))
            })
            .collect();

        Self {
            summary,
            badge: discount_badge(result.applied_discount.kind, result.applied_discount.percent),
            installments,
        }
    }

    /// Placeholder panel shown while the input is invalid
    #[must_use]
    pub fn placeholder(config: &FeeConfiguration) -> Self {
        Self {
            summary: SUMMARY_LABELS
                .iter()
                .map(|label| ResultRow::new(*label, PLACEHOLDER))
                .collect(),
            badge: discount_badge(DiscountKind::None, 0.0),
            installments: config
                .installment_rates
                .iter()
                .enumerate()
                .map(|(idx, rate)| ResultRow::new(installment_label(idx, *rate), PLACEHOLDER))
                .collect(),
        }
    }

    /// True when this view carries no computed values
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.summary
            .iter()
            .chain(&self.installments)
            .all(|row| row.value == PLACEHOLDER)
    }
}

impl fmt::Display for ResultView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .summary
            .iter()
            .chain(&self.installments)
            .map(|row| row.label.chars().count())
            .max()
            .unwrap_or(0);

        for row in &self.summary {
            writeln!(f, "  {:<width$}  {}", row.label, row.value)?;
        }
        writeln!(f, "\n  {}\n", self.badge)?;
        for row in &self.installments {
            writeln!(f, "  {:<width$}  {}", row.label, row.value)?;
        }
        Ok(())
    }
}

/// `Installment 2 (30%)`
#[must_use]
pub fn installment_label(index: usize, rate: f64) -> String {
    format!("Installment {} ({}%)", index + 1, format_percent(rate * 100.0))
}

/// Badge text for the applied discount
#[must_use]
pub fn discount_badge(kind: DiscountKind, percent: f64) -> String {
    match kind {
        DiscountKind::None => "Applied: None (0%)".to_string(),
        DiscountKind::Scholarship | DiscountKind::Waiver => {
            format!("Applied: {kind} {}%", format_percent(percent))
        }
    }
}

/// Static hints derived from the configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticHints {
    /// `Per-credit rate: ৳ 5,525.00`
    pub per_credit_rate: String,
    /// `Payable rate: 50%`
    pub retake_first: String,
    /// `Payable rate: 100%`
    pub retake_non_first: String,
}

impl StaticHints {
    /// Build the hints for a configuration
    #[must_use]
    pub fn from_configuration(config: &FeeConfiguration) -> Self {
        Self {
            per_credit_rate: format!("Per-credit rate: {}", format_currency(config.per_credit_fee)),
            retake_first: format!(
                "Payable rate: {}%",
                format_percent(config.first_time_retake_rate * 100.0)
            ),
            retake_non_first: format!(
                "Payable rate: {}%",
                format_percent(config.non_first_time_retake_rate * 100.0)
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::calculator::compute;
    use crate::core::models::CalculationInput;

    #[test]
    fn test_render_reference_example() {
        let config = FeeConfiguration::default();
        let input = CalculationInput {
            new_credits: 3.0,
            scholarship_percent: 10.0,
            ..CalculationInput::default()
        };
        let view = ResultView::render(&compute(&input, &config), &config);

        assert_eq!(view.summary[0].value, "\u{09F3} 16,575.00");
        assert_eq!(view.summary[3].value, "\u{09F3} 1,657.50");
        assert_eq!(view.summary[4].value, "\u{09F3} 21,417.50");
        assert_eq!(view.badge, "Applied: Scholarship 10%");
        assert_eq!(view.installments[0].label, "Installment 1 (40%)");
        assert_eq!(view.installments[2].value, "\u{09F3} 6,425.25");
        assert!(!view.is_placeholder());
    }

    #[test]
    fn test_placeholder() {
        let view = ResultView::placeholder(&FeeConfiguration::default());
        assert!(view.is_placeholder());
        assert_eq!(view.badge, "Applied: None (0%)");
        assert_eq!(view.installments.len(), 3);
        assert!(view.to_string().contains("Net total payable"));
    }

    #[test]
    fn test_discount_badge() {
        assert_eq!(discount_badge(DiscountKind::Waiver, 12.5), "Applied: Waiver 12.5%");
        assert_eq!(discount_badge(DiscountKind::None, 0.0), "Applied: None (0%)");
    }

    #[test]
    fn test_static_hints() {
        let hints = StaticHints::from_configuration(&FeeConfiguration::default());
        assert_eq!(hints.per_credit_rate, "Per-credit rate: \u{09F3} 5,525.00");
        assert_eq!(hints.retake_first, "Payable rate: 50%");
        assert_eq!(hints.retake_non_first, "Payable rate: 100%");
    }
}
