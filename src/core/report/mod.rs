//! Fee breakdown reports
//!
//! Renders a computed [`CalculationResult`] as a standalone Markdown or HTML
//! document: the credit buckets, the summary, the applied discount and the
//! installment schedule.

pub mod formats;

use crate::core::calculator::FeeComponents;
use crate::core::models::{CalculationInput, CalculationResult, FeeConfiguration, Theme};
use crate::core::money::{format_currency, format_number, format_percent};
use crate::core::view::{discount_badge, installment_label};
use std::error::Error;
use std::path::Path;

pub use formats::{HtmlReporter, MarkdownReporter, ReportFormat};

/// Data context for report generation
#[derive(Debug, Clone)]
pub struct ReportContext<'a> {
    /// Fee schedule the result was computed with
    pub config: &'a FeeConfiguration,
    /// Validated input
    pub input: &'a CalculationInput,
    /// Computed breakdown
    pub result: &'a CalculationResult,
    /// Theme for formats that support styling
    pub theme: Theme,
}

/// One priced credit bucket
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreditLine {
    /// Bucket label
    pub label: &'static str,
    /// Credits, formatted
    pub credits: String,
    /// Payable rate, formatted as a percent
    pub rate: String,
    /// Fee, formatted as currency
    pub fee: String,
}

/// One installment of the schedule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleLine {
    /// `Installment N (P%)`
    pub label: String,
    /// Amount, formatted as currency
    pub amount: String,
}

impl<'a> ReportContext<'a> {
    /// Create a new report context
    #[must_use]
    pub const fn new(
        config: &'a FeeConfiguration,
        input: &'a CalculationInput,
        result: &'a CalculationResult,
        theme: Theme,
    ) -> Self {
        Self {
            config,
            input,
            result,
            theme,
        }
    }

    /// Priced credit buckets in display order
    #[must_use]
    pub fn credit_lines(&self) -> Vec<CreditLine> {
        let parts = FeeComponents::from_input(self.input, self.config);
        [
            ("New courses", self.input.new_credits, 1.0, parts.new_fee),
            (
                "Retake (first time)",
                self.input.retake_first_credits,
                self.config.first_time_retake_rate,
                parts.retake_first_fee,
            ),
            (
                "Retake (not first time)",
                self.input.retake_non_first_credits,
                self.config.non_first_time_retake_rate,
                parts.retake_non_first_fee,
            ),
        ]
        .into_iter()
        .map(|(label, credits, rate, fee)| CreditLine {
            label,
            credits: format_number(credits),
            rate: format_percent(rate * 100.0),
            fee: format_currency(fee),
        })
        .collect()
    }

    /// Installment schedule in payment order
    #[must_use]
    pub fn schedule_lines(&self) -> Vec<ScheduleLine> {
        self.config
            .installment_rates
            .iter()
            .zip(&self.result.installment_amounts)
            .enumerate()
            .map(|(idx, (rate, amount))| ScheduleLine {
                label: installment_label(idx, *rate),
                amount: format_currency(*amount),
            })
            .collect()
    }

    /// Applied-discount badge text
    #[must_use]
    pub fn badge(&self) -> String {
        discount_badge(
            self.result.applied_discount.kind,
            self.result.applied_discount.percent,
        )
    }

    /// Replace the shared `{{...}}` placeholders of a template
    #[must_use]
    pub fn fill_common(&self, template: &str) -> String {
        let r = self.result;
        template
            .replace("{{per_credit_fee}}", &format_currency(self.config.per_credit_fee))
            .replace("{{gross_total}}", &format_currency(r.gross_total))
            .replace("{{semester_fee}}", &format_currency(r.semester_fee))
            .replace(
                "{{total_without_discount}}",
                &format_currency(r.total_without_discount),
            )
            .replace("{{discount_amount}}", &format_currency(r.discount_amount))
            .replace("{{net_total_payable}}", &format_currency(r.net_total_payable))
            .replace("{{applied_discount}}", &self.badge())
            .replace(
                "{{installment_count}}",
                &self.config.installment_count().to_string(),
            )
    }
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Generate a report to a file
    ///
    /// # Errors
    /// Returns an error if report generation or file writing fails
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), Box<dyn Error>>;

    /// Generate report content as a string
    ///
    /// # Errors
    /// Returns an error if report generation fails
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>>;
}
