//! HTML report generator
//!
//! Generates a self-contained HTML page with embedded CSS. The persisted
//! theme selects the light or dark palette.

use crate::core::models::DiscountKind;
use crate::core::report::{ReportContext, ReportGenerator};
use std::error::Error;
use std::fmt::Write;
use std::fs;
use std::path::Path;

/// Embedded HTML report template
const HTML_TEMPLATE: &str = include_str!("../templates/report.html");

/// HTML report generator
pub struct HtmlReporter;

impl HtmlReporter {
    /// Create a new HTML reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Render the report using template substitution
    #[allow(clippy::unused_self)]
    fn render_template(&self, ctx: &ReportContext) -> String {
        let badge_class = match ctx.result.applied_discount.kind {
            DiscountKind::None => "none",
            DiscountKind::Scholarship => "scholarship",
            DiscountKind::Waiver => "waiver",
        };

        ctx.fill_common(HTML_TEMPLATE)
            .replace("{{theme}}", ctx.theme.as_str())
            .replace("{{badge_class}}", badge_class)
            .replace("{{credit_rows}}", Self::generate_credit_rows(ctx).trim_end())
            .replace(
                "{{installment_rows}}",
                Self::generate_installment_rows(ctx).trim_end(),
            )
    }

    fn generate_credit_rows(ctx: &ReportContext) -> String {
        let mut html = String::new();
        for line in ctx.credit_lines() {
            let _ = writeln!(
                html,
                "<tr><td>{}</td><td>{}</td><td>{}%</td><td class=\"amount\">{}</td></tr>",
                line.label, line.credits, line.rate, line.fee
            );
        }
        html
    }

    fn generate_installment_rows(ctx: &ReportContext) -> String {
        let mut html = String::new();
        for line in ctx.schedule_lines() {
            let _ = writeln!(
                html,
                "<tr><td>{}</td><td class=\"amount\">{}</td></tr>",
                line.label, line.amount
            );
        }
        html
    }
}

impl Default for HtmlReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for HtmlReporter {
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), Box<dyn Error>> {
        let report_content = self.render(ctx)?;
        fs::write(output_path, report_content)?;
        Ok(())
    }

    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        Ok(self.render_template(ctx))
    }
}
