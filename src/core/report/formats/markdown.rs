//! Markdown report generator
//!
//! Produces plain Markdown tables that render well in GitHub, GitLab and
//! VS Code.

use crate::core::report::{ReportContext, ReportGenerator};
use std::error::Error;
use std::fmt::Write;
use std::fs;
use std::path::Path;

/// Embedded Markdown report template
const MARKDOWN_TEMPLATE: &str = include_str!("../templates/report.md");

/// Markdown report generator
pub struct MarkdownReporter;

impl MarkdownReporter {
    /// Create a new Markdown reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Render the report using template substitution
    #[allow(clippy::unused_self)]
    fn render_template(&self, ctx: &ReportContext) -> String {
        ctx.fill_common(MARKDOWN_TEMPLATE)
            .replace("{{credit_rows}}", Self::generate_credit_rows(ctx).trim_end())
            .replace(
                "{{installment_rows}}",
                Self::generate_installment_rows(ctx).trim_end(),
            )
    }

    fn generate_credit_rows(ctx: &ReportContext) -> String {
        let mut table = String::new();
        for line in ctx.credit_lines() {
            let _ = writeln!(
                table,
                "| {} | {} | {}% | {} |",
                line.label, line.credits, line.rate, line.fee
            );
        }
        table
    }

    fn generate_installment_rows(ctx: &ReportContext) -> String {
        let mut table = String::new();
        for line in ctx.schedule_lines() {
            let _ = writeln!(table, "| {} | {} |", line.label, line.amount);
        }
        table
    }
}

impl Default for MarkdownReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for MarkdownReporter {
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), Box<dyn Error>> {
        let report_content = self.render(ctx)?;
        fs::write(output_path, report_content)?;
        Ok(())
    }

    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        Ok(self.render_template(ctx))
    }
}
