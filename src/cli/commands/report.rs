//! Report command handler

use super::open_store;
use installment_calc::config::Config;
use installment_calc::core::calculator::compute;
use installment_calc::core::input::RawInput;
use installment_calc::core::report::{ReportContext, ReportFormat};
use installment_calc::info;
use std::path::{Path, PathBuf};

/// Base name for reports written to the reports directory
const REPORT_FILE_STEM: &str = "installment-plan";

/// Generate a fee report from raw inputs
///
/// Without `-o` the report goes to `<reports_dir>/installment-plan.<ext>`.
pub fn run(raw: &RawInput, format: ReportFormat, output: Option<&Path>, config: &Config) {
    let input = match raw.read_and_validate() {
        Ok(input) => input,
        Err(errors) => {
            eprint!("{errors}");
            eprintln!("✗ Report not generated");
            std::process::exit(1);
        }
    };

    let store = open_store(config);
    let settings = store.load_settings();
    let theme = store.load_theme();
    let result = compute(&input, &settings);
    let ctx = ReportContext::new(&settings, &input, &result, theme);

    let output_path = output.map_or_else(|| default_output_path(config, format), Path::to_path_buf);
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() && std::fs::create_dir_all(parent).is_err() {
            eprintln!("✗ Failed to create reports directory: {}", parent.display());
            std::process::exit(1);
        }
    }

    info!("Generating {format} report");
    match format.generator().generate(&ctx, &output_path) {
        Ok(()) => println!("✓ Report generated: {}", output_path.display()),
        Err(e) => {
            eprintln!("✗ Failed to generate report: {e}");
            std::process::exit(1);
        }
    }
}

fn default_output_path(config: &Config, format: ReportFormat) -> PathBuf {
    PathBuf::from(&config.paths.reports_dir)
        .join(REPORT_FILE_STEM)
        .with_extension(format.extension())
}
