//! Settings command handler

use super::{confirm, open_store};
use crate::args::SettingsSubcommand;
use installment_calc::config::Config;
use installment_calc::core::models::FeeConfiguration;
use installment_calc::core::money::{format_currency, format_percent};
use installment_calc::core::settings::{SettingsError, SettingsForm};
use installment_calc::info;

/// Dispatch settings subcommands
pub fn run(subcommand: Option<SettingsSubcommand>, config: &Config) {
    match subcommand {
        None | Some(SettingsSubcommand::Show) => handle_settings_show(config),
        Some(SettingsSubcommand::Set {
            per_credit_fee,
            semester_fee,
            retake_first_rate,
            retake_non_first_rate,
            installments,
        }) => {
            let edits = SettingsEdits {
                per_credit_fee,
                semester_fee,
                retake_first_rate,
                retake_non_first_rate,
                installments,
            };
            handle_settings_set(config, edits);
        }
        Some(SettingsSubcommand::Resize { count, save }) => {
            handle_settings_resize(config, count, save);
        }
        Some(SettingsSubcommand::Reset { yes }) => handle_settings_reset(config, yes),
    }
}

/// Values supplied to `settings set`; `None` keeps the current value
#[derive(Debug, Default)]
pub struct SettingsEdits {
    /// Fee per credit
    pub per_credit_fee: Option<f64>,
    /// Semester fee
    pub semester_fee: Option<f64>,
    /// First-time retake rate, percent
    pub retake_first_rate: Option<f64>,
    /// Later retake rate, percent
    pub retake_non_first_rate: Option<f64>,
    /// Installment shares, percent
    pub installments: Option<Vec<f64>>,
}

impl SettingsEdits {
    /// Apply the edits on top of a form populated from current settings
    pub fn apply(self, form: &mut SettingsForm) {
        if let Some(v) = self.per_credit_fee {
            form.per_credit_fee = v;
        }
        if let Some(v) = self.semester_fee {
            form.semester_fee = v;
        }
        if let Some(v) = self.retake_first_rate {
            form.first_time_retake_percent = v;
        }
        if let Some(v) = self.retake_non_first_rate {
            form.non_first_time_retake_percent = v;
        }
        if let Some(percents) = self.installments {
            #[allow(clippy::cast_precision_loss)]
            let count = percents.len() as f64;
            form.installment_count = count;
            form.installment_percents = percents;
        }
    }
}

/// Handle the settings show subcommand
pub fn handle_settings_show(config: &Config) {
    let settings = open_store(config).load_settings();
    print!("{}", describe(&settings));
}

/// Handle the settings set subcommand
pub fn handle_settings_set(config: &Config, edits: SettingsEdits) {
    let mut store = open_store(config);
    let mut form = SettingsForm::from_configuration(&store.load_settings());
    edits.apply(&mut form);

    let updated = match form.collect() {
        Ok(updated) => updated,
        Err(e) => {
            eprintln!("✗ {e}");
            std::process::exit(1);
        }
    };

    if store.persist_settings(&updated) {
        info!("Settings saved to {}", store.backend().path().display());
        println!("✓ Settings saved");
    } else {
        println!("✓ Settings updated for this run (storage unavailable)");
    }
    print!("{}", describe(&updated));
}

/// Handle the settings resize subcommand
pub fn handle_settings_resize(config: &Config, count: usize, save: bool) {
    let mut store = open_store(config);
    let mut form = SettingsForm::from_configuration(&store.load_settings());

    if !form.set_installment_count(count) {
        eprintln!("✗ {}", SettingsError::InstallmentCount);
        std::process::exit(1);
    }

    let shares: Vec<String> = form
        .installment_percents
        .iter()
        .map(|p| format!("{}%", format_percent(*p)))
        .collect();
    println!("Installments ({count}): {}", shares.join(", "));

    if !save {
        return;
    }

    match form.collect() {
        Ok(updated) => {
            if store.persist_settings(&updated) {
                println!("✓ Settings saved");
            } else {
                println!("✗ Storage unavailable, settings not saved");
            }
        }
        Err(e) => {
            eprintln!("✗ {e}");
            std::process::exit(1);
        }
    }
}

/// Handle the settings reset subcommand
pub fn handle_settings_reset(config: &Config, yes: bool) {
    if !yes && !confirm("Reset the fee schedule to defaults?") {
        println!("✗ Reset cancelled");
        return;
    }

    let defaults = open_store(config).reset_settings();
    println!("✓ Settings reset to defaults");
    print!("{}", describe(&defaults));
}

/// Multi-line summary of a fee schedule
fn describe(settings: &FeeConfiguration) -> String {
    let form = SettingsForm::from_configuration(settings);
    let mut out = String::new();
    out.push_str(&format!(
        "Per-credit fee:                 {}\n",
        format_currency(form.per_credit_fee)
    ));
    out.push_str(&format!(
        "Semester fee:                   {}\n",
        format_currency(form.semester_fee)
    ));
    out.push_str(&format!(
        "Retake (first time) rate:       {}%\n",
        format_percent(form.first_time_retake_percent)
    ));
    out.push_str(&format!(
        "Retake (not first time) rate:   {}%\n",
        format_percent(form.non_first_time_retake_percent)
    ));
    for (idx, percent) in form.installment_percents.iter().enumerate() {
        out.push_str(&format!(
            "Installment {}:                  {}%\n",
            idx + 1,
            format_percent(*percent)
        ));
    }
    out
}
