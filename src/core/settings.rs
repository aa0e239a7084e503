//! Fee settings validation and normalization
//!
//! Two policies coexist:
//! - [`validate_candidate`] is lenient. It is used for stored settings and
//!   silently rescales installment rates so they sum to 1.
//! - [`SettingsForm::collect`] is strict. It is used for live edits and rejects
//!   installment percentages that do not add up to 100 (within 0.01).

use crate::core::models::{FeeConfiguration, MAX_INSTALLMENTS};
use crate::core::money::round_to_two;
use serde_json::Value;
use thiserror::Error;

/// Allowed distance of the installment percentage total from 100
const TOTAL_TOLERANCE: f64 = 0.01;

/// Largest percentage total that resizing still treats as meaningful
const RESIZE_SUM_CEILING: f64 = 100.5;

/// Rejection reasons for a live settings edit
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    /// Negative or non-numeric per-credit fee
    #[error("Per-credit rate must be 0 or more.")]
    PerCreditFee,
    /// Negative or non-numeric semester fee
    #[error("Semester fee must be 0 or more.")]
    SemesterFee,
    /// Installment count not an integer in range
    #[error("Number of installments must be an integer between 1 and {max}.", max = MAX_INSTALLMENTS)]
    InstallmentCount,
    /// Count and number of percentages disagree
    #[error("Installment percentage fields are out of sync. Re-check count.")]
    InstallmentsOutOfSync,
    /// First-time retake rate outside `[0, 100]`
    #[error("Retake first-time payable rate must be between 0 and 100.")]
    RetakeFirstRate,
    /// Later retake rate outside `[0, 100]`
    #[error("Retake not first-time payable rate must be between 0 and 100.")]
    RetakeNonFirstRate,
    /// Some installment percentage outside `[0, 100]`
    #[error("Each installment percentage must be between 0 and 100.")]
    InstallmentPercent,
    /// Installment percentages do not total 100
    #[error("Installment percentages must add up to exactly 100.")]
    InstallmentTotal,
    /// Final normalization refused the values
    #[error("Unable to save settings. Please verify all values.")]
    Rejected,
}

/// Validate a settings candidate and normalize its installment rates.
///
/// Returns `None` when any fee is negative or non-finite, a retake rate falls
/// outside `[0, 1]`, the rate list is empty or longer than
/// [`MAX_INSTALLMENTS`], any rate is negative or non-finite, or the rates sum to
/// zero. Otherwise fees are rounded to cents and every rate is divided by the
/// rate sum.
#[must_use]
pub fn normalize_configuration(candidate: &FeeConfiguration) -> Option<FeeConfiguration> {
    let fee_ok = |fee: f64| fee.is_finite() && fee >= 0.0;
    let rate_ok = |rate: f64| rate.is_finite() && (0.0..=1.0).contains(&rate);

    if !fee_ok(candidate.per_credit_fee)
        || !fee_ok(candidate.semester_fee)
        || !rate_ok(candidate.first_time_retake_rate)
        || !rate_ok(candidate.non_first_time_retake_rate)
        || candidate.installment_rates.is_empty()
        || candidate.installment_rates.len() > MAX_INSTALLMENTS
    {
        return None;
    }

    if candidate
        .installment_rates
        .iter()
        .any(|rate| !rate.is_finite() || *rate < 0.0)
    {
        return None;
    }

    let rate_sum = candidate.rate_sum();
    if rate_sum <= 0.0 {
        return None;
    }

    Some(FeeConfiguration {
        per_credit_fee: round_to_two(candidate.per_credit_fee),
        semester_fee: round_to_two(candidate.semester_fee),
        first_time_retake_rate: candidate.first_time_retake_rate,
        non_first_time_retake_rate: candidate.non_first_time_retake_rate,
        installment_rates: candidate
            .installment_rates
            .iter()
            .map(|rate| rate / rate_sum)
            .collect(),
    })
}

/// Validate a loosely typed settings blob (as found in storage).
///
/// Numeric fields may be JSON numbers or numeric strings. Blank strings and
/// `null` read as 0, booleans as 1 or 0. A missing key, an array or an object
/// rejects the candidate. See [`normalize_configuration`] for the rules.
#[must_use]
pub fn validate_candidate(candidate: &Value) -> Option<FeeConfiguration> {
    let object = candidate.as_object()?;
    let number = |key: &str| object.get(key).map_or(f64::NAN, loose_number);

    let installment_rates = object
        .get("installmentRates")
        .and_then(Value::as_array)
        .map(|rates| rates.iter().map(loose_number).collect())
        .unwrap_or_default();

    normalize_configuration(&FeeConfiguration {
        per_credit_fee: number("perCreditFee"),
        semester_fee: number("semesterFee"),
        first_time_retake_rate: number("firstTimeRetakeRate"),
        non_first_time_retake_rate: number("nonFirstTimeRetakeRate"),
        installment_rates,
    })
}

fn loose_number(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                0.0
            } else {
                trimmed.parse().unwrap_or(f64::NAN)
            }
        }
        Value::Null => 0.0,
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Array(_) | Value::Object(_) => f64::NAN,
    }
}

/// Evenly split 100% across `count` installments (clamped to `1..=8`).
///
/// Every slot gets `round2(100 / count)` except the last, which takes the
/// remainder so the total is exactly 100.
#[must_use]
pub fn build_even_installment_percents(count: usize) -> Vec<f64> {
    let count = count.clamp(1, MAX_INSTALLMENTS);
    #[allow(clippy::cast_precision_loss)]
    let even = round_to_two(100.0 / count as f64);

    let mut percents = vec![even; count - 1];
    let allocated: f64 = percents.iter().sum();
    percents.push(round_to_two(100.0 - allocated));
    percents
}

/// Resize a list of installment percentages to `count` slots.
///
/// Existing proportions are kept where possible: equal length reuses the
/// values; implausible totals (`<= 0` or `> 100.5`) fall back to an even
/// split; trimming drops trailing slots; padding shares what is left of 100
/// among the new slots. The last slot always absorbs the rounding remainder.
#[must_use]
pub fn resize_installment_percentages(current: &[f64], count: usize) -> Vec<f64> {
    let count = count.clamp(1, MAX_INSTALLMENTS);
    let current: Vec<f64> = current.iter().copied().filter(|v| v.is_finite()).collect();

    if current.len() == count {
        return current.into_iter().map(round_to_two).collect();
    }
    if current.is_empty() {
        return build_even_installment_percents(count);
    }

    let current_sum: f64 = current.iter().sum();
    if current_sum <= 0.0 || current_sum > RESIZE_SUM_CEILING {
        return build_even_installment_percents(count);
    }

    let mut resized: Vec<f64> = current.into_iter().take(count).map(round_to_two).collect();

    if resized.len() < count {
        let remaining = 100.0 - resized.iter().sum::<f64>();
        let extra_count = count - resized.len();
        if remaining <= 0.0 {
            return build_even_installment_percents(count);
        }

        #[allow(clippy::cast_precision_loss)]
        let extra = round_to_two(remaining / extra_count as f64);
        resized.extend(std::iter::repeat_n(extra, extra_count));
    }

    absorb_remainder(&mut resized);
    resized
}

/// Force the last slot to `100 - sum(others)`.
fn absorb_remainder(percents: &mut [f64]) {
    if let Some((last, leading)) = percents.split_last_mut() {
        let sum_without_last: f64 = leading.iter().sum();
        *last = round_to_two(100.0 - sum_without_last);
    }
}

/// Values of the settings editor, as the user typed them
///
/// Retake rates and installment shares are percentages here; they become
/// fractions once [`collect`](Self::collect) accepts them.
#[derive(Debug, Clone, PartialEq)]
pub struct SettingsForm {
    /// Per-credit fee
    pub per_credit_fee: f64,
    /// Semester fee
    pub semester_fee: f64,
    /// First-time retake payable rate, percent
    pub first_time_retake_percent: f64,
    /// Later retake payable rate, percent
    pub non_first_time_retake_percent: f64,
    /// Requested number of installments (must be integral)
    pub installment_count: f64,
    /// One percentage per installment
    pub installment_percents: Vec<f64>,
}

impl SettingsForm {
    /// Populate the editor from a configuration
    #[must_use]
    pub fn from_configuration(config: &FeeConfiguration) -> Self {
        #[allow(clippy::cast_precision_loss)]
        let installment_count = config.installment_count() as f64;
        Self {
            per_credit_fee: round_to_two(config.per_credit_fee),
            semester_fee: round_to_two(config.semester_fee),
            first_time_retake_percent: round_to_two(config.first_time_retake_rate * 100.0),
            non_first_time_retake_percent: round_to_two(config.non_first_time_retake_rate * 100.0),
            installment_count,
            installment_percents: config.installment_percents(),
        }
    }

    /// Change the installment count, resizing the percentages to match.
    ///
    /// Counts outside `1..=8` leave the form untouched and return `false`.
    pub fn set_installment_count(&mut self, count: usize) -> bool {
        if !(1..=MAX_INSTALLMENTS).contains(&count) {
            return false;
        }
        self.installment_percents = resize_installment_percentages(&self.installment_percents, count);
        #[allow(clippy::cast_precision_loss)]
        let count = count as f64;
        self.installment_count = count;
        true
    }

    /// Validate the form strictly and produce a normalized configuration.
    ///
    /// # Errors
    /// Returns the first [`SettingsError`] found, checked in form order.
    pub fn collect(&self) -> Result<FeeConfiguration, SettingsError> {
        let non_negative = |v: f64| v.is_finite() && v >= 0.0;
        let percent = |v: f64| v.is_finite() && (0.0..=100.0).contains(&v);

        if !non_negative(self.per_credit_fee) {
            return Err(SettingsError::PerCreditFee);
        }
        if !non_negative(self.semester_fee) {
            return Err(SettingsError::SemesterFee);
        }

        let count = self.installment_count;
        #[allow(clippy::cast_precision_loss)]
        let max = MAX_INSTALLMENTS as f64;
        if !count.is_finite() || count.fract() != 0.0 || !(1.0..=max).contains(&count) {
            return Err(SettingsError::InstallmentCount);
        }
        #[allow(clippy::cast_precision_loss)]
        let field_count = self.installment_percents.len() as f64;
        if field_count != count {
            return Err(SettingsError::InstallmentsOutOfSync);
        }

        if !percent(self.first_time_retake_percent) {
            return Err(SettingsError::RetakeFirstRate);
        }
        if !percent(self.non_first_time_retake_percent) {
            return Err(SettingsError::RetakeNonFirstRate);
        }
        if !self.installment_percents.iter().all(|v| percent(*v)) {
            return Err(SettingsError::InstallmentPercent);
        }

        let total = round_to_two(self.installment_percents.iter().sum());
        if (total - 100.0).abs() > TOTAL_TOLERANCE {
            return Err(SettingsError::InstallmentTotal);
        }

        normalize_configuration(&FeeConfiguration {
            per_credit_fee: self.per_credit_fee,
            semester_fee: self.semester_fee,
            first_time_retake_rate: self.first_time_retake_percent / 100.0,
            non_first_time_retake_rate: self.non_first_time_retake_percent / 100.0,
            installment_rates: self
                .installment_percents
                .iter()
                .map(|p| p / 100.0)
                .collect(),
        })
        .ok_or(SettingsError::Rejected)
    }
}
