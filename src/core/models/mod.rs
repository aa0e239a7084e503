//! Data models for `installcalc`

pub mod calculation;
pub mod fee_configuration;
pub mod theme;

pub use calculation::{AppliedDiscount, CalculationInput, CalculationResult, DiscountKind};
pub use fee_configuration::{FeeConfiguration, MAX_INSTALLMENTS};
pub use theme::Theme;
