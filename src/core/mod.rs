//! Fee calculation domain

pub mod calculator;
pub mod input;
pub mod models;
pub mod money;
pub mod report;
pub mod settings;
pub mod store;
pub mod view;

/// Returns the current version of the `installment-calc` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
