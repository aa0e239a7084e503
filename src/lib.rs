//! Tuition fee and installment calculator
//!
//! The library computes a semester fee breakdown from credit counts and
//! discounts, splits the payable amount into installments that add up to the
//! cent, and persists the fee schedule between runs. The `installcalc`
//! binary is a thin command-line front end over it.

pub mod config;
pub mod core;
pub mod logger;

pub use crate::core::get_version;
