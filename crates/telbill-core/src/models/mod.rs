//! Domain models for TelBill
//!
//! This module contains all the core domain models used throughout the application.

pub mod bill;
pub mod call_record;

pub use bill::{Bill, NumberSubtotal};
pub use call_record::{CallRecord, PhoneNumber};

/// Monetary amount. Always exact decimal, never binary floating point.
pub type Price = rust_decimal::Decimal;
