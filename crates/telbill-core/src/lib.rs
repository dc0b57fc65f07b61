//! TelBill Core Library
//!
//! This crate provides the foundational types, traits, and error handling
//! for the TelBill system. It includes:
//!
//! - Domain models (CallRecord, PhoneNumber, Bill)
//! - The seams between the calculator and its call log collaborators
//! - Unified error handling with CLI exit code mapping
//! - Application configuration (tariffs, call log format, logging)

pub mod config;
pub mod error;
pub mod models;
pub mod traits;

pub use config::{AppConfig, CallLogConfig, NightMinutesPolicy, TariffConfig};
pub use error::BillError;
pub use models::Price;

/// Result type alias using BillError
pub type BillResult<T> = Result<T, BillError>;
