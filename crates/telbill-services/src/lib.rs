//! Business logic services for TelBill
//!
//! This crate contains the services that turn a call log into a bill:
//! call pricing, the per-run billing ledger, promotions and the call log
//! parser that feeds them.
//!
//! # Architecture
//!
//! Services are small, synchronous and free of shared state:
//! - Each service owns its configuration (tariff, log format)
//! - A calculation builds its own ledger and discards it afterwards
//! - All entry points are instrumented with tracing
//! - Failures are reported as BillError
//!
//! # Services
//!
//! - `CallPricer` - Day/night/long-call split and per-call price
//! - `BillingLedger` - Per-number price sequences for one run
//! - `MostCalledNumberWaiver` - Free calls for the most called number
//! - `TelephoneBillCalculator` - Orchestrates pricing, promotion and totals
//! - `CallLogParser` - Call log text to call records

pub mod calculator;
pub mod call_log;
pub mod ledger;
pub mod pricing;
pub mod promotion;

pub use calculator::TelephoneBillCalculator;
pub use call_log::{load_log_file, CallLogFile, CallLogParser, CallLogText};
pub use ledger::BillingLedger;
pub use pricing::{CallPricer, PriceBreakdown};
pub use promotion::{MostCalledNumberWaiver, NoPromotion, Promotion};
