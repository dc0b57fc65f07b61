//! Common traits for the billing pipeline
//!
//! Defines the seams between the calculator and whatever supplies it with
//! call records.

use crate::models::{Bill, CallRecord, Price};
use crate::BillResult;

/// Bill calculation
///
/// Implementations are pure: no I/O, no shared mutable state. Every call
/// builds and discards its own ledger, so a single calculator can be used
/// from several threads at once.
pub trait BillCalculator: Send + Sync {
    /// Calculate the detailed bill for an ordered sequence of calls
    fn calculate_bill(&self, records: &[CallRecord]) -> Bill;

    /// Calculate the total amount to pay
    fn calculate(&self, records: &[CallRecord]) -> Price {
        self.calculate_bill(records).total
    }
}

/// Source of parsed call records (file, in-memory text, ...)
pub trait CallLogSource {
    /// Load all records in log order
    fn load_records(&self) -> BillResult<Vec<CallRecord>>;
}
