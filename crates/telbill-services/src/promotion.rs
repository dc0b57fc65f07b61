//! Promotions applied to a completed billing ledger

use telbill_core::models::PhoneNumber;
use tracing::{debug, info};

use crate::ledger::BillingLedger;

/// A promotion rewrites the ledger before it is summed
pub trait Promotion: Send + Sync {
    /// Short name for logs
    fn name(&self) -> &'static str;

    /// Apply the promotion in place
    ///
    /// Returns the number whose calls were waived, if any.
    fn apply(&self, ledger: &mut BillingLedger) -> Option<PhoneNumber>;
}

/// Makes every call to the most frequently called number free
///
/// When several numbers share the highest call count, the numerically
/// largest one wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct MostCalledNumberWaiver;

impl MostCalledNumberWaiver {
    /// Number the promotion would waive, without touching the ledger
    pub fn select(ledger: &BillingLedger) -> Option<PhoneNumber> {
        let candidates = ledger.most_called_numbers();

        if candidates.len() > 1 {
            debug!(
                "{} numbers share the highest call count, picking the largest",
                candidates.len()
            );
        }

        candidates
            .into_iter()
            .max_by_key(|number| number.value())
            .cloned()
    }
}

impl Promotion for MostCalledNumberWaiver {
    fn name(&self) -> &'static str {
        "most_called_number_waiver"
    }

    fn apply(&self, ledger: &mut BillingLedger) -> Option<PhoneNumber> {
        let number = Self::select(ledger)?;
        let calls = ledger.call_count(&number);
        let waived = ledger.waive(&number);

        info!("Waived {} calls to {} worth {}", calls, number, waived);

        Some(number)
    }
}

/// Leaves the ledger untouched
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPromotion;

impl Promotion for NoPromotion {
    fn name(&self) -> &'static str {
        "none"
    }

    fn apply(&self, _ledger: &mut BillingLedger) -> Option<PhoneNumber> {
        None
    }
}
