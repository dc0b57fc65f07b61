//! Billing ledger
//!
//! Per-run mapping from called number to the prices of its calls, in call order.

use rust_decimal::Decimal;
use std::collections::BTreeMap;
use telbill_core::models::{NumberSubtotal, PhoneNumber, Price};

/// Billing ledger
///
/// Built once per calculation, mutated only by promotions, then summed.
/// Numbers are kept in ascending order so iteration is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BillingLedger {
    entries: BTreeMap<PhoneNumber, Vec<Price>>,
}

impl BillingLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the price of one call to its number's sequence
    pub fn record(&mut self, number: PhoneNumber, price: Price) {
        self.entries.entry(number).or_default().push(price);
    }

    /// Number of distinct numbers in the ledger
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no call has been recorded
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Billed calls for a number (0 if unknown or waived)
    pub fn call_count(&self, number: &PhoneNumber) -> usize {
        self.entries.get(number).map_or(0, Vec::len)
    }

    /// Prices recorded for a number, in call order
    pub fn prices(&self, number: &PhoneNumber) -> &[Price] {
        self.entries.get(number).map(Vec::as_slice).unwrap_or_default()
    }

    /// Sum of the prices recorded for a number
    pub fn subtotal(&self, number: &PhoneNumber) -> Price {
        self.prices(number).iter().copied().sum()
    }

    /// All numbers sharing the highest call count
    ///
    /// Empty when the ledger is empty.
    pub fn most_called_numbers(&self) -> Vec<&PhoneNumber> {
        let max_calls = self.entries.values().map(Vec::len).max().unwrap_or(0);

        self.entries
            .iter()
            .filter(|(_, prices)| prices.len() == max_calls)
            .map(|(number, _)| number)
            .collect()
    }

    /// Make every call of a number free
    ///
    /// The number stays in the ledger with an empty sequence.
    /// Returns the amount removed.
    pub fn waive(&mut self, number: &PhoneNumber) -> Price {
        match self.entries.get_mut(number) {
            Some(prices) => std::mem::take(prices).into_iter().sum(),
            None => Decimal::ZERO,
        }
    }

    /// Iterate over numbers and their price sequences
    pub fn iter(&self) -> impl Iterator<Item = (&PhoneNumber, &[Price])> {
        self.entries
            .iter()
            .map(|(number, prices)| (number, prices.as_slice()))
    }

    /// Per-number subtotals, ordered by number
    pub fn subtotals(&self) -> Vec<NumberSubtotal> {
        self.iter()
            .map(|(number, prices)| NumberSubtotal {
                number: number.clone(),
                calls: prices.len(),
                amount: prices.iter().copied().sum(),
            })
            .collect()
    }

    /// Sum of every price left in the ledger
    pub fn total(&self) -> Price {
        self.entries.values().flatten().copied().sum()
    }
}
