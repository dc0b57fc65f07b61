//! Bill model
//!
//! The outcome of one billing run: the total plus enough detail to explain it.

use rust_decimal::Decimal;
use serde::Serialize;

use super::PhoneNumber;

/// Charges for a single called number after promotions
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NumberSubtotal {
    /// Called number
    pub number: PhoneNumber,

    /// Calls still billed for this number (0 when waived)
    pub calls: usize,

    /// Sum of the remaining call prices
    pub amount: Decimal,
}

/// Bill for one call log
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bill {
    /// Amount to pay
    pub total: Decimal,

    /// Number whose calls were made free by the promotion
    pub waived_number: Option<PhoneNumber>,

    /// Amount the promotion removed from the bill
    pub waived_amount: Decimal,

    /// Per-number subtotals, ordered by number
    pub subtotals: Vec<NumberSubtotal>,
}

impl Bill {
    /// Bill for an empty call log
    pub fn empty() -> Self {
        Self {
            total: Decimal::ZERO,
            waived_number: None,
            waived_amount: Decimal::ZERO,
            subtotals: Vec::new(),
        }
    }

    /// Total before the promotion was applied
    #[inline]
    pub fn gross_total(&self) -> Decimal {
        self.total + self.waived_amount
    }

    /// Subtotal for a number, if it appears in the log
    pub fn subtotal_for(&self, number: &PhoneNumber) -> Option<&NumberSubtotal> {
        self.subtotals.iter().find(|s| &s.number == number)
    }
}

impl Default for Bill {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn number(raw: &str) -> PhoneNumber {
        PhoneNumber::parse(raw).unwrap()
    }

    #[test]
    fn test_empty_bill() {
        let bill = Bill::default();
        assert_eq!(bill.total, Decimal::ZERO);
        assert_eq!(bill.gross_total(), Decimal::ZERO);
        assert!(bill.waived_number.is_none());
        assert!(bill.subtotals.is_empty());
    }

    #[test]
    fn test_gross_total_and_lookup() {
        let bill = Bill {
            total: dec!(9.5),
            waived_number: Some(number("420776")),
            waived_amount: dec!(6.0),
            subtotals: vec![
                NumberSubtotal {
                    number: number("420774"),
                    calls: 2,
                    amount: dec!(1.5),
                },
                NumberSubtotal {
                    number: number("420776"),
                    calls: 0,
                    amount: dec!(0),
                },
            ],
        };

        assert_eq!(bill.gross_total(), dec!(15.5));
        assert_eq!(bill.subtotal_for(&number("420774")).unwrap().calls, 2);
        assert!(bill.subtotal_for(&number("999999")).is_none());
    }

    #[test]
    fn test_bill_serialization() {
        let bill = Bill {
            total: dec!(1.5),
            waived_number: Some(number("420776")),
            waived_amount: dec!(6.0),
            subtotals: vec![],
        };
        let json = serde_json::to_value(&bill).unwrap();
        assert_eq!(json["waived_number"], "420776");
        assert_eq!(json["total"], "1.5");
    }
}
