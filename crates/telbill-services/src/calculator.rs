//! Telephone bill calculator
//!
//! Prices every call, groups the prices by number, applies the promotion
//! and sums what is left.

use telbill_core::{
    models::{Bill, CallRecord, Price},
    traits::BillCalculator,
    AppConfig, BillResult, TariffConfig,
};
use tracing::{debug, info, instrument};

use crate::call_log::CallLogParser;
use crate::ledger::BillingLedger;
use crate::pricing::CallPricer;
use crate::promotion::{MostCalledNumberWaiver, Promotion};

/// Telephone bill calculator
///
/// Holds no mutable state: every calculation builds its own ledger.
#[derive(Debug, Clone)]
pub struct TelephoneBillCalculator<P: Promotion = MostCalledNumberWaiver> {
    pricer: CallPricer,
    parser: CallLogParser,
    promotion: P,
}

impl TelephoneBillCalculator {
    /// Create a calculator with the most-called-number waiver
    pub fn new(tariff: TariffConfig) -> Self {
        Self::with_promotion(tariff, MostCalledNumberWaiver)
    }

    /// Create a calculator from the tariff and call log format of a loaded config
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.tariff.clone())
            .with_parser(CallLogParser::new(config.call_log.clone()))
    }
}

impl Default for TelephoneBillCalculator {
    fn default() -> Self {
        Self::new(TariffConfig::default())
    }
}

impl<P: Promotion> TelephoneBillCalculator<P> {
    /// Create a calculator with a specific promotion
    pub fn with_promotion(tariff: TariffConfig, promotion: P) -> Self {
        Self {
            pricer: CallPricer::new(tariff),
            parser: CallLogParser::default(),
            promotion,
        }
    }

    /// Replace the parser used by `calculate_log`
    pub fn with_parser(mut self, parser: CallLogParser) -> Self {
        self.parser = parser;
        self
    }

    /// Parser used by `calculate_log`
    pub fn parser(&self) -> &CallLogParser {
        &self.parser
    }

    /// Pricer used for individual calls
    pub fn pricer(&self) -> &CallPricer {
        &self.pricer
    }

    /// Price a single call
    #[inline]
    pub fn price(&self, record: &CallRecord) -> Price {
        self.pricer.price(record)
    }

    /// Price every call and group the prices by number, keeping call order
    pub fn build_ledger(&self, records: &[CallRecord]) -> BillingLedger {
        let mut ledger = BillingLedger::new();
        for record in records {
            ledger.record(record.number().clone(), self.pricer.price(record));
        }
        ledger
    }

    /// Parse raw call log text with the calculator's parser and return the total
    pub fn calculate_log(&self, text: &str) -> BillResult<Price> {
        let records = self.parser.parse(text)?;
        Ok(self.calculate(&records))
    }
}

impl<P: Promotion> BillCalculator for TelephoneBillCalculator<P> {
    #[instrument(skip_all, fields(records = records.len(), promotion = self.promotion.name()))]
    fn calculate_bill(&self, records: &[CallRecord]) -> Bill {
        let mut ledger = self.build_ledger(records);
        let gross_total = ledger.total();

        let waived_number = self.promotion.apply(&mut ledger);

        for (number, prices) in ledger.iter() {
            debug!("Entry: {} -> {:?}", number, prices);
        }

        let total = ledger.total();
        info!("Bill total: {} ({} numbers)", total, ledger.len());

        Bill {
            total,
            waived_number,
            waived_amount: gross_total - total,
            subtotals: ledger.subtotals(),
        }
    }
}
