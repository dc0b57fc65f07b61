//! Call pricing
//!
//! Splits a call into day, night and long-call minutes and prices each part
//! with the configured tariff.

use chrono::NaiveTime;
use rust_decimal::Decimal;
use telbill_core::{models::CallRecord, NightMinutesPolicy, Price, TariffConfig};
use tracing::debug;

/// Minutes of a single call per tariff band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PriceBreakdown {
    /// Minutes billed at the day rate
    pub day_minutes: i64,

    /// Minutes billed at the night rate (may be negative in reference mode)
    pub night_minutes: i64,

    /// Minutes beyond the long call threshold
    pub long_call_minutes: i64,
}

impl PriceBreakdown {
    /// Price the breakdown with the given tariff
    ///
    /// Each band is multiplied in exact decimal arithmetic and summed;
    /// nothing is rounded.
    pub fn price(&self, tariff: &TariffConfig) -> Price {
        tariff.day_rate * Decimal::from(self.day_minutes)
            + tariff.night_rate * Decimal::from(self.night_minutes)
            + tariff.long_call_rate * Decimal::from(self.long_call_minutes)
    }

    /// Total minutes across all bands
    #[inline]
    pub fn total_minutes(&self) -> i64 {
        self.day_minutes + self.night_minutes + self.long_call_minutes
    }
}

/// Call pricer
///
/// Holds the tariff so tests and callers can substitute rates, thresholds
/// and the day window without touching global state.
#[derive(Debug, Clone, Default)]
pub struct CallPricer {
    tariff: TariffConfig,
}

impl CallPricer {
    /// Create a new call pricer
    pub fn new(tariff: TariffConfig) -> Self {
        Self { tariff }
    }

    /// Tariff in use
    pub fn tariff(&self) -> &TariffConfig {
        &self.tariff
    }

    /// Split a call into tariff bands
    ///
    /// The long call band takes precedence: minutes past the threshold are
    /// never billed as day or night minutes. The day band is the overlap of
    /// the call's time of day with the day window; the night band is
    /// whatever remains of the first minutes.
    pub fn breakdown(&self, record: &CallRecord) -> PriceBreakdown {
        let duration = record.duration_minutes();
        let long_call_minutes = (duration - self.tariff.long_call_threshold_minutes).max(0);
        let day_window_minutes =
            self.day_window_minutes(record.start().time(), record.end().time());

        let night_minutes = duration - long_call_minutes - day_window_minutes;
        let night_minutes = match self.tariff.night_minutes {
            NightMinutesPolicy::Reference => night_minutes,
            NightMinutesPolicy::Clamped => night_minutes.max(0),
        };
        let day_minutes = duration - long_call_minutes - night_minutes;

        PriceBreakdown {
            day_minutes,
            night_minutes,
            long_call_minutes,
        }
    }

    /// Price a single call
    pub fn price(&self, record: &CallRecord) -> Price {
        let breakdown = self.breakdown(record);
        let price = breakdown.price(&self.tariff);

        debug!(
            number = %record.number(),
            day = breakdown.day_minutes,
            night = breakdown.night_minutes,
            long_call = breakdown.long_call_minutes,
            %price,
            "Priced call"
        );

        price
    }

    /// Whole minutes the clock interval `[start, end]` overlaps the day window
    ///
    /// Only the time of day is considered; the date is ignored. A call that
    /// starts after the window closes or ends before it opens does not
    /// overlap. An inverted interval (end earlier in the day than start,
    /// i.e. across midnight) counts as no overlap.
    pub fn day_window_minutes(&self, start: NaiveTime, end: NaiveTime) -> i64 {
        let window_start = self.tariff.day_start;
        let window_end = self.tariff.day_end;

        if start > window_end || end < window_start {
            return 0;
        }

        let from = start.max(window_start);
        let to = end.min(window_end);

        to.signed_duration_since(from).num_minutes().max(0)
    }
}
