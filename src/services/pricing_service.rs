use chrono::NaiveDate;
use serde::Serialize;

/// Fixed day count a monthly rate is spread over when prorating. Billing
/// months are 30 days regardless of calendar month length.
pub const DAYS_PER_BILLING_MONTH: i64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PricingError {
    InvalidDateRange { start: NaiveDate, end: NaiveDate },
}

impl std::fmt::Display for PricingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PricingError::InvalidDateRange { start, end } => {
                write!(f, "End date {} must be after start date {}", end, start)
            }
        }
    }
}

impl std::error::Error for PricingError {}

/// Result of prorating one monthly rate over a date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PricedLine {
    pub unit_price_after_multiplier: i64,
    pub duration_days: i64,
    pub line_total: i64,
}

pub struct PricingService;

impl PricingService {
    /// Whole days between two calendar dates; fails unless `end` is
    /// strictly after `start`.
    pub fn duration_days(start: NaiveDate, end: NaiveDate) -> Result<i64, PricingError> {
        let days = (end - start).num_days();
        if days <= 0 {
            return Err(PricingError::InvalidDateRange { start, end });
        }
        Ok(days)
    }

    /// Prorate a monthly rate over a date range.
    ///
    /// Two rounding steps, in this order: the rate is rounded after the
    /// region multiplier is applied, then the prorated total is rounded
    /// again. Collapsing these into one pass would shift historical totals,
    /// so the two-stage form is the contract, not an accident. A
    /// consequence is that `line_total / duration_days` does not always
    /// reproduce `unit_price_after_multiplier`; see
    /// [`crate::models::bookings::LineItem::display_unit_price`].
    pub fn compute_line_total(
        monthly_rate: i64,
        region_multiplier: f64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PricedLine, PricingError> {
        let duration_days = Self::duration_days(start, end)?;
        let unit_price_after_multiplier = round_half_up(monthly_rate as f64 * region_multiplier);
        let line_total = round_half_up(
            unit_price_after_multiplier as f64 * duration_days as f64
                / DAYS_PER_BILLING_MONTH as f64,
        );
        Ok(PricedLine {
            unit_price_after_multiplier,
            duration_days,
            line_total,
        })
    }
}

// Half-up to the nearest whole currency unit. Rates and multipliers are
// non-negative, so rounding half away from zero is rounding half up.
fn round_half_up(amount: f64) -> i64 {
    amount.round() as i64
}
