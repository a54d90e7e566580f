use chrono::NaiveDate;

use crate::models::billboard::{BillboardDescriptor, BillboardId};
use crate::models::bookings::LineItem;
use crate::models::pricing::{CustomerCategory, TierId};
use crate::services::catalog_service::{CatalogError, PriceCatalog};
use crate::services::pricing_service::{PricingError, PricingService};

/// Hard cap on billboards in a single booking.
pub const MAX_BILLBOARDS_PER_BOOKING: usize = 50;

#[derive(Debug, Clone, PartialEq)]
pub enum BasketError {
    DuplicateBillboard(BillboardId),
    CapacityExceeded { limit: usize },
    MissingDateRange,
    BasketClosed,
    Catalog(CatalogError),
    Pricing(PricingError),
}

impl std::fmt::Display for BasketError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BasketError::DuplicateBillboard(id) => {
                write!(f, "Billboard {} is already in the booking", id)
            }
            BasketError::CapacityExceeded { limit } => {
                write!(f, "A booking can hold at most {} billboards", limit)
            }
            BasketError::MissingDateRange => {
                write!(f, "Select a start and end date before adding billboards")
            }
            BasketError::BasketClosed => write!(f, "This booking has already been finalized"),
            BasketError::Catalog(err) => write!(f, "{}", err),
            BasketError::Pricing(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for BasketError {}

impl From<CatalogError> for BasketError {
    fn from(err: CatalogError) -> Self {
        BasketError::Catalog(err)
    }
}

impl From<PricingError> for BasketError {
    fn from(err: PricingError) -> Self {
        BasketError::Pricing(err)
    }
}

/// One candidate a bulk add could not take, with the reason it was passed
/// over.
#[derive(Debug, Clone)]
pub struct SkippedBillboard {
    pub billboard: BillboardDescriptor,
    pub reason: BasketError,
}

/// Outcome of a bulk add: what went in, what was passed over and why.
#[derive(Debug, Clone, Default)]
pub struct BulkAddReport {
    pub added: Vec<LineItem>,
    pub skipped: Vec<SkippedBillboard>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BasketState {
    Open,
    Closed,
}

#[derive(Debug, Clone, Copy)]
struct PricingContext {
    start: NaiveDate,
    end: NaiveDate,
    category: CustomerCategory,
}

/// The in-progress selection for one booking workflow: an ordered,
/// duplicate-free set of priced line items plus the date range and customer
/// category new items are priced under.
///
/// A basket belongs to a single workflow (one user, one session). It starts
/// Open, takes mutations until it is finalized, and is Closed from then on;
/// every mutation against a closed basket fails. In a shared backend, wrap
/// the basket in its own mutex — the duplicate and capacity checks are
/// check-then-act and assume no interleaved writers.
#[derive(Debug)]
pub struct SelectionBasket {
    items: Vec<LineItem>,
    context: Option<PricingContext>,
    state: BasketState,
}

impl SelectionBasket {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            context: None,
            state: BasketState::Open,
        }
    }

    /// Set the date range and customer category used to price subsequent
    /// adds. Items already in the basket keep the prices they were captured
    /// with.
    pub fn set_context(
        &mut self,
        start: NaiveDate,
        end: NaiveDate,
        category: CustomerCategory,
    ) -> Result<(), BasketError> {
        self.ensure_open()?;
        PricingService::duration_days(start, end)?;
        self.context = Some(PricingContext {
            start,
            end,
            category,
        });
        Ok(())
    }

    /// Price one billboard under the current context and append it.
    pub fn add_one(
        &mut self,
        billboard: &BillboardDescriptor,
        tier_id: &TierId,
        catalog: &PriceCatalog,
    ) -> Result<LineItem, BasketError> {
        self.ensure_open()?;
        if self.items.iter().any(|item| item.billboard_id == billboard.id) {
            return Err(BasketError::DuplicateBillboard(billboard.id.clone()));
        }
        if self.items.len() >= MAX_BILLBOARDS_PER_BOOKING {
            return Err(BasketError::CapacityExceeded {
                limit: MAX_BILLBOARDS_PER_BOOKING,
            });
        }
        let context = self.context.ok_or(BasketError::MissingDateRange)?;

        let rate = catalog.resolve_unit_rate(tier_id, &billboard.size_class, context.category)?;
        let multiplier = catalog.resolve_region_multiplier(tier_id, &billboard.region)?;
        let priced =
            PricingService::compute_line_total(rate, multiplier, context.start, context.end)?;

        let item = LineItem {
            billboard_id: billboard.id.clone(),
            name: billboard.name.clone(),
            size_class: billboard.size_class.clone(),
            region: billboard.region.clone(),
            unit_price_after_multiplier: priced.unit_price_after_multiplier,
            duration_days: priced.duration_days,
            line_total: priced.line_total,
        };
        log::debug!(
            "basket: added {} for {} ({} days)",
            item.billboard_id,
            item.line_total,
            item.duration_days
        );
        self.items.push(item.clone());
        Ok(item)
    }

    /// Add a batch of candidates in input order, continuing past individual
    /// failures. Candidates that cannot go in (already selected, basket
    /// full, unpriced catalog keys) are reported in the skip list instead
    /// of aborting the batch; once the cap is reached every remaining
    /// candidate is skipped with `CapacityExceeded`. A missing pricing
    /// context or a closed basket fails the whole call.
    pub fn add_many(
        &mut self,
        billboards: &[BillboardDescriptor],
        tier_id: &TierId,
        catalog: &PriceCatalog,
    ) -> Result<BulkAddReport, BasketError> {
        self.ensure_open()?;
        if self.context.is_none() {
            return Err(BasketError::MissingDateRange);
        }

        let mut report = BulkAddReport::default();
        for billboard in billboards {
            match self.add_one(billboard, tier_id, catalog) {
                Ok(item) => report.added.push(item),
                Err(err @ (BasketError::BasketClosed | BasketError::MissingDateRange)) => {
                    return Err(err)
                }
                Err(reason) => report.skipped.push(SkippedBillboard {
                    billboard: billboard.clone(),
                    reason,
                }),
            }
        }
        Ok(report)
    }

    /// Drop a billboard from the selection. Removing an id that is not
    /// present is a no-op, not an error.
    pub fn remove(&mut self, id: &BillboardId) -> Result<(), BasketError> {
        self.ensure_open()?;
        self.items.retain(|item| &item.billboard_id != id);
        Ok(())
    }

    /// Empty the selection but keep the pricing context.
    pub fn clear(&mut self) -> Result<(), BasketError> {
        self.ensure_open()?;
        self.items.clear();
        Ok(())
    }

    /// Sum of all line totals; 0 for an empty basket.
    pub fn total(&self) -> i64 {
        self.items.iter().map(|item| item.line_total).sum()
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn remaining_capacity(&self) -> usize {
        MAX_BILLBOARDS_PER_BOOKING - self.items.len()
    }

    pub fn is_closed(&self) -> bool {
        self.state == BasketState::Closed
    }

    /// The date range new items are priced under, once a context is set.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.context.map(|ctx| (ctx.start, ctx.end))
    }

    pub fn customer_category(&self) -> Option<CustomerCategory> {
        self.context.map(|ctx| ctx.category)
    }

    pub(crate) fn close(&mut self) {
        self.state = BasketState::Closed;
    }

    fn ensure_open(&self) -> Result<(), BasketError> {
        if self.is_closed() {
            return Err(BasketError::BasketClosed);
        }
        Ok(())
    }
}

impl Default for SelectionBasket {
    fn default() -> Self {
        Self::new()
    }
}
