use chrono::{DateTime, Utc};
use rand::Rng;
use uuid::Uuid;

use crate::models::bookings::{Booking, BookingStatus, CustomerInfo};
use crate::services::basket_service::SelectionBasket;
use crate::services::contract_service::ContractNumberGenerator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingError {
    EmptyBasket,
    BasketClosed,
}

impl std::fmt::Display for BookingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BookingError::EmptyBasket => {
                write!(f, "Cannot finalize a booking with no billboards selected")
            }
            BookingError::BasketClosed => write!(f, "This booking has already been finalized"),
        }
    }
}

impl std::error::Error for BookingError {}

pub struct BookingService;

impl BookingService {
    /// Close the basket and turn its selection into an immutable booking.
    ///
    /// The line items are copied out of the basket, so later catalog edits
    /// or basket teardown cannot reach into the finalized record. The
    /// Open→Closed flip happens in the same `&mut` call as the snapshot;
    /// under shared access, the caller's per-basket lock makes the whole
    /// step atomic.
    pub fn finalize(
        basket: &mut SelectionBasket,
        customer: CustomerInfo,
        notes: Option<String>,
    ) -> Result<Booking, BookingError> {
        Self::finalize_with(basket, customer, notes, Utc::now(), &mut rand::thread_rng())
    }

    /// [`BookingService::finalize`] with the clock and randomness supplied
    /// by the caller.
    pub fn finalize_with<R: Rng>(
        basket: &mut SelectionBasket,
        customer: CustomerInfo,
        notes: Option<String>,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<Booking, BookingError> {
        if basket.is_closed() {
            return Err(BookingError::BasketClosed);
        }
        if basket.is_empty() {
            return Err(BookingError::EmptyBasket);
        }
        let (start_date, end_date) = basket
            .date_range()
            .expect("a non-empty basket always has a pricing context");

        let line_items = basket.items().to_vec();
        let grand_total = basket.total();
        let contract_number = ContractNumberGenerator::generate_with(now, rng);
        basket.close();

        log::info!(
            "booking {} finalized: {} billboards, total {}",
            contract_number,
            line_items.len(),
            grand_total
        );

        Ok(Booking {
            id: Uuid::new_v4(),
            contract_number,
            customer,
            line_items,
            grand_total,
            start_date,
            end_date,
            status: BookingStatus::Pending,
            notes,
            created_at: now,
        })
    }
}
