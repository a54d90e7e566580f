//! Pricing resolution and booking allocation for billboard rentals: rate
//! tables, date-range proration, the bounded selection basket, booking
//! aggregation and contract numbering. The surrounding application owns
//! persistence, transport and rendering; this crate takes plain data in and
//! hands plain data (or typed failures) back.

pub mod models;
pub mod services;

pub use models::billboard::{BillboardDescriptor, BillboardId, Region, SizeClass};
pub use models::bookings::{
    Booking, BookingStatus, ContractNumber, CustomerInfo, LineItem,
};
pub use models::pricing::{CatalogConfig, CategoryRates, CustomerCategory, PriceTier, TierId};
pub use services::basket_service::{
    BasketError, BulkAddReport, SelectionBasket, SkippedBillboard, MAX_BILLBOARDS_PER_BOOKING,
};
pub use services::booking_service::{BookingError, BookingService};
pub use services::catalog_service::{CatalogError, PriceCatalog};
pub use services::contract_service::ContractNumberGenerator;
pub use services::pricing_service::{
    PricedLine, PricingError, PricingService, DAYS_PER_BILLING_MONTH,
};
