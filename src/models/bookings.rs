use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::billboard::{BillboardId, Region, SizeClass};

/// One billboard's priced contribution to a booking. Name, size and region
/// are captured at selection time and never re-resolved; a line item is
/// replaced (remove + add), never edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub billboard_id: BillboardId,
    pub name: String,
    pub size_class: SizeClass,
    pub region: Region,
    pub unit_price_after_multiplier: i64,
    pub duration_days: i64,
    pub line_total: i64,
}

impl LineItem {
    /// Per-unit price as shown on booking screens: the line total divided
    /// back by the day count. Because the line total is rounded separately,
    /// this does not always equal `unit_price_after_multiplier`.
    pub fn display_unit_price(&self) -> i64 {
        (self.line_total as f64 / self.duration_days as f64).round() as i64
    }
}

/// Customer contact fields, passed through as given. Validation is the
/// calling layer's concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerInfo {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub company: Option<String>,
}

impl CustomerInfo {
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            email: None,
            company: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = Some(company.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BookingStatus::Pending => write!(f, "pending"),
            BookingStatus::Confirmed => write!(f, "confirmed"),
            BookingStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Human-readable contract identifier, `C-YYYYMM-NNNN`. Minted once at
/// booking creation and opaque afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContractNumber(String);

impl ContractNumber {
    pub(crate) fn new(raw: String) -> Self {
        Self(raw)
    }

    /// Validate a contract number arriving from an outer layer. Returns
    /// `None` when the string does not match the minted shape.
    pub fn parse(raw: &str) -> Option<Self> {
        let re = regex::Regex::new(r"^C-[0-9]{4}(0[1-9]|1[0-2])-[0-9]{4}$");
        if re.unwrap().is_match(raw) {
            Some(Self(raw.to_string()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ContractNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A finalized multi-billboard booking. Immutable once created; the status
/// is the only field that ever changes, and only through the copy-on-write
/// transitions below.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub contract_number: ContractNumber,
    pub customer: CustomerInfo,
    pub line_items: Vec<LineItem>,
    pub grand_total: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: BookingStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    /// Approve a pending booking. Returns a new record with only `status`
    /// changed; a booking that is no longer pending comes back unchanged.
    pub fn confirmed(&self) -> Booking {
        self.with_status(BookingStatus::Confirmed)
    }

    /// Cancel a pending booking, same copy-on-write discipline as
    /// [`Booking::confirmed`].
    pub fn cancelled(&self) -> Booking {
        self.with_status(BookingStatus::Cancelled)
    }

    fn with_status(&self, status: BookingStatus) -> Booking {
        let mut next = self.clone();
        if self.status == BookingStatus::Pending {
            next.status = status;
        }
        next
    }
}
