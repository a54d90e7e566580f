use std::collections::HashMap;
use std::env;

use serde::{Deserialize, Serialize};

use crate::models::billboard::{Region, SizeClass};

/// Pricing tier identifier ("A" or "B" in the shipped tables).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TierId(String);

impl TierId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TierId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Customer segment a booking is priced under. Closed set; unknown segments
/// cannot reach the rate tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CustomerCategory {
    Marketer,
    Company,
    Individual,
}

impl std::fmt::Display for CustomerCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CustomerCategory::Marketer => write!(f, "marketer"),
            CustomerCategory::Company => write!(f, "company"),
            CustomerCategory::Individual => write!(f, "individual"),
        }
    }
}

/// Monthly rates for one size class, one slot per customer category. A size
/// class either prices all three categories or is absent from the tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRates {
    pub marketer: i64,
    pub company: i64,
    pub individual: i64,
}

impl CategoryRates {
    pub fn new(marketer: i64, company: i64, individual: i64) -> Self {
        Self {
            marketer,
            company,
            individual,
        }
    }

    pub fn rate_for(&self, category: CustomerCategory) -> i64 {
        match category {
            CustomerCategory::Marketer => self.marketer,
            CustomerCategory::Company => self.company,
            CustomerCategory::Individual => self.individual,
        }
    }

    pub(crate) fn set_rate(&mut self, category: CustomerCategory, rate: i64) {
        match category {
            CustomerCategory::Marketer => self.marketer = rate,
            CustomerCategory::Company => self.company = rate,
            CustomerCategory::Individual => self.individual = rate,
        }
    }
}

/// A named pricing profile: size×category monthly rates plus per-region
/// multipliers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceTier {
    pub id: TierId,
    pub name: String,
    pub sizes: HashMap<SizeClass, CategoryRates>,
    pub regions: HashMap<Region, f64>,
}

impl PriceTier {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: TierId::new(id),
            name: name.into(),
            sizes: HashMap::new(),
            regions: HashMap::new(),
        }
    }

    pub fn with_size(mut self, size_class: impl Into<String>, rates: CategoryRates) -> Self {
        self.sizes.insert(SizeClass::new(size_class), rates);
        self
    }

    pub fn with_region(mut self, region: impl Into<String>, multiplier: f64) -> Self {
        self.regions.insert(Region::new(region), multiplier);
        self
    }
}

/// Fallback policy for keys missing from a tier's tables. Strict by default:
/// a missing size class or region is a typed lookup failure. Setting a
/// fallback reinstates the substitute-a-default behavior for entries not yet
/// priced, as an explicit opt-in.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub fallback_unit_rate: Option<i64>,
    pub fallback_multiplier: Option<f64>,
}

impl CatalogConfig {
    /// Read fallback overrides from environment variables, strict when unset.
    pub fn from_env() -> Self {
        Self {
            fallback_unit_rate: env::var("PRICING_FALLBACK_RATE")
                .ok()
                .and_then(|s| s.parse().ok()),
            fallback_multiplier: env::var("PRICING_FALLBACK_MULTIPLIER")
                .ok()
                .and_then(|s| s.parse().ok()),
        }
    }
}

/// The two tiers the business ships with, premium ("A") and standard ("B").
/// Rates are monthly amounts in whole dinars; multipliers reflect the
/// location premium per city.
pub fn default_tiers() -> Vec<PriceTier> {
    vec![
        PriceTier::new("A", "Level A - premium locations")
            .with_size("13×5", CategoryRates::new(4500, 4000, 3500))
            .with_size("12×4", CategoryRates::new(3800, 3300, 2800))
            .with_size("10×4", CategoryRates::new(3200, 2700, 2200))
            .with_size("8×3", CategoryRates::new(2500, 2000, 1500))
            .with_size("6×3", CategoryRates::new(2000, 1500, 1000))
            .with_size("4×3", CategoryRates::new(1500, 1000, 800))
            .with_region("Tripoli", 1.2)
            .with_region("Benghazi", 1.0)
            .with_region("Misrata", 0.9)
            .with_region("Zliten", 0.8)
            .with_region("Khoms", 0.7)
            .with_region("Zawiya", 0.8)
            .with_region("Sabratha", 0.7),
        PriceTier::new("B", "Level B - standard locations")
            .with_size("13×5", CategoryRates::new(3500, 3000, 2500))
            .with_size("12×4", CategoryRates::new(2800, 2300, 1800))
            .with_size("10×4", CategoryRates::new(2200, 1700, 1200))
            .with_size("8×3", CategoryRates::new(1800, 1300, 1000))
            .with_size("6×3", CategoryRates::new(1500, 1000, 700))
            .with_size("4×3", CategoryRates::new(1200, 800, 500))
            .with_region("Tripoli", 1.2)
            .with_region("Benghazi", 1.0)
            .with_region("Misrata", 0.9)
            .with_region("Zliten", 0.8)
            .with_region("Khoms", 0.7)
            .with_region("Zawiya", 0.8)
            .with_region("Sabratha", 0.7),
    ]
}
