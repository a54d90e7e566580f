use std::collections::HashMap;
use std::sync::RwLock;

use crate::models::billboard::{Region, SizeClass};
use crate::models::pricing::{
    default_tiers, CatalogConfig, CustomerCategory, PriceTier, TierId,
};

#[derive(Debug, Clone, PartialEq)]
pub enum CatalogError {
    UnknownTier(TierId),
    UnknownSizeClass { tier: TierId, size_class: SizeClass },
    UnknownRegion { tier: TierId, region: Region },
    InvalidValue(String),
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::UnknownTier(tier) => write!(f, "Unknown price tier: {}", tier),
            CatalogError::UnknownSizeClass { tier, size_class } => {
                write!(f, "Size class {} is not priced in tier {}", size_class, tier)
            }
            CatalogError::UnknownRegion { tier, region } => {
                write!(f, "Region {} has no multiplier in tier {}", region, tier)
            }
            CatalogError::InvalidValue(err) => write!(f, "Invalid value: {}", err),
        }
    }
}

impl std::error::Error for CatalogError {}

/// Shared, editable rate tables. One instance serves every basket and every
/// admin edit; the interior lock serializes writers so a reader never sees a
/// half-applied table. Prices are captured into line items at selection
/// time, so edits never reach into existing baskets or bookings.
pub struct PriceCatalog {
    tiers: RwLock<HashMap<TierId, PriceTier>>,
    config: CatalogConfig,
}

impl PriceCatalog {
    pub fn new() -> Self {
        Self::with_tiers(Vec::new())
    }

    pub fn with_tiers(tiers: Vec<PriceTier>) -> Self {
        let tiers = tiers.into_iter().map(|t| (t.id.clone(), t)).collect();
        Self {
            tiers: RwLock::new(tiers),
            config: CatalogConfig::default(),
        }
    }

    /// Catalog pre-loaded with the business's shipped "A"/"B" tables.
    pub fn with_default_tiers() -> Self {
        Self::with_tiers(default_tiers())
    }

    pub fn with_config(mut self, config: CatalogConfig) -> Self {
        self.config = config;
        self
    }

    /// Monthly rate for a size class under the given tier and customer
    /// category. Missing keys are typed failures unless the catalog was
    /// configured with a fallback rate; an unknown tier always fails.
    pub fn resolve_unit_rate(
        &self,
        tier_id: &TierId,
        size_class: &SizeClass,
        category: CustomerCategory,
    ) -> Result<i64, CatalogError> {
        let tiers = self.tiers.read().expect("price catalog lock poisoned");
        let tier = tiers
            .get(tier_id)
            .ok_or_else(|| CatalogError::UnknownTier(tier_id.clone()))?;
        match tier.sizes.get(size_class) {
            Some(rates) => Ok(rates.rate_for(category)),
            None => self
                .config
                .fallback_unit_rate
                .ok_or_else(|| CatalogError::UnknownSizeClass {
                    tier: tier_id.clone(),
                    size_class: size_class.clone(),
                }),
        }
    }

    /// Location premium multiplier for a region, same lookup discipline as
    /// [`PriceCatalog::resolve_unit_rate`].
    pub fn resolve_region_multiplier(
        &self,
        tier_id: &TierId,
        region: &Region,
    ) -> Result<f64, CatalogError> {
        let tiers = self.tiers.read().expect("price catalog lock poisoned");
        let tier = tiers
            .get(tier_id)
            .ok_or_else(|| CatalogError::UnknownTier(tier_id.clone()))?;
        match tier.regions.get(region) {
            Some(multiplier) => Ok(*multiplier),
            None => self
                .config
                .fallback_multiplier
                .ok_or_else(|| CatalogError::UnknownRegion {
                    tier: tier_id.clone(),
                    region: region.clone(),
                }),
        }
    }

    /// Point edit of one size×category cell. A rejected edit leaves the
    /// table exactly as it was.
    pub fn set_unit_rate(
        &self,
        tier_id: &TierId,
        size_class: &SizeClass,
        category: CustomerCategory,
        new_rate: i64,
    ) -> Result<(), CatalogError> {
        if new_rate < 0 {
            return Err(CatalogError::InvalidValue(format!(
                "unit rate must be non-negative, got {}",
                new_rate
            )));
        }
        let mut tiers = self.tiers.write().expect("price catalog lock poisoned");
        let tier = tiers
            .get_mut(tier_id)
            .ok_or_else(|| CatalogError::UnknownTier(tier_id.clone()))?;
        let rates = tier
            .sizes
            .get_mut(size_class)
            .ok_or_else(|| CatalogError::UnknownSizeClass {
                tier: tier_id.clone(),
                size_class: size_class.clone(),
            })?;
        rates.set_rate(category, new_rate);
        log::debug!(
            "tier {}: {} {} rate set to {}",
            tier_id,
            size_class,
            category,
            new_rate
        );
        Ok(())
    }

    /// Point edit of one region multiplier. Multipliers must be strictly
    /// positive.
    pub fn set_region_multiplier(
        &self,
        tier_id: &TierId,
        region: &Region,
        new_multiplier: f64,
    ) -> Result<(), CatalogError> {
        if new_multiplier <= 0.0 || new_multiplier.is_nan() {
            return Err(CatalogError::InvalidValue(format!(
                "region multiplier must be positive, got {}",
                new_multiplier
            )));
        }
        let mut tiers = self.tiers.write().expect("price catalog lock poisoned");
        let tier = tiers
            .get_mut(tier_id)
            .ok_or_else(|| CatalogError::UnknownTier(tier_id.clone()))?;
        let slot = tier
            .regions
            .get_mut(region)
            .ok_or_else(|| CatalogError::UnknownRegion {
                tier: tier_id.clone(),
                region: region.clone(),
            })?;
        *slot = new_multiplier;
        log::debug!(
            "tier {}: {} multiplier set to {}",
            tier_id,
            region,
            new_multiplier
        );
        Ok(())
    }

    /// Point-in-time copy of every tier, ordered by tier id.
    pub fn snapshot(&self) -> Vec<PriceTier> {
        let tiers = self.tiers.read().expect("price catalog lock poisoned");
        let mut all: Vec<PriceTier> = tiers.values().cloned().collect();
        all.sort_by(|a, b| a.id.as_str().cmp(b.id.as_str()));
        all
    }

    /// Serialize the full tier set, as the pricing admin screen's export
    /// action does.
    pub fn export_json(&self) -> Result<String, CatalogError> {
        serde_json::to_string_pretty(&self.snapshot())
            .map_err(|e| CatalogError::InvalidValue(e.to_string()))
    }

    /// Replace the whole tier set from a previously exported JSON document.
    /// The snapshot is validated before it is swapped in, so a bad document
    /// never clobbers the live tables.
    pub fn import_json(&self, json: &str) -> Result<(), CatalogError> {
        let imported: Vec<PriceTier> =
            serde_json::from_str(json).map_err(|e| CatalogError::InvalidValue(e.to_string()))?;
        for tier in &imported {
            for (size_class, rates) in &tier.sizes {
                for rate in [rates.marketer, rates.company, rates.individual] {
                    if rate < 0 {
                        return Err(CatalogError::InvalidValue(format!(
                            "tier {}: negative rate for size class {}",
                            tier.id, size_class
                        )));
                    }
                }
            }
            for (region, multiplier) in &tier.regions {
                if *multiplier <= 0.0 || multiplier.is_nan() {
                    return Err(CatalogError::InvalidValue(format!(
                        "tier {}: non-positive multiplier for region {}",
                        tier.id, region
                    )));
                }
            }
        }
        let mut tiers = self.tiers.write().expect("price catalog lock poisoned");
        *tiers = imported.into_iter().map(|t| (t.id.clone(), t)).collect();
        log::info!("price catalog replaced from import, {} tiers", tiers.len());
        Ok(())
    }
}

impl Default for PriceCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tier_a() -> TierId {
        TierId::new("A")
    }

    #[test]
    fn resolves_seeded_rates_and_multipliers() {
        let catalog = PriceCatalog::with_default_tiers();
        let rate = catalog
            .resolve_unit_rate(
                &tier_a(),
                &SizeClass::new("13×5"),
                CustomerCategory::Company,
            )
            .unwrap();
        assert_eq!(rate, 4000);

        let multiplier = catalog
            .resolve_region_multiplier(&tier_a(), &Region::new("Tripoli"))
            .unwrap();
        assert_eq!(multiplier, 1.2);
    }

    #[test]
    fn unknown_keys_are_typed_failures() {
        let catalog = PriceCatalog::with_default_tiers();

        let err = catalog
            .resolve_unit_rate(
                &TierId::new("C"),
                &SizeClass::new("13×5"),
                CustomerCategory::Company,
            )
            .unwrap_err();
        assert_eq!(err, CatalogError::UnknownTier(TierId::new("C")));

        let err = catalog
            .resolve_unit_rate(
                &tier_a(),
                &SizeClass::new("9×9"),
                CustomerCategory::Company,
            )
            .unwrap_err();
        assert!(matches!(err, CatalogError::UnknownSizeClass { .. }));

        let err = catalog
            .resolve_region_multiplier(&tier_a(), &Region::new("Atlantis"))
            .unwrap_err();
        assert!(matches!(err, CatalogError::UnknownRegion { .. }));
    }

    #[test]
    fn edits_show_up_in_later_resolutions() {
        let catalog = PriceCatalog::with_default_tiers();
        catalog
            .set_unit_rate(
                &tier_a(),
                &SizeClass::new("13×5"),
                CustomerCategory::Company,
                4200,
            )
            .unwrap();
        assert_eq!(
            catalog
                .resolve_unit_rate(
                    &tier_a(),
                    &SizeClass::new("13×5"),
                    CustomerCategory::Company
                )
                .unwrap(),
            4200
        );

        catalog
            .set_region_multiplier(&tier_a(), &Region::new("Benghazi"), 1.1)
            .unwrap();
        assert_eq!(
            catalog
                .resolve_region_multiplier(&tier_a(), &Region::new("Benghazi"))
                .unwrap(),
            1.1
        );
    }

    #[test]
    fn rejected_edit_leaves_prior_value() {
        let catalog = PriceCatalog::with_default_tiers();
        let err = catalog
            .set_unit_rate(
                &tier_a(),
                &SizeClass::new("13×5"),
                CustomerCategory::Company,
                -1,
            )
            .unwrap_err();
        assert!(matches!(err, CatalogError::InvalidValue(_)));
        assert_eq!(
            catalog
                .resolve_unit_rate(
                    &tier_a(),
                    &SizeClass::new("13×5"),
                    CustomerCategory::Company
                )
                .unwrap(),
            4000
        );

        let err = catalog
            .set_region_multiplier(&tier_a(), &Region::new("Tripoli"), 0.0)
            .unwrap_err();
        assert!(matches!(err, CatalogError::InvalidValue(_)));
        assert_eq!(
            catalog
                .resolve_region_multiplier(&tier_a(), &Region::new("Tripoli"))
                .unwrap(),
            1.2
        );
    }

    #[test]
    fn fallback_config_substitutes_for_unpriced_keys_only() {
        let catalog = PriceCatalog::with_default_tiers().with_config(CatalogConfig {
            fallback_unit_rate: Some(2000),
            fallback_multiplier: Some(1.0),
        });

        assert_eq!(
            catalog
                .resolve_unit_rate(&tier_a(), &SizeClass::new("9×9"), CustomerCategory::Company)
                .unwrap(),
            2000
        );
        assert_eq!(
            catalog
                .resolve_region_multiplier(&tier_a(), &Region::new("Atlantis"))
                .unwrap(),
            1.0
        );

        // A priced key still wins over the fallback.
        assert_eq!(
            catalog
                .resolve_unit_rate(
                    &tier_a(),
                    &SizeClass::new("13×5"),
                    CustomerCategory::Company
                )
                .unwrap(),
            4000
        );

        // An unknown tier is a failure regardless of fallback.
        assert!(catalog
            .resolve_unit_rate(
                &TierId::new("C"),
                &SizeClass::new("13×5"),
                CustomerCategory::Company
            )
            .is_err());
    }

    #[test]
    fn export_import_round_trips_resolutions() {
        let source = PriceCatalog::with_default_tiers();
        source
            .set_unit_rate(
                &tier_a(),
                &SizeClass::new("4×3"),
                CustomerCategory::Individual,
                900,
            )
            .unwrap();
        let json = source.export_json().unwrap();

        let restored = PriceCatalog::new();
        restored.import_json(&json).unwrap();
        assert_eq!(
            restored
                .resolve_unit_rate(
                    &tier_a(),
                    &SizeClass::new("4×3"),
                    CustomerCategory::Individual
                )
                .unwrap(),
            900
        );
        assert_eq!(
            restored
                .resolve_region_multiplier(&TierId::new("B"), &Region::new("Misrata"))
                .unwrap(),
            0.9
        );
    }

    #[test]
    fn import_rejects_bad_documents_without_clobbering() {
        let catalog = PriceCatalog::with_default_tiers();

        assert!(matches!(
            catalog.import_json("not json").unwrap_err(),
            CatalogError::InvalidValue(_)
        ));

        let bad = r#"[{"id":"A","name":"bad","sizes":{"13×5":{"marketer":-5,"company":1,"individual":1}},"regions":{}}]"#;
        assert!(matches!(
            catalog.import_json(bad).unwrap_err(),
            CatalogError::InvalidValue(_)
        ));

        // Live tables untouched by either failed import.
        assert_eq!(
            catalog
                .resolve_unit_rate(
                    &tier_a(),
                    &SizeClass::new("13×5"),
                    CustomerCategory::Company
                )
                .unwrap(),
            4000
        );
    }
}
