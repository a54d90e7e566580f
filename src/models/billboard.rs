use serde::{Deserialize, Serialize};

/// Opaque billboard identifier assigned by the inventory system (e.g. "TR-001").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BillboardId(String);

impl BillboardId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BillboardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Physical dimension bucket used as a pricing key (e.g. "13×5").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SizeClass(String);

impl SizeClass {
    pub fn new(size: impl Into<String>) -> Self {
        Self(size.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SizeClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// City/region key carrying a location premium multiplier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Region(String);

impl Region {
    pub fn new(region: impl Into<String>) -> Self {
        Self(region.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Billboard attributes as supplied by the inventory layer. Immutable from
/// the engine's point of view; pricing only reads `size_class` and `region`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillboardDescriptor {
    pub id: BillboardId,
    pub name: String,
    pub size_class: SizeClass,
    pub region: Region,
}

impl BillboardDescriptor {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        size_class: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        Self {
            id: BillboardId::new(id),
            name: name.into(),
            size_class: SizeClass::new(size_class),
            region: Region::new(region),
        }
    }
}
