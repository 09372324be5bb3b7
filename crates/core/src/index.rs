//! Index surface names and zonal statistics
//!
//! An index surface is a per-pixel scalar field computed by the external
//! earth-observation collaborator; the engine only names it and samples
//! statistics from it.

use serde::{Deserialize, Serialize};

/// Named continuous index surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexKind {
    /// Normalized difference vegetation index (NIR/red).
    Ndvi,
    /// Enhanced vegetation index.
    Evi,
    /// Normalized difference moisture index (NIR/SWIR1).
    Ndmi,
    /// Red-edge chlorophyll index.
    Ndre,
    /// Normalized difference water index (green/NIR).
    Ndwi,
    /// Modified NDWI (green/SWIR1).
    Mndwi,
    /// Vegetation condition index (NDVI scaled to 0-100).
    Vci,
    /// Automated water extraction index.
    Awei,
    /// Dynamic-surface-water probability from the alternate AI dataset.
    WaterProbability,
    /// Red/green band ratio used as a turbidity proxy.
    Turbidity,
    /// NIR/red band ratio used as a chlorophyll proxy.
    Chlorophyll,
    /// Water ratio index (turbid-water detector).
    Wri,
    /// Normalized difference turbidity index.
    Ndti,
    /// Blue/green ratio tracking coloured dissolved organic matter.
    Cdom,
}

impl IndexKind {
    /// Canonical lowercase name, as used in requests and CSV headers.
    pub fn name(&self) -> &'static str {
        match self {
            IndexKind::Ndvi => "ndvi",
            IndexKind::Evi => "evi",
            IndexKind::Ndmi => "ndmi",
            IndexKind::Ndre => "ndre",
            IndexKind::Ndwi => "ndwi",
            IndexKind::Mndwi => "mndwi",
            IndexKind::Vci => "vci",
            IndexKind::Awei => "awei",
            IndexKind::WaterProbability => "water_probability",
            IndexKind::Turbidity => "turbidity",
            IndexKind::Chlorophyll => "chlorophyll",
            IndexKind::Wri => "wri",
            IndexKind::Ndti => "ndti",
            IndexKind::Cdom => "cdom",
        }
    }

    /// Parse a request-supplied index name. Unknown names are invalid input.
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "ndvi" => Some(IndexKind::Ndvi),
            "evi" => Some(IndexKind::Evi),
            "ndmi" => Some(IndexKind::Ndmi),
            "ndre" => Some(IndexKind::Ndre),
            "ndwi" => Some(IndexKind::Ndwi),
            "mndwi" => Some(IndexKind::Mndwi),
            "vci" => Some(IndexKind::Vci),
            "awei" => Some(IndexKind::Awei),
            "water_probability" => Some(IndexKind::WaterProbability),
            "turbidity" => Some(IndexKind::Turbidity),
            "chlorophyll" => Some(IndexKind::Chlorophyll),
            "wri" => Some(IndexKind::Wri),
            "ndti" => Some(IndexKind::Ndti),
            "cdom" => Some(IndexKind::Cdom),
            _ => None,
        }
    }
}

impl std::fmt::Display for IndexKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Zonal statistic requested from the collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Statistic {
    /// Area-weighted sum (masks: pixel area accumulation).
    Sum,
    /// Mean value over the region.
    Mean,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_roundtrip() {
        for kind in [
            IndexKind::Ndvi,
            IndexKind::Mndwi,
            IndexKind::Cdom,
            IndexKind::WaterProbability,
        ] {
            assert_eq!(IndexKind::parse(kind.name()), Some(kind));
        }
        assert_eq!(IndexKind::parse("NDVI"), Some(IndexKind::Ndvi));
        assert_eq!(IndexKind::parse("bogus"), None);
    }
}
