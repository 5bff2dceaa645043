//! Static per-crop economics reference table

use serde::{Deserialize, Serialize};

/// Cost of cultivation used when a crop has no table entry
pub const DEFAULT_COST: i64 = 35_000;

/// Expected returns used when a crop has no table entry
pub const DEFAULT_RETURNS: i64 = 75_000;

/// Expected cost and returns per acre, in rupees
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CropEconomics {
    pub cost: i64,
    pub returns: i64,
}

impl CropEconomics {
    pub const DEFAULT: CropEconomics = CropEconomics {
        cost: DEFAULT_COST,
        returns: DEFAULT_RETURNS,
    };

    const fn new(cost: i64, returns: i64) -> Self {
        Self { cost, returns }
    }
}

/// Known crops and their economics
pub const CROP_ECONOMICS: [(&str, CropEconomics); 6] = [
    ("Rice", CropEconomics::new(45_000, 90_000)),
    ("Wheat", CropEconomics::new(35_000, 80_000)),
    ("Maize", CropEconomics::new(30_000, 70_000)),
    ("Cotton", CropEconomics::new(50_000, 120_000)),
    ("Sugarcane", CropEconomics::new(60_000, 140_000)),
    ("Banana", CropEconomics::new(55_000, 130_000)),
];

/// Look up a crop's economics, ignoring ASCII case.
///
/// Returns `None` for crops outside the table; see [`economics_or_default`].
pub fn lookup_economics(crop: &str) -> Option<CropEconomics> {
    CROP_ECONOMICS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(crop.trim()))
        .map(|(_, eco)| *eco)
}

/// Economics for a crop, falling back to [`CropEconomics::DEFAULT`]
pub fn economics_or_default(crop: &str) -> CropEconomics {
    lookup_economics(crop).unwrap_or(CropEconomics::DEFAULT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_crops() {
        assert_eq!(
            economics_or_default("Rice"),
            CropEconomics::new(45_000, 90_000)
        );
        assert_eq!(
            economics_or_default("Sugarcane"),
            CropEconomics::new(60_000, 140_000)
        );
    }

    #[test]
    fn test_lookup_ignores_case() {
        assert_eq!(lookup_economics("rice"), lookup_economics("Rice"));
        assert_eq!(lookup_economics("COTTON").map(|e| e.cost), Some(50_000));
    }

    #[test]
    fn test_unknown_crop_uses_default() {
        let eco = economics_or_default("kidneybeans");
        assert_eq!(eco.cost, 35_000);
        assert_eq!(eco.returns, 75_000);
        assert!(lookup_economics("kidneybeans").is_none());
    }

    #[test]
    fn test_all_entries_profitable() {
        for (name, eco) in CROP_ECONOMICS {
            assert!(eco.returns > eco.cost, "{} should be profitable", name);
        }
    }
}
