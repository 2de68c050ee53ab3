use crate::error::McError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A known caffeinated drink with a fixed mg-per-serving constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaffeineSource {
    #[default]
    Coffee,
    Espresso,
    Latte,
    ColdBrew,
    EnergyDrink,
    GreenTea,
}

impl CaffeineSource {
    pub fn all() -> &'static [CaffeineSource] {
        &[
            CaffeineSource::Coffee,
            CaffeineSource::Espresso,
            CaffeineSource::Latte,
            CaffeineSource::ColdBrew,
            CaffeineSource::EnergyDrink,
            CaffeineSource::GreenTea,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CaffeineSource::Coffee => "coffee",
            CaffeineSource::Espresso => "espresso",
            CaffeineSource::Latte => "latte",
            CaffeineSource::ColdBrew => "cold_brew",
            CaffeineSource::EnergyDrink => "energy_drink",
            CaffeineSource::GreenTea => "green_tea",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CaffeineSource::Coffee => "coffee",
            CaffeineSource::Espresso => "espresso",
            CaffeineSource::Latte => "latte",
            CaffeineSource::ColdBrew => "cold brew",
            CaffeineSource::EnergyDrink => "energy drink",
            CaffeineSource::GreenTea => "green tea",
        }
    }

    /// mg of caffeine in one serving.
    pub fn default_mg(self) -> f64 {
        match self {
            CaffeineSource::Coffee => 95.0,
            CaffeineSource::Espresso => 63.0,
            CaffeineSource::Latte => 77.0,
            CaffeineSource::ColdBrew => 200.0,
            CaffeineSource::EnergyDrink => 160.0,
            CaffeineSource::GreenTea => 28.0,
        }
    }

    /// Serving size after applying any configured override for this key.
    pub fn mg_with(self, overrides: &BTreeMap<String, f64>) -> f64 {
        overrides
            .get(self.as_str())
            .copied()
            .filter(|mg| mg.is_finite() && *mg > 0.0)
            .unwrap_or_else(|| self.default_mg())
    }

    /// Case-insensitive lookup; accepts `cold_brew`, `cold-brew` and `cold brew`.
    pub fn from_key(key: &str) -> Option<CaffeineSource> {
        let normalized = key.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        Self::all()
            .iter()
            .copied()
            .find(|s| s.as_str() == normalized)
    }
}

impl fmt::Display for CaffeineSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CaffeineSource {
    type Err = McError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_key(s).ok_or_else(|| McError::InvalidInput(format!("unknown source '{s}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_accepts_spelling_variants() {
        assert_eq!(CaffeineSource::from_key("cold_brew"), Some(CaffeineSource::ColdBrew));
        assert_eq!(CaffeineSource::from_key("Cold-Brew"), Some(CaffeineSource::ColdBrew));
        assert_eq!(CaffeineSource::from_key(" green tea "), Some(CaffeineSource::GreenTea));
        assert_eq!(CaffeineSource::from_key("mate"), None);
    }

    #[test]
    fn keys_round_trip_through_as_str() {
        for s in CaffeineSource::all() {
            assert_eq!(CaffeineSource::from_key(s.as_str()), Some(*s));
        }
    }

    #[test]
    fn serde_uses_snake_case_keys() {
        let json = serde_json::to_string(&CaffeineSource::EnergyDrink).unwrap();
        assert_eq!(json, "\"energy_drink\"");
    }

    #[test]
    fn override_replaces_default_mg() {
        let mut overrides = BTreeMap::new();
        overrides.insert("coffee".to_string(), 120.0);
        overrides.insert("latte".to_string(), -5.0);
        assert_eq!(CaffeineSource::Coffee.mg_with(&overrides), 120.0);
        assert_eq!(CaffeineSource::Latte.mg_with(&overrides), 77.0);
        assert_eq!(CaffeineSource::Espresso.mg_with(&overrides), 63.0);
    }
}
