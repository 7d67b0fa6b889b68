use std::fmt;

/// Stable key of a province in the dataset (e.g. `"riyadh"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProvinceId(&'static str);

impl ProvinceId {
    pub const fn new(key: &'static str) -> Self {
        Self(key)
    }

    pub fn as_str(self) -> &'static str {
        self.0
    }
}

impl fmt::Display for ProvinceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LngLat {
    pub lng: f64,
    pub lat: f64,
}

impl LngLat {
    pub const fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }

    /// `[lng, lat]`, the order the map widget expects.
    pub fn to_array(self) -> [f64; 2] {
        [self.lng, self.lat]
    }
}

/// Resource-allocation priority. `Tier1` is the highest priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tier {
    Tier1,
    Tier2,
    Tier3,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Tier1, Tier::Tier2, Tier::Tier3];

    pub fn rank(self) -> u8 {
        match self {
            Self::Tier1 => 1,
            Self::Tier2 => 2,
            Self::Tier3 => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HealthMetrics {
    /// Adult diabetes prevalence, percent.
    pub diabetes_pct: f64,
    /// Adult obesity prevalence, percent.
    pub obesity_pct: f64,
    /// Hospital beds per 10,000 population.
    pub beds_per_10k: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProvinceRecord {
    pub id: ProvinceId,
    pub name_en: &'static str,
    pub name_ar: &'static str,
    pub capital: &'static str,
    pub population: u64,
    pub center: LngLat,
    pub tier: Tier,
    pub metrics: HealthMetrics,
}

/// Display entry for a tier in the legend and detail panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierDefinition {
    pub tier: Tier,
    pub label: &'static str,
    pub description: &'static str,
    pub color: &'static str,
}

pub fn tier_definition(tiers: &[TierDefinition], tier: Tier) -> Option<&TierDefinition> {
    tiers.iter().find(|def| def.tier == tier)
}

/// Format a population for compact display (e.g. 8_591_748 -> "8.59M").
pub fn format_population(population: u64) -> String {
    let thousands = (population as f64 / 1_000.0).round();
    if thousands >= 1_000.0 {
        format!("{:.2}M", population as f64 / 1_000_000.0)
    } else if population >= 1_000 {
        format!("{thousands:.0}k")
    } else {
        format!("{population}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_lookup_returns_none_for_missing_entry() {
        let tiers = [TierDefinition {
            tier: Tier::Tier2,
            label: "Tier 2",
            description: "",
            color: "#f97316",
        }];
        assert_eq!(tier_definition(&tiers, Tier::Tier2).map(|d| d.label), Some("Tier 2"));
        assert!(tier_definition(&tiers, Tier::Tier1).is_none());
    }

    #[test]
    fn format_population_uses_compact_units() {
        assert_eq!(format_population(8_591_748), "8.59M");
        assert_eq!(format_population(339_174), "339k");
        assert_eq!(format_population(950), "950");
    }

    #[test]
    fn format_population_promotes_rounded_thousand_to_millions() {
        assert_eq!(format_population(999_499), "999k");
        assert_eq!(format_population(999_500), "1.00M");
        assert_eq!(format_population(999_999), "1.00M");
        assert_eq!(format_population(1_000), "1k");
    }

    #[test]
    fn tiers_are_ordered_by_priority() {
        assert!(Tier::Tier1 < Tier::Tier3);
        assert_eq!(Tier::ALL.map(Tier::rank), [1, 2, 3]);
    }
}
