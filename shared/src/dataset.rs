use crate::kpi::{KpiRecord, KpiStatus};
use crate::province::{
    HealthMetrics, LngLat, ProvinceId, ProvinceRecord, Tier, TierDefinition, tier_definition,
};

/// Read-only handle over the dashboard tables. Cheap to copy; views receive it
/// explicitly instead of reaching for the statics.
#[derive(Debug, Clone, Copy)]
pub struct Dataset {
    provinces: &'static [ProvinceRecord],
    kpis: &'static [KpiRecord],
    tiers: &'static [TierDefinition],
}

impl Dataset {
    pub const fn new(
        provinces: &'static [ProvinceRecord],
        kpis: &'static [KpiRecord],
        tiers: &'static [TierDefinition],
    ) -> Self {
        Self {
            provinces,
            kpis,
            tiers,
        }
    }

    pub fn builtin() -> Self {
        Self::new(&PROVINCES, &VISION_2030_KPIS, &TIER_DEFINITIONS)
    }

    pub fn provinces(&self) -> &'static [ProvinceRecord] {
        self.provinces
    }

    pub fn kpis(&self) -> &'static [KpiRecord] {
        self.kpis
    }

    pub fn tiers(&self) -> &'static [TierDefinition] {
        self.tiers
    }

    pub fn province(&self, id: ProvinceId) -> Option<&'static ProvinceRecord> {
        self.provinces.iter().find(|p| p.id == id)
    }

    /// Lookup by raw key, e.g. a province id saved in browser storage.
    pub fn province_by_key(&self, key: &str) -> Option<&'static ProvinceRecord> {
        self.provinces.iter().find(|p| p.id.as_str() == key)
    }

    pub fn tier_definition(&self, tier: Tier) -> Option<&'static TierDefinition> {
        tier_definition(self.tiers, tier)
    }
}

pub static TIER_DEFINITIONS: [TierDefinition; 3] = [
    TierDefinition {
        tier: Tier::Tier1,
        label: "Tier 1 - Critical Priority",
        description: "Largest gaps in capacity or outcomes; first call on new investment.",
        color: "#dc2626",
    },
    TierDefinition {
        tier: Tier::Tier2,
        label: "Tier 2 - High Priority",
        description: "Large populations with rising chronic-disease burden.",
        color: "#f97316",
    },
    TierDefinition {
        tier: Tier::Tier3,
        label: "Tier 3 - Standard Priority",
        description: "Capacity broadly in line with national targets.",
        color: "#0ea5e9",
    },
];

#[allow(clippy::too_many_arguments)]
const fn province(
    key: &'static str,
    name_en: &'static str,
    name_ar: &'static str,
    capital: &'static str,
    population: u64,
    (lng, lat): (f64, f64),
    tier: Tier,
    (diabetes_pct, obesity_pct, beds_per_10k): (f64, f64, f64),
) -> ProvinceRecord {
    ProvinceRecord {
        id: ProvinceId::new(key),
        name_en,
        name_ar,
        capital,
        population,
        center: LngLat::new(lng, lat),
        tier,
        metrics: HealthMetrics {
            diabetes_pct,
            obesity_pct,
            beds_per_10k,
        },
    }
}

pub static PROVINCES: [ProvinceRecord; 13] = [
    province("riyadh", "Riyadh", "الرياض", "Riyadh", 8_591_748, (46.6753, 24.7136), Tier::Tier2, (8.2, 28.7, 26.4)),
    province("makkah", "Makkah", "مكة المكرمة", "Mecca", 8_021_463, (39.8262, 21.3891), Tier::Tier1, (8.9, 29.4, 21.8)),
    province("eastern", "Eastern Province", "المنطقة الشرقية", "Dammam", 5_125_254, (50.1033, 26.4207), Tier::Tier2, (8.7, 29.1, 27.9)),
    province("madinah", "Madinah", "المدينة المنورة", "Medina", 2_137_983, (39.5692, 24.5247), Tier::Tier2, (7.9, 28.4, 24.6)),
    province("asir", "Asir", "عسير", "Abha", 2_024_285, (42.5053, 18.2164), Tier::Tier2, (7.2, 27.3, 23.5)),
    province("jazan", "Jazan", "جازان", "Jazan", 1_404_997, (42.5511, 16.8892), Tier::Tier1, (7.6, 26.8, 19.7)),
    province("qassim", "Qassim", "القصيم", "Buraydah", 1_336_179, (43.9750, 26.3260), Tier::Tier3, (8.1, 28.9, 28.3)),
    province("tabuk", "Tabuk", "تبوك", "Tabuk", 886_036, (36.5662, 28.3835), Tier::Tier3, (6.9, 27.6, 25.2)),
    province("hail", "Hail", "حائل", "Hail", 746_406, (41.6907, 27.5114), Tier::Tier3, (7.4, 28.2, 29.1)),
    province("al-jawf", "Al Jawf", "الجوف", "Sakaka", 595_822, (40.2064, 29.9697), Tier::Tier3, (7.1, 27.9, 30.4)),
    province("najran", "Najran", "نجران", "Najran", 592_300, (44.1277, 17.4917), Tier::Tier1, (6.8, 26.5, 20.9)),
    province("northern-borders", "Northern Borders", "الحدود الشمالية", "Arar", 373_577, (41.0381, 30.9753), Tier::Tier1, (7.3, 28.1, 22.4)),
    province("al-bahah", "Al Bahah", "الباحة", "Al Bahah", 339_174, (41.4677, 20.0129), Tier::Tier3, (6.6, 26.2, 31.6)),
];

const fn kpi(
    id: &'static str,
    name: &'static str,
    category: &'static str,
    (baseline, current, target): (f64, f64, f64),
    unit: &'static str,
    status: KpiStatus,
) -> KpiRecord {
    KpiRecord {
        id,
        name,
        category,
        baseline,
        current,
        target,
        unit,
        status,
    }
}

pub static VISION_2030_KPIS: [KpiRecord; 9] = [
    kpi("life-expectancy", "Life Expectancy", "Quality of Life", (74.0, 78.1, 80.0), "years", KpiStatus::OnTrack),
    kpi("primary-care-coverage", "Population Covered by Primary Care", "Access", (78.0, 91.0, 100.0), "%", KpiStatus::OnTrack),
    kpi("digital-health", "Digital Health Maturity", "Access", (42.0, 71.0, 85.0), "index", KpiStatus::OnTrack),
    kpi("road-deaths", "Road Traffic Deaths", "Prevention", (28.8, 13.5, 8.0), "per 100k", KpiStatus::OnTrack),
    kpi("adult-obesity", "Adult Obesity Rate", "Chronic Disease", (35.0, 32.5, 25.0), "%", KpiStatus::AtRisk),
    kpi("diabetes-prevalence", "Diabetes Prevalence", "Chronic Disease", (18.3, 16.4, 13.0), "%", KpiStatus::AtRisk),
    kpi("hospital-beds", "Hospital Beds", "Capacity", (22.0, 23.7, 30.0), "per 10k", KpiStatus::AtRisk),
    kpi("physical-activity", "Adults Meeting Activity Guidelines", "Prevention", (13.0, 20.0, 40.0), "%", KpiStatus::OffTrack),
    kpi("smoking-prevalence", "Tobacco Use", "Prevention", (12.7, 11.4, 5.0), "%", KpiStatus::OffTrack),
];

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::kpi::progress_percent;

    #[test]
    fn province_ids_are_unique_and_resolvable() {
        let dataset = Dataset::builtin();
        let ids: HashSet<_> = dataset.provinces().iter().map(|p| p.id).collect();
        assert_eq!(ids.len(), dataset.provinces().len());
        for province in dataset.provinces() {
            assert_eq!(dataset.province(province.id), Some(province));
            assert_eq!(dataset.province_by_key(province.id.as_str()), Some(province));
        }
    }

    #[test]
    fn unknown_province_lookup_is_none() {
        let dataset = Dataset::builtin();
        assert!(dataset.province(ProvinceId::new("atlantis")).is_none());
        assert!(dataset.province_by_key("").is_none());
    }

    #[test]
    fn every_tier_has_a_definition() {
        let dataset = Dataset::builtin();
        for province in dataset.provinces() {
            assert!(dataset.tier_definition(province.tier).is_some());
        }
    }

    #[test]
    fn province_centers_lie_inside_the_kingdom() {
        for province in Dataset::builtin().provinces() {
            assert!((34.0..=56.0).contains(&province.center.lng), "{}", province.id);
            assert!((16.0..=33.0).contains(&province.center.lat), "{}", province.id);
        }
    }

    #[test]
    fn builtin_kpis_have_defined_progress() {
        for kpi in Dataset::builtin().kpis() {
            assert!(progress_percent(kpi).is_some(), "{}", kpi.id);
        }
    }
}
