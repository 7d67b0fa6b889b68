use crate::classify::{ColorMode, MarkerColor, marker_color};
use crate::colors::Tone;
use crate::province::{HealthMetrics, ProvinceRecord, Tier};

/// National roll-up shown above the map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NationalSummary {
    pub province_count: usize,
    pub total_population: u64,
    /// Population-weighted means.
    pub weighted: HealthMetrics,
    pub tier_counts: [usize; 3],
}

impl NationalSummary {
    pub fn compute(provinces: &[ProvinceRecord]) -> Self {
        let total_population: u64 = provinces.iter().map(|p| p.population).sum();
        let mut tier_counts = [0usize; 3];
        let mut sums = (0.0, 0.0, 0.0);
        for province in provinces {
            tier_counts[tier_index(province.tier)] += 1;
            let w = province.population as f64;
            sums.0 += province.metrics.diabetes_pct * w;
            sums.1 += province.metrics.obesity_pct * w;
            sums.2 += province.metrics.beds_per_10k * w;
        }
        let weighted = if total_population == 0 {
            HealthMetrics {
                diabetes_pct: 0.0,
                obesity_pct: 0.0,
                beds_per_10k: 0.0,
            }
        } else {
            let total = total_population as f64;
            HealthMetrics {
                diabetes_pct: sums.0 / total,
                obesity_pct: sums.1 / total,
                beds_per_10k: sums.2 / total,
            }
        };
        Self {
            province_count: provinces.len(),
            total_population,
            weighted,
            tier_counts,
        }
    }

    pub fn tier_count(&self, tier: Tier) -> usize {
        self.tier_counts[tier_index(tier)]
    }
}

fn tier_index(tier: Tier) -> usize {
    usize::from(tier.rank() - 1)
}

/// Province counts per risk tone for a color mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RiskBreakdown {
    pub high: usize,
    pub moderate: usize,
    pub low: usize,
}

impl RiskBreakdown {
    /// Tier mode has no risk scale and yields an empty breakdown.
    pub fn for_mode(provinces: &[ProvinceRecord], mode: ColorMode) -> Self {
        let mut breakdown = Self::default();
        for province in provinces {
            match marker_color(province, mode, &[]) {
                MarkerColor::Tone(Tone::Danger) => breakdown.high += 1,
                MarkerColor::Tone(Tone::Warning) => breakdown.moderate += 1,
                MarkerColor::Tone(Tone::Success) => breakdown.low += 1,
                _ => {}
            }
        }
        breakdown
    }

    pub fn total(&self) -> usize {
        self.high + self.moderate + self.low
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;
    use crate::province::{LngLat, ProvinceId};

    fn province(population: u64, tier: Tier, diabetes_pct: f64) -> ProvinceRecord {
        ProvinceRecord {
            id: ProvinceId::new("p"),
            name_en: "P",
            name_ar: "",
            capital: "",
            population,
            center: LngLat::new(45.0, 24.0),
            tier,
            metrics: HealthMetrics {
                diabetes_pct,
                obesity_pct: 27.0,
                beds_per_10k: 25.0,
            },
        }
    }

    #[test]
    fn weighted_means_follow_population() {
        let provinces = [province(3_000_000, Tier::Tier1, 9.0), province(1_000_000, Tier::Tier3, 5.0)];
        let summary = NationalSummary::compute(&provinces);
        assert_eq!(summary.total_population, 4_000_000);
        assert!((summary.weighted.diabetes_pct - 8.0).abs() < 1e-9);
        assert_eq!(summary.tier_count(Tier::Tier1), 1);
        assert_eq!(summary.tier_count(Tier::Tier2), 0);
    }

    #[test]
    fn empty_input_is_all_zero() {
        let summary = NationalSummary::compute(&[]);
        assert_eq!(summary.province_count, 0);
        assert_eq!(summary.weighted.beds_per_10k, 0.0);
    }

    #[test]
    fn builtin_tier_counts_cover_every_province() {
        let dataset = Dataset::builtin();
        let summary = NationalSummary::compute(dataset.provinces());
        let counted: usize = Tier::ALL.iter().map(|t| summary.tier_count(*t)).sum();
        assert_eq!(counted, dataset.provinces().len());
    }

    #[test]
    fn risk_breakdown_partitions_provinces() {
        let provinces = Dataset::builtin().provinces();
        for mode in [ColorMode::Diabetes, ColorMode::Obesity, ColorMode::Infrastructure] {
            assert_eq!(RiskBreakdown::for_mode(provinces, mode).total(), provinces.len());
        }
        assert_eq!(RiskBreakdown::for_mode(provinces, ColorMode::Tier).total(), 0);
    }

    #[test]
    fn risk_breakdown_counts_diabetes_bands() {
        let provinces = [
            province(1, Tier::Tier1, 9.0),
            province(1, Tier::Tier1, 8.0),
            province(1, Tier::Tier1, 8.2),
            province(1, Tier::Tier1, 5.0),
        ];
        let breakdown = RiskBreakdown::for_mode(&provinces, ColorMode::Diabetes);
        assert_eq!(
            breakdown,
            RiskBreakdown {
                high: 1,
                moderate: 2,
                low: 1
            }
        );
    }
}
