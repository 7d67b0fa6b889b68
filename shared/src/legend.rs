use crate::classify::{
    BEDS_LOW_PER_10K, BEDS_MODERATE_PER_10K, ColorMode, DIABETES_HIGH_PCT, DIABETES_MODERATE_PCT,
    OBESITY_HIGH_PCT, OBESITY_MODERATE_PCT,
};
use crate::colors::Tone;
use crate::province::TierDefinition;

#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub label: &'static str,
    pub color: &'static str,
    /// Threshold range covered by the entry, empty for tiers.
    pub caption: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Legend {
    pub title: &'static str,
    pub entries: Vec<LegendEntry>,
}

pub fn legend_for(mode: ColorMode, tiers: &[TierDefinition]) -> Legend {
    let entries = match mode {
        ColorMode::Tier => tiers
            .iter()
            .map(|def| LegendEntry {
                label: def.label,
                color: def.color,
                caption: String::new(),
            })
            .collect(),
        _ => Tone::RISK_LEVELS
            .into_iter()
            .map(|tone| LegendEntry {
                label: tone.risk_label(),
                color: tone.hex(),
                caption: risk_caption(mode, tone),
            })
            .collect(),
    };
    Legend {
        title: mode.label(),
        entries,
    }
}

fn risk_caption(mode: ColorMode, tone: Tone) -> String {
    let (high, moderate, unit, higher_is_worse) = match mode {
        ColorMode::Diabetes => (DIABETES_HIGH_PCT, DIABETES_MODERATE_PCT, "%", true),
        ColorMode::Obesity => (OBESITY_HIGH_PCT, OBESITY_MODERATE_PCT, "%", true),
        ColorMode::Infrastructure => (BEDS_LOW_PER_10K, BEDS_MODERATE_PER_10K, " beds/10k", false),
        ColorMode::Tier => return String::new(),
    };
    match (tone, higher_is_worse) {
        (Tone::Danger, true) => format!("> {high}{unit}"),
        (Tone::Warning, true) => format!("{moderate}-{high}{unit}"),
        (Tone::Success, true) => format!("<= {moderate}{unit}"),
        (Tone::Danger, false) => format!("< {high}{unit}"),
        (Tone::Warning, false) => format!("{high}-{moderate}{unit}"),
        (Tone::Success, false) => format!(">= {moderate}{unit}"),
        (Tone::Neutral, _) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;

    #[test]
    fn tier_mode_lists_tier_table() {
        let tiers = Dataset::builtin().tiers();
        let legend = legend_for(ColorMode::Tier, tiers);
        assert_eq!(legend.entries.len(), tiers.len());
        for (entry, def) in legend.entries.iter().zip(tiers) {
            assert_eq!(entry.label, def.label);
            assert_eq!(entry.color, def.color);
        }
    }

    #[test]
    fn risk_modes_use_fixed_three_entries() {
        for mode in [ColorMode::Diabetes, ColorMode::Obesity, ColorMode::Infrastructure] {
            let legend = legend_for(mode, &[]);
            let colors: Vec<&str> = legend.entries.iter().map(|e| e.color).collect();
            assert_eq!(
                colors,
                vec![Tone::Danger.hex(), Tone::Warning.hex(), Tone::Success.hex()]
            );
            assert_eq!(legend.title, mode.label());
        }
    }

    #[test]
    fn captions_describe_thresholds() {
        let diabetes = legend_for(ColorMode::Diabetes, &[]);
        assert_eq!(diabetes.entries[0].caption, "> 8.5%");
        assert_eq!(diabetes.entries[1].caption, "7.5-8.5%");
        assert_eq!(diabetes.entries[2].caption, "<= 7.5%");

        let beds = legend_for(ColorMode::Infrastructure, &[]);
        assert_eq!(beds.entries[0].caption, "< 23 beds/10k");
        assert_eq!(beds.entries[2].caption, ">= 27 beds/10k");
    }
}
