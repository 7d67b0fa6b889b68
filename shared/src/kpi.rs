use std::fmt;
use std::str::FromStr;

use crate::colors::Tone;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KpiStatus {
    OnTrack,
    AtRisk,
    OffTrack,
}

impl KpiStatus {
    pub const ALL: [KpiStatus; 3] = [KpiStatus::OnTrack, KpiStatus::AtRisk, KpiStatus::OffTrack];

    pub fn key(self) -> &'static str {
        match self {
            Self::OnTrack => "on-track",
            Self::AtRisk => "at-risk",
            Self::OffTrack => "off-track",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::OnTrack => "On Track",
            Self::AtRisk => "At Risk",
            Self::OffTrack => "Off Track",
        }
    }

    pub fn tone(self) -> Tone {
        match self {
            Self::OnTrack => Tone::Success,
            Self::AtRisk => Tone::Warning,
            Self::OffTrack => Tone::Danger,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseKpiStatusError(String);

impl fmt::Display for ParseKpiStatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown KPI status: {:?}", self.0)
    }
}

impl std::error::Error for ParseKpiStatusError {}

impl FromStr for KpiStatus {
    type Err = ParseKpiStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .map(|c| match c {
                '_' | ' ' => '-',
                c => c.to_ascii_lowercase(),
            })
            .collect();
        match normalized.as_str() {
            "on-track" => Ok(Self::OnTrack),
            "at-risk" => Ok(Self::AtRisk),
            "off-track" => Ok(Self::OffTrack),
            _ => Err(ParseKpiStatusError(s.to_string())),
        }
    }
}

/// Tone for a raw status label. Unknown labels render neutral instead of failing.
pub fn status_tone_for_label(label: &str) -> Tone {
    label
        .parse::<KpiStatus>()
        .map(KpiStatus::tone)
        .unwrap_or(Tone::Neutral)
}

#[derive(Debug, Clone, PartialEq)]
pub struct KpiRecord {
    pub id: &'static str,
    pub name: &'static str,
    pub category: &'static str,
    pub baseline: f64,
    pub current: f64,
    pub target: f64,
    /// `"%"`, `"index"`, or a free-form unit such as `"years"`.
    pub unit: &'static str,
    pub status: KpiStatus,
}

/// Progress from baseline toward target, clamped to `0..=100`.
///
/// Returns `None` when `target == baseline` (or any operand is non-finite),
/// since the ratio is undefined there.
pub fn progress_percent(kpi: &KpiRecord) -> Option<f64> {
    let range = kpi.target - kpi.baseline;
    if range == 0.0 || !range.is_finite() {
        return None;
    }
    let percent = (kpi.current - kpi.baseline) / range * 100.0;
    if !percent.is_finite() {
        return None;
    }
    Some(percent.clamp(0.0, 100.0))
}

/// Progress used for bars and labels; undefined progress shows as 0.
pub fn display_percent(kpi: &KpiRecord) -> f64 {
    progress_percent(kpi).unwrap_or(0.0)
}

/// Signed distance still to cover (negative for "reduce to" targets).
pub fn remaining_to_target(kpi: &KpiRecord) -> f64 {
    kpi.target - kpi.current
}

pub fn unit_suffix(unit: &str) -> String {
    if unit == "index" {
        String::new()
    } else if unit.contains('%') {
        "%".to_string()
    } else {
        format!(" {unit}")
    }
}

pub fn format_kpi_value(value: f64, unit: &str) -> String {
    format!("{value}{}", unit_suffix(unit))
}

/// Mean display percent over records with defined progress.
pub fn average_progress(kpis: &[KpiRecord]) -> Option<f64> {
    let defined: Vec<f64> = kpis.iter().filter_map(progress_percent).collect();
    if defined.is_empty() {
        return None;
    }
    Some(defined.iter().sum::<f64>() / defined.len() as f64)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub on_track: usize,
    pub at_risk: usize,
    pub off_track: usize,
}

impl StatusCounts {
    pub fn tally<'a>(kpis: impl IntoIterator<Item = &'a KpiRecord>) -> Self {
        let mut counts = Self::default();
        for kpi in kpis {
            match kpi.status {
                KpiStatus::OnTrack => counts.on_track += 1,
                KpiStatus::AtRisk => counts.at_risk += 1,
                KpiStatus::OffTrack => counts.off_track += 1,
            }
        }
        counts
    }

    pub fn get(&self, status: KpiStatus) -> usize {
        match status {
            KpiStatus::OnTrack => self.on_track,
            KpiStatus::AtRisk => self.at_risk,
            KpiStatus::OffTrack => self.off_track,
        }
    }

    pub fn total(&self) -> usize {
        self.on_track + self.at_risk + self.off_track
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;

    fn kpi(baseline: f64, current: f64, target: f64) -> KpiRecord {
        KpiRecord {
            id: "test",
            name: "Test",
            category: "Test",
            baseline,
            current,
            target,
            unit: "%",
            status: KpiStatus::OnTrack,
        }
    }

    #[test]
    fn midpoint_progress_is_fifty_percent() {
        assert_eq!(progress_percent(&kpi(10.0, 15.0, 20.0)), Some(50.0));
    }

    #[test]
    fn baseline_is_zero_and_target_is_hundred() {
        assert_eq!(progress_percent(&kpi(10.0, 10.0, 20.0)), Some(0.0));
        assert_eq!(progress_percent(&kpi(10.0, 20.0, 20.0)), Some(100.0));
        // decreasing targets ("reduce obesity to ...")
        assert_eq!(progress_percent(&kpi(35.0, 35.0, 25.0)), Some(0.0));
        assert_eq!(progress_percent(&kpi(35.0, 25.0, 25.0)), Some(100.0));
        assert_eq!(progress_percent(&kpi(35.0, 30.0, 25.0)), Some(50.0));
    }

    #[test]
    fn progress_is_clamped_to_percent_range() {
        let samples = [
            (10.0, -50.0, 20.0),
            (10.0, 500.0, 20.0),
            (20.0, 30.0, 10.0),
            (20.0, 0.0, 10.0),
            (0.0, 0.1, 1e-9),
            (-5.0, 3.0, 5.0),
        ];
        for (baseline, current, target) in samples {
            let percent = progress_percent(&kpi(baseline, current, target))
                .expect("non-degenerate range has progress");
            assert!(
                (0.0..=100.0).contains(&percent),
                "{baseline}/{current}/{target} gave {percent}"
            );
        }
    }

    #[test]
    fn zero_range_has_no_progress() {
        assert_eq!(progress_percent(&kpi(10.0, 12.0, 10.0)), None);
        assert_eq!(progress_percent(&kpi(10.0, 10.0, 10.0)), None);
        assert_eq!(display_percent(&kpi(10.0, 12.0, 10.0)), 0.0);
    }

    #[test]
    fn non_finite_operands_have_no_progress() {
        assert_eq!(progress_percent(&kpi(10.0, f64::NAN, 20.0)), None);
        assert_eq!(progress_percent(&kpi(f64::INFINITY, 1.0, 20.0)), None);
    }

    #[test]
    fn unit_suffix_rules() {
        assert_eq!(format_kpi_value(74.5, "years"), "74.5 years");
        assert_eq!(format_kpi_value(80.0, "%"), "80%");
        assert_eq!(format_kpi_value(12.5, "% of adults"), "12.5%");
        assert_eq!(format_kpi_value(62.0, "index"), "62");
    }

    #[test]
    fn status_parsing_is_lenient_about_separators() {
        assert_eq!("on-track".parse::<KpiStatus>(), Ok(KpiStatus::OnTrack));
        assert_eq!("AT_RISK".parse::<KpiStatus>(), Ok(KpiStatus::AtRisk));
        assert_eq!(" off track ".parse::<KpiStatus>(), Ok(KpiStatus::OffTrack));
        assert!("stalled".parse::<KpiStatus>().is_err());
    }

    #[test]
    fn unknown_status_label_is_neutral() {
        assert_eq!(status_tone_for_label("on-track"), Tone::Success);
        assert_eq!(status_tone_for_label("at-risk"), Tone::Warning);
        assert_eq!(status_tone_for_label("off-track"), Tone::Danger);
        assert_eq!(status_tone_for_label("paused"), Tone::Neutral);
    }

    #[test]
    fn status_counts_partition_builtin_kpis() {
        let kpis = Dataset::builtin().kpis();
        let counts = StatusCounts::tally(kpis);
        assert_eq!(counts.total(), kpis.len());
        for status in KpiStatus::ALL {
            let expected = kpis.iter().filter(|k| k.status == status).count();
            assert_eq!(counts.get(status), expected);
        }
    }

    #[test]
    fn average_progress_skips_undefined_records() {
        let kpis = [kpi(0.0, 5.0, 10.0), kpi(10.0, 12.0, 10.0), kpi(0.0, 10.0, 10.0)];
        assert_eq!(average_progress(&kpis), Some(75.0));
        assert_eq!(average_progress(&[]), None);
    }

    #[test]
    fn remaining_is_signed() {
        assert_eq!(remaining_to_target(&kpi(10.0, 15.0, 20.0)), 5.0);
        assert_eq!(remaining_to_target(&kpi(35.0, 30.0, 25.0)), -5.0);
    }
}
