use std::fmt;
use std::str::FromStr;

use crate::colors::Tone;
use crate::province::{ProvinceRecord, Tier, TierDefinition, tier_definition};

/// Which metric drives marker coloring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColorMode {
    #[default]
    Tier,
    Diabetes,
    Obesity,
    Infrastructure,
}

impl ColorMode {
    pub const ALL: [ColorMode; 4] = [
        ColorMode::Tier,
        ColorMode::Diabetes,
        ColorMode::Obesity,
        ColorMode::Infrastructure,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Self::Tier => "tier",
            Self::Diabetes => "diabetes",
            Self::Obesity => "obesity",
            Self::Infrastructure => "infrastructure",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Tier => "Priority Tier",
            Self::Diabetes => "Diabetes Prevalence",
            Self::Obesity => "Obesity Prevalence",
            Self::Infrastructure => "Hospital Beds",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseColorModeError(String);

impl fmt::Display for ParseColorModeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown color mode: {:?}", self.0)
    }
}

impl std::error::Error for ParseColorModeError {}

impl FromStr for ColorMode {
    type Err = ParseColorModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        ColorMode::ALL
            .into_iter()
            .find(|mode| mode.key().eq_ignore_ascii_case(key))
            .ok_or_else(|| ParseColorModeError(s.to_string()))
    }
}

pub const DIABETES_HIGH_PCT: f64 = 8.5;
pub const DIABETES_MODERATE_PCT: f64 = 7.5;
pub const OBESITY_HIGH_PCT: f64 = 29.0;
pub const OBESITY_MODERATE_PCT: f64 = 28.0;
pub const BEDS_LOW_PER_10K: f64 = 23.0;
pub const BEDS_MODERATE_PER_10K: f64 = 27.0;

pub fn diabetes_tone(pct: f64) -> Tone {
    if pct > DIABETES_HIGH_PCT {
        Tone::Danger
    } else if pct > DIABETES_MODERATE_PCT {
        Tone::Warning
    } else {
        Tone::Success
    }
}

pub fn obesity_tone(pct: f64) -> Tone {
    if pct > OBESITY_HIGH_PCT {
        Tone::Danger
    } else if pct > OBESITY_MODERATE_PCT {
        Tone::Warning
    } else {
        Tone::Success
    }
}

/// Fewer beds is worse, so the comparison runs the other way.
pub fn infrastructure_tone(beds_per_10k: f64) -> Tone {
    if beds_per_10k < BEDS_LOW_PER_10K {
        Tone::Danger
    } else if beds_per_10k < BEDS_MODERATE_PER_10K {
        Tone::Warning
    } else {
        Tone::Success
    }
}

/// Resolved marker fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerColor {
    Tone(Tone),
    Tier { tier: Tier, color: &'static str },
}

impl MarkerColor {
    pub fn css(self) -> &'static str {
        match self {
            Self::Tone(tone) => tone.hex(),
            Self::Tier { color, .. } => color,
        }
    }
}

pub fn marker_color(
    province: &ProvinceRecord,
    mode: ColorMode,
    tiers: &[TierDefinition],
) -> MarkerColor {
    let metrics = &province.metrics;
    match mode {
        ColorMode::Tier => match tier_definition(tiers, province.tier) {
            Some(def) => MarkerColor::Tier {
                tier: def.tier,
                color: def.color,
            },
            None => MarkerColor::Tone(Tone::Neutral),
        },
        ColorMode::Diabetes => MarkerColor::Tone(diabetes_tone(metrics.diabetes_pct)),
        ColorMode::Obesity => MarkerColor::Tone(obesity_tone(metrics.obesity_pct)),
        ColorMode::Infrastructure => MarkerColor::Tone(infrastructure_tone(metrics.beds_per_10k)),
    }
}

/// Like [`marker_color`] for an untyped mode key; unknown keys get the neutral color.
pub fn marker_color_for_key(
    province: &ProvinceRecord,
    key: &str,
    tiers: &[TierDefinition],
) -> MarkerColor {
    match key.parse::<ColorMode>() {
        Ok(mode) => marker_color(province, mode, tiers),
        Err(_) => MarkerColor::Tone(Tone::Neutral),
    }
}

/// Geographic footprint of a province marker in meters.
pub fn marker_radius_m(population: u64) -> f64 {
    (population as f64 / 100_000.0).sqrt() * 15_000.0
}

/// `(population, radius px)` stops for the on-screen dot.
pub const POPULATION_RADIUS_STOPS: [(f64, f64); 5] = [
    (250_000.0, 7.0),
    (1_000_000.0, 10.0),
    (2_500_000.0, 14.0),
    (5_000_000.0, 19.0),
    (9_000_000.0, 26.0),
];

/// Linear interpolation across [`POPULATION_RADIUS_STOPS`], clamped to the end stops.
pub fn circle_radius_px(population: u64) -> f64 {
    interpolate_stops(&POPULATION_RADIUS_STOPS, population as f64)
}

fn interpolate_stops(stops: &[(f64, f64)], x: f64) -> f64 {
    let (Some(&(first_x, first_y)), Some(&(last_x, last_y))) = (stops.first(), stops.last())
    else {
        return 0.0;
    };
    if x <= first_x {
        return first_y;
    }
    if x >= last_x {
        return last_y;
    }
    for pair in stops.windows(2) {
        let (x0, y0) = pair[0];
        let (x1, y1) = pair[1];
        if x <= x1 {
            let t = (x - x0) / (x1 - x0);
            return y0 + (y1 - y0) * t;
        }
    }
    last_y
}

const EARTH_CIRCUMFERENCE_M: f64 = 40_075_016.686;
const TILE_SIZE_PX: f64 = 512.0;

/// Convert a ground distance to screen pixels at `latitude` and Web Mercator `zoom`.
pub fn meters_to_pixels(meters: f64, latitude: f64, zoom: f64) -> f64 {
    let meters_per_px =
        EARTH_CIRCUMFERENCE_M * latitude.to_radians().cos() / (TILE_SIZE_PX * zoom.exp2());
    if meters_per_px <= 0.0 {
        return 0.0;
    }
    meters / meters_per_px
}

pub const EMPHASIS_SCALE: f64 = 1.3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerStyle {
    pub color: MarkerColor,
    pub radius_px: f64,
    pub glow: bool,
}

pub fn marker_style(
    province: &ProvinceRecord,
    mode: ColorMode,
    tiers: &[TierDefinition],
    hovered: bool,
    selected: bool,
) -> MarkerStyle {
    let emphasized = hovered || selected;
    let base = circle_radius_px(province.population);
    MarkerStyle {
        color: marker_color(province, mode, tiers),
        radius_px: if emphasized { base * EMPHASIS_SCALE } else { base },
        glow: emphasized,
    }
}
