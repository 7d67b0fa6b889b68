pub type Rgb = (u8, u8, u8);

/// Display tone shared by KPI status badges and map risk classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tone {
    Success,
    Warning,
    Danger,
    /// Fallback for unrecognized inputs.
    Neutral,
}

impl Tone {
    pub const RISK_LEVELS: [Tone; 3] = [Tone::Danger, Tone::Warning, Tone::Success];

    pub fn hex(self) -> &'static str {
        match self {
            Self::Success => "#10b981",
            Self::Warning => "#f59e0b",
            Self::Danger => "#ef4444",
            Self::Neutral => "#3b82f6",
        }
    }

    pub fn rgb(self) -> Rgb {
        match self {
            Self::Success => (16, 185, 129),
            Self::Warning => (245, 158, 11),
            Self::Danger => (239, 68, 68),
            Self::Neutral => (59, 130, 246),
        }
    }

    /// Risk wording used by the map legend.
    pub fn risk_label(self) -> &'static str {
        match self {
            Self::Danger => "High Risk",
            Self::Warning => "Moderate Risk",
            Self::Success => "Low Risk",
            Self::Neutral => "No Data",
        }
    }
}

/// Parse `#rrggbb` (leading `#` optional).
pub fn parse_hex_color(hex: &str) -> Option<Rgb> {
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}

/// Format RGBA as a CSS color string.
pub fn rgba_css((r, g, b): Rgb, a: f64) -> String {
    format!("rgba({r},{g},{b},{a})")
}

/// CSS `rgba()` for a hex color, falling back to the neutral tone when the hex is malformed.
pub fn hex_with_alpha(hex: &str, a: f64) -> String {
    rgba_css(parse_hex_color(hex).unwrap_or(Tone::Neutral.rgb()), a)
}

/// Mix a color toward white. `amount` is clamped to `0.0..=1.0`.
pub fn lighten((r, g, b): Rgb, amount: f64) -> Rgb {
    let t = amount.clamp(0.0, 1.0);
    let mix = |c: u8| (c as f64 + (255.0 - c as f64) * t).round() as u8;
    (mix(r), mix(g), mix(b))
}

#[cfg(test)]
mod tests {
    use super::{Tone, hex_with_alpha, lighten, parse_hex_color, rgba_css};

    #[test]
    fn tone_hex_and_rgb_agree() {
        for tone in [Tone::Success, Tone::Warning, Tone::Danger, Tone::Neutral] {
            assert_eq!(parse_hex_color(tone.hex()), Some(tone.rgb()));
        }
    }

    #[test]
    fn parse_hex_color_rejects_malformed_input() {
        assert_eq!(parse_hex_color("#10b981"), Some((16, 185, 129)));
        assert_eq!(parse_hex_color("10b981"), Some((16, 185, 129)));
        assert_eq!(parse_hex_color("#10b98"), None);
        assert_eq!(parse_hex_color("#zzzzzz"), None);
        assert_eq!(parse_hex_color("#ééé"), None);
    }

    #[test]
    fn malformed_hex_falls_back_to_neutral() {
        assert_eq!(hex_with_alpha("nope", 0.5), "rgba(59,130,246,0.5)");
        assert_eq!(rgba_css((1, 2, 3), 1.0), "rgba(1,2,3,1)");
    }

    #[test]
    fn lighten_moves_toward_white() {
        assert_eq!(lighten((0, 0, 0), 0.0), (0, 0, 0));
        assert_eq!(lighten((0, 0, 0), 1.0), (255, 255, 255));
        assert_eq!(lighten((100, 100, 100), 0.5), (178, 178, 178));
        assert_eq!(lighten((10, 20, 30), 4.0), (255, 255, 255));
    }
}
