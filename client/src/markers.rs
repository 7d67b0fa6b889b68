use sehha_shared::classify::{marker_radius_m, meters_to_pixels};
use sehha_shared::colors::{hex_with_alpha, lighten, parse_hex_color, rgba_css};
use sehha_shared::kpi::format_kpi_value;
use sehha_shared::province::format_population;
use sehha_shared::{MarkerStyle, ProvinceRecord, TierDefinition, tier_definition};

/// Halo cap so a zoomed-in Riyadh does not cover the viewport.
const MAX_HALO_DIAMETER_PX: f64 = 420.0;

/// Inline style for the clickable dot of a province marker.
pub(crate) fn dot_css(style: &MarkerStyle) -> String {
    let color = style.color.css();
    let diameter = style.radius_px * 2.0;
    let shadow = if style.glow {
        let glow = parse_hex_color(color)
            .map(|rgb| rgba_css(lighten(rgb, 0.35), 0.85))
            .unwrap_or_else(|| hex_with_alpha(color, 0.85));
        format!("0 0 0 3px #ffffff, 0 0 16px 4px {glow}")
    } else {
        "0 0 0 2px #ffffff, 0 1px 4px rgba(15,23,42,0.35)".to_string()
    };
    format!(
        "position: absolute; left: 50%; top: 50%; width: {diameter:.1}px; height: {diameter:.1}px; \
         transform: translate(-50%, -50%); border-radius: 50%; background: {color}; \
         box-shadow: {shadow}; cursor: pointer; transition: width 0.15s, height 0.15s, box-shadow 0.15s;"
    )
}

/// Diameter of the population halo at the given zoom.
pub(crate) fn halo_diameter_px(province: &ProvinceRecord, zoom: f64) -> f64 {
    let radius = meters_to_pixels(marker_radius_m(province.population), province.center.lat, zoom);
    (radius * 2.0).min(MAX_HALO_DIAMETER_PX)
}

pub(crate) fn halo_css(color: &str, diameter_px: f64) -> String {
    format!(
        "position: absolute; left: 50%; top: 50%; width: {diameter_px:.1}px; height: {diameter_px:.1}px; \
         transform: translate(-50%, -50%); border-radius: 50%; background: {}; \
         border: 1px solid {}; pointer-events: none;",
        hex_with_alpha(color, 0.14),
        hex_with_alpha(color, 0.45),
    )
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Popup body handed to the map widget's `setHTML`.
pub(crate) fn popup_html(province: &ProvinceRecord, tiers: &[TierDefinition]) -> String {
    let (tier_label, tier_color) = tier_definition(tiers, province.tier)
        .map(|def| (def.label, def.color))
        .unwrap_or(("Unclassified", "#64748b"));
    let metrics = &province.metrics;
    let rows = [
        ("Population", format_population(province.population)),
        ("Diabetes", format_kpi_value(metrics.diabetes_pct, "%")),
        ("Obesity", format_kpi_value(metrics.obesity_pct, "%")),
        ("Hospital beds", format_kpi_value(metrics.beds_per_10k, "per 10k")),
    ];
    let mut html = format!(
        r#"<div style="font-family: 'Inter', system-ui, sans-serif; min-width: 200px;"><div style="display:flex;justify-content:space-between;align-items:baseline;gap:8px;"><strong style="font-size:0.95rem;color:#0f172a;">{}</strong><span dir="rtl" style="font-size:0.85rem;color:#475569;">{}</span></div><div style="font-size:0.72rem;color:#64748b;margin-bottom:6px;">Capital: {}</div><span style="display:inline-block;font-size:0.66rem;padding:1px 6px;border-radius:3px;color:#ffffff;background:{};margin-bottom:6px;">{}</span>"#,
        escape_html(province.name_en),
        escape_html(province.name_ar),
        escape_html(province.capital),
        tier_color,
        escape_html(tier_label),
    );
    for (label, value) in rows {
        html.push_str(&format!(
            r#"<div style="display:flex;justify-content:space-between;font-size:0.75rem;padding:2px 0;border-top:1px solid #e2e8f0;"><span style="color:#64748b;">{label}</span><span style="color:#0f172a;font-weight:600;">{}</span></div>"#,
            escape_html(&value)
        ));
    }
    html.push_str("</div>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use sehha_shared::classify::{ColorMode, marker_style};
    use sehha_shared::{Dataset, ProvinceId};

    fn riyadh() -> &'static ProvinceRecord {
        Dataset::builtin()
            .province(ProvinceId::new("riyadh"))
            .expect("riyadh is in the dataset")
    }

    #[test]
    fn dot_css_reflects_color_and_size() {
        let dataset = Dataset::builtin();
        let style = marker_style(riyadh(), ColorMode::Tier, dataset.tiers(), false, false);
        let css = dot_css(&style);
        assert!(css.contains(style.color.css()));
        assert!(css.contains(&format!("width: {:.1}px", style.radius_px * 2.0)));
        assert!(!css.contains("16px 4px"));
    }

    #[test]
    fn glow_adds_outer_shadow() {
        let dataset = Dataset::builtin();
        let style = marker_style(riyadh(), ColorMode::Diabetes, dataset.tiers(), true, false);
        assert!(dot_css(&style).contains("0 0 16px 4px rgba("));
    }

    #[test]
    fn halo_is_capped_and_grows_with_zoom() {
        let near = halo_diameter_px(riyadh(), 5.0);
        let far = halo_diameter_px(riyadh(), 4.0);
        assert!(near > far);
        assert_eq!(halo_diameter_px(riyadh(), 14.0), MAX_HALO_DIAMETER_PX);
    }

    #[test]
    fn popup_lists_metrics_and_escapes_text() {
        let html = popup_html(riyadh(), Dataset::builtin().tiers());
        assert!(html.contains("Riyadh"));
        assert!(html.contains("الرياض"));
        assert!(html.contains("8.2%"));
        assert!(html.contains("26.4 per 10k"));
        assert!(html.contains("Tier 2 - High Priority"));
        assert_eq!(escape_html("<b>&'\""), "&lt;b&gt;&amp;&#39;&quot;");
    }

    #[test]
    fn popup_without_tier_table_is_unclassified() {
        assert!(popup_html(riyadh(), &[]).contains("Unclassified"));
    }
}
