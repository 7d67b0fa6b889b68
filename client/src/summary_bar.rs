use leptos::prelude::*;
use sehha_shared::province::format_population;
use sehha_shared::summary::{NationalSummary, RiskBreakdown};
use sehha_shared::{ColorMode, Dataset, Tier, Tone};

use crate::app::ColorModeSetting;

fn stat(label: &'static str, value: String) -> impl IntoView {
    view! {
        <div style="display: flex; flex-direction: column; gap: 2px; min-width: 110px;">
            <span style="font-size: 0.66rem; text-transform: uppercase; letter-spacing: 0.06em; color: #64748b;">{label}</span>
            <span style="font-size: 1.05rem; font-weight: 700; color: #0f172a;">{value}</span>
        </div>
    }
}

/// National roll-up strip under the header.
#[component]
pub fn SummaryBar() -> impl IntoView {
    let dataset: Dataset = expect_context();
    let ColorModeSetting(color_mode) = expect_context();
    let summary = NationalSummary::compute(dataset.provinces());
    let weighted = summary.weighted;

    let tiers = Tier::ALL
        .into_iter()
        .map(|tier| {
            let color = dataset
                .tier_definition(tier)
                .map(|def| def.color)
                .unwrap_or(Tone::Neutral.hex());
            view! {
                <span style=format!(
                    "font-size: 0.72rem; padding: 2px 8px; border-radius: 10px; color: #ffffff; background: {color};"
                )>
                    {format!("T{} x{}", tier.rank(), summary.tier_count(tier))}
                </span>
            }
        })
        .collect_view();

    let breakdown = move || {
        let mode = color_mode.get();
        if mode == ColorMode::Tier {
            return None;
        }
        let risk = RiskBreakdown::for_mode(dataset.provinces(), mode);
        let chips = [
            (Tone::Danger, risk.high),
            (Tone::Warning, risk.moderate),
            (Tone::Success, risk.low),
        ]
        .into_iter()
        .map(|(tone, count)| {
            view! {
                <span style=format!("font-size: 0.72rem; color: {};", tone.hex())>
                    {format!("{count} {}", tone.risk_label())}
                </span>
            }
        })
        .collect_view();
        Some(view! {
            <div style="display: flex; gap: 10px; align-items: center; margin-left: auto;">
                <span style="font-size: 0.66rem; color: #64748b;">{mode.label()}</span>
                {chips}
            </div>
        })
    };

    view! {
        <div style="display: flex; align-items: center; gap: 24px; flex-wrap: wrap; padding: 12px 28px; background: #ffffff; border-bottom: 1px solid #e2e8f0;">
            {stat("Provinces", summary.province_count.to_string())}
            {stat("Population", format_population(summary.total_population))}
            {stat("Diabetes (wtd.)", format!("{:.1}%", weighted.diabetes_pct))}
            {stat("Obesity (wtd.)", format!("{:.1}%", weighted.obesity_pct))}
            {stat("Beds / 10k (wtd.)", format!("{:.1}", weighted.beds_per_10k))}
            <div style="display: flex; gap: 6px;">{tiers}</div>
            {breakdown}
        </div>
    }
}
