use leptos::prelude::*;
use sehha_shared::classify::{diabetes_tone, infrastructure_tone, marker_color, obesity_tone};
use sehha_shared::colors::hex_with_alpha;
use sehha_shared::kpi::format_kpi_value;
use sehha_shared::province::format_population;
use sehha_shared::{Dataset, ProvinceRecord, Tone};

use crate::app::{ColorModeSetting, SelectedProvince};

fn metric_row(label: &'static str, value: String, tone: Tone) -> impl IntoView {
    view! {
        <div style="display: flex; justify-content: space-between; align-items: center; padding: 4px 0; border-top: 1px solid #f1f5f9; font-size: 0.78rem;">
            <span style="color: #64748b;">{label}</span>
            <span style=format!(
                "font-weight: 600; padding: 1px 6px; border-radius: 3px; color: {}; background: {};",
                tone.hex(),
                hex_with_alpha(tone.hex(), 0.1),
            )>
                {value}
            </span>
        </div>
    }
}

fn province_detail(province: &'static ProvinceRecord, dataset: Dataset) -> impl IntoView {
    let tier = dataset.tier_definition(province.tier);
    let metrics = &province.metrics;
    view! {
        <div style="display: flex; justify-content: space-between; align-items: baseline;">
            <strong style="font-size: 0.95rem;">{province.name_en}</strong>
            <span dir="rtl" style="font-size: 0.85rem; color: #475569;">{province.name_ar}</span>
        </div>
        <div style="font-size: 0.72rem; color: #64748b; margin: 2px 0 6px;">
            {format!("Capital: {} | Population {}", province.capital, format_population(province.population))}
        </div>
        {tier.map(|def| view! {
            <div style="font-size: 0.7rem; margin-bottom: 6px;">
                <span style=format!("color: {}; font-weight: 600;", def.color)>{def.label}</span>
                <div style="color: #94a3b8;">{def.description}</div>
            </div>
        })}
        {metric_row("Diabetes", format_kpi_value(metrics.diabetes_pct, "%"), diabetes_tone(metrics.diabetes_pct))}
        {metric_row("Obesity", format_kpi_value(metrics.obesity_pct, "%"), obesity_tone(metrics.obesity_pct))}
        {metric_row(
            "Hospital beds",
            format_kpi_value(metrics.beds_per_10k, "per 10k"),
            infrastructure_tone(metrics.beds_per_10k),
        )}
    }
}

/// Detail card for the selected province.
#[component]
pub fn ProvincePanel() -> impl IntoView {
    let dataset: Dataset = expect_context();
    let SelectedProvince(selected) = expect_context();

    view! {
        <div style="background: #ffffff; border: 1px solid #e2e8f0; border-radius: 8px; padding: 12px 14px;">
            {move || match selected.get().and_then(|id| dataset.province(id)) {
                Some(province) => view! {
                    <div>
                        {province_detail(province, dataset)}
                        <button
                            type="button"
                            style="margin-top: 8px; font-size: 0.7rem; padding: 3px 8px; border-radius: 4px; border: 1px solid #cbd5e1; background: #ffffff; color: #334155; cursor: pointer;"
                            on:click=move |_| selected.set(None)
                        >
                            "Back to overview"
                        </button>
                    </div>
                }
                .into_any(),
                None => view! {
                    <div style="font-size: 0.78rem; color: #94a3b8;">
                        "Select a province on the map or in the list to see its indicators."
                    </div>
                }
                .into_any(),
            }}
        </div>
    }
}

/// Compact list of provinces, ordered by population, colored like the markers.
#[component]
pub fn ProvinceList() -> impl IntoView {
    let dataset: Dataset = expect_context();
    let SelectedProvince(selected) = expect_context();
    let ColorModeSetting(color_mode) = expect_context();

    let mut ordered: Vec<&'static ProvinceRecord> = dataset.provinces().iter().collect();
    ordered.sort_by(|a, b| b.population.cmp(&a.population));

    let items = ordered
        .into_iter()
        .map(|province| {
            let id = province.id;
            let style = move || {
                let color = marker_color(province, color_mode.get(), dataset.tiers()).css();
                let active = selected.get() == Some(id);
                format!(
                    "display: flex; align-items: center; gap: 6px; padding: 4px 8px; border-radius: 6px; cursor: pointer; \
                     font-size: 0.75rem; border: 1px solid {}; background: {};",
                    if active { color } else { "#e2e8f0" },
                    if active { hex_with_alpha(color, 0.1) } else { "#ffffff".to_string() },
                )
            };
            let dot = move || {
                let color = marker_color(province, color_mode.get(), dataset.tiers()).css();
                format!("width: 8px; height: 8px; border-radius: 50%; background: {color};")
            };
            view! {
                <button type="button" data-province=id.as_str() style=style on:click=move |_| selected.set(Some(id))>
                    <span style=dot />
                    <span style="color: #0f172a;">{province.name_en}</span>
                </button>
            }
        })
        .collect_view();

    view! {
        <div style="display: flex; flex-wrap: wrap; gap: 6px;">{items}</div>
    }
}
