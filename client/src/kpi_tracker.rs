use leptos::prelude::*;
use sehha_shared::colors::hex_with_alpha;
use sehha_shared::kpi::{average_progress, display_percent, format_kpi_value, remaining_to_target};
use sehha_shared::{Dataset, KpiRecord, KpiStatus, StatusCounts};

fn percent_label(percent: f64) -> String {
    format!("{percent:.0}%")
}

/// Vision 2030 KPI progress tracker.
#[component]
pub fn KpiTracker() -> impl IntoView {
    let dataset: Dataset = expect_context();
    let kpis = dataset.kpis();
    let counts = StatusCounts::tally(kpis);
    let average = average_progress(kpis).unwrap_or(0.0);

    let status_cards = KpiStatus::ALL
        .into_iter()
        .map(|status| {
            let color = status.tone().hex();
            view! {
                <div style=format!(
                    "flex: 1; padding: 10px 12px; border-radius: 8px; border: 1px solid {}; background: {};",
                    hex_with_alpha(color, 0.35),
                    hex_with_alpha(color, 0.08),
                )>
                    <div style=format!("font-size: 1.4rem; font-weight: 700; color: {color};")>
                        {counts.get(status)}
                    </div>
                    <div style="font-size: 0.72rem; color: #475569;">{status.label()}</div>
                </div>
            }
        })
        .collect_view();

    view! {
        <div style="background: #ffffff; border: 1px solid #e2e8f0; border-radius: 8px; padding: 16px;">
            <div style="display: flex; align-items: baseline; justify-content: space-between; margin-bottom: 12px;">
                <h2 style="margin: 0; font-size: 1rem; font-weight: 700;">"Vision 2030 Health Targets"</h2>
                <span style="font-family: 'JetBrains Mono', monospace; font-size: 0.72rem; color: #64748b;">
                    {format!("{} tracked", counts.total())}
                </span>
            </div>
            <div style="display: flex; gap: 8px; margin-bottom: 12px;">{status_cards}</div>
            <div style="font-size: 0.75rem; color: #475569; margin-bottom: 14px;">
                "Average progress toward target: "
                <strong style="color: #0f172a;">{percent_label(average)}</strong>
            </div>
            <div style="display: flex; flex-direction: column; gap: 12px;">
                {kpis.iter().map(|kpi| view! { <KpiRow kpi=kpi /> }).collect_view()}
            </div>
        </div>
    }
}

#[component]
fn KpiRow(kpi: &'static KpiRecord) -> impl IntoView {
    let percent = display_percent(kpi);
    let tone = kpi.status.tone().hex();
    let remaining = remaining_to_target(kpi);
    let direction = if remaining < 0.0 { "reduce by" } else { "to go" };

    view! {
        <div data-kpi=kpi.id>
            <div style="display: flex; justify-content: space-between; gap: 8px; font-size: 0.8rem;">
                <span style="font-weight: 600; color: #0f172a;">{kpi.name}</span>
                <span style=format!(
                    "font-size: 0.66rem; padding: 1px 6px; border-radius: 3px; white-space: nowrap; color: {tone}; background: {};",
                    hex_with_alpha(tone, 0.12),
                )>
                    {kpi.status.label()}
                </span>
            </div>
            <div style="font-size: 0.68rem; color: #94a3b8; margin: 1px 0 5px;">{kpi.category}</div>
            <div style="height: 8px; border-radius: 4px; background: #e2e8f0; overflow: hidden;">
                <div style=format!(
                    "height: 100%; width: {percent:.1}%; background: {tone}; border-radius: 4px;"
                ) />
            </div>
            <div style="display: flex; justify-content: space-between; margin-top: 4px; font-family: 'JetBrains Mono', monospace; font-size: 0.66rem; color: #64748b;">
                <span>{format!("Baseline {}", format_kpi_value(kpi.baseline, kpi.unit))}</span>
                <span style="color: #0f172a; font-weight: 600;">
                    {format!("{} ({})", format_kpi_value(kpi.current, kpi.unit), percent_label(percent))}
                </span>
                <span>{format!("Target {}", format_kpi_value(kpi.target, kpi.unit))}</span>
            </div>
            <div style="font-size: 0.64rem; color: #94a3b8; margin-top: 2px; text-align: right;">
                {format!("{} {direction}", format_kpi_value((remaining * 10.0).round().abs() / 10.0, kpi.unit))}
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::percent_label;

    #[test]
    fn percent_label_rounds_to_whole_numbers() {
        assert_eq!(percent_label(50.0), "50%");
        assert_eq!(percent_label(66.6), "67%");
        assert_eq!(percent_label(0.0), "0%");
    }
}
