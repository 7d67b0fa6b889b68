use leptos::prelude::*;
use sehha_shared::Dataset;
use sehha_shared::legend::legend_for;

use crate::app::ColorModeSetting;

#[component]
pub fn MapLegend() -> impl IntoView {
    let dataset: Dataset = expect_context();
    let ColorModeSetting(color_mode) = expect_context();
    let legend = Memo::new(move |_| legend_for(color_mode.get(), dataset.tiers()));

    view! {
        <div style="background: #ffffff; border: 1px solid #e2e8f0; border-radius: 8px; padding: 12px 14px;">
            <div style="font-size: 0.72rem; text-transform: uppercase; letter-spacing: 0.06em; color: #64748b; margin-bottom: 8px;">
                {move || legend.with(|l| l.title)}
            </div>
            {move || {
                legend
                    .get()
                    .entries
                    .into_iter()
                    .map(|entry| {
                        view! {
                            <div style="display: flex; align-items: center; gap: 8px; padding: 3px 0; font-size: 0.8rem;">
                                <span style=format!(
                                    "width: 12px; height: 12px; border-radius: 50%; flex-shrink: 0; background: {}; box-shadow: 0 0 0 2px #ffffff, 0 0 0 3px #e2e8f0;",
                                    entry.color,
                                ) />
                                <span style="color: #0f172a;">{entry.label}</span>
                                <span style="margin-left: auto; font-family: 'JetBrains Mono', monospace; font-size: 0.7rem; color: #64748b;">
                                    {entry.caption}
                                </span>
                            </div>
                        }
                    })
                    .collect_view()
            }}
            <div style="margin-top: 8px; font-size: 0.68rem; color: #94a3b8;">
                "Marker halo scales with province population."
            </div>
        </div>
    }
}
