use gloo_storage::Storage;
use leptos::prelude::*;
use sehha_shared::{ColorMode, Dataset, MapConfig, ProvinceId};
use wasm_bindgen_futures::spawn_local;

use crate::api;
use crate::kpi_tracker::KpiTracker;
use crate::legend::MapLegend;
use crate::province_map::ProvinceMap;
use crate::province_panel::{ProvinceList, ProvincePanel};
use crate::summary_bar::SummaryBar;

const SETTINGS_KEY: &str = "sehha_settings";

/// Map widget settings as seen by the browser.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum ConfigState {
    Loading,
    Ready(MapConfig),
    Unavailable(String),
}

/// Newtype wrappers give each signal a distinct type for Leptos context.
#[derive(Clone, Copy)]
pub(crate) struct MapConfigSignal(pub RwSignal<ConfigState>);
#[derive(Clone, Copy)]
pub(crate) struct SelectedProvince(pub RwSignal<Option<ProvinceId>>);
#[derive(Clone, Copy)]
pub(crate) struct ColorModeSetting(pub RwSignal<ColorMode>);

#[derive(serde::Serialize, serde::Deserialize)]
#[serde(default)]
struct Settings {
    color_mode: String,
    selected_province: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color_mode: ColorMode::default().key().to_string(),
            selected_province: None,
        }
    }
}

/// Saved province keys that no longer exist in the dataset restore as no selection.
fn restore_selection(dataset: Dataset, saved: Option<&str>) -> Option<ProvinceId> {
    saved
        .and_then(|key| dataset.province_by_key(key))
        .map(|province| province.id)
}

/// Root application component. Provides global reactive signals via context.
#[component]
pub fn App() -> impl IntoView {
    let dataset = Dataset::builtin();
    let saved: Settings = gloo_storage::LocalStorage::get(SETTINGS_KEY).unwrap_or_default();
    let color_mode: RwSignal<ColorMode> =
        RwSignal::new(saved.color_mode.parse().unwrap_or_default());
    let map_config: RwSignal<ConfigState> = RwSignal::new(ConfigState::Loading);
    let selected: RwSignal<Option<ProvinceId>> =
        RwSignal::new(restore_selection(dataset, saved.selected_province.as_deref()));

    provide_context(dataset);
    provide_context(MapConfigSignal(map_config));
    provide_context(SelectedProvince(selected));
    provide_context(ColorModeSetting(color_mode));

    // Persist settings to localStorage on any change
    Effect::new(move || {
        let settings = Settings {
            color_mode: color_mode.get().key().to_string(),
            selected_province: selected.get().map(|id| id.as_str().to_string()),
        };
        let _ = gloo_storage::LocalStorage::set(SETTINGS_KEY, &settings);
    });

    spawn_local(async move {
        match api::fetch_map_config().await {
            Ok(config) => map_config.set(ConfigState::Ready(config)),
            Err(e) => {
                web_sys::console::warn_1(&format!("map config unavailable: {e}").into());
                map_config.set(ConfigState::Unavailable(
                    "could not load map settings from the server.".to_string(),
                ));
            }
        }
    });

    let on_select = Callback::new(move |id: Option<ProvinceId>| {
        if let Some(province) = id.and_then(|id| dataset.province(id)) {
            web_sys::console::log_1(&format!("selected {}", province.name_en).into());
        }
    });

    view! {
        <div style="min-height: 100vh; background: #f8fafc; color: #0f172a; font-family: 'Inter', system-ui, sans-serif;">
            <header style="display: flex; align-items: baseline; justify-content: space-between; gap: 16px; padding: 18px 28px; background: #ffffff; border-bottom: 1px solid #e2e8f0;">
                <div>
                    <h1 style="margin: 0; font-size: 1.35rem; font-weight: 700;">"Saudi Provincial Health Map"</h1>
                    <p style="margin: 2px 0 0; font-size: 0.8rem; color: #64748b;">
                        "Population health indicators and Vision 2030 progress by province"
                    </p>
                </div>
                <span dir="rtl" style="font-size: 1.1rem; color: #0f766e; font-weight: 600;">"خريطة الصحة"</span>
            </header>
            <SummaryBar />
            <main style="display: grid; grid-template-columns: minmax(0, 2fr) minmax(320px, 1fr); gap: 20px; padding: 20px 28px;">
                <section style="display: flex; flex-direction: column; gap: 12px; min-width: 0;">
                    <ColorModeSelector />
                    <div style="height: 520px;">
                        <ProvinceMap dataset=dataset color_mode=color_mode on_select=on_select />
                    </div>
                    <div style="display: grid; grid-template-columns: minmax(0, 1fr) minmax(0, 1fr); gap: 12px;">
                        <MapLegend />
                        <ProvincePanel />
                    </div>
                    <ProvinceList />
                </section>
                <aside style="min-width: 0;">
                    <KpiTracker />
                </aside>
            </main>
        </div>
    }
}

/// Segmented control for the metric that drives marker colors.
#[component]
fn ColorModeSelector() -> impl IntoView {
    let ColorModeSetting(color_mode) = expect_context();

    let buttons = ColorMode::ALL
        .into_iter()
        .map(|mode| {
            let style = move || {
                let active = color_mode.get() == mode;
                format!(
                    "padding: 6px 12px; font-size: 0.78rem; border-radius: 6px; cursor: pointer; \
                     border: 1px solid {}; background: {}; color: {}; font-weight: {};",
                    if active { "#0f766e" } else { "#cbd5e1" },
                    if active { "#0f766e" } else { "#ffffff" },
                    if active { "#ffffff" } else { "#334155" },
                    if active { 600 } else { 400 },
                )
            };
            view! {
                <button
                    type="button"
                    data-mode=mode.key()
                    style=style
                    on:click=move |_| color_mode.set(mode)
                >
                    {mode.label()}
                </button>
            }
        })
        .collect_view();

    view! {
        <div style="display: flex; align-items: center; gap: 8px; flex-wrap: wrap;">
            <span style="font-size: 0.72rem; text-transform: uppercase; letter-spacing: 0.06em; color: #64748b;">
                "Color by"
            </span>
            {buttons}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saved_selection_resolves_against_dataset() {
        let dataset = Dataset::builtin();
        assert_eq!(
            restore_selection(dataset, Some("makkah")),
            Some(ProvinceId::new("makkah"))
        );
        assert_eq!(restore_selection(dataset, Some("atlantis")), None);
        assert_eq!(restore_selection(dataset, None), None);
    }

    #[test]
    fn settings_without_selection_key_still_load() {
        let settings: Settings =
            serde_json::from_str(r#"{"color_mode":"obesity"}"#).expect("parse settings");
        assert_eq!(settings.color_mode, "obesity");
        assert!(settings.selected_province.is_none());
    }
}
