use std::cell::RefCell;

use leptos::prelude::*;
use sehha_shared::classify::marker_style;
use sehha_shared::selection::{Camera, InteractionMode, MapEvent, SelectionChange};
use sehha_shared::{CameraSink, ColorMode, Dataset, InteractionController, ProvinceId};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;

use crate::app::{ConfigState, MapConfigSignal, SelectedProvince};
use crate::mapbox::{self, MapboxCamera, MapboxMap, MapboxMarker, MapboxPopup};
use crate::markers::{dot_css, halo_css, halo_diameter_px, popup_html};

struct MarkerBinding {
    id: ProvinceId,
    _marker: MapboxMarker,
    dot: web_sys::HtmlElement,
    halo: web_sys::HtmlElement,
    _listeners: Vec<Closure<dyn Fn(web_sys::MouseEvent)>>,
}

struct PopupBinding {
    id: ProvinceId,
    popup: MapboxPopup,
    on_close: Closure<dyn Fn()>,
}

impl PopupBinding {
    /// Detach our close listener first so a programmatic removal is not read as a user close.
    fn dismiss(self) {
        self.popup
            .off("close", self.on_close.as_ref().unchecked_ref());
        self.popup.remove();
    }
}

struct MapBinding {
    map: MapboxMap,
    markers: Vec<MarkerBinding>,
    popup: Option<PopupBinding>,
    _map_listeners: Vec<Closure<dyn Fn(wasm_bindgen::JsValue)>>,
}

thread_local! {
    static MAP_BINDING: RefCell<Option<MapBinding>> = const { RefCell::new(None) };
}

fn teardown_map() {
    let binding = MAP_BINDING.with(|slot| slot.borrow_mut().take());
    if let Some(mut binding) = binding {
        if let Some(popup) = binding.popup.take() {
            popup.dismiss();
        }
        binding.map.remove();
    }
}

/// Event that brings the controller in line with a selection made elsewhere.
/// Held back until the widget exists so the camera actually flies to it.
fn external_selection_event(
    map_ready: bool,
    wanted: Option<ProvinceId>,
    current: Option<ProvinceId>,
) -> Option<MapEvent> {
    if !map_ready || wanted == current {
        return None;
    }
    Some(match wanted {
        Some(id) => MapEvent::MarkerClicked(id),
        None => MapEvent::BackgroundClicked,
    })
}

fn create_div(document: &web_sys::Document) -> Option<web_sys::HtmlElement> {
    document
        .create_element("div")
        .ok()
        .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok())
}

/// Map of province markers. Selection changes are reported through `on_select`.
#[component]
pub fn ProvinceMap(
    dataset: Dataset,
    #[prop(into)] color_mode: Signal<ColorMode>,
    #[prop(optional)] on_select: Option<Callback<Option<ProvinceId>>>,
) -> impl IntoView {
    let MapConfigSignal(map_config) = expect_context();
    let SelectedProvince(selected_province) = expect_context();
    let controller = RwSignal::new(InteractionController::new(dataset));
    let container_ref = NodeRef::<leptos::html::Div>::new();
    let map_error: RwSignal<Option<String>> = RwSignal::new(None);
    let map_ready = RwSignal::new(false);

    let dispatch = move |event: MapEvent| {
        let Some(outcome) = controller.try_update(|ctl| ctl.handle(event)) else {
            return;
        };
        if let Some(command) = outcome.camera {
            MAP_BINDING.with(|slot| {
                if let Some(binding) = slot.borrow().as_ref() {
                    MapboxCamera::new(&binding.map).fly_to(&command);
                }
            });
        }
        if let SelectionChange::Changed(id) = outcome.selection {
            selected_province.set(id);
            if let Some(callback) = on_select {
                callback.run(id);
            }
        }
    };

    // Create the widget once the container exists and the config has arrived.
    Effect::new(move || {
        let Some(container) = container_ref.get() else {
            return;
        };
        let config = match map_config.get() {
            ConfigState::Loading => return,
            ConfigState::Unavailable(reason) => {
                map_error.set(Some(format!("Map unavailable: {reason}")));
                return;
            }
            ConfigState::Ready(config) => config,
        };
        if MAP_BINDING.with(|slot| slot.borrow().is_some()) {
            return;
        }
        if !config.is_usable() {
            map_error.set(Some(
                "Map unavailable: the server has no MAPBOX_ACCESS_TOKEN configured.".to_string(),
            ));
            return;
        }
        if !mapbox::is_available() {
            web_sys::console::warn_1(&"mapboxgl global missing; map view disabled".into());
            map_error.set(Some("Map unavailable: the map library failed to load.".to_string()));
            return;
        }
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        let element: &web_sys::HtmlElement = &container;
        let map = match mapbox::create_map(element, &config, Camera::OVERVIEW) {
            Ok(map) => map,
            Err(e) => {
                web_sys::console::warn_1(&format!("map init failed: {e:?}").into());
                map_error.set(Some("Map unavailable: the map widget failed to start.".to_string()));
                return;
            }
        };

        let on_background = Closure::<dyn Fn(wasm_bindgen::JsValue)>::new(move |_| {
            dispatch(MapEvent::BackgroundClicked);
        });
        map.on("click", on_background.as_ref().unchecked_ref());
        let map_for_move = map.clone();
        let on_move = Closure::<dyn Fn(wasm_bindgen::JsValue)>::new(move |_| {
            dispatch(MapEvent::ViewportMoved(mapbox::current_camera(&map_for_move)));
        });
        map.on("move", on_move.as_ref().unchecked_ref());

        let mut markers = Vec::with_capacity(dataset.provinces().len());
        for province in dataset.provinces() {
            let id = province.id;
            let (Some(root), Some(halo), Some(dot)) = (
                create_div(&document),
                create_div(&document),
                create_div(&document),
            ) else {
                continue;
            };
            root.set_attribute("data-province", id.as_str()).ok();
            root.style().set_property("width", "0").ok();
            root.style().set_property("height", "0").ok();
            root.append_child(&halo).ok();
            root.append_child(&dot).ok();

            let on_click = Closure::<dyn Fn(web_sys::MouseEvent)>::new(move |e: web_sys::MouseEvent| {
                e.stop_propagation();
                dispatch(MapEvent::MarkerClicked(id));
            });
            let on_enter = Closure::<dyn Fn(web_sys::MouseEvent)>::new(move |_| {
                dispatch(MapEvent::HoverEntered(id));
            });
            let on_leave = Closure::<dyn Fn(web_sys::MouseEvent)>::new(move |_| {
                dispatch(MapEvent::HoverLeft(id));
            });
            dot.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
                .ok();
            dot.add_event_listener_with_callback("mouseenter", on_enter.as_ref().unchecked_ref())
                .ok();
            dot.add_event_listener_with_callback("mouseleave", on_leave.as_ref().unchecked_ref())
                .ok();

            match mapbox::add_marker(&map, &root, province.center) {
                Ok(marker) => markers.push(MarkerBinding {
                    id,
                    _marker: marker,
                    dot,
                    halo,
                    _listeners: vec![on_click, on_enter, on_leave],
                }),
                Err(e) => {
                    web_sys::console::warn_1(&format!("marker for {id} failed: {e:?}").into());
                }
            }
        }

        MAP_BINDING.with(|slot| {
            *slot.borrow_mut() = Some(MapBinding {
                map,
                markers,
                popup: None,
                _map_listeners: vec![on_background, on_move],
            });
        });
        map_ready.set(true);
    });

    // Marker dots follow color mode, hover and selection.
    let emphasis = Memo::new(move |_| {
        controller.with(|ctl| {
            dataset
                .provinces()
                .iter()
                .map(|p| p.id)
                .filter(|id| ctl.is_hovered(*id) || ctl.is_selected(*id))
                .collect::<Vec<_>>()
        })
    });
    let zoom = Memo::new(move |_| controller.with(|ctl| ctl.state().viewport.zoom));
    Effect::new(move || {
        if !map_ready.get() {
            return;
        }
        let mode = color_mode.get();
        emphasis.track();
        let zoom = zoom.get();
        MAP_BINDING.with(|slot| {
            let slot = slot.borrow();
            let Some(binding) = slot.as_ref() else {
                return;
            };
            for marker in &binding.markers {
                let Some(province) = dataset.province(marker.id) else {
                    continue;
                };
                let style = controller.with_untracked(|ctl| {
                    marker_style(
                        province,
                        mode,
                        dataset.tiers(),
                        ctl.is_hovered(marker.id),
                        ctl.is_selected(marker.id),
                    )
                });
                marker.dot.set_attribute("style", &dot_css(&style)).ok();
                marker
                    .halo
                    .set_attribute(
                        "style",
                        &halo_css(style.color.css(), halo_diameter_px(province, zoom)),
                    )
                    .ok();
            }
        });
    });

    // Popup follows the controller's popup payload.
    let popup_province = Memo::new(move |_| controller.with(|ctl| ctl.popup_province()));
    Effect::new(move || {
        if !map_ready.get() {
            return;
        }
        let province = popup_province.get();
        let wanted = province.map(|p| p.id);
        MAP_BINDING.with(|slot| {
            let mut slot = slot.borrow_mut();
            let Some(binding) = slot.as_mut() else {
                return;
            };
            if binding.popup.as_ref().map(|p| p.id) == wanted {
                return;
            }
            if let Some(old) = binding.popup.take() {
                old.dismiss();
            }
            let Some(province) = province else {
                return;
            };
            let html = popup_html(province, dataset.tiers());
            match mapbox::open_popup(&binding.map, province.center, &html) {
                Ok(popup) => {
                    let on_close = Closure::<dyn Fn()>::new(move || {
                        dispatch(MapEvent::PopupClosed);
                    });
                    popup.on("close", on_close.as_ref().unchecked_ref());
                    binding.popup = Some(PopupBinding {
                        id: province.id,
                        popup,
                        on_close,
                    });
                }
                Err(e) => {
                    web_sys::console::warn_1(&format!("popup failed: {e:?}").into());
                }
            }
        });
    });

    // Selection made outside the map, e.g. the province list.
    Effect::new(move || {
        let ready = map_ready.get();
        let wanted = selected_province.get();
        let current = controller.with_untracked(|ctl| match ctl.mode() {
            InteractionMode::ProvinceSelected(id) => Some(id),
            InteractionMode::Idle => None,
        });
        if let Some(event) = external_selection_event(ready, wanted, current) {
            dispatch(event);
        }
    });

    on_cleanup(teardown_map);

    view! {
        <div style="position: relative; width: 100%; height: 100%; min-height: 420px; border-radius: 8px; overflow: hidden; background: #e2e8f0;">
            <div node_ref=container_ref style="position: absolute; inset: 0;" />
            {move || map_error.get().map(|message| view! {
                <div style="position: absolute; inset: 0; display: flex; align-items: center; justify-content: center; padding: 24px; text-align: center; font-family: 'Inter', system-ui, sans-serif; font-size: 0.85rem; color: #475569;">
                    {message}
                </div>
            })}
            {move || matches!(map_config.get(), ConfigState::Loading).then(|| view! {
                <div style="position: absolute; top: 10px; left: 10px; font-family: 'JetBrains Mono', monospace; font-size: 0.7rem; color: #64748b;">
                    "Loading map settings..."
                </div>
            })}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RIYADH: ProvinceId = ProvinceId::new("riyadh");
    const ASIR: ProvinceId = ProvinceId::new("asir");

    #[test]
    fn list_selection_waits_for_the_widget() {
        assert_eq!(external_selection_event(false, Some(RIYADH), None), None);
        assert_eq!(
            external_selection_event(true, Some(RIYADH), None),
            Some(MapEvent::MarkerClicked(RIYADH))
        );
    }

    #[test]
    fn matching_selection_needs_no_event() {
        assert_eq!(external_selection_event(true, Some(ASIR), Some(ASIR)), None);
        assert_eq!(external_selection_event(true, None, None), None);
    }

    #[test]
    fn cleared_selection_returns_to_overview() {
        assert_eq!(
            external_selection_event(true, None, Some(ASIR)),
            Some(MapEvent::BackgroundClicked)
        );
    }
}
