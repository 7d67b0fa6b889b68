//! Bindings to the hosted Mapbox GL JS widget (`window.mapboxgl`, loaded by index.html).

use js_sys::{Object, Reflect};
use sehha_shared::{Camera, CameraCommand, CameraSink, LngLat, MapConfig};
use sehha_shared::selection::CommandId;
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[derive(Clone)]
    #[wasm_bindgen(js_namespace = mapboxgl, js_name = Map)]
    pub type MapboxMap;

    #[wasm_bindgen(constructor, js_namespace = mapboxgl, js_class = "Map", catch)]
    fn new(options: &JsValue) -> Result<MapboxMap, JsValue>;

    #[wasm_bindgen(method, js_name = flyTo)]
    fn fly_to(this: &MapboxMap, options: &JsValue);

    #[wasm_bindgen(method)]
    fn stop(this: &MapboxMap);

    #[wasm_bindgen(method)]
    pub fn on(this: &MapboxMap, event: &str, handler: &js_sys::Function);

    #[wasm_bindgen(method)]
    pub fn remove(this: &MapboxMap);

    #[wasm_bindgen(method, js_name = getCenter)]
    fn get_center(this: &MapboxMap) -> MapboxLngLat;

    #[wasm_bindgen(method, js_name = getZoom)]
    fn get_zoom(this: &MapboxMap) -> f64;

    #[wasm_bindgen(method, js_name = getPitch)]
    fn get_pitch(this: &MapboxMap) -> f64;

    #[wasm_bindgen(method, js_name = getBearing)]
    fn get_bearing(this: &MapboxMap) -> f64;

    pub type MapboxLngLat;

    #[wasm_bindgen(method, getter)]
    fn lng(this: &MapboxLngLat) -> f64;

    #[wasm_bindgen(method, getter)]
    fn lat(this: &MapboxLngLat) -> f64;

    #[wasm_bindgen(js_namespace = mapboxgl, js_name = Marker)]
    pub type MapboxMarker;

    #[wasm_bindgen(constructor, js_namespace = mapboxgl, js_class = "Marker", catch)]
    fn new(options: &JsValue) -> Result<MapboxMarker, JsValue>;

    #[wasm_bindgen(method, js_name = setLngLat)]
    fn set_lng_lat(this: &MapboxMarker, lng_lat: &JsValue) -> MapboxMarker;

    #[wasm_bindgen(method, js_name = addTo)]
    fn add_to(this: &MapboxMarker, map: &MapboxMap) -> MapboxMarker;

    #[wasm_bindgen(method)]
    pub fn remove(this: &MapboxMarker) -> MapboxMarker;

    #[wasm_bindgen(js_namespace = mapboxgl, js_name = Popup)]
    pub type MapboxPopup;

    #[wasm_bindgen(constructor, js_namespace = mapboxgl, js_class = "Popup", catch)]
    fn new(options: &JsValue) -> Result<MapboxPopup, JsValue>;

    #[wasm_bindgen(method, js_name = setLngLat)]
    fn set_lng_lat(this: &MapboxPopup, lng_lat: &JsValue) -> MapboxPopup;

    #[wasm_bindgen(method, js_name = setHTML)]
    fn set_html(this: &MapboxPopup, html: &str) -> MapboxPopup;

    #[wasm_bindgen(method, js_name = addTo)]
    fn add_to(this: &MapboxPopup, map: &MapboxMap) -> MapboxPopup;

    #[wasm_bindgen(method)]
    pub fn on(this: &MapboxPopup, event: &str, handler: &js_sys::Function);

    #[wasm_bindgen(method)]
    pub fn off(this: &MapboxPopup, event: &str, handler: &js_sys::Function);

    #[wasm_bindgen(method)]
    pub fn remove(this: &MapboxPopup) -> MapboxPopup;
}

/// True once the Mapbox script has populated `window.mapboxgl`.
pub fn is_available() -> bool {
    Reflect::get(&js_sys::global(), &JsValue::from_str("mapboxgl"))
        .map(|value| value.is_object())
        .unwrap_or(false)
}

fn set(target: &Object, key: &str, value: &JsValue) -> Result<(), JsValue> {
    Reflect::set(target, &JsValue::from_str(key), value).map(|_| ())
}

fn lng_lat_array(point: LngLat) -> JsValue {
    let array = js_sys::Array::new();
    array.push(&JsValue::from_f64(point.lng));
    array.push(&JsValue::from_f64(point.lat));
    array.into()
}

pub fn create_map(
    container: &web_sys::HtmlElement,
    config: &MapConfig,
    camera: Camera,
) -> Result<MapboxMap, JsValue> {
    let options = Object::new();
    set(&options, "container", container)?;
    set(&options, "accessToken", &JsValue::from_str(&config.access_token))?;
    set(&options, "style", &JsValue::from_str(&config.style_url))?;
    set(&options, "center", &lng_lat_array(camera.center))?;
    set(&options, "zoom", &JsValue::from_f64(camera.zoom))?;
    set(&options, "pitch", &JsValue::from_f64(camera.pitch))?;
    set(&options, "bearing", &JsValue::from_f64(camera.bearing))?;
    MapboxMap::new(&options)
}

pub fn add_marker(
    map: &MapboxMap,
    element: &web_sys::HtmlElement,
    at: LngLat,
) -> Result<MapboxMarker, JsValue> {
    let options = Object::new();
    set(&options, "element", element)?;
    let marker = MapboxMarker::new(&options)?;
    marker.set_lng_lat(&lng_lat_array(at));
    marker.add_to(map);
    Ok(marker)
}

pub fn open_popup(map: &MapboxMap, at: LngLat, html: &str) -> Result<MapboxPopup, JsValue> {
    let options = Object::new();
    set(&options, "offset", &JsValue::from_f64(18.0))?;
    set(&options, "closeOnClick", &JsValue::FALSE)?;
    set(&options, "maxWidth", &JsValue::from_str("280px"))?;
    let popup = MapboxPopup::new(&options)?;
    popup.set_lng_lat(&lng_lat_array(at));
    popup.set_html(html);
    popup.add_to(map);
    Ok(popup)
}

pub fn current_camera(map: &MapboxMap) -> Camera {
    let center = map.get_center();
    Camera {
        center: LngLat::new(center.lng(), center.lat()),
        zoom: map.get_zoom(),
        pitch: map.get_pitch(),
        bearing: map.get_bearing(),
    }
}

/// Fire-and-forget camera adapter. A newer `flyTo` replaces an in-flight one inside the widget.
pub struct MapboxCamera<'a> {
    map: &'a MapboxMap,
}

impl<'a> MapboxCamera<'a> {
    pub fn new(map: &'a MapboxMap) -> Self {
        Self { map }
    }
}

#[derive(Serialize)]
struct FlyToOptions {
    center: [f64; 2],
    zoom: f64,
    pitch: f64,
    bearing: f64,
    duration: u32,
    essential: bool,
}

impl CameraSink for MapboxCamera<'_> {
    fn fly_to(&mut self, command: &CameraCommand) {
        let target = command.target;
        let options = FlyToOptions {
            center: target.center.to_array(),
            zoom: target.zoom,
            pitch: target.pitch,
            bearing: target.bearing,
            duration: command.duration_ms,
            essential: true,
        };
        match serde_wasm_bindgen::to_value(&options) {
            Ok(options) => self.map.fly_to(&options),
            Err(e) => {
                web_sys::console::warn_1(&format!("flyTo options rejected: {e}").into());
            }
        }
    }

    fn cancel(&mut self, _id: CommandId) {
        self.map.stop();
    }
}
