//! Venue Map
//!
//! Leaflet bindings and the venue -> map sync used by the swiper. The
//! library is a page global; every constructor is imported with `catch` so
//! a page without it yields an error instead of a trap.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::config::MapConfig;
use crate::error::ShowcaseError;
use crate::models::Venue;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = L, js_name = Map)]
    type LeafletMap;

    #[wasm_bindgen(catch, js_namespace = L, js_name = map)]
    fn leaflet_map(container: &web_sys::HtmlElement, options: &JsValue) -> Result<LeafletMap, JsValue>;

    #[wasm_bindgen(method, js_name = setView)]
    fn set_view(this: &LeafletMap, center: &JsValue, zoom: u8);

    #[wasm_bindgen(method, js_name = invalidateSize)]
    fn invalidate_size(this: &LeafletMap);

    #[wasm_bindgen(js_namespace = L, js_name = TileLayer)]
    type TileLayer;

    #[wasm_bindgen(catch, js_namespace = L, js_name = tileLayer)]
    fn tile_layer(url: &str, options: &JsValue) -> Result<TileLayer, JsValue>;

    #[wasm_bindgen(method, js_name = addTo)]
    fn add_layer_to(this: &TileLayer, map: &LeafletMap);

    #[wasm_bindgen(js_namespace = L, js_name = Marker)]
    type Marker;

    #[wasm_bindgen(catch, js_namespace = L, js_name = marker)]
    fn marker(lat_lng: &JsValue) -> Result<Marker, JsValue>;

    #[wasm_bindgen(method, js_name = addTo)]
    fn add_marker_to(this: &Marker, map: &LeafletMap);

    #[wasm_bindgen(method, js_name = setLatLng)]
    fn set_lat_lng(this: &Marker, lat_lng: &JsValue);

    #[wasm_bindgen(method, js_name = bindPopup)]
    fn bind_popup(this: &Marker, content: &str);

    #[wasm_bindgen(method, js_name = setPopupContent)]
    fn set_popup_content(this: &Marker, content: &str);
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MapOptions {
    scroll_wheel_zoom: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TileOptions<'a> {
    max_zoom: u8,
    attribution: &'a str,
}

fn lat_lng(lat: f64, lng: f64) -> Result<JsValue, ShowcaseError> {
    serde_wasm_bindgen::to_value(&[lat, lng]).map_err(|e| ShowcaseError::Js(e.to_string()))
}

/// What the swiper needs from a map
pub trait MapView {
    /// Center on a point and move the marker there with `label` as its popup
    fn show_venue(&self, lat: f64, lng: f64, label: &str);
    /// Recompute the map size after its container changed
    fn invalidate(&self);
}

/// Move the map to `venue`. Venues without coordinates leave the map where it is.
pub fn sync_map(map: &dyn MapView, venue: &Venue) -> bool {
    match venue.coords {
        Some((lat, lng)) => {
            map.show_venue(lat, lng, venue.name);
            true
        }
        None => false,
    }
}

/// Initial center for a venue list: the active venue, else the first one with coordinates
pub fn initial_center(venues: &[Venue], active: usize) -> Option<&Venue> {
    venues
        .get(active)
        .filter(|v| v.coords.is_some())
        .or_else(|| venues.iter().find(|v| v.coords.is_some()))
}

/// Leaflet map with a single venue marker
pub struct VenueMap {
    map: LeafletMap,
    marker: Marker,
    zoom: u8,
}

impl VenueMap {
    pub fn attach(container: &web_sys::HtmlElement, config: &MapConfig, venue: &Venue) -> Result<Self, ShowcaseError> {
        let (lat, lng) = venue
            .coords
            .ok_or_else(|| ShowcaseError::MissingElement(format!("coordinates for '{}'", venue.name)))?;
        let center = lat_lng(lat, lng)?;

        let options = serde_wasm_bindgen::to_value(&MapOptions { scroll_wheel_zoom: false })
            .map_err(|e| ShowcaseError::Js(e.to_string()))?;
        let map = leaflet_map(container, &options)?;
        map.set_view(&center, config.zoom);

        let tile_options = serde_wasm_bindgen::to_value(&TileOptions {
            max_zoom: config.max_zoom,
            attribution: &config.attribution,
        })
        .map_err(|e| ShowcaseError::Js(e.to_string()))?;
        tile_layer(&config.tile_url, &tile_options)?.add_layer_to(&map);

        let marker = marker(&center)?;
        marker.add_marker_to(&map);
        marker.bind_popup(venue.name);

        Ok(Self { map, marker, zoom: config.zoom })
    }
}

impl MapView for VenueMap {
    fn show_venue(&self, lat: f64, lng: f64, label: &str) {
        match lat_lng(lat, lng) {
            Ok(point) => {
                self.map.set_view(&point, self.zoom);
                self.marker.set_lat_lng(&point);
                self.marker.set_popup_content(label);
            }
            Err(e) => log::warn!("map: {}", e),
        }
    }

    fn invalidate(&self) {
        self.map.invalidate_size();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    use crate::data::VENUES;

    #[derive(Default)]
    struct RecordingMap {
        shown: RefCell<Vec<(f64, f64, String)>>,
    }

    impl MapView for RecordingMap {
        fn show_venue(&self, lat: f64, lng: f64, label: &str) {
            self.shown.borrow_mut().push((lat, lng, label.to_string()));
        }

        fn invalidate(&self) {}
    }

    #[test]
    fn test_sync_moves_map_to_venue() {
        let map = RecordingMap::default();
        let venue = VENUES[0];
        assert!(sync_map(&map, &venue));
        let (lat, lng) = venue.coords.unwrap();
        assert_eq!(map.shown.borrow()[0], (lat, lng, venue.name.to_string()));
    }

    #[test]
    fn test_venue_without_coords_leaves_map() {
        let map = RecordingMap::default();
        let venue = Venue { coords: None, ..VENUES[0] };
        assert!(!sync_map(&map, &venue));
        assert!(map.shown.borrow().is_empty());
    }

    #[test]
    fn test_initial_center_falls_back_to_first_placed_venue() {
        let unplaced = Venue { coords: None, ..VENUES[0] };
        let venues = [unplaced, VENUES[1]];
        assert_eq!(initial_center(&venues, 0).map(|v| v.id), Some(VENUES[1].id));
        assert_eq!(initial_center(&venues, 1).map(|v| v.id), Some(VENUES[1].id));
        assert!(initial_center(&[unplaced], 0).is_none());
    }
}
