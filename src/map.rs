//! Map state for a search: a vector layer of markers plus one popup overlay.
//!
//! Tiles and drawing belong to whatever map client loads the GeoJSON
//! produced by [`MapView::to_geojson`]; this module only tracks what should
//! be on the map and where.

use serde_json::{Value, json};

use crate::weather::WeatherSummary;

/// Semi-major axis of the WGS84 ellipsoid, as used by Web Mercator.
const EARTH_RADIUS_M: f64 = 6_378_137.0;

/// Web Mercator is undefined at the poles; it is conventionally cut here.
const MAX_LATITUDE: f64 = 85.051_128_779_806_59;

const MARKER_ICON: &str = "https://openlayers.org/en/latest/examples/data/icon.png";

/// Projects longitude/latitude degrees (EPSG:4326) to Web Mercator metres
/// (EPSG:3857).
pub fn from_lon_lat(lon: f64, lat: f64) -> (f64, f64) {
    let lat = lat.clamp(-MAX_LATITUDE, MAX_LATITUDE);
    let x = EARTH_RADIUS_M * lon.to_radians();
    let y = EARTH_RADIUS_M * (std::f64::consts::FRAC_PI_4 + lat.to_radians() / 2.0).tan().ln();
    (x, y)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub lon: f64,
    pub lat: f64,
    /// Projected position in metres.
    pub position: (f64, f64),
    pub icon_src: String,
    /// Fraction of the icon's size; `[0.5, 1.0]` pins the bottom-centre.
    pub anchor: [f64; 2],
    pub scale: f64,
}

impl Marker {
    pub fn at(lon: f64, lat: f64) -> Self {
        Self {
            lon,
            lat,
            position: from_lon_lat(lon, lat),
            icon_src: MARKER_ICON.to_string(),
            anchor: [0.5, 1.0],
            scale: 0.8,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Positioning {
    BottomCenter,
}

impl Positioning {
    pub fn as_str(&self) -> &'static str {
        match self {
            Positioning::BottomCenter => "bottom-center",
        }
    }
}

/// The text box shown above the marker.
#[derive(Debug, Clone, PartialEq)]
pub struct Popup {
    pub lines: Vec<String>,
    pub icon_url: String,
    pub position: (f64, f64),
    pub positioning: Positioning,
    /// Pixel offset from `position`.
    pub offset: [i32; 2],
}

impl Popup {
    pub fn for_summary(summary: &WeatherSummary, lon: f64, lat: f64) -> Self {
        Self {
            lines: vec![
                format!("Place: {}", summary.name),
                format!("Weather: {}", summary.weather),
                format!("Temperature: {}°C", summary.temperature),
                format!("Description: {}", summary.description),
                format!("Temp-min: {}°C", summary.temp_min),
                format!("Temp-max: {}°C", summary.temp_max),
            ],
            icon_url: summary.icon.clone(),
            position: from_lon_lat(lon, lat),
            positioning: Positioning::BottomCenter,
            offset: [0, -50],
        }
    }
}

#[derive(Debug, Default)]
pub struct MapView {
    markers: Vec<Marker>,
    popup: Option<Popup>,
}

impl MapView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn popup(&self) -> Option<&Popup> {
        self.popup.as_ref()
    }

    pub fn clear_markers(&mut self) {
        self.markers.clear();
    }

    pub fn add_marker(&mut self, marker: Marker) {
        self.markers.push(marker);
    }

    /// Replaces any popup already shown.
    pub fn set_popup(&mut self, popup: Popup) {
        self.popup = Some(popup);
    }

    pub fn remove_popup(&mut self) -> Option<Popup> {
        self.popup.take()
    }

    /// Renders the layer as a GeoJSON `FeatureCollection`. Coordinates are
    /// lon/lat per RFC 7946; the popup is attached to every marker's
    /// properties, since only one search is shown at a time.
    pub fn to_geojson(&self) -> Value {
        let features: Vec<Value> = self
            .markers
            .iter()
            .map(|marker| {
                let mut properties = json!({
                    "icon": marker.icon_src,
                    "anchor": marker.anchor,
                    "scale": marker.scale,
                    "web_mercator": [marker.position.0, marker.position.1],
                });
                if let Some(popup) = &self.popup {
                    properties["popup"] = json!({
                        "lines": popup.lines,
                        "icon": popup.icon_url,
                        "positioning": popup.positioning.as_str(),
                        "offset": popup.offset,
                    });
                }
                json!({
                    "type": "Feature",
                    "geometry": { "type": "Point", "coordinates": [marker.lon, marker.lat] },
                    "properties": properties,
                })
            })
            .collect();

        json!({ "type": "FeatureCollection", "features": features })
    }
}
