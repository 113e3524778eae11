use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use serde::Serialize;

use crate::error::Result;
use crate::types::DepthSample;

/// Marker radius in meters
pub const MARKER_RADIUS: f64 = 50.0;
/// Uniform marker color, RGBA
pub const MARKER_FILL: [u8; 4] = [255, 0, 0, 160];
pub const INITIAL_ZOOM: f64 = 4.0;
pub const TOOLTIP_HTML: &str =
    "Depth: <b>{InundationDepth_m} m</b><br>Lat: {Latitude}<br>Lon: {Longitude}";

/// Point layer description for a deck.gl style map widget
#[derive(Debug, Clone, Serialize)]
pub struct ScatterplotLayer {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub data: Vec<DepthSample>,
    pub get_position: &'static str,
    pub get_radius: f64,
    pub get_fill_color: [u8; 4],
    pub pickable: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ViewState {
    pub longitude: f64,
    pub latitude: f64,
    pub zoom: f64,
    pub pitch: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TooltipStyle {
    pub background_color: &'static str,
    pub color: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Tooltip {
    pub html: &'static str,
    pub style: TooltipStyle,
}

/// Everything a map widget needs to render the accumulated table
#[derive(Debug, Clone, Serialize)]
pub struct MapView {
    pub layers: Vec<ScatterplotLayer>,
    pub initial_view_state: ViewState,
    pub tooltip: Tooltip,
}

impl MapView {
    /// Build a view over every complete row, centered on their mean position.
    /// Returns `None` when no row has all three fields.
    pub fn from_samples(rows: &[DepthSample]) -> Option<Self> {
        let points: Vec<DepthSample> = rows.iter().copied().filter(|r| r.is_complete()).collect();
        if points.is_empty() {
            return None;
        }

        let n = points.len() as f64;
        let longitude = points.iter().map(|p| p.longitude).sum::<f64>() / n;
        let latitude = points.iter().map(|p| p.latitude).sum::<f64>() / n;

        Some(MapView {
            layers: vec![ScatterplotLayer {
                kind: "ScatterplotLayer",
                data: points,
                get_position: "[Longitude, Latitude]",
                get_radius: MARKER_RADIUS,
                get_fill_color: MARKER_FILL,
                pickable: true,
            }],
            initial_view_state: ViewState {
                longitude,
                latitude,
                zoom: INITIAL_ZOOM,
                pitch: 0.0,
            },
            tooltip: Tooltip {
                html: TOOLTIP_HTML,
                style: TooltipStyle {
                    background_color: "steelblue",
                    color: "white",
                },
            },
        })
    }

    /// Number of rendered points
    pub fn point_count(&self) -> usize {
        self.layers.iter().map(|l| l.data.len()).sum()
    }
}

/// Write the map view as pretty JSON
pub fn write_map_view(view: &MapView, path: &Path) -> Result<()> {
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, view)?;
    Ok(())
}
