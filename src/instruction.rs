//! Structured form of one overlay construction, resolved and ready to emit

use crate::LatLng;
use serde::Serialize;

/// Fully resolved stroke attributes
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StrokeStyle {
    pub color: String,
    pub opacity: f64,
    pub weight: f64,
    pub z_index: i64,
}

/// Repeating glyph that draws a dashed line over a hidden stroke
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashIcon {
    /// SVG-style path of a single dash mark
    pub path: String,
    /// Opacity of the dash mark itself
    pub stroke_opacity: f64,
    pub scale: f64,
    pub offset: String,
    pub repeat_px: u32,
}

/// One polyline overlay, plus the map it attaches to
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompiledInstruction {
    /// Position of the source segment in the input
    pub index: usize,
    /// Identifier derived from `index`
    pub id: String,
    pub path: Vec<LatLng>,
    pub style: StrokeStyle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dash: Option<DashIcon>,
    /// Name of the map binding the overlay is attached to
    pub attach_to: String,
}

impl CompiledInstruction {
    pub fn is_dashed(&self) -> bool {
        self.dash.is_some()
    }
}
