//! Google Maps JavaScript emission.
//!
//! Each instruction becomes two statements: a `const` holding a new
//! `google.maps.Polyline` and a `setMap` call binding it to the map. Blocks
//! are separated by a single newline and the script has no trailing newline.

use super::Emitter;
use crate::instruction::{CompiledInstruction, DashIcon};
use crate::LatLng;

/// Emits statements for the Google Maps JavaScript API
#[derive(Debug, Clone, Copy, Default)]
pub struct GoogleMapsJsEmitter;

impl Emitter for GoogleMapsJsEmitter {
    fn emit_all(&self, instructions: &[CompiledInstruction]) -> String {
        instructions
            .iter()
            .map(emit_instruction)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Emit the construction and attachment statements for one instruction
pub fn emit_instruction(instr: &CompiledInstruction) -> String {
    let style = &instr.style;
    let icons = match &instr.dash {
        Some(dash) => format!(",\n  icons: [{}]", js_dash_icon(dash)),
        None => String::new(),
    };
    format!(
        "const {id} = new google.maps.Polyline({{\n  path: {path},\n  strokeColor: {color},\n  strokeOpacity: {opacity},\n  strokeWeight: {weight},\n  zIndex: {z}{icons}\n}});\n{id}.setMap({map});",
        id = instr.id,
        path = js_path(&instr.path),
        color = js_string(&style.color),
        opacity = js_number(style.opacity),
        weight = js_number(style.weight),
        z = style.z_index,
        icons = icons,
        map = instr.attach_to,
    )
}

fn js_path(points: &[LatLng]) -> String {
    let inner = points
        .iter()
        .map(|p| format!("{{lat: {}, lng: {}}}", js_number(p.lat), js_number(p.lng)))
        .collect::<Vec<_>>()
        .join(", ");
    format!("[{}]", inner)
}

fn js_dash_icon(dash: &DashIcon) -> String {
    format!(
        "{{icon: {{path: {}, strokeOpacity: {}, scale: {}}}, offset: {}, repeat: {}}}",
        js_string(&dash.path),
        js_number(dash.stroke_opacity),
        js_number(dash.scale),
        js_string(&dash.offset),
        js_string(&format!("{}px", dash.repeat_px)),
    )
}

/// Format a number as a JS literal.
///
/// Finite values use Rust's shortest round-trip form, which is also valid
/// JS (`4`, `0.8`, `-0.5`). Non-finite values map to the JS globals.
pub fn js_number(v: f64) -> String {
    if v.is_nan() {
        "NaN".to_string()
    } else if v == f64::INFINITY {
        "Infinity".to_string()
    } else if v == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else {
        format!("{}", v)
    }
}

/// Quote a string as a JS string literal (JSON quoting is a subset of JS)
pub fn js_string(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| String::from("\"\""))
}
