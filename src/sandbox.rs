//! Script sandbox: runs a compiled overlay script in `boa_engine` against a
//! stub `google.maps.Polyline` and a stub map, then reports what was drawn.

use crate::{CompilerConfig, Error, Result};
use log::debug;
use serde::Deserialize;

// Installed before the script runs. Every constructed polyline is recorded
// together with the map it was last attached to.
const STUB_PRELUDE: &str = r#"
var __routeline_overlays = [];
globalThis.google = { maps: {} };
google.maps.Polyline = function (opts) {
  if (!(this instanceof google.maps.Polyline)) {
    throw new TypeError("google.maps.Polyline must be called with new");
  }
  this.opts = opts || {};
  this.map = null;
  __routeline_overlays.push(this);
};
google.maps.Polyline.prototype.setMap = function (m) { this.map = m; };
"#;

const COLLECT_EXPR: &str = r#"JSON.stringify(__routeline_overlays.map(function (p) {
  var o = p.opts;
  return {
    path: o.path || [],
    strokeColor: o.strokeColor,
    strokeOpacity: o.strokeOpacity,
    strokeWeight: o.strokeWeight,
    zIndex: o.zIndex,
    icons: (o.icons || []).map(function (i) {
      var g = i.icon || {};
      return { path: g.path, strokeOpacity: g.strokeOpacity, scale: g.scale, offset: i.offset, repeat: i.repeat };
    }),
    attached: p.map === __routeline_map
  };
}))"#;

/// A polyline as seen by the stub map after the script ran
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedOverlay {
    #[serde(default)]
    pub path: Vec<RenderedPoint>,
    pub stroke_color: Option<String>,
    pub stroke_opacity: Option<f64>,
    pub stroke_weight: Option<f64>,
    pub z_index: Option<i64>,
    #[serde(default)]
    pub icons: Vec<RenderedIcon>,
    /// Whether `setMap` bound the overlay to the active map
    pub attached: bool,
}

/// A point as passed to the constructor. Non-finite values come back as `None`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct RenderedPoint {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

/// One entry of the `icons` option, flattened
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedIcon {
    pub path: Option<String>,
    pub stroke_opacity: Option<f64>,
    pub scale: Option<f64>,
    pub offset: Option<String>,
    pub repeat: Option<String>,
}

/// Evaluates compiled scripts in a fresh JS context per run
#[derive(Debug, Clone)]
pub struct MapSandbox {
    map_variable: String,
    /// Maximum loop iterations before the engine throws (0 => disabled)
    pub loop_iteration_limit: u64,
    /// Maximum recursion depth before the engine throws
    pub recursion_limit: usize,
}

impl MapSandbox {
    /// Create a sandbox whose stub map is bound where `config` expects it
    pub fn new(config: &CompilerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            map_variable: config.map_variable.clone(),
            loop_iteration_limit: 1_000_000,
            recursion_limit: 1024,
        })
    }

    /// Run `script` and return the overlays it constructed, in creation order
    pub fn run(&self, script: &str) -> Result<Vec<RenderedOverlay>> {
        let mut ctx = boa_engine::Context::default();
        if self.loop_iteration_limit > 0 {
            ctx.runtime_limits_mut().set_loop_iteration_limit(self.loop_iteration_limit);
        }
        ctx.runtime_limits_mut().set_recursion_limit(self.recursion_limit);

        let setup = format!("{}{}", STUB_PRELUDE, self.map_binding());
        eval(&mut ctx, &setup).map_err(|e| Error::Other(format!("sandbox setup failed: {}", e)))?;
        eval(&mut ctx, script)?;

        let collected = eval(&mut ctx, COLLECT_EXPR)?;
        let json = collected
            .as_string()
            .map(|s| s.to_std_string_escaped())
            .ok_or_else(|| Error::ScriptError("overlay collection did not return a string".to_string()))?;
        let overlays: Vec<RenderedOverlay> = serde_json::from_str(&json)?;
        debug!("sandbox recorded {} overlay(s)", overlays.len());
        Ok(overlays)
    }

    // Creates every object along a dotted path and binds the stub map at its
    // end. The map is also kept under a private name so that attachment is
    // judged against the original stub even if the script rebinds the path.
    fn map_binding(&self) -> String {
        let parts: Vec<&str> = self.map_variable.split('.').collect();
        let mut out = String::from("var __routeline_map = { __routelineMap: true };\n");
        for i in 1..parts.len() {
            let p = parts[..i].join(".");
            out.push_str(&format!("globalThis.{p} = globalThis.{p} || {{}};\n"));
        }
        out.push_str(&format!("globalThis.{} = __routeline_map;\n", self.map_variable));
        out
    }
}

fn eval(ctx: &mut boa_engine::Context, code: &str) -> Result<boa_engine::JsValue> {
    ctx.eval(boa_engine::Source::from_bytes(code.as_bytes()))
        .map_err(|e| Error::ScriptError(format!("Script thrown: {}", e)))
}
