//! Routeline
//!
//! Compiles route segments into self-contained overlay scripts for an
//! embedded map view, typically a Google Maps JS surface hosted in a WebView.
//!
//! # Features
//!
//! - **Pure compilation**: no I/O and no shared state; output depends only on
//!   the input segments and the [`CompilerConfig`]
//! - **Structured first**: segments resolve into [`CompiledInstruction`]
//!   values before any text is produced
//! - **Script sandbox** (`jscheck`, default): evaluate compiled scripts
//!   against a stub map with `boa_engine`
//!
//! # Example
//!
//! ```
//! use routeline::{LatLng, RouteSegment};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let segments = vec![
//!     RouteSegment::new(vec![LatLng::new(1.0, 2.0), LatLng::new(3.0, 4.0)], "#FF0000"),
//! ];
//! let script = routeline::compile(&segments)?;
//! assert!(script.as_str().contains("strokeColor: \"#FF0000\""));
//! assert!(script.as_str().ends_with("polyline0.setMap(map);"));
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::Path;

pub mod error;
pub use error::{Error, Result};

pub mod compiler;
pub mod emit;
pub mod instruction;
pub mod segment;

// Stub map surface for executing compiled scripts (boa_engine)
#[cfg(feature = "jscheck")]
pub mod sandbox;

pub use compiler::Compiler;
pub use emit::{new_emitter, Emitter, OutputFormat};
pub use instruction::{CompiledInstruction, DashIcon, StrokeStyle};
pub use segment::{segments_from_json, LatLng, RouteSegment};

/// Configuration for the compiler
///
/// The defaults reproduce the stock overlay script: overlays named
/// `polyline0`, `polyline1`, ... attached to a global `map`, with dashed
/// lines drawn as a short vertical stroke repeated every 15px.
///
/// Any field may be omitted from a JSON config file.
///
/// # Examples
///
/// ```
/// let cfg = routeline::CompilerConfig::default();
/// assert_eq!(cfg.map_variable, "map");
/// assert_eq!(cfg.dash_repeat_px, 15);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompilerConfig {
    /// Binding of the active map in the script's execution context. May be a
    /// dotted path such as `window.routeMap`.
    pub map_variable: String,
    /// Prefix for per-segment identifiers; the segment index is appended
    pub id_prefix: String,
    /// Path of a single dash mark
    pub dash_path: String,
    /// Scale applied to the dash mark
    pub dash_scale: f64,
    /// Spacing between dash marks in pixels
    pub dash_repeat_px: u32,
    /// Offset of the first dash mark along the line
    pub dash_offset: String,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            map_variable: "map".to_string(),
            id_prefix: "polyline".to_string(),
            dash_path: "M 0,-1 0,1".to_string(),
            dash_scale: 4.0,
            dash_repeat_px: 15,
            dash_offset: "0".to_string(),
        }
    }
}

impl CompilerConfig {
    /// Check that the config yields an executable script
    pub fn validate(&self) -> Result<()> {
        if !self.map_variable.split('.').all(is_js_identifier) {
            return Err(Error::ConfigError(format!(
                "map_variable '{}' is not a JS identifier path",
                self.map_variable
            )));
        }
        if !is_js_identifier(&self.id_prefix) {
            return Err(Error::ConfigError(format!(
                "id_prefix '{}' is not a JS identifier",
                self.id_prefix
            )));
        }
        let root = self.map_variable.split('.').next().unwrap_or_default();
        if self.is_overlay_id(root) {
            return Err(Error::ConfigError(format!(
                "map_variable '{}' collides with overlay ids '{}<n>'",
                self.map_variable, self.id_prefix
            )));
        }
        if HOST_GLOBALS.contains(&root) {
            return Err(Error::ConfigError(format!(
                "map_variable '{}' shadows the host global '{}'",
                self.map_variable, root
            )));
        }
        if self.dash_repeat_px == 0 {
            return Err(Error::ConfigError("dash_repeat_px must be positive".to_string()));
        }
        if !self.dash_scale.is_finite() || self.dash_scale <= 0.0 {
            return Err(Error::ConfigError(format!(
                "dash_scale must be a positive number, got {}",
                self.dash_scale
            )));
        }
        Ok(())
    }

    // True when `name` has the shape of an emitted overlay identifier.
    fn is_overlay_id(&self, name: &str) -> bool {
        name.strip_prefix(self.id_prefix.as_str())
            .is_some_and(|rest| !rest.is_empty() && rest.chars().all(|c| c.is_ascii_digit()))
    }

    /// Load a (possibly partial) JSON config, filling gaps with defaults
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let cfg: CompilerConfig = serde_json::from_str(&text)?;
        cfg.validate()?;
        Ok(cfg)
    }
}

const JS_RESERVED: &[&str] = &[
    "break", "case", "catch", "class", "const", "continue", "debugger", "default", "delete", "do",
    "else", "enum", "export", "extends", "false", "finally", "for", "function", "if", "import", "in",
    "instanceof", "let", "new", "null", "return", "super", "switch", "this", "throw", "true", "try",
    "typeof", "var", "void", "while", "with", "yield",
];

// Globals the overlay script and the script sandbox rely on.
const HOST_GLOBALS: &[&str] = &["google", "__routeline_overlays", "__routeline_map"];

fn is_js_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    let head_ok = matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$');
    head_ok
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        && !JS_RESERVED.contains(&s)
}

/// A compiled overlay script
///
/// Wraps the emitted text; empty when there were no segments.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Script {
    text: String,
}

impl Script {
    pub fn new(text: String) -> Self {
        Self { text }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Hex SHA-256 of the script text. Hosts can compare fingerprints to
    /// skip re-injecting an unchanged script.
    pub fn fingerprint(&self) -> String {
        hex::encode(Sha256::digest(self.text.as_bytes()))
    }
}

impl std::fmt::Display for Script {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

impl From<Script> for String {
    fn from(s: Script) -> Self {
        s.text
    }
}

/// Compile segments into a Google Maps JS script with the default config
///
/// Returns an empty script for empty input. Fails only when a segment has
/// no color.
pub fn compile(segments: &[RouteSegment]) -> Result<Script> {
    Compiler::default().compile(segments)
}
