//! Output emitters: turn resolved instructions into text for a host.

pub mod js;
pub mod json;

pub use js::GoogleMapsJsEmitter;
pub use json::JsonEmitter;

use crate::instruction::CompiledInstruction;
use serde::{Deserialize, Serialize};

/// Serializes resolved instructions into a host-specific text form.
///
/// Implementations must be pure: the same instructions always produce the
/// same bytes.
pub trait Emitter: Send + Sync {
    fn emit_all(&self, instructions: &[CompiledInstruction]) -> String;
}

/// Output formats understood by [`new_emitter`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// Google Maps JavaScript API statements, for a WebView-hosted map
    #[default]
    GoogleMapsJs,
    /// JSON array of instructions, for hosts that draw overlays natively
    Json,
}

/// Create the emitter for `format`
pub fn new_emitter(format: OutputFormat) -> Box<dyn Emitter> {
    match format {
        OutputFormat::GoogleMapsJs => Box::new(GoogleMapsJsEmitter),
        OutputFormat::Json => Box::new(JsonEmitter::default()),
    }
}
