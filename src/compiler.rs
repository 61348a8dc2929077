//! Resolves route segments into overlay instructions and emits them.
//!
//! Field resolution and text emission are separate steps:
//! [`Compiler::compile_instructions`] produces [`CompiledInstruction`] values
//! whose defaults, dash handling and identifiers can be inspected directly,
//! and an [`Emitter`] turns them into text last.

use crate::emit::{Emitter, GoogleMapsJsEmitter};
use crate::instruction::{CompiledInstruction, DashIcon, StrokeStyle};
use crate::segment::{DEFAULT_OPACITY, DEFAULT_WEIGHT, DEFAULT_Z_INDEX};
use crate::{CompilerConfig, Error, Result, RouteSegment, Script};
use log::{debug, warn};

/// Stateless segment compiler
///
/// Holds only configuration, so one instance can be shared across threads
/// and reused for any number of inputs.
#[derive(Debug, Clone, Default)]
pub struct Compiler {
    config: CompilerConfig,
}

impl Compiler {
    /// Create a compiler after validating `config`
    pub fn new(config: CompilerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    /// Resolve every segment into a structured instruction.
    ///
    /// Validation runs over the whole input before anything is returned, so
    /// a bad segment never yields a partial result.
    pub fn compile_instructions(&self, segments: &[RouteSegment]) -> Result<Vec<CompiledInstruction>> {
        if let Some(index) = segments.iter().position(|s| s.color.trim().is_empty()) {
            return Err(Error::MissingColor { index });
        }

        let instructions: Vec<_> = segments
            .iter()
            .enumerate()
            .map(|(index, seg)| self.resolve(index, seg))
            .collect();

        debug!(
            "compiled {} segment(s), {} dashed, {} point(s)",
            instructions.len(),
            instructions.iter().filter(|i| i.is_dashed()).count(),
            instructions.iter().map(|i| i.path.len()).sum::<usize>()
        );
        Ok(instructions)
    }

    /// Compile with an explicit emitter
    pub fn compile_with(&self, segments: &[RouteSegment], emitter: &dyn Emitter) -> Result<Script> {
        let instructions = self.compile_instructions(segments)?;
        Ok(Script::new(emitter.emit_all(&instructions)))
    }

    /// Compile into a Google Maps JS script. Empty input gives an empty script.
    pub fn compile(&self, segments: &[RouteSegment]) -> Result<Script> {
        self.compile_with(segments, &GoogleMapsJsEmitter)
    }

    fn resolve(&self, index: usize, seg: &RouteSegment) -> CompiledInstruction {
        let dashed = seg.is_dashed();
        if dashed && seg.opacity.is_some() {
            warn!("segment {index}: opacity is ignored for dashed segments");
        }
        if seg.coordinates.len() < 2 {
            warn!("segment {index}: {} point(s), nothing visible will be drawn", seg.coordinates.len());
        }

        let opacity = if dashed {
            0.0
        } else {
            seg.opacity.unwrap_or(DEFAULT_OPACITY)
        };

        let dash = dashed.then(|| DashIcon {
            path: self.config.dash_path.clone(),
            stroke_opacity: 1.0,
            scale: self.config.dash_scale,
            offset: self.config.dash_offset.clone(),
            repeat_px: self.config.dash_repeat_px,
        });

        CompiledInstruction {
            index,
            id: format!("{}{}", self.config.id_prefix, index),
            path: seg.coordinates.clone(),
            style: StrokeStyle {
                color: seg.color.clone(),
                opacity,
                weight: seg.weight.unwrap_or(DEFAULT_WEIGHT),
                z_index: seg.z_index.unwrap_or(DEFAULT_Z_INDEX),
            },
            dash,
            attach_to: self.config.map_variable.clone(),
        }
    }
}
