//! JSON emission for hosts that build overlays with a native map SDK.

use super::Emitter;
use crate::instruction::CompiledInstruction;

/// Emits the instruction list as a JSON array
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonEmitter {
    pub pretty: bool,
}

impl Emitter for JsonEmitter {
    fn emit_all(&self, instructions: &[CompiledInstruction]) -> String {
        // Non-finite coordinates serialize as null; serialization itself
        // cannot fail for these types.
        let res = if self.pretty {
            serde_json::to_string_pretty(instructions)
        } else {
            serde_json::to_string(instructions)
        };
        res.unwrap_or_else(|_| String::from("[]"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Compiler, LatLng, RouteSegment};

    #[test]
    fn empty_input_is_empty_array() {
        assert_eq!(JsonEmitter::default().emit_all(&[]), "[]");
    }

    #[test]
    fn json_carries_resolved_fields() {
        let segs = vec![
            RouteSegment::new(vec![LatLng::new(1.0, 2.0)], "#00FF00"),
            RouteSegment::new(vec![], "blue").with_dash_array("5,5").with_opacity(0.8),
        ];
        let instrs = Compiler::default().compile_instructions(&segs).unwrap();
        let text = JsonEmitter::default().emit_all(&instrs);
        let v: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(v[0]["id"], "polyline0");
        assert_eq!(v[0]["style"]["weight"], 4.0);
        assert_eq!(v[0]["path"][0]["lng"], 2.0);
        assert!(v[0].get("dash").is_none());
        assert_eq!(v[1]["style"]["opacity"], 0.0);
        assert_eq!(v[1]["dash"]["repeatPx"], 15);
        assert_eq!(v[1]["attachTo"], "map");
    }
}
