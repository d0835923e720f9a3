//! Preview preferences
//!
//! Tunables for the per-frame preview pipeline. The host application owns
//! persistence and hands a copy to [`Pipeline`](crate::pipeline::Pipeline);
//! this crate only reads the values.

use serde::{Deserialize, Serialize};

/// Preview pipeline preferences that persist across sessions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewPrefs {
    // Rendering hints
    /// Surface layers the renderer peels for solids without a per-node hint
    pub default_depth_complexity: u32,

    // Safety limits
    /// Upper bound on working-set nodes per frame
    pub max_nodes: usize,
    /// Upper bound on scene nesting depth
    pub max_depth: usize,
}

impl Default for PreviewPrefs {
    fn default() -> Self {
        Self {
            default_depth_complexity: 1,
            max_nodes: 4096,
            max_depth: 64,
        }
    }
}

impl PreviewPrefs {
    /// Builder: set the fallback depth-complexity hint
    pub fn with_default_depth_complexity(mut self, layers: u32) -> Self {
        self.default_depth_complexity = layers;
        self
    }

    /// Builder: set the working-set node budget
    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = max_nodes;
        self
    }

    /// Builder: set the scene nesting limit
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let prefs = PreviewPrefs::default();
        assert_eq!(prefs.default_depth_complexity, 1);
        assert!(prefs.max_nodes >= 1024);
        assert!(prefs.max_depth >= 16);
    }

    #[test]
    fn builders_override_fields() {
        let prefs = PreviewPrefs::default()
            .with_default_depth_complexity(4)
            .with_max_nodes(128)
            .with_max_depth(8);
        assert_eq!(prefs.default_depth_complexity, 4);
        assert_eq!(prefs.max_nodes, 128);
        assert_eq!(prefs.max_depth, 8);
    }
}
