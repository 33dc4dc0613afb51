//! Layout configuration
//!
//! Box sizes and gaps are fixed per run; text never resizes a box, long names
//! are truncated by whoever draws the tree.

use serde::{Deserialize, Serialize};

use super::LayoutError;

/// Width of a person (or spouse) box
pub const PERSON_WIDTH: f64 = 250.0;
/// Height of a person (or spouse) box
pub const PERSON_HEIGHT: f64 = 140.0;
/// Space between a generation's bottom edge and the next generation's top edge
pub const VERTICAL_GAP: f64 = 180.0;
/// Space between a person and their spouse
pub const HORIZONTAL_GAP: f64 = 100.0;
/// Space between sibling subtrees
pub const BRANCH_GAP: f64 = 200.0;
/// Length of the stub drawn under a collapsed generation
pub const HIDDEN_STUB_LENGTH: f64 = 50.0;
/// Padding around the node bounding box
pub const BOUNDARY_PADDING: f64 = 80.0;
/// Deepest generation a JSON family document can carry
///
/// serde_json stops at 128 nesting levels and every generation takes two of
/// them (the person object and its `children` array), with one more for a
/// spouse object or an empty `children` list on the last generation.
pub const MAX_DOCUMENT_DEPTH: usize = 62;
/// Generation limit before the layout refuses the tree
pub const DEFAULT_MAX_DEPTH: usize = MAX_DOCUMENT_DEPTH;

/// Geometry and limits used by [`crate::layout::FamilyTreeLayout`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    pub person_width: f64,
    pub person_height: f64,
    pub vertical_gap: f64,
    pub horizontal_gap: f64,
    pub branch_gap: f64,
    pub hidden_stub_length: f64,
    pub boundary_padding: f64,
    /// Viewport reported for an empty layout
    pub empty_width: f64,
    pub empty_height: f64,
    /// Deepest generation (0-based) that may be laid out
    pub max_depth: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            person_width: PERSON_WIDTH,
            person_height: PERSON_HEIGHT,
            vertical_gap: VERTICAL_GAP,
            horizontal_gap: HORIZONTAL_GAP,
            branch_gap: BRANCH_GAP,
            hidden_stub_length: HIDDEN_STUB_LENGTH,
            boundary_padding: BOUNDARY_PADDING,
            empty_width: 800.0,
            empty_height: 600.0,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl LayoutConfig {
    /// Create a config with the default geometry
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the generation limit
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Parse a config from JSON; missing fields keep their defaults
    pub fn from_json(input: &str) -> Result<Self, LayoutError> {
        let config: Self = serde_json::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Width of a couple: two boxes and the gap between them
    pub fn couple_width(&self) -> f64 {
        2.0 * self.person_width + self.horizontal_gap
    }

    /// Vertical distance between two generations
    pub fn row_height(&self) -> f64 {
        self.person_height + self.vertical_gap
    }

    /// Check that every size is usable
    pub fn validate(&self) -> Result<(), LayoutError> {
        let positive = [
            ("personWidth", self.person_width),
            ("personHeight", self.person_height),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(LayoutError::invalid_config(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }

        let non_negative = [
            ("verticalGap", self.vertical_gap),
            ("horizontalGap", self.horizontal_gap),
            ("branchGap", self.branch_gap),
            ("hiddenStubLength", self.hidden_stub_length),
            ("boundaryPadding", self.boundary_padding),
            ("emptyWidth", self.empty_width),
            ("emptyHeight", self.empty_height),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(LayoutError::invalid_config(format!(
                    "{} must be zero or positive, got {}",
                    name, value
                )));
            }
        }

        if self.max_depth == 0 {
            return Err(LayoutError::invalid_config("maxDepth must be at least 1"));
        }
        if self.max_depth > MAX_DOCUMENT_DEPTH {
            return Err(LayoutError::invalid_config(format!(
                "maxDepth must be at most {}, got {}",
                MAX_DOCUMENT_DEPTH, self.max_depth
            )));
        }

        Ok(())
    }
}
