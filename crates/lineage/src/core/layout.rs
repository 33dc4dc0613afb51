//! Core layout trait for tree positioning

use super::LayoutError;

/// Core trait for layout algorithms
///
/// A layout algorithm turns an input structure into positioned output. The
/// output is recomputed from scratch on every call; implementations keep no
/// state between calls.
///
/// # Example
/// ```
/// use lineage::core::LayoutAlgorithm;
/// use lineage::family::{HiddenGenerations, PersonNode};
/// use lineage::layout::{FamilyTreeLayout, LayoutRequest};
///
/// let root = PersonNode::new("root-1", "Ada");
/// let hidden = HiddenGenerations::new();
/// let layout = FamilyTreeLayout::new();
/// let positioned = layout.layout(&LayoutRequest::new(Some(&root), &hidden)).unwrap();
/// assert_eq!(positioned.nodes.len(), 1);
/// ```
pub trait LayoutAlgorithm<I: ?Sized>: Send + Sync {
    /// The output type of this layout algorithm
    type Output;

    /// Arrange the input using this layout algorithm
    fn layout(&self, input: &I) -> Result<Self::Output, LayoutError>;

    /// Get the name of this layout algorithm
    fn name(&self) -> &'static str;

    /// Get the version of this layout algorithm
    fn version(&self) -> &'static str;

    /// Get the layout direction (TB, LR, ...)
    fn direction(&self) -> &'static str;
}
