//! Family tree layout engine
//!
//! Turns a [`PersonNode`] tree and the set of collapsed generations into
//! positioned boxes and connector segments, top-down:
//!
//! 1. [`width`] measures how wide every visible subtree must be.
//! 2. [`emitter`] places each family in the slot its parent gives it and
//!    draws the connectors to its children.
//! 3. [`bounds`] pads the bounding box of the result for the viewport.
//!
//! Every call starts from scratch; nothing is cached between calls.

pub mod bounds;
pub mod emitter;
pub mod width;

use tracing::{debug, info, span, warn, Level};

use crate::core::{Boundaries, LayoutAlgorithm, LayoutConfig, LayoutError, LayoutWarning, TreeLayout};
use crate::family::{HiddenGenerations, PersonNode};

pub use bounds::calculate_boundaries;
pub use emitter::{Emitter, Placement, Slot};
pub use width::calculate_node_width;

/// Input of one layout run
#[derive(Debug, Clone, Copy)]
pub struct LayoutRequest<'a> {
    /// `None` when there is no tree yet
    pub tree: Option<&'a PersonNode>,
    pub hidden: &'a HiddenGenerations,
}

impl<'a> LayoutRequest<'a> {
    pub fn new(tree: Option<&'a PersonNode>, hidden: &'a HiddenGenerations) -> Self {
        Self { tree, hidden }
    }
}

/// Top-down family tree layout
#[derive(Debug, Clone, Default)]
pub struct FamilyTreeLayout {
    config: LayoutConfig,
}

impl FamilyTreeLayout {
    /// Layout with the default geometry
    pub fn new() -> Self {
        Self::default()
    }

    /// Layout with custom geometry
    pub fn with_config(config: LayoutConfig) -> Result<Self, LayoutError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Lay out `tree` with the generations in `hidden` collapsed
    ///
    /// An absent tree gives an empty layout. A root without an id gives an
    /// empty layout with a [`LayoutWarning::MalformedRoot`] warning.
    pub fn generate(
        &self,
        tree: Option<&PersonNode>,
        hidden: &HiddenGenerations,
    ) -> Result<TreeLayout, LayoutError> {
        let layout_span = span!(
            Level::INFO,
            "layout_family_tree",
            hidden_count = hidden.len(),
            max_depth = self.config.max_depth
        );
        let _enter = layout_span.enter();

        let Some(root) = tree else {
            debug!("No tree to lay out");
            return Ok(TreeLayout::default());
        };

        if !root.has_id() {
            warn!("Root person has no id, nothing to lay out");
            return Ok(TreeLayout {
                warnings: vec![LayoutWarning::MalformedRoot],
                ..TreeLayout::default()
            });
        }

        check_depth(root, hidden, self.config.max_depth)?;

        let mut emitter = Emitter::new(&self.config, hidden);
        let placement = emitter.process_node(root, 0, None);
        let layout = emitter.finish();

        info!(
            node_count = layout.nodes.len(),
            connection_count = layout.connections.len(),
            warning_count = layout.warnings.len(),
            width = placement.width,
            "Family tree layout completed"
        );

        Ok(layout)
    }

    /// Padded viewport around a layout produced with this geometry
    pub fn boundaries(&self, layout: &TreeLayout) -> Boundaries {
        calculate_boundaries(&layout.nodes, &self.config)
    }

    /// Footprint of one subtree with this geometry
    pub fn node_width(&self, node: Option<&PersonNode>, hidden: &HiddenGenerations) -> f64 {
        calculate_node_width(node, hidden, &self.config)
    }
}

impl<'a> LayoutAlgorithm<LayoutRequest<'a>> for FamilyTreeLayout {
    type Output = TreeLayout;

    fn layout(&self, input: &LayoutRequest<'a>) -> Result<Self::Output, LayoutError> {
        self.generate(input.tree, input.hidden)
    }

    fn name(&self) -> &'static str {
        "family-tree"
    }

    fn version(&self) -> &'static str {
        "0.1.0"
    }

    fn direction(&self) -> &'static str {
        "TB"
    }
}

/// Refuse trees whose visible part is deeper than `max_depth` generations
///
/// Walks with an explicit stack so that the check itself cannot exhaust the
/// call stack; the recursive passes only run once it has passed.
fn check_depth(
    root: &PersonNode,
    hidden: &HiddenGenerations,
    max_depth: usize,
) -> Result<(), LayoutError> {
    let mut stack = vec![(root, 0usize)];
    while let Some((node, level)) = stack.pop() {
        if level > max_depth {
            return Err(LayoutError::depth_exceeded(node.id.clone(), level, max_depth));
        }
        if hidden.is_hidden(&node.id) {
            continue;
        }
        stack.extend(node.valid_children().map(|child| (child, level + 1)));
    }
    Ok(())
}

/// Lay out a tree with the default geometry
///
/// ```rust
/// use lineage::family::{HiddenGenerations, PersonNode};
/// use lineage::layout::generate_tree_layout;
///
/// let root = PersonNode::new("root-1", "A");
/// let layout = generate_tree_layout(Some(&root), &HiddenGenerations::new()).unwrap();
/// assert_eq!(layout.nodes[0].width, 250.0);
/// ```
pub fn generate_tree_layout(
    tree: Option<&PersonNode>,
    hidden: &HiddenGenerations,
) -> Result<TreeLayout, LayoutError> {
    FamilyTreeLayout::new().generate(tree, hidden)
}

/// Padded viewport of a layout made with the default geometry
pub fn get_boundaries(layout: &TreeLayout) -> Boundaries {
    FamilyTreeLayout::new().boundaries(layout)
}
