//! Lineage - lay out family trees for drawing
//!
//! Converts a recursive person/spouse/children document into absolute
//! coordinates for person boxes and the connector lines between them. The
//! output is meant for an SVG renderer; nothing here draws.
//!
//! # Quick Start
//!
//! ```rust
//! use lineage::{generate_tree_layout, get_boundaries};
//! use lineage::family::{HiddenGenerations, PersonNode, SpouseRecord};
//!
//! let root = PersonNode::new("root-1", "Ivan")
//!     .with_spouse(SpouseRecord::new("Olga"))
//!     .with_child(PersonNode::new("c-1", "Petro"));
//!
//! let layout = generate_tree_layout(Some(&root), &HiddenGenerations::new()).unwrap();
//! assert_eq!(layout.nodes.len(), 3);
//!
//! let viewport = get_boundaries(&layout);
//! assert!(layout.nodes.iter().all(|n| viewport.contains(n)));
//! ```
//!
//! # From JSON
//!
//! ```rust
//! let json = r#"{"id": "root-1", "name": "A", "gender": "male", "spouse": null, "children": []}"#;
//! let layout = lineage::layout_from_json(json, None).unwrap();
//! assert_eq!(layout.nodes[0].id, "root-1");
//! ```

pub mod core;
pub mod family;
pub mod layout;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use crate::core::*;
pub use crate::layout::{generate_tree_layout, get_boundaries, FamilyTreeLayout, LayoutRequest};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::{
        Boundaries, Connection, ConnectionKind, Gender, LayoutAlgorithm, LayoutConfig,
        LayoutError, LayoutNode, LayoutWarning, NodeKind, Segment, ToggleAnchor, TreeLayout,
    };
    pub use crate::family::{HiddenGenerations, PersonNode, SpouseRecord};
    pub use crate::layout::{generate_tree_layout, get_boundaries, FamilyTreeLayout};
}

/// Parse a family document; JSON `null` means there is no tree yet
///
/// Documents nested past [`MAX_DOCUMENT_DEPTH`] generations fail with
/// [`LayoutError::DocumentTooDeep`].
///
/// ```rust
/// assert!(lineage::parse_tree("null").unwrap().is_none());
/// assert!(lineage::parse_tree(r#"{"id": "root-1"}"#).unwrap().is_some());
/// ```
pub fn parse_tree(input: &str) -> Result<Option<family::PersonNode>, LayoutError> {
    Ok(serde_json::from_str(input)?)
}

/// Parse a family document and lay it out with the default geometry
///
/// `hidden` is the UI's `{ personId: bool }` map as JSON, if any.
pub fn layout_from_json(tree: &str, hidden: Option<&str>) -> anyhow::Result<TreeLayout> {
    let tree = parse_tree(tree)?;
    let hidden = match hidden {
        Some(hidden) => family::HiddenGenerations::from_json(hidden)?,
        None => family::HiddenGenerations::new(),
    };
    Ok(generate_tree_layout(tree.as_ref(), &hidden)?)
}
