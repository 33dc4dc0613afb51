//! Family tree input model
//!
//! The document a family edits (persons, spouses, children), the
//! collapsed-generation view state, and pure operations on the tree.

mod hidden;
mod model;
mod ops;

pub use hidden::HiddenGenerations;
pub use model::{spouse_node_id, PersonNode, SpouseRecord};
pub use ops::{
    add_child, branch, duplicate_ids, find_person, find_person_mut, remove_person, stats,
    TreeStats,
};
