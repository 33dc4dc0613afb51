//! Subtree width estimation
//!
//! A subtree is never narrower than its own couple, but widens to fit all of
//! its visible children side by side with a fixed gap between them.

use crate::core::LayoutConfig;
use crate::family::{HiddenGenerations, PersonNode};

/// Horizontal footprint of `node` and everything drawn below it
///
/// A missing node measures as a single person box. Children of a collapsed
/// generation are not counted, and `null` or id-less children take no slot
/// and no gap.
pub fn calculate_node_width(
    node: Option<&PersonNode>,
    hidden: &HiddenGenerations,
    config: &LayoutConfig,
) -> f64 {
    let Some(node) = node else {
        return config.person_width;
    };
    if !node.has_id() {
        return config.person_width;
    }

    let own = if node.has_spouse() {
        config.couple_width()
    } else {
        config.person_width
    };

    if hidden.is_hidden(&node.id) {
        return own;
    }

    let widths: Vec<f64> = node
        .valid_children()
        .map(|child| calculate_node_width(Some(child), hidden, config))
        .collect();

    if widths.is_empty() {
        return own;
    }

    own.max(row_width(&widths, config.branch_gap))
}

/// Width of slots placed side by side with `gap` between neighbours
pub fn row_width(widths: &[f64], gap: f64) -> f64 {
    let gaps = widths.len().saturating_sub(1) as f64 * gap;
    widths.iter().sum::<f64>() + gaps
}
