//! Viewport boundaries of a finished layout

use crate::core::{Boundaries, LayoutConfig, LayoutNode};

/// Padded bounding box over `nodes`
///
/// An empty layout reports the configured default viewport at the origin.
pub fn calculate_boundaries(nodes: &[LayoutNode], config: &LayoutConfig) -> Boundaries {
    let Some(first) = nodes.first() else {
        return Boundaries {
            min_x: 0.0,
            min_y: 0.0,
            width: config.empty_width,
            height: config.empty_height,
        };
    };

    let (min_x, min_y, max_x, max_y) = nodes.iter().fold(
        (first.x, first.y, first.right(), first.bottom()),
        |(min_x, min_y, max_x, max_y), node| {
            (
                min_x.min(node.x),
                min_y.min(node.y),
                max_x.max(node.right()),
                max_y.max(node.bottom()),
            )
        },
    );

    let padding = config.boundary_padding;
    Boundaries {
        min_x: min_x - padding,
        min_y: min_y - padding,
        width: (max_x - min_x) + 2.0 * padding,
        height: (max_y - min_y) + 2.0 * padding,
    }
}
