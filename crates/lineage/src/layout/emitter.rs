//! Node and connector emission
//!
//! Walks the tree top-down. Each person is centred in the slot its parent
//! gives it, generations sit on a fixed vertical grid, and the connectors
//! between a family and its children run through a junction row halfway
//! down the vertical gap:
//!
//! ```text
//!   [person]---[spouse]
//!       |          |
//!       +----+-----+          two parents join first
//!            |  <- toggle
//!   +--------+--------+       junction row
//!   |                 |
//! [child]          [child]
//! ```

use std::collections::HashSet;

use tracing::{trace, warn};

use super::width::{calculate_node_width, row_width};
use crate::core::{
    Connection, LayoutConfig, LayoutNode, LayoutWarning, NodeKind, Segment, ToggleAnchor,
    TreeLayout,
};
use crate::family::{HiddenGenerations, PersonNode};

/// Horizontal slot a parent hands to one child
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slot {
    pub left: f64,
    pub width: f64,
}

/// Where a subtree ended up, reported back to the parent call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub width: f64,
    pub center_x: f64,
}

/// Accumulates nodes and connections for one layout run
pub struct Emitter<'a> {
    config: &'a LayoutConfig,
    hidden: &'a HiddenGenerations,
    nodes: Vec<LayoutNode>,
    connections: Vec<Connection>,
    warnings: Vec<LayoutWarning>,
    segments: HashSet<[u64; 4]>,
    ids: HashSet<String>,
}

impl<'a> Emitter<'a> {
    pub fn new(config: &'a LayoutConfig, hidden: &'a HiddenGenerations) -> Self {
        Self {
            config,
            hidden,
            nodes: Vec::new(),
            connections: Vec::new(),
            warnings: Vec::new(),
            segments: HashSet::new(),
            ids: HashSet::new(),
        }
    }

    /// Place `node` and everything visible below it
    ///
    /// `slot` is `None` for the root, which is anchored at x = 0.
    pub fn process_node(&mut self, node: &PersonNode, level: usize, slot: Option<Slot>) -> Placement {
        let config = self.config;
        if !node.has_id() {
            return Placement {
                width: config.person_width,
                center_x: 0.0,
            };
        }

        let node_width = calculate_node_width(Some(node), self.hidden, config);
        let person_x = match slot {
            None => 0.0,
            Some(slot) => slot.left + (slot.width - config.person_width) / 2.0,
        };
        let person_y = level as f64 * config.row_height();
        let is_hidden = self.hidden.is_hidden(&node.id);
        let has_children = node.has_valid_children();

        trace!(id = %node.id, level, x = person_x, y = person_y, width = node_width, "Placing person");

        if !self.ids.insert(node.id.clone()) {
            warn!(id = %node.id, "Duplicate person id");
            self.warnings.push(LayoutWarning::DuplicateId {
                id: node.id.clone(),
            });
        }

        self.nodes.push(LayoutNode {
            id: node.id.clone(),
            kind: NodeKind::Person,
            name: node.name.clone(),
            gender: node.gender,
            photo: node.photo.clone(),
            life_years: node.life_years.clone(),
            x: person_x,
            y: person_y,
            width: config.person_width,
            height: config.person_height,
            level,
            has_hidden_generation: is_hidden && has_children,
            has_children,
        });

        let mid_y = person_y + config.person_height / 2.0;
        let spouse_x = node.spouse.as_ref().map(|spouse| {
            let spouse_x = person_x + config.person_width + config.horizontal_gap;
            self.nodes.push(LayoutNode {
                id: node.spouse_id(),
                kind: NodeKind::Spouse,
                name: spouse.name.clone(),
                gender: spouse.gender,
                photo: spouse.photo.clone(),
                life_years: spouse.life_years.clone(),
                x: spouse_x,
                y: person_y,
                width: config.person_width,
                height: config.person_height,
                level,
                has_hidden_generation: is_hidden && has_children,
                has_children,
            });
            self.push(Connection::Couple {
                segment: Segment::new(person_x + config.person_width, mid_y, spouse_x, mid_y),
                node_id: node.id.clone(),
            });
            spouse_x
        });

        let person_center = person_x + config.person_width / 2.0;
        let center_x = match spouse_x {
            Some(spouse_x) => (person_center + spouse_x + config.person_width / 2.0) / 2.0,
            None => person_center,
        };

        if has_children {
            let parent_bottom = person_y + config.person_height;
            if is_hidden {
                let stub_end = parent_bottom + config.hidden_stub_length;
                self.push(Connection::HiddenGeneration {
                    segment: Segment::new(center_x, parent_bottom, center_x, stub_end),
                    node_id: node.id.clone(),
                    toggle: ToggleAnchor {
                        x: center_x,
                        y: stub_end,
                    },
                });
            } else {
                let children = self.visible_children(node);
                self.emit_children(node, &children, level, center_x, person_x, spouse_x);
            }
        }

        Placement {
            width: node_width,
            center_x,
        }
    }

    /// Valid children in order, recording a warning for each skipped entry
    fn visible_children<'n>(&mut self, node: &'n PersonNode) -> Vec<&'n PersonNode> {
        let mut children = Vec::with_capacity(node.children.len());
        for (index, child) in node.children.iter().enumerate() {
            match child {
                Some(child) if child.has_id() => children.push(child),
                Some(_) => {
                    warn!(parent_id = %node.id, index, "Skipping child without id");
                    self.warnings.push(LayoutWarning::MissingId {
                        parent_id: node.id.clone(),
                        index,
                    });
                }
                None => {
                    warn!(parent_id = %node.id, index, "Skipping null child");
                    self.warnings.push(LayoutWarning::NullChild {
                        parent_id: node.id.clone(),
                        index,
                    });
                }
            }
        }
        children
    }

    fn emit_children(
        &mut self,
        node: &PersonNode,
        children: &[&PersonNode],
        level: usize,
        center_x: f64,
        person_x: f64,
        spouse_x: Option<f64>,
    ) {
        let config = self.config;
        let widths: Vec<f64> = children
            .iter()
            .map(|&child| calculate_node_width(Some(child), self.hidden, config))
            .collect();
        let total_width = row_width(&widths, config.branch_gap);

        let parent_bottom = level as f64 * config.row_height() + config.person_height;
        let junction_y = parent_bottom + config.vertical_gap / 2.0;
        let child_y = (level + 1) as f64 * config.row_height();

        let drop = match spouse_x {
            Some(spouse_x) => {
                let join_y = parent_bottom + config.vertical_gap / 4.0;
                let person_center = person_x + config.person_width / 2.0;
                let spouse_center = spouse_x + config.person_width / 2.0;
                for segment in [
                    Segment::new(person_center, parent_bottom, person_center, join_y),
                    Segment::new(spouse_center, parent_bottom, spouse_center, join_y),
                    Segment::new(person_center, join_y, spouse_center, join_y),
                ] {
                    self.push(Connection::ParentJunction {
                        segment,
                        node_id: node.id.clone(),
                        toggle: None,
                    });
                }
                Segment::new(center_x, join_y, center_x, junction_y)
            }
            None => Segment::new(center_x, parent_bottom, center_x, junction_y),
        };
        let (toggle_x, toggle_y) = drop.midpoint();
        self.push(Connection::ParentJunction {
            segment: drop,
            node_id: node.id.clone(),
            toggle: Some(ToggleAnchor {
                x: toggle_x,
                y: toggle_y,
            }),
        });

        let start_x = center_x - total_width / 2.0;
        if let (Some(first), Some(last)) = (widths.first(), widths.last()) {
            let first_center = start_x + first / 2.0;
            let last_center = start_x + total_width - last / 2.0;
            if first_center != last_center {
                self.push(Connection::ParentJunction {
                    segment: Segment::new(first_center, junction_y, last_center, junction_y),
                    node_id: node.id.clone(),
                    toggle: None,
                });
            }
        }

        let mut cursor = start_x;
        for (child, width) in children.iter().zip(widths) {
            let slot_center = cursor + width / 2.0;
            self.push(Connection::ChildConnection {
                segment: Segment::new(slot_center, junction_y, slot_center, child_y),
                node_id: node.id.clone(),
            });
            self.process_node(
                child,
                level + 1,
                Some(Slot {
                    left: cursor,
                    width,
                }),
            );
            cursor += width + config.branch_gap;
        }
    }

    /// Append a connection unless an identical segment was already drawn
    fn push(&mut self, connection: Connection) {
        let s = connection.segment();
        // + 0.0 folds -0.0 into 0.0 so equal coordinates hash alike
        let key = [s.x1, s.y1, s.x2, s.y2].map(|v| (v + 0.0).to_bits());
        if self.segments.insert(key) {
            self.connections.push(connection);
        } else {
            trace!(kind = %connection.kind(), node_id = connection.node_id(), "Skipping duplicate segment");
        }
    }

    pub fn finish(self) -> TreeLayout {
        TreeLayout {
            nodes: self.nodes,
            connections: self.connections,
            warnings: self.warnings,
        }
    }
}
