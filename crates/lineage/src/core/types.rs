//! Output types of the tree layout
//!
//! These are what a renderer consumes: positioned boxes ([`LayoutNode`]),
//! straight connector segments ([`Connection`]) and a padded viewport
//! ([`Boundaries`]). Their JSON form uses camelCase keys so it can be handed
//! to a browser as-is.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::LayoutWarning;

/// Gender of a person or spouse, used by renderers to pick a box style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[default]
    Male,
    Female,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => write!(f, "male"),
            Gender::Female => write!(f, "female"),
        }
    }
}

/// Whether a box stands for a blood relative or their spouse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    #[default]
    Person,
    Spouse,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Person => write!(f, "person"),
            NodeKind::Spouse => write!(f, "spouse"),
        }
    }
}

/// A positioned box
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutNode {
    /// Person id, or `{personId}-spouse` for a spouse box
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub name: String,
    pub gender: Gender,
    pub photo: Option<String>,
    pub life_years: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Generation depth from the root, 0-based
    pub level: usize,
    pub has_hidden_generation: bool,
    pub has_children: bool,
}

impl LayoutNode {
    /// Horizontal centre of the box
    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    /// Right edge of the box
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge of the box
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// A straight line between two points
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Segment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl Segment {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn is_vertical(&self) -> bool {
        self.x1 == self.x2
    }

    pub fn is_horizontal(&self) -> bool {
        self.y1 == self.y2
    }

    /// Point halfway along the segment
    pub fn midpoint(&self) -> (f64, f64) {
        ((self.x1 + self.x2) / 2.0, (self.y1 + self.y2) / 2.0)
    }
}

/// Where a renderer places the collapse/expand button of a generation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToggleAnchor {
    pub x: f64,
    pub y: f64,
}

/// Discriminant of a [`Connection`], serialized as its `type`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConnectionKind {
    Couple,
    ParentJunction,
    ChildConnection,
    HiddenGeneration,
}

impl fmt::Display for ConnectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionKind::Couple => write!(f, "couple"),
            ConnectionKind::ParentJunction => write!(f, "parent-junction"),
            ConnectionKind::ChildConnection => write!(f, "child-connection"),
            ConnectionKind::HiddenGeneration => write!(f, "hidden-generation"),
        }
    }
}

/// A connector line
///
/// `node_id` is the person whose family the line belongs to; renderers use
/// it for hover highlighting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "ConnectionRecord", try_from = "ConnectionRecord")]
pub enum Connection {
    /// Horizontal line between a person and their spouse
    Couple { segment: Segment, node_id: String },
    /// Line from the parent(s) down to the junction row, or along it
    ParentJunction {
        segment: Segment,
        node_id: String,
        toggle: Option<ToggleAnchor>,
    },
    /// Drop from the junction row to one child
    ChildConnection { segment: Segment, node_id: String },
    /// Short stub under a person whose children are collapsed
    HiddenGeneration {
        segment: Segment,
        node_id: String,
        toggle: ToggleAnchor,
    },
}

impl Connection {
    pub fn kind(&self) -> ConnectionKind {
        match self {
            Connection::Couple { .. } => ConnectionKind::Couple,
            Connection::ParentJunction { .. } => ConnectionKind::ParentJunction,
            Connection::ChildConnection { .. } => ConnectionKind::ChildConnection,
            Connection::HiddenGeneration { .. } => ConnectionKind::HiddenGeneration,
        }
    }

    pub fn segment(&self) -> &Segment {
        match self {
            Connection::Couple { segment, .. }
            | Connection::ParentJunction { segment, .. }
            | Connection::ChildConnection { segment, .. }
            | Connection::HiddenGeneration { segment, .. } => segment,
        }
    }

    pub fn node_id(&self) -> &str {
        match self {
            Connection::Couple { node_id, .. }
            | Connection::ParentJunction { node_id, .. }
            | Connection::ChildConnection { node_id, .. }
            | Connection::HiddenGeneration { node_id, .. } => node_id,
        }
    }

    pub fn toggle(&self) -> Option<ToggleAnchor> {
        match self {
            Connection::ParentJunction { toggle, .. } => *toggle,
            Connection::HiddenGeneration { toggle, .. } => Some(*toggle),
            _ => None,
        }
    }

    pub fn has_toggle_button(&self) -> bool {
        self.toggle().is_some()
    }

    /// True only for the stub of a collapsed generation
    pub fn is_hidden(&self) -> bool {
        matches!(self, Connection::HiddenGeneration { .. })
    }
}

/// Flat JSON shape of a [`Connection`]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConnectionRecord {
    #[serde(rename = "type")]
    kind: ConnectionKind,
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
    node_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    has_toggle_button: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    toggle_button_x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    toggle_button_y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    is_hidden: Option<bool>,
}

impl From<Connection> for ConnectionRecord {
    fn from(connection: Connection) -> Self {
        let kind = connection.kind();
        let segment = *connection.segment();
        let toggle = connection.toggle();
        let is_hidden = connection.is_hidden().then_some(true);
        let node_id = match connection {
            Connection::Couple { node_id, .. }
            | Connection::ParentJunction { node_id, .. }
            | Connection::ChildConnection { node_id, .. }
            | Connection::HiddenGeneration { node_id, .. } => node_id,
        };

        Self {
            kind,
            x1: segment.x1,
            y1: segment.y1,
            x2: segment.x2,
            y2: segment.y2,
            node_id,
            has_toggle_button: toggle.map(|_| true),
            toggle_button_x: toggle.map(|t| t.x),
            toggle_button_y: toggle.map(|t| t.y),
            is_hidden,
        }
    }
}

impl TryFrom<ConnectionRecord> for Connection {
    type Error = String;

    fn try_from(record: ConnectionRecord) -> Result<Self, Self::Error> {
        let segment = Segment::new(record.x1, record.y1, record.x2, record.y2);
        let toggle = match (
            record.has_toggle_button.unwrap_or(false),
            record.toggle_button_x,
            record.toggle_button_y,
        ) {
            (true, Some(x), Some(y)) => Some(ToggleAnchor { x, y }),
            (true, _, _) => {
                return Err(format!(
                    "connection of '{}' has a toggle button without coordinates",
                    record.node_id
                ))
            }
            (false, _, _) => None,
        };
        let node_id = record.node_id;

        Ok(match record.kind {
            ConnectionKind::Couple => Connection::Couple { segment, node_id },
            ConnectionKind::ParentJunction => Connection::ParentJunction {
                segment,
                node_id,
                toggle,
            },
            ConnectionKind::ChildConnection => Connection::ChildConnection { segment, node_id },
            ConnectionKind::HiddenGeneration => {
                let toggle = toggle.ok_or_else(|| {
                    format!("hidden-generation stub of '{}' has no toggle button", node_id)
                })?;
                Connection::HiddenGeneration {
                    segment,
                    node_id,
                    toggle,
                }
            }
        })
    }
}

/// Padded bounding box over all laid out nodes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Boundaries {
    pub min_x: f64,
    pub min_y: f64,
    pub width: f64,
    pub height: f64,
}

impl Boundaries {
    pub fn max_x(&self) -> f64 {
        self.min_x + self.width
    }

    pub fn max_y(&self) -> f64 {
        self.min_y + self.height
    }

    /// True when the node's box lies inside these boundaries
    pub fn contains(&self, node: &LayoutNode) -> bool {
        node.x >= self.min_x
            && node.y >= self.min_y
            && node.right() <= self.max_x()
            && node.bottom() <= self.max_y()
    }
}

/// Result of one layout run
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TreeLayout {
    pub nodes: Vec<LayoutNode>,
    pub connections: Vec<Connection>,
    /// Malformed entries skipped while laying out
    #[serde(default)]
    pub warnings: Vec<LayoutWarning>,
}

impl TreeLayout {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Look up a laid out node by id
    pub fn node(&self, id: &str) -> Option<&LayoutNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// All connections that belong to a person's family
    pub fn connections_for<'a>(&'a self, node_id: &'a str) -> impl Iterator<Item = &'a Connection> {
        self.connections.iter().filter(move |c| c.node_id() == node_id)
    }

    /// All connections of one kind
    pub fn connections_of(&self, kind: ConnectionKind) -> impl Iterator<Item = &Connection> {
        self.connections.iter().filter(move |c| c.kind() == kind)
    }
}
