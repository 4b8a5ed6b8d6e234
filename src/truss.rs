//! Declarative truss model consumed by the renderer.

use std::collections::HashMap;
use std::path::Path;

use log::{debug, warn};
use nalgebra::Vector2;
use petgraph::graph::{EdgeIndex, Graph, NodeIndex};
use serde::Deserialize;

use crate::errors::{read_json, LoadError};
use crate::geometry::{unit_direction, Force, Point};

/// Restraint applied at a joint.
///
/// Deserializes from either the long labels used by the model editor
/// (`"Pinned Support"`, `"Fixed (Rigid)"`, ...) or the short names (`"pinned"`).
/// Anything unrecognised is treated as a free joint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub enum SupportType {
    /// Unrestrained joint.
    #[default]
    Free,
    /// Restrained in both directions.
    Pinned,
    /// Restrained vertically only.
    Roller,
    /// Rigid support.
    Fixed,
}

impl SupportType {
    /// Parse a support label, falling back to [`SupportType::Free`].
    #[must_use]
    pub fn parse(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "pinned support" | "pinned" | "pin" => SupportType::Pinned,
            "roller support" | "roller" => SupportType::Roller,
            "fixed (rigid)" | "fixed support" | "fixed" | "rigid" => SupportType::Fixed,
            _ => SupportType::Free,
        }
    }

    /// Human-readable label, also used as the legend entry.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            SupportType::Free => "Free Joint",
            SupportType::Pinned => "Pinned Support",
            SupportType::Roller => "Roller Support",
            SupportType::Fixed => "Fixed (Rigid)",
        }
    }

    /// Whether the joint carries any restraint.
    #[must_use]
    pub const fn is_support(self) -> bool {
        !matches!(self, SupportType::Free)
    }
}

impl From<String> for SupportType {
    fn from(value: String) -> Self {
        SupportType::parse(&value)
    }
}

/// A joint of the truss.
#[derive(Clone, Debug, PartialEq)]
pub struct Joint {
    /// Identifier unique within the model.
    pub id: i64,
    /// Position of the joint in metres.
    pub position: Point,
    /// Restraint at the joint.
    pub support: SupportType,
    /// External load applied to the joint in newtons.
    pub load: Force,
}

impl Joint {
    /// Create an unloaded, unrestrained joint.
    #[must_use]
    pub fn new(id: i64, position: Point) -> Self {
        Self {
            id,
            position,
            support: SupportType::Free,
            load: Force::default(),
        }
    }

    /// Set the restraint.
    #[must_use]
    pub fn with_support(mut self, support: SupportType) -> Self {
        self.support = support;
        self
    }

    /// Set the applied load in newtons.
    #[must_use]
    pub fn with_load(mut self, load: Force) -> Self {
        self.load = load;
        self
    }
}

/// A straight member connecting two joints by id.
#[derive(Clone, Debug, PartialEq)]
pub struct Member {
    /// Identifier unique within the model.
    pub id: i64,
    /// Id of the start joint.
    pub start: i64,
    /// Id of the end joint.
    pub end: i64,
    /// Cross-sectional area in square metres, when supplied with the model.
    pub area: Option<f64>,
}

impl Member {
    /// Create a member without material data.
    #[must_use]
    pub const fn new(id: i64, start: i64, end: i64) -> Self {
        Self {
            id,
            start,
            end,
            area: None,
        }
    }
}

/// A member together with its resolved end joints.
#[derive(Clone, Copy, Debug)]
pub struct MemberSpan<'a> {
    /// The member itself.
    pub member: &'a Member,
    /// Joint at the start of the member.
    pub start: &'a Joint,
    /// Joint at the end of the member.
    pub end: &'a Joint,
}

impl MemberSpan<'_> {
    /// Length of the member in metres.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.start.position.distance(self.end.position)
    }

    /// Midpoint of the member.
    #[must_use]
    pub fn midpoint(&self) -> Point {
        self.start.position.midpoint(self.end.position)
    }

    /// Unit vector from start to end, or `None` for coincident joints.
    #[must_use]
    pub fn direction(&self) -> Option<Vector2<f64>> {
        unit_direction(self.start.position, self.end.position)
    }
}

/// Node record of the model file.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NodeRecord {
    /// Joint id.
    id: i64,
    /// X coordinate in metres.
    x: f64,
    /// Y coordinate in metres.
    y: f64,
    /// Support label.
    #[serde(rename = "type", default)]
    support: SupportType,
    /// Horizontal load in newtons.
    #[serde(default)]
    load_x: f64,
    /// Vertical load in newtons.
    #[serde(default)]
    load_y: f64,
}

/// Element record of the model file.
#[derive(Clone, Debug, Deserialize)]
struct ElementRecord {
    /// Member id.
    id: i64,
    /// Start joint id.
    start: i64,
    /// End joint id.
    end: i64,
    /// Optional cross-sectional area in square metres.
    #[serde(rename = "A", default)]
    area: Option<f64>,
}

/// Top-level shape of the model file.
#[derive(Clone, Debug, Default, Deserialize)]
struct ModelRecord {
    /// All joints.
    #[serde(default)]
    nodes: Vec<NodeRecord>,
    /// All members.
    #[serde(default)]
    elements: Vec<ElementRecord>,
}

/// Container for a pin-jointed truss model.
///
/// Members whose ends cannot be resolved to distinct joints are never stored, so every
/// member yielded by [`Truss::members`] is drawable.
#[derive(Debug, Default, Clone)]
pub struct Truss {
    /// Underlying graph storage for joints and members.
    graph: Graph<Joint, Member>,
    /// Lookup from joint id to graph index.
    joint_lookup: HashMap<i64, NodeIndex>,
}

impl Truss {
    /// Create an empty truss.
    ///
    /// # Examples
    /// ```
    /// use trussviz::Truss;
    ///
    /// let truss = Truss::new();
    /// assert_eq!(truss.joint_count(), 0);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the number of joints in the truss.
    #[must_use]
    pub fn joint_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Return the number of drawable members in the truss.
    #[must_use]
    pub fn member_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Add a joint. A joint whose id is already present replaces the earlier one.
    ///
    /// # Examples
    /// ```
    /// use trussviz::{point, Joint, Truss};
    ///
    /// let mut truss = Truss::new();
    /// truss.add_joint(Joint::new(1, point(0.0, 0.0)));
    /// truss.add_joint(Joint::new(1, point(2.0, 0.0)));
    /// assert_eq!(truss.joint_count(), 1);
    /// assert_eq!(truss.joint(1).map(|j| j.position.x), Some(2.0));
    /// ```
    pub fn add_joint(&mut self, joint: Joint) -> NodeIndex {
        if let Some(&index) = self.joint_lookup.get(&joint.id) {
            debug!("joint {} redefined; keeping the latest definition", joint.id);
            self.graph[index] = joint;
            return index;
        }
        let id = joint.id;
        let index = self.graph.add_node(joint);
        self.joint_lookup.insert(id, index);
        index
    }

    /// Connect two joints with a member.
    ///
    /// Returns `None`, leaving the truss unchanged, when either end references an unknown
    /// joint or both ends reference the same joint.
    pub fn add_member(&mut self, member: Member) -> Option<EdgeIndex> {
        if member.start == member.end {
            warn!("member {} connects joint {} to itself; skipped", member.id, member.start);
            return None;
        }
        let (Some(&start), Some(&end)) = (
            self.joint_lookup.get(&member.start),
            self.joint_lookup.get(&member.end),
        ) else {
            warn!(
                "member {} references a missing joint ({} -> {}); skipped",
                member.id, member.start, member.end
            );
            return None;
        };
        Some(self.graph.add_edge(start, end, member))
    }

    /// Look up a joint by id.
    #[must_use]
    pub fn joint(&self, id: i64) -> Option<&Joint> {
        self.joint_lookup.get(&id).map(|&index| &self.graph[index])
    }

    /// Iterate over joints in insertion order.
    pub fn joints(&self) -> impl Iterator<Item = &Joint> + '_ {
        self.graph.node_indices().map(move |index| &self.graph[index])
    }

    /// Iterate over members with their resolved joints, in insertion order.
    pub fn members(&self) -> impl Iterator<Item = MemberSpan<'_>> + '_ {
        self.graph.edge_indices().filter_map(move |edge| {
            let (start, end) = self.graph.edge_endpoints(edge)?;
            Some(MemberSpan {
                member: &self.graph[edge],
                start: &self.graph[start],
                end: &self.graph[end],
            })
        })
    }

    /// Parse a model from its JSON text.
    ///
    /// # Errors
    ///
    /// Returns the decoding error when `text` is not a model document.
    ///
    /// # Examples
    /// ```
    /// use trussviz::Truss;
    ///
    /// let truss = Truss::from_json(
    ///     r#"{"nodes": [{"id": 1, "x": 0, "y": 0}, {"id": 2, "x": 4, "y": 0}],
    ///         "elements": [{"id": 1, "start": 1, "end": 2}, {"id": 2, "start": 1, "end": 9}]}"#,
    /// )
    /// .expect("valid model");
    /// assert_eq!(truss.member_count(), 1);
    /// ```
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        let record: ModelRecord = serde_json::from_str(text)?;
        Ok(Self::from_record(record))
    }

    /// Read a model file.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] when the file is missing, unreadable or malformed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let record: ModelRecord = read_json(path.as_ref())?;
        Ok(Self::from_record(record))
    }

    /// Build the graph from decoded records. Joints are added before members so member
    /// order in the file does not matter.
    fn from_record(record: ModelRecord) -> Self {
        let mut truss = Truss::new();
        for node in record.nodes {
            truss.add_joint(
                Joint::new(node.id, Point::new(node.x, node.y))
                    .with_support(node.support)
                    .with_load(Force::new(node.load_x, node.load_y)),
            );
        }
        for element in record.elements {
            truss.add_member(Member {
                area: element.area,
                ..Member::new(element.id, element.start, element.end)
            });
        }
        truss
    }
}
