//! Design node arena.
//!
//! A [`DesignTree`] owns every node of one design selection in a flat
//! `Vec`, parents before children, so passes can walk it bottom-up by
//! iterating indices in reverse and keep per-node results in side tables.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of a node inside its [`DesignTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Closed vocabulary of Figma node types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeType {
    Frame,
    Rectangle,
    Ellipse,
    Text,
    Vector,
    Group,
    Component,
    Instance,
    BooleanOperation,
    Line,
    Polygon,
    Star,
    /// A tag this crate does not know yet; kept verbatim.
    Unknown(String),
}

impl NodeType {
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_uppercase().as_str() {
            "FRAME" | "SECTION" | "CANVAS" => NodeType::Frame,
            "RECTANGLE" => NodeType::Rectangle,
            "ELLIPSE" => NodeType::Ellipse,
            "TEXT" => NodeType::Text,
            "VECTOR" => NodeType::Vector,
            "GROUP" => NodeType::Group,
            "COMPONENT" | "COMPONENT_SET" => NodeType::Component,
            "INSTANCE" => NodeType::Instance,
            "BOOLEAN_OPERATION" | "BOOLEAN" => NodeType::BooleanOperation,
            "LINE" => NodeType::Line,
            "REGULAR_POLYGON" | "POLYGON" => NodeType::Polygon,
            "STAR" => NodeType::Star,
            _ => NodeType::Unknown(tag.to_string()),
        }
    }

    pub fn as_tag(&self) -> &str {
        match self {
            NodeType::Frame => "FRAME",
            NodeType::Rectangle => "RECTANGLE",
            NodeType::Ellipse => "ELLIPSE",
            NodeType::Text => "TEXT",
            NodeType::Vector => "VECTOR",
            NodeType::Group => "GROUP",
            NodeType::Component => "COMPONENT",
            NodeType::Instance => "INSTANCE",
            NodeType::BooleanOperation => "BOOLEAN_OPERATION",
            NodeType::Line => "LINE",
            NodeType::Polygon => "REGULAR_POLYGON",
            NodeType::Star => "STAR",
            NodeType::Unknown(tag) => tag,
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

/// RGBA color, channels in the 0.0-1.0 range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaintKind {
    Solid,
    Gradient,
    Image,
    Other(String),
}

impl PaintKind {
    pub fn from_tag(tag: &str) -> Self {
        let upper = tag.to_ascii_uppercase();
        match upper.as_str() {
            "SOLID" => PaintKind::Solid,
            "IMAGE" => PaintKind::Image,
            v if v.starts_with("GRADIENT") => PaintKind::Gradient,
            _ => PaintKind::Other(tag.to_string()),
        }
    }
}

/// A fill or stroke paint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paint {
    pub kind: PaintKind,
    pub visible: bool,
    pub opacity: Option<f64>,
    pub color: Option<Color>,
}

impl Paint {
    pub fn solid(color: Color) -> Self {
        Self {
            kind: PaintKind::Solid,
            visible: true,
            opacity: None,
            color: Some(color),
        }
    }

    /// Hidden paints and paints with an opacity of exactly zero draw nothing.
    pub fn is_visible(&self) -> bool {
        self.visible && self.opacity != Some(0.0)
    }

    pub fn is_visible_solid(&self) -> bool {
        self.kind == PaintKind::Solid && self.is_visible() && self.color.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectKind {
    DropShadow,
    InnerShadow,
    LayerBlur,
    BackgroundBlur,
    Other(String),
}

impl EffectKind {
    pub fn from_tag(tag: &str) -> Self {
        match tag.to_ascii_uppercase().as_str() {
            "DROP_SHADOW" => EffectKind::DropShadow,
            "INNER_SHADOW" => EffectKind::InnerShadow,
            "LAYER_BLUR" => EffectKind::LayerBlur,
            "BACKGROUND_BLUR" => EffectKind::BackgroundBlur,
            _ => EffectKind::Other(tag.to_string()),
        }
    }
}

/// Shadow or blur effect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Effect {
    pub kind: EffectKind,
    pub visible: bool,
    pub color: Option<Color>,
    pub offset: Option<(f64, f64)>,
    pub radius: Option<f64>,
    pub spread: Option<f64>,
}

impl Effect {
    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrokeAlign {
    Inside,
    Outside,
    Center,
}

/// Font weight as found in design data: numeric (`600`) or a style name (`"Semi Bold"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FontWeight {
    Numeric(f64),
    Named(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub font_family: Option<String>,
    pub font_size: Option<f64>,
    pub font_weight: Option<FontWeight>,
    pub text_align_horizontal: Option<String>,
    pub text_align_vertical: Option<String>,
    pub letter_spacing: Option<f64>,
    pub line_height: Option<f64>,
    pub text_decoration: Option<String>,
    pub text_case: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayoutDirection {
    Horizontal,
    Vertical,
}

/// Flex-like layout directive of a frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutoLayout {
    pub direction: LayoutDirection,
    pub padding_left: Option<f64>,
    pub padding_right: Option<f64>,
    pub padding_top: Option<f64>,
    pub padding_bottom: Option<f64>,
    pub item_spacing: Option<f64>,
    pub primary_axis_align: Option<String>,
    pub counter_axis_align: Option<String>,
}

impl AutoLayout {
    pub fn new(direction: LayoutDirection) -> Self {
        Self {
            direction,
            padding_left: None,
            padding_right: None,
            padding_top: None,
            padding_bottom: None,
            item_spacing: None,
            primary_axis_align: None,
            counter_axis_align: None,
        }
    }
}

/// One element of the design tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignNode {
    pub id: String,
    pub name: String,
    pub node_type: NodeType,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub corner_radius: Option<f64>,
    /// Top-left, top-right, bottom-right, bottom-left.
    pub corner_radii: Option<[f64; 4]>,
    pub visible: bool,
    pub opacity: Option<f64>,
    pub blend_mode: Option<String>,
    pub fills: Vec<Paint>,
    pub strokes: Vec<Paint>,
    pub stroke_weight: Option<f64>,
    pub stroke_align: Option<StrokeAlign>,
    pub effects: Vec<Effect>,
    pub characters: Option<String>,
    pub text_style: Option<TextStyle>,
    pub auto_layout: Option<AutoLayout>,
}

impl DesignNode {
    /// A visible node with no attributes beyond identity.
    pub fn new(id: impl Into<String>, name: impl Into<String>, node_type: NodeType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            node_type,
            parent: None,
            children: Vec::new(),
            x: None,
            y: None,
            width: None,
            height: None,
            corner_radius: None,
            corner_radii: None,
            visible: true,
            opacity: None,
            blend_mode: None,
            fills: Vec::new(),
            strokes: Vec::new(),
            stroke_weight: None,
            stroke_align: None,
            effects: Vec::new(),
            characters: None,
            text_style: None,
            auto_layout: None,
        }
    }

    pub fn has_text_content(&self) -> bool {
        self.characters
            .as_deref()
            .map(|c| !c.trim().is_empty())
            .unwrap_or(false)
    }

    pub fn has_position(&self) -> bool {
        self.x.is_some() && self.y.is_some()
    }
}

/// Single-owner arena of design nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignTree {
    nodes: Vec<DesignNode>,
}

impl DesignTree {
    /// Start a tree from its root node.
    pub fn new(root: DesignNode) -> Self {
        let mut root = root;
        root.parent = None;
        root.children.clear();
        Self { nodes: vec![root] }
    }

    /// Append `node` as the last child of `parent`.
    ///
    /// Panics if `parent` does not belong to this tree.
    pub fn add_child(&mut self, parent: NodeId, node: DesignNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        let mut node = node;
        node.parent = Some(parent);
        node.children.clear();
        self.nodes.push(node);
        self.nodes[parent.0].children.push(id);
        id
    }

    pub fn root_id(&self) -> NodeId {
        NodeId(0)
    }

    pub fn root(&self) -> &DesignNode {
        &self.nodes[0]
    }

    pub fn node(&self, id: NodeId) -> &DesignNode {
        &self.nodes[id.0]
    }

    pub fn get(&self, id: NodeId) -> Option<&DesignNode> {
        self.nodes.get(id.0)
    }

    pub fn children(&self, id: NodeId) -> impl Iterator<Item = (NodeId, &DesignNode)> + '_ {
        self.nodes[id.0]
            .children
            .iter()
            .map(move |&child| (child, &self.nodes[child.0]))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node ids ordered so every child comes before its parent.
    pub fn bottom_up(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len()).rev().map(NodeId)
    }

    /// Depth of the deepest node, the root being depth 0.
    pub fn max_depth(&self) -> usize {
        let mut depths = vec![0usize; self.nodes.len()];
        let mut max = 0;
        for (idx, node) in self.nodes.iter().enumerate() {
            if let Some(parent) = node.parent {
                depths[idx] = depths[parent.0] + 1;
                max = max.max(depths[idx]);
            }
        }
        max
    }
}
