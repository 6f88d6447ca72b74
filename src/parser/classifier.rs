//! Decides what each design node becomes in React Native.

use serde::{Deserialize, Serialize};

use crate::types::{DesignNode, DesignTree, NodeId, NodeType};

/// React Native primitive a node is rendered as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TargetPrimitive {
    Container,
    Text,
    ImagePlaceholder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RenderReason {
    Hidden,
    ComplexVector,
    VisualContent,
    RenderableDescendant,
    Empty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderDecision {
    pub renderable: bool,
    pub primitive: TargetPrimitive,
    pub reason: RenderReason,
}

/// Per-node render decisions for one tree, indexed by [`NodeId`].
#[derive(Debug, Clone)]
pub struct ClassificationTable {
    decisions: Vec<RenderDecision>,
    warnings: Vec<String>,
}

impl ClassificationTable {
    pub fn get(&self, id: NodeId) -> RenderDecision {
        self.decisions[id.index()]
    }

    pub fn is_renderable(&self, id: NodeId) -> bool {
        self.decisions[id.index()].renderable
    }

    pub fn primitive(&self, id: NodeId) -> TargetPrimitive {
        self.decisions[id.index()].primitive
    }

    /// Non-fatal notes, e.g. unknown node types.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }
}

/// Fixed node type to primitive table.
pub fn primitive_for(node_type: &NodeType) -> TargetPrimitive {
    match node_type {
        NodeType::Text => TargetPrimitive::Text,
        NodeType::Vector | NodeType::BooleanOperation | NodeType::Star | NodeType::Polygon => {
            TargetPrimitive::ImagePlaceholder
        }
        NodeType::Frame
        | NodeType::Rectangle
        | NodeType::Ellipse
        | NodeType::Group
        | NodeType::Component
        | NodeType::Instance
        | NodeType::Line
        | NodeType::Unknown(_) => TargetPrimitive::Container,
    }
}

/// Whether the node draws anything by itself.
pub fn has_visual_content(node: &DesignNode) -> bool {
    node.has_text_content()
        || node.fills.iter().any(|p| p.is_visible())
        || node.strokes.iter().any(|p| p.is_visible())
        || node.effects.iter().any(|e| e.is_visible())
}

/// Classify one node given whether any of its children is renderable.
pub fn classify_node(node: &DesignNode, any_child_renderable: bool) -> RenderDecision {
    let primitive = primitive_for(&node.node_type);

    let (renderable, reason) = if !node.visible {
        (false, RenderReason::Hidden)
    } else if primitive == TargetPrimitive::ImagePlaceholder {
        (true, RenderReason::ComplexVector)
    } else if has_visual_content(node) {
        (true, RenderReason::VisualContent)
    } else if any_child_renderable {
        (true, RenderReason::RenderableDescendant)
    } else {
        (false, RenderReason::Empty)
    };

    RenderDecision {
        renderable,
        primitive,
        reason,
    }
}

/// Classify every node of `tree` in a single bottom-up pass.
pub fn classify_tree(tree: &DesignTree) -> ClassificationTable {
    let placeholder = RenderDecision {
        renderable: false,
        primitive: TargetPrimitive::Container,
        reason: RenderReason::Empty,
    };
    let mut decisions = vec![placeholder; tree.len()];
    let mut warnings = Vec::new();

    for id in tree.bottom_up() {
        let node = tree.node(id);
        let any_child_renderable = node
            .children
            .iter()
            .any(|child| decisions[child.index()].renderable);
        decisions[id.index()] = classify_node(node, any_child_renderable);

        if let NodeType::Unknown(tag) = &node.node_type {
            warnings.push(format!(
                "Unknown node type '{}' on '{}'; rendering as View",
                tag, node.name
            ));
        }
    }

    // Bottom-up order produced these deepest-first; report in document order.
    warnings.reverse();

    ClassificationTable {
        decisions,
        warnings,
    }
}
