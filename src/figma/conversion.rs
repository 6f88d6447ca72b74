//! Raw Figma JSON to [`DesignTree`] conversion.

use serde_json::Value;

use crate::error::{F2rnError, Result};
use crate::types::{
    AutoLayout, Color, DesignNode, DesignTree, Effect, EffectKind, FontWeight, LayoutDirection,
    NodeId, NodeType, Paint, PaintKind, StrokeAlign, TextStyle,
};

use super::api_types::{
    FigmaColor, FigmaEffect, FigmaFileResponse, FigmaFontWeight, FigmaNode, FigmaNodesResponse,
    FigmaPaint, FigmaRect, FigmaTypeStyle,
};

/// Build a tree from a raw node and all of its descendants.
pub fn build_design_tree(root: &FigmaNode) -> DesignTree {
    let mut tree = DesignTree::new(convert_node(root, None));
    let root_id = tree.root_id();
    add_children(&mut tree, root_id, root);
    tree
}

fn add_children(tree: &mut DesignTree, parent: NodeId, raw: &FigmaNode) {
    for child in &raw.children {
        let node = convert_node(child, raw.absolute_bounding_box.as_ref());
        let id = tree.add_child(parent, node);
        add_children(tree, id, child);
    }
}

/// Pick the node to generate from a `/nodes` response.
///
/// With `node_id` the matching entry is required; without it the first
/// resolved entry is used.
pub fn select_from_nodes(
    response: FigmaNodesResponse,
    node_id: Option<&str>,
) -> Result<FigmaNode> {
    match node_id {
        Some(id) => response
            .nodes
            .into_iter()
            .find(|(key, _)| key == id)
            .and_then(|(_, container)| container)
            .map(|container| container.document)
            .ok_or_else(|| {
                F2rnError::figma_api(None, format!("Node {} not found in Figma response", id))
            }),
        None => response
            .nodes
            .into_iter()
            .find_map(|(_, container)| container)
            .map(|container| container.document)
            .ok_or_else(|| F2rnError::figma_api(None, "Figma response contains no nodes")),
    }
}

/// First page of a file, falling back to the document itself when it has none.
pub fn select_from_file(response: FigmaFileResponse) -> FigmaNode {
    let mut document = response.document;
    if document.children.is_empty() {
        document
    } else {
        document.children.swap_remove(0)
    }
}

/// Decode any accepted JSON shape into a tree.
///
/// Accepts a bare node, a `/v1/files/:key/nodes` response or a
/// `/v1/files/:key` response.
pub fn design_tree_from_value(value: Value, node_id: Option<&str>) -> Result<DesignTree> {
    let root = if value.get("nodes").is_some() {
        select_from_nodes(serde_json::from_value(value)?, node_id)?
    } else if value.get("document").is_some() {
        select_from_file(serde_json::from_value(value)?)
    } else if value.get("type").is_some() {
        serde_json::from_value(value)?
    } else {
        return Err(F2rnError::Input(
            "JSON is not a Figma node: expected a node with a \"type\", a \"nodes\" response, or a file with a \"document\"".to_string(),
        ));
    };
    Ok(build_design_tree(&root))
}

pub fn design_tree_from_str(json: &str, node_id: Option<&str>) -> Result<DesignTree> {
    let value: Value = serde_json::from_str(json)?;
    design_tree_from_value(value, node_id)
}

/// Convert one raw node, resolving geometry against the parent's absolute box.
pub fn convert_node(raw: &FigmaNode, parent_box: Option<&FigmaRect>) -> DesignNode {
    let mut node = DesignNode::new(
        raw.id.clone(),
        raw.name.clone(),
        NodeType::from_tag(&raw.node_type),
    );
    node.visible = raw.visible;

    let bbox = raw.absolute_bounding_box.as_ref();
    node.width = raw.width.or(bbox.map(|b| b.width));
    node.height = raw.height.or(bbox.map(|b| b.height));
    let relative = bbox.zip(parent_box).map(|(b, p)| (b.x - p.x, b.y - p.y));
    node.x = raw.x.or(relative.map(|(x, _)| x));
    node.y = raw.y.or(relative.map(|(_, y)| y));

    node.corner_radius = raw.corner_radius;
    node.corner_radii = raw.rectangle_corner_radii;
    node.opacity = raw.opacity;
    node.blend_mode = raw.blend_mode.clone();

    node.fills = raw.fills.iter().map(convert_paint).collect();
    node.strokes = raw.strokes.iter().map(convert_paint).collect();
    node.stroke_weight = raw.stroke_weight;
    node.stroke_align = raw.stroke_align.as_deref().and_then(convert_stroke_align);
    node.effects = raw.effects.iter().map(convert_effect).collect();

    node.characters = raw.characters.clone();
    node.text_style = raw.style.as_ref().map(convert_text_style);
    node.auto_layout = convert_auto_layout(raw);

    node
}

fn convert_color(color: &FigmaColor) -> Color {
    Color {
        r: color.r,
        g: color.g,
        b: color.b,
        a: color.a,
    }
}

fn convert_paint(paint: &FigmaPaint) -> Paint {
    Paint {
        kind: PaintKind::from_tag(&paint.paint_type),
        visible: paint.visible,
        opacity: paint.opacity,
        color: paint.color.as_ref().map(convert_color),
    }
}

fn convert_effect(effect: &FigmaEffect) -> Effect {
    Effect {
        kind: EffectKind::from_tag(&effect.effect_type),
        visible: effect.visible,
        color: effect.color.as_ref().map(convert_color),
        offset: effect.offset.map(|o| (o.x, o.y)),
        radius: effect.radius,
        spread: effect.spread,
    }
}

fn convert_stroke_align(align: &str) -> Option<StrokeAlign> {
    match align.to_ascii_uppercase().as_str() {
        "INSIDE" => Some(StrokeAlign::Inside),
        "OUTSIDE" => Some(StrokeAlign::Outside),
        "CENTER" => Some(StrokeAlign::Center),
        _ => None,
    }
}

fn convert_text_style(style: &FigmaTypeStyle) -> TextStyle {
    let font_weight = match &style.font_weight {
        Some(FigmaFontWeight::Number(weight)) => Some(FontWeight::Numeric(*weight)),
        Some(FigmaFontWeight::Name(name)) => Some(FontWeight::Named(name.clone())),
        None => style
            .font_style
            .as_deref()
            .map(strip_italic)
            .filter(|name| !name.is_empty())
            .map(FontWeight::Named),
    };

    TextStyle {
        font_family: style.font_family.clone(),
        font_size: style.font_size,
        font_weight,
        text_align_horizontal: style.text_align_horizontal.clone(),
        text_align_vertical: style.text_align_vertical.clone(),
        letter_spacing: style.letter_spacing,
        line_height: style.line_height_px,
        text_decoration: style.text_decoration.clone(),
        text_case: style.text_case.clone(),
    }
}

fn strip_italic(font_style: &str) -> String {
    font_style
        .split_whitespace()
        .filter(|word| !word.eq_ignore_ascii_case("italic"))
        .collect::<Vec<_>>()
        .join(" ")
}

fn convert_auto_layout(raw: &FigmaNode) -> Option<AutoLayout> {
    let direction = match raw.layout_mode.as_deref()?.to_ascii_uppercase().as_str() {
        "HORIZONTAL" => LayoutDirection::Horizontal,
        "VERTICAL" => LayoutDirection::Vertical,
        _ => return None,
    };

    let mut layout = AutoLayout::new(direction);
    layout.padding_left = raw.padding_left;
    layout.padding_right = raw.padding_right;
    layout.padding_top = raw.padding_top;
    layout.padding_bottom = raw.padding_bottom;
    layout.item_spacing = raw.item_spacing;
    layout.primary_axis_align = raw.primary_axis_align_items.clone();
    layout.counter_axis_align = raw.counter_axis_align_items.clone();
    Some(layout)
}
