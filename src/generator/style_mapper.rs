//! Translates a node's visual attributes into React Native style properties.

use palette::Srgb;

use crate::types::{
    Color, DesignNode, EffectKind, FontWeight, LayoutDirection, NodeType, Paint, StyleMapping,
    StyleValue, TextStyle,
};

/// Border width emitted for any visible stroke.
///
/// The node's real `strokeWeight` is intentionally not used.
pub const DEFAULT_BORDER_WIDTH: f64 = 1.0;

const FONT_WEIGHT_TOKENS: &[(u32, &str)] = &[
    (100, "100"),
    (200, "200"),
    (300, "300"),
    (400, "normal"),
    (500, "500"),
    (600, "600"),
    (700, "bold"),
    (800, "800"),
    (900, "900"),
];

const NAMED_FONT_WEIGHTS: &[(&str, u32)] = &[
    ("thin", 100),
    ("hairline", 100),
    ("extralight", 200),
    ("ultralight", 200),
    ("light", 300),
    ("normal", 400),
    ("regular", 400),
    ("book", 400),
    ("medium", 500),
    ("semibold", 600),
    ("demibold", 600),
    ("bold", 700),
    ("extrabold", 800),
    ("ultrabold", 800),
    ("black", 900),
    ("heavy", 900),
];

const PRIMARY_AXIS_ALIGN: &[(&str, &str)] = &[
    ("MIN", "flex-start"),
    ("CENTER", "center"),
    ("MAX", "flex-end"),
    ("SPACE_BETWEEN", "space-between"),
];

const COUNTER_AXIS_ALIGN: &[(&str, &str)] = &[
    ("MIN", "flex-start"),
    ("CENTER", "center"),
    ("MAX", "flex-end"),
    ("BASELINE", "baseline"),
];

const TEXT_ALIGN_HORIZONTAL: &[(&str, &str)] = &[
    ("LEFT", "left"),
    ("CENTER", "center"),
    ("RIGHT", "right"),
    ("JUSTIFIED", "justify"),
];

const TEXT_ALIGN_VERTICAL: &[(&str, &str)] = &[
    ("TOP", "top"),
    ("CENTER", "center"),
    ("BOTTOM", "bottom"),
];

const FLEX_START: &str = "flex-start";

fn lookup(table: &[(&'static str, &'static str)], key: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(key))
        .map(|(_, v)| *v)
}

/// `rgb(R, G, B)` when `alpha` is exactly 1, otherwise `rgba(R, G, B, A)`.
///
/// Each channel is `round(c * 255)` in f64, with halves rounded away from zero.
pub fn format_color(color: &Color, alpha: f64) -> String {
    let rgb: Srgb<u8> = Srgb::new(
        quantize_channel(color.r),
        quantize_channel(color.g),
        quantize_channel(color.b),
    );

    if alpha == 1.0 {
        format!("rgb({}, {}, {})", rgb.red, rgb.green, rgb.blue)
    } else {
        format!("rgba({}, {}, {}, {})", rgb.red, rgb.green, rgb.blue, alpha)
    }
}

fn quantize_channel(value: f64) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Color of the first visible solid paint, alpha folded with the paint opacity.
pub fn resolve_paint_color(paints: &[Paint]) -> Option<String> {
    let paint = paints.iter().find(|p| p.is_visible_solid())?;
    let color = paint.color.as_ref()?;
    let alpha = color.a * paint.opacity.unwrap_or(1.0);
    Some(format_color(color, alpha))
}

/// React Native `fontWeight` token for a design font weight.
pub fn font_weight_token(weight: &FontWeight) -> Option<&'static str> {
    let numeric = match weight {
        FontWeight::Numeric(value) => *value,
        FontWeight::Named(name) => {
            let key: String = name
                .chars()
                .filter(|c| c.is_ascii_alphanumeric())
                .collect::<String>()
                .to_ascii_lowercase();
            if let Ok(value) = key.parse::<f64>() {
                value
            } else {
                NAMED_FONT_WEIGHTS
                    .iter()
                    .find(|(n, _)| *n == key)
                    .map(|(_, w)| f64::from(*w))?
            }
        }
    };
    if !numeric.is_finite() {
        return None;
    }
    let hundred = ((numeric / 100.0).round() * 100.0).clamp(100.0, 900.0) as u32;
    FONT_WEIGHT_TOKENS
        .iter()
        .find(|(w, _)| *w == hundred)
        .map(|(_, token)| *token)
}

/// Map a node to its flat style table.
pub fn map_styles(node: &DesignNode) -> StyleMapping {
    let mut styles = StyleMapping::new();
    let is_text = node.node_type == NodeType::Text;

    map_geometry(node, &mut styles);

    if !is_text {
        if let Some(color) = resolve_paint_color(&node.fills) {
            styles.insert("backgroundColor".into(), StyleValue::String(color));
        }
    }

    map_border(node, &mut styles);

    if let Some(opacity) = node.opacity {
        if opacity != 1.0 {
            styles.insert("opacity".into(), opacity.into());
        }
    }

    map_auto_layout(node, &mut styles);

    if let Some(text_style) = &node.text_style {
        map_text(text_style, &mut styles);
    }
    if is_text {
        if let Some(color) = resolve_paint_color(&node.fills) {
            styles.insert("color".into(), StyleValue::String(color));
        }
    }

    map_shadow(node, &mut styles);

    styles
}

fn map_geometry(node: &DesignNode, styles: &mut StyleMapping) {
    let fields = [
        ("width", node.width),
        ("height", node.height),
        ("left", node.x),
        ("top", node.y),
    ];
    for (key, value) in fields {
        if let Some(value) = value {
            styles.insert(key.into(), value.into());
        }
    }
}

fn map_border(node: &DesignNode, styles: &mut StyleMapping) {
    if let Some(color) = resolve_paint_color(&node.strokes) {
        styles.insert("borderColor".into(), StyleValue::String(color));
        styles.insert("borderWidth".into(), DEFAULT_BORDER_WIDTH.into());
        styles.insert("borderStyle".into(), "solid".into());
    }

    if let Some(radius) = node.corner_radius {
        styles.insert("borderRadius".into(), radius.into());
    } else if let Some([tl, tr, br, bl]) = node.corner_radii {
        if tl == tr && tr == br && br == bl {
            styles.insert("borderRadius".into(), tl.into());
        } else {
            styles.insert("borderTopLeftRadius".into(), tl.into());
            styles.insert("borderTopRightRadius".into(), tr.into());
            styles.insert("borderBottomRightRadius".into(), br.into());
            styles.insert("borderBottomLeftRadius".into(), bl.into());
        }
    }
}

/// Flex direction, padding and alignment for an auto-layout node.
///
/// `itemSpacing` becomes `marginRight` (row) or `marginBottom` (column) on
/// this node's own mapping. The margin offsets the container from its next
/// sibling; it does not add space between this node's children.
fn map_auto_layout(node: &DesignNode, styles: &mut StyleMapping) {
    let Some(layout) = &node.auto_layout else {
        return;
    };

    let direction = match layout.direction {
        LayoutDirection::Horizontal => "row",
        LayoutDirection::Vertical => "column",
    };
    styles.insert("flexDirection".into(), direction.into());

    let padding = [
        ("paddingLeft", layout.padding_left),
        ("paddingRight", layout.padding_right),
        ("paddingTop", layout.padding_top),
        ("paddingBottom", layout.padding_bottom),
    ];
    for (key, value) in padding {
        if let Some(value) = value {
            styles.insert(key.into(), value.into());
        }
    }

    if let Some(align) = &layout.primary_axis_align {
        let value = lookup(PRIMARY_AXIS_ALIGN, align).unwrap_or(FLEX_START);
        styles.insert("justifyContent".into(), value.into());
    }
    if let Some(align) = &layout.counter_axis_align {
        let value = lookup(COUNTER_AXIS_ALIGN, align).unwrap_or(FLEX_START);
        styles.insert("alignItems".into(), value.into());
    }

    // No gap in the target style model.
    if let Some(spacing) = layout.item_spacing {
        let key = match layout.direction {
            LayoutDirection::Horizontal => "marginRight",
            LayoutDirection::Vertical => "marginBottom",
        };
        styles.insert(key.into(), spacing.into());
    }
}

fn map_text(text: &TextStyle, styles: &mut StyleMapping) {
    if let Some(family) = &text.font_family {
        styles.insert("fontFamily".into(), family.as_str().into());
    }
    if let Some(size) = text.font_size {
        styles.insert("fontSize".into(), size.into());
    }
    if let Some(token) = text.font_weight.as_ref().and_then(font_weight_token) {
        styles.insert("fontWeight".into(), token.into());
    }
    if let Some(align) = text
        .text_align_horizontal
        .as_deref()
        .and_then(|a| lookup(TEXT_ALIGN_HORIZONTAL, a))
    {
        styles.insert("textAlign".into(), align.into());
    }
    if let Some(align) = text
        .text_align_vertical
        .as_deref()
        .and_then(|a| lookup(TEXT_ALIGN_VERTICAL, a))
    {
        styles.insert("textAlignVertical".into(), align.into());
    }
    if let Some(spacing) = text.letter_spacing {
        styles.insert("letterSpacing".into(), spacing.into());
    }
    if let Some(line_height) = text.line_height {
        styles.insert("lineHeight".into(), line_height.into());
    }
    match text.text_decoration.as_deref().map(str::to_ascii_uppercase).as_deref() {
        Some("UNDERLINE") => {
            styles.insert("textDecorationLine".into(), "underline".into());
        }
        Some("STRIKETHROUGH") => {
            styles.insert("textDecorationLine".into(), "line-through".into());
        }
        _ => {}
    }
    match text.text_case.as_deref().map(str::to_ascii_uppercase).as_deref() {
        Some("UPPER") => {
            styles.insert("textTransform".into(), "uppercase".into());
        }
        Some("LOWER") => {
            styles.insert("textTransform".into(), "lowercase".into());
        }
        _ => {}
    }
}

fn map_shadow(node: &DesignNode, styles: &mut StyleMapping) {
    let Some(shadow) = node
        .effects
        .iter()
        .find(|e| e.kind == EffectKind::DropShadow && e.is_visible())
    else {
        return;
    };

    if let Some(color) = &shadow.color {
        styles.insert("shadowColor".into(), format_color(color, 1.0).into());
    }
    if let Some((x, y)) = shadow.offset {
        styles.insert(
            "shadowOffset".into(),
            StyleValue::Pair {
                width: x,
                height: y,
            },
        );
    }
    if let Some(radius) = shadow.radius {
        styles.insert("shadowRadius".into(), radius.into());
    }
    // iOS reads opacity from shadowOpacity, Android only honours elevation.
    if let Some(color) = &shadow.color {
        styles.insert("shadowOpacity".into(), color.a.into());
    }
    if let Some(radius) = shadow.radius {
        let elevation = (radius / 2.0).round();
        if elevation > 0.0 {
            styles.insert("elevation".into(), elevation.into());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AutoLayout, Effect};

    fn color(r: f64, g: f64, b: f64, a: f64) -> Color {
        Color { r, g, b, a }
    }

    fn string(styles: &StyleMapping, key: &str) -> Option<String> {
        styles.get(key).and_then(|v| v.as_str()).map(str::to_string)
    }

    fn number(styles: &StyleMapping, key: &str) -> Option<f64> {
        styles.get(key).and_then(|v| v.as_number())
    }

    #[test]
    fn opaque_fill_formats_as_rgb() {
        let mut node = DesignNode::new("1", "Box", NodeType::Rectangle);
        node.fills.push(Paint::solid(color(0.0, 122.0 / 255.0, 1.0, 1.0)));

        let styles = map_styles(&node);
        assert_eq!(string(&styles, "backgroundColor").as_deref(), Some("rgb(0, 122, 255)"));
    }

    #[test]
    fn half_step_channels_round_up() {
        let c = 1.0 / 510.0;
        assert_eq!(format_color(&color(c, c, c, 1.0), 1.0), "rgb(1, 1, 1)");
        let c = 5.0 / 510.0;
        assert_eq!(format_color(&color(c, c, c, 1.0), 1.0), "rgb(3, 3, 3)");
        let c = 253.0 / 510.0;
        assert_eq!(format_color(&color(c, 0.0, 1.0, 1.0), 1.0), "rgb(127, 0, 255)");

        for k in 0..=510u32 {
            let c = f64::from(k) / 510.0;
            let expected = (c * 255.0).round() as u8;
            assert_eq!(
                format_color(&color(c, c, c, 1.0), 1.0),
                format!("rgb({expected}, {expected}, {expected})")
            );
        }
    }

    #[test]
    fn translucent_fill_multiplies_paint_opacity() {
        let mut node = DesignNode::new("1", "Box", NodeType::Rectangle);
        let mut paint = Paint::solid(color(1.0, 0.5, 0.0, 1.0));
        paint.opacity = Some(0.5);
        node.fills.push(paint);

        let styles = map_styles(&node);
        assert_eq!(
            string(&styles, "backgroundColor").as_deref(),
            Some("rgba(255, 128, 0, 0.5)")
        );
    }

    #[test]
    fn first_visible_solid_fill_wins() {
        let mut node = DesignNode::new("1", "Box", NodeType::Rectangle);
        let mut hidden = Paint::solid(color(1.0, 0.0, 0.0, 1.0));
        hidden.visible = false;
        let mut gradient = Paint::solid(color(0.0, 1.0, 0.0, 1.0));
        gradient.kind = crate::types::PaintKind::Gradient;
        node.fills = vec![hidden, gradient, Paint::solid(color(0.0, 0.0, 1.0, 1.0))];

        let styles = map_styles(&node);
        assert_eq!(string(&styles, "backgroundColor").as_deref(), Some("rgb(0, 0, 255)"));
    }

    #[test]
    fn geometry_is_copied_only_when_present() {
        let mut node = DesignNode::new("1", "Box", NodeType::Rectangle);
        node.width = Some(200.0);
        node.x = Some(0.0);

        let styles = map_styles(&node);
        assert_eq!(number(&styles, "width"), Some(200.0));
        assert_eq!(number(&styles, "left"), Some(0.0));
        assert!(!styles.contains_key("height"));
        assert!(!styles.contains_key("top"));
    }

    #[test]
    fn stroke_uses_fixed_border_width() {
        let mut node = DesignNode::new("1", "Box", NodeType::Rectangle);
        node.strokes.push(Paint::solid(color(0.0, 0.0, 0.0, 1.0)));
        node.stroke_weight = Some(3.0);

        let styles = map_styles(&node);
        assert_eq!(string(&styles, "borderColor").as_deref(), Some("rgb(0, 0, 0)"));
        assert_eq!(number(&styles, "borderWidth"), Some(DEFAULT_BORDER_WIDTH));
        assert_eq!(string(&styles, "borderStyle").as_deref(), Some("solid"));
    }

    #[test]
    fn corner_radius_zero_is_present() {
        let mut node = DesignNode::new("1", "Box", NodeType::Rectangle);
        node.corner_radius = Some(0.0);
        assert_eq!(number(&map_styles(&node), "borderRadius"), Some(0.0));
    }

    #[test]
    fn mixed_corner_radii_map_per_corner() {
        let mut node = DesignNode::new("1", "Sheet", NodeType::Rectangle);
        node.corner_radii = Some([16.0, 16.0, 0.0, 0.0]);

        let styles = map_styles(&node);
        assert_eq!(number(&styles, "borderTopLeftRadius"), Some(16.0));
        assert_eq!(number(&styles, "borderBottomRightRadius"), Some(0.0));
        assert!(!styles.contains_key("borderRadius"));

        node.corner_radii = Some([8.0; 4]);
        assert_eq!(number(&map_styles(&node), "borderRadius"), Some(8.0));
    }

    #[test]
    fn opacity_only_when_not_opaque() {
        let mut node = DesignNode::new("1", "Box", NodeType::Rectangle);
        node.opacity = Some(1.0);
        assert!(!map_styles(&node).contains_key("opacity"));
        node.opacity = Some(0.4);
        assert_eq!(number(&map_styles(&node), "opacity"), Some(0.4));
    }

    #[test]
    fn horizontal_auto_layout_uses_trailing_margin() {
        let mut node = DesignNode::new("1", "Row", NodeType::Frame);
        let mut layout = AutoLayout::new(LayoutDirection::Horizontal);
        layout.item_spacing = Some(8.0);
        layout.padding_left = Some(12.0);
        layout.primary_axis_align = Some("SPACE_BETWEEN".into());
        layout.counter_axis_align = Some("CENTER".into());
        node.auto_layout = Some(layout);

        let styles = map_styles(&node);
        assert_eq!(string(&styles, "flexDirection").as_deref(), Some("row"));
        assert_eq!(number(&styles, "marginRight"), Some(8.0));
        assert_eq!(number(&styles, "paddingLeft"), Some(12.0));
        assert_eq!(string(&styles, "justifyContent").as_deref(), Some("space-between"));
        assert_eq!(string(&styles, "alignItems").as_deref(), Some("center"));
        assert!(!styles.contains_key("gap"));
    }

    #[test]
    fn vertical_auto_layout_with_unknown_alignment_falls_back() {
        let mut node = DesignNode::new("1", "Column", NodeType::Frame);
        let mut layout = AutoLayout::new(LayoutDirection::Vertical);
        layout.item_spacing = Some(4.0);
        layout.primary_axis_align = Some("SPACE_AROUND".into());
        node.auto_layout = Some(layout);

        let styles = map_styles(&node);
        assert_eq!(string(&styles, "flexDirection").as_deref(), Some("column"));
        assert_eq!(number(&styles, "marginBottom"), Some(4.0));
        assert_eq!(string(&styles, "justifyContent").as_deref(), Some("flex-start"));
    }

    #[test]
    fn text_attributes_map_through_tables() {
        let mut node = DesignNode::new("1", "Label", NodeType::Text);
        node.characters = Some("Login".into());
        node.fills.push(Paint::solid(color(1.0, 1.0, 1.0, 1.0)));
        node.text_style = Some(TextStyle {
            font_family: Some("Inter".into()),
            font_size: Some(16.0),
            font_weight: Some(FontWeight::Numeric(600.0)),
            text_align_horizontal: Some("CENTER".into()),
            text_align_vertical: Some("BOTTOM".into()),
            letter_spacing: Some(0.5),
            line_height: Some(24.0),
            text_decoration: Some("UNDERLINE".into()),
            text_case: Some("UPPER".into()),
        });

        let styles = map_styles(&node);
        assert_eq!(string(&styles, "fontFamily").as_deref(), Some("Inter"));
        assert_eq!(number(&styles, "fontSize"), Some(16.0));
        assert_eq!(string(&styles, "fontWeight").as_deref(), Some("600"));
        assert_eq!(string(&styles, "textAlign").as_deref(), Some("center"));
        assert_eq!(string(&styles, "textAlignVertical").as_deref(), Some("bottom"));
        assert_eq!(number(&styles, "letterSpacing"), Some(0.5));
        assert_eq!(number(&styles, "lineHeight"), Some(24.0));
        assert_eq!(string(&styles, "textDecorationLine").as_deref(), Some("underline"));
        assert_eq!(string(&styles, "textTransform").as_deref(), Some("uppercase"));
        assert_eq!(string(&styles, "color").as_deref(), Some("rgb(255, 255, 255)"));
        assert!(!styles.contains_key("backgroundColor"));
    }

    #[test]
    fn font_weight_tokens_cover_aliases_and_names() {
        assert_eq!(font_weight_token(&FontWeight::Numeric(400.0)), Some("normal"));
        assert_eq!(font_weight_token(&FontWeight::Numeric(700.0)), Some("bold"));
        assert_eq!(font_weight_token(&FontWeight::Numeric(650.0)), Some("bold"));
        assert_eq!(font_weight_token(&FontWeight::Numeric(20.0)), Some("100"));
        assert_eq!(font_weight_token(&FontWeight::Named("Semi Bold".into())), Some("600"));
        assert_eq!(font_weight_token(&FontWeight::Named("Regular".into())), Some("normal"));
        assert_eq!(font_weight_token(&FontWeight::Named("300".into())), Some("300"));
        assert_eq!(font_weight_token(&FontWeight::Named("Condensed".into())), None);
    }

    #[test]
    fn drop_shadow_maps_offset_and_radius_pair() {
        let mut node = DesignNode::new("1", "Card", NodeType::Frame);
        node.effects.push(Effect {
            kind: EffectKind::InnerShadow,
            visible: true,
            color: Some(color(1.0, 0.0, 0.0, 1.0)),
            offset: Some((9.0, 9.0)),
            radius: Some(9.0),
            spread: None,
        });
        node.effects.push(Effect {
            kind: EffectKind::DropShadow,
            visible: true,
            color: Some(color(0.0, 0.0, 0.0, 0.25)),
            offset: Some((0.0, 4.0)),
            radius: Some(8.0),
            spread: None,
        });

        let styles = map_styles(&node);
        assert_eq!(string(&styles, "shadowColor").as_deref(), Some("rgb(0, 0, 0)"));
        assert_eq!(
            styles.get("shadowOffset"),
            Some(&StyleValue::Pair {
                width: 0.0,
                height: 4.0
            })
        );
        assert_eq!(number(&styles, "shadowRadius"), Some(8.0));
        assert_eq!(number(&styles, "shadowOpacity"), Some(0.25));
        assert_eq!(number(&styles, "elevation"), Some(4.0));
    }

    #[test]
    fn mapping_is_deterministic() {
        let mut node = DesignNode::new("1", "Box", NodeType::Frame);
        node.width = Some(10.0);
        node.fills.push(Paint::solid(color(0.2, 0.4, 0.6, 0.8)));
        node.auto_layout = Some(AutoLayout::new(LayoutDirection::Vertical));

        let first = map_styles(&node);
        let second = map_styles(&node);
        assert_eq!(first, second);
        let keys: Vec<&String> = first.keys().collect();
        assert_eq!(keys, vec!["width", "backgroundColor", "flexDirection"]);
    }
}
