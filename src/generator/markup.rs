//! JSX emission for a styled node tree.

use super::GenerationContext;
use crate::parser::TargetPrimitive;
use crate::types::{format_mapping_inline, js_string_literal, NodeId};

const INDENT: &str = "  ";

/// Characters that cannot appear verbatim as JSX text.
const JSX_SPECIAL: &[char] = &['{', '}', '<', '>', '&', '\n', '\r'];

/// Renders nodes of one [`GenerationContext`] as JSX lines.
pub struct MarkupEmitter<'c, 'a> {
    ctx: &'c GenerationContext<'a>,
    used_text: bool,
}

impl<'c, 'a> MarkupEmitter<'c, 'a> {
    pub fn new(ctx: &'c GenerationContext<'a>) -> Self {
        Self {
            ctx,
            used_text: false,
        }
    }

    /// Whether any `<Text>` element has been emitted so far.
    pub fn used_text(&self) -> bool {
        self.used_text
    }

    /// Markup for `id` at `depth`, or an empty string if the node renders nothing.
    pub fn emit(&mut self, id: NodeId, depth: usize, is_root: bool) -> String {
        let table = self.ctx.table();
        if !table.is_renderable(id) {
            return String::new();
        }

        let node = self.ctx.tree().node(id);
        let pad = INDENT.repeat(depth);
        let style = self.style_attribute(id, is_root);

        match table.primitive(id) {
            TargetPrimitive::Text => {
                self.used_text = true;
                let text = node.characters.as_deref().unwrap_or("");
                if text.trim().is_empty() {
                    format!("{pad}<Text{style} />")
                } else {
                    format!("{pad}<Text{style}>{}</Text>", text_body(text))
                }
            }
            TargetPrimitive::ImagePlaceholder => {
                let comment_name = node.name.replace("*/", "* /");
                format!(
                    "{pad}<View{style}>\n{pad}{INDENT}{{/* Image placeholder: {comment_name} */}}\n{pad}</View>"
                )
            }
            TargetPrimitive::Container => {
                let children: Vec<String> = node
                    .children
                    .iter()
                    .map(|&child| self.emit(child, depth + 1, false))
                    .filter(|markup| !markup.is_empty())
                    .collect();
                if children.is_empty() {
                    format!("{pad}<View{style} />")
                } else {
                    format!("{pad}<View{style}>\n{}\n{pad}</View>", children.join("\n"))
                }
            }
        }
    }

    /// ` style={...}` including the leading space, or empty when there is nothing to apply.
    fn style_attribute(&self, id: NodeId, is_root: bool) -> String {
        let reference = if self.ctx.options().use_style_sheet {
            self.ctx.style_name(id).map(|name| format!("styles.{}", name))
        } else {
            self.ctx
                .style_mapping(id)
                .filter(|mapping| !mapping.is_empty())
                .map(format_mapping_inline)
        };

        match (reference, is_root) {
            (Some(reference), true) => format!(" style={{[{}, style]}}", reference),
            (None, true) => " style={style}".to_string(),
            (Some(reference), false) => format!(" style={{{}}}", reference),
            (None, false) => String::new(),
        }
    }
}

fn text_body(text: &str) -> String {
    if text.contains(JSX_SPECIAL) {
        format!("{{{}}}", js_string_literal(text))
    } else {
        text.to_string()
    }
}
