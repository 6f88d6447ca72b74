//! Combines markup, styles and analysis into component source.

use serde::{Deserialize, Serialize};

use super::markup::MarkupEmitter;
use super::GenerationContext;
use crate::error::GenerationError;
use crate::parser::Analysis;
use crate::types::format_mapping_block;

/// Source sections of one generated component, in file order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentSpec {
    pub name: String,
    pub imports: String,
    pub interfaces: String,
    pub body: String,
    pub style_block: String,
    pub exports: String,
}

impl ComponentSpec {
    /// Non-empty sections separated by one blank line, without normalization.
    pub fn join_sections(&self) -> String {
        [
            &self.imports,
            &self.interfaces,
            &self.body,
            &self.style_block,
            &self.exports,
        ]
        .iter()
        .filter(|section| !section.trim().is_empty())
        .map(|section| section.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
    }
}

/// Build the component source sections from a context whose style pass has run.
pub fn assemble(
    ctx: &GenerationContext<'_>,
    name: &str,
    analysis: &Analysis,
) -> Result<ComponentSpec, GenerationError> {
    let options = ctx.options();

    let mut emitter = MarkupEmitter::new(ctx);
    let markup = emitter.emit(ctx.tree().root_id(), 2, true);
    if markup.is_empty() {
        return Err(GenerationError::Internal {
            component: name.to_string(),
            message: "root produced no markup".to_string(),
        });
    }
    let uses_text = analysis.has_text || emitter.used_text();

    let interfaces = if options.include_types {
        props_interface(name, &analysis.suggested_props)
    } else {
        String::new()
    };

    let style_block = if options.use_style_sheet {
        style_sheet(ctx)
    } else {
        String::new()
    };

    Ok(ComponentSpec {
        name: name.to_string(),
        imports: imports(uses_text, options.use_style_sheet, options.include_types),
        interfaces,
        body: body(name, &markup, options.include_types),
        style_block,
        exports: format!("export default {};", name),
    })
}

fn imports(uses_text: bool, use_style_sheet: bool, include_types: bool) -> String {
    let mut names = vec!["View"];
    if uses_text {
        names.push("Text");
    }
    if use_style_sheet {
        names.push("StyleSheet");
    }
    if include_types {
        names.push("ViewStyle");
        if uses_text {
            names.push("TextStyle");
        }
    }
    format!(
        "import React from 'react';\nimport {{ {} }} from 'react-native';",
        names.join(", ")
    )
}

/// TypeScript type for a suggested prop.
pub fn prop_type(prop: &str) -> &'static str {
    match prop {
        "onPress" | "onLongPress" => "() => void",
        "disabled" => "boolean",
        p if p.to_ascii_lowercase().contains("image") => "any",
        _ => "string",
    }
}

fn props_interface(name: &str, props: &[String]) -> String {
    let mut lines = vec![format!("export interface {}Props {{", name)];
    for prop in props {
        lines.push(format!("  {}?: {};", prop, prop_type(prop)));
    }
    lines.push("  style?: ViewStyle;".to_string());
    lines.push("}".to_string());
    lines.join("\n")
}

fn body(name: &str, markup: &str, include_types: bool) -> String {
    let signature = if include_types {
        format!(
            "export const {name}: React.FC<{name}Props> = ({{ style }}) => {{",
            name = name
        )
    } else {
        format!("export const {} = ({{ style }}) => {{", name)
    };
    [
        signature,
        "  return (".to_string(),
        markup.to_string(),
        "  );".to_string(),
        "};".to_string(),
    ]
    .join("\n")
}

fn style_sheet(ctx: &GenerationContext<'_>) -> String {
    let mut lines = vec!["const styles = StyleSheet.create({".to_string()];
    for (name, mapping) in ctx.registry().iter() {
        lines.push(format!("  {}: {},", name, format_mapping_block(mapping, 2)));
    }
    lines.push("});".to_string());
    lines.join("\n")
}

/// Assemble the final file text.
///
/// Idempotent: normalizing already-normalized output changes nothing.
pub fn generate_file_content(spec: &ComponentSpec) -> String {
    normalize(&spec.join_sections())
}

/// Collapse blank-line runs to one, strip trailing whitespace, end with one newline.
pub fn normalize(source: &str) -> String {
    let mut out = String::with_capacity(source.len() + 1);
    let mut blank_run = 0usize;
    for line in source.lines() {
        let line = line.trim_end();
        if line.is_empty() {
            blank_run += 1;
            if blank_run > 1 {
                continue;
            }
        } else {
            blank_run = 0;
        }
        out.push_str(line);
        out.push('\n');
    }
    let trimmed_len = out.trim_end().len();
    out.truncate(trimmed_len);
    out.push('\n');
    out
}

/// Snapshot test for the component, written for react-test-renderer.
pub fn generate_test_content(name: &str) -> String {
    format!(
        "import React from 'react';
import renderer from 'react-test-renderer';
import {name} from './{name}';

describe('<{name} />', () => {{
  it('renders correctly', () => {{
    const tree = renderer.create(<{name} />).toJSON();
    expect(tree).toMatchSnapshot();
  }});
}});
",
        name = name
    )
}
