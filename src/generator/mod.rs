//! Component generation: style pass, markup emission and assembly.
//!
//! One call to [`generate_component`] owns one [`GenerationContext`]; the
//! context carries the classification side table, the style registry and
//! the per-node style names, so concurrent runs never share state.

pub mod assembler;
pub mod markup;
pub mod naming;
pub mod style_mapper;
pub mod style_registry;

use serde::{Deserialize, Serialize};

use crate::error::GenerationError;
use crate::parser::{
    analyze, classify_tree, validate, Analysis, ClassificationTable, TargetPrimitive,
};
use crate::types::{DesignTree, NodeId, StyleMapping};

pub use assembler::{assemble, generate_file_content, generate_test_content, ComponentSpec};
pub use markup::MarkupEmitter;
pub use naming::{component_name, resolve_component_name, style_base_name};
pub use style_mapper::{map_styles, DEFAULT_BORDER_WIDTH};
pub use style_registry::{Placement, StyleRegistry};

/// Output switches for one run. Config files may use snake_case keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerationOptions {
    #[serde(alias = "include_types")]
    pub include_types: bool,
    #[serde(alias = "use_style_sheet")]
    pub use_style_sheet: bool,
    #[serde(alias = "generate_tests")]
    pub generate_tests: bool,
    #[serde(alias = "format_code")]
    pub format_code: bool,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            include_types: true,
            use_style_sheet: true,
            generate_tests: false,
            format_code: true,
        }
    }
}

/// Everything one generation run reads and writes.
#[derive(Debug)]
pub struct GenerationContext<'a> {
    tree: &'a DesignTree,
    table: &'a ClassificationTable,
    options: GenerationOptions,
    registry: StyleRegistry,
    style_names: Vec<Option<String>>,
}

impl<'a> GenerationContext<'a> {
    pub fn new(
        tree: &'a DesignTree,
        table: &'a ClassificationTable,
        options: GenerationOptions,
    ) -> Self {
        Self {
            tree,
            table,
            options,
            registry: StyleRegistry::new(),
            style_names: vec![None; tree.len()],
        }
    }

    /// Map and register styles for every node that will produce markup.
    ///
    /// Walks depth-first from the root in child order, the same order the
    /// emitter uses, so suffixes are assigned in document order.
    pub fn run_style_pass(&mut self) {
        let root = self.tree.root_id();
        if self.table.is_renderable(root) {
            self.register_node(root, Placement::Root);
        }
    }

    fn register_node(&mut self, id: NodeId, placement: Placement) {
        let tree = self.tree;
        let node = tree.node(id);
        let name = self.registry.register(node, map_styles(node), placement);
        self.style_names[id.index()] = Some(name);

        if self.table.primitive(id) != TargetPrimitive::Container {
            return;
        }
        let child_placement = Placement::for_child(node);
        for &child in &node.children {
            if self.table.is_renderable(child) {
                self.register_node(child, child_placement);
            }
        }
    }

    pub fn tree(&self) -> &'a DesignTree {
        self.tree
    }

    pub fn table(&self) -> &'a ClassificationTable {
        self.table
    }

    pub fn options(&self) -> &GenerationOptions {
        &self.options
    }

    pub fn registry(&self) -> &StyleRegistry {
        &self.registry
    }

    pub fn style_name(&self, id: NodeId) -> Option<&str> {
        self.style_names.get(id.index())?.as_deref()
    }

    pub fn style_mapping(&self, id: NodeId) -> Option<&StyleMapping> {
        self.registry.get(self.style_name(id)?)
    }
}

/// Result of one generation run.
#[derive(Debug, Clone)]
pub struct GeneratedComponent {
    pub spec: ComponentSpec,
    pub analysis: Analysis,
    /// Registered style names in declaration order.
    pub style_names: Vec<String>,
    pub warnings: Vec<String>,
    pub file_content: String,
    pub test_content: Option<String>,
}

/// Run the full pipeline on `tree`.
pub fn generate_component(
    tree: &DesignTree,
    options: &GenerationOptions,
    explicit_name: Option<&str>,
) -> Result<GeneratedComponent, GenerationError> {
    let table = classify_tree(tree);
    let name = resolve_component_name(explicit_name, &tree.root().name);

    let report = validate(tree, &table);
    if report.has_errors() {
        return Err(GenerationError::Validation {
            component: name,
            errors: report.errors,
        });
    }

    let analysis = analyze(tree, &table);
    let mut ctx = GenerationContext::new(tree, &table, options.clone());
    ctx.run_style_pass();

    let spec = assemble(&ctx, &name, &analysis)?;
    let style_names = ctx.registry().names().map(str::to_string).collect();
    let file_content = if options.format_code {
        generate_file_content(&spec)
    } else {
        format!("{}\n", spec.join_sections().trim_end_matches('\n'))
    };
    let test_content = options
        .generate_tests
        .then(|| generate_test_content(&spec.name));

    Ok(GeneratedComponent {
        spec,
        analysis,
        style_names,
        warnings: report.warnings,
        file_content,
        test_content,
    })
}
