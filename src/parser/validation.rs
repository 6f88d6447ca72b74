//! Pre-flight structural checks run before any markup is produced.

use super::classifier::ClassificationTable;
use crate::error::ValidationError;
use crate::types::{DesignTree, NodeId};

pub const MAX_RECOMMENDED_DEPTH: usize = 10;
pub const MAX_RECOMMENDED_CHILDREN: usize = 20;

#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Only a root with nothing renderable is fatal; everything else is advisory.
pub fn validate(tree: &DesignTree, table: &ClassificationTable) -> ValidationReport {
    let mut report = ValidationReport::default();
    let root = tree.root();

    if !table.is_renderable(tree.root_id()) {
        report.errors.push(ValidationError::NoRenderableRoot {
            node_id: root.id.clone(),
            name: root.name.clone(),
        });
    }

    if root.width.is_none() || root.height.is_none() {
        report.warnings.push(format!(
            "Root node '{}' has no explicit dimensions; the component will size to its content",
            root.name
        ));
    }

    let depth = tree.max_depth();
    if depth > MAX_RECOMMENDED_DEPTH {
        report.warnings.push(format!(
            "Node tree is {} levels deep (more than {}); consider splitting it into smaller components",
            depth, MAX_RECOMMENDED_DEPTH
        ));
    }

    for idx in 0..tree.len() {
        let node = tree.node(NodeId(idx));
        if node.children.len() > MAX_RECOMMENDED_CHILDREN {
            report.warnings.push(format!(
                "Node '{}' has {} children (more than {}); consider a list component",
                node.name,
                node.children.len(),
                MAX_RECOMMENDED_CHILDREN
            ));
        }
    }

    report.warnings.extend(table.warnings().iter().cloned());
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::classifier::classify_tree;
    use crate::types::{Color, DesignNode, NodeType, Paint};

    fn visible_frame(id: &str) -> DesignNode {
        let mut node = DesignNode::new(id, "Frame", NodeType::Frame);
        node.fills.push(Paint::solid(Color {
            r: 1.0,
            g: 1.0,
            b: 1.0,
            a: 1.0,
        }));
        node.width = Some(100.0);
        node.height = Some(100.0);
        node
    }

    #[test]
    fn hidden_root_is_fatal() {
        let mut root = visible_frame("1");
        root.visible = false;
        let tree = DesignTree::new(root);

        let report = validate(&tree, &classify_tree(&tree));
        assert!(report.has_errors());
        assert!(matches!(
            report.errors[0],
            ValidationError::NoRenderableRoot { ref node_id, .. } if node_id == "1"
        ));
    }

    #[test]
    fn missing_dimensions_are_only_a_warning() {
        let mut root = visible_frame("1");
        root.width = None;
        let tree = DesignTree::new(root);

        let report = validate(&tree, &classify_tree(&tree));
        assert!(!report.has_errors());
        assert!(report.warnings.iter().any(|w| w.contains("dimensions")));
    }

    #[test]
    fn deep_and_wide_trees_warn() {
        let mut tree = DesignTree::new(visible_frame("root"));
        let mut parent = tree.root_id();
        for depth in 0..11 {
            parent = tree.add_child(parent, visible_frame(&format!("d{depth}")));
        }
        for i in 0..21 {
            tree.add_child(tree.root_id(), visible_frame(&format!("w{i}")));
        }

        let report = validate(&tree, &classify_tree(&tree));
        assert!(!report.has_errors());
        assert!(report.warnings.iter().any(|w| w.contains("levels deep")));
        assert!(report.warnings.iter().any(|w| w.contains("22 children")));
    }
}
