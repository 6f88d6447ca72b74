//! Whole-tree facts that drive imports and prop suggestions.

use serde::{Deserialize, Serialize};

use super::classifier::{ClassificationTable, TargetPrimitive};
use crate::types::{DesignNode, DesignTree, NodeId, NodeType};

/// Name fragments that suggest a node is meant to be pressed or typed into.
pub const INTERACTIVE_KEYWORDS: &[&str] = &["button", "input", "field"];

const TEXT_PROPS: &[&str] = &["title", "subtitle", "description"];
const INTERACTIVE_PROPS: &[&str] = &["onPress", "onLongPress", "disabled"];
const IMAGE_PROPS: &[&str] = &["imageSource", "imageStyle"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutClassification {
    Flex,
    Absolute,
    Mixed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    pub component_type: TargetPrimitive,
    pub has_text: bool,
    pub has_images: bool,
    pub has_interactive_elements: bool,
    pub visible_child_count: usize,
    pub layout: LayoutClassification,
    pub suggested_props: Vec<String>,
}

#[derive(Default)]
struct Flags {
    has_text: bool,
    has_images: bool,
    has_interactive: bool,
}

/// Analyze the tree rooted at `tree.root()`.
///
/// The root is always inspected; below it, subtrees whose root is not
/// renderable are skipped. Children of image placeholders are still
/// visited even though they never produce markup.
pub fn analyze(tree: &DesignTree, table: &ClassificationTable) -> Analysis {
    let root_id = tree.root_id();
    let root = tree.root();

    let mut flags = Flags::default();
    visit(tree, table, root_id, &mut flags);

    let visible_child_count = root
        .children
        .iter()
        .filter(|&&child| table.is_renderable(child))
        .count();

    let layout = if root.auto_layout.is_some() {
        LayoutClassification::Flex
    } else {
        let children: Vec<&DesignNode> = tree.children(root_id).map(|(_, n)| n).collect();
        free_layout_policy(&children)
    };

    Analysis {
        component_type: table.primitive(root_id),
        has_text: flags.has_text,
        has_images: flags.has_images,
        has_interactive_elements: flags.has_interactive,
        visible_child_count,
        layout,
        suggested_props: suggested_props(&flags),
    }
}

fn visit(tree: &DesignTree, table: &ClassificationTable, id: NodeId, flags: &mut Flags) {
    let node = tree.node(id);

    if node.node_type == NodeType::Text && node.has_text_content() {
        flags.has_text = true;
    }
    if table.primitive(id) == TargetPrimitive::ImagePlaceholder {
        flags.has_images = true;
    }
    if is_interactive_name(&node.name) {
        flags.has_interactive = true;
    }

    for &child in &node.children {
        if table.is_renderable(child) {
            visit(tree, table, child, flags);
        }
    }
}

pub fn is_interactive_name(name: &str) -> bool {
    let lower = name.to_lowercase();
    INTERACTIVE_KEYWORDS.iter().any(|kw| lower.contains(kw))
}

/// Layout of a root without auto-layout.
///
/// Coarse placeholder heuristic: `Mixed` only when more than one child is
/// positioned, there are more than three children, and at least one child
/// carries explicit coordinates; `Absolute` otherwise.
pub fn free_layout_policy(children: &[&DesignNode]) -> LayoutClassification {
    let positioned = children.iter().filter(|c| c.has_position()).count();
    if positioned > 1 && children.len() > 3 && positioned >= 1 {
        LayoutClassification::Mixed
    } else {
        LayoutClassification::Absolute
    }
}

fn suggested_props(flags: &Flags) -> Vec<String> {
    let mut props = Vec::new();
    if flags.has_text {
        props.extend(TEXT_PROPS.iter().map(|p| p.to_string()));
    }
    if flags.has_interactive {
        props.extend(INTERACTIVE_PROPS.iter().map(|p| p.to_string()));
    }
    if flags.has_images {
        props.extend(IMAGE_PROPS.iter().map(|p| p.to_string()));
    }
    props
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::classifier::classify_tree;
    use crate::types::{AutoLayout, Color, LayoutDirection, Paint};

    fn fill() -> Paint {
        Paint::solid(Color {
            r: 0.0,
            g: 0.0,
            b: 0.0,
            a: 1.0,
        })
    }

    fn text(id: &str, name: &str, characters: &str) -> DesignNode {
        let mut node = DesignNode::new(id, name, NodeType::Text);
        node.characters = Some(characters.into());
        node
    }

    #[test]
    fn text_child_suggests_text_props() {
        let mut root = DesignNode::new("1", "Card", NodeType::Frame);
        root.fills.push(fill());
        let mut tree = DesignTree::new(root);
        tree.add_child(tree.root_id(), text("2", "Title", "Hello"));

        let analysis = analyze(&tree, &classify_tree(&tree));
        assert!(analysis.has_text);
        assert!(!analysis.has_interactive_elements);
        assert_eq!(analysis.suggested_props, vec!["title", "subtitle", "description"]);
        assert_eq!(analysis.visible_child_count, 1);
        assert_eq!(analysis.component_type, TargetPrimitive::Container);
    }

    #[test]
    fn interactive_keywords_match_case_insensitively() {
        assert!(is_interactive_name("Primary BUTTON"));
        assert!(is_interactive_name("emailField"));
        assert!(is_interactive_name("Search Input"));
        assert!(!is_interactive_name("Header"));
    }

    #[test]
    fn hidden_subtrees_are_pruned() {
        let mut root = DesignNode::new("1", "Screen", NodeType::Frame);
        root.fills.push(fill());
        let mut tree = DesignTree::new(root);
        let mut hidden = DesignNode::new("2", "Submit Button", NodeType::Frame);
        hidden.visible = false;
        let hidden = tree.add_child(tree.root_id(), hidden);
        tree.add_child(hidden, text("3", "Label", "Submit"));

        let analysis = analyze(&tree, &classify_tree(&tree));
        assert!(!analysis.has_text);
        assert!(!analysis.has_interactive_elements);
        assert_eq!(analysis.visible_child_count, 0);
        assert!(analysis.suggested_props.is_empty());
    }

    #[test]
    fn image_children_still_feed_aggregate_flags() {
        let mut root = DesignNode::new("1", "Logo", NodeType::Frame);
        root.fills.push(fill());
        let mut tree = DesignTree::new(root);
        let vector = tree.add_child(tree.root_id(), DesignNode::new("2", "Mark", NodeType::Vector));
        tree.add_child(vector, text("3", "Caption", "ACME"));

        let analysis = analyze(&tree, &classify_tree(&tree));
        assert!(analysis.has_images);
        assert!(analysis.has_text);
        assert_eq!(
            analysis.suggested_props,
            vec!["title", "subtitle", "description", "imageSource", "imageStyle"]
        );
    }

    #[test]
    fn auto_layout_root_is_flex() {
        let mut root = DesignNode::new("1", "Row", NodeType::Frame);
        root.fills.push(fill());
        root.auto_layout = Some(AutoLayout::new(LayoutDirection::Horizontal));
        let tree = DesignTree::new(root);

        let analysis = analyze(&tree, &classify_tree(&tree));
        assert_eq!(analysis.layout, LayoutClassification::Flex);
    }

    #[test]
    fn free_layout_needs_many_positioned_children_to_be_mixed() {
        let positioned = |id: &str| {
            let mut node = DesignNode::new(id, "Box", NodeType::Rectangle);
            node.x = Some(0.0);
            node.y = Some(0.0);
            node
        };
        let loose = DesignNode::new("9", "Loose", NodeType::Rectangle);

        let few = [positioned("1"), positioned("2"), loose.clone()];
        let few_refs: Vec<&DesignNode> = few.iter().collect();
        assert_eq!(free_layout_policy(&few_refs), LayoutClassification::Absolute);

        let many = [positioned("1"), positioned("2"), loose.clone(), loose.clone()];
        let many_refs: Vec<&DesignNode> = many.iter().collect();
        assert_eq!(free_layout_policy(&many_refs), LayoutClassification::Mixed);

        let one = [positioned("1"), loose.clone(), loose.clone(), loose];
        let one_refs: Vec<&DesignNode> = one.iter().collect();
        assert_eq!(free_layout_policy(&one_refs), LayoutClassification::Absolute);
    }
}
