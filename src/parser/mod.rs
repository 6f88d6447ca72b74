//! Tree inspection: classification, aggregate analysis and pre-flight checks.

pub mod analyzer;
pub mod classifier;
pub mod validation;

pub use analyzer::{analyze, free_layout_policy, Analysis, LayoutClassification};
pub use classifier::{
    classify_node, classify_tree, ClassificationTable, RenderDecision, RenderReason,
    TargetPrimitive,
};
pub use validation::{validate, ValidationReport};
