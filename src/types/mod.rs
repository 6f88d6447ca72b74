//! Core types used throughout the f2rn library.
//!
//! - [`DesignTree`] / [`DesignNode`] - the input node arena
//! - [`StyleValue`] / [`StyleMapping`] - per-node React Native styles

pub mod node;
pub mod style;

pub use node::{
    AutoLayout, Color, DesignNode, DesignTree, Effect, EffectKind, FontWeight, LayoutDirection,
    NodeId, NodeType, Paint, PaintKind, StrokeAlign, TextStyle,
};
pub use style::{
    format_mapping_block, format_mapping_inline, format_number, js_string_literal, StyleMapping,
    StyleValue,
};
