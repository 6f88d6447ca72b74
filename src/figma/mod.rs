//! Figma input: REST client, raw API types and conversion to [`DesignTree`].
//!
//! - [`FigmaClient`] - HTTP client for the Figma REST API
//! - [`design_tree_from_str`] - decode a local JSON export
//! - API types for parsing Figma JSON responses
//!
//! [`DesignTree`]: crate::types::DesignTree

pub mod api_types;
pub mod client;
pub mod conversion;


pub use client::{FigmaAuth, FigmaClient, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use conversion::{build_design_tree, design_tree_from_str, design_tree_from_value};

pub use api_types::{
    FigmaColor, FigmaEffect, FigmaFileResponse, FigmaFontWeight, FigmaNode, FigmaNodeContainer,
    FigmaNodesResponse, FigmaPaint, FigmaRect, FigmaTypeStyle,
};
