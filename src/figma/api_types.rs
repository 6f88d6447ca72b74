//! Figma REST API response types.
//!
//! Only the fields the generator reads are modelled; everything else in
//! the payload is ignored. Every field is optional or defaulted so
//! partial exports (plugin dumps, hand-trimmed fixtures) still decode.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

/// Response of `GET /v1/files/:key`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FigmaFileResponse {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub last_modified: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    pub document: FigmaNode,
}

/// Response of `GET /v1/files/:key/nodes?ids=...`.
///
/// Entries are `null` for ids Figma could not resolve.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FigmaNodesResponse {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub nodes: IndexMap<String, Option<FigmaNodeContainer>>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FigmaNodeContainer {
    pub document: FigmaNode,
}

/// One raw node of the Figma document tree.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FigmaNode {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub node_type: String,
    #[serde(default = "default_true")]
    pub visible: bool,
    pub children: Vec<FigmaNode>,

    pub absolute_bounding_box: Option<FigmaRect>,
    // Plugin exports carry parent-relative geometry directly.
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,

    pub corner_radius: Option<f64>,
    pub rectangle_corner_radii: Option<[f64; 4]>,
    pub opacity: Option<f64>,
    pub blend_mode: Option<String>,

    pub fills: Vec<FigmaPaint>,
    pub strokes: Vec<FigmaPaint>,
    pub stroke_weight: Option<f64>,
    pub stroke_align: Option<String>,
    pub effects: Vec<FigmaEffect>,

    pub characters: Option<String>,
    pub style: Option<FigmaTypeStyle>,

    pub layout_mode: Option<String>,
    pub padding_left: Option<f64>,
    pub padding_right: Option<f64>,
    pub padding_top: Option<f64>,
    pub padding_bottom: Option<f64>,
    pub item_spacing: Option<f64>,
    pub primary_axis_align_items: Option<String>,
    pub counter_axis_align_items: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct FigmaRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct FigmaColor {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    #[serde(default = "default_alpha")]
    pub a: f64,
}

fn default_alpha() -> f64 {
    1.0
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FigmaPaint {
    #[serde(rename = "type")]
    pub paint_type: String,
    #[serde(default = "default_true")]
    pub visible: bool,
    #[serde(default)]
    pub opacity: Option<f64>,
    #[serde(default)]
    pub color: Option<FigmaColor>,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct FigmaVector {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FigmaEffect {
    #[serde(rename = "type")]
    pub effect_type: String,
    #[serde(default = "default_true")]
    pub visible: bool,
    #[serde(default)]
    pub color: Option<FigmaColor>,
    #[serde(default)]
    pub offset: Option<FigmaVector>,
    #[serde(default)]
    pub radius: Option<f64>,
    #[serde(default)]
    pub spread: Option<f64>,
}

/// `fontWeight` is numeric in REST responses but a style name in some exports.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum FigmaFontWeight {
    Number(f64),
    Name(String),
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FigmaTypeStyle {
    pub font_family: Option<String>,
    pub font_size: Option<f64>,
    pub font_weight: Option<FigmaFontWeight>,
    /// Style name such as `"Semi Bold Italic"`, used when no weight is given.
    pub font_style: Option<String>,
    pub text_align_horizontal: Option<String>,
    pub text_align_vertical: Option<String>,
    pub letter_spacing: Option<f64>,
    pub line_height_px: Option<f64>,
    pub text_decoration: Option<String>,
    pub text_case: Option<String>,
}
