//! Figma to React Native (f2rn) Library
//!
//! Turns a Figma design node into a React Native function component:
//! JSX markup, a TypeScript props interface and a `StyleSheet`.
//!
//! # Module Overview
//!
//! - [`types`] - Design node arena and typed style values
//! - [`parser`] - Node classification, tree analysis and pre-flight validation
//! - [`generator`] - Style mapping, style registry, markup emission and assembly
//! - [`figma`] - Figma API client and JSON to tree conversion
//! - [`batch`] - Throttled generation of many components
//! - [`config`] - Configuration file support
//! - [`output`] - JSON output schemas
//!
//! # Example
//!
//! ```no_run
//! use f2rn_lib::{design_tree_from_str, generate_component, GenerationOptions};
//!
//! # fn example() -> f2rn_lib::Result<()> {
//! let json = std::fs::read_to_string("button.json")?;
//! let tree = design_tree_from_str(&json, None)?;
//! let component = generate_component(&tree, &GenerationOptions::default(), None)?;
//! println!("{}", component.file_content);
//! # Ok(())
//! # }
//! ```

pub mod batch;
pub mod config;
pub mod error;
pub mod figma;
pub mod generator;
pub mod output;
pub mod parser;
pub mod progress;
pub mod resource;
pub mod types;

pub use batch::{generate_batch, BatchConfig, BatchItem, BatchItemResult, BatchReport};
pub use config::{Config, ConfigError, FigmaConfig};
pub use error::{
    ErrorCategory, ErrorPayload, F2rnError, GenerationError, Result, ValidationError,
};
pub use figma::{design_tree_from_str, design_tree_from_value, FigmaAuth, FigmaClient};
pub use generator::{
    assemble, generate_component, generate_file_content, generate_test_content, map_styles,
    ComponentSpec, GeneratedComponent, GenerationContext, GenerationOptions, MarkupEmitter,
    Placement, StyleRegistry,
};
pub use output::{
    BatchItemOutput, BatchOutput, ErrorOutput, F2rnOutput, GenerateOutput, ResourceDescriptor,
    F2RN_OUTPUT_VERSION,
};
pub use parser::{analyze, classify_tree, validate, Analysis, ClassificationTable};
pub use progress::ProgressCallback;
pub use resource::{parse_resource, FigmaInfo, ParsedResource, ResourceKind};
pub use types::{DesignNode, DesignTree, NodeId, NodeType, StyleMapping, StyleValue};
