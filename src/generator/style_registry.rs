//! Named style table for one generation run.

use indexmap::IndexMap;

use super::naming::{style_base_name, ROOT_STYLE_NAME};
use crate::types::{DesignNode, StyleMapping, StyleValue};

/// Where a node sits relative to its parent, which decides positional cleanup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Root,
    /// Child of an auto-layout parent: position comes from the flex flow.
    FlexChild,
    Free,
}

impl Placement {
    pub fn for_child(parent: &DesignNode) -> Self {
        if parent.auto_layout.is_some() {
            Placement::FlexChild
        } else {
            Placement::Free
        }
    }
}

/// Insertion-ordered map of unique style names to mappings.
#[derive(Debug, Clone, Default)]
pub struct StyleRegistry {
    styles: IndexMap<String, StyleMapping>,
}

impl StyleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `mapping` under a fresh name derived from `node` and return the name.
    pub fn register(
        &mut self,
        node: &DesignNode,
        mut mapping: StyleMapping,
        placement: Placement,
    ) -> String {
        let base = match placement {
            Placement::Root => ROOT_STYLE_NAME.to_string(),
            _ => style_base_name(&node.name).unwrap_or_else(|| ROOT_STYLE_NAME.to_string()),
        };
        let name = self.unique_name(&base);

        match placement {
            Placement::Root => {
                mapping.shift_remove("left");
                mapping.shift_remove("top");
                mapping.insert("alignSelf".into(), "stretch".into());
            }
            Placement::FlexChild => {
                mapping.shift_remove("left");
                mapping.shift_remove("top");
            }
            Placement::Free => {}
        }

        self.styles.insert(name.clone(), optimize(mapping));
        name
    }

    fn unique_name(&self, base: &str) -> String {
        if !self.styles.contains_key(base) {
            return base.to_string();
        }
        let mut suffix = 1usize;
        loop {
            let candidate = format!("{}{}", base, suffix);
            if !self.styles.contains_key(&candidate) {
                return candidate;
            }
            suffix += 1;
        }
    }

    pub fn get(&self, name: &str) -> Option<&StyleMapping> {
        self.styles.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &StyleMapping)> {
        self.styles.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.styles.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}

/// Drop properties whose value equals the React Native default.
pub fn optimize(mapping: StyleMapping) -> StyleMapping {
    mapping
        .into_iter()
        .filter(|(key, value)| !is_default_value(key, value))
        .collect()
}

fn is_default_value(key: &str, value: &StyleValue) -> bool {
    let Some(number) = value.as_number() else {
        return false;
    };
    match key {
        "opacity" => number == 1.0,
        "borderWidth" | "borderRadius" | "flex" => number == 0.0,
        k if k.starts_with("padding") || k.starts_with("margin") => number == 0.0,
        _ => false,
    }
}
