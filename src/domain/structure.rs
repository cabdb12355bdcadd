//! Versioned top-level block list persisted for each print template.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::domain::block::Block;
use crate::errors::{TemplateError, TemplateResult};

/// Structure version produced by this build.
pub const CURRENT_STRUCTURE_VERSION: u32 = 1;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TemplateStructure {
    pub version: u32,
    pub blocks: Vec<Block>,
}

impl Default for TemplateStructure {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl TemplateStructure {
    /// Builds a structure at the current version.
    #[must_use]
    pub fn new(blocks: Vec<Block>) -> Self {
        Self {
            version: CURRENT_STRUCTURE_VERSION,
            blocks,
        }
    }

    /// Parses the serialized form stored by the template repository.
    pub fn from_json(source: &str) -> TemplateResult<Self> {
        serde_json::from_str(source).map_err(TemplateError::MalformedStructure)
    }

    pub fn to_json(&self) -> TemplateResult<String> {
        serde_json::to_string(self).map_err(TemplateError::MalformedStructure)
    }

    /// Whether this build understands every block layout of this version.
    pub fn is_supported_version(&self) -> bool {
        self.version <= CURRENT_STRUCTURE_VERSION
    }

    /// All blocks of the tree in depth-first order, containers before their
    /// children.
    pub fn iter_blocks(&self) -> impl Iterator<Item = &Block> {
        let mut stack: Vec<&Block> = self.blocks.iter().rev().collect();
        std::iter::from_fn(move || {
            let block = stack.pop()?;
            for list in block.child_lists().into_iter().rev() {
                stack.extend(list.iter().rev());
            }
            Some(block)
        })
    }

    /// Finds a block anywhere in the tree by its identifier.
    pub fn find_block(&self, id: &str) -> Option<&Block> {
        self.iter_blocks().find(|block| block.id.as_str() == id)
    }

    /// Identifiers used by more than one block, in first-seen order.
    pub fn duplicate_ids(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut duplicates = Vec::new();
        for block in self.iter_blocks() {
            let id = block.id.as_str();
            if !seen.insert(id) && !duplicates.iter().any(|d: &String| d == id) {
                duplicates.push(id.to_string());
            }
        }
        duplicates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::block::BlockKind;

    fn nested_structure() -> TemplateStructure {
        TemplateStructure::from_json(
            r#"{
                "version": 1,
                "blocks": [
                    { "id": "a", "type": "spacer", "props": { "height": 4 } },
                    { "id": "b", "type": "two-column", "props": {
                        "ratio": "33-67",
                        "left": [{ "id": "c", "type": "page-break" }],
                        "right": [{ "id": "d", "type": "conditional", "props": {
                            "field": "followup.notes",
                            "condition": "exists",
                            "children": [{ "id": "a", "type": "divider", "props": {} }]
                        } }]
                    } }
                ]
            }"#,
        )
        .expect("valid structure")
    }

    #[test]
    fn iterates_depth_first() {
        let structure = nested_structure();

        let ids: Vec<_> = structure.iter_blocks().map(|b| b.id.as_str()).collect();

        assert_eq!(ids, vec!["a", "b", "c", "d", "a"]);
    }

    #[test]
    fn finds_nested_block() {
        let structure = nested_structure();

        let block = structure.find_block("c").expect("nested block");

        assert_eq!(block.kind, BlockKind::PageBreak);
        assert!(structure.find_block("missing").is_none());
    }

    #[test]
    fn reports_duplicate_ids() {
        let structure = nested_structure();

        assert_eq!(structure.duplicate_ids(), vec!["a".to_string()]);
    }

    #[test]
    fn json_round_trip_is_lossless() {
        let structure = nested_structure();

        let json = structure.to_json().expect("serializable");
        let reloaded = TemplateStructure::from_json(&json).expect("valid structure");

        assert_eq!(reloaded, structure);
    }

    #[test]
    fn malformed_json_is_reported() {
        let result = TemplateStructure::from_json(r#"{ "version": 1, "blocks": {} }"#);

        assert!(matches!(result, Err(TemplateError::MalformedStructure(_))));
    }
}
