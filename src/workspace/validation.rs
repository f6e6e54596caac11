//! Chain consistency validation
//!
//! Checks a whole block collection against the chain invariants: no dangling
//! pointers, symmetric parent/child links, `top_uuid` equal to the chain head
//! for every member, and no cycles. Produces a `ChainValidationResult` that
//! the host can log or show; nothing is repaired.

use std::collections::HashSet;

use tracing::warn;

use crate::chain::{collect_family, Blocks};
use crate::core::BlockId;

// ── Result types ────────────────────────────────────────────────────────────

/// A single validation finding.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationIssue {
    /// Block where the problem was found (if applicable).
    pub block_id: Option<BlockId>,
    /// Human-readable description.
    pub message: String,
}

/// Overall validation result.
#[derive(Debug, Clone, PartialEq)]
pub struct ChainValidationResult {
    pub valid: bool,
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

impl ChainValidationResult {
    fn ok() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    fn add_error(&mut self, block_id: Option<BlockId>, message: impl Into<String>) {
        self.valid = false;
        self.errors.push(ValidationIssue {
            block_id,
            message: message.into(),
        });
    }

    fn add_warning(&mut self, block_id: Option<BlockId>, message: impl Into<String>) {
        self.warnings.push(ValidationIssue {
            block_id,
            message: message.into(),
        });
    }

    /// Merge another result into this one.
    fn merge(&mut self, other: ChainValidationResult) {
        if !other.valid {
            self.valid = false;
        }
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }
}

// ── Validator ───────────────────────────────────────────────────────────────

/// Validates every chain in a block collection.
pub struct ChainValidator;

impl ChainValidator {
    /// Run every check against `blocks`.
    pub fn validate(blocks: &Blocks) -> ChainValidationResult {
        let mut result = ChainValidationResult::ok();

        result.merge(Self::check_dangling_pointers(blocks));
        result.merge(Self::check_pointer_symmetry(blocks));
        result.merge(Self::check_top_propagation(blocks));
        result.merge(Self::check_unreachable(blocks));
        result.merge(Self::check_hat_placement(blocks));

        if !result.valid {
            warn!(errors = result.errors.len(), "chain validation failed");
        }
        result
    }

    fn sorted_ids(blocks: &Blocks) -> Vec<BlockId> {
        let mut ids: Vec<BlockId> = blocks.keys().copied().collect();
        ids.sort();
        ids
    }

    // ── Individual checks ───────────────────────────────────────────────

    /// Every pointer must name a block in the collection.
    fn check_dangling_pointers(blocks: &Blocks) -> ChainValidationResult {
        let mut result = ChainValidationResult::ok();
        for id in Self::sorted_ids(blocks) {
            let block = &blocks[&id];
            let pointers = [
                ("parent", block.parent_uuid()),
                ("child", block.child_uuid()),
                ("top", Some(block.top_uuid())),
            ];
            for (label, target) in pointers {
                if let Some(target) = target {
                    if !blocks.contains_key(&target) {
                        result.add_error(
                            Some(id),
                            format!("Block '{}' has {} pointer to unknown block '{}'", id, label, target),
                        );
                    }
                }
            }
        }
        result
    }

    /// `a.child == b` iff `b.parent == a`.
    fn check_pointer_symmetry(blocks: &Blocks) -> ChainValidationResult {
        let mut result = ChainValidationResult::ok();
        for id in Self::sorted_ids(blocks) {
            let block = &blocks[&id];
            if let Some(child) = block.child_uuid().and_then(|c| blocks.get(&c)) {
                if child.parent_uuid() != Some(id) {
                    result.add_error(
                        Some(id),
                        format!(
                            "Block '{}' points to child '{}' whose parent is {:?}",
                            id,
                            child.uuid(),
                            child.parent_uuid()
                        ),
                    );
                }
            }
            if let Some(parent) = block.parent_uuid().and_then(|p| blocks.get(&p)) {
                if parent.child_uuid() != Some(id) {
                    result.add_error(
                        Some(id),
                        format!(
                            "Block '{}' points to parent '{}' whose child is {:?}",
                            id,
                            parent.uuid(),
                            parent.child_uuid()
                        ),
                    );
                }
            }
        }
        result
    }

    /// Walk each chain from its head; every member carries the head's uuid.
    fn check_top_propagation(blocks: &Blocks) -> ChainValidationResult {
        let mut result = ChainValidationResult::ok();
        for id in Self::sorted_ids(blocks) {
            let head = &blocks[&id];
            if !head.is_head() {
                continue;
            }
            match collect_family(head, blocks) {
                Ok(family) => {
                    for (member_id, member) in family {
                        if member.top_uuid() != id {
                            result.add_error(
                                Some(member_id),
                                format!(
                                    "Block '{}' has top '{}' but its chain head is '{}'",
                                    member_id,
                                    member.top_uuid(),
                                    id
                                ),
                            );
                        }
                    }
                }
                Err(err) => result.add_error(Some(id), format!("Chain headed by '{}': {}", id, err)),
            }
        }
        result
    }

    /// Blocks no head reaches can only sit on a parent-pointer cycle.
    fn check_unreachable(blocks: &Blocks) -> ChainValidationResult {
        let mut result = ChainValidationResult::ok();
        let mut reached: HashSet<BlockId> = HashSet::new();

        for head in blocks.values().filter(|b| b.is_head()) {
            let mut current = Some(head.uuid());
            while let Some(id) = current {
                if !reached.insert(id) {
                    break;
                }
                current = blocks.get(&id).and_then(|b| b.child_uuid());
            }
        }

        let mut stranded: Vec<BlockId> = blocks
            .keys()
            .filter(|id| !reached.contains(id))
            .copied()
            .collect();
        if !stranded.is_empty() {
            stranded.sort();
            let names: Vec<String> = stranded.iter().map(|id| id.to_string()).collect();
            result.add_error(
                None,
                format!("Blocks unreachable from any chain head (cycle): [{}]", names.join(", ")),
            );
        }
        result
    }

    /// Hat blocks should never have a parent; chains should stay within one tab.
    fn check_hat_placement(blocks: &Blocks) -> ChainValidationResult {
        let mut result = ChainValidationResult::ok();
        for id in Self::sorted_ids(blocks) {
            let block = &blocks[&id];
            if block.kind().is_hat() && !block.is_head() {
                result.add_error(Some(id), format!("Hat block '{}' has a parent", id));
            }
            if let Some(head) = blocks.get(&block.top_uuid()) {
                if head.tab_uuid() != block.tab_uuid() {
                    result.add_warning(
                        Some(id),
                        format!("Block '{}' is in a different tab than its chain head", id),
                    );
                }
            }
        }
        result
    }
}
