//! Kind Registry - lookup table from block kind to appearance
//!
//! Block construction resolves its path and colors here. A kind that is not
//! in the table cannot be instantiated, so a host can withhold kinds (for
//! example in a restricted palette) by building a registry without them.
//!
//! The registry uses `Arc<RwLock<HashMap>>` so one table can be shared by
//! several workspaces and edited while they read from it.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use super::appearance::BlockAppearance;
use crate::categories::BlockKind;

/// Registry of instantiable block kinds
#[derive(Clone)]
pub struct KindRegistry {
    kinds: Arc<RwLock<HashMap<BlockKind, BlockAppearance>>>,
}

impl KindRegistry {
    /// Create a registry with no kinds registered
    ///
    /// # Example
    /// ```
    /// use block_canvas::core::registry::KindRegistry;
    ///
    /// let registry = KindRegistry::new();
    /// assert_eq!(registry.count(), 0);
    /// ```
    pub fn new() -> Self {
        Self {
            kinds: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Registry holding every built-in kind with its built-in appearance
    pub fn with_builtin_kinds() -> Self {
        let registry = Self::new();
        {
            let mut kinds = registry.kinds.write();
            for kind in BlockKind::ALL {
                kinds.insert(kind, BlockAppearance::builtin(kind));
            }
        }
        registry
    }

    /// Register a kind
    ///
    /// # Returns
    /// * `Ok(())` if registration succeeds
    /// * `Err(RegistryError::DuplicateKind)` if the kind is already present
    pub fn register(&self, kind: BlockKind, appearance: BlockAppearance) -> Result<(), RegistryError> {
        let mut kinds = self.kinds.write();

        if kinds.contains_key(&kind) {
            return Err(RegistryError::DuplicateKind(kind));
        }

        kinds.insert(kind, appearance);
        Ok(())
    }

    /// Replace the appearance of an already registered kind
    pub fn restyle(&self, kind: BlockKind, appearance: BlockAppearance) -> Result<(), RegistryError> {
        let mut kinds = self.kinds.write();
        let slot = kinds.get_mut(&kind).ok_or(RegistryError::KindNotFound(kind))?;
        *slot = appearance;
        Ok(())
    }

    pub fn unregister(&self, kind: BlockKind) -> Result<(), RegistryError> {
        let mut kinds = self.kinds.write();

        kinds.remove(&kind).ok_or(RegistryError::KindNotFound(kind))?;

        Ok(())
    }

    /// Appearance of `kind`, if registered
    pub fn appearance(&self, kind: BlockKind) -> Option<BlockAppearance> {
        let kinds = self.kinds.read();
        kinds.get(&kind).cloned()
    }

    pub fn contains(&self, kind: BlockKind) -> bool {
        let kinds = self.kinds.read();
        kinds.contains_key(&kind)
    }

    /// Registered kinds in declaration order
    pub fn kinds(&self) -> Vec<BlockKind> {
        let kinds = self.kinds.read();
        let mut out: Vec<_> = kinds.keys().copied().collect();
        out.sort();
        out
    }

    pub fn count(&self) -> usize {
        let kinds = self.kinds.read();
        kinds.len()
    }
}

impl Default for KindRegistry {
    fn default() -> Self {
        Self::with_builtin_kinds()
    }
}

impl std::fmt::Debug for KindRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KindRegistry")
            .field("kinds", &self.kinds())
            .finish()
    }
}

/// Registry error types
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// Kind is already in the table
    #[error("Duplicate block kind: {0}")]
    DuplicateKind(BlockKind),

    /// Kind is not in the table
    #[error("Block kind not registered: {0}")]
    KindNotFound(BlockKind),
}
