//! Identity generation
//!
//! Every entity constructor mints its uuid through an [`IdGenerator`]. The
//! generator lays random bytes out as a version 4 UUID (version nibble `4`,
//! variant nibble one of `8`, `9`, `a`, `b`). Uniqueness is probabilistic.
//!
//! The entropy source is injectable so tests can pin the exact output:
//!
//! ```
//! use block_canvas::core::identity::IdGenerator;
//!
//! let mut a = IdGenerator::seeded(7);
//! let mut b = IdGenerator::seeded(7);
//! assert_eq!(a.generate(), b.generate());
//! ```

use std::fmt;

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use uuid::Uuid;

/// Mints version 4 UUIDs from a pluggable random source
pub struct IdGenerator {
    rng: Box<dyn RngCore + Send>,
}

impl IdGenerator {
    /// Generator backed by an OS-seeded cryptographic RNG
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Deterministic generator for tests and replays
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    /// Generator drawing from any caller-supplied source
    pub fn with_rng<R: RngCore + Send + 'static>(rng: R) -> Self {
        Self { rng: Box::new(rng) }
    }

    pub fn generate_uuid(&mut self) -> Uuid {
        let mut bytes = [0u8; 16];
        self.rng.fill_bytes(&mut bytes);
        uuid::Builder::from_random_bytes(bytes).into_uuid()
    }

    /// Lowercase hyphenated text form, e.g. `xxxxxxxx-xxxx-4xxx-yxxx-xxxxxxxxxxxx`
    pub fn generate(&mut self) -> String {
        self.generate_uuid().hyphenated().to_string()
    }

    /// Mint a typed identifier (`BlockId`, `TabId`, ...).
    pub fn mint<T: From<Uuid>>(&mut self) -> T {
        T::from(self.generate_uuid())
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for IdGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdGenerator").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::BlockId;
    use rand::rngs::mock::StepRng;
    use std::collections::HashSet;

    fn assert_v4_layout(text: &str) {
        assert_eq!(text.len(), 36);
        let chars: Vec<char> = text.chars().collect();
        for dash in [8, 13, 18, 23] {
            assert_eq!(chars[dash], '-', "dash expected at {} in {}", dash, text);
        }
        assert_eq!(chars[14], '4', "version nibble in {}", text);
        assert!(
            matches!(chars[19], '8' | '9' | 'a' | 'b'),
            "variant nibble in {}",
            text
        );
        assert!(text
            .chars()
            .all(|c| c == '-' || c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn test_generated_text_has_v4_layout() {
        let mut ids = IdGenerator::new();
        for _ in 0..256 {
            assert_v4_layout(&ids.generate());
        }
    }

    #[test]
    fn test_seeded_generators_agree() {
        let mut a = IdGenerator::seeded(42);
        let mut b = IdGenerator::seeded(42);
        for _ in 0..16 {
            assert_eq!(a.generate_uuid(), b.generate_uuid());
        }
    }

    #[test]
    fn test_fixed_entropy_still_sets_version_and_variant() {
        // All-ones entropy: every free bit set, version/variant bits forced.
        let mut ids = IdGenerator::with_rng(StepRng::new(u64::MAX, 0));
        let text = ids.generate();
        assert_eq!(text, "ffffffff-ffff-4fff-bfff-ffffffffffff");

        let mut zeros = IdGenerator::with_rng(StepRng::new(0, 0));
        assert_eq!(zeros.generate(), "00000000-0000-4000-8000-000000000000");
    }

    #[test]
    fn test_minted_ids_are_distinct() {
        let mut ids = IdGenerator::new();
        let minted: HashSet<BlockId> = (0..1000).map(|_| ids.mint()).collect();
        assert_eq!(minted.len(), 1000);
    }
}
