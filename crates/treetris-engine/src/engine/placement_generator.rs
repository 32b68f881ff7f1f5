use std::{fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::Cell;

use super::placement::Placement;

/// Seed for deterministic placement generation.
///
/// A 128-bit seed, serialised as a 32-character hex string. Two generators
/// built from the same seed produce the same sequence of placements.
///
/// # Example
///
/// ```
/// use treetris_engine::PlacementSeed;
/// use rand::Rng as _;
///
/// let seed: PlacementSeed = rand::rng().random();
/// let parsed: PlacementSeed = seed.to_string().parse().unwrap();
/// assert_eq!(seed, parsed);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementSeed([u8; 16]);

impl PlacementSeed {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for PlacementSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid hex seed: {reason}")]
pub struct ParseSeedError {
    #[error(not(source))]
    reason: String,
}

impl FromStr for PlacementSeed {
    type Err = ParseSeedError;

    fn from_str(hex_str: &str) -> Result<Self, Self::Err> {
        if hex_str.len() != 32 {
            return Err(ParseSeedError {
                reason: format!("expected 32 characters, got {}", hex_str.len()),
            });
        }
        if let Some(bad) = hex_str.chars().find(|c| !c.is_ascii_hexdigit()) {
            return Err(ParseSeedError {
                reason: format!("{hex_str} (unexpected character {bad:?})"),
            });
        }
        let num = u128::from_str_radix(hex_str, 16).map_err(|e| ParseSeedError {
            reason: format!("{hex_str} ({e})"),
        })?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for PlacementSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PlacementSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

/// Allows generating random `PlacementSeed` values with `rng.random()`.
impl Distribution<PlacementSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PlacementSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        PlacementSeed(seed)
    }
}

/// Seeded source of spawn placements.
///
/// Every placement is a horizontal run of 1 to 4 cells on row 0 that fits
/// inside the grid's columns.
#[derive(Debug, Clone)]
pub struct PlacementGenerator {
    rng: Pcg32,
    columns: i32,
}

impl PlacementGenerator {
    /// Creates a generator for a grid whose largest column index is `width`.
    #[must_use]
    pub fn with_seed(seed: PlacementSeed, width: u16) -> Self {
        Self {
            rng: Pcg32::from_seed(seed.0),
            columns: i32::from(width) + 1,
        }
    }

    /// Draws the next spawn placement.
    ///
    /// # Panics
    ///
    /// Panics if the generated run is not a valid placement (should never happen).
    pub fn next_placement(&mut self) -> Placement {
        let len = self.rng.random_range(1..=self.columns.min(4));
        let x = self.rng.random_range(0..=self.columns - len);
        Placement::new((x..x + len).map(|cx| Cell::new(cx, 0)))
            .expect("generated run should always be a valid placement")
    }
}

impl Iterator for PlacementGenerator {
    type Item = Placement;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.next_placement())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MAX_PLACEMENT_CELLS;

    fn seed() -> PlacementSeed {
        PlacementSeed::from_bytes([
            0x12, 0x34, 0x56, 0x78, 0x9A, 0xBC, 0xDE, 0xF0, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66,
            0x77, 0x88,
        ])
    }

    #[test]
    fn test_seed_serializes_as_hex() {
        let serialized = serde_json::to_string(&seed()).unwrap();
        assert_eq!(serialized, "\"123456789abcdef01122334455667788\"");

        let deserialized: PlacementSeed = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, seed());
    }

    #[test]
    fn test_seed_accepts_uppercase_hex() {
        let parsed: PlacementSeed = "123456789ABCDEF01122334455667788".parse().unwrap();
        assert_eq!(parsed, seed());
    }

    #[test]
    fn test_seed_rejects_bad_input() {
        for input in [
            "",
            "0123",
            "ghijklmnopqrstuvwxyzghijklmnopqr",
            "+23456789abcdef01122334455667788",
            " 23456789abcdef01122334455667788",
        ] {
            let err = input.parse::<PlacementSeed>().unwrap_err();
            assert!(err.to_string().contains("invalid hex"));
        }
        let result: Result<PlacementSeed, _> = serde_json::from_str("\"abc\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let first: Vec<_> = PlacementGenerator::with_seed(seed(), 9).take(50).collect();
        let second: Vec<_> = PlacementGenerator::with_seed(seed(), 9).take(50).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_placements_fit_the_grid() {
        for width in [0, 1, 2, 9, 15] {
            let generator = PlacementGenerator::with_seed(seed(), width);
            for placement in generator.take(200) {
                assert!(!placement.cells().is_empty());
                assert!(placement.cells().len() <= MAX_PLACEMENT_CELLS);
                for cell in placement.cells() {
                    assert_eq!(cell.y, 0);
                    assert!((0..=i32::from(width)).contains(&cell.x));
                }
            }
        }
    }
}
