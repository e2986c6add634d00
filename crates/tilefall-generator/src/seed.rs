use std::{
    fmt::{self, Display},
    str::FromStr,
};

use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg64;

/// A 256-bit seed that reproduces a generated board.
///
/// Seeds are written as 64 lowercase hexadecimal digits.
///
/// # Examples
///
/// ```
/// use tilefall_generator::BoardSeed;
///
/// let seed: BoardSeed = "c1d44bd6afaf8af64f126546884e19298acbdc33c3924a28136715de946ef3f1"
///     .parse()?;
/// assert_eq!(
///     seed.to_string(),
///     "c1d44bd6afaf8af64f126546884e19298acbdc33c3924a28136715de946ef3f1"
/// );
/// # Ok::<(), tilefall_generator::BoardSeedParseError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoardSeed([u8; 32]);

impl BoardSeed {
    /// Creates a seed from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the raw bytes of the seed.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Draws a fresh seed from the thread-local generator.
    #[must_use]
    pub fn random() -> Self {
        let mut bytes = [0; 32];
        rand::rng().fill(&mut bytes);
        Self(bytes)
    }

    /// Returns the deterministic generator this seed stands for.
    #[must_use]
    pub fn rng(&self) -> Pcg64 {
        Pcg64::from_seed(self.0)
    }
}

impl Display for BoardSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

/// Errors returned when parsing a [`BoardSeed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum BoardSeedParseError {
    /// The text is not 64 characters long.
    #[display("seed must be 64 hex digits, got {len} characters")]
    InvalidLength {
        /// Number of characters found.
        len: usize,
    },
    /// A character is not a hexadecimal digit.
    #[display("invalid hex digit {ch:?} at offset {index}")]
    InvalidDigit {
        /// The offending character.
        ch: char,
        /// Zero-based character offset.
        index: usize,
    },
}

impl FromStr for BoardSeed {
    type Err = BoardSeedParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let len = s.chars().count();
        if len != 64 {
            return Err(BoardSeedParseError::InvalidLength { len });
        }
        let mut bytes = [0; 32];
        let mut chars = s.chars().enumerate();
        for byte in &mut bytes {
            for _ in 0..2 {
                let Some((index, ch)) = chars.next() else {
                    unreachable!("length checked above");
                };
                let digit = ch
                    .to_digit(16)
                    .ok_or(BoardSeedParseError::InvalidDigit { ch, index })?;
                #[expect(clippy::cast_possible_truncation)]
                let digit = digit as u8;
                *byte = (*byte << 4) | digit;
            }
        }
        Ok(Self(bytes))
    }
}

#[cfg(test)]
mod tests {
    use rand::Rng as _;

    use super::*;

    const SEED: &str = "1234567890abcdef1234567890abcdef1234567890abcdef1234567890abcdef";

    #[test]
    fn test_parse_and_display() {
        let seed: BoardSeed = SEED.parse().expect("valid seed");
        assert_eq!(seed.as_bytes()[0], 0x12);
        assert_eq!(seed.as_bytes()[7], 0xef);
        assert_eq!(seed.to_string(), SEED);

        let upper: BoardSeed = SEED.to_uppercase().parse().expect("valid seed");
        assert_eq!(upper, seed);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            "abc".parse::<BoardSeed>(),
            Err(BoardSeedParseError::InvalidLength { len: 3 })
        );
        let bad = format!("{}g", &SEED[..63]);
        assert_eq!(
            bad.parse::<BoardSeed>(),
            Err(BoardSeedParseError::InvalidDigit { ch: 'g', index: 63 })
        );
    }

    #[test]
    fn test_same_seed_same_stream() {
        let seed: BoardSeed = SEED.parse().expect("valid seed");
        let (mut a, mut b) = (seed.rng(), seed.rng());
        let a: Vec<u32> = (0..8).map(|_| a.random()).collect();
        let b: Vec<u32> = (0..8).map(|_| b.random()).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_random_seeds_differ() {
        assert_ne!(BoardSeed::random(), BoardSeed::random());
    }
}
