use std::{
    fmt::{self, Display},
    str::FromStr,
};

use sha2::{Digest as _, Sha256};

/// A 256-bit seed that fully determines a generated board.
///
/// Seeds print as 64 lowercase hex digits and parse back from the same form.
///
/// # Examples
///
/// ```
/// use tessera_generator::BoardSeed;
///
/// let seed = BoardSeed::from_phrase("weekly challenge");
/// let text = seed.to_string();
/// assert_eq!(text.len(), 64);
/// assert_eq!(text.parse::<BoardSeed>()?, seed);
/// # Ok::<(), tessera_generator::ParseSeedError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoardSeed([u8; 32]);

impl BoardSeed {
    /// Draws a fresh seed from the thread-local generator.
    #[must_use]
    pub fn random() -> Self {
        Self(rand::random())
    }

    /// Derives a seed from an arbitrary phrase with SHA-256.
    #[must_use]
    pub fn from_phrase(phrase: &str) -> Self {
        Self(Sha256::digest(phrase.as_bytes()).into())
    }

    /// Returns the raw seed bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl From<[u8; 32]> for BoardSeed {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
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

/// Error returned when parsing a [`BoardSeed`] from hex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseSeedError {
    /// The input is not exactly 64 characters.
    #[display("seed must be 64 hex digits, got {len}")]
    InvalidLength {
        /// Length of the input.
        len: usize,
    },
    /// The input contains a non-hex character.
    #[display("invalid hex digit {_0:?} in seed")]
    InvalidDigit(#[error(not(source))] char),
}

impl FromStr for BoardSeed {
    type Err = ParseSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let digits = s
            .chars()
            .map(|ch| ch.to_digit(16).ok_or(ParseSeedError::InvalidDigit(ch)))
            .collect::<Result<Vec<_>, _>>()?;
        if digits.len() != 64 {
            return Err(ParseSeedError::InvalidLength { len: digits.len() });
        }

        let mut bytes = [0; 32];
        for (byte, pair) in bytes.iter_mut().zip(digits.chunks_exact(2)) {
            #[expect(clippy::cast_possible_truncation)]
            let value = (pair[0] << 4 | pair[1]) as u8;
            *byte = value;
        }
        Ok(Self(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_round_trip() {
        let seed: BoardSeed = "1234567890abcdef1234567890abcdef1234567890abcdef1234567890abcdef"
            .parse()
            .unwrap();
        assert_eq!(seed.as_bytes()[0], 0x12);
        assert_eq!(seed.as_bytes()[31], 0xef);
        assert_eq!(
            seed.to_string(),
            "1234567890abcdef1234567890abcdef1234567890abcdef1234567890abcdef"
        );
        assert_eq!(
            "  1234567890ABCDEF1234567890abcdef1234567890abcdef1234567890abcdef\n"
                .parse::<BoardSeed>(),
            Ok(seed)
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            "abc".parse::<BoardSeed>(),
            Err(ParseSeedError::InvalidLength { len: 3 })
        );
        assert_eq!(
            "zz".parse::<BoardSeed>(),
            Err(ParseSeedError::InvalidDigit('z'))
        );
    }

    #[test]
    fn test_phrase_is_stable() {
        assert_eq!(BoardSeed::from_phrase("a"), BoardSeed::from_phrase("a"));
        assert_ne!(BoardSeed::from_phrase("a"), BoardSeed::from_phrase("b"));
        // SHA-256 of the empty string
        assert_eq!(
            BoardSeed::from_phrase("").to_string(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}
