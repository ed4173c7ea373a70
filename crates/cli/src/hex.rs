//! Lowercase hex encoding for digests.

/// Hex decoding failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HexError {
    /// Input has an odd number of characters.
    #[error("odd number of hex digits ({0})")]
    OddLength(usize),

    /// A character is not a hex digit.
    #[error("invalid hex character {character:?} at offset {index}")]
    InvalidCharacter {
        /// Offending character.
        character: char,
        /// Character offset.
        index: usize,
    },

    /// Decoded length does not match the digest size.
    #[error("expected {expected} bytes, found {actual}")]
    WrongLength {
        /// Digest size.
        expected: usize,
        /// Decoded size.
        actual: usize,
    },
}

pub(crate) fn encode(bytes: &[u8]) -> String {
    use std::fmt::Write;

    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        let _ = write!(out, "{byte:02x}");
    }
    out
}

fn nibble(character: char, index: usize) -> Result<u8, HexError> {
    character
        .to_digit(16)
        .map(|digit| digit as u8)
        .ok_or(HexError::InvalidCharacter { character, index })
}

/// Decodes `text` into exactly `out.len()` bytes.
pub(crate) fn decode_into(text: &str, out: &mut [u8]) -> Result<(), HexError> {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() % 2 != 0 {
        return Err(HexError::OddLength(chars.len()));
    }
    if chars.len() / 2 != out.len() {
        return Err(HexError::WrongLength {
            expected: out.len(),
            actual: chars.len() / 2,
        });
    }
    for (index, (pair, byte)) in chars.chunks_exact(2).zip(out.iter_mut()).enumerate() {
        *byte = (nibble(pair[0], 2 * index)? << 4) | nibble(pair[1], 2 * index + 1)?;
    }
    Ok(())
}
