//! `merkle` subcommand.

use std::fs;
use std::io::{Read, Write};
use std::path::PathBuf;

use sha_simd::{Chunked, Dispatcher, Sha256, Sha512};

use crate::HashAlgorithm;
use crate::error::CliError;
use crate::hex;

/// Parses one hex digest per line. Blank lines are ignored.
pub(crate) fn parse_leaves<A: Chunked>(text: &str) -> Result<Vec<A::Digest>, CliError> {
    let mut leaves = Vec::new();
    for (index, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let mut leaf = A::ZERO_DIGEST;
        hex::decode_into(line, leaf.as_mut()).map_err(|source| CliError::InvalidLeaf {
            line: index + 1,
            source,
        })?;
        leaves.push(leaf);
    }
    Ok(leaves)
}

fn root_hex<A: Chunked>(dispatcher: &Dispatcher, text: &str) -> Result<String, CliError> {
    let leaves = parse_leaves::<A>(text)?;
    let root = dispatcher.merkle_root::<A>(&leaves);
    tracing::info!(target: "cli", algorithm = A::NAME, leaves = leaves.len(), "merkle root computed");
    Ok(hex::encode(root.as_ref()))
}

fn read_text(file: Option<&PathBuf>, stdin: &mut dyn Read) -> Result<String, CliError> {
    let mut text = String::new();
    match file {
        Some(path) => {
            text = fs::read_to_string(path).map_err(|source| CliError::Read {
                path: path.clone(),
                source,
            })?;
        }
        None => {
            stdin
                .read_to_string(&mut text)
                .map_err(|source| CliError::Read {
                    path: PathBuf::from("-"),
                    source,
                })?;
        }
    }
    Ok(text)
}

/// Runs `merkle` and returns the exit status.
pub(crate) fn run<Out: Write>(
    dispatcher: &Dispatcher,
    algorithm: HashAlgorithm,
    file: Option<&PathBuf>,
    stdin: &mut dyn Read,
    stdout: &mut Out,
) -> Result<i32, CliError> {
    let root = match algorithm {
        HashAlgorithm::Sha1 => {
            return Err(CliError::NotChunked {
                operation: "merkle",
                algorithm: algorithm.name(),
            });
        }
        HashAlgorithm::Sha256 => root_hex::<Sha256>(dispatcher, &read_text(file, stdin)?)?,
        HashAlgorithm::Sha512 => root_hex::<Sha512>(dispatcher, &read_text(file, stdin)?)?,
    };
    writeln!(stdout, "{root}")?;
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hex::HexError;

    #[test]
    fn blank_lines_are_skipped() {
        let text = format!("\n{}\n\n  {}  \n", "00".repeat(32), "ff".repeat(32));
        let leaves = parse_leaves::<Sha256>(&text).unwrap();
        assert_eq!(leaves, [[0u8; 32], [0xff; 32]]);
    }

    #[test]
    fn bad_leaf_reports_line_number() {
        let text = format!("{}\n{}\n", "00".repeat(32), "00".repeat(31));
        match parse_leaves::<Sha256>(&text) {
            Err(CliError::InvalidLeaf { line, source }) => {
                assert_eq!(line, 2);
                assert_eq!(
                    source,
                    HexError::WrongLength {
                        expected: 32,
                        actual: 31
                    }
                );
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
