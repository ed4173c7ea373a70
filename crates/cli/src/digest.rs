//! `digest` subcommand.

use std::ffi::OsString;
use std::fs;
use std::io::{Read, Write};
use std::path::PathBuf;

use sha_simd::{Algorithm, Chunked, Dispatcher, Sha1, Sha256, Sha512};

use crate::error::CliError;
use crate::hex;
use crate::{HashAlgorithm, PROGRAM_NAME};

/// Where one message comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Source {
    Stdin,
    File(PathBuf),
}

impl Source {
    pub(crate) fn from_operands(files: Vec<OsString>) -> Vec<Self> {
        if files.is_empty() {
            return vec![Self::Stdin];
        }
        files
            .into_iter()
            .map(|file| {
                if file == "-" {
                    Self::Stdin
                } else {
                    Self::File(PathBuf::from(file))
                }
            })
            .collect()
    }

    fn label(&self) -> String {
        match self {
            Self::Stdin => "-".to_owned(),
            Self::File(path) => path.display().to_string(),
        }
    }

    fn read(&self, stdin: &mut dyn Read) -> Result<Vec<u8>, CliError> {
        match self {
            Self::Stdin => {
                let mut data = Vec::new();
                stdin
                    .read_to_end(&mut data)
                    .map_err(|source| CliError::Read {
                        path: PathBuf::from("-"),
                        source,
                    })?;
                Ok(data)
            }
            Self::File(path) => fs::read(path).map_err(|source| CliError::Read {
                path: path.clone(),
                source,
            }),
        }
    }
}

/// Reads every source and hashes the readable ones in one lane-parallel batch.
fn hash_sources<A: Algorithm>(
    dispatcher: &Dispatcher,
    sources: &[Source],
    stdin: &mut dyn Read,
) -> Vec<Result<A::Digest, CliError>> {
    #[cfg(feature = "parallel")]
    {
        if let Some(results) = hash_files_in_parallel::<A>(dispatcher, sources) {
            return results;
        }
    }

    batch_sources::<A>(sources, stdin, |messages| dispatcher.digest_batch::<A, _>(messages))
}

/// Like [`hash_sources`], with each digest hashed once more in the same batch.
fn double_hash_sources<A: Chunked>(
    dispatcher: &Dispatcher,
    sources: &[Source],
    stdin: &mut dyn Read,
) -> Vec<Result<A::Digest, CliError>> {
    batch_sources::<A>(sources, stdin, |messages| {
        dispatcher.double_digest_batch::<A, _>(messages)
    })
}

/// Reads every source, hands the readable ones to `batch`, and puts each
/// digest back in its source's slot.
fn batch_sources<A: Algorithm>(
    sources: &[Source],
    stdin: &mut dyn Read,
    batch: impl FnOnce(&[&[u8]]) -> Vec<A::Digest>,
) -> Vec<Result<A::Digest, CliError>> {
    let reads: Vec<Result<Vec<u8>, CliError>> =
        sources.iter().map(|source| source.read(stdin)).collect();
    let messages: Vec<&[u8]> = reads
        .iter()
        .filter_map(|read| read.as_ref().ok())
        .map(Vec::as_slice)
        .collect();
    let digests = batch(messages.as_slice());
    tracing::debug!(
        target: "cli",
        algorithm = A::NAME,
        messages = digests.len(),
        failed = reads.len() - digests.len(),
        "digest batch complete"
    );

    let mut next = 0;
    reads
        .into_iter()
        .map(|read| {
            read.map(|_| {
                let digest = digests[next];
                next += 1;
                digest
            })
        })
        .collect()
}

/// Plain file lists on the detected backend are read on rayon's pool.
#[cfg(feature = "parallel")]
fn hash_files_in_parallel<A: Algorithm>(
    dispatcher: &Dispatcher,
    sources: &[Source],
) -> Option<Vec<Result<A::Digest, CliError>>> {
    if dispatcher != sha_simd::global() || sources.len() < 2 {
        return None;
    }
    let paths = sources
        .iter()
        .map(|source| match source {
            Source::File(path) => Some(path.as_path()),
            Source::Stdin => None,
        })
        .collect::<Option<Vec<_>>>()?;

    let results = sha_simd::digest_files::<A, _>(&paths)
        .into_iter()
        .zip(&paths)
        .map(|(result, path)| {
            result.map_err(|source| CliError::Read {
                path: path.to_path_buf(),
                source,
            })
        })
        .collect();
    Some(results)
}

fn to_hex<A: Algorithm>(results: Vec<Result<A::Digest, CliError>>) -> Vec<Result<String, CliError>> {
    results
        .into_iter()
        .map(|result| result.map(|digest| hex::encode(digest.as_ref())))
        .collect()
}

/// Runs `digest` and returns the exit status.
///
/// Unreadable inputs are reported and skipped; the status is 1 if any failed.
pub(crate) fn run<Out, Err>(
    dispatcher: &Dispatcher,
    algorithm: HashAlgorithm,
    double: bool,
    sources: &[Source],
    stdin: &mut dyn Read,
    stdout: &mut Out,
    stderr: &mut Err,
) -> Result<i32, CliError>
where
    Out: Write,
    Err: Write,
{
    let results = match (algorithm, double) {
        (HashAlgorithm::Sha1, true) => {
            return Err(CliError::NotChunked {
                operation: "--double",
                algorithm: algorithm.name(),
            });
        }
        (HashAlgorithm::Sha1, false) => {
            to_hex::<Sha1>(hash_sources::<Sha1>(dispatcher, sources, stdin))
        }
        (HashAlgorithm::Sha256, false) => {
            to_hex::<Sha256>(hash_sources::<Sha256>(dispatcher, sources, stdin))
        }
        (HashAlgorithm::Sha256, true) => {
            to_hex::<Sha256>(double_hash_sources::<Sha256>(dispatcher, sources, stdin))
        }
        (HashAlgorithm::Sha512, false) => {
            to_hex::<Sha512>(hash_sources::<Sha512>(dispatcher, sources, stdin))
        }
        (HashAlgorithm::Sha512, true) => {
            to_hex::<Sha512>(double_hash_sources::<Sha512>(dispatcher, sources, stdin))
        }
    };

    report(sources, results, stdout, stderr)
}

fn report<Out: Write, Err: Write>(
    sources: &[Source],
    results: Vec<Result<String, CliError>>,
    stdout: &mut Out,
    stderr: &mut Err,
) -> Result<i32, CliError> {
    let mut status = 0;
    for (source, result) in sources.iter().zip(results) {
        match result {
            Ok(digest) => writeln!(stdout, "{digest}  {}", source.label())?,
            Err(error) => {
                tracing::warn!(target: "cli", input = %source.label(), "input skipped");
                writeln!(stderr, "{PROGRAM_NAME}: {error}")?;
                status = 1;
            }
        }
    }
    stdout.flush()?;
    Ok(status)
}
