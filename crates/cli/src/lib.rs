#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `cli` implements the command-line front end of the `sha-engine` binary. It
//! parses arguments with a [`clap`](https://docs.rs/clap/) builder, installs
//! logging through the `logging` crate and runs one of three subcommands:
//!
//! - `digest [-a ALGO] [--double] [FILE...]` prints one digest per input,
//!   hashing every readable input in a single lane-parallel batch.
//! - `merkle [-a ALGO] [FILE]` reduces hex leaves, one per line, to a root.
//! - `backend` reports the vector backend and its lane counts.
//!
//! # Design
//!
//! [`run`] accepts the argument iterator together with handles for standard
//! output and error so the whole front end can be exercised in-process.
//! [`run_with_input`] additionally takes the standard input reader.
//!
//! # Errors
//!
//! Usage errors exit with status `2`. Runtime failures are written to the
//! error handle prefixed with the program name and exit with status `1`.
//!
//! # Examples
//!
//! ```
//! use cli::run_with_input;
//!
//! let mut stdin: &[u8] = b"abc";
//! let mut stdout = Vec::new();
//! let mut stderr = Vec::new();
//! let status = run_with_input(["sha-engine", "digest"], &mut stdin, &mut stdout, &mut stderr);
//!
//! assert_eq!(status, 0);
//! assert!(String::from_utf8(stdout).unwrap().starts_with("ba7816bf"));
//! ```

use std::ffi::OsString;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use clap::ArgMatches;
use logging::{LoggingError, VerbosityConfig};
use sha_simd::{Backend, Dispatcher};

mod backend;
mod command_builder;
mod digest;
mod error;
mod hex;
mod merkle;

pub use error::CliError;
pub use hex::HexError;

/// Program name used in help output and diagnostics.
pub const PROGRAM_NAME: &str = "sha-engine";

const MAX_EXIT_CODE: i32 = u8::MAX as i32;

/// Hash algorithm chosen with `--algorithm`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum HashAlgorithm {
    Sha1,
    Sha256,
    Sha512,
}

impl HashAlgorithm {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "sha1" => Some(Self::Sha1),
            "sha256" => Some(Self::Sha256),
            "sha512" => Some(Self::Sha512),
            _ => None,
        }
    }

    pub(crate) const fn name(self) -> &'static str {
        match self {
            Self::Sha1 => "sha1",
            Self::Sha256 => "sha256",
            Self::Sha512 => "sha512",
        }
    }
}

fn algorithm_of(matches: &ArgMatches) -> HashAlgorithm {
    matches
        .get_one::<String>("algorithm")
        .and_then(|name| HashAlgorithm::parse(name))
        .unwrap_or(HashAlgorithm::Sha256)
}

fn dispatcher_of(matches: &ArgMatches) -> Result<Dispatcher, CliError> {
    match matches.get_one::<String>("backend").map(String::as_str) {
        None | Some("auto") => Ok(*sha_simd::global()),
        Some(name) => Ok(Dispatcher::with_backend(name.parse::<Backend>()?)?),
    }
}

fn init_logging<Err: Write>(verbose: u8, stderr: &mut Err) {
    match logging::init_tracing(VerbosityConfig::from_verbose_level(verbose)) {
        Ok(()) | Err(LoggingError::AlreadyInitialized(_)) => {}
        Err(error) => {
            let _ = writeln!(stderr, "{PROGRAM_NAME}: warning: {error}");
        }
    }
}

/// Runs the CLI reading standard input from the process.
///
/// Returns the process exit code that should be used by the caller.
pub fn run<I, S, Out, Err>(arguments: I, stdout: &mut Out, stderr: &mut Err) -> i32
where
    I: IntoIterator<Item = S>,
    S: Into<OsString> + Clone,
    Out: Write,
    Err: Write,
{
    let stdin = io::stdin();
    let mut stdin = stdin.lock();
    run_with_input(arguments, &mut stdin, stdout, stderr)
}

/// Runs the CLI with an explicit standard input reader.
pub fn run_with_input<I, S, In, Out, Err>(
    arguments: I,
    stdin: &mut In,
    stdout: &mut Out,
    stderr: &mut Err,
) -> i32
where
    I: IntoIterator<Item = S>,
    S: Into<OsString> + Clone,
    In: Read,
    Out: Write,
    Err: Write,
{
    let matches = match command_builder::clap_command(PROGRAM_NAME).try_get_matches_from(arguments)
    {
        Ok(matches) => matches,
        Err(error) => {
            let rendered = error.render().to_string();
            let written = if error.use_stderr() {
                stderr.write_all(rendered.as_bytes())
            } else {
                stdout.write_all(rendered.as_bytes())
            };
            if written.is_err() {
                return 1;
            }
            return error.exit_code();
        }
    };

    match execute(&matches, stdin, stdout, stderr) {
        Ok(status) => status,
        Err(error) => {
            let _ = writeln!(stderr, "{PROGRAM_NAME}: {error}");
            1
        }
    }
}

fn execute<In, Out, Err>(
    matches: &ArgMatches,
    stdin: &mut In,
    stdout: &mut Out,
    stderr: &mut Err,
) -> Result<i32, CliError>
where
    In: Read,
    Out: Write,
    Err: Write,
{
    let Some((name, sub)) = matches.subcommand() else {
        return Ok(2);
    };
    init_logging(sub.get_count("verbose"), stderr);
    let dispatcher = dispatcher_of(sub)?;
    tracing::debug!(target: "cli", subcommand = name, backend = %dispatcher.backend(), "dispatching");

    match name {
        "digest" => {
            let files = sub
                .get_many::<OsString>("files")
                .map(|files| files.cloned().collect())
                .unwrap_or_default();
            digest::run(
                &dispatcher,
                algorithm_of(sub),
                sub.get_flag("double"),
                &digest::Source::from_operands(files),
                stdin,
                stdout,
                stderr,
            )
        }
        "merkle" => {
            let file = sub.get_one::<OsString>("file").map(PathBuf::from);
            merkle::run(&dispatcher, algorithm_of(sub), file.as_ref(), stdin, stdout)
        }
        "backend" => backend::run(&dispatcher, stdout),
        _ => Ok(2),
    }
}

/// Converts a numeric exit code into an [`std::process::ExitCode`].
#[must_use]
pub fn exit_code_from(status: i32) -> std::process::ExitCode {
    let clamped = status.clamp(0, MAX_EXIT_CODE);
    std::process::ExitCode::from(clamped as u8)
}
