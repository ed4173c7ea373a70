//! `backend` subcommand.

use std::io::Write;

use sha_simd::{Backend, Dispatcher};

use crate::error::CliError;

/// Prints the selected backend, its lane counts and every backend this CPU runs.
pub(crate) fn run<Out: Write>(dispatcher: &Dispatcher, stdout: &mut Out) -> Result<i32, CliError> {
    let backend = dispatcher.backend();
    writeln!(stdout, "backend: {backend}")?;
    writeln!(
        stdout,
        "lanes: {} x 32-bit, {} x 64-bit",
        backend.lanes_for::<u32>(),
        backend.lanes_for::<u64>()
    )?;
    let supported: Vec<&str> = Backend::ALL
        .into_iter()
        .filter(|backend| backend.is_supported())
        .map(Backend::name)
        .collect();
    writeln!(stdout, "supported: {}", supported.join(" "))?;
    Ok(0)
}
