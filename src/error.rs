use nix::errno::Errno;
use rustyline::error::ReadlineError;
use std::collections::TryReserveError;
use std::io;

/// Errors that stop the whole shell.
///
/// Per-command failures (a bad `cd`, a missing program) are reported by the
/// interpreter and never reach this type.
#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    /// A line or token buffer could not grow.
    #[error("allocation error")]
    Alloc(#[from] TryReserveError),
    /// Standard input failed with something other than end-of-input.
    #[error("read error: {0}")]
    Read(io::Error),
    /// The prompt could not be written to standard output.
    #[error("cannot write prompt: {0}")]
    Prompt(io::Error),
    /// The interactive line editor failed.
    #[error("line editor: {0}")]
    Editor(#[from] ReadlineError),
}

/// Describes an OS error the way `perror` does, without the `(os error N)`
/// suffix of `io::Error`'s own formatting.
pub(crate) fn os_message(err: &io::Error) -> String {
    match err.raw_os_error() {
        Some(code) => Errno::from_raw(code).desc().to_string(),
        None => err.to_string(),
    }
}

/// Makes room for `needed` more elements, growing capacity in fixed steps of
/// `increment` rather than doubling.
pub(crate) fn reserve_in_steps<T>(
    vec: &mut Vec<T>,
    needed: usize,
    increment: usize,
) -> Result<(), ShellError> {
    while vec.capacity() - vec.len() < needed {
        let spare = vec.capacity() - vec.len();
        vec.try_reserve_exact(spare + increment)?;
    }
    Ok(())
}
