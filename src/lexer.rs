//! Splitting of raw input lines into argument vectors.
//!
//! Tokens are not copied: each one is a slice of the line it came from, so an
//! [`ArgVec`] can never outlive its line.

use crate::error::{ShellError, reserve_in_steps};
use std::ffi::OsStr;
use std::os::unix::ffi::OsStrExt;

/// Initial token capacity, and the step by which it grows.
pub const TOK_BUFSIZE: usize = 64;

/// Bytes that separate tokens: space, tab, carriage return, newline and bell.
pub const TOK_DELIMITERS: &[u8] = b" \t\r\n\x07";

/// The argument vector of one command line.
///
/// The first token is the command name, the rest are its arguments. An empty
/// vector stands for a blank line.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ArgVec<'line> {
    tokens: Vec<&'line OsStr>,
}

impl<'line> ArgVec<'line> {
    /// Number of tokens, command name included.
    pub fn argc(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// The command name, or `None` for a blank line.
    pub fn command(&self) -> Option<&'line OsStr> {
        self.tokens.first().copied()
    }

    pub fn get(&self, index: usize) -> Option<&'line OsStr> {
        self.tokens.get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'line OsStr> + '_ {
        self.tokens.iter().copied()
    }

    pub fn as_slice(&self) -> &[&'line OsStr] {
        &self.tokens
    }
}

fn is_delimiter(byte: &u8) -> bool {
    TOK_DELIMITERS.contains(byte)
}

/// Splits `line` on runs of [`TOK_DELIMITERS`].
///
/// Leading, trailing and repeated delimiters produce no empty tokens, so a
/// blank line yields an empty [`ArgVec`]. Token storage grows in steps of
/// [`TOK_BUFSIZE`]; failing to grow is an allocation error.
pub fn split_into_tokens(line: &[u8]) -> Result<ArgVec<'_>, ShellError> {
    let mut tokens = Vec::new();
    reserve_in_steps(&mut tokens, 1, TOK_BUFSIZE)?;

    for word in line.split(is_delimiter).filter(|word| !word.is_empty()) {
        reserve_in_steps(&mut tokens, 1, TOK_BUFSIZE)?;
        tokens.push(OsStr::from_bytes(word));
    }

    Ok(ArgVec { tokens })
}
