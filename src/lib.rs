//! A minimal interactive command shell.
//!
//! Each line read from standard input is split on whitespace. The first word
//! names either a builtin (`cd`, `help`, `exit`) run inside the shell process,
//! or a program that is started with fork and exec while the shell waits for
//! it. There are no pipes, redirections, variables or job control.
//!
//! The main entry point is [`Interpreter`]. The [`command`] module holds the
//! traits for adding builtins or replacing how programs are launched.

mod builtin;
pub mod command;
mod error;
mod external;
mod interpreter;
mod lexer;
mod reader;

pub use builtin::{BuiltinTable, Cd, Exit, Help};
pub use error::ShellError;
pub use external::{ForkExec, wait_for_exit};
pub use interpreter::{DEFAULT_PROMPT, Interpreter};
pub use lexer::{ArgVec, TOK_BUFSIZE, TOK_DELIMITERS, split_into_tokens};
pub use reader::{EditorSource, LINE_BUFSIZE, LineReader, LineSource, RawLine};
