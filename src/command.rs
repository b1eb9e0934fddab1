use crate::lexer::ArgVec;
use anyhow::Result;
use std::io::Write;

/// What the main loop should do after a command.
///
/// The shell only distinguishes "prompt again" from "stop"; a failed command
/// still continues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Continue,
    Terminate,
}

/// Streams and shell state a command runs against.
pub struct Context<'a> {
    pub stdout: &'a mut dyn Write,
    pub stderr: &'a mut dyn Write,
    /// Names of every builtin, in lookup order.
    pub builtins: &'a [&'static str],
}

/// A command implemented inside the shell process.
pub trait Builtin {
    /// Name the command is invoked by, e.g. "cd".
    fn name(&self) -> &'static str;

    /// Runs the command. `args` includes the command name at index 0.
    ///
    /// An error is reported by the interpreter and the loop continues.
    fn execute(&self, args: &ArgVec<'_>, ctx: &mut Context<'_>) -> Result<Status>;
}

/// Runs commands that are not builtins as separate programs.
///
/// The program writes to the shell's real standard streams, and so does a
/// child that fails to exec. Only errors from the shell side of the launch
/// (fork, wait, bad arguments) come back through the returned `Result` and
/// end up on [`Context::stderr`].
pub trait Launcher {
    /// Starts `args[0]` with `args` and blocks until it is finished.
    fn launch(&self, args: &ArgVec<'_>, ctx: &mut Context<'_>) -> Result<Status>;
}
