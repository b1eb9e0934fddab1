use crate::builtin::BuiltinTable;
use crate::command::{Context, Launcher, Status};
use crate::error::ShellError;
use crate::external::ForkExec;
use crate::lexer::{ArgVec, split_into_tokens};
use crate::reader::LineSource;
use log::debug;
use std::io::Write;

/// Prompt printed before every line unless overridden.
pub const DEFAULT_PROMPT: &str = ":) ";

/// The read, tokenize, dispatch loop.
///
/// Commands are looked up in a [`BuiltinTable`] first; anything else goes to
/// the [`Launcher`]. See [`Default`] for the stock setup.
///
/// Example
/// ```
/// use lsh::{Interpreter, LineReader};
/// let sh = Interpreter::default();
/// let mut input = LineReader::new(&b"help\nexit\n"[..]);
/// let (mut out, mut err) = (Vec::new(), Vec::new());
/// sh.repl(&mut input, &mut out, &mut err).unwrap();
/// assert!(String::from_utf8(out).unwrap().contains(" help\n"));
/// ```
pub struct Interpreter {
    builtins: BuiltinTable,
    launcher: Box<dyn Launcher>,
    prompt: String,
}

impl Interpreter {
    pub fn new(builtins: BuiltinTable, launcher: Box<dyn Launcher>) -> Self {
        Self {
            builtins,
            launcher,
            prompt: DEFAULT_PROMPT.to_string(),
        }
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Runs one parsed command line.
    ///
    /// A blank line does nothing. Errors from the command are written to
    /// `stderr` as `lsh: <error>` and the loop is told to continue.
    pub fn execute(
        &self,
        args: &ArgVec<'_>,
        stdout: &mut dyn Write,
        stderr: &mut dyn Write,
    ) -> Status {
        let Some(name) = args.command() else {
            return Status::Continue;
        };
        let mut ctx = Context {
            stdout,
            stderr,
            builtins: self.builtins.names(),
        };

        let result = match self.builtins.find(name) {
            Some(builtin) => {
                debug!("builtin {} with {} argument(s)", builtin.name(), args.argc() - 1);
                builtin.execute(args, &mut ctx)
            }
            None => {
                debug!("launching {:?}", name);
                self.launcher.launch(args, &mut ctx)
            }
        };

        result.unwrap_or_else(|err| {
            let _ = writeln!(ctx.stderr, "lsh: {:#}", err);
            Status::Continue
        })
    }

    /// Prompts, reads and executes lines from `source` until `exit` or end of
    /// input.
    ///
    /// Only failures that make the shell unusable are returned.
    pub fn repl(
        &self,
        source: &mut dyn LineSource,
        stdout: &mut dyn Write,
        stderr: &mut dyn Write,
    ) -> Result<(), ShellError> {
        loop {
            let Some(line) = source.read_line(&self.prompt, stdout)? else {
                debug!("end of input");
                return Ok(());
            };
            let args = split_into_tokens(line.as_bytes())?;
            debug!("read {} byte(s), {} token(s)", line.len(), args.argc());

            if self.execute(&args, stdout, stderr) == Status::Terminate {
                debug!("exit requested");
                return Ok(());
            }
        }
    }
}

impl Default for Interpreter {
    /// The builtins `cd`, `help` and `exit`, with everything else run through
    /// fork and exec.
    fn default() -> Self {
        Self::new(BuiltinTable::default(), Box::new(ForkExec))
    }
}
