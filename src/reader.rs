use crate::error::{ShellError, reserve_in_steps};
use log::debug;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::io::{BufRead, ErrorKind, Write};

/// Initial line capacity, and the step by which it grows.
pub const LINE_BUFSIZE: usize = 1024;

/// One line of user input with its newline removed.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RawLine {
    buf: Vec<u8>,
}

impl RawLine {
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}

impl From<String> for RawLine {
    fn from(line: String) -> Self {
        Self {
            buf: line.into_bytes(),
        }
    }
}

/// Somewhere the interpreter can pull command lines from.
pub trait LineSource {
    /// Shows `prompt` and reads the next line.
    ///
    /// Returns `Ok(None)` once the input is exhausted. Any error is fatal to the
    /// shell.
    fn read_line(
        &mut self,
        prompt: &str,
        stdout: &mut dyn Write,
    ) -> Result<Option<RawLine>, ShellError>;
}

/// Byte-level line reader over any buffered input, normally standard input.
///
/// A line ends at `\n` or at end-of-input. End-of-input before any byte of a
/// new line has been read means there are no more lines.
pub struct LineReader<R> {
    input: R,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(input: R) -> Self {
        Self { input }
    }

    /// Reads one line without printing a prompt.
    pub fn next_line(&mut self) -> Result<Option<RawLine>, ShellError> {
        let mut buf = Vec::new();
        reserve_in_steps(&mut buf, 1, LINE_BUFSIZE)?;
        let mut started = false;

        loop {
            let available = match self.input.fill_buf() {
                Ok(bytes) => bytes,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(ShellError::Read(e)),
            };
            if available.is_empty() {
                return Ok(started.then_some(RawLine { buf }));
            }
            started = true;

            let (chunk, consumed, complete) = match available.iter().position(|&b| b == b'\n') {
                Some(end) => (&available[..end], end + 1, true),
                None => (available, available.len(), false),
            };
            reserve_in_steps(&mut buf, chunk.len(), LINE_BUFSIZE)?;
            buf.extend_from_slice(chunk);
            self.input.consume(consumed);

            if complete {
                return Ok(Some(RawLine { buf }));
            }
        }
    }
}

impl<R: BufRead> LineSource for LineReader<R> {
    fn read_line(
        &mut self,
        prompt: &str,
        stdout: &mut dyn Write,
    ) -> Result<Option<RawLine>, ShellError> {
        stdout
            .write_all(prompt.as_bytes())
            .and_then(|()| stdout.flush())
            .map_err(ShellError::Prompt)?;
        self.next_line()
    }
}

/// Interactive source backed by `rustyline`, used when stdin is a terminal.
///
/// Nothing is added to the editor's history.
pub struct EditorSource {
    editor: DefaultEditor,
}

impl EditorSource {
    pub fn new() -> Result<Self, ShellError> {
        Ok(Self {
            editor: DefaultEditor::new()?,
        })
    }
}

impl LineSource for EditorSource {
    fn read_line(
        &mut self,
        prompt: &str,
        _stdout: &mut dyn Write,
    ) -> Result<Option<RawLine>, ShellError> {
        match self.editor.readline(prompt) {
            Ok(line) => Ok(Some(RawLine::from(line))),
            Err(ReadlineError::Eof) => Ok(None),
            Err(ReadlineError::Interrupted) => {
                debug!("interrupted, discarding line");
                Ok(Some(RawLine::default()))
            }
            Err(e) => Err(e.into()),
        }
    }
}
