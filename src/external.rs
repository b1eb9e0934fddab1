use crate::command::{Context, Launcher, Status};
use crate::lexer::ArgVec;
use anyhow::{Context as _, Result, bail};
use log::debug;
use nix::errno::Errno;
use nix::sys::signal::{SigHandler, Signal, signal};
use nix::sys::wait::{WaitPidFlag, WaitStatus, waitpid};
use nix::unistd::{self, ForkResult, Pid, execvp, fork};
use std::ffi::CString;
use std::io::{self, Write};
use std::os::unix::ffi::OsStrExt;
use std::process;

/// Launches programs with fork and exec, searching `PATH` for bare names.
///
/// The child inherits the shell's standard streams, environment and working
/// directory. Nothing the child changes is seen by the shell.
#[derive(Debug, Default, Clone, Copy)]
pub struct ForkExec;

impl Launcher for ForkExec {
    fn launch(&self, args: &ArgVec<'_>, ctx: &mut Context<'_>) -> Result<Status> {
        let argv = args
            .iter()
            .map(|arg| CString::new(arg.as_bytes()))
            .collect::<Result<Vec<_>, _>>()
            .context("argument cannot be passed to a program")?;
        let Some(program) = argv.first() else {
            bail!("no program to launch");
        };

        // Anything still buffered would otherwise be written twice.
        ctx.stdout.flush()?;
        ctx.stderr.flush()?;

        // SAFETY: the child only calls execvp, writes one line to stderr and
        // exits; it never returns into the shell.
        match unsafe { fork() }? {
            ForkResult::Child => exec_child(program, &argv),
            ForkResult::Parent { child } => {
                debug!("started {:?} as pid {}", program, child);
                let status = wait_for_exit(child)?;
                debug!("pid {} finished: {:?}", child, status);
                Ok(Status::Continue)
            }
        }
    }
}

fn exec_child(program: &CString, argv: &[CString]) -> ! {
    // The Rust runtime ignores SIGPIPE, and ignored signals survive exec.
    // SAFETY: restoring the default disposition installs no handler.
    let _ = unsafe { signal(Signal::SIGPIPE, SigHandler::SigDfl) };

    if let Err(errno) = execvp(program, argv) {
        // Written piecewise to fd 2: no formatting buffer, no std stderr lock.
        let stderr = io::stderr();
        let _ = unistd::write(&stderr, b"lsh: ");
        let _ = unistd::write(&stderr, errno.desc().as_bytes());
        let _ = unistd::write(&stderr, b"\n");
    }
    process::exit(1)
}

/// Waits until `child` has exited or been killed by a signal.
///
/// A child that is merely stopped keeps the shell waiting.
pub fn wait_for_exit(child: Pid) -> nix::Result<WaitStatus> {
    loop {
        match waitpid(child, Some(WaitPidFlag::WUNTRACED)) {
            Ok(status @ (WaitStatus::Exited(..) | WaitStatus::Signaled(..))) => return Ok(status),
            Ok(status) => debug!("pid {} changed state: {:?}", child, status),
            Err(Errno::EINTR) => continue,
            Err(errno) => return Err(errno),
        }
    }
}
