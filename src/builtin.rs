use crate::command::{Builtin, Context, Status};
use crate::lexer::ArgVec;
use crate::error::os_message;
use anyhow::{Result, anyhow};
use std::env;
use std::ffi::OsStr;
use std::io::Write;
use std::path::Path;

/// Change the working directory of the shell process.
///
/// Only the first argument is used. Without one, a usage error is printed and
/// nothing changes.
pub struct Cd;

impl Builtin for Cd {
    fn name(&self) -> &'static str {
        "cd"
    }

    fn execute(&self, args: &ArgVec<'_>, ctx: &mut Context<'_>) -> Result<Status> {
        let Some(target) = args.get(1) else {
            writeln!(ctx.stderr, "lsh: expected argument to \"cd\"")?;
            return Ok(Status::Continue);
        };
        let target = Path::new(target);
        env::set_current_dir(target)
            .map_err(|e| anyhow!("cd: {}: {}", target.display(), os_message(&e)))?;
        Ok(Status::Continue)
    }
}

/// Print a short usage banner and the names of all builtins.
pub struct Help;

impl Builtin for Help {
    fn name(&self) -> &'static str {
        "help"
    }

    fn execute(&self, _args: &ArgVec<'_>, ctx: &mut Context<'_>) -> Result<Status> {
        writeln!(ctx.stdout, "Type program names and arguments, and hit enter.")?;
        writeln!(ctx.stdout, "The following are built in:")?;
        for name in ctx.builtins {
            writeln!(ctx.stdout, " {}", name)?;
        }
        writeln!(ctx.stdout, "Use the man command for information on other programs.")?;
        ctx.stdout.flush()?;
        Ok(Status::Continue)
    }
}

/// Leave the shell. Arguments are ignored.
pub struct Exit;

impl Builtin for Exit {
    fn name(&self) -> &'static str {
        "exit"
    }

    fn execute(&self, _args: &ArgVec<'_>, _ctx: &mut Context<'_>) -> Result<Status> {
        Ok(Status::Terminate)
    }
}

/// The fixed, ordered set of builtins known to the shell.
///
/// Lookup is by exact name and the first match wins. The table is never
/// modified after construction.
pub struct BuiltinTable {
    builtins: Vec<Box<dyn Builtin>>,
    names: Vec<&'static str>,
}

impl BuiltinTable {
    pub fn new(builtins: Vec<Box<dyn Builtin>>) -> Self {
        let names = builtins.iter().map(|builtin| builtin.name()).collect();
        Self { builtins, names }
    }

    /// Returns the first builtin called `name`.
    pub fn find(&self, name: &OsStr) -> Option<&dyn Builtin> {
        self.builtins
            .iter()
            .find(|builtin| name == builtin.name())
            .map(|builtin| &**builtin)
    }

    /// Names in lookup order.
    pub fn names(&self) -> &[&'static str] {
        &self.names
    }
}

impl Default for BuiltinTable {
    /// `cd`, `help` and `exit`, in that order.
    fn default() -> Self {
        Self::new(vec![Box::new(Cd), Box::new(Help), Box::new(Exit)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::split_into_tokens;
    use serial_test::serial;
    use std::fs;

    struct Captured {
        stdout: Vec<u8>,
        stderr: Vec<u8>,
    }

    fn run(builtin: &dyn Builtin, line: &str) -> (Result<Status>, Captured) {
        let table = BuiltinTable::default();
        let args = split_into_tokens(line.as_bytes()).unwrap();
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();
        let mut ctx = Context {
            stdout: &mut stdout,
            stderr: &mut stderr,
            builtins: table.names(),
        };
        let result = builtin.execute(&args, &mut ctx);
        (result, Captured { stdout, stderr })
    }

    #[test]
    fn default_table_order() {
        assert_eq!(BuiltinTable::default().names(), ["cd", "help", "exit"]);
    }

    #[test]
    fn find_is_exact() {
        let table = BuiltinTable::default();
        assert_eq!(table.find(OsStr::new("help")).unwrap().name(), "help");
        assert!(table.find(OsStr::new("hel")).is_none());
        assert!(table.find(OsStr::new("EXIT")).is_none());
        assert!(table.find(OsStr::new("exit ")).is_none());
    }

    #[test]
    fn first_match_wins() {
        struct Loud;
        impl Builtin for Loud {
            fn name(&self) -> &'static str {
                "exit"
            }
            fn execute(&self, _args: &ArgVec<'_>, _ctx: &mut Context<'_>) -> Result<Status> {
                Ok(Status::Continue)
            }
        }
        let table = BuiltinTable::new(vec![Box::new(Loud), Box::new(Exit)]);
        let (status, _) = run(table.find(OsStr::new("exit")).unwrap(), "exit");
        assert_eq!(status.unwrap(), Status::Continue);
    }

    #[test]
    fn exit_terminates_regardless_of_arguments() {
        for line in ["exit now please", "exit --help", "exit -h 3"] {
            let (status, out) = run(&Exit, line);
            assert_eq!(status.unwrap(), Status::Terminate, "{line}");
            assert!(out.stdout.is_empty());
            assert!(out.stderr.is_empty());
        }
    }

    #[test]
    #[serial]
    fn cd_takes_flag_like_words_as_directories() {
        let before = env::current_dir().unwrap();
        let (status, _) = run(&Cd, "cd --help");
        assert_eq!(
            format!("{:#}", status.unwrap_err()),
            "cd: --help: No such file or directory"
        );
        assert_eq!(env::current_dir().unwrap(), before);
    }

    #[test]
    fn help_lists_builtins_in_order() {
        let (status, out) = run(&Help, "help me");
        assert_eq!(status.unwrap(), Status::Continue);
        assert_eq!(
            String::from_utf8(out.stdout).unwrap(),
            "Type program names and arguments, and hit enter.\n\
             The following are built in:\n \
             cd\n \
             help\n \
             exit\n\
             Use the man command for information on other programs.\n"
        );
    }

    #[test]
    fn help_is_repeatable() {
        let (_, first) = run(&Help, "help");
        let (_, second) = run(&Help, "help --help");
        assert_eq!(first.stdout, second.stdout);
    }

    #[test]
    #[serial]
    fn cd_without_argument_is_a_usage_error() {
        let before = env::current_dir().unwrap();
        let (status, out) = run(&Cd, "cd");
        assert_eq!(status.unwrap(), Status::Continue);
        assert_eq!(
            String::from_utf8(out.stderr).unwrap(),
            "lsh: expected argument to \"cd\"\n"
        );
        assert_eq!(env::current_dir().unwrap(), before);
    }

    #[test]
    #[serial]
    fn cd_to_missing_directory_fails() {
        let before = env::current_dir().unwrap();
        let (status, _) = run(&Cd, "cd /nonexistent-path-xyz");
        let err = status.unwrap_err();
        assert_eq!(
            format!("{:#}", err),
            "cd: /nonexistent-path-xyz: No such file or directory"
        );
        assert_eq!(env::current_dir().unwrap(), before);
    }

    #[test]
    #[serial]
    fn cd_changes_directory_and_ignores_extra_arguments() {
        let before = env::current_dir().unwrap();
        let target = env::temp_dir().join(format!("lsh_cd_{}", std::process::id()));
        fs::create_dir_all(&target).unwrap();

        let line = format!("cd {} ignored", target.display());
        let (status, out) = run(&Cd, &line);
        let after = env::current_dir().unwrap();
        env::set_current_dir(&before).unwrap();

        assert_eq!(status.unwrap(), Status::Continue);
        assert!(out.stderr.is_empty());
        assert_eq!(after, fs::canonicalize(&target).unwrap());
        let _ = fs::remove_dir_all(target);
    }
}
