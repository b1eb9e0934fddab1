use argh::FromArgs;
use env_logger::Env;
use log::LevelFilter;
use lsh::{DEFAULT_PROMPT, EditorSource, Interpreter, LineReader, LineSource, ShellError};
use std::io::{self, IsTerminal};
use std::process::ExitCode;

#[derive(FromArgs)]
/// A minimal interactive command shell.
struct Args {
    /// read standard input byte by byte even when it is a terminal
    #[argh(switch)]
    plain: bool,

    /// text printed before each line
    #[argh(option, default = "DEFAULT_PROMPT.to_string()")]
    prompt: String,

    /// log what the shell is doing to standard error
    #[argh(switch, short = 'v')]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or(default_level.as_str()))
        .try_init();
}

fn run(args: Args) -> Result<(), ShellError> {
    let shell = Interpreter::default().with_prompt(args.prompt);
    let mut source: Box<dyn LineSource> = if !args.plain && io::stdin().is_terminal() {
        Box::new(EditorSource::new()?)
    } else {
        Box::new(LineReader::new(io::stdin().lock()))
    };
    shell.repl(source.as_mut(), &mut io::stdout(), &mut io::stderr())
}

fn main() -> ExitCode {
    let args: Args = argh::from_env();
    init_logging(args.verbose);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("lsh: {}", err);
            ExitCode::FAILURE
        }
    }
}
