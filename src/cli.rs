use std::{
    fmt,
    io::{self, Write},
    path::Path,
};

use log::{debug, warn};

use crate::{
    ArgList, BoxError, Command, Context, Deferred, DeferredWriter, Error, FlagSet, Matches, Opt,
    Program, Stream,
};

/// Deferred work produced by a successful dispatch: run an action or print
/// help.
type Thunk<'c> = Box<dyn FnOnce() -> Result<(), BoxError> + 'c>;

/// Parses process arguments against a command tree and runs the result.
///
/// ```
/// use cmdtree::{Cli, Command};
///
/// let mut cli = Cli::new(Command::new().subcommand("foo", Command::new()))
///     .name("test")
///     .stderr(std::io::sink())
///     .misuse_code(64);
/// assert_eq!(cli.parse_and_run(["./bin/test", "bar"]), 64);
/// ```
pub struct Cli {
    name: Option<String>,
    entry: Option<Command>,
    stdout: Box<dyn Write>,
    stderr: Box<dyn Write>,
    help: Opt,
    error_code: u32,
    misuse_code: u32,
}

impl Default for Cli {
    /// A driver with no entry command. Running it panics until one is set
    /// with [`Cli::entry`].
    fn default() -> Cli {
        Cli {
            name: None,
            entry: None,
            stdout: Box::new(io::stdout()),
            stderr: Box::new(io::stderr()),
            help: help_option("Print this help message."),
            error_code: 1,
            misuse_code: 2,
        }
    }
}

fn help_option(description: &str) -> Opt {
    Opt::bool(description).short('h')
}

impl Cli {
    /// Writes to the process' standard streams; exit codes 1 for errors and 2
    /// for misuse.
    pub fn new(entry: Command) -> Cli {
        Cli::default().entry(entry)
    }

    pub fn entry(mut self, entry: Command) -> Cli {
        self.entry = Some(entry);
        self
    }

    /// Fixes the program name instead of deriving it from the first argument.
    pub fn name(mut self, name: impl Into<String>) -> Cli {
        self.name = Some(name.into());
        self
    }

    pub fn stdout(mut self, w: impl Write + 'static) -> Cli {
        self.stdout = Box::new(w);
        self
    }

    pub fn stderr(mut self, w: impl Write + 'static) -> Cli {
        self.stderr = Box::new(w);
        self
    }

    /// Description of the implicit `-h, -help` option.
    pub fn help_description(mut self, description: &str) -> Cli {
        self.help = help_option(description);
        self
    }

    pub fn error_code(mut self, code: u32) -> Cli {
        self.error_code = code;
        self
    }

    pub fn misuse_code(mut self, code: u32) -> Cli {
        self.misuse_code = code;
        self
    }

    pub fn run_from_env(&mut self) -> u32 {
        self.parse_and_run(std::env::args())
    }

    pub fn parse_and_run<I>(&mut self, args: I) -> u32
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.parse_and_run_with(&Context::background(), args)
    }

    /// Parses `args` (the first of which is the program path) and runs the
    /// selected command, returning the exit code.
    ///
    /// Output is buffered for the whole run and flushed to the configured
    /// sinks before returning. `ctx` is checked once, before parsing.
    ///
    /// # Panics
    ///
    /// If no entry command was configured.
    pub fn parse_and_run_with<I>(&mut self, ctx: &Context, args: I) -> u32
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let entry = match &self.entry {
            Some(it) => it,
            None => panic!("cli: nil entry command"),
        };
        let args = args.into_iter().map(Into::into).collect::<Vec<String>>();
        let name = match (&self.name, args.first()) {
            (Some(name), _) => name.clone(),
            (None, Some(path)) => Path::new(path)
                .file_name()
                .map(|it| it.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.clone()),
            (None, None) => String::new(),
        };

        let log = Deferred::new();
        let outcome: Result<(), BoxError> = match ctx.err() {
            Some(err) => {
                debug!("context done before parsing: {err}");
                Err(err.into())
            }
            None => {
                let dispatcher = Dispatcher { name: &name, help: &self.help, log: &log };
                let tokens = args.get(1..).unwrap_or_default().to_vec();
                match dispatcher.dispatch(name.clone(), entry, tokens, Matches::new()) {
                    Some(run) => run(),
                    None => Err(Error::Misuse.into()),
                }
            }
        };

        let code = match outcome {
            Ok(()) => 0,
            Err(err) if matches!(err.downcast_ref::<Error>(), Some(Error::Misuse)) => {
                self.misuse_code
            }
            Err(err) => {
                log.write(Stream::Stderr, format!("{name}: {err}\n").as_bytes());
                self.error_code
            }
        };
        if let Err(err) = log.flush(&mut *self.stdout, &mut *self.stderr) {
            warn!("failed to flush output: {err}");
        }
        code
    }
}

struct Dispatcher<'a> {
    name: &'a str,
    help: &'a Opt,
    log: &'a Deferred,
}

impl Dispatcher<'_> {
    /// Handles one level of the tree, recursing into the selected
    /// subcommand. `None` means a usage error was already reported.
    fn dispatch<'c>(
        &self,
        path: String,
        cmd: &'c Command,
        args: Vec<String>,
        mut matches: Matches,
    ) -> Option<Thunk<'c>> {
        debug!("dispatching `{path}` with {} token(s)", args.len());

        let mut f = FlagSet::new();
        for (name, opt) in cmd.options_with(self.help) {
            opt.define(&mut f, name);
        }
        if let Err(err) = f.parse(args) {
            self.fail(cmd, &path, err);
            return None;
        }
        let remainder = f.remainder();
        let help = f
            .lookup("help")
            .and_then(|it| it.as_any().downcast_ref::<bool>())
            .copied()
            .unwrap_or(false);
        for (name, value) in f.into_values() {
            if name != "help" {
                matches.insert_option(name, value);
            }
        }

        if help {
            debug!("`{path}`: help requested");
            return Some(self.show_help(cmd, &path));
        }

        if !cmd.subcommands.is_empty() {
            if let Some(sub) = remainder.first().filter(|it| !it.is_empty()) {
                return match cmd.subcommands.get(sub) {
                    Some(child) => {
                        let path = format!("{path} {sub}");
                        self.dispatch(path, child, remainder[1..].to_vec(), matches)
                    }
                    None => {
                        self.fail(cmd, &path, Error::UnknownCommand(sub.clone()));
                        None
                    }
                };
            }
        }

        let action = match &cmd.action {
            Some(it) => it,
            None => {
                debug!("`{path}` has no action, showing help");
                return Some(self.show_help(cmd, &path));
            }
        };

        if let (true, Some(arg)) = (cmd.subcommands.is_empty(), &cmd.arg) {
            let list = ArgList::from_arg(arg);
            if let Some(desc) = list.missing(&remainder) {
                self.fail(cmd, &path, Error::MissingArgument(desc.label.clone()));
                return None;
            }
            match list.parse(&remainder) {
                Ok(values) => {
                    for (label, value) in values {
                        matches.insert_arg(label, value);
                    }
                }
                Err(err) => {
                    self.fail(cmd, &path, format_args!("bad argument parsing: {err}"));
                    return None;
                }
            }
        }

        debug!("`{path}` is ready");
        let mut program = Running {
            name: self.name.to_string(),
            stdout: self.log.writer(Stream::Stdout),
            stderr: self.log.writer(Stream::Stderr),
            matches,
        };
        Some(Box::new(move || {
            let program: &mut dyn Program = &mut program;
            action(program)
        }))
    }

    fn show_help<'c>(&self, cmd: &Command, path: &str) -> Thunk<'c> {
        let mut usage = String::new();
        cmd.write_usage(&mut usage, path, self.help, true);
        let mut out = self.log.writer(Stream::Stdout);
        Box::new(move || {
            out.write_all(usage.as_bytes())?;
            Ok(())
        })
    }

    /// Reports a usage error followed by the command's usage on standard
    /// error.
    fn fail(&self, cmd: &Command, path: &str, msg: impl fmt::Display) {
        debug!("`{path}`: {msg}");
        let mut text = format!("{}: {msg}\n", self.name);
        cmd.write_usage(&mut text, path, self.help, false);
        self.log.write(Stream::Stderr, text.as_bytes());
    }
}

/// The [`Program`] handed to actions during a real run.
struct Running {
    name: String,
    stdout: DeferredWriter,
    stderr: DeferredWriter,
    matches: Matches,
}

impl Program for Running {
    fn name(&self) -> &str {
        &self.name
    }
    fn stdout(&mut self) -> &mut dyn io::Write {
        &mut self.stdout
    }
    fn stderr(&mut self) -> &mut dyn io::Write {
        &mut self.stderr
    }
    fn matches(&self) -> &Matches {
        &self.matches
    }
}
