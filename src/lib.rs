//! Recursive command-line parsing and dispatch.
//!
//! A program describes itself as a tree of [`Command`]s. [`Cli`] takes the
//! process arguments, walks the tree one token per level, binds options and
//! positional arguments and then either runs the selected action, prints
//! help to standard output, or prints a usage error to standard error.
//!
//! All output produced during a run is buffered and replayed in order once
//! the run is over, so observers of both streams see one deterministic
//! sequence.
//!
//! ```
//! use std::io::Write;
//!
//! use cmdtree::{Arg, Cli, Command, Opt};
//!
//! let root = Command::new()
//!     .description("Greets people.")
//!     .option("upper", Opt::bool("Shout the name."))
//!     .arg(Arg::string("NAME").required())
//!     .action(|prg| {
//!         let name = prg.matches().arg("NAME").unwrap_or_default().to_string();
//!         let name = if prg.matches().flag("upper") { name.to_uppercase() } else { name };
//!         writeln!(prg.stdout(), "Hello, {name}!")?;
//!         Ok(())
//!     });
//!
//! let code = Cli::new(root).stdout(std::io::sink()).parse_and_run(["hello", "-upper", "you"]);
//! assert_eq!(code, 0);
//! ```

/// `write!` into a `String`, where formatting cannot fail.
macro_rules! w {
    ($($tt:tt)*) => {
        { let _ = write!($($tt)*); }
    };
}

mod arg;
mod cli;
mod command;
mod context;
mod flags;
mod opt;
mod output;
mod value;

pub mod cliutil;
pub mod clitest;

pub use crate::{
    arg::{Arg, ArgList, Descriptor, RepeatingArg, SingleArg},
    cli::Cli,
    command::{Action, Command, Program},
    context::{Canceler, Context},
    flags::FlagSet,
    opt::{Kind, Opt},
    output::{Deferred, DeferredWriter, Stream},
    value::{Matches, Value},
};

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Failure type returned by actions.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("bad flag syntax: {0}")]
    BadFlagSyntax(String),

    #[error("flag provided but not defined: -{0}")]
    UnknownFlag(String),

    #[error("flag needs an argument: -{0}")]
    MissingValue(String),

    #[error("invalid boolean value {value:?} for -{flag}: {reason}")]
    InvalidSwitch { flag: String, value: String, reason: String },

    #[error("invalid value {value:?} for flag -{flag}: {reason}")]
    InvalidValue { flag: String, value: String, reason: String },

    #[error("command provided but not defined: {0}")]
    UnknownCommand(String),

    #[error("missing required argument: {0}")]
    MissingArgument(String),

    #[error("invalid value {value:?} for argument {label}: {reason}")]
    InvalidArgument { label: String, value: String, reason: String },

    #[error("context canceled")]
    Canceled,

    #[error("context deadline exceeded")]
    DeadlineExceeded,

    /// Diagnostics were already rendered; only the exit code is left to decide.
    #[error("unknown command or flag")]
    Misuse,
}
