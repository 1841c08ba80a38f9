use std::{collections::BTreeMap, fmt, fmt::Write as _, io};

use crate::{Arg, BoxError, Matches, Opt};

const INDENT: &str = "    ";
const GAP: usize = 4;
const WRAP: usize = 72;

/// What an executable command runs once dispatch succeeds.
pub type Action = Box<dyn Fn(&mut dyn Program) -> Result<(), BoxError>>;

/// The running program, as seen by an action.
pub trait Program {
    fn name(&self) -> &str;
    fn stdout(&mut self) -> &mut dyn io::Write;
    fn stderr(&mut self) -> &mut dyn io::Write;
    /// Options along the resolved path and the matched positional arguments.
    fn matches(&self) -> &Matches;
}

/// A node of the command tree.
///
/// A command without an action is a menu: invoking it prints its help. When
/// a command has subcommands its positional arguments are never consulted.
#[derive(Default)]
pub struct Command {
    pub description: String,
    pub action: Option<Action>,
    pub options: BTreeMap<String, Opt>,
    pub subcommands: BTreeMap<String, Command>,
    pub arg: Option<Arg>,
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("description", &self.description)
            .field("action", &self.action.as_ref().map(|_| ".."))
            .field("options", &self.options)
            .field("subcommands", &self.subcommands)
            .field("arg", &self.arg)
            .finish()
    }
}

impl Command {
    pub fn new() -> Command {
        Command::default()
    }

    pub fn description(mut self, description: impl Into<String>) -> Command {
        self.description = description.into();
        self
    }

    pub fn action<F>(mut self, action: F) -> Command
    where
        F: Fn(&mut dyn Program) -> Result<(), BoxError> + 'static,
    {
        self.action = Some(Box::new(action));
        self
    }

    pub fn option(mut self, name: impl Into<String>, opt: Opt) -> Command {
        self.options.insert(name.into(), opt);
        self
    }

    pub fn subcommand(mut self, name: impl Into<String>, cmd: Command) -> Command {
        self.subcommands.insert(name.into(), cmd);
        self
    }

    pub fn arg(mut self, arg: Arg) -> Command {
        self.arg = Some(arg);
        self
    }

    /// The declared options plus `help`, which wins over a declared option of
    /// the same name. `self` is left untouched.
    pub fn options_with<'a>(&'a self, help: &'a Opt) -> BTreeMap<&'a str, &'a Opt> {
        let mut view =
            self.options.iter().map(|(name, opt)| (name.as_str(), opt)).collect::<BTreeMap<_, _>>();
        view.insert("help", help);
        view
    }

    /// `<path> [<OPTIONS>]` followed by the command or argument summary.
    pub fn write_summary(&self, buf: &mut String, path: &str) {
        w!(buf, "{path} [<OPTIONS>]");
        if !self.subcommands.is_empty() {
            match self.action {
                Some(_) => w!(buf, " [<COMMAND>]"),
                None => w!(buf, " <COMMAND>"),
            }
        } else if let Some(arg) = &self.arg {
            arg.write_doc(buf);
        }
    }

    /// One aligned row per option, sorted by name.
    pub fn write_options(&self, buf: &mut String, options: &BTreeMap<&str, &Opt>) {
        let rows = options
            .iter()
            .map(|(name, opt)| {
                let mut row = String::new();
                opt.write_doc(&mut row, name);
                row
            })
            .collect::<Vec<_>>();
        tabulate(buf, &rows);
    }

    /// One aligned row per subcommand, sorted by name.
    pub fn write_commands(&self, buf: &mut String) {
        let rows = self
            .subcommands
            .iter()
            .map(|(name, cmd)| match cmd.description.as_str() {
                "" => name.clone(),
                desc => format!("{name}\t{desc}"),
            })
            .collect::<Vec<_>>();
        tabulate(buf, &rows);
    }

    /// The full help text. The description is only shown on request.
    pub fn write_usage(&self, buf: &mut String, path: &str, help: &Opt, show_description: bool) {
        if show_description && !self.description.is_empty() {
            wrap(buf, &self.description);
            w!(buf, "\n\n");
        }
        w!(buf, "USAGE:\n{INDENT}");
        self.write_summary(buf, path);
        w!(buf, "\n\nOPTIONS:\n");
        self.write_options(buf, &self.options_with(help));
        if !self.subcommands.is_empty() {
            w!(buf, "\nCOMMANDS:\n");
            self.write_commands(buf);
        }
    }
}

/// Indents each row and aligns the text after the first tab into one column.
fn tabulate(buf: &mut String, rows: &[String]) {
    let width = rows
        .iter()
        .filter_map(|row| row.split_once('\t'))
        .map(|(left, _)| left.chars().count())
        .max()
        .unwrap_or(0);
    for row in rows {
        match row.split_once('\t') {
            Some((left, right)) => w!(buf, "{INDENT}{left:<w$}{right}\n", w = width + GAP),
            None => w!(buf, "{INDENT}{row}\n"),
        }
    }
}

/// Greedy word wrap; `\n` in `text` starts a new paragraph.
fn wrap(buf: &mut String, text: &str) {
    for (i, paragraph) in text.split('\n').enumerate() {
        if i > 0 {
            buf.push('\n');
        }
        let mut col = 0;
        for (j, word) in paragraph.split(' ').enumerate() {
            let len = word.chars().count();
            if j > 0 {
                if col + 1 + len > WRAP {
                    buf.push('\n');
                    col = 0;
                } else {
                    buf.push(' ');
                    col += 1;
                }
            }
            buf.push_str(word);
            col += len;
        }
    }
}
