use std::collections::BTreeMap;

use log::trace;

use crate::{Error, Result, Value};

/// The surface options register into and tokens are parsed against.
///
/// Every name (primary or alias) points at a slot; two names pointing at the
/// same slot write the same storage.
#[derive(Debug, Default)]
pub struct FlagSet {
    rargs: Vec<String>,
    names: BTreeMap<String, usize>,
    slots: Vec<(String, Box<dyn Value>)>,
}

impl FlagSet {
    pub fn new() -> Self {
        FlagSet::default()
    }

    /// Binds `value` under `name`. Defining a name twice keeps the last one.
    pub fn define(&mut self, name: &str, value: Box<dyn Value>) {
        self.slots.push((name.to_string(), value));
        self.names.insert(name.to_string(), self.slots.len() - 1);
    }

    /// Points `alias` at the slot of `name`. Does nothing if `name` is not
    /// defined.
    pub fn alias(&mut self, alias: &str, name: &str) {
        if let Some(&idx) = self.names.get(name) {
            self.names.insert(alias.to_string(), idx);
        }
    }

    pub fn lookup(&self, name: &str) -> Option<&dyn Value> {
        self.names.get(name).map(|&idx| &*self.slots[idx].1)
    }

    /// Consumes leading flag tokens from `args`. Stops at the first token that
    /// is not a flag or right after `--`; see [`FlagSet::remainder`].
    pub fn parse(&mut self, mut args: Vec<String>) -> Result<()> {
        args.reverse();
        self.rargs = args;
        while let Some(flag) = self.pop_flag() {
            if flag == "--" {
                break;
            }
            self.parse_one(&flag)?;
        }
        Ok(())
    }

    /// Tokens left over by [`FlagSet::parse`], in their original order.
    pub fn remainder(&mut self) -> Vec<String> {
        let mut rest = std::mem::take(&mut self.rargs);
        rest.reverse();
        rest
    }

    /// Values by primary name, skipping slots whose name was redefined.
    pub fn into_values(self) -> impl Iterator<Item = (String, Box<dyn Value>)> {
        let names = self.names;
        self.slots
            .into_iter()
            .enumerate()
            .filter(move |(idx, (name, _))| names.get(name) == Some(idx))
            .map(|(_, slot)| slot)
    }

    fn peek_flag(&self) -> Option<&str> {
        self.rargs.last().map(String::as_str).filter(|it| it.len() >= 2 && it.starts_with('-'))
    }

    fn pop_flag(&mut self) -> Option<String> {
        if self.peek_flag().is_some() {
            self.rargs.pop()
        } else {
            None
        }
    }

    fn parse_one(&mut self, flag: &str) -> Result<()> {
        let body = flag.strip_prefix("--").unwrap_or(&flag[1..]);
        if body.is_empty() || body.starts_with('-') || body.starts_with('=') {
            return Err(Error::BadFlagSyntax(flag.to_string()));
        }
        let (name, inline) = match body.split_once('=') {
            Some((name, value)) => (name, Some(value.to_string())),
            None => (body, None),
        };
        let idx = *self.names.get(name).ok_or_else(|| Error::UnknownFlag(name.to_string()))?;

        if self.slots[idx].1.is_switch() {
            let value = inline.unwrap_or_else(|| "true".to_string());
            trace!("switch -{name}={value}");
            return self.slots[idx].1.set(&value).map_err(|reason| Error::InvalidSwitch {
                flag: name.to_string(),
                value,
                reason,
            });
        }

        let value = match inline {
            Some(it) => it,
            None => self.next_value(name)?,
        };
        trace!("flag -{name} {value:?}");
        self.slots[idx].1.set(&value).map_err(|reason| Error::InvalidValue {
            flag: name.to_string(),
            value,
            reason,
        })
    }

    /// The next token, verbatim, even when it looks like a flag.
    fn next_value(&mut self, flag: &str) -> Result<String> {
        self.rargs.pop().ok_or_else(|| Error::MissingValue(flag.to_string()))
    }
}
