use std::fmt::Write;

use crate::{FlagSet, Value};

/// The closed set of option kinds. Each carries its default.
#[derive(Debug, Clone)]
pub enum Kind {
    Bool(bool),
    Str(String),
    Int(isize),
    Int64(i64),
    Custom(Box<dyn Value>),
}

impl Kind {
    fn prototype(&self) -> Box<dyn Value> {
        match self {
            Kind::Bool(it) => Box::new(*it),
            Kind::Str(it) => Box::new(it.clone()),
            Kind::Int(it) => Box::new(*it),
            Kind::Int64(it) => Box::new(*it),
            Kind::Custom(it) => it.clone(),
        }
    }
}

/// A named input bound to a typed value, optionally with a one-character
/// alias.
#[derive(Debug, Clone)]
pub struct Opt {
    description: String,
    short: Option<char>,
    label: Option<String>,
    kind: Kind,
}

impl Opt {
    pub fn new(description: impl Into<String>, kind: Kind) -> Opt {
        Opt { description: description.into(), short: None, label: None, kind }
    }

    /// A switch, `false` unless given.
    pub fn bool(description: impl Into<String>) -> Opt {
        Opt::new(description, Kind::Bool(false))
    }

    pub fn string(description: impl Into<String>, default: impl Into<String>) -> Opt {
        Opt::new(description, Kind::Str(default.into()))
    }

    pub fn int(description: impl Into<String>, default: isize) -> Opt {
        Opt::new(description, Kind::Int(default))
    }

    pub fn int64(description: impl Into<String>, default: i64) -> Opt {
        Opt::new(description, Kind::Int64(default))
    }

    /// An option stored in a caller-defined [`Value`]. `value` is the default.
    pub fn custom(description: impl Into<String>, value: impl Value) -> Opt {
        Opt::new(description, Kind::Custom(Box::new(value)))
    }

    pub fn short(mut self, short: char) -> Opt {
        self.short = Some(short);
        self
    }

    /// Placeholder shown after the name in help, e.g. `-file <PATH>`.
    pub fn label(mut self, label: impl Into<String>) -> Opt {
        self.label = Some(label.into());
        self
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Registers a fresh value under `name` and, if set, under the short
    /// alias, so that both spellings write the same storage.
    pub fn define(&self, f: &mut FlagSet, name: &str) {
        f.define(name, self.kind.prototype());
        if let Some(short) = self.short {
            f.alias(&short.to_string(), name);
        }
    }

    /// Writes the alias column, the name and the placeholder, then a tab and
    /// the description. String options also show a non-empty default.
    pub fn write_doc(&self, buf: &mut String, name: &str) {
        match self.short {
            Some(short) => w!(buf, "-{short}, "),
            None => w!(buf, "    "),
        }
        w!(buf, "-{name}");
        if let Some(label) = &self.label {
            w!(buf, " <{label}>");
        }
        let default = match &self.kind {
            Kind::Str(it) if !it.is_empty() => Some(it),
            _ => None,
        };
        if self.description.is_empty() && default.is_none() {
            return;
        }
        w!(buf, "\t{}", self.description);
        if let Some(default) = default {
            if !self.description.is_empty() {
                w!(buf, " ");
            }
            w!(buf, "(default: {default:?})");
        }
    }
}
