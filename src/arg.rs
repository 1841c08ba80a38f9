use std::fmt::Write;

use crate::{Error, Result, Value};

/// A positional argument specification.
///
/// Single arguments can be chained into a fixed sequence with [`Arg::then`];
/// a repeating argument always ends the chain.
#[derive(Debug, Clone)]
pub enum Arg {
    Single(SingleArg),
    Repeating(RepeatingArg),
}

#[derive(Debug, Clone)]
pub struct SingleArg {
    label: String,
    required: bool,
    value: Box<dyn Value>,
    next: Option<Box<Arg>>,
}

/// Captures every remaining token. When required, it is still satisfied by
/// zero tokens.
#[derive(Debug, Clone)]
pub struct RepeatingArg {
    label: String,
    required: bool,
}

impl Arg {
    /// A single optional string argument.
    pub fn string(label: impl Into<String>) -> Arg {
        Arg::typed(label, String::new())
    }

    /// A single optional argument parsed into `value`. A token that `value`
    /// rejects is a usage error.
    pub fn typed(label: impl Into<String>, value: impl Value) -> Arg {
        Arg::Single(SingleArg {
            label: label.into(),
            required: false,
            value: Box::new(value),
            next: None,
        })
    }

    pub fn repeating(label: impl Into<String>) -> Arg {
        Arg::Repeating(RepeatingArg { label: label.into(), required: false })
    }

    /// Marks the head of this chain as required.
    pub fn required(mut self) -> Arg {
        match &mut self {
            Arg::Single(it) => it.required = true,
            Arg::Repeating(it) => it.required = true,
        }
        self
    }

    /// Appends `next` to the end of this chain.
    ///
    /// # Panics
    ///
    /// If the chain already ends with a repeating argument.
    pub fn then(self, next: Arg) -> Arg {
        match self {
            Arg::Single(mut it) => {
                let next = match it.next.take() {
                    Some(tail) => tail.then(next),
                    None => next,
                };
                it.next = Some(Box::new(next));
                Arg::Single(it)
            }
            Arg::Repeating(it) => panic!("repeating argument `{}` must be the last one", it.label),
        }
    }

    pub fn is_required(&self) -> bool {
        match self {
            Arg::Single(it) => it.required,
            Arg::Repeating(it) => it.required,
        }
    }

    /// Flattens this chain into `list`, in declaration order.
    pub fn append_to(&self, list: &mut ArgList) {
        match self {
            Arg::Single(it) => {
                list.append(&it.label, it.value.clone(), it.required, false);
                if let Some(next) = &it.next {
                    next.append_to(list);
                }
            }
            Arg::Repeating(it) => {
                list.append(&it.label, Box::new(Vec::<String>::new()), it.required, true)
            }
        }
    }

    /// Writes the usage fragment, e.g. ` <FOO> [<BAR> [<REST>...]]`.
    pub fn write_doc(&self, buf: &mut String) {
        w!(buf, " ");
        if !self.is_required() {
            w!(buf, "[");
        }
        match self {
            Arg::Single(it) => {
                w!(buf, "<{}>", it.label);
                if let Some(next) = &it.next {
                    next.write_doc(buf);
                }
            }
            Arg::Repeating(it) => w!(buf, "<{}>...", it.label),
        }
        if !self.is_required() {
            w!(buf, "]");
        }
    }
}

/// One flattened positional slot.
#[derive(Debug, Clone)]
pub struct Descriptor {
    pub label: String,
    pub required: bool,
    pub repeats: bool,
    value: Box<dyn Value>,
}

impl Descriptor {
    fn set(&mut self, token: &str) -> Result<()> {
        self.value.set(token).map_err(|reason| Error::InvalidArgument {
            label: self.label.clone(),
            value: token.to_string(),
            reason,
        })
    }
}

/// The flattened, ordered form of a positional chain, built for one
/// dispatch.
#[derive(Debug, Clone, Default)]
pub struct ArgList {
    descs: Vec<Descriptor>,
}

impl ArgList {
    pub fn new() -> ArgList {
        ArgList::default()
    }

    pub fn from_arg(arg: &Arg) -> ArgList {
        let mut list = ArgList::new();
        arg.append_to(&mut list);
        list
    }

    /// # Panics
    ///
    /// If a repeating descriptor was already appended.
    pub fn append(&mut self, label: &str, value: Box<dyn Value>, required: bool, repeats: bool) {
        if let Some(last) = self.descs.last() {
            assert!(!last.repeats, "repeating argument `{}` must be the last one", last.label);
        }
        self.descs.push(Descriptor { label: label.to_string(), required, repeats, value });
    }

    pub fn descriptors(&self) -> &[Descriptor] {
        &self.descs
    }

    /// Finds the first required descriptor left without a token.
    ///
    /// Only the descriptors past the last supplied token are scanned, and the
    /// scan ends at the first optional or repeating one: a required argument
    /// declared after an optional one is never reported.
    pub fn missing(&self, tokens: &[String]) -> Option<&Descriptor> {
        let n = tokens.len().min(self.descs.len());
        let extra = tokens.len() - n;
        for (i, desc) in self.descs[n..].iter().enumerate() {
            if !desc.required || desc.repeats {
                return None;
            }
            if i + 1 > extra {
                return Some(desc);
            }
        }
        None
    }

    /// Feeds tokens to descriptors pairwise. A repeating descriptor takes all
    /// remaining tokens. Returns only the descriptors that consumed a token.
    pub fn parse(self, tokens: &[String]) -> Result<Vec<(String, Box<dyn Value>)>> {
        let mut matched = Vec::new();
        for (i, mut desc) in self.descs.into_iter().enumerate() {
            if i >= tokens.len() {
                break;
            }
            if desc.repeats {
                for token in &tokens[i..] {
                    desc.set(token)?;
                }
                matched.push((desc.label, desc.value));
                break;
            }
            desc.set(&tokens[i])?;
            matched.push((desc.label, desc.value));
        }
        Ok(matched)
    }
}
