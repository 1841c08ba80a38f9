//! Option values beyond the built-in kinds, for use with [`Opt::custom`].
//!
//! [`Opt::custom`]: crate::Opt::custom
use std::{any::Any, collections::BTreeSet};

use crate::Value;

/// Collects comma separated items, e.g. `-tag a,b -tag c`. Empty items are
/// dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommaList(pub Vec<String>);

/// Like [`CommaList`], but keeps each item once, in sorted order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommaSet(pub BTreeSet<String>);

/// Appends every non-empty value as a whole, commas included.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Appending(pub Vec<String>);

/// Keeps every non-empty value once, as a whole, in sorted order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppendingSet(pub BTreeSet<String>);

fn split(raw: &str) -> impl Iterator<Item = String> + '_ {
    raw.split(',').filter(|it| !it.is_empty()).map(String::from)
}

impl Value for CommaList {
    fn set(&mut self, raw: &str) -> Result<(), String> {
        self.0.extend(split(raw));
        Ok(())
    }
    fn render(&self) -> String {
        self.0.join(",")
    }
    fn clone_value(&self) -> Box<dyn Value> {
        Box::new(self.clone())
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Value for CommaSet {
    fn set(&mut self, raw: &str) -> Result<(), String> {
        self.0.extend(split(raw));
        Ok(())
    }
    fn render(&self) -> String {
        self.0.iter().map(String::as_str).collect::<Vec<_>>().join(",")
    }
    fn clone_value(&self) -> Box<dyn Value> {
        Box::new(self.clone())
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Value for Appending {
    fn set(&mut self, raw: &str) -> Result<(), String> {
        if !raw.is_empty() {
            self.0.push(raw.to_string());
        }
        Ok(())
    }
    fn render(&self) -> String {
        format!("[{}]", self.0.join(" "))
    }
    fn clone_value(&self) -> Box<dyn Value> {
        Box::new(self.clone())
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Value for AppendingSet {
    fn set(&mut self, raw: &str) -> Result<(), String> {
        if !raw.is_empty() {
            self.0.insert(raw.to_string());
        }
        Ok(())
    }
    fn render(&self) -> String {
        format!("[{}]", self.0.iter().map(String::as_str).collect::<Vec<_>>().join(" "))
    }
    fn clone_value(&self) -> Box<dyn Value> {
        Box::new(self.clone())
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
}
