use std::{any::Any, collections::BTreeMap, fmt};

/// A typed slot that options and positional arguments parse into.
///
/// The command tree holds one prototype per option or argument. Every run
/// works on fresh clones of those prototypes, so a tree can be parsed any
/// number of times.
pub trait Value: fmt::Debug + Any {
    /// Parses `raw` and stores the result. Returns a human readable reason on
    /// failure.
    fn set(&mut self, raw: &str) -> Result<(), String>;

    /// Renders the current value, used for defaults in help text.
    fn render(&self) -> String;

    /// Switches are set by their presence alone and never consume the next
    /// token.
    fn is_switch(&self) -> bool {
        false
    }

    fn clone_value(&self) -> Box<dyn Value>;

    fn as_any(&self) -> &dyn Any;
}

impl Clone for Box<dyn Value> {
    fn clone(&self) -> Self {
        self.clone_value()
    }
}

impl Value for bool {
    fn set(&mut self, raw: &str) -> Result<(), String> {
        *self = match raw {
            "1" | "t" | "T" | "true" | "TRUE" | "True" => true,
            "0" | "f" | "F" | "false" | "FALSE" | "False" => false,
            _ => return Err("invalid syntax".to_string()),
        };
        Ok(())
    }
    fn render(&self) -> String {
        self.to_string()
    }
    fn is_switch(&self) -> bool {
        true
    }
    fn clone_value(&self) -> Box<dyn Value> {
        Box::new(*self)
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Value for String {
    fn set(&mut self, raw: &str) -> Result<(), String> {
        *self = raw.to_string();
        Ok(())
    }
    fn render(&self) -> String {
        self.clone()
    }
    fn clone_value(&self) -> Box<dyn Value> {
        Box::new(self.clone())
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Value for isize {
    fn set(&mut self, raw: &str) -> Result<(), String> {
        let n = parse_int(raw)?;
        *self = isize::try_from(n).map_err(|_| "value out of range".to_string())?;
        Ok(())
    }
    fn render(&self) -> String {
        self.to_string()
    }
    fn clone_value(&self) -> Box<dyn Value> {
        Box::new(*self)
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Value for i64 {
    fn set(&mut self, raw: &str) -> Result<(), String> {
        *self = parse_int(raw)?;
        Ok(())
    }
    fn render(&self) -> String {
        self.to_string()
    }
    fn clone_value(&self) -> Box<dyn Value> {
        Box::new(*self)
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Every `set` appends, including empty strings.
impl Value for Vec<String> {
    fn set(&mut self, raw: &str) -> Result<(), String> {
        self.push(raw.to_string());
        Ok(())
    }
    fn render(&self) -> String {
        self.join(",")
    }
    fn clone_value(&self) -> Box<dyn Value> {
        Box::new(self.clone())
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Parses an integer the way C-family literals are written: optional sign,
/// `0x`/`0o`/`0b` prefixes, a leading `0` for octal and `_` separators.
fn parse_int(raw: &str) -> Result<i64, String> {
    let (negative, digits) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw.strip_prefix('+').unwrap_or(raw)),
    };
    let lower = digits.to_ascii_lowercase();
    let (radix, body) = if let Some(rest) = lower.strip_prefix("0x") {
        (16, rest.to_string())
    } else if let Some(rest) = lower.strip_prefix("0o") {
        (8, rest.to_string())
    } else if let Some(rest) = lower.strip_prefix("0b") {
        (2, rest.to_string())
    } else if lower.len() > 1 && lower.starts_with('0') {
        (8, lower[1..].to_string())
    } else {
        (10, lower.clone())
    };
    if body.is_empty() || body.starts_with('_') || body.ends_with('_') || body.contains("__") {
        return Err("invalid syntax".to_string());
    }
    let body = body.replace('_', "");
    // Parse with the sign attached so that `i64::MIN` stays representable.
    let signed = if negative { format!("-{body}") } else { body };
    i64::from_str_radix(&signed, radix).map_err(|err| err.to_string())
}

/// Values collected by a successful dispatch.
///
/// Options are keyed by their primary name and hold either the parsed value
/// or their default. Positional arguments are keyed by label and only appear
/// when a token was actually consumed for them.
#[derive(Debug, Clone, Default)]
pub struct Matches {
    options: BTreeMap<String, Box<dyn Value>>,
    args: BTreeMap<String, Box<dyn Value>>,
}

impl Matches {
    pub fn new() -> Matches {
        Matches::default()
    }

    /// Records option `name`, replacing an earlier value under the same name.
    pub fn insert_option(&mut self, name: String, value: Box<dyn Value>) {
        self.options.insert(name, value);
    }

    pub fn insert_arg(&mut self, label: String, value: Box<dyn Value>) {
        self.args.insert(label, value);
    }

    /// Returns the option `name` downcast to `T`.
    pub fn get<T: Value>(&self, name: &str) -> Option<&T> {
        self.options.get(name).and_then(|it| it.as_any().downcast_ref::<T>())
    }

    /// Returns the positional argument `label` downcast to `T`.
    pub fn get_arg<T: Value>(&self, label: &str) -> Option<&T> {
        self.args.get(label).and_then(|it| it.as_any().downcast_ref::<T>())
    }

    /// Whether the boolean option `name` is set. Unknown names are `false`.
    pub fn flag(&self, name: &str) -> bool {
        self.get::<bool>(name).copied().unwrap_or(false)
    }

    pub fn string(&self, name: &str) -> Option<&str> {
        self.get::<String>(name).map(String::as_str)
    }

    pub fn int(&self, name: &str) -> Option<isize> {
        self.get::<isize>(name).copied()
    }

    pub fn int64(&self, name: &str) -> Option<i64> {
        self.get::<i64>(name).copied()
    }

    /// A single string positional argument.
    pub fn arg(&self, label: &str) -> Option<&str> {
        self.get_arg::<String>(label).map(String::as_str)
    }

    /// A repeating positional argument; empty when nothing matched.
    pub fn args(&self, label: &str) -> &[String] {
        self.get_arg::<Vec<String>>(label).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether any value was recorded under `name`, as option or argument.
    pub fn contains(&self, name: &str) -> bool {
        self.options.contains_key(name) || self.args.contains_key(name)
    }
}
