//! Helpers for testing programs built on this crate.
//!
//! [`Capture`] records what a [`Cli`](crate::Cli) run writes, per stream and
//! interleaved. [`StubProgram`] lets an action run without a driver.
use std::{
    cell::RefCell,
    io::{self, Write},
    rc::Rc,
};

use crate::{Matches, Program};

type Buf = Rc<RefCell<Vec<u8>>>;

/// In-memory standard output and standard error, plus their combination in
/// write order. Clones share the same buffers.
#[derive(Debug, Clone, Default)]
pub struct Capture {
    out: Buf,
    err: Buf,
    combined: Buf,
}

/// A writer feeding one [`Capture`] stream and the combined one.
#[derive(Debug, Clone)]
pub struct Tee {
    own: Buf,
    combined: Buf,
}

impl Write for Tee {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.own.borrow_mut().extend_from_slice(buf);
        self.combined.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Capture {
    pub fn new() -> Capture {
        Capture::default()
    }

    pub fn stdout(&self) -> Tee {
        Tee { own: Rc::clone(&self.out), combined: Rc::clone(&self.combined) }
    }

    pub fn stderr(&self) -> Tee {
        Tee { own: Rc::clone(&self.err), combined: Rc::clone(&self.combined) }
    }

    pub fn output(&self) -> String {
        read(&self.out)
    }

    pub fn err_output(&self) -> String {
        read(&self.err)
    }

    pub fn combined_output(&self) -> String {
        read(&self.combined)
    }
}

fn read(buf: &Buf) -> String {
    String::from_utf8_lossy(&buf.borrow()).into_owned()
}

/// A [`Program`] writing into a [`Capture`].
///
/// ```
/// use std::io::Write;
///
/// use cmdtree::{clitest::StubProgram, Program};
///
/// let mut prg = StubProgram::new("test");
/// writeln!(prg.stderr(), "foo").unwrap();
/// writeln!(prg.stdout(), "bar").unwrap();
/// assert_eq!(prg.capture().combined_output(), "foo\nbar\n");
/// ```
#[derive(Debug)]
pub struct StubProgram {
    name: String,
    capture: Capture,
    out: Tee,
    err: Tee,
    matches: Matches,
}

impl StubProgram {
    pub fn new(name: impl Into<String>) -> StubProgram {
        StubProgram::with_matches(name, Matches::new())
    }

    /// A stub whose action sees `matches` as its parsed input.
    pub fn with_matches(name: impl Into<String>, matches: Matches) -> StubProgram {
        let capture = Capture::new();
        StubProgram {
            name: name.into(),
            out: capture.stdout(),
            err: capture.stderr(),
            capture,
            matches,
        }
    }

    pub fn capture(&self) -> &Capture {
        &self.capture
    }
}

impl Program for StubProgram {
    fn name(&self) -> &str {
        &self.name
    }
    fn stdout(&mut self) -> &mut dyn io::Write {
        &mut self.out
    }
    fn stderr(&mut self) -> &mut dyn io::Write {
        &mut self.err
    }
    fn matches(&self) -> &Matches {
        &self.matches
    }
}
