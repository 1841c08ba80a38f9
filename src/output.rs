use std::{
    cell::RefCell,
    io::{self, Write},
    rc::Rc,
};

/// Where a buffered write was meant to go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
}

/// An append-only log of writes to the logical standard output and standard
/// error, replayed onto the real sinks in the order they happened.
///
/// Clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct Deferred {
    log: Rc<RefCell<Vec<(Stream, Vec<u8>)>>>,
}

impl Deferred {
    pub fn new() -> Deferred {
        Deferred::default()
    }

    /// Records `bytes` for `dest`. Never fails.
    pub fn write(&self, dest: Stream, bytes: &[u8]) {
        self.log.borrow_mut().push((dest, bytes.to_vec()));
    }

    pub fn writer(&self, dest: Stream) -> DeferredWriter {
        DeferredWriter { log: self.clone(), dest }
    }

    /// Replays the log onto the real sinks and empties it, so a second call
    /// writes nothing.
    ///
    /// A failing sink does not stop the replay: every entry and both flushes
    /// are attempted, and the first error is returned.
    pub fn flush(&self, stdout: &mut dyn Write, stderr: &mut dyn Write) -> io::Result<()> {
        let log = std::mem::take(&mut *self.log.borrow_mut());
        let mut first = None;
        for (dest, bytes) in log {
            let res = match dest {
                Stream::Stdout => stdout.write_all(&bytes),
                Stream::Stderr => stderr.write_all(&bytes),
            };
            if let Err(err) = res {
                first.get_or_insert(err);
            }
        }
        for res in [stdout.flush(), stderr.flush()] {
            if let Err(err) = res {
                first.get_or_insert(err);
            }
        }
        first.map_or(Ok(()), Err)
    }
}

/// A [`Write`] handle that records into a [`Deferred`] log.
#[derive(Debug, Clone)]
pub struct DeferredWriter {
    log: Deferred,
    dest: Stream,
}

impl Write for DeferredWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.log.write(self.dest, buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
