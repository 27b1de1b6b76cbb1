//! Output Sinks
//!
//! Destinations for rendered reports. The runner only ever talks to the
//! [`OutputSink`] trait, so callers decide where text goes.

use std::cell::{Cell, RefCell};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::rc::Rc;

/// Destination for rendered report text
pub trait OutputSink {
    /// Write `text` as-is
    fn print(&mut self, text: &str) -> io::Result<()>;

    /// Write `text` followed by a newline
    fn println(&mut self, text: &str) -> io::Result<()> {
        self.print(text)?;
        self.print("\n")
    }

    /// Flush and release the destination. Further writes are unspecified.
    fn close(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<S: OutputSink + ?Sized> OutputSink for Box<S> {
    fn print(&mut self, text: &str) -> io::Result<()> {
        (**self).print(text)
    }

    fn println(&mut self, text: &str) -> io::Result<()> {
        (**self).println(text)
    }

    fn close(&mut self) -> io::Result<()> {
        (**self).close()
    }
}

/// Writes to the process's standard output
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

impl OutputSink for StdoutSink {
    fn print(&mut self, text: &str) -> io::Result<()> {
        io::stdout().lock().write_all(text.as_bytes())
    }

    fn close(&mut self) -> io::Result<()> {
        io::stdout().lock().flush()
    }
}

/// Writes to a file through a buffer
#[derive(Debug)]
pub struct FileSink {
    writer: Option<BufWriter<File>>,
}

impl FileSink {
    /// Create (or truncate) the file at `path`, creating parent directories
    pub fn create(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let file = File::create(path)?;
        Ok(Self {
            writer: Some(BufWriter::new(file)),
        })
    }
}

impl OutputSink for FileSink {
    fn print(&mut self, text: &str) -> io::Result<()> {
        match self.writer.as_mut() {
            Some(writer) => writer.write_all(text.as_bytes()),
            None => Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed")),
        }
    }

    fn close(&mut self) -> io::Result<()> {
        if let Some(mut writer) = self.writer.take() {
            writer.flush()?;
        }
        Ok(())
    }
}

/// Collects text in memory.
///
/// Clones share the same buffer, so a caller can keep one handle and give the
/// other to a runner.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    buffer: Rc<RefCell<String>>,
    closed: Rc<Cell<bool>>,
}

impl MemorySink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far
    pub fn contents(&self) -> String {
        self.buffer.borrow().clone()
    }

    /// Whether [`OutputSink::close`] was called
    pub fn is_closed(&self) -> bool {
        self.closed.get()
    }
}

impl OutputSink for MemorySink {
    fn print(&mut self, text: &str) -> io::Result<()> {
        self.buffer.borrow_mut().push_str(text);
        Ok(())
    }

    fn close(&mut self) -> io::Result<()> {
        self.closed.set(true);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink_shares_buffer() {
        let sink = MemorySink::new();
        let mut handle: Box<dyn OutputSink> = Box::new(sink.clone());

        handle.print("a").unwrap();
        handle.println("b").unwrap();
        handle.close().unwrap();

        assert_eq!(sink.contents(), "ab\n");
        assert!(sink.is_closed());
    }

    #[test]
    fn test_file_sink_writes_on_close() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("report.txt");

        let mut sink = FileSink::create(&path).unwrap();
        sink.println("hello").unwrap();
        sink.close().unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello\n");
    }

    #[test]
    fn test_file_sink_rejects_after_close() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = FileSink::create(dir.path().join("out.txt")).unwrap();
        sink.close().unwrap();
        assert!(sink.print("late").is_err());
        // Closing twice is harmless
        assert!(sink.close().is_ok());
    }
}
