use crate::error::Result;
use std::io::{BufRead, Read};

/// Reads raw record payloads from newline-delimited JSON.
///
/// Payloads are handed out as bytes without being parsed: a record that turns out
/// to be invalid must reach the failure output exactly as it was read.
pub struct RecordReader<R: BufRead> {
    source: R,
}

impl<R: BufRead> RecordReader<R> {
    /// Creates a new `RecordReader` from any buffered source (e.g. `BufReader<File>`, `StdinLock`).
    pub fn new(source: R) -> Self {
        Self { source }
    }

    /// Returns an iterator that lazily yields one payload per non-blank line.
    ///
    /// The line terminator (`\n` or `\r\n`) is stripped; nothing else is touched.
    pub fn records(self) -> impl Iterator<Item = Result<Vec<u8>>> {
        let mut source = self.source;
        std::iter::from_fn(move || {
            loop {
                let mut line = Vec::new();
                match source.read_until(b'\n', &mut line) {
                    Ok(0) => return None,
                    Ok(_) => {
                        if line.last() == Some(&b'\n') {
                            line.pop();
                            if line.last() == Some(&b'\r') {
                                line.pop();
                            }
                        }
                        if line.iter().all(u8::is_ascii_whitespace) {
                            continue;
                        }
                        return Some(Ok(line));
                    }
                    Err(e) => return Some(Err(e.into())),
                }
            }
        })
    }
}

/// Reads an entire source as a single payload.
pub fn read_document<R: Read>(mut source: R) -> Result<Vec<u8>> {
    let mut payload = Vec::new();
    source.read_to_end(&mut payload)?;
    Ok(payload)
}
