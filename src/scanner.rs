//! Brace-line scanner for `kubectl cluster-info dump` style streams.
//!
//! A dump is a sequence of pretty-printed JSON documents written back to back.
//! Each document's outermost braces sit alone on their own line, which is the
//! only framing the format offers. Nested braces are never on a line by
//! themselves at column zero, so matching bare `{` / `}` lines is enough to
//! cut the stream into complete objects.

use std::io::{self, BufRead};

/* ============================= ITERATOR ============================= */

/// Iterator over the complete top-level objects of a dump stream.
///
/// Lines between a bare `{` and a bare `}` are concatenated verbatim, without
/// their line terminators. An object still open at end of stream is dropped.
pub struct Objects<R> {
    reader: R,
    line: Vec<u8>,
}

impl<R: BufRead> Objects<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: Vec::new(),
        }
    }

    fn next_line(&mut self) -> io::Result<Option<String>> {
        self.line.clear();
        if self.reader.read_until(b'\n', &mut self.line)? == 0 {
            return Ok(None);
        }
        if self.line.last() == Some(&b'\n') {
            self.line.pop();
            if self.line.last() == Some(&b'\r') {
                self.line.pop();
            }
        }
        Ok(Some(String::from_utf8_lossy(&self.line).into_owned()))
    }
}

impl<R: BufRead> Iterator for Objects<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut buffer: Option<String> = None;
        loop {
            let line = match self.next_line() {
                Ok(Some(line)) => line,
                // unterminated trailing object is discarded
                Ok(None) => return None,
                Err(e) => return Some(Err(e)),
            };

            if line == "{" {
                buffer = Some(line);
            } else if line == "}" {
                if let Some(mut object) = buffer.take() {
                    object.push('}');
                    return Some(Ok(object));
                }
            } else if let Some(object) = buffer.as_mut() {
                object.push_str(&line);
            }
        }
    }
}

/* ============================= CALLBACK ============================= */

/// Scan `reader` and hand every complete top-level object to `handler`.
///
/// Returns the number of objects emitted. I/O errors abort the scan.
pub fn scan_objects<R, F>(reader: R, mut handler: F) -> io::Result<usize>
where
    R: BufRead,
    F: FnMut(String),
{
    let mut emitted = 0;
    for object in Objects::new(reader) {
        handler(object?);
        emitted += 1;
    }
    Ok(emitted)
}

/* ============================= TESTS ============================= */
