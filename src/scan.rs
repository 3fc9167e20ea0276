use crate::Error;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// A single physical line together with its 1-based position in the input.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Line {
    /// 1-based line number
    pub number: usize,
    /// Line text, without the line terminator
    pub text: String,
}

/// A cursor over the physical lines of a Makefile.
///
/// The counter starts at 1 and is bumped by every call to [`LineSource::advance`],
/// including the final read that hits end-of-stream, so after reading line `k`
/// [`LineSource::line_number`] reports `k + 1`.
pub struct LineSource<R> {
    identifier: String,
    reader: R,
    buf: Vec<u8>,
    text: String,
    line_number: usize,
    finished: bool,
}

impl LineSource<BufReader<File>> {
    /// Open the file named by `identifier` for reading.
    pub fn open(identifier: &str) -> Result<Self, Error> {
        let file = File::open(Path::new(identifier)).map_err(|source| Error::Open {
            identifier: identifier.to_string(),
            source,
        })?;
        log::debug!("opened {}", identifier);
        Ok(Self::new(identifier, BufReader::new(file)))
    }
}

impl<R: BufRead> LineSource<R> {
    /// Wrap an already open reader.
    pub fn new(identifier: &str, reader: R) -> Self {
        LineSource {
            identifier: identifier.to_string(),
            reader,
            buf: Vec::new(),
            text: String::new(),
            line_number: 1,
            finished: false,
        }
    }

    /// Read the next physical line.
    ///
    /// Returns `Ok(false)` once the input is exhausted. A read failure is
    /// returned as [`Error::Read`] and does not mark the source as finished.
    pub fn advance(&mut self) -> Result<bool, Error> {
        self.line_number += 1;
        self.text.clear();
        self.buf.clear();

        let read = self
            .reader
            .read_until(b'\n', &mut self.buf)
            .map_err(|source| Error::Read {
                identifier: self.identifier.clone(),
                source,
            })?;
        if read == 0 {
            self.finished = true;
            return Ok(false);
        }

        if self.buf.last() == Some(&b'\n') {
            self.buf.pop();
            if self.buf.last() == Some(&b'\r') {
                self.buf.pop();
            }
        }
        self.text.push_str(&String::from_utf8_lossy(&self.buf));
        Ok(true)
    }

    /// The text of the line most recently read.
    pub fn current_text(&self) -> &str {
        &self.text
    }

    /// Whether the input hit end-of-stream.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// The line counter, i.e. the number of the next line to be read.
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// The 1-based number of the line most recently read.
    pub fn current_line_number(&self) -> usize {
        self.line_number - 1
    }

    /// The identifier this source was opened with.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }
}

impl<R: BufRead> Iterator for LineSource<R> {
    type Item = Result<Line, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.advance() {
            Ok(true) => Some(Ok(Line {
                number: self.current_line_number(),
                text: self.text.clone(),
            })),
            Ok(false) => None,
            Err(e) => Some(Err(e)),
        }
    }
}
