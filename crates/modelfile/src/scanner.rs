//! Quote-aware line scanner.
//!
//! Splits raw Modelfile bytes into logical lines.  A `"""…"""` or `"…"`
//! span that opens on a line is kept in that line's token even when it
//! runs across embedded newlines; the quote markers themselves are
//! dropped from the token.
//!
//! [`scan_modelfile`] is the pure split step over whatever is buffered.
//! [`Scanner`] drives it over any [`Read`], pulling more bytes only when
//! the split step asks for them.

use std::io::{self, Read};

use tracing::trace;

use crate::error::{ModelfileError, Result};
use crate::types::DEFAULT_MAX_TOKEN_SIZE;

const TRIPLE_QUOTE: &str = "\"\"\"";
const QUOTE: &str = "\"";

/// Bytes requested from the reader per fill.
const READ_CHUNK: usize = 4096;

//  Split step

/// Outcome of one split attempt over buffered data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scan {
    /// A complete logical line, produced by consuming `advance` bytes.
    Token { advance: usize, token: Vec<u8> },
    /// The buffer does not yet hold a complete line.  At end of input
    /// this only happens once the data is exhausted.
    NeedMore,
}

/// Split the next logical line off the front of `data`.
///
/// Triple quotes are tried before single quotes; a marker only opens a
/// quoted span if it sits before the first newline.  Otherwise the next
/// plain line is returned without its terminator.
pub fn scan_modelfile(data: &[u8], at_eof: bool) -> Result<Scan> {
    if data.is_empty() {
        return Ok(Scan::NeedMore);
    }

    // Without a newline the line is only complete once input has ended.
    let line_end = match data.iter().position(|&b| b == b'\n') {
        Some(i) => i,
        None if at_eof => data.len(),
        None => return Ok(Scan::NeedMore),
    };

    for marker in [TRIPLE_QUOTE, QUOTE] {
        if let Some(scan) = scan_quoted(marker, marker, data, line_end, at_eof)? {
            return Ok(scan);
        }
    }

    Ok(scan_line(data, line_end))
}

fn scan_quoted(
    open: &'static str,
    close: &'static str,
    data: &[u8],
    line_end: usize,
    at_eof: bool,
) -> Result<Option<Scan>> {
    let Some(start) = find(&data[..line_end], open.as_bytes()) else {
        return Ok(None);
    };

    let body = start + open.len();
    let Some(len) = find(&data[body..], close.as_bytes()) else {
        if at_eof {
            return Err(ModelfileError::UnterminatedQuote { close });
        }
        return Ok(Some(Scan::NeedMore));
    };

    let mut token = Vec::with_capacity(start + len);
    token.extend_from_slice(&data[..start]);
    token.extend_from_slice(&data[body..body + len]);

    Ok(Some(Scan::Token {
        advance: body + len + close.len(),
        token,
    }))
}

fn scan_line(data: &[u8], line_end: usize) -> Scan {
    let advance = if line_end < data.len() {
        line_end + 1
    } else {
        line_end
    };
    let line = &data[..line_end];
    let line = line.strip_suffix(b"\r").unwrap_or(line);

    Scan::Token {
        advance,
        token: line.to_vec(),
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

//  Streaming driver

/// A logical line together with the 1-based line number it starts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub line: usize,
    pub bytes: Vec<u8>,
}

/// Pull-based tokenizer over a byte stream.
pub struct Scanner<R> {
    reader: R,
    buf: Vec<u8>,
    start: usize,
    line: usize,
    max_token_size: usize,
    at_eof: bool,
    done: bool,
}

impl<R: Read> Scanner<R> {
    pub fn new(reader: R) -> Self {
        Self::with_max_token_size(reader, DEFAULT_MAX_TOKEN_SIZE)
    }

    pub fn with_max_token_size(reader: R, max_token_size: usize) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            start: 0,
            line: 1,
            max_token_size,
            at_eof: false,
            done: false,
        }
    }

    /// Next logical line, or `None` once the input is exhausted.
    ///
    /// After an error the scanner is finished and keeps returning `None`.
    pub fn next_token(&mut self) -> Result<Option<Token>> {
        if self.done {
            return Ok(None);
        }

        loop {
            let data = &self.buf[self.start..];
            match scan_modelfile(data, self.at_eof) {
                Ok(Scan::Token { advance, token }) => {
                    let line = self.line;
                    self.line += data[..advance].iter().filter(|&&b| b == b'\n').count();
                    self.start += advance;
                    trace!(line, len = token.len(), "scanned token");
                    return Ok(Some(Token { line, bytes: token }));
                }
                Ok(Scan::NeedMore) if self.at_eof => {
                    self.done = true;
                    return Ok(None);
                }
                Ok(Scan::NeedMore) => {
                    if let Err(e) = self.fill() {
                        self.done = true;
                        return Err(e);
                    }
                }
                Err(e) => {
                    self.done = true;
                    return Err(e);
                }
            }
        }
    }

    /// Read another chunk into the buffer, discarding consumed bytes first.
    fn fill(&mut self) -> Result<()> {
        if self.start > 0 {
            self.buf.drain(..self.start);
            self.start = 0;
        }
        if self.buf.len() >= self.max_token_size {
            return Err(ModelfileError::TokenTooLong {
                limit: self.max_token_size,
            });
        }

        let filled = self.buf.len();
        let want = READ_CHUNK.min(self.max_token_size - filled);
        self.buf.resize(filled + want, 0);

        let read = loop {
            match self.reader.read(&mut self.buf[filled..]) {
                Ok(n) => break n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.buf.truncate(filled);
                    return Err(e.into());
                }
            }
        };

        self.buf.truncate(filled + read);
        if read == 0 {
            self.at_eof = true;
        }
        Ok(())
    }
}

impl<R: Read> Iterator for Scanner<R> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token().transpose()
    }
}
