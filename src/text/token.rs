//! Line-based tokenizer.

use std::io::{self, BufRead};

use tracing::trace;

/// Reads newline-delimited tokens from a buffered reader.
#[derive(Debug)]
pub struct Tokens<R> {
    r: R,
    line: usize,
}

impl<R: BufRead> Tokens<R> {
    pub fn new(r: R) -> Self {
        Self { r, line: 0 }
    }

    /// Read the next token.
    ///
    /// Returns `None` once the reader is exhausted. A final line without a
    /// terminator is still returned, and a blank line is returned as an empty
    /// token. The terminator itself is never part of the token.
    pub fn next_token(&mut self) -> io::Result<Option<String>> {
        let mut token = String::new();

        if self.r.read_line(&mut token)? == 0 {
            return Ok(None);
        }

        if token.ends_with('\n') {
            token.pop();
        }

        self.line += 1;
        trace!(line = self.line, token = token.as_str(), "read token");

        Ok(Some(token))
    }

    /// The 1-based line number of the last token read, or 0 before the first.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Recover the underlying reader.
    pub fn into_inner(self) -> R {
        self.r
    }
}
