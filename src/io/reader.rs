use std::collections::VecDeque;
use std::io::{self, Read};

use tracing::{debug, trace, warn};

use super::config::{ReaderConfig, TrailingPolicy};
use super::ReadError;
use crate::error::ExtractError;
use crate::lines::{extract_lines, line_spans, CR};

/// Reads decoded lines from any [`Read`] source through one reusable buffer.
///
/// Each fill reads at most the free space of the buffer, runs
/// [`extract_lines`] over `remainder + n` bytes and keeps the new remainder at
/// the front. The buffer only grows when it is full and still holds no line
/// terminator, and never past `max_line_length + 2` bytes, room for a line of
/// the maximum length plus CRLF.
///
/// The limit applies to line content, terminator excluded. It is enforced
/// for every line whatever the buffer size: lines that complete inside one
/// read are checked as well as the unterminated remainder.
///
/// Decode errors and [`ReadError::LineTooLong`] end the stream: later calls
/// return no more lines. I/O errors leave the reader intact, so a
/// `WouldBlock` or similar can be retried.
#[derive(Debug)]
pub struct LineReader<R> {
    inner: R,
    config: ReaderConfig,
    buf: Vec<u8>,
    filled: usize,
    pending: VecDeque<String>,
    deferred: Option<ReadError>,
    finished: bool,
}

impl<R: Read> LineReader<R> {
    /// Create a reader with the default [`ReaderConfig`].
    pub fn new(inner: R) -> Self {
        Self::with_config(inner, ReaderConfig::default())
    }

    /// Create a reader with an explicit configuration.
    pub fn with_config(inner: R, config: ReaderConfig) -> Self {
        let capacity = config.capacity.max(1);
        Self {
            inner,
            buf: vec![0; capacity],
            config,
            filled: 0,
            pending: VecDeque::new(),
            deferred: None,
            finished: false,
        }
    }

    /// Read once from the source and append every line that completes.
    ///
    /// Returns the number of lines appended, which may be zero when the read
    /// did not complete a line. Once the input is exhausted the trailing
    /// bytes are handled per [`ReaderConfig::trailing`] and
    /// [`is_finished`](Self::is_finished) turns true; later calls append
    /// nothing.
    pub fn read_lines(&mut self, lines: &mut Vec<String>) -> Result<usize, ReadError> {
        let before = lines.len();
        lines.extend(self.pending.drain(..));
        if let Some(err) = self.deferred.take() {
            return Err(err);
        }
        if self.finished {
            return Ok(lines.len() - before);
        }

        self.ensure_space()?;
        let n = self.read_some()?;
        if n == 0 {
            self.finish(lines)?;
            return Ok(lines.len() - before);
        }

        // Lines ahead of an overlong one are still delivered.
        let size = self.filled + n;
        let overlong = self.first_overlong_line(size);
        let end = overlong.unwrap_or(size);
        match extract_lines(&mut self.buf, end, self.config.encoding, lines) {
            Ok(remainder) => self.filled = remainder,
            Err(err) => {
                self.finished = true;
                return Err(err.into());
            }
        }
        trace!(read = n, remainder = self.filled, "filled line buffer");

        if overlong.is_some() || self.partial_line_len() > self.limit() {
            return Err(self.line_too_long());
        }
        Ok(lines.len() - before)
    }

    /// True once end of input has been handled or a fatal error occurred.
    pub fn is_finished(&self) -> bool {
        self.finished && self.pending.is_empty() && self.deferred.is_none()
    }

    /// Bytes currently held as an unterminated partial line.
    pub fn buffered(&self) -> usize {
        self.filled
    }

    /// Current buffer size.
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// The active configuration.
    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    /// Borrow the underlying reader.
    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    /// Unwrap the underlying reader. Buffered bytes are lost.
    pub fn into_inner(self) -> R {
        self.inner
    }

    fn limit(&self) -> usize {
        self.config.max_line_length.unwrap_or(usize::MAX)
    }

    fn line_too_long(&mut self) -> ReadError {
        self.finished = true;
        ReadError::LineTooLong {
            limit: self.limit(),
        }
    }

    /// Content length of the buffered partial line. A final CR may still
    /// pair with the next LF, so it is not counted yet.
    fn partial_line_len(&self) -> usize {
        match self.buf[..self.filled].last() {
            Some(&CR) => self.filled - 1,
            _ => self.filled,
        }
    }

    /// Start offset of the first terminated line in `buf[..size]` whose
    /// content exceeds the limit.
    fn first_overlong_line(&self, size: usize) -> Option<usize> {
        let limit = self.config.max_line_length?;
        // The shortest overlong line is `limit + 1` bytes plus LF.
        if size <= limit.saturating_add(1) {
            return None;
        }

        let mut spans = line_spans(&self.buf[..size]);
        let mut start = 0;
        while let Some(line) = spans.next() {
            if line.len() > limit {
                return Some(start);
            }
            start = spans.consumed();
        }
        None
    }

    fn ensure_space(&mut self) -> Result<(), ReadError> {
        let current = self.buf.len();
        if self.filled < current {
            return Ok(());
        }

        let ceiling = self.limit().saturating_add(2);
        if current >= ceiling {
            return Err(self.line_too_long());
        }

        let grown = current.saturating_mul(2).min(ceiling);
        debug!(from = current, to = grown, "growing line buffer");
        self.buf.resize(grown, 0);
        Ok(())
    }

    fn read_some(&mut self) -> io::Result<usize> {
        loop {
            match self.inner.read(&mut self.buf[self.filled..]) {
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                result => return result,
            }
        }
    }

    fn finish(&mut self, lines: &mut Vec<String>) -> Result<(), ReadError> {
        self.finished = true;
        let len = std::mem::take(&mut self.filled);
        if len == 0 {
            debug!("end of input");
            return Ok(());
        }

        match self.config.trailing {
            TrailingPolicy::Emit => {
                if len > self.limit() {
                    return Err(self.line_too_long());
                }
                let text = self.config.encoding.decode(&self.buf[..len]).map_err(|source| {
                    ExtractError::Decode {
                        line: 1,
                        column: source.offset + 1,
                        offset: source.offset,
                        source,
                    }
                })?;
                debug!(len, "end of input, emitting unterminated line");
                lines.push(text);
            }
            TrailingPolicy::Discard => warn!(len, "discarding unterminated final line"),
            TrailingPolicy::Error => return Err(ReadError::TruncatedLine { len }),
        }
        Ok(())
    }
}

impl<R: Read> Iterator for LineReader<R> {
    type Item = Result<String, ReadError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(line) = self.pending.pop_front() {
                return Some(Ok(line));
            }
            if let Some(err) = self.deferred.take() {
                return Some(Err(err));
            }
            if self.finished {
                return None;
            }

            // Lines completed before a failure are yielded ahead of the error.
            let mut batch = Vec::new();
            if let Err(err) = self.read_lines(&mut batch) {
                self.deferred = Some(err);
            }
            self.pending.extend(batch);
        }
    }
}
