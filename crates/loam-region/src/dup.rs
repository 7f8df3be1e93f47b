//! Duplication and in-place formatting helpers.
//!
//! All of these reduce to a bump allocation plus one copy. Formatting is
//! special-cased: it first renders straight into the current block's free
//! tail and only falls back to measure-then-render when the output does
//! not fit, so the common case formats exactly once.

use std::fmt::{self, Write};

use crate::raw;
use crate::region::Region;

/// Renders into a fixed byte span, failing when the span is full.
struct SpanWriter<'a> {
    span: &'a mut [u8],
    written: usize,
}

impl fmt::Write for SpanWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let bytes = s.as_bytes();
        let end = match self.written.checked_add(bytes.len()) {
            Some(end) if end <= self.span.len() => end,
            _ => return Err(fmt::Error),
        };
        self.span[self.written..end].copy_from_slice(bytes);
        self.written = end;
        Ok(())
    }
}

/// Measures rendered length without storing anything.
struct CountingWriter {
    written: usize,
}

impl fmt::Write for CountingWriter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.written = self.written.saturating_add(s.len());
        Ok(())
    }
}

impl<'p> Region<'p> {
    /// Copy `bytes` into a word-aligned region span.
    pub fn dup(&self, bytes: &[u8]) -> &mut [u8] {
        let span = self.alloc(bytes.len());
        span.copy_from_slice(bytes);
        span
    }

    /// Copy `bytes` into an unaligned region span.
    pub fn dup_unaligned(&self, bytes: &[u8]) -> &mut [u8] {
        let span = self.alloc_unaligned(bytes.len());
        span.copy_from_slice(bytes);
        span
    }

    /// Copy `bytes` into an unaligned span with one extra terminating
    /// zero byte; the returned span includes the terminator.
    pub fn dup_with_nul(&self, bytes: &[u8]) -> &mut [u8] {
        let span = self.alloc_unaligned(bytes.len() + 1);
        span[..bytes.len()].copy_from_slice(bytes);
        span[bytes.len()] = 0;
        span
    }

    /// Copy a string into the region.
    pub fn dup_str(&self, s: &str) -> &str {
        let span = self.dup_unaligned(s.as_bytes());
        raw::assume_utf8(span)
    }

    /// Copy the longest prefix of `s` that is at most `max_len` bytes and
    /// ends on a character boundary.
    pub fn dup_str_prefix(&self, s: &str, max_len: usize) -> &str {
        let mut end = max_len.min(s.len());
        while !s.is_char_boundary(end) {
            end -= 1;
        }
        self.dup_str(&s[..end])
    }

    /// Render `args` into the region and return the resulting string.
    ///
    /// The first attempt renders directly into the current block's free
    /// tail. Only when that overflows are the arguments measured and
    /// rendered a second time, into an exact unaligned allocation — never
    /// more than two rendering passes and no intermediate heap buffer.
    ///
    /// # Panics
    ///
    /// Panics if `args` renders differently across the two passes.
    pub fn format(&self, args: fmt::Arguments<'_>) -> &str {
        let (base, capacity) = self.current_block();
        let cursor = self.cursor_offset();
        let remaining = capacity - cursor;
        if remaining > 0 {
            let tail = raw::carve_span(base, cursor, remaining);
            let mut writer = SpanWriter {
                span: tail,
                written: 0,
            };
            if writer.write_fmt(args).is_ok() {
                let SpanWriter { span, written } = writer;
                self.commit_tail(written);
                return raw::assume_utf8(&span[..written]);
            }
        }
        let mut counter = CountingWriter { written: 0 };
        let _ = counter.write_fmt(args);
        let span = self.alloc_unaligned(counter.written);
        let mut writer = SpanWriter { span, written: 0 };
        if writer.write_fmt(args).is_err() || writer.written != counter.written {
            panic!("format arguments rendered differently across passes");
        }
        let SpanWriter { span, written } = writer;
        raw::assume_utf8(&span[..written])
    }
}
