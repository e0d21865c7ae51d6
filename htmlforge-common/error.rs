// Copyright 2014-2017 The html5ever Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A structured anomaly channel, distinct from this crate's `log`-based
//! internal tracing.
//!
//! `TreeSink::parse_error` hands the sink a single free-text message; that's
//! enough for a sink that just wants to count or ignore parse errors, but
//! not enough for one that wants to distinguish an unresolvable encoding
//! from a malformed token from a structural recovery. `ErrorSink` is the
//! richer contract for that: every call carries a `domain`, a stable `key`
//! (for programmatic matching, independent of the human-readable `detail`),
//! and a [`Location`].

use std::borrow::Cow;

/// Which subsystem raised a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorDomain {
    /// Encoding resolution or decoding (BOM/label conflicts, unmappable
    /// byte sequences, a `change the encoding` restart).
    Encoding,
    /// A tokenizer-level anomaly: a malformed tag, a bogus comment, a bad
    /// character reference delimiter.
    MalformedToken,
    /// A named or numeric character reference that doesn't resolve, or
    /// resolves via a legacy/no-semicolon quirk.
    InvalidCharRef,
    /// A tree-construction anomaly recovered by the tag balancer (implied
    /// end tags, foster parenting, the adoption agency, a misnested or
    /// duplicate `<html>`/`<body>`/`<head>`).
    Structural,
    /// An invalid `ParserConfig`, raised by `ParserConfig::validate`.
    Configuration,
}

/// Where in the input a diagnostic applies.
///
/// Byte offsets are monotonically non-decreasing across consecutive events
/// from the same parse; line/column follow the character reader's CR/LF
/// normalization (a lone CR, a CRLF pair, and a lone LF each count as one
/// line advance).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Location {
    pub line: u64,
    pub column: u64,
    pub byte_offset: u64,
}

impl Location {
    pub fn new(line: u64, column: u64, byte_offset: u64) -> Self {
        Location {
            line,
            column,
            byte_offset,
        }
    }
}

/// A marker returned by [`ErrorSink::fatal`] and threaded back out through
/// the driver to unwind the current `parse` call.
///
/// This is the result-based stand-in for the "fatalError unwinds the
/// current parse" behavior of error reporters in languages with exceptions:
/// rather than throwing, `fatal` returns `Stop`, and every call site that
/// can observe a fatal error propagates it with `?` instead of continuing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stop;

/// The structured diagnostic channel a parser reports through.
///
/// Implementations are expected to be cheaply shared (`&self`, no exclusive
/// borrow) since the tokenizer and tree builder both hold a reference to the
/// same sink for the lifetime of a parse.
pub trait ErrorSink {
    fn warning(&self, domain: ErrorDomain, key: &'static str, at: Location, detail: Cow<'static, str>);
    fn error(&self, domain: ErrorDomain, key: &'static str, at: Location, detail: Cow<'static, str>);
    fn fatal(&self, domain: ErrorDomain, key: &'static str, at: Location, detail: Cow<'static, str>) -> Stop;
}

/// An `ErrorSink` that discards everything. The default for callers that
/// don't care about diagnostics (matching the teacher's `TreeSink::parse_error`
/// default of doing nothing).
#[derive(Debug, Clone, Copy, Default)]
pub struct NullErrorSink;

impl ErrorSink for NullErrorSink {
    fn warning(&self, _domain: ErrorDomain, _key: &'static str, _at: Location, _detail: Cow<'static, str>) {}
    fn error(&self, _domain: ErrorDomain, _key: &'static str, _at: Location, _detail: Cow<'static, str>) {}
    fn fatal(&self, _domain: ErrorDomain, _key: &'static str, _at: Location, _detail: Cow<'static, str>) -> Stop {
        Stop
    }
}

/// An `ErrorSink` that forwards to the `log` crate at the matching level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingErrorSink;

impl ErrorSink for LoggingErrorSink {
    fn warning(&self, domain: ErrorDomain, key: &'static str, at: Location, detail: Cow<'static, str>) {
        log::warn!("[{domain:?}:{key}] {}:{}: {detail}", at.line, at.column);
    }

    fn error(&self, domain: ErrorDomain, key: &'static str, at: Location, detail: Cow<'static, str>) {
        log::error!("[{domain:?}:{key}] {}:{}: {detail}", at.line, at.column);
    }

    fn fatal(&self, domain: ErrorDomain, key: &'static str, at: Location, detail: Cow<'static, str>) -> Stop {
        log::error!("[{domain:?}:{key}] {}:{}: fatal: {detail}", at.line, at.column);
        Stop
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_sink_fatal_still_returns_stop() {
        let sink = NullErrorSink;
        let stop = sink.fatal(
            ErrorDomain::Configuration,
            "bad-config",
            Location::default(),
            Cow::Borrowed("unreachable"),
        );
        assert_eq!(stop, Stop);
    }

    #[test]
    fn location_tracks_line_column_and_offset() {
        let at = Location::new(3, 12, 4096);
        assert_eq!(at.line, 3);
        assert_eq!(at.column, 12);
        assert_eq!(at.byte_offset, 4096);
    }
}
