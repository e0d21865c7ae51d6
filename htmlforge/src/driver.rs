// Copyright 2014-2017 The html5ever Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The entry points that wire a [`TreeSink`] to the tokenizer and tree
//! builder, and the configuration surface controlling both.

use std::borrow::Cow;
use std::rc::Rc;

use crate::buffer_queue::BufferQueue;
use crate::tendril::{fmt, StrTendril, TendrilSink};
use crate::tokenizer::{NameCasePolicy, PiHandling, TokenizerResult, Tokenizer, TokenizerOpts};
use crate::tree_builder::{ElementFlags, TreeBuilder, TreeBuilderOpts, TreeSink};
use crate::{Attribute, QualName};

use htmlforge_common::encoding::{Confidence, Decoder, EncodingResolver};
use htmlforge_common::error::{ErrorDomain, ErrorSink, Location, LoggingErrorSink};
use htmlforge_common::input_stream::InputStream;

/// Bundles the tokenizer and tree builder's own option structs, mirroring
/// the two-subsystem split those structs already have. Most callers build
/// one of these through [`ParserConfig`] instead of populating it directly.
#[derive(Clone, Default)]
pub struct ParseOpts {
    /// Tokenizer options, including `pi_handling`.
    pub tokenizer: TokenizerOpts,
    /// Tree builder options.
    pub tree_builder: TreeBuilderOpts,
}

/// A configuration error raised by [`ParserConfig::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigurationError(pub Cow<'static, str>);

/// The full configuration surface for a parse: tokenizer/tree-builder
/// options plus the caller-facing knobs this core exposes over them
/// (processing-instruction handling, a default encoding label, and where
/// diagnostics go).
///
/// `namespaces` and `include_comments` describe DOM-shape decisions a
/// SAX-style parser would make itself; since tree construction here is the
/// sink's responsibility (see [`TreeSink`]), these are advisory and
/// forwarded to the sink through `ElementFlags`/`TreeBuilderOpts` rather than
/// acted on directly by this struct. `names_elems`/`names_attrs` are not
/// advisory: they select the tokenizer's case policy directly, so the name
/// the sink receives is already cased the way the caller asked.
pub struct ParserConfig {
    /// Whether `<?target data?>` tokenizes as a processing instruction
    /// (`true`) or a bogus comment (`false`, the HTML5 default).
    pub process_processing_instructions: bool,
    /// Report every parse error the spec describes, not just the ones that
    /// affect tree shape.
    pub report_errors: bool,
    /// A caller-supplied encoding label (e.g. from a `Content-Type` header),
    /// used ahead of BOM/meta sniffing. Must be a label `encoding_rs`
    /// recognizes; `validate` rejects anything else.
    pub default_encoding: Option<String>,
    /// Preserve HTML comments in the event stream.
    pub include_comments: bool,
    /// Resolve namespaces for foreign (SVG/MathML) content. Always `true`
    /// in practice; this core has no non-namespace-aware mode.
    pub namespaces: bool,
    /// Case policy applied to element names once the scanner finishes
    /// reading each one. Default: `Lower`, matching the HTML5 spec.
    pub names_elems: NameCasePolicy,
    /// Case policy applied to attribute names once the scanner finishes
    /// reading each one. Default: `Lower`, matching the HTML5 spec.
    pub names_attrs: NameCasePolicy,
    /// Where diagnostics from `ErrorSink` go. Defaults to a `log`-forwarding
    /// sink so observability is never silently dropped, even when a caller
    /// never looks at `report_errors`.
    pub error_sink: Rc<dyn ErrorSink>,
    /// The underlying tokenizer/tree-builder options this config resolves
    /// into via [`ParserConfig::parse_opts`].
    pub tree_builder: TreeBuilderOpts,
}

impl Clone for ParserConfig {
    fn clone(&self) -> Self {
        ParserConfig {
            process_processing_instructions: self.process_processing_instructions,
            report_errors: self.report_errors,
            default_encoding: self.default_encoding.clone(),
            include_comments: self.include_comments,
            namespaces: self.namespaces,
            names_elems: self.names_elems,
            names_attrs: self.names_attrs,
            error_sink: Rc::clone(&self.error_sink),
            tree_builder: self.tree_builder,
        }
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        ParserConfig {
            process_processing_instructions: false,
            report_errors: false,
            default_encoding: None,
            include_comments: true,
            namespaces: true,
            names_elems: NameCasePolicy::Lower,
            names_attrs: NameCasePolicy::Lower,
            error_sink: Rc::new(LoggingErrorSink),
            tree_builder: TreeBuilderOpts::default(),
        }
    }
}

impl ParserConfig {
    /// Checks the configuration for internal consistency, raising
    /// `ErrorSink::fatal` with `ErrorDomain::Configuration` and returning the
    /// corresponding error synchronously — i.e. at construction time, not
    /// during parsing — rather than discovering a bad encoding label mid-feed.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if let Some(label) = &self.default_encoding {
            if encoding_rs::Encoding::for_label(label.as_bytes()).is_none() {
                let detail: Cow<'static, str> = Cow::Owned(format!("unrecognized encoding label: {label}"));
                self.error_sink.fatal(
                    ErrorDomain::Configuration,
                    "unknown-default-encoding",
                    Location::default(),
                    detail.clone(),
                );
                return Err(ConfigurationError(detail));
            }
        }
        Ok(())
    }

    /// The `&'static Encoding` named by `default_encoding`, already validated.
    pub fn default_encoding(&self) -> Option<&'static encoding_rs::Encoding> {
        self.default_encoding
            .as_deref()
            .and_then(encoding_rs::Encoding::for_label)
    }

    /// Resolves this configuration down to the tokenizer/tree-builder option
    /// structs the lower-level pipeline actually consumes.
    pub fn parse_opts(&self) -> ParseOpts {
        ParseOpts {
            tokenizer: TokenizerOpts {
                exact_errors: self.report_errors,
                pi_handling: if self.process_processing_instructions {
                    PiHandling::ProcessingInstruction
                } else {
                    PiHandling::BogusComment
                },
                names_elems: self.names_elems,
                names_attrs: self.names_attrs,
                ..TokenizerOpts::default()
            },
            tree_builder: self.tree_builder,
        }
    }
}

/// An HTML parser, ready to receive Unicode input through the
/// [`TendrilSink`] trait's `process()` method.
pub struct Parser<Sink>
where
    Sink: TreeSink,
{
    pub tokenizer: Tokenizer<TreeBuilder<Sink::Handle, Sink>>,
    pub input_buffer: BufferQueue,
}

impl<Sink: TreeSink> TendrilSink<fmt::UTF8> for Parser<Sink> {
    fn process(&mut self, t: StrTendril) {
        self.input_buffer.push_back(t);
        while let crate::tokenizer::TokenizerResult::Script(_) =
            self.tokenizer.feed(&self.input_buffer)
        {
            // A parser-blocking script was encountered; the non-resumable
            // `process()` entry point has nowhere to hand the handle off to,
            // so tokenization simply continues. Callers that need to pause
            // for scripts drive `self.tokenizer` directly instead.
        }
    }

    fn error(&mut self, desc: Cow<'static, str>) {
        self.tokenizer.sink.sink.parse_error(desc);
    }

    type Output = Sink::Output;

    fn finish(self) -> Self::Output {
        while !self.input_buffer.is_empty() {
            self.tokenizer.feed(&self.input_buffer);
        }
        self.tokenizer.end();
        self.tokenizer.sink.sink.finish()
    }
}

/// Parse an HTML document with the given tree sink.
pub fn parse_document<Sink>(sink: Sink, opts: ParseOpts) -> Parser<Sink>
where
    Sink: TreeSink,
{
    let tb = TreeBuilder::new(sink, opts.tree_builder);
    let tok = Tokenizer::new(tb, opts.tokenizer);
    Parser {
        tokenizer: tok,
        input_buffer: BufferQueue::default(),
    }
}

/// Parse an HTML fragment with the given tree sink, creating a context
/// element with `context_name`/`context_attrs` to parse it inside.
pub fn parse_fragment<Sink>(
    sink: Sink,
    opts: ParseOpts,
    context_name: QualName,
    context_attrs: Vec<Attribute>,
) -> Parser<Sink>
where
    Sink: TreeSink,
{
    let context_elem = sink.create_element(context_name, context_attrs, ElementFlags::new());
    parse_fragment_for_element(sink, opts, context_elem, None)
}

/// Parse an HTML fragment with a context element that has already been
/// created — e.g. by a caller implementing `Element.innerHTML`.
pub fn parse_fragment_for_element<Sink>(
    sink: Sink,
    opts: ParseOpts,
    context_elem: Sink::Handle,
    form_elem: Option<Sink::Handle>,
) -> Parser<Sink>
where
    Sink: TreeSink,
{
    let tb = TreeBuilder::new_for_fragment(sink, context_elem, form_elem, opts.tree_builder);
    let tok_opts = TokenizerOpts {
        initial_state: Some(tb.tokenizer_state_for_context_elem(opts.tree_builder.scripting_enabled)),
        ..opts.tokenizer
    };
    let tok = Tokenizer::new(tb, tok_opts);
    Parser {
        tokenizer: tok,
        input_buffer: BufferQueue::default(),
    }
}

/// Parse a complete HTML document from raw bytes, resolving its character
/// encoding the way a browser would: a byte-order mark wins outright,
/// otherwise `label_hint` (e.g. from a `Content-Type` header) is trusted,
/// otherwise decoding starts tentatively as `windows-1252` while the
/// tokenizer watches for a `<meta charset>` or
/// `<meta http-equiv="Content-Type">` declaration in `<head>`.
///
/// A `<meta>`-sniffed encoding is honored at most once: if it disagrees with
/// the tentative guess, the whole document is re-decoded and re-parsed from
/// the first byte under the new encoding, and `make_sink` is called again
/// for a fresh tree. A second disagreement (or one found after the
/// restart budget is spent) only raises the decoder's confidence; it can no
/// longer change the outcome. `make_sink` is a factory rather than a single
/// `Sink` value because that restart needs an empty tree to restart into.
pub fn parse_document_bytes<Sink, F>(
    make_sink: F,
    opts: ParseOpts,
    label_hint: Option<&str>,
    bytes: &[u8],
) -> Sink::Output
where
    Sink: TreeSink,
    F: Fn() -> Sink,
{
    let (mut decoder, _) = EncodingResolver::resolve(label_hint, bytes);

    loop {
        let input_stream = InputStream::new(decoder);
        input_stream.append_bytes(bytes);
        input_stream.finish_decoding_input();

        let parser = parse_document(make_sink(), opts.clone());
        loop {
            if let TokenizerResult::Done = parser.tokenizer.feed(input_stream.code_points()) {
                break;
            }
            // A parser-blocking script was encountered; this entry point has
            // nowhere to hand the handle off to, so tokenization continues.
        }

        if let Some(label) = parser.tokenizer.take_encoding_indicator() {
            if let Some(encoding) = encoding_rs::Encoding::for_label(label.as_bytes()) {
                if let Some(new_encoding) = input_stream.maybe_switch_encoding(encoding) {
                    decoder = Decoder::new(new_encoding, Confidence::Certain);
                    continue;
                }
            }
        }

        parser.tokenizer.end();
        return parser.tokenizer.sink.sink.finish();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_default_encoding_label_fails_validation() {
        let config = ParserConfig {
            default_encoding: Some("not-a-real-encoding".to_string()),
            ..ParserConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn recognized_default_encoding_label_passes_validation() {
        let config = ParserConfig {
            default_encoding: Some("utf-8".to_string()),
            ..ParserConfig::default()
        };
        assert!(config.validate().is_ok());
        assert_eq!(config.default_encoding(), Some(encoding_rs::UTF_8));
    }

    #[test]
    fn process_processing_instructions_flag_selects_pi_handling() {
        let config = ParserConfig {
            process_processing_instructions: true,
            ..ParserConfig::default()
        };
        assert_eq!(
            config.parse_opts().tokenizer.pi_handling,
            PiHandling::ProcessingInstruction
        );
    }

    #[test]
    fn names_elems_and_names_attrs_default_to_lower_and_thread_through() {
        let config = ParserConfig::default();
        let opts = config.parse_opts();
        assert_eq!(opts.tokenizer.names_elems, NameCasePolicy::Lower);
        assert_eq!(opts.tokenizer.names_attrs, NameCasePolicy::Lower);

        let upper = ParserConfig {
            names_elems: NameCasePolicy::Upper,
            names_attrs: NameCasePolicy::Preserve,
            ..ParserConfig::default()
        };
        let opts = upper.parse_opts();
        assert_eq!(opts.tokenizer.names_elems, NameCasePolicy::Upper);
        assert_eq!(opts.tokenizer.names_attrs, NameCasePolicy::Preserve);
    }
}
