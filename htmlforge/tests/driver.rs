// Copyright 2014-2017 The html5ever Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

mod util;

use htmlforge::interface::QuirksMode;
use htmlforge::serialize::{serialize, SerializeOpts};
use htmlforge::tendril::TendrilSink;
use htmlforge::tokenizer::PiHandling;
use htmlforge::tree_builder::TreeBuilderOpts;
use htmlforge::{driver, local_name, ns, ParseOpts, ParserConfig, QualName};

use util::rcdom::{NodeData, RcDom};

fn parse_str(input: &str) -> RcDom {
    driver::parse_document(RcDom::default(), ParseOpts::default()).one(input)
}

#[test]
fn parses_a_minimal_document_into_html_head_body() {
    let dom = parse_str("<title>hi</title><p>ok");

    let html = &dom.document.children.borrow()[0];
    let names: Vec<_> = html
        .children
        .borrow()
        .iter()
        .filter_map(|child| match child.data {
            NodeData::Element { ref name, .. } => Some(name.local.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(names, vec![local_name!("head"), local_name!("body")]);
}

#[test]
fn unclosed_formatting_elements_are_reopened_after_a_scope_break() {
    let dom = parse_str("<p><b>bold<i>both</p>after");

    // </p> closes the <p>, <b> and <i> all at once; "after" then reopens
    // the still-active <b>/<i> formatting entries around itself rather
    // than landing as a bare sibling of <p>.
    let mut out = Vec::new();
    let body = {
        let html = &dom.document.children.borrow()[0];
        html.children.borrow()[1].clone()
    };
    serialize(&mut out, &body, SerializeOpts::default()).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert_eq!(text, "<p><b>bold<i>both</i></b></p><b><i>after</i></b>");
}

#[test]
fn doctype_without_quirks_triggers_no_quirks_mode() {
    let dom = parse_str("<!doctype html><p>hi");
    assert_eq!(*dom.quirks_mode.borrow(), QuirksMode::NoQuirks);
}

#[test]
fn missing_doctype_triggers_quirks_mode() {
    let dom = parse_str("<p>hi");
    assert_eq!(*dom.quirks_mode.borrow(), QuirksMode::Quirks);
}

#[test]
fn fragment_parsing_builds_under_a_synthetic_context_element() {
    let dom = driver::parse_fragment(
        RcDom::default(),
        ParseOpts::default(),
        QualName::new(None, ns!(html), local_name!("body")),
        vec![],
    )
    .one("<p>one<p>two");

    // Fragment parsing still synthesizes an <html> root under the document;
    // with a "body" context element, content lands directly inside it.
    let root = &dom.document.children.borrow()[0];
    let names: Vec<_> = root
        .children
        .borrow()
        .iter()
        .filter_map(|child| match child.data {
            NodeData::Element { ref name, .. } => Some(name.local.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(names, vec![local_name!("p"), local_name!("p")]);
}

#[test]
fn processing_instruction_config_switches_tokenization() {
    let as_bogus_comment = ParserConfig::default();
    assert_eq!(as_bogus_comment.parse_opts().tokenizer.pi_handling, PiHandling::BogusComment);

    let as_pi = ParserConfig {
        process_processing_instructions: true,
        ..ParserConfig::default()
    };
    assert_eq!(as_pi.parse_opts().tokenizer.pi_handling, PiHandling::ProcessingInstruction);

    let dom = driver::parse_document(RcDom::default(), as_pi.parse_opts()).one("<?xml-stylesheet foo?><p>hi");
    let has_pi = dom
        .document
        .children
        .borrow()
        .iter()
        .any(|child| matches!(child.data, NodeData::ProcessingInstruction { .. }));
    assert!(has_pi, "expected a processing-instruction node in the document");
}

#[test]
fn scripting_disabled_tree_builder_option_is_honored() {
    let opts = ParseOpts {
        tree_builder: TreeBuilderOpts {
            scripting_enabled: false,
            ..TreeBuilderOpts::default()
        },
        ..ParseOpts::default()
    };
    let dom = driver::parse_document(RcDom::default(), opts).one("<noscript><p>shown</noscript>");

    let html = &dom.document.children.borrow()[0];
    let body = html.children.borrow()[1].clone();
    let mut out = Vec::new();
    serialize(&mut out, &body, SerializeOpts::default()).unwrap();
    let text = String::from_utf8(out).unwrap();
    // With scripting disabled, <noscript> contents parse as markup, not text.
    assert!(text.contains("<p>shown</p>"));
}

fn text_of(dom: &RcDom) -> String {
    let html = &dom.document.children.borrow()[0];
    let body = html.children.borrow()[1].clone();
    let mut out = Vec::new();
    serialize(&mut out, &body, SerializeOpts::default()).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn byte_order_mark_selects_encoding_without_needing_a_meta_tag() {
    let mut bytes = vec![0xEF, 0xBB, 0xBF];
    bytes.extend_from_slice("<p>hi".as_bytes());
    let dom = driver::parse_document_bytes(RcDom::default, ParseOpts::default(), None, &bytes);
    assert!(text_of(&dom).contains("<p>hi</p>"));
}

#[test]
fn meta_charset_declaration_switches_the_decoder_mid_parse() {
    // windows-1252 encodes 0xE9 as U+00E9 (é); the tentative windows-1252
    // fallback would otherwise decode this correctly by coincidence, so use
    // shift_jis, whose high bytes decode very differently under windows-1252.
    let mut html = String::from("<head><meta charset=\"shift_jis\"></head><body><p>");
    html.push('\u{5973}'); // 女
    html.push_str("</p>");
    let (encoded, _, had_errors) = encoding_rs::SHIFT_JIS.encode(&html);
    assert!(!had_errors);

    let dom = driver::parse_document_bytes(RcDom::default, ParseOpts::default(), None, &encoded);
    assert!(
        text_of(&dom).contains('\u{5973}'),
        "expected the shift_jis-encoded character to round-trip once the meta tag was honored"
    );
}

#[test]
fn meta_http_equiv_content_type_also_switches_the_decoder() {
    let mut html = String::from(
        "<head><meta http-equiv=\"Content-Type\" content=\"text/html; charset=shift_jis\"></head><body><p>",
    );
    html.push('\u{5973}');
    html.push_str("</p>");
    let (encoded, _, had_errors) = encoding_rs::SHIFT_JIS.encode(&html);
    assert!(!had_errors);

    let dom = driver::parse_document_bytes(RcDom::default, ParseOpts::default(), None, &encoded);
    assert!(text_of(&dom).contains('\u{5973}'));
}

#[test]
fn caller_supplied_label_hint_is_honored_without_meta_sniffing() {
    let (encoded, _, had_errors) = encoding_rs::SHIFT_JIS.encode("<p>\u{5973}");
    assert!(!had_errors);

    let dom = driver::parse_document_bytes(
        RcDom::default,
        ParseOpts::default(),
        Some("shift_jis"),
        &encoded,
    );
    assert!(text_of(&dom).contains('\u{5973}'));
}
