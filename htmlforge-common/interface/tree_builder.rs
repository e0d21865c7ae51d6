// Copyright 2014-2017 The html5ever Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Types for the `TreeSink` trait, the interface through which the tag
//! balancer hands off tree-construction events to an external document.

use std::borrow::Cow;

use tendril::StrTendril;

use super::{Attribute, ExpandedName, QualName};

/// A document's quirks mode.
///
/// <https://dom.spec.whatwg.org/#concept-document-quirks>
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuirksMode {
    Quirks,
    LimitedQuirks,
    NoQuirks,
}

pub use self::QuirksMode::{LimitedQuirks, NoQuirks, Quirks};

/// Something which can be inserted into the DOM.
///
/// Adjacent sibling text nodes are merged into one by the tag balancer, which
/// is why insertion deals in `NodeOrText` rather than always handing the sink
/// a pre-built node.
pub enum NodeOrText<Handle> {
    AppendNode(Handle),
    AppendText(StrTendril),
}

pub use self::NodeOrText::{AppendNode, AppendText};

/// Flags accompanying a node insertion, passed to `create_element`.
#[derive(Copy, Clone, Debug, Default)]
pub struct ElementFlags {
    /// The element is being created to go inside a `<template>`'s template
    /// contents, not as a regular child.
    pub template: bool,
    /// The element is a MathML/SVG integration point or similar and should
    /// be parsed as a foreign-content attribute set.
    pub mathml_annotation_xml_integration_point: bool,
    /// The element was not present in the token stream; the tag balancer
    /// inserted it on the caller's behalf (e.g. an implied `<tbody>`, `<html>`
    /// or `<head>`). A sink that diffs against source markup needs this to
    /// avoid attributing synthesized structure to the author.
    pub synthesized: bool,
}

impl ElementFlags {
    pub fn new() -> Self {
        Default::default()
    }
}

/// Whether the tree builder should ask the sink to pause tokenization to run
/// a parser-blocking script, once control returns to the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextParserState {
    Continue,
    Suspend,
}

/// A callback invoked by `TreeSink::clone_subtree` (or similar) for every
/// original/clone handle pair produced while deep-cloning a node, e.g. when
/// adopting a `<template>` element's contents.
pub trait Tracer {
    type Handle;
    fn trace_handle(&self, node: &Self::Handle);
}

/// The external document a tag balancer drives.
///
/// All methods take `&self`; implementations are expected to use interior
/// mutability (`RefCell`, arenas, etc.) the way the rest of the crate does,
/// so that the tree builder never needs a unique borrow of the sink while
/// also holding borrows into its own stack of open elements.
pub trait TreeSink {
    /// Handle to a DOM node that the sink returns from the tree-construction
    /// methods below, and which the tree builder treats as an opaque token.
    type Handle: Clone;

    /// The overall result of parsing, returned from `finish`.
    type Output;

    /// Consume this sink and return the final parse result.
    fn finish(self) -> Self::Output;

    /// Signal a parse error.
    fn parse_error(&self, msg: Cow<'static, str>);

    /// Set the document's quirks mode.
    fn set_quirks_mode(&self, mode: QuirksMode);

    /// Get a handle to the `Document` node.
    fn get_document(&self) -> Self::Handle;

    /// Get a handle to the template contents of a `<template>` element.
    ///
    /// Panics if `target` is not a template element.
    fn get_template_contents(&self, target: &Self::Handle) -> Self::Handle;

    /// Do two handles refer to the same underlying DOM node?
    fn same_node(&self, x: &Self::Handle, y: &Self::Handle) -> bool;

    /// The name of the given element, for use by the tree builder's
    /// insertion-mode and foreign-content logic.
    ///
    /// Tied to `target`'s lifetime rather than `&self`'s, so a sink whose
    /// handles borrow directly from the node they point at (rather than
    /// owning a copy of the name) can implement this without cloning.
    fn elem_name<'a>(&self, target: &'a Self::Handle) -> ExpandedName<'a>;

    /// Create an element, with the given name, attributes and flags.
    fn create_element(
        &self,
        name: QualName,
        attrs: Vec<Attribute>,
        flags: ElementFlags,
    ) -> Self::Handle;

    /// Create a comment node.
    fn create_comment(&self, text: StrTendril) -> Self::Handle;

    /// Create a processing instruction.
    fn create_pi(&self, target: StrTendril, data: StrTendril) -> Self::Handle;

    /// Append a node or text as the last child of `parent`.
    ///
    /// Text nodes are merged with an existing trailing text child, if any.
    fn append(&self, parent: &Self::Handle, child: NodeOrText<Self::Handle>);

    /// Append a node or text immediately before `sibling`, which must have
    /// a parent.
    fn append_before_sibling(&self, sibling: &Self::Handle, new_node: NodeOrText<Self::Handle>);

    /// Append a node as if its parent were `element`, unless `element` has
    /// no parent in which case fall back to appending as if its parent were
    /// `prev_element` — used for fragment-parsing foster parenting.
    fn append_based_on_parent_node(
        &self,
        element: &Self::Handle,
        prev_element: &Self::Handle,
        new_node: NodeOrText<Self::Handle>,
    );

    /// Append a `DOCTYPE` to the document.
    fn append_doctype_to_document(
        &self,
        name: StrTendril,
        public_id: StrTendril,
        system_id: StrTendril,
    );

    /// Add the given attributes to `target`, skipping ones whose name is
    /// already present — used when a repeated `<html>`/`<body>` start tag
    /// carries attributes that should merge into the existing element.
    fn add_attrs_if_missing(&self, target: &Self::Handle, attrs: Vec<Attribute>);

    /// Detach `target` from its parent.
    fn remove_from_parent(&self, target: &Self::Handle);

    /// Move all of `node`'s children to the end of `new_parent`'s children.
    fn reparent_children(&self, node: &Self::Handle, new_parent: &Self::Handle);

    /// Mark a `<script>` element's "already started" flag.
    fn mark_script_already_started(&self, node: &Self::Handle);

    /// Deep-clone a subtree rooted at `node` (used by the adoption agency
    /// and by `<template>` cloning); returns the root of the clone.
    fn clone_subtree(&self, node: &Self::Handle) -> Self::Handle {
        let _ = node;
        unimplemented!("clone_subtree")
    }

    /// Associate a form-associatable element with its owner `<form>`.
    fn associate_with_form(
        &self,
        _target: &Self::Handle,
        _form: &Self::Handle,
        _nodes: (&Self::Handle, Option<&Self::Handle>),
    ) {
    }

    /// Whether the sink should be offered the chance to attach a declarative
    /// shadow root for the given `<template>` element and `shadowrootmode`
    /// attribute value.
    fn allow_declarative_shadow_roots(&self, _intended_parent: &Self::Handle) -> bool {
        false
    }

    /// Attach a declarative shadow root to `template` with the given mode,
    /// moving the template's contents into it. Returns `false` if the sink
    /// declines (in which case the tag balancer leaves the contents alone).
    fn attach_declarative_shadow(
        &self,
        _location: crate::interface::ExpandedName,
        _template: &Self::Handle,
        _shadow_host: &Self::Handle,
        _template_contents: &Self::Handle,
        _shadow_root_mode: &str,
        _shadow_root_delegates_focus: bool,
        _shadow_root_clonable: bool,
        _shadow_root_serializable: bool,
    ) -> bool {
        false
    }

    /// Whether the given node is a MathML `annotation-xml` integration point
    /// per the foreign content insertion-mode algorithm.
    fn is_mathml_annotation_xml_integration_point(&self, _handle: &Self::Handle) -> bool {
        false
    }

    /// Record the line the tokenizer was at when the current token started,
    /// for sinks that want source locations.
    fn set_current_line(&self, _line_number: u64) {}

    /// Pop the element stack notification, for sinks tracking depth.
    fn pop(&self, _node: &Self::Handle) {}
}
