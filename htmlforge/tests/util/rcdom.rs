// Copyright 2014-2017 The html5ever Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A minimal reference-counted DOM used only to exercise `driver::parse_document`
//! and `driver::parse_fragment` in integration tests. Not suitable for anything
//! that needs to survive contact with real-world markup.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashSet;
use std::io;
use std::mem;
use std::rc::{Rc, Weak};

use htmlforge::interface::{
    AppendNode, AppendText, Attribute, ElementFlags, ExpandedName, NodeOrText, QuirksMode,
    TreeSink,
};
use htmlforge::serialize::{Serialize, Serializer, TraversalScope};
use htmlforge::serialize::TraversalScope::IncludeNode;
use htmlforge::tendril::StrTendril;
use htmlforge::{local_name, ns, QualName};

/// The different kinds of elements this DOM distinguishes (beyond a plain
/// tag name), mirroring the cases `TreeSink` needs special-cased handles for.
#[derive(Debug)]
pub enum ElementKind {
    Normal,
    /// A `<script>` element and its "already started" flag.
    Script(RefCell<bool>),
    /// A `<template>` element and its template contents document fragment.
    Template(Handle),
    /// A MathML `annotation-xml` element, and whether its `encoding`
    /// attribute names an HTML content type.
    AnnotationXml(bool),
}

#[derive(Debug)]
pub enum NodeData {
    Document,
    Doctype {
        name: StrTendril,
        public_id: StrTendril,
        system_id: StrTendril,
    },
    Text {
        contents: RefCell<StrTendril>,
    },
    Comment {
        contents: StrTendril,
    },
    ProcessingInstruction {
        target: StrTendril,
        contents: StrTendril,
    },
    Element {
        name: QualName,
        attrs: RefCell<Vec<Attribute>>,
        kind: ElementKind,
    },
}

pub struct Node {
    pub data: NodeData,
    pub parent: RefCell<Option<WeakHandle>>,
    pub children: RefCell<Vec<Handle>>,
}

impl Node {
    fn new(data: NodeData) -> Rc<Node> {
        Rc::new(Node {
            data,
            parent: RefCell::new(None),
            children: RefCell::new(Vec::new()),
        })
    }
}

pub type Handle = Rc<Node>;
pub type WeakHandle = Weak<Node>;

fn append(new_parent: &Handle, child: Handle) {
    new_parent.children.borrow_mut().push(child.clone());
    let mut parent = child.parent.borrow_mut();
    assert!(parent.is_none());
    *parent = Some(Rc::downgrade(new_parent));
}

fn get_parent_and_index(target: &Handle) -> Option<(Handle, usize)> {
    let weak = target.parent.borrow().clone()?;
    let parent = weak.upgrade().expect("dangling parent pointer");
    let i = parent
        .children
        .borrow()
        .iter()
        .position(|child| Rc::ptr_eq(child, target))
        .expect("have parent but couldn't find self in parent's children");
    Some((parent, i))
}

fn append_to_existing_text(prev: &Handle, text: &str) -> bool {
    match prev.data {
        NodeData::Text { ref contents } => {
            contents.borrow_mut().push_slice(text);
            true
        },
        _ => false,
    }
}

fn detach(target: &Handle) {
    if let Some((parent, i)) = get_parent_and_index(target) {
        parent.children.borrow_mut().remove(i);
    }
    *target.parent.borrow_mut() = None;
}

/// The parsed document. Implements [`TreeSink`] directly; hand one to
/// `driver::parse_document`/`driver::parse_fragment`.
pub struct RcDom {
    pub document: Handle,
    pub errors: RefCell<Vec<String>>,
    pub quirks_mode: RefCell<QuirksMode>,
}

impl Default for RcDom {
    fn default() -> RcDom {
        RcDom {
            document: Node::new(NodeData::Document),
            errors: RefCell::new(Vec::new()),
            quirks_mode: RefCell::new(QuirksMode::NoQuirks),
        }
    }
}

impl TreeSink for RcDom {
    type Handle = Handle;
    type Output = Self;

    fn finish(self) -> Self {
        self
    }

    fn parse_error(&self, msg: std::borrow::Cow<'static, str>) {
        self.errors.borrow_mut().push(msg.into_owned());
    }

    fn get_document(&self) -> Handle {
        self.document.clone()
    }

    fn get_template_contents(&self, target: &Handle) -> Handle {
        match target.data {
            NodeData::Element {
                kind: ElementKind::Template(ref contents),
                ..
            } => contents.clone(),
            _ => panic!("get_template_contents called on non-template element"),
        }
    }

    fn set_quirks_mode(&self, mode: QuirksMode) {
        *self.quirks_mode.borrow_mut() = mode;
    }

    fn same_node(&self, x: &Handle, y: &Handle) -> bool {
        Rc::ptr_eq(x, y)
    }

    fn elem_name<'a>(&self, target: &'a Handle) -> ExpandedName<'a> {
        match target.data {
            NodeData::Element { ref name, .. } => name.expanded(),
            _ => panic!("elem_name called on a non-element node"),
        }
    }

    fn create_element(&self, name: QualName, attrs: Vec<Attribute>, flags: ElementFlags) -> Handle {
        let kind = if flags.template {
            ElementKind::Template(Node::new(NodeData::Document))
        } else if name.ns == ns!(html) && name.local == local_name!("script") {
            ElementKind::Script(RefCell::new(false))
        } else if flags.mathml_annotation_xml_integration_point {
            let is_html_encoding = attrs.iter().any(|attr| {
                attr.name.local == local_name!("encoding")
                    && (attr.value.eq_ignore_ascii_case("text/html")
                        || attr.value.eq_ignore_ascii_case("application/xhtml+xml"))
            });
            ElementKind::AnnotationXml(is_html_encoding)
        } else {
            ElementKind::Normal
        };

        Node::new(NodeData::Element {
            name,
            attrs: RefCell::new(attrs),
            kind,
        })
    }

    fn create_comment(&self, text: StrTendril) -> Handle {
        Node::new(NodeData::Comment { contents: text })
    }

    fn create_pi(&self, target: StrTendril, data: StrTendril) -> Handle {
        Node::new(NodeData::ProcessingInstruction {
            target,
            contents: data,
        })
    }

    fn append(&self, parent: &Handle, child: NodeOrText<Handle>) {
        if let AppendText(ref text) = child {
            if let Some(last) = parent.children.borrow().last() {
                if append_to_existing_text(last, text) {
                    return;
                }
            }
        }

        append(
            parent,
            match child {
                AppendText(text) => Node::new(NodeData::Text {
                    contents: RefCell::new(text),
                }),
                AppendNode(node) => node,
            },
        );
    }

    fn append_before_sibling(&self, sibling: &Handle, new_node: NodeOrText<Handle>) {
        let (parent, i) = get_parent_and_index(sibling)
            .expect("append_before_sibling called on a node with no parent");

        let new_node = match (new_node, i) {
            (AppendText(text), 0) => Node::new(NodeData::Text {
                contents: RefCell::new(text),
            }),
            (AppendText(text), i) => {
                let prev = parent.children.borrow()[i - 1].clone();
                if append_to_existing_text(&prev, &text) {
                    return;
                }
                Node::new(NodeData::Text {
                    contents: RefCell::new(text),
                })
            },
            (AppendNode(node), _) => node,
        };

        if new_node.parent.borrow().is_some() {
            detach(&new_node);
        }
        *new_node.parent.borrow_mut() = Some(Rc::downgrade(&parent));
        parent.children.borrow_mut().insert(i, new_node);
    }

    fn append_based_on_parent_node(
        &self,
        element: &Handle,
        prev_element: &Handle,
        new_node: NodeOrText<Handle>,
    ) {
        if element.parent.borrow().is_some() {
            self.append_before_sibling(element, new_node);
        } else {
            self.append(prev_element, new_node);
        }
    }

    fn append_doctype_to_document(
        &self,
        name: StrTendril,
        public_id: StrTendril,
        system_id: StrTendril,
    ) {
        append(
            &self.document,
            Node::new(NodeData::Doctype {
                name,
                public_id,
                system_id,
            }),
        );
    }

    fn add_attrs_if_missing(&self, target: &Handle, attrs: Vec<Attribute>) {
        let existing = match target.data {
            NodeData::Element { ref attrs, .. } => attrs,
            _ => panic!("add_attrs_if_missing called on a non-element node"),
        };
        let mut existing = existing.borrow_mut();
        let existing_names: HashSet<_> = existing.iter().map(|a| a.name.clone()).collect();
        existing.extend(
            attrs
                .into_iter()
                .filter(|attr| !existing_names.contains(&attr.name)),
        );
    }

    fn remove_from_parent(&self, target: &Handle) {
        detach(target);
    }

    fn reparent_children(&self, node: &Handle, new_parent: &Handle) {
        let mut children = node.children.borrow_mut();
        for child in children.iter() {
            *child.parent.borrow_mut() = Some(Rc::downgrade(new_parent));
        }
        new_parent
            .children
            .borrow_mut()
            .extend(mem::take(&mut *children));
    }

    fn mark_script_already_started(&self, node: &Handle) {
        match node.data {
            NodeData::Element {
                kind: ElementKind::Script(ref started),
                ..
            } => *started.borrow_mut() = true,
            _ => panic!("mark_script_already_started called on a non-script element"),
        }
    }

    fn is_mathml_annotation_xml_integration_point(&self, target: &Handle) -> bool {
        match target.data {
            NodeData::Element {
                kind: ElementKind::AnnotationXml(is_html),
                ..
            } => is_html,
            _ => false,
        }
    }
}

impl Serialize for Handle {
    fn serialize<S: Serializer>(
        &self,
        serializer: &mut S,
        traversal_scope: TraversalScope,
    ) -> io::Result<()> {
        match self.data {
            NodeData::Element { ref name, ref attrs, .. } => {
                if traversal_scope == IncludeNode {
                    let attrs = attrs.borrow();
                    serializer.start_elem(
                        name.clone(),
                        attrs.iter().map(|at| (&at.name, &at.value[..])),
                    )?;
                }
                for child in self.children.borrow().iter() {
                    child.serialize(serializer, IncludeNode)?;
                }
                if traversal_scope == IncludeNode {
                    serializer.end_elem(name.clone())?;
                }
                Ok(())
            },

            NodeData::Document => {
                for child in self.children.borrow().iter() {
                    child.serialize(serializer, IncludeNode)?;
                }
                Ok(())
            },

            NodeData::Doctype { ref name, .. } if traversal_scope == IncludeNode => {
                serializer.write_doctype(name)
            },
            NodeData::Text { ref contents } if traversal_scope == IncludeNode => {
                serializer.write_text(&contents.borrow())
            },
            NodeData::Comment { ref contents } if traversal_scope == IncludeNode => {
                serializer.write_comment(contents)
            },
            NodeData::ProcessingInstruction {
                ref target,
                ref contents,
            } if traversal_scope == IncludeNode => {
                serializer.write_processing_instruction(target, contents)
            },

            _ => Ok(()),
        }
    }
}
