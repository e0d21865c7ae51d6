// Copyright 2014-2017 The html5ever Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Writing a tree built from this crate's event stream back out as HTML
//! text. A `TreeSink` implementation that wants to round-trip hands its root
//! handle to [`serialize`]; everything else is driven through the
//! [`Serialize`]/[`Serializer`] traits so this module never has to know the
//! sink's node representation.

use std::io::{self, Write};

use htmlforge_common::ns;
pub use htmlforge_common::serialize::{AttrRef, Serialize, Serializer, TraversalScope};
use htmlforge_common::{local_name, LocalName, QualName};

use self::TraversalScope::{ChildrenOnly, IncludeNode};

/// Knobs controlling how [`serialize`] writes a tree out.
#[derive(Clone)]
pub struct SerializeOpts {
    /// Is scripting enabled? Controls whether the contents of a `<noscript>`
    /// are escaped as text (scripting enabled, the browser would never
    /// render them) or passed through raw (scripting disabled).
    pub scripting_enabled: bool,
    /// Serialize the root handle itself, or only its children.
    pub traversal_scope: TraversalScope,
    /// Add a newline after the start tag of `<html>`, mirroring the leading
    /// newline HTML suppresses after `<pre>`/`<textarea>`/`<listing>`.
    pub create_missing_parent: bool,
}

impl Default for SerializeOpts {
    fn default() -> SerializeOpts {
        SerializeOpts {
            scripting_enabled: true,
            traversal_scope: IncludeNode,
            create_missing_parent: false,
        }
    }
}

/// Serialize `node` (and, per `opts.traversal_scope`, its descendants) to
/// `writer` as HTML text.
pub fn serialize<Wr, T>(writer: Wr, node: &T, opts: SerializeOpts) -> io::Result<()>
where
    Wr: Write,
    T: Serialize,
{
    let mut ser = HtmlSerializer::new(writer, opts.clone());
    node.serialize(&mut ser, opts.traversal_scope)
}

struct ElemInfo {
    html_name: Option<LocalName>,
    ignore_children: bool,
    processed_first_child: bool,
}

/// Does this HTML element never have a closing tag or children?
/// <https://html.spec.whatwg.org/multipage/syntax.html#void-elements>
fn is_void_element(name: &LocalName) -> bool {
    *name == local_name!("area")
        || *name == local_name!("base")
        || *name == local_name!("basefont")
        || *name == local_name!("bgsound")
        || *name == local_name!("br")
        || *name == local_name!("col")
        || *name == local_name!("embed")
        || *name == local_name!("frame")
        || *name == local_name!("hr")
        || *name == local_name!("img")
        || *name == local_name!("input")
        || *name == local_name!("keygen")
        || *name == local_name!("link")
        || *name == local_name!("meta")
        || *name == local_name!("param")
        || *name == local_name!("source")
        || *name == local_name!("track")
        || *name == local_name!("wbr")
}

struct HtmlSerializer<Wr: Write> {
    writer: Wr,
    opts: SerializeOpts,
    stack: Vec<ElemInfo>,
}

impl<Wr: Write> HtmlSerializer<Wr> {
    fn new(writer: Wr, opts: SerializeOpts) -> Self {
        let html_name = if opts.create_missing_parent {
            Some(local_name!("html"))
        } else {
            None
        };
        HtmlSerializer {
            writer,
            opts,
            stack: vec![ElemInfo {
                html_name,
                ignore_children: false,
                processed_first_child: false,
            }],
        }
    }

    fn parent(&mut self) -> &mut ElemInfo {
        self.stack.last_mut().expect("no parent ElemInfo")
    }

    fn write_escaped(&mut self, text: &str, attr_mode: bool) -> io::Result<()> {
        for c in text.chars() {
            match c {
                '&' => self.writer.write_all(b"&amp;"),
                '\u{A0}' => self.writer.write_all(b"&nbsp;"),
                '"' if attr_mode => self.writer.write_all(b"&quot;"),
                '<' if !attr_mode => self.writer.write_all(b"&lt;"),
                '>' if !attr_mode => self.writer.write_all(b"&gt;"),
                c => write!(self.writer, "{c}"),
            }?;
        }
        Ok(())
    }
}

impl<Wr: Write> Serializer for HtmlSerializer<Wr> {
    fn start_elem<'a, AttrIter>(&mut self, name: QualName, attrs: AttrIter) -> io::Result<()>
    where
        AttrIter: Iterator<Item = AttrRef<'a>>,
    {
        let html_name = match name.ns {
            ns!(html) => Some(name.local.clone()),
            _ => None,
        };

        if self.parent().ignore_children {
            self.stack.push(ElemInfo {
                html_name,
                ignore_children: true,
                processed_first_child: false,
            });
            return Ok(());
        }

        self.writer.write_all(b"<")?;
        self.writer.write_all(name.local.as_bytes())?;
        for (name, value) in attrs {
            self.writer.write_all(b" ")?;
            self.writer.write_all(name.local.as_bytes())?;
            self.writer.write_all(b"=\"")?;
            self.write_escaped(value, true)?;
            self.writer.write_all(b"\"")?;
        }
        self.writer.write_all(b">")?;

        let ignore_children =
            name.ns == ns!(html) && html_name.as_ref().is_some_and(is_void_element);

        self.parent().processed_first_child = true;

        self.stack.push(ElemInfo {
            html_name,
            ignore_children,
            processed_first_child: false,
        });

        Ok(())
    }

    fn end_elem(&mut self, name: QualName) -> io::Result<()> {
        let info = self.stack.pop().expect("no ElemInfo");
        if info.ignore_children {
            return Ok(());
        }

        self.writer.write_all(b"</")?;
        self.writer.write_all(name.local.as_bytes())?;
        self.writer.write_all(b">")
    }

    fn write_text(&mut self, text: &str) -> io::Result<()> {
        let prepend_lf = text.starts_with('\n') && {
            let parent = self.parent();
            !parent.processed_first_child
                && matches!(
                    parent.html_name,
                    Some(ref n) if *n == local_name!("pre")
                        || *n == local_name!("textarea")
                        || *n == local_name!("listing")
                )
        };

        if prepend_lf {
            self.writer.write_all(b"\n")?;
        }

        let escape = match self.parent().html_name {
            Some(ref n)
                if *n == local_name!("style")
                    || *n == local_name!("script")
                    || *n == local_name!("xmp")
                    || *n == local_name!("iframe")
                    || *n == local_name!("noembed")
                    || *n == local_name!("noframes")
                    || *n == local_name!("plaintext") =>
            {
                false
            },
            Some(ref n) if *n == local_name!("noscript") => !self.opts.scripting_enabled,
            _ => true,
        };

        if escape {
            self.write_escaped(text, false)
        } else {
            self.writer.write_all(text.as_bytes())
        }
    }

    fn write_comment(&mut self, text: &str) -> io::Result<()> {
        self.writer.write_all(b"<!--")?;
        self.writer.write_all(text.as_bytes())?;
        self.writer.write_all(b"-->")
    }

    fn write_doctype(&mut self, name: &str) -> io::Result<()> {
        self.writer.write_all(b"<!DOCTYPE ")?;
        self.writer.write_all(name.as_bytes())?;
        self.writer.write_all(b">")
    }

    fn write_processing_instruction(&mut self, target: &str, data: &str) -> io::Result<()> {
        self.writer.write_all(b"<?")?;
        self.writer.write_all(target.as_bytes())?;
        self.writer.write_all(b" ")?;
        self.writer.write_all(data.as_bytes())?;
        self.writer.write_all(b">")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use htmlforge_common::Attribute;

    struct Leaf(&'static str);

    impl Serialize for Leaf {
        fn serialize<S: Serializer>(
            &self,
            serializer: &mut S,
            _traversal_scope: TraversalScope,
        ) -> io::Result<()> {
            serializer.write_text(self.0)
        }
    }

    #[test]
    fn escapes_reserved_characters_in_text() {
        let mut out = Vec::new();
        serialize(&mut out, &Leaf("<a> & \"b\""), SerializeOpts::default()).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "&lt;a&gt; &amp; \"b\"");
    }

    struct Elem {
        name: QualName,
        attrs: Vec<Attribute>,
        children: Vec<Box<dyn Serialize>>,
    }

    impl Serialize for Elem {
        fn serialize<S: Serializer>(
            &self,
            serializer: &mut S,
            traversal_scope: TraversalScope,
        ) -> io::Result<()> {
            if traversal_scope == IncludeNode {
                serializer.start_elem(
                    self.name.clone(),
                    self.attrs.iter().map(|a| (&a.name, &a.value[..])),
                )?;
            }
            for child in &self.children {
                child.serialize(serializer, IncludeNode)?;
            }
            if traversal_scope == IncludeNode {
                serializer.end_elem(self.name.clone())?;
            }
            Ok(())
        }
    }

    #[test]
    fn void_element_has_no_closing_tag() {
        let br = Elem {
            name: QualName::new(None, ns!(html), local_name!("br")),
            attrs: vec![],
            children: vec![],
        };
        let mut out = Vec::new();
        serialize(&mut out, &br, SerializeOpts::default()).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "<br>");
    }

    #[test]
    fn children_only_scope_skips_the_root_tags() {
        let div = Elem {
            name: QualName::new(None, ns!(html), local_name!("div")),
            attrs: vec![],
            children: vec![Box::new(Leaf("hi"))],
        };
        let mut out = Vec::new();
        let opts = SerializeOpts {
            traversal_scope: ChildrenOnly,
            ..SerializeOpts::default()
        };
        serialize(&mut out, &div, opts).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "hi");
    }
}
