// Copyright 2025 The html5ever Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A static catalog of HTML element metadata.
//!
//! The tag balancer needs to answer a handful of recurring questions about
//! an element name — is it "special" for the purposes of scope boundaries,
//! does it belong in `<head>`, is it a table-row or table-cell container,
//! is its content model raw text or RCDATA — and historically each of those
//! questions got its own scattered predicate function next to the insertion
//! mode that asked it. This module gives the answer a single home: a static
//! perfect-hash map from local name to a small record of bitflags, so a
//! predicate like "is this tag special" is a single table lookup rather than
//! a long `matches!` arm duplicated wherever the question comes up.

use bitflags::bitflags;

bitflags! {
    /// Structural categories an HTML element can belong to.
    ///
    /// An element can and often does belong to more than one category
    /// (e.g. `<table>` is both `SPECIAL` and `TABLE`).
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct Category: u16 {
        /// A block-level flow element.
        const BLOCK           = 1 << 0;
        /// An inline-level flow element.
        const INLINE          = 1 << 1;
        /// Only valid as a child of `<head>`.
        const HEAD_CONTENT    = 1 << 2;
        /// `<table>` itself or one of its structural children.
        const TABLE           = 1 << 3;
        /// `<tr>`.
        const ROW             = 1 << 4;
        /// `<td>`/`<th>`.
        const CELL            = 1 << 5;
        /// Only valid as a child of `<select>`.
        const SELECT_CONTENT  = 1 << 6;
        /// A member of the HTML "special" category: these elements bound
        /// most scope searches and force implied end tags to close.
        const SPECIAL         = 1 << 7;
        /// A void element, which can never have children and whose start
        /// tag's self-closing flag is implied.
        const EMPTY            = 1 << 8;
        /// Raw text content model (`<script>`, `<style>`): the tokenizer
        /// switches to a state where markup isn't recognized at all.
        const CDATA_CONTENT   = 1 << 9;
        /// RCDATA content model (`<textarea>`, `<title>`): character
        /// references are recognized but tags are not.
        const RCDATA_CONTENT  = 1 << 10;
        /// A heading element (`<h1>`..`<h6>`).
        const HEADING         = 1 << 11;
        /// Form-associatable per the forms spec.
        const FORM_ASSOCIATED = 1 << 12;
    }
}

/// The static information the catalog carries about one element.
#[derive(Clone, Copy, Debug)]
pub struct ElementInfo {
    pub name: &'static str,
    pub category: Category,
    /// The category its implicit/typical parent belongs to, used by the
    /// tree builder's foster-parenting and implied-tag logic. `Category::empty()`
    /// when the element has no single typical parent category.
    pub parent_category: Category,
    pub flags: ElementFlags,
}

/// Miscellaneous per-element booleans that don't fit naturally as a bitflag
/// shared across many elements.
#[derive(Clone, Copy, Debug, Default)]
pub struct ElementFlags {
    /// The tokenizer must switch content models when this tag opens
    /// (raw text or RCDATA); redundant with `Category::CDATA_CONTENT`/
    /// `Category::RCDATA_CONTENT` but kept as a plain bool for call sites
    /// that don't want to depend on the bitflag crate.
    pub switches_tokenizer_state: bool,
}

macro_rules! elem {
    ($name:expr, $category:expr) => {
        elem!($name, $category, Category::empty())
    };
    ($name:expr, $category:expr, $parent:expr) => {
        ElementInfo {
            name: $name,
            category: $category,
            parent_category: $parent,
            flags: ElementFlags {
                switches_tokenizer_state: $category
                    .intersects(Category::CDATA_CONTENT.union(Category::RCDATA_CONTENT)),
            },
        }
    };
}

/// Static catalog of the HTML elements this engine has an opinion about.
///
/// Elements not present here (custom elements, unknown tags, foreign
/// `svg`/`math` content) are treated as plain inline flow content with no
/// special category — matching the HTML parsing algorithm's default
/// handling of unrecognized tag names.
pub static ELEMENTS: phf::Map<&'static str, ElementInfo> = phf::phf_map! {
    "html" => elem!("html", Category::SPECIAL),
    "head" => elem!("head", Category::SPECIAL, Category::empty()),
    "body" => elem!("body", Category::SPECIAL),
    "title" => elem!("title", Category::HEAD_CONTENT.union(Category::RCDATA_CONTENT)),
    "base" => elem!("base", Category::HEAD_CONTENT.union(Category::EMPTY)),
    "link" => elem!("link", Category::HEAD_CONTENT.union(Category::EMPTY)),
    "meta" => elem!("meta", Category::HEAD_CONTENT.union(Category::EMPTY)),
    "style" => elem!("style", Category::HEAD_CONTENT.union(Category::CDATA_CONTENT)),
    "script" => elem!("script", Category::SPECIAL.union(Category::CDATA_CONTENT)),
    "noscript" => elem!("noscript", Category::SPECIAL),

    "address" => elem!("address", Category::SPECIAL.union(Category::BLOCK)),
    "article" => elem!("article", Category::SPECIAL.union(Category::BLOCK)),
    "aside" => elem!("aside", Category::SPECIAL.union(Category::BLOCK)),
    "blockquote" => elem!("blockquote", Category::SPECIAL.union(Category::BLOCK)),
    "details" => elem!("details", Category::SPECIAL.union(Category::BLOCK)),
    "dialog" => elem!("dialog", Category::SPECIAL.union(Category::BLOCK)),
    "div" => elem!("div", Category::SPECIAL.union(Category::BLOCK)),
    "dl" => elem!("dl", Category::SPECIAL.union(Category::BLOCK)),
    "dd" => elem!("dd", Category::SPECIAL.union(Category::BLOCK)),
    "dt" => elem!("dt", Category::SPECIAL.union(Category::BLOCK)),
    "fieldset" => elem!("fieldset", Category::SPECIAL.union(Category::BLOCK).union(Category::FORM_ASSOCIATED)),
    "figcaption" => elem!("figcaption", Category::SPECIAL.union(Category::BLOCK)),
    "figure" => elem!("figure", Category::SPECIAL.union(Category::BLOCK)),
    "footer" => elem!("footer", Category::SPECIAL.union(Category::BLOCK)),
    "form" => elem!("form", Category::SPECIAL.union(Category::BLOCK)),
    "header" => elem!("header", Category::SPECIAL.union(Category::BLOCK)),
    "hgroup" => elem!("hgroup", Category::SPECIAL.union(Category::BLOCK)),
    "h1" => elem!("h1", Category::SPECIAL.union(Category::BLOCK).union(Category::HEADING)),
    "h2" => elem!("h2", Category::SPECIAL.union(Category::BLOCK).union(Category::HEADING)),
    "h3" => elem!("h3", Category::SPECIAL.union(Category::BLOCK).union(Category::HEADING)),
    "h4" => elem!("h4", Category::SPECIAL.union(Category::BLOCK).union(Category::HEADING)),
    "h5" => elem!("h5", Category::SPECIAL.union(Category::BLOCK).union(Category::HEADING)),
    "h6" => elem!("h6", Category::SPECIAL.union(Category::BLOCK).union(Category::HEADING)),
    "hr" => elem!("hr", Category::SPECIAL.union(Category::BLOCK).union(Category::EMPTY)),
    "li" => elem!("li", Category::SPECIAL.union(Category::BLOCK)),
    "listing" => elem!("listing", Category::SPECIAL.union(Category::BLOCK)),
    "main" => elem!("main", Category::SPECIAL.union(Category::BLOCK)),
    "menu" => elem!("menu", Category::SPECIAL.union(Category::BLOCK)),
    "nav" => elem!("nav", Category::SPECIAL.union(Category::BLOCK)),
    "ol" => elem!("ol", Category::SPECIAL.union(Category::BLOCK)),
    "p" => elem!("p", Category::SPECIAL.union(Category::BLOCK)),
    "plaintext" => elem!("plaintext", Category::SPECIAL.union(Category::BLOCK)),
    "pre" => elem!("pre", Category::SPECIAL.union(Category::BLOCK)),
    "section" => elem!("section", Category::SPECIAL.union(Category::BLOCK)),
    "summary" => elem!("summary", Category::SPECIAL.union(Category::BLOCK)),
    "ul" => elem!("ul", Category::SPECIAL.union(Category::BLOCK)),
    "xmp" => elem!("xmp", Category::SPECIAL.union(Category::BLOCK).union(Category::CDATA_CONTENT)),

    "textarea" => elem!("textarea", Category::SPECIAL.union(Category::RCDATA_CONTENT).union(Category::FORM_ASSOCIATED)),
    "button" => elem!("button", Category::SPECIAL.union(Category::FORM_ASSOCIATED)),
    "input" => elem!("input", Category::SPECIAL.union(Category::EMPTY).union(Category::FORM_ASSOCIATED)),
    "select" => elem!("select", Category::SPECIAL.union(Category::FORM_ASSOCIATED)),
    "optgroup" => elem!("optgroup", Category::SELECT_CONTENT),
    "option" => elem!("option", Category::SELECT_CONTENT),
    "label" => elem!("label", Category::INLINE.union(Category::FORM_ASSOCIATED)),
    "output" => elem!("output", Category::INLINE.union(Category::FORM_ASSOCIATED)),
    "object" => elem!("object", Category::SPECIAL.union(Category::FORM_ASSOCIATED)),
    "img" => elem!("img", Category::INLINE.union(Category::EMPTY)),

    "applet" => elem!("applet", Category::SPECIAL),
    "marquee" => elem!("marquee", Category::SPECIAL),
    "embed" => elem!("embed", Category::SPECIAL.union(Category::EMPTY)),
    "iframe" => elem!("iframe", Category::SPECIAL),
    "keygen" => elem!("keygen", Category::SPECIAL.union(Category::EMPTY)),

    "area" => elem!("area", Category::SPECIAL.union(Category::EMPTY)),
    "br" => elem!("br", Category::INLINE.union(Category::EMPTY)),
    "wbr" => elem!("wbr", Category::INLINE.union(Category::EMPTY)),
    "col" => elem!("col", Category::TABLE.union(Category::EMPTY)),
    "colgroup" => elem!("colgroup", Category::SPECIAL.union(Category::TABLE)),
    "param" => elem!("param", Category::SPECIAL.union(Category::EMPTY)),
    "source" => elem!("source", Category::SPECIAL.union(Category::EMPTY)),
    "track" => elem!("track", Category::SPECIAL.union(Category::EMPTY)),
    "frame" => elem!("frame", Category::SPECIAL.union(Category::EMPTY)),
    "frameset" => elem!("frameset", Category::SPECIAL),
    "basefont" => elem!("basefont", Category::SPECIAL.union(Category::EMPTY)),
    "bgsound" => elem!("bgsound", Category::SPECIAL.union(Category::EMPTY)),
    "noembed" => elem!("noembed", Category::SPECIAL.union(Category::CDATA_CONTENT)),
    "noframes" => elem!("noframes", Category::SPECIAL.union(Category::CDATA_CONTENT)),

    "table" => elem!("table", Category::SPECIAL.union(Category::TABLE)),
    "caption" => elem!("caption", Category::SPECIAL.union(Category::TABLE), Category::TABLE),
    "tbody" => elem!("tbody", Category::SPECIAL.union(Category::TABLE), Category::TABLE),
    "thead" => elem!("thead", Category::SPECIAL.union(Category::TABLE), Category::TABLE),
    "tfoot" => elem!("tfoot", Category::SPECIAL.union(Category::TABLE), Category::TABLE),
    "tr" => elem!("tr", Category::SPECIAL.union(Category::ROW), Category::TABLE),
    "td" => elem!("td", Category::SPECIAL.union(Category::CELL), Category::ROW),
    "th" => elem!("th", Category::SPECIAL.union(Category::CELL), Category::ROW),
    "template" => elem!("template", Category::SPECIAL.union(Category::HEAD_CONTENT)),
};

/// Look up the catalog entry for an HTML-namespace local name.
#[inline]
pub fn lookup(local_name: &str) -> Option<&'static ElementInfo> {
    ELEMENTS.get(local_name)
}

/// Shorthand for `lookup(name).is_some_and(|info| info.category.contains(category))`.
#[inline]
pub fn is_in_category(local_name: &str, category: Category) -> bool {
    lookup(local_name).is_some_and(|info| info.category.contains(category))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_special_and_table() {
        let info = lookup("table").unwrap();
        assert!(info.category.contains(Category::SPECIAL));
        assert!(info.category.contains(Category::TABLE));
    }

    #[test]
    fn br_is_empty_and_not_special() {
        let info = lookup("br").unwrap();
        assert!(info.category.contains(Category::EMPTY));
        assert!(!info.category.contains(Category::SPECIAL));
    }

    #[test]
    fn script_switches_tokenizer_state() {
        let info = lookup("script").unwrap();
        assert!(info.flags.switches_tokenizer_state);
    }

    #[test]
    fn unknown_element_is_absent() {
        assert!(lookup("my-custom-element").is_none());
        assert!(!is_in_category("my-custom-element", Category::SPECIAL));
    }
}
