// Copyright 2014-2017 The html5ever Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Predicates over [`ExpandedName`] used to bound scope searches in the
//! stack of open elements, and to decide which end tags are implied at a
//! given point.
//!
//! Most of these are one-liners over `htmlforge_common::catalog`'s static
//! element table; the scope sets have foreign-content exceptions the
//! catalog's plain category bits don't capture, so they're spelled out
//! directly against the WHATWG scope-boundary definitions instead.

use htmlforge_common::catalog::{self, Category};
use htmlforge_common::{local_name, ns};

use crate::ExpandedName;

/// Declare a tag-set predicate, either as a literal list of HTML-namespace
/// local names:
///
/// ```ignore
/// declare_tag_set!(foster_target = "table" "tbody" "tfoot" "thead" "tr");
/// ```
///
/// or as an existing set with some names excluded:
///
/// ```ignore
/// declare_tag_set!(listed = [form_associatable] - "img");
/// ```
macro_rules! declare_tag_set {
    ($name:ident = $($tag:tt)+) => {
        fn $name(name: $crate::ExpandedName) -> bool {
            name.ns() == &htmlforge_common::ns!(html)
                && ($(*name.local_name() == htmlforge_common::local_name!($tag))||+)
        }
    };

    ($name:ident = [$set:ident] - $($tag:tt)+) => {
        fn $name(name: $crate::ExpandedName) -> bool {
            $set(name)
                && !($(*name.local_name() == htmlforge_common::local_name!($tag))||+)
        }
    };
}

/// The default scope-boundary set per
/// <https://html.spec.whatwg.org/multipage/parsing.html#has-an-element-in-the-specific-scope>:
/// the elements that stop a plain "has an element in scope" search.
pub fn default_scope(name: ExpandedName) -> bool {
    if name.ns() == &ns!(html) {
        let local = name.local_name();
        return *local == local_name!("applet")
            || *local == local_name!("caption")
            || *local == local_name!("html")
            || *local == local_name!("table")
            || *local == local_name!("td")
            || *local == local_name!("th")
            || *local == local_name!("marquee")
            || *local == local_name!("object")
            || *local == local_name!("template");
    }

    if name.ns() == &ns!(mathml) {
        let local = name.local_name();
        return *local == local_name!("mi")
            || *local == local_name!("mo")
            || *local == local_name!("mn")
            || *local == local_name!("ms")
            || *local == local_name!("mtext")
            || *local == local_name!("annotation-xml");
    }

    if name.ns() == &ns!(svg) {
        let local = name.local_name();
        return *local == local_name!("foreignObject")
            || *local == local_name!("desc")
            || *local == local_name!("title");
    }

    false
}

/// `default_scope`, plus `<ol>`/`<ul>`, for "has an element in list item
/// scope" (used by `</li>` and implicit `<li>` closing).
pub fn list_item_scope(name: ExpandedName) -> bool {
    default_scope(name)
        || (name.ns() == &ns!(html)
            && (*name.local_name() == local_name!("ol") || *name.local_name() == local_name!("ul")))
}

/// `default_scope`, plus `<button>`, for "has an element in button scope".
pub fn button_scope(name: ExpandedName) -> bool {
    default_scope(name) || (name.ns() == &ns!(html) && *name.local_name() == local_name!("button"))
}

/// "has an element in table scope": only `<html>`, `<table>` and
/// `<template>` bound the search.
pub fn table_scope(name: ExpandedName) -> bool {
    name.ns() == &ns!(html)
        && (*name.local_name() == local_name!("html")
            || *name.local_name() == local_name!("table")
            || *name.local_name() == local_name!("template"))
}

/// "has an element in select scope": everything except `<optgroup>` and
/// `<option>` bounds the search, i.e. the search only continues through
/// those two.
pub fn select_scope(name: ExpandedName) -> bool {
    !(name.ns() == &ns!(html)
        && (*name.local_name() == local_name!("optgroup")
            || *name.local_name() == local_name!("option")))
}

/// Membership in the HTML5 "special" category, which bounds most implicit
/// end-tag generation and several misnesting recovery paths. HTML-namespace
/// membership comes from the element catalog; a handful of foreign
/// (SVG/MathML) elements are also special per the spec and are listed here
/// directly since the catalog only tracks HTML-namespace elements.
pub fn special_tag(name: ExpandedName) -> bool {
    if name.ns() == &ns!(html) {
        return catalog::is_in_category(&name.local_name()[..], Category::SPECIAL);
    }

    if name.ns() == &ns!(mathml) {
        let local = name.local_name();
        return *local == local_name!("mi")
            || *local == local_name!("mo")
            || *local == local_name!("mn")
            || *local == local_name!("ms")
            || *local == local_name!("mtext")
            || *local == local_name!("annotation-xml");
    }

    if name.ns() == &ns!(svg) {
        let local = name.local_name();
        return *local == local_name!("foreignObject")
            || *local == local_name!("desc")
            || *local == local_name!("title");
    }

    false
}

/// `<h1>` through `<h6>`.
pub fn heading_tag(name: ExpandedName) -> bool {
    name.ns() == &ns!(html) && catalog::is_in_category(&name.local_name()[..], Category::HEADING)
}

/// A MathML text integration point per
/// <https://html.spec.whatwg.org/multipage/parsing.html#mathml-text-integration-point>:
/// foreign content where HTML character data and start tags (other than
/// `<mglyph>`/`<malignmark>`) are parsed as HTML rather than as MathML.
pub fn mathml_text_integration_point(name: ExpandedName) -> bool {
    if name.ns() != &ns!(mathml) {
        return false;
    }
    let local = name.local_name();
    *local == local_name!("mi")
        || *local == local_name!("mo")
        || *local == local_name!("mn")
        || *local == local_name!("ms")
        || *local == local_name!("mtext")
}

/// An SVG HTML integration point per
/// <https://html.spec.whatwg.org/multipage/parsing.html#html-integration-point>.
pub fn svg_html_integration_point(name: ExpandedName) -> bool {
    name.ns() == &ns!(svg)
        && (*name.local_name() == local_name!("foreignObject")
            || *name.local_name() == local_name!("desc")
            || *name.local_name() == local_name!("title"))
}

/// `<tbody>`/`<thead>`/`<tfoot>`/`<template>`/`<html>`, the boundary for
/// "clear the stack back to a table body context" and its `<tr>` sibling.
pub fn table_body_context(name: ExpandedName) -> bool {
    if name.ns() != &ns!(html) {
        return false;
    }
    let local = name.local_name();
    *local == local_name!("tbody")
        || *local == local_name!("thead")
        || *local == local_name!("tfoot")
        || *local == local_name!("template")
        || *local == local_name!("html")
}

/// `<tr>`/`<template>`/`<html>`, the boundary for "clear the stack back to
/// a table row context".
pub fn table_row_context(name: ExpandedName) -> bool {
    if name.ns() != &ns!(html) {
        return false;
    }
    let local = name.local_name();
    *local == local_name!("tr") || *local == local_name!("template") || *local == local_name!("html")
}

/// `<td>`/`<th>`.
pub fn td_th(name: ExpandedName) -> bool {
    name.ns() == &ns!(html)
        && (*name.local_name() == local_name!("td") || *name.local_name() == local_name!("th"))
}

/// The tags "generate implied end tags" pops through on its own, before any
/// caller-specified exception (`<p>` is excepted at most call sites, via the
/// `implied` set built from this one).
pub fn cursory_implied_end(name: ExpandedName) -> bool {
    if name.ns() != &ns!(html) {
        return false;
    }
    let local = name.local_name();
    *local == local_name!("dd")
        || *local == local_name!("dt")
        || *local == local_name!("li")
        || *local == local_name!("optgroup")
        || *local == local_name!("option")
        || *local == local_name!("p")
        || *local == local_name!("rb")
        || *local == local_name!("rp")
        || *local == local_name!("rt")
        || *local == local_name!("rtc")
}

#[cfg(test)]
mod tests {
    use super::*;
    use htmlforge_common::expanded_name;

    #[test]
    fn table_scope_stops_at_table_but_not_div() {
        assert!(table_scope(expanded_name!(html "table")));
        assert!(!table_scope(expanded_name!(html "div")));
    }

    #[test]
    fn select_scope_only_continues_through_option_and_optgroup() {
        assert!(select_scope(expanded_name!(html "div")));
        assert!(!select_scope(expanded_name!(html "option")));
        assert!(!select_scope(expanded_name!(html "optgroup")));
    }

    #[test]
    fn button_scope_includes_default_scope_and_button() {
        assert!(button_scope(expanded_name!(html "button")));
        assert!(button_scope(expanded_name!(html "table")));
        assert!(!button_scope(expanded_name!(html "div")));
    }

    #[test]
    fn heading_tag_matches_h1_through_h6_only() {
        assert!(heading_tag(expanded_name!(html "h1")));
        assert!(heading_tag(expanded_name!(html "h6")));
        assert!(!heading_tag(expanded_name!(html "h7")));
    }

    #[test]
    fn special_tag_covers_foreign_integration_points() {
        assert!(special_tag(expanded_name!(svg "foreignObject")));
        assert!(special_tag(expanded_name!(mathml "mtext")));
        assert!(!special_tag(expanded_name!(svg "circle")));
    }
}
