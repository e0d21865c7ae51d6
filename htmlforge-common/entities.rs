// Copyright 2014-2017 The html5ever Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Named character reference lookup.
//!
//! # Examples
//!
//! ```
//! use htmlforge_common::entities::NAMED_ENTITIES;
//!
//! assert_eq!(NAMED_ENTITIES.get("gt;"), Some(&(62, 0)));
//! ```

include!(concat!(env!("OUT_DIR"), "/named_entities.rs"));

/// Look up a named character reference by its name, without the leading `&`
/// but including a trailing `;` if the reference was written with one.
///
/// Returns `None` if `name` is not a registered reference name and also not
/// a proper prefix of one (the tokenizer uses that distinction to decide
/// whether to keep consuming characters or give up).
#[inline]
pub fn get(name: &str) -> Option<&'static (u32, u32)> {
    NAMED_ENTITIES.get(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amp_and_its_legacy_form_both_resolve() {
        assert_eq!(get("amp;"), Some(&(38, 0)));
        assert_eq!(get("amp"), Some(&(38, 0)));
    }

    #[test]
    fn two_codepoint_reference_resolves() {
        assert_eq!(get("NotEqualTilde;"), Some(&(8770, 824)));
    }

    #[test]
    fn unknown_name_is_none() {
        assert_eq!(get("this-is-not-a-real-entity;"), None);
    }

    #[test]
    fn proper_prefix_of_a_legacy_reference_is_a_recorded_miss() {
        // "he" is a prefix of "hearts;" but not itself a reference; the
        // generated table still carries it, mapped to the null sentinel, so
        // the tokenizer can tell "keep scanning" from "definitely not a
        // reference" without a second data structure.
        assert_eq!(get("he"), Some(&(0, 0)));
    }
}
