// Copyright 2014 The html5ever Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The `<!DOCTYPE>` legacy-compat tables from
//! <https://html.spec.whatwg.org/multipage/parsing.html#the-initial-insertion-mode>.

use crate::interface::{LimitedQuirks, NoQuirks, Quirks, QuirksMode};
use crate::tendril::StrTendril;
use crate::tokenizer::Doctype;

// These are all lowercase, matched case-insensitively against the token.
static QUIRKY_PUBLIC_PREFIXES: &[&str] = &[
    "-//advasoft ltd//dtd html 3.0 aswedit + extensions//",
    "-//as//dtd html 3.0 aswedit + extensions//",
    "-//ietf//dtd html 2.0 level 1//",
    "-//ietf//dtd html 2.0 level 2//",
    "-//ietf//dtd html 2.0 strict level 1//",
    "-//ietf//dtd html 2.0 strict level 2//",
    "-//ietf//dtd html 2.0 strict//",
    "-//ietf//dtd html 2.0//",
    "-//ietf//dtd html 2.1e//",
    "-//ietf//dtd html 3.0//",
    "-//ietf//dtd html 3.2 final//",
    "-//ietf//dtd html 3.2//",
    "-//ietf//dtd html 3//",
    "-//ietf//dtd html level 0//",
    "-//ietf//dtd html level 1//",
    "-//ietf//dtd html level 2//",
    "-//ietf//dtd html level 3//",
    "-//ietf//dtd html strict level 0//",
    "-//ietf//dtd html strict level 1//",
    "-//ietf//dtd html strict level 2//",
    "-//ietf//dtd html strict level 3//",
    "-//ietf//dtd html strict//",
    "-//ietf//dtd html//",
    "-//metrius//dtd metrius presentational//",
    "-//microsoft//dtd internet explorer 2.0 html strict//",
    "-//microsoft//dtd internet explorer 2.0 html//",
    "-//microsoft//dtd internet explorer 2.0 tables//",
    "-//microsoft//dtd internet explorer 3.0 html strict//",
    "-//microsoft//dtd internet explorer 3.0 html//",
    "-//microsoft//dtd internet explorer 3.0 tables//",
    "-//netscape comm. corp.//dtd html//",
    "-//netscape comm. corp.//dtd strict html//",
    "-//o'reilly and associates//dtd html 2.0//",
    "-//o'reilly and associates//dtd html extended 1.0//",
    "-//o'reilly and associates//dtd html extended relaxed 1.0//",
    "-//softquad software//dtd hotmetal pro 6.0::19990601::extensions to html 4.0//",
    "-//softquad//dtd hotmetal pro 4.0::19971010::extensions to html 4.0//",
    "-//spyglass//dtd html 2.0 extended//",
    "-//sq//dtd html 2.0 hotmetal + extensions//",
    "-//sun microsystems corp.//dtd hotjava html//",
    "-//sun microsystems corp.//dtd hotjava strict html//",
    "-//w3c//dtd html 3 1995-03-24//",
    "-//w3c//dtd html 3.2 draft//",
    "-//w3c//dtd html 3.2 final//",
    "-//w3c//dtd html 3.2//",
    "-//w3c//dtd html 3.2s draft//",
    "-//w3c//dtd html 4.0 frameset//",
    "-//w3c//dtd html 4.0 transitional//",
    "-//w3c//dtd html experimental 19960712//",
    "-//w3c//dtd html experimental 970421//",
    "-//w3c//dtd w3 html//",
    "-//w3o//dtd w3 html 3.0//",
    "-//webtechs//dtd mozilla html 2.0//",
    "-//webtechs//dtd mozilla html//",
];

static QUIRKY_PUBLIC_MATCHES: &[&str] =
    &["-//w3o//dtd w3 html strict 3.0//en//", "-/w3c/dtd html 4.0 transitional/en", "html"];

static QUIRKY_SYSTEM_MATCHES: &[&str] =
    &["http://www.ibm.com/data/dtd/v11/ibmxhtml1-transitional.dtd"];

static LIMITED_QUIRKY_PUBLIC_PREFIXES: &[&str] =
    &["-//w3c//dtd xhtml 1.0 frameset//", "-//w3c//dtd xhtml 1.0 transitional//"];

static HTML4_PUBLIC_PREFIXES: &[&str] =
    &["-//w3c//dtd html 4.01 frameset//", "-//w3c//dtd html 4.01 transitional//"];

fn eq_ignore_case(opt: &Option<StrTendril>, s: &str) -> bool {
    match opt {
        Some(t) => t.eq_ignore_ascii_case(s),
        None => s.is_empty(),
    }
}

fn starts_with_any_ignore_case(opt: &Option<StrTendril>, prefixes: &[&str]) -> bool {
    let Some(t) = opt else { return false };
    let haystack = t.to_ascii_lowercase();
    prefixes.iter().any(|p| haystack.starts_with(p))
}

fn matches_any_ignore_case(opt: &Option<StrTendril>, candidates: &[&str]) -> bool {
    let Some(t) = opt else { return false };
    let haystack = t.to_ascii_lowercase();
    candidates.iter().any(|c| haystack == *c)
}

/// Is this `DOCTYPE` well formed per the "correct" productions in the HTML
/// grammar, and what quirks mode does it imply?
///
/// Returns `(malformed, quirks_mode)`; `malformed` drives the parse error,
/// independently of what quirks mode gets set.
pub fn doctype_error_and_quirks(doctype: &Doctype, iframe_srcdoc: bool) -> (bool, QuirksMode) {
    fn is_doctype_ok(doctype: &Doctype) -> bool {
        if !eq_ignore_case(&doctype.name, "html") {
            return false;
        }

        let has_system_id = doctype.system_id.is_some();

        match &doctype.public_id {
            None => !has_system_id || eq_ignore_case(&doctype.system_id, "about:legacy-compat"),
            Some(public) if public.eq_ignore_ascii_case("-//W3C//DTD HTML 4.0//EN") => {
                !has_system_id
                    || eq_ignore_case(&doctype.system_id, "http://www.w3.org/TR/REC-html40/strict.dtd")
            },
            Some(public) if public.eq_ignore_ascii_case("-//W3C//DTD HTML 4.01//EN") => {
                !has_system_id
                    || eq_ignore_case(&doctype.system_id, "http://www.w3.org/TR/html4/strict.dtd")
            },
            Some(public) if public.eq_ignore_ascii_case("-//W3C//DTD XHTML 1.0 Strict//EN") => {
                eq_ignore_case(
                    &doctype.system_id,
                    "http://www.w3.org/TR/xhtml1/DTD/xhtml1-strict.dtd",
                )
            },
            Some(public) if public.eq_ignore_ascii_case("-//W3C//DTD XHTML 1.1//EN") => {
                eq_ignore_case(&doctype.system_id, "http://www.w3.org/TR/xhtml11/DTD/xhtml11.dtd")
            },
            Some(_) => false,
        }
    }

    let err = !is_doctype_ok(doctype);

    let quirk = if doctype.force_quirks {
        Quirks
    } else if !eq_ignore_case(&doctype.name, "html") {
        Quirks
    } else if iframe_srcdoc {
        NoQuirks
    } else if matches_any_ignore_case(&doctype.public_id, QUIRKY_PUBLIC_MATCHES) {
        Quirks
    } else if matches_any_ignore_case(&doctype.system_id, QUIRKY_SYSTEM_MATCHES) {
        Quirks
    } else if starts_with_any_ignore_case(&doctype.public_id, QUIRKY_PUBLIC_PREFIXES) {
        Quirks
    } else if starts_with_any_ignore_case(&doctype.public_id, LIMITED_QUIRKY_PUBLIC_PREFIXES) {
        LimitedQuirks
    } else if starts_with_any_ignore_case(&doctype.public_id, HTML4_PUBLIC_PREFIXES) {
        if doctype.system_id.is_none() {
            Quirks
        } else {
            LimitedQuirks
        }
    } else {
        NoQuirks
    };

    (err, quirk)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doctype(name: Option<&str>, public: Option<&str>, system: Option<&str>) -> Doctype {
        Doctype {
            name: name.map(StrTendril::from),
            public_id: public.map(StrTendril::from),
            system_id: system.map(StrTendril::from),
            force_quirks: false,
        }
    }

    #[test]
    fn bare_html_doctype_is_standards_mode() {
        let dt = doctype(Some("html"), None, None);
        assert_eq!(doctype_error_and_quirks(&dt, false), (false, NoQuirks));
    }

    #[test]
    fn html4_transitional_without_system_id_is_quirks() {
        let dt = doctype(Some("html"), Some("-//W3C//DTD HTML 4.01 Transitional//EN"), None);
        let (_, quirk) = doctype_error_and_quirks(&dt, false);
        assert_eq!(quirk, Quirks);
    }

    #[test]
    fn html4_transitional_with_system_id_is_limited_quirks() {
        let dt = doctype(
            Some("html"),
            Some("-//W3C//DTD HTML 4.01 Transitional//EN"),
            Some("http://www.w3.org/TR/html4/loose.dtd"),
        );
        let (_, quirk) = doctype_error_and_quirks(&dt, false);
        assert_eq!(quirk, LimitedQuirks);
    }

    #[test]
    fn iframe_srcdoc_forces_no_quirks_regardless_of_public_id() {
        let dt = doctype(Some("html"), Some("html"), None);
        let (_, quirk) = doctype_error_and_quirks(&dt, true);
        assert_eq!(quirk, NoQuirks);
    }

    #[test]
    fn force_quirks_flag_wins_even_on_an_otherwise_clean_doctype() {
        let mut dt = doctype(Some("html"), None, None);
        dt.force_quirks = true;
        let (_, quirk) = doctype_error_and_quirks(&dt, false);
        assert_eq!(quirk, Quirks);
    }

    #[test]
    fn html4_strict_public_id_with_matching_system_id_is_well_formed() {
        let dt = doctype(
            Some("html"),
            Some("-//W3C//DTD HTML 4.01//EN"),
            Some("http://www.w3.org/TR/html4/strict.dtd"),
        );
        let (err, _) = doctype_error_and_quirks(&dt, false);
        assert!(!err);
    }
}
