// Copyright 2014-2017 The html5ever Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::fmt::Debug;

/// If `c` is an ASCII letter (either case), return the corresponding
/// lowercase letter. Otherwise, return `None`.
pub fn lower_ascii_letter(c: char) -> Option<char> {
    match c {
        'A'..='Z' => Some((c as u8 - b'A' + b'a') as char),
        'a'..='z' => Some(c),
        _ => None,
    }
}

/// Format a `Debug` value as a single log-friendly line, with newlines and
/// other control characters escaped so a multi-line token (e.g. a run of
/// character data) doesn't split a debug/trace log entry across lines.
pub fn to_escaped_string<T: Debug>(x: &T) -> String {
    format!("{:?}", x)
        .chars()
        .flat_map(|c| match c {
            '\n' => "\\n".chars().collect::<Vec<_>>(),
            '\r' => "\\r".chars().collect::<Vec<_>>(),
            '\t' => "\\t".chars().collect::<Vec<_>>(),
            c => vec![c],
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_either_case_ascii_letter() {
        assert_eq!(lower_ascii_letter('A'), Some('a'));
        assert_eq!(lower_ascii_letter('z'), Some('z'));
        assert_eq!(lower_ascii_letter('1'), None);
        assert_eq!(lower_ascii_letter('\u{00c0}'), None);
    }

    #[test]
    fn escapes_embedded_newlines() {
        assert_eq!(to_escaped_string(&"a\nb"), "\"a\\nb\"");
    }
}
