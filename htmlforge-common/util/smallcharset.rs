// Copyright 2014-2017 The html5ever Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! `SmallCharSet` represents a set of characters, subject to the following
//! restrictions:
//!
//! * Every character has Unicode scalar value less than 64.
//! * `'\0'` is always worth including, since replacement-character handling
//!   checks for it on every input byte anyway.

/// A set of up to 64 ASCII characters, stored as a bitmask.
///
/// Used by [`crate::buffer_queue::BufferQueue::pop_except_from`] to split a
/// buffer at the next occurrence of one of a handful of significant bytes
/// (`&`, `<`, NUL, ...) without scanning character-by-character in the
/// common case where none of them are present.
#[derive(Copy, Clone)]
pub struct SmallCharSet {
    pub bits: u64,
}

impl SmallCharSet {
    #[inline]
    fn contains(&self, n: u8) -> bool {
        0 != (self.bits & (1 << (n as usize)))
    }

    /// Count the number of bytes at the beginning of `buf` which are not in the set.
    pub fn nonmember_prefix_len(&self, buf: &str) -> u32 {
        let mut n = 0;
        for b in buf.bytes() {
            if b >= 64 || !self.contains(b) {
                n += 1;
            } else {
                break;
            }
        }
        n
    }
}

#[cfg(test)]
mod test {
    use super::SmallCharSet;

    #[test]
    fn nonmember_prefix() {
        let set = small_char_set!('&' 0);
        for &c in &['&', '\0'] {
            for x in 0..16u32 {
                for y in 0..16u32 {
                    let mut s = "x".repeat(x as usize);
                    s.push(c);
                    s.push_str(&"x".repeat(y as usize));
                    assert_eq!(x, set.nonmember_prefix_len(&s));
                }
            }
        }
    }

    #[test]
    fn full_ascii_range_is_addressable() {
        let set: SmallCharSet = small_char_set!(0 63);
        assert_eq!(set.nonmember_prefix_len("abc\0"), 3);
        assert_eq!(set.nonmember_prefix_len("abc\u{3f}"), 3);
    }
}
