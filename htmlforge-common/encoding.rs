// Copyright 2014-2025 The html5ever Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use encoding_rs::{DecoderResult, Encoding, UTF_16BE, UTF_16LE, UTF_8, WINDOWS_1252, X_USER_DEFINED};
use tendril::{fmt::Bytes, Tendril};

use crate::buffer_queue::BufferQueue;

/// Labels that `encoding_rs` resolves correctly on their own, but where the
/// HTML encoding sniffing algorithm asks for a different final encoding for
/// historical reasons.
///
/// <https://encoding.spec.whatwg.org/#names-and-labels>
fn label_override(label: &str) -> Option<&'static Encoding> {
    match label {
        "iso-8859-8-i" => Some(encoding_rs::ISO_8859_8),
        "shift_jis" | "shift-jis" | "sjis" => Some(encoding_rs::SHIFT_JIS),
        "euc-kr" => Some(encoding_rs::EUC_KR),
        "big5" => Some(encoding_rs::BIG5),
        "x-mac-cyrillic" => Some(encoding_rs::X_MAC_CYRILLIC),
        _ => None,
    }
}

/// Detects a byte-order mark at the start of the stream.
///
/// <https://encoding.spec.whatwg.org/#bom-sniff>
fn bom_sniff(bytes: &[u8]) -> Option<&'static Encoding> {
    if bytes.starts_with(&[0xEF, 0xBB, 0xBF]) {
        Some(UTF_8)
    } else if bytes.starts_with(&[0xFE, 0xFF]) {
        Some(UTF_16BE)
    } else if bytes.starts_with(&[0xFF, 0xFE]) {
        Some(UTF_16LE)
    } else {
        None
    }
}

/// Finds a `charset=...` parameter in a `<meta>` tag's attribute text — the
/// `content` attribute of `<meta http-equiv="Content-Type">`, or (since the
/// grammar happens to match) the `charset` attribute directly.
///
/// <https://html.spec.whatwg.org/multipage/#algorithm-for-extracting-a-character-encoding-from-a-meta-element>
pub fn extract_a_character_encoding_from_a_meta_element(input: &str) -> Option<String> {
    let bytes = input.as_bytes();
    let mut position = 0;
    loop {
        loop {
            let candidate = bytes.get(position..position + "charset".len())?;
            if candidate.eq_ignore_ascii_case(b"charset") {
                break;
            }
            position += 1;
        }
        position += "charset".len();

        position += bytes[position..]
            .iter()
            .take_while(|byte| byte.is_ascii_whitespace())
            .count();

        if bytes.get(position).copied() == Some(b'=') {
            break;
        }
    }
    position += 1;

    position += bytes[position..]
        .iter()
        .take_while(|byte| byte.is_ascii_whitespace())
        .count();

    match bytes.get(position)? {
        quote @ (b'"' | b'\'') => {
            let length = bytes[position + 1..].iter().position(|byte| byte == quote)?;
            Some(input[position + 1..position + 1 + length].to_string())
        },
        _ => {
            let length = bytes[position..]
                .iter()
                .position(|byte| byte.is_ascii_whitespace() || *byte == b';')
                .unwrap_or(bytes.len() - position);
            Some(input[position..position + length].to_string())
        },
    }
}

/// Resolves the encoding an input stream should be decoded with.
///
/// Implements the first few steps of the HTML encoding sniffing algorithm
/// that are not specific to scanning the document body for a `<meta>` tag:
/// a BOM always wins, then a caller-supplied label (e.g. from a `Content-Type`
/// header or a prior parse's `<meta>` sniff), and finally a `windows-1252`
/// fallback with tentative confidence.
///
/// <https://html.spec.whatwg.org/multipage/parsing.html#encoding-sniffing-algorithm>
pub struct EncodingResolver;

impl EncodingResolver {
    /// `label_hint` is a transport-layer or caller-supplied encoding label,
    /// not yet validated or normalized. `first_bytes` is a prefix of the
    /// document used only for BOM detection.
    pub fn resolve(label_hint: Option<&str>, first_bytes: &[u8]) -> (Decoder, Confidence) {
        if let Some(encoding) = bom_sniff(first_bytes) {
            return (Decoder::new(encoding, Confidence::Certain), Confidence::Certain);
        }

        if let Some(label) = label_hint {
            let trimmed = label.trim().to_ascii_lowercase();
            if let Some(encoding) = label_override(&trimmed) {
                return (
                    Decoder::new(encoding, Confidence::Certain),
                    Confidence::Certain,
                );
            }
            if let Some(encoding) = Encoding::for_label(trimmed.as_bytes()) {
                let encoding = if encoding == UTF_16BE || encoding == UTF_16LE {
                    UTF_8
                } else if encoding == X_USER_DEFINED {
                    WINDOWS_1252
                } else {
                    encoding
                };
                return (
                    Decoder::new(encoding, Confidence::Certain),
                    Confidence::Certain,
                );
            }
        }

        (
            Decoder::new(WINDOWS_1252, Confidence::Tentative),
            Confidence::Tentative,
        )
    }
}

/// <https://html.spec.whatwg.org/#concept-encoding-confidence>
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Confidence {
    Tentative,
    Certain,
    Irrelevant,
}

pub struct Decoder {
    inner: encoding_rs::Decoder,
    confidence: Confidence,
}

impl Decoder {
    pub fn new(encoding: &'static Encoding, confidence: Confidence) -> Self {
        Self {
            inner: encoding.new_decoder(),
            confidence,
        }
    }

    pub fn confidence(&self) -> Confidence {
        self.confidence
    }

    /// Returns `None` if the encoding should not be changed and `Some(encoding)` if the current encoding
    /// should be changed to `encoding`
    pub fn change_the_encoding_to(
        &mut self,
        mut new_encoding: &'static Encoding,
    ) -> Option<&'static Encoding> {
        let current_encoding = self.inner.encoding();
        // Step 1. If the encoding that is already being used to interpret the input stream is UTF-16BE/LE,
        // then set the confidence to certain and return. The new encoding is ignored; if it was anything
        // but the same encoding, then it would be clearly incorrect.
        if current_encoding == UTF_16BE || current_encoding == UTF_16LE {
            self.confidence = Confidence::Certain;
            return None;
        }

        // Step 2. If the new encoding is UTF-16BE/LE, then change it to UTF-8.
        if new_encoding == UTF_16BE || new_encoding == UTF_16LE {
            new_encoding = UTF_8;
        }

        // Step 3. If the new encoding is x-user-defined, then change it to windows-1252.
        if new_encoding == X_USER_DEFINED {
            new_encoding = WINDOWS_1252;
        }

        // Step 4. If the new encoding is identical or equivalent to the encoding that is already being used to interpret
        // the input stream, then set the confidence to certain and return. This happens when the encoding information found
        // in the file matches what the encoding sniffing algorithm determined to be the encoding, and in the second pass
        // through the parser if the first pass found that the encoding sniffing algorithm described in the earlier section
        // failed to find the right encoding.
        if current_encoding == new_encoding {
            self.confidence = Confidence::Certain;
            return None;
        }

        // Step 5. If all the bytes up to the last byte converted by the current decoder have the same
        // Unicode interpretations in both the current encoding and the new encoding, and if the user agent
        // supports changing the converter on the fly, then the user agent may change to the new converter
        // for the encoding on the fly. Set the document's character encoding and the encoding used to convert
        // the input stream to the new encoding, set the confidence to certain, and return.
        // NOTE: We don't support changing the converter on the fly

        // Step 6. Otherwise, restart the navigate algorithm, with historyHandling set to "replace" and
        // other inputs kept the same, but this time skip the encoding sniffing algorithm and instead just
        // set the encoding to the new encoding and the confidence to certain. Whenever possible, this should
        // be done without actually contacting the network layer (the bytes should be re-parsed from memory),
        // even if, e.g., the document is marked as not being cacheable. If this is not possible and contacting
        // the network layer would involve repeating a request that uses a method other than `GET`, then instead
        // set the confidence to certain and ignore the new encoding. The resource will be misinterpreted.
        // User agents may notify the user of the situation, to aid in application development.
        Some(new_encoding)
    }

    /// Decode the given chunk with the current encoding. The result will be pushed to the end
    /// of the input stream.
    pub fn decode(&mut self, chunk: &[u8], last: bool, output: &BufferQueue) {
        let mut remaining = chunk;
        loop {
            let mut out: Tendril<Bytes> = Tendril::new();
            let max_len = self
                .inner
                .max_utf8_buffer_length_without_replacement(remaining.len())
                .unwrap_or(8192)
                .min(8192);

            // SAFETY: encoding_rs::Decoder::decode_to_utf8_without_replacement is going to initialize
            // part of the buffer. We are only going to access the initialized segment.
            unsafe {
                out.push_uninitialized(max_len as u32);
            }

            let (result, bytes_read, bytes_written) = self
                .inner
                .decode_to_utf8_without_replacement(&remaining, &mut out, last);

            if bytes_written > 0 {
                let bytes_chunk = out.subtendril(0, bytes_written as u32);

                // SAFETY: encoding_rs::Decoder::decode_to_utf8_without_replacement writes valid utf8
                let utf8_chunk = unsafe { bytes_chunk.reinterpret_without_validating() };
                output.push_back(utf8_chunk);
            }

            if matches!(result, DecoderResult::Malformed(_, _)) {
                output.push_back("\u{FFFD}".into());
            }

            remaining = &remaining[bytes_read..];
            if remaining.is_empty() {
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bom_wins_over_label() {
        let (_, confidence) = EncodingResolver::resolve(Some("windows-1252"), &[0xEF, 0xBB, 0xBF]);
        assert_eq!(confidence, Confidence::Certain);
    }

    #[test]
    fn utf16_bom_is_detected() {
        let (decoder, _) = EncodingResolver::resolve(None, &[0xFF, 0xFE]);
        assert_eq!(decoder.inner.encoding(), UTF_16LE);
    }

    #[test]
    fn label_hint_is_trimmed_and_lowercased() {
        let (decoder, confidence) = EncodingResolver::resolve(Some(" UTF-8 "), b"<html>");
        assert_eq!(decoder.inner.encoding(), UTF_8);
        assert_eq!(confidence, Confidence::Certain);
    }

    #[test]
    fn shift_jis_label_maps_to_windows_31j() {
        let (decoder, _) = EncodingResolver::resolve(Some("shift_jis"), b"");
        assert_eq!(decoder.inner.encoding(), encoding_rs::SHIFT_JIS);
    }

    #[test]
    fn meta_content_type_yields_quoted_charset() {
        assert_eq!(
            extract_a_character_encoding_from_a_meta_element("text/html; charset=\"utf-8\""),
            Some("utf-8".to_string())
        );
    }

    #[test]
    fn meta_content_type_yields_unquoted_charset() {
        assert_eq!(
            extract_a_character_encoding_from_a_meta_element("text/html; charset=Shift_JIS"),
            Some("Shift_JIS".to_string())
        );
    }

    #[test]
    fn meta_content_without_charset_yields_none() {
        assert_eq!(extract_a_character_encoding_from_a_meta_element("text/html"), None);
    }

    #[test]
    fn meta_charset_with_no_equals_sign_yields_none() {
        assert_eq!(
            extract_a_character_encoding_from_a_meta_element("charset utf8"),
            None
        );
    }

    #[test]
    fn meta_charset_with_unterminated_quote_yields_none() {
        assert_eq!(
            extract_a_character_encoding_from_a_meta_element("charset=\"utf8"),
            None
        );
    }

    #[test]
    fn meta_charset_trailing_with_nothing_after_does_not_panic() {
        assert_eq!(extract_a_character_encoding_from_a_meta_element("charset"), None);
    }

    #[test]
    fn unknown_label_falls_back_to_tentative_windows_1252() {
        let (decoder, confidence) = EncodingResolver::resolve(None, b"\x41\x42");
        assert_eq!(decoder.inner.encoding(), WINDOWS_1252);
        assert_eq!(confidence, Confidence::Tentative);
    }
}
