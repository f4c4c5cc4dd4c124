// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Parameter value encoding as defined in RFC 6868.
//!
//! ```text
//! ^^  <->  ^
//! ^'  <->  "
//! ^n  <->  LF   (^N is accepted when decoding)
//! ```
//!
//! Unknown sequences such as `^m` are left untouched when decoding.

/// Marker used to shield a literal `^^` while the other sequences are decoded.
const PROTECTED_CARET: &str = "^^ ";

/// Encode a parameter value for output.
///
/// CRLF, LF and CR all become `^n`.
#[must_use]
pub fn escape_param_value(value: &str) -> String {
    // `^` first, so the sequences produced below are not escaped twice
    value
        .replace('^', "^^")
        .replace('"', "^'")
        .replace("\r\n", "^n")
        .replace(['\n', '\r'], "^n")
}

/// Decode a parameter value read from input.
#[must_use]
pub fn unescape_param_value(value: &str) -> String {
    if !value.contains('^') {
        return value.to_owned();
    }

    value
        .replace("^^", PROTECTED_CARET)
        .replace("^n", "\n")
        .replace("^N", "\n")
        .replace("^'", "\"")
        .replace(PROTECTED_CARET, "^")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unescapes_known_sequences() {
        let checks = [
            ("", ""),
            ("^^", "^"),
            ("^'", "\""),
            ("^n", "\n"),
            ("^N", "\n"),
            ("^^n", "^n"),
            ("^^^'", "^\""),
            ("^^^'^^^n^'^^N^", "^\"^\n\"^N^"),
            ("^^^^", "^^"),
            ("^^^^n", "^^n"),
            ("^^^^^n", "^^\n"),
            ("e^^^n", "e^\n"),
        ];
        for (input, want) in checks {
            assert_eq!(unescape_param_value(input), want, "input: {input:?}");
        }
    }

    #[test]
    fn leaves_unknown_sequences() {
        assert_eq!(unescape_param_value("^m"), "^m");
        assert_eq!(unescape_param_value("a^"), "a^");
        assert_eq!(unescape_param_value("^ "), "^ ");
    }

    #[test]
    fn escapes_specials() {
        let checks = [
            ("", ""),
            ("^", "^^"),
            ("\"", "^'"),
            ("\n", "^n"),
            ("\r\n", "^n"),
            ("\r", "^n"),
            ("^m", "^^m"),
            ("^n", "^^n"),
            ("^\"", "^^^'"),
            ("^\"^\n\"^N^", "^^^'^^^n^'^^N^^"),
            ("^^", "^^^^"),
            ("^^n", "^^^^n"),
            ("^^\n", "^^^^^n"),
        ];
        for (input, want) in checks {
            assert_eq!(escape_param_value(input), want, "input: {input:?}");
        }
    }

    #[test]
    fn escapes_example_sentence() {
        let input = "A \"String\" with more than \n2^0\n characters!";
        assert_eq!(
            escape_param_value(input),
            "A ^'String^' with more than ^n2^^0^n characters!"
        );
    }

    #[test]
    fn unescapes_example_sentence() {
        let input = "A ^'String^' with more than^n2^^0^Ncharacters!";
        assert_eq!(
            unescape_param_value(input),
            "A \"String\" with more than\n2^0\ncharacters!"
        );
    }

    #[test]
    fn normalizes_carriage_returns_to_newline() {
        // RFC 6868 has a single newline escape
        assert_eq!(unescape_param_value(&escape_param_value("a\r\nb")), "a\nb");
    }
}
