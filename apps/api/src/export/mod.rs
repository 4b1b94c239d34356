//! Document exporters — PDF (direct page layout) and RTF (Word-compatible).
//!
//! Both consume the normalized resume payload and produce byte-for-byte
//! deterministic output for identical input. All user text is sanitized to a
//! single-byte Western encoding by best-effort substitution first: export
//! never fails merely because of extended characters.

use thiserror::Error;

pub mod handlers;
pub mod layout;
pub mod pdf;
pub mod rtf;

#[derive(Debug, Error)]
pub enum ExportError {
    /// The stored data could not be prepared for export — bad payload, not a
    /// broken environment.
    #[error("export render failed: {0}")]
    Render(String),

    /// The document engine itself failed — broken export environment.
    #[error("export engine failed: {0}")]
    Engine(String),
}

/// Best-effort reduction of arbitrary text to the Latin-1 repertoire.
///
/// Common typographic punctuation is transliterated to its ASCII equivalent;
/// characters in the Latin-1 range pass through; everything else becomes `?`.
/// Characters are substituted, never dropped, and the function never fails.
pub fn to_latin1(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{2032}' => out.push('\''),
            '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{2033}' => out.push('"'),
            '\u{2013}' | '\u{2014}' | '\u{2212}' => out.push('-'),
            '\u{2022}' | '\u{00B7}' => out.push('*'),
            '\u{2026}' => out.push_str("..."),
            '\u{00A0}' | '\u{2009}' | '\u{202F}' => out.push(' '),
            c if (c as u32) < 0x20 && c != '\n' => out.push(' '),
            c if (c as u32) <= 0x7E => out.push(c),
            c if (0xA0..=0xFF).contains(&(c as u32)) => out.push(c),
            _ => out.push('?'),
        }
    }
    out
}

/// Encodes sanitized text as Latin-1 bytes. Input is expected to already be
/// within the Latin-1 repertoire (see `to_latin1`); anything else is
/// substituted here as a final guard.
pub fn encode_latin1(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| {
            let code = c as u32;
            if code <= 0xFF {
                code as u8
            } else {
                b'?'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latin1_passes_ascii_through() {
        assert_eq!(to_latin1("Ana Silva, Engineer @ Acme"), "Ana Silva, Engineer @ Acme");
    }

    #[test]
    fn test_latin1_keeps_accented_western_characters() {
        assert_eq!(to_latin1("José Azeredo — café"), "José Azeredo - café");
    }

    #[test]
    fn test_latin1_transliterates_smart_quotes() {
        assert_eq!(to_latin1("\u{201C}shipping\u{201D} \u{2018}fast\u{2019}"), "\"shipping\" 'fast'");
    }

    #[test]
    fn test_latin1_substitutes_unmappable_characters() {
        assert_eq!(to_latin1("日本語"), "???");
        assert_eq!(to_latin1("emoji 🦀 here"), "emoji ? here");
    }

    #[test]
    fn test_latin1_never_produces_multibyte_output() {
        let sanitized = to_latin1("mixed: é, 中, \u{2014}, ok");
        assert!(sanitized.chars().all(|c| (c as u32) <= 0xFF));
    }

    #[test]
    fn test_encode_latin1_is_single_byte_per_char() {
        let sanitized = to_latin1("José — 中");
        let bytes = encode_latin1(&sanitized);
        assert_eq!(bytes.len(), sanitized.chars().count());
    }
}
