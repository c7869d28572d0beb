//! ACIP <-> EWTS <-> Tibetan Unicode conversion.
//!
//! ACIP is upper-case by convention and differs from EWTS in a handful of
//! spellings (TS/TZ against tsh/ts, V for the wa-zur, lowercase letters for
//! the Sanskrit retroflexes, explicit A for the inherent vowel). Conversion
//! to and from Unicode always pivots through EWTS, so the syllable engine
//! is shared rather than duplicated.

mod stacks;

use std::sync::OnceLock;

use regex::Regex;
use tracing::debug_span;

use crate::convert;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AcipError {
    #[error("character {ch:?} at offset {position} has no mapping between ACIP and EWTS")]
    EncodingMismatch { ch: char, position: usize },
}

/// Multi-letter ACIP consonants and their EWTS spellings, longest first.
/// TS/TZ is the trap: ACIP TS is the aspirated tsha.
const ACIP_CONSONANTS: [(&str, &str); 31] = [
    ("TSH", "tsh"),
    ("TS", "tsh"),
    ("TZ", "ts"),
    ("SH", "sh"),
    ("KH", "kh"),
    ("NG", "ng"),
    ("CH", "ch"),
    ("NY", "ny"),
    ("TH", "th"),
    ("PH", "ph"),
    ("ZH", "zh"),
    ("DZ", "dz"),
    ("sh", "Sh"),
    ("K", "k"),
    ("G", "g"),
    ("C", "c"),
    ("J", "j"),
    ("T", "t"),
    ("D", "d"),
    ("N", "n"),
    ("P", "p"),
    ("B", "b"),
    ("M", "m"),
    ("W", "w"),
    ("V", "w"),
    ("Y", "y"),
    ("R", "r"),
    ("L", "l"),
    ("S", "s"),
    ("Z", "z"),
    ("H", "h"),
];

/// Lowercase ACIP letters: Sanskrit retroflexes plus the anusvara/visarga.
const ACIP_LOWER: [(&str, &str); 8] = [
    ("th", "Th"),
    ("dh", "Dh"),
    ("t", "T"),
    ("d", "D"),
    ("n", "N"),
    ("s", "S"),
    ("m", "M"),
    ("h", "H"),
];

fn comment_regexes() -> &'static (Regex, Regex) {
    static COMMENTS: OnceLock<(Regex, Regex)> = OnceLock::new();
    COMMENTS.get_or_init(|| {
        (
            Regex::new(r"\[[^\]]*\]").expect("bracket comment pattern must compile"),
            Regex::new(r"@[^ ]* *").expect("at comment pattern must compile"),
        )
    })
}

fn is_acip_vowel_letter(c: char) -> bool {
    matches!(c, 'A' | 'E' | 'I' | 'O' | 'U' | 'i')
}

/// Convert ACIP text to EWTS. Offsets in errors refer to the text after
/// comment stripping.
pub fn acip_to_ewts(text: &str) -> Result<String, AcipError> {
    let span = debug_span!("acip_to_ewts", len = text.len());
    let _enter = span.enter();

    let (bracket, at) = comment_regexes();
    let no_brackets = bracket.replace_all(text, "");
    let stripped = at.replace_all(&no_brackets, "");
    let cleaned: String = stripped
        .chars()
        .map(|c| match c {
            '\u{2019}' | '\u{02BC}' | '\u{02B9}' | '\u{02BE}' => '\'',
            c => c,
        })
        .collect();

    let mut out = String::new();
    let mut position = 0;
    let mut i = 0;
    let mut prev_was_consonant = false;

    while i < cleaned.len() {
        let rest = &cleaned[i..];
        let c = rest.chars().next().expect("i is on a char boundary");

        if let Some((acip, ewts)) = ACIP_CONSONANTS.iter().find(|(a, _)| rest.starts_with(a)) {
            out.push_str(ewts);
            position += acip.chars().count();
            i += acip.len();
            prev_was_consonant = true;
            continue;
        }
        if let Some((acip, ewts)) = ACIP_LOWER.iter().find(|(a, _)| rest.starts_with(a)) {
            out.push_str(ewts);
            position += acip.chars().count();
            i += acip.len();
            prev_was_consonant = !matches!(*ewts, "M" | "H");
            continue;
        }

        match c {
            // the inherent vowel is explicit in ACIP; before another vowel
            // letter it is silent
            'A' => {
                if !rest[1..].starts_with(is_acip_vowel_letter) {
                    out.push('a');
                }
                prev_was_consonant = false;
            }
            'E' if rest.starts_with("EE") => {
                out.push_str("ai");
                position += 2;
                i += 2;
                prev_was_consonant = false;
                continue;
            }
            'O' if rest.starts_with("OO") => {
                out.push_str("au");
                position += 2;
                i += 2;
                prev_was_consonant = false;
                continue;
            }
            'E' | 'I' | 'O' | 'U' => {
                out.push(c.to_ascii_lowercase());
                prev_was_consonant = false;
            }
            'i' => {
                out.push_str("-i");
                prev_was_consonant = false;
            }
            '\'' => {
                if prev_was_consonant && rest[1..].starts_with(|n: char| matches!(n, 'A' | 'E' | 'I' | 'O' | 'U')) {
                    // B'I is plain bi: the apostrophe attaches the vowel
                } else if rest[1..].starts_with('i') {
                    out.push_str("-I");
                    position += 2;
                    i += 2;
                    prev_was_consonant = false;
                    continue;
                } else {
                    out.push('\'');
                    prev_was_consonant = true;
                }
            }
            ';' | ',' => out.push('/'),
            '`' => out.push('!'),
            ':' => out.push('H'),
            '-' => out.push('.'),
            // correction and yig-chung markers carry no text of their own
            '/' | '(' | ')' => {}
            ' ' | '\n' | '\t' | '+' | '_' => out.push(c),
            '0'..='9' => out.push(c),
            _ => {
                return Err(AcipError::EncodingMismatch { ch: c, position });
            }
        }
        position += 1;
        i += c.len_utf8();
        if !c.is_ascii_alphabetic() && c != '\'' {
            prev_was_consonant = false;
        }
    }

    Ok(stacks::add_stack_separators(&out))
}

/// EWTS tokens and their ACIP spellings, longest first.
const EWTS_TOKENS: [(&str, &str); 46] = [
    ("tsh", "TS"),
    ("Tha", "thA"),
    ("Dha", "dhA"),
    ("Sha", "shA"),
    ("ts", "TZ"),
    ("Sh", "sh"),
    ("sh", "SH"),
    ("kh", "KH"),
    ("ng", "NG"),
    ("ch", "CH"),
    ("ny", "NY"),
    ("th", "TH"),
    ("ph", "PH"),
    ("zh", "ZH"),
    ("dz", "DZ"),
    ("ai", "EE"),
    ("au", "OO"),
    ("-i", "i"),
    ("-I", "'i"),
    ("Ta", "tA"),
    ("Da", "dA"),
    ("Na", "nA"),
    ("Th", "th"),
    ("Dh", "dh"),
    ("T", "t"),
    ("D", "d"),
    ("N", "n"),
    ("M", "m"),
    ("H", ":"),
    ("A", "'A"),
    ("I", "'I"),
    ("U", "'U"),
    ("E", "'E"),
    ("O", "'O"),
    ("k", "K"),
    ("g", "G"),
    ("c", "C"),
    ("j", "J"),
    ("t", "T"),
    ("d", "D"),
    ("n", "N"),
    ("p", "P"),
    ("b", "B"),
    ("m", "M"),
    ("w", "V"),
    ("y", "Y"),
];

const EWTS_TOKENS_TAIL: [(&str, &str); 11] = [
    ("r", "R"),
    ("l", "L"),
    ("s", "S"),
    ("z", "Z"),
    ("h", "H"),
    ("'", "'"),
    ("a", "A"),
    ("i", "I"),
    ("u", "U"),
    ("e", "E"),
    ("o", "O"),
];

/// Convert EWTS text to ACIP.
pub fn ewts_to_acip(text: &str) -> Result<String, AcipError> {
    let span = debug_span!("ewts_to_acip", len = text.len());
    let _enter = span.enter();

    let mut out = String::new();
    let mut position = 0;
    let mut i = 0;

    while i < text.len() {
        let rest = &text[i..];
        let c = rest.chars().next().expect("i is on a char boundary");

        if let Some((ewts, acip)) = EWTS_TOKENS
            .iter()
            .chain(EWTS_TOKENS_TAIL.iter())
            .find(|(e, _)| rest.starts_with(e))
        {
            out.push_str(acip);
            position += ewts.chars().count();
            i += ewts.len();
            continue;
        }

        match c {
            '/' => out.push(','),
            '|' => out.push(' '),
            '!' => out.push('`'),
            '.' => out.push('-'),
            '_' => out.push(' '),
            ' ' | '\n' | '\t' | '+' => out.push(c),
            '0'..='9' => out.push(c),
            _ => {
                return Err(AcipError::EncodingMismatch { ch: c, position });
            }
        }
        position += 1;
        i += c.len_utf8();
    }

    Ok(out)
}

/// ACIP straight to Tibetan Unicode (permissive on the EWTS leg).
pub fn acip_to_unicode(text: &str) -> Result<String, AcipError> {
    Ok(convert::ewts_to_unicode(&acip_to_ewts(text)?))
}

/// Tibetan Unicode straight to ACIP.
pub fn unicode_to_acip(text: &str) -> Result<String, AcipError> {
    ewts_to_acip(&convert::unicode_to_ewts(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_word() {
        assert_eq!(acip_to_ewts("BSGRUBS").unwrap(), "bsgrubs");
    }

    #[test]
    fn test_khams() {
        assert_eq!(acip_to_ewts("KHAMS").unwrap(), "khams");
    }

    #[test]
    fn test_ts_tz_distinction() {
        assert_eq!(acip_to_ewts("TSA").unwrap(), "tsha");
        assert_eq!(acip_to_ewts("TZA").unwrap(), "tsa");
    }

    #[test]
    fn test_genitive_apostrophe() {
        assert_eq!(acip_to_ewts("BA'I").unwrap(), "ba'i");
    }

    #[test]
    fn test_apostrophe_attaches_vowel() {
        assert_eq!(acip_to_ewts("B'I").unwrap(), "bi");
    }

    #[test]
    fn test_reversed_vowels() {
        assert_eq!(acip_to_ewts("L'i").unwrap(), "l-I");
        assert_eq!(acip_to_ewts("Li").unwrap(), "l-i");
    }

    #[test]
    fn test_diphthongs() {
        assert_eq!(acip_to_ewts("AEE").unwrap(), "ai");
        assert_eq!(acip_to_ewts("AOO").unwrap(), "au");
    }

    #[test]
    fn test_wazur() {
        assert_eq!(acip_to_ewts("BSGRVUBS").unwrap(), "bsgrwubs");
    }

    #[test]
    fn test_sanskrit_retroflex() {
        assert_eq!(acip_to_ewts("PAn+dI").unwrap(), "paN+Di");
    }

    #[test]
    fn test_comments_stripped() {
        assert_eq!(acip_to_ewts("[page 1] BLA MA").unwrap().trim(), "bla ma");
    }

    #[test]
    fn test_unknown_character_position() {
        let err = acip_to_ewts("BA=GA").unwrap_err();
        assert_eq!(
            err,
            AcipError::EncodingMismatch {
                ch: '=',
                position: 2
            }
        );
    }

    #[test]
    fn test_ewts_to_acip() {
        assert_eq!(ewts_to_acip("bsgrubs").unwrap(), "BSGRUBS");
        assert_eq!(ewts_to_acip("ba'i").unwrap(), "BA'I");
        assert_eq!(ewts_to_acip("tsha tsa").unwrap(), "TSA TZA");
        assert_eq!(ewts_to_acip("grwa").unwrap(), "GRVA");
    }

    #[test]
    fn test_acip_ewts_roundtrip() {
        for acip in ["BSGRUBS", "KHAMS", "BLA MA", "SANGS RGYAS"] {
            let ewts = acip_to_ewts(acip).unwrap();
            assert_eq!(ewts_to_acip(&ewts).unwrap(), acip, "for {acip}");
        }
    }

    #[test]
    fn test_acip_to_unicode() {
        assert_eq!(
            acip_to_unicode("BLA MA").unwrap(),
            "\u{0F56}\u{0FB3}\u{0F0B}\u{0F58}"
        );
        assert_eq!(
            acip_to_unicode("BSGRUBS").unwrap(),
            "\u{0F56}\u{0F66}\u{0F92}\u{0FB2}\u{0F74}\u{0F56}\u{0F66}"
        );
    }

    #[test]
    fn test_unicode_to_acip() {
        assert_eq!(
            unicode_to_acip("\u{0F56}\u{0FB3}\u{0F0B}\u{0F58}").unwrap(),
            "BLA MA"
        );
    }
}
