//! Case normalization for raw EWTS input.
//!
//! EWTS uses case to carry meaning: capital T/D/N/S(h) spell Sanskrit
//! retroflex consonants, capital A/I/U spell long vowels, and M/H are the
//! anusvara and visarga. Everything else in capitals is just shouting and
//! is lowered before parsing. The function is pure and idempotent.

use crate::mappings::CharacterTables;

const RETROFLEX_KEEP_3: [&str; 3] = ["Tha", "Dha", "Sha"];
const RETROFLEX_KEEP_2: [&str; 3] = ["Ta", "Da", "Na"];

/// Characters that may follow a standalone anusvara/visarga run.
fn is_terminator(c: char) -> bool {
    matches!(c, ' ' | '/' | '|' | '\n' | '\t')
}

fn is_vowel_letter(c: char) -> bool {
    matches!(c, 'i' | 'u' | 'e' | 'o')
}

fn keeps_prefix(chars: &[char], i: usize, keep: &str) -> bool {
    chars[i..].iter().zip(keep.chars()).filter(|(a, b)| **a == *b).count() == keep.len()
}

pub fn normalize(text: &str) -> String {
    let tables = CharacterTables::global();
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len() + 4);
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        // Explicit retroflex spellings are preserved verbatim.
        if let Some(keep) = RETROFLEX_KEEP_3
            .iter()
            .chain(RETROFLEX_KEEP_2.iter())
            .find(|k| keeps_prefix(&chars, i, k))
        {
            out.push_str(keep);
            i += keep.len();
            continue;
        }

        // A run of capital marks at the end of a syllable is the anusvara /
        // visarga; anywhere else M and H are plain letters.
        if c == 'M' || c == 'H' {
            let run = chars[i..]
                .iter()
                .take_while(|&&m| m == 'M' || m == 'H')
                .count();
            if chars.get(i + run).map_or(true, |&n| is_terminator(n)) {
                out.extend(&chars[i..i + run]);
                i += run;
                continue;
            }
        }

        // Long-vowel capitals survive only right after a lowercase letter
        // (or the reversed-vowel dash, as in k-I); at a token start they
        // are read as over-capitalized plain vowels.
        if matches!(c, 'A' | 'I' | 'U') {
            if i > 0 && (chars[i - 1].is_ascii_lowercase() || chars[i - 1] == '-') {
                out.push(c);
            } else {
                out.push(c.to_ascii_lowercase());
            }
            i += 1;
            continue;
        }

        // Retroflex shorthand: a bare capital directly before a vowel letter
        // is rewritten to its table key, so "Ni" parses as retroflex + i.
        if matches!(c, 'T' | 'D' | 'N' | 'S') {
            let aspirated = chars.get(i + 1) == Some(&'h');
            let (key, used) = match (c, aspirated) {
                ('T', true) => ("Tha", 2),
                ('D', true) => ("Dha", 2),
                ('S', true) => ("Sha", 2),
                ('T', false) => ("Ta", 1),
                ('D', false) => ("Da", 1),
                ('N', _) => ("Na", 1),
                _ => ("Sha", 1),
            };
            if chars.get(i + used).is_some_and(|&n| is_vowel_letter(n)) {
                out.push_str(key);
                i += used;
                continue;
            }
        }

        // A capitalized multi-letter consonant is lowered as a unit.
        if let Some(len) = match_multichar_consonant(tables, &chars[i..]) {
            for ch in &chars[i..i + len] {
                out.push(ch.to_ascii_lowercase());
            }
            i += len;
            continue;
        }

        if c.is_ascii_uppercase() {
            let lower = c.to_ascii_lowercase();
            if tables.is_consonant_key(lower.encode_utf8(&mut [0u8; 4])) {
                out.push(lower);
            } else {
                out.push(c);
            }
        } else {
            out.push(c);
        }
        i += 1;
    }

    out
}

/// Length of the longest 2..=4 character run at the front of `chars` whose
/// lowercase form is a consonant key.
fn match_multichar_consonant(tables: &CharacterTables, chars: &[char]) -> Option<usize> {
    for len in (2..=4.min(chars.len())).rev() {
        let segment: String = chars[..len].iter().map(|c| c.to_ascii_lowercase()).collect();
        if tables.is_consonant_key(&segment) {
            return Some(len);
        }
    }
    None
}
