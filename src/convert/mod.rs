//! Full-text conversion between EWTS and Tibetan Unicode.
//!
//! The drivers walk the input left to right: numerals, separators,
//! punctuation and Sanskrit marks are table substitutions; everything else
//! goes through the syllable parser/builder (forward) or the reverse
//! parser (backward). The only context-sensitive substitution is the
//! anusvara rule below; everything else is a pure lookup.

#[cfg(test)]
mod tests;

use tracing::{debug, debug_span};

use crate::builder::build_syllable;
use crate::mappings::CharacterTables;
use crate::normalize::normalize;
use crate::parser;
use crate::reverse;
use crate::unicode;

/// Substituted for an unconvertible syllable in permissive mode.
pub const ERROR_MARKER: char = '\u{FFFD}';

/// The anusvara written after the compound long-u vowel (hUM).
const SNA_LDAN: char = '\u{0F83}';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Substitute `ERROR_MARKER` for each failed syllable and continue.
    #[default]
    Permissive,
    /// Stop at the first failure.
    Strict,
}

#[derive(Debug, Clone, Copy)]
pub struct ConvertOptions {
    pub mode: ErrorMode,
    /// Render inter-syllable spaces as the tsheg (the EWTS reading of a
    /// plain space); `_` always produces a real space.
    pub spaces_as_tsheg: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        ConvertOptions {
            mode: ErrorMode::Permissive,
            spaces_as_tsheg: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConvertError {
    #[error("unknown character {ch:?} at offset {position}")]
    UnknownCharacter { ch: char, position: usize },
    #[error("unparseable syllable at offset {position}")]
    InvalidSyllable { position: usize },
}

/// EWTS to Tibetan Unicode with default options (permissive, spaces as
/// tsheg). Permissive conversion always succeeds.
pub fn ewts_to_unicode(text: &str) -> String {
    ewts_to_unicode_with(text, &ConvertOptions::default())
        .expect("permissive conversion is total")
}

/// EWTS to Tibetan Unicode. Offsets in errors refer to the case-normalized
/// text.
pub fn ewts_to_unicode_with(
    text: &str,
    options: &ConvertOptions,
) -> Result<String, ConvertError> {
    let span = debug_span!("ewts_to_unicode", len = text.len());
    let _enter = span.enter();

    let tables = CharacterTables::global();
    let normalized = normalize(text);
    let mut out = String::new();
    let mut i = 0;

    while i < normalized.len() {
        let rest = &normalized[i..];
        let c = rest.chars().next().expect("i is on a char boundary");

        if c.is_ascii_digit() {
            if let Some(digit) = tables.numeral(c.encode_utf8(&mut [0u8; 4])) {
                out.push_str(digit);
                i += c.len_utf8();
                continue;
            }
        }

        match c {
            ' ' => {
                out.push(if options.spaces_as_tsheg { '\u{0F0B}' } else { ' ' });
                i += 1;
                continue;
            }
            // explicit non-breaking space
            '_' => {
                out.push(' ');
                i += 1;
                continue;
            }
            // syllable-boundary disambiguator (g.yas) and explicit stack
            // separator render nothing of their own
            '.' | '+' => {
                i += 1;
                continue;
            }
            '\n' | '\t' | '\r' => {
                out.push(c);
                i += 1;
                continue;
            }
            _ => {}
        }

        if let Some((key, uni)) = tables.match_punctuation(rest) {
            out.push_str(uni);
            i += key.len();
            continue;
        }

        if let Some((key, uni)) = tables.match_mark(rest) {
            // The one context-sensitive substitution: a plain anusvara
            // directly after the compound vowel of `U` takes the sna ldan
            // form instead.
            if key == "M" && out.ends_with("\u{0F71}\u{0F74}") {
                out.push(SNA_LDAN);
            } else {
                out.push_str(uni);
            }
            i += key.len();
            continue;
        }

        if let Some((components, len)) = parser::parse_prefix(rest) {
            out.push_str(&build_syllable(&components));
            i += len;
            continue;
        }

        // Nothing matches here: either a character outside every table or
        // a structurally impossible cluster.
        let position = normalized[..i].chars().count();
        let known = c.is_ascii() && is_inventory_char(tables, c);
        match options.mode {
            ErrorMode::Strict if known => {
                return Err(ConvertError::InvalidSyllable { position });
            }
            ErrorMode::Strict => {
                return Err(ConvertError::UnknownCharacter { ch: c, position });
            }
            ErrorMode::Permissive => {
                debug!(offset = position, "substituting error marker");
                out.push(ERROR_MARKER);
                i += skip_syllable(rest);
            }
        }
    }

    Ok(out)
}

/// Tibetan Unicode to EWTS with default options. Non-Tibetan characters
/// pass through unchanged.
pub fn unicode_to_ewts(text: &str) -> String {
    unicode_to_ewts_with(text, &ConvertOptions::default())
        .expect("permissive conversion is total")
}

/// Tibetan Unicode to EWTS.
pub fn unicode_to_ewts_with(
    text: &str,
    options: &ConvertOptions,
) -> Result<String, ConvertError> {
    let span = debug_span!("unicode_to_ewts", len = text.len());
    let _enter = span.enter();

    let tables = CharacterTables::global();
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if unicode::is_tsheg(c) {
            out.push(' ');
            i += 1;
            continue;
        }

        if unicode::is_base_consonant(c) {
            if let Some(syllable) = reverse::parse_unicode_syllable(&chars[i..]) {
                out.push_str(&reverse::assemble_wylie(&syllable));
                i += syllable.consumed;
                continue;
            }
        }

        // Digits, shads, standalone marks and stray vowel signs all have
        // single-character reverse entries.
        if let Some(ascii) = tables.reverse_char(c) {
            out.push_str(ascii);
            i += 1;
            continue;
        }

        if unicode::is_tibetan(c) {
            match options.mode {
                ErrorMode::Strict => {
                    return Err(ConvertError::UnknownCharacter { ch: c, position: i });
                }
                ErrorMode::Permissive => out.push(ERROR_MARKER),
            }
        } else {
            // Interleaved plain text is preserved.
            out.push(c);
        }
        i += 1;
    }

    Ok(out)
}

fn is_inventory_char(tables: &CharacterTables, c: char) -> bool {
    tables.key_chars().any(|k| k == c)
}

/// Bytes to skip after a failed syllable: the rest of the current
/// letter-run, so one marker stands in for one broken syllable.
fn skip_syllable(rest: &str) -> usize {
    rest.char_indices()
        .find(|(_, c)| !(c.is_ascii_alphanumeric() || *c == '\'' || *c == '+'))
        .map(|(idx, _)| idx.max(rest.chars().next().map_or(1, char::len_utf8)))
        .unwrap_or(rest.len())
}
