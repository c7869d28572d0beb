//! Multi-strategy EWTS syllable parser.
//!
//! Wylie is not an unambiguous grammar: r, l, s, y, w, m, d, g, b and '
//! each serve as root, prescript, superscript, subscript or postscript
//! depending on their neighbours. The parser therefore runs four candidate
//! segmentations — bare root, superscript+root, prescript+root, and
//! prescript+superscript+root — and arbitrates between the ones that cover
//! the input. Each candidate is evaluated independently over the immutable
//! tables; there is no shared parser state to reset between attempts.

use tracing::debug;

use crate::mappings::CharacterTables;
use crate::rules;
use crate::syllable::SyllableComponents;

/// How much legality checking a parse applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strictness {
    /// Prescript/superscript/subscript pairings must be legal. Conversion
    /// uses this so e.g. `grwa` stays root + double subscript instead of
    /// becoming an impossible `g` prefix.
    Checked,
    /// Structure only. The validator uses this to recover the offending
    /// segmentation of an illegal stack and name the bad position.
    Lenient,
}

/// No reading covered the whole token. `position` is the furthest offset
/// any strategy reached, which is where diagnostics should point.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("no syllable reading covers the token (furthest match at offset {position})")]
pub struct SyllableParseError {
    pub position: usize,
}

/// Strategies ranked most- to least-structured: (use_prescript, use_superscript).
/// A fuller structural reading is linguistically more specific, so when
/// several strategies cover the token the richer one wins and the bare-root
/// reading is the fallback.
const STRATEGIES: [(bool, bool); 4] = [(true, true), (true, false), (false, true), (false, false)];

/// Parse one whole normalized token. Every strategy must consume the entire
/// token to count; ties go to the more structured reading.
pub fn parse_syllable(token: &str) -> Result<SyllableComponents, SyllableParseError> {
    let mut furthest = 0;
    for (pre, sup) in STRATEGIES {
        if let Some((components, len)) = try_strategy(token, pre, sup, Strictness::Checked) {
            furthest = furthest.max(len);
            if len == token.len() {
                debug!(token, ?components, "syllable parsed");
                return Ok(components);
            }
        }
    }
    Err(SyllableParseError { position: furthest })
}

/// Longest syllable reading at the start of `text`, for stream conversion.
/// Ties between equally long readings go to the more structured strategy.
pub fn parse_prefix(text: &str) -> Option<(SyllableComponents, usize)> {
    parse_prefix_with(text, Strictness::Checked)
}

/// Lenient prefix parse: structure without pair legality. The validator
/// runs this after a checked parse fails, then names the illegal pair.
pub fn parse_lenient(text: &str) -> Option<(SyllableComponents, usize)> {
    parse_prefix_with(text, Strictness::Lenient)
}

fn parse_prefix_with(text: &str, strict: Strictness) -> Option<(SyllableComponents, usize)> {
    let mut best: Option<(SyllableComponents, usize)> = None;
    for (pre, sup) in STRATEGIES {
        if let Some((components, len)) = try_strategy(text, pre, sup, strict) {
            if best.as_ref().map_or(true, |(_, best_len)| len > *best_len) {
                best = Some((components, len));
            }
        }
    }
    best
}

/// Run one segmentation strategy from the left edge of `text`.
fn try_strategy(
    text: &str,
    use_prescript: bool,
    use_superscript: bool,
    strict: Strictness,
) -> Option<(SyllableComponents, usize)> {
    let tables = CharacterTables::global();
    let mut pos = 0;

    let mut prescript: Option<String> = None;
    if use_prescript {
        // A single letter is never peeled off the front of a multi-letter
        // root: in "dza" the d belongs to the root dz.
        if tables.starts_with_multichar_consonant(text) {
            return None;
        }
        let letter = single_letter_from(text, &rules::PRESCRIPTS)?;
        prescript = Some(letter.to_string());
        pos += letter.len();
    }

    let mut superscript: Option<String> = None;
    if use_superscript {
        if tables.starts_with_multichar_consonant(&text[pos..]) {
            return None;
        }
        let letter = single_letter_from(&text[pos..], &rules::SUPERSCRIPTS)?;
        superscript = Some(letter.to_string());
        pos += letter.len();
    }

    // Root: longest consonant match, or an implicit `a` when a bare token
    // opens with a vowel letter (standalone-vowel syllables like "om").
    let root: String;
    if let Some((key, _)) = tables.match_consonant(&text[pos..]) {
        root = rules::canonical_root(key).to_string();
        pos += key.len();
    } else if !use_prescript && !use_superscript && tables.match_vowel(&text[pos..]).is_some() {
        root = "a".to_string();
    } else {
        return None;
    }
    // A peeled prescript/superscript must precede a real root letter.
    if (use_prescript || use_superscript) && root == "a" {
        return None;
    }

    if strict == Strictness::Checked {
        if let Some(p) = &prescript {
            if !rules::prescript_allows(p, &root) {
                return None;
            }
        }
        if let Some(s) = &superscript {
            if !rules::superscript_allows(s, &root) {
                return None;
            }
        }
    }

    // Up to two subscript letters. Wylie writes no stack separator, so the
    // longest legal combination is tried first and recorded as "x+y".
    let mut subscript: Option<String> = None;
    if let Some((key, _)) = tables.match_subscript(&text[pos..]) {
        let first = canonical_subscript(key);
        let take = match strict {
            Strictness::Checked => rules::subscript_allows(first, &root),
            Strictness::Lenient => true,
        };
        if take {
            let mut matched = first.to_string();
            pos += key.len();
            if let Some((key2, _)) = tables.match_subscript(&text[pos..]) {
                let second = canonical_subscript(key2);
                let take2 = match strict {
                    Strictness::Checked => rules::double_subscript_allows(first, second, &root),
                    Strictness::Lenient => true,
                };
                if take2 {
                    matched = format!("{first}+{second}");
                    pos += key2.len();
                }
            }
            subscript = Some(matched);
        }
    }

    let mut vowel = "a".to_string();
    if let Some((key, _)) = tables.match_vowel(&text[pos..]) {
        vowel = key.to_string();
        pos += key.len();
    }

    // Postscripts. A candidate followed by a vowel letter is not a suffix:
    // that consonant opens the next syllable (ba'i is ba + 'i, basa is
    // ba + sa).
    let mut postscript1: Option<String> = None;
    let mut postscript2: Option<String> = None;
    if let Some(p1) = match_postscript(tables, &text[pos..], &rules::POSTSCRIPTS, strict) {
        if tables.match_vowel(&text[pos + p1.len()..]).is_none() {
            pos += p1.len();
            postscript1 = Some(p1);
            if let Some(p2) = match_postscript(tables, &text[pos..], &rules::SECOND_POSTSCRIPTS, strict)
            {
                if tables.match_vowel(&text[pos + p2.len()..]).is_none() {
                    pos += p2.len();
                    postscript2 = Some(p2);
                }
            }
        }
    }

    let components = SyllableComponents {
        root,
        prescript,
        superscript,
        subscript,
        vowel,
        postscript1,
        postscript2,
    };
    Some((components, pos))
}

/// The `v` spelling is an input alias for the wa-zur.
fn canonical_subscript(key: &str) -> &str {
    if key == "v" {
        "w"
    } else {
        key
    }
}

fn single_letter_from<'s>(text: &str, set: &[&'s str]) -> Option<&'s str> {
    set.iter().find(|s| text.starts_with(**s)).copied()
}

fn match_postscript(
    tables: &CharacterTables,
    text: &str,
    set: &[&str],
    strict: Strictness,
) -> Option<String> {
    match strict {
        // Longest-first set match (ng before n).
        Strictness::Checked => set
            .iter()
            .find(|p| text.starts_with(**p))
            .map(|p| p.to_string()),
        // Any trailing consonant, so the validator can call out an illegal
        // suffix by name instead of failing opaquely.
        Strictness::Lenient => tables.match_consonant(text).map(|(key, _)| key.to_string()),
    }
}
