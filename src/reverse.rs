//! Tibetan Unicode -> EWTS reverse parsing.
//!
//! Unicode mostly disambiguates what Wylie leaves implicit: stacked letters
//! appear in subjoined form, so the forward direction's hardest questions
//! are already answered. What remains ambiguous is a leading base consonant
//! followed by another base — prefix or root? — which is resolved by
//! preferring whichever reading explains more of the input, root-first on
//! ties (དག is dag, དཀར is dkar).

use tracing::debug;

use crate::mappings::CharacterTables;
use crate::rules;
use crate::syllable::SyllableComponents;
use crate::unicode;

/// One reverse-parsed syllable.
pub struct ReverseSyllable {
    pub components: SyllableComponents,
    /// Trailing anusvara/visarga tokens in encounter order.
    pub marks: Vec<String>,
    /// Characters of input covered.
    pub consumed: usize,
    /// True when prescript and root appeared side by side in base form even
    /// though the pair would stack if rebuilt; Wylie then needs the `.`
    /// disambiguator (གཡས is g.yas, not gyas).
    needs_dot: bool,
}

/// Parse one syllable from the front of `chars`.
pub fn parse_unicode_syllable(chars: &[char]) -> Option<ReverseSyllable> {
    let with_prescript = read_syllable(chars, true);
    let root_first = read_syllable(chars, false);
    // Prefer the reading that explains more input. When both explain the
    // same pure-consonant cluster the choice is a convention: two letters
    // read root+suffix (དག is dag), three or more read with the prefix
    // (དགས is dgas, འདས is 'das).
    let chosen = match (with_prescript, root_first) {
        (Some(a), Some(b)) => Some(match a.consumed.cmp(&b.consumed) {
            std::cmp::Ordering::Greater => a,
            std::cmp::Ordering::Less => b,
            std::cmp::Ordering::Equal if a.consumed >= 3 => a,
            std::cmp::Ordering::Equal => b,
        }),
        (a, b) => a.or(b),
    };
    if let Some(s) = &chosen {
        debug!(consumed = s.consumed, components = ?s.components, "reverse syllable");
    }
    chosen
}

/// Render a reverse-parsed syllable back to EWTS.
pub fn assemble_wylie(syllable: &ReverseSyllable) -> String {
    let c = &syllable.components;
    let mut out = String::new();

    if let Some(p) = &c.prescript {
        out.push_str(p);
        if syllable.needs_dot {
            out.push('.');
        }
    }
    if let Some(s) = &c.superscript {
        out.push_str(s);
    }

    let vowel_initial = c.root == "a"
        && c.has_explicit_vowel()
        && c.prescript.is_none()
        && c.superscript.is_none()
        && c.subscript.is_none();
    if vowel_initial {
        // ཨོམ is om, not aom
        out.push_str(&c.vowel);
    } else {
        out.push_str(&c.root);
        for letter in c.subscript_letters() {
            out.push_str(letter);
        }
        if c.has_explicit_vowel() {
            out.push_str(&c.vowel);
        } else if !c.root.ends_with('a') {
            // the bare root key of ཨ and the retroflex keys already carry
            // their inherent a
            out.push('a');
        }
    }

    for p in [&c.postscript1, &c.postscript2].into_iter().flatten() {
        out.push_str(p);
    }
    for mark in &syllable.marks {
        out.push_str(mark);
    }
    out
}

fn read_syllable(chars: &[char], allow_prescript: bool) -> Option<ReverseSyllable> {
    let tables = CharacterTables::global();
    let mut pos = 0;

    let first = *chars.first()?;
    if !unicode::is_base_consonant(first) {
        return None;
    }
    let first_key = tables.reverse_char(first)?.to_string();

    let mut prescript: Option<String> = None;
    let mut root: Option<String> = None;
    let mut root_subjoined = false;
    let mut needs_dot = false;

    if rules::is_prescript(&first_key) {
        match chars.get(1) {
            // Prefix before a base-form letter (gdams, dbang, g.yas).
            Some(&next) if unicode::is_base_consonant(next) && allow_prescript => {
                prescript = Some(first_key.clone());
                pos = 1;
            }
            // Base + subjoined where the pair is a legal prefix pairing
            // reads as prescript + stacked root (bla, bya, dra); this
            // mirrors the builder's stacking rule so components round-trip.
            Some(&next) if unicode::is_subjoined(next) => {
                if let Some((letter, used)) = subjoined_letter(tables, chars, 1) {
                    if matches!(letter.as_str(), "r" | "l" | "y" | "w")
                        && rules::prescript_allows(&first_key, &letter)
                    {
                        prescript = Some(first_key.clone());
                        root = Some(letter);
                        root_subjoined = true;
                        pos = 1 + used;
                    }
                }
            }
            _ => {}
        }
    }

    // Superscript: r/l/s above a subjoined root. A prescript already in
    // hand must be compatible with the stacked root, otherwise the cluster
    // reads as prescript + root + subscript instead (ག ས ྨ is g + s + m).
    let mut superscript: Option<String> = None;
    if root.is_none() {
        if let Some(&c) = chars.get(pos) {
            if unicode::is_base_consonant(c) {
                if let Some(key) = tables.reverse_char(c) {
                    if rules::is_superscript(key) {
                        if let Some((letter, _)) = subjoined_letter(tables, chars, pos + 1) {
                            let prefix_ok = prescript
                                .as_deref()
                                .map_or(true, |p| rules::prescript_allows(p, &letter));
                            if prefix_ok && rules::superscript_allows(key, &letter) {
                                superscript = Some(key.to_string());
                                pos += 1;
                            }
                        }
                    }
                }
            }
        }
    }

    // Root.
    if root.is_none() {
        let &c = chars.get(pos)?;
        if superscript.is_some() {
            let (letter, used) = subjoined_letter(tables, chars, pos)?;
            root = Some(letter);
            root_subjoined = true;
            pos += used;
        } else if unicode::is_base_consonant(c) {
            let (letter, used) = base_letter(tables, chars, pos)?;
            root = Some(letter);
            pos += used;
        } else {
            return None;
        }
    }
    let root = root?;
    // An incompatible prefix means this is not a prefixed syllable at all;
    // the caller falls back to the root-first reading.
    if let Some(p) = &prescript {
        if !rules::prescript_allows(p, &root) {
            return None;
        }
    }

    // Subscripts: subjoined letters beneath the root, at most two.
    let mut subscripts: Vec<String> = Vec::new();
    while subscripts.len() < 2 {
        let Some(&c) = chars.get(pos) else { break };
        if !unicode::is_subjoined(c) {
            break;
        }
        let Some(key) = tables.reverse_char(c) else { break };
        if !rules::is_subscript(key) {
            break;
        }
        subscripts.push(key.to_string());
        pos += 1;
    }
    let subscript = match subscripts.len() {
        0 => None,
        1 => Some(subscripts.remove(0)),
        _ => Some(subscripts.join("+")),
    };

    // Vowel: compound signs first (ཱུ is U), then single signs.
    let mut vowel = "a".to_string();
    if let Some(&c) = chars.get(pos) {
        if unicode::is_vowel_sign(c) {
            let compound: Option<&str> = chars.get(pos + 1).and_then(|&n| {
                let pair: String = [c, n].iter().collect();
                tables.reverse_lookup(&pair)
            });
            if let Some(key) = compound {
                vowel = key.to_string();
                pos += 2;
            } else if let Some(key) = tables.reverse_char(c) {
                vowel = key.to_string();
                pos += 1;
            }
        }
    }

    // Postscripts: trailing base consonants, capped at two, each validated
    // against the suffix sets; anything else starts the next syllable.
    let mut postscript1: Option<String> = None;
    let mut postscript2: Option<String> = None;
    for slot in 0..2 {
        let Some(&c) = chars.get(pos) else { break };
        if !unicode::is_base_consonant(c) {
            break;
        }
        let Some(key) = tables.reverse_char(c) else { break };
        let legal = match slot {
            0 => rules::is_postscript1(key),
            _ => rules::is_postscript2(key),
        };
        if !legal {
            break;
        }
        if slot == 0 {
            postscript1 = Some(key.to_string());
        } else {
            postscript2 = Some(key.to_string());
        }
        pos += 1;
    }

    // Sanskrit marks.
    let mut marks: Vec<String> = Vec::new();
    while let Some(&c) = chars.get(pos) {
        if !unicode::is_sanskrit_mark(c) {
            break;
        }
        let Some(key) = tables.reverse_char(c) else { break };
        marks.push(key.to_string());
        pos += 1;
    }

    if let (Some(p), false) = (&prescript, root_subjoined) {
        needs_dot = rules::prescript_stacks(p, &root);
    }

    Some(ReverseSyllable {
        components: SyllableComponents {
            root,
            prescript,
            superscript,
            subscript,
            vowel,
            postscript1,
            postscript2,
        },
        marks,
        consumed: pos,
        needs_dot,
    })
}

/// The ASCII letter for the base consonant at `pos`, merging the
/// NFC-decomposed Sanskrit pairs (ག + ྷ is gh, ཀ + ྵ is kss).
fn base_letter(
    tables: &CharacterTables,
    chars: &[char],
    pos: usize,
) -> Option<(String, usize)> {
    let c = *chars.get(pos)?;
    if let Some(merged) = merge_sanskrit(c, chars.get(pos + 1).copied()) {
        return Some((merged.to_string(), 2));
    }
    tables.reverse_char(c).map(|k| (k.to_string(), 1))
}

/// The ASCII letter for the subjoined consonant at `pos`, with the same
/// Sanskrit merging in subjoined form.
fn subjoined_letter(
    tables: &CharacterTables,
    chars: &[char],
    pos: usize,
) -> Option<(String, usize)> {
    let c = *chars.get(pos)?;
    if !unicode::is_subjoined(c) {
        return None;
    }
    if let Some(merged) = merge_sanskrit(c, chars.get(pos + 1).copied()) {
        return Some((merged.to_string(), 2));
    }
    tables.reverse_char(c).map(|k| (k.to_string(), 1))
}

/// NFC decomposes the composition-excluded Sanskrit letters; read the
/// two-character forms back as their single EWTS token.
fn merge_sanskrit(c: char, next: Option<char>) -> Option<&'static str> {
    match (c, next?) {
        ('\u{0F42}', '\u{0FB7}') => Some("gh"),
        ('\u{0F51}', '\u{0FB7}') => Some("dh"),
        ('\u{0F56}', '\u{0FB7}') => Some("bh"),
        ('\u{0F5B}', '\u{0FB7}') => Some("dzh"),
        ('\u{0F4C}', '\u{0FB7}') => Some("Dha"),
        ('\u{0F40}', '\u{0FB5}') => Some("kss"),
        ('\u{0F92}', '\u{0FB7}') => Some("gh"),
        ('\u{0FA1}', '\u{0FB7}') => Some("dh"),
        ('\u{0FA6}', '\u{0FB7}') => Some("bh"),
        ('\u{0FAB}', '\u{0FB7}') => Some("dzh"),
        ('\u{0F9C}', '\u{0FB7}') => Some("Dha"),
        ('\u{0F90}', '\u{0FB5}') => Some("kss"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build_syllable;
    use crate::parser::parse_syllable;

    fn roundtrip(token: &str) -> ReverseSyllable {
        let forward = parse_syllable(token).unwrap();
        let built = build_syllable(&forward);
        let chars: Vec<char> = built.chars().collect();
        let back = parse_unicode_syllable(&chars).unwrap();
        assert_eq!(back.consumed, chars.len(), "partial reverse for {token}");
        back
    }

    fn rt_wylie(token: &str) -> String {
        assemble_wylie(&roundtrip(token))
    }

    #[test]
    fn test_simple_roundtrip() {
        assert_eq!(rt_wylie("ka"), "ka");
        assert_eq!(rt_wylie("ki"), "ki");
        assert_eq!(rt_wylie("khams"), "khams");
    }

    #[test]
    fn test_components_roundtrip() {
        for token in ["bla", "bsgrubs", "grwa", "dza", "rka", "sla", "khyab", "om"] {
            let forward = parse_syllable(token).unwrap();
            let back = roundtrip(token);
            assert_eq!(back.components, forward, "components differ for {token}");
        }
    }

    #[test]
    fn test_prefix_vs_root_disambiguation() {
        // root-first on ties: དག is dag
        let dag: Vec<char> = "\u{0F51}\u{0F42}".chars().collect();
        assert_eq!(assemble_wylie(&parse_unicode_syllable(&dag).unwrap()), "dag");
        // prefix reading when a suffix cannot explain the cluster: དཀར
        let dkar: Vec<char> = "\u{0F51}\u{0F40}\u{0F62}".chars().collect();
        assert_eq!(assemble_wylie(&parse_unicode_syllable(&dkar).unwrap()), "dkar");
        // vowel after the second base forces the prefix reading: དགོན
        let dgon: Vec<char> = "\u{0F51}\u{0F42}\u{0F7C}\u{0F53}".chars().collect();
        assert_eq!(assemble_wylie(&parse_unicode_syllable(&dgon).unwrap()), "dgon");
    }

    #[test]
    fn test_gyas_needs_dot() {
        // base ག before base ཡ: the stackable pair written unstacked
        let gyas: Vec<char> = "\u{0F42}\u{0F61}\u{0F66}".chars().collect();
        assert_eq!(assemble_wylie(&parse_unicode_syllable(&gyas).unwrap()), "g.yas");
        // the stacked form reads without the dot
        assert_eq!(rt_wylie("gyas"), "gyas");
    }

    #[test]
    fn test_vowel_initial() {
        let om: Vec<char> = "\u{0F68}\u{0F7C}\u{0F58}".chars().collect();
        assert_eq!(assemble_wylie(&parse_unicode_syllable(&om).unwrap()), "om");
    }

    #[test]
    fn test_compound_vowel_and_mark() {
        // ཧ + ཱ + ུ + ྃ : hUM with the sna ldan anusvara
        let hum: Vec<char> = "\u{0F67}\u{0F71}\u{0F74}\u{0F83}".chars().collect();
        assert_eq!(assemble_wylie(&parse_unicode_syllable(&hum).unwrap()), "hUM");
    }

    #[test]
    fn test_decomposed_sanskrit_merges() {
        // NFC form of gha
        let gha: Vec<char> = "\u{0F42}\u{0FB7}".chars().collect();
        let s = parse_unicode_syllable(&gha).unwrap();
        assert_eq!(s.components.root, "gh");
        assert_eq!(assemble_wylie(&s), "gha");
        // kss in decomposed form
        let kss: Vec<char> = "\u{0F40}\u{0FB5}\u{0F72}".chars().collect();
        assert_eq!(assemble_wylie(&parse_unicode_syllable(&kss).unwrap()), "kssi");
    }

    #[test]
    fn test_retroflex_keeps_capital_spelling() {
        let tti: Vec<char> = "\u{0F4A}\u{0F72}".chars().collect();
        let s = parse_unicode_syllable(&tti).unwrap();
        assert_eq!(s.components.root, "Ta");
        assert_eq!(assemble_wylie(&s), "Tai");
        // the shorthand spelling parses back to the same record
        assert_eq!(
            crate::parser::parse_syllable(&crate::normalize::normalize("Ti")).unwrap(),
            s.components
        );
    }

    #[test]
    fn test_postscript_validation_splits_syllables() {
        // ཀཀ cannot be one syllable (k is no suffix): two bare syllables
        let kaka: Vec<char> = "\u{0F40}\u{0F40}".chars().collect();
        let first = parse_unicode_syllable(&kaka).unwrap();
        assert_eq!(first.consumed, 1);
        assert_eq!(assemble_wylie(&first), "ka");
    }

    #[test]
    fn test_stranded_subjoined_is_failure() {
        let orphan: Vec<char> = "\u{0FB2}".chars().collect();
        assert!(parse_unicode_syllable(&orphan).is_none());
    }
}
