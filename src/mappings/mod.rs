//! EWTS <-> Tibetan Unicode character tables.
//!
//! The tables are data, not code: they live in an embedded TOML file, are
//! parsed once into a process-lifetime singleton, and can be replaced with
//! `CharacterTables::init_custom` before the first `global()` call.
//! Forward lookups are ASCII token -> code points; the reverse map is
//! derived at load time under a documented disambiguation policy (prefer
//! the canonical EWTS spelling: lowercase plain consonants, capitalized
//! retroflexes, `w` over `v`, `M` for both anusvara signs).

mod config;

pub use config::MappingConfigError;

use std::collections::BTreeMap;
use std::sync::OnceLock;

use config::{parse_mappings_toml, MappingConfig};

pub const DEFAULT_TOML: &str = include_str!("default_mappings.toml");

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

pub struct CharacterTables {
    consonants: BTreeMap<String, String>,
    subjoined: BTreeMap<String, String>,
    vowels: BTreeMap<String, String>,
    subscripts: BTreeMap<String, String>,
    punctuation: BTreeMap<String, String>,
    numerals: BTreeMap<String, String>,
    marks: BTreeMap<String, String>,
    // Key lists sorted longest-first for greedy prefix matching.
    consonant_keys: Vec<String>,
    vowel_keys: Vec<String>,
    subscript_keys: Vec<String>,
    punctuation_keys: Vec<String>,
    mark_keys: Vec<String>,
    // Unicode sequence -> canonical ASCII token, all tables combined.
    reverse: BTreeMap<String, String>,
}

fn sorted_keys(map: &BTreeMap<String, String>) -> Vec<String> {
    let mut keys: Vec<String> = map.keys().cloned().collect();
    keys.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    keys
}

/// Longest key of `keys` that prefixes `text`, with its mapped value.
fn match_prefix<'t>(
    text: &str,
    keys: &'t [String],
    map: &'t BTreeMap<String, String>,
) -> Option<(&'t str, &'t str)> {
    keys.iter()
        .find(|k| text.starts_with(k.as_str()))
        .map(|k| (k.as_str(), map[k.as_str()].as_str()))
}

impl CharacterTables {
    /// Set custom TOML before the first `global()` call.
    pub fn init_custom(toml_content: String) -> Result<(), MappingConfigError> {
        // Validate eagerly
        parse_mappings_toml(&toml_content)?;
        CUSTOM_TOML
            .set(toml_content)
            .map_err(|_| MappingConfigError::AlreadyInitialized)
    }

    /// Get or initialize the global singleton.
    pub fn global() -> &'static CharacterTables {
        static INSTANCE: OnceLock<CharacterTables> = OnceLock::new();
        INSTANCE.get_or_init(|| {
            let toml_str = CUSTOM_TOML
                .get()
                .map(|s| s.as_str())
                .unwrap_or(DEFAULT_TOML);
            let config = parse_mappings_toml(toml_str).expect("mappings TOML must be valid");
            CharacterTables::from_config(config)
        })
    }

    fn from_config(config: MappingConfig) -> Self {
        let MappingConfig {
            consonants,
            subjoined,
            vowels,
            subscripts,
            punctuation,
            numerals,
            marks,
        } = config;

        let mut reverse: BTreeMap<String, String> = BTreeMap::new();
        // BTreeMap iteration is key-sorted, so capitalized retroflex keys
        // ("Ta" < "tt") and the shorter shad spellings win under
        // first-insertion-wins, which is exactly the documented policy.
        for map in [
            &consonants,
            &subjoined,
            &vowels,
            &subscripts,
            &punctuation,
            &numerals,
            &marks,
        ] {
            for (ascii, uni) in map {
                if uni.is_empty() {
                    continue;
                }
                reverse.entry(uni.clone()).or_insert_with(|| ascii.clone());
            }
        }
        // Policy overrides where sort order alone picks the wrong spelling.
        reverse.insert("\u{0FAD}".into(), "w".into()); // never `v`
        reverse.insert("\u{0F83}".into(), "M".into()); // sna ldan reads as anusvara
        // Precomposed long vowels normalize-decompose; accept both forms.
        reverse.insert("\u{0F73}".into(), "I".into());
        reverse.insert("\u{0F75}".into(), "U".into());
        reverse.insert("\u{0F81}".into(), "-I".into());

        let consonant_keys = sorted_keys(&consonants);
        let vowel_keys = sorted_keys(&vowels);
        let subscript_keys = sorted_keys(&subscripts);
        let punctuation_keys = sorted_keys(&punctuation);
        let mark_keys = sorted_keys(&marks);

        CharacterTables {
            consonants,
            subjoined,
            vowels,
            subscripts,
            punctuation,
            numerals,
            marks,
            consonant_keys,
            vowel_keys,
            subscript_keys,
            punctuation_keys,
            mark_keys,
            reverse,
        }
    }

    pub fn consonant(&self, key: &str) -> Option<&str> {
        self.consonants.get(key).map(String::as_str)
    }

    pub fn subjoined_consonant(&self, key: &str) -> Option<&str> {
        self.subjoined.get(key).map(String::as_str)
    }

    pub fn vowel(&self, key: &str) -> Option<&str> {
        self.vowels.get(key).map(String::as_str)
    }

    pub fn subscript(&self, key: &str) -> Option<&str> {
        self.subscripts.get(key).map(String::as_str)
    }

    pub fn numeral(&self, key: &str) -> Option<&str> {
        self.numerals.get(key).map(String::as_str)
    }

    pub fn is_consonant_key(&self, key: &str) -> bool {
        self.consonants.contains_key(key)
    }

    /// Longest consonant token at the start of `text`.
    pub fn match_consonant(&self, text: &str) -> Option<(&str, &str)> {
        match_prefix(text, &self.consonant_keys, &self.consonants)
    }

    /// Longest vowel token at the start of `text`.
    pub fn match_vowel(&self, text: &str) -> Option<(&str, &str)> {
        match_prefix(text, &self.vowel_keys, &self.vowels)
    }

    /// Longest subscript letter at the start of `text`.
    pub fn match_subscript(&self, text: &str) -> Option<(&str, &str)> {
        match_prefix(text, &self.subscript_keys, &self.subscripts)
    }

    /// Longest punctuation token at the start of `text`.
    pub fn match_punctuation(&self, text: &str) -> Option<(&str, &str)> {
        match_prefix(text, &self.punctuation_keys, &self.punctuation)
    }

    /// Longest Sanskrit mark at the start of `text`.
    pub fn match_mark(&self, text: &str) -> Option<(&str, &str)> {
        match_prefix(text, &self.mark_keys, &self.marks)
    }

    /// True when `text` starts with a multi-letter consonant token.
    ///
    /// This is the lookahead that stops a leading `d` from being peeled off
    /// `dza` as a prescript: the two-letter root reading must win.
    pub fn starts_with_multichar_consonant(&self, text: &str) -> bool {
        self.match_consonant(text)
            .is_some_and(|(key, _)| key.len() >= 2)
    }

    /// Canonical ASCII token for a Unicode sequence, per the reverse policy.
    pub fn reverse_lookup(&self, unicode: &str) -> Option<&str> {
        self.reverse.get(unicode).map(String::as_str)
    }

    /// Canonical ASCII token for a single code point.
    pub fn reverse_char(&self, c: char) -> Option<&str> {
        self.reverse_lookup(c.encode_utf8(&mut [0u8; 4]))
    }

    /// Every ASCII character that occurs in some mapping key. The validator
    /// uses this as the character inventory for unknown-character reporting.
    pub fn key_chars(&self) -> impl Iterator<Item = char> + '_ {
        [
            &self.consonants,
            &self.vowels,
            &self.subscripts,
            &self.punctuation,
            &self.numerals,
            &self.marks,
        ]
        .into_iter()
        .flat_map(|m| m.keys())
        .flat_map(|k| k.chars())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_lookups() {
        let t = CharacterTables::global();
        assert_eq!(t.consonant("k"), Some("\u{0F40}"));
        assert_eq!(t.consonant("tsh"), Some("\u{0F5A}"));
        assert_eq!(t.vowel("i"), Some("\u{0F72}"));
        assert_eq!(t.vowel("a"), Some(""));
        assert_eq!(t.subscript("y"), Some("\u{0FB1}"));
        assert_eq!(t.subscript("m"), Some("\u{0FA8}"));
        assert_eq!(t.numeral("7"), Some("\u{0F27}"));
    }

    #[test]
    fn longest_match_prefers_tsh_over_ts() {
        let t = CharacterTables::global();
        assert_eq!(t.match_consonant("tsha"), Some(("tsh", "\u{0F5A}")));
        assert_eq!(t.match_consonant("tsa"), Some(("ts", "\u{0F59}")));
    }

    #[test]
    fn multichar_lookahead() {
        let t = CharacterTables::global();
        assert!(t.starts_with_multichar_consonant("dza"));
        assert!(t.starts_with_multichar_consonant("gha"));
        assert!(!t.starts_with_multichar_consonant("da"));
        assert!(!t.starts_with_multichar_consonant("bsgrubs"));
    }

    #[test]
    fn punctuation_double_shad_before_single() {
        let t = CharacterTables::global();
        assert_eq!(t.match_punctuation("// rest"), Some(("//", "\u{0F0E}")));
        assert_eq!(t.match_punctuation("/ rest"), Some(("/", "\u{0F0D}")));
        assert_eq!(t.match_punctuation("|"), Some(("|", "\u{0F0B}")));
    }

    #[test]
    fn reverse_policy() {
        let t = CharacterTables::global();
        // lowercase plain consonants
        assert_eq!(t.reverse_char('\u{0F40}'), Some("k"));
        // capitalized retroflex spelling
        assert_eq!(t.reverse_char('\u{0F4A}'), Some("Ta"));
        assert_eq!(t.reverse_char('\u{0F65}'), Some("Sha"));
        // w over v
        assert_eq!(t.reverse_char('\u{0FAD}'), Some("w"));
        // both anusvara code points read as M
        assert_eq!(t.reverse_char('\u{0F7E}'), Some("M"));
        assert_eq!(t.reverse_char('\u{0F83}'), Some("M"));
        // compound vowels, composed and decomposed
        assert_eq!(t.reverse_lookup("\u{0F71}\u{0F74}"), Some("U"));
        assert_eq!(t.reverse_char('\u{0F75}'), Some("U"));
        // shad family
        assert_eq!(t.reverse_char('\u{0F0D}'), Some("/"));
        assert_eq!(t.reverse_char('\u{0F0E}'), Some("//"));
    }
}
