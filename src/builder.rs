//! Renders parsed syllable components as Tibetan Unicode.

use unicode_normalization::UnicodeNormalization;

use crate::mappings::CharacterTables;
use crate::rules;
use crate::syllable::SyllableComponents;

/// Build the Unicode form of one syllable.
///
/// Order is fixed: prescript, superscript, root, subscripts, vowel sign,
/// postscripts. The root takes its subjoined form beneath a superscript or
/// after a stacking prescript (bla, bya, dra); the inherent vowel `a` is
/// never written. The result is NFC-normalized so it canonicalizes exactly
/// as the reverse parser consumes it.
///
/// The parser only emits components whose tokens exist in the tables, so a
/// missing entry here is an internal-consistency fault, not an input error.
pub fn build_syllable(components: &SyllableComponents) -> String {
    let tables = CharacterTables::global();
    let mut out = String::new();

    if let Some(prescript) = &components.prescript {
        out.push_str(
            tables
                .consonant(prescript)
                .expect("prescript must exist in the consonant table"),
        );
    }

    if let Some(superscript) = &components.superscript {
        out.push_str(
            tables
                .consonant(superscript)
                .expect("superscript must exist in the consonant table"),
        );
    }

    let stacked = components.superscript.is_some()
        || components
            .prescript
            .as_deref()
            .is_some_and(|p| rules::prescript_stacks(p, &components.root));
    let root_form = if stacked {
        tables.subjoined_consonant(&components.root)
    } else {
        tables.consonant(&components.root)
    };
    out.push_str(root_form.expect("root must exist in the consonant tables"));

    for letter in components.subscript_letters() {
        out.push_str(
            tables
                .subscript(letter)
                .expect("subscript must exist in the subscript table"),
        );
    }

    if components.has_explicit_vowel() {
        out.push_str(
            tables
                .vowel(&components.vowel)
                .expect("vowel must exist in the vowel table"),
        );
    }

    for postscript in [&components.postscript1, &components.postscript2]
        .into_iter()
        .flatten()
    {
        out.push_str(
            tables
                .consonant(postscript)
                .expect("postscript must exist in the consonant table"),
        );
    }

    out.nfc().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_syllable;

    fn build(token: &str) -> String {
        build_syllable(&parse_syllable(token).unwrap())
    }

    #[test]
    fn test_bare_root() {
        assert_eq!(build("ka"), "\u{0F40}");
        assert_eq!(build("ki"), "\u{0F40}\u{0F72}");
        assert_eq!(build("ku"), "\u{0F40}\u{0F74}");
    }

    #[test]
    fn test_inherent_vowel_unwritten() {
        assert!(!build("ka").contains('\u{0F71}'));
        assert_eq!(build("ka").chars().count(), 1);
    }

    #[test]
    fn test_bla_stacks() {
        // full BA + subjoined LA
        assert_eq!(build("bla"), "\u{0F56}\u{0FB3}");
    }

    #[test]
    fn test_gdams_does_not_stack() {
        // plain prefix: both letters in full form
        assert_eq!(build("gdams"), "\u{0F42}\u{0F51}\u{0F58}\u{0F66}");
    }

    #[test]
    fn test_bsgrubs_all_positions() {
        assert_eq!(
            build("bsgrubs"),
            "\u{0F56}\u{0F66}\u{0F92}\u{0FB2}\u{0F74}\u{0F56}\u{0F66}"
        );
    }

    #[test]
    fn test_grwa_double_subscript_order() {
        assert_eq!(build("grwa"), "\u{0F42}\u{0FB2}\u{0FAD}");
    }

    #[test]
    fn test_superscript_subjoins_root() {
        assert_eq!(build("rka"), "\u{0F62}\u{0F90}");
        assert_eq!(build("sgo"), "\u{0F66}\u{0F92}\u{0F7C}");
    }

    #[test]
    fn test_standalone_vowel() {
        // implicit a root carries the vowel sign
        assert_eq!(build("om"), "\u{0F68}\u{0F7C}\u{0F58}");
    }

    #[test]
    fn test_long_vowel_compound() {
        assert_eq!(build("hU"), "\u{0F67}\u{0F71}\u{0F74}");
    }

    #[test]
    fn test_nfc_decomposes_sanskrit_aspirates() {
        // U+0F43 is composition-excluded; NFC yields base + subjoined ha
        assert_eq!(build("gha"), "\u{0F42}\u{0FB7}");
    }
}
