use crate::convert::*;

#[test]
fn test_retroflex_capitals() {
    assert_eq!(ewts_to_unicode("Ta"), "\u{0F4A}");
    assert_eq!(ewts_to_unicode("Tha"), "\u{0F4B}");
    assert_eq!(ewts_to_unicode("Da"), "\u{0F4C}");
    assert_eq!(ewts_to_unicode("Na"), "\u{0F4E}");
    assert_eq!(ewts_to_unicode("Sha"), "\u{0F65}");
}

#[test]
fn test_retroflex_shorthand_with_vowel() {
    // Ni normalizes to retroflex NNA + i
    assert_eq!(ewts_to_unicode("Ni"), "\u{0F4E}\u{0F72}");
    assert_eq!(ewts_to_unicode("Thi"), "\u{0F4B}\u{0F72}");
}

#[test]
fn test_lowercase_retroflex_spellings() {
    assert_eq!(ewts_to_unicode("tta"), "\u{0F4A}");
    assert_eq!(ewts_to_unicode("nna"), "\u{0F4E}");
}

#[test]
fn test_voiced_aspirates_build_decomposed() {
    // composition-excluded letters come out of NFC as base + subjoined ha
    assert_eq!(ewts_to_unicode("gha"), "\u{0F42}\u{0FB7}");
    assert_eq!(ewts_to_unicode("dha"), "\u{0F51}\u{0FB7}");
    assert_eq!(ewts_to_unicode("bha"), "\u{0F56}\u{0FB7}");
}

#[test]
fn test_kssa() {
    assert_eq!(ewts_to_unicode("kss"), "\u{0F40}\u{0FB5}");
}

#[test]
fn test_anusvara_default() {
    // oM takes the plain anusvara
    assert_eq!(ewts_to_unicode("oM"), "\u{0F68}\u{0F7C}\u{0F7E}");
}

#[test]
fn test_anusvara_after_long_u() {
    // after the compound vowel of U the anusvara takes the sna ldan form
    assert_eq!(
        ewts_to_unicode("hUM"),
        "\u{0F67}\u{0F71}\u{0F74}\u{0F83}"
    );
}

#[test]
fn test_explicit_sna_ldan() {
    assert_eq!(ewts_to_unicode("ka~M"), "\u{0F40}\u{0F83}");
}

#[test]
fn test_visarga() {
    assert_eq!(ewts_to_unicode("aH"), "\u{0F68}\u{0F7F}");
}

#[test]
fn test_long_vowels() {
    assert_eq!(ewts_to_unicode("kA"), "\u{0F40}\u{0F71}");
    assert_eq!(ewts_to_unicode("kI"), "\u{0F40}\u{0F71}\u{0F72}");
    assert_eq!(ewts_to_unicode("kU"), "\u{0F40}\u{0F71}\u{0F74}");
}

#[test]
fn test_reversed_vowels() {
    assert_eq!(ewts_to_unicode("k-i"), "\u{0F40}\u{0F80}");
    assert_eq!(ewts_to_unicode("k-I"), "\u{0F40}\u{0F71}\u{0F80}");
}

#[test]
fn test_diphthongs() {
    assert_eq!(ewts_to_unicode("kai"), "\u{0F40}\u{0F7B}");
    assert_eq!(ewts_to_unicode("kau"), "\u{0F40}\u{0F7D}");
}

#[test]
fn test_om_mani_padme_hum() {
    let out = ewts_to_unicode("oM ma Ni pad me hUM");
    assert!(out.starts_with("\u{0F68}\u{0F7C}\u{0F7E}"));
    assert!(out.ends_with("\u{0F67}\u{0F71}\u{0F74}\u{0F83}"));
}
