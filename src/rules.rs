//! Legal syllable-position combinations for standard EWTS orthography.
//!
//! These tables answer "may letter X occupy position P next to root R", for
//! the checked parser, the builder's stacking decision, and the validator's
//! diagnostics. Unlike the character tables they are fixed orthography, so
//! they live in code.

pub const PRESCRIPTS: [&str; 5] = ["g", "d", "b", "m", "'"];
pub const SUPERSCRIPTS: [&str; 3] = ["r", "l", "s"];
pub const SUBSCRIPTS: [&str; 5] = ["r", "l", "y", "w", "m"];
/// Longest-first, so `ng` wins over `n` when matching a suffix.
pub const POSTSCRIPTS: [&str; 10] = ["ng", "g", "d", "n", "b", "m", "r", "l", "s", "'"];
pub const SECOND_POSTSCRIPTS: [&str; 2] = ["s", "d"];

/// Roots a prescript may precede. Single-letter roots from {r, l, y, w}
/// listed here are the pairs the parser reads as prescript+root and the
/// builder renders as a stack (bla, bya, dra, mya, ...).
pub fn prescript_roots(prescript: &str) -> &'static [&'static str] {
    match prescript {
        "g" => &["c", "ny", "t", "d", "n", "ts", "zh", "z", "y", "sh", "s"],
        "d" => &["k", "g", "ng", "p", "b", "m", "r", "w"],
        "b" => &["k", "g", "c", "t", "d", "ts", "zh", "z", "sh", "s", "l", "r", "y"],
        "m" => &["kh", "g", "ng", "ch", "j", "ny", "th", "d", "n", "tsh", "dz", "y"],
        "'" => &["kh", "g", "ch", "j", "th", "d", "ph", "b", "tsh", "dz"],
        _ => &[],
    }
}

/// Roots a superscript may sit above.
pub fn superscript_roots(superscript: &str) -> &'static [&'static str] {
    match superscript {
        "r" => &["k", "g", "ng", "j", "ny", "t", "d", "n", "b", "m", "ts", "dz"],
        "l" => &["k", "g", "ng", "c", "j", "t", "d", "p", "b", "h"],
        "s" => &["k", "g", "ng", "ny", "t", "d", "n", "p", "b", "m", "ts"],
        _ => &[],
    }
}

/// The lowercase Sanskrit retroflex spellings are aliases of the
/// capitalized keys; rules and components use the capitalized form.
pub fn canonical_root(root: &str) -> &str {
    match root {
        "tt" => "Ta",
        "tth" => "Tha",
        "dd" => "Da",
        "ddh" => "Dha",
        "nn" => "Na",
        "ss" => "Sha",
        other => other,
    }
}

/// Roots a subscript may sit beneath.
pub fn subscript_roots(subscript: &str) -> &'static [&'static str] {
    match subscript {
        "r" => &[
            "k", "kh", "g", "t", "th", "d", "p", "ph", "b", "m", "s", "h", "Ta", "Tha", "Da",
            "Dha",
        ],
        "l" => &["k", "g", "b", "r", "s", "z"],
        "y" => &["k", "kh", "g", "p", "ph", "b", "m", "s", "h"],
        "w" => &[
            "k", "kh", "g", "c", "ny", "t", "th", "d", "ts", "tsh", "zh", "z", "s", "r", "l",
            "sh", "h",
        ],
        // Mantra subscript, permissive by design.
        "m" => &[
            "k", "kh", "g", "ng", "c", "ch", "j", "ny", "t", "th", "d", "n", "p", "ph", "b",
            "m", "ts", "tsh", "dz", "w", "zh", "z", "s", "h", "r", "l", "sh",
        ],
        _ => &[],
    }
}

/// Roots that may carry the double subscript `first`+`second`.
/// Anything not listed is an illegal pairing.
pub fn double_subscript_roots(first: &str, second: &str) -> &'static [&'static str] {
    match (first, second) {
        ("r", "w") => &["g", "d"], // grwa, drwa
        ("y", "w") => &["ph"],     // phywa
        ("r", "l") => &["k"],
        _ => &[],
    }
}

pub fn is_prescript(letter: &str) -> bool {
    PRESCRIPTS.contains(&letter)
}

pub fn is_superscript(letter: &str) -> bool {
    SUPERSCRIPTS.contains(&letter)
}

pub fn is_subscript(letter: &str) -> bool {
    SUBSCRIPTS.contains(&letter)
}

pub fn is_postscript1(letter: &str) -> bool {
    POSTSCRIPTS.contains(&letter)
}

pub fn is_postscript2(letter: &str) -> bool {
    SECOND_POSTSCRIPTS.contains(&letter)
}

pub fn prescript_allows(prescript: &str, root: &str) -> bool {
    prescript_roots(prescript).contains(&root)
}

pub fn superscript_allows(superscript: &str, root: &str) -> bool {
    superscript_roots(superscript).contains(&root)
}

pub fn subscript_allows(subscript: &str, root: &str) -> bool {
    subscript_roots(subscript).contains(&root)
}

pub fn double_subscript_allows(first: &str, second: &str, root: &str) -> bool {
    double_subscript_roots(first, second).contains(&root)
}

/// True when prescript+root render as a vertical stack rather than side by
/// side: the root letter is one that can act as a subscript beneath the
/// prescript letter (bla, bya, dra), as opposed to a plain prefix (gdams).
pub fn prescript_stacks(prescript: &str, root: &str) -> bool {
    matches!(root, "r" | "l" | "y" | "w") && subscript_roots(root).contains(&prescript)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prescript_combinations() {
        assert!(prescript_allows("g", "d")); // gdams
        assert!(prescript_allows("b", "l")); // bla
        assert!(prescript_allows("d", "b")); // dbang
        assert!(!prescript_allows("g", "k")); // gka is illegal
        assert!(!prescript_allows("g", "r")); // gra is a stack, not a prefix
        assert!(!prescript_allows("d", "z")); // dza is a single root
    }

    #[test]
    fn test_superscript_combinations() {
        assert!(superscript_allows("r", "k"));
        assert!(superscript_allows("s", "g"));
        assert!(superscript_allows("l", "t")); // lta
        assert!(!superscript_allows("r", "w")); // rwa is root + wa-zur
        assert!(!superscript_allows("s", "l")); // sla is root + la-btags
    }

    #[test]
    fn test_subscript_combinations() {
        assert!(subscript_allows("l", "b")); // bla
        assert!(subscript_allows("r", "m")); // smra
        assert!(subscript_allows("w", "g")); // grwa tail
        assert!(!subscript_allows("l", "m"));
    }

    #[test]
    fn test_double_subscripts() {
        assert!(double_subscript_allows("r", "w", "g"));
        assert!(double_subscript_allows("r", "w", "d"));
        assert!(!double_subscript_allows("r", "w", "k"));
        assert!(!double_subscript_allows("w", "r", "g"));
    }

    #[test]
    fn test_stacking_prescripts() {
        assert!(prescript_stacks("b", "l")); // bla renders as a stack
        assert!(prescript_stacks("b", "y")); // bya
        assert!(prescript_stacks("d", "r")); // dra
        assert!(!prescript_stacks("g", "d")); // gdams renders side by side
        assert!(!prescript_stacks("d", "b")); // dbang renders side by side
    }
}
