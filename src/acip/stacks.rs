//! Standard-stack classification for ACIP consonant clusters.
//!
//! ACIP writes stacks with no separator, while EWTS needs `+` between the
//! members of any stack that is not native Tibetan orthography. The pattern
//! lists every native initial cluster (optionally carrying subscript
//! letters); anything else gets `+` inserted between its letters.

use std::sync::OnceLock;

use regex::Regex;

static STACK_PATTERN: OnceLock<Regex> = OnceLock::new();
static CLUSTER_BEFORE_VOWEL: OnceLock<Regex> = OnceLock::new();

fn stack_pattern() -> &'static Regex {
    STACK_PATTERN.get_or_init(|| {
        Regex::new(
            "(?i)^([bcdgjklm'npstzhSDTN]|bgl|dm|sm|sn|kl|dk|bk|bkl|rk|lk|sk|brk|bsk|kh|mkh|'kh|\
             gl|dg|bg|mg|'g|rg|lg|sg|brg|bsg|ng|dng|mng|rng|lng|sng|brng|bsng|gc|bc|lc|\
             ch|mch|'ch|mj|'j|rj|lj|brj|ny|gny|mny|rny|sny|brny|bsny|gt|bt|rt|lt|st|brt|\
             blt|bst|th|mth|'th|gd|bd|md|'d|rd|ld|sd|brd|bld|bsd|gn|mn|rn|brn|bsn|dp|lp|\
             sp|ph|'ph|bl|db|'b|rb|lb|sb|rm|ts|gts|bts|rts|sts|brts|bsts|tsh|mtsh|'tsh|\
             dz|mdz|'dz|rdz|brdz|zh|gzh|bzh|zl|gz|bz|bzl|rl|brl|sh|gsh|bsh|sl|gs|bs|bsl|lh)\
             [rwy]*$",
        )
        .expect("stack pattern must compile")
    })
}

/// Initial clusters that are a prefix letter fused onto a stack; when a
/// non-standard cluster starts with one of these the `+` signs begin after
/// the prefix.
const PREFIXED_STACKS: [&str; 75] = [
    "bg", "dm", "dk", "bk", "brk", "bsk", "mkh", "'kh", "dg", "mg", "'g", "brg", "bsg", "dng",
    "mng", "brng", "bsng", "gc", "bc", "ch", "mch", "'ch", "mj", "'j", "brj", "gny", "mny",
    "brny", "bsny", "gt", "bt", "brt", "blt", "bst", "mth", "'th", "gd", "bd", "md", "'d",
    "brd", "bld", "bsd", "gn", "mn", "brn", "bsn", "dp", "ph", "'ph", "bl", "db", "'b", "gts",
    "bts", "brts", "bsts", "tsh", "mtsh", "'tsh", "mdz", "'dz", "brdz", "gzh", "bzh", "gz",
    "bz", "bzl", "brl", "gsh", "bsh", "gs", "bs", "bsl", "lh",
];

const MULTI_TOKENS: [&str; 12] = [
    "tsh", "zh", "ny", "dz", "ts", "ch", "ph", "th", "sh", "Sh", "kh", "ng",
];

pub(crate) fn is_standard_stack(cluster: &str) -> bool {
    stack_pattern().is_match(cluster)
}

/// Split a consonant cluster into letter tokens, longest first.
fn tokenize(cluster: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut rest = cluster;
    while !rest.is_empty() {
        if let Some(token) = MULTI_TOKENS.iter().find(|t| rest.starts_with(**t)) {
            tokens.push(&rest[..token.len()]);
            rest = &rest[token.len()..];
        } else {
            let len = rest.chars().next().map_or(1, char::len_utf8);
            tokens.push(&rest[..len]);
            rest = &rest[len..];
        }
    }
    tokens
}

/// Insert `+` into non-standard consonant clusters that precede a vowel.
pub(crate) fn add_stack_separators(text: &str) -> String {
    let cluster_re = CLUSTER_BEFORE_VOWEL.get_or_init(|| {
        Regex::new("([bcdgjklm'nprstwyzhSDTN+]+)([aeiouAEIOU.-])")
            .expect("cluster pattern must compile")
    });

    cluster_re
        .replace_all(text, |caps: &regex::Captures<'_>| {
            let cluster = &caps[1];
            let vowel = &caps[2];
            // explicit + already marks the stack
            if cluster.contains('+') || is_standard_stack(cluster) {
                return format!("{cluster}{vowel}");
            }
            let tokens = tokenize(cluster);
            if tokens.len() < 2 {
                return format!("{cluster}{vowel}");
            }
            let fused = format!("{}{}", tokens[0], tokens[1]);
            if PREFIXED_STACKS
                .iter()
                .any(|p| p.eq_ignore_ascii_case(&fused))
            {
                format!("{}{}{}", tokens[0], tokens[1..].join("+"), vowel)
            } else {
                format!("{}{}", tokens.join("+"), vowel)
            }
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_stacks() {
        for cluster in ["bsgr", "bl", "dr", "rk", "mkh", "lh", "gry", "sgr"] {
            assert!(is_standard_stack(cluster), "{cluster} should be standard");
        }
    }

    #[test]
    fn test_non_standard_stacks() {
        for cluster in ["kr+s", "tk", "pn", "gg"] {
            assert!(!is_standard_stack(cluster), "{cluster} should not be standard");
        }
    }

    #[test]
    fn test_separators_left_alone_for_standard() {
        assert_eq!(add_stack_separators("bsgrubs"), "bsgrubs");
        assert_eq!(add_stack_separators("bla"), "bla");
    }

    #[test]
    fn test_separators_inserted_for_sanskrit() {
        assert_eq!(add_stack_separators("tka"), "t+ka");
    }

    #[test]
    fn test_explicit_plus_respected() {
        assert_eq!(add_stack_separators("paN+Di"), "paN+Di");
    }
}
