//! The structured form of one Tibetan syllable.

/// The seven positions of an EWTS syllable:
/// [prescript] [superscript] ROOT [subscript] [vowel] [postscript1] [postscript2]
///
/// `root` is always present. `subscript` may hold a joined pair such as
/// `"r+w"` for the legal double subscripts. `vowel` defaults to the
/// inherent `a`, which the builder never writes. Records are produced by
/// the parser, consumed once by the builder or validator, and never
/// mutated in between.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyllableComponents {
    pub root: String,
    pub prescript: Option<String>,
    pub superscript: Option<String>,
    pub subscript: Option<String>,
    pub vowel: String,
    pub postscript1: Option<String>,
    pub postscript2: Option<String>,
}

impl SyllableComponents {
    pub fn new(root: impl Into<String>) -> Self {
        SyllableComponents {
            root: root.into(),
            prescript: None,
            superscript: None,
            subscript: None,
            vowel: "a".into(),
            postscript1: None,
            postscript2: None,
        }
    }

    /// The subscript letters in stacking order (empty when none).
    pub fn subscript_letters(&self) -> impl Iterator<Item = &str> {
        self.subscript.as_deref().unwrap_or("").split('+').filter(|s| !s.is_empty())
    }

    pub fn has_explicit_vowel(&self) -> bool {
        self.vowel != "a"
    }
}
