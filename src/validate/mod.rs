//! EWTS validation with positioned diagnostics.
//!
//! Validation never fails: whatever the input, the result enumerates zero
//! or more errors. Unknown characters are reported first, per character;
//! structurally broken syllables are re-parsed leniently so the offending
//! position pair can be named, with a one-edit suggestion where one exists.

use std::fmt;

use serde::Serialize;
use tracing::debug_span;

use crate::mappings::CharacterTables;
use crate::normalize::normalize;
use crate::parser;
use crate::rules;
use crate::syllable::SyllableComponents;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    UnknownCharacter,
    InvalidPrescript,
    InvalidSuperscript,
    InvalidSubscript,
    IllegalDoubleSubscript,
    InvalidPostscript,
    InvalidStructure,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    pub kind: ErrorKind,
    /// Character offset into the validated text (token start for
    /// structural errors).
    pub position: usize,
    /// The syllable the error belongs to.
    pub syllable: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:?}] at position {}: {}",
            self.kind, self.position, self.message
        )?;
        if let Some(s) = &self.suggestion {
            write!(f, " (try '{s}')")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<ValidationError>,
}

impl ValidationResult {
    pub fn summary(&self) -> String {
        if self.is_valid {
            return "valid Extended Wylie".into();
        }
        let mut lines = vec![format!("{} error(s):", self.errors.len())];
        for error in &self.errors {
            lines.push(format!("  - {error}"));
        }
        lines.join("\n")
    }
}

const SEPARATORS: [char; 10] = [' ', '\t', '\n', '/', '|', '.', ';', '!', '*', '_'];

/// Split text into syllable-candidate tokens with their char offsets.
fn tokenize(text: &str) -> Vec<(usize, &str)> {
    let mut tokens = Vec::new();
    let mut start = None;
    let mut char_pos = 0;
    let mut byte_start = 0;
    for (byte_pos, c) in text.char_indices() {
        if SEPARATORS.contains(&c) {
            if let Some(s) = start.take() {
                tokens.push((s, &text[byte_start..byte_pos]));
            }
        } else if start.is_none() {
            start = Some(char_pos);
            byte_start = byte_pos;
        }
        char_pos += 1;
    }
    if let Some(s) = start {
        tokens.push((s, &text[byte_start..]));
    }
    tokens
}

/// Validate EWTS text; always returns a complete result.
pub fn validate(text: &str) -> ValidationResult {
    let span = debug_span!("validate", len = text.len());
    let _enter = span.enter();

    let mut errors = Vec::new();
    for (start, token) in tokenize(text) {
        validate_token(token, start, &mut errors);
    }
    ValidationResult {
        is_valid: errors.is_empty(),
        errors,
    }
}

fn is_known_char(tables: &CharacterTables, c: char) -> bool {
    matches!(c, '+' | '(' | ')' | '?') || tables.key_chars().any(|k| k == c)
}

fn validate_token(token: &str, start: usize, errors: &mut Vec<ValidationError>) {
    let tables = CharacterTables::global();
    let norm = normalize(token);

    let mut has_unknown = false;
    for (offset, c) in norm.chars().enumerate() {
        if !is_known_char(tables, c) {
            errors.push(ValidationError {
                kind: ErrorKind::UnknownCharacter,
                position: start + offset,
                syllable: token.to_string(),
                message: format!("character {c:?} is not part of EWTS"),
                suggestion: None,
            });
            has_unknown = true;
        }
    }
    if has_unknown {
        // no point second-guessing the structure of a token that is not
        // even spelled in the alphabet
        return;
    }

    let mut i = 0;
    while i < norm.len() {
        let rest = &norm[i..];
        let c = rest.chars().next().expect("i is on a char boundary");

        if c.is_ascii_digit() || !is_run_char(c) {
            i += c.len_utf8();
            continue;
        }

        let run_len = rest
            .char_indices()
            .find(|(_, rc)| !is_run_char(*rc))
            .map_or(rest.len(), |(idx, _)| idx);
        let run = &rest[..run_len];
        validate_run(run, token, start, errors);
        i += run_len;
    }
}

fn is_run_char(c: char) -> bool {
    c.is_ascii_alphabetic() || matches!(c, '\'' | '-' | '~')
}

/// Validate one letter run as a single syllable (with optional trailing
/// Sanskrit marks).
fn validate_run(run: &str, token: &str, start: usize, errors: &mut Vec<ValidationError>) {
    let tables = CharacterTables::global();

    if parser::parse_syllable(run).is_ok() {
        return;
    }
    // A syllable may carry trailing marks (oM, hUM, ka~M).
    if let Some((_, len)) = parser::parse_prefix(run) {
        let mut rest = &run[len..];
        while let Some((key, _)) = tables.match_mark(rest) {
            rest = &rest[key.len()..];
        }
        if rest.is_empty() {
            return;
        }
    } else {
        // even a bare mark run (M, ~M) is fine on its own
        let mut rest = run;
        while let Some((key, _)) = tables.match_mark(rest) {
            rest = &rest[key.len()..];
        }
        if rest.is_empty() {
            return;
        }
    }

    // The strict reading failed; recover the segmentation without pair
    // legality and name what is wrong with it.
    if let Some((components, len)) = parser::parse_lenient(run) {
        if len == run.len() {
            let specific = classify(&components, run, token, start);
            if !specific.is_empty() {
                errors.extend(specific);
                return;
            }
        }
    }

    let furthest = parser::parse_syllable(run)
        .err()
        .map_or(0, |e| e.position);
    errors.push(ValidationError {
        kind: ErrorKind::InvalidStructure,
        position: start,
        syllable: token.to_string(),
        message: format!("'{run}' does not form a valid syllable (parse stops at offset {furthest})"),
        suggestion: None,
    });
}

fn classify(
    components: &SyllableComponents,
    run: &str,
    token: &str,
    start: usize,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let root = &components.root;

    if let Some(p) = &components.prescript {
        if !rules::prescript_allows(p, root) {
            errors.push(ValidationError {
                kind: ErrorKind::InvalidPrescript,
                position: start,
                syllable: token.to_string(),
                message: format!("prescript '{p}' cannot precede root '{root}'"),
                suggestion: suggest_replacement(run, 0, p.len(), &rules::PRESCRIPTS),
            });
        }
    }

    if let Some(s) = &components.superscript {
        if !rules::superscript_allows(s, root) {
            let offset = components.prescript.as_ref().map_or(0, String::len);
            errors.push(ValidationError {
                kind: ErrorKind::InvalidSuperscript,
                position: start,
                syllable: token.to_string(),
                message: format!("superscript '{s}' cannot sit above root '{root}'"),
                suggestion: suggest_replacement(run, offset, s.len(), &rules::SUPERSCRIPTS),
            });
        }
    }

    let letters: Vec<&str> = components.subscript_letters().collect();
    match letters.as_slice() {
        [single] => {
            if !rules::subscript_allows(single, root) {
                errors.push(ValidationError {
                    kind: ErrorKind::InvalidSubscript,
                    position: start,
                    syllable: token.to_string(),
                    message: format!("subscript '{single}' cannot sit beneath root '{root}'"),
                    suggestion: None,
                });
            }
        }
        [first, second] => {
            if !rules::double_subscript_allows(first, second, root) {
                errors.push(ValidationError {
                    kind: ErrorKind::IllegalDoubleSubscript,
                    position: start,
                    syllable: token.to_string(),
                    message: format!(
                        "'{first}+{second}' is not a legal double subscript beneath '{root}'"
                    ),
                    suggestion: None,
                });
            }
        }
        _ => {}
    }

    if let Some(p1) = &components.postscript1 {
        if !rules::is_postscript1(p1) {
            errors.push(ValidationError {
                kind: ErrorKind::InvalidPostscript,
                position: start,
                syllable: token.to_string(),
                message: format!("'{p1}' is not a valid suffix"),
                suggestion: None,
            });
        }
    }
    if let Some(p2) = &components.postscript2 {
        if !rules::is_postscript2(p2) {
            errors.push(ValidationError {
                kind: ErrorKind::InvalidPostscript,
                position: start,
                syllable: token.to_string(),
                message: format!("'{p2}' is not a valid second suffix"),
                suggestion: None,
            });
        }
    }

    errors
}

/// A one-character edit that repairs the run: substitute each alternative
/// letter at the offending position, falling back to dropping it.
fn suggest_replacement(
    run: &str,
    offset: usize,
    len: usize,
    alternatives: &[&str],
) -> Option<String> {
    for alt in alternatives {
        let candidate = format!("{}{}{}", &run[..offset], alt, &run[offset + len..]);
        if candidate != run && parser::parse_syllable(&candidate).is_ok() {
            return Some(candidate);
        }
    }
    let dropped = format!("{}{}", &run[..offset], &run[offset + len..]);
    parser::parse_syllable(&dropped).is_ok().then_some(dropped)
}
