//! Bidirectional transliteration between Extended Wylie (EWTS), ACIP and
//! Tibetan Unicode, plus EWTS validation.
//!
//! The engine is a pure, stateless computation over immutable mapping and
//! rule tables: every entry point is a deterministic function of its input,
//! the tables are built once behind `OnceLock` and safely shared across
//! threads, and nothing blocks or allocates beyond the output string.
//!
//! ```
//! use ewts_engine::{ewts_to_unicode, unicode_to_ewts, validate};
//!
//! assert_eq!(ewts_to_unicode("bla ma"), "བླ་མ");
//! assert_eq!(unicode_to_ewts("བླ་མ"), "bla ma");
//! assert!(validate("bsgrubs").is_valid);
//! assert!(!validate("gka").is_valid);
//! ```

pub mod acip;
pub mod builder;
pub mod convert;
pub mod mappings;
pub mod normalize;
pub mod parser;
pub mod reverse;
pub mod rules;
pub mod syllable;
pub mod trace_init;
pub mod unicode;
pub mod validate;

pub use acip::{acip_to_ewts, acip_to_unicode, ewts_to_acip, unicode_to_acip, AcipError};
pub use builder::build_syllable;
pub use convert::{
    ewts_to_unicode, ewts_to_unicode_with, unicode_to_ewts, unicode_to_ewts_with, ConvertError,
    ConvertOptions, ErrorMode, ERROR_MARKER,
};
pub use mappings::{CharacterTables, MappingConfigError};
pub use normalize::normalize;
pub use parser::{parse_prefix, parse_syllable, SyllableParseError};
pub use reverse::{assemble_wylie, parse_unicode_syllable, ReverseSyllable};
pub use syllable::SyllableComponents;
pub use validate::{validate, ErrorKind, ValidationError, ValidationResult};
