use std::collections::BTreeMap;

use serde::Deserialize;

/// Raw table layout of a mappings TOML file.
#[derive(Debug, Deserialize)]
pub(crate) struct MappingConfig {
    pub consonants: BTreeMap<String, String>,
    pub subjoined: BTreeMap<String, String>,
    pub vowels: BTreeMap<String, String>,
    pub subscripts: BTreeMap<String, String>,
    pub punctuation: BTreeMap<String, String>,
    pub numerals: BTreeMap<String, String>,
    pub marks: BTreeMap<String, String>,
}

#[derive(Debug, thiserror::Error)]
pub enum MappingConfigError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("[{table}] table is empty")]
    Empty { table: &'static str },
    #[error("non-ASCII key in [{table}]: {key}")]
    NonAsciiKey { table: &'static str, key: String },
    #[error("non-Tibetan value for key '{key}' in [{table}]")]
    NonTibetanValue { table: &'static str, key: String },
    #[error("character tables already initialized")]
    AlreadyInitialized,
}

/// Parse TOML text into the raw table maps, validating that every key is
/// ASCII and every value stays inside the Tibetan block.
pub(crate) fn parse_mappings_toml(toml_str: &str) -> Result<MappingConfig, MappingConfigError> {
    let config: MappingConfig =
        toml::from_str(toml_str).map_err(|e| MappingConfigError::Parse(e.to_string()))?;

    for (table, map, value_may_be_empty) in [
        ("consonants", &config.consonants, false),
        ("subjoined", &config.subjoined, false),
        ("vowels", &config.vowels, true),
        ("subscripts", &config.subscripts, false),
        ("punctuation", &config.punctuation, false),
        ("numerals", &config.numerals, false),
        ("marks", &config.marks, false),
    ] {
        if map.is_empty() {
            return Err(MappingConfigError::Empty { table });
        }
        for (key, value) in map {
            if !key.is_ascii() || key.is_empty() {
                return Err(MappingConfigError::NonAsciiKey {
                    table,
                    key: key.clone(),
                });
            }
            // The inherent vowel legitimately maps to nothing.
            if value.is_empty() && !value_may_be_empty {
                return Err(MappingConfigError::NonTibetanValue {
                    table,
                    key: key.clone(),
                });
            }
            if !value.chars().all(|c| ('\u{0F00}'..='\u{0FFF}').contains(&c)) {
                return Err(MappingConfigError::NonTibetanValue {
                    table,
                    key: key.clone(),
                });
            }
        }
    }

    Ok(config)
}
