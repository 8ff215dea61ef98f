//! Runtime options for index construction.
//!
//! Options are plain values; the TOML loader reads an `[index]` table.

use crate::{
    MAX_INDEX_COLUMNS,
    db::index::LegacyIndexRebuild,
    error::{ErrorClass, ErrorOrigin, InternalError},
};
use serde::Deserialize;
use std::{fmt, sync::Arc};
use thiserror::Error as ThisError;

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("invalid options: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("max_index_columns must be between 1 and {max}, got {value}")]
    MaxIndexColumns { value: usize, max: usize },
}

impl From<ConfigError> for InternalError {
    fn from(err: ConfigError) -> Self {
        Self::new(ErrorClass::Unsupported, ErrorOrigin::Interface, err.to_string())
    }
}

///
/// Options
///
/// `legacy` is the rebuild hook for tables in the legacy storage format;
/// it is never read from configuration.
///

#[derive(Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Options {
    pub debug: bool,
    pub max_index_columns: usize,

    #[serde(skip)]
    legacy: Option<Arc<dyn LegacyIndexRebuild>>,
}

impl Options {
    /// Enable `[debug]` trace lines.
    #[must_use]
    pub fn debug(mut self) -> Self {
        self.debug = true;
        self
    }

    #[must_use]
    pub fn with_max_index_columns(mut self, max: usize) -> Self {
        self.max_index_columns = max;
        self
    }

    #[must_use]
    pub fn with_legacy(mut self, legacy: Arc<dyn LegacyIndexRebuild>) -> Self {
        self.legacy = Some(legacy);
        self
    }

    #[must_use]
    pub fn legacy(&self) -> Option<&dyn LegacyIndexRebuild> {
        self.legacy.as_deref()
    }

    /// Parse options from a TOML document with an optional `[index]` table.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        #[derive(Default, Deserialize)]
        #[serde(default, deny_unknown_fields)]
        struct ConfigFile {
            index: Options,
        }

        let options = toml::from_str::<ConfigFile>(source)?.index;
        options.validate()?;

        Ok(options)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_index_columns == 0 || self.max_index_columns > MAX_INDEX_COLUMNS {
            return Err(ConfigError::MaxIndexColumns {
                value: self.max_index_columns,
                max: MAX_INDEX_COLUMNS,
            });
        }

        Ok(())
    }

    pub(crate) fn debug_log(&self, s: impl Into<String>) {
        if self.debug {
            println!("[debug] {}", s.into());
        }
    }
}

impl Default for Options {
    fn default() -> Self {
        Self {
            debug: false,
            max_index_columns: MAX_INDEX_COLUMNS,
            legacy: None,
        }
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("debug", &self.debug)
            .field("max_index_columns", &self.max_index_columns)
            .field("legacy", &self.legacy.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let options = Options::from_toml_str("").unwrap();

        assert!(!options.debug);
        assert_eq!(options.max_index_columns, MAX_INDEX_COLUMNS);
        assert!(options.legacy().is_none());
    }

    #[test]
    fn index_table_overrides_fields() {
        let options = Options::from_toml_str(
            r"
            [index]
            debug = true
            max_index_columns = 4
            ",
        )
        .unwrap();

        assert!(options.debug);
        assert_eq!(options.max_index_columns, 4);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = Options::from_toml_str("[index]\nbogus = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn out_of_range_column_limit_is_rejected() {
        let err = Options::from_toml_str("[index]\nmax_index_columns = 0").unwrap_err();
        assert!(matches!(err, ConfigError::MaxIndexColumns { value: 0, .. }));

        let internal = InternalError::from(err);
        assert_eq!(internal.origin, ErrorOrigin::Interface);
    }
}
