//! Configuration loader for the lexer.
//!
//! `defaults/minilexer.default.toml` is embedded into the library so that the
//! documented defaults and the runtime behavior stay in sync. Callers layer
//! their own files or overrides on top of those defaults via [`Loader`] before
//! deserializing into [`LexerConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/minilexer.default.toml");

static DEFAULTS: Lazy<LexerConfig> =
    Lazy::new(|| load_defaults().expect("embedded defaults to deserialize"));

/// Top-level configuration carried by every [`Lexer`](crate::Lexer).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LexerConfig {
    pub keywords: KeywordConfig,
}

/// Knobs consulted by the keyword rule.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct KeywordConfig {
    /// Reject a keyword match immediately followed by a word character.
    pub word_boundary: bool,
    /// Characters treated as word characters besides alphanumerics.
    pub extra_word_chars: String,
}

impl LexerConfig {
    /// Whether `c` continues a word for keyword boundary purposes.
    pub fn is_word_char(&self, c: char) -> bool {
        c.is_alphanumeric() || self.keywords.extra_word_chars.contains(c)
    }
}

impl Default for LexerConfig {
    fn default() -> Self {
        DEFAULTS.clone()
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override, e.g. `keywords.word_boundary`.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<LexerConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<LexerConfig, ConfigError> {
    Loader::new().build()
}
