//! Per-language output configuration.
//!
//! Loaded from `.pseudogen/config.toml` under a project root. Each table is
//! keyed by language name; unset fields keep the profile's defaults.
//!
//! ```toml
//! [csharp]
//! indent = 2
//!
//! [csharp.naming]
//! method = "camel"
//! ```

use crate::error::ConfigError;
use crate::middleware::NameCase;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Identifier casing overrides.
#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct NamingConfig {
    /// Locals, parameters, attributes and instance variables.
    pub normal: Option<NameCase>,
    /// Method definitions and method calls.
    pub method: Option<NameCase>,
    /// Function definitions and references to them.
    pub function: Option<NameCase>,
}

/// Settings for one target language.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct LanguageConfig {
    /// Spaces per indentation level.
    pub indent: Option<usize>,
    /// Indent with tabs instead of spaces.
    pub tabs: Option<bool>,
    pub naming: NamingConfig,
}

/// Root configuration structure.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(flatten)]
    pub languages: HashMap<String, LanguageConfig>,
}

impl Config {
    /// Load configuration for a project. A missing file yields the defaults.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let path = root.join(".pseudogen").join("config.toml");
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_file(&path)
    }

    /// Load configuration from a file path.
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Settings for `language`, or the defaults when it has no table.
    pub fn language(&self, language: &str) -> LanguageConfig {
        self.languages.get(language).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.language("csharp"), LanguageConfig::default());
    }

    #[test]
    fn test_load_project_config() {
        let dir = TempDir::new().unwrap();
        let config_dir = dir.path().join(".pseudogen");
        std::fs::create_dir_all(&config_dir).unwrap();

        let mut file = std::fs::File::create(config_dir.join("config.toml")).unwrap();
        writeln!(
            file,
            r#"
[csharp]
indent = 2

[csharp.naming]
method = "camel"
"#
        )
        .unwrap();

        let config = Config::load(dir.path()).unwrap();
        let csharp = config.language("csharp");
        assert_eq!(csharp.indent, Some(2));
        assert_eq!(csharp.tabs, None);
        assert_eq!(csharp.naming.method, Some(NameCase::Camel));
        assert_eq!(csharp.naming.normal, None);
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = TempDir::new().unwrap();
        assert_eq!(Config::load(dir.path()).unwrap(), Config::default());
    }

    #[test]
    fn test_parse_error() {
        let result = Config::from_toml("[csharp]\nindent = \"wide\"\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_unknown_casing_rejected() {
        let result = Config::from_toml("[csharp.naming]\nmethod = \"kebab\"\n");
        assert!(result.is_err());
    }
}
