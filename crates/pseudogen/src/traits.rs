//! Trait implemented by each target language.

use crate::config::LanguageConfig;
use crate::error::TemplateError;
use crate::profile::Profile;

/// A target language: a name plus a way to build its profile.
pub trait Language: Send + Sync {
    /// Language identifier (e.g., "csharp").
    fn name(&self) -> &'static str;

    /// File extension for output (e.g., "cs").
    fn extension(&self) -> &'static str;

    /// Build the profile, applying any user configuration.
    fn profile(&self, config: &LanguageConfig) -> Result<Profile, TemplateError>;
}
