//! Registry of target languages.

use crate::traits::Language;
use std::sync::{OnceLock, PoisonError, RwLock};

/// Global language registry.
static LANGUAGES: RwLock<Vec<&'static dyn Language>> = RwLock::new(Vec::new());
static LANGUAGES_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Register a custom target language.
///
/// A later registration under an existing name does not replace the first.
pub fn register_language(language: &'static dyn Language) {
    LANGUAGES
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .push(language);
}

fn init_languages() {
    LANGUAGES_INITIALIZED.get_or_init(|| {
        #[cfg(feature = "target-csharp")]
        {
            register_language(&crate::output::csharp::CSHARP);
        }
    });
}

/// Get a language by name.
pub fn language(name: &str) -> Option<&'static dyn Language> {
    init_languages();
    LANGUAGES
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .iter()
        .find(|l| l.name() == name)
        .copied()
}

/// Get a language by output file extension.
pub fn language_for_extension(ext: &str) -> Option<&'static dyn Language> {
    init_languages();
    LANGUAGES
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .iter()
        .find(|l| l.extension() == ext)
        .copied()
}

/// Get all registered languages.
pub fn languages() -> Vec<&'static dyn Language> {
    init_languages();
    LANGUAGES
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LanguageConfig;
    use crate::error::TemplateError;
    use crate::profile::Profile;

    struct Plain;

    impl Language for Plain {
        fn name(&self) -> &'static str {
            "registry-test-plain"
        }

        fn extension(&self) -> &'static str {
            "plain"
        }

        fn profile(&self, _config: &LanguageConfig) -> Result<Profile, TemplateError> {
            Profile::builder(self.name(), self.extension()).build()
        }
    }

    static PLAIN: Plain = Plain;

    #[test]
    fn test_register_custom_language() {
        register_language(&PLAIN);
        let found = language("registry-test-plain").expect("registered language");
        assert_eq!(found.extension(), "plain");
        assert!(language_for_extension("plain").is_some());
        assert!(languages().iter().any(|l| l.name() == "registry-test-plain"));
    }

    #[test]
    fn test_unknown_language() {
        assert!(language("cobol").is_none());
    }

    #[test]
    #[cfg(feature = "target-csharp")]
    fn test_builtin_csharp() {
        let csharp = language("csharp").expect("csharp language");
        assert_eq!(csharp.extension(), "cs");
        assert_eq!(language_for_extension("cs").map(|l| l.name()), Some("csharp"));
    }
}
