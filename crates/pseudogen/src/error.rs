//! Error types for tree construction, profile building and generation.

use crate::tree::Tag;

/// Error raised while building a node or a semantic type.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TreeError {
    #[error("value {0} has no literal node shape")]
    UnsupportedLiteral(String),

    #[error("type `{name}` expects {expected} component(s), got {found}")]
    TypeArity {
        name: String,
        expected: &'static str,
        found: usize,
    },

    #[error("malformed type descriptor: {0}")]
    MalformedType(String),
}

/// Error raised while parsing a template at profile construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    #[error("unterminated directive in template for `{owner}`: {source_text}")]
    Unterminated { owner: String, source_text: String },

    #[error("invalid directive `%<{directive}>` in template for `{owner}`")]
    InvalidDirective { owner: String, directive: String },
}

/// Error raised while loading a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Fatal generation error. Generation either succeeds fully or returns one of these.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GenerateError {
    #[error("unknown language: {0}")]
    UnknownLanguage(String),

    #[error("no template or override for node `{0}`")]
    NoTemplate(Tag),

    #[error("node `{tag}` has no attribute `{attribute}`")]
    MissingAttribute { tag: Tag, attribute: String },

    #[error("attribute `{attribute}` of node `{tag}` is not {expected}")]
    AttributeShape {
        tag: Tag,
        attribute: String,
        expected: &'static str,
    },

    #[error("directive `%<{directive}>` used by node `{tag}` is not defined by the profile")]
    UndefinedDirective { tag: Tag, directive: String },

    #[error("switch on `{discriminant}` for node `{tag}` matched no branch")]
    DiscriminantMismatch { tag: Tag, discriminant: String },

    #[error("type `{0}` has no entry in the type table")]
    UnknownType(String),

    #[error("standard call `{0}` is not supported by this language")]
    UnsupportedStandardCall(String),

    #[error(transparent)]
    Template(#[from] TemplateError),
}

impl GenerateError {
    /// Whether this error comes from a node that does not fit its template.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            GenerateError::NoTemplate(_)
                | GenerateError::MissingAttribute { .. }
                | GenerateError::AttributeShape { .. }
                | GenerateError::UndefinedDirective { .. }
                | GenerateError::UnsupportedStandardCall(_)
        )
    }
}
