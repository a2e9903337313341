//! Entry points: tree in, target source out.

use crate::config::Config;
use crate::error::GenerateError;
use crate::middleware;
use crate::profile::Profile;
use crate::registry;
use crate::template::Renderer;
use crate::tree::{Kind, Node};

/// Generate source for `module` in `language` with default settings.
pub fn generate(module: Node, language: &str) -> Result<String, GenerateError> {
    generate_with(module, language, &Config::default())
}

/// Generate source for `module` in `language`, applying `config`.
pub fn generate_with(module: Node, language: &str, config: &Config) -> Result<String, GenerateError> {
    let target = registry::language(language)
        .ok_or_else(|| GenerateError::UnknownLanguage(language.to_string()))?;
    let profile = target.profile(&config.language(language))?;
    render_module(module, &profile)
}

/// Run `profile`'s middleware pipeline over `module`, then render it.
///
/// The result has no trailing whitespace.
pub fn render_module(module: Node, profile: &Profile) -> Result<String, GenerateError> {
    tracing::debug!(language = profile.name(), "generating");
    let tree = middleware::run(module, profile);
    let renderer = Renderer::new(profile).declaring(declared_types(&tree));
    let output = renderer.render(&tree, 0)?;
    tracing::debug!(language = profile.name(), bytes = output.len(), "generated");
    Ok(output.trim_end().to_string())
}

/// Class and exception names a module defines for itself.
fn declared_types(tree: &Node) -> Vec<String> {
    let mut names = Vec::new();
    tree.walk(&mut |node| match &node.kind {
        Kind::ClassDefinition { name, .. } | Kind::CustomException { name, .. } => {
            names.push(name.clone())
        }
        _ => {}
    });
    names
}
