//! Retargetable code generation from a typed pseudo-AST.
//!
//! A producer (typically a translator reading some source language) builds
//! a [`Node`] tree describing a whole program in language-neutral terms:
//! assignments, loops, calls, classes, each annotated with a semantic
//! [`PseudoType`]. `pseudogen` turns that tree into idiomatic source for a
//! target language.
//!
//! # Architecture
//!
//! ```text
//!                    ┌──────────── Profile ─────────────┐
//! Node tree ──> middlewares ──> Renderer ──> source text
//!   (tree)     (declaration,    (template table, optionals,
//!               naming,          overrides, type table,
//!               imports)         standard library)
//! ```
//!
//! Each target is a [`Language`] producing a [`Profile`]. Profiles are
//! data: one template per node tag written in a small directive language
//! (see [`template`]), plus named overrides for what templates cannot
//! express.
//!
//! # Example
//!
//! ```
//! use pseudogen::{Node, generate};
//!
//! let module = Node::module()
//!     .statement(Node::assignment(Node::local("egg", "Int"), Node::int(42)))
//!     .build();
//!
//! let source = generate(module, "csharp").unwrap();
//! assert!(source.contains("var egg = 42;"));
//! ```

pub mod config;
pub mod error;
pub mod generate;
pub mod middleware;
pub mod output;
pub mod profile;
pub mod registry;
pub mod template;
pub mod traits;
pub mod tree;

// Re-exports: tree
pub use tree::{Attr, Kind, ModuleBuilder, Node, PseudoType, Tag};

// Re-exports: errors
pub use error::{ConfigError, GenerateError, TemplateError, TreeError};

// Re-exports: generation
pub use config::{Config, LanguageConfig, NamingConfig};
pub use generate::{generate, generate_with, render_module};
pub use profile::{Indent, Profile, ProfileBuilder, Switch, TypeSyntax, TypeTable};
pub use traits::Language;

// Re-exports: registry
pub use registry::{language, language_for_extension, languages, register_language};

// Re-exports: built-in targets
#[cfg(feature = "target-csharp")]
pub use output::{CSHARP, CSharp};
