//! Language profiles: everything needed to emit one target language.
//!
//! A profile bundles the template table (one entry per node tag), the
//! optional present/fallback pairs, named overrides, the type table, the
//! standard-library table, indentation, and the middleware pipeline. It is
//! immutable once built and shared read-only by every generation run.

mod library;
mod types;

pub use library::{Library, LibraryEntry};
pub use types::{TypeSyntax, TypeTable};

use crate::error::{GenerateError, TemplateError};
use crate::middleware::Middleware;
use crate::template::{Path, Renderer, Template};
use crate::tree::{Node, Tag};
use std::collections::HashMap;
use std::fmt;

/// A named escape hatch for output the directive language cannot express.
///
/// Receives the renderer, the node being rendered and the current depth, and
/// returns the rendered fragment (first line unindented, like any template).
pub type Override = fn(&Renderer<'_>, &Node, usize) -> Result<String, GenerateError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndentUnit {
    Spaces,
    Tabs,
}

/// One indentation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Indent {
    pub unit: IndentUnit,
    pub width: usize,
}

impl Indent {
    pub fn spaces(width: usize) -> Self {
        Self {
            unit: IndentUnit::Spaces,
            width,
        }
    }

    pub fn tabs() -> Self {
        Self {
            unit: IndentUnit::Tabs,
            width: 1,
        }
    }

    /// The prefix for a line at `depth`.
    pub fn at(&self, depth: usize) -> String {
        let c = match self.unit {
            IndentUnit::Spaces => " ",
            IndentUnit::Tabs => "\t",
        };
        c.repeat(self.width * depth)
    }
}

/// A template choice keyed on one attribute.
///
/// Node-valued discriminants select by the child's tag name, booleans by
/// `true`/`false`, text by its value, and unset optionals by `none`.
#[derive(Debug, Clone)]
pub struct Switch {
    on: String,
    cases: Vec<(String, String)>,
    default: Option<String>,
}

impl Switch {
    pub fn on(attribute: &str) -> Self {
        Self {
            on: attribute.to_string(),
            cases: Vec::new(),
            default: None,
        }
    }

    pub fn case(mut self, key: &str, template: &str) -> Self {
        self.cases.push((key.to_string(), template.to_string()));
        self
    }

    pub fn default(mut self, template: &str) -> Self {
        self.default = Some(template.to_string());
        self
    }

    fn compile(self, owner: &str) -> Result<CompiledSwitch, TemplateError> {
        let on = Path::parse(&self.on).ok_or_else(|| TemplateError::InvalidDirective {
            owner: owner.to_string(),
            directive: self.on.clone(),
        })?;
        let cases = self
            .cases
            .into_iter()
            .map(|(key, source)| Ok((key, Template::parse(owner, &source)?)))
            .collect::<Result<Vec<_>, TemplateError>>()?;
        let default = self
            .default
            .map(|source| Template::parse(owner, &source))
            .transpose()?;
        Ok(CompiledSwitch { on, cases, default })
    }
}

#[derive(Debug, Clone)]
pub(crate) struct CompiledSwitch {
    pub(crate) on: Path,
    cases: Vec<(String, Template)>,
    default: Option<Template>,
}

impl CompiledSwitch {
    pub(crate) fn select(&self, key: &str) -> Option<&Template> {
        self.cases
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, t)| t)
            .or(self.default.as_ref())
    }
}

#[derive(Debug, Clone)]
pub(crate) enum Entry {
    Template(Template),
    Switch(CompiledSwitch),
}

/// An immutable description of one target language.
pub struct Profile {
    name: String,
    extension: String,
    indent: Indent,
    terminator: String,
    middlewares: Vec<Box<dyn Middleware>>,
    types: TypeTable,
    entries: HashMap<Tag, Entry>,
    optionals: HashMap<Tag, HashMap<String, (Template, Template)>>,
    overrides: HashMap<String, Override>,
    library: Library,
}

impl fmt::Debug for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Profile")
            .field("name", &self.name)
            .field("extension", &self.extension)
            .field("indent", &self.indent)
            .field(
                "middlewares",
                &self.middlewares.iter().map(|m| m.name()).collect::<Vec<_>>(),
            )
            .field("templates", &self.entries.len())
            .finish_non_exhaustive()
    }
}

impl Profile {
    pub fn builder(name: &str, extension: &str) -> ProfileBuilder {
        ProfileBuilder {
            profile: Profile {
                name: name.to_string(),
                extension: extension.to_string(),
                indent: Indent::spaces(4),
                terminator: String::new(),
                middlewares: Vec::new(),
                types: TypeTable::new(),
                entries: HashMap::new(),
                optionals: HashMap::new(),
                overrides: HashMap::new(),
                library: Library::default(),
            },
            error: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn indent(&self) -> Indent {
        self.indent
    }

    /// Appended to simple statements in `stmts` blocks.
    pub fn terminator(&self) -> &str {
        &self.terminator
    }

    pub fn middlewares(&self) -> &[Box<dyn Middleware>] {
        &self.middlewares
    }

    pub fn types(&self) -> &TypeTable {
        &self.types
    }

    pub fn library(&self) -> &Library {
        &self.library
    }

    /// Whether the table has an entry for `tag`.
    pub fn supports(&self, tag: Tag) -> bool {
        self.entries.contains_key(&tag)
    }

    pub(crate) fn entry(&self, tag: Tag) -> Option<&Entry> {
        self.entries.get(&tag)
    }

    pub(crate) fn optional(&self, tag: Tag, name: &str) -> Option<&(Template, Template)> {
        self.optionals.get(&tag)?.get(name)
    }

    pub(crate) fn override_fn(&self, name: &str) -> Option<Override> {
        self.overrides.get(name).copied()
    }
}

/// Builds a [`Profile`], parsing every template up front.
///
/// The first malformed template is reported by [`ProfileBuilder::build`].
pub struct ProfileBuilder {
    profile: Profile,
    error: Option<TemplateError>,
}

impl ProfileBuilder {
    pub fn indent(mut self, indent: Indent) -> Self {
        self.profile.indent = indent;
        self
    }

    pub fn terminator(mut self, terminator: &str) -> Self {
        self.profile.terminator = terminator.to_string();
        self
    }

    pub fn middleware(mut self, middleware: impl Middleware + 'static) -> Self {
        self.profile.middlewares.push(Box::new(middleware));
        self
    }

    pub fn types(mut self, types: TypeTable) -> Self {
        self.profile.types = types;
        self
    }

    pub fn template(mut self, tag: Tag, source: &str) -> Self {
        if let Some(template) = self.parse(tag.as_str(), source) {
            self.profile.entries.insert(tag, Entry::Template(template));
        }
        self
    }

    pub fn switch(mut self, tag: Tag, switch: Switch) -> Self {
        match switch.compile(tag.as_str()) {
            Ok(compiled) => {
                self.profile.entries.insert(tag, Entry::Switch(compiled));
            }
            Err(e) => self.fail(e),
        }
        self
    }

    /// Register the `%<.name>` pair for `tag`: `present` renders when the
    /// attribute is set and non-empty, `fallback` otherwise.
    pub fn optional(mut self, tag: Tag, name: &str, present: &str, fallback: &str) -> Self {
        let owner = format!("{tag}.{name}");
        let (Some(present), Some(fallback)) =
            (self.parse(&owner, present), self.parse(&owner, fallback))
        else {
            return self;
        };
        self.profile
            .optionals
            .entry(tag)
            .or_default()
            .insert(name.to_string(), (present, fallback));
        self
    }

    pub fn override_fn(mut self, name: &str, f: Override) -> Self {
        self.profile.overrides.insert(name.to_string(), f);
        self
    }

    pub fn std_function(
        mut self,
        namespace: &str,
        function: &str,
        source: &str,
        dependency: Option<&str>,
    ) -> Self {
        let owner = format!("{namespace}.{function}");
        if let Some(template) = self.parse(&owner, source) {
            self.profile.library.insert_function(
                namespace,
                function,
                LibraryEntry {
                    template,
                    dependency: dependency.map(str::to_string),
                },
            );
        }
        self
    }

    pub fn std_method(
        mut self,
        receiver: &str,
        message: &str,
        source: &str,
        dependency: Option<&str>,
    ) -> Self {
        let owner = format!("{receiver}.{message}");
        if let Some(template) = self.parse(&owner, source) {
            self.profile.library.insert_method(
                receiver,
                message,
                LibraryEntry {
                    template,
                    dependency: dependency.map(str::to_string),
                },
            );
        }
        self
    }

    /// Semantic type names whose use requires a dependency.
    pub fn type_dependency(mut self, type_name: &str, dependency: &str) -> Self {
        self.profile
            .library
            .insert_type_dependency(type_name, dependency);
        self
    }

    pub fn build(self) -> Result<Profile, TemplateError> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.profile),
        }
    }

    fn parse(&mut self, owner: &str, source: &str) -> Option<Template> {
        match Template::parse(owner, source) {
            Ok(template) => Some(template),
            Err(e) => {
                self.fail(e);
                None
            }
        }
    }

    fn fail(&mut self, error: TemplateError) {
        self.error.get_or_insert(error);
    }
}
