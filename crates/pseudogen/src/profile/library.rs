//! Standard-library call table.
//!
//! Producers emit library operations abstractly: `standard_call` names a
//! namespace and function (`io.display`), `standard_method_call` a message
//! sent to a receiver whose semantic type picks the table row
//! (`List.length`). Each row is a template over the call node plus the
//! dependency the target needs imported for it.

use crate::template::Template;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryEntry {
    pub template: Template,
    pub dependency: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Library {
    functions: HashMap<(String, String), LibraryEntry>,
    methods: HashMap<(String, String), LibraryEntry>,
    type_dependencies: HashMap<String, String>,
}

impl Library {
    pub fn function(&self, namespace: &str, function: &str) -> Option<&LibraryEntry> {
        self.functions
            .get(&(namespace.to_string(), function.to_string()))
    }

    /// Look up a method by the receiver's base type name (`List`, `String`).
    pub fn method(&self, receiver: &str, message: &str) -> Option<&LibraryEntry> {
        self.methods.get(&(receiver.to_string(), message.to_string()))
    }

    /// The dependency a semantic type name pulls in, if any.
    pub fn type_dependency(&self, type_name: &str) -> Option<&str> {
        self.type_dependencies.get(type_name).map(String::as_str)
    }

    pub(crate) fn insert_function(&mut self, namespace: &str, function: &str, entry: LibraryEntry) {
        self.functions
            .insert((namespace.to_string(), function.to_string()), entry);
    }

    pub(crate) fn insert_method(&mut self, receiver: &str, message: &str, entry: LibraryEntry) {
        self.methods
            .insert((receiver.to_string(), message.to_string()), entry);
    }

    pub(crate) fn insert_type_dependency(&mut self, type_name: &str, dependency: &str) {
        self.type_dependencies
            .insert(type_name.to_string(), dependency.to_string());
    }
}
